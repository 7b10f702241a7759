use reaction_paths::io::{load_reaction_graph, write_results_csv};
use reaction_paths::pathways::{find_pathways, ProgressError, ProgressObserver};
use reaction_paths::{PathwayConfig, RateProvider, TextRateProvider};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::process;

/// Rewrites a single status line on stderr
struct StderrProgress;

impl ProgressObserver for StderrProgress {
    fn source_completed(&self, completed: usize, total: usize, _paths: usize) -> Result<(), ProgressError> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "\rSearched {}/{} source species", completed, total)?;
        if completed == total {
            writeln!(stderr)?;
        }
        Ok(())
    }
}

fn usage() -> ! {
    eprintln!("Usage: chemical_pathways <edges.csv> <rate-dir> <snapshot> [out.csv] [config.json]");
    process::exit(2);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        usage();
    }
    let edges_path = &args[1];
    let rate_dir = &args[2];
    let snapshot = &args[3];
    let output = args.get(4);

    let config = match args.get(5) {
        Some(path) => PathwayConfig::from_json_file(path)?,
        None => PathwayConfig::default(),
    };

    let graph = load_reaction_graph(edges_path, config.reaction_range)?;
    let rates = TextRateProvider::new(rate_dir).reaction_rates(snapshot)?;

    let results = find_pathways(graph, &rates, &config, &StderrProgress)?;

    println!("Pathways found: {}", results.len());
    if let Some(summary) = results.summary() {
        println!("Shortest timescale: {:.3e}", summary.min);
        println!("Longest timescale:  {:.3e}", summary.max);
        println!("Mean log10 timescale: {:.3}", summary.mean_log10);
    }

    if let Some(path) = output {
        let file = BufWriter::new(File::create(path)?);
        write_results_csv(&results, file)?;
        println!("Wrote pathways to {}", path);
    }

    Ok(())
}
