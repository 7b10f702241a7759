//! All-pairs pathway search over a frozen reaction graph.

pub mod finder;
pub mod progress;
pub mod results;

pub use finder::{PathwayFinder, SourcePathways};
pub use progress::{CancellationToken, NoProgress, ProgressCounter, ProgressError, ProgressObserver};
pub use results::{PathRecord, PathResultSet, TimescaleSummary};

use crate::config::PathwayConfig;
use crate::graph::{ReactionGraph, WeightedReactionGraph};
use crate::rates::ReactionRateTable;
use crate::timescale::TimescaleAssigner;
use crate::Result;

/// Weights `graph` from `rates` and freezes it according to `config`
pub fn prepare_graph(
    mut graph: ReactionGraph,
    rates: &ReactionRateTable,
    config: &PathwayConfig,
) -> Result<WeightedReactionGraph> {
    TimescaleAssigner::new(rates).assign(&mut graph)?;
    graph.freeze(config.unassigned_edges)
}

/// Runs a full pass: timescale assignment, freezing and the all-pairs search
pub fn find_pathways(
    graph: ReactionGraph,
    rates: &ReactionRateTable,
    config: &PathwayConfig,
    observer: &dyn ProgressObserver,
) -> Result<PathResultSet> {
    let weighted = prepare_graph(graph, rates, config)?;
    PathwayFinder::from_config(config).find_all_with_progress(&weighted, observer)
}
