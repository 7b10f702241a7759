use std::fs;
use std::io::Write;

use reaction_paths::graph::{NodeId, ReactionIndexRange};
use reaction_paths::io::{load_reaction_graph, read_edge_list, write_results_csv, write_results_json};
use reaction_paths::pathways::{find_pathways, NoProgress};
use reaction_paths::{Error, PathwayConfig, RateProvider, TextRateProvider, UnassignedEdgePolicy};

const EDGES: &str = "from,to\nO3,R1\nNO,R1\nR1,NO2\nNO2,R2\nR2,NO\nR2,O3\n";

#[test]
fn test_load_edge_list_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edges.csv");
    fs::write(&path, EDGES).unwrap();

    let graph = load_reaction_graph(&path, ReactionIndexRange::with_count(2)).unwrap();
    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 6);
    assert_eq!(graph.reaction_count(), 2);
    assert!(graph.vertex_by_name("NO2").is_some());
}

#[test]
fn test_columns_located_by_header() {
    let rows = read_edge_list("index,to,from\n0,R1,A\n1,B,R1\n".as_bytes()).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].from.as_deref(), Some("A"));
    assert_eq!(rows[0].to.as_deref(), Some("R1"));
}

#[test]
fn test_missing_column_is_malformed() {
    assert!(matches!(
        read_edge_list("source,to\nA,R1\n".as_bytes()),
        Err(Error::MalformedInput { row: 0, .. })
    ));
}

#[test]
fn test_empty_cell_is_malformed_with_row_number() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edges.csv");
    fs::write(&path, "from,to\nA,R1\n,B\nR1\n").unwrap();

    match load_reaction_graph(&path, ReactionIndexRange::with_count(1)) {
        Err(Error::MalformedInput { row, reason }) => {
            assert_eq!(row, 2);
            assert!(reason.contains("from"));
        }
        other => panic!("expected MalformedInput, got {:?}", other.map(|g| g.edge_count())),
    }
}

#[test]
fn test_text_rate_provider() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = fs::File::create(dir.path().join("surface_2100")).unwrap();
    writeln!(file, "# rates for R1..R3").unwrap();
    writeln!(file, "1.5e-3 2.0 # R1 and R2").unwrap();
    writeln!(file, "0").unwrap();
    drop(file);

    let provider = TextRateProvider::new(dir.path());
    let table = provider.reaction_rates("surface_2100").unwrap();
    assert_eq!(table.as_slice(), &[1.5e-3, 2.0, 0.0]);
    assert_eq!(table.rate(2, &ReactionIndexRange::with_count(3)), Some(2.0));
    assert_eq!(table.rate(4, &ReactionIndexRange::with_count(3)), None);

    assert!(matches!(provider.reaction_rates("missing"), Err(Error::Io(_))));
}

#[test]
fn test_invalid_rates_are_rejected() {
    match TextRateProvider::parse("1.0\n2.0 fast\n") {
        Err(Error::RateParse { line, value }) => {
            assert_eq!(line, 2);
            assert_eq!(value, "fast");
        }
        other => panic!("expected RateParse, got {:?}", other),
    }
    assert!(matches!(TextRateProvider::parse("-1.0"), Err(Error::RateParse { line: 1, .. })));
    assert!(matches!(TextRateProvider::parse("inf"), Err(Error::RateParse { .. })));
}

#[test]
fn test_config_from_json_uses_defaults_for_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "reaction_range": { "first": 1, "last": 2 }, "unassigned_edges": "unit" }"#,
    )
    .unwrap();

    let config = PathwayConfig::from_json_file(&path).unwrap();
    assert_eq!(config.reaction_range, ReactionIndexRange::with_count(2));
    assert_eq!(config.unassigned_edges, UnassignedEdgePolicy::Unit);
    assert!(config.parallel);
    assert_eq!(config.threads, None);

    assert_eq!(PathwayConfig::default().reaction_range, ReactionIndexRange::with_count(913));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = PathwayConfig {
        threads: Some(0),
        ..PathwayConfig::default()
    };
    assert!(matches!(config.validate(), Err(Error::Config(_))));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "reaction_range": { "first": 5, "last": 1 } }"#).unwrap();
    assert!(matches!(PathwayConfig::from_json_file(&path), Err(Error::Config(_))));

    let from_zero = PathwayConfig {
        reaction_range: ReactionIndexRange::new(0, 913),
        ..PathwayConfig::default()
    };
    assert!(matches!(from_zero.validate(), Err(Error::Config(_))));
}

#[test]
fn test_end_to_end_export() {
    let config = PathwayConfig {
        reaction_range: ReactionIndexRange::with_count(2),
        ..PathwayConfig::default()
    };
    let rows = read_edge_list(EDGES.as_bytes()).unwrap();
    let graph = reaction_paths::ReactionGraph::from_rows(rows, config.reaction_range).unwrap();
    let rates = TextRateProvider::parse("1.0 0.5").unwrap();

    let results = find_pathways(graph, &rates, &config, &NoProgress).unwrap();
    // O3 and NO reach NO2; NO2 reaches NO and O3; O3 <-> NO via both reactions
    assert_eq!(results.len(), 6);

    let o3_no = results.get_species("O3", "NO").unwrap();
    assert_eq!(
        o3_no.path,
        vec![
            NodeId::Species("O3".to_string()),
            NodeId::Reaction(1),
            NodeId::Species("NO2".to_string()),
            NodeId::Reaction(2),
            NodeId::Species("NO".to_string()),
        ]
    );
    assert!((o3_no.timescale - 3.0).abs() < 1e-12);

    let mut csv_out = Vec::new();
    write_results_csv(&results, &mut csv_out).unwrap();
    let csv_text = String::from_utf8(csv_out).unwrap();
    let mut lines = csv_text.lines();
    assert_eq!(lines.next(), Some("source,target,timescale,hops,path"));
    assert!(csv_text.contains("O3,NO,3.0,4,O3 R1 NO2 R2 NO"));
    assert_eq!(lines.count(), 6);

    let mut json_out = Vec::new();
    write_results_json(&results, &mut json_out).unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&json_out).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 6);
    assert_eq!(parsed[0]["source"]["kind"], "species");

    let summary = results.summary().unwrap();
    assert_eq!(summary.count, 6);
    assert!(summary.min <= summary.max);
}
