use reaction_paths::graph::{NodeId, ReactionGraph, ReactionIndexRange};
use reaction_paths::timescale::reaction_timescale;
use reaction_paths::{Error, ReactionRateTable, TimescaleAssigner, TIMESCALE_EPSILON};

fn species(name: &str) -> NodeId {
    NodeId::Species(name.to_string())
}

fn mechanism() -> ReactionGraph {
    // A + B -> R1 -> C ; C -> R2 -> D + A ; R3 absent from the graph
    ReactionGraph::from_edges(
        [
            ("A", "R1"),
            ("B", "R1"),
            ("R1", "C"),
            ("C", "R2"),
            ("R2", "D"),
            ("R2", "A"),
        ],
        ReactionIndexRange::with_count(3),
    )
    .unwrap()
}

#[test]
fn test_every_incident_edge_gets_its_reaction_timescale() {
    let mut graph = mechanism();
    let rates = ReactionRateTable::new(vec![2.0, 0.25, 7.0]);

    let assigned = TimescaleAssigner::new(&rates).assign(&mut graph).unwrap();
    assert_eq!(assigned, 6);

    let r1 = 0.5 / (2.0 + TIMESCALE_EPSILON);
    let r2 = 0.5 / (0.25 + TIMESCALE_EPSILON);
    assert_eq!(graph.timescale(&species("A"), &NodeId::Reaction(1)), Some(Some(r1)));
    assert_eq!(graph.timescale(&species("B"), &NodeId::Reaction(1)), Some(Some(r1)));
    assert_eq!(graph.timescale(&NodeId::Reaction(1), &species("C")), Some(Some(r1)));
    assert_eq!(graph.timescale(&species("C"), &NodeId::Reaction(2)), Some(Some(r2)));
    assert_eq!(graph.timescale(&NodeId::Reaction(2), &species("D")), Some(Some(r2)));
    assert_eq!(graph.timescale(&NodeId::Reaction(2), &species("A")), Some(Some(r2)));

    assert!(graph.edges().iter().all(|edge| edge.timescale.is_some()));
}

#[test]
fn test_zero_rate_gives_large_finite_timescale() {
    let timescale = reaction_timescale(0.0);
    assert!(timescale.is_finite());
    assert!((timescale - 5e19).abs() / 5e19 < 1e-12);

    let mut graph = ReactionGraph::from_edges([("A", "R1"), ("R1", "B")], ReactionIndexRange::with_count(1)).unwrap();
    let rates = ReactionRateTable::new(vec![0.0]);
    TimescaleAssigner::new(&rates).assign(&mut graph).unwrap();

    let weight = graph.timescale(&species("A"), &NodeId::Reaction(1)).unwrap().unwrap();
    assert!(weight.is_finite());
    assert!(weight > 1e19);
}

#[test]
fn test_rate_table_must_cover_declared_range() {
    let mut graph = mechanism();
    let rates = ReactionRateTable::new(vec![1.0, 1.0]);

    match TimescaleAssigner::new(&rates).assign(&mut graph) {
        Err(Error::RateTableSize { expected, actual }) => {
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("expected RateTableSize, got {:?}", other),
    }
}

#[test]
fn test_negative_rate_is_fatal() {
    let mut graph = mechanism();
    let rates = ReactionRateTable::new(vec![1.0, -0.25, 1.0]);

    assert!(matches!(
        TimescaleAssigner::new(&rates).assign(&mut graph),
        Err(Error::NegativeWeight { .. })
    ));
}

#[test]
fn test_edge_between_reactions_keeps_higher_index() {
    let mut graph = ReactionGraph::from_edges(
        [("A", "R1"), ("R1", "R2"), ("R2", "B")],
        ReactionIndexRange::with_count(2),
    )
    .unwrap();
    let rates = ReactionRateTable::new(vec![1.0, 4.0]);
    TimescaleAssigner::new(&rates).assign(&mut graph).unwrap();

    assert_eq!(
        graph.timescale(&NodeId::Reaction(1), &NodeId::Reaction(2)),
        Some(Some(reaction_timescale(4.0)))
    );
}

#[test]
fn test_offset_range_indexes_table_from_first() {
    let mut graph = ReactionGraph::from_edges([("A", "R10"), ("R11", "B")], ReactionIndexRange::new(10, 11)).unwrap();
    let rates = ReactionRateTable::new(vec![1.0, 0.5]);
    TimescaleAssigner::new(&rates).assign(&mut graph).unwrap();

    assert_eq!(graph.timescale(&species("A"), &NodeId::Reaction(10)), Some(Some(reaction_timescale(1.0))));
    assert_eq!(graph.timescale(&NodeId::Reaction(11), &species("B")), Some(Some(reaction_timescale(0.5))));
}

#[test]
fn test_tiny_negative_rates_are_fatal() {
    // Both stay non-negative once ε is added, so the rate itself must be checked
    for rate in [-5e-21, -1e-20] {
        let mut graph = ReactionGraph::from_edges([("A", "R1"), ("R1", "B")], ReactionIndexRange::with_count(1)).unwrap();
        let rates = ReactionRateTable::new(vec![rate]);

        match TimescaleAssigner::new(&rates).assign(&mut graph) {
            Err(Error::NegativeWeight { from, weight, .. }) => {
                assert_eq!(from, "R1");
                assert_eq!(weight, rate);
            }
            other => panic!("expected NegativeWeight for rate {}, got {:?}", rate, other),
        }
        assert_eq!(graph.timescale(&species("A"), &NodeId::Reaction(1)), Some(None));
    }

    let mut graph = mechanism();
    let rates = ReactionRateTable::new(vec![1.0, f64::NAN, 1.0]);
    assert!(matches!(
        TimescaleAssigner::new(&rates).assign(&mut graph),
        Err(Error::NegativeWeight { .. })
    ));
}

#[test]
fn test_range_starting_at_zero_is_rejected() {
    // R0 can never be a reaction node, so slot 0 of the table would be dead
    let range = ReactionIndexRange::new(0, 1);
    assert!(matches!(range.check(), Err(Error::Config(_))));

    let mut graph = ReactionGraph::from_edges([("A", "R0"), ("R1", "B")], range).unwrap();
    let rates = ReactionRateTable::new(vec![1.0, 1.0]);
    assert!(matches!(
        TimescaleAssigner::new(&rates).assign(&mut graph),
        Err(Error::Config(_))
    ));
    assert!(ReactionIndexRange::new(1, 1).check().is_ok());
}
