//! Reaction Paths - minimum-timescale chemical pathways through reaction networks
//!
//! A reaction mechanism is modelled as a directed graph whose nodes are chemical
//! species and reaction events. Every edge incident to reaction `R<i>` is weighted
//! with half of that reaction's characteristic timescale, `0.5 / (rate[i] + ε)`,
//! and the library finds, for every ordered pair of distinct species, the path
//! with the smallest accumulated timescale.
//!
//! The run is strictly phased: a [`ReactionGraph`] is built from an edge list,
//! mutated once by the [`TimescaleAssigner`], frozen into a read-only
//! [`WeightedReactionGraph`], and finally searched by the [`PathwayFinder`].

pub mod algorithm;
pub mod config;
pub mod data_structures;
pub mod graph;
pub mod io;
pub mod pathways;
pub mod rates;
pub mod timescale;

pub use algorithm::{dijkstra::Dijkstra, ShortestPathAlgorithm, ShortestPathResult};
pub use config::{PathwayConfig, UnassignedEdgePolicy};
/// Re-export main types for convenient use
pub use graph::{NodeId, ReactionGraph, ReactionIndexRange, WeightedReactionGraph};
pub use pathways::{CancellationToken, PathRecord, PathResultSet, PathwayFinder, ProgressObserver};
pub use rates::{RateProvider, ReactionRateTable, TextRateProvider, TIMESCALE_EPSILON};
pub use timescale::TimescaleAssigner;

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Malformed edge row {row}: {reason}")]
    MalformedInput { row: usize, reason: String },

    #[error("Rate table has {actual} entries but {expected} reactions are declared")]
    RateTableSize { expected: usize, actual: usize },

    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Negative edge weight {weight} on {from} -> {to}")]
    NegativeWeight { from: String, to: String, weight: f64 },

    #[error("Edge {from} -> {to} touches no reaction node and has no timescale")]
    UnassignedEdge { from: String, to: String },

    #[error("Invalid edge ID: {0}")]
    InvalidEdge(usize),

    #[error("Invalid vertex ID: {0}")]
    InvalidVertex(usize),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Search cancelled after {completed} of {total} sources")]
    Cancelled { completed: usize, total: usize },

    #[error("Invalid rate value {value:?} on line {line}")]
    RateParse { line: usize, value: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
