use log::{debug, warn};
use ordered_float::OrderedFloat;
use std::collections::HashMap;

use crate::config::UnassignedEdgePolicy;
use crate::graph::node::{NodeId, ReactionIndexRange};
use crate::graph::weighted::WeightedReactionGraph;
use crate::{Error, Result};

/// One row of a raw edge list; either endpoint may be missing in malformed input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeRow {
    pub from: Option<String>,
    pub to: Option<String>,
}

impl EdgeRow {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        EdgeRow {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }
}

/// A directed edge with its timescale; `None` until a reaction assigns it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub timescale: Option<f64>,
}

/// The mutable reaction network.
///
/// Vertices are numbered in first-seen order of the edge list. Duplicate
/// `(from, to)` rows collapse into a single edge, so every ordered pair owns at
/// most one timescale slot.
#[derive(Debug, Clone)]
pub struct ReactionGraph {
    range: ReactionIndexRange,
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    edges: Vec<Edge>,
    edge_index: HashMap<(usize, usize), usize>,
    /// Edge ids leaving each vertex
    outgoing: Vec<Vec<usize>>,
    /// Edge ids entering each vertex
    incoming: Vec<Vec<usize>>,
}

impl ReactionGraph {
    /// Creates an empty graph that classifies identifiers against `range`
    pub fn new(range: ReactionIndexRange) -> Self {
        ReactionGraph {
            range,
            nodes: Vec::new(),
            index: HashMap::new(),
            edges: Vec::new(),
            edge_index: HashMap::new(),
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Builds a graph from `(from, to)` identifier pairs
    pub fn from_edges<I, S>(edges: I, range: ReactionIndexRange) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        Self::from_rows(
            edges
                .into_iter()
                .map(|(from, to)| EdgeRow::new(from.as_ref(), to.as_ref())),
            range,
        )
    }

    /// Builds a graph from raw edge rows.
    ///
    /// A row with a missing or blank endpoint fails with `MalformedInput`; rows are
    /// numbered from 1.
    pub fn from_rows<I>(rows: I, range: ReactionIndexRange) -> Result<Self>
    where
        I: IntoIterator<Item = EdgeRow>,
    {
        let mut graph = ReactionGraph::new(range);

        for (i, row) in rows.into_iter().enumerate() {
            let row_number = i + 1;
            let from = required_endpoint(row.from.as_deref(), row_number, "from")?;
            let to = required_endpoint(row.to.as_deref(), row_number, "to")?;

            let from = graph.add_node(from);
            let to = graph.add_node(to);
            graph.connect(from, to);
        }

        debug!(
            "Built reaction graph: {} nodes ({} reactions), {} edges",
            graph.node_count(),
            graph.reaction_count(),
            graph.edge_count()
        );

        Ok(graph)
    }

    /// Registers an identifier, returning its vertex ID (existing or new)
    pub fn add_node(&mut self, raw: &str) -> usize {
        let node = NodeId::classify(raw, &self.range);
        if let Some(&vertex) = self.index.get(&node) {
            return vertex;
        }

        let vertex = self.nodes.len();
        self.index.insert(node.clone(), vertex);
        self.nodes.push(node);
        self.outgoing.push(Vec::new());
        self.incoming.push(Vec::new());
        vertex
    }

    /// Adds an edge between two already registered nodes
    pub fn add_edge(&mut self, from: &NodeId, to: &NodeId) -> Result<usize> {
        let from = self.require_vertex(from)?;
        let to = self.require_vertex(to)?;
        Ok(self.connect(from, to))
    }

    fn connect(&mut self, from: usize, to: usize) -> usize {
        if let Some(&edge) = self.edge_index.get(&(from, to)) {
            return edge;
        }

        let edge = self.edges.len();
        self.edges.push(Edge {
            from,
            to,
            timescale: None,
        });
        self.edge_index.insert((from, to), edge);
        self.outgoing[from].push(edge);
        self.incoming[to].push(edge);
        edge
    }

    fn require_vertex(&self, node: &NodeId) -> Result<usize> {
        self.index
            .get(node)
            .copied()
            .ok_or_else(|| Error::UnknownNode(node.to_string()))
    }

    pub fn range(&self) -> ReactionIndexRange {
        self.range
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of reaction nodes actually present
    pub fn reaction_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_reaction()).count()
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn node(&self, vertex: usize) -> Option<&NodeId> {
        self.nodes.get(vertex)
    }

    pub fn vertex(&self, node: &NodeId) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Looks a node up by its raw identifier, applying the same classification
    pub fn vertex_by_name(&self, raw: &str) -> Option<usize> {
        self.vertex(&NodeId::classify(raw, &self.range))
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Timescale slot of the edge `from -> to`; outer `None` if there is no such edge
    pub fn timescale(&self, from: &NodeId, to: &NodeId) -> Option<Option<f64>> {
        let from = self.vertex(from)?;
        let to = self.vertex(to)?;
        self.edge_index
            .get(&(from, to))
            .map(|&edge| self.edges[edge].timescale)
    }

    /// Edge ids entering and leaving `vertex`
    pub fn incident_edges(&self, vertex: usize) -> impl Iterator<Item = usize> + '_ {
        self.incoming
            .get(vertex)
            .into_iter()
            .flatten()
            .chain(self.outgoing.get(vertex).into_iter().flatten())
            .copied()
    }

    /// Overwrites the timescale of one edge
    pub fn set_timescale(&mut self, edge: usize, timescale: f64) -> Result<()> {
        let slot = self.edges.get_mut(edge).ok_or(Error::InvalidEdge(edge))?;
        slot.timescale = Some(timescale);
        Ok(())
    }

    /// Ends the mutation phase, producing the read-only graph used for search.
    ///
    /// Every edge must carry a non-negative timescale. Edges never touched by a
    /// reaction are resolved according to `policy`.
    pub fn freeze(self, policy: UnassignedEdgePolicy) -> Result<WeightedReactionGraph> {
        let n = self.nodes.len();
        let mut outgoing: Vec<Vec<(usize, OrderedFloat<f64>)>> = vec![Vec::new(); n];
        let mut fallbacks = 0;

        for edge in &self.edges {
            if edge.from >= n || edge.to >= n {
                return Err(Error::UnknownNode(format!("vertex {} -> {}", edge.from, edge.to)));
            }

            let weight = match (edge.timescale, policy.fallback_weight()) {
                (Some(timescale), _) => timescale,
                (None, Some(fallback)) => {
                    fallbacks += 1;
                    fallback
                }
                (None, None) => {
                    return Err(Error::UnassignedEdge {
                        from: self.nodes[edge.from].to_string(),
                        to: self.nodes[edge.to].to_string(),
                    })
                }
            };

            if !(weight >= 0.0) {
                return Err(Error::NegativeWeight {
                    from: self.nodes[edge.from].to_string(),
                    to: self.nodes[edge.to].to_string(),
                    weight,
                });
            }

            outgoing[edge.from].push((edge.to, OrderedFloat(weight)));
        }

        if fallbacks > 0 {
            warn!(
                "{} edges touch no reaction node; using fallback weight under {:?}",
                fallbacks, policy
            );
        }

        Ok(WeightedReactionGraph::new(
            self.nodes,
            self.index,
            outgoing,
            self.edges.len(),
        ))
    }
}

fn required_endpoint<'a>(value: Option<&'a str>, row: usize, column: &str) -> Result<&'a str> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MalformedInput {
            row,
            reason: format!("missing '{}' endpoint", column),
        }),
    }
}
