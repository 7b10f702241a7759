use ordered_float::OrderedFloat;
use std::collections::HashMap;

use crate::graph::node::NodeId;
use crate::graph::traits::Graph;
use crate::{Error, Result};

/// Read-only reaction network with every edge weighted by its timescale.
///
/// Only obtainable through [`ReactionGraph::freeze`](crate::graph::ReactionGraph::freeze),
/// so searches never observe a graph that is still being weighted.
#[derive(Debug, Clone)]
pub struct WeightedReactionGraph {
    nodes: Vec<NodeId>,
    index: HashMap<NodeId, usize>,
    /// Outgoing edges for each vertex: [(target_vertex, timescale)]
    outgoing: Vec<Vec<(usize, OrderedFloat<f64>)>>,
    edge_count: usize,
    species: Vec<usize>,
}

impl WeightedReactionGraph {
    pub(crate) fn new(
        nodes: Vec<NodeId>,
        index: HashMap<NodeId, usize>,
        outgoing: Vec<Vec<(usize, OrderedFloat<f64>)>>,
        edge_count: usize,
    ) -> Self {
        let species = nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_species())
            .map(|(vertex, _)| vertex)
            .collect();

        WeightedReactionGraph {
            nodes,
            index,
            outgoing,
            edge_count,
            species,
        }
    }

    pub fn node(&self, vertex: usize) -> Option<&NodeId> {
        self.nodes.get(vertex)
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    pub fn vertex(&self, node: &NodeId) -> Option<usize> {
        self.index.get(node).copied()
    }

    /// Species vertices in first-seen order
    pub fn species(&self) -> &[usize] {
        &self.species
    }

    /// Timescale of `from -> to`, if that edge exists
    pub fn timescale(&self, from: &NodeId, to: &NodeId) -> Option<f64> {
        let from = self.vertex(from)?;
        let to = self.vertex(to)?;
        self.get_edge_weight(from, to).map(|weight| weight.into_inner())
    }

    /// Sums edge timescales along consecutive hops of `path`
    pub fn path_weight(&self, path: &[NodeId]) -> Result<f64> {
        let mut total = 0.0;
        for hop in path.windows(2) {
            let from = self
                .vertex(&hop[0])
                .ok_or_else(|| Error::UnknownNode(hop[0].to_string()))?;
            let to = self
                .vertex(&hop[1])
                .ok_or_else(|| Error::UnknownNode(hop[1].to_string()))?;
            let weight = self.get_edge_weight(from, to).ok_or_else(|| {
                Error::UnknownNode(format!("no edge {} -> {}", hop[0], hop[1]))
            })?;
            total += weight.into_inner();
        }
        Ok(total)
    }
}

impl Graph<OrderedFloat<f64>> for WeightedReactionGraph {
    fn vertex_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn outgoing_edges(&self, vertex: usize) -> Box<dyn Iterator<Item = (usize, OrderedFloat<f64>)> + '_> {
        match self.outgoing.get(vertex) {
            Some(edges) => Box::new(edges.iter().copied()),
            None => Box::new(std::iter::empty()),
        }
    }
}
