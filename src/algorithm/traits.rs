use std::fmt::Debug;
use log::warn;
use num_traits::{Float, Zero};
use crate::graph::Graph;
use crate::Result;

/// Result of a shortest path algorithm execution
#[derive(Debug, Clone)]
pub struct ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Distances from source to each vertex
    pub distances: Vec<Option<W>>,

    /// Predecessor vertices in the shortest path tree
    pub predecessors: Vec<Option<usize>>,

    /// Source vertex ID
    pub source: usize,
}

impl<W> ShortestPathResult<W>
where
    W: Float + Zero + Debug + Copy,
{
    /// Vertices reached from the source, the source included
    pub fn reachable(&self) -> impl Iterator<Item = usize> + '_ {
        self.distances
            .iter()
            .enumerate()
            .filter(|(_, distance)| distance.is_some())
            .map(|(vertex, _)| vertex)
    }
}

/// Trait for single-source shortest path algorithms
pub trait ShortestPathAlgorithm<W, G>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    fn compute_shortest_paths(&self, graph: &G, source: usize) -> Result<ShortestPathResult<W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;

    /// Get the shortest path from source to target as a sequence of vertices
    fn get_path(&self, result: &ShortestPathResult<W>, target: usize) -> Option<Vec<usize>> {
        if target >= result.predecessors.len() || result.distances[target].is_none() {
            return None;
        }

        let mut path = Vec::new();
        let mut current = target;

        // Build path in reverse order
        while current != result.source {
            path.push(current);

            // A predecessor tree never holds more hops than vertices
            if path.len() > result.predecessors.len() {
                warn!("Path to vertex {} exceeds graph size, likely a cycle", target);
                return None;
            }

            match result.predecessors[current] {
                Some(pred) => current = pred,
                None => {
                    warn!("Broken predecessor chain at vertex {}", current);
                    return None;
                }
            }
        }

        path.push(result.source);
        path.reverse();

        Some(path)
    }
}
