use log::debug;

use crate::graph::{NodeId, ReactionGraph};
use crate::rates::{ReactionRateTable, TIMESCALE_EPSILON};
use crate::{Error, Result};

/// Half of the characteristic time of a reaction with the given rate
pub fn reaction_timescale(rate: f64) -> f64 {
    0.5 / (rate + TIMESCALE_EPSILON)
}

/// Weights the edges around each reaction node from a rate table
#[derive(Debug, Clone)]
pub struct TimescaleAssigner<'a> {
    rates: &'a ReactionRateTable,
}

impl<'a> TimescaleAssigner<'a> {
    pub fn new(rates: &'a ReactionRateTable) -> Self {
        TimescaleAssigner { rates }
    }

    /// Overwrites the timescale of every edge entering or leaving `R<i>` with
    /// `0.5 / (rate[i] + ε)`, for each `i` in the graph's reaction range.
    ///
    /// Reactions are visited in ascending index order; an edge joining two
    /// reaction nodes keeps the value of the higher index. Indices with no node in
    /// the graph are skipped. Returns the number of assignments made.
    pub fn assign(&self, graph: &mut ReactionGraph) -> Result<usize> {
        let range = graph.range();
        range.check()?;
        self.rates.check_covers(&range)?;

        let mut assigned = 0;
        for index in range.iter() {
            let vertex = match graph.vertex(&NodeId::Reaction(index)) {
                Some(vertex) => vertex,
                None => continue,
            };
            let rate = self
                .rates
                .rate(index, &range)
                .ok_or(Error::RateTableSize {
                    expected: range.len(),
                    actual: self.rates.len(),
                })?;
            // Rates in (-ε, 0) would still give a positive timescale
            if !rate.is_finite() || rate < 0.0 {
                return Err(Error::NegativeWeight {
                    from: NodeId::Reaction(index).to_string(),
                    to: NodeId::Reaction(index).to_string(),
                    weight: rate,
                });
            }
            let timescale = reaction_timescale(rate);

            let edges: Vec<usize> = graph.incident_edges(vertex).collect();
            for edge in edges {
                graph.set_timescale(edge, timescale)?;
                assigned += 1;
            }
        }

        debug!(
            "Assigned {} edge timescales across {} reactions",
            assigned,
            range.len()
        );

        Ok(assigned)
    }
}
