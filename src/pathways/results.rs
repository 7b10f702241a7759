use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::graph::NodeId;

/// Minimum-timescale pathway between two species
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub source: NodeId,
    pub target: NodeId,
    /// Every hop from `source` to `target`, both included
    pub path: Vec<NodeId>,
    /// Sum of edge timescales along `path`
    pub timescale: f64,
}

/// Distribution summary of pathway timescales
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimescaleSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    /// Mean of `log10(timescale)`, the centre of a log-scale distribution plot
    pub mean_log10: f64,
}

/// All pathways of one run, keyed by `(source, target)`.
///
/// Records are ordered by source, then target, in the graph's first-seen node
/// order. Never contains a self pair or an unreachable pair.
#[derive(Debug, Clone, Default)]
pub struct PathResultSet {
    records: Vec<PathRecord>,
    index: HashMap<(NodeId, NodeId), usize>,
}

impl PathResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_records(records: Vec<PathRecord>) -> Self {
        let mut set = PathResultSet {
            records: Vec::with_capacity(records.len()),
            index: HashMap::with_capacity(records.len()),
        };
        for record in records {
            set.insert(record);
        }
        set
    }

    fn insert(&mut self, record: PathRecord) {
        let key = (record.source.clone(), record.target.clone());
        match self.index.get(&key) {
            Some(&slot) => self.records[slot] = record,
            None => {
                self.index.insert(key, self.records.len());
                self.records.push(record);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, source: &NodeId, target: &NodeId) -> Option<&PathRecord> {
        self.index
            .get(&(source.clone(), target.clone()))
            .map(|&slot| &self.records[slot])
    }

    /// Looks up a pair of species by name
    pub fn get_species(&self, source: &str, target: &str) -> Option<&PathRecord> {
        self.get(
            &NodeId::Species(source.to_string()),
            &NodeId::Species(target.to_string()),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[PathRecord] {
        &self.records
    }

    /// Records leaving `source`
    pub fn from_source<'a>(&'a self, source: &'a NodeId) -> impl Iterator<Item = &'a PathRecord> + 'a {
        self.records.iter().filter(move |record| &record.source == source)
    }

    /// Timescale values in record order, as consumed by distribution plots
    pub fn timescales(&self) -> Vec<f64> {
        self.records.iter().map(|record| record.timescale).collect()
    }

    /// Summary of the timescale distribution; `None` when the set is empty.
    /// Zero timescales are left out of the log mean.
    pub fn summary(&self) -> Option<TimescaleSummary> {
        if self.records.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut log_sum = 0.0;
        let mut log_count = 0usize;
        for record in &self.records {
            min = min.min(record.timescale);
            max = max.max(record.timescale);
            if record.timescale > 0.0 {
                log_sum += record.timescale.log10();
                log_count += 1;
            }
        }

        Some(TimescaleSummary {
            count: self.records.len(),
            min,
            max,
            mean_log10: if log_count > 0 { log_sum / log_count as f64 } else { f64::NAN },
        })
    }

    pub fn into_records(self) -> Vec<PathRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a PathResultSet {
    type Item = &'a PathRecord;
    type IntoIter = std::slice::Iter<'a, PathRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
