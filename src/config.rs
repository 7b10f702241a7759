use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::graph::ReactionIndexRange;
use crate::{Error, Result};

/// How edges that touch no reaction node are weighted when the graph is frozen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnassignedEdgePolicy {
    /// Fail with `UnassignedEdge`
    #[default]
    Reject,
    /// Weight 1.0, the default edge weight of common graph libraries
    Unit,
    /// Weight 0.0
    Zero,
}

impl UnassignedEdgePolicy {
    pub fn fallback_weight(&self) -> Option<f64> {
        match self {
            UnassignedEdgePolicy::Reject => None,
            UnassignedEdgePolicy::Unit => Some(1.0),
            UnassignedEdgePolicy::Zero => Some(0.0),
        }
    }
}

/// Settings for one pathway run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayConfig {
    /// Identifiers `R<first>`..`R<last>` are reaction nodes
    pub reaction_range: ReactionIndexRange,
    pub unassigned_edges: UnassignedEdgePolicy,
    /// Search sources on the rayon pool
    pub parallel: bool,
    /// Dedicated pool size; the global pool is used when unset
    pub threads: Option<usize>,
}

impl Default for PathwayConfig {
    fn default() -> Self {
        PathwayConfig {
            reaction_range: ReactionIndexRange::default(),
            unassigned_edges: UnassignedEdgePolicy::Reject,
            parallel: true,
            threads: None,
        }
    }
}

impl PathwayConfig {
    /// Loads a JSON config; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let config: PathwayConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.reaction_range.check()?;
        if self.threads == Some(0) {
            return Err(Error::Config("threads must be at least 1".to_string()));
        }
        Ok(())
    }
}
