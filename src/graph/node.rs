use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// A node of the reaction network, classified once when the graph is built
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum NodeId {
    /// A chemical species; the only valid source or target of a path query
    Species(String),
    /// A reaction event `R<index>`; always an intermediate hop
    Reaction(u32),
}

impl NodeId {
    /// Classifies a raw identifier.
    ///
    /// An identifier is a reaction node iff it is exactly `R` followed by the
    /// canonical decimal form of an index inside `range`. Anything else, including
    /// `R0`, `R007` or `R914` with the default range, is a species.
    pub fn classify(raw: &str, range: &ReactionIndexRange) -> NodeId {
        match parse_reaction_index(raw) {
            Some(index) if range.contains(index) => NodeId::Reaction(index),
            _ => NodeId::Species(raw.to_string()),
        }
    }

    pub fn is_species(&self) -> bool {
        matches!(self, NodeId::Species(_))
    }

    pub fn is_reaction(&self) -> bool {
        matches!(self, NodeId::Reaction(_))
    }

    /// The reaction index, if this is a reaction node
    pub fn reaction_index(&self) -> Option<u32> {
        match self {
            NodeId::Reaction(index) => Some(*index),
            NodeId::Species(_) => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Species(name) => f.write_str(name),
            NodeId::Reaction(index) => write!(f, "R{}", index),
        }
    }
}

fn parse_reaction_index(raw: &str) -> Option<u32> {
    let digits = raw.strip_prefix('R')?;
    if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Inclusive range of reaction indices that are treated as reaction nodes.
/// Reaction indices start at 1, so a usable range has `1 <= first <= last`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionIndexRange {
    pub first: u32,
    pub last: u32,
}

impl ReactionIndexRange {
    pub fn new(first: u32, last: u32) -> Self {
        ReactionIndexRange { first, last }
    }

    /// Range `1..=count`, the usual layout of a mechanism with `count` reactions
    pub fn with_count(count: u32) -> Self {
        ReactionIndexRange { first: 1, last: count }
    }

    pub fn contains(&self, index: u32) -> bool {
        index >= self.first && index <= self.last
    }

    /// Number of reactions declared by the range
    pub fn len(&self) -> usize {
        if self.last < self.first {
            0
        } else {
            (self.last - self.first) as usize + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fails with `Config` for an empty range or one that starts at `R0`
    pub fn check(&self) -> Result<()> {
        if self.first == 0 {
            return Err(Error::Config(format!(
                "reaction indices start at 1, range starts at R{}",
                self.first
            )));
        }
        if self.is_empty() {
            return Err(Error::Config(format!(
                "empty reaction range R{}..R{}",
                self.first, self.last
            )));
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> {
        self.first..=self.last
    }
}

impl Default for ReactionIndexRange {
    fn default() -> Self {
        ReactionIndexRange::with_count(913)
    }
}
