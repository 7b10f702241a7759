use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::graph::ReactionIndexRange;
use crate::{Error, Result};

/// Added to every rate before inverting it, so a zero rate yields a very large
/// but finite timescale (`0.5 / 1e-20 = 5e19`) rather than a division by zero.
pub const TIMESCALE_EPSILON: f64 = 1e-20;

/// Reaction rates of one simulation snapshot, in reaction index order
#[derive(Debug, Clone, PartialEq)]
pub struct ReactionRateTable {
    rates: Vec<f64>,
}

impl ReactionRateTable {
    pub fn new(rates: Vec<f64>) -> Self {
        ReactionRateTable { rates }
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.rates
    }

    /// Rate of reaction `index` within `range` (`range.first` maps to slot 0)
    pub fn rate(&self, index: u32, range: &ReactionIndexRange) -> Option<f64> {
        if !range.contains(index) {
            return None;
        }
        self.rates.get((index - range.first) as usize).copied()
    }

    /// Fails with `RateTableSize` unless there is exactly one rate per declared reaction
    pub fn check_covers(&self, range: &ReactionIndexRange) -> Result<()> {
        if self.rates.len() != range.len() {
            return Err(Error::RateTableSize {
                expected: range.len(),
                actual: self.rates.len(),
            });
        }
        Ok(())
    }
}

impl From<Vec<f64>> for ReactionRateTable {
    fn from(rates: Vec<f64>) -> Self {
        ReactionRateTable::new(rates)
    }
}

/// Source of rate tables for named simulation snapshots
pub trait RateProvider {
    /// Returns the rates of `snapshot`, one per reaction index in order
    fn reaction_rates(&self, snapshot: &str) -> Result<ReactionRateTable>;
}

/// Reads snapshots from plain text files under a directory.
///
/// A snapshot named `s` is read from `<dir>/s`. Rates are whitespace separated
/// tokens; anything after `#` on a line is a comment.
#[derive(Debug, Clone)]
pub struct TextRateProvider {
    dir: PathBuf,
}

impl TextRateProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TextRateProvider { dir: dir.into() }
    }

    pub fn snapshot_path(&self, snapshot: &str) -> PathBuf {
        self.dir.join(snapshot)
    }

    /// Parses the text format directly
    pub fn parse(text: &str) -> Result<ReactionRateTable> {
        let mut rates = Vec::new();

        for (i, line) in text.lines().enumerate() {
            let content = line.split('#').next().unwrap_or("");
            for token in content.split_whitespace() {
                let rate: f64 = token.parse().map_err(|_| Error::RateParse {
                    line: i + 1,
                    value: token.to_string(),
                })?;
                if !rate.is_finite() || rate < 0.0 {
                    return Err(Error::RateParse {
                        line: i + 1,
                        value: token.to_string(),
                    });
                }
                rates.push(rate);
            }
        }

        Ok(ReactionRateTable::new(rates))
    }

    fn read(path: &Path) -> Result<ReactionRateTable> {
        let text = fs::read_to_string(path)?;
        let table = Self::parse(&text)?;
        debug!("Read {} rates from {}", table.len(), path.display());
        Ok(table)
    }
}

impl RateProvider for TextRateProvider {
    fn reaction_rates(&self, snapshot: &str) -> Result<ReactionRateTable> {
        Self::read(&self.snapshot_path(snapshot))
    }
}
