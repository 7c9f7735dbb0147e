//! Occurrence counts of positions, for threefold repetition.

use std::collections::HashMap;

/// Maps position hashes to how often each position has occurred.
///
/// Counts only grow. The most recently recorded hash is the current position.
#[derive(Debug, Clone, Default)]
pub struct PositionHistory {
    counts: HashMap<u64, u32>,
    current: Option<u64>,
    max: u32,
}

impl PositionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more occurrence of `hash` and makes it current.
    /// Returns the new count.
    pub fn record(&mut self, hash: u64) -> u32 {
        let count = self.counts.entry(hash).or_insert(0);
        *count += 1;
        let count = *count;
        self.max = self.max.max(count);
        self.current = Some(hash);
        count
    }

    /// How many times `hash` has occurred.
    pub fn count(&self, hash: u64) -> u32 {
        self.counts.get(&hash).copied().unwrap_or(0)
    }

    /// How many times the current position has occurred.
    pub fn current_count(&self) -> u32 {
        self.current.map_or(0, |hash| self.count(hash))
    }

    /// Highest occurrence count of any position so far.
    pub fn max_count(&self) -> u32 {
        self.max
    }

    /// Number of distinct positions seen.
    pub fn distinct_positions(&self) -> usize {
        self.counts.len()
    }
}
