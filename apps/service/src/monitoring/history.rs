use std::collections::VecDeque;

use super::types::CheckResult;

/// Number of results kept per endpoint unless configured otherwise
pub const DEFAULT_HISTORY_CAPACITY: usize = 100;

/// Bounded FIFO log of check results, oldest first
///
/// Results are kept in the order they were appended. Once the capacity is
/// exceeded the oldest entries are evicted.
#[derive(Debug, Clone)]
pub struct HistoryRing {
    entries: VecDeque<CheckResult>,
    capacity: usize,
}

impl Default for HistoryRing {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}

impl HistoryRing {
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity), capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a result, evicting from the front while over capacity
    pub fn append(&mut self, result: CheckResult) {
        self.entries.push_back(result);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Copy of the current contents, oldest first
    pub fn all(&self) -> Vec<CheckResult> {
        self.entries.iter().cloned().collect()
    }

    pub fn last(&self) -> Option<&CheckResult> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CheckResult> + ExactSizeIterator {
        self.entries.iter()
    }
}
