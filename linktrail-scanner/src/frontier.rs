use std::collections::{HashSet, VecDeque};

/// FIFO work queue for the crawl, plus the run-local bookkeeping that keeps a
/// URL from being queued or fetched twice in one run.
///
/// `seen` covers everything ever queued; `visited` covers everything popped
/// and fetched. They are tracked separately and both are checked.
#[derive(Debug, Default)]
pub struct Frontier {
    pending: VecDeque<String>,
    seen: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `url` to the back of the queue unless it has been queued
    /// before. Returns whether it was queued.
    pub fn push(&mut self, url: String) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.pending.push_back(url);
        true
    }

    pub fn pop(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    /// Records that `url` is about to be fetched. Returns `false` if it
    /// already was, in which case the caller must skip it.
    pub fn mark_visited(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.seen.clear();
        self.visited.clear();
    }
}
