//! Per-slot request tokens

use std::collections::HashMap;
use std::hash::Hash;

/// Monotonic token handed out when a request starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

/// Tracks the latest request per slot.
///
/// Tokens increase across all slots, but only the most recent token of a
/// slot is current; distinct slots never invalidate each other.
#[derive(Debug, Clone)]
pub struct RequestTracker<K> {
    next: u64,
    latest: HashMap<K, RequestToken>,
}

impl<K> Default for RequestTracker<K> {
    fn default() -> Self {
        Self { next: 0, latest: HashMap::new() }
    }
}

impl<K: Eq + Hash> RequestTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request in `slot`, superseding any request still in flight.
    pub fn begin(&mut self, slot: K) -> RequestToken {
        self.next += 1;
        let token = RequestToken(self.next);
        self.latest.insert(slot, token);
        token
    }

    pub fn is_current(&self, slot: &K, token: RequestToken) -> bool {
        self.latest.get(slot) == Some(&token)
    }

    /// Whether a request in `slot` is still awaited
    pub fn is_pending(&self, slot: &K) -> bool {
        self.latest.contains_key(slot)
    }

    /// Accept the response for `token`, closing the slot. Returns `false`
    /// (and leaves the slot untouched) for stale tokens.
    pub fn finish(&mut self, slot: &K, token: RequestToken) -> bool {
        if self.is_current(slot, token) {
            self.latest.remove(slot);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_request_supersedes_older_in_same_slot() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin("monthly");
        let second = tracker.begin("monthly");
        assert!(!tracker.finish(&"monthly", first));
        assert!(tracker.is_pending(&"monthly"));
        assert!(tracker.finish(&"monthly", second));
        assert!(!tracker.is_pending(&"monthly"));
    }

    #[test]
    fn slots_are_independent() {
        let mut tracker = RequestTracker::new();
        let annual = tracker.begin("annual");
        let compare = tracker.begin("compare");
        assert!(tracker.finish(&"compare", compare));
        assert!(tracker.finish(&"annual", annual));
    }

    #[test]
    fn finished_token_cannot_be_reused() {
        let mut tracker = RequestTracker::new();
        let token = tracker.begin(1);
        assert!(tracker.finish(&1, token));
        assert!(!tracker.finish(&1, token));
    }
}
