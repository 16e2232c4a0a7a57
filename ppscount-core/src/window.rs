//! Per-epoch aggregation window

use std::collections::HashMap;
use std::mem;

/// Address -> packet count mapping for one reporting epoch
pub type AddressCounts = HashMap<String, u64>;

/// Mutable counter state for the current one-second epoch.
///
/// Counts only increase between epoch boundaries; at each boundary the whole
/// mapping is replaced, never merged. In the single-task loop no locking is
/// needed, and the replacement itself is a single exchange, so a design that
/// moves extraction onto a worker only has to wrap the window in a mutex.
#[derive(Debug, Default)]
pub struct AggregationWindow {
    counts: AddressCounts,
}

impl AggregationWindow {
    /// Create an empty window
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one packet for `address`, inserting it at 1 if absent
    pub fn increment<S: Into<String>>(&mut self, address: S) {
        *self.counts.entry(address.into()).or_insert(0) += 1;
    }

    /// Return the current counts and install a fresh empty mapping.
    ///
    /// Increments applied before the call are all in the returned snapshot;
    /// increments applied after land in the new window. Nothing is lost or
    /// double-counted across the exchange.
    pub fn snapshot_and_reset(&mut self) -> AddressCounts {
        mem::take(&mut self.counts)
    }

    /// Number of distinct addresses seen this epoch
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if no packet has been counted this epoch
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_match_input_multiset() {
        let mut window = AggregationWindow::new();
        window.increment("10.0.0.1");
        window.increment("10.0.0.1");
        window.increment("10.0.0.2");

        let snapshot = window.snapshot_and_reset();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("10.0.0.1"), Some(&2));
        assert_eq!(snapshot.get("10.0.0.2"), Some(&1));
        assert!(window.is_empty());
    }

    #[test]
    fn test_no_loss_across_boundary() {
        let mut window = AggregationWindow::new();
        window.increment("10.0.0.1");

        let first = window.snapshot_and_reset();
        assert_eq!(first.get("10.0.0.1"), Some(&1));

        // An increment after the exchange must appear in exactly the next
        // snapshot, never in the previous one.
        window.increment("10.0.0.1");
        assert_eq!(first.get("10.0.0.1"), Some(&1));

        let second = window.snapshot_and_reset();
        assert_eq!(second.get("10.0.0.1"), Some(&1));
    }

    #[test]
    fn test_reset_on_empty_window() {
        let mut window = AggregationWindow::new();

        let snapshot = window.snapshot_and_reset();
        assert!(snapshot.is_empty());
        assert!(window.is_empty());

        // A second reset is just as empty
        assert!(window.snapshot_and_reset().is_empty());
    }

    #[test]
    fn test_len_tracks_distinct_addresses() {
        let mut window = AggregationWindow::new();
        assert_eq!(window.len(), 0);

        window.increment("10.0.0.1");
        window.increment("10.0.0.1");
        assert_eq!(window.len(), 1);

        window.increment("10.0.0.2");
        assert_eq!(window.len(), 2);
    }
}
