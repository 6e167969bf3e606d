//! Trailing-edge debounced value cell
//!
//! A `FilterDimension` holds one piece of list input (page, page size, sort
//! key and order, or search term). Writes land in `raw` immediately; `settled` only
//! catches up once `raw` has been left alone for the quiet period. Time is
//! passed in by the caller, so the cell has no timer task of its own and the
//! owner decides when to poll it.

use std::time::{Duration, Instant};

/// A debounced value with an explicit, pull-based settle step
#[derive(Debug, Clone)]
pub struct FilterDimension<V> {
    raw: V,
    settled: V,
    quiet_period: Duration,
    /// When the pending value becomes due. `None` when nothing is pending.
    due_at: Option<Instant>,
}

impl<V: Clone + PartialEq> FilterDimension<V> {
    /// Create a settled cell holding `initial`
    pub fn new(initial: V, quiet_period: Duration) -> Self {
        Self {
            raw: initial.clone(),
            settled: initial,
            quiet_period,
            due_at: None,
        }
    }

    /// Record a new raw value and restart the quiet period.
    ///
    /// A value set while another is pending replaces it; only the last value
    /// set before the period elapses is ever committed.
    pub fn set(&mut self, value: V, now: Instant) {
        self.raw = value;
        self.due_at = Some(now + self.quiet_period);
    }

    /// Set raw and settled together, cancelling anything pending
    pub fn commit_now(&mut self, value: V) {
        self.raw = value.clone();
        self.settled = value;
        self.due_at = None;
    }

    /// Commit the pending value if its quiet period has elapsed.
    ///
    /// Returns `true` when a commit happened during this call.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due_at {
            Some(due) if now >= due => {
                self.settled = self.raw.clone();
                self.due_at = None;
                true
            }
            _ => false,
        }
    }

    /// The debounced value downstream consumers see
    pub fn settled(&self) -> &V {
        &self.settled
    }

    /// The most recently written value, settled or not
    pub fn raw(&self) -> &V {
        &self.raw
    }

    /// True exactly while a written value has not yet been committed
    pub fn is_settling(&self) -> bool {
        self.due_at.is_some()
    }

    /// Instant at which the pending value will commit, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.due_at
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}
