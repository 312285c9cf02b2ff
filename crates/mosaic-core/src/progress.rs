//! Counting outstanding image loads.

/// Tracks how many of the requested loads have completed.
///
/// Both counters drop back to zero the moment the last outstanding load
/// completes, so a finished batch always reads as progress `1.0` and a new
/// batch starts from scratch.
///
/// ```
/// use mosaic_core::LoadTracker;
///
/// let mut tracker = LoadTracker::new();
/// tracker.begin();
/// tracker.begin();
/// assert!(!tracker.complete());
/// assert_eq!(tracker.progress(), 0.5);
/// assert!(tracker.complete());
/// assert_eq!(tracker.progress(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadTracker {
    requested: u32,
    completed: u32,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one more outstanding load.
    pub fn begin(&mut self) {
        self.requested += 1;
    }

    /// Mark one load as done, successful or not.
    ///
    /// Returns `true` when this completion finished the batch.
    pub fn complete(&mut self) -> bool {
        if self.completed >= self.requested {
            tracing::warn!("Load completed with nothing outstanding");
            return false;
        }
        self.completed += 1;
        if self.completed == self.requested {
            self.requested = 0;
            self.completed = 0;
            return true;
        }
        false
    }

    /// Fraction of the current batch that has completed, `1.0` when idle.
    pub fn progress(&self) -> f64 {
        if self.requested == 0 {
            1.0
        } else {
            self.completed as f64 / self.requested as f64
        }
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn completed(&self) -> u32 {
        self.completed
    }

    /// Whether no load is outstanding.
    pub fn is_idle(&self) -> bool {
        self.requested == 0
    }
}
