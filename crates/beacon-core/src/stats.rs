//! Counters describing a beacon's refresh history.

use chrono::{DateTime, Utc};

/// Snapshot of completed refresh cycles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshStats {
    /// Cycles whose value has been stored.
    pub cycles: u64,
    /// Cycles whose updater reported an error.
    pub errors: u64,
    /// When the latest cycle was stored.
    pub last_completed_at: Option<DateTime<Utc>>,
}

impl RefreshStats {
    pub(crate) fn record(&mut self, failed: bool) {
        self.cycles += 1;
        if failed {
            self.errors += 1;
        }
        self.last_completed_at = Some(Utc::now());
    }

    /// Whether at least one cycle has completed.
    pub const fn has_refreshed(&self) -> bool {
        self.cycles > 0
    }
}
