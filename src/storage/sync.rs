use chrono::{DateTime, Duration, Utc};

/// Remote-sync indicator surfaced to the UI. A failed save only lands
/// here; it never blocks or rolls back ledger state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStatus {
    #[default]
    Idle,
    Syncing,
    Error,
}

/// Coalescing save-intent queue.
///
/// Every mutating operation calls [`mark_dirty`](Self::mark_dirty); the
/// host polls [`flush_due`](Self::flush_due) and performs the actual save
/// when it fires. At most one flush fires per debounce interval, so a
/// burst of mutations produces a single save.
#[derive(Debug, Clone)]
pub struct SyncQueue {
    debounce: Duration,
    dirty: bool,
    last_flush: Option<DateTime<Utc>>,
    status: SyncStatus,
}

impl SyncQueue {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            dirty: false,
            last_flush: None,
            status: SyncStatus::Idle,
        }
    }

    /// Records that in-memory state changed since the last flush.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    /// Returns `true` when a save should fire now. Clears the dirty flag
    /// and enters `Syncing`; the caller reports the outcome through
    /// [`record_result`](Self::record_result).
    pub fn flush_due(&mut self, now: DateTime<Utc>) -> bool {
        if !self.dirty {
            return false;
        }
        if let Some(last) = self.last_flush {
            if now - last < self.debounce {
                return false;
            }
        }
        self.dirty = false;
        self.last_flush = Some(now);
        self.status = SyncStatus::Syncing;
        true
    }

    /// Records the outcome of the save the last flush triggered.
    pub fn record_result(&mut self, success: bool) {
        self.status = if success {
            SyncStatus::Idle
        } else {
            SyncStatus::Error
        };
        if !success {
            tracing::warn!("snapshot save failed; local state kept, sync flagged");
        }
    }
}
