//! Holder for the most recent estimate.
//!
//! Owned by the shell and passed explicitly; nothing here is global. Each
//! store replaces the previous result (last write wins). Dropping the slot
//! is the only "persistence" boundary.

use coverage_core::estimate::SessionResult;

#[derive(Debug, Default)]
pub struct ResultSlot {
    latest: Option<SessionResult>,
    store_total: u64,
    unchanged_store_total: u64,
}

impl ResultSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held result, returning the one it displaced.
    pub fn store(&mut self, result: SessionResult) -> Option<SessionResult> {
        self.store_total += 1;
        if self
            .latest
            .as_ref()
            .is_some_and(|prev| prev.reference == result.reference)
        {
            self.unchanged_store_total += 1;
            tracing::debug!("resubmitted estimate with unchanged inputs");
        }
        self.latest.replace(result)
    }

    pub fn latest(&self) -> Option<&SessionResult> {
        self.latest.as_ref()
    }

    pub fn clear(&mut self) {
        self.latest = None;
    }

    pub fn store_total(&self) -> u64 {
        self.store_total
    }

    /// Stores whose reference matched the result already held.
    pub fn unchanged_store_total(&self) -> u64 {
        self.unchanged_store_total
    }
}
