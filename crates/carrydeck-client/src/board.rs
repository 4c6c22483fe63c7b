//! In-memory board store.
//!
//! The board holds the calls from the last applied poll cycle plus any local
//! operator edits. Polls replace the contents wholesale; there is no
//! merge/diff, and local edits do not survive the next applied poll. The
//! store tracks that fact so the UI can say so instead of silently losing
//! the edit.

use carrydeck_core::call::{Call, CallStatus};
use carrydeck_core::view::{self, StatusCounts, StatusFilter};
use chrono::{DateTime, Utc};

use crate::poll::PollOutcome;

#[derive(Debug, Default)]
pub struct CallBoard {
    calls: Vec<Call>,
    last_applied_seq: u64,
    last_fetched_at: Option<DateTime<Utc>>,
    locally_edited: bool,
}

impl CallBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one poll outcome. Returns `true` when the board changed.
    ///
    /// Successful outcomes replace the board wholesale and clear any local
    /// edits; failures leave the previous contents standing. An outcome whose
    /// sequence is at or below the last applied one lost a race with a newer
    /// poll and is dropped.
    pub fn apply(&mut self, outcome: PollOutcome) -> bool {
        let Ok(calls) = outcome.result else {
            // Already logged by the poller; the previous board stands.
            return false;
        };
        if outcome.seq <= self.last_applied_seq {
            tracing::debug!(
                seq = outcome.seq,
                applied = self.last_applied_seq,
                "dropping stale poll outcome"
            );
            return false;
        }
        self.last_applied_seq = outcome.seq;
        self.last_fetched_at = Some(outcome.fetched_at);
        self.calls = calls;
        self.locally_edited = false;
        true
    }

    /// Unfiltered board contents in fetch order.
    #[must_use]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Call> {
        self.calls.iter().find(|call| call.id == id)
    }

    /// Per-status counts over the whole board, for the filter tabs.
    #[must_use]
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.calls)
    }

    /// The projection the UI renders: filtered, then newest-first.
    #[must_use]
    pub fn visible(&self, filter: StatusFilter) -> Vec<Call> {
        view::visible_calls(&self.calls, filter)
    }

    #[must_use]
    pub const fn last_fetched_at(&self) -> Option<DateTime<Utc>> {
        self.last_fetched_at
    }

    /// Whether an operator edit is pending that the next poll will discard.
    #[must_use]
    pub const fn has_local_edits(&self) -> bool {
        self.locally_edited
    }

    /// Local-only status action on one call.
    ///
    /// Only `active -> preparing` and `preparing -> completed` exist; any
    /// other status (or an unknown id) is a no-op. The edit lives in this
    /// in-memory copy only and resets on the next applied poll.
    pub fn advance_status(&mut self, id: &str) -> Option<CallStatus> {
        let call = self.calls.iter_mut().find(|call| call.id == id)?;
        let next = call.status.next_action()?;
        call.status = next;
        self.locally_edited = true;
        tracing::debug!(%id, status = next.as_str(), "local status edit (display only)");
        Some(next)
    }
}
