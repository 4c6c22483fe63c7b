//! Pure filter/sort derivation over the board.
//!
//! The board itself is just a `Vec<Call>` replaced wholesale on each poll;
//! everything the UI shows is derived here: the status filter, the
//! newest-first sort, and the per-status counts for the filter tabs.

use serde::Serialize;

use crate::call::{Call, CallStatus};

/// User-selected status filter for the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CallStatus),
}

impl StatusFilter {
    /// Filter tabs in display order.
    pub const TABS: [Self; 5] = [
        Self::All,
        Self::Only(CallStatus::Active),
        Self::Only(CallStatus::Preparing),
        Self::Only(CallStatus::AwaitingPayment),
        Self::Only(CallStatus::Completed),
    ];

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All Orders",
            Self::Only(CallStatus::Active) => "Active Orders",
            Self::Only(status) => status.label(),
        }
    }

    /// CLI identifier (`all` or a status identifier).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    /// Parse a CLI identifier.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        if value == "all" {
            return Some(Self::All);
        }
        CallStatus::parse(value).map(Self::Only)
    }

    #[must_use]
    pub fn matches(self, status: CallStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == status,
        }
    }

    /// Next tab, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        let idx = Self::TABS.iter().position(|t| *t == self).unwrap_or(0);
        Self::TABS[(idx + 1) % Self::TABS.len()]
    }

    /// Previous tab, wrapping.
    #[must_use]
    pub fn prev(self) -> Self {
        let idx = Self::TABS.iter().position(|t| *t == self).unwrap_or(0);
        Self::TABS[(idx + Self::TABS.len() - 1) % Self::TABS.len()]
    }
}

/// Per-status counts over the *unfiltered* board, for the filter tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub all: usize,
    pub active: usize,
    pub preparing: usize,
    pub awaiting_payment: usize,
    pub completed: usize,
}

impl StatusCounts {
    /// Count every status across the whole board.
    #[must_use]
    pub fn tally(calls: &[Call]) -> Self {
        let mut counts = Self {
            all: calls.len(),
            ..Self::default()
        };
        for call in calls {
            match call.status {
                CallStatus::Active => counts.active += 1,
                CallStatus::Preparing => counts.preparing += 1,
                CallStatus::AwaitingPayment => counts.awaiting_payment += 1,
                CallStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }

    /// Count shown on one filter tab.
    #[must_use]
    pub const fn get(self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Only(CallStatus::Active) => self.active,
            StatusFilter::Only(CallStatus::Preparing) => self.preparing,
            StatusFilter::Only(CallStatus::AwaitingPayment) => self.awaiting_payment,
            StatusFilter::Only(CallStatus::Completed) => self.completed,
        }
    }
}

/// Subsequence of calls matching the filter, input order preserved.
#[must_use]
pub fn filter_calls(calls: &[Call], filter: StatusFilter) -> Vec<Call> {
    calls
        .iter()
        .filter(|call| filter.matches(call.status))
        .cloned()
        .collect()
}

/// Sort newest-first. `sort_by` is stable, which matters here: every call in
/// one poll cycle shares the same fetch timestamp.
pub fn sort_newest_first(calls: &mut [Call]) {
    calls.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

/// Filter then sort: the exact projection the board renders.
#[must_use]
pub fn visible_calls(calls: &[Call], filter: StatusFilter) -> Vec<Call> {
    let mut visible = filter_calls(calls, filter);
    sort_newest_first(&mut visible);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use proptest::prelude::*;

    fn call(id: &str, status: CallStatus, age_minutes: i64) -> Call {
        Call {
            id: id.to_string(),
            caller: "caller".to_string(),
            phone: "N/A".to_string(),
            duration: "—".to_string(),
            status,
            transcript: "—".to_string(),
            order_total_cents: 1_500,
            timestamp: Utc::now() - Duration::minutes(age_minutes),
            order_items: 1,
        }
    }

    fn sample_board() -> Vec<Call> {
        vec![
            call("a", CallStatus::Active, 5),
            call("b", CallStatus::Completed, 1),
            call("c", CallStatus::Active, 3),
            call("d", CallStatus::AwaitingPayment, 2),
            call("e", CallStatus::Preparing, 4),
        ]
    }

    #[test]
    fn filter_all_is_identity() {
        let board = sample_board();
        let filtered = filter_calls(&board, StatusFilter::All);
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn filter_by_status_preserves_input_order() {
        let board = sample_board();
        let filtered = filter_calls(&board, StatusFilter::Only(CallStatus::Active));
        let ids: Vec<&str> = filtered.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn visible_calls_sorts_newest_first() {
        let board = sample_board();
        let visible = visible_calls(&board, StatusFilter::All);
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "c", "e", "a"]);
    }

    #[test]
    fn sort_is_stable_for_equal_timestamps() {
        let shared = Utc::now();
        let mut board = sample_board();
        for c in &mut board {
            c.timestamp = shared;
        }
        sort_newest_first(&mut board);
        let ids: Vec<&str> = board.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn counts_tally_whole_board() {
        let counts = StatusCounts::tally(&sample_board());
        assert_eq!(counts.all, 5);
        assert_eq!(counts.active, 2);
        assert_eq!(counts.preparing, 1);
        assert_eq!(counts.awaiting_payment, 1);
        assert_eq!(counts.completed, 1);
    }

    #[test]
    fn counts_on_empty_board_are_all_zero() {
        assert_eq!(StatusCounts::tally(&[]), StatusCounts::default());
    }

    #[test]
    fn tab_cycling_wraps_both_ways() {
        let mut tab = StatusFilter::All;
        for _ in 0..StatusFilter::TABS.len() {
            tab = tab.next();
        }
        assert_eq!(tab, StatusFilter::All);
        assert_eq!(StatusFilter::All.prev(), StatusFilter::Only(CallStatus::Completed));
    }

    #[test]
    fn parse_accepts_all_and_each_status() {
        assert_eq!(StatusFilter::parse("all"), Some(StatusFilter::All));
        assert_eq!(
            StatusFilter::parse("awaiting-payment"),
            Some(StatusFilter::Only(CallStatus::AwaitingPayment))
        );
        assert_eq!(StatusFilter::parse("bogus"), None);
    }

    proptest! {
        #[test]
        fn filtered_calls_all_match_and_are_a_subsequence(
            statuses in proptest::collection::vec(0usize..4, 0..24),
            pick in 0usize..4,
        ) {
            let board: Vec<Call> = statuses
                .iter()
                .enumerate()
                .map(|(i, s)| call(&format!("c{i}"), CallStatus::ALL[*s], 0))
                .collect();
            let filter = StatusFilter::Only(CallStatus::ALL[pick]);
            let filtered = filter_calls(&board, filter);
            prop_assert!(filtered.iter().all(|c| filter.matches(c.status)));
            // Subsequence: ids appear in the same relative order as the board.
            let mut cursor = 0;
            for c in &filtered {
                let pos = board[cursor..].iter().position(|b| b.id == c.id);
                prop_assert!(pos.is_some());
                cursor += pos.unwrap_or(0) + 1;
            }
            // Plus the counts agree with the filter.
            let counts = StatusCounts::tally(&board);
            prop_assert_eq!(counts.get(filter), filtered.len());
        }
    }
}
