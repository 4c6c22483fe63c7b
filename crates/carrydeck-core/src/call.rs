//! Local call projection: what one card on the board shows.
//!
//! A [`Call`] is derived from one remote [`Order`] at fetch time. It carries
//! no identity across poll cycles; every applied poll replaces the whole
//! board wholesale.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::order::Order;
use crate::pricing;

/// Presentation status of a call card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CallStatus {
    Active,
    Preparing,
    AwaitingPayment,
    Completed,
}

impl CallStatus {
    /// All statuses in board display order.
    pub const ALL: [Self; 4] = [
        Self::Active,
        Self::Preparing,
        Self::AwaitingPayment,
        Self::Completed,
    ];

    /// Wire/CLI identifier for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Preparing => "preparing",
            Self::AwaitingPayment => "awaiting-payment",
            Self::Completed => "completed",
        }
    }

    /// Badge label shown on cards and filter tabs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active Order",
            Self::Preparing => "Preparing",
            Self::AwaitingPayment => "Awaiting Payment",
            Self::Completed => "Completed",
        }
    }

    /// Parse a CLI identifier (`active`, `preparing`, ...).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// The local-only operator action available from this status, if any.
    ///
    /// Only `active -> preparing` and `preparing -> completed` exist; the
    /// other statuses offer no action at all.
    #[must_use]
    pub const fn next_action(self) -> Option<Self> {
        match self {
            Self::Active => Some(Self::Preparing),
            Self::Preparing => Some(Self::Completed),
            Self::AwaitingPayment | Self::Completed => None,
        }
    }
}

/// Derive the presentation status from the backend's order flags.
///
/// Unconfirmed orders are still live calls; confirmed orders split on
/// payment. `preparing` is never derived here — it only exists as a local
/// operator edit.
#[must_use]
pub fn derive_status(order_confirmed: bool, payment_status: &str) -> CallStatus {
    if !order_confirmed {
        CallStatus::Active
    } else if payment_status == "paid" {
        CallStatus::Completed
    } else {
        CallStatus::AwaitingPayment
    }
}

/// Client-side projection of one [`Order`] for the board.
#[derive(Debug, Clone, Serialize)]
pub struct Call {
    pub id: String,
    pub caller: String,
    pub phone: String,
    /// Display-only placeholder; the backend does not report call duration.
    pub duration: String,
    pub status: CallStatus,
    pub transcript: String,
    /// Flat per-menu-line quote shown on the card. The drawer's priced
    /// summary weights by quantity instead; the two deliberately match the
    /// original console.
    pub order_total_cents: u64,
    /// Client-assigned fetch time. Every call in one poll cycle shares it,
    /// which is why the timestamp sort must be stable.
    pub timestamp: DateTime<Utc>,
    pub order_items: usize,
}

impl Call {
    /// Project one order into a board call.
    #[must_use]
    pub fn from_order(order: &Order, index: usize, fetched_at: DateTime<Utc>) -> Self {
        Self {
            id: order.display_id(index),
            caller: order.caller().to_string(),
            phone: order.phone().to_string(),
            duration: "—".to_string(),
            status: derive_status(order.order_confirmed, &order.payment_status),
            transcript: order.transcript().to_string(),
            order_total_cents: pricing::listed_total_cents(order.items_ordered.len()),
            timestamp: fetched_at,
            order_items: order.items_ordered.len(),
        }
    }

    /// Card total formatted as `$NN.NN`.
    #[must_use]
    pub fn order_total(&self) -> String {
        pricing::format_usd(self.order_total_cents)
    }
}

/// Map one fetched batch into board calls, stamping the shared fetch time.
#[must_use]
pub fn map_orders(orders: &[Order], fetched_at: DateTime<Utc>) -> Vec<Call> {
    orders
        .iter()
        .enumerate()
        .map(|(index, order)| Call::from_order(order, index, fetched_at))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderItem;
    use proptest::prelude::*;

    fn order(confirmed: bool, payment: &str) -> Order {
        Order {
            conversation_id: Some("cnv-001".to_string()),
            customer_name: Some("Maya Singh".to_string()),
            contact_number: Some("+1-555-0101".to_string()),
            items_ordered: vec![
                OrderItem {
                    item: "Burger".to_string(),
                    quantity: 2,
                },
                OrderItem {
                    item: "Fries".to_string(),
                    quantity: 1,
                },
            ],
            order_confirmed: confirmed,
            payment_status: payment.to_string(),
            special_instructions: None,
        }
    }

    #[test]
    fn status_mapping_four_way_table() {
        assert_eq!(derive_status(false, ""), CallStatus::Active);
        assert_eq!(derive_status(false, "paid"), CallStatus::Active);
        assert_eq!(derive_status(true, "pending"), CallStatus::AwaitingPayment);
        assert_eq!(derive_status(true, "paid"), CallStatus::Completed);
    }

    proptest! {
        #[test]
        fn status_mapping_is_pure_and_total(confirmed: bool, payment in ".*") {
            let status = derive_status(confirmed, &payment);
            let expected = match (confirmed, payment == "paid") {
                (false, _) => CallStatus::Active,
                (true, false) => CallStatus::AwaitingPayment,
                (true, true) => CallStatus::Completed,
            };
            prop_assert_eq!(status, expected);
            // Same inputs, same answer.
            prop_assert_eq!(derive_status(confirmed, &payment), status);
        }
    }

    #[test]
    fn from_order_projects_fields() {
        let fetched_at = Utc::now();
        let call = Call::from_order(&order(true, "paid"), 0, fetched_at);
        assert_eq!(call.id, "cnv-001");
        assert_eq!(call.caller, "Maya Singh");
        assert_eq!(call.duration, "—");
        assert_eq!(call.status, CallStatus::Completed);
        assert_eq!(call.order_items, 2);
        // Two menu lines at the flat unit price, regardless of quantities.
        assert_eq!(call.order_total_cents, 3_000);
        assert_eq!(call.order_total(), "$30.00");
        assert_eq!(call.timestamp, fetched_at);
    }

    #[test]
    fn map_orders_shares_one_fetch_time_and_assigns_positional_ids() {
        let mut second = order(false, "");
        second.conversation_id = None;
        let fetched_at = Utc::now();
        let calls = map_orders(&[order(false, ""), second], fetched_at);
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].id, "cnv-001");
        assert_eq!(calls[1].id, "order-1");
        assert!(calls.iter().all(|c| c.timestamp == fetched_at));
    }

    #[test]
    fn next_action_only_from_active_and_preparing() {
        assert_eq!(CallStatus::Active.next_action(), Some(CallStatus::Preparing));
        assert_eq!(
            CallStatus::Preparing.next_action(),
            Some(CallStatus::Completed)
        );
        assert_eq!(CallStatus::AwaitingPayment.next_action(), None);
        assert_eq!(CallStatus::Completed.next_action(), None);
    }

    #[test]
    fn parse_round_trips_all_statuses() {
        for status in CallStatus::ALL {
            assert_eq!(CallStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CallStatus::parse("cancelled"), None);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&CallStatus::AwaitingPayment).expect("serialize");
        assert_eq!(json, "\"awaiting-payment\"");
    }
}
