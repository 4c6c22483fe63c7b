//! Remote order shape as the backend reports it.
//!
//! The orders endpoint returns a JSON envelope `{ "orders": [...] }`. The
//! backend omits identity and contact fields for calls that are still in
//! progress, so those decode as `Option` and callers apply display fallbacks.
//! `items_ordered` is required: an order without it fails the decode and the
//! whole poll cycle is discarded rather than producing a half-mapped card.

use serde::{Deserialize, Serialize};

/// JSON envelope returned by the orders endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct OrdersEnvelope {
    pub orders: Vec<Order>,
}

/// One authoritative pickup order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    pub items_ordered: Vec<OrderItem>,
    #[serde(default)]
    pub order_confirmed: bool,
    /// Free-form; `"paid"` is the only value with meaning.
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub special_instructions: Option<String>,
}

/// One menu line on an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub item: String,
    pub quantity: u32,
}

impl Order {
    /// Stable display id: the conversation id, or a positional fallback when
    /// the backend omitted it (or sent an empty string).
    #[must_use]
    pub fn display_id(&self, index: usize) -> String {
        non_empty(self.conversation_id.as_deref())
            .map_or_else(|| format!("order-{index}"), str::to_string)
    }

    #[must_use]
    pub fn caller(&self) -> &str {
        non_empty(self.customer_name.as_deref()).unwrap_or("Unknown Customer")
    }

    #[must_use]
    pub fn phone(&self) -> &str {
        non_empty(self.contact_number.as_deref()).unwrap_or("N/A")
    }

    /// Transcript preview: the special instructions, or a placeholder.
    #[must_use]
    pub fn transcript(&self) -> &str {
        non_empty(self.special_instructions.as_deref()).unwrap_or("—")
    }

    /// Whether the backend considers this order settled.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
