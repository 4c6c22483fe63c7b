//! Pricing for cards and the drawer summary.
//!
//! The backend carries no per-item pricing, so every menu item is quoted at
//! one flat unit price. Amounts are integer cents; all reachable values are
//! multiples of the unit price, so the 8% tax divides exactly.

use serde::Serialize;

use crate::order::Order;

/// Flat quote per menu item, in cents.
pub const UNIT_PRICE_CENTS: u64 = 1_500;

/// Sales tax applied to the drawer summary.
pub const TAX_RATE_PERCENT: u64 = 8;

/// Static display string for verified payments. There is no payment data
/// behind it; the payment panel is presentational only.
pub const MASKED_CARD: &str = "Card ending in ****4532";

/// Quantity-weighted total for one menu line.
#[must_use]
pub fn line_total_cents(quantity: u32) -> u64 {
    u64::from(quantity) * UNIT_PRICE_CENTS
}

/// Flat card quote: one unit price per menu line, ignoring quantities.
/// This mirrors the console's card total and intentionally differs from the
/// drawer's quantity-weighted summary.
#[must_use]
pub fn listed_total_cents(menu_lines: usize) -> u64 {
    menu_lines as u64 * UNIT_PRICE_CENTS
}

/// Format cents as `$NN.NN`.
#[must_use]
pub fn format_usd(cents: u64) -> String {
    format!("${}.{:02}", cents / 100, cents % 100)
}

/// One priced line in the drawer summary.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryLine {
    pub item: String,
    pub quantity: u32,
    pub line_total_cents: u64,
}

/// Presentational payment-verification panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentDisplay {
    pub badge: &'static str,
    pub method: &'static str,
    pub verified: bool,
}

impl PaymentDisplay {
    /// Payment is deemed verified only when the backend says `"paid"`.
    #[must_use]
    pub const fn for_paid(is_paid: bool) -> Self {
        if is_paid {
            Self {
                badge: "Paid",
                method: MASKED_CARD,
                verified: true,
            }
        } else {
            Self {
                badge: "Awaiting Payment",
                method: "Pending",
                verified: false,
            }
        }
    }

    #[must_use]
    pub const fn verification_label(self) -> &'static str {
        if self.verified { "Verified" } else { "Unverified" }
    }
}

/// Priced summary for one order: lines, subtotal, tax, total, payment panel.
#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub lines: Vec<SummaryLine>,
    pub subtotal_cents: u64,
    pub tax_cents: u64,
    pub total_cents: u64,
    pub payment: PaymentDisplay,
}

impl OrderSummary {
    /// Price one order: `subtotal = Σ quantity × unit price`,
    /// `tax = subtotal × 8%`, `total = subtotal + tax`.
    #[must_use]
    pub fn for_order(order: &Order) -> Self {
        let lines: Vec<SummaryLine> = order
            .items_ordered
            .iter()
            .map(|line| SummaryLine {
                item: line.item.clone(),
                quantity: line.quantity,
                line_total_cents: line_total_cents(line.quantity),
            })
            .collect();
        let subtotal_cents: u64 = lines.iter().map(|l| l.line_total_cents).sum();
        let tax_cents = subtotal_cents * TAX_RATE_PERCENT / 100;
        Self {
            subtotal_cents,
            tax_cents,
            total_cents: subtotal_cents + tax_cents,
            payment: PaymentDisplay::for_paid(order.is_paid()),
            lines,
        }
    }

    #[must_use]
    pub fn subtotal(&self) -> String {
        format_usd(self.subtotal_cents)
    }

    #[must_use]
    pub fn tax(&self) -> String {
        format_usd(self.tax_cents)
    }

    #[must_use]
    pub fn total(&self) -> String {
        format_usd(self.total_cents)
    }
}
