//! Right-side order-detail drawer.
//!
//! Opening the drawer kicks off an independent fetch of the full order
//! collection; until it resolves the drawer shows a loading state. A lookup
//! that finds no matching conversation id — or fails outright — degrades to
//! the explicit not-found state rather than an error surface.

use carrydeck_client::poll::DetailOutcome;
use carrydeck_core::order::Order;
use carrydeck_core::pricing::{OrderSummary, format_usd};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Drawer lifecycle for the currently selected call, if any.
#[derive(Debug, Default)]
pub enum DrawerState {
    #[default]
    Closed,
    /// Lookup in flight for this id.
    Loading { id: String },
    /// Latest fetch had no order with this conversation id.
    NotFound { id: String },
    Loaded {
        order: Order,
        summary: OrderSummary,
    },
}

impl DrawerState {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Fold one lookup outcome into the drawer. The caller has already
    /// checked the token; a failed lookup presents as not-found.
    pub fn apply(&mut self, outcome: DetailOutcome) {
        if !self.is_open() {
            return;
        }
        *self = match outcome.result {
            Ok(Some(order)) => Self::Loaded {
                summary: OrderSummary::for_order(&order),
                order,
            },
            Ok(None) | Err(_) => Self::NotFound { id: outcome.id },
        };
    }
}

/// Render the drawer into its pane.
pub fn render(frame: &mut ratatui::Frame<'_>, state: &DrawerState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Order Details ");
    match state {
        DrawerState::Closed => {}
        DrawerState::Loading { id } => {
            let body = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Fetching order...",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(Span::styled(
                    id.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(body, area);
        }
        DrawerState::NotFound { id } => {
            let body = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No order details found.",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("Nothing in the latest fetch matches {id}"),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            frame.render_widget(body, area);
        }
        DrawerState::Loaded { order, summary } => {
            let body = Paragraph::new(detail_lines(order, summary))
                .wrap(Wrap { trim: false })
                .block(block);
            frame.render_widget(body, area);
        }
    }
}

/// Build the drawer body for a matched order.
#[must_use]
pub fn detail_lines(order: &Order, summary: &OrderSummary) -> Vec<Line<'static>> {
    let badge_color = if summary.payment.verified {
        Color::Green
    } else {
        Color::Yellow
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                order.caller().to_string(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" • "),
            Span::styled(order.phone().to_string(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(Span::styled(
            summary.payment.badge,
            Style::default().fg(badge_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for item in &summary.lines {
        lines.push(Line::from(vec![
            Span::raw(format!("{}x {}", item.quantity, item.item)),
            Span::raw("  "),
            Span::styled(
                format_usd(item.line_total_cents),
                Style::default().fg(Color::White),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(money_line("Subtotal", summary.subtotal(), Color::DarkGray));
    lines.push(money_line("Tax (8%)", summary.tax(), Color::DarkGray));
    lines.push(money_line("Total", summary.total(), Color::Cyan));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Payment Method",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(vec![
        Span::raw(summary.payment.method),
        Span::raw("  "),
        Span::styled(
            summary.payment.verification_label(),
            Style::default().fg(badge_color),
        ),
    ]));

    if let Some(notes) = &order.special_instructions {
        if !notes.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Special Instructions",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(notes.clone()));
        }
    }

    lines
}

fn money_line(label: &'static str, amount: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(color)),
        Span::raw(amount),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use carrydeck_client::fetch::FetchError;
    use carrydeck_core::order::OrderItem;

    fn order() -> Order {
        Order {
            conversation_id: Some("cnv-001".to_string()),
            customer_name: Some("Maya Singh".to_string()),
            contact_number: Some("+1-555-0101".to_string()),
            items_ordered: vec![OrderItem {
                item: "Burger".to_string(),
                quantity: 2,
            }],
            order_confirmed: true,
            payment_status: "paid".to_string(),
            special_instructions: Some("extra pickles".to_string()),
        }
    }

    fn outcome(result: Result<Option<Order>, FetchError>) -> DetailOutcome {
        DetailOutcome {
            token: 1,
            id: "cnv-001".to_string(),
            result,
        }
    }

    fn rendered_text(lines: &[Line<'_>]) -> String {
        lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn match_loads_the_priced_summary() {
        let mut state = DrawerState::Loading {
            id: "cnv-001".to_string(),
        };
        state.apply(outcome(Ok(Some(order()))));
        match &state {
            DrawerState::Loaded { summary, .. } => {
                assert_eq!(summary.total_cents, 3_240);
            }
            other => panic!("expected loaded drawer, got {other:?}"),
        }
    }

    #[test]
    fn no_match_presents_not_found() {
        let mut state = DrawerState::Loading {
            id: "cnv-404".to_string(),
        };
        state.apply(outcome(Ok(None)));
        assert!(matches!(state, DrawerState::NotFound { .. }));
    }

    #[test]
    fn lookup_failure_degrades_to_not_found() {
        let mut state = DrawerState::Loading {
            id: "cnv-001".to_string(),
        };
        state.apply(outcome(Err(FetchError::Decode(std::io::Error::other(
            "bad envelope",
        )))));
        assert!(matches!(state, DrawerState::NotFound { .. }));
    }

    #[test]
    fn outcomes_after_close_are_ignored() {
        let mut state = DrawerState::Closed;
        state.apply(outcome(Ok(Some(order()))));
        assert!(matches!(state, DrawerState::Closed));
    }

    #[test]
    fn detail_lines_cover_items_totals_and_payment() {
        let order = order();
        let summary = OrderSummary::for_order(&order);
        let text = rendered_text(&detail_lines(&order, &summary));
        assert!(text.contains("Maya Singh"));
        assert!(text.contains("2x Burger"));
        assert!(text.contains("Subtotal: $30.00"));
        assert!(text.contains("Tax (8%): $2.40"));
        assert!(text.contains("Total: $32.40"));
        assert!(text.contains("Card ending in ****4532"));
        assert!(text.contains("Verified"));
        assert!(text.contains("extra pickles"));
    }

    #[test]
    fn unpaid_orders_show_pending_payment() {
        let mut order = order();
        order.payment_status = "pending".to_string();
        let summary = OrderSummary::for_order(&order);
        let text = rendered_text(&detail_lines(&order, &summary));
        assert!(text.contains("Awaiting Payment"));
        assert!(text.contains("Pending"));
        assert!(text.contains("Unverified"));
        assert!(!text.contains("****4532"));
    }
}
