//! `carry show` — fetch once and print the priced summary for one order.

use anyhow::{Context, Result};
use carrydeck_client::fetch::OrdersClient;
use carrydeck_core::config::UserConfig;
use carrydeck_core::error::ErrorCode;
use carrydeck_core::order::Order;
use carrydeck_core::pricing::{OrderSummary, format_usd};
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};

use crate::output::{self, CliError, OutputMode, Renderable};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Conversation id of the order (as shown on the board).
    pub id: String,
}

#[derive(Debug, Serialize)]
struct ShowReport {
    order: Order,
    summary: OrderSummary,
}

impl Renderable for ShowReport {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        let id = self.order.display_id(0);
        output::section(w, &format!("Order Summary — {id}"))?;
        output::kv(
            w,
            "Customer",
            format!("{} • {}", self.order.caller(), self.order.phone()),
        )?;
        output::kv(w, "Status", self.summary.payment.badge)?;
        writeln!(w)?;
        for line in &self.summary.lines {
            writeln!(
                w,
                "  {}x {:<24} {:>8}",
                line.quantity,
                line.item,
                format_usd(line.line_total_cents),
            )?;
        }
        writeln!(w)?;
        output::kv(w, "Subtotal", self.summary.subtotal())?;
        output::kv(w, "Tax (8%)", self.summary.tax())?;
        output::kv(w, "Total", self.summary.total())?;
        writeln!(w)?;
        output::kv(
            w,
            "Payment",
            format!(
                "{} — {}",
                self.summary.payment.method,
                self.summary.payment.verification_label(),
            ),
        )?;
        if let Some(notes) = &self.order.special_instructions {
            if !notes.is_empty() {
                writeln!(w)?;
                output::kv(w, "Instructions", notes)?;
            }
        }
        Ok(())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

pub fn run_show(args: &ShowArgs, output: OutputMode, config: &UserConfig) -> Result<()> {
    let client = OrdersClient::new(config.endpoint.clone());
    let matched = client
        .fetch_order_by_id(&args.id)
        .context("fetch order details")?;

    let Some(order) = matched else {
        let code = ErrorCode::OrderNotFound;
        output::render_error(
            output,
            &CliError::with_details(
                format!("no order found for {}", args.id),
                code.hint(),
                code.code(),
            ),
        )?;
        std::process::exit(1);
    };

    let report = ShowReport {
        summary: OrderSummary::for_order(&order),
        order,
    };
    output::render_item(&report, output)?;
    Ok(())
}
