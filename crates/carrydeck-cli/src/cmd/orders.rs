//! `carry orders` — fetch once and list the current board.

use anyhow::{Context, Result, anyhow};
use carrydeck_client::fetch::OrdersClient;
use carrydeck_core::call::Call;
use carrydeck_core::config::UserConfig;
use carrydeck_core::view::{self, StatusCounts, StatusFilter};
use clap::Args;
use serde::Serialize;
use std::io::{self, Write};

use crate::output::{self, OutputMode, Renderable};

#[derive(Args, Debug)]
pub struct OrdersArgs {
    /// Filter by status: all, active, preparing, awaiting-payment, completed.
    #[arg(short, long, default_value = "all")]
    pub status: String,
}

/// What one invocation reports: counts over the whole fetch plus the
/// filtered, newest-first projection.
#[derive(Debug, Serialize)]
struct OrdersReport {
    filter: &'static str,
    counts: StatusCounts,
    orders: Vec<Call>,
}

impl Renderable for OrdersReport {
    fn render_human(&self, w: &mut dyn Write) -> io::Result<()> {
        writeln!(
            w,
            "{} orders · {} active · {} preparing · {} awaiting payment · {} completed",
            self.counts.all,
            self.counts.active,
            self.counts.preparing,
            self.counts.awaiting_payment,
            self.counts.completed,
        )?;
        if self.orders.is_empty() {
            writeln!(w, "\nNo orders found")?;
            return Ok(());
        }
        writeln!(w)?;
        for call in &self.orders {
            writeln!(
                w,
                "{:<12} {:<22} {:<14} {:<17} {:>8}  {} items  {}",
                call.id,
                call.caller,
                call.phone,
                call.status.label(),
                call.order_total(),
                call.order_items,
                call.transcript,
            )?;
        }
        Ok(())
    }

    fn render_json(&self, w: &mut dyn Write) -> io::Result<()> {
        serde_json::to_writer_pretty(w, self)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
    }
}

pub fn run_orders(args: &OrdersArgs, output: OutputMode, config: &UserConfig) -> Result<()> {
    let filter = StatusFilter::parse(&args.status).ok_or_else(|| {
        anyhow!(
            "unknown status filter `{}` (expected all, active, preparing, awaiting-payment, completed)",
            args.status
        )
    })?;

    let client = OrdersClient::new(config.endpoint.clone());
    let calls = client.fetch_calls().context("fetch orders")?;

    let report = OrdersReport {
        filter: filter.as_str(),
        counts: StatusCounts::tally(&calls),
        orders: view::visible_calls(&calls, filter),
    };
    output::render_item(&report, output)?;
    Ok(())
}
