#![forbid(unsafe_code)]

mod cmd;
mod output;
mod tui;

use carrydeck_core::config::{self, UserConfig};
use clap::{Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "carry: live console for Call-N-Carry pickup orders",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Override the orders endpoint URL (skips config resolution).
    #[arg(long, global = true, value_name = "URL")]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Watch the live order board",
        long_about = "Open the full-screen board: poll the orders endpoint on an interval and show every order as a card with status, total, and age.",
        after_help = "EXAMPLES:\n    # Watch with the configured interval\n    carry watch\n\n    # Poll every 5 seconds\n    carry watch --interval 5"
    )]
    Watch(cmd::watch::WatchArgs),

    #[command(
        about = "List current orders once",
        long_about = "Fetch the orders endpoint once and print the board as rows, optionally filtered by status.",
        after_help = "EXAMPLES:\n    # List every order\n    carry orders\n\n    # Only active orders\n    carry orders --status active\n\n    # Emit machine-readable output\n    carry orders --json"
    )]
    Orders(cmd::orders::OrdersArgs),

    #[command(
        about = "Show one order's priced summary",
        long_about = "Fetch the orders endpoint once and print the full priced summary for one order by conversation id.",
        after_help = "EXAMPLES:\n    # Show an order\n    carry show cnv-001\n\n    # Emit machine-readable output\n    carry show cnv-001 --json"
    )]
    Show(cmd::show::ShowArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("CARRYDECK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "carrydeck=debug,info"
        } else {
            "carrydeck=info,warn"
        })
    });

    let format = env::var("CARRYDECK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    // Log lines go to stderr so they never corrupt the TUI or JSON output.
    let registry = tracing_subscriber::registry().with(filter);
    match format.as_str() {
        "json" => {
            registry
                .with(
                    fmt::layer()
                        .json()
                        .with_ansi(false)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Load the user config, falling back to defaults when it is broken, then
/// apply the command-line endpoint override.
fn resolve_config(endpoint_flag: Option<&str>) -> UserConfig {
    let mut config = config::load_user_config().unwrap_or_else(|err| {
        warn!(%err, "failed to load config; using defaults");
        UserConfig::default()
    });
    if let Some(endpoint) = endpoint_flag {
        config.endpoint = endpoint.to_string();
    }
    config
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = resolve_config(cli.endpoint.as_deref());
    let output = cli.output_mode();

    match cli.command {
        Commands::Watch(ref args) => cmd::watch::run_watch(args, &config),
        Commands::Orders(ref args) => cmd::orders::run_orders(args, output, &config),
        Commands::Show(ref args) => cmd::show::run_show(args, output, &config),
    }
}
