//! `carry watch` — the full-screen live board.

use anyhow::Result;
use carrydeck_client::fetch::OrdersClient;
use carrydeck_core::config::UserConfig;
use clap::Args;
use std::time::Duration;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Poll interval in seconds (overrides config).
    #[arg(long, value_name = "SECS")]
    pub interval: Option<u64>,
}

pub fn run_watch(args: &WatchArgs, config: &UserConfig) -> Result<()> {
    let interval = args
        .interval
        .filter(|secs| *secs > 0)
        .map_or_else(|| config.poll_interval(), Duration::from_secs);
    let client = OrdersClient::new(config.endpoint.clone());
    crate::tui::run_board_tui(client, interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn watch_args_interval_is_optional() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: WatchArgs,
        }
        let w = Wrapper::parse_from(["test"]);
        assert!(w.args.interval.is_none());
        let w = Wrapper::parse_from(["test", "--interval", "5"]);
        assert_eq!(w.args.interval, Some(5));
    }
}
