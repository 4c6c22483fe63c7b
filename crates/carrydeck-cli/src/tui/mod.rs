//! Full-screen live board.
//!
//! The run loop owns the terminal and the update channel: a background poller
//! feeds board snapshots, transient workers feed drawer lookups, and all
//! state mutation happens here on the UI thread.

pub mod board;
pub mod drawer;

use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use carrydeck_client::fetch::OrdersClient;
use carrydeck_client::poll::Poller;
use crossterm::event::{self, Event, KeyEventKind};

use board::BoardView;

/// How long to block on terminal events between ticks.
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the board until the user quits.
pub fn run_board_tui(client: OrdersClient, interval: Duration) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let poller = Poller::spawn(client.clone(), interval, tx.clone());
    let mut app = BoardView::new(client, rx, tx);

    let mut terminal = ratatui::init();
    let result = run_loop(&mut terminal, &mut app, &poller);
    ratatui::restore();
    poller.stop();
    result
}

fn run_loop(
    terminal: &mut ratatui::DefaultTerminal,
    app: &mut BoardView,
    poller: &Poller,
) -> Result<()> {
    while !app.should_quit() {
        app.tick();
        if app.take_refresh_request() {
            poller.request_refresh();
        }
        terminal
            .draw(|frame| app.render(frame, frame.area()))
            .context("draw board")?;
        if event::poll(EVENT_POLL_INTERVAL).context("poll terminal events")? {
            if let Event::Key(key) = event::read().context("read terminal event")? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
    }
    Ok(())
}
