//! TUI board view: the live order grid.
//!
//! Full-screen terminal UI with:
//! - Filter tabs with per-status counts over the whole board
//! - One card row per call: caller, status badge, total, age, transcript
//! - Right-side order-detail drawer
//! - Key bindings: j/k navigate, Tab/1-5 filter, Enter details, m advance
//!   status (local only), r refresh, q quit

use std::sync::mpsc;
use std::time::{Duration, Instant};

use carrydeck_client::board::CallBoard;
use carrydeck_client::fetch::OrdersClient;
use carrydeck_client::poll::{self, DetailOutcome, Update};
use carrydeck_core::call::{Call, CallStatus};
use carrydeck_core::timefmt;
use carrydeck_core::view::{StatusCounts, StatusFilter};
use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use super::drawer::{self, DrawerState};

/// How long a transient status message stays in the status line.
const STATUS_MSG_TTL: Duration = Duration::from_secs(4);

/// Badge color for a status.
const fn status_color(status: CallStatus) -> Color {
    match status {
        CallStatus::Active => Color::Green,
        CallStatus::Preparing => Color::Blue,
        CallStatus::AwaitingPayment => Color::Yellow,
        CallStatus::Completed => Color::DarkGray,
    }
}

/// Badge glyph for a status.
const fn status_icon(status: CallStatus) -> &'static str {
    match status {
        CallStatus::Active => "✆",
        CallStatus::Preparing => "♨",
        CallStatus::AwaitingPayment => "$",
        CallStatus::Completed => "✔",
    }
}

/// Truncate a string to at most `max_chars`, appending '…' if truncated.
fn truncate(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_chars {
        s.to_string()
    } else if max_chars == 0 {
        String::new()
    } else {
        let truncated: String = chars[..max_chars.saturating_sub(1)].iter().collect();
        format!("{truncated}…")
    }
}

/// Main application state for the board view.
pub struct BoardView {
    /// Client handed to detail-lookup workers.
    client: OrdersClient,
    /// Updates arriving from the poller and detail workers.
    rx: mpsc::Receiver<Update>,
    /// Sender cloned into detail-lookup workers.
    tx: mpsc::Sender<Update>,
    /// The board as of the last applied poll, plus local edits.
    board: CallBoard,
    /// Current filter tab.
    filter: StatusFilter,
    /// Filtered, newest-first projection — what the table shows.
    visible: Vec<Call>,
    /// Table navigation state (selected row index in `visible`).
    table_state: TableState,
    /// Detail drawer for the selected call.
    drawer: DrawerState,
    /// Token of the most recently issued detail lookup. Responses bearing an
    /// older token lost a race with a newer selection and are dropped.
    detail_token: u64,
    /// Set by the `r` key; the run loop forwards it to the poller.
    refresh_requested: bool,
    /// Whether to quit.
    should_quit: bool,
    /// Transient status message with its creation time.
    status_msg: Option<(String, Instant)>,
}

impl BoardView {
    #[must_use]
    pub fn new(client: OrdersClient, rx: mpsc::Receiver<Update>, tx: mpsc::Sender<Update>) -> Self {
        Self {
            client,
            rx,
            tx,
            board: CallBoard::new(),
            filter: StatusFilter::default(),
            visible: Vec::new(),
            table_state: TableState::default(),
            drawer: DrawerState::default(),
            detail_token: 0,
            refresh_requested: false,
            should_quit: false,
            status_msg: None,
        }
    }

    /// Drain pending worker updates and expire stale status messages.
    pub fn tick(&mut self) {
        while let Ok(update) = self.rx.try_recv() {
            match update {
                Update::Poll(outcome) => {
                    if self.board.apply(outcome) {
                        self.refresh_visible();
                    }
                }
                Update::Detail(outcome) => self.handle_detail_outcome(outcome),
            }
        }
        if let Some((_, at)) = &self.status_msg {
            if at.elapsed() >= STATUS_MSG_TTL {
                self.status_msg = None;
            }
        }
    }

    /// Fold one detail outcome into the drawer, dropping stale tokens.
    fn handle_detail_outcome(&mut self, outcome: DetailOutcome) {
        if outcome.token != self.detail_token {
            tracing::debug!(
                token = outcome.token,
                current = self.detail_token,
                "dropping stale detail outcome"
            );
            return;
        }
        self.drawer.apply(outcome);
    }

    /// Rebuild the visible projection after a board or filter change,
    /// clamping the selection into range.
    fn refresh_visible(&mut self) {
        self.visible = self.board.visible(self.filter);
        if self.visible.is_empty() {
            self.table_state.select(None);
        } else {
            let idx = self
                .table_state
                .selected()
                .map_or(0, |i| i.min(self.visible.len() - 1));
            self.table_state.select(Some(idx));
        }
    }

    fn select_next(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let idx = self.table_state.selected().map_or(0, |i| i + 1);
        self.table_state
            .select(Some(idx.min(self.visible.len() - 1)));
    }

    fn select_prev(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        let idx = self.table_state.selected().map_or(0, |i| i.saturating_sub(1));
        self.table_state.select(Some(idx));
    }

    fn select_first(&mut self) {
        if !self.visible.is_empty() {
            self.table_state.select(Some(0));
        }
    }

    fn select_last(&mut self) {
        if !self.visible.is_empty() {
            self.table_state.select(Some(self.visible.len() - 1));
        }
    }

    /// The call under the cursor, if any.
    #[must_use]
    pub fn selected_call(&self) -> Option<&Call> {
        self.table_state.selected().and_then(|i| self.visible.get(i))
    }

    fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.refresh_visible();
    }

    /// Selecting a card surfaces its id: open the drawer and issue a lookup.
    fn open_drawer(&mut self) {
        let Some(id) = self.selected_call().map(|call| call.id.clone()) else {
            return;
        };
        self.detail_token += 1;
        self.drawer = DrawerState::Loading { id: id.clone() };
        poll::spawn_detail_lookup(self.client.clone(), id, self.detail_token, self.tx.clone());
    }

    fn close_drawer(&mut self) {
        self.drawer = DrawerState::Closed;
    }

    /// Local-only status action on the selected call.
    fn advance_selected_status(&mut self) {
        let Some(id) = self.selected_call().map(|call| call.id.clone()) else {
            return;
        };
        match self.board.advance_status(&id) {
            Some(next) => {
                self.set_status(format!(
                    "{id} → {} (local only; resets on next poll)",
                    next.label()
                ));
                // Keep the cursor on the same call even if the filter hides it.
                let keep = self.visible.iter().position(|c| c.id == id);
                self.refresh_visible();
                if let Some(prev_idx) = keep {
                    let idx = self
                        .visible
                        .iter()
                        .position(|c| c.id == id)
                        .unwrap_or_else(|| prev_idx.min(self.visible.len().saturating_sub(1)));
                    if !self.visible.is_empty() {
                        self.table_state.select(Some(idx));
                    }
                }
            }
            None => self.set_status(format!("{id}: no status action available")),
        }
    }

    pub fn set_status(&mut self, msg: String) {
        self.status_msg = Some((msg, Instant::now()));
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// True once per `r` press; the run loop forwards it to the poller.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc => {
                if self.drawer.is_open() {
                    self.close_drawer();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => self.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.select_last(),
            KeyCode::Tab => self.set_filter(self.filter.next()),
            KeyCode::BackTab => self.set_filter(self.filter.prev()),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = match c {
                    '1' => 0,
                    '2' => 1,
                    '3' => 2,
                    '4' => 3,
                    _ => 4,
                };
                self.set_filter(StatusFilter::TABS[idx]);
            }
            KeyCode::Enter => self.open_drawer(),
            KeyCode::Char('m') => self.advance_selected_status(),
            KeyCode::Char('r') => {
                self.refresh_requested = true;
                self.set_status("refresh requested".to_string());
            }
            _ => {}
        }
    }

    /// Render the whole view.
    pub fn render(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let (main_area, drawer_area) = if self.drawer.is_open() {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
                .split(area);
            (chunks[0], Some(chunks[1]))
        } else {
            (area, None)
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(main_area);

        let counts = self.board.counts();
        self.render_header(frame, rows[0], counts);
        self.render_tabs(frame, rows[1], counts);
        self.render_table(frame, rows[2]);
        self.render_status_line(frame, rows[3]);
        render_footer(frame, rows[4]);

        if let Some(drawer_area) = drawer_area {
            drawer::render(frame, &self.drawer, drawer_area);
        }
    }

    fn render_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect, counts: StatusCounts) {
        let title = Line::from(vec![
            Span::styled(
                "Call-N-Carry — Order Management",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("●", Style::default().fg(Color::Green)),
            Span::styled(
                format!(" {} Active", counts.active),
                Style::default().fg(Color::Green),
            ),
        ]);
        let subtitle = Line::from(Span::styled(
            "Track and manage pickup orders in real time",
            Style::default().fg(Color::DarkGray),
        ));
        frame.render_widget(Paragraph::new(vec![title, subtitle]), area);
    }

    fn render_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect, counts: StatusCounts) {
        let mut spans = Vec::new();
        for (i, tab) in StatusFilter::TABS.iter().enumerate() {
            let color = match tab {
                StatusFilter::All => Color::Cyan,
                StatusFilter::Only(status) => status_color(*status),
            };
            let mut style = Style::default().fg(color);
            if *tab == self.filter {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }
            spans.push(Span::styled(
                format!("[{}] {} ({})", i + 1, tab.label(), counts.get(*tab)),
                style,
            ));
            spans.push(Span::raw("  "));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_table(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        if self.visible.is_empty() {
            let empty = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No orders found",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Orders with this status will appear here",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        }

        let now = Utc::now();
        let header = Row::new(
            ["Caller", "Phone", "Status", "Total", "Items", "Age", "Notes"]
                .map(|h| Cell::from(Span::styled(h, Style::default().fg(Color::DarkGray)))),
        );
        let rows: Vec<Row<'_>> = self
            .visible
            .iter()
            .map(|call| build_row(call, now))
            .collect();
        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(14),
                Constraint::Length(19),
                Constraint::Length(8),
                Constraint::Length(5),
                Constraint::Length(9),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_status_line(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = Vec::new();
        if let Some((msg, _)) = &self.status_msg {
            spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Cyan)));
            spans.push(Span::raw("  "));
        }
        if let Some(at) = self.board.last_fetched_at() {
            spans.push(Span::styled(
                format!("last update {}", timefmt::relative_age(at, Utc::now())),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(
                "waiting for first poll...",
                Style::default().fg(Color::DarkGray),
            ));
        }
        if self.board.has_local_edits() {
            spans.push(Span::styled(
                "  local edits are display-only and reset on the next poll",
                Style::default().fg(Color::Yellow),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Build one table row from a call.
fn build_row(call: &Call, now: chrono::DateTime<Utc>) -> Row<'static> {
    let color = status_color(call.status);
    Row::new([
        Cell::from(Span::styled(
            truncate(&call.caller, 24),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Cell::from(Span::styled(
            call.phone.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Cell::from(Line::from(vec![
            Span::styled(status_icon(call.status), Style::default().fg(color)),
            Span::raw(" "),
            Span::styled(call.status.label(), Style::default().fg(color)),
        ])),
        Cell::from(call.order_total()),
        Cell::from(format!("{}", call.order_items)),
        Cell::from(Span::styled(
            timefmt::relative_age(call.timestamp, now),
            Style::default().fg(Color::DarkGray),
        )),
        Cell::from(Span::styled(
            truncate(&call.transcript, 48),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn render_footer(frame: &mut ratatui::Frame<'_>, area: Rect) {
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " j/k move · tab/1-5 filter · enter details · m advance status · r refresh · q quit",
            Style::default().fg(Color::DarkGray),
        ))),
        area,
    );
}
