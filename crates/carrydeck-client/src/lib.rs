//! carrydeck-client library.
//!
//! Everything that talks to (or buffers state from) the order backend:
//!
//! - [`fetch::OrdersClient`] — one-shot HTTP GET + envelope decode.
//! - [`poll`] — background poll thread with sequence-numbered outcomes.
//! - [`board::CallBoard`] — the in-memory board the UI renders from.
//!
//! All state mutation happens on the caller's thread by draining
//! [`poll::Update`] messages; workers only send.

pub mod board;
pub mod fetch;
pub mod poll;
