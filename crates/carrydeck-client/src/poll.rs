//! Background polling against the orders endpoint.
//!
//! The poller issues one fetch immediately, then one per interval, and sends
//! each outcome over an `mpsc` channel tagged with a monotonically increasing
//! sequence number. The receiver applies an outcome only when its sequence is
//! newer than the last applied one, so an overlapping slow response can never
//! clobber a fresher board.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use carrydeck_core::call::{self, Call};
use carrydeck_core::order::Order;
use chrono::{DateTime, Utc};

use crate::fetch::{FetchError, OrdersClient};

/// Message sent from worker threads to the UI thread.
#[derive(Debug)]
pub enum Update {
    /// One completed poll cycle, success or failure.
    Poll(PollOutcome),
    /// One completed detail lookup for the drawer.
    Detail(DetailOutcome),
}

/// Result of one poll cycle.
#[derive(Debug)]
pub struct PollOutcome {
    /// Issue order of the request, starting at 1.
    pub seq: u64,
    /// Client-assigned fetch time stamped onto every call in this cycle.
    pub fetched_at: DateTime<Utc>,
    pub result: Result<Vec<Call>, FetchError>,
}

/// Result of one drawer detail lookup.
#[derive(Debug)]
pub struct DetailOutcome {
    /// Selection token this lookup was issued for; stale tokens are dropped
    /// by the receiver.
    pub token: u64,
    pub id: String,
    pub result: Result<Option<Order>, FetchError>,
}

/// Handle to the background poll thread.
///
/// Dropping the handle (or the channel receiver) stops the thread after its
/// current request; a hung request occupies only the worker and blocks
/// nothing else.
#[derive(Debug)]
pub struct Poller {
    stop: Arc<AtomicBool>,
    kick: Arc<AtomicBool>,
}

impl Poller {
    /// Spawn the poll thread: one immediate fetch, then one per `interval`.
    #[must_use]
    pub fn spawn(client: OrdersClient, interval: Duration, tx: mpsc::Sender<Update>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let kick = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let kick_flag = Arc::clone(&kick);

        let spawned = thread::Builder::new()
            .name("carrydeck-poller".to_string())
            .spawn(move || run_poll_loop(&client, interval, &tx, &stop_flag, &kick_flag));
        if let Err(err) = spawned {
            tracing::error!(%err, "failed to spawn poll thread");
        }

        Self { stop, kick }
    }

    /// Ask the poller to skip the rest of the current wait and fetch now.
    pub fn request_refresh(&self) {
        self.kick.store(true, Ordering::Relaxed);
    }

    /// Stop after the in-flight request, if any. Does not block.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_poll_loop(
    client: &OrdersClient,
    interval: Duration,
    tx: &mpsc::Sender<Update>,
    stop: &AtomicBool,
    kick: &AtomicBool,
) {
    let mut seq: u64 = 0;
    while !stop.load(Ordering::Relaxed) {
        seq += 1;
        let fetched_at = Utc::now();
        let result = client
            .fetch_orders()
            .map(|orders| call::map_orders(&orders, fetched_at));
        match &result {
            Ok(calls) => tracing::debug!(seq, count = calls.len(), "poll cycle fetched"),
            Err(err) => tracing::warn!(seq, %err, "poll cycle failed; keeping previous board"),
        }
        if tx
            .send(Update::Poll(PollOutcome {
                seq,
                fetched_at,
                result,
            }))
            .is_err()
        {
            // Receiver gone: the UI was torn down.
            return;
        }
        wait_for_next_cycle(interval, stop, kick);
    }
}

/// Sleep out the interval in short slices so stop and refresh requests are
/// honored promptly.
fn wait_for_next_cycle(interval: Duration, stop: &AtomicBool, kick: &AtomicBool) {
    let deadline = Instant::now() + interval;
    while Instant::now() < deadline {
        if stop.load(Ordering::Relaxed) {
            return;
        }
        if kick.swap(false, Ordering::Relaxed) {
            return;
        }
        thread::sleep(Duration::from_millis(100));
    }
}

/// Issue one drawer detail lookup on a throwaway worker thread.
///
/// The token lets the receiver drop a response that was superseded by a newer
/// selection before it resolved.
pub fn spawn_detail_lookup(client: OrdersClient, id: String, token: u64, tx: mpsc::Sender<Update>) {
    let spawned = thread::Builder::new()
        .name("carrydeck-detail".to_string())
        .spawn(move || {
            let result = client.fetch_order_by_id(&id);
            match &result {
                Ok(Some(_)) => tracing::debug!(token, %id, "detail lookup matched"),
                Ok(None) => tracing::debug!(token, %id, "detail lookup found no order"),
                Err(err) => tracing::warn!(token, %id, %err, "detail lookup failed"),
            }
            let _ = tx.send(Update::Detail(DetailOutcome { token, id, result }));
        });
    if let Err(err) = spawned {
        tracing::error!(%err, "failed to spawn detail lookup thread");
    }
}
