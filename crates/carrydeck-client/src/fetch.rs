//! HTTP access to the orders endpoint.

use carrydeck_core::call::{self, Call};
use carrydeck_core::order::{Order, OrdersEnvelope};
use chrono::Utc;
use thiserror::Error;

/// Why one fetch cycle produced nothing.
///
/// Both variants degrade the same way in the TUI (keep the previous board,
/// log, wait for the next cycle); one-shot commands surface them distinctly.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network/transport failure or a non-2xx status from the endpoint.
    #[error("orders request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    /// The body was not the expected `{ "orders": [...] }` envelope.
    #[error("orders response was not a valid envelope: {0}")]
    Decode(#[from] std::io::Error),
}

/// Read-only client for the orders endpoint. Cheap to clone; worker threads
/// each take their own copy.
#[derive(Debug, Clone)]
pub struct OrdersClient {
    endpoint: String,
}

impl OrdersClient {
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// One GET against the orders endpoint, decoded into the envelope.
    ///
    /// The bypass header tells the tunnel service to return the JSON body
    /// instead of its interstitial warning page.
    pub fn fetch_orders(&self) -> Result<Vec<Order>, FetchError> {
        let response = ureq::get(&self.endpoint)
            .set("ngrok-skip-browser-warning", "true")
            .set("User-Agent", "carrydeck-cli")
            .call()
            .map_err(Box::new)?;
        let envelope: OrdersEnvelope = response.into_json()?;
        Ok(envelope.orders)
    }

    /// Fetch and project into board calls, stamping the shared fetch time.
    pub fn fetch_calls(&self) -> Result<Vec<Call>, FetchError> {
        let orders = self.fetch_orders()?;
        Ok(call::map_orders(&orders, Utc::now()))
    }

    /// Re-fetch the full collection and locate one order by conversation id.
    ///
    /// Calls whose card id came from the positional fallback have no
    /// conversation id and therefore never match; that is a `NotFound`
    /// presentation, not an error.
    pub fn fetch_order_by_id(&self, id: &str) -> Result<Option<Order>, FetchError> {
        let orders = self.fetch_orders()?;
        Ok(orders
            .into_iter()
            .find(|order| order.conversation_id.as_deref() == Some(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_keeps_the_configured_endpoint() {
        let client = OrdersClient::new("http://localhost:8080/orders");
        assert_eq!(client.endpoint(), "http://localhost:8080/orders");
    }

    #[test]
    fn transport_errors_surface_as_transport() {
        // Nothing listens on a reserved discard port; the request must fail
        // at the transport layer, not as a decode problem.
        let client = OrdersClient::new("http://127.0.0.1:9/orders");
        match client.fetch_orders() {
            Err(FetchError::Transport(_)) => {}
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
