//! carrydeck-core library.
//!
//! Pure data model and derivation logic for the carrydeck order console:
//! the remote [`order::Order`] shape, the local [`call::Call`] projection
//! shown on the board, filter/sort derivation, pricing, and user config.
//!
//! # Conventions
//!
//! - **Errors**: `anyhow::Result` at loading boundaries; derivation functions
//!   are total and return plain values.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`).

pub mod call;
pub mod config;
pub mod error;
pub mod order;
pub mod pricing;
pub mod timefmt;
pub mod view;
