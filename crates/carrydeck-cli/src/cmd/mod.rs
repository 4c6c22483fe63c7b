//! Command handlers for the `carry` binary.

pub mod orders;
pub mod show;
pub mod watch;
