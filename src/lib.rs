//! Cloud messaging core for devices on low-bandwidth datagram bearers.
//!
//! The crate is organized as three layers, each usable on its own:
//!
//! - [`frame`]: a compact, tag-packed header codec identifying datagrams as
//!   requests, fire-and-forget requests, or responses.
//! - [`channel`]: a request/response state machine over an arbitrary datagram
//!   transport, covering outbound request tracking, response correlation,
//!   timeouts and session-based cancellation.
//! - [`cloud`]: the application layer with the connect/disconnect lifecycle,
//!   event publish/subscribe carrying a self-describing [`value::Value`]
//!   payload, and a diagnostics query responder.
//!
//! The core is single-threaded and cooperative. It is driven entirely by the
//! embedder: `receive` for inbound datagrams, `run` for timers, and the
//! publish/subscribe/connect API for application work. Sending goes through a
//! single `on_send` callback supplied at init; the core never spawns tasks and
//! never blocks.

pub mod channel;
pub mod cloud;
pub mod constants;
pub mod error;
pub mod frame;
pub mod utils;
pub mod value;

pub use error::{Error, Result};
