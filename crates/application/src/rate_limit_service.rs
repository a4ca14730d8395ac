//! Client-side attempt limiting for sensitive account flows.
//!
//! Tracks attempts per key inside a sliding window and blocks the key for a
//! fixed cooldown once a threshold is crossed. State is mirrored into a
//! durable store so throttling survives restarts. This is UX throttling
//! only; server-side enforcement of the same limits remains mandatory.

mod config;
mod ports;
mod service;

pub use config::{RateLimitConfig, scoped_key};
pub use ports::{Clock, RateLimitStore};
pub use service::RateLimitService;
