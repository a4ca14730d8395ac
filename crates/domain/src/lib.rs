//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod rate_limit;

pub use rate_limit::{LimitCheck, RateLimitEntry, RateLimitRegistry, format_time_remaining};
