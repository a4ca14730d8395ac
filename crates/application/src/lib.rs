//! Application services and ports.

#![forbid(unsafe_code)]

mod rate_limit_service;

pub use rate_limit_service::{
    Clock, RateLimitConfig, RateLimitService, RateLimitStore, scoped_key,
};
