//! HTTP transport module
//!
//! The transport every service dispatcher sends through.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Path Encoding**: Path parameters such as ARNs are sent as single encoded segments

mod client;
mod rate_limit;
mod request;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use request::HttpRequest;

#[cfg(test)]
mod tests;
