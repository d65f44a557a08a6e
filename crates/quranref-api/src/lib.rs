//! HTTP gateway to the QuranRef corpus API.
//!
//! [`ApiClient`] resolves request paths against a configured base URL
//! ([`ApiConfig`]) and returns typed JSON results. Every failure is a
//! structured [`ApiError`]; responses are never partially applied.
//! Requests carry cookies so the auth session survives across calls.

mod client;
mod config;
mod error;

pub use client::ApiClient;
pub use config::{ApiConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ApiError, Result};
