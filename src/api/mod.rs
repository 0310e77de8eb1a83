//! Upstream API layer.
//!
//! This module provides:
//! - HTTP request/response value types ([`HttpRequest`], [`HttpResponse`])
//! - An HTTP client abstraction ([`HttpClient`]) and its reqwest implementation ([`ReqwestClient`])
//! - The address list endpoint client ([`AddressApi`])

mod client;
mod error;
mod fetch;
mod http;

#[cfg(test)]
mod http_tests;

pub use client::ReqwestClient;
pub use error::{ApiError, HttpError};
pub use fetch::{API_KEY_HEADER, AddressApi, ApiKey, Endpoint};
pub use http::{HttpClient, HttpRequest, HttpResponse};
