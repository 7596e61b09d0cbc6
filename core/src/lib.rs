//! JSON API client core for the mobile backend.
//!
//! # Overview
//! Posts JSON documents to, and fetches resources from, a single backend
//! whose base address is supplied as configuration.
//!
//! # Design
//! - `ApiClient` is stateless and does no I/O: `build_*` produces an
//!   `HttpRequest`, `parse_*` consumes an `HttpResponse`. The C ABI in the
//!   `netlib-ffi` crate exposes exactly this layer.
//! - `AsyncApiClient` drives a `Transport` between the two halves and logs
//!   one line per completed call through `tracing`.
//! - Every outcome is a `Result`; success and failure never share a shape.

pub mod async_client;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use async_client::AsyncApiClient;
pub use client::ApiClient;
pub use config::{BaseUrl, ClientConfig};
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::Transport;
pub use types::{GetResponse, PostOutcome};
