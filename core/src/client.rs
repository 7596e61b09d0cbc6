//! Stateless HTTP request builder and response parser for the backend API.
//!
//! # Design
//! `ApiClient` holds only a validated `BaseUrl` and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Whoever executes the round-trip (an `AsyncApiClient`
//! transport or a host across the C ABI) sits between the two.

use serde::Serialize;

use crate::config::{BaseUrl, ClientConfig};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{GetResponse, PostOutcome};

/// Synchronous, stateless client for the backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: BaseUrl,
}

impl ApiClient {
    pub fn new(base: BaseUrl) -> Self {
        Self { base }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::new(config.base()?))
    }

    pub fn base(&self) -> &BaseUrl {
        &self.base
    }

    /// POST `payload` as JSON to `base + endpoint`.
    pub fn build_post_json<T>(&self, endpoint: &str, payload: &T) -> Result<HttpRequest, ApiError>
    where
        T: Serialize + ?Sized,
    {
        check_endpoint(endpoint)?;
        let body = serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.base.join(endpoint),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// GET `base + endpoint + suffix`.
    pub fn build_get(&self, endpoint: &str, suffix: &str) -> Result<HttpRequest, ApiError> {
        check_endpoint(endpoint)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}{suffix}", self.base.join(endpoint)),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn parse_post(&self, response: HttpResponse) -> Result<PostOutcome, ApiError> {
        check_status(&response)?;
        Ok(PostOutcome {
            status: response.status,
        })
    }

    /// Re-encode a JSON body as compact text, or hand back the whole
    /// response when there is no body.
    ///
    /// "No body" means zero bytes. A body holding the JSON literal `null` is
    /// still a body and comes back as `Body("null")`.
    pub fn parse_get(&self, response: HttpResponse) -> Result<GetResponse, ApiError> {
        check_status(&response)?;
        let Some(text) = response.body_text() else {
            return Ok(GetResponse::Empty(response));
        };
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| ApiError::Deserialization(e.to_string()))?;
        Ok(GetResponse::Body(value.to_string()))
    }
}

fn check_endpoint(endpoint: &str) -> Result<(), ApiError> {
    if endpoint.is_empty() {
        return Err(ApiError::EmptyEndpoint);
    }
    Ok(())
}

/// Map non-2xx status codes to `ApiError::Http`.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        body: response.body.clone().unwrap_or_default(),
    })
}
