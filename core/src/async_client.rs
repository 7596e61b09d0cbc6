//! Asynchronous client that drives a `Transport`.
//!
//! # Design
//! `AsyncApiClient` pairs the sans-IO `ApiClient` with a shared transport.
//! Every call is one build / execute / parse pass and ends with exactly one
//! log line carrying either the HTTP status or the error. Outcomes are
//! returned as `Result`s; nothing is swallowed.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest};
use crate::transport::Transport;
use crate::types::{GetResponse, PostOutcome};

pub struct AsyncApiClient<T: Transport + ?Sized> {
    api: ApiClient,
    transport: Arc<T>,
}

impl<T: Transport + ?Sized> Clone for AsyncApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

#[cfg(feature = "reqwest")]
impl AsyncApiClient<crate::transport::ReqwestTransport> {
    /// Client over `reqwest`, honouring the configured timeout.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let api = ApiClient::from_config(config)?;
        let transport = crate::transport::ReqwestTransport::with_timeout(config.timeout())?;
        Ok(Self::new(api, transport))
    }
}

impl<T: Transport> AsyncApiClient<T> {
    pub fn new(api: ApiClient, transport: T) -> Self {
        Self::from_shared(api, Arc::new(transport))
    }

    pub fn with_config(config: &ClientConfig, transport: T) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::from_config(config)?, transport))
    }
}

impl<T: Transport + ?Sized> AsyncApiClient<T> {
    pub fn from_shared(api: ApiClient, transport: Arc<T>) -> Self {
        Self { api, transport }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// POST `payload` as JSON to `base + endpoint` and report the status.
    pub async fn post_json<P>(&self, endpoint: &str, payload: &P) -> Result<PostOutcome, ApiError>
    where
        P: Serialize + ?Sized,
    {
        match self.api.build_post_json(endpoint, payload) {
            Ok(request) => self.send_post(request).await,
            Err(err) => {
                log_rejected(HttpMethod::Post, endpoint, &err);
                Err(err)
            }
        }
    }

    /// GET `base + endpoint + suffix`.
    pub async fn get(&self, endpoint: &str, suffix: &str) -> Result<GetResponse, ApiError> {
        let request = match self.api.build_get(endpoint, suffix) {
            Ok(request) => request,
            Err(err) => {
                log_rejected(HttpMethod::Get, endpoint, &err);
                return Err(err);
            }
        };
        let url = request.url.clone();
        let result = match self.transport.execute(request).await {
            Ok(response) => {
                let status = response.status;
                self.api.parse_get(response).map(|body| (status, body))
            }
            Err(err) => Err(err.into()),
        };

        match result {
            Ok((status, body)) => {
                debug!(method = "GET", %url, status, "Response {status}");
                Ok(body)
            }
            Err(err) => {
                warn!(method = "GET", %url, status = err.status(), error = %err, "Error {err}");
                Err(err)
            }
        }
    }

    /// GET and decode the body into `R`.
    pub async fn get_json<R>(&self, endpoint: &str, suffix: &str) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        match self.get(endpoint, suffix).await? {
            GetResponse::Body(body) => {
                serde_json::from_str(&body).map_err(|e| ApiError::Deserialization(e.to_string()))
            }
            GetResponse::Empty(response) => Err(ApiError::Deserialization(format!(
                "HTTP {} response has no body",
                response.status
            ))),
        }
    }

    async fn send_post(&self, request: HttpRequest) -> Result<PostOutcome, ApiError> {
        let url = request.url.clone();
        let result = match self.transport.execute(request).await {
            Ok(response) => self.api.parse_post(response),
            Err(err) => Err(err.into()),
        };

        match &result {
            Ok(outcome) => {
                info!(method = "POST", %url, status = outcome.status, "Response {}", outcome.status)
            }
            Err(err) => warn!(method = "POST", %url, status = err.status(), error = %err, "Error {err}"),
        }
        result
    }
}

impl<T: Transport + ?Sized + 'static> AsyncApiClient<T> {
    /// Start a POST without waiting for it.
    ///
    /// The exchange runs as a tokio task and logs its outcome like
    /// `post_json`. The handle may be dropped. Must be called from within a
    /// tokio runtime.
    pub fn spawn_post_json<P>(&self, endpoint: &str, payload: &P) -> JoinHandle<Result<PostOutcome, ApiError>>
    where
        P: Serialize + ?Sized,
    {
        let client = self.clone();
        let request = self.api.build_post_json(endpoint, payload);
        let endpoint = endpoint.to_string();
        tokio::spawn(async move {
            match request {
                Ok(request) => client.send_post(request).await,
                Err(err) => {
                    log_rejected(HttpMethod::Post, &endpoint, &err);
                    Err(err)
                }
            }
        })
    }
}

fn log_rejected(method: HttpMethod, endpoint: &str, err: &ApiError) {
    warn!(method = method.as_str(), endpoint, error = %err, "Error {err}");
}
