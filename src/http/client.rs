//! Request client: the single chokepoint for backend calls.
//!
//! # Responsibilities
//! - Attach JSON, gateway API key and bearer headers
//! - Execute the call against the resolved backend target
//! - Decode the response through `envelope::decode_response`
//! - Never fail past `request`: every outcome is an `Envelope`
//!
//! # Design Decisions
//! - No shared mutable state; the client is a cheap clone
//! - No retries and no default timeout (transport default unless configured)
//! - Each call gets a UUID request id on its tracing span

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{HeaderValue, ACCEPT, CONTENT_TYPE};
use serde_json::Value;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::schema::ClientConfig;
use crate::config::validation::ValidationError;
use crate::http::envelope::{decode_response, Envelope, RequestError};
use crate::http::request::{Query, RequestOptions};
use crate::observability::metrics;
use crate::routing::BackendTarget;

const APIKEY_HEADER: &str = "apikey";
const JSON_MIME: &str = "application/json";

/// Errors building a `RequestClient`.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Invalid backend target: {0}")]
    Target(#[from] ValidationError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP client bound to one backend target.
#[derive(Clone)]
pub struct RequestClient {
    http: reqwest::Client,
    target: Arc<BackendTarget>,
}

impl RequestClient {
    /// Build a client from configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, BuildError> {
        let target = BackendTarget::resolve(&config.backend)?;

        let mut builder = reqwest::Client::builder().user_agent(config.http.user_agent.clone());
        if let Some(secs) = config.http.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        tracing::info!(
            target_kind = target.name(),
            base_url = %target.base_url(),
            "Request client initialized"
        );

        Ok(Self::with_http_client(target, builder.build()?))
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_http_client(target: BackendTarget, http: reqwest::Client) -> Self {
        Self {
            http,
            target: Arc::new(target),
        }
    }

    pub fn target(&self) -> &BackendTarget {
        &self.target
    }

    /// Perform a request. Always resolves; failures are `success: false`.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> Envelope<Value> {
        self.execute(endpoint, &options).await.into()
    }

    /// GET a logical endpoint, returning the unwrapped payload.
    pub async fn fetch(&self, endpoint: &str, query: &Query) -> Result<Value, RequestError> {
        self.execute(endpoint, &RequestOptions::get().with_query(query.clone()))
            .await
    }

    /// Execute a call and decode its response.
    pub async fn execute(
        &self,
        endpoint: &str,
        options: &RequestOptions,
    ) -> Result<Value, RequestError> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!(
            "request",
            %request_id,
            method = %options.method,
            endpoint,
        );

        async {
            let started = Instant::now();
            let result = self.send(endpoint, options).await;
            let elapsed = started.elapsed();

            match &result {
                Ok(_) => {
                    tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "Request succeeded");
                    metrics::record_request(endpoint, "success", elapsed);
                }
                Err(e) => {
                    tracing::warn!(error = %e, kind = e.kind(), "Request failed");
                    metrics::record_request(endpoint, e.kind(), elapsed);
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn send(&self, endpoint: &str, options: &RequestOptions) -> Result<Value, RequestError> {
        let url = self.target.url_for(endpoint);

        let mut builder = self
            .http
            .request(options.method.clone(), &url)
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON_MIME))
            .header(ACCEPT, HeaderValue::from_static(JSON_MIME));

        if !options.query.is_empty() {
            builder = builder.query(&options.query.pairs().collect::<Vec<_>>());
        }
        if let Some(key) = self.target.api_key() {
            builder = builder.header(APIKEY_HEADER, key);
        }
        if let Some(token) = &options.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        tracing::trace!(status, content_type = ?content_type, bytes = body.len(), "Response received");
        decode_response(status, content_type.as_deref(), &body)
    }
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("target", &self.target)
            .finish()
    }
}
