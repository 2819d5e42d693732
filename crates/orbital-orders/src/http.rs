//! HTTP backend abstraction for the orders API.
//!
//! This module provides a trait-based HTTP backend that allows for
//! dependency injection and easy testing. The production implementation
//! uses reqwest; transport-level retries are left to the caller.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::models::OrdersConfig;
use crate::url::redacted;

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// A download response whose body has not been read yet.
pub struct StreamingResponse {
    /// Raw `Content-Disposition` header, if sent
    pub content_disposition: Option<String>,
    /// Declared body length, if sent
    pub content_length: Option<u64>,
    /// Body chunks in arrival order
    pub body: BoxStream<'static, ClientResult<Bytes>>,
}

/// Trait for HTTP backends used by the orders client.
///
/// This abstraction allows for dependency injection of HTTP clients,
/// making it easy to test code that depends on HTTP requests.
///
/// This is an implementation detail - external code should use the
/// `OrdersClientPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Send a JSON request and deserialize the JSON response.
    ///
    /// Non-success statuses become `ClientError::ApiRequestFailed` carrying
    /// the response body. An empty success body deserializes from `null`.
    async fn request_json<T: DeserializeOwned + Send>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Value>,
    ) -> ClientResult<T>;

    /// Start a download and hand back the body as a stream.
    async fn open_stream(&self, url: &Url) -> ClientResult<StreamingResponse>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
///
/// API requests carry the API key as the basic auth user name and are bound
/// by the configured timeout. Result locations are pre-signed, so downloads
/// carry no credentials and only the connect timeout applies to them.
pub struct ReqwestBackend {
    client: reqwest::Client,
    timeout: Duration,
    api_key: Option<String>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &OrdersConfig) -> ClientResult<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            timeout: config.timeout,
            api_key: config.api_key.clone(),
        })
    }

    /// Build an API request with optional authentication.
    fn build_request(&self, method: Method, url: &Url) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .request(method, url.as_str())
            .timeout(self.timeout);
        if let Some(ref key) = self.api_key {
            request = request.basic_auth(key, None::<&str>);
        }
        request
    }
}

/// Turn a non-success response into `ApiRequestFailed`, keeping its body.
async fn check_status(response: Response, url: &Url) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::ApiRequestFailed {
        status: status.as_u16(),
        url: redacted(url),
        body,
    })
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn request_json<T: DeserializeOwned + Send>(
        &self,
        method: Method,
        url: &Url,
        body: Option<&Value>,
    ) -> ClientResult<T> {
        let mut request = self.build_request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = check_status(request.send().await?, url).await?;
        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn open_stream(&self, url: &Url) -> ClientResult<StreamingResponse> {
        let response = self.client.get(url.as_str()).send().await?;
        let response = check_status(response, url).await?;

        let content_disposition = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|h| h.to_str().ok())
            .map(String::from);
        let content_length = response.content_length();

        Ok(StreamingResponse {
            content_disposition,
            content_length,
            body: response.bytes_stream().map_err(ClientError::from).boxed(),
        })
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================
