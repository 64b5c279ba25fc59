//! HTTP seam shared by the place-search and routing clients.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;

use crate::error::TransportError;

/// A JSON POST to a Google Maps Platform endpoint.
#[derive(Debug, Clone)]
pub struct JsonRequest<'a> {
    pub url: &'a str,
    pub api_key: &'a str,
    /// Comma separated response fields (`X-Goog-FieldMask`).
    pub field_mask: &'a str,
    pub body: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns whatever the server answered.
///
/// Non-success statuses are responses, not errors; only a failure to get a
/// response at all is a `TransportError`.
pub trait HttpTransport: Send + Sync {
    fn post_json(&self, request: &JsonRequest<'_>) -> Result<HttpResponse, TransportError>;
}

impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    fn post_json(&self, request: &JsonRequest<'_>) -> Result<HttpResponse, TransportError> {
        (**self).post_json(request)
    }
}

impl<T: HttpTransport + ?Sized> HttpTransport for &T {
    fn post_json(&self, request: &JsonRequest<'_>) -> Result<HttpResponse, TransportError> {
        (**self).post_json(request)
    }
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json(&self, request: &JsonRequest<'_>) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .post(request.url)
            .header("X-Goog-Api-Key", request.api_key)
            .header("X-Goog-FieldMask", request.field_mask)
            .json(&request.body)
            .send()?;

        let status = response.status().as_u16();
        let body = response.text()?;

        Ok(HttpResponse { status, body })
    }
}
