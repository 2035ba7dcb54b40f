//! Browser HTTP Transport
//!
//! `HttpTransport` over `gloo-net` fetch.

use async_trait::async_trait;
use gloo_net::http::Request;

use atencion_core::{ApiError, ApiResult, HttpRequest, HttpResponse, HttpTransport};

/// Stateless fetch-based transport
#[derive(Clone, Copy, Default)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn post_json(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = Request::post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .json(&request.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Serialization error: {}", e)))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Body error: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
