// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! reqwest implementation of the [`Transport`] trait.

use std::time::Duration;

use async_trait::async_trait;
use owui_config::model::HttpConfig;
use owui_core::{HttpMethod, HttpRequest, OwuiError, Transport};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::types::ApiErrorResponse;

/// Default `User-Agent` sent when none is configured.
const DEFAULT_USER_AGENT: &str = concat!("owui/", env!("CARGO_PKG_VERSION"));

/// HTTP transport backed by a pooled `reqwest::Client`.
///
/// One attempt per call: no retry, and the only limits are the client-level
/// timeouts from [`HttpConfig`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Creates a transport with the given client settings.
    pub fn new(config: &HttpConfig) -> Result<Self, OwuiError> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| OwuiError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

fn to_reqwest_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, OwuiError> {
        let url = reqwest::Url::parse(&request.url)
            .map_err(|e| OwuiError::Config(format!("invalid request URL `{}`: {e}", request.url)))?;

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| OwuiError::Transport {
            message: format!("HTTP request failed: {e}"),
            status: None,
            source: Some(Box::new(e)),
        })?;

        let status = response.status();
        debug!(method = %request.method, url = %request.url, status = %status, "response received");

        let body = response.text().await.map_err(|e| OwuiError::Transport {
            message: format!("failed to read response body: {e}"),
            status: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ApiErrorResponse>(&body) {
                Ok(api_err) => format!("OpenWebUI API error ({status}): {}", api_err.message()),
                Err(_) => format!("API returned {status}: {}", truncate_body(&body)),
            };
            return Err(OwuiError::status(status.as_u16(), message));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| OwuiError::Transport {
            message: format!("failed to parse API response: {e}"),
            status: Some(status.as_u16()),
            source: Some(Box::new(e)),
        })
    }
}

/// Longest non-JSON error body quoted in an error message.
const MAX_ERROR_BODY: usize = 512;

fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... [truncated from {} bytes]", &body[..end], body.len())
}
