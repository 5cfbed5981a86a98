// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport trait.

use async_trait::async_trait;

use crate::error::OwuiError;
use crate::types::HttpRequest;

/// Performs a fully-formed HTTP request and returns the parsed JSON body.
///
/// Implementations must fail with [`OwuiError::Transport`] on network errors,
/// non-2xx statuses and malformed JSON bodies. They must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and parses the response body as JSON.
    async fn send(&self, request: HttpRequest) -> Result<serde_json::Value, OwuiError>;
}
