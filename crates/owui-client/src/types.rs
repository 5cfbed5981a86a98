// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for OpenWebUI error bodies.

use serde::Deserialize;
use serde_json::Value;

/// FastAPI-style error body: `{"detail": ...}`.
///
/// `detail` is a string for most errors and a list of validation entries
/// for 422 responses.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: Value,
}

impl ApiErrorResponse {
    /// Human-readable rendering of `detail`.
    pub fn message(&self) -> String {
        match &self.detail {
            Value::String(s) => s.clone(),
            Value::Array(entries) => entries
                .iter()
                .map(|entry| {
                    entry
                        .get("msg")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                        .unwrap_or_else(|| entry.to_string())
                })
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
