// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the OpenWebUI node adapters.

use thiserror::Error;

/// The error type shared by every adapter crate in the workspace.
///
/// Variants fall into two scopes. Batch-scoped errors (configuration,
/// unknown credentials, unsupported operations) describe a setup problem and
/// always abort an execution. Item-scoped errors (transport and parameter
/// failures) belong to a single input item and may be recorded inline when
/// the executor runs in failure-tolerant mode. See [`OwuiError::is_item_scoped`].
#[derive(Debug, Error)]
pub enum OwuiError {
    /// Invalid or unusable configuration (bad URL, missing transport setup).
    #[error("configuration error: {0}")]
    Config(String),

    /// The named credential could not be resolved.
    #[error("credential `{name}` is not configured")]
    CredentialNotFound { name: String },

    /// The feature/operation pair is not one the node knows how to build.
    #[error("unsupported operation `{operation}` for feature `{feature}`")]
    UnsupportedOperation { feature: String, operation: String },

    /// Network failure, non-2xx status, or an unparsable response body.
    #[error("transport error: {message}")]
    Transport {
        message: String,
        status: Option<u16>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A parameter required by the operation has no value for this item.
    #[error("missing parameter `{name}` for item {index}")]
    MissingParameter { name: String, index: usize },

    /// A parameter resolved to a value of the wrong shape.
    #[error("invalid parameter `{name}` for item {index}: {detail}")]
    InvalidParameter {
        name: String,
        index: usize,
        detail: String,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OwuiError {
    /// Builds a transport error without an HTTP status or source.
    pub fn transport(message: impl Into<String>) -> Self {
        OwuiError::Transport {
            message: message.into(),
            status: None,
            source: None,
        }
    }

    /// Builds a transport error for a non-2xx HTTP response.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        OwuiError::Transport {
            message: message.into(),
            status: Some(status),
            source: None,
        }
    }

    /// Returns true when the error belongs to a single item rather than the batch.
    pub fn is_item_scoped(&self) -> bool {
        matches!(
            self,
            OwuiError::Transport { .. }
                | OwuiError::MissingParameter { .. }
                | OwuiError::InvalidParameter { .. }
        )
    }

    /// HTTP status carried by a transport error, if the server answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            OwuiError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}
