// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use std::collections::BTreeMap;
use std::fmt;

use owui_core::DEFAULT_CREDENTIAL_NAME;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OwuiConfig {
    /// Process-wide settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Executor defaults.
    #[serde(default)]
    pub execution: ExecutionConfig,

    /// Named credentials, keyed by credential name.
    #[serde(default)]
    pub credentials: BTreeMap<String, CredentialConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// HTTP client configuration.
///
/// The transport never retries; these are the only limits applied to a call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Total per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// TCP/TLS connect timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Overrides the `User-Agent` header. Defaults to `owui/<version>`.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Executor defaults applied when the host does not override them.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExecutionConfig {
    /// Credential name nodes authenticate with.
    #[serde(default = "default_credential")]
    pub credential: String,

    /// Record per-item failures instead of aborting the batch.
    #[serde(default)]
    pub continue_on_fail: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            credential: default_credential(),
            continue_on_fail: false,
        }
    }
}

fn default_credential() -> String {
    DEFAULT_CREDENTIAL_NAME.to_string()
}

/// A stored OpenWebUI credential.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialConfig {
    /// Base URL of the OpenWebUI instance.
    pub api_url: String,

    /// JWT or API key sent as the bearer token.
    pub jwt_token: String,
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("api_url", &self.api_url)
            .field("jwt_token", &"[REDACTED]")
            .finish()
    }
}
