// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential store backed by the `[credentials.*]` config tables.
//!
//! Resolution order for a name:
//! 1. `[credentials.<name>]` in the loaded config
//! 2. `OWUI_API_URL` + `OWUI_JWT_TOKEN` environment variables, captured at construction
//! 3. [`OwuiError::CredentialNotFound`]

use std::collections::BTreeMap;

use async_trait::async_trait;
use owui_core::{Credential, CredentialResolver, OwuiError};
use tracing::debug;

use crate::model::{CredentialConfig, OwuiConfig};
use crate::validation::check_api_url;

/// Environment variable holding the fallback base URL.
pub const API_URL_ENV: &str = "OWUI_API_URL";

/// Environment variable holding the fallback bearer token.
pub const JWT_TOKEN_ENV: &str = "OWUI_JWT_TOKEN";

/// Resolves credentials from configuration with an environment fallback.
pub struct ConfigCredentialStore {
    credentials: BTreeMap<String, CredentialConfig>,
    fallback: Option<CredentialConfig>,
}

impl ConfigCredentialStore {
    pub fn new(
        credentials: BTreeMap<String, CredentialConfig>,
        fallback: Option<CredentialConfig>,
    ) -> Self {
        Self {
            credentials,
            fallback,
        }
    }

    /// Builds a store from loaded config plus the process environment.
    pub fn from_config(config: &OwuiConfig) -> Self {
        Self::new(config.credentials.clone(), env_fallback())
    }
}

/// Reads the fallback credential from the environment, if both vars are set.
fn env_fallback() -> Option<CredentialConfig> {
    let api_url = std::env::var(API_URL_ENV).ok()?;
    let jwt_token = std::env::var(JWT_TOKEN_ENV).ok()?;
    Some(CredentialConfig { api_url, jwt_token })
}

#[async_trait]
impl CredentialResolver for ConfigCredentialStore {
    async fn resolve(&self, name: &str) -> Result<Credential, OwuiError> {
        let (entry, source) = match self.credentials.get(name) {
            Some(entry) => (entry, "config"),
            None => match &self.fallback {
                Some(entry) => (entry, "environment"),
                None => {
                    return Err(OwuiError::CredentialNotFound {
                        name: name.to_string(),
                    });
                }
            },
        };

        check_api_url(&entry.api_url)
            .map_err(|reason| OwuiError::Config(format!("credential `{name}` api_url {reason}")))?;
        if entry.jwt_token.trim().is_empty() {
            return Err(OwuiError::Config(format!(
                "credential `{name}` has an empty jwt_token"
            )));
        }

        debug!(credential = name, source, "credential resolved");
        Ok(Credential::new(entry.api_url.trim(), entry.jwt_token.clone()))
    }
}
