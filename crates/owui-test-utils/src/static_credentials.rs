// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed in-memory credential store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use owui_core::{Credential, CredentialResolver, DEFAULT_CREDENTIAL_NAME, OwuiError};

/// Resolves credentials from a fixed map and counts lookups.
#[derive(Clone, Default)]
pub struct StaticCredentials {
    entries: HashMap<String, (String, String)>,
    resolutions: Arc<AtomicUsize>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding only the default `openWebUiApi` credential.
    pub fn single(api_url: &str, jwt_token: &str) -> Self {
        Self::new().with(DEFAULT_CREDENTIAL_NAME, api_url, jwt_token)
    }

    pub fn with(mut self, name: &str, api_url: &str, jwt_token: &str) -> Self {
        self.entries
            .insert(name.to_string(), (api_url.to_string(), jwt_token.to_string()));
        self
    }

    /// Number of successful and failed `resolve` calls.
    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CredentialResolver for StaticCredentials {
    async fn resolve(&self, name: &str) -> Result<Credential, OwuiError> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        self.entries
            .get(name)
            .map(|(url, token)| Credential::new(url.clone(), token.clone()))
            .ok_or_else(|| OwuiError::CredentialNotFound {
                name: name.to_string(),
            })
    }
}
