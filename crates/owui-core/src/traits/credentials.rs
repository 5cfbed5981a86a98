// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential store trait.

use async_trait::async_trait;

use crate::error::OwuiError;
use crate::types::Credential;

/// Resolves a named credential into a base URL and bearer token.
#[async_trait]
pub trait CredentialResolver: Send + Sync {
    /// Returns the credential registered under `name`.
    ///
    /// Fails with [`OwuiError::CredentialNotFound`] when nothing is registered.
    async fn resolve(&self, name: &str) -> Result<Credential, OwuiError>;
}
