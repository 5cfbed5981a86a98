// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the OpenWebUI node adapters.
//!
//! This crate provides the error type, the request/response types and the
//! collaborator traits (credential store, parameter lookup, HTTP transport)
//! that the executor depends on. Hosts implement the traits; the node crate
//! consumes them.

pub mod error;
pub mod operation;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OwuiError;
pub use operation::{
    ChatOperation, Feature, KnowledgeBaseOperation, ModelOperation, Operation, ToolsOperation,
};
pub use types::{
    Credential, DEFAULT_CREDENTIAL_NAME, HttpMethod, HttpRequest, InputItem, ModelOption,
    RequestSpec, ResultRecord,
};

pub use traits::{CredentialResolver, ParameterResolver, Transport};
