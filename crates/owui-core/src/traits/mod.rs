// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits injected into the executor.
//!
//! The host owns credential storage, parameter resolution and the HTTP
//! transport. Each is expressed as a `Send + Sync` trait so the executor can
//! hold them as `Arc<dyn ...>` and tests can substitute mocks.

pub mod credentials;
pub mod parameters;
pub mod transport;

pub use credentials::CredentialResolver;
pub use parameters::ParameterResolver;
pub use transport::Transport;
