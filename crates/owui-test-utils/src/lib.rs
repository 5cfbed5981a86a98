// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for the OpenWebUI node adapters.
//!
//! Provides in-memory stand-ins for the host collaborators so executor tests
//! run without a network or a real credential store.
//!
//! # Components
//!
//! - [`MockTransport`] - scripted HTTP replies with request capture
//! - [`StaticCredentials`] - fixed credential map with a resolution counter
//! - [`StaticParameters`] - node-level and per-item parameter values

pub mod mock_transport;
pub mod static_credentials;
pub mod static_parameters;

pub use mock_transport::{MockReply, MockTransport};
pub use static_credentials::StaticCredentials;
pub use static_parameters::StaticParameters;
