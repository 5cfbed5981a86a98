// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP transport for the OpenWebUI node adapters.
//!
//! [`HttpTransport`] implements [`owui_core::Transport`] on top of a pooled
//! `reqwest` client. It performs exactly one attempt per call.

pub mod transport;
pub mod types;

pub use transport::HttpTransport;
