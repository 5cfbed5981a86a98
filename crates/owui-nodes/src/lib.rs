// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenWebUI workflow nodes.
//!
//! A node turns a batch of host input items into one [`ResultRecord`] per
//! item by building a request for the selected feature/operation, sending it
//! through the host's transport with the resolved credential, and collecting
//! the response or, in failure-tolerant mode, the error text.
//!
//! [`ResultRecord`]: owui_core::ResultRecord

pub mod catalog;
pub mod dispatch;
pub mod executor;
pub mod models;
pub mod params;
pub mod request;

pub use catalog::{NodeKind, NodeManifest, builtin_catalog, search_catalog};
pub use dispatch::dispatch;
pub use executor::{ExecutionContext, NodeExecutor};
pub use models::{NO_CAPABILITIES, list_models};
pub use params::JsonItemParameters;
pub use request::build;
