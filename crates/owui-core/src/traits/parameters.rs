// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Node parameter lookup trait.

/// Supplies parameter values for a given input item.
///
/// Returns `None` when the parameter has no value for that item; the caller
/// decides whether that is an error or selects a default.
pub trait ParameterResolver: Send + Sync {
    /// Looks up `name` for the item at `index`.
    fn parameter(&self, name: &str, index: usize) -> Option<serde_json::Value>;
}
