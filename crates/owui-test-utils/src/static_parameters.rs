// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory parameter resolver.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use owui_core::ParameterResolver;

/// Node-level parameters plus optional per-item overrides.
///
/// Every lookup is logged as `(name, index)` so tests can assert which
/// parameters were read for which item.
#[derive(Clone, Default)]
pub struct StaticParameters {
    shared: HashMap<String, Value>,
    per_item: HashMap<(String, usize), Value>,
    lookups: Arc<Mutex<Vec<(String, usize)>>>,
}

impl StaticParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value returned for every item.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.shared.insert(name.to_string(), value.into());
        self
    }

    /// Sets a value for a single item, overriding the shared one.
    pub fn with_item(mut self, index: usize, name: &str, value: impl Into<Value>) -> Self {
        self.per_item
            .insert((name.to_string(), index), value.into());
        self
    }

    /// Lookups performed so far.
    pub fn lookups(&self) -> Vec<(String, usize)> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

impl ParameterResolver for StaticParameters {
    fn parameter(&self, name: &str, index: usize) -> Option<Value> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push((name.to_string(), index));
        }
        self.per_item
            .get(&(name.to_string(), index))
            .or_else(|| self.shared.get(name))
            .cloned()
    }
}
