// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parameter resolution for hosts that pass items as JSON objects.

use owui_core::{InputItem, ParameterResolver};
use serde_json::{Map, Value};

/// Resolves a parameter from the item's own field, then from node-level defaults.
///
/// A `null` item field counts as absent so that a default still applies.
/// Selectors (such as `feature` and `operation`) are node-level only: item
/// data is never consulted for them.
#[derive(Debug, Clone, Default)]
pub struct JsonItemParameters {
    items: Vec<Value>,
    defaults: Map<String, Value>,
    selectors: Map<String, Value>,
}

impl JsonItemParameters {
    pub fn new(items: &[InputItem]) -> Self {
        Self {
            items: items.iter().map(|item| item.0.clone()).collect(),
            defaults: Map::new(),
            selectors: Map::new(),
        }
    }

    /// Registers `name` as a node-level selector. `None` leaves it unset
    /// while still shielding it from item fields.
    pub fn with_selector(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.selectors
            .insert(name.into(), value.map_or(Value::Null, Value::String));
        self
    }

    /// Sets a node-level value used when an item does not carry `name`.
    pub fn with_default(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.defaults.insert(name.into(), value.into());
        self
    }

    pub fn with_defaults<I, K>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.defaults
            .extend(defaults.into_iter().map(|(k, v)| (k.into(), v)));
        self
    }
}

impl ParameterResolver for JsonItemParameters {
    fn parameter(&self, name: &str, index: usize) -> Option<Value> {
        if let Some(selected) = self.selectors.get(name) {
            return Some(selected.clone()).filter(|value| !value.is_null());
        }
        self.items
            .get(index)
            .and_then(|item| item.get(name))
            .filter(|value| !value.is_null())
            .or_else(|| self.defaults.get(name))
            .cloned()
    }
}
