// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in node catalog.
//!
//! Four nodes share the `openWebUiApi` credential type. The combined node
//! selects its feature through the `feature` parameter; the others are
//! pinned to one feature.

use std::str::FromStr;

use owui_core::{DEFAULT_CREDENTIAL_NAME, Feature, Operation, OwuiError, ParameterResolver};
use serde::Serialize;
use serde_json::Value;
use strum::{Display, EnumString};

/// A host-facing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum NodeKind {
    #[strum(serialize = "openWebUi")]
    OpenWebUi,
    #[strum(serialize = "openWebUiChat")]
    Chat,
    #[strum(serialize = "openWebUiRag")]
    Rag,
    #[strum(serialize = "openWebUiTool")]
    Tool,
}

impl NodeKind {
    pub const ALL: [NodeKind; 4] = [
        NodeKind::OpenWebUi,
        NodeKind::Chat,
        NodeKind::Rag,
        NodeKind::Tool,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::OpenWebUi => "OpenWebUI",
            NodeKind::Chat => "OpenWebUI Chat",
            NodeKind::Rag => "OpenWebUI RAG",
            NodeKind::Tool => "OpenWebUI Tool",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            NodeKind::OpenWebUi => "Consume OpenWebUI API",
            NodeKind::Chat => "Use OpenWebUI Chat API",
            NodeKind::Rag => "Use OpenWebUI Knowledge Base/RAG API",
            NodeKind::Tool => "Use OpenWebUI Tools API",
        }
    }

    /// Features this node exposes.
    pub fn features(self) -> &'static [Feature] {
        match self {
            NodeKind::OpenWebUi => &Feature::ALL,
            NodeKind::Chat => &[Feature::Chat],
            NodeKind::Rag => &[Feature::KnowledgeBase],
            NodeKind::Tool => &[Feature::Tools],
        }
    }

    /// Whether the node offers the model options loader.
    pub fn provides_model_options(self) -> bool {
        self.features().contains(&Feature::Chat)
    }

    /// Resolves the batch operation from the parameters of the first item.
    ///
    /// `feature` defaults to the node's first feature and must be one the
    /// node exposes; `operation` falls back to the feature's default.
    pub fn resolve_operation(
        self,
        params: &dyn ParameterResolver,
    ) -> Result<Operation, OwuiError> {
        let requested_operation = selector(params, "operation")?;
        let unsupported = |feature: String| OwuiError::UnsupportedOperation {
            feature,
            operation: requested_operation.clone().unwrap_or_default(),
        };

        let feature = match selector(params, "feature")? {
            Some(name) => match Feature::from_str(&name) {
                Ok(feature) if self.features().contains(&feature) => feature,
                _ => return Err(unsupported(name)),
            },
            None => self.features()[0],
        };

        match &requested_operation {
            Some(name) => Operation::parse(feature, name),
            None => Ok(feature.default_operation()),
        }
    }

    pub fn manifest(self) -> NodeManifest {
        NodeManifest {
            name: self.to_string(),
            display_name: self.display_name().to_string(),
            description: self.description().to_string(),
            version: 1,
            credential: DEFAULT_CREDENTIAL_NAME.to_string(),
            features: self.features().to_vec(),
        }
    }
}

/// Selector parameters are read from item 0 and must be strings.
fn selector(params: &dyn ParameterResolver, name: &str) -> Result<Option<String>, OwuiError> {
    match params.parameter(name, 0) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(OwuiError::Config(format!(
            "parameter `{name}` must be a string, got {other}"
        ))),
    }
}

/// Describes a node for listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeManifest {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub version: u32,
    pub credential: String,
    pub features: Vec<Feature>,
}

/// Returns manifests for all built-in nodes.
pub fn builtin_catalog() -> Vec<NodeManifest> {
    NodeKind::ALL.iter().map(|kind| kind.manifest()).collect()
}

/// Search the built-in catalog by query string.
///
/// Filters entries whose name, display name or description contains the
/// query (case-insensitive). If query is empty, returns all entries.
pub fn search_catalog(query: &str) -> Vec<NodeManifest> {
    if query.is_empty() {
        return builtin_catalog();
    }
    let query_lower = query.to_lowercase();
    builtin_catalog()
        .into_iter()
        .filter(|m| {
            m.name.to_lowercase().contains(&query_lower)
                || m.display_name.to_lowercase().contains(&query_lower)
                || m.description.to_lowercase().contains(&query_lower)
        })
        .collect()
}
