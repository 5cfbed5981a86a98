// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Feature and operation selection.
//!
//! The host hands us strings; they are parsed once per batch into the typed
//! [`Operation`] union so the request builder can match exhaustively.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::OwuiError;

/// Top-level capability group exposed by the remote API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Feature {
    Chat,
    KnowledgeBase,
    Tools,
    Model,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Chat,
        Feature::KnowledgeBase,
        Feature::Tools,
        Feature::Model,
    ];

    /// Operation names accepted for this feature, default first.
    pub fn operations(self) -> &'static [&'static str] {
        match self {
            Feature::Chat => &["sendMessage", "getHistory"],
            Feature::KnowledgeBase => &["addDocument", "query"],
            Feature::Tools => &["list", "execute"],
            Feature::Model => &["list"],
        }
    }

    /// Operation selected when the host supplies none.
    pub fn default_operation(self) -> Operation {
        match self {
            Feature::Chat => Operation::Chat(ChatOperation::SendMessage),
            Feature::KnowledgeBase => Operation::KnowledgeBase(KnowledgeBaseOperation::AddDocument),
            Feature::Tools => Operation::Tools(ToolsOperation::List),
            Feature::Model => Operation::Model(ModelOperation::List),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ChatOperation {
    SendMessage,
    GetHistory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum KnowledgeBaseOperation {
    AddDocument,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ToolsOperation {
    List,
    Execute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum ModelOperation {
    List,
}

/// A validated feature/operation pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Chat(ChatOperation),
    KnowledgeBase(KnowledgeBaseOperation),
    Tools(ToolsOperation),
    Model(ModelOperation),
}

impl Operation {
    /// Parses an operation name within `feature`.
    pub fn parse(feature: Feature, name: &str) -> Result<Self, OwuiError> {
        let op = match feature {
            Feature::Chat => ChatOperation::from_str(name).map(Operation::Chat),
            Feature::KnowledgeBase => {
                KnowledgeBaseOperation::from_str(name).map(Operation::KnowledgeBase)
            }
            Feature::Tools => ToolsOperation::from_str(name).map(Operation::Tools),
            Feature::Model => ModelOperation::from_str(name).map(Operation::Model),
        };
        op.map_err(|_| OwuiError::UnsupportedOperation {
            feature: feature.to_string(),
            operation: name.to_string(),
        })
    }

    /// Parses both the feature and the operation name.
    pub fn parse_pair(feature: &str, operation: &str) -> Result<Self, OwuiError> {
        let feature = Feature::from_str(feature).map_err(|_| OwuiError::UnsupportedOperation {
            feature: feature.to_string(),
            operation: operation.to_string(),
        })?;
        Self::parse(feature, operation)
    }

    pub fn feature(&self) -> Feature {
        match self {
            Operation::Chat(_) => Feature::Chat,
            Operation::KnowledgeBase(_) => Feature::KnowledgeBase,
            Operation::Tools(_) => Feature::Tools,
            Operation::Model(_) => Feature::Model,
        }
    }

    /// The operation name without its feature.
    pub fn name(&self) -> String {
        match self {
            Operation::Chat(op) => op.to_string(),
            Operation::KnowledgeBase(op) => op.to_string(),
            Operation::Tools(op) => op.to_string(),
            Operation::Model(op) => op.to_string(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.feature(), self.name())
    }
}
