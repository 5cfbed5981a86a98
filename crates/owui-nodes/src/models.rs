// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model options for the chat `model` selector.

use owui_core::{Credential, ModelOption, OwuiError, RequestSpec, Transport};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::dispatch::dispatch;
use crate::request::MODELS_PATH;

/// Description used when a model reports no capabilities.
pub const NO_CAPABILITIES: &str = "No capability information available";

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<RemoteModel>,
}

#[derive(Debug, Deserialize)]
struct RemoteModel {
    id: String,
    name: String,
    #[serde(default)]
    capabilities: Option<Vec<String>>,
}

impl From<RemoteModel> for ModelOption {
    fn from(model: RemoteModel) -> Self {
        let description = match model.capabilities {
            Some(caps) if !caps.is_empty() => caps.join(", "),
            _ => NO_CAPABILITIES.to_string(),
        };
        ModelOption {
            id: model.id,
            name: model.name,
            description,
        }
    }
}

/// Fetches `GET /api/models` and maps each entry to a selectable option.
pub async fn list_models(
    transport: &dyn Transport,
    credential: &Credential,
) -> Result<Vec<ModelOption>, OwuiError> {
    let value = dispatch(transport, credential, &RequestSpec::get(MODELS_PATH))
        .await
        .inspect_err(|e| warn!(error = %e, "failed to fetch models"))?;

    let response: ModelsResponse = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "unexpected models response");
        OwuiError::Transport {
            message: format!("failed to parse models response: {e}"),
            status: None,
            source: Some(Box::new(e)),
        }
    })?;

    debug!(count = response.data.len(), "fetched models");
    Ok(response.data.into_iter().map(ModelOption::from).collect())
}
