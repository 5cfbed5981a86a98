// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Applies the credential and standard headers to a [`RequestSpec`] and sends it.

use owui_core::{Credential, HttpRequest, OwuiError, RequestSpec, Transport};
use serde_json::Value;
use tracing::debug;

/// Sends `spec` to the credential's instance and returns the parsed JSON body.
///
/// Every request carries `Accept: application/json` and
/// `Authorization: Bearer <token>`, whatever the operation.
pub async fn dispatch(
    transport: &dyn Transport,
    credential: &Credential,
    spec: &RequestSpec,
) -> Result<Value, OwuiError> {
    let request = HttpRequest {
        method: spec.method,
        url: credential.endpoint(spec.path),
        headers: vec![
            ("Accept".to_string(), "application/json".to_string()),
            ("Authorization".to_string(), credential.bearer()),
        ],
        body: spec.body.clone(),
    };

    debug!(method = %spec.method, path = spec.path, "dispatching request");
    transport.send(request).await
}
