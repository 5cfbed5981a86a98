// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the request builder, dispatcher and executor.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// Name of the credential type every node authenticates with.
pub const DEFAULT_CREDENTIAL_NAME: &str = "openWebUiApi";

/// Base URL and bearer token for a remote OpenWebUI instance.
///
/// Resolved once per batch and never mutated afterwards. The token is kept
/// behind [`SecretString`] so it does not leak through `Debug`.
#[derive(Debug)]
pub struct Credential {
    api_url: String,
    jwt_token: SecretString,
}

impl Credential {
    pub fn new(api_url: impl Into<String>, jwt_token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            jwt_token: SecretString::from(jwt_token.into()),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn jwt_token(&self) -> &SecretString {
        &self.jwt_token
    }

    /// Joins the base URL and an absolute API path.
    ///
    /// Trailing slashes on the base URL are dropped so that
    /// `https://host/` and `https://host` produce the same endpoint.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url.trim_end_matches('/'), path)
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.jwt_token.expose_secret())
    }
}

/// HTTP methods used by the remote API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

/// Target of a single API call, before the credential is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: &'static str,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn get(path: &'static str) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            body: None,
        }
    }

    pub fn post(path: &'static str, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            path,
            body: Some(body),
        }
    }
}

/// A fully-formed HTTP request handed to a [`Transport`](crate::traits::Transport).
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// One opaque input item supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputItem(pub Value);

impl From<Value> for InputItem {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Per-item output: the response payload, or the error text when the
/// executor tolerated a failure.
///
/// Serializes as `{"data": ...}` or `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultRecord {
    Data(Value),
    Error(String),
}

impl ResultRecord {
    pub fn is_error(&self) -> bool {
        matches!(self, ResultRecord::Error(_))
    }

    pub fn data(&self) -> Option<&Value> {
        match self {
            ResultRecord::Data(value) => Some(value),
            ResultRecord::Error(_) => None,
        }
    }
}

/// Entry in the model selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    pub id: String,
    pub name: String,
    pub description: String,
}
