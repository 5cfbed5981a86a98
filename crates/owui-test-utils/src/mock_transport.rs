// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock HTTP transport for deterministic testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use owui_core::{HttpRequest, OwuiError, Transport};

/// A scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// 2xx with this JSON body.
    Json(Value),
    /// Non-2xx status with a message.
    Status(u16, String),
    /// Connection-level failure.
    Network(String),
}

impl MockReply {
    fn into_result(self) -> Result<Value, OwuiError> {
        match self {
            MockReply::Json(value) => Ok(value),
            MockReply::Status(status, message) => Err(OwuiError::status(
                status,
                format!("API returned {status}: {message}"),
            )),
            MockReply::Network(message) => Err(OwuiError::transport(message)),
        }
    }
}

/// A transport that pops replies from a FIFO queue and records every request.
///
/// When the queue is empty, `{"mock": true}` is returned.
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            requests: Arc::default(),
        }
    }

    /// Requests sent so far, in order.
    pub async fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<Value, OwuiError> {
        self.requests.lock().await.push(request);
        let reply = self
            .replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| MockReply::Json(serde_json::json!({"mock": true})));
        reply.into_result()
    }
}
