// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-item executor.
//!
//! Items are processed strictly in order: build, dispatch, record. A failure
//! either becomes an `{error}` record (failure-tolerant mode, item-scoped
//! errors only) or aborts the batch with the records emitted so far left in
//! the caller's sink.

use std::sync::Arc;

use owui_core::{
    Credential, CredentialResolver, DEFAULT_CREDENTIAL_NAME, Feature, InputItem, ModelOption,
    Operation, OwuiError, ParameterResolver, ResultRecord, Transport,
};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::catalog::NodeKind;
use crate::dispatch::dispatch;
use crate::models::list_models;
use crate::request;

/// Host collaborators available to a node execution.
#[derive(Clone)]
pub struct ExecutionContext {
    pub credentials: Arc<dyn CredentialResolver>,
    pub parameters: Arc<dyn ParameterResolver>,
    pub transport: Arc<dyn Transport>,
}

impl ExecutionContext {
    pub fn new(
        credentials: Arc<dyn CredentialResolver>,
        parameters: Arc<dyn ParameterResolver>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            credentials,
            parameters,
            transport,
        }
    }
}

/// Runs one node over a batch of items.
pub struct NodeExecutor {
    node: NodeKind,
    context: ExecutionContext,
    credential_name: String,
    continue_on_fail: bool,
}

impl NodeExecutor {
    pub fn new(node: NodeKind, context: ExecutionContext) -> Self {
        Self {
            node,
            context,
            credential_name: DEFAULT_CREDENTIAL_NAME.to_string(),
            continue_on_fail: false,
        }
    }

    /// Uses the credential registered under `name` instead of `openWebUiApi`.
    pub fn with_credential(mut self, name: impl Into<String>) -> Self {
        self.credential_name = name.into();
        self
    }

    /// Enables failure-tolerant mode.
    pub fn continue_on_fail(mut self, enabled: bool) -> Self {
        self.continue_on_fail = enabled;
        self
    }

    /// Runs the batch and returns one record per item.
    pub async fn run(&self, items: &[InputItem]) -> Result<Vec<ResultRecord>, OwuiError> {
        let mut records = Vec::with_capacity(items.len());
        self.run_into(items, &mut records).await?;
        Ok(records)
    }

    /// Runs the batch, appending records to `records` as items complete.
    ///
    /// On error the records of items that completed before the failure
    /// remain in `records`.
    pub async fn run_into(
        &self,
        items: &[InputItem],
        records: &mut Vec<ResultRecord>,
    ) -> Result<(), OwuiError> {
        if items.is_empty() {
            debug!(node = %self.node, "no input items");
            return Ok(());
        }

        let operation = self
            .node
            .resolve_operation(self.context.parameters.as_ref())?;
        let credential = self
            .context
            .credentials
            .resolve(&self.credential_name)
            .await?;

        info!(
            node = %self.node,
            %operation,
            items = items.len(),
            continue_on_fail = self.continue_on_fail,
            "executing node"
        );

        let mut failed = 0usize;
        for index in 0..items.len() {
            match self.execute_item(operation, &credential, index).await {
                Ok(data) => records.push(ResultRecord::Data(data)),
                Err(e) if self.continue_on_fail && e.is_item_scoped() => {
                    warn!(index, error = %e, "item failed, continuing");
                    failed += 1;
                    records.push(ResultRecord::Error(e.to_string()));
                }
                Err(e) => {
                    warn!(index, error = %e, "item failed, aborting batch");
                    return Err(e);
                }
            }
        }

        info!(
            succeeded = items.len() - failed,
            failed, "node execution complete"
        );
        Ok(())
    }

    async fn execute_item(
        &self,
        operation: Operation,
        credential: &Credential,
        index: usize,
    ) -> Result<Value, OwuiError> {
        let spec = request::build(operation, self.context.parameters.as_ref(), index)?;
        dispatch(self.context.transport.as_ref(), credential, &spec).await
    }

    /// Loads the options for the chat `model` selector.
    pub async fn model_options(&self) -> Result<Vec<ModelOption>, OwuiError> {
        if !self.node.provides_model_options() {
            return Err(OwuiError::UnsupportedOperation {
                feature: Feature::Chat.to_string(),
                operation: "getModels".to_string(),
            });
        }
        let credential = self
            .context
            .credentials
            .resolve(&self.credential_name)
            .await?;
        list_models(self.context.transport.as_ref(), &credential).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use owui_test_utils::{MockReply, MockTransport, StaticCredentials, StaticParameters};
    use serde_json::json;
    use tracing_test::traced_test;

    struct Harness {
        transport: MockTransport,
        credentials: Arc<StaticCredentials>,
    }

    impl Harness {
        fn new(replies: Vec<MockReply>) -> Self {
            Self {
                transport: MockTransport::with_replies(replies),
                credentials: Arc::new(StaticCredentials::single(
                    "http://owui.local",
                    "token-123",
                )),
            }
        }

        fn executor(&self, node: NodeKind, params: StaticParameters) -> NodeExecutor {
            let context = ExecutionContext::new(
                self.credentials.clone(),
                Arc::new(params),
                Arc::new(self.transport.clone()),
            );
            NodeExecutor::new(node, context)
        }
    }

    fn items(n: usize) -> Vec<InputItem> {
        (0..n).map(|i| InputItem(json!({"i": i}))).collect()
    }

    fn query_params() -> StaticParameters {
        StaticParameters::new()
            .with("operation", "query")
            .with_item(0, "query", "a")
            .with_item(1, "query", "b")
            .with_item(2, "query", "c")
    }

    #[tokio::test]
    async fn all_items_succeed_in_order() {
        let harness = Harness::new(vec![
            MockReply::Json(json!({"answer": "A"})),
            MockReply::Json(json!({"answer": "B"})),
            MockReply::Json(json!({"answer": "C"})),
        ]);
        let executor = harness.executor(NodeKind::Rag, query_params());

        let records = executor.run(&items(3)).await.unwrap();
        assert_eq!(
            records,
            vec![
                ResultRecord::Data(json!({"answer": "A"})),
                ResultRecord::Data(json!({"answer": "B"})),
                ResultRecord::Data(json!({"answer": "C"})),
            ]
        );

        let bodies: Vec<Value> = harness
            .transport
            .requests()
            .await
            .into_iter()
            .filter_map(|r| r.body)
            .collect();
        assert_eq!(
            bodies,
            vec![json!({"query": "a"}), json!({"query": "b"}), json!({"query": "c"})]
        );
    }

    #[tokio::test]
    async fn tolerant_mode_records_failure_and_continues() {
        let harness = Harness::new(vec![
            MockReply::Json(json!("A")),
            MockReply::Status(500, "boom".into()),
            MockReply::Json(json!("C")),
        ]);
        let executor = harness
            .executor(NodeKind::Rag, query_params())
            .continue_on_fail(true);

        let records = executor.run(&items(3)).await.unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0], ResultRecord::Data(json!("A")));
        match &records[1] {
            ResultRecord::Error(msg) => assert!(msg.contains("boom"), "got: {msg}"),
            other => panic!("expected error record, got {other:?}"),
        }
        assert_eq!(records[2], ResultRecord::Data(json!("C")));
    }

    #[tokio::test]
    async fn strict_mode_keeps_committed_prefix() {
        let harness = Harness::new(vec![
            MockReply::Json(json!("A")),
            MockReply::Network("connection reset".into()),
            MockReply::Json(json!("C")),
        ]);
        let executor = harness.executor(NodeKind::Rag, query_params());

        let mut records = Vec::new();
        let err = executor
            .run_into(&items(3), &mut records)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(records, vec![ResultRecord::Data(json!("A"))]);
        assert_eq!(harness.transport.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn missing_parameter_is_tolerated_per_item() {
        let harness = Harness::new(vec![]);
        let params = StaticParameters::new()
            .with("operation", "execute")
            .with_item(0, "toolName", "calc")
            .with_item(2, "toolName", "search");
        let executor = harness
            .executor(NodeKind::Tool, params)
            .continue_on_fail(true);

        let records = executor.run(&items(3)).await.unwrap();
        assert!(!records[0].is_error());
        assert_eq!(
            records[1],
            ResultRecord::Error("missing parameter `toolName` for item 1".into())
        );
        assert!(!records[2].is_error());
        assert_eq!(harness.transport.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn unsupported_operation_aborts_even_when_tolerant() {
        let harness = Harness::new(vec![]);
        let params = StaticParameters::new().with("operation", "summarize");
        let executor = harness
            .executor(NodeKind::Chat, params)
            .continue_on_fail(true);

        let mut records = Vec::new();
        let err = executor
            .run_into(&items(2), &mut records)
            .await
            .unwrap_err();
        assert!(matches!(err, OwuiError::UnsupportedOperation { .. }));
        assert!(records.is_empty());
        assert!(harness.transport.requests().await.is_empty());
        assert_eq!(harness.credentials.resolutions(), 0);
    }

    #[tokio::test]
    async fn missing_credential_aborts_even_when_tolerant() {
        let harness = Harness::new(vec![]);
        let executor = harness
            .executor(NodeKind::Tool, StaticParameters::new())
            .with_credential("staging")
            .continue_on_fail(true);

        let err = executor.run(&items(1)).await.unwrap_err();
        assert!(matches!(err, OwuiError::CredentialNotFound { ref name } if name == "staging"));
        assert!(harness.transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn credential_resolved_once_per_batch() {
        let harness = Harness::new(vec![]);
        let executor = harness.executor(NodeKind::Tool, StaticParameters::new());

        executor.run(&items(4)).await.unwrap();
        assert_eq!(harness.credentials.resolutions(), 1);

        let sent = harness.transport.requests().await;
        assert_eq!(sent.len(), 4);
        assert!(
            sent.iter()
                .all(|r| r.header("Authorization") == Some("Bearer token-123")
                    && r.header("Accept") == Some("application/json"))
        );
    }

    #[tokio::test]
    async fn empty_batch_does_nothing() {
        let harness = Harness::new(vec![]);
        let executor = harness.executor(NodeKind::OpenWebUi, StaticParameters::new());

        let records = executor.run(&[]).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(harness.credentials.resolutions(), 0);
        assert!(harness.transport.requests().await.is_empty());
    }

    #[tokio::test]
    async fn send_message_builds_chat_body() {
        let harness = Harness::new(vec![MockReply::Json(json!({"choices": []}))]);
        let params = StaticParameters::new()
            .with("feature", "chat")
            .with("model", "llama3")
            .with("message", "hi there");
        let executor = harness.executor(NodeKind::OpenWebUi, params);

        executor.run(&items(1)).await.unwrap();
        let sent = harness.transport.requests().await;
        assert_eq!(sent[0].url, "http://owui.local/api/chat/completions");
        assert_eq!(
            sent[0].body,
            Some(json!({
                "model": "llama3",
                "messages": [{"role": "user", "content": "hi there"}]
            }))
        );
    }

    #[tokio::test]
    async fn model_options_only_for_chat_nodes() {
        let harness = Harness::new(vec![MockReply::Json(json!({
            "data": [{"id": "m1", "name": "Model One", "capabilities": ["chat"]}]
        }))]);

        let options = harness
            .executor(NodeKind::Chat, StaticParameters::new())
            .model_options()
            .await
            .unwrap();
        assert_eq!(options[0].description, "chat");

        let err = harness
            .executor(NodeKind::Rag, StaticParameters::new())
            .model_options()
            .await
            .unwrap_err();
        assert!(matches!(err, OwuiError::UnsupportedOperation { .. }));
    }

    #[tokio::test]
    #[traced_test]
    async fn tolerated_failure_is_logged() {
        let harness = Harness::new(vec![MockReply::Status(503, "unavailable".into())]);
        let executor = harness
            .executor(NodeKind::Tool, StaticParameters::new())
            .continue_on_fail(true);

        executor.run(&items(1)).await.unwrap();
        assert!(logs_contain("item failed, continuing"));
        assert!(logs_contain("node execution complete"));
    }
}
