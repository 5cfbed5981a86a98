// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request builder: maps an operation and its item parameters to a [`RequestSpec`].

use owui_core::{
    ChatOperation, KnowledgeBaseOperation, ModelOperation, Operation, OwuiError,
    ParameterResolver, RequestSpec, ToolsOperation,
};
use serde_json::{Value, json};

pub const CHAT_COMPLETIONS_PATH: &str = "/api/chat/completions";
pub const CHAT_HISTORY_PATH: &str = "/api/chat/history";
pub const KB_ADD_PATH: &str = "/api/kb/add";
pub const KB_QUERY_PATH: &str = "/api/kb/query";
pub const TOOLS_LIST_PATH: &str = "/api/tools/list";
pub const TOOLS_EXECUTE_PATH: &str = "/api/tools/execute";
pub const MODELS_PATH: &str = "/api/models";

/// Builds the request for `operation` using the parameters of item `index`.
///
/// Performs no I/O. Fails with a parameter error when a value the operation
/// needs is missing or not a scalar.
pub fn build(
    operation: Operation,
    params: &dyn ParameterResolver,
    index: usize,
) -> Result<RequestSpec, OwuiError> {
    let spec = match operation {
        Operation::Chat(ChatOperation::SendMessage) => {
            let message = string_parameter(params, "message", index)?;
            let model = string_parameter(params, "model", index)?;
            RequestSpec::post(
                CHAT_COMPLETIONS_PATH,
                json!({
                    "model": model,
                    "messages": [{"role": "user", "content": message}],
                }),
            )
        }
        Operation::Chat(ChatOperation::GetHistory) => RequestSpec::get(CHAT_HISTORY_PATH),
        Operation::KnowledgeBase(KnowledgeBaseOperation::AddDocument) => {
            let document = string_parameter(params, "document", index)?;
            RequestSpec::post(KB_ADD_PATH, json!({"content": document}))
        }
        Operation::KnowledgeBase(KnowledgeBaseOperation::Query) => {
            let query = string_parameter(params, "query", index)?;
            RequestSpec::post(KB_QUERY_PATH, json!({"query": query}))
        }
        Operation::Tools(ToolsOperation::List) => RequestSpec::get(TOOLS_LIST_PATH),
        Operation::Tools(ToolsOperation::Execute) => {
            let tool = string_parameter(params, "toolName", index)?;
            RequestSpec::post(TOOLS_EXECUTE_PATH, json!({"tool": tool}))
        }
        Operation::Model(ModelOperation::List) => RequestSpec::get(MODELS_PATH),
    };
    Ok(spec)
}

/// Reads a parameter as text.
///
/// Strings are used verbatim, numbers and booleans by their JSON text.
pub fn string_parameter(
    params: &dyn ParameterResolver,
    name: &str,
    index: usize,
) -> Result<String, OwuiError> {
    match params.parameter(name, index) {
        None | Some(Value::Null) => Err(OwuiError::MissingParameter {
            name: name.to_string(),
            index,
        }),
        Some(Value::String(s)) => Ok(s),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(v.to_string()),
        Some(other) => Err(OwuiError::InvalidParameter {
            name: name.to_string(),
            index,
            detail: format!("expected a string, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use owui_core::{Feature, HttpMethod};
    use owui_test_utils::StaticParameters;

    fn op(feature: &str, operation: &str) -> Operation {
        Operation::parse_pair(feature, operation).unwrap()
    }

    fn params() -> StaticParameters {
        StaticParameters::new()
            .with("model", "llama3")
            .with("message", "hello")
            .with("document", "some text")
            .with("query", "what is rust")
            .with("toolName", "web_search")
    }

    #[test]
    fn chat_send_message() {
        let spec = build(op("chat", "sendMessage"), &params(), 0).unwrap();
        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.path, "/api/chat/completions");
        assert_eq!(
            spec.body,
            Some(json!({
                "model": "llama3",
                "messages": [{"role": "user", "content": "hello"}]
            }))
        );
    }

    #[test]
    fn chat_get_history() {
        let spec = build(op("chat", "getHistory"), &params(), 0).unwrap();
        assert_eq!(spec, RequestSpec::get("/api/chat/history"));
    }

    #[test]
    fn knowledge_base_add_document() {
        let spec = build(op("knowledgeBase", "addDocument"), &params(), 0).unwrap();
        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.path, "/api/kb/add");
        assert_eq!(spec.body, Some(json!({"content": "some text"})));
    }

    #[test]
    fn knowledge_base_query() {
        let spec = build(op("knowledgeBase", "query"), &params(), 0).unwrap();
        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.path, "/api/kb/query");
        assert_eq!(spec.body, Some(json!({"query": "what is rust"})));
    }

    #[test]
    fn tools_list_and_execute() {
        let list = build(op("tools", "list"), &params(), 0).unwrap();
        assert_eq!(list, RequestSpec::get("/api/tools/list"));

        let exec = build(op("tools", "execute"), &params(), 0).unwrap();
        assert_eq!(exec.method, HttpMethod::Post);
        assert_eq!(exec.path, "/api/tools/execute");
        assert_eq!(exec.body, Some(json!({"tool": "web_search"})));
    }

    #[test]
    fn model_list() {
        let spec = build(op("model", "list"), &params(), 0).unwrap();
        assert_eq!(spec, RequestSpec::get("/api/models"));
    }

    #[test]
    fn every_operation_builds_with_full_parameters() {
        for feature in Feature::ALL {
            for name in feature.operations() {
                let operation = Operation::parse(feature, name).unwrap();
                assert!(build(operation, &params(), 0).is_ok(), "{operation} failed");
            }
        }
    }

    #[test]
    fn parameters_are_read_for_the_given_item() {
        let params = params().with_item(2, "query", "item two");
        let spec = build(op("knowledgeBase", "query"), &params, 2).unwrap();
        assert_eq!(spec.body, Some(json!({"query": "item two"})));
        assert_eq!(params.lookups(), vec![("query".to_string(), 2)]);
    }

    #[test]
    fn get_operations_read_no_parameters() {
        let params = StaticParameters::new();
        build(op("chat", "getHistory"), &params, 0).unwrap();
        build(op("tools", "list"), &params, 0).unwrap();
        assert!(params.lookups().is_empty());
    }

    #[test]
    fn missing_parameter_is_item_error() {
        let err = build(op("tools", "execute"), &StaticParameters::new(), 4).unwrap_err();
        assert!(matches!(
            err,
            OwuiError::MissingParameter { ref name, index: 4 } if name == "toolName"
        ));
        assert!(err.is_item_scoped());
    }

    #[test]
    fn scalar_parameters_are_rendered_as_text() {
        let params = StaticParameters::new().with("query", 42);
        let spec = build(op("knowledgeBase", "query"), &params, 0).unwrap();
        assert_eq!(spec.body, Some(json!({"query": "42"})));
    }

    #[test]
    fn structured_parameter_is_rejected() {
        let params = StaticParameters::new().with("document", json!({"nested": true}));
        let err = build(op("knowledgeBase", "addDocument"), &params, 0).unwrap_err();
        assert!(err.to_string().contains("found object"), "got: {err}");
    }
}
