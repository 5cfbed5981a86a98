// SPDX-FileCopyrightText: 2026 OpenWebUI Nodes Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.

use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;

use owui_client::HttpTransport;
use owui_config::{ConfigCredentialStore, OwuiConfig};
use owui_core::{InputItem, OwuiError, ParameterResolver, ResultRecord};
use owui_nodes::{
    ExecutionContext, JsonItemParameters, NodeExecutor, NodeKind, search_catalog,
};
use serde_json::Value;
use tracing::info;

use crate::RunArgs;

/// `owui run`: executes a node and prints one record per item.
///
/// When the batch aborts, the records committed before the failure are
/// still printed before the error is returned.
pub async fn run(config: &OwuiConfig, args: &RunArgs) -> Result<(), OwuiError> {
    let items = read_items(args.input.as_deref())?;
    let mut records = Vec::with_capacity(items.len());
    let result = execute(config, args, &items, &mut records).await;
    print_json(&records)?;
    result
}

async fn execute(
    config: &OwuiConfig,
    args: &RunArgs,
    items: &[InputItem],
    records: &mut Vec<ResultRecord>,
) -> Result<(), OwuiError> {
    let node = parse_node(&args.node)?;
    let params = run_parameters(args, items)?;
    let executor = build_executor(config, node, Arc::new(params), args.credential.clone())?
        .continue_on_fail(args.tolerant(config.execution.continue_on_fail));
    executor.run_into(items, records).await
}

/// `owui models`: prints the chat model options.
pub async fn models(config: &OwuiConfig, credential: Option<String>) -> Result<(), OwuiError> {
    let executor = build_executor(
        config,
        NodeKind::OpenWebUi,
        Arc::new(JsonItemParameters::default()),
        credential,
    )?;
    let options = executor.model_options().await?;
    info!(count = options.len(), "loaded model options");
    print_json(&options)
}

/// `owui nodes`: prints the built-in node catalog.
pub fn nodes(query: &str) -> Result<(), OwuiError> {
    print_json(&search_catalog(query))
}

/// `owui config check`: prints a summary of the validated config.
pub fn config_check(config: &OwuiConfig) -> Result<(), OwuiError> {
    println!("config: ok");
    println!("  log_level: {}", config.general.log_level);
    println!(
        "  http: timeout={}s connect_timeout={}s",
        config.http.timeout_secs, config.http.connect_timeout_secs
    );
    println!(
        "  execution: credential={} continue_on_fail={}",
        config.execution.credential, config.execution.continue_on_fail
    );
    if config.credentials.is_empty() {
        println!("  credentials: none (environment fallback only)");
    } else {
        for (name, credential) in &config.credentials {
            println!("  credential {name}: {}", credential.api_url);
        }
    }
    Ok(())
}

fn build_executor(
    config: &OwuiConfig,
    node: NodeKind,
    parameters: Arc<dyn ParameterResolver>,
    credential: Option<String>,
) -> Result<NodeExecutor, OwuiError> {
    let transport = HttpTransport::new(&config.http)?;
    let credentials = ConfigCredentialStore::from_config(config);
    let context = ExecutionContext::new(Arc::new(credentials), parameters, Arc::new(transport));
    let credential = credential.unwrap_or_else(|| config.execution.credential.clone());
    Ok(NodeExecutor::new(node, context).with_credential(credential))
}

fn parse_node(name: &str) -> Result<NodeKind, OwuiError> {
    NodeKind::from_str(name).map_err(|_| {
        let known: Vec<String> = NodeKind::ALL.iter().map(|n| n.to_string()).collect();
        OwuiError::Config(format!(
            "unknown node `{name}` (expected one of: {})",
            known.join(", ")
        ))
    })
}

/// `--param` values become node-level defaults; `--feature` and `--operation`
/// are selectors that item fields cannot override.
fn run_parameters(args: &RunArgs, items: &[InputItem]) -> Result<JsonItemParameters, OwuiError> {
    let defaults = args
        .params
        .iter()
        .map(|raw| parse_param(raw))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(JsonItemParameters::new(items)
        .with_defaults(defaults)
        .with_selector("feature", args.feature.clone())
        .with_selector("operation", args.operation.clone()))
}

/// Parses `key=value`. The value is read as JSON when it parses, else as a string.
fn parse_param(raw: &str) -> Result<(String, Value), OwuiError> {
    let (key, value) = raw
        .split_once('=')
        .filter(|(key, _)| !key.trim().is_empty())
        .ok_or_else(|| OwuiError::Config(format!("invalid --param `{raw}`, expected KEY=VALUE")))?;
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.trim().to_string(), value))
}

fn read_items(input: Option<&str>) -> Result<Vec<InputItem>, OwuiError> {
    let text = match input {
        None => return Ok(vec![InputItem(Value::Object(Default::default()))]),
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| OwuiError::Config(format!("cannot read items from stdin: {e}")))?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| OwuiError::Config(format!("cannot read items from {path}: {e}")))?,
    };
    parse_items(&text)
}

/// Accepts a JSON array of items or a single item object.
fn parse_items(text: &str) -> Result<Vec<InputItem>, OwuiError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| OwuiError::Config(format!("input is not valid JSON: {e}")))?;
    match value {
        Value::Array(items) => Ok(items.into_iter().map(InputItem::from).collect()),
        Value::Object(_) => Ok(vec![InputItem::from(value)]),
        other => Err(OwuiError::Config(format!(
            "input must be an array of items or a single object, got {other}"
        ))),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), OwuiError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| OwuiError::Internal(format!("failed to serialize output: {e}")))?;
    println!("{text}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use owui_core::{ChatOperation, Operation};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args() -> RunArgs {
        RunArgs {
            node: "openWebUi".into(),
            feature: None,
            operation: None,
            input: None,
            params: vec![],
            credential: None,
            continue_on_fail: false,
            no_continue_on_fail: false,
        }
    }

    fn config_for(server: &MockServer) -> OwuiConfig {
        owui_config::load_and_validate_str(&format!(
            r#"
[credentials.openWebUiApi]
api_url = "{}"
jwt_token = "cli-token"
"#,
            server.uri()
        ))
        .unwrap()
    }

    #[test]
    fn parse_items_accepts_array_and_object() {
        let items = parse_items(r#"[{"a": 1}, {"a": 2}]"#).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1], InputItem(json!({"a": 2})));

        let single = parse_items(r#"{"query": "x"}"#).unwrap();
        assert_eq!(single, vec![InputItem(json!({"query": "x"}))]);
    }

    #[test]
    fn parse_items_rejects_scalars_and_garbage() {
        assert!(matches!(parse_items("42"), Err(OwuiError::Config(_))));
        assert!(matches!(parse_items("{not json"), Err(OwuiError::Config(_))));
    }

    #[test]
    fn missing_input_is_one_empty_item() {
        let items = read_items(None).unwrap();
        assert_eq!(items, vec![InputItem(json!({}))]);
    }

    #[test]
    fn input_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("items.json");
        std::fs::write(&file, r#"[{"toolName": "calc"}]"#).unwrap();

        let items = read_items(file.to_str()).unwrap();
        assert_eq!(items, vec![InputItem(json!({"toolName": "calc"}))]);
        assert!(read_items(Some("/nonexistent/items.json")).is_err());
    }

    #[test]
    fn parse_param_reads_json_or_string() {
        assert_eq!(parse_param("model=llama3").unwrap(), ("model".into(), json!("llama3")));
        assert_eq!(parse_param("n=42").unwrap(), ("n".into(), json!(42)));
        assert_eq!(
            parse_param("message=a=b").unwrap(),
            ("message".into(), json!("a=b"))
        );
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=x").is_err());
    }

    #[test]
    fn selectors_are_node_level() {
        let mut args = args();
        args.feature = Some("tools".into());
        args.operation = Some("execute".into());
        args.params = vec!["toolName=calc".into()];

        let items = vec![InputItem(json!({"toolName": "own"})), InputItem(json!({}))];
        let params = run_parameters(&args, &items).unwrap();
        assert_eq!(params.parameter("feature", 0), Some(json!("tools")));
        assert_eq!(params.parameter("operation", 0), Some(json!("execute")));
        assert_eq!(params.parameter("toolName", 0), Some(json!("own")));
        assert_eq!(params.parameter("toolName", 1), Some(json!("calc")));
    }

    #[test]
    fn item_fields_cannot_change_the_selected_operation() {
        let mut args = args();
        args.node = "openWebUiChat".into();
        args.operation = Some("sendMessage".into());
        let items = vec![InputItem(json!({
            "operation": "delete",
            "feature": "tools",
            "message": "hi",
            "model": "m"
        }))];

        let params = run_parameters(&args, &items).unwrap();
        let op = NodeKind::Chat.resolve_operation(&params).unwrap();
        assert_eq!(op, Operation::Chat(ChatOperation::SendMessage));
    }

    #[test]
    fn item_fields_are_not_selectors_without_flags() {
        let items = vec![InputItem(json!({"operation": "getHistory"}))];
        let params = run_parameters(&args(), &items).unwrap();
        let op = NodeKind::OpenWebUi.resolve_operation(&params).unwrap();
        assert_eq!(op, Operation::Chat(ChatOperation::SendMessage));
    }

    #[test]
    fn unknown_node_lists_valid_names() {
        let err = parse_node("openWebUiImages").unwrap_err();
        assert!(err.to_string().contains("openWebUiRag"));
    }

    #[tokio::test]
    async fn execute_runs_items_against_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/tools/execute"))
            .and(header("authorization", "Bearer cli-token"))
            .and(body_json(json!({"tool": "calc"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": 4})))
            .expect(1)
            .mount(&server)
            .await;

        let mut args = args();
        args.node = "openWebUiTool".into();
        args.operation = Some("execute".into());
        let items = vec![InputItem(json!({"toolName": "calc"})), InputItem(json!({}))];

        let mut records = Vec::new();
        let err = execute(&config_for(&server), &args, &items, &mut records)
            .await
            .unwrap_err();
        assert!(matches!(err, OwuiError::MissingParameter { index: 1, .. }));
        assert_eq!(records, vec![ResultRecord::Data(json!({"result": 4}))]);
    }

    #[tokio::test]
    async fn config_continue_on_fail_applies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/history"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.execution.continue_on_fail = true;
        let mut args = args();
        args.operation = Some("getHistory".into());

        let items = vec![InputItem(json!({}))];
        let mut records = Vec::new();
        execute(&config, &args, &items, &mut records).await.unwrap();
        assert!(records[0].is_error());
    }

    #[tokio::test]
    async fn no_continue_on_fail_overrides_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/chat/history"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.execution.continue_on_fail = true;
        let mut args = args();
        args.operation = Some("getHistory".into());
        args.no_continue_on_fail = true;

        let items = vec![InputItem(json!({})), InputItem(json!({}))];
        let mut records = Vec::new();
        let err = execute(&config, &args, &items, &mut records)
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), Some(500));
        assert!(records.is_empty());
    }
}
