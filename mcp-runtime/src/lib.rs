//! MCP runtime for the Aegis One platform API.
//!
//! Speaks JSON-RPC 2.0 over stdio with Content-Length framing. Tool calls are
//! dispatched through a capability-gated registry; everything the server
//! prints to stdout is protocol traffic, diagnostics go to stderr via
//! `tracing`.

use serde_json::{Map, Value, json};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use aegis_client::{ApiClient, ClientOptions};

pub mod args;
pub mod outcome;
pub mod registry;
mod toolsets;

use registry::{RegistryError, ServerMode, ToolRegistry};

const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
const MCP_SERVER_NAME: &str = "aegis-one-mcp";

/// Everything needed to stand up a server instance.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub api_key: String,
    pub region: Option<String>,
    pub host: Option<String>,
    pub allow_write: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Client(#[from] aegis_client::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

pub struct McpServer {
    registry: ToolRegistry,
    mode: ServerMode,
}

impl McpServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let client = ApiClient::new(ClientOptions {
            api_key: config.api_key,
            region: config.region,
            host: config.host,
            user_agent: Some(format!(
                "aegis-one-mcp-server/{}",
                env!("CARGO_PKG_VERSION")
            )),
        })?;

        let mode = if config.allow_write {
            ServerMode::ReadWrite
        } else {
            ServerMode::ReadOnly
        };
        let registry = ToolRegistry::build(&client, mode, toolsets::all())?;
        tracing::info!(
            tools = registry.len(),
            read_only = (mode == ServerMode::ReadOnly),
            "tool registry initialized"
        );
        Ok(Self { registry, mode })
    }

    pub fn mode(&self) -> ServerMode {
        self.mode
    }

    pub async fn serve_stdio(&self) -> Result<(), String> {
        let stdin = io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = io::stdout();

        loop {
            let incoming = read_framed_json(&mut reader)
                .await
                .map_err(|e| format!("Failed to read MCP message: {e}"))?;
            let Some(incoming) = incoming else {
                break;
            };

            let responses = self.handle_incoming_message(incoming).await;
            for response in responses {
                write_framed_json(&mut stdout, &response)
                    .await
                    .map_err(|e| format!("Failed to write MCP response: {e}"))?;
            }
        }

        Ok(())
    }

    pub async fn handle_incoming_message(&self, incoming: Value) -> Vec<Value> {
        let mut responses = Vec::new();

        if let Some(batch) = incoming.as_array() {
            if batch.is_empty() {
                responses.push(error_response(
                    Value::Null,
                    RpcError::invalid_request("Batch request must not be empty"),
                ));
                return responses;
            }
            for item in batch {
                if let Some(response) = self.handle_single_message(item.clone()).await {
                    responses.push(response);
                }
            }
            return responses;
        }

        if let Some(response) = self.handle_single_message(incoming).await {
            responses.push(response);
        }
        responses
    }

    async fn handle_single_message(&self, incoming: Value) -> Option<Value> {
        let Some(obj) = incoming.as_object() else {
            return Some(error_response(
                Value::Null,
                RpcError::invalid_request("Request must be a JSON object"),
            ));
        };

        if obj.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            let id = obj.get("id").cloned().unwrap_or(Value::Null);
            return Some(error_response(
                id,
                RpcError::invalid_request("jsonrpc must be '2.0'"),
            ));
        }

        let Some(method) = obj.get("method").and_then(Value::as_str) else {
            // Most likely a client response; server does not issue outbound requests.
            return None;
        };

        let params = obj.get("params").cloned().unwrap_or(Value::Null);
        if let Some(id) = obj.get("id").cloned() {
            let result = self.handle_request(method, params).await;
            Some(match result {
                Ok(payload) => success_response(id, payload),
                Err(err) => error_response(id, err),
            })
        } else {
            self.handle_notification(method).await;
            None
        }
    }

    async fn handle_notification(&self, method: &str) {
        if matches!(
            method,
            "notifications/initialized" | "notifications/cancelled"
        ) {
            return;
        }
        tracing::debug!(method, "ignoring unknown notification");
    }

    async fn handle_request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        match method {
            "initialize" => Ok(self.initialize_payload()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.tools_list_payload()),
            "tools/call" => self.handle_tools_call(params).await,
            "prompts/list" => Ok(json!({ "prompts": [] })),
            _ => Err(RpcError::method_not_found(method)),
        }
    }

    fn initialize_payload(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                },
                "prompts": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": MCP_SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn tools_list_payload(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name,
                    "description": tool.description,
                    "inputSchema": tool.input_schema,
                    "annotations": {
                        "readOnlyHint": tool.read_only
                    },
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn handle_tools_call(&self, params: Value) -> Result<Value, RpcError> {
        let params = params
            .as_object()
            .ok_or_else(|| RpcError::invalid_params("tools/call params must be an object"))?;

        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| RpcError::invalid_params("tools/call requires string field 'name'"))?;

        let arguments = match params.get("arguments") {
            Some(Value::Object(map)) => map.clone(),
            Some(Value::Null) | None => Map::new(),
            Some(_) => {
                return Err(RpcError::invalid_params(
                    "tools/call 'arguments' must be an object",
                ));
            }
        };

        let tool = self
            .registry
            .get(name)
            .ok_or_else(|| RpcError::invalid_params(format!("Unknown tool: {name}")))?;

        tracing::debug!(tool = name, "dispatching tool call");
        let outcome = (tool.handler)(arguments).await;
        Ok(outcome.to_value())
    }
}

#[derive(Debug)]
struct RpcError {
    code: i64,
    message: String,
    data: Option<Value>,
}

impl RpcError {
    fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: -32600,
            message: message.into(),
            data: None,
        }
    }

    fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }
    }

    fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: -32602,
            message: message.into(),
            data: None,
        }
    }
}

fn success_response(id: Value, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

fn error_response(id: Value, error: RpcError) -> Value {
    let mut payload = json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": error.code,
            "message": error.message
        }
    });
    if let Some(data) = error.data {
        payload["error"]["data"] = data;
    }
    payload
}

async fn read_framed_json(
    reader: &mut (impl AsyncBufRead + Unpin),
) -> Result<Option<Value>, std::io::Error> {
    let mut content_length: Option<usize> = None;

    loop {
        let mut line = String::new();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            if content_length.is_none() {
                return Ok(None);
            }
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "Unexpected EOF while reading MCP headers",
            ));
        }

        if line == "\r\n" {
            break;
        }

        let line = line.trim_end_matches(['\r', '\n']);
        if line.to_ascii_lowercase().starts_with("content-length:") {
            let raw_len = line
                .split_once(':')
                .map(|(_, right)| right.trim())
                .unwrap_or_default();
            let parsed = raw_len.parse::<usize>().map_err(|_| {
                std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Invalid Content-Length header",
                )
            })?;
            content_length = Some(parsed);
        }
    }

    let content_length = content_length.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Missing Content-Length header",
        )
    })?;
    let mut payload = vec![0_u8; content_length];
    reader.read_exact(&mut payload).await?;

    let json: Value = serde_json::from_slice(&payload).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Invalid JSON payload: {e}"),
        )
    })?;
    Ok(Some(json))
}

async fn write_framed_json(
    writer: &mut (impl AsyncWrite + Unpin),
    value: &Value,
) -> Result<(), std::io::Error> {
    let body = serde_json::to_vec(value).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Failed to serialize JSON: {e}"),
        )
    })?;
    let header = format!(
        "Content-Length: {}\r\nContent-Type: application/json\r\n\r\n",
        body.len()
    );
    writer.write_all(header.as_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_server(allow_write: bool) -> McpServer {
        McpServer::new(ServerConfig {
            api_key: "test-key".to_string(),
            region: Some("us".to_string()),
            host: None,
            allow_write,
        })
        .unwrap()
    }

    #[test]
    fn initialize_payload_reports_protocol_and_server_info() {
        let server = test_server(false);
        let payload = server.initialize_payload();
        assert_eq!(payload["protocolVersion"], json!(MCP_PROTOCOL_VERSION));
        assert_eq!(payload["serverInfo"]["name"], json!(MCP_SERVER_NAME));
    }

    #[test]
    fn tools_list_carries_read_only_annotations() {
        let server = test_server(true);
        let payload = server.tools_list_payload();
        let tools = payload["tools"].as_array().unwrap();
        assert!(!tools.is_empty());

        let delete = tools
            .iter()
            .find(|t| t["name"] == json!("aegis_delete_account"))
            .unwrap();
        assert_eq!(delete["annotations"]["readOnlyHint"], json!(false));

        let list = tools
            .iter()
            .find(|t| t["name"] == json!("aegis_list_accounts"))
            .unwrap();
        assert_eq!(list["annotations"]["readOnlyHint"], json!(true));
    }

    #[test]
    fn tools_list_is_sorted_by_name() {
        let server = test_server(true);
        let payload = server.tools_list_payload();
        let names: Vec<String> = payload["tools"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap().to_string())
            .collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[tokio::test]
    async fn rejects_wrong_jsonrpc_version() {
        let server = test_server(false);
        let responses = server
            .handle_incoming_message(json!({ "jsonrpc": "1.0", "id": 1, "method": "ping" }))
            .await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], json!(-32600));
    }

    #[tokio::test]
    async fn rejects_unknown_method() {
        let server = test_server(false);
        let responses = server
            .handle_incoming_message(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "resources/list"
            }))
            .await;
        assert_eq!(responses[0]["error"]["code"], json!(-32601));
    }

    #[tokio::test]
    async fn ping_returns_empty_object() {
        let server = test_server(false);
        let responses = server
            .handle_incoming_message(json!({ "jsonrpc": "2.0", "id": 7, "method": "ping" }))
            .await;
        assert_eq!(responses[0]["result"], json!({}));
        assert_eq!(responses[0]["id"], json!(7));
    }

    #[tokio::test]
    async fn notifications_produce_no_response() {
        let server = test_server(false);
        let responses = server
            .handle_incoming_message(json!({
                "jsonrpc": "2.0",
                "method": "notifications/initialized"
            }))
            .await;
        assert!(responses.is_empty());
    }

    #[tokio::test]
    async fn empty_batch_is_an_invalid_request() {
        let server = test_server(false);
        let responses = server.handle_incoming_message(json!([])).await;
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0]["error"]["code"], json!(-32600));
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let server = test_server(false);
        let responses = server
            .handle_incoming_message(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": { "name": "aegis_no_such_tool", "arguments": {} }
            }))
            .await;
        assert_eq!(responses[0]["error"]["code"], json!(-32602));
    }

    #[tokio::test]
    async fn write_tool_is_unknown_in_read_only_mode() {
        let server = test_server(false);
        let responses = server
            .handle_incoming_message(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": { "name": "aegis_delete_account", "arguments": { "accountId": "a" } }
            }))
            .await;
        assert_eq!(responses[0]["error"]["code"], json!(-32602));
    }

    #[tokio::test]
    async fn missing_required_argument_is_a_tool_error_not_a_protocol_error() {
        let server = test_server(false);
        let responses = server
            .handle_incoming_message(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": { "name": "aegis_get_account", "arguments": {} }
            }))
            .await;
        let result = &responses[0]["result"];
        assert_eq!(result["isError"], json!(true));
        assert_eq!(
            result["content"][0]["text"],
            json!("missing required parameter: accountId")
        );
    }

    #[tokio::test]
    async fn framed_json_round_trips() {
        let value = json!({ "jsonrpc": "2.0", "id": 1, "result": { "ok": true } });
        let mut buffer = Vec::new();
        write_framed_json(&mut buffer, &value).await.unwrap();

        let mut reader = BufReader::new(buffer.as_slice());
        let decoded = read_framed_json(&mut reader).await.unwrap().unwrap();
        assert_eq!(decoded, value);

        // Stream exhausted cleanly.
        assert!(read_framed_json(&mut reader).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_content_length_is_an_error() {
        let raw = b"Content-Type: application/json\r\n\r\n{}";
        let mut reader = BufReader::new(raw.as_slice());
        let err = read_framed_json(&mut reader).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    }

    #[tokio::test]
    async fn header_names_are_case_insensitive() {
        let body = br#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#;
        let mut raw = format!("content-length: {}\r\n\r\n", body.len()).into_bytes();
        raw.extend_from_slice(body);
        let mut reader = BufReader::new(raw.as_slice());
        let decoded = read_framed_json(&mut reader).await.unwrap().unwrap();
        assert_eq!(decoded["method"], json!("ping"));
    }
}
