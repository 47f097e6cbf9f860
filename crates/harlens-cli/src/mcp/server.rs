//! JSON-RPC request dispatch and the stdio loop.

use std::io::{BufRead, Write};

use harlens_core::Session;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::tools::{
    handle_get_request_details, handle_get_request_ids, handle_list_urls_methods,
    handle_load_har, tool_definitions,
};

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

impl JsonRpcResponse {
    fn result(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: Some(result),
            error: None,
        }
    }

    fn error(id: Value, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(error),
        }
    }
}

impl JsonRpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    fn invalid_arguments(tool: &str, error: serde_json::Error) -> Self {
        Self {
            code: INVALID_PARAMS,
            message: format!("Invalid arguments: {error}"),
            data: Some(json!({ "tool": tool })),
        }
    }
}

fn tool_result(outcome: Result<String, String>) -> Value {
    let (text, is_error) = match outcome {
        Ok(text) => (text, false),
        Err(message) => (message, true),
    };
    json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error,
    })
}

fn parse_args<T: DeserializeOwned>(tool: &str, arguments: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments).map_err(|e| JsonRpcError::invalid_arguments(tool, e))
}

/// Tool server over one session.
#[derive(Default)]
pub struct HarServer {
    session: Session,
}

impl HarServer {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle one input line. Notifications (requests without an id) get no reply.
    pub fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {e}")),
                ));
            }
        };
        let raw_id = value.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(req) => req,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    raw_id,
                    JsonRpcError::new(INVALID_REQUEST, format!("Invalid Request: {e}")),
                ));
            }
        };
        let id = request.id?;
        tracing::debug!(method = %request.method, "rpc request");
        Some(match request.method.as_str() {
            "initialize" => JsonRpcResponse::result(id, initialize_result()),
            "tools/list" => {
                JsonRpcResponse::result(id, json!({ "tools": tool_definitions() }))
            }
            "tools/call" => match self.call_tool(request.params) {
                Ok(result) => JsonRpcResponse::result(id, result),
                Err(e) => JsonRpcResponse::error(id, e),
            },
            "ping" => JsonRpcResponse::result(id, json!({})),
            other => JsonRpcResponse::error(
                id,
                JsonRpcError::new(METHOD_NOT_FOUND, format!("Method not found: {other}")),
            ),
        })
    }

    fn call_tool(&mut self, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "Missing params"))?;
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| JsonRpcError::new(INVALID_PARAMS, "Missing tool name"))?;
        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let outcome = match name {
            "load_har" => handle_load_har(&mut self.session, parse_args(name, arguments)?),
            "list_urls_methods" => handle_list_urls_methods(&self.session),
            "get_request_ids" => handle_get_request_ids(&self.session, parse_args(name, arguments)?),
            "get_request_details" => {
                handle_get_request_details(&self.session, parse_args(name, arguments)?)
            }
            _ => {
                return Err(JsonRpcError::new(
                    INVALID_PARAMS,
                    format!("Unknown tool: {name}"),
                ))
            }
        };
        Ok(tool_result(outcome))
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": "2024-11-05",
        "capabilities": { "tools": {} },
        "serverInfo": {
            "name": "harlens",
            "version": env!("CARGO_PKG_VERSION")
        },
        "instructions": "Inspect HTTP Archive captures: call load_har first, then list_urls_methods, get_request_ids and get_request_details."
    })
}

/// Serve requests from `reader` until EOF, writing one response line each.
pub fn run_server<R: BufRead, W: Write>(
    server: &mut HarServer,
    mut reader: R,
    mut writer: W,
) -> anyhow::Result<()> {
    tracing::info!("tool server listening on stdio");
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Invalid UTF-8 becomes U+FFFD and is then rejected as a parse error.
        let line = String::from_utf8_lossy(&buf);
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(response) = server.handle_line(trimmed) {
            serde_json::to_writer(&mut writer, &response)?;
            writeln!(writer)?;
            writer.flush()?;
        }
    }
    tracing::info!("tool server input closed");
    Ok(())
}
