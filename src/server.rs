//! MCP server: JSON-RPC 2.0 over newline-delimited stdio.
//!
//! Every request runs on its own task; responses are written in completion
//! order through a single writer, so stdout never interleaves two messages.

use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::client::StayClient;
use crate::error::{McpError, Result, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
use crate::resources;
use crate::tools::ToolRegistry;

/// MCP protocol revision this server speaks.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "Stay AI API";

const INSTRUCTIONS: &str = "MCP server for accessing Stay AI's property management API. \
     Use search_properties to find properties, get_property_details for full information, \
     check_availability and calculate_price before create_booking, and the booking and \
     customer tools to manage reservations. Read property://{id} or booking://{id} for a \
     Markdown summary.";

/// A JSON-RPC 2.0 request or notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol marker, must be "2.0"
    pub jsonrpc: String,
    /// Absent for notifications; an explicit `null` is kept as `Some(Null)`
    #[serde(
        default,
        deserialize_with = "present_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<JsonValue>,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

fn present_id<'de, D>(d: D) -> std::result::Result<Option<JsonValue>, D::Error>
where
    D: Deserializer<'de>,
{
    JsonValue::deserialize(d).map(Some)
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i32,
    /// Human-readable message
    pub message: String,
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol marker, always "2.0"
    pub jsonrpc: String,
    /// Id of the request being answered (null if it could not be read)
    pub id: JsonValue,
    /// Present on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    /// Present on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// Successful response.
    pub fn success(id: JsonValue, result: JsonValue) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Error response.
    pub fn error(id: JsonValue, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

/// MCP server exposing the Stay AI tools and resources.
pub struct McpServer {
    client: StayClient,
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a server around an already-configured client.
    pub fn new(client: StayClient) -> Self {
        Self {
            client,
            registry: ToolRegistry::new(),
        }
    }

    /// The tool registry.
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn run(self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve on an arbitrary line-oriented reader and writer.
    ///
    /// Returns once the reader hits EOF and every in-flight request has been
    /// answered.
    pub async fn serve<R, W>(self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let server = Arc::new(self);
        let (tx, mut rx) = mpsc::unbounded_channel::<JsonRpcResponse>();
        let mut tx = Some(tx);
        // Bytes of the line being read; kept across select! iterations.
        let mut line = Vec::new();

        info!("MCP server listening on stdio");

        loop {
            tokio::select! {
                read = reader.read_until(b'\n', &mut line), if tx.is_some() => {
                    let read = read?;
                    if let Some(sender) = &tx {
                        accept_line(&server, &line, sender);
                    }
                    line.clear();
                    if read == 0 {
                        debug!("stdin closed, draining in-flight requests");
                        tx = None;
                    }
                }
                Some(response) = rx.recv() => {
                    write_message(&mut writer, &response).await?;
                }
                else => break,
            }
        }

        info!("MCP server stopped");
        Ok(())
    }

    /// Handle one raw message line. Returns `None` for notifications.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: JsonValue = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    JsonValue::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ))
            }
        };

        let id = value.get("id").cloned();
        let request: JsonRpcRequest = match serde_json::from_value(value) {
            Ok(request) => request,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    id.unwrap_or(JsonValue::Null),
                    INVALID_REQUEST,
                    format!("Invalid request: {}", e),
                ))
            }
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id.unwrap_or(JsonValue::Null),
                INVALID_REQUEST,
                "jsonrpc must be \"2.0\"",
            ));
        }

        self.handle_request(request).await
    }

    /// Route a parsed request to its handler.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id else {
            self.handle_notification(&request.method);
            return None;
        };

        let params = request.params.unwrap_or(JsonValue::Null);
        let outcome = match request.method.as_str() {
            "initialize" => Ok(self.initialize_payload()),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => Ok(serde_json::json!({ "tools": self.registry.tools() })),
            "tools/call" => self.handle_tools_call(params).await,
            "resources/list" => Ok(serde_json::json!({ "resources": [] })),
            "resources/templates/list" => Ok(serde_json::json!({
                "resourceTemplates": resources::templates()
            })),
            "resources/read" => self.handle_resources_read(params).await,
            other => {
                return Some(JsonRpcResponse::error(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Method not found: {}", other),
                ))
            }
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                warn!(method = %request.method, error = %e, "Request failed");
                JsonRpcResponse::error(id, e.code(), e.to_string())
            }
        })
    }

    fn handle_notification(&self, method: &str) {
        match method {
            "notifications/initialized" => info!("Client initialized"),
            other => debug!(method = other, "Ignoring notification"),
        }
    }

    fn initialize_payload(&self) -> JsonValue {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": { "listChanged": false, "subscribe": false }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": INSTRUCTIONS
        })
    }

    async fn handle_tools_call(&self, params: JsonValue) -> Result<JsonValue> {
        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::MissingArg("name".to_string()))?;

        let args = match params.get("arguments") {
            Some(JsonValue::Object(map)) => map.clone(),
            None | Some(JsonValue::Null) => Map::new(),
            Some(_) => {
                return Err(McpError::InvalidArg {
                    name: "arguments".to_string(),
                    reason: "Expected an object".to_string(),
                })
            }
        };

        let result = self.registry.call(&self.client, name, args).await?;
        Ok(serde_json::to_value(result)?)
    }

    async fn handle_resources_read(&self, params: JsonValue) -> Result<JsonValue> {
        let uri = params
            .get("uri")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::MissingArg("uri".to_string()))?;

        let result = resources::read(&self.client, uri).await?;
        Ok(serde_json::to_value(result)?)
    }
}

/// Hand one raw line to a request task. Undecodable bytes are answered
/// with a parse error straight away.
fn accept_line(
    server: &Arc<McpServer>,
    bytes: &[u8],
    responses: &mpsc::UnboundedSender<JsonRpcResponse>,
) {
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            let text = text.trim();
            if !text.is_empty() {
                spawn_request(Arc::clone(server), text.to_string(), responses.clone());
            }
        }
        Err(e) => {
            warn!(error = %e, "Discarding line that is not valid UTF-8");
            let _ = responses.send(JsonRpcResponse::error(
                JsonValue::Null,
                PARSE_ERROR,
                format!("Parse error: {}", e),
            ));
        }
    }
}

fn spawn_request(
    server: Arc<McpServer>,
    line: String,
    responses: mpsc::UnboundedSender<JsonRpcResponse>,
) {
    tokio::spawn(async move {
        if let Some(response) = server.handle_line(&line).await {
            // The receiver only goes away when the writer failed.
            let _ = responses.send(response);
        }
    });
}

async fn write_message<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut bytes = serde_json::to_vec(response)?;
    bytes.push(b'\n');
    writer.write_all(&bytes).await?;
    writer.flush().await?;
    Ok(())
}
