//! Tool registry and dispatch.
//!
//! Exposes the Stay AI operations as 10 MCP tools, grouped by resource:
//! properties, bookings, availability/pricing and customers.

pub mod bookings;
pub mod customers;
pub mod pricing;
pub mod properties;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::client::StayClient;
use crate::convert::to_pretty_json;
use crate::error::{McpError, Result};

/// A tool definition for the MCP tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "search_properties")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
    /// Activity named in failure text, e.g. "searching properties"
    #[serde(skip)]
    pub error_context: String,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, error_context: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
            error_context: error_context.to_string(),
        }
    }
}

/// One block of tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolContent {
    /// Always "text"
    #[serde(rename = "type")]
    pub kind: String,
    /// The text payload
    pub text: String,
}

/// Envelope returned from `tools/call`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Output blocks; always exactly one text block
    pub content: Vec<ToolContent>,
    /// Set when the remote call failed
    #[serde(rename = "isError", default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResult {
    /// Successful result carrying `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent {
                kind: "text".to_string(),
                text: text.into(),
            }],
            is_error: None,
        }
    }

    /// Failed result carrying a human-readable message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            is_error: Some(true),
            ..Self::text(message)
        }
    }

    /// Whether this result reports a failure.
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// Text of the first content block.
    pub fn first_text(&self) -> &str {
        self.content.first().map(|c| c.text.as_str()).unwrap_or("")
    }
}

/// Registry of available MCP tools.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
}

impl ToolRegistry {
    /// Create the tool registry with every Stay AI tool.
    pub fn new() -> Self {
        let mut tools = Vec::new();
        tools.extend(properties::tools());
        tools.extend(bookings::tools());
        tools.extend(pricing::tools());
        tools.extend(customers::tools());
        Self { tools }
    }

    /// Get all tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Look up a tool definition by name.
    pub fn get(&self, name: &str) -> Option<&ToolDef> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Dispatch a tool call to the appropriate handler and return the raw
    /// remote payload.
    pub async fn dispatch(
        &self,
        client: &StayClient,
        name: &str,
        args: Map<String, JsonValue>,
    ) -> Result<JsonValue> {
        match name {
            "search_properties" | "get_property_details" => {
                properties::dispatch(client, name, args).await
            }
            "create_booking" | "get_booking" | "update_booking" | "cancel_booking" => {
                bookings::dispatch(client, name, args).await
            }
            "check_availability" | "calculate_price" => pricing::dispatch(client, name, args).await,
            "create_customer" | "get_customer" => customers::dispatch(client, name, args).await,
            _ => Err(McpError::UnknownTool(name.to_string())),
        }
    }

    /// Run a tool and wrap the outcome in an MCP envelope.
    ///
    /// Remote failures become an `isError` result with text
    /// `Error <context>: <message>`. Unknown tools and invalid arguments are
    /// returned as `Err` so the server can answer with a JSON-RPC error; no
    /// HTTP request is made for them.
    pub async fn call(
        &self,
        client: &StayClient,
        name: &str,
        args: Map<String, JsonValue>,
    ) -> Result<ToolResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::UnknownTool(name.to_string()))?;
        debug!(tool = name, "Tool call");

        match self.dispatch(client, name, args).await {
            Ok(value) => Ok(ToolResult::text(to_pretty_json(&value)?)),
            Err(e) if e.is_remote() => Ok(ToolResult::error(format!(
                "Error {}: {}",
                tool.error_context, e
            ))),
            Err(e) => Err(e),
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper macro for creating JSON Schema for tool input parameters.
///
/// Each property is written `"name": type => "description"`.
#[macro_export]
macro_rules! schema {
    // Object with required and optional properties
    (object {
        required: { $($req_name:literal : $req_type:tt => $req_desc:literal),* $(,)? },
        optional: { $($opt_name:literal : $opt_type:tt => $opt_desc:literal),* $(,)? }
    }) => {{
        let mut required: Vec<&str> = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), $crate::schema!(@prop $req_type, $req_desc));)*
        $(props.insert($opt_name.to_string(), $crate::schema!(@prop $opt_type, $opt_desc));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only required properties
    (object {
        required: { $($req_name:literal : $req_type:tt => $req_desc:literal),* $(,)? }
    }) => {{
        let mut required: Vec<&str> = Vec::new();
        $(required.push($req_name);)*

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), $crate::schema!(@prop $req_type, $req_desc));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only optional properties
    (object {
        optional: { $($opt_name:literal : $opt_type:tt => $opt_desc:literal),* $(,)? }
    }) => {{
        let mut props = serde_json::Map::new();
        $(props.insert($opt_name.to_string(), $crate::schema!(@prop $opt_type, $opt_desc));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": []
        })
    }};

    // Property with a description
    (@prop $type:tt, $desc:literal) => {{
        let mut prop = $crate::schema!(@type $type);
        prop["description"] = serde_json::json!($desc);
        prop
    }};

    // Type mappings
    (@type string) => { serde_json::json!({"type": "string"}) };
    (@type email) => { serde_json::json!({"type": "string", "format": "email"}) };
    (@type date) => { serde_json::json!({"type": "string", "format": "date"}) };
    (@type number) => { serde_json::json!({"type": "number"}) };
    (@type integer) => { serde_json::json!({"type": "integer", "minimum": 0}) };
}
