//! # stay-mcp
//!
//! MCP (Model Context Protocol) server for the Stay AI property booking API.
//!
//! This crate exposes Stay AI's REST operations as tools for AI agents and
//! renders properties and bookings as Markdown resources. It implements the
//! MCP protocol over stdin/stdout using JSON-RPC 2.0.
//!
//! ## 10 Tools
//!
//! `search_properties`, `get_property_details`, `create_booking`,
//! `get_booking`, `update_booking`, `cancel_booking`, `check_availability`,
//! `calculate_price`, `create_customer`, `get_customer`
//!
//! ## 2 Resource templates
//!
//! `property://{id}` and `booking://{id}`
//!
//! ## Usage
//!
//! The server is typically run as an executable and configured in AI tools like Claude Desktop:
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "stay-ai": {
//!       "command": "/path/to/stay-mcp",
//!       "env": { "STAY_AI_API_KEY": "your_api_key_here" }
//!     }
//!   }
//! }
//! ```
//!
//! ## Library Usage
//!
//! For testing or embedding, you can use the library API:
//!
//! ```no_run
//! use stay_mcp::{McpServer, StayClient, StayConfig};
//!
//! # async fn run() -> stay_mcp::Result<()> {
//! let config = StayConfig::from_env()?;
//! let client = StayClient::new(&config)?;
//! let server = McpServer::new(client);
//!
//! // Reads from stdin, writes to stdout
//! server.run().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod error;
#[allow(missing_docs)]
pub mod models;
mod resources;
mod server;
mod tools;

pub use client::StayClient;
pub use config::{StayConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, MISSING_API_KEY};
pub use convert::to_pretty_json;
pub use error::{McpError, Result};
pub use resources::{
    read as read_resource, render_booking, render_property, ReadResourceResult,
    ResourceContents, ResourceTemplate,
};
pub use server::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer, PROTOCOL_VERSION};
pub use tools::{ToolContent, ToolDef, ToolRegistry, ToolResult};
