//! Property tools.
//!
//! Tools: search_properties, get_property_details

use serde_json::{Map, Value as JsonValue};

use crate::client::StayClient;
use crate::convert::{get_string_arg, parse_args};
use crate::error::{McpError, Result};
use crate::models::{SearchPropertiesParams, DEFAULT_SEARCH_LIMIT};
use crate::schema;
use crate::tools::ToolDef;

/// Get all property tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "search_properties",
            "Search for properties with various filters. All filters are optional; \
             returns up to `limit` matching properties (default 10) with id, name, \
             location, nightly price and capacity.",
            "searching properties",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search query for properties" },
                    "location": { "type": "string", "description": "Location to search in" },
                    "min_price": { "type": "number", "description": "Minimum price" },
                    "max_price": { "type": "number", "description": "Maximum price" },
                    "bedrooms": { "type": "integer", "minimum": 0, "description": "Number of bedrooms" },
                    "bathrooms": { "type": "number", "description": "Number of bathrooms" },
                    "limit": {
                        "type": "integer",
                        "minimum": 0,
                        "default": DEFAULT_SEARCH_LIMIT,
                        "description": "Maximum number of results to return"
                    }
                },
                "required": []
            }),
        ),
        ToolDef::new(
            "get_property_details",
            "Get detailed information about a specific property, including \
             description, amenities, images, rating and review count.",
            "getting property details",
            schema!(object {
                required: { "property_id": string => "ID of the property to retrieve details for" }
            }),
        ),
    ]
}

/// Dispatch a property tool call.
pub async fn dispatch(
    client: &StayClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "search_properties" => {
            let params: SearchPropertiesParams = parse_args(args)?;
            client.search_properties(&params).await
        }

        "get_property_details" => {
            let property_id = get_string_arg(&args, "property_id")?;
            client.get_property(&property_id).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
