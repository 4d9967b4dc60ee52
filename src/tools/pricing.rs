//! Availability and pricing tools.
//!
//! Tools: check_availability, calculate_price

use serde_json::{Map, Value as JsonValue};

use crate::client::StayClient;
use crate::convert::parse_args;
use crate::error::{McpError, Result};
use crate::models::{AvailabilityParams, PriceParams};
use crate::schema;
use crate::tools::ToolDef;

/// Get all availability and pricing tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "check_availability",
            "Check if a property is available for specific dates (YYYY-MM-DD), \
             optionally for a given number of guests.",
            "checking availability",
            schema!(object {
                required: {
                    "property_id": string => "ID of the property to check",
                    "check_in": date => "Check-in date (YYYY-MM-DD)",
                    "check_out": date => "Check-out date (YYYY-MM-DD)"
                },
                optional: { "guests": integer => "Number of guests" }
            }),
        ),
        ToolDef::new(
            "calculate_price",
            "Calculate the price for a stay, applying an optional promotional code. \
             Pricing rules are owned by Stay AI.",
            "calculating price",
            schema!(object {
                required: {
                    "property_id": string => "ID of the property",
                    "check_in": date => "Check-in date (YYYY-MM-DD)",
                    "check_out": date => "Check-out date (YYYY-MM-DD)"
                },
                optional: {
                    "guests": integer => "Number of guests",
                    "promo_code": string => "Promotional code"
                }
            }),
        ),
    ]
}

/// Dispatch an availability or pricing tool call.
pub async fn dispatch(
    client: &StayClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "check_availability" => {
            let params: AvailabilityParams = parse_args(args)?;
            client.check_availability(&params).await
        }

        "calculate_price" => {
            let params: PriceParams = parse_args(args)?;
            client.calculate_price(&params).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
