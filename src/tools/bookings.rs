//! Booking tools.
//!
//! Tools: create_booking, get_booking, update_booking, cancel_booking

use serde_json::{Map, Value as JsonValue};

use crate::client::StayClient;
use crate::convert::{get_object_arg, get_optional_string, get_string_arg, parse_args};
use crate::error::{McpError, Result};
use crate::models::{BookingStatus, BookingUpdates, CreateBookingRequest};
use crate::schema;
use crate::tools::ToolDef;

/// Get all booking tool definitions.
pub fn tools() -> Vec<ToolDef> {
    let statuses: Vec<&str> = BookingStatus::ALL.iter().map(|s| s.as_str()).collect();

    let mut customer_info = schema!(object {
        required: {
            "name": string => "Customer's full name",
            "email": email => "Customer's email address"
        },
        optional: { "phone": string => "Customer's phone number" }
    });
    customer_info["description"] = serde_json::json!("Customer information");

    vec![
        ToolDef::new(
            "create_booking",
            "Create a new booking for a property. Dates use YYYY-MM-DD. The customer's \
             email must be a valid address; the booking is rejected before it reaches \
             the API otherwise.",
            "creating booking",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "property_id": { "type": "string", "description": "ID of the property to book" },
                    "check_in": { "type": "string", "format": "date", "description": "Check-in date (YYYY-MM-DD)" },
                    "check_out": { "type": "string", "format": "date", "description": "Check-out date (YYYY-MM-DD)" },
                    "guests": { "type": "integer", "minimum": 0, "description": "Number of guests" },
                    "customer_info": customer_info
                },
                "required": ["property_id", "check_in", "check_out", "guests", "customer_info"]
            }),
        ),
        ToolDef::new(
            "get_booking",
            "Get details of a specific booking: dates, guests, status, total price, \
             payment status and customer.",
            "retrieving booking",
            schema!(object {
                required: { "booking_id": string => "ID of the booking to retrieve" }
            }),
        ),
        ToolDef::new(
            "update_booking",
            "Update an existing booking. Only the fields present in `updates` are sent.",
            "updating booking",
            serde_json::json!({
                "type": "object",
                "properties": {
                    "booking_id": { "type": "string", "description": "ID of the booking to update" },
                    "updates": {
                        "type": "object",
                        "description": "Fields to update",
                        "properties": {
                            "check_in": { "type": "string", "format": "date", "description": "New check-in date (YYYY-MM-DD)" },
                            "check_out": { "type": "string", "format": "date", "description": "New check-out date (YYYY-MM-DD)" },
                            "guests": { "type": "integer", "minimum": 0, "description": "New number of guests" },
                            "status": { "type": "string", "enum": statuses, "description": "New booking status" }
                        },
                        "required": []
                    }
                },
                "required": ["booking_id", "updates"]
            }),
        ),
        ToolDef::new(
            "cancel_booking",
            "Cancel an existing booking, optionally recording a reason.",
            "cancelling booking",
            schema!(object {
                required: { "booking_id": string => "ID of the booking to cancel" },
                optional: { "reason": string => "Reason for cancellation" }
            }),
        ),
    ]
}

/// Dispatch a booking tool call.
pub async fn dispatch(
    client: &StayClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "create_booking" => {
            let booking: CreateBookingRequest = parse_args(args)?;
            client.create_booking(&booking).await
        }

        "get_booking" => {
            let booking_id = get_string_arg(&args, "booking_id")?;
            client.get_booking(&booking_id).await
        }

        "update_booking" => {
            let booking_id = get_string_arg(&args, "booking_id")?;
            let updates: BookingUpdates = get_object_arg(&args, "updates")?;
            client.update_booking(&booking_id, &updates).await
        }

        "cancel_booking" => {
            let booking_id = get_string_arg(&args, "booking_id")?;
            let reason = get_optional_string(&args, "reason")?;
            client.cancel_booking(&booking_id, reason).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
