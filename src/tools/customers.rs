//! Customer tools.
//!
//! Tools: create_customer, get_customer

use serde_json::{Map, Value as JsonValue};

use crate::client::StayClient;
use crate::convert::{get_string_arg, parse_args};
use crate::error::{McpError, Result};
use crate::models::CreateCustomerRequest;
use crate::schema;
use crate::tools::ToolDef;

/// Get all customer tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "create_customer",
            "Create a new customer profile. Email must be a valid address; the \
             address and all of its parts are optional.",
            "creating customer",
            create_customer_schema(),
        ),
        ToolDef::new(
            "get_customer",
            "Get details of a specific customer",
            "retrieving customer",
            schema!(object {
                required: { "customer_id": string => "ID of the customer to retrieve" }
            }),
        ),
    ]
}

fn create_customer_schema() -> JsonValue {
    let mut address = schema!(object {
        optional: {
            "street": string => "Street address",
            "city": string => "City",
            "state": string => "State/Province",
            "postal_code": string => "Postal/ZIP code",
            "country": string => "Country"
        }
    });
    address["description"] = serde_json::json!("Customer's address");

    let mut schema = schema!(object {
        required: {
            "name": string => "Customer's full name",
            "email": email => "Customer's email address"
        },
        optional: { "phone": string => "Customer's phone number" }
    });
    schema["properties"]["address"] = address;
    schema
}

/// Dispatch a customer tool call.
pub async fn dispatch(
    client: &StayClient,
    name: &str,
    args: Map<String, JsonValue>,
) -> Result<JsonValue> {
    match name {
        "create_customer" => {
            let customer: CreateCustomerRequest = parse_args(args)?;
            client.create_customer(&customer).await
        }

        "get_customer" => {
            let customer_id = get_string_arg(&args, "customer_id")?;
            client.get_customer(&customer_id).await
        }

        _ => Err(McpError::UnknownTool(name.to_string())),
    }
}
