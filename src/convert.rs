//! Conversion utilities between MCP tool arguments, typed requests and
//! response text.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};

use crate::error::{McpError, Result};
use crate::models::Validate;

/// Deserialize tool arguments into a typed request and validate it.
///
/// Serde's missing-field errors become [`McpError::MissingArg`]; every other
/// shape mismatch becomes [`McpError::InvalidArg`].
pub fn parse_args<T>(args: Map<String, JsonValue>) -> Result<T>
where
    T: DeserializeOwned + Validate,
{
    let request: T = from_args(JsonValue::Object(args), "arguments")?;
    request.validate()?;
    Ok(request)
}

/// Deserialize a required nested object argument (e.g. `updates`).
pub fn get_object_arg<T>(args: &Map<String, JsonValue>, name: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    match args.get(name) {
        None | Some(JsonValue::Null) => Err(McpError::MissingArg(name.to_string())),
        Some(value @ JsonValue::Object(_)) => from_args(value.clone(), name),
        Some(_) => Err(McpError::InvalidArg {
            name: name.to_string(),
            reason: "Expected an object".to_string(),
        }),
    }
}

fn from_args<T: DeserializeOwned>(value: JsonValue, name: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        let reason = e.to_string();
        match missing_field(&reason) {
            Some(field) if name == "arguments" => McpError::MissingArg(field.to_string()),
            Some(field) => McpError::MissingArg(format!("{}.{}", name, field)),
            None => McpError::InvalidArg {
                name: name.to_string(),
                reason,
            },
        }
    })
}

/// Extract the field name from serde's "missing field `x`" message.
fn missing_field(reason: &str) -> Option<&str> {
    let rest = reason.strip_prefix("missing field `")?;
    rest.split('`').next()
}

/// Helper to get a required string argument from JSON arguments.
pub fn get_string_arg(args: &Map<String, JsonValue>, name: &str) -> Result<String> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Err(McpError::MissingArg(name.to_string())),
        Some(JsonValue::String(s)) => Ok(s.clone()),
        Some(_) => Err(McpError::InvalidArg {
            name: name.to_string(),
            reason: "Expected a string".to_string(),
        }),
    }
}

/// Helper to get an optional string argument from JSON arguments.
pub fn get_optional_string(args: &Map<String, JsonValue>, name: &str) -> Result<Option<String>> {
    match args.get(name) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(McpError::InvalidArg {
            name: name.to_string(),
            reason: "Expected a string".to_string(),
        }),
    }
}

/// Render a value as two-space indented JSON text.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AvailabilityParams, BookingUpdates, SearchPropertiesParams};
    use serde_json::json;

    fn args(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    #[test]
    fn parse_args_reports_missing_field() {
        let err = parse_args::<AvailabilityParams>(args(json!({
            "property_id": "prop_123",
            "check_in": "2023-07-15"
        })))
        .unwrap_err();
        match err {
            McpError::MissingArg(name) => assert_eq!(name, "check_out"),
            other => panic!("expected MissingArg, got {:?}", other),
        }
    }

    #[test]
    fn parse_args_reports_wrong_type() {
        let err =
            parse_args::<SearchPropertiesParams>(args(json!({ "limit": "ten" }))).unwrap_err();
        assert!(matches!(err, McpError::InvalidArg { .. }));
    }

    #[test]
    fn parse_args_strips_unknown_fields() {
        let params =
            parse_args::<SearchPropertiesParams>(args(json!({ "pets": true, "bedrooms": 2 })))
                .unwrap();
        assert_eq!(params.bedrooms, Some(2));
        assert_eq!(params.limit, 10);
    }

    #[test]
    fn object_arg_must_be_present_and_an_object() {
        let map = args(json!({ "updates": "later" }));
        assert!(matches!(
            get_object_arg::<BookingUpdates>(&map, "updates"),
            Err(McpError::InvalidArg { .. })
        ));
        assert!(matches!(
            get_object_arg::<BookingUpdates>(&Map::new(), "updates"),
            Err(McpError::MissingArg(_))
        ));
    }

    #[test]
    fn string_args() {
        let map = args(json!({ "booking_id": "book_789", "reason": 5 }));
        assert_eq!(get_string_arg(&map, "booking_id").unwrap(), "book_789");
        assert!(matches!(
            get_string_arg(&map, "customer_id"),
            Err(McpError::MissingArg(_))
        ));
        assert!(get_optional_string(&map, "reason").is_err());
        assert_eq!(get_optional_string(&map, "note").unwrap(), None);
    }

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let text = to_pretty_json(&json!({ "id": "prop_123" })).unwrap();
        assert_eq!(text, "{\n  \"id\": \"prop_123\"\n}");
    }
}
