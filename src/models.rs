//! Stay AI entities and typed tool requests.
//!
//! Entities are snapshots of remote-owned records. Request records are
//! deserialized from tool arguments and checked with [`Validate`] before any
//! HTTP call is made.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{McpError, Result};

/// Default page size for property searches.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// A rentable property.
///
/// Remote payloads are decoded leniently: a missing, `null` or oddly typed
/// field becomes empty rather than failing the whole record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_per_night: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub bedrooms: Option<u32>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub bathrooms: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub max_guests: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::text_list")]
    pub amenities: Vec<String>,
}

/// Lifecycle status of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    /// All statuses accepted by `update_booking`.
    pub const ALL: [BookingStatus; 3] = [
        BookingStatus::Confirmed,
        BookingStatus::Pending,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reservation of a property for a date range.
///
/// `status` is kept as the raw string the API reports; only `update_booking`
/// restricts it to [`BookingStatus`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub property_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub check_in: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub check_out: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub guests: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub payment_status: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub customer: Customer,
}

/// A customer profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub email: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Address>,
}

/// Postal address; every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Field decoders for remote-owned records.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value as JsonValue;

    fn as_text(value: JsonValue) -> Option<String> {
        match value {
            JsonValue::Null => None,
            JsonValue::String(s) => Some(s),
            other => Some(other.to_string()),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
        Ok(as_text(JsonValue::deserialize(d)?).unwrap_or_default())
    }

    pub fn optional_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(as_text(JsonValue::deserialize(d)?))
    }

    pub fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        Ok(match JsonValue::deserialize(d)? {
            JsonValue::Array(items) => items.into_iter().filter_map(as_text).collect(),
            other => as_text(other).into_iter().collect(),
        })
    }

    pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
        Ok(match JsonValue::deserialize(d)? {
            JsonValue::Number(n) => n.as_f64(),
            JsonValue::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
        Ok(match JsonValue::deserialize(d)? {
            JsonValue::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
            JsonValue::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }

    pub fn optional<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(serde_json::from_value(JsonValue::deserialize(d)?).ok())
    }

    pub fn or_default<'de, D, T>(d: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(serde_json::from_value(JsonValue::deserialize(d)?).unwrap_or_default())
    }
}

// ── Requests ─────────────────────────────────────────────────────────────

/// Semantic checks that JSON deserialization alone cannot express.
pub trait Validate {
    /// Reject the request before it reaches the network.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Filters for `GET /properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPropertiesParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f64>,
    #[serde(default = "default_search_limit")]
    pub limit: u32,
}

fn default_search_limit() -> u32 {
    DEFAULT_SEARCH_LIMIT
}

impl Default for SearchPropertiesParams {
    fn default() -> Self {
        Self {
            query: None,
            location: None,
            min_price: None,
            max_price: None,
            bedrooms: None,
            bathrooms: None,
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

impl Validate for SearchPropertiesParams {
    fn validate(&self) -> Result<()> {
        check_finite("min_price", self.min_price)?;
        check_finite("max_price", self.max_price)?;
        check_finite("bathrooms", self.bathrooms)
    }
}

/// Contact details attached to a new booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Body of `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub property_id: String,
    pub check_in: String,
    pub check_out: String,
    pub guests: u32,
    pub customer_info: CustomerInfo,
}

impl Validate for CreateBookingRequest {
    fn validate(&self) -> Result<()> {
        check_email("customer_info.email", &self.customer_info.email)
    }
}

/// Partial update sent with `PATCH /bookings/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingUpdates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
}

/// Body of `POST /bookings/{id}/cancel`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelBookingRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Query for `GET /availability`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityParams {
    pub property_id: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
}

impl Validate for AvailabilityParams {}

/// Body of `POST /calculate-price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceParams {
    pub property_id: String,
    pub check_in: String,
    pub check_out: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guests: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo_code: Option<String>,
}

impl Validate for PriceParams {}

/// Body of `POST /customers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

impl Validate for CreateCustomerRequest {
    fn validate(&self) -> Result<()> {
        check_email("email", &self.email)
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$")
            .expect("email pattern is valid")
    })
}

/// Returns true if `value` looks like an email address.
pub fn is_valid_email(value: &str) -> bool {
    !value.contains("..") && email_pattern().is_match(value)
}

fn check_email(name: &str, value: &str) -> Result<()> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(McpError::InvalidArg {
            name: name.to_string(),
            reason: format!("'{}' is not a valid email address", value),
        })
    }
}

fn check_finite(name: &str, value: Option<f64>) -> Result<()> {
    match value {
        Some(v) if !v.is_finite() => Err(McpError::InvalidArg {
            name: name.to_string(),
            reason: "Expected a finite number".to_string(),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_limit_defaults_to_ten() {
        let params: SearchPropertiesParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.limit, 10);
        assert_eq!(params, SearchPropertiesParams::default());
    }

    #[test]
    fn search_serializes_only_present_filters() {
        let params: SearchPropertiesParams =
            serde_json::from_value(json!({ "location": "Malibu, CA" })).unwrap();
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({ "location": "Malibu, CA", "limit": 10 })
        );
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("john.doe@example.com"));
        assert!(is_valid_email("a+tag@sub.example.co"));
        assert!(!is_valid_email("john.doe"));
        assert!(!is_valid_email("john@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("john doe@example.com"));
        assert!(!is_valid_email("john@example"));
        assert!(!is_valid_email("john..doe@example.com"));
    }

    #[test]
    fn create_booking_rejects_bad_email() {
        let request: CreateBookingRequest = serde_json::from_value(json!({
            "property_id": "prop_123",
            "check_in": "2023-07-15",
            "check_out": "2023-07-20",
            "guests": 4,
            "customer_info": { "name": "John Doe", "email": "not-an-email" }
        }))
        .unwrap();

        match request.validate() {
            Err(McpError::InvalidArg { name, .. }) => assert_eq!(name, "customer_info.email"),
            other => panic!("expected InvalidArg, got {:?}", other),
        }
    }

    #[test]
    fn booking_status_rejects_unknown_literal() {
        let result: std::result::Result<BookingUpdates, _> =
            serde_json::from_value(json!({ "status": "checked_out" }));
        assert!(result.is_err());

        let updates: BookingUpdates =
            serde_json::from_value(json!({ "status": "cancelled", "guests": 2 })).unwrap();
        assert_eq!(updates.status, Some(BookingStatus::Cancelled));
        assert_eq!(
            serde_json::to_value(&updates).unwrap(),
            json!({ "guests": 2, "status": "cancelled" })
        );
    }

    #[test]
    fn cancel_without_reason_is_empty_object() {
        let body = serde_json::to_value(CancelBookingRequest::default()).unwrap();
        assert_eq!(body, json!({}));
    }

    #[test]
    fn booking_snapshot_decodes() {
        let booking: Booking = serde_json::from_value(json!({
            "id": "book_789",
            "property_id": "prop_123",
            "property_name": "Luxury Beach Villa",
            "check_in": "2023-07-15",
            "check_out": "2023-07-20",
            "guests": 4,
            "status": "confirmed",
            "total_price": 1750,
            "payment_status": "paid",
            "customer": {
                "id": "cust_456",
                "name": "John Doe",
                "email": "john.doe@example.com",
                "phone": "+1-555-123-4567"
            }
        }))
        .unwrap();

        assert_eq!(booking.status, "confirmed");
        assert_eq!(booking.guests, Some(4));
        assert_eq!(booking.total_price, Some(1750.0));
        assert_eq!(booking.customer.phone.as_deref(), Some("+1-555-123-4567"));
    }

    #[test]
    fn booking_snapshot_tolerates_unexpected_shapes() {
        let booking: Booking = serde_json::from_value(json!({
            "id": "book_789",
            "status": "completed",
            "guests": null,
            "total_price": "1750.50",
            "customer": "cust_456"
        }))
        .unwrap();

        assert_eq!(booking.status, "completed");
        assert_eq!(booking.guests, None);
        assert_eq!(booking.total_price, Some(1750.5));
        assert_eq!(booking.customer, Customer::default());
        assert_eq!(booking.property_name, "");
    }

    #[test]
    fn property_snapshot_tolerates_nulls() {
        let property: Property = serde_json::from_value(json!({
            "id": "prop_123",
            "name": "Luxury Beach Villa",
            "description": null,
            "bedrooms": 3,
            "bathrooms": 2.5,
            "amenities": ["Pool", null, "Wi-Fi"],
            "images": "not-a-list"
        }))
        .unwrap();

        assert_eq!(property.description, "");
        assert_eq!(property.bedrooms, Some(3));
        assert_eq!(property.bathrooms, Some(2.5));
        assert_eq!(property.price_per_night, None);
        assert_eq!(property.amenities, vec!["Pool", "Wi-Fi"]);
    }
}
