//! Shared fixtures for integration tests.

#![allow(dead_code)]

use serde_json::{json, Map, Value as JsonValue};
use stay_mcp::{StayClient, StayConfig};
use wiremock::MockServer;

pub const API_KEY: &str = "sk_test_123";

/// Client pointed at the mock server's `/v1` prefix.
pub fn client_for(server: &MockServer) -> StayClient {
    let config = StayConfig::new(&format!("{}/v1", server.uri()), Some(API_KEY.into())).unwrap();
    StayClient::new(&config).unwrap()
}

/// Client pointed at a port nothing listens on.
pub fn unreachable_client() -> StayClient {
    let config = StayConfig::new("http://127.0.0.1:9/v1", Some(API_KEY.into())).unwrap();
    StayClient::new(&config).unwrap()
}

pub fn args(value: JsonValue) -> Map<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        _ => panic!("tool arguments must be an object"),
    }
}

pub fn beach_villa() -> JsonValue {
    json!({
        "id": "prop_123",
        "name": "Luxury Beach Villa",
        "location": "Malibu, CA",
        "description": "Beautiful beachfront villa with stunning ocean views.",
        "price_per_night": 350,
        "bedrooms": 3,
        "bathrooms": 2,
        "max_guests": 6,
        "amenities": ["Pool", "Wi-Fi", "Kitchen", "Beach Access", "Air Conditioning"],
        "images": [
            "https://example.com/beach-villa-1.jpg",
            "https://example.com/beach-villa-2.jpg"
        ],
        "rating": 4.8,
        "reviews_count": 24
    })
}

pub fn search_results() -> JsonValue {
    json!({
        "properties": [
            {
                "id": "prop_123",
                "name": "Luxury Beach Villa",
                "location": "Malibu, CA",
                "price_per_night": 350,
                "bedrooms": 3,
                "bathrooms": 2,
                "max_guests": 6,
                "thumbnail": "https://example.com/beach-villa.jpg"
            },
            {
                "id": "prop_456",
                "name": "Downtown Loft",
                "location": "New York, NY",
                "price_per_night": 250,
                "bedrooms": 1,
                "bathrooms": 1,
                "max_guests": 2,
                "thumbnail": "https://example.com/downtown-loft.jpg"
            }
        ],
        "total": 2,
        "page": 1,
        "limit": 10
    })
}

pub fn confirmed_booking() -> JsonValue {
    json!({
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
    })
}

pub fn john_doe() -> JsonValue {
    json!({
        "id": "cust_456",
        "name": "John Doe",
        "email": "john.doe@example.com",
        "phone": "+1-555-123-4567",
        "address": {
            "street": "123 Main St",
            "city": "Los Angeles",
            "state": "CA",
            "postal_code": "90001",
            "country": "USA"
        }
    })
}
