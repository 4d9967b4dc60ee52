//! Stay AI gateway client.
//!
//! One method per remote operation, each issuing exactly one HTTP request
//! through a shared `reqwest::Client`. Transport failures are interpreted in a
//! single place ([`StayClient::send`]) and then labelled with the operation
//! that failed.

use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde_json::Value as JsonValue;
use tracing::{debug, error};
use url::Url;

use crate::config::StayConfig;
use crate::error::{McpError, Result};
use crate::models::{
    AvailabilityParams, BookingUpdates, CancelBookingRequest, CreateBookingRequest,
    CreateCustomerRequest, PriceParams, SearchPropertiesParams,
};

/// Normalized failure produced by the response interceptor.
#[derive(Debug)]
struct ApiFailure(String);

impl ApiFailure {
    fn during(self, operation: &'static str) -> McpError {
        McpError::Remote {
            operation,
            message: self.0,
        }
    }
}

/// Client for the Stay AI REST API.
///
/// Cheap to clone; clones share the connection pool and configuration.
#[derive(Debug, Clone)]
pub struct StayClient {
    http: Client,
    base_url: Url,
}

impl StayClient {
    /// Create a client with JSON and bearer-token default headers.
    pub fn new(config: &StayConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| McpError::Config("API key contains invalid header characters".into()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("stay-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| McpError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── Properties ───────────────────────────────────────────────────────

    /// `GET /properties` with the given filters.
    pub async fn search_properties(&self, params: &SearchPropertiesParams) -> Result<JsonValue> {
        let request = self.request(Method::GET, &["properties"]).query(params);
        self.send(request)
            .await
            .map_err(|e| e.during("search properties"))
    }

    /// `GET /properties/{id}`.
    pub async fn get_property(&self, property_id: &str) -> Result<JsonValue> {
        let request = self.request(Method::GET, &["properties", property_id]);
        self.send(request)
            .await
            .map_err(|e| e.during("get property details"))
    }

    // ── Bookings ─────────────────────────────────────────────────────────

    /// `POST /bookings`.
    pub async fn create_booking(&self, booking: &CreateBookingRequest) -> Result<JsonValue> {
        let request = self.request(Method::POST, &["bookings"]).json(booking);
        self.send(request)
            .await
            .map_err(|e| e.during("create booking"))
    }

    /// `GET /bookings/{id}`.
    pub async fn get_booking(&self, booking_id: &str) -> Result<JsonValue> {
        let request = self.request(Method::GET, &["bookings", booking_id]);
        self.send(request).await.map_err(|e| e.during("get booking"))
    }

    /// `PATCH /bookings/{id}` with only the supplied fields.
    pub async fn update_booking(
        &self,
        booking_id: &str,
        updates: &BookingUpdates,
    ) -> Result<JsonValue> {
        let request = self
            .request(Method::PATCH, &["bookings", booking_id])
            .json(updates);
        self.send(request)
            .await
            .map_err(|e| e.during("update booking"))
    }

    /// `POST /bookings/{id}/cancel` with an optional reason.
    pub async fn cancel_booking(&self, booking_id: &str, reason: Option<String>) -> Result<JsonValue> {
        let body = CancelBookingRequest { reason };
        let request = self
            .request(Method::POST, &["bookings", booking_id, "cancel"])
            .json(&body);
        self.send(request)
            .await
            .map_err(|e| e.during("cancel booking"))
    }

    // ── Availability & pricing ───────────────────────────────────────────

    /// `GET /availability`.
    pub async fn check_availability(&self, params: &AvailabilityParams) -> Result<JsonValue> {
        let request = self.request(Method::GET, &["availability"]).query(params);
        self.send(request)
            .await
            .map_err(|e| e.during("check availability"))
    }

    /// `POST /calculate-price`.
    pub async fn calculate_price(&self, params: &PriceParams) -> Result<JsonValue> {
        let request = self.request(Method::POST, &["calculate-price"]).json(params);
        self.send(request)
            .await
            .map_err(|e| e.during("calculate price"))
    }

    // ── Customers ────────────────────────────────────────────────────────

    /// `POST /customers`.
    pub async fn create_customer(&self, customer: &CreateCustomerRequest) -> Result<JsonValue> {
        let request = self.request(Method::POST, &["customers"]).json(customer);
        self.send(request)
            .await
            .map_err(|e| e.during("create customer"))
    }

    /// `GET /customers/{id}`.
    pub async fn get_customer(&self, customer_id: &str) -> Result<JsonValue> {
        let request = self.request(Method::GET, &["customers", customer_id]);
        self.send(request)
            .await
            .map_err(|e| e.during("get customer"))
    }

    // ── Transport ────────────────────────────────────────────────────────

    /// Build a request whose path is the base path followed by `segments`.
    ///
    /// Each segment is percent-encoded, so ids cannot escape their position.
    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = endpoint(&self.base_url, segments);
        debug!(method = %method, url = %url, "Stay AI request");
        self.http.request(method, url)
    }

    /// Send a request and decode its JSON body.
    ///
    /// This is the only place transport errors are interpreted: a non-success
    /// status yields the body's `message` field when present, a network
    /// failure yields the transport error text.
    async fn send(&self, request: RequestBuilder) -> std::result::Result<JsonValue, ApiFailure> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(intercept(e.to_string())),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Err(intercept(e.to_string())),
        };

        if !status.is_success() {
            return Err(intercept(failure_message(status, &body)));
        }

        if body.trim().is_empty() {
            return Ok(JsonValue::Null);
        }
        serde_json::from_str(&body)
            .map_err(|e| intercept(format!("Invalid JSON in response: {}", e)))
    }
}

fn intercept(message: String) -> ApiFailure {
    error!("Stay AI API Error: {}", message);
    ApiFailure(message)
}

/// Message for a non-success response: the body's `message` string, or the
/// status line when the body carries none.
fn failure_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .filter(|m| !m.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("Request failed with status code {}", status.as_u16()))
}

fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    // StayConfig rejects cannot-be-a-base URLs, so this always succeeds.
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.stay.ai/v1").unwrap()
    }

    #[test]
    fn endpoint_appends_to_base_path() {
        assert_eq!(
            endpoint(&base(), &["properties", "prop_123"]).as_str(),
            "https://api.stay.ai/v1/properties/prop_123"
        );
        let trailing = Url::parse("https://api.stay.ai/v1/").unwrap();
        assert_eq!(
            endpoint(&trailing, &["calculate-price"]).as_str(),
            "https://api.stay.ai/v1/calculate-price"
        );
    }

    #[test]
    fn endpoint_encodes_ids() {
        assert_eq!(
            endpoint(&base(), &["bookings", "../admin", "cancel"]).as_str(),
            "https://api.stay.ai/v1/bookings/..%2Fadmin/cancel"
        );
    }

    #[test]
    fn failure_message_prefers_body_message() {
        assert_eq!(
            failure_message(StatusCode::NOT_FOUND, r#"{"message":"Property not found"}"#),
            "Property not found"
        );
    }

    #[test]
    fn failure_message_falls_back_to_status() {
        assert_eq!(
            failure_message(StatusCode::BAD_GATEWAY, "<html>upstream</html>"),
            "Request failed with status code 502"
        );
        assert_eq!(
            failure_message(StatusCode::UNAUTHORIZED, r#"{"error":"nope"}"#),
            "Request failed with status code 401"
        );
    }

    #[test]
    fn failure_is_labelled_with_operation() {
        let err = ApiFailure("Invalid API key".into()).during("search properties");
        assert_eq!(
            err.to_string(),
            "Failed to search properties: Invalid API key"
        );
    }

    #[test]
    fn rejects_api_key_with_newline() {
        let config = StayConfig::new("https://api.stay.ai/v1", Some("abc\ndef".into())).unwrap();
        assert!(matches!(StayClient::new(&config), Err(McpError::Config(_))));
    }
}
