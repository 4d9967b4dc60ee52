//! Read-only resources.
//!
//! Two URI templates, `property://{id}` and `booking://{id}`, render a remote
//! entity as Markdown. A failed fetch is reported in the resource body rather
//! than as a protocol error.

use std::fmt::{self, Write as _};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::client::StayClient;
use crate::error::{McpError, Result};
use crate::models::{Booking, Property};

/// A templated resource advertised via `resources/templates/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTemplate {
    /// RFC 6570 URI template
    #[serde(rename = "uriTemplate")]
    pub uri_template: String,
    /// Short name
    pub name: String,
    /// What the resource renders
    pub description: String,
    /// Media type of the rendered text
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// One rendered resource body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceContents {
    /// The URI that was read
    pub uri: String,
    /// Markdown, or the error text when rendering failed
    pub text: String,
}

/// Envelope returned from `resources/read`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadResourceResult {
    /// Always exactly one entry
    pub contents: Vec<ResourceContents>,
}

/// Entity kinds addressable by URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// `property://{id}`
    Property,
    /// `booking://{id}`
    Booking,
}

/// All resource templates.
pub fn templates() -> Vec<ResourceTemplate> {
    vec![
        ResourceTemplate {
            uri_template: "property://{id}".to_string(),
            name: "property".to_string(),
            description: "Property overview: location, nightly price, rooms, description \
                          and amenities"
                .to_string(),
            mime_type: "text/markdown".to_string(),
        },
        ResourceTemplate {
            uri_template: "booking://{id}".to_string(),
            name: "booking".to_string(),
            description: "Booking summary: dates, guests, status, customer and payment"
                .to_string(),
            mime_type: "text/markdown".to_string(),
        },
    ]
}

/// Split a resource URI into its kind and id.
pub fn parse_uri(uri: &str) -> Result<(ResourceKind, &str)> {
    let (kind, id) = if let Some(id) = uri.strip_prefix("property://") {
        (ResourceKind::Property, id)
    } else if let Some(id) = uri.strip_prefix("booking://") {
        (ResourceKind::Booking, id)
    } else {
        return Err(McpError::UnknownResource(uri.to_string()));
    };

    if id.is_empty() || id.contains('/') {
        return Err(McpError::UnknownResource(uri.to_string()));
    }
    Ok((kind, id))
}

/// Dereference a resource URI.
///
/// Only an unrecognised URI is an error; fetch and decode failures become the
/// body text `Error retrieving <kind>: <message>`.
pub async fn read(client: &StayClient, uri: &str) -> Result<ReadResourceResult> {
    let (kind, id) = parse_uri(uri)?;
    debug!(uri = uri, "Resource read");

    let text = match kind {
        ResourceKind::Property => fetch_property(client, id)
            .await
            .map(|p| render_property(&p))
            .unwrap_or_else(|e| format!("Error retrieving property: {}", e)),
        ResourceKind::Booking => fetch_booking(client, id)
            .await
            .map(|b| render_booking(&b))
            .unwrap_or_else(|e| format!("Error retrieving booking: {}", e)),
    };

    Ok(ReadResourceResult {
        contents: vec![ResourceContents {
            uri: uri.to_string(),
            text,
        }],
    })
}

async fn fetch_property(client: &StayClient, id: &str) -> Result<Property> {
    let value: JsonValue = client.get_property(id).await?;
    Ok(serde_json::from_value(value)?)
}

async fn fetch_booking(client: &StayClient, id: &str) -> Result<Booking> {
    let value: JsonValue = client.get_booking(id).await?;
    Ok(serde_json::from_value(value)?)
}

/// Render a property as Markdown.
pub fn render_property(property: &Property) -> String {
    format!(
        "# {name}\n\
         \n\
         **Location:** {location}\n\
         **Price:** ${price} per night\n\
         **Bedrooms:** {bedrooms}\n\
         **Bathrooms:** {bathrooms}\n\
         **Max Guests:** {max_guests}\n\
         \n\
         ## Description\n\
         {description}\n\
         \n\
         ## Amenities\n\
         {amenities}\n\
         \n\
         ## Availability\n\
         Check availability using the check_availability tool.\n",
        name = property.name,
        location = property.location,
        price = show(property.price_per_night),
        bedrooms = show(property.bedrooms),
        bathrooms = show(property.bathrooms),
        max_guests = show(property.max_guests),
        description = property.description,
        amenities = property.amenities.join(", "),
    )
}

/// Render a booking as Markdown.
///
/// The phone line is left blank when the customer has no phone number.
pub fn render_booking(booking: &Booking) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Booking #{}", booking.id);
    out.push('\n');
    let _ = writeln!(out, "**Property:** {}", booking.property_name);
    let _ = writeln!(out, "**Check-in:** {}", booking.check_in);
    let _ = writeln!(out, "**Check-out:** {}", booking.check_out);
    let _ = writeln!(out, "**Guests:** {}", show(booking.guests));
    let _ = writeln!(out, "**Status:** {}", booking.status);
    out.push('\n');
    out.push_str("## Customer\n");
    let _ = writeln!(out, "**Name:** {}", booking.customer.name);
    let _ = writeln!(out, "**Email:** {}", booking.customer.email);
    match booking.customer.phone.as_deref().filter(|p| !p.is_empty()) {
        Some(phone) => {
            let _ = writeln!(out, "**Phone:** {}", phone);
        }
        None => out.push('\n'),
    }
    out.push('\n');
    out.push_str("## Payment\n");
    let _ = writeln!(out, "**Total:** ${}", show(booking.total_price));
    let _ = writeln!(out, "**Status:** {}", booking.payment_status);
    out
}

/// Absent numbers render as an empty value.
fn show<T: fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Customer;

    fn villa() -> Property {
        Property {
            id: "prop_123".into(),
            name: "Luxury Beach Villa".into(),
            location: "Malibu, CA".into(),
            price_per_night: Some(350.0),
            bedrooms: Some(3),
            bathrooms: Some(2.0),
            max_guests: Some(6),
            description: "Beautiful beachfront villa with stunning ocean views.".into(),
            amenities: vec![
                "Pool".into(),
                "Wi-Fi".into(),
                "Kitchen".into(),
                "Beach Access".into(),
                "Air Conditioning".into(),
            ],
        }
    }

    fn booking(phone: Option<&str>) -> Booking {
        Booking {
            id: "book_789".into(),
            property_name: "Luxury Beach Villa".into(),
            check_in: "2023-07-15".into(),
            check_out: "2023-07-20".into(),
            guests: Some(4),
            status: "confirmed".into(),
            total_price: Some(1750.0),
            payment_status: "paid".into(),
            customer: Customer {
                id: "cust_456".into(),
                name: "John Doe".into(),
                email: "john.doe@example.com".into(),
                phone: phone.map(str::to_string),
                address: None,
            },
        }
    }

    #[test]
    fn property_markdown_layout() {
        let text = render_property(&villa());
        assert!(text.starts_with("# Luxury Beach Villa\n\n"));
        assert!(text.contains("\n**Location:** Malibu, CA\n"));
        assert!(text.contains("\n**Price:** $350 per night\n"));
        assert!(text.contains("\n**Bathrooms:** 2\n"));
        assert!(text.contains("\n**Max Guests:** 6\n"));
        assert!(text.contains(
            "\n## Amenities\nPool, Wi-Fi, Kitchen, Beach Access, Air Conditioning\n"
        ));
        assert!(text.ends_with("Check availability using the check_availability tool.\n"));
    }

    #[test]
    fn fractional_price_is_kept() {
        let mut property = villa();
        property.price_per_night = Some(199.5);
        assert!(render_property(&property).contains("**Price:** $199.5 per night"));
    }

    #[test]
    fn property_with_gaps_still_renders() {
        let property: Property = serde_json::from_value(serde_json::json!({
            "id": "prop_123",
            "name": "Luxury Beach Villa",
            "description": null,
            "price_per_night": 350
        }))
        .unwrap();
        let text = render_property(&property);
        assert!(text.contains("**Price:** $350 per night\n**Bedrooms:** \n"));
        assert!(text.contains("## Description\n\n"));
    }

    #[test]
    fn booking_keeps_unlisted_status() {
        let mut booking = booking(None);
        booking.status = "completed".into();
        assert!(render_booking(&booking).contains("**Status:** completed\n"));
    }

    #[test]
    fn booking_markdown_with_phone() {
        let text = render_booking(&booking(Some("+1-555-123-4567")));
        assert_eq!(
            text,
            "# Booking #book_789\n\
             \n\
             **Property:** Luxury Beach Villa\n\
             **Check-in:** 2023-07-15\n\
             **Check-out:** 2023-07-20\n\
             **Guests:** 4\n\
             **Status:** confirmed\n\
             \n\
             ## Customer\n\
             **Name:** John Doe\n\
             **Email:** john.doe@example.com\n\
             **Phone:** +1-555-123-4567\n\
             \n\
             ## Payment\n\
             **Total:** $1750\n\
             **Status:** paid\n"
        );
    }

    #[test]
    fn booking_markdown_without_phone_keeps_blank_line() {
        let text = render_booking(&booking(None));
        assert!(!text.contains("**Phone:**"));
        assert!(text.contains("**Email:** john.doe@example.com\n\n\n## Payment\n"));
    }

    #[test]
    fn parses_known_uris() {
        assert_eq!(
            parse_uri("property://prop_123").unwrap(),
            (ResourceKind::Property, "prop_123")
        );
        assert_eq!(
            parse_uri("booking://book_789").unwrap(),
            (ResourceKind::Booking, "book_789")
        );
    }

    #[test]
    fn rejects_unknown_uris() {
        for uri in ["customer://cust_456", "property://", "booking://a/b", "prop_123"] {
            assert!(
                matches!(parse_uri(uri), Err(McpError::UnknownResource(_))),
                "{} should be rejected",
                uri
            );
        }
    }

    #[test]
    fn templates_list_both_entities() {
        let names: Vec<String> = templates().into_iter().map(|t| t.uri_template).collect();
        assert_eq!(names, vec!["property://{id}", "booking://{id}"]);
    }
}
