//! Services directory records as served by the backend API.
//!
//! Field names follow the backend's camelCase JSON. Optional fields default to
//! `None` so that partially populated records still deserialize.

use serde::{Deserialize, Serialize};

/// Pin color used for locations whose service carries no color of its own.
pub const DEFAULT_PIN_COLOR: &str = "#6B7280";

/// A category of newcomer-relevant service (banking, government, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    /// Category label. Also the key of the fixed category table.
    pub name: String,
    /// Display type, e.g. `"Government Agency"`.
    #[serde(rename = "type", default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Alternate description; the backend spells the key `dewscription`.
    #[serde(rename = "dewscription", default, skip_serializing_if = "Option::is_none")]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Service {
    /// Text shown on a category card: alternate description, then
    /// description, then the name.
    #[must_use]
    pub fn display_text(&self) -> &str {
        [self.alt_description.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }
}

/// A physical site offering exactly one [`Service`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub city: String,
    pub province: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub hours: Option<String>,
    /// Website of the location, shown on the detail view.
    #[serde(default)]
    pub url: Option<String>,
    /// Foreign key into [`Service::id`]. May dangle.
    pub service_id: String,
    pub lat: f64,
    pub lng: f64,
    /// Service data the backend sometimes embeds in the record.
    #[serde(default)]
    pub service: Option<Service>,
}

impl Location {
    /// Map pin color: the embedded service's color, or [`DEFAULT_PIN_COLOR`].
    #[must_use]
    pub fn pin_color(&self) -> &str {
        self.service
            .as_ref()
            .and_then(|s| s.color.as_deref())
            .unwrap_or(DEFAULT_PIN_COLOR)
    }

    /// Service type label for list cards; `"service"` when nothing is embedded.
    #[must_use]
    pub fn type_label(&self) -> &str {
        self.service
            .as_ref()
            .and_then(|s| s.service_type.as_deref())
            .unwrap_or("service")
    }

    /// Google Maps deep link for the location's coordinates.
    #[must_use]
    pub fn maps_url(&self) -> String {
        format!("https://maps.google.com/?q={},{}", self.lat, self.lng)
    }
}

/// One entry of the signed-in user's saved-location list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLocation {
    pub location_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_deserializes_camel_case_with_embedded_service() {
        let json = serde_json::json!({
            "id": "loc-1",
            "name": "Service Canada Centre",
            "city": "Toronto",
            "province": "ON",
            "address": "25 St Clair Ave E",
            "serviceId": "gov",
            "lat": 43.688,
            "lng": -79.393,
            "service": {
                "id": "gov",
                "name": "Government Agency",
                "type": "Government Agency",
                "color": "#DC2626"
            }
        });
        let location: Location = serde_json::from_value(json).unwrap();
        assert_eq!(location.service_id, "gov");
        assert!(location.phone.is_none());
        assert_eq!(location.pin_color(), "#DC2626");
        assert_eq!(location.type_label(), "Government Agency");
    }

    #[test]
    fn location_without_service_uses_fallbacks() {
        let json = serde_json::json!({
            "id": "loc-2",
            "name": "Branch",
            "city": "Calgary",
            "province": "AB",
            "serviceId": "bank",
            "lat": 51.04,
            "lng": -114.07
        });
        let location: Location = serde_json::from_value(json).unwrap();
        assert_eq!(location.pin_color(), DEFAULT_PIN_COLOR);
        assert_eq!(location.type_label(), "service");
        assert_eq!(location.maps_url(), "https://maps.google.com/?q=51.04,-114.07");
    }

    #[test]
    fn service_reads_misspelled_alternate_description() {
        let json = serde_json::json!({
            "id": "bank",
            "name": "Bank",
            "description": "Banks",
            "dewscription": "Banks & Money Transfer"
        });
        let service: Service = serde_json::from_value(json).unwrap();
        assert_eq!(service.display_text(), "Banks & Money Transfer");
    }

    #[test]
    fn service_display_text_falls_back_to_name() {
        let service = Service {
            id: "tel".to_string(),
            name: "telecom".to_string(),
            service_type: None,
            description: Some(String::new()),
            alt_description: None,
            icon: None,
            color: None,
        };
        assert_eq!(service.display_text(), "telecom");
    }

    #[test]
    fn saved_location_uses_location_id_key() {
        let saved: SavedLocation =
            serde_json::from_value(serde_json::json!({ "locationId": "loc-9" })).unwrap();
        assert_eq!(saved.location_id, "loc-9");
    }
}
