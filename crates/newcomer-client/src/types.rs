//! Response envelopes of the services directory API.
//!
//! List endpoints wrap their payload in a single-key object. A missing key is
//! read as an empty list, matching how the backend reports "nothing yet".
//! Entries stay raw JSON here and are decoded one by one by the client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /services` → `{ "services": [...] }`
#[derive(Debug, Deserialize)]
pub struct ServicesResponse {
    #[serde(default)]
    pub services: Vec<Value>,
}

/// `GET /locations` → `{ "locations": [...] }`
#[derive(Debug, Deserialize)]
pub struct LocationsResponse {
    #[serde(default)]
    pub locations: Vec<Value>,
}

/// Body of `POST`/`DELETE /locations/save`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveRequest<'a> {
    pub location_id: &'a str,
}
