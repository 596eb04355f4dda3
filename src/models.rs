use serde::{Deserialize, Serialize};

// ============ Request Payloads ============
//
// Required fields are deserialized as Option so missing values surface
// as `invalid-argument` from the handlers instead of a framework-level
// deserialization error.

/// Payload for the autocomplete endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteRequest {
    /// Partial text the user has typed. Required, non-empty.
    pub input: Option<String>,
    /// Optional billing session token forwarded to the upstream API.
    pub session_token: Option<String>,
}

/// Payload for the place details endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsRequest {
    /// Place identifier from a previous autocomplete result. Required.
    pub place_id: Option<String>,
    /// Optional billing session token forwarded to the upstream API.
    pub session_token: Option<String>,
}

/// Payload for the geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeRequest {
    /// Free-form address to geocode. Required, non-empty.
    pub address: Option<String>,
}

// ============ Response Shapes ============
//
// All output fields are camelCase; upstream snake_case names never
// leak into these shapes.

/// A single autocomplete prediction. Both fields are guaranteed
/// non-empty; entries that fail that constraint are dropped upstream
/// of serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub place_id: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AutocompleteResponse {
    pub predictions: Vec<Prediction>,
}

/// Narrow details shape. Every field is independently nullable: the
/// upstream may omit any of them and the caller handles each absence
/// on its own.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    pub formatted_address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub city: Option<String>,
}

/// Geocoding result. Coordinates are mandatory here; a response
/// without numeric lat/lng is an error, never a null pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub lat: f64,
    pub lng: f64,
}

/// Response for the self-provisioning admin grant.
#[derive(Debug, Clone, Serialize)]
pub struct AdminGrantResponse {
    pub ok: bool,
}
