use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::json;

use crate::config::Config;
use crate::errors::AppError;
use crate::identity::{CallerIdentity, IdentityAdminClient};
use crate::maps_client::MapsClient;
use crate::models::*;
use crate::translate;

/// Role claim granted by the self-provisioning endpoint.
const ADMIN_ROLE: &str = "admin";

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Client for the Google Maps Platform APIs.
    pub maps: MapsClient,
    /// Client for the identity provider's admin API.
    pub identity: IdentityAdminClient,
}

/// Health check endpoint.
///
/// Returns the service status and version.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "places-proxy-api",
            "version": "0.1.0"
        })),
    )
}

/// Validates a required string field: present and non-empty.
fn require_field<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, AppError> {
    value
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::InvalidArgument(format!("{} is required", name)))
}

/// Reads the upstream `status` field, defaulting to empty when absent
/// so the failure message still names what was (not) returned.
fn upstream_status(body: &serde_json::Value) -> &str {
    body.get("status").and_then(|s| s.as_str()).unwrap_or("")
}

/// POST /v1/places/autocomplete
///
/// Proxies Places Autocomplete. `ZERO_RESULTS` is a success with an
/// empty prediction list, not an error.
pub async fn places_autocomplete(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<AutocompleteRequest>,
) -> Result<Json<AutocompleteResponse>, AppError> {
    let input = require_field(payload.input.as_deref(), "input")?;
    let key = state.config.maps_api_key()?;

    let body = state
        .maps
        .autocomplete(key, input, payload.session_token.as_deref())
        .await?;

    let status = upstream_status(&body);
    if status != "OK" && status != "ZERO_RESULTS" {
        tracing::error!("placesAutocomplete upstream failure: {}", body);
        return Err(AppError::Internal(format!(
            "Places autocomplete failed: {}",
            status
        )));
    }

    Ok(Json(translate::autocomplete_response(&body)))
}

/// POST /v1/places/details
///
/// Proxies Place Details. Every output field is independently
/// nullable; a place without a locality component yields `city: null`.
pub async fn places_details(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<DetailsRequest>,
) -> Result<Json<PlaceDetails>, AppError> {
    let place_id = require_field(payload.place_id.as_deref(), "placeId")?;
    let key = state.config.maps_api_key()?;

    let body = state
        .maps
        .details(key, place_id, payload.session_token.as_deref())
        .await?;

    let status = upstream_status(&body);
    if status != "OK" {
        tracing::error!("placesDetails upstream failure: {}", body);
        return Err(AppError::Internal(format!(
            "Places details failed: {}",
            status
        )));
    }

    Ok(Json(translate::place_details(&body)))
}

/// POST /v1/geocode
///
/// Proxies forward geocoding. Unlike the details endpoint, an OK
/// response without numeric coordinates is a hard failure.
pub async fn geocode_address(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<GeocodeRequest>,
) -> Result<Json<GeocodeResult>, AppError> {
    let address = require_field(payload.address.as_deref(), "address")?;
    let key = state.config.maps_api_key()?;

    let body = state.maps.geocode(key, address).await?;

    let status = upstream_status(&body);
    if status != "OK" {
        tracing::error!("geocodeAddress upstream failure: {}", body);
        return Err(AppError::Internal(format!("Geocoding failed: {}", status)));
    }

    Ok(Json(translate::geocode_result(&body)?))
}

/// POST /v1/admin/grant-self
///
/// One-shot self-provisioning: the single configured owner identity
/// grants itself the admin role claim. The gate is email equality
/// only; uid plays no part in the check.
pub async fn grant_self_admin(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AdminGrantResponse>, AppError> {
    let caller = CallerIdentity::from_headers(&headers)?;

    if caller.email != state.config.owner_email {
        return Err(AppError::PermissionDenied(
            "Caller is not the configured owner".to_string(),
        ));
    }

    state.identity.set_role_claim(&caller.uid, ADMIN_ROLE).await?;

    tracing::info!("Admin role granted to owner uid {}", caller.uid);
    Ok(Json(AdminGrantResponse { ok: true }))
}
