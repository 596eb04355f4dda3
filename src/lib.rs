//! Places Proxy API Library
//!
//! Callable HTTP endpoints proxying the Google Maps Platform APIs
//! (Places Autocomplete, Place Details, Geocoding) plus a one-shot
//! administrative self-provisioning endpoint. Each endpoint validates
//! a small payload, forwards one request upstream with the injected
//! API key, and reshapes the response into a narrow camelCase contract.
//!
//! # Modules
//!
//! - `config`: Configuration management and the fail-closed API key.
//! - `errors`: Closed error taxonomy with stable wire codes.
//! - `handlers`: HTTP request handlers.
//! - `identity`: Caller identity and the identity-provider admin client.
//! - `json_path`: Safe traversal of untrusted upstream JSON.
//! - `maps_client`: Google Maps Platform HTTP client.
//! - `models`: Request and response wire shapes.
//! - `translate`: Per-endpoint upstream response translators.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod identity;
pub mod json_path;
pub mod maps_client;
pub mod models;
pub mod translate;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::AppState;

/// Builds the callable API routes over the given state.
///
/// `main` wraps these in the deployment layers (rate limiting, body
/// limits); the health check is mounted outside them.
pub fn api_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/v1/places/autocomplete",
            post(handlers::places_autocomplete),
        )
        .route("/v1/places/details", post(handlers::places_details))
        .route("/v1/geocode", post(handlers::geocode_address))
        .route("/v1/admin/grant-self", post(handlers::grant_self_admin))
        .with_state(state)
}

/// Full application router without deployment layers; tests drive
/// this directly.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .merge(api_router(state))
}
