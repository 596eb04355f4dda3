use std::time::Duration;

use serde_json::Value;

use crate::errors::AppError;

/// Responses are returned in Spanish regardless of caller locale.
const LANGUAGE: &str = "es";

/// Fields requested from the Details API; keeps the response (and the
/// billing tier) narrow.
const DETAILS_FIELDS: &str = "formatted_address,geometry,address_component";

/// Client for the Google Maps Platform HTTP APIs.
///
/// One instance is shared across all requests; it holds no key. The
/// caller passes the key per request so a missing key fails that
/// request alone.
#[derive(Clone)]
pub struct MapsClient {
    client: reqwest::Client,
    base_url: String,
}

impl MapsClient {
    /// Creates a new `MapsClient` against the given base URL.
    pub fn new(base_url: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Failed to create maps client: {}", e))
            })?;

        Ok(Self { client, base_url })
    }

    /// Places Autocomplete: predictions for a partial text input.
    pub async fn autocomplete(
        &self,
        key: &str,
        input: &str,
        session_token: Option<&str>,
    ) -> Result<Value, AppError> {
        let mut params = vec![("input", input), ("key", key), ("language", LANGUAGE)];
        if let Some(token) = session_token {
            params.push(("sessiontoken", token));
        }
        self.get_json("/maps/api/place/autocomplete/json", &params)
            .await
    }

    /// Place Details for a known place id, restricted to the fields the
    /// translator consumes.
    pub async fn details(
        &self,
        key: &str,
        place_id: &str,
        session_token: Option<&str>,
    ) -> Result<Value, AppError> {
        let mut params = vec![
            ("place_id", place_id),
            ("fields", DETAILS_FIELDS),
            ("key", key),
            ("language", LANGUAGE),
        ];
        if let Some(token) = session_token {
            params.push(("sessiontoken", token));
        }
        self.get_json("/maps/api/place/details/json", &params).await
    }

    /// Forward geocoding of a free-form address.
    pub async fn geocode(&self, key: &str, address: &str) -> Result<Value, AppError> {
        let params = [("address", address), ("key", key), ("language", LANGUAGE)];
        self.get_json("/maps/api/geocode/json", &params).await
    }

    /// Issues one GET against the given API path and parses the JSON body.
    ///
    /// Query parameters are URL-encoded by `Url::parse_with_params`, which
    /// also prevents key/value injection through caller-supplied text.
    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}{}", self.base_url, path),
            params,
        )
        .map_err(|e| AppError::Internal(format!("Failed to build URL: {}", e)))?;

        // Redact the key from logs to prevent credential exposure
        tracing::debug!("Maps API request: {}{}?key=[REDACTED]", self.base_url, path);

        let response = self.client.get(url).send().await.map_err(|e| {
            AppError::Internal(format!("Maps API request failed: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Maps API returned error {}: {}", status, error_text);
            return Err(AppError::Internal(format!(
                "Maps API returned HTTP {}",
                status
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            AppError::Internal(format!("Failed to parse Maps API response: {}", e))
        })?;

        Ok(body)
    }
}
