//! Decode-and-validate step between the upstream JSON and the wire
//! shapes. One translator per endpoint; all access into the untrusted
//! body goes through [`safe_get`] or checked accessors.
//!
//! Missing-coordinate policy differs on purpose: details tolerates an
//! absent location (each field nulls independently), geocoding treats
//! it as a hard failure. Callers relying on geocode output always get
//! numeric coordinates or an error.

use serde_json::Value;

use crate::errors::AppError;
use crate::json_path::safe_get;
use crate::models::{AutocompleteResponse, GeocodeResult, PlaceDetails, Prediction};

/// Coerces an upstream field to a string. Numbers are stringified;
/// anything else (objects, arrays, booleans, null) becomes empty and
/// is filtered out by the non-empty checks downstream.
fn coerce_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Translates an Autocomplete body into the narrow prediction list.
///
/// The predictions array defaults to empty when absent or malformed.
/// Entries missing either field are dropped; order is preserved.
pub fn autocomplete_response(body: &Value) -> AutocompleteResponse {
    let entries = body
        .get("predictions")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let predictions = entries
        .iter()
        .map(|entry| Prediction {
            place_id: coerce_string(safe_get(entry, &["place_id"], &Value::Null)),
            description: coerce_string(safe_get(entry, &["description"], &Value::Null)),
        })
        .filter(|p| !p.place_id.is_empty() && !p.description.is_empty())
        .collect();

    AutocompleteResponse { predictions }
}

/// Translates a Details body into [`PlaceDetails`].
///
/// Every output field is independently nullable. City is the
/// `long_name` of the first address component typed `locality`.
pub fn place_details(body: &Value) -> PlaceDetails {
    let result = safe_get(body, &["result"], &Value::Null);

    let formatted_address = result
        .get("formatted_address")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let location = safe_get(result, &["geometry", "location"], &Value::Null);
    let lat = location.get("lat").and_then(Value::as_f64);
    let lng = location.get("lng").and_then(Value::as_f64);

    let components = result
        .get("address_components")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let city = components
        .iter()
        .find(|component| {
            component
                .get("types")
                .and_then(Value::as_array)
                .map(|types| types.iter().any(|t| t.as_str() == Some("locality")))
                .unwrap_or(false)
        })
        .and_then(|component| component.get("long_name"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    PlaceDetails {
        formatted_address,
        lat,
        lng,
        city,
    }
}

/// Translates a Geocoding body into [`GeocodeResult`].
///
/// Takes the first entry of `results`. Unlike [`place_details`], a
/// missing or non-numeric coordinate pair is a hard failure even when
/// the upstream status was OK.
pub fn geocode_result(body: &Value) -> Result<GeocodeResult, AppError> {
    let first = body
        .get("results")
        .and_then(Value::as_array)
        .and_then(|results| results.first())
        .unwrap_or(&Value::Null);

    let formatted_address = first
        .get("formatted_address")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let location = safe_get(first, &["geometry", "location"], &Value::Null);
    let lat = location.get("lat").and_then(Value::as_f64);
    let lng = location.get("lng").and_then(Value::as_f64);

    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(GeocodeResult {
            formatted_address,
            lat,
            lng,
        }),
        _ => Err(AppError::Internal(
            "Geocoding returned no coordinates".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn autocomplete_maps_and_filters_entries() {
        let body = json!({
            "status": "OK",
            "predictions": [
                {"place_id": "abc", "description": "Calle Mayor, Madrid"},
                {"place_id": "", "description": "missing id"},
                {"description": "no id at all"},
                {"place_id": "def"},
                {"place_id": 123, "description": "numeric id"},
                "not-an-object",
                {"place_id": "ghi", "description": "Gran Vía, Madrid"}
            ]
        });

        let out = autocomplete_response(&body);
        assert_eq!(out.predictions.len(), 3);
        assert_eq!(out.predictions[0].place_id, "abc");
        assert_eq!(out.predictions[1].place_id, "123");
        assert_eq!(out.predictions[2].description, "Gran Vía, Madrid");
    }

    #[test]
    fn autocomplete_defaults_to_empty_on_malformed_list() {
        assert!(autocomplete_response(&json!({"status": "OK"}))
            .predictions
            .is_empty());
        assert!(
            autocomplete_response(&json!({"status": "OK", "predictions": "nope"}))
                .predictions
                .is_empty()
        );
    }

    #[test]
    fn details_extracts_all_fields() {
        let body = json!({
            "status": "OK",
            "result": {
                "formatted_address": "Calle Mayor 1, Madrid, España",
                "geometry": {"location": {"lat": 40.4167, "lng": -3.7033}},
                "address_components": [
                    {"long_name": "1", "types": ["street_number"]},
                    {"long_name": "Madrid", "types": ["locality", "political"]}
                ]
            }
        });

        let details = place_details(&body);
        assert_eq!(
            details.formatted_address.as_deref(),
            Some("Calle Mayor 1, Madrid, España")
        );
        assert_eq!(details.lat, Some(40.4167));
        assert_eq!(details.lng, Some(-3.7033));
        assert_eq!(details.city.as_deref(), Some("Madrid"));
    }

    #[test]
    fn details_without_locality_has_null_city() {
        let body = json!({
            "status": "OK",
            "result": {
                "formatted_address": "Somewhere",
                "address_components": [
                    {"long_name": "España", "types": ["country"]}
                ]
            }
        });

        let details = place_details(&body);
        assert_eq!(details.city, None);
        assert_eq!(details.lat, None);
        assert_eq!(details.lng, None);
    }

    #[test]
    fn details_ignores_non_numeric_coordinates() {
        let body = json!({
            "status": "OK",
            "result": {
                "geometry": {"location": {"lat": "40.4", "lng": -3.7}}
            }
        });

        let details = place_details(&body);
        assert_eq!(details.lat, None);
        assert_eq!(details.lng, Some(-3.7));
    }

    #[test]
    fn geocode_requires_numeric_coordinates() {
        let body = json!({"status": "OK", "results": []});
        assert!(matches!(
            geocode_result(&body),
            Err(AppError::Internal(_))
        ));

        let body = json!({
            "status": "OK",
            "results": [{"formatted_address": "x", "geometry": {"location": {"lat": "bad", "lng": 1.0}}}]
        });
        assert!(geocode_result(&body).is_err());
    }

    #[test]
    fn geocode_takes_first_result() {
        let body = json!({
            "status": "OK",
            "results": [
                {
                    "formatted_address": "Plaza de España, Sevilla",
                    "geometry": {"location": {"lat": 37.3772, "lng": -5.9869}}
                },
                {
                    "formatted_address": "elsewhere",
                    "geometry": {"location": {"lat": 0.0, "lng": 0.0}}
                }
            ]
        });

        let result = geocode_result(&body).unwrap();
        assert_eq!(
            result.formatted_address.as_deref(),
            Some("Plaza de España, Sevilla")
        );
        assert_eq!(result.lat, 37.3772);
        assert_eq!(result.lng, -5.9869);
    }

    #[test]
    fn geocode_address_may_be_null_when_coordinates_present() {
        let body = json!({
            "status": "OK",
            "results": [{"geometry": {"location": {"lat": 1.5, "lng": 2.5}}}]
        });

        let result = geocode_result(&body).unwrap();
        assert_eq!(result.formatted_address, None);
        assert_eq!(result.lat, 1.5);
    }
}
