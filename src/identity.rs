use std::time::Duration;

use axum::http::HeaderMap;
use serde_json::json;

use crate::errors::AppError;

/// Header carrying the verified caller uid, injected by the platform's
/// auth proxy in front of this service.
pub const UID_HEADER: &str = "x-auth-uid";
/// Header carrying the verified caller email.
pub const EMAIL_HEADER: &str = "x-auth-email";

/// Verified identity of the calling user.
///
/// Token verification is owned by the platform; by the time a request
/// reaches a handler the identity is already authenticated and exposed
/// as trusted headers. Both headers must be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerIdentity {
    pub uid: String,
    pub email: String,
}

impl CallerIdentity {
    /// Extracts the caller identity from the trusted auth headers.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, AppError> {
        let uid = headers
            .get(UID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty());
        let email = headers
            .get(EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.is_empty());

        match (uid, email) {
            (Some(uid), Some(email)) => Ok(Self {
                uid: uid.to_string(),
                email: email.to_string(),
            }),
            _ => Err(AppError::Unauthenticated(
                "Caller must be authenticated".to_string(),
            )),
        }
    }
}

/// Client for the identity provider's administrative API.
#[derive(Clone)]
pub struct IdentityAdminClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl IdentityAdminClient {
    /// Creates a new `IdentityAdminClient`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the identity admin API.
    /// * `token` - The admin API token for authentication.
    pub fn new(base_url: String, token: String) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Failed to create identity client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Sets a custom role claim on a user record.
    ///
    /// Idempotent: re-applying the same claim is a no-op on the
    /// provider side.
    pub async fn set_role_claim(&self, uid: &str, role: &str) -> Result<(), AppError> {
        let url = format!("{}/admin/v1/users/{}/claims", self.base_url, uid);
        tracing::info!("Setting role claim '{}' for uid {}", role, uid);

        let body = json!({
            "claims": {
                "role": role,
            }
        });

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to set role claim: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!("Identity admin API returned {}: {}", status, error_text);
            return Err(AppError::Internal(format!(
                "Identity admin API returned {}",
                status
            )));
        }

        tracing::info!("Role claim set for uid {}", uid);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn identity_from_complete_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(UID_HEADER, HeaderValue::from_static("uid-1"));
        headers.insert(EMAIL_HEADER, HeaderValue::from_static("a@b.com"));

        let identity = CallerIdentity::from_headers(&headers).unwrap();
        assert_eq!(identity.uid, "uid-1");
        assert_eq!(identity.email, "a@b.com");
    }

    #[test]
    fn missing_headers_are_unauthenticated() {
        let headers = HeaderMap::new();
        assert!(matches!(
            CallerIdentity::from_headers(&headers),
            Err(AppError::Unauthenticated(_))
        ));

        let mut uid_only = HeaderMap::new();
        uid_only.insert(UID_HEADER, HeaderValue::from_static("uid-1"));
        assert!(CallerIdentity::from_headers(&uid_only).is_err());
    }

    #[test]
    fn empty_header_values_are_unauthenticated() {
        let mut headers = HeaderMap::new();
        headers.insert(UID_HEADER, HeaderValue::from_static(""));
        headers.insert(EMAIL_HEADER, HeaderValue::from_static("a@b.com"));
        assert!(CallerIdentity::from_headers(&headers).is_err());
    }

    #[test]
    fn client_creation() {
        let client = IdentityAdminClient::new(
            "https://identity.example.com".to_string(),
            "token".to_string(),
        );
        assert!(client.is_ok());
    }
}
