use serde::Deserialize;

use crate::errors::AppError;

/// Owner identity compiled into the admin-grant endpoint. Only this
/// account may grant itself the admin role claim.
pub const OWNER_EMAIL: &str = "propietario@lugares.app";

/// Default host for the Google Maps Platform APIs. Overridable via
/// `MAPS_BASE_URL` so tests can point at a mock server.
const DEFAULT_MAPS_BASE_URL: &str = "https://maps.googleapis.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Upstream API key. Optional at boot: the service starts without it
    /// and maps requests fail closed until it is configured.
    pub maps_api_key: Option<String>,
    pub maps_base_url: String,
    pub identity_admin_url: String,
    pub identity_admin_token: String,
    pub owner_email: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            maps_api_key: std::env::var("GOOGLE_MAPS_API_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            maps_base_url: std::env::var("MAPS_BASE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .map(|url| {
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("MAPS_BASE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })
                .transpose()?
                .unwrap_or_else(|| DEFAULT_MAPS_BASE_URL.to_string()),
            identity_admin_url: std::env::var("IDENTITY_ADMIN_URL")
                .map_err(|_| anyhow::anyhow!("IDENTITY_ADMIN_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("IDENTITY_ADMIN_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("IDENTITY_ADMIN_URL must start with http:// or https://");
                    }
                    Ok(url)
                })?,
            identity_admin_token: std::env::var("IDENTITY_ADMIN_TOKEN")
                .map_err(|_| anyhow::anyhow!("IDENTITY_ADMIN_TOKEN environment variable required"))
                .and_then(|token| {
                    if token.trim().is_empty() {
                        anyhow::bail!("IDENTITY_ADMIN_TOKEN cannot be empty");
                    }
                    Ok(token)
                })?,
            owner_email: std::env::var("OWNER_EMAIL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| OWNER_EMAIL.to_string()),
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Maps base URL: {}", config.maps_base_url);
        tracing::debug!("Identity admin URL: {}", config.identity_admin_url);
        tracing::debug!(
            "Maps API key configured: {}",
            config.maps_api_key.is_some()
        );
        tracing::debug!("Server port: {}", config.port);

        Ok(config)
    }

    /// Returns the upstream API key, failing closed when it is absent.
    ///
    /// Checked once per incoming maps request rather than at boot, so a
    /// key rotated into the environment is picked up on restart and a
    /// missing key degrades only the maps endpoints.
    pub fn maps_api_key(&self) -> Result<&str, AppError> {
        self.maps_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                AppError::FailedPrecondition(
                    "Missing GOOGLE_MAPS_API_KEY configuration".to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(key: Option<&str>) -> Config {
        Config {
            port: 3000,
            maps_api_key: key.map(str::to_string),
            maps_base_url: DEFAULT_MAPS_BASE_URL.to_string(),
            identity_admin_url: "https://identity.example.com".to_string(),
            identity_admin_token: "token".to_string(),
            owner_email: OWNER_EMAIL.to_string(),
        }
    }

    #[test]
    fn missing_key_is_failed_precondition() {
        let config = test_config(None);
        match config.maps_api_key() {
            Err(AppError::FailedPrecondition(_)) => {}
            other => panic!("expected FailedPrecondition, got {:?}", other),
        }
    }

    #[test]
    fn empty_key_is_failed_precondition() {
        let config = test_config(Some(""));
        assert!(config.maps_api_key().is_err());
    }

    #[test]
    fn present_key_is_returned() {
        let config = test_config(Some("secret"));
        assert_eq!(config.maps_api_key().unwrap(), "secret");
    }
}
