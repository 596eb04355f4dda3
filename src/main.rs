use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use places_proxy_api::config::Config;
use places_proxy_api::handlers::AppState;
use places_proxy_api::identity::IdentityAdminClient;
use places_proxy_api::maps_client::MapsClient;
use places_proxy_api::{api_router, handlers};

/// Main entry point for the application.
///
/// Initializes logging and configuration, constructs the upstream
/// clients once, and serves the router with the deployment middleware
/// (rate limiting, body limits, CORS, request tracing).
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "places_proxy_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Upstream clients are built once and shared across requests
    let maps = MapsClient::new(config.maps_base_url.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize maps client: {}", e))?;
    tracing::info!("Maps client initialized: {}", config.maps_base_url);

    let identity = IdentityAdminClient::new(
        config.identity_admin_url.clone(),
        config.identity_admin_token.clone(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to initialize identity client: {}", e))?;
    tracing::info!(
        "Identity admin client initialized: {}",
        config.identity_admin_url
    );

    let port = config.port;
    let app_state = Arc::new(AppState {
        config,
        maps,
        identity,
    });

    // Configure rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .unwrap(),
    );

    // Build protected routes with security layers
    let protected_routes = api_router(app_state).layer(
        ServiceBuilder::new()
            // Request size limit: payloads here are tiny; 64KB is generous
            .layer(RequestBodyLimitLayer::new(64 * 1024))
            .layer(GovernorLayer {
                config: governor_conf,
            }),
    );

    // Build final app with health check (bypasses rate limiting)
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
