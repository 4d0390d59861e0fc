mod aggregator;
mod config;
mod errors;
mod handlers;
mod models;
mod normalize;
mod verification;
mod wizard;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::aggregator::AggregatorClient;
use crate::config::Config;

/// Main entry point for the application.
///
/// Initializes tracing, loads configuration once from the environment,
/// constructs the aggregator client, and serves the proxy routes behind
/// rate limiting, a request body limit, tracing, and permissive CORS.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_bbps_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize the aggregator client for the configured upstream mode
    let aggregator = AggregatorClient::new(config.upstream.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize aggregator client: {}", e))?;
    tracing::info!("Aggregator client initialized");

    // Build application state
    let app_state = Arc::new(handlers::AppState {
        config: config.clone(),
        aggregator,
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
    let protected_routes = Router::new()
        .route("/bbps/billers", post(handlers::list_billers))
        .route("/bbps/biller-details", post(handlers::biller_details))
        .route("/bbps/pre-enquiry", post(handlers::pre_enquiry))
        .route("/bbps/verify-payment", get(handlers::verify_payment))
        .layer(
            ServiceBuilder::new()
                // Request size limit: 1MB max payload
                .layer(RequestBodyLimitLayer::new(1024 * 1024))
                // Rate limiting: 10 req/sec per IP, burst of 20
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        );

    // Build final app with health check outside the rate limit
    let app = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
