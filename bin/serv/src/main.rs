use std::net::SocketAddr;

use axum::{Router, middleware, routing::get};
use pt_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    pt_api::tracing::init_tracing(&config.env);

    // Initialize Prometheus metrics exporter
    let metrics_handle = pt_api::metrics::init_metrics()?;

    // Connect and migrate
    let pool = pt_db::create_pool(&config.database_url, 10).await?;
    pt_db::ensure_db_and_migrate(&config.database_url, &pool).await?;

    // Initialize the application state
    let state = ApiState::new(config.clone(), pool);

    // Configure CORS with allowed origins from config
    let cors = pt_api::middleware::cors::create_cors_layer(config.parsed_allowed_origins());

    // Configure HTTP request/response tracing
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    // Metrics endpoint, kept separate from the main app
    let metrics_app = Router::new()
        .route("/metrics", get(pt_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    // Create the application router
    let app = pt_api::router::router()
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(pt_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            pt_api::middleware::request_id::request_id_middleware,
        ));

    // Apply security headers (X-Content-Type-Options, X-Frame-Options, HSTS)
    let app = pt_api::middleware::security_headers::apply_security_headers(app, config.env.clone());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server running on http://{addr}");

    // ConnectInfo is needed so the rate limiter can fall back to peer IPs
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
