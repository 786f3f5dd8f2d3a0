use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use chantier_dispatch::Dispatcher;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chantier_api::config::ApiConfig;
use chantier_api::router::create_router;
use chantier_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "chantier_api=info,chantier_dispatch=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();
    let config = api_config.load_layered().context("Failed to load configuration")?;

    tracing::info!(
        port = api_config.port,
        storage = ?config.storage.value,
        data_dir = %config.data_dir.value.display(),
        cache = config.cache.value,
        reassign_policy = ?config.reassign_policy.value,
        "Starting Chantier API server"
    );

    let dispatcher = Dispatcher::from_config(&config).with_context(|| {
        format!(
            "Failed to open store at {} (run `chantier init` to create it)",
            config.data_dir.value.display()
        )
    })?;

    let state = Arc::new(AppState::new(dispatcher));

    let origin = api_config
        .cors_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid CORS origin: {}", api_config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let app = create_router(state).layer(cors);

    let addr = api_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Listening on {}", addr);
    tracing::info!("CORS enabled for {}", api_config.cors_origin);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
