// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fieldwatch API Server
//!
//! Backs the dashboard map view: captures drawn field boundaries, forwards
//! them to the vegetation analysis service and returns styled results.

use anyhow::Context;
use fieldwatch::{
    config::Config,
    services::{AnalysisClient, FieldSession, GeocodingClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Fieldwatch API");

    let analysis_client = AnalysisClient::new(&config.analysis_api_url, config.analysis_timeout)
        .context("Failed to initialize analysis client")?;
    tracing::info!(
        endpoint = analysis_client.endpoint(),
        timeout_secs = config.analysis_timeout.map(|t| t.as_secs()),
        "Analysis client initialized"
    );

    let geocoder =
        GeocodingClient::new(&config.geocoder_url).context("Failed to initialize geocoder")?;

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        session: FieldSession::new(analysis_client),
        geocoder,
    });

    // Build router
    let app = fieldwatch::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fieldwatch=debug,info")),
        )
        .with(format)
        .init();
}
