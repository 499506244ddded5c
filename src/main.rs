// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! TOBi API Server
//!
//! Serves the TOBi UI and the list of questionnaires live for telephone
//! interviewing today.

use std::sync::Arc;
use tobi_ui::{
    config::Config,
    logging::GcpJsonFormat,
    services::{
        ActivationEngine, AuthProvider, BimsClient, BlaiseClient, MetadataTokenIssuer,
        SurveyService,
    },
    time_utils::{Clock, SystemClock},
    AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting TOBi");

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // Credentials for BIMS, shared by every request in this instance
    let auth = Arc::new(AuthProvider::new(
        config.bims_client_id.clone(),
        Arc::new(MetadataTokenIssuer::new()?),
        clock.clone(),
    ));

    let blaise = BlaiseClient::new(config.blaise_api_url.clone())?;
    let bims = BimsClient::new(config.bims_api_url.clone())?;
    tracing::info!(
        blaise_api_url = %config.blaise_api_url,
        bims_api_url = %config.bims_api_url,
        "Upstream clients initialized"
    );

    let engine = ActivationEngine::new(auth, Arc::new(bims), clock);
    let survey_service = SurveyService::new(
        Arc::new(blaise),
        engine,
        config.vm_external_web_url.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        survey_service,
    });

    // Build router
    let app = tobi_ui::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "App is listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer().event_format(GcpJsonFormat);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tobi_ui=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
