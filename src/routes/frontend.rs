// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Serves the built UI.
//!
//! `index.html` is a template: the client URL and the CATI dashboard URL are
//! substituted at request time so one build works in every environment.

use crate::config::Config;
use crate::error::Result;
use crate::AppState;
use anyhow::Context;
use axum::{extract::State, response::Html, Router};
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;

const CLIENT_URL_PLACEHOLDER: &str = "<%= VM_EXTERNAL_CLIENT_URL %>";
const DASHBOARD_URL_PLACEHOLDER: &str = "<%= CATI_DASHBOARD_URL %>";

/// Static assets under `/static`, `index.html` for everything else.
pub fn routes(build_folder: &Path) -> Router<Arc<AppState>> {
    Router::new()
        .nest_service("/static", ServeDir::new(build_folder.join("static")))
        .fallback(render_index)
}

async fn render_index(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let path = state.config.build_folder.join("index.html");
    let template = tokio::fs::read_to_string(&path)
        .await
        .with_context(|| format!("failed reading {}", path.display()))?;

    Ok(Html(render_template(&template, &state.config)))
}

fn render_template(template: &str, config: &Config) -> String {
    template
        .replace(CLIENT_URL_PLACEHOLDER, &config.vm_external_client_url)
        .replace(DASHBOARD_URL_PLACEHOLDER, &config.cati_dashboard_url())
}
