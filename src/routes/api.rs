// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON API consumed by the UI.

use crate::error::Result;
use crate::models::Survey;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/questionnaires", get(get_questionnaires))
}

/// Questionnaires live for interviewing today, grouped by survey.
async fn get_questionnaires(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Survey>>> {
    tracing::debug!("get list of items");

    match state.survey_service.get_surveys().await {
        Ok(surveys) => Ok(Json(surveys)),
        Err(e) => {
            tracing::error!(error = %e, "Failed to retrieve instrument list");
            Err(e.into())
        }
    }
}
