// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! TOBi: Telephone Operations Blaise interface
//!
//! This crate provides the backend that lists the Blaise questionnaires live
//! for telephone interviewing today, combining Blaise's own activity flag
//! with the TO start dates held in BIMS.

pub mod config;
pub mod error;
pub mod field_period;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::SurveyService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub survey_service: SurveyService,
}
