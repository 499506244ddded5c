// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Decides whether a questionnaire is live for telephone operations today.
//!
//! Two signals are combined: Blaise's `activeToday` flag and the TO start
//! date held by BIMS. A start date in the future suppresses an otherwise
//! active questionnaire; it never activates an inactive one. When BIMS has no
//! usable start date the Blaise flag stands on its own.

use crate::models::Questionnaire;
use crate::services::auth::AuthProvider;
use crate::services::bims::{StartDateLookup, StartDateResponse};
use crate::time_utils::{parse_start_date, Clock};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// TO start date as received from BIMS, with its parsed instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartDate {
    pub raw: String,
    pub at: DateTime<Utc>,
}

/// Combine the Blaise flag with the TO start date.
pub fn is_live(active_today: bool, start_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match start_date {
        Some(at) if at > now => false,
        _ => active_today,
    }
}

/// Interpret a BIMS reply. Anything but a JSON success with a parseable
/// `tostartdate` means no start date is set.
pub fn start_date_from_response(response: &StartDateResponse) -> Option<StartDate> {
    if !response.is_success() || !response.is_json() {
        return None;
    }

    let raw = response.to_start_date()?;
    let at = parse_start_date(&raw)?;
    Some(StartDate { raw, at })
}

/// Per-questionnaire activation check backed by BIMS.
pub struct ActivationEngine {
    auth: Arc<AuthProvider>,
    lookup: Arc<dyn StartDateLookup>,
    clock: Arc<dyn Clock>,
}

impl ActivationEngine {
    pub fn new(
        auth: Arc<AuthProvider>,
        lookup: Arc<dyn StartDateLookup>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            auth,
            lookup,
            clock,
        }
    }

    /// Whether the questionnaire should be offered to interviewers today.
    ///
    /// Never fails: BIMS and credential errors degrade to "no start date".
    pub async fn is_active_today(&self, questionnaire: &Questionnaire) -> bool {
        let name = &questionnaire.name;
        let active_today = questionnaire.active_today;

        let Some(start_date) = self.to_start_date(name).await else {
            tracing::debug!(
                questionnaire = %name,
                "the instrument {} is live for TO (TO start date = Not set) (Active today = {})",
                name,
                active_today
            );
            return active_today;
        };

        let now = self.clock.now();
        if start_date.at <= now {
            tracing::debug!(
                questionnaire = %name,
                "the instrument {} is live for TO (TO start date = {}) (Active today = {})",
                name,
                start_date.raw,
                active_today
            );
            return active_today;
        }

        tracing::debug!(
            questionnaire = %name,
            "the instrument {} is not currently live for TO (TO start date = {}) (Active today = {})",
            name,
            start_date.raw,
            active_today
        );
        is_live(active_today, Some(start_date.at), now)
    }

    async fn to_start_date(&self, name: &str) -> Option<StartDate> {
        let auth_header = match self.auth.get_auth_header().await {
            Ok(header) => header,
            Err(e) => {
                tracing::error!(questionnaire = %name, error = %e, "Failed to get BIMS auth header");
                return None;
            }
        };

        let response = match self.lookup.get_start_date(name, &auth_header).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(questionnaire = %name, error = %e, "BIMS request failed");
                return None;
            }
        };

        if response.is_success() {
            tracing::debug!(
                "The BIMS request responded with a status of {} and a body of {}",
                response.status,
                response.body
            );
        } else {
            tracing::error!(
                "The BIMS request responded with a status of {} and a body of {}",
                response.status,
                response.body
            );
        }

        start_date_from_response(&response)
    }
}
