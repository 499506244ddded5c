// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Questionnaire model as read from Blaise and as served to the UI.

use crate::field_period::field_period_to_text;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Layout used by CATI interviewers when opening a questionnaire.
const INTERVIEWER_LAYOUT_SET: &str = "CATI-Interviewer_Large";

/// Questionnaire installed on the Blaise server park.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    /// Questionnaire name, e.g. `OPN2004A`
    pub name: String,
    /// When the questionnaire was installed (passed through as received)
    #[serde(default)]
    pub install_date: String,
    /// Server park hosting the questionnaire
    #[serde(default)]
    pub server_park_name: String,
    /// Blaise's own view of whether the questionnaire is live today
    #[serde(default)]
    pub active_today: bool,
}

impl Questionnaire {
    /// Three-letter acronym of the owning survey.
    ///
    /// Names shorter than three characters yield whatever is available.
    pub fn survey_tla(&self) -> String {
        self.name.chars().take(3).collect()
    }

    /// Attach the display fields for an active questionnaire.
    pub fn enrich(self, external_web_url: &str) -> EnrichedQuestionnaire {
        let link = format!(
            "https://{}/{}?LayoutSet={}",
            external_web_url, self.name, INTERVIEWER_LAYOUT_SET
        );

        EnrichedQuestionnaire {
            survey_tla: self.survey_tla(),
            field_period: field_period_to_text(&self.name),
            link,
            questionnaire: self,
        }
    }
}

/// Active questionnaire with the fields the UI displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedQuestionnaire {
    #[serde(flatten)]
    pub questionnaire: Questionnaire,
    #[serde(rename = "surveyTLA")]
    pub survey_tla: String,
    pub link: String,
    pub field_period: String,
}
