// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Survey grouping served to the UI.

use super::EnrichedQuestionnaire;
use serde::Serialize;
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Active questionnaires belonging to one survey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Survey {
    /// Survey TLA, e.g. `OPN`
    pub survey: String,
    pub questionnaires: Vec<EnrichedQuestionnaire>,
}

/// Group questionnaires by survey TLA in a single pass.
///
/// Groups appear in first-seen order; questionnaires keep their input order.
pub fn group_by_survey(questionnaires: Vec<EnrichedQuestionnaire>) -> Vec<Survey> {
    let mut surveys: Vec<Survey> = Vec::new();
    let mut index_by_tla: HashMap<String, usize> = HashMap::new();

    for questionnaire in questionnaires {
        match index_by_tla.get(&questionnaire.survey_tla) {
            Some(&index) => surveys[index].questionnaires.push(questionnaire),
            None => {
                index_by_tla.insert(questionnaire.survey_tla.clone(), surveys.len());
                surveys.push(Survey {
                    survey: questionnaire.survey_tla.clone(),
                    questionnaires: vec![questionnaire],
                });
            }
        }
    }

    surveys
}
