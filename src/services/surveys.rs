// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Active survey listing.

use crate::error::ServiceError;
use crate::models::{group_by_survey, Questionnaire, Survey};
use crate::services::activation::ActivationEngine;
use crate::services::blaise::QuestionnaireSource;
use futures_util::future::join_all;
use std::sync::Arc;

/// Lists the questionnaires live for interviewing today, grouped by survey.
pub struct SurveyService {
    source: Arc<dyn QuestionnaireSource>,
    engine: ActivationEngine,
    external_web_url: String,
}

impl SurveyService {
    pub fn new(
        source: Arc<dyn QuestionnaireSource>,
        engine: ActivationEngine,
        external_web_url: impl Into<String>,
    ) -> Self {
        Self {
            source,
            engine,
            external_web_url: external_web_url.into(),
        }
    }

    /// Fetch every questionnaire, keep those active today and group them.
    ///
    /// Activation checks run concurrently, one BIMS lookup per questionnaire.
    /// They cannot fail, so only a Blaise failure aborts the listing.
    pub async fn get_surveys(&self) -> Result<Vec<Survey>, ServiceError> {
        let all_questionnaires = self.source.get_all_questionnaires().await?;

        let checks = all_questionnaires
            .iter()
            .map(|questionnaire| self.engine.is_active_today(questionnaire));
        let decisions = join_all(checks).await;

        let active: Vec<Questionnaire> = all_questionnaires
            .into_iter()
            .zip(decisions)
            .filter_map(|(questionnaire, active)| {
                tracing::info!(
                    "Active today outputted ({}) for instrument ({})",
                    active,
                    questionnaire.name
                );
                active.then_some(questionnaire)
            })
            .collect();

        tracing::info!("Retrieved active instruments, {} item/s", active.len());

        let enriched = active
            .into_iter()
            .map(|questionnaire| questionnaire.enrich(&self.external_web_url))
            .collect();

        Ok(group_by_survey(enriched))
    }
}
