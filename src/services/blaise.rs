// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Blaise REST API client for listing installed questionnaires.

use crate::error::ServiceError;
use crate::models::Questionnaire;
use async_trait::async_trait;
use std::time::Duration;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of every questionnaire installed for CATI.
#[async_trait]
pub trait QuestionnaireSource: Send + Sync {
    async fn get_all_questionnaires(&self) -> Result<Vec<Questionnaire>, ServiceError>;
}

/// Blaise REST API client.
#[derive(Clone)]
pub struct BlaiseClient {
    http: reqwest::Client,
    base_url: String,
}

impl BlaiseClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Upstream(format!("failed building HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl QuestionnaireSource for BlaiseClient {
    /// `GET /api/v2/cati/questionnaires`
    async fn get_all_questionnaires(&self) -> Result<Vec<Questionnaire>, ServiceError> {
        let url = format!("{}/api/v2/cati/questionnaires", self.base_url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("JSON parse error: {}", e)))
    }
}
