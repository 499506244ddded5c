// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! BIMS client for telephone operations (TO) start dates.

use crate::error::ServiceError;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw BIMS reply; status handling is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartDateResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl StartDateResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// True for `application/json`, ignoring parameters such as charset.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|value| value.split(';').next())
            .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"))
    }

    /// The `tostartdate` field when it is a string.
    pub fn to_start_date(&self) -> Option<String> {
        let body: serde_json::Value = serde_json::from_str(&self.body).ok()?;
        body.get("tostartdate")?.as_str().map(str::to_string)
    }
}

/// Looks up the TO start date of a questionnaire.
#[async_trait]
pub trait StartDateLookup: Send + Sync {
    /// Errors only on transport failure; any HTTP status is returned as a response.
    async fn get_start_date(
        &self,
        questionnaire_name: &str,
        auth_header: &str,
    ) -> Result<StartDateResponse, ServiceError>;
}

/// BIMS API client.
#[derive(Clone)]
pub struct BimsClient {
    http: reqwest::Client,
    base_url: String,
}

impl BimsClient {
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
            .map_err(|e| ServiceError::Lookup(format!("failed building HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl StartDateLookup for BimsClient {
    /// `GET /tostartdate/{name}`
    async fn get_start_date(
        &self,
        questionnaire_name: &str,
        auth_header: &str,
    ) -> Result<StartDateResponse, ServiceError> {
        let url = format!(
            "{}/tostartdate/{}",
            self.base_url,
            urlencoding::encode(questionnaire_name)
        );

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, auth_header)
            .send()
            .await
            .map_err(|e| ServiceError::Lookup(e.to_string()))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| ServiceError::Lookup(format!("failed reading body: {e}")))?;

        Ok(StartDateResponse {
            status,
            content_type,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, content_type: Option<&str>, body: &str) -> StartDateResponse {
        StartDateResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: body.to_string(),
        }
    }

    #[test]
    fn json_content_type_detection() {
        assert!(response(200, Some("application/json"), "{}").is_json());
        assert!(response(200, Some("application/json; charset=utf-8"), "{}").is_json());
        assert!(!response(200, Some("text/html"), "{}").is_json());
        assert!(!response(200, None, "{}").is_json());
    }

    #[test]
    fn success_is_any_2xx() {
        assert!(response(200, None, "").is_success());
        assert!(response(204, None, "").is_success());
        assert!(!response(404, None, "").is_success());
        assert!(!response(500, None, "").is_success());
    }

    #[test]
    fn extracts_string_start_date() {
        let r = response(
            200,
            Some("application/json"),
            r#"{"tostartdate": "2024-03-01T00:00:00Z"}"#,
        );
        assert_eq!(r.to_start_date().as_deref(), Some("2024-03-01T00:00:00Z"));
    }

    #[test]
    fn null_or_missing_start_date_is_none() {
        assert_eq!(
            response(200, Some("application/json"), r#"{"tostartdate": null}"#).to_start_date(),
            None
        );
        assert_eq!(
            response(200, Some("application/json"), "{}").to_start_date(),
            None
        );
        assert_eq!(
            response(200, Some("application/json"), "not json").to_start_date(),
            None
        );
    }
}
