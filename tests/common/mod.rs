// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared test fixtures: a local stand-in for Blaise and BIMS, and app builders.

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tobi_ui::config::Config;
use tobi_ui::error::ServiceError;
use tobi_ui::routes::create_router;
use tobi_ui::services::{
    ActivationEngine, AuthProvider, BimsClient, BlaiseClient, CredentialIssuer, SurveyService,
};
use tobi_ui::time_utils::{Clock, SystemClock};
use tobi_ui::AppState;

/// Client timeout used by the test apps; `Reply::Hang` outlasts it.
#[allow(dead_code)]
pub const CLIENT_TIMEOUT: Duration = Duration::from_millis(300);

/// Canned reply from the mock upstream.
#[allow(dead_code)]
#[derive(Clone)]
pub enum Reply {
    Json(Value),
    Html(String),
    Status(u16),
    Hang,
}

impl Reply {
    async fn respond(self) -> Response {
        match self {
            Reply::Json(value) => Json(value).into_response(),
            Reply::Html(body) => Html(body).into_response(),
            Reply::Status(code) => StatusCode::from_u16(code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
                .into_response(),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                StatusCode::OK.into_response()
            }
        }
    }
}

#[derive(Clone)]
struct UpstreamState {
    questionnaires: Reply,
    start_dates: HashMap<String, Reply>,
    seen_auth: Arc<Mutex<Vec<String>>>,
}

/// Mock Blaise + BIMS server on an ephemeral port.
#[allow(dead_code)]
pub struct Upstream {
    pub base_url: String,
    pub seen_auth: Arc<Mutex<Vec<String>>>,
}

/// Serve `/api/v2/cati/questionnaires` and `/tostartdate/{name}`.
/// Names without a start-date reply get a 404.
#[allow(dead_code)]
pub async fn spawn_upstream(questionnaires: Reply, start_dates: &[(&str, Reply)]) -> Upstream {
    let seen_auth = Arc::new(Mutex::new(Vec::new()));
    let state = UpstreamState {
        questionnaires,
        start_dates: start_dates
            .iter()
            .map(|(name, reply)| (name.to_string(), reply.clone()))
            .collect(),
        seen_auth: seen_auth.clone(),
    };

    let app = Router::new()
        .route(
            "/api/v2/cati/questionnaires",
            get(|State(state): State<UpstreamState>| async move {
                state.questionnaires.respond().await
            }),
        )
        .route(
            "/tostartdate/{name}",
            get(
                |State(state): State<UpstreamState>,
                 Path(name): Path<String>,
                 headers: HeaderMap| async move {
                    if let Some(auth) = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                    {
                        state.seen_auth.lock().unwrap().push(auth.to_string());
                    }
                    match state.start_dates.get(&name) {
                        Some(reply) => reply.clone().respond().await,
                        None => StatusCode::NOT_FOUND.into_response(),
                    }
                },
            ),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Upstream {
        base_url: format!("http://{addr}"),
        seen_auth,
    }
}

/// Issuer handing out a fixed token.
#[allow(dead_code)]
pub struct StaticIssuer(pub &'static str);

#[async_trait]
impl CredentialIssuer for StaticIssuer {
    async fn fetch_token(&self, _client_id: &str) -> Result<String, ServiceError> {
        Ok(self.0.to_string())
    }
}

/// Config pointing both upstreams at the mock server.
#[allow(dead_code)]
pub fn test_config(upstream_url: &str) -> Config {
    Config {
        blaise_api_url: upstream_url.to_string(),
        bims_api_url: upstream_url.to_string(),
        vm_external_web_url: "vm.com".to_string(),
        ..Config::test_default()
    }
}

/// Build the full router against the given config.
#[allow(dead_code)]
pub fn create_test_app(config: Config) -> axum::Router {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let auth = Arc::new(AuthProvider::new(
        config.bims_client_id.clone(),
        Arc::new(StaticIssuer("example-token")),
        clock.clone(),
    ));
    let blaise =
        BlaiseClient::with_timeout(config.blaise_api_url.clone(), CLIENT_TIMEOUT).unwrap();
    let bims = BimsClient::with_timeout(config.bims_api_url.clone(), CLIENT_TIMEOUT).unwrap();
    let engine = ActivationEngine::new(auth, Arc::new(bims), clock);
    let survey_service = SurveyService::new(
        Arc::new(blaise),
        engine,
        config.vm_external_web_url.clone(),
    );

    create_router(Arc::new(AppState {
        config,
        survey_service,
    }))
}

/// Questionnaire as Blaise returns it.
#[allow(dead_code)]
pub fn api_questionnaire(name: &str, active_today: bool) -> Value {
    json!({
        "activeToday": active_today,
        "installDate": "2022-07-12",
        "name": name,
        "serverParkName": "example-park",
    })
}

/// Questionnaire as TOBi serves it.
#[allow(dead_code)]
pub fn served_questionnaire(name: &str, field_period: &str) -> Value {
    json!({
        "activeToday": true,
        "installDate": "2022-07-12",
        "name": name,
        "serverParkName": "example-park",
        "fieldPeriod": field_period,
        "link": format!("https://vm.com/{name}?LayoutSet=CATI-Interviewer_Large"),
        "surveyTLA": name.chars().take(3).collect::<String>(),
    })
}

/// `{ "tostartdate": ... }` JSON reply.
#[allow(dead_code)]
pub fn start_date(value: impl Into<Value>) -> Reply {
    Reply::Json(json!({ "tostartdate": value.into() }))
}
