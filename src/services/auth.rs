// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer credentials for BIMS requests.
//!
//! Handles:
//! - Fetching Google identity tokens for the BIMS audience
//! - Caching the token until its `exp` claim passes
//! - Single-flight refresh when concurrent callers find the token stale

use crate::error::ServiceError;
use crate::time_utils::Clock;
use async_trait::async_trait;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

const METADATA_IDENTITY_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/identity";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(5);

/// Issues signed tokens for a client identifier.
#[async_trait]
pub trait CredentialIssuer: Send + Sync {
    async fn fetch_token(&self, client_id: &str) -> Result<String, ServiceError>;
}

/// Google identity tokens from the GCE/Cloud Run metadata server.
#[derive(Clone)]
pub struct MetadataTokenIssuer {
    http: reqwest::Client,
    identity_url: String,
}

impl MetadataTokenIssuer {
    pub fn new() -> Result<Self, ServiceError> {
        Self::with_identity_url(METADATA_IDENTITY_URL)
    }

    /// Point the issuer at a different identity endpoint (local emulators, tests).
    pub fn with_identity_url(identity_url: impl Into<String>) -> Result<Self, ServiceError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| ServiceError::Credential(format!("failed building HTTP client: {e}")))?;

        Ok(Self {
            http,
            identity_url: identity_url.into(),
        })
    }
}

#[async_trait]
impl CredentialIssuer for MetadataTokenIssuer {
    async fn fetch_token(&self, client_id: &str) -> Result<String, ServiceError> {
        let response = self
            .http
            .get(&self.identity_url)
            .header("Metadata-Flavor", "Google")
            .query(&[("audience", client_id), ("format", "full")])
            .send()
            .await
            .map_err(|e| ServiceError::Credential(format!("identity token request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ServiceError::Credential(format!(
                "identity token request returned status {}",
                response.status()
            )));
        }

        let token = response
            .text()
            .await
            .map_err(|e| ServiceError::Credential(format!("unreadable identity token: {e}")))?;

        Ok(token.trim().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodedExpiry {
    Undecodable,
    Never,
    At(i64),
}

#[derive(Debug, Clone)]
struct CachedCredential {
    token: String,
    expiry: DecodedExpiry,
}

enum CacheState {
    Valid(String),
    Empty,
    Undecodable,
    Expired,
}

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: Option<i64>,
}

/// Caches one bearer token and refreshes it lazily.
///
/// Shared by all requests; the refresh lock ensures a stale token is
/// replaced by exactly one issuer call however many callers notice it.
pub struct AuthProvider {
    client_id: String,
    issuer: Arc<dyn CredentialIssuer>,
    clock: Arc<dyn Clock>,
    cached: RwLock<Option<CachedCredential>>,
    refresh_lock: Mutex<()>,
}

impl AuthProvider {
    pub fn new(
        client_id: impl Into<String>,
        issuer: Arc<dyn CredentialIssuer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            issuer,
            clock,
            cached: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Value for the `Authorization` header, e.g. `Bearer eyJ...`.
    pub async fn get_auth_header(&self) -> Result<String, ServiceError> {
        match self.cache_state().await {
            CacheState::Valid(token) => return Ok(bearer(&token)),
            CacheState::Empty => {}
            CacheState::Undecodable => {
                tracing::info!("Failed to decode token, Calling for new Google auth Token");
            }
            CacheState::Expired => {
                tracing::info!("Auth Token Expired, Calling for new Google auth Token");
            }
        }

        let _guard = self.refresh_lock.lock().await;

        // Another caller may have refreshed while we waited for the lock.
        if let CacheState::Valid(token) = self.cache_state().await {
            return Ok(bearer(&token));
        }

        let token = self.issuer.fetch_token(&self.client_id).await?;
        let expiry = decode_expiry(&token);
        tracing::debug!(expiry = ?expiry, "Fetched new Google auth token");

        *self.cached.write().await = Some(CachedCredential {
            token: token.clone(),
            expiry,
        });

        Ok(bearer(&token))
    }

    async fn cache_state(&self) -> CacheState {
        let cached = self.cached.read().await;
        let Some(credential) = cached.as_ref() else {
            return CacheState::Empty;
        };

        match credential.expiry {
            DecodedExpiry::Undecodable => CacheState::Undecodable,
            DecodedExpiry::At(exp) if exp <= self.clock.now_unix_secs() => CacheState::Expired,
            DecodedExpiry::At(_) | DecodedExpiry::Never => {
                CacheState::Valid(credential.token.clone())
            }
        }
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Read the `exp` claim without verifying the signature; the issuer is trusted.
fn decode_expiry(token: &str) -> DecodedExpiry {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    match decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation) {
        Ok(data) => data.claims.exp.map_or(DecodedExpiry::Never, DecodedExpiry::At),
        Err(_) => DecodedExpiry::Undecodable,
    }
}
