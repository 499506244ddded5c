// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_BUILD_FOLDER: &str = "build";

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Blaise REST API base URL (questionnaire source)
    pub blaise_api_url: String,
    /// External host of the Blaise web server, used for interview links
    pub vm_external_web_url: String,
    /// External client URL, injected into the UI page
    pub vm_external_client_url: String,
    /// Client identifier (audience) used when requesting BIMS credentials
    pub bims_client_id: String,
    /// BIMS API base URL (TO start-date lookup)
    pub bims_api_url: String,
    /// Server port
    pub port: u16,
    /// Directory holding the built UI (`index.html` and `static/`)
    pub build_folder: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            blaise_api_url: with_default_scheme(&required("BLAISE_API_URL")?),
            vm_external_web_url: required("VM_EXTERNAL_WEB_URL")?,
            vm_external_client_url: required("VM_EXTERNAL_CLIENT_URL")?,
            bims_client_id: required("BIMS_CLIENT_ID")?,
            bims_api_url: required("BIMS_API_URL")?
                .trim_end_matches('/')
                .to_string(),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            build_folder: env::var("BUILD_FOLDER")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_BUILD_FOLDER)),
        })
    }

    /// Deterministic configuration for tests.
    pub fn test_default() -> Self {
        Self {
            blaise_api_url: "http://blaise.test".to_string(),
            vm_external_web_url: "vm.test".to_string(),
            vm_external_client_url: "client.test".to_string(),
            bims_client_id: "bims-client-id".to_string(),
            bims_api_url: "http://bims.test".to_string(),
            port: DEFAULT_PORT,
            build_folder: PathBuf::from(DEFAULT_BUILD_FOLDER),
        }
    }

    /// URL of the CATI dashboard on the Blaise web server.
    pub fn cati_dashboard_url(&self) -> String {
        format!("https://{}/Blaise", self.vm_external_web_url)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    let value = env::var(name).map_err(|_| ConfigError::Missing(name))?;
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(value.to_string())
}

/// Blaise hosts are often configured as bare `host:port`.
fn with_default_scheme(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
