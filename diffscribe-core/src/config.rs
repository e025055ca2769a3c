// runtime configuration, built once in the driver and passed down

use std::env;
use std::time::Duration;

use crate::credentials::Credentials;

pub const DRAFT_MODEL_PRIMARY: &str = "google/gemini-2.5-flash-lite";
pub const DRAFT_MODEL_BACKUP: &str = "mistralai/devstral-2512";
pub const REFINEMENT_MODEL: &str = "google/gemini-2.5-flash";

pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// overrides the primary draft model when set
pub const MODEL_OVERRIDE_ENV: &str = "DIFFSCRIBE_MODEL";

/// the three models the draft/refine pipeline talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSet {
    pub draft_primary: String,
    pub draft_backup: String,
    pub refinement: String,
}

impl Default for ModelSet {
    fn default() -> Self {
        Self {
            draft_primary: DRAFT_MODEL_PRIMARY.to_string(),
            draft_backup: DRAFT_MODEL_BACKUP.to_string(),
            refinement: REFINEMENT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub models: ModelSet,
    pub api_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            models: ModelSet::default(),
            api_url: OPENROUTER_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// defaults plus whatever the environment overrides
    pub fn from_env(credentials: Credentials) -> Self {
        let mut config = Self::new(credentials);
        if let Ok(model) = env::var(MODEL_OVERRIDE_ENV) {
            let model = model.trim();
            if !model.is_empty() {
                config.models.draft_primary = model.to_string();
            }
        }
        config
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_models(mut self, models: ModelSet) -> Self {
        self.models = models;
        self
    }
}
