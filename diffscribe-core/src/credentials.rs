//! api key resolution and the local credential file
//!
//! the key lives in `~/.diffscribe/config.json` as
//! `{ "openrouter": { "apiKey": "..." } }`. resolution checks that file
//! first and falls back to `OPENROUTER_API_KEY`. a file that exists but
//! does not parse is an error, never skipped.

use std::env;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CredentialError;

pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// on-disk shape of the config file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    pub openrouter: OpenRouterAuth,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenRouterAuth {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// resolved credentials, held for the lifetime of the process
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
}

// keep the key out of debug output and logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// where a resolved key came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    ConfigFile,
    Environment,
}

/// file-backed credential storage
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// store at the default location, `~/.diffscribe/config.json`
    pub fn new() -> Result<Self, CredentialError> {
        let home = dirs::home_dir().ok_or(CredentialError::NoHomeDir)?;
        Ok(Self {
            path: home.join(".diffscribe").join("config.json"),
        })
    }

    /// store at a custom path, mostly for tests
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// read the config file; a missing file is `Ok(None)`
    pub fn load(&self) -> Result<Option<AuthConfig>, CredentialError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|source| CredentialError::Read {
            path: self.path.clone(),
            source,
        })?;

        let config: AuthConfig =
            serde_json::from_str(&content).map_err(|e| CredentialError::CorruptConfig {
                path: self.path.clone(),
                detail: e.to_string(),
            })?;

        Ok(Some(config))
    }

    /// write the api key, replacing whatever was stored before
    pub fn save(&self, api_key: &str) -> Result<(), CredentialError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(CredentialError::EmptyKey);
        }

        let write_err = |source| CredentialError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let config = AuthConfig {
            openrouter: OpenRouterAuth {
                api_key: api_key.to_string(),
            },
        };
        let content = serde_json::to_string_pretty(&config)
            .map_err(|e| write_err(std::io::Error::other(e)))?;

        // write to a sibling temp file, then rename over the real one
        let temp_path = self.path.with_extension("json.tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(write_err)?;

            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(write_err)?;

            file.write_all(content.as_bytes()).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }

        fs::rename(&temp_path, &self.path).map_err(write_err)?;
        debug!(path = %self.path.display(), "stored api key");
        Ok(())
    }
}

/// resolve the api key from the default store, or from the environment
/// alone when there is no home directory to hold a config file
pub fn resolve_default_credentials() -> Result<Credentials, CredentialError> {
    let store = match CredentialStore::new() {
        Ok(store) => Some(store),
        Err(CredentialError::NoHomeDir) => {
            debug!("no home directory; skipping config file");
            None
        }
        Err(e) => return Err(e),
    };
    resolve_from(store.as_ref()).map(|(credentials, _)| credentials)
}

/// resolve the api key: config file first, then the environment
pub fn resolve_credentials(store: &CredentialStore) -> Result<Credentials, CredentialError> {
    resolve_with_source(store).map(|(credentials, _)| credentials)
}

/// same as [`resolve_credentials`] but also reports which source won
pub fn resolve_with_source(
    store: &CredentialStore,
) -> Result<(Credentials, CredentialSource), CredentialError> {
    resolve_from(Some(store))
}

/// resolution over an optional store; `None` checks the environment only
pub fn resolve_from(
    store: Option<&CredentialStore>,
) -> Result<(Credentials, CredentialSource), CredentialError> {
    if let Some(store) = store {
        if let Some(config) = store.load()? {
            let key = config.openrouter.api_key.trim();
            if !key.is_empty() {
                debug!("using api key from {}", store.path().display());
                return Ok((
                    Credentials {
                        api_key: key.to_string(),
                    },
                    CredentialSource::ConfigFile,
                ));
            }
        }
    }

    if let Ok(key) = env::var(API_KEY_ENV) {
        let key = key.trim();
        if !key.is_empty() {
            debug!("using api key from {API_KEY_ENV}");
            return Ok((
                Credentials {
                    api_key: key.to_string(),
                },
                CredentialSource::Environment,
            ));
        }
    }

    Err(CredentialError::Missing)
}
