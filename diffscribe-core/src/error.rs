//! error types for each boundary the tool talks to

use std::path::PathBuf;

use thiserror::Error;

/// errors from resolving or storing the openrouter api key
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error(
        "OPENROUTER_API_KEY environment variable is not set.\nGet your API key from: https://openrouter.ai/keys\nSet it with: export OPENROUTER_API_KEY=your-key-here"
    )]
    Missing,

    #[error("config file {} is not valid JSON: {detail}", .path.display())]
    CorruptConfig { path: PathBuf, detail: String },

    #[error("API key cannot be empty")]
    EmptyKey,

    #[error("cannot determine home directory")]
    NoHomeDir,

    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// errors from the repository adapter
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a Git repository.")]
    NotARepository,

    #[error("No staged changes found")]
    NoStagedChanges,

    #[error("staged diff exceeds the {limit} byte limit")]
    DiffTooLarge { limit: usize },

    #[error("git executable not found in PATH")]
    GitNotInstalled,

    #[error("git diff failed: {0}")]
    CommandFailed(String),

    #[error("failed to run git: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("failed to open git repository: {0}")]
    Open(#[source] git2::Error),
}

/// errors from a single model call or from the draft/refine pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Invalid API key. Please check your OPENROUTER_API_KEY environment variable.")]
    InvalidCredential,

    #[error("Rate limit exceeded. Please wait and try again.")]
    RateLimited,

    #[error("LLM returned empty message")]
    EmptyGeneration,

    #[error("{0}")]
    Upstream(String),
}

/// errors from the system clipboard
#[derive(Error, Debug)]
#[error("Failed to copy to clipboard: {0}")]
pub struct ClipboardError(pub String);

/// everything the top-level flow can fail with
#[derive(Error, Debug)]
pub enum DiffscribeError {
    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    #[error("interactive prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

impl DiffscribeError {
    /// one-line remediation shown under the error line
    pub fn hint(&self) -> &'static str {
        match self {
            DiffscribeError::Credential(CredentialError::CorruptConfig { .. }) => {
                "Fix or remove ~/.diffscribe/config.json, then run `diffscribe auth` to store a new key."
            }
            DiffscribeError::Credential(_) => {
                "Run `diffscribe auth` to store your OpenRouter API key."
            }
            DiffscribeError::Git(GitError::NotARepository) => {
                "Run diffscribe inside a Git project."
            }
            DiffscribeError::Git(GitError::NoStagedChanges) => {
                "Stage files using `git add` before running diffscribe."
            }
            DiffscribeError::Git(GitError::DiffTooLarge { .. }) => {
                "Stage a smaller set of changes and try again."
            }
            DiffscribeError::Git(GitError::GitNotInstalled) => {
                "Install git and make sure it is on your PATH."
            }
            DiffscribeError::Git(_) => "Check that git works in this directory.",
            DiffscribeError::Generation(GenerationError::InvalidCredential) => {
                "Run `diffscribe auth` to replace the stored API key."
            }
            DiffscribeError::Generation(GenerationError::RateLimited) => {
                "Wait a moment, then run diffscribe again."
            }
            DiffscribeError::Generation(_) => {
                "Try again, or run `diffscribe --mock` to test without the API."
            }
            DiffscribeError::Clipboard(_) => {
                "Copy the message printed above manually."
            }
            DiffscribeError::Prompt(_) => "Run diffscribe from an interactive terminal.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_staged_changes_points_at_git_add() {
        let err = DiffscribeError::from(GitError::NoStagedChanges);
        assert_eq!(err.to_string(), "No staged changes found");
        assert!(err.hint().contains("git add"));
    }

    #[test]
    fn corrupt_config_hint_differs_from_missing_key() {
        let corrupt = DiffscribeError::from(CredentialError::CorruptConfig {
            path: PathBuf::from("/tmp/config.json"),
            detail: "expected value".to_string(),
        });
        let missing = DiffscribeError::from(CredentialError::Missing);
        assert_ne!(corrupt.hint(), missing.hint());
        assert!(corrupt.hint().contains("Fix or remove"));
    }

    #[test]
    fn upstream_error_displays_underlying_message() {
        let err = GenerationError::Upstream("openrouter api error (500): boom".to_string());
        assert_eq!(err.to_string(), "openrouter api error (500): boom");
    }
}
