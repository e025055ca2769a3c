//! the interactive generate / display / decide loop
//!
//! style is chosen once. each pass generates, displays and asks for a
//! decision; accept copies to the clipboard, reject ends the run, and
//! regenerate loops after the operator confirms.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::ai::{
    CommitMessage, GeneratedMessage, GenerationService, ModelClient, Style,
    generate_mock_commit_message,
};
use crate::error::{DiffscribeError, GenerationError};
use crate::git::Diff;
use crate::output::{Clipboard, Output};
use crate::prompts::{Action, Prompter};

/// where messages come from for this run
pub enum MessageSource<C> {
    Remote(GenerationService<C>),
    /// keyword heuristic, no network
    Mock,
}

impl<C: ModelClient> MessageSource<C> {
    pub async fn generate(
        &self,
        diff: &Diff,
        style: Style,
    ) -> Result<GeneratedMessage, GenerationError> {
        match self {
            MessageSource::Remote(service) => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
                        .template("{spinner:.blue} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                spinner.set_message(format!(
                    "generating commit message with {}...",
                    service.models().draft_primary
                ));
                spinner.enable_steady_tick(Duration::from_millis(80));

                let result = service.generate_message(diff, style).await;
                spinner.finish_and_clear();
                result
            }
            MessageSource::Mock => Ok(GeneratedMessage {
                message: generate_mock_commit_message(style, &diff.text),
                model: None,
            }),
        }
    }
}

/// how a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Accepted {
        message: CommitMessage,
        attempts: usize,
    },
    Rejected {
        attempts: usize,
    },
}

pub async fn run_session<C: ModelClient>(
    source: &MessageSource<C>,
    diff: &Diff,
    prompter: &mut dyn Prompter,
    clipboard: &mut dyn Clipboard,
    output: &Output,
) -> Result<SessionOutcome, DiffscribeError> {
    let style = prompter.select_style()?;
    output.info(format!("Selected style: {style}\n"));

    let mut attempts = 0;
    loop {
        attempts += 1;
        output.dim(format!("Generating commit message (attempt {attempts})..."));

        let generated = source.generate(diff, style).await?;
        output.display_commit_message(&generated.message, generated.model.as_deref());

        match prompter.select_action()? {
            Action::Accept => {
                output.copy_commit_message(clipboard, &generated.message)?;
                output.info("Run `git commit` and paste the message.");
                return Ok(SessionOutcome::Accepted {
                    message: generated.message,
                    attempts,
                });
            }
            Action::Reject => {
                output.info("Cancelled.");
                return Ok(SessionOutcome::Rejected { attempts });
            }
            Action::Regenerate => {
                if !prompter.confirm_continue()? {
                    output.info("Cancelled.");
                    return Ok(SessionOutcome::Rejected { attempts });
                }
            }
        }
    }
}
