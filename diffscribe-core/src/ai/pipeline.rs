//! draft/refine generation pipeline
//!
//! short diffs get a single primary call. long diffs get a primary call
//! that hands off once to a backup model on failure, followed by a
//! refinement pass whose failure falls back to the draft.

use tracing::{debug, warn};

use super::api::{ModelClient, ModelRequest};
use super::message::{CommitMessage, Style, parse_commit_message};
use super::models::{PipelineShape, select_pipeline};
use super::prompts::{
    construct_draft_prompt, construct_refine_prompt, get_refine_system_prompt, get_system_prompt,
};
use crate::config::ModelSet;
use crate::error::GenerationError;
use crate::git::Diff;

const DRAFT_MAX_TOKENS: u32 = 500;
const REFINE_MAX_TOKENS: u32 = 300;

/// trimmed model output and the model that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,
    pub model: String,
}

/// parsed message ready for display; `model` is `None` for mock output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMessage {
    pub message: CommitMessage,
    pub model: Option<String>,
}

pub struct GenerationService<C> {
    client: C,
    models: ModelSet,
}

impl<C: ModelClient> GenerationService<C> {
    pub fn new(client: C, models: ModelSet) -> Self {
        Self { client, models }
    }

    pub fn models(&self) -> &ModelSet {
        &self.models
    }

    /// run the pipeline and parse the winning output
    pub async fn generate_message(
        &self,
        diff: &Diff,
        style: Style,
    ) -> Result<GeneratedMessage, GenerationError> {
        let generation = self.generate(diff, style).await?;
        Ok(GeneratedMessage {
            message: parse_commit_message(&generation.text),
            model: Some(generation.model),
        })
    }

    /// run the pipeline shape the diff size calls for
    pub async fn generate(&self, diff: &Diff, style: Style) -> Result<Generation, GenerationError> {
        match select_pipeline(&diff.stats()) {
            PipelineShape::SinglePass => self.draft(diff, style, false).await,
            PipelineShape::DraftAndRefine => {
                let draft = self.draft(diff, style, true).await?;
                match self.refine(&draft.text).await {
                    Ok(refined) => Ok(refined),
                    Err(e) => {
                        warn!("refinement failed, keeping draft from {}: {e}", draft.model);
                        Ok(draft)
                    }
                }
            }
        }
    }

    /// draft a message with the primary model, optionally handing off to the backup
    pub async fn draft(
        &self,
        diff: &Diff,
        style: Style,
        use_fallback: bool,
    ) -> Result<Generation, GenerationError> {
        let user_prompt = construct_draft_prompt(&diff.text, style);
        let system_prompt = get_system_prompt();

        let primary = self
            .call_model(
                &self.models.draft_primary,
                system_prompt,
                &user_prompt,
                DRAFT_MAX_TOKENS,
            )
            .await;

        match primary {
            Ok(generation) => Ok(generation),
            Err(e) if use_fallback => {
                warn!(
                    "draft model {} failed ({e}), trying {}",
                    self.models.draft_primary, self.models.draft_backup
                );
                self.call_model(
                    &self.models.draft_backup,
                    system_prompt,
                    &user_prompt,
                    DRAFT_MAX_TOKENS,
                )
                .await
            }
            Err(e) => Err(e),
        }
    }

    /// polish a draft without changing its meaning
    pub async fn refine(&self, draft: &str) -> Result<Generation, GenerationError> {
        let user_prompt = construct_refine_prompt(draft);
        self.call_model(
            &self.models.refinement,
            get_refine_system_prompt(),
            &user_prompt,
            REFINE_MAX_TOKENS,
        )
        .await
    }

    async fn call_model(
        &self,
        model: &str,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
    ) -> Result<Generation, GenerationError> {
        let raw = self
            .client
            .complete(ModelRequest {
                model,
                system_prompt,
                user_prompt,
                max_tokens,
            })
            .await?;

        let text = raw.trim();
        if text.is_empty() {
            debug!("{model} returned an empty completion");
            return Err(GenerationError::EmptyGeneration);
        }

        Ok(Generation {
            text: text.to_string(),
            model: model.to_string(),
        })
    }
}
