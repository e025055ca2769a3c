// diffscribe-core/src/lib.rs

// declare modules
pub mod ai;
pub mod config;
pub mod credentials;
pub mod error;
pub mod git;
pub mod output;
pub mod prompts;
pub mod session;
pub mod utils;

// re-export key structs/functions for the cli crate
pub use clap::Parser;
pub use console::style;
pub use dotenv::dotenv;

pub use crate::ai::{CommitMessage, GenerationService, OpenRouterClient, Style};
pub use crate::config::Config;
pub use crate::credentials::{
    CredentialStore, Credentials, resolve_credentials, resolve_default_credentials,
};
pub use crate::error::DiffscribeError;
pub use crate::git::{Diff, get_staged_diff, is_repository};
pub use crate::output::{Clipboard, Output, SystemClipboard};
pub use crate::prompts::{DialoguerPrompter, Prompter};
pub use crate::session::{MessageSource, SessionOutcome, run_session};

use clap::Subcommand;

use crate::error::GitError;

// argument parsing struct, parsed by the cli crate
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "diffscribe")]
#[command(version)]
#[command(about = "AI-powered commit message generator", long_about = None)]
pub struct CoreCliArgs {
    #[command(subcommand)]
    pub command: Option<CoreCommand>,

    /// use mock generation instead of the LLM (for testing)
    #[arg(long)]
    pub mock: bool,

    /// path to git repository (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// show staged files and debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CoreCommand {
    /// store your OpenRouter API key in ~/.diffscribe/config.json
    Auth,
}

/// run the full generation flow against the real terminal and clipboard
pub async fn execute_diffscribe_flow(args: &CoreCliArgs) -> Result<SessionOutcome, DiffscribeError> {
    let mut prompter = DialoguerPrompter::default();
    let mut clipboard = SystemClipboard::default();
    execute_diffscribe_flow_with(args, &mut prompter, &mut clipboard).await
}

/// the generation flow with the interactive edges supplied by the caller
pub async fn execute_diffscribe_flow_with(
    args: &CoreCliArgs,
    prompter: &mut dyn Prompter,
    clipboard: &mut dyn Clipboard,
) -> Result<SessionOutcome, DiffscribeError> {
    let output = Output;
    let repo_path = args.path.clone().unwrap_or_else(|| ".".to_string());

    println!(
        "{}\n",
        style("diffscribe — AI-powered commit message generator").cyan().bold()
    );
    output.info("Starting...\n");

    let source = if args.mock {
        output.dim("Running in mock mode (no API calls)\n");
        MessageSource::Mock
    } else {
        let credentials = resolve_default_credentials()?;
        let config = Config::from_env(credentials);

        output.dim(format!(
            "Draft model: {} (backup: {})",
            config.models.draft_primary, config.models.draft_backup
        ));
        output.dim(format!("Refinement model: {}\n", config.models.refinement));

        let client = OpenRouterClient::new(&config)?;
        MessageSource::Remote(GenerationService::new(client, config.models.clone()))
    };

    if !git::is_repository(&repo_path) {
        return Err(GitError::NotARepository.into());
    }

    let diff = git::get_staged_diff(&repo_path)?;
    output.success(format!(
        "Found staged changes ({} lines)",
        diff.line_count()
    ));

    if args.verbose {
        match git::get_staged_files(&repo_path) {
            Ok(files) => {
                println!("{}", style("staged files:").cyan().bold());
                for file in files {
                    println!("{}", style(format!("  - {file}")).green());
                }
                println!();
            }
            Err(e) => output.warning(format!("could not list staged files: {e}")),
        }
    }

    run_session(&source, &diff, prompter, clipboard, &output).await
}

/// interactive "set credential" flow behind `diffscribe auth`
pub fn execute_auth_flow() -> Result<(), DiffscribeError> {
    let store = CredentialStore::new()?;
    let api_key = prompts::prompt_api_key()?;

    let output = Output;
    println!();
    output.dim(format!(
        "Your OpenRouter API key will be stored locally at: {}",
        store.path().display()
    ));
    println!();

    store.save(&api_key)?;
    output.success("API key saved successfully!");
    Ok(())
}
