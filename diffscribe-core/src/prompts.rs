// interactive prompts for the session loop and the auth command

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Password, Select};

use crate::ai::Style;

/// operator decision after a message is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accept,
    Regenerate,
    Reject,
}

/// the questions the session asks the operator
pub trait Prompter {
    fn select_style(&mut self) -> dialoguer::Result<Style>;
    fn select_action(&mut self) -> dialoguer::Result<Action>;
    fn confirm_continue(&mut self) -> dialoguer::Result<bool>;
}

/// terminal prompts via dialoguer
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Prompter for DialoguerPrompter {
    fn select_style(&mut self) -> dialoguer::Result<Style> {
        let options = [
            "Concise  — single-line, clean history",
            "Detailed — header + body with context",
        ];
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Choose commit message style:")
            .default(0)
            .items(&options)
            .interact()?;

        Ok(match selection {
            0 => Style::Concise,
            _ => Style::Detailed,
        })
    }

    fn select_action(&mut self) -> dialoguer::Result<Action> {
        let options = [
            "Accept & copy to clipboard",
            "Regenerate",
            "Reject & exit",
        ];
        let selection = Select::with_theme(&self.theme)
            .with_prompt("What would you like to do?")
            .default(0)
            .items(&options)
            .interact()?;

        Ok(match selection {
            0 => Action::Accept,
            1 => Action::Regenerate,
            _ => Action::Reject,
        })
    }

    fn confirm_continue(&mut self) -> dialoguer::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt("Continue regenerating?")
            .default(true)
            .interact()
    }
}

/// masked api key entry; rejects blank input and returns the trimmed key
pub fn prompt_api_key() -> dialoguer::Result<String> {
    let key = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your OpenRouter API key:")
        .validate_with(|input: &String| -> Result<(), &'static str> {
            if input.trim().is_empty() {
                Err("API key cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact()?;

    Ok(key.trim().to_string())
}
