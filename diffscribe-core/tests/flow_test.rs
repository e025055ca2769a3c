//! End-to-end tests of the generation flow in mock mode.

mod common;

use std::collections::VecDeque;

use common::TestRepo;
use diffscribe_core::error::{ClipboardError, GitError};
use diffscribe_core::prompts::Action;
use diffscribe_core::{
    Clipboard, CommitMessage, CoreCliArgs, DiffscribeError, Prompter, SessionOutcome, Style,
    execute_diffscribe_flow_with,
};

struct ScriptedPrompter {
    style: Style,
    actions: VecDeque<Action>,
    asked: usize,
}

impl ScriptedPrompter {
    fn new(style: Style, actions: &[Action]) -> Self {
        Self {
            style,
            actions: actions.iter().copied().collect(),
            asked: 0,
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select_style(&mut self) -> dialoguer::Result<Style> {
        self.asked += 1;
        Ok(self.style)
    }

    fn select_action(&mut self) -> dialoguer::Result<Action> {
        self.asked += 1;
        Ok(self.actions.pop_front().expect("no scripted action left"))
    }

    fn confirm_continue(&mut self) -> dialoguer::Result<bool> {
        self.asked += 1;
        Ok(true)
    }
}

#[derive(Default)]
struct RecordingClipboard {
    writes: Vec<String>,
}

impl Clipboard for RecordingClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.push(text.to_string());
        Ok(())
    }
}

fn mock_args(repo: &TestRepo) -> CoreCliArgs {
    CoreCliArgs {
        mock: true,
        path: Some(repo.path_str()),
        ..Default::default()
    }
}

#[tokio::test]
async fn no_staged_changes_fails_before_prompting() {
    let repo = TestRepo::new();
    let mut prompter = ScriptedPrompter::new(Style::Concise, &[]);
    let mut clipboard = RecordingClipboard::default();

    let err = execute_diffscribe_flow_with(&mock_args(&repo), &mut prompter, &mut clipboard)
        .await
        .unwrap_err();

    assert!(matches!(err, DiffscribeError::Git(GitError::NoStagedChanges)));
    assert_eq!(prompter.asked, 0);
    assert!(clipboard.writes.is_empty());
}

#[tokio::test]
async fn outside_a_repository_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let args = CoreCliArgs {
        mock: true,
        path: Some(dir.path().to_string_lossy().to_string()),
        ..Default::default()
    };
    let mut prompter = ScriptedPrompter::new(Style::Concise, &[]);
    let mut clipboard = RecordingClipboard::default();

    let err = execute_diffscribe_flow_with(&args, &mut prompter, &mut clipboard)
        .await
        .unwrap_err();

    assert!(matches!(err, DiffscribeError::Git(GitError::NotARepository)));
    assert!(err.hint().contains("inside a Git project"));
}

#[tokio::test]
async fn accepting_a_mock_message_copies_it() {
    let repo = TestRepo::new();
    repo.write_file("notes.txt", "one line\n");
    repo.stage("notes.txt");
    let mut prompter = ScriptedPrompter::new(Style::Concise, &[Action::Accept]);
    let mut clipboard = RecordingClipboard::default();

    let outcome = execute_diffscribe_flow_with(&mock_args(&repo), &mut prompter, &mut clipboard)
        .await
        .unwrap();

    // the diff header itself contains "new file mode", so the heuristic sees "new"
    assert_eq!(clipboard.writes, ["feat(): add new feature"]);
    assert_eq!(
        outcome,
        SessionOutcome::Accepted {
            message: CommitMessage::new("feat(): add new feature"),
            attempts: 1,
        }
    );
}

#[tokio::test]
async fn rejecting_leaves_clipboard_alone() {
    let repo = TestRepo::new();
    repo.write_file("notes.txt", "one line\n");
    repo.stage("notes.txt");
    let mut prompter = ScriptedPrompter::new(Style::Detailed, &[Action::Reject]);
    let mut clipboard = RecordingClipboard::default();

    let outcome = execute_diffscribe_flow_with(&mock_args(&repo), &mut prompter, &mut clipboard)
        .await
        .unwrap();

    assert_eq!(outcome, SessionOutcome::Rejected { attempts: 1 });
    assert!(clipboard.writes.is_empty());
}
