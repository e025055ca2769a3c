// offline heuristic generator used by --mock

use super::message::{CommitMessage, Style};

const MOCK_DETAILED_BODY: &str = "- update implementation\n- improve code quality";

/// change kinds the heuristic can tell apart, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockPattern {
    Test,
    BugFix,
    Feature,
    Chore,
}

impl MockPattern {
    /// first matching keyword group wins
    pub fn detect(diff: &str) -> Self {
        if contains_any(diff, &["test", "spec"]) {
            MockPattern::Test
        } else if contains_any(diff, &["fix", "bug"]) {
            MockPattern::BugFix
        } else if contains_any(diff, &["add", "new"]) {
            MockPattern::Feature
        } else {
            MockPattern::Chore
        }
    }

    fn commit_type(&self) -> &'static str {
        match self {
            MockPattern::Test => "test",
            MockPattern::BugFix => "fix",
            MockPattern::Feature => "feat",
            MockPattern::Chore => "chore",
        }
    }

    fn description(&self) -> &'static str {
        match self {
            MockPattern::Test => "add test coverage",
            MockPattern::BugFix => "fix bugs",
            MockPattern::Feature => "add new feature",
            MockPattern::Chore => "update code",
        }
    }
}

fn contains_any(text: &str, words: &[&str]) -> bool {
    words.iter().any(|word| text.contains(word))
}

/// deterministic commit message derived from diff keywords alone
pub fn generate_mock_commit_message(style: Style, diff: &str) -> CommitMessage {
    let pattern = MockPattern::detect(diff);
    let header = format!("{}(): {}", pattern.commit_type(), pattern.description());

    match style {
        Style::Concise => CommitMessage::new(header),
        Style::Detailed => CommitMessage::with_body(header, MOCK_DETAILED_BODY),
    }
}
