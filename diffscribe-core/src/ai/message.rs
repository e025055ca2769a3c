// commit message value types and model-output parsing

use std::fmt;

/// header used when the model output has no non-blank line
pub const FALLBACK_HEADER: &str = "chore: update code";

/// message style chosen once per run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Concise,
    Detailed,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Concise => "concise",
            Style::Detailed => "detailed",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// a parsed commit message: one header line plus an optional free-form body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub header: String,
    pub body: Option<String>,
}

impl CommitMessage {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: None,
        }
    }

    pub fn with_body(header: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            body: Some(body.into()),
        }
    }

    /// the text that goes on the clipboard: header, or header + blank line + body
    pub fn full_text(&self) -> String {
        match &self.body {
            Some(body) => format!("{}\n\n{}", self.header, body),
            None => self.header.clone(),
        }
    }
}

/// split raw model output into header and body
///
/// blank lines are dropped; the first remaining line (trimmed) is the header
/// and the rest are joined back with `\n` as they were.
pub fn parse_commit_message(llm_output: &str) -> CommitMessage {
    let lines: Vec<&str> = llm_output
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect();

    let Some((first, rest)) = lines.split_first() else {
        return CommitMessage::new(FALLBACK_HEADER);
    };

    let header = first.trim().to_string();
    if rest.is_empty() {
        return CommitMessage::new(header);
    }

    CommitMessage::with_body(header, rest.join("\n"))
}
