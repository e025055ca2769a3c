use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;

use encoding_rs::UTF_8;
use git2::{DiffOptions, Repository};
use tracing::debug;
use which::which;

use crate::error::GitError;

/// largest staged diff we are willing to buffer
pub const MAX_DIFF_BYTES: usize = 10 * 1024 * 1024;

/// diffs above either bound go through the draft/refine pipeline
pub const LONG_DIFF_LINES: usize = 300;
pub const LONG_DIFF_CHARS: usize = 12_000;

/// the staged diff text for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff {
    pub text: String,
}

/// size figures used to pick the generation pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    pub lines: usize,
    pub chars: usize,
}

impl DiffStats {
    pub fn is_long(&self) -> bool {
        self.lines > LONG_DIFF_LINES || self.chars > LONG_DIFF_CHARS
    }
}

impl Diff {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// number of lines as git printed them; the final newline does not open a new line
    pub fn line_count(&self) -> usize {
        self.text
            .strip_suffix('\n')
            .unwrap_or(&self.text)
            .split('\n')
            .count()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn stats(&self) -> DiffStats {
        DiffStats {
            lines: self.line_count(),
            chars: self.char_count(),
        }
    }
}

/// check whether `repo_path` sits inside a git work tree
pub fn is_repository(repo_path: &str) -> bool {
    match Repository::discover(repo_path) {
        Ok(repo) => !repo.is_bare(),
        Err(e) => {
            debug!("repository discovery failed for {repo_path}: {e}");
            false
        }
    }
}

/// fetch `git diff --cached` for the repository at `repo_path`
pub fn get_staged_diff(repo_path: &str) -> Result<Diff, GitError> {
    get_staged_diff_with_limit(repo_path, MAX_DIFF_BYTES)
}

/// like [`get_staged_diff`] with a caller-chosen buffer bound
pub fn get_staged_diff_with_limit(repo_path: &str, limit: usize) -> Result<Diff, GitError> {
    if which("git").is_err() {
        return Err(GitError::GitNotInstalled);
    }

    let mut child = Command::new("git")
        .current_dir(repo_path)
        .args(["diff", "--cached", "--no-color"])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(GitError::Spawn)?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| GitError::CommandFailed("stdout was not captured".to_string()))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| GitError::CommandFailed("stderr was not captured".to_string()))?;

    // drain stderr alongside stdout so a chatty git never blocks on a full pipe
    let stderr_reader = thread::spawn(move || {
        let mut captured = Vec::new();
        let _ = stderr.read_to_end(&mut captured);
        captured
    });

    // read one byte past the limit so an exact fit is not mistaken for overflow
    let mut buf = Vec::new();
    stdout
        .take(limit as u64 + 1)
        .read_to_end(&mut buf)
        .map_err(GitError::Spawn)?;

    if buf.len() > limit {
        let _ = child.kill();
        let _ = child.wait();
        let _ = stderr_reader.join();
        debug!("staged diff exceeded {limit} bytes");
        return Err(GitError::DiffTooLarge { limit });
    }

    let status = child.wait().map_err(GitError::Spawn)?;
    let stderr_bytes = stderr_reader.join().unwrap_or_default();
    if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr_bytes).trim().to_string();
        let detail = if stderr.is_empty() {
            format!("git exited with {status}")
        } else {
            stderr
        };
        return Err(GitError::CommandFailed(detail));
    }

    let text = decode_diff_output(&buf);
    if text.trim().is_empty() {
        return Err(GitError::NoStagedChanges);
    }

    debug!("read staged diff: {} bytes", buf.len());
    Ok(Diff { text })
}

/// get a list of staged files for display
pub fn get_staged_files(repo_path: &str) -> Result<Vec<String>, GitError> {
    let repo = Repository::discover(repo_path).map_err(GitError::Open)?;
    let index = repo.index().map_err(GitError::Open)?;

    // an unborn HEAD means every index entry is staged
    let head_tree = match repo.head() {
        Ok(head) => Some(head.peel_to_tree().map_err(GitError::Open)?),
        Err(_) => None,
    };

    let mut diff_opts = DiffOptions::new();
    diff_opts.show_binary(false);

    let diff = repo
        .diff_tree_to_index(head_tree.as_ref(), Some(&index), Some(&mut diff_opts))
        .map_err(GitError::Open)?;

    let staged_files = diff
        .deltas()
        .filter_map(|delta| {
            delta
                .new_file()
                .path()
                .or_else(|| delta.old_file().path())
                .map(|path| path.to_string_lossy().to_string())
        })
        .collect();

    Ok(staged_files)
}

/// decode git output as utf-8, replacing invalid sequences
fn decode_diff_output(content: &[u8]) -> String {
    let (cow, had_errors) = UTF_8.decode_without_bom_handling(content);
    if had_errors {
        debug!("staged diff contained invalid utf-8; replaced");
    }
    cow.into_owned()
}
