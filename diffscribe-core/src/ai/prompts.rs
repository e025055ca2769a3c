// prompt construction for the draft and refinement passes

use super::message::Style;

const DRAFT_SYSTEM_PROMPT: &str = r#"You are an expert developer who writes perfect Conventional Commits.
Your task is to analyze git diffs and generate clear, meaningful commit messages.

Rules:
- Use valid Conventional Commit types: feat, fix, docs, style, refactor, test, chore, perf
- Scope should be the affected module or component (e.g., auth, api, ui, db)
- Description must be in imperative mood (e.g., "add" not "added" or "adds")
- Keep header under 72 characters
- No period at the end of header
- Focus on WHAT and WHY, not HOW

Section Guidelines:
- Create logical sections based on the diff content
- Common section titles: Core Features, Changes, Technical, Implementation, Breaking Changes
- Use clear, descriptive section names
- Group related changes together
- Each section should have 4-5 bullet points maximum
- Each bullet should be a complete thought

EXAMPLES:

Simple Format Example:
feat(auth): implement OAuth login flow

- Add Google OAuth integration
- Update auth controller to handle OAuth callbacks
- Add OAuth configuration to environment variables

Structured Format Example:
feat(notes): implement note creation, reading, deletion with tag system

Core Features:
- Create notes with tag assignments
- Read and filter notes by tags
- Delete notes with UI confirmation

Tag System:
- Add multiple tags to notes
- Filter notes by tags
- Tag management interface
- Tag-based organization

Technical:
- Appwrite database integration
- Real-time note listing
- Tag filtering functionality
- Responsive UI design

Pending: Update functionality for existing notes

Fix Example:
fix(api): resolve null pointer in user authentication

Issue: Login fails when user has no profile image
- Add null check for profile images
- Update auth middleware to handle missing profiles
- Add error logging for authentication failures

Refactor Example:
refactor(core): migrate from Redux to Zustand

Migration:
- Replace Redux store with Zustand
- Update all state selectors
- Remove Redux middleware
- Migrate async actions to Zustand

Benefits:
- Smaller bundle size (reduced by 200KB)
- Simpler state management
- Better TypeScript support
- Improved developer experience"#;

const CONCISE_INSTRUCTION: &str = r#"Return a concise commit message in Conventional Commits format:

<type>(<scope>): <description>

- Bullet point 1

Use 1-4 bullet points dynamically based on the number of changes.
Only add bullet points if there are meaningful details to explain."#;

const DETAILED_INSTRUCTION: &str = r#"Return a detailed commit message in Conventional Commits format.

Format Options (choose dynamically based on diff complexity):

SIMPLE FORMAT (for straightforward changes):
<type>(<scope>): <description>

- Bullet point 1
- Bullet point 2
- Bullet point 3

STRUCTURED FORMAT (for complex changes with multiple aspects):
<type>(<scope>): <description>

<Section Title>:
- Bullet point
- Bullet point

<Section Title>:
- Bullet point
- Bullet point

[Optional footer for pending work, breaking changes, etc.]

Use structured format when changes involve:
- Multiple features/aspects
- Different technical areas
- Implementation details + user impact
- Complex refactoring
Use simple format for focused, single-aspect changes."#;

const REFINE_SYSTEM_PROMPT: &str = "You refine git commit messages.
Improve clarity, grammar, and structure.
Do NOT invent new changes or alter meaning.
Maintain Conventional Commits format.";

/// system prompt shared by every draft call
pub fn get_system_prompt() -> &'static str {
    DRAFT_SYSTEM_PROMPT
}

pub fn get_refine_system_prompt() -> &'static str {
    REFINE_SYSTEM_PROMPT
}

pub fn style_instruction(style: Style) -> &'static str {
    match style {
        Style::Concise => CONCISE_INSTRUCTION,
        Style::Detailed => DETAILED_INSTRUCTION,
    }
}

/// user prompt for a draft: style block followed by the fenced diff
pub fn construct_draft_prompt(diff: &str, style: Style) -> String {
    let mut prompt = String::with_capacity(diff.len() + 1024);
    prompt.push_str(style_instruction(style));
    prompt.push_str("\n\nGit Diff:\n```diff\n");
    prompt.push_str(diff);
    prompt.push_str("\n```");
    prompt
}

pub fn construct_refine_prompt(draft: &str) -> String {
    format!("Refine this commit message:\n\n{draft}\n\nReturn the final commit message.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_prompt_fences_the_diff_after_style_block() {
        let prompt = construct_draft_prompt("+fn main() {}", Style::Concise);
        assert!(prompt.starts_with("Return a concise commit message"));
        assert!(prompt.ends_with("Git Diff:\n```diff\n+fn main() {}\n```"));
    }

    #[test]
    fn detailed_style_offers_both_formats() {
        let prompt = construct_draft_prompt("+x", Style::Detailed);
        assert!(prompt.contains("SIMPLE FORMAT"));
        assert!(prompt.contains("STRUCTURED FORMAT"));
    }

    #[test]
    fn system_prompt_carries_header_rules() {
        let system = get_system_prompt();
        assert!(system.contains("Keep header under 72 characters"));
        assert!(system.contains("imperative mood"));
    }

    #[test]
    fn refine_prompt_wraps_draft() {
        let prompt = construct_refine_prompt("feat: add x");
        assert_eq!(
            prompt,
            "Refine this commit message:\n\nfeat: add x\n\nReturn the final commit message."
        );
    }
}
