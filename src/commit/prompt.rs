//! Prompt construction for AI-generated commit messages.

/// Appended to the diff on every attempt after the first.
pub const CORRECTIVE_INSTRUCTION: &str =
    "Please strictly follow the commit message format guidelines.";

/// The reference message shown to the model. It passes the validator.
pub const REFERENCE_MESSAGE: &str = "Add CPU arch filter scheduler support

- Implement new filtering mechanism for CPU architectures
- Add configuration options for arch-based scheduling
- Update documentation with new filter details";

/// Build the prompt for one generation attempt.
///
/// `retry` adds the corrective instruction after the diff. The diff itself
/// is embedded verbatim.
pub fn build_commit_prompt(diff: &str, retry: bool) -> String {
    let correction = if retry {
        format!("\n{CORRECTIVE_INSTRUCTION}")
    } else {
        String::new()
    };

    format!(
        r#"Given the following code changes, generate a commit message following these guidelines:

1. Start with a short (72 chars or less) summary line in imperative mood
2. Leave one blank line after the summary
3. Use bullet points (with - or *) for listing multiple changes

Reference format:
```
{REFERENCE_MESSAGE}
```

The changes are:
{diff}{correction}

Generate a commit message for these changes following the above format."#
    )
}
