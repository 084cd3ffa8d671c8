//! Structural checks for generated commit messages.
//!
//! The contract:
//!
//! ```text
//! Add CPU arch filter scheduler support        <- summary, <= 72 chars, starts with a verb
//!                                              <- blank separator
//! - Implement new filtering mechanism          <- body lines, <= 72 chars, "- " bullets
//! ```
//!
//! Merge commits (summary starting with "merge") are exempt from the
//! separator and body rules.

use std::fmt;

/// Maximum characters for the summary and every body line.
pub const MAX_LINE_LENGTH: usize = 72;

/// Verbs a summary may open with. Matched as prefixes of the first word,
/// so "added" and "fixes" are accepted too.
pub const ACCEPTED_VERBS: [&str; 9] = [
    "add",
    "fix",
    "update",
    "remove",
    "refactor",
    "implement",
    "improve",
    "change",
    "merge",
];

/// Why a message was rejected. Only used for log output; callers get a bool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    Empty,
    SummaryTooLong { length: usize },
    UnknownVerb { word: String },
    MissingBlankLine,
    BodyLineTooLong { line: usize, length: usize },
    MalformedBullet { line: usize },
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Empty => write!(f, "message is empty"),
            Violation::SummaryTooLong { length } => write!(
                f,
                "summary is {length} characters (max {MAX_LINE_LENGTH})"
            ),
            Violation::UnknownVerb { word } if word.is_empty() => {
                write!(f, "summary is blank")
            }
            Violation::UnknownVerb { word } => {
                write!(f, "summary starts with '{word}', not an imperative verb")
            }
            Violation::MissingBlankLine => {
                write!(f, "second line must be blank")
            }
            Violation::BodyLineTooLong { line, length } => write!(
                f,
                "line {line} is {length} characters (max {MAX_LINE_LENGTH})"
            ),
            Violation::MalformedBullet { line } => {
                write!(f, "line {line} has a bullet without a space after '-'")
            }
        }
    }
}

/// Whether `message` follows the commit message format.
///
/// Pure and total: any input maps to a verdict.
pub fn is_valid(message: &str) -> bool {
    check(message).is_ok()
}

/// Run the format rules in order and report the first one that fails.
pub fn check(message: &str) -> Result<(), Violation> {
    let lines = split_lines(message);

    let Some(first) = lines.first() else {
        return Err(Violation::Empty);
    };

    let summary = first.trim_matches(is_blank);
    let length = summary.chars().count();
    if length > MAX_LINE_LENGTH {
        return Err(Violation::SummaryTooLong { length });
    }

    let word = summary
        .split(is_blank)
        .find(|w| !w.is_empty())
        .unwrap_or_default()
        .to_lowercase();
    if !ACCEPTED_VERBS.iter().any(|verb| word.starts_with(verb)) {
        return Err(Violation::UnknownVerb { word });
    }

    if summary.to_lowercase().starts_with("merge") {
        return Ok(());
    }

    if lines.get(1).is_some_and(|l| !l.trim_matches(is_blank).is_empty()) {
        return Err(Violation::MissingBlankLine);
    }

    for (idx, raw) in lines.iter().enumerate().skip(2) {
        let line = raw.trim_matches(is_blank);
        if line.is_empty() {
            continue;
        }
        let length = line.chars().count();
        if length > MAX_LINE_LENGTH {
            return Err(Violation::BodyLineTooLong {
                line: idx + 1,
                length,
            });
        }
        if line.starts_with('-') && !line.starts_with("- ") {
            return Err(Violation::MalformedBullet { line: idx + 1 });
        }
    }

    Ok(())
}

/// Split on every line boundary: `\n`, `\r\n`, `\r` and the other Unicode
/// line separators. A trailing terminator does not open a new line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if !is_line_break(ch) {
            continue;
        }
        lines.push(&text[start..idx]);
        let mut end = idx + ch.len_utf8();
        if ch == '\r'
            && let Some(&(next_idx, '\n')) = chars.peek()
        {
            chars.next();
            end = next_idx + 1;
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Whitespace for trimming and word splitting. Wider than
/// `char::is_whitespace`: the ASCII information separators count too.
fn is_blank(ch: char) -> bool {
    ch.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&ch)
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}
