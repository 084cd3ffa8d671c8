//! Subprocess tests for the Claude CLI provider.
//!
//! Shell scripts stand in for the `claude` binary so the full spawn, exit
//! code and envelope handling run for real.
#![cfg(unix)]

mod common;

use std::time::{Duration, Instant};

use commi::llm::ClaudeCli;
use commi::{CompletionError, CompletionService, MessageGenerator};

use common::create_mock_script;

#[tokio::test]
async fn test_envelope_result_is_returned() {
    let (_dir, script) = create_mock_script(
        r#"#!/bin/sh
echo '{"type":"result","is_error":false,"result":"Fix crash on empty input"}'
"#,
    );
    let cli = ClaudeCli::with_program(&script, Duration::from_secs(10));

    assert_eq!(cli.complete("prompt").await.unwrap(), "Fix crash on empty input");
}

#[tokio::test]
async fn test_prompt_is_passed_after_p_flag() {
    let (_dir, script) = create_mock_script(
        r#"#!/bin/sh
# $1 = -p, $2 = prompt, $3 = --output-format, $4 = json
if [ "$1" = "-p" ] && [ "$3" = "--output-format" ] && [ "$4" = "json" ]; then
  printf 'Add %s' "$2"
else
  exit 3
fi
"#,
    );
    let cli = ClaudeCli::with_program(&script, Duration::from_secs(10));

    assert_eq!(cli.complete("echoed prompt").await.unwrap(), "Add echoed prompt");
}

#[tokio::test]
async fn test_envelope_error_is_execution_failure() {
    let (_dir, script) = create_mock_script(
        r#"#!/bin/sh
echo '{"type":"result","is_error":true,"result":"Invalid API key"}'
"#,
    );
    let cli = ClaudeCli::with_program(&script, Duration::from_secs(10));

    let err = cli.complete("prompt").await.unwrap_err();
    assert!(matches!(err, CompletionError::ExecutionFailed(ref m) if m == "Invalid API key"));
}

#[tokio::test]
async fn test_non_zero_exit_captures_stderr() {
    let (_dir, script) = create_mock_script(
        r#"#!/bin/sh
echo 'Claude API rate limit exceeded' >&2
exit 42
"#,
    );
    let cli = ClaudeCli::with_program(&script, Duration::from_secs(10));

    match cli.complete("prompt").await.unwrap_err() {
        CompletionError::NonZeroExit { code, stderr } => {
            assert_eq!(code, 42);
            assert!(stderr.contains("rate limit exceeded"));
        }
        other => panic!("Expected NonZeroExit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_produces_clear_error() {
    let (_dir, script) = create_mock_script(
        r#"#!/bin/sh
sleep 10
"#,
    );
    let cli = ClaudeCli::with_program(&script, Duration::from_secs(1));

    let start = Instant::now();
    let err = cli.complete("prompt").await.unwrap_err();

    assert!(matches!(err, CompletionError::Timeout(1)));
    assert!(err.to_string().contains("timed out after 1 seconds"));
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_generator_with_cli_retries_until_valid() {
    let (_dir, script) = create_mock_script(
        r#"#!/bin/sh
COUNT_FILE="$(dirname "$0")/count"
COUNT=$(cat "$COUNT_FILE" 2>/dev/null || echo 0)
COUNT=$((COUNT + 1))
echo "$COUNT" > "$COUNT_FILE"
if [ "$COUNT" -lt 3 ]; then
  printf '%s\n' '{"is_error":false,"result":"feature: not a verb"}'
else
  printf '%s\n' '{"is_error":false,"result":"Add retry loop\n\n- Regenerate on bad format"}'
fi
"#,
    );

    let generator =
        MessageGenerator::new(ClaudeCli::with_program(&script, Duration::from_secs(10)));
    let result = generator.generate("diff").await.unwrap();

    assert_eq!(result.attempts, 3);
    assert!(result.conforms);
    assert_eq!(result.text, "Add retry loop\n\n- Regenerate on bad format");
}
