//! Host → embedded-runtime script channel.
//!
//! The transport is the only asynchronous boundary in the bridge: callers
//! never block on it, and completion may arrive on a later turn of the owner
//! context. No retries, no cancellation; a hung script is not detected.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Loosely-typed result of an evaluation. Most bridge scripts `return true`
/// as a completion marker and the result is ignored.
pub type ScriptValue = serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptError {
    /// Platform description of the failure.
    pub description: String,
    /// Message of the thrown exception, when the runtime reported one.
    pub exception: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)?;
        if let Some(exception) = &self.exception {
            write!(f, " ({})", exception)?;
        }
        Ok(())
    }
}

pub type Completion = Box<dyn FnOnce(Result<ScriptValue, ScriptError>)>;

/// One-way script execution into the embedded runtime's global scope.
/// Implementations wrap the platform WebView's evaluate call; scripts issued
/// from the owner context reach the runtime in issue order.
pub trait ScriptTransport {
    fn evaluate(&self, script: &str, done: Completion);
}

/// Character budget for the script preview in a failure message.
pub const SCRIPT_PREVIEW_LIMIT: usize = 200;

/// Build the user-facing description of a failed evaluation: truncated
/// script preview, platform description, and exception details when present.
/// The embedder presents this in a blocking dialog; the failure is non-fatal.
pub fn format_script_failure(script: &str, error: &ScriptError) -> String {
    let preview: String = script.chars().take(SCRIPT_PREVIEW_LIMIT).collect();
    let truncated = script.chars().count() > SCRIPT_PREVIEW_LIMIT;

    let mut message = String::from("Something went wrong while evaluating the following script:\n");
    message.push_str(&preview);
    if truncated {
        message.push('…');
    }
    message.push_str("\n\n");
    message.push_str(&format!("Description: {}\n", error.description));
    if let Some(exception) = &error.exception {
        message.push_str(&format!("Exception: {}\n", exception));
    }
    if let Some(line) = error.line {
        message.push_str(&format!("Line: {}\n", line));
    }
    if let Some(column) = error.column {
        message.push_str(&format!("Column: {}\n", column));
    }
    message
}

/// Transport that records every script and completes synchronously. Used by
/// the harness and by tests; real frontends wrap their WebView instead.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    scripts: Rc<RefCell<Vec<String>>>,
    fail_with: Rc<RefCell<Option<ScriptError>>>,
}

impl RecordingTransport {
    pub fn new() -> RecordingTransport {
        RecordingTransport::default()
    }

    /// Every evaluated script, in issue order.
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }

    pub fn take_scripts(&self) -> Vec<String> {
        self.scripts.borrow_mut().drain(..).collect()
    }

    /// Fail the next evaluations with `error` until cleared.
    pub fn fail_with(&self, error: ScriptError) {
        *self.fail_with.borrow_mut() = Some(error);
    }
}

impl ScriptTransport for RecordingTransport {
    fn evaluate(&self, script: &str, done: Completion) {
        self.scripts.borrow_mut().push(script.to_string());
        match self.fail_with.borrow().clone() {
            Some(error) => done(Err(error)),
            None => done(Ok(ScriptValue::Bool(true))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error() -> ScriptError {
        ScriptError {
            description: "A JavaScript exception occurred".to_string(),
            exception: Some("ReferenceError: editor is not defined".to_string()),
            line: Some(3),
            column: Some(14),
        }
    }

    #[test]
    fn failure_message_carries_all_fields() {
        let message = format_script_failure("window.editor?.setText(atob(\"aGk=\"));", &error());
        assert!(message.contains("window.editor?.setText"));
        assert!(message.contains("Description: A JavaScript exception occurred"));
        assert!(message.contains("Exception: ReferenceError: editor is not defined"));
        assert!(message.contains("Line: 3"));
        assert!(message.contains("Column: 14"));
        assert!(!message.contains('…'));
    }

    #[test]
    fn failure_message_truncates_long_scripts_at_200_chars() {
        let script = "x".repeat(500);
        let message = format_script_failure(&script, &error());
        assert!(message.contains(&format!("{}…", "x".repeat(200))));
        assert!(!message.contains(&"x".repeat(201)));
    }

    #[test]
    fn failure_message_truncation_is_char_based() {
        // Multi-byte characters must not be split.
        let script = "ß".repeat(300);
        let message = format_script_failure(&script, &error());
        assert!(message.contains(&format!("{}…", "ß".repeat(200))));
    }

    #[test]
    fn failure_message_omits_absent_fields() {
        let error = ScriptError {
            description: "evaluation rejected".to_string(),
            exception: None,
            line: None,
            column: None,
        };
        let message = format_script_failure("1 + 1", &error);
        assert!(!message.contains("Exception:"));
        assert!(!message.contains("Line:"));
        assert!(!message.contains("Column:"));
    }

    #[test]
    fn recording_transport_completes_in_issue_order() {
        let transport = RecordingTransport::new();
        transport.evaluate("first", Box::new(|r| assert!(r.is_ok())));
        transport.evaluate("second", Box::new(|r| assert!(r.is_ok())));
        assert_eq!(transport.scripts(), vec!["first", "second"]);
    }

    #[test]
    fn recording_transport_injected_failure_reaches_callback() {
        let transport = RecordingTransport::new();
        transport.fail_with(error());
        transport.evaluate(
            "boom",
            Box::new(|r| {
                let err = r.unwrap_err();
                assert_eq!(err.line, Some(3));
            }),
        );
    }
}
