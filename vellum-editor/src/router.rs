//! Inbound message router: embedded runtime → host.
//!
//! The page registers exactly two channels at boot. `updateText` carries the
//! document and is load-bearing; a payload that fails base64/UTF-8 decoding
//! means the transport itself is compromised, and the host must stop rather
//! than risk silently diverging from the user's edits. `console` is
//! diagnostic-only and never fatal.

use std::fmt;

use crate::console;
use crate::protocol::{ConsoleMessage, CONSOLE_CHANNEL, UPDATE_TEXT_CHANNEL};
use crate::script;

/// Broken-bridge contract violation. Surfaced to the embedder's top-level
/// error boundary; the expectation is that it logs and terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatalError {
    pub reason: String,
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "editor bridge contract violation: {}", self.reason)
    }
}

impl std::error::Error for FatalError {}

/// Outcome of routing one inbound message.
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    TextChanged(String),
    Console(ConsoleMessage),
    /// Malformed diagnostics payload or unrecognized channel; nothing to do.
    Dropped,
}

/// Dispatch one message from the page. Messages are handed in per-channel
/// post order by the host's WebView glue; no reordering happens here.
pub fn route(channel: &str, payload: &serde_json::Value) -> Result<Routed, FatalError> {
    match channel {
        UPDATE_TEXT_CHANNEL => {
            let encoded = payload.as_str().ok_or_else(|| FatalError {
                reason: format!("updateText payload is not a string: {}", payload),
            })?;
            let text = script::decode_text(encoded).map_err(|e| FatalError {
                reason: format!("updateText payload rejected: {}", e),
            })?;
            Ok(Routed::TextChanged(text))
        }
        CONSOLE_CHANNEL => Ok(match console::relay(payload) {
            Some(message) => Routed::Console(message),
            None => Routed::Dropped,
        }),
        other => {
            log::warn!("dropping message on unrecognized channel {:?}", other);
            Ok(Routed::Dropped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::ConsoleLevel;
    use serde_json::json;

    #[test]
    fn update_text_decodes_to_the_original_string() {
        let payload = json!(script::encode_text("fn main() { println!(\"hi\"); }"));
        match route(UPDATE_TEXT_CHANNEL, &payload).unwrap() {
            Routed::TextChanged(text) => assert_eq!(text, "fn main() { println!(\"hi\"); }"),
            other => panic!("unexpected route: {:?}", other),
        }
    }

    #[test]
    fn malformed_base64_is_fatal() {
        let err = route(UPDATE_TEXT_CHANNEL, &json!("not-base64!!")).unwrap_err();
        assert!(err.reason.contains("updateText payload rejected"));
        assert!(err.to_string().contains("contract violation"));
    }

    #[test]
    fn non_string_update_text_payload_is_fatal() {
        assert!(route(UPDATE_TEXT_CHANNEL, &json!({"oops": 1})).is_err());
        assert!(route(UPDATE_TEXT_CHANNEL, &json!(42)).is_err());
    }

    #[test]
    fn invalid_utf8_in_update_text_is_fatal() {
        use base64::engine::general_purpose::STANDARD;
        use base64::Engine;
        let payload = json!(STANDARD.encode([0xc3, 0x28]));
        assert!(route(UPDATE_TEXT_CHANNEL, &payload).is_err());
    }

    #[test]
    fn console_messages_route_to_the_relay() {
        let payload = json!({"type": "error", "args": ["oops"]});
        match route(CONSOLE_CHANNEL, &payload).unwrap() {
            Routed::Console(message) => {
                assert_eq!(message.level, ConsoleLevel::Error);
                assert_eq!(message.arguments, vec!["oops"]);
            }
            other => panic!("unexpected route: {:?}", other),
        }
    }

    #[test]
    fn malformed_console_payloads_are_dropped_not_fatal() {
        assert_eq!(
            route(CONSOLE_CHANNEL, &json!({"nope": true})).unwrap(),
            Routed::Dropped
        );
    }

    #[test]
    fn unknown_channels_are_dropped() {
        assert_eq!(
            route("telemetry", &json!("anything")).unwrap(),
            Routed::Dropped
        );
    }
}
