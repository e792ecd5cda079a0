//! Console/diagnostics relay: inbound `console` payloads → typed messages.
//!
//! Diagnostics are best-effort. Malformed payloads are logged and dropped;
//! they never interrupt the text-sync path. No buffering, filtering, or
//! rate limiting happens here.

use serde::Deserialize;

use crate::protocol::{ConsoleLevel, ConsoleMessage};

#[derive(Deserialize)]
struct ConsolePayload {
    #[serde(rename = "type")]
    kind: String,
    args: Vec<serde_json::Value>,
}

/// Map a `console` channel payload to a [`ConsoleMessage`]. Returns `None`
/// for payloads missing the required keys or with the wrong shapes.
pub fn relay(payload: &serde_json::Value) -> Option<ConsoleMessage> {
    let payload: ConsolePayload = match serde_json::from_value(payload.clone()) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("dropping malformed console payload: {} (payload: {})", e, payload);
            return None;
        }
    };

    let arguments = payload.args.iter().map(display_string).collect();
    Some(ConsoleMessage {
        level: ConsoleLevel::parse(&payload.kind),
        arguments,
    })
}

/// Best-effort display form. The page-side hook JSON-stringifies each
/// argument when it can, so strings pass through as-is; anything else falls
/// back to its JSON rendering.
fn display_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}
