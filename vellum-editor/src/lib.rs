//! Bridge between a native host and a Monaco editor running in a WebView.
//!
//! The host and the editor live in different memory spaces connected only by
//! asynchronous message passing and string-based script evaluation. This
//! crate owns that boundary: it generates every script pushed into the page,
//! routes the two inbound channels (`updateText`, `console`) back out as
//! typed events, and diffs host state so each observed change is pushed
//! exactly once.
//!
//! Frontends supply a [`transport::ScriptTransport`] over their platform
//! WebView and an [`appearance::AppearanceProvider`] for light/dark
//! detection, then drive an [`EditorBridge`] from their UI context.

pub mod appearance;
pub mod assets;
pub mod bridge;
pub mod console;
pub mod protocol;
pub mod router;
pub mod script;
pub mod sync;
pub mod transport;

pub use bridge::EditorBridge;
pub use protocol::{
    CompilerOptions, ConsoleLevel, ConsoleMessage, CursorBlink, EditorConfig, EditorEvent,
    ExtraLib, OptionValue, SyntaxDefinition, Theme,
};
pub use router::FatalError;
