//! Headless exerciser for the editor bridge.
//!
//! Drives a full session against the recording transport: bootstrap, user
//! edits arriving over `updateText`, console traffic, live option changes,
//! and a system appearance flip. Prints every script the bridge would have
//! evaluated in a real WebView.

use serde_json::json;
use std::process;

use vellum_editor::appearance::{Appearance, FixedAppearance};
use vellum_editor::protocol::{CONSOLE_CHANNEL, UPDATE_TEXT_CHANNEL};
use vellum_editor::script;
use vellum_editor::transport::RecordingTransport;
use vellum_editor::{
    CompilerOptions, CursorBlink, EditorBridge, EditorConfig, EditorEvent, OptionValue,
};

fn main() {
    env_logger::init();

    let transport = RecordingTransport::new();
    let mut bridge = EditorBridge::new(
        transport.clone(),
        Box::new(FixedAppearance(Appearance::Dark)),
        |event| match event {
            EditorEvent::TextChanged { text } => {
                println!("[event] text changed ({} bytes)", text.len());
            }
            EditorEvent::Console { message } => {
                println!(
                    "[event] console {}: {}",
                    message.level.as_str(),
                    message.arguments.join(" ")
                );
            }
            EditorEvent::ScriptFailure { details } => {
                println!("[event] script failure:\n{}", details);
            }
        },
    );

    let config = EditorConfig::new("const greeting: string = \"hello\";\n")
        .compiler_options(CompilerOptions::new().set("strict", OptionValue::Bool(true)))
        .extra_lib("declare const vellum: { version: string };", "vellum.d.ts")
        .cursor_blink(CursorBlink::Smooth)
        .font_size(13);

    bridge.page_did_load(&config);

    // The user types in the editor.
    let edited = "const greeting: string = \"hello, world\";\n";
    if let Err(e) = bridge.receive(UPDATE_TEXT_CHANNEL, &json!(script::encode_text(edited))) {
        log::error!("{}", e);
        process::exit(1);
    }

    // The page logs something.
    bridge
        .receive(CONSOLE_CHANNEL, &json!({"type": "info", "args": ["editor ready"]}))
        .expect("console traffic is never fatal");

    // The host flips an option; only that field is pushed.
    bridge.synchronize(&EditorConfig { text: edited.to_string(), ..config.clone() }.font_size(15));

    bridge.system_appearance_changed();

    println!("\nscripts evaluated:");
    for (i, script) in transport.scripts().iter().enumerate() {
        println!("--- [{}] ---\n{}", i, script);
    }
}
