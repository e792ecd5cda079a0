//! Script generation for the host → editor direction.
//!
//! Every script the bridge evaluates is built here. User text always crosses
//! the boundary base64-framed inside an `atob(...)` call; structured values
//! go through [`JsValue`] so a single escaping routine covers every string
//! that ends up inside generated source.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::protocol::{
    CompilerOptions, DisplayConfig, EditorConfig, ExtraLib, OptionValue, SyntaxDefinition,
};

// ---------------------------------------------------------------------------
// Base64 text framing
// ---------------------------------------------------------------------------

pub fn encode_text(text: &str) -> String {
    STANDARD.encode(text.as_bytes())
}

/// Decode an inbound base64 payload back to UTF-8 text. Callers on the
/// `updateText` path treat any error here as a broken-bridge contract
/// violation.
pub fn decode_text(encoded: &str) -> Result<String, String> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| format!("invalid base64: {}", e))?;
    String::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {}", e))
}

// ---------------------------------------------------------------------------
// Script value builder
// ---------------------------------------------------------------------------

/// A value rendered into script-literal form.
#[derive(Debug, Clone, PartialEq)]
pub enum JsValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    Array(Vec<JsValue>),
    Object(Vec<(String, JsValue)>),
    /// Trusted application-authored script emitted verbatim. Never used for
    /// user-edited document text.
    Raw(String),
}

impl JsValue {
    pub fn emit(&self) -> String {
        let mut out = String::new();
        self.write(&mut out);
        out
    }

    fn write(&self, out: &mut String) {
        match self {
            JsValue::Null => out.push_str("null"),
            JsValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            JsValue::Number(n) => {
                if n.is_finite() {
                    out.push_str(&n.to_string());
                } else {
                    out.push_str("null");
                }
            }
            JsValue::Str(s) => {
                out.push('"');
                out.push_str(&escape_js_string(s));
                out.push('"');
            }
            JsValue::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write(out);
                }
                out.push(']');
            }
            JsValue::Object(entries) => {
                out.push_str("{ ");
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    if is_identifier(key) {
                        out.push_str(key);
                    } else {
                        out.push('"');
                        out.push_str(&escape_js_string(key));
                        out.push('"');
                    }
                    out.push_str(": ");
                    value.write(out);
                }
                out.push_str(" }");
            }
            JsValue::Raw(code) => out.push_str(code),
        }
    }
}

/// Escape a string for embedding inside a double-quoted script literal.
/// Covers quotes, backslashes, C0 controls, and the line/paragraph
/// separators that are line terminators in script source.
pub fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `atob("…")` frame for user text. The base64 alphabet contains no quote or
/// backslash characters, so the payload needs no further escaping.
fn atob_frame(text: &str) -> String {
    format!("atob(\"{}\")", encode_text(text))
}

// ---------------------------------------------------------------------------
// Live update scripts
// ---------------------------------------------------------------------------

pub fn set_text(text: &str) -> String {
    format!("window.editor?.setText({});", atob_frame(text))
}

pub fn set_compiler_options(options: Option<&CompilerOptions>) -> String {
    let literal = match options {
        Some(options) => compiler_options_literal(options),
        None => "{ }".to_string(),
    };
    format!(
        "window.editor?.updateDefaultTypescriptCompilerOptions({});",
        literal
    )
}

/// Full-list push; the editor side replaces whatever was registered before.
pub fn set_extra_libs(libs: &[ExtraLib]) -> String {
    let list = JsValue::Array(libs.iter().map(extra_lib_entry).collect()).emit();
    format!(
        "window.editor?.withTypescript(typescript => {{\n    typescript.typescriptDefaults.setExtraLibs({});\n}});",
        list
    )
}

pub fn set_theme(theme_name: &str) -> String {
    format!(
        "window.editor?.withMonaco(monaco => {{\n    monaco.editor.setTheme(\"{}\");\n}});",
        theme_name
    )
}

pub fn update_display_options(display: &DisplayConfig) -> String {
    format!(
        "window.editor?.updateOptions({});",
        JsValue::Object(display_option_entries(display)).emit()
    )
}

fn compiler_options_literal(options: &CompilerOptions) -> String {
    let entries = options
        .entries()
        .iter()
        .map(|(name, value)| (name.clone(), option_value(value)))
        .collect();
    JsValue::Object(entries).emit()
}

fn option_value(value: &OptionValue) -> JsValue {
    match value {
        OptionValue::Bool(b) => JsValue::Bool(*b),
        OptionValue::Number(n) => JsValue::Number(*n),
        OptionValue::Str(s) => JsValue::Str(s.clone()),
        OptionValue::StrList(items) => {
            JsValue::Array(items.iter().map(|s| JsValue::Str(s.clone())).collect())
        }
        OptionValue::Constant(path) => JsValue::Raw(path.clone()),
    }
}

fn extra_lib_entry(lib: &ExtraLib) -> JsValue {
    JsValue::Object(vec![
        ("content".to_string(), JsValue::Raw(atob_frame(&lib.content))),
        ("filePath".to_string(), JsValue::Str(lib.file_path.clone())),
    ])
}

fn display_option_entries(display: &DisplayConfig) -> Vec<(String, JsValue)> {
    vec![
        (
            "minimap".to_string(),
            JsValue::Object(vec![("enabled".to_string(), JsValue::Bool(display.minimap))]),
        ),
        (
            "scrollbar".to_string(),
            JsValue::Object(vec![(
                "vertical".to_string(),
                JsValue::Str(if display.scrollbar { "visible" } else { "hidden" }.to_string()),
            )]),
        ),
        (
            "cursorSmoothCaretAnimation".to_string(),
            JsValue::Bool(display.smooth_cursor),
        ),
        (
            "cursorBlinking".to_string(),
            JsValue::Str(display.cursor_blink.as_str().to_string()),
        ),
        (
            "fontSize".to_string(),
            JsValue::Number(display.font_size as f64),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

/// The one-shot script evaluated when the hosting page finishes loading:
/// optional tokenizer registration, initial language-service state, editor
/// creation, and the responsive-viewport meta tag.
pub fn bootstrap(config: &EditorConfig, theme_name: &str) -> String {
    let mut body = String::new();

    if let Some(SyntaxDefinition::Custom { id, tokenizer }) = &config.syntax {
        let id = JsValue::Str(id.clone()).emit();
        body.push_str(&format!(
            "monaco.languages.register({{ id: {id} }});\n\
             monaco.languages.setMonarchTokensProvider({id}, (function() {{\n{tokenizer}\n}})());\n",
        ));
    }

    if let Some(options) = &config.compiler_options {
        if !options.is_empty() {
            body.push_str(&format!(
                "editor.updateDefaultTypescriptCompilerOptions({});\n",
                compiler_options_literal(options)
            ));
        }
    }

    for lib in &config.extra_libs {
        body.push_str(&format!(
            "editor.withTypescript(typescript => {{\n    typescript.typescriptDefaults.addExtraLib({}, {});\n}});\n",
            atob_frame(&lib.content),
            JsValue::Str(lib.file_path.clone()).emit(),
        ));
    }

    let mut create = vec![
        ("value".to_string(), JsValue::Raw(atob_frame(&config.text))),
        ("automaticLayout".to_string(), JsValue::Bool(true)),
        ("theme".to_string(), JsValue::Str(theme_name.to_string())),
    ];
    if let Some(syntax) = &config.syntax {
        create.push((
            "language".to_string(),
            JsValue::Str(syntax.language_id().to_string()),
        ));
    }
    create.extend(display_option_entries(&config.display));

    format!(
        "editor.withMonaco(monaco => {{\n\
         {body}\
         editor.create({create});\n\
         var meta = document.createElement('meta'); \
         meta.setAttribute('name', 'viewport'); \
         meta.setAttribute('content', 'width=device-width'); \
         document.getElementsByTagName('head')[0].appendChild(meta);\n\
         return true;\n\
         }});",
        create = JsValue::Object(create).emit(),
    )
}

// ---------------------------------------------------------------------------
// Console hook
// ---------------------------------------------------------------------------

/// User script injected at document start. Wraps the console methods plus
/// `window.onerror` / `window.onunhandledrejection` and posts `{type, args}`
/// on the `console` channel, with each argument JSON-stringified best-effort.
///
/// `post_target` is the host-specific function expression for posting on that
/// channel, e.g. [`WEBKIT_CONSOLE_POST`].
pub fn console_hook(post_target: &str) -> String {
    format!(
        r#"(function() {{
    const orig = {{
        log: console.log,
        warn: console.warn,
        error: console.error,
        info: console.info,
        debug: console.debug
    }};

    console.log = function () {{ orig.log.apply(console, arguments); send('log', arguments); }};
    console.warn = function () {{ orig.warn.apply(console, arguments); send('warn', arguments); }};
    console.error = function () {{ orig.error.apply(console, arguments); send('error', arguments); }};
    console.info = function () {{ orig.info.apply(console, arguments); send('info', arguments); }};
    console.debug = function () {{ orig.debug.apply(console, arguments); send('debug', arguments); }};

    window.onerror = (message, source, lineno, colno, error) => {{
        send('uncaughtError', [message, source, lineno, colno, error?.stack ?? null]);
    }};

    window.onunhandledrejection = event => {{
        const reason = event.reason ?? {{}};
        send('unhandledRejection', [reason.message ?? String(reason), reason.stack ?? null]);
    }};

    function send(type, args) {{
        try {{
            {post_target}({{
                type: type,
                args: Array.prototype.slice.call(args).map(function(a) {{
                    try {{ return JSON.stringify(a); }} catch (e) {{ return String(a); }}
                }})
            }});
        }} catch (e) {{
        }}
    }}
}})();"#
    )
}

/// Post expression for WebKit hosts that registered a `console` message
/// handler.
pub const WEBKIT_CONSOLE_POST: &str = "window.webkit.messageHandlers.console.postMessage";
