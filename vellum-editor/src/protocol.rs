// ---------------------------------------------------------------------------
// Channels: Monaco → Rust (posted via the host WebView's message handlers)
// ---------------------------------------------------------------------------

/// Carries the full document text, base64-encoded, on every user edit.
pub const UPDATE_TEXT_CHANNEL: &str = "updateText";

/// Carries `{type, args}` console and error events from the page.
pub const CONSOLE_CHANNEL: &str = "console";

// ---------------------------------------------------------------------------
// Console messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    Log,
    Warn,
    Error,
    Info,
    Debug,
    UncaughtError,
    UnhandledRejection,
}

impl ConsoleLevel {
    /// Unknown level strings downgrade to `Log`. Diagnostics are best-effort
    /// and never rejected outright for an unrecognized level.
    pub fn parse(s: &str) -> ConsoleLevel {
        match s {
            "log" => ConsoleLevel::Log,
            "warn" => ConsoleLevel::Warn,
            "error" => ConsoleLevel::Error,
            "info" => ConsoleLevel::Info,
            "debug" => ConsoleLevel::Debug,
            "uncaughtError" => ConsoleLevel::UncaughtError,
            "unhandledRejection" => ConsoleLevel::UnhandledRejection,
            _ => ConsoleLevel::Log,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConsoleLevel::Log => "log",
            ConsoleLevel::Warn => "warn",
            ConsoleLevel::Error => "error",
            ConsoleLevel::Info => "info",
            ConsoleLevel::Debug => "debug",
            ConsoleLevel::UncaughtError => "uncaughtError",
            ConsoleLevel::UnhandledRejection => "unhandledRejection",
        }
    }
}

/// One console or error event from the page, already flattened to display
/// strings. Handed to the embedder and not retained by the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub level: ConsoleLevel,
    pub arguments: Vec<String>,
}

// ---------------------------------------------------------------------------
// Syntax highlighting
// ---------------------------------------------------------------------------

/// Fixed for the lifetime of an editor session; only applied by the
/// bootstrap script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxDefinition {
    /// A language Monaco ships a grammar for, e.g. `"rust"` or `"typescript"`.
    Builtin(String),
    /// Custom language id plus a Monarch tokenizer body. The body is trusted
    /// application-authored script, not user data, and is injected verbatim.
    Custom { id: String, tokenizer: String },
}

impl SyntaxDefinition {
    pub fn language_id(&self) -> &str {
        match self {
            SyntaxDefinition::Builtin(id) => id,
            SyntaxDefinition::Custom { id, .. } => id,
        }
    }
}

// ---------------------------------------------------------------------------
// TypeScript language service configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum OptionValue {
    Bool(bool),
    Number(f64),
    Str(String),
    StrList(Vec<String>),
    /// A bare constant path such as
    /// `monaco.languages.typescript.ScriptTarget.ES2020`, emitted verbatim.
    /// Trusted application-authored script, never user data.
    Constant(String),
}

/// Ordered name → value mapping for the TypeScript defaults. Compared as a
/// whole; the synchronizer only re-pushes it when the whole value changes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompilerOptions {
    entries: Vec<(String, OptionValue)>,
}

impl CompilerOptions {
    pub fn new() -> CompilerOptions {
        CompilerOptions::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: OptionValue) -> CompilerOptions {
        self.entries.push((name.into(), value));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(String, OptionValue)] {
        &self.entries
    }
}

/// One supplementary type-declaration file for the language service.
/// `file_path` is a display name, not a filesystem path; uniqueness is not
/// enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraLib {
    pub content: String,
    pub file_path: String,
}

impl ExtraLib {
    pub fn new(content: impl Into<String>, file_path: impl Into<String>) -> ExtraLib {
        ExtraLib {
            content: content.into(),
            file_path: file_path.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Display configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorBlink {
    #[default]
    Blink,
    Smooth,
    Phase,
    Expand,
    Solid,
}

impl CursorBlink {
    pub fn as_str(&self) -> &'static str {
        match self {
            CursorBlink::Blink => "blink",
            CursorBlink::Smooth => "smooth",
            CursorBlink::Phase => "phase",
            CursorBlink::Expand => "expand",
            CursorBlink::Solid => "solid",
        }
    }
}

/// Explicit light/dark override. Absent, the system appearance decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    /// Monaco's built-in theme name.
    pub fn monaco_name(&self) -> &'static str {
        match self {
            Theme::Light => "vs",
            Theme::Dark => "vs-dark",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    pub minimap: bool,
    pub scrollbar: bool,
    pub smooth_cursor: bool,
    pub cursor_blink: CursorBlink,
    pub font_size: u32,
}

impl Default for DisplayConfig {
    fn default() -> DisplayConfig {
        DisplayConfig {
            minimap: true,
            scrollbar: true,
            smooth_cursor: false,
            cursor_blink: CursorBlink::Blink,
            font_size: 12,
        }
    }
}

// ---------------------------------------------------------------------------
// Host-side editor state snapshot
// ---------------------------------------------------------------------------

/// Immutable snapshot of everything the host wants the editor to reflect.
/// The embedder builds one per checkpoint and hands it to the bridge; the
/// bridge never calls back into the embedder to read state.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorConfig {
    pub text: String,
    pub syntax: Option<SyntaxDefinition>,
    pub compiler_options: Option<CompilerOptions>,
    pub extra_libs: Vec<ExtraLib>,
    pub display: DisplayConfig,
    pub theme: Option<Theme>,
}

impl EditorConfig {
    pub fn new(text: impl Into<String>) -> EditorConfig {
        EditorConfig {
            text: text.into(),
            syntax: None,
            compiler_options: None,
            extra_libs: Vec::new(),
            display: DisplayConfig::default(),
            theme: None,
        }
    }

    pub fn syntax(mut self, syntax: SyntaxDefinition) -> EditorConfig {
        self.syntax = Some(syntax);
        self
    }

    pub fn compiler_options(mut self, options: CompilerOptions) -> EditorConfig {
        self.compiler_options = Some(options);
        self
    }

    pub fn extra_lib(mut self, content: impl Into<String>, file_path: impl Into<String>) -> EditorConfig {
        self.extra_libs.push(ExtraLib::new(content, file_path));
        self
    }

    pub fn minimap(mut self, enabled: bool) -> EditorConfig {
        self.display.minimap = enabled;
        self
    }

    pub fn scrollbar(mut self, visible: bool) -> EditorConfig {
        self.display.scrollbar = visible;
        self
    }

    pub fn smooth_cursor(mut self, enabled: bool) -> EditorConfig {
        self.display.smooth_cursor = enabled;
        self
    }

    pub fn cursor_blink(mut self, style: CursorBlink) -> EditorConfig {
        self.display.cursor_blink = style;
        self
    }

    pub fn font_size(mut self, size: u32) -> EditorConfig {
        self.display.font_size = size;
        self
    }

    pub fn theme(mut self, theme: Theme) -> EditorConfig {
        self.theme = Some(theme);
        self
    }
}

// ---------------------------------------------------------------------------
// Events: bridge → embedder
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The user edited the document; `text` is the full new content.
    TextChanged { text: String },
    /// A console or error event from the page.
    Console { message: ConsoleMessage },
    /// A script evaluation failed. `details` is a formatted description
    /// suitable for a blocking dialog (script preview, platform description,
    /// exception message/line/column when available). A debugging aid, not a
    /// structured error channel.
    ScriptFailure { details: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_level_known_strings() {
        assert_eq!(ConsoleLevel::parse("warn"), ConsoleLevel::Warn);
        assert_eq!(ConsoleLevel::parse("uncaughtError"), ConsoleLevel::UncaughtError);
        assert_eq!(
            ConsoleLevel::parse("unhandledRejection"),
            ConsoleLevel::UnhandledRejection
        );
    }

    #[test]
    fn console_level_unknown_falls_back_to_log() {
        assert_eq!(ConsoleLevel::parse("trace"), ConsoleLevel::Log);
        assert_eq!(ConsoleLevel::parse(""), ConsoleLevel::Log);
        assert_eq!(ConsoleLevel::parse("WARN"), ConsoleLevel::Log);
    }

    #[test]
    fn console_level_round_trips_through_as_str() {
        for level in [
            ConsoleLevel::Log,
            ConsoleLevel::Warn,
            ConsoleLevel::Error,
            ConsoleLevel::Info,
            ConsoleLevel::Debug,
            ConsoleLevel::UncaughtError,
            ConsoleLevel::UnhandledRejection,
        ] {
            assert_eq!(ConsoleLevel::parse(level.as_str()), level);
        }
    }

    #[test]
    fn config_builder_sets_display_fields() {
        let config = EditorConfig::new("fn main() {}")
            .minimap(false)
            .scrollbar(false)
            .smooth_cursor(true)
            .cursor_blink(CursorBlink::Phase)
            .font_size(16)
            .theme(Theme::Dark);

        assert!(!config.display.minimap);
        assert!(!config.display.scrollbar);
        assert!(config.display.smooth_cursor);
        assert_eq!(config.display.cursor_blink, CursorBlink::Phase);
        assert_eq!(config.display.font_size, 16);
        assert_eq!(config.theme, Some(Theme::Dark));
    }

    #[test]
    fn compiler_options_equality_is_by_value() {
        let a = CompilerOptions::new()
            .set("strict", OptionValue::Bool(true))
            .set("target", OptionValue::Str("es2020".to_string()));
        let b = CompilerOptions::new()
            .set("strict", OptionValue::Bool(true))
            .set("target", OptionValue::Str("es2020".to_string()));
        assert_eq!(a, b);

        let c = CompilerOptions::new().set("strict", OptionValue::Bool(false));
        assert_ne!(a, c);
    }
}
