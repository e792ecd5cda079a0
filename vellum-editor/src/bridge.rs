//! The editor bridge: one instance per embedded editor.
//!
//! Owned by the host's UI context; every method must be called from that one
//! context. Script evaluation is the sole asynchronous boundary, and its
//! completion callback only reports failures outward; nothing here blocks.

use std::rc::Rc;

use crate::appearance::{resolve_theme, AppearanceProvider};
use crate::protocol::{EditorConfig, EditorEvent, Theme};
use crate::router::{self, FatalError, Routed};
use crate::script;
use crate::sync::StateSynchronizer;
use crate::transport::{format_script_failure, ScriptTransport};

pub struct EditorBridge<T: ScriptTransport> {
    transport: T,
    appearance: Box<dyn AppearanceProvider>,
    on_event: Rc<dyn Fn(EditorEvent)>,
    /// Created once the hosting page has loaded and the bootstrap script has
    /// been issued. `None` means "not ready": sync checkpoints are dropped.
    sync: Option<StateSynchronizer>,
    /// Remembered from the latest snapshot so a system-appearance change can
    /// resolve the theme without a fresh snapshot in hand.
    theme_override: Option<Theme>,
}

impl<T: ScriptTransport> EditorBridge<T> {
    pub fn new(
        transport: T,
        appearance: Box<dyn AppearanceProvider>,
        on_event: impl Fn(EditorEvent) + 'static,
    ) -> EditorBridge<T> {
        EditorBridge {
            transport,
            appearance,
            on_event: Rc::new(on_event),
            sync: None,
            theme_override: None,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.sync.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The hosting page finished its initial load: issue the bootstrap script
    /// and seed the synchronizer baselines with what it pushed. Display
    /// configuration and theme are captured from this snapshot; later
    /// checkpoints diff display settings against it.
    pub fn page_did_load(&mut self, config: &EditorConfig) {
        let theme = resolve_theme(config.theme, self.appearance.as_ref());
        self.theme_override = config.theme;
        self.eval(script::bootstrap(config, theme));
        self.sync = Some(StateSynchronizer::new(config));
    }

    /// One synchronization checkpoint. Called by the embedder at least once
    /// after each change to its held state; calling it more often is safe.
    pub fn synchronize(&mut self, config: &EditorConfig) {
        let scripts = match self.sync.as_mut() {
            Some(sync) => sync.synchronize(config),
            None => {
                log::warn!("editor not ready yet, dropping synchronization checkpoint");
                return;
            }
        };
        self.theme_override = config.theme;
        for script in scripts {
            self.eval(script);
        }
    }

    /// The platform reported a light/dark switch. Issues a standalone theme
    /// push outside the normal diff cycle; an explicit override still wins.
    pub fn system_appearance_changed(&self) {
        if self.sync.is_none() {
            return;
        }
        let theme = resolve_theme(self.theme_override, self.appearance.as_ref());
        self.eval(script::set_theme(theme));
    }

    /// Dispatch one inbound message from the page. Returns `Err` only for
    /// the broken-bridge class (malformed `updateText`); the embedder should
    /// treat that as unrecoverable.
    pub fn receive(&mut self, channel: &str, payload: &serde_json::Value) -> Result<(), FatalError> {
        match router::route(channel, payload)? {
            Routed::TextChanged(text) => {
                // Baseline first, so the next checkpoint cannot push this
                // same text straight back at the editor.
                if let Some(sync) = self.sync.as_mut() {
                    sync.note_editor_text(&text);
                }
                (self.on_event)(EditorEvent::TextChanged { text });
            }
            Routed::Console(message) => {
                (self.on_event)(EditorEvent::Console { message });
            }
            Routed::Dropped => {}
        }
        Ok(())
    }

    fn eval(&self, script: String) {
        let on_event = Rc::clone(&self.on_event);
        let script_copy = script.clone();
        self.transport.evaluate(
            &script,
            Box::new(move |result| {
                if let Err(error) = result {
                    log::error!("script evaluation failed: {}", error);
                    on_event(EditorEvent::ScriptFailure {
                        details: format_script_failure(&script_copy, &error),
                    });
                }
            }),
        );
    }
}
