//! System light/dark appearance as an injectable capability.
//!
//! The bridge never reads ambient platform state directly. Frontends
//! implement [`AppearanceProvider`] over their platform's mechanism and call
//! [`crate::bridge::EditorBridge::system_appearance_changed`] when the
//! platform notifies them.

use crate::protocol::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

pub trait AppearanceProvider {
    fn current_appearance(&self) -> Appearance;
}

/// Canned appearance for tests and headless hosts.
#[derive(Debug, Clone, Copy)]
pub struct FixedAppearance(pub Appearance);

impl AppearanceProvider for FixedAppearance {
    fn current_appearance(&self) -> Appearance {
        self.0
    }
}

/// An explicit theme override wins; otherwise the system appearance decides.
/// Returns Monaco's built-in theme name.
pub fn resolve_theme(override_: Option<Theme>, provider: &dyn AppearanceProvider) -> &'static str {
    match override_ {
        Some(theme) => theme.monaco_name(),
        None => match provider.current_appearance() {
            Appearance::Light => Theme::Light.monaco_name(),
            Appearance::Dark => Theme::Dark.monaco_name(),
        },
    }
}
