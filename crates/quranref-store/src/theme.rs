//! Presentation-environment ports.
//!
//! The store never touches a display directly: it reads the ambient
//! light/dark hint through [`AmbientScheme`] (only on first run, when no
//! dark-mode preference has been persisted yet) and pushes the applied
//! state through [`ThemeSink`].

/// Source of the operating environment's light/dark hint.
pub trait AmbientScheme: Send + Sync {
    fn prefers_dark(&self) -> bool;
}

/// Ambient default for environments without a usable signal (terminals,
/// tests): always light.
#[derive(Debug, Default, Clone, Copy)]
pub struct LightAmbient;

impl AmbientScheme for LightAmbient {
    fn prefers_dark(&self) -> bool {
        false
    }
}

/// Receiver of the applied dark/light state.
///
/// `apply` is invoked once at store construction and after every toggle;
/// implementations must be idempotent.
pub trait ThemeSink: Send + Sync {
    fn apply(&self, dark: bool);
}

/// Sink for frontends without a presentation layer to update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTheme;

impl ThemeSink for NoopTheme {
    fn apply(&self, _dark: bool) {}
}
