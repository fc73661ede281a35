//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Extra modifier accepted for the login/signup switch, alongside Ctrl
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SWITCH_FORM_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SWITCH_FORM_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Login/signup switch shortcut display
/// - macOS: "Cmd+N"
/// - Linux/Windows: "Ctrl+N"
#[cfg(target_os = "macos")]
pub const SWITCH_FORM_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const SWITCH_FORM_SHORTCUT: &str = "Ctrl+N";
