//! Key bindings shared by the table and paginator components.
//!
//! A [`Binding`] is a set of key presses (a `crossterm` key code plus
//! modifiers) together with the short help text shown to the user. Components
//! expose their bindings through the [`KeyMap`] trait so an application can
//! render contextual help.
//!
//! ```rust
//! use bubbletea_datatable::key::{Binding, KeyPress};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let save = Binding::new(vec![KeyPress::ctrl('s')]).with_help("ctrl+s", "save");
//! let msg = KeyMsg {
//!     key: KeyCode::Char('s'),
//!     modifiers: KeyModifiers::CONTROL,
//! };
//! assert!(save.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code and the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// A key press with no modifiers.
    pub fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    /// A character key held together with Ctrl.
    pub fn ctrl(c: char) -> Self {
        Self {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        // Shift is implied by the character itself for printable keys.
        let held = msg.modifiers.difference(KeyModifiers::SHIFT);
        let wanted = self.modifiers.difference(KeyModifiers::SHIFT);
        held == wanted
    }
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

impl From<char> for KeyPress {
    fn from(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key label, e.g. `"↑/k"`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// A named set of key presses that trigger one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from the given key presses.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Attaches help text (builder pattern).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Enables or disables the binding. Disabled bindings never match and are
    /// left out of help output.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Returns whether the binding is active.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// The key presses of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text of this binding.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns true if the key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Implemented by components that publish their key bindings for help views.
pub trait KeyMap {
    /// The most important bindings, shown on a single line.
    fn short_help(&self) -> Vec<&Binding>;

    /// All bindings, grouped into columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_plain_binding_matches_code() {
        let b = Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]);
        assert!(b.matches(&key(KeyCode::Up, KeyModifiers::NONE)));
        assert!(b.matches(&key(KeyCode::Char('k'), KeyModifiers::NONE)));
        assert!(!b.matches(&key(KeyCode::Down, KeyModifiers::NONE)));
    }

    #[test]
    fn test_modifiers_must_match() {
        let b = Binding::new(vec![KeyPress::ctrl('s')]);
        assert!(b.matches(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&key(KeyCode::Char('s'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_shift_is_ignored() {
        let b = Binding::new(vec!['A']);
        assert!(b.matches(&key(KeyCode::Char('A'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = Binding::new(vec!['e']).with_help("e", "edit");
        b.set_enabled(false);
        assert!(!b.enabled());
        assert!(!b.matches(&key(KeyCode::Char('e'), KeyModifiers::NONE)));
        assert_eq!(b.help().desc, "edit");
    }
}
