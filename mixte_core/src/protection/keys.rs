//! Keyboard shortcut policy.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Key pressed, independent of the windowing toolkit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Printable key, stored lowercase
    Char(char),
    /// Function key F1..F24
    F(u8),
    Other,
}

impl Key {
    pub fn char(c: char) -> Self {
        Key::Char(c.to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// A key with its modifiers, e.g. `Ctrl+Shift+I`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::default())
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(
            Key::char(c),
            Modifiers {
                ctrl: true,
                ..Modifiers::default()
            },
        )
    }

    pub fn ctrl_shift(c: char) -> Self {
        Self::new(
            Key::char(c),
            Modifiers {
                ctrl: true,
                shift: true,
                ..Modifiers::default()
            },
        )
    }
}

impl FromStr for KeyCombo {
    type Err = CalcError;

    /// Parse "Ctrl+Shift+I", "ctrl+s" or "F12"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CalcError::invalid_input("key", s, reason);
        let mut modifiers = Modifiers::default();
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                other => {
                    if key.is_some() {
                        return Err(invalid("more than one key"));
                    }
                    key = Some(parse_key(other).ok_or_else(|| invalid("unknown key"))?);
                }
            }
        }

        key.map(|key| KeyCombo::new(key, modifiers))
            .ok_or_else(|| invalid("no key given"))
    }
}

fn parse_key(name: &str) -> Option<Key> {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(Key::char(c)),
        (Some('f'), Some(_)) => name[1..].parse().ok().filter(|n| (1..=24).contains(n)).map(Key::F),
        _ => None,
    }
}

impl std::fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.modifiers.ctrl {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.shift {
            write!(f, "Shift+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        match self.key {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::F(n) => write!(f, "F{}", n),
            Key::Other => write!(f, "?"),
        }
    }
}

/// Element an event is aimed at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Target {
    /// Course text, figures, results
    #[default]
    Content,
    /// Text field or choice list of a calculator form
    Input,
}

/// What the guard does with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Allow,
    /// Swallowed without feedback
    Suppress,
    /// Swallowed, and the protection notification is raised
    SuppressAndNotify,
}

impl Decision {
    pub fn is_blocked(&self) -> bool {
        !matches!(self, Decision::Allow)
    }

    pub fn notifies(&self) -> bool {
        matches!(self, Decision::SuppressAndNotify)
    }
}

/// One blocked shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockRule {
    pub combo: KeyCombo,
    pub action: &'static str,
    pub notify: bool,
    /// Only blocked outside form inputs
    pub content_only: bool,
}

impl BlockRule {
    const fn new(combo: KeyCombo, action: &'static str, notify: bool, content_only: bool) -> Self {
        Self {
            combo,
            action,
            notify,
            content_only,
        }
    }

    /// Alt is not part of the match
    pub fn matches(&self, combo: &KeyCombo) -> bool {
        self.combo.key == combo.key
            && self.combo.modifiers.ctrl == combo.modifiers.ctrl
            && self.combo.modifiers.shift == combo.modifiers.shift
    }
}

/// Shortcuts blocked while protection is active.
///
/// Ctrl and Shift match exactly and Alt is ignored: `Ctrl+S` and
/// `Ctrl+Alt+S` are blocked, `Ctrl+Shift+S` is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPolicy {
    rules: Vec<BlockRule>,
}

impl Default for KeyPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

impl KeyPolicy {
    /// Save, view source, print, developer tools, select all and copy
    pub fn standard() -> Self {
        Self {
            rules: vec![
                BlockRule::new(KeyCombo::ctrl('s'), "save", true, false),
                BlockRule::new(KeyCombo::ctrl('u'), "view source", true, false),
                BlockRule::new(KeyCombo::ctrl('p'), "print", true, false),
                BlockRule::new(KeyCombo::ctrl_shift('i'), "developer tools", false, false),
                BlockRule::new(KeyCombo::ctrl_shift('j'), "console", false, false),
                BlockRule::new(KeyCombo::ctrl_shift('c'), "inspect element", false, false),
                BlockRule::new(KeyCombo::plain(Key::F(12)), "developer tools", false, false),
                BlockRule::new(KeyCombo::ctrl('a'), "select all", false, false),
                BlockRule::new(KeyCombo::ctrl('c'), "copy", false, true),
            ],
        }
    }

    pub fn rules(&self) -> &[BlockRule] {
        &self.rules
    }

    pub fn decide(&self, combo: &KeyCombo, target: Target) -> Decision {
        let rule = self
            .rules
            .iter()
            .find(|r| r.matches(combo) && !(r.content_only && target == Target::Input));
        match rule {
            Some(r) if r.notify => Decision::SuppressAndNotify,
            Some(_) => Decision::Suppress,
            None => Decision::Allow,
        }
    }
}
