//! Translation of iced events into guard events.
//!
//! An event already captured by a widget (a focused text input) counts as
//! happening inside a form input.

use iced::keyboard::{self, key::Named};
use iced::{event, mouse, Event};

use mixte_core::protection::{GuardEvent, Key, KeyCombo, Modifiers, Target};

/// Guard event for an iced event, if the guard cares about it
pub fn guard_event(event: &Event, status: event::Status) -> Option<GuardEvent> {
    let target = match status {
        event::Status::Captured => Target::Input,
        event::Status::Ignored => Target::Content,
    };

    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) => Some(GuardEvent::KeyDown {
            combo: key_combo(key, *modifiers),
            target,
        }),
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right)) => Some(GuardEvent::ContextMenu),
        _ => None,
    }
}

/// Command maps to Ctrl so the same rules hold on macOS
pub fn key_combo(key: &keyboard::Key, modifiers: keyboard::Modifiers) -> KeyCombo {
    let key = match key.as_ref() {
        keyboard::Key::Character(c) => c.chars().next().map(Key::char).unwrap_or(Key::Other),
        keyboard::Key::Named(named) => function_key(named).map(Key::F).unwrap_or(Key::Other),
        keyboard::Key::Unidentified => Key::Other,
    };

    KeyCombo::new(
        key,
        Modifiers {
            ctrl: modifiers.command(),
            shift: modifiers.shift(),
            alt: modifiers.alt(),
        },
    )
}

fn function_key(named: Named) -> Option<u8> {
    let n = match named {
        Named::F1 => 1,
        Named::F2 => 2,
        Named::F3 => 3,
        Named::F4 => 4,
        Named::F5 => 5,
        Named::F6 => 6,
        Named::F7 => 7,
        Named::F8 => 8,
        Named::F9 => 9,
        Named::F10 => 10,
        Named::F11 => 11,
        Named::F12 => 12,
        _ => return None,
    };
    Some(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl() -> keyboard::Modifiers {
        keyboard::Modifiers::COMMAND
    }

    #[test]
    fn test_character_is_lowercased() {
        let combo = key_combo(&keyboard::Key::Character("I".into()), ctrl() | keyboard::Modifiers::SHIFT);
        assert_eq!(combo, KeyCombo::ctrl_shift('i'));
    }

    #[test]
    fn test_function_keys() {
        let combo = key_combo(&keyboard::Key::Named(Named::F12), keyboard::Modifiers::empty());
        assert_eq!(combo, KeyCombo::plain(Key::F(12)));
        let combo = key_combo(&keyboard::Key::Named(Named::Enter), keyboard::Modifiers::empty());
        assert_eq!(combo.key, Key::Other);
    }

    #[test]
    fn test_right_click_is_context_menu() {
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Right));
        assert_eq!(guard_event(&event, event::Status::Ignored), Some(GuardEvent::ContextMenu));
        let event = Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left));
        assert_eq!(guard_event(&event, event::Status::Ignored), None);
    }
}
