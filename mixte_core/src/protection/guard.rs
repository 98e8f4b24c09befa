use serde::{Deserialize, Serialize};

use super::keys::{Decision, KeyCombo, KeyPolicy, Target};
use crate::config::ProtectionConfig;

/// User interaction the guard can veto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuardEvent {
    ContextMenu,
    KeyDown { combo: KeyCombo, target: Target },
    SelectStart { target: Target },
    DragStart,
}

/// Decides which interactions are swallowed.
///
/// Discourages casual copying only; it is trivially bypassed and is not a
/// security control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventGuard {
    policy: KeyPolicy,
    enabled: bool,
}

impl Default for EventGuard {
    fn default() -> Self {
        Self::new(KeyPolicy::standard())
    }
}

impl EventGuard {
    pub fn new(policy: KeyPolicy) -> Self {
        Self { policy, enabled: true }
    }

    /// Guard that lets everything through
    pub fn disabled() -> Self {
        Self {
            policy: KeyPolicy::standard(),
            enabled: false,
        }
    }

    pub fn from_config(config: &ProtectionConfig) -> Self {
        if config.enabled {
            Self::default()
        } else {
            Self::disabled()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn policy(&self) -> &KeyPolicy {
        &self.policy
    }

    pub fn handle(&self, event: &GuardEvent) -> Decision {
        if !self.enabled {
            return Decision::Allow;
        }
        let decision = match event {
            GuardEvent::ContextMenu => Decision::SuppressAndNotify,
            GuardEvent::KeyDown { combo, target } => self.policy.decide(combo, *target),
            GuardEvent::SelectStart { target: Target::Input } => Decision::Allow,
            GuardEvent::SelectStart { target: Target::Content } => Decision::Suppress,
            GuardEvent::DragStart => Decision::Suppress,
        };
        if decision.is_blocked() {
            tracing::debug!(?event, ?decision, "interaction blocked");
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protection::keys::Key;

    fn key(combo: &str, target: Target) -> GuardEvent {
        GuardEvent::KeyDown {
            combo: combo.parse().unwrap(),
            target,
        }
    }

    #[test]
    fn test_context_menu_notifies() {
        assert_eq!(EventGuard::default().handle(&GuardEvent::ContextMenu), Decision::SuppressAndNotify);
    }

    #[test]
    fn test_selection_and_drag() {
        let guard = EventGuard::default();
        assert_eq!(guard.handle(&GuardEvent::SelectStart { target: Target::Content }), Decision::Suppress);
        assert_eq!(guard.handle(&GuardEvent::SelectStart { target: Target::Input }), Decision::Allow);
        assert_eq!(guard.handle(&GuardEvent::DragStart), Decision::Suppress);
    }

    #[test]
    fn test_keys_follow_policy() {
        let guard = EventGuard::default();
        assert_eq!(guard.handle(&key("Ctrl+P", Target::Input)), Decision::SuppressAndNotify);
        assert_eq!(guard.handle(&key("Ctrl+C", Target::Content)), Decision::Suppress);
        assert_eq!(guard.handle(&key("Ctrl+C", Target::Input)), Decision::Allow);
        let typing = GuardEvent::KeyDown {
            combo: KeyCombo::plain(Key::char('x')),
            target: Target::Input,
        };
        assert_eq!(guard.handle(&typing), Decision::Allow);
    }

    #[test]
    fn test_disabled_guard_passes_everything() {
        let guard = EventGuard::disabled();
        for event in [
            GuardEvent::ContextMenu,
            GuardEvent::DragStart,
            GuardEvent::SelectStart { target: Target::Content },
            key("Ctrl+S", Target::Content),
            key("F12", Target::Content),
        ] {
            assert_eq!(guard.handle(&event), Decision::Allow);
        }
    }

    #[test]
    fn test_from_config() {
        let mut config = ProtectionConfig::default();
        assert!(EventGuard::from_config(&config).is_enabled());
        config.enabled = false;
        assert!(!EventGuard::from_config(&config).is_enabled());
    }

    #[test]
    fn test_every_rule_blocks_while_enabled() {
        let mut guard = EventGuard::default();
        let rules = guard.policy().rules().to_vec();
        for rule in &rules {
            let event = GuardEvent::KeyDown {
                combo: rule.combo,
                target: Target::Content,
            };
            assert!(guard.handle(&event).is_blocked(), "{}", rule.combo);
        }
        guard.set_enabled(false);
        assert!(!guard.handle(&GuardEvent::ContextMenu).is_blocked());
    }
}
