//! # Content Protection
//!
//! Toolkit-independent rules of the anti-copy layer: which shortcuts and
//! pointer gestures are swallowed, the transient notification shown when an
//! action is blocked, and the identity watermark.
//!
//! The GUI translates its native events into [`GuardEvent`]s and acts on the
//! returned [`Decision`]. None of this prevents a determined reader from
//! copying the content.

pub mod guard;
pub mod keys;
pub mod notification;
pub mod watermark;

pub use guard::{EventGuard, GuardEvent};
pub use keys::{BlockRule, Decision, Key, KeyCombo, KeyPolicy, Modifiers, Target};
pub use notification::{Notification, PROTECTED_MESSAGE};
pub use watermark::Watermark;
