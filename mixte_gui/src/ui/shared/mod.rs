//! Shared UI components reusable across panels
//!
//! Contains:
//! - `badge` - Colored verdict badge

pub mod badge;
