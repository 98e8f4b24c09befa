//! UI module for the course application
//!
//! # Screens
//! - `login` - Allow-list login form
//! - `home` - Course cards
//! - Course page: `items_panel` | `input_panel` | `results_panel`
//!
//! # Panel Structure
//! - `toolbar` - Header with the signed-in reader, course tabs, logout
//! - `items_panel` - Left sidebar: calculators of the course with their last badge
//! - `input_panel` - Center panel: dispatches to `input_calculator`
//! - `results_panel` - Right panel: dispatches to `result_report`
//! - `status_bar` - Session time left and status messages
//!
//! # Overlays
//! - `modal` - Alerts and logout confirmation
//! - `overlay` - Watermark and blocked-action notification
//!
//! # Shared Components
//! - `shared/badge` - Verdict badge

// Screens
pub mod home;
pub mod login;

// Top-level panels
pub mod input_panel;
pub mod items_panel;
pub mod results_panel;
pub mod status_bar;
pub mod toolbar;

// Panel children
pub mod input_calculator;
pub mod result_report;

// Overlays
pub mod modal;
pub mod overlay;

// Shared components
pub mod shared;
