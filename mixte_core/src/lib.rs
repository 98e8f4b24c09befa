//! # mixte_core - Composite Construction Course Engine
//!
//! `mixte_core` holds everything behind the Construction Mixte course:
//! the Eurocode 4 calculators for composite slabs, columns and beams, the
//! email allow-list gate with its local session, and the rules of the
//! anti-copy layer. All inputs, results and errors are JSON-serializable so
//! the GUI, the CLI and tests share one representation.
//!
//! ## Design Philosophy
//!
//! - **Stateless calculators**: pure functions from a typed input to a result
//! - **Immutable tables**: profiles, grades and decks built once on first use
//! - **Explicit state**: the session lives in a [`access::SessionStore`]
//!   passed to the gate, never in a global
//! - **Rich errors**: one structured [`CalcError`] for alerts and exit codes
//!
//! ## Quick Start
//!
//! ```rust
//! use mixte_core::calculations::CalculatorKind;
//! use mixte_core::forms::FormValues;
//!
//! let values = FormValues::new()
//!     .with("profile", "IPE 300")
//!     .with("steel", "S355")
//!     .with("shear_ed", "200");
//! let report = CalculatorKind::BeamShear.run(&values).unwrap();
//! assert!(report.passes());
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Calculators, reports and the calculator registry
//! - [`equations`] - Shared closed-form formulas
//! - [`materials`] - Steel, concrete and deck tables
//! - [`forms`] - Raw form values and field descriptions
//! - [`access`] - Allow-list gate, sessions and login redirects
//! - [`protection`] - Blocked shortcuts, notification and watermark
//! - [`config`] - Layered configuration
//! - [`logging`] - Tracing subscriber setup
//! - [`units`] - Type-safe unit wrappers
//! - [`format`] - Number formatting for display
//! - [`errors`] - Structured error types

pub mod access;
pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod format;
pub mod forms;
pub mod logging;
pub mod materials;
pub mod protection;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculatorKind, Course, Report, Verdict};
pub use config::Config;
pub use errors::{CalcError, CalcResult};
pub use forms::FormValues;
