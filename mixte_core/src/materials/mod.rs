//! # Materials Database
//!
//! Immutable reference tables used by every calculator: structural steel
//! grades, rolled profiles, concrete strength classes, reinforcement and
//! steel decks. Tables are built once on first access and never mutated.
//!
//! ## Example
//!
//! ```rust
//! use mixte_core::materials::{ConcreteClass, ProfileDb, SteelGrade};
//!
//! let ipe = ProfileDb::global().lookup("ipe360").unwrap();
//! assert_eq!(ipe.height_mm, 360.0);
//!
//! let c30 = ConcreteClass::from_str_flexible("C30").unwrap();
//! assert_eq!(c30, ConcreteClass::C30_37);
//! assert_eq!(SteelGrade::S355.fy_mpa(), 355.0);
//! ```

pub mod concrete;
pub mod deck;
pub mod steel;

pub use concrete::{ConcreteClass, ConcreteProperties, Rebar};
pub use deck::{DeckDb, DeckPanel, DECK_STEEL_FYP_MPA};
pub use steel::{Profile, ProfileDb, SteelGrade};

/// Elastic modulus of structural steel Ea (MPa)
pub const STEEL_E_MPA: f64 = 210_000.0;

/// Partial safety factors and coefficients applied by the calculators.
pub mod factors {
    /// Steel cross-section resistance
    pub const GAMMA_M0: f64 = 1.00;
    /// Steel member instability
    pub const GAMMA_M1: f64 = 1.00;
    /// Concrete
    pub const GAMMA_C: f64 = 1.50;
    /// Reinforcing steel
    pub const GAMMA_S: f64 = 1.15;
    /// Shear connectors
    pub const GAMMA_V: f64 = 1.25;
    /// Long-term effects on concrete strength
    pub const ALPHA_CC: f64 = 1.00;
}
