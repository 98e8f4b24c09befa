//! # Structural Equations
//!
//! Fundamental formulas shared by the calculators, kept apart from the
//! calculators so each can be checked against its code clause in isolation.
//!
//! ## Modules
//!
//! - [`beam`] - Simply-supported span under uniform load (moment, deflection, frequency)
//! - [`buckling`] - Euler load, relative slenderness and buckling curves
//!
//! ## References
//!
//! - EN 1994-1-1: Design of composite steel and concrete structures
//! - EN 1993-1-1: Design of steel structures
//! - EN 1992-1-1: Design of concrete structures

pub mod beam;
pub mod buckling;

pub use beam::{
    natural_frequency,
    span_limit,
    uniform_load_max_deflection,
    uniform_load_max_moment,
};

pub use buckling::{
    euler_critical_load,
    reduction_factor,
    relative_slenderness,
    BucklingCurve,
};
