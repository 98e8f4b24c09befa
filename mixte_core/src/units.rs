//! # Unit Types
//!
//! Type-safe wrappers for the SI units used throughout the course. They
//! serialize as bare numbers and convert between the scales the tables are
//! published in (profiles in cm, cm², cm⁴; decks and spans in mm).
//!
//! ## Units
//!
//! - Length: millimetres (mm), metres (m)
//! - Area: mm², cm²
//! - Second moment of area: mm⁴, cm⁴
//! - Force: kilonewtons (kN)
//! - Moment: kilonewton-metres (kN·m)
//! - Stress: megapascals (MPa = N/mm²)
//!
//! ## Example
//!
//! ```rust
//! use mixte_core::units::{Meters, Millimeters, SqCm, SqMm};
//!
//! let span: Meters = Millimeters(6000.0).into();
//! assert_eq!(span.0, 6.0);
//!
//! let area: SqMm = SqCm(72.7).into();
//! assert!((area.0 - 7270.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meters(pub f64);

impl From<Meters> for Millimeters {
    fn from(m: Meters) -> Self {
        Millimeters(m.0 * 1000.0)
    }
}

impl From<Millimeters> for Meters {
    fn from(mm: Millimeters) -> Self {
        Meters(mm.0 / 1000.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Area in square centimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqCm(pub f64);

impl From<SqCm> for SqMm {
    fn from(cm2: SqCm) -> Self {
        SqMm(cm2.0 * 100.0)
    }
}

impl From<SqMm> for SqCm {
    fn from(mm2: SqMm) -> Self {
        SqCm(mm2.0 / 100.0)
    }
}

// ============================================================================
// Section Properties
// ============================================================================

/// Second moment of area in mm⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Mm4(pub f64);

/// Second moment of area in cm⁴
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm4(pub f64);

/// Section modulus in cm³
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cm3(pub f64);

impl From<Cm4> for Mm4 {
    fn from(cm4: Cm4) -> Self {
        Mm4(cm4.0 * 1.0e4)
    }
}

impl From<Mm4> for Cm4 {
    fn from(mm4: Mm4) -> Self {
        Cm4(mm4.0 / 1.0e4)
    }
}

// ============================================================================
// Force, Moment, Stress
// ============================================================================

/// Force in kilonewtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtons(pub f64);

/// Moment in kilonewton-metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KiloNewtonMeters(pub f64);

/// Stress in megapascals (N/mm²)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MegaPascals(pub f64);

impl MegaPascals {
    /// Force developed by this stress over an area, in kN
    pub fn over(self, area: SqMm) -> KiloNewtons {
        KiloNewtons(self.0 * area.0 / 1000.0)
    }
}

impl KiloNewtons {
    /// Moment of this force about a lever arm
    pub fn times_lever(self, lever: Millimeters) -> KiloNewtonMeters {
        KiloNewtonMeters(self.0 * lever.0 / 1000.0)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Meters);
impl_arithmetic!(SqMm);
impl_arithmetic!(SqCm);
impl_arithmetic!(Mm4);
impl_arithmetic!(Cm4);
impl_arithmetic!(Cm3);
impl_arithmetic!(KiloNewtons);
impl_arithmetic!(KiloNewtonMeters);
impl_arithmetic!(MegaPascals);
