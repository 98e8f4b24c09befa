//! # Flexural Buckling (EN 1993-1-1 §6.3.1)
//!
//! Euler critical load and the European buckling curves used for composite
//! columns.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// European buckling curves and their imperfection factors α
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucklingCurve {
    A0,
    #[default]
    A,
    B,
    C,
    D,
}

impl BucklingCurve {
    pub const ALL: [BucklingCurve; 5] = [
        BucklingCurve::A0,
        BucklingCurve::A,
        BucklingCurve::B,
        BucklingCurve::C,
        BucklingCurve::D,
    ];

    /// Imperfection factor α
    pub fn alpha(&self) -> f64 {
        match self {
            BucklingCurve::A0 => 0.13,
            BucklingCurve::A => 0.21,
            BucklingCurve::B => 0.34,
            BucklingCurve::C => 0.49,
            BucklingCurve::D => 0.76,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            BucklingCurve::A0 => "a0",
            BucklingCurve::A => "a",
            BucklingCurve::B => "b",
            BucklingCurve::C => "c",
            BucklingCurve::D => "d",
        }
    }

    /// Parse "a", "b", "curve c" or a raw α value such as "0.34"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let lower = s.trim().to_lowercase();
        let code = lower.strip_prefix("curve").map(str::trim).unwrap_or(&lower);
        if let Some(curve) = Self::ALL.into_iter().find(|c| c.code() == code) {
            return Ok(curve);
        }
        code.replace(',', ".")
            .parse::<f64>()
            .ok()
            .and_then(|alpha| Self::ALL.into_iter().find(|c| (c.alpha() - alpha).abs() < 1e-9))
            .ok_or_else(|| CalcError::invalid_input("curve", s, "expected a buckling curve a0, a, b, c or d"))
    }
}

impl std::fmt::Display for BucklingCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "curve {} (α = {})", self.code(), self.alpha())
    }
}

/// Euler critical load
///
/// # Formula
/// N_cr = π²EI / L_cr²
///
/// With EI in kN·m² and L_cr in m the result is in kN.
#[inline]
pub fn euler_critical_load(ei: f64, buckling_length: f64) -> f64 {
    PI * PI * ei / (buckling_length * buckling_length)
}

/// Relative slenderness
///
/// # Formula
/// λ̄ = √(N_pl,Rk / N_cr)
#[inline]
pub fn relative_slenderness(npl_rk: f64, ncr: f64) -> f64 {
    (npl_rk / ncr).sqrt()
}

/// Intermediate factor Φ
///
/// # Formula
/// Φ = 0.5·[1 + α(λ̄ − 0.2) + λ̄²]
#[inline]
pub fn phi(alpha: f64, lambda_bar: f64) -> f64 {
    0.5 * (1.0 + alpha * (lambda_bar - 0.2) + lambda_bar * lambda_bar)
}

/// Reduction factor χ, capped at 1.0
///
/// # Formula
/// χ = 1 / (Φ + √(Φ² − λ̄²)) ≤ 1.0
pub fn reduction_factor(alpha: f64, lambda_bar: f64) -> f64 {
    let phi = phi(alpha, lambda_bar);
    let chi = 1.0 / (phi + (phi * phi - lambda_bar * lambda_bar).sqrt());
    chi.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_parsing() {
        assert_eq!(BucklingCurve::from_str_flexible("b").unwrap(), BucklingCurve::B);
        assert_eq!(BucklingCurve::from_str_flexible("Curve C").unwrap(), BucklingCurve::C);
        assert_eq!(BucklingCurve::from_str_flexible("0,21").unwrap(), BucklingCurve::A);
        assert!(BucklingCurve::from_str_flexible("z").is_err());
    }

    #[test]
    fn test_euler_load() {
        // EI = 1 kN·m², L = π m -> 1 kN
        assert!((euler_critical_load(1.0, PI) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_stocky_member_is_not_reduced() {
        assert_eq!(reduction_factor(0.34, 0.1), 1.0);
        assert!((reduction_factor(0.34, 0.2) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_reference_chi_values() {
        // EN 1993-1-1 Table 6.2 reference points at λ̄ = 1.0
        assert!((reduction_factor(0.21, 1.0) - 0.6656).abs() < 1e-3);
        assert!((reduction_factor(0.34, 1.0) - 0.5970).abs() < 1e-3);
        assert!((reduction_factor(0.49, 1.0) - 0.5399).abs() < 1e-3);
    }
}
