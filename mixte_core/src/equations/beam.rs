//! # Simply-Supported Member Formulas
//!
//! Closed-form results for a single span under a uniformly distributed load.
//! Units are left to the caller; each calculator documents the consistent
//! set it feeds in (typically kN/m with m, or N/mm with mm and MPa).
//!
//! ```text
//!    ↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓ w
//!    ═════════════════
//!    △                △
//!       ←─────L─────→
//! ```

use std::f64::consts::PI;

/// Maximum moment for uniform load (at midspan)
///
/// # Formula
/// M_max = wL²/8
#[inline]
pub fn uniform_load_max_moment(w: f64, l: f64) -> f64 {
    w * l * l / 8.0
}

/// Maximum deflection for uniform load (at midspan)
///
/// # Formula
/// δ_max = 5wL⁴ / (384EI)
///
/// # Example
/// ```rust
/// use mixte_core::equations::beam::uniform_load_max_deflection;
///
/// // 10 N/mm over 6 m, E = 210 000 MPa, I = 1.627e8 mm⁴
/// let d = uniform_load_max_deflection(10.0, 6000.0, 210_000.0, 1.627e8);
/// assert!((d - 4.939).abs() < 1e-3);
/// ```
#[inline]
pub fn uniform_load_max_deflection(w: f64, l: f64, e: f64, i: f64) -> f64 {
    5.0 * w * l.powi(4) / (384.0 * e * i)
}

/// First natural frequency of a simply-supported span
///
/// # Formula
/// f₁ = π/(2L²) · √(EI/m)
///
/// With `ei` in N·m², `mass` in kg/m and `l` in m the result is in Hz.
#[inline]
pub fn natural_frequency(l: f64, ei: f64, mass: f64) -> f64 {
    PI / (2.0 * l * l) * (ei / mass).sqrt()
}

/// Deflection limit expressed as a span ratio
///
/// # Formula
/// δ_lim = L / ratio
#[inline]
pub fn span_limit(l: f64, ratio: f64) -> f64 {
    l / ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midspan_moment() {
        assert_eq!(uniform_load_max_moment(10.0, 6.0), 45.0);
    }

    #[test]
    fn test_deflection_scales_with_fourth_power() {
        let d1 = uniform_load_max_deflection(1.0, 1000.0, 210_000.0, 1.0e6);
        let d2 = uniform_load_max_deflection(1.0, 2000.0, 210_000.0, 1.0e6);
        assert!((d2 / d1 - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_natural_frequency() {
        // L = 1 m, EI/m = 1 -> π/2
        assert!((natural_frequency(1.0, 4.0, 4.0) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_span_limit() {
        assert_eq!(span_limit(7000.0, 350.0), 20.0);
    }
}
