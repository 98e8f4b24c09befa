//! Number formatting for results.
//!
//! The course is French; results print with a decimal comma by default
//! (`1234.5` -> `1234,50`). The separator is a display setting only.

use serde::{Deserialize, Serialize};

/// How numbers are rendered in reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub decimal_comma: bool,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self { decimal_comma: true }
    }
}

impl NumberFormat {
    pub const DOT: NumberFormat = NumberFormat { decimal_comma: false };

    /// Fixed decimals with the configured separator
    pub fn number(&self, value: f64, decimals: usize) -> String {
        if !value.is_finite() {
            return "-".to_string();
        }
        let text = format!("{:.*}", decimals, value);
        // "-0.00" reads badly in a result table
        let text = if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
            text[1..].to_string()
        } else {
            text
        };
        if self.decimal_comma {
            text.replace('.', ",")
        } else {
            text
        }
    }

    /// A ratio shown as a percentage with one decimal (0.8523 -> "85,2 %")
    pub fn percent(&self, ratio: f64) -> String {
        format!("{} %", self.number(ratio * 100.0, 1))
    }

    /// Number followed by its unit, if any
    pub fn quantity(&self, value: f64, decimals: usize, unit: &str) -> String {
        if unit.is_empty() {
            self.number(value, decimals)
        } else {
            format!("{} {}", self.number(value, decimals), unit)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_comma() {
        let fmt = NumberFormat::default();
        assert_eq!(fmt.number(1234.5, 2), "1234,50");
        assert_eq!(fmt.number(3.0, 0), "3");
    }

    #[test]
    fn test_decimal_dot() {
        assert_eq!(NumberFormat::DOT.number(0.125, 3), "0.125");
    }

    #[test]
    fn test_percent() {
        assert_eq!(NumberFormat::default().percent(0.8523), "85,2 %");
        assert_eq!(NumberFormat::DOT.percent(1.0), "100.0 %");
    }

    #[test]
    fn test_quantity_and_edge_values() {
        let fmt = NumberFormat::DOT;
        assert_eq!(fmt.quantity(573.068, 1, "kN·m"), "573.1 kN·m");
        assert_eq!(fmt.quantity(6.0, 2, ""), "6.00");
        assert_eq!(fmt.number(-0.0001, 2), "0.00");
        assert_eq!(fmt.number(f64::NAN, 2), "-");
    }
}
