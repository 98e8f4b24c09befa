//! Concrete strength classes (EN 1992-1-1 Table 3.1) and B500 reinforcement

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::factors::{ALPHA_CC, GAMMA_C, GAMMA_S};
use crate::materials::STEEL_E_MPA;
use crate::units::MegaPascals;

/// Normal-weight concrete strength classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConcreteClass {
    #[serde(rename = "C20/25")]
    C20_25,
    #[serde(rename = "C25/30")]
    C25_30,
    #[default]
    #[serde(rename = "C30/37")]
    C30_37,
    #[serde(rename = "C35/45")]
    C35_45,
    #[serde(rename = "C40/50")]
    C40_50,
    #[serde(rename = "C50/60")]
    C50_60,
}

/// Mechanical properties of a concrete class (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConcreteProperties {
    /// Characteristic cylinder strength
    pub fck: f64,
    /// Mean cylinder strength
    pub fcm: f64,
    /// Mean tensile strength
    pub fctm: f64,
    /// Secant modulus of elasticity
    pub ecm: f64,
}

impl ConcreteClass {
    /// All classes for UI selection
    pub const ALL: [ConcreteClass; 6] = [
        ConcreteClass::C20_25,
        ConcreteClass::C25_30,
        ConcreteClass::C30_37,
        ConcreteClass::C35_45,
        ConcreteClass::C40_50,
        ConcreteClass::C50_60,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ConcreteClass::C20_25 => "C20/25",
            ConcreteClass::C25_30 => "C25/30",
            ConcreteClass::C30_37 => "C30/37",
            ConcreteClass::C35_45 => "C35/45",
            ConcreteClass::C40_50 => "C40/50",
            ConcreteClass::C50_60 => "C50/60",
        }
    }

    /// Parse "C30/37", "c30-37", "C30" or "30"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let upper = s.trim().to_uppercase();
        let cylinder = upper
            .trim_start_matches('C')
            .split(['/', '-', '_', ' '])
            .next()
            .unwrap_or("");
        match cylinder {
            "20" => Ok(ConcreteClass::C20_25),
            "25" => Ok(ConcreteClass::C25_30),
            "30" => Ok(ConcreteClass::C30_37),
            "35" => Ok(ConcreteClass::C35_45),
            "40" => Ok(ConcreteClass::C40_50),
            "50" => Ok(ConcreteClass::C50_60),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    pub fn properties(&self) -> ConcreteProperties {
        let (fck, fcm, fctm, ecm) = match self {
            ConcreteClass::C20_25 => (20.0, 28.0, 2.2, 30_000.0),
            ConcreteClass::C25_30 => (25.0, 33.0, 2.6, 31_500.0),
            ConcreteClass::C30_37 => (30.0, 38.0, 2.9, 33_000.0),
            ConcreteClass::C35_45 => (35.0, 43.0, 3.2, 34_000.0),
            ConcreteClass::C40_50 => (40.0, 48.0, 3.5, 35_000.0),
            ConcreteClass::C50_60 => (50.0, 58.0, 4.1, 37_000.0),
        };
        ConcreteProperties { fck, fcm, fctm, ecm }
    }

    pub fn fck(&self) -> f64 {
        self.properties().fck
    }

    pub fn ecm(&self) -> f64 {
        self.properties().ecm
    }

    /// Design compressive strength fcd = αcc·fck / γC
    pub fn fcd(&self) -> MegaPascals {
        MegaPascals(ALPHA_CC * self.fck() / GAMMA_C)
    }

    /// Short-term modular ratio n0 = Ea / Ecm
    pub fn modular_ratio(&self) -> f64 {
        STEEL_E_MPA / self.ecm()
    }

    pub fn display_name(&self) -> String {
        format!("{} (fck = {} MPa)", self.code(), self.fck())
    }
}

impl std::fmt::Display for ConcreteClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// B500 reinforcing steel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rebar;

impl Rebar {
    /// Characteristic yield strength fsk (MPa)
    pub const FSK_MPA: f64 = 500.0;

    /// Design yield strength fsd = fsk / γS
    pub fn fsd(&self) -> MegaPascals {
        MegaPascals(Self::FSK_MPA / GAMMA_S)
    }

    /// Area of `count` bars of diameter `diameter_mm`, in mm²
    pub fn bar_area_mm2(diameter_mm: f64, count: u32) -> f64 {
        f64::from(count) * std::f64::consts::PI * diameter_mm * diameter_mm / 4.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_parsing() {
        assert_eq!(ConcreteClass::from_str_flexible("C30/37").unwrap(), ConcreteClass::C30_37);
        assert_eq!(ConcreteClass::from_str_flexible("c25").unwrap(), ConcreteClass::C25_30);
        assert_eq!(ConcreteClass::from_str_flexible("C40-50").unwrap(), ConcreteClass::C40_50);
        assert_eq!(ConcreteClass::from_str_flexible("50").unwrap(), ConcreteClass::C50_60);
        assert!(ConcreteClass::from_str_flexible("C90/105").is_err());
    }

    #[test]
    fn test_design_strength() {
        assert!((ConcreteClass::C25_30.fcd().0 - 16.6667).abs() < 1e-3);
        assert_eq!(ConcreteClass::C30_37.fcd().0, 20.0);
    }

    #[test]
    fn test_modular_ratio() {
        let n0 = ConcreteClass::C30_37.modular_ratio();
        assert!((n0 - 6.3636).abs() < 1e-3);
    }

    #[test]
    fn test_serialization_uses_codes() {
        let json = serde_json::to_string(&ConcreteClass::C35_45).unwrap();
        assert_eq!(json, "\"C35/45\"");
        let parsed: ConcreteClass = serde_json::from_str("\"C20/25\"").unwrap();
        assert_eq!(parsed, ConcreteClass::C20_25);
    }

    #[test]
    fn test_one_ecm_per_class() {
        // Columns share the slab and beam moduli
        assert_eq!(ConcreteClass::C25_30.ecm(), 31_500.0);
        assert_eq!(ConcreteClass::C30_37.ecm(), 33_000.0);
    }

    #[test]
    fn test_rebar() {
        assert!((Rebar.fsd().0 - 434.78).abs() < 0.01);
        assert!((Rebar::bar_area_mm2(12.0, 2) - 226.19).abs() < 0.01);
    }
}
