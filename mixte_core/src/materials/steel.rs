//! Structural Steel: grades and rolled profiles
//!
//! Grades follow EN 10025 nominal values for thicknesses up to 40 mm.
//! Profile properties are the catalogue values for European IPE, HEA, HEB
//! and HEM sections (strong axis).

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::factors::GAMMA_M0;
use crate::units::{Cm3, Cm4, MegaPascals, SqCm};

/// Structural steel grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SteelGrade {
    S235,
    S275,
    #[default]
    S355,
    S460,
}

impl SteelGrade {
    /// All grades for UI selection
    pub const ALL: [SteelGrade; 4] = [
        SteelGrade::S235,
        SteelGrade::S275,
        SteelGrade::S355,
        SteelGrade::S460,
    ];

    /// Grade code as printed in the tables (e.g. "S355")
    pub fn code(&self) -> &'static str {
        match self {
            SteelGrade::S235 => "S235",
            SteelGrade::S275 => "S275",
            SteelGrade::S355 => "S355",
            SteelGrade::S460 => "S460",
        }
    }

    /// Parse from common string representations ("S355", "s355", "355")
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let normalized = s.trim().to_uppercase();
        let normalized = normalized.strip_prefix('S').unwrap_or(&normalized);
        match normalized {
            "235" => Ok(SteelGrade::S235),
            "275" => Ok(SteelGrade::S275),
            "355" => Ok(SteelGrade::S355),
            "460" => Ok(SteelGrade::S460),
            _ => Err(CalcError::material_not_found(s)),
        }
    }

    /// Yield strength fy (MPa)
    pub fn fy_mpa(&self) -> f64 {
        match self {
            SteelGrade::S235 => 235.0,
            SteelGrade::S275 => 275.0,
            SteelGrade::S355 => 355.0,
            SteelGrade::S460 => 460.0,
        }
    }

    /// Ultimate tensile strength fu (MPa)
    pub fn fu_mpa(&self) -> f64 {
        match self {
            SteelGrade::S235 => 360.0,
            SteelGrade::S275 => 430.0,
            SteelGrade::S355 => 510.0,
            SteelGrade::S460 => 540.0,
        }
    }

    /// Design yield strength fyd = fy / γM0
    pub fn fyd(&self) -> MegaPascals {
        MegaPascals(self.fy_mpa() / GAMMA_M0)
    }

    /// Label for pick lists, e.g. "S355 (fy = 355 MPa)"
    pub fn display_name(&self) -> String {
        format!("{} (fy = {} MPa)", self.code(), self.fy_mpa())
    }
}

impl std::fmt::Display for SteelGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Rolled I/H profile, strong-axis properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Catalogue designation, e.g. "IPE 360"
    pub name: String,
    /// Cross-section area Aa
    pub area: SqCm,
    /// Overall height ha (mm)
    pub height_mm: f64,
    /// Flange width bf (mm)
    pub flange_width_mm: f64,
    /// Flange thickness tf (mm)
    pub flange_thickness_mm: f64,
    /// Web thickness tw (mm)
    pub web_thickness_mm: f64,
    /// Second moment of area Iy
    pub iy: Cm4,
    /// Plastic section modulus Wpl,y
    pub wpl_y: Cm3,
}

impl Profile {
    /// Series prefix ("IPE", "HEA", "HEB", "HEM")
    pub fn family(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}

/// Database of rolled profiles, keyed by normalized designation.
#[derive(Debug, Clone, Default)]
pub struct ProfileDb {
    profiles: HashMap<String, Profile>,
}

/// (name, A cm², h, bf, tf, tw mm, Iy cm⁴, Wpl,y cm³)
const PROFILE_TABLE: &[(&str, f64, f64, f64, f64, f64, f64, f64)] = &[
    ("IPE 200", 28.5, 200.0, 100.0, 8.5, 5.6, 1943.0, 221.0),
    ("IPE 240", 39.1, 240.0, 120.0, 9.8, 6.2, 3892.0, 367.0),
    ("IPE 270", 45.9, 270.0, 135.0, 10.2, 6.6, 5790.0, 484.0),
    ("IPE 300", 53.8, 300.0, 150.0, 10.7, 7.1, 8356.0, 628.0),
    ("IPE 330", 62.6, 330.0, 160.0, 11.5, 7.5, 11770.0, 804.0),
    ("IPE 360", 72.7, 360.0, 170.0, 12.7, 8.0, 16270.0, 1019.0),
    ("IPE 400", 84.5, 400.0, 180.0, 13.5, 8.6, 23130.0, 1307.0),
    ("IPE 450", 98.8, 450.0, 190.0, 14.6, 9.4, 33740.0, 1702.0),
    ("IPE 500", 116.0, 500.0, 200.0, 16.0, 10.2, 48200.0, 2194.0),
    ("IPE 550", 134.0, 550.0, 210.0, 17.2, 11.1, 67120.0, 2787.0),
    ("IPE 600", 156.0, 600.0, 220.0, 19.0, 12.0, 92080.0, 3512.0),
    ("HEA 200", 53.8, 190.0, 200.0, 10.0, 6.5, 3692.0, 429.0),
    ("HEA 240", 76.8, 230.0, 240.0, 12.0, 7.5, 7763.0, 745.0),
    ("HEA 300", 112.0, 290.0, 300.0, 14.0, 8.5, 18260.0, 1383.0),
    ("HEB 200", 78.1, 200.0, 200.0, 15.0, 9.0, 5696.0, 642.0),
    ("HEB 240", 106.0, 240.0, 240.0, 17.0, 10.0, 11260.0, 1053.0),
    ("HEB 280", 131.0, 280.0, 280.0, 18.0, 10.5, 19270.0, 1534.0),
    ("HEB 300", 149.0, 300.0, 300.0, 19.0, 11.0, 25170.0, 1869.0),
    ("HEB 340", 171.0, 340.0, 300.0, 21.5, 12.0, 36660.0, 2408.0),
    ("HEM 300", 303.0, 340.0, 310.0, 39.0, 21.0, 59200.0, 4078.0),
];

static PROFILES: Lazy<ProfileDb> = Lazy::new(|| {
    let mut db = ProfileDb::default();
    for &(name, a, h, bf, tf, tw, iy, wpl) in PROFILE_TABLE {
        db.insert(Profile {
            name: name.to_string(),
            area: SqCm(a),
            height_mm: h,
            flange_width_mm: bf,
            flange_thickness_mm: tf,
            web_thickness_mm: tw,
            iy: Cm4(iy),
            wpl_y: Cm3(wpl),
        });
    }
    db
});

/// Normalize a designation for lookup ("ipe360", "IPE 360" -> "IPE360")
fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect::<String>()
        .to_uppercase()
}

impl ProfileDb {
    /// The built-in catalogue
    pub fn global() -> &'static ProfileDb {
        &PROFILES
    }

    fn insert(&mut self, profile: Profile) {
        self.profiles.insert(normalize_name(&profile.name), profile);
    }

    /// Look up a profile by designation (case and spacing insensitive)
    pub fn lookup(&self, name: &str) -> CalcResult<&Profile> {
        self.profiles
            .get(&normalize_name(name))
            .ok_or_else(|| CalcError::material_not_found(name))
    }

    /// Designations in catalogue order
    pub fn names(&self) -> Vec<&'static str> {
        PROFILE_TABLE
            .iter()
            .map(|row| row.0)
            .filter(|name| self.profiles.contains_key(&normalize_name(name)))
            .collect()
    }

    /// Names of profiles in one series (e.g. "HEB")
    pub fn names_in_family(&self, family: &str) -> Vec<&'static str> {
        let family = family.to_uppercase();
        self.names()
            .into_iter()
            .filter(|name| name.starts_with(family.as_str()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_values() {
        assert_eq!(SteelGrade::S235.fy_mpa(), 235.0);
        assert_eq!(SteelGrade::S460.fu_mpa(), 540.0);
        assert_eq!(SteelGrade::S355.fyd().0, 355.0);
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!(SteelGrade::from_str_flexible("s355").unwrap(), SteelGrade::S355);
        assert_eq!(SteelGrade::from_str_flexible(" S275 ").unwrap(), SteelGrade::S275);
        assert_eq!(SteelGrade::from_str_flexible("235").unwrap(), SteelGrade::S235);
        assert!(SteelGrade::from_str_flexible("S999").is_err());
    }

    #[test]
    fn test_grade_serialization() {
        let json = serde_json::to_string(&SteelGrade::S355).unwrap();
        assert_eq!(json, "\"S355\"");
    }

    #[test]
    fn test_profile_lookup_normalization() {
        let db = ProfileDb::global();
        let a = db.lookup("IPE 360").unwrap();
        let b = db.lookup("ipe360").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.area, SqCm(72.7));
        assert_eq!(a.family(), "IPE");
    }

    #[test]
    fn test_profile_not_found() {
        let err = ProfileDb::global().lookup("IPE 999").unwrap_err();
        assert_eq!(err.error_code(), "MATERIAL_NOT_FOUND");
    }

    #[test]
    fn test_catalogue_contents() {
        let db = ProfileDb::global();
        assert_eq!(db.len(), PROFILE_TABLE.len());
        assert_eq!(db.names().first(), Some(&"IPE 200"));
        assert_eq!(db.names_in_family("heb").len(), 5);
        assert_eq!(db.lookup("HEM300").unwrap().height_mm, 340.0);
    }
}
