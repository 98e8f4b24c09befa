//! Steel decks (profiled sheeting) for composite slabs
//!
//! Properties are per metre width as published by the manufacturer.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Yield strength of the deck steel fyp (MPa)
pub const DECK_STEEL_FYP_MPA: f64 = 320.0;

/// One profiled steel deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckPanel {
    /// Lookup key, e.g. "cofraplus60_088"
    pub key: String,
    /// Display name, e.g. "Cofraplus 60 (0.88mm)"
    pub name: String,
    /// Rib height hp (mm)
    pub rib_height_mm: f64,
    /// Rib pitch br (mm)
    pub rib_pitch_mm: f64,
    /// Mean rib width b0 (mm)
    pub rib_width_mm: f64,
    /// Steel area Ap (mm²/m)
    pub area_mm2_per_m: f64,
    /// Second moment of area Ip (mm⁴/m)
    pub inertia_mm4_per_m: f64,
    /// Effective section modulus Weff (mm³/m)
    pub modulus_mm3_per_m: f64,
    /// Bending resistance of the bare deck (kN·m/m)
    pub moment_resistance_knm_per_m: f64,
    /// Self weight (kg/m²)
    pub weight_kg_per_m2: f64,
}

impl DeckPanel {
    /// Self weight as a surface load (kN/m²)
    pub fn self_weight_kn_per_m2(&self) -> f64 {
        self.weight_kg_per_m2 / 100.0
    }

    /// Ribs per metre width
    pub fn ribs_per_meter(&self) -> f64 {
        1000.0 / self.rib_pitch_mm
    }
}

const DECK_TABLE: &[(&str, &str, f64, f64, f64, f64, f64, f64, f64, f64)] = &[
    ("cofraplus60_075", "Cofraplus 60 (0.75mm)", 60.0, 207.0, 62.0, 1095.0, 4.5e5, 21000.0, 6.7, 9.8),
    ("cofraplus60_088", "Cofraplus 60 (0.88mm)", 60.0, 207.0, 62.0, 1284.0, 5.3e5, 26000.0, 8.5, 11.5),
    ("cofraplus60_100", "Cofraplus 60 (1.00mm)", 60.0, 207.0, 62.0, 1460.0, 6.1e5, 30000.0, 10.2, 13.0),
    ("cofrastra70_088", "Cofrastra 70 (0.88mm)", 73.0, 150.0, 92.0, 1350.0, 7.2e5, 33000.0, 10.9, 11.9),
];

/// Database of steel decks keyed by lowercase key
#[derive(Debug, Clone, Default)]
pub struct DeckDb {
    decks: HashMap<String, DeckPanel>,
}

static DECKS: Lazy<DeckDb> = Lazy::new(|| {
    let decks = DECK_TABLE
        .iter()
        .map(|&(key, name, hp, br, b0, ap, ip, weff, mrd, weight)| {
            (
                key.to_string(),
                DeckPanel {
                    key: key.to_string(),
                    name: name.to_string(),
                    rib_height_mm: hp,
                    rib_pitch_mm: br,
                    rib_width_mm: b0,
                    area_mm2_per_m: ap,
                    inertia_mm4_per_m: ip,
                    modulus_mm3_per_m: weff,
                    moment_resistance_knm_per_m: mrd,
                    weight_kg_per_m2: weight,
                },
            )
        })
        .collect();
    DeckDb { decks }
});

impl DeckDb {
    pub fn global() -> &'static DeckDb {
        &DECKS
    }

    /// Look up a deck by key or by display name
    pub fn lookup(&self, key: &str) -> CalcResult<&DeckPanel> {
        let wanted = key.trim().to_lowercase();
        self.decks
            .get(&wanted)
            .or_else(|| self.decks.values().find(|d| d.name.to_lowercase() == wanted))
            .ok_or_else(|| CalcError::material_not_found(key))
    }

    /// Keys in catalogue order
    pub fn keys(&self) -> Vec<&'static str> {
        DECK_TABLE.iter().map(|row| row.0).collect()
    }
}
