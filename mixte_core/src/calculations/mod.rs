//! # Structural Calculations
//!
//! Every calculator of the course follows the same pattern:
//!
//! - `*Input` - input parameters (JSON-serializable), with `FIELDS` describing
//!   the form and `from_form` parsing raw [`FormValues`]
//! - `validate()` - presence and positivity checks, run before any arithmetic
//! - `calculate_*(input) -> CalcResult<*Result>` - pure calculation function
//! - `*Result::report()` - formatted [`Report`] with a verdict badge
//!
//! [`CalculatorKind`] lists the calculators by course and drives the GUI and
//! the CLI; [`CalculationItem`] carries a typed input for JSON use.
//!
//! ## Available Calculations
//!
//! - [`slab`] - composite slabs on steel decking
//! - [`column`] - encased and filled composite columns
//! - [`beam`] - composite beams with headed studs

pub mod beam;
pub mod column;
pub mod report;
pub mod slab;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::forms::{FieldSpec, FormValues};

pub use beam::{
    BeamDeflectionInput, BeamMomentInput, BeamShearInput, ConnectorInput, EffectiveWidthInput,
    ModularRatioInput, SupportType,
};
pub use column::{
    ColumnBucklingInput, ColumnCombinedInput, ColumnFireInput, ColumnResistanceInput, ColumnSection,
};
pub use report::{Report, ReportLine, Value, Verdict};
pub use slab::{ConstructionInput, SlabDeflectionInput, SlabFireInput, SlabMomentInput, SlabShearInput};

pub(crate) fn require_positive(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "must be positive"))
    }
}

pub(crate) fn require_non_negative(field: &str, value: f64) -> CalcResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "cannot be negative"))
    }
}

/// Standard fire resistance durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FireRating {
    R30,
    R60,
    R90,
    R120,
}

impl FireRating {
    pub const ALL: [FireRating; 4] = [FireRating::R30, FireRating::R60, FireRating::R90, FireRating::R120];

    pub fn minutes(&self) -> u32 {
        match self {
            FireRating::R30 => 30,
            FireRating::R60 => 60,
            FireRating::R90 => 90,
            FireRating::R120 => 120,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            FireRating::R30 => "R30",
            FireRating::R60 => "R60",
            FireRating::R90 => "R90",
            FireRating::R120 => "R120",
        }
    }

    /// Position in [`FireRating::ALL`], for rating tables
    pub(crate) fn index(&self) -> usize {
        match self {
            FireRating::R30 => 0,
            FireRating::R60 => 1,
            FireRating::R90 => 2,
            FireRating::R120 => 3,
        }
    }

    /// Minimum concrete thickness above the ribs of a composite slab (mm)
    pub fn slab_min_hc_mm(&self) -> f64 {
        [60.0, 70.0, 80.0, 90.0][self.index()]
    }
}

impl FromStr for FireRating {
    type Err = CalcError;

    /// Accepts "R60", "r60" or "60"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let minutes = upper.strip_prefix('R').unwrap_or(&upper);
        FireRating::ALL
            .into_iter()
            .find(|r| r.minutes().to_string() == minutes)
            .ok_or_else(|| CalcError::invalid_input("rating", s, "expected R30, R60, R90 or R120"))
    }
}

impl std::fmt::Display for FireRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Course chapter a calculator belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Course {
    Slabs,
    Columns,
    Beams,
}

impl Course {
    pub const ALL: [Course; 3] = [Course::Slabs, Course::Columns, Course::Beams];

    pub fn title(&self) -> &'static str {
        match self {
            Course::Slabs => "Composite slabs",
            Course::Columns => "Composite columns",
            Course::Beams => "Composite beams",
        }
    }

    /// Folder of the course pages under the content root
    pub fn folder(&self) -> &'static str {
        match self {
            Course::Slabs => "planchers",
            Course::Columns => "poteaux",
            Course::Beams => "poutres",
        }
    }

    pub fn calculators(&self) -> Vec<CalculatorKind> {
        CalculatorKind::ALL
            .into_iter()
            .filter(|k| k.course() == *self)
            .collect()
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Every calculator offered by the course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    SlabConstruction,
    SlabMoment,
    SlabShear,
    SlabDeflection,
    SlabFire,
    ColumnResistance,
    ColumnBuckling,
    ColumnCombined,
    ColumnFire,
    BeamMoment,
    BeamShear,
    BeamConnectors,
    BeamDeflection,
    EffectiveWidth,
    ModularRatio,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 15] = [
        CalculatorKind::SlabConstruction,
        CalculatorKind::SlabMoment,
        CalculatorKind::SlabShear,
        CalculatorKind::SlabDeflection,
        CalculatorKind::SlabFire,
        CalculatorKind::ColumnResistance,
        CalculatorKind::ColumnBuckling,
        CalculatorKind::ColumnCombined,
        CalculatorKind::ColumnFire,
        CalculatorKind::BeamMoment,
        CalculatorKind::BeamShear,
        CalculatorKind::BeamConnectors,
        CalculatorKind::BeamDeflection,
        CalculatorKind::EffectiveWidth,
        CalculatorKind::ModularRatio,
    ];

    /// Identifier used on the command line, e.g. "slab-moment"
    pub fn id(&self) -> &'static str {
        match self {
            CalculatorKind::SlabConstruction => "slab-construction",
            CalculatorKind::SlabMoment => "slab-moment",
            CalculatorKind::SlabShear => "slab-shear",
            CalculatorKind::SlabDeflection => "slab-deflection",
            CalculatorKind::SlabFire => "slab-fire",
            CalculatorKind::ColumnResistance => "column-resistance",
            CalculatorKind::ColumnBuckling => "column-buckling",
            CalculatorKind::ColumnCombined => "column-combined",
            CalculatorKind::ColumnFire => "column-fire",
            CalculatorKind::BeamMoment => "beam-moment",
            CalculatorKind::BeamShear => "beam-shear",
            CalculatorKind::BeamConnectors => "beam-connectors",
            CalculatorKind::BeamDeflection => "beam-deflection",
            CalculatorKind::EffectiveWidth => "effective-width",
            CalculatorKind::ModularRatio => "modular-ratio",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::SlabConstruction => "Construction phase",
            CalculatorKind::SlabMoment => "Composite bending resistance",
            CalculatorKind::SlabShear => "Vertical shear",
            CalculatorKind::SlabDeflection => "Deflection and vibration",
            CalculatorKind::SlabFire => "Fire resistance",
            CalculatorKind::ColumnResistance => "Plastic resistance",
            CalculatorKind::ColumnBuckling => "Flexural buckling",
            CalculatorKind::ColumnCombined => "Compression and bending",
            CalculatorKind::ColumnFire => "Fire resistance",
            CalculatorKind::BeamMoment => "Plastic bending resistance",
            CalculatorKind::BeamShear => "Vertical shear",
            CalculatorKind::BeamConnectors => "Shear connectors",
            CalculatorKind::BeamDeflection => "Deflection",
            CalculatorKind::EffectiveWidth => "Effective width",
            CalculatorKind::ModularRatio => "Modular ratio",
        }
    }

    pub fn course(&self) -> Course {
        match self {
            CalculatorKind::SlabConstruction
            | CalculatorKind::SlabMoment
            | CalculatorKind::SlabShear
            | CalculatorKind::SlabDeflection
            | CalculatorKind::SlabFire => Course::Slabs,
            CalculatorKind::ColumnResistance
            | CalculatorKind::ColumnBuckling
            | CalculatorKind::ColumnCombined
            | CalculatorKind::ColumnFire => Course::Columns,
            CalculatorKind::BeamMoment
            | CalculatorKind::BeamShear
            | CalculatorKind::BeamConnectors
            | CalculatorKind::BeamDeflection
            | CalculatorKind::EffectiveWidth
            | CalculatorKind::ModularRatio => Course::Beams,
        }
    }

    /// Form fields, in display order
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            CalculatorKind::SlabConstruction => ConstructionInput::FIELDS,
            CalculatorKind::SlabMoment => SlabMomentInput::FIELDS,
            CalculatorKind::SlabShear => SlabShearInput::FIELDS,
            CalculatorKind::SlabDeflection => SlabDeflectionInput::FIELDS,
            CalculatorKind::SlabFire => SlabFireInput::FIELDS,
            CalculatorKind::ColumnResistance => ColumnResistanceInput::FIELDS,
            CalculatorKind::ColumnBuckling => ColumnBucklingInput::FIELDS,
            CalculatorKind::ColumnCombined => ColumnCombinedInput::FIELDS,
            CalculatorKind::ColumnFire => ColumnFireInput::FIELDS,
            CalculatorKind::BeamMoment => BeamMomentInput::FIELDS,
            CalculatorKind::BeamShear => BeamShearInput::FIELDS,
            CalculatorKind::BeamConnectors => ConnectorInput::FIELDS,
            CalculatorKind::BeamDeflection => BeamDeflectionInput::FIELDS,
            CalculatorKind::EffectiveWidth => EffectiveWidthInput::FIELDS,
            CalculatorKind::ModularRatio => ModularRatioInput::FIELDS,
        }
    }

    /// Parse raw form values into a typed input
    pub fn parse(&self, values: &FormValues) -> CalcResult<CalculationItem> {
        Ok(match self {
            CalculatorKind::SlabConstruction => CalculationItem::SlabConstruction(ConstructionInput::from_form(values)?),
            CalculatorKind::SlabMoment => CalculationItem::SlabMoment(SlabMomentInput::from_form(values)?),
            CalculatorKind::SlabShear => CalculationItem::SlabShear(SlabShearInput::from_form(values)?),
            CalculatorKind::SlabDeflection => CalculationItem::SlabDeflection(SlabDeflectionInput::from_form(values)?),
            CalculatorKind::SlabFire => CalculationItem::SlabFire(SlabFireInput::from_form(values)?),
            CalculatorKind::ColumnResistance => {
                CalculationItem::ColumnResistance(ColumnResistanceInput::from_form(values)?)
            }
            CalculatorKind::ColumnBuckling => CalculationItem::ColumnBuckling(ColumnBucklingInput::from_form(values)?),
            CalculatorKind::ColumnCombined => CalculationItem::ColumnCombined(ColumnCombinedInput::from_form(values)?),
            CalculatorKind::ColumnFire => CalculationItem::ColumnFire(ColumnFireInput::from_form(values)?),
            CalculatorKind::BeamMoment => CalculationItem::BeamMoment(BeamMomentInput::from_form(values)?),
            CalculatorKind::BeamShear => CalculationItem::BeamShear(BeamShearInput::from_form(values)?),
            CalculatorKind::BeamConnectors => CalculationItem::BeamConnectors(ConnectorInput::from_form(values)?),
            CalculatorKind::BeamDeflection => CalculationItem::BeamDeflection(BeamDeflectionInput::from_form(values)?),
            CalculatorKind::EffectiveWidth => CalculationItem::EffectiveWidth(EffectiveWidthInput::from_form(values)?),
            CalculatorKind::ModularRatio => CalculationItem::ModularRatio(ModularRatioInput::from_form(values)?),
        })
    }

    /// Parse, validate and calculate in one step
    pub fn run(&self, values: &FormValues) -> CalcResult<Report> {
        let item = self.parse(values)?;
        let report = item.calculate()?;
        tracing::debug!(calculator = self.id(), passes = report.passes(), "calculation complete");
        Ok(report)
    }
}

impl FromStr for CalculatorKind {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        CalculatorKind::ALL
            .into_iter()
            .find(|k| k.id() == wanted)
            .ok_or_else(|| CalcError::invalid_input("calculator", s, "unknown calculator"))
    }
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Enum wrapper for all calculation inputs.
///
/// Lets a calculation travel as one JSON document:
///
/// ```json
/// { "type": "beam-shear", "profile": "IPE 360", "steel": "S355" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CalculationItem {
    SlabConstruction(ConstructionInput),
    SlabMoment(SlabMomentInput),
    SlabShear(SlabShearInput),
    SlabDeflection(SlabDeflectionInput),
    SlabFire(SlabFireInput),
    ColumnResistance(ColumnResistanceInput),
    ColumnBuckling(ColumnBucklingInput),
    ColumnCombined(ColumnCombinedInput),
    ColumnFire(ColumnFireInput),
    BeamMoment(BeamMomentInput),
    BeamShear(BeamShearInput),
    BeamConnectors(ConnectorInput),
    BeamDeflection(BeamDeflectionInput),
    EffectiveWidth(EffectiveWidthInput),
    ModularRatio(ModularRatioInput),
}

impl CalculationItem {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationItem::SlabConstruction(_) => CalculatorKind::SlabConstruction,
            CalculationItem::SlabMoment(_) => CalculatorKind::SlabMoment,
            CalculationItem::SlabShear(_) => CalculatorKind::SlabShear,
            CalculationItem::SlabDeflection(_) => CalculatorKind::SlabDeflection,
            CalculationItem::SlabFire(_) => CalculatorKind::SlabFire,
            CalculationItem::ColumnResistance(_) => CalculatorKind::ColumnResistance,
            CalculationItem::ColumnBuckling(_) => CalculatorKind::ColumnBuckling,
            CalculationItem::ColumnCombined(_) => CalculatorKind::ColumnCombined,
            CalculationItem::ColumnFire(_) => CalculatorKind::ColumnFire,
            CalculationItem::BeamMoment(_) => CalculatorKind::BeamMoment,
            CalculationItem::BeamShear(_) => CalculatorKind::BeamShear,
            CalculationItem::BeamConnectors(_) => CalculatorKind::BeamConnectors,
            CalculationItem::BeamDeflection(_) => CalculatorKind::BeamDeflection,
            CalculationItem::EffectiveWidth(_) => CalculatorKind::EffectiveWidth,
            CalculationItem::ModularRatio(_) => CalculatorKind::ModularRatio,
        }
    }

    /// Run the calculation and render its report
    pub fn calculate(&self) -> CalcResult<Report> {
        Ok(match self {
            CalculationItem::SlabConstruction(i) => slab::calculate_construction(i)?.report(),
            CalculationItem::SlabMoment(i) => slab::calculate_moment(i)?.report(),
            CalculationItem::SlabShear(i) => slab::calculate_shear(i)?.report(),
            CalculationItem::SlabDeflection(i) => slab::calculate_deflection(i)?.report(),
            CalculationItem::SlabFire(i) => slab::calculate_fire(i)?.report(),
            CalculationItem::ColumnResistance(i) => column::calculate_resistance(i)?.report(),
            CalculationItem::ColumnBuckling(i) => column::calculate_buckling(i)?.report(),
            CalculationItem::ColumnCombined(i) => column::calculate_combined(i)?.report(),
            CalculationItem::ColumnFire(i) => column::calculate_fire(i)?.report(),
            CalculationItem::BeamMoment(i) => beam::calculate_moment(i)?.report(),
            CalculationItem::BeamShear(i) => beam::calculate_shear(i)?.report(),
            CalculationItem::BeamConnectors(i) => beam::calculate_connectors(i)?.report(),
            CalculationItem::BeamDeflection(i) => beam::calculate_deflection(i)?.report(),
            CalculationItem::EffectiveWidth(i) => beam::calculate_effective_width(i)?.report(),
            CalculationItem::ModularRatio(i) => beam::calculate_modular_ratio(i)?.report(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_every_kind_round_trips_its_id() {
        for kind in CalculatorKind::ALL {
            assert_eq!(kind.id().parse::<CalculatorKind>().unwrap(), kind);
            assert!(!kind.fields().is_empty());
        }
        assert_eq!("SLAB_FIRE".parse::<CalculatorKind>().unwrap(), CalculatorKind::SlabFire);
        assert!("wall".parse::<CalculatorKind>().is_err());
    }

    #[test]
    fn test_courses_partition_calculators() {
        let total: usize = Course::ALL.iter().map(|c| c.calculators().len()).sum();
        assert_eq!(total, CalculatorKind::ALL.len());
        assert_eq!(Course::Columns.calculators().len(), 4);
    }

    #[test]
    fn test_fire_rating_parsing_and_order() {
        assert_eq!("r90".parse::<FireRating>().unwrap(), FireRating::R90);
        assert_eq!("120".parse::<FireRating>().unwrap(), FireRating::R120);
        assert!("R45".parse::<FireRating>().is_err());
        assert!(FireRating::R30 < FireRating::R120);
        assert_eq!(FireRating::R90.slab_min_hc_mm(), 80.0);
    }

    #[test]
    fn test_run_from_form_values() {
        let values = FormValues::new()
            .with("deck", "cofraplus60_088")
            .with("concrete", "C25")
            .with("hc_mm", "80")
            .with("shear_ed", "5");
        let report = CalculatorKind::SlabShear.run(&values).unwrap();
        assert!(report.passes());
        assert_eq!(report.verdict, Verdict::Pass("verified".to_string()));
    }

    #[test]
    fn test_missing_field_stops_before_calculation() {
        let values = FormValues::new().with("deck", "cofraplus60_088");
        let err = CalculatorKind::SlabConstruction.run(&values).unwrap_err();
        assert_eq!(err, CalcError::missing_field("span_mm"));
    }

    #[test]
    fn test_initial_forms_only_miss_required_numbers() {
        for kind in CalculatorKind::ALL {
            let values = FormValues::initial(kind.fields());
            for id in values.missing(kind.fields()) {
                let field = kind.fields().iter().find(|f| f.id == id).unwrap();
                assert_eq!(field.kind, crate::forms::FieldKind::Number, "{} {}", kind, id);
            }
        }
    }

    #[test]
    fn test_item_json_shape() {
        let json = r#"{"type":"beam-shear","profile":"IPE 360","steel":"S355"}"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind(), CalculatorKind::BeamShear);
        let report = item.calculate().unwrap();
        assert_eq!(report.verdict, Verdict::NotChecked);
    }

    proptest! {
        #[test]
        fn prop_calculations_are_deterministic(span in 500.0f64..9000.0, hc in 40.0f64..200.0) {
            let values = FormValues::new()
                .with("deck", "cofraplus60_100")
                .with("span_mm", span.to_string())
                .with("hc_mm", hc.to_string());
            let a = CalculatorKind::SlabConstruction.run(&values).unwrap();
            let b = CalculatorKind::SlabConstruction.run(&values).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_non_positive_span_is_rejected(span in -1000.0f64..=0.0) {
            let values = FormValues::new()
                .with("deck", "cofraplus60_100")
                .with("span_mm", span.to_string())
                .with("hc_mm", "80");
            let err = CalculatorKind::SlabConstruction.run(&values).unwrap_err();
            prop_assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }
}
