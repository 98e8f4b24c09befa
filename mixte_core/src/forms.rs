//! # Calculator Forms
//!
//! Each calculator declares its inputs as a list of [`FieldSpec`]s. User
//! entries arrive as raw text in a [`FormValues`] map (from GUI text inputs or
//! `--set key=value` on the command line) and are parsed here into numbers
//! and table keys.
//!
//! Parsing only checks presence and syntax. Range checks (positivity and
//! friends) belong to each input's `validate()`.
//!
//! ```rust
//! use mixte_core::forms::FormValues;
//!
//! let values = FormValues::new().with("span_mm", "6000").with("q", "2,5");
//! assert_eq!(values.number("span_mm").unwrap(), 6000.0);
//! assert_eq!(values.number("q").unwrap(), 2.5);
//! assert!(values.number("hc_mm").is_err());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::calculations::{ColumnSection, FireRating, SupportType};
use crate::equations::BucklingCurve;
use crate::errors::{CalcError, CalcResult};
use crate::materials::{ConcreteClass, DeckDb, ProfileDb, SteelGrade};

/// Where the options of a choice field come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChoiceSource {
    Profile,
    ColumnProfile,
    SteelGrade,
    Concrete,
    Deck,
    FireRating,
    BucklingCurve,
    SupportType,
    ColumnSection,
}

impl ChoiceSource {
    /// Option values, in display order
    pub fn options(&self) -> Vec<String> {
        match self {
            ChoiceSource::Profile => ProfileDb::global().names().into_iter().map(String::from).collect(),
            ChoiceSource::ColumnProfile => {
                let db = ProfileDb::global();
                let mut names = db.names_in_family("HEB");
                names.extend(db.names_in_family("HEM"));
                names.into_iter().map(String::from).collect()
            }
            ChoiceSource::SteelGrade => SteelGrade::ALL.iter().map(|g| g.code().to_string()).collect(),
            ChoiceSource::Concrete => ConcreteClass::ALL.iter().map(|c| c.code().to_string()).collect(),
            ChoiceSource::Deck => DeckDb::global().keys().into_iter().map(String::from).collect(),
            ChoiceSource::FireRating => FireRating::ALL.iter().map(|r| r.code().to_string()).collect(),
            ChoiceSource::BucklingCurve => BucklingCurve::ALL.iter().map(|c| c.code().to_string()).collect(),
            ChoiceSource::SupportType => SupportType::ALL.iter().map(|s| s.code().to_string()).collect(),
            ChoiceSource::ColumnSection => ColumnSection::ALL.iter().map(|s| s.code().to_string()).collect(),
        }
    }
}

/// Kind of value a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Number,
    Choice(ChoiceSource),
}

/// Declaration of one form input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Key in [`FormValues`]
    pub id: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub kind: FieldKind,
    /// Value used when the field is left blank (implies optional)
    pub default: Option<&'static str>,
    /// Blank is refused when true
    pub required: bool,
}

impl FieldSpec {
    pub const fn number(id: &'static str, label: &'static str, unit: &'static str) -> Self {
        Self {
            id,
            label,
            unit,
            kind: FieldKind::Number,
            default: None,
            required: true,
        }
    }

    pub const fn choice(id: &'static str, label: &'static str, source: ChoiceSource) -> Self {
        Self {
            id,
            label,
            unit: "",
            kind: FieldKind::Choice(source),
            default: None,
            required: true,
        }
    }

    /// Optional, falling back to `default` when blank
    pub const fn or_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self.required = false;
        self
    }

    /// Optional with no default (blank means "not checked")
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Pre-filled text for a fresh form
    pub fn initial_value(&self) -> String {
        match (self.default, self.kind) {
            (Some(default), _) => default.to_string(),
            (None, FieldKind::Choice(source)) if self.required => {
                source.options().into_iter().next().unwrap_or_default()
            }
            _ => String::new(),
        }
    }
}

/// Raw text entered in a calculator form, keyed by field id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled with each field's initial value
    pub fn initial(fields: &[FieldSpec]) -> Self {
        let mut values = Self::new();
        for field in fields {
            values.set(field.id, field.initial_value());
        }
        values
    }

    pub fn with(mut self, id: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(id, value);
        self
    }

    pub fn set(&mut self, id: impl Into<String>, value: impl Into<String>) {
        self.0.insert(id.into(), value.into());
    }

    /// Parse a `key=value` assignment as given on the command line
    pub fn parse_assignment(assignment: &str) -> CalcResult<(String, String)> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(CalcError::invalid_input(
                "assignment",
                assignment,
                "expected key=value",
            )),
        }
    }

    /// Trimmed, non-empty text of a field
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0
            .get(id)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Required number. Accepts a decimal comma.
    pub fn number(&self, id: &str) -> CalcResult<f64> {
        let raw = self.get(id).ok_or_else(|| CalcError::missing_field(id))?;
        parse_number(id, raw)
    }

    /// Optional number, `default` when blank
    pub fn number_or(&self, id: &str, default: f64) -> CalcResult<f64> {
        match self.get(id) {
            Some(raw) => parse_number(id, raw),
            None => Ok(default),
        }
    }

    /// Optional number, `None` when blank
    pub fn optional_number(&self, id: &str) -> CalcResult<Option<f64>> {
        self.get(id).map(|raw| parse_number(id, raw)).transpose()
    }

    /// Required text, typically a table key
    pub fn text(&self, id: &str) -> CalcResult<&str> {
        self.get(id).ok_or_else(|| CalcError::missing_field(id))
    }

    /// Required choice parsed with the table's own parser
    pub fn choice<T>(&self, id: &str, parse: impl FnOnce(&str) -> CalcResult<T>) -> CalcResult<T> {
        parse(self.text(id)?)
    }

    /// Optional choice, `None` when blank
    pub fn optional_choice<T>(
        &self,
        id: &str,
        parse: impl FnOnce(&str) -> CalcResult<T>,
    ) -> CalcResult<Option<T>> {
        self.get(id).map(parse).transpose()
    }

    /// Ids of required fields left blank
    pub fn missing(&self, fields: &[FieldSpec]) -> Vec<&'static str> {
        fields
            .iter()
            .filter(|f| f.required && self.get(f.id).is_none())
            .map(|f| f.id)
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.set(k, v);
        }
        values
    }
}

fn parse_number(id: &str, raw: &str) -> CalcResult<f64> {
    raw.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CalcError::invalid_input(id, raw, "not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_are_missing() {
        let values = FormValues::new().with("hc", "   ");
        assert_eq!(values.number("hc").unwrap_err(), CalcError::missing_field("hc"));
        assert_eq!(values.number("span").unwrap_err(), CalcError::missing_field("span"));
    }

    #[test]
    fn test_non_numeric_is_invalid() {
        let values = FormValues::new().with("hc", "abc").with("x", "NaN").with("y", "inf");
        assert_eq!(values.number("hc").unwrap_err().error_code(), "INVALID_INPUT");
        assert!(values.number("x").is_err());
        assert!(values.number("y").is_err());
    }

    #[test]
    fn test_optional_numbers() {
        let values = FormValues::new().with("q", "").with("med", "120,5");
        assert_eq!(values.number_or("q", 1.5).unwrap(), 1.5);
        assert_eq!(values.optional_number("med").unwrap(), Some(120.5));
        assert_eq!(values.optional_number("ved").unwrap(), None);
    }

    #[test]
    fn test_choice_uses_parser() {
        let values = FormValues::new().with("steel", "s355");
        assert_eq!(values.choice("steel", SteelGrade::from_str_flexible).unwrap(), SteelGrade::S355);
        let bad = FormValues::new().with("steel", "S100");
        assert_eq!(
            bad.choice("steel", SteelGrade::from_str_flexible).unwrap_err().error_code(),
            "MATERIAL_NOT_FOUND"
        );
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            FormValues::parse_assignment("span_mm = 6000").unwrap(),
            ("span_mm".to_string(), "6000".to_string())
        );
        assert!(FormValues::parse_assignment("6000").is_err());
        assert!(FormValues::parse_assignment("=1").is_err());
    }

    #[test]
    fn test_initial_values_and_missing() {
        const FIELDS: &[FieldSpec] = &[
            FieldSpec::choice("steel", "Steel", ChoiceSource::SteelGrade),
            FieldSpec::number("span", "Span", "mm"),
            FieldSpec::number("q", "Load", "kN/m²").or_default("1.5"),
            FieldSpec::number("med", "M_Ed", "kN·m").optional(),
        ];
        let values = FormValues::initial(FIELDS);
        assert_eq!(values.get("steel"), Some("S235"));
        assert_eq!(values.get("q"), Some("1.5"));
        assert_eq!(values.missing(FIELDS), vec!["span"]);
    }

    #[test]
    fn test_from_iterator() {
        let values: FormValues = vec![("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(values.iter().count(), 2);
    }
}
