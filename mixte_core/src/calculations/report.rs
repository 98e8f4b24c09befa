//! Display reports produced by every calculator.
//!
//! A [`Report`] is the presentation of one calculation: a title, labelled
//! values (some highlighted as the governing result), a [`Verdict`] badge
//! and free-form notes. Numbers keep their raw value so the same report
//! renders with a decimal comma in the GUI and a dot in JSON.

use serde::{Deserialize, Serialize};

use crate::format::NumberFormat;

/// Outcome badge of a verification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "message")]
pub enum Verdict {
    /// Check satisfied
    Pass(String),
    /// Check not satisfied, with the governing reason
    Fail(String),
    /// Satisfied, but outside the range where the simplified method applies
    Warning(String),
    /// No demand given, resistance only
    NotChecked,
}

impl Verdict {
    pub fn ok() -> Self {
        Verdict::Pass("OK".to_string())
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Verdict::Fail(reason.into())
    }

    pub fn warning(reason: impl Into<String>) -> Self {
        Verdict::Warning(reason.into())
    }

    /// Pass or fail depending on a utilisation ratio
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio <= 1.0 {
            Verdict::ok()
        } else {
            Verdict::fail("NOT VERIFIED")
        }
    }

    /// Only a `Fail` counts as failing
    pub fn passes(&self) -> bool {
        !matches!(self, Verdict::Fail(_))
    }

    /// Badge text, e.g. "✓ OK" or "✗ propping required"
    pub fn badge(&self) -> String {
        match self {
            Verdict::Pass(msg) => format!("✓ {}", msg),
            Verdict::Fail(msg) => format!("✗ {}", msg),
            Verdict::Warning(msg) => format!("⚠ {}", msg),
            Verdict::NotChecked => "—".to_string(),
        }
    }

    /// ASCII tag for terminals, matching the status icons of the CLI
    pub fn tag(&self) -> &'static str {
        match self {
            Verdict::Pass(_) => "[OK]",
            Verdict::Fail(_) => "[FAIL]",
            Verdict::Warning(_) => "[WARN]",
            Verdict::NotChecked => "[--]",
        }
    }
}

/// A value shown in a report line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Value {
    Number { value: f64, decimals: usize, unit: String },
    /// Ratio displayed as a percentage
    Percent { ratio: f64 },
    Text { text: String },
}

impl Value {
    pub fn number(value: f64, decimals: usize, unit: &str) -> Self {
        Value::Number {
            value,
            decimals,
            unit: unit.to_string(),
        }
    }

    pub fn render(&self, fmt: &NumberFormat) -> String {
        match self {
            Value::Number { value, decimals, unit } => fmt.quantity(*value, *decimals, unit),
            Value::Percent { ratio } => fmt.percent(*ratio),
            Value::Text { text } => text.clone(),
        }
    }

    /// Raw number, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number { value, .. } => Some(*value),
            Value::Percent { ratio } => Some(*ratio),
            Value::Text { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLine {
    pub label: String,
    pub value: Value,
    /// Governing result, shown emphasized
    pub highlight: bool,
}

/// Formatted results of one calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub lines: Vec<ReportLine>,
    pub verdict: Verdict,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            verdict: Verdict::NotChecked,
            notes: Vec::new(),
        }
    }

    pub fn number(self, label: &str, value: f64, decimals: usize, unit: &str) -> Self {
        self.push(label, Value::number(value, decimals, unit), false)
    }

    /// Governing number, emphasized in the output
    pub fn key_number(self, label: &str, value: f64, decimals: usize, unit: &str) -> Self {
        self.push(label, Value::number(value, decimals, unit), true)
    }

    pub fn percent(self, label: &str, ratio: f64) -> Self {
        self.push(label, Value::Percent { ratio }, false)
    }

    pub fn text(self, label: &str, text: impl Into<String>) -> Self {
        self.push(label, Value::Text { text: text.into() }, false)
    }

    pub fn key_text(self, label: &str, text: impl Into<String>) -> Self {
        self.push(label, Value::Text { text: text.into() }, true)
    }

    pub fn verdict(mut self, verdict: Verdict) -> Self {
        self.verdict = verdict;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    fn push(mut self, label: &str, value: Value, highlight: bool) -> Self {
        self.lines.push(ReportLine {
            label: label.to_string(),
            value,
            highlight,
        });
        self
    }

    pub fn passes(&self) -> bool {
        self.verdict.passes()
    }

    /// Value of the line with the given label
    pub fn value(&self, label: &str) -> Option<&Value> {
        self.lines.iter().find(|l| l.label == label).map(|l| &l.value)
    }

    /// Plain-text rendering, one `label: value` per line, then the badge
    pub fn to_text(&self, fmt: &NumberFormat) -> String {
        let width = self.lines.iter().map(|l| l.label.chars().count()).max().unwrap_or(0);
        let mut out = format!("{}\n", self.title);
        for line in &self.lines {
            let marker = if line.highlight { ">" } else { " " };
            let pad = width - line.label.chars().count();
            out.push_str(&format!(
                "{} {}{} : {}\n",
                marker,
                line.label,
                " ".repeat(pad),
                line.value.render(fmt)
            ));
        }
        out.push_str(&format!("{} {}\n", self.verdict.tag(), self.verdict.badge()));
        for note in &self.notes {
            out.push_str(&format!("  note: {}\n", note));
        }
        out
    }
}
