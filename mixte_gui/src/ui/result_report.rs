//! Results view for a calculator report
//!
//! Shows:
//! - Verdict badge
//! - Labelled values, governing ones emphasized
//! - Notes

use iced::font::Weight;
use iced::widget::{column, row, text, Column, Space};
use iced::{Alignment, Element, Font, Length};

use mixte_core::calculations::{Report, ReportLine};
use mixte_core::format::NumberFormat;

use crate::Message;
use super::shared::badge;

/// Render a calculation report
pub fn view(report: &Report, fmt: NumberFormat) -> Column<'_, Message> {
    let lines = report
        .lines
        .iter()
        .fold(column![].spacing(3), |lines, line| lines.push(view_line(line, &fmt)));

    let mut content = column![
        text(report.title.as_str()).size(14),
        Space::new().height(8),
        badge::view_badge(&report.verdict, 16.0),
        Space::new().height(12),
        lines,
    ];

    if !report.notes.is_empty() {
        content = content.push(Space::new().height(12)).push(text("Notes").size(12));
        for note in &report.notes {
            content = content.push(text(format!("- {}", note)).size(10).color([0.4, 0.4, 0.4]));
        }
    }

    content
}

fn view_line(line: &ReportLine, fmt: &NumberFormat) -> Element<'static, Message> {
    let value = text(line.value.render(fmt)).size(11);
    let value = if line.highlight {
        value.font(Font {
            weight: Weight::Bold,
            ..Font::DEFAULT
        })
    } else {
        value
    };

    row![
        text(line.label.clone()).size(11).width(Length::Fill),
        value,
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}
