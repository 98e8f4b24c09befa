//! Items Panel (Left Sidebar)
//!
//! Lists the calculators of the open course. The selected one is
//! highlighted and each carries the badge of its last calculation.

use std::collections::HashMap;

use iced::widget::{button, column, container, row, rule, scrollable, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use mixte_core::calculations::{CalculatorKind, Course, Report};

use crate::Message;
use super::shared::badge;

/// Render the items panel (left sidebar)
pub fn view_items_panel<'a>(
    course: Course,
    selected: Option<CalculatorKind>,
    reports: &'a HashMap<CalculatorKind, Report>,
    width: f32,
) -> Element<'a, Message> {
    let mut panel_content: Column<'_, Message> = column![
        text(course.title()).size(13),
        text(format!("Calculators ({})", course.calculators().len())).size(10).color([0.5, 0.5, 0.5]),
        Space::new().height(4),
        rule::horizontal(1),
    ]
    .spacing(2);

    let mut list: Column<'_, Message> = column![].spacing(2).padding(Padding::from([4, 0]));
    for kind in course.calculators() {
        let mut label = row![text(kind.title()).size(10).width(Length::Fill)]
            .spacing(4)
            .align_y(Alignment::Center);
        if let Some(report) = reports.get(&kind) {
            label = label.push(badge::view_icon(&report.verdict));
        }

        let style = if selected == Some(kind) { button::primary } else { button::secondary };
        list = list.push(
            button(label)
                .on_press(Message::SelectCalculator(kind))
                .padding(Padding::from([3, 6]))
                .style(style)
                .width(Length::Fill),
        );
    }
    panel_content = panel_content.push(list);

    container(scrollable(panel_content.padding(4)))
        .width(Length::Fixed(width))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(4)
        .into()
}
