//! Home screen: one card per course with its calculators.

use std::collections::HashMap;

use iced::widget::{button, column, container, row, text, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use mixte_core::calculations::{CalculatorKind, Course, Report};

use crate::Message;
use super::shared::badge;

/// Render the course cards
pub fn view(reports: &HashMap<CalculatorKind, Report>) -> Element<'_, Message> {
    let cards = Course::ALL
        .iter()
        .fold(row![].spacing(12), |cards, course| cards.push(view_course_card(*course, reports)));

    column![
        text("Courses").size(18),
        Space::new().height(8),
        cards,
    ]
    .spacing(4)
    .into()
}

fn view_course_card(course: Course, reports: &HashMap<CalculatorKind, Report>) -> Element<'_, Message> {
    let mut list: Column<'_, Message> = column![].spacing(4);
    for kind in course.calculators() {
        let mut line = row![text(kind.title()).size(11)].spacing(6).align_y(Alignment::Center);
        if let Some(report) = reports.get(&kind) {
            line = line.push(badge::view_icon(&report.verdict));
        }
        list = list.push(line);
    }

    let content = column![
        text(course.title()).size(16),
        Space::new().height(6),
        list,
        Space::new().height(10),
        button(text("Open").size(11))
            .on_press(Message::OpenCourse(course))
            .padding(Padding::from([4, 12]))
            .style(button::primary),
    ]
    .spacing(4);

    container(content)
        .padding(12)
        .width(Length::FillPortion(1))
        .style(container::bordered_box)
        .into()
}
