//! Toolbar component
//!
//! Header with the signed-in reader and logout, then the course tabs.

use iced::widget::{button, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use mixte_core::access::Session;
use mixte_core::calculations::Course;

use crate::Message;

/// Render the application header with the current reader
pub fn view_header(session: Option<&Session>) -> Element<'static, Message> {
    let reader = session
        .map(|s| format!("{} ({})", s.display_name(), s.email))
        .unwrap_or_default();

    row![
        text("Construction Mixte").size(28),
        Space::new().width(Length::Fill),
        text(reader).size(12),
        Space::new().width(8),
        button(text("Log out").size(11))
            .on_press(Message::RequestLogout)
            .padding(Padding::from([4, 8]))
            .style(button::secondary),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Render the course tabs, highlighting the open course
pub fn view_toolbar(active: Option<Course>) -> Element<'static, Message> {
    let home = button(text("Courses").size(11))
        .on_press(Message::OpenHome)
        .padding(Padding::from([4, 8]))
        .style(if active.is_none() { button::primary } else { button::secondary });

    let tabs = Course::ALL.iter().fold(row![home].spacing(4), |tabs, course| {
        let style = if active == Some(*course) { button::primary } else { button::secondary };
        tabs.push(
            button(text(course.title()).size(11))
                .on_press(Message::OpenCourse(*course))
                .padding(Padding::from([4, 8]))
                .style(style),
        )
    });

    row![tabs, Space::new().width(Length::Fill)]
        .padding(Padding::from([4, 0]))
        .align_y(Alignment::Center)
        .into()
}
