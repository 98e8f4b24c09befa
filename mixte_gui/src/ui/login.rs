//! Login screen
//!
//! Last name, first name and email. The email is checked against the
//! allow-list when the form is submitted.

use iced::widget::{button, column, container, row, text, text_input, Space};
use iced::{Alignment, Element, Length, Padding};

use crate::{LoginField, LoginForm, Message};

/// Render the login form, centered
pub fn view(form: &LoginForm) -> Element<'_, Message> {
    let content = column![
        text("Construction Mixte").size(28),
        text("Eurocode 4 - composite slabs, columns and beams").size(12).color([0.5, 0.5, 0.5]),
        Space::new().height(20),
        text("Course access").size(16),
        Space::new().height(8),
        labeled_input("Last name:", &form.last_name, LoginField::LastName),
        labeled_input("First name:", &form.first_name, LoginField::FirstName),
        labeled_input("Email:", &form.email, LoginField::Email),
        Space::new().height(12),
        row![
            Space::new().width(Length::Fill),
            button(text("Access the course").size(12))
                .on_press(Message::SubmitLogin)
                .padding(Padding::from([6, 16]))
                .style(button::primary),
        ],
        Space::new().height(12),
        text("Access is reserved to registered participants. The session lasts 7 days on this device.")
            .size(10)
            .color([0.5, 0.5, 0.5]),
    ]
    .spacing(6)
    .width(Length::Fixed(420.0));

    let login_box = container(content).padding(24).style(container::bordered_box);

    container(login_box)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .into()
}

/// Labeled text input; Enter submits the form
fn labeled_input<'a>(label: &'a str, value: &'a str, field: LoginField) -> Element<'a, Message> {
    row![
        text(label).size(11).width(Length::Fixed(80.0)),
        text_input("", value)
            .on_input(move |v| Message::LoginFieldChanged(field, v))
            .on_submit(Message::SubmitLogin)
            .width(Length::Fill)
            .padding(4)
            .size(11),
    ]
    .align_y(Alignment::Center)
    .into()
}
