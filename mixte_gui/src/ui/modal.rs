//! Modal dialog component
//!
//! Blocking alerts for refused logins and invalid calculator input, and the
//! logout confirmation.

use iced::widget::{button, column, container, row, text, Space};
use iced::{Alignment, Element, Length, Padding};

use mixte_core::CalcError;

use crate::Message;

/// Types of modal dialogs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalType {
    /// Message with a single OK button
    Alert { title: String, message: String },
    /// Ask before removing the session
    ConfirmLogout,
}

impl ModalType {
    pub fn alert(title: impl Into<String>, message: impl Into<String>) -> Self {
        ModalType::Alert {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Alert for a failed login
    pub fn from_login_error(error: &CalcError) -> Self {
        match error {
            CalcError::AccessDenied { email } => Self::alert(
                "Access denied",
                format!("{} is not registered for this course. Contact the course administrator.", email),
            ),
            CalcError::MissingField { .. } => Self::alert("Incomplete form", "Please fill in every field."),
            other => Self::alert("Login failed", other.to_string()),
        }
    }

    /// Alert for a calculator that refused its input
    pub fn from_calc_error(error: &CalcError) -> Self {
        let title = if error.is_user_input() {
            "Invalid input"
        } else {
            "Calculation error"
        };
        Self::alert(title, error.to_string())
    }
}

/// Render a modal backdrop (semi-transparent overlay that catches clicks)
pub fn view_backdrop() -> Element<'static, Message> {
    button(Space::new())
        .on_press(Message::ModalCancel)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_, _| {
            iced::widget::button::Style::default()
                .with_background(iced::Color::from_rgba(0.0, 0.0, 0.0, 0.5))
        })
        .into()
}

/// Render a modal dialog based on its type
pub fn view_modal(modal_type: &ModalType) -> Element<'_, Message> {
    match modal_type {
        ModalType::Alert { title, message } => view_alert_modal(title, message),
        ModalType::ConfirmLogout => view_logout_modal(),
    }
}

fn view_alert_modal<'a>(title: &'a str, message: &'a str) -> Element<'a, Message> {
    let ok_btn = button(text("OK").size(11))
        .on_press(Message::ModalCancel)
        .padding(Padding::from([6, 16]))
        .style(button::primary);

    let content = column![
        text(title).size(18),
        Space::new().height(12),
        text(message).size(12),
        Space::new().height(20),
        container(ok_btn).align_x(iced::alignment::Horizontal::Right).width(Length::Fill),
    ]
    .width(Length::Fixed(400.0));

    centered(content.into())
}

/// Render the "Log out?" modal
fn view_logout_modal() -> Element<'static, Message> {
    let buttons = row![
        Space::new().width(Length::Fill),
        button(text("Cancel").size(11))
            .on_press(Message::ModalCancel)
            .padding(Padding::from([6, 16]))
            .style(button::secondary),
        Space::new().width(8),
        button(text("Log out").size(11))
            .on_press(Message::ModalConfirm)
            .padding(Padding::from([6, 16]))
            .style(button::primary),
    ]
    .align_y(Alignment::Center);

    let content = column![
        text("Log out?").size(18),
        Space::new().height(12),
        text("The session stored on this device will be removed. You will need to log in again to open the courses.")
            .size(12),
        Space::new().height(20),
        buttons,
    ]
    .width(Length::Fixed(400.0));

    centered(content.into())
}

/// Center the modal box in the screen
fn centered(content: Element<'_, Message>) -> Element<'_, Message> {
    let modal_box = container(content).padding(20).style(container::bordered_box);

    container(modal_box)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(iced::alignment::Horizontal::Center)
        .align_y(iced::alignment::Vertical::Center)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_error_alerts() {
        let modal = ModalType::from_login_error(&CalcError::access_denied("pirate@evil.com"));
        match modal {
            ModalType::Alert { title, message } => {
                assert_eq!(title, "Access denied");
                assert!(message.contains("pirate@evil.com"));
            }
            other => panic!("unexpected modal {other:?}"),
        }
        assert_eq!(
            ModalType::from_login_error(&CalcError::missing_field("email")),
            ModalType::alert("Incomplete form", "Please fill in every field.")
        );
    }

    #[test]
    fn test_calc_error_title() {
        let modal = ModalType::from_calc_error(&CalcError::invalid_input("hc_mm", "-5", "must be positive"));
        assert!(matches!(modal, ModalType::Alert { ref title, .. } if title == "Invalid input"));
        let modal = ModalType::from_calc_error(&CalcError::calculation_failed("slab", "no neutral axis"));
        assert!(matches!(modal, ModalType::Alert { ref title, .. } if title == "Calculation error"));
    }
}
