//! Status Bar (Bottom)
//!
//! Displays:
//! - Time left on the session
//! - Status messages

use chrono::Duration;
use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use crate::Message;

/// Render the status bar
pub fn view_status_bar(remaining: Option<Duration>, status: &str) -> Element<'_, Message> {
    let session_info = match remaining {
        Some(left) => format!("Session: {} d {} h left", left.num_days(), left.num_hours() % 24),
        None => "No session".to_string(),
    };

    row![
        text(session_info).size(10),
        Space::new().width(Length::Fill),
        text(status).size(10),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
