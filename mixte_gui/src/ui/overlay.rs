//! Protection overlays
//!
//! The watermark sits in the bottom-right corner and the blocked-action
//! notification in the top-right one. Neither takes pointer input.

use iced::widget::{container, text};
use iced::{Background, Border, Color, Element, Length, Padding};

use mixte_core::protection::Watermark;

use crate::Message;

const WATERMARK_COLOR: Color = Color::from_rgba(0.18, 0.35, 0.54, 0.5);
const WATERMARK_BACKGROUND: Color = Color::from_rgba(0.18, 0.35, 0.54, 0.1);
const NOTIFICATION_BACKGROUND: Color = Color::from_rgba(0.8, 0.15, 0.15, 0.95);

/// Reader identity, bottom-right
pub fn view_watermark(watermark: Watermark) -> Element<'static, Message> {
    let badge = container(text(watermark.text().to_string()).size(11).color(WATERMARK_COLOR))
        .padding(Padding::from([5, 10]))
        .style(|_theme: &iced::Theme| container::Style {
            background: Some(Background::Color(WATERMARK_BACKGROUND)),
            border: Border {
                radius: 5.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        });

    container(badge)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(10)
        .align_x(iced::alignment::Horizontal::Right)
        .align_y(iced::alignment::Vertical::Bottom)
        .into()
}

/// Blocked-action notice, top-right
pub fn view_notification(message: &str) -> Element<'_, Message> {
    let toast = container(text(message).size(13).color(Color::WHITE))
        .padding(Padding::from([10, 18]))
        .style(|_theme: &iced::Theme| container::Style {
            background: Some(Background::Color(NOTIFICATION_BACKGROUND)),
            border: Border {
                radius: 6.0.into(),
                ..Border::default()
            },
            ..container::Style::default()
        });

    container(toast)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(20)
        .align_x(iced::alignment::Horizontal::Right)
        .align_y(iced::alignment::Vertical::Top)
        .into()
}
