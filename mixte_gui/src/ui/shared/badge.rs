//! Verdict badge
//!
//! Green for a satisfied check, red for a failed one, amber outside the
//! simplified method's range, grey when nothing was checked.

use iced::widget::{container, text};
use iced::{Background, Border, Color, Element, Padding};

use mixte_core::calculations::Verdict;

use crate::Message;

/// Text and background colors of a verdict
pub fn colors(verdict: &Verdict) -> (Color, Color) {
    match verdict {
        Verdict::Pass(_) => (Color::from_rgb(0.1, 0.45, 0.2), Color::from_rgb(0.85, 0.95, 0.87)),
        Verdict::Fail(_) => (Color::from_rgb(0.7, 0.1, 0.1), Color::from_rgb(0.98, 0.87, 0.87)),
        Verdict::Warning(_) => (Color::from_rgb(0.6, 0.4, 0.0), Color::from_rgb(1.0, 0.94, 0.8)),
        Verdict::NotChecked => (Color::from_rgb(0.4, 0.4, 0.4), Color::from_rgb(0.93, 0.93, 0.93)),
    }
}

/// Full badge, e.g. "✓ OK"
pub fn view_badge(verdict: &Verdict, size: f32) -> Element<'static, Message> {
    styled(verdict, verdict.badge(), size, Padding::from([6, 12]))
}

/// Compact badge with the icon only, for lists
pub fn view_icon(verdict: &Verdict) -> Element<'static, Message> {
    let icon = verdict.badge().chars().next().map(String::from).unwrap_or_default();
    styled(verdict, icon, 10.0, Padding::from([1, 5]))
}

fn styled(verdict: &Verdict, label: String, size: f32, padding: Padding) -> Element<'static, Message> {
    let (fg, bg) = colors(verdict);
    container(text(label).size(size).color(fg))
        .padding(padding)
        .style(move |_theme: &iced::Theme| container::Style {
            background: Some(Background::Color(bg)),
            border: Border {
                color: fg,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..container::Style::default()
        })
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_and_fail_colors_differ() {
        let (pass_fg, _) = colors(&Verdict::ok());
        let (fail_fg, _) = colors(&Verdict::fail("NOT VERIFIED"));
        assert_ne!(pass_fg, fail_fg);
    }
}
