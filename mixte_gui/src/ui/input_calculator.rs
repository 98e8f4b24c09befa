//! Input view for a calculator form
//!
//! One row per declared field: a text input for numbers, a dropdown for
//! table keys. Optional fields show their default as placeholder.

use iced::widget::{button, column, pick_list, row, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Padding};

use mixte_core::calculations::CalculatorKind;
use mixte_core::forms::{FieldKind, FieldSpec, FormValues};

use crate::Message;

const LABEL_WIDTH: f32 = 190.0;

/// Render the form of `kind`
pub fn view(kind: CalculatorKind, form: &FormValues) -> Column<'_, Message> {
    let fields = kind
        .fields()
        .iter()
        .fold(column![].spacing(6), |fields, spec| fields.push(view_field(spec, form.get(spec.id).unwrap_or(""))));

    let action_buttons = row![
        button(text("Calculate").size(11))
            .on_press(Message::Calculate)
            .padding(Padding::from([6, 12]))
            .style(button::primary),
        button(text("Reset").size(11))
            .on_press(Message::ResetForm)
            .padding(Padding::from([6, 12]))
            .style(button::secondary),
    ]
    .spacing(6);

    column![
        text(kind.title()).size(14),
        text(kind.course().title()).size(10).color([0.5, 0.5, 0.5]),
        Space::new().height(8),
        fields,
        Space::new().height(15),
        action_buttons,
    ]
}

fn view_field<'a>(spec: &'static FieldSpec, value: &'a str) -> Element<'a, Message> {
    let id = spec.id;
    let label = if spec.unit.is_empty() {
        format!("{}:", spec.label)
    } else {
        format!("{} ({}):", spec.label, spec.unit)
    };

    let input: Element<'a, Message> = match spec.kind {
        FieldKind::Number => {
            let placeholder = match (spec.default, spec.required) {
                (Some(default), _) => default,
                (None, false) => "optional",
                (None, true) => "",
            };
            text_input(placeholder, value)
                .on_input(move |v| Message::FieldChanged(id, v))
                .on_submit(Message::Calculate)
                .width(Length::Fill)
                .padding(4)
                .size(11)
                .into()
        }
        FieldKind::Choice(source) => {
            let mut options = source.options();
            if !spec.required {
                options.insert(0, String::new());
            }
            let selected = options.iter().find(|o| o.as_str() == value).cloned();
            pick_list(options, selected, move |v: String| Message::FieldChanged(id, v))
                .width(Length::Fill)
                .text_size(11)
                .into()
        }
    };

    row![text(label).size(11).width(Length::Fixed(LABEL_WIDTH)), input]
        .align_y(Alignment::Center)
        .into()
}
