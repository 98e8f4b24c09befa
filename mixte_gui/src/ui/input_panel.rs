//! Input Panel (Center)
//!
//! Shows the form of the selected calculator, or a hint when the course
//! has none selected.

use iced::widget::{container, scrollable, text, Column};
use iced::{Element, Length};

use mixte_core::calculations::CalculatorKind;

use crate::{App, Message};
use super::input_calculator;

/// Render the input panel for the selected calculator
pub fn view_input_panel(app: &App, selected: Option<CalculatorKind>) -> Element<'_, Message> {
    let panel: Column<'_, Message> = match selected.and_then(|kind| app.form(kind).map(|form| (kind, form))) {
        Some((kind, form)) => input_calculator::view(kind, form),
        None => Column::new().push(text("Select a calculator from the left panel").size(14).color([0.5, 0.5, 0.5])),
    };

    container(scrollable(panel.padding(8)))
        .width(Length::FillPortion(45))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}
