//! Results Panel (Right Side)
//!
//! Shows the last report of the selected calculator, or a hint until one
//! has been calculated.

use iced::widget::{column, container, scrollable, text, Column, Space};
use iced::{Element, Length};

use mixte_core::calculations::CalculatorKind;

use crate::{App, Message};
use super::result_report;

/// Render the results panel for the selected calculator
pub fn view_results_panel(app: &App, selected: Option<CalculatorKind>) -> Element<'_, Message> {
    let content: Column<'_, Message> = match selected.and_then(|kind| app.report(kind)) {
        Some(report) => result_report::view(report, app.number_format()),
        None => column![
            text("Results").size(14),
            Space::new().height(8),
            text("Fill in the form and press Calculate.").size(11).color([0.5, 0.5, 0.5]),
        ],
    };

    container(scrollable(content.padding(8)))
        .width(Length::FillPortion(55))
        .height(Length::Fill)
        .style(container::bordered_box)
        .padding(5)
        .into()
}
