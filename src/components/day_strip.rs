use chrono::NaiveDate;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, text};
use cosmic::Element;

use crate::core::agenda::{day_number, weekday_short};
use crate::message::Message;

/// Row of day cells; the selected day is highlighted and tapping one moves the cursor.
pub fn day_strip<'a>(days: &[NaiveDate], selected: NaiveDate) -> Element<'a, Message> {
    let mut strip = row().spacing(4).align_y(Alignment::Center);

    for &day in days {
        let cell = column()
            .spacing(2)
            .align_x(Alignment::Center)
            .push(text::caption(weekday_short(day)))
            .push(text::title4(day_number(day)));

        let class = if day == selected {
            cosmic::theme::Button::Suggested
        } else {
            cosmic::theme::Button::Text
        };

        strip = strip.push(
            button::custom(container(cell).center_x(Length::Fill))
                .class(class)
                .on_press(Message::SelectDate(day))
                .width(Length::FillPortion(1)),
        );
    }

    container(strip).width(Length::Fill).padding([0, 8]).into()
}
