use chrono::{Datelike, NaiveDate};
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, text};
use cosmic::Element;

use crate::core::agenda::start_of_week;
use crate::message::Message;

/// Earliest and latest dates the picker lets you move to.
const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2100;

#[derive(Debug, Clone)]
pub struct MonthPickerState {
    pub open: bool,
    /// First day of the displayed month.
    pub displayed_month: NaiveDate,
}

impl MonthPickerState {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            open: false,
            displayed_month: first_of_month(date),
        }
    }

    /// Open on the month of `selected`, or close.
    pub fn toggle(&mut self, selected: NaiveDate) {
        self.open = !self.open;
        if self.open {
            self.displayed_month = first_of_month(selected);
        }
    }

    pub fn prev_month(&mut self) {
        let prev = self
            .displayed_month
            .checked_sub_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        if prev.year() >= MIN_YEAR {
            self.displayed_month = prev;
        }
    }

    pub fn next_month(&mut self) {
        let next = self
            .displayed_month
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(self.displayed_month);
        if next.year() <= MAX_YEAR {
            self.displayed_month = next;
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Month grid; picking a day sends `SelectDate`.
pub fn month_picker<'a>(
    state: &MonthPickerState,
    selected: NaiveDate,
    today: NaiveDate,
) -> Element<'a, Message> {
    let first = state.displayed_month;
    let month = first.month();

    let header = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(
            button::icon(cosmic::widget::icon::from_name("go-previous-symbolic"))
                .on_press(Message::PickerPrevMonth),
        )
        .push(
            text::body(first.format("%B %Y").to_string())
                .width(Length::Fill)
                .center(),
        )
        .push(
            button::icon(cosmic::widget::icon::from_name("go-next-symbolic"))
                .on_press(Message::PickerNextMonth),
        );

    let mut day_labels = row().spacing(0);
    for label in ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"] {
        day_labels = day_labels.push(day_label(label));
    }

    let mut grid = column().spacing(2).push(header).push(day_labels);

    let grid_start = start_of_week(first);
    for week in 0..6 {
        let mut week_row = row().spacing(0);
        let mut any_in_month = false;

        for day_of_week in 0..7 {
            let date = grid_start + chrono::Duration::days(week * 7 + day_of_week);
            let cell: Element<'a, Message> = if date.month() != month {
                container(text::body(" "))
                    .width(Length::FillPortion(1))
                    .center_x(Length::FillPortion(1))
                    .into()
            } else {
                any_in_month = true;
                let label = date.day().to_string();
                let txt = if date == today {
                    text::body(label).font(cosmic::iced::Font {
                        weight: cosmic::iced::font::Weight::Bold,
                        ..Default::default()
                    })
                } else {
                    text::body(label)
                };
                let class = if date == selected {
                    cosmic::theme::Button::Suggested
                } else {
                    cosmic::theme::Button::Text
                };
                button::custom(container(txt.center()).center_x(Length::Fill))
                    .class(class)
                    .on_press(Message::SelectDate(date))
                    .width(Length::FillPortion(1))
                    .into()
            };
            week_row = week_row.push(cell);
        }

        if any_in_month {
            grid = grid.push(week_row);
        }
    }

    container(grid).width(Length::Fill).padding(8).into()
}

fn day_label(label: &str) -> Element<'_, Message> {
    container(text::caption(label).center())
        .width(Length::FillPortion(1))
        .center_x(Length::FillPortion(1))
        .into()
}
