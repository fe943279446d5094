use cosmic::iced::{Alignment, Length};
use cosmic::widget::{checkbox, column, container, row, text};
use cosmic::{Element, theme};

use crate::core::agenda::{long_date, weekday_name};
use crate::core::task::Task;
use crate::message::Message;

/// One fetched todo: title, synthetic time slot, and its day.
///
/// Todos from the demo API are read-only, so the checkbox only mirrors `completed`.
pub fn task_card(task: &Task) -> Element<'static, Message> {
    let title_row = row()
        .spacing(12)
        .align_y(Alignment::Center)
        .push(checkbox("", task.completed))
        .push(text::body(task.todo.clone()).width(Length::Fill));

    let time_row = row()
        .spacing(8)
        .align_y(Alignment::Center)
        .push(text::caption(task.time.clone()).width(Length::Fill))
        .push(text::caption(task.date_key()));

    let date_row = row()
        .spacing(8)
        .push(text::caption(weekday_name(task.date)).width(Length::Fill))
        .push(text::caption(long_date(task.date)));

    container(column().spacing(6).push(title_row).push(time_row).push(date_row))
        .padding(12)
        .width(Length::Fill)
        .class(theme::Container::Card)
        .into()
}

pub fn task_cards<'a>(tasks: impl Iterator<Item = &'a Task>) -> Element<'static, Message> {
    let mut content = column().spacing(12).width(Length::Fill);
    for task in tasks {
        content = content.push(task_card(task));
    }
    content.into()
}
