use chrono::NaiveDate;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, scrollable, text};
use cosmic::{Element, theme};

use crate::core::agenda::long_date;
use crate::core::user::User;
use crate::message::{Message, Page};

pub fn home_view<'a>(user: Option<&User>, today: NaiveDate) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    let greeting = match user {
        Some(u) if !u.first_name.is_empty() => format!("Hello, {}", u.first_name),
        _ => "Hello".to_string(),
    };
    content = content.push(text::title3(greeting));
    content = content.push(text::body("Best platform to create to-do list"));

    let prompt = row()
        .spacing(12)
        .align_y(Alignment::Center)
        .push(
            button::icon(icon::from_name("list-add-symbolic"))
                .on_press(Message::OpenPage(Page::Upcoming)),
        )
        .push(text::body("Open Upcoming to see your tasks").width(Length::Fill));

    let task_row = row()
        .spacing(8)
        .push(text::caption("Add your task text").width(Length::Fill))
        .push(text::caption(long_date(today)));

    content = content.push(
        container(column().spacing(16).push(prompt).push(task_row))
            .padding(16)
            .width(Length::Fill)
            .class(theme::Container::Card),
    );

    container(scrollable(container(content).padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
