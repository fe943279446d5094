use chrono::NaiveDate;
use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, row, scrollable, text};
use cosmic::Element;

use crate::components::day_strip::day_strip;
use crate::components::month_picker::{MonthPickerState, month_picker};
use crate::components::task_card::task_cards;
use crate::core::agenda::weekday_name;
use crate::message::Message;
use crate::view::upcoming::{ListState, UpcomingModel};

pub fn upcoming_view<'a>(
    model: &'a UpcomingModel,
    picker: &MonthPickerState,
    today: NaiveDate,
) -> Element<'a, Message> {
    let selected = model.selected_date();
    let mut content = column().spacing(12);

    // Cursor header: weekday (opens the picker) + Today
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(button::standard(weekday_name(selected)).on_press(Message::ToggleDatePicker))
            .push(cosmic::widget::horizontal_space())
            .push(button::suggested("Today").on_press(Message::SelectToday)),
    );

    if picker.open {
        content = content.push(month_picker(picker, selected, today));
    }

    content = content.push(day_strip(&model.strip_days(), selected));
    content = content.push(text::title4(weekday_name(selected)));

    let list: Element<'a, Message> = match model.list_state() {
        ListState::Loading => container(text::body("Loading tasks..."))
            .padding(20)
            .center_x(Length::Fill)
            .into(),
        ListState::Failed(message) => column()
            .spacing(8)
            .align_x(Alignment::Center)
            .push(text::body(format!("Couldn't load tasks: {}", message)))
            .push(button::standard("Retry").on_press(Message::FetchTodos))
            .width(Length::Fill)
            .into(),
        ListState::Empty => container(text::body("No todos for this date"))
            .padding(20)
            .center_x(Length::Fill)
            .into(),
        ListState::Tasks(tasks) => task_cards(tasks.into_iter()),
    };
    content = content.push(list);

    container(scrollable(container(content).padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
