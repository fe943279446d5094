use cosmic::iced::{Alignment, Length};
use cosmic::widget::{button, column, container, icon, row, scrollable, text};
use cosmic::{Element, theme};

use crate::config::DaybookConfig;
use crate::core::user::User;
use crate::message::Message;

/// Static entries; none of them lead anywhere yet.
const ENTRIES: &[(&str, &str)] = &[
    ("Account", "avatar-default-symbolic"),
    ("Theme", "preferences-desktop-appearance-symbolic"),
    ("App Icon", "applications-graphics-symbolic"),
    ("Productivity", "utilities-system-monitor-symbolic"),
];

pub fn settings_view<'a>(config: &'a DaybookConfig, user: Option<&User>) -> Element<'a, Message> {
    let mut content = column().spacing(12);

    // --- Profile ---
    if let Some(user) = user {
        let mut profile = column()
            .spacing(4)
            .align_x(Alignment::Center)
            .push(text::title3(user.full_name()))
            .push(text::body(user.handle()));
        if !user.image.is_empty() {
            profile = profile.push(text::caption(user.image.clone()));
        }
        content = content.push(
            container(profile)
                .padding(16)
                .center_x(Length::Fill)
                .class(theme::Container::Card),
        );
    }

    // --- Entries ---
    for (label, icon_name) in ENTRIES {
        content = content.push(
            row()
                .spacing(12)
                .align_y(Alignment::Center)
                .push(icon::from_name(*icon_name).size(20).icon())
                .push(text::body(*label).width(Length::Fill))
                .push(icon::from_name("go-next-symbolic").size(16).icon()),
        );
    }

    // --- Debug logging ---
    content = content.push(
        row()
            .spacing(8)
            .align_y(Alignment::Center)
            .push(text::body("Debug logging").width(Length::Fill))
            .push(
                cosmic::widget::toggler(config.debug_logging)
                    .on_toggle(|_| Message::ToggleDebugLogging),
            ),
    );

    content = content.push(text::caption(format!("API: {}", config.api_base_url)));

    // --- Session ---
    content = content.push(
        button::destructive("Log out")
            .on_press(Message::Logout)
            .width(Length::Fill),
    );

    container(scrollable(container(content).padding(16)))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
