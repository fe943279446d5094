use cosmic::iced::Length;
use cosmic::widget::{button, column, container, text, text_input};
use cosmic::Element;

use crate::message::Message;
use crate::view::login::LoginModel;

pub fn login_view(form: &LoginModel) -> Element<'_, Message> {
    let mut content = column().spacing(16).max_width(420.0);

    content = content.push(text::title3("Sign in"));
    content = content.push(text::body("Sign in to your account and feel the benefits"));

    content = content.push(text::caption("Username"));
    content = content.push(
        text_input::text_input("Enter your username", &form.username)
            .on_input(Message::LoginUsernameChanged)
            .width(Length::Fill),
    );

    content = content.push(text::caption("Password"));
    content = content.push(
        text_input::secure_input(
            "Enter your password",
            &form.password,
            Some(Message::ToggleShowPassword),
            !form.show_password,
        )
        .on_input(Message::LoginPasswordChanged)
        .on_submit(|_| Message::LoginSubmit)
        .width(Length::Fill),
    );

    if let Some(error) = form.error() {
        content = content.push(text::body(error.to_string()));
    }

    let submit = if form.is_submitting() {
        button::suggested("Signing in…")
    } else {
        button::suggested("Sign in").on_press(Message::LoginSubmit)
    };
    content = content.push(submit.width(Length::Fill));

    container(content)
        .padding(32)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
