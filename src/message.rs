use chrono::NaiveDate;

use crate::core::task::TodoRecord;
use crate::core::user::User;
use crate::view::upcoming::FetchTicket;

/// Tabs shown once a user is logged in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Upcoming,
    Settings,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Home => "Today",
            Self::Upcoming => "Upcoming",
            Self::Settings => "Settings",
        }
    }

    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Home => "go-home-symbolic",
            Self::Upcoming => "x-office-calendar-symbolic",
            Self::Settings => "emblem-system-symbolic",
        }
    }

    pub const ALL: &'static [Page] = &[Page::Home, Page::Upcoming, Page::Settings];
}

#[derive(Debug, Clone)]
pub enum Message {
    // Session
    SessionRehydrated(Option<User>),

    // Login form
    LoginUsernameChanged(String),
    LoginPasswordChanged(String),
    ToggleShowPassword,
    LoginSubmit,
    LoginCompleted(Result<User, String>),
    Logout,

    // Navigation
    OpenPage(Page),
    OpenSettings,

    // Upcoming
    FetchTodos,
    TodosFetched(FetchTicket, Result<Vec<TodoRecord>, String>),
    SelectDate(NaiveDate),
    SelectToday,
    ToggleDatePicker,
    PickerPrevMonth,
    PickerNextMonth,

    // Settings
    ToggleDebugLogging,
}
