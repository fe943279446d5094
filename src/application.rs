use std::sync::Arc;

use cosmic::app::{Core, Task as CosmicTask};
use cosmic::iced::Length;
use cosmic::widget::{button, container, icon, nav_bar, row, text};
use cosmic::{Application, Element, executor};

use crate::api::{ApiClient, FETCH_FALLBACK_MESSAGE, LOGIN_FALLBACK_MESSAGE};
use crate::components::month_picker::MonthPickerState;
use crate::config::DaybookConfig;
use crate::message::{Message, Page};
use crate::pages;
use crate::store::{FileStorage, SessionStore};
use crate::view::Route;
use crate::view::login::LoginModel;
use crate::view::upcoming::{FetchStatus, UpcomingModel};

pub struct Daybook {
    core: Core,
    nav_model: nav_bar::Model,
    config: DaybookConfig,
    cosmic_config: cosmic::cosmic_config::Config,
    active_page: Page,

    session: SessionStore,
    api: Option<ApiClient>,

    login: LoginModel,
    upcoming: UpcomingModel,
    date_picker: MonthPickerState,
}

pub struct Flags {
    pub config: DaybookConfig,
    pub cosmic_config: cosmic::cosmic_config::Config,
}

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

impl Application for Daybook {
    type Executor = executor::Default;
    type Flags = Flags;
    type Message = Message;

    const APP_ID: &'static str = "dev.daybook.app";

    fn core(&self) -> &Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut Core {
        &mut self.core
    }

    fn init(core: Core, flags: Self::Flags) -> (Self, CosmicTask<Self::Message>) {
        let config = flags.config;

        if let Err(e) = config.ensure_dirs() {
            log::error!("Failed to create data directory: {}", e);
        }

        let mut nav_model = nav_bar::Model::default();
        for page in Page::ALL {
            nav_model
                .insert()
                .text(page.title())
                .icon(icon::from_name(page.icon_name()).icon())
                .data(*page);
        }
        nav_model.activate_position(0);

        let session = SessionStore::new(Arc::new(FileStorage::new(config.storage_dir())));

        let api = match ApiClient::new(&config) {
            Ok(client) => Some(client),
            Err(e) => {
                log::error!("Failed to build HTTP client: {}", e);
                None
            }
        };

        let today = today();
        let app = Self {
            core,
            nav_model,
            config,
            cosmic_config: flags.cosmic_config,
            active_page: Page::Home,
            session: session.clone(),
            api,
            login: LoginModel::default(),
            upcoming: UpcomingModel::new(today),
            date_picker: MonthPickerState::new(today),
        };

        let rehydrate = CosmicTask::perform(
            async move { session.rehydrate().await },
            |user| cosmic::Action::App(Message::SessionRehydrated(user)),
        );

        (app, rehydrate)
    }

    fn nav_model(&self) -> Option<&nav_bar::Model> {
        match Route::resolve(&self.session) {
            Route::Tasks => Some(&self.nav_model),
            Route::Splash | Route::Login => None,
        }
    }

    fn on_nav_select(&mut self, id: nav_bar::Id) -> CosmicTask<Message> {
        if let Some(page) = self.nav_model.data::<Page>(id).copied() {
            self.nav_model.activate(id);
            return self.open_page(page);
        }
        CosmicTask::none()
    }

    fn header_center(&self) -> Vec<Element<'_, Message>> {
        let title = match Route::resolve(&self.session) {
            Route::Tasks => self.active_page.title(),
            Route::Login => "Sign in",
            Route::Splash => "",
        };
        vec![text::title4(title).into()]
    }

    fn header_end(&self) -> Vec<Element<'_, Message>> {
        if Route::resolve(&self.session) != Route::Tasks {
            return Vec::new();
        }

        let mut header_row = row().spacing(4);

        if self.active_page == Page::Upcoming {
            let refresh = button::icon(icon::from_name("view-refresh-symbolic"));
            let refresh = if self.upcoming.status().is_loading() {
                refresh
            } else {
                refresh.on_press(Message::FetchTodos)
            };
            header_row = header_row.push(refresh);
        }

        header_row = header_row.push(
            button::icon(icon::from_name("emblem-system-symbolic"))
                .on_press(Message::OpenSettings),
        );

        vec![header_row.into()]
    }

    fn update(&mut self, message: Message) -> CosmicTask<Message> {
        match message {
            Message::SessionRehydrated(user) => {
                match user {
                    Some(u) => {
                        log::info!("Restored session for {}", u.username);
                        self.upcoming.mount(today());
                    }
                    None => log::info!("No stored session, showing login"),
                }
            }

            Message::LoginUsernameChanged(value) => {
                self.login.username = value;
            }

            Message::LoginPasswordChanged(value) => {
                self.login.password = value;
            }

            Message::ToggleShowPassword => {
                self.login.toggle_password_visibility();
            }

            Message::LoginSubmit => {
                let Some(credentials) = self.login.submit() else {
                    return CosmicTask::none();
                };
                let Some(api) = self.api.clone() else {
                    self.login
                        .finish(Err(LOGIN_FALLBACK_MESSAGE.to_string()), &self.session);
                    return CosmicTask::none();
                };
                return CosmicTask::perform(
                    async move {
                        api.post_login(&credentials)
                            .await
                            .map_err(|e| e.user_message(LOGIN_FALLBACK_MESSAGE))
                    },
                    |result| cosmic::Action::App(Message::LoginCompleted(result)),
                );
            }

            Message::LoginCompleted(result) => {
                if self.login.finish(result, &self.session) {
                    self.upcoming.mount(today());
                    self.date_picker = MonthPickerState::new(today());
                    return self.open_page(Page::Home);
                }
            }

            Message::Logout => {
                self.session.set_user(None);
                self.upcoming.unmount();
                self.login = LoginModel::default();
                self.date_picker.open = false;
            }

            Message::OpenPage(page) => {
                return self.open_page(page);
            }

            Message::OpenSettings => {
                return self.open_page(Page::Settings);
            }

            Message::FetchTodos => {
                return self.fetch_todos();
            }

            Message::TodosFetched(ticket, result) => {
                self.upcoming.complete_fetch(ticket, result, today());
            }

            Message::SelectDate(date) => {
                self.upcoming.set_selected_date(date);
                self.date_picker.open = false;
            }

            Message::SelectToday => {
                self.upcoming.select_today(today());
                self.date_picker.open = false;
            }

            Message::ToggleDatePicker => {
                self.date_picker.toggle(self.upcoming.selected_date());
            }

            Message::PickerPrevMonth => {
                self.date_picker.prev_month();
            }

            Message::PickerNextMonth => {
                self.date_picker.next_month();
            }

            Message::ToggleDebugLogging => {
                self.config.debug_logging = !self.config.debug_logging;
                crate::set_debug_logging(self.config.debug_logging);
                self.save_config();
            }
        }

        CosmicTask::none()
    }

    fn view(&self) -> Element<'_, Message> {
        match Route::resolve(&self.session) {
            Route::Splash => container(text::body("Loading…"))
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
            Route::Login => pages::login::login_view(&self.login),
            Route::Tasks => self.page_view(),
        }
    }
}

impl Daybook {
    fn page_view(&self) -> Element<'_, Message> {
        let user = self.session.user();
        match self.active_page {
            Page::Home => pages::home::home_view(user.as_ref(), today()),
            Page::Upcoming => {
                pages::upcoming::upcoming_view(&self.upcoming, &self.date_picker, today())
            }
            Page::Settings => pages::settings::settings_view(&self.config, user.as_ref()),
        }
    }

    fn open_page(&mut self, page: Page) -> CosmicTask<Message> {
        self.active_page = page;

        let target = self
            .nav_model
            .iter()
            .find(|&id| self.nav_model.data::<Page>(id) == Some(&page));
        if let Some(id) = target {
            self.nav_model.activate(id);
        }

        // First visit after mount triggers the one fetch; later visits reuse it.
        if page == Page::Upcoming && *self.upcoming.status() == FetchStatus::NotStarted {
            return self.fetch_todos();
        }
        CosmicTask::none()
    }

    fn fetch_todos(&mut self) -> CosmicTask<Message> {
        if !self.upcoming.is_mounted() {
            return CosmicTask::none();
        }
        let ticket = self.upcoming.begin_fetch();
        let Some(api) = self.api.clone() else {
            self.upcoming
                .complete_fetch(ticket, Err(FETCH_FALLBACK_MESSAGE.to_string()), today());
            return CosmicTask::none();
        };

        CosmicTask::perform(
            async move {
                api.get_todos()
                    .await
                    .map_err(|e| e.user_message(FETCH_FALLBACK_MESSAGE))
            },
            move |result| cosmic::Action::App(Message::TodosFetched(ticket, result)),
        )
    }

    fn save_config(&self) {
        use cosmic::cosmic_config::CosmicConfigEntry;
        if let Err(e) = self.config.write_entry(&self.cosmic_config) {
            log::error!("Failed to save config: {:?}", e);
        }
    }
}
