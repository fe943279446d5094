use chrono::NaiveDate;

use crate::api::{ApiError, FETCH_FALLBACK_MESSAGE, TaskSource};
use crate::core::agenda::{self, STRIP_VISIBLE_DAYS};
use crate::core::task::{Task, TodoRecord, schedule_batch};

/// Lifecycle of one fetch attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    NotStarted,
    Loading,
    Ready,
    Failed(String),
}

impl FetchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Identifies one fetch attempt; completions carrying an older ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// What the task list area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListState<'a> {
    Loading,
    Failed(&'a str),
    Empty,
    Tasks(Vec<&'a Task>),
}

/// State behind the Upcoming screen: one fetched batch plus the selected-date cursor.
#[derive(Debug, Clone)]
pub struct UpcomingModel {
    tasks: Vec<Task>,
    status: FetchStatus,
    selected_date: NaiveDate,
    generation: u64,
    mounted: bool,
}

impl UpcomingModel {
    /// Mount the screen with the cursor on `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            tasks: Vec::new(),
            status: FetchStatus::NotStarted,
            selected_date: today,
            generation: 0,
            mounted: true,
        }
    }

    pub fn status(&self) -> &FetchStatus {
        &self.status
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Start a fetch attempt. Any attempt still in flight is superseded.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.status = FetchStatus::Loading;
        log::debug!("Fetching todos (attempt {})", self.generation);
        FetchTicket(self.generation)
    }

    /// Apply the outcome of the attempt identified by `ticket`. Returns false
    /// when the completion is stale (superseded or the screen went away).
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<TodoRecord>, String>,
        today: NaiveDate,
    ) -> bool {
        if !self.mounted || ticket.0 != self.generation || !self.status.is_loading() {
            log::debug!("Ignoring stale todo fetch completion {:?}", ticket);
            return false;
        }

        match result {
            Ok(records) => {
                self.tasks = schedule_batch(records, today);
                self.status = FetchStatus::Ready;
            }
            Err(message) => {
                log::warn!("Failed to fetch todos: {}", message);
                self.tasks.clear();
                self.status = FetchStatus::Failed(message);
            }
        }
        true
    }

    /// Run one full fetch against `source`. The error is reported back but
    /// the model is always left settled.
    pub async fn fetch_tasks(
        &mut self,
        source: &dyn TaskSource,
        today: NaiveDate,
    ) -> Result<&[Task], ApiError> {
        let ticket = self.begin_fetch();
        match source.fetch_todos().await {
            Ok(records) => {
                self.complete_fetch(ticket, Ok(records), today);
                Ok(self.tasks.as_slice())
            }
            Err(e) => {
                self.complete_fetch(ticket, Err(e.user_message(FETCH_FALLBACK_MESSAGE)), today);
                Err(e)
            }
        }
    }

    /// The screen went away; late completions are discarded from now on.
    pub fn unmount(&mut self) {
        self.mounted = false;
    }

    /// Show the screen again from scratch: no tasks, cursor on `today`.
    /// Tickets from before the remount stay stale.
    pub fn mount(&mut self, today: NaiveDate) {
        self.tasks.clear();
        self.status = FetchStatus::NotStarted;
        self.selected_date = today;
        self.mounted = true;
    }

    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn select_today(&mut self, today: NaiveDate) {
        self.set_selected_date(today);
    }

    /// Tasks for the selected date, recomputed on every call.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        agenda::filter_by_date(&self.tasks, self.selected_date)
    }

    pub fn list_state(&self) -> ListState<'_> {
        match &self.status {
            FetchStatus::NotStarted | FetchStatus::Loading => ListState::Loading,
            FetchStatus::Failed(message) => ListState::Failed(message.as_str()),
            FetchStatus::Ready => {
                let visible = self.visible_tasks();
                if visible.is_empty() {
                    ListState::Empty
                } else {
                    ListState::Tasks(visible)
                }
            }
        }
    }

    /// The seven days shown in the day strip.
    pub fn strip_days(&self) -> Vec<NaiveDate> {
        let mut days = agenda::week_days(self.selected_date);
        days.truncate(STRIP_VISIBLE_DAYS);
        days
    }
}
