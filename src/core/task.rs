use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of consecutive days the fetched batch is spread over.
const SCHEDULE_SPAN_DAYS: usize = 5;
/// Number of distinct hour slots, starting at 9.
const SCHEDULE_HOUR_SLOTS: usize = 8;
const FIRST_HOUR: usize = 9;

/// One todo as it arrives from the task source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub id: u64,
    pub todo: String,
    pub completed: bool,
    pub user_id: u64,
}

/// Envelope of `GET /todos`. Pagination fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoPage {
    pub todos: Vec<TodoRecord>,
}

/// A fetched todo with its client-side schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub todo: String,
    pub completed: bool,
    pub user_id: u64,
    pub date: NaiveDate,
    pub time: String,
}

impl Task {
    /// Attach the synthetic schedule for position `index` in a batch fetched on `today`.
    pub fn from_record(record: TodoRecord, index: usize, today: NaiveDate) -> Self {
        Self {
            id: record.id,
            todo: record.todo,
            completed: record.completed,
            user_id: record.user_id,
            date: scheduled_date(index, today),
            time: scheduled_time(index),
        }
    }

    /// `YYYY-MM-DD`
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// `today + (index mod 5)` days.
pub fn scheduled_date(index: usize, today: NaiveDate) -> NaiveDate {
    let offset = (index % SCHEDULE_SPAN_DAYS) as i64;
    today + Duration::days(offset)
}

/// `"{9 + index mod 8}:{00|30} AM"`.
///
/// The suffix is always "AM", so slots past noon read e.g. "16:30 AM".
pub fn scheduled_time(index: usize) -> String {
    let hour = FIRST_HOUR + index % SCHEDULE_HOUR_SLOTS;
    let minute = if index % 2 == 0 { "00" } else { "30" };
    format!("{}:{} AM", hour, minute)
}

/// Schedule a whole batch in source order.
pub fn schedule_batch(records: Vec<TodoRecord>, today: NaiveDate) -> Vec<Task> {
    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| Task::from_record(record, i, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64) -> TodoRecord {
        TodoRecord {
            id,
            todo: format!("Todo {}", id),
            completed: false,
            user_id: 7,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn first_slot_is_today_at_nine() {
        let tasks = schedule_batch(vec![record(1)], day(10));
        assert_eq!(tasks[0].date_key(), "2024-01-10");
        assert_eq!(tasks[0].time, "9:00 AM");
    }

    #[test]
    fn index_five_wraps_to_today_at_half_past_two() {
        let tasks = schedule_batch((1..=6).map(record).collect(), day(10));
        assert_eq!(tasks[5].date_key(), "2024-01-10");
        assert_eq!(tasks[5].time, "14:30 AM");
        assert_eq!(tasks[4].date, day(14));
        assert_eq!(tasks[1].date, day(11));
        assert_eq!(tasks[1].time, "10:30 AM");
    }

    // The AM suffix never rolls over; this pins the observed label rather than a corrected one.
    #[test]
    fn late_slots_keep_am_suffix() {
        assert_eq!(scheduled_time(7), "16:30 AM");
        assert_eq!(scheduled_time(8), "9:00 AM");
        assert_eq!(scheduled_time(15), "16:30 AM");
        assert_eq!(scheduled_time(6), "15:00 AM");
    }

    #[test]
    fn schedule_crosses_month_end() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        assert_eq!(
            scheduled_date(4, today),
            NaiveDate::from_ymd_opt(2024, 3, 2).unwrap()
        );
    }

    #[test]
    fn keeps_source_fields_and_order() {
        let tasks = schedule_batch(vec![record(30), record(4), record(12)], day(10));
        let ids: Vec<u64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![30, 4, 12]);
        assert_eq!(tasks[0].user_id, 7);
        assert_eq!(tasks[1].todo, "Todo 4");
    }

    #[test]
    fn parses_todo_page() {
        let body = r#"{"todos":[{"id":1,"todo":"Do something nice for someone you care about","completed":false,"userId":152}],"total":254,"skip":0,"limit":30}"#;
        let page: TodoPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.todos.len(), 1);
        assert_eq!(page.todos[0].user_id, 152);
    }
}
