pub mod day_strip;
pub mod month_picker;
pub mod task_card;
