pub mod agenda;
pub mod task;
pub mod user;
