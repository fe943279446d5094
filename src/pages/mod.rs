pub mod home;
pub mod login;
pub mod settings;
pub mod upcoming;
