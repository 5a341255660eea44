pub mod auth;
pub mod lesson;
pub mod schedule;
