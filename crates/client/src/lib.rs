//! # Timetable Client
//!
//! Talks to the school backend on behalf of a signed-in user and keeps a
//! classroom's weekly timetable in sync.
//!
//! - **Config**: environment-driven client settings
//! - **Session**: explicit login state passed to every call
//! - **Api**: typed REST wrappers over `reqwest`
//! - **Timetable**: the create/delete, refetch and rebuild cycle

/// Environment configuration
pub mod config;
/// REST endpoint wrappers
pub mod api;
/// Login state
pub mod session;
/// Classroom timetable controller
pub mod timetable;

pub mod mock;

pub use api::{ApiClient, ScheduleApi};
pub use session::Session;
pub use timetable::{ClassroomTimetable, Operation, RefreshTicket};
