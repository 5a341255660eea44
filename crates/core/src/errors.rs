use thiserror::Error;

use crate::models::schedule::DayOfWeek;

#[derive(Error, Debug)]
pub enum TimetableError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid coordinate: {day} hour {hour} is outside the timetable")]
    InvalidCoordinate { day: DayOfWeek, hour: u8 },

    #[error("Slot conflict: {day} hour {hour} is already taken by {existing}")]
    Conflict {
        day: DayOfWeek,
        hour: u8,
        existing: String,
    },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] eyre::Report),

    #[error("Internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type TimetableResult<T> = Result<T, TimetableError>;
