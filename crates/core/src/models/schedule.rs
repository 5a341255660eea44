use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use crate::errors::{TimetableError, TimetableResult};
use crate::grid::GridBounds;

/// School weekday. Weekend slots are not part of the timetable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl DayOfWeek {
    /// All weekdays in week order.
    pub const ALL: [DayOfWeek; 5] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
    ];

    /// Wire name, e.g. `MONDAY`.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
        }
    }

    /// Display name, e.g. `Monday`.
    pub fn label(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| TimetableError::Validation(format!("Unknown weekday: {}", s)))
    }
}

/// A `(day, hour)` cell address in the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    pub day: DayOfWeek,
    pub hour: u8,
}

impl Coordinate {
    pub fn new(day: DayOfWeek, hour: u8) -> Self {
        Self { day, hour }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} hour {}", self.day, self.hour)
    }
}

/// One scheduled lesson occurrence in a classroom's week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSlot {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classroom_id: Option<String>,
    pub day_of_week: DayOfWeek,
    /// Lesson hour within the day, starting at 1.
    pub lesson_order: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub lesson_name: Option<String>,
    #[serde(default)]
    pub lesson_code: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
}

impl ScheduleSlot {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.day_of_week, self.lesson_order)
    }

    /// `HH:MM - HH:MM`
    pub fn time_range_label(&self) -> String {
        format!(
            "{} - {}",
            self.start_time.format("%H:%M"),
            self.end_time.format("%H:%M")
        )
    }

    /// Lesson name, falling back to the code and then the slot id.
    pub fn display_name(&self) -> &str {
        self.lesson_name
            .as_deref()
            .or(self.lesson_code.as_deref())
            .unwrap_or(&self.id)
    }
}

/// Body of `POST /schedules/classroom/{classroomId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    pub lesson_id: String,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub lesson_order: u8,
}

impl CreateScheduleRequest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.day_of_week, self.lesson_order)
    }

    /// Checks the request can be placed in a grid with the given bounds.
    ///
    /// Overlap with neighbouring slots is not checked; only this entry's own
    /// time range must be non-empty.
    pub fn validate(&self, bounds: &GridBounds) -> TimetableResult<()> {
        if self.lesson_id.trim().is_empty() {
            return Err(TimetableError::Validation("A lesson must be selected".into()));
        }

        let coordinate = self.coordinate();
        if !bounds.contains(coordinate) {
            return Err(TimetableError::InvalidCoordinate {
                day: coordinate.day,
                hour: coordinate.hour,
            });
        }

        if self.end_time <= self.start_time {
            return Err(TimetableError::Validation(format!(
                "End time {} must be after start time {}",
                self.end_time, self.start_time
            )));
        }

        Ok(())
    }
}
