//! # Weekly Grid
//!
//! Projects a sparse list of [`ScheduleSlot`]s onto the dense
//! `hours × days` table shown for a classroom. The grid borrows the caller's
//! slots and never mutates them; [`insert`] and [`remove`] operate on the
//! caller's collection and the grid is rebuilt afterwards.
//!
//! Cells are stored row-major: one row per lesson hour, one column per day.

use std::collections::HashSet;
use std::str::FromStr;

use crate::errors::{TimetableError, TimetableResult};
use crate::models::schedule::{Coordinate, DayOfWeek, ScheduleSlot};

/// Lesson hours per day shown by default.
pub const DEFAULT_LESSONS_PER_DAY: u8 = 8;

/// The coordinate domain of a grid: which days form the columns and which
/// lesson hours form the rows, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridBounds {
    days: Vec<DayOfWeek>,
    hours: Vec<u8>,
}

impl GridBounds {
    /// Creates bounds from explicit day and hour lists.
    ///
    /// # Errors
    ///
    /// Returns `TimetableError::Validation` if either list is empty, contains
    /// duplicates, or an hour is 0.
    pub fn new(days: Vec<DayOfWeek>, hours: Vec<u8>) -> TimetableResult<Self> {
        if days.is_empty() || hours.is_empty() {
            return Err(TimetableError::Validation(
                "A timetable needs at least one day and one hour".into(),
            ));
        }

        let mut seen_days = HashSet::new();
        if let Some(day) = days.iter().find(|day| !seen_days.insert(**day)) {
            return Err(TimetableError::Validation(format!("Duplicate day: {}", day)));
        }

        let mut seen_hours = HashSet::new();
        for hour in &hours {
            if *hour == 0 {
                return Err(TimetableError::Validation("Lesson hours start at 1".into()));
            }
            if !seen_hours.insert(*hour) {
                return Err(TimetableError::Validation(format!("Duplicate hour: {}", hour)));
            }
        }

        Ok(Self { days, hours })
    }

    /// Monday to Friday with hours `1..=lessons_per_day`.
    pub fn with_lessons_per_day(lessons_per_day: u8) -> TimetableResult<Self> {
        Self::new(DayOfWeek::ALL.to_vec(), (1..=lessons_per_day).collect())
    }

    pub fn days(&self) -> &[DayOfWeek] {
        &self.days
    }

    pub fn hours(&self) -> &[u8] {
        &self.hours
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        self.index_of(coordinate).is_some()
    }

    pub fn cell_count(&self) -> usize {
        self.days.len() * self.hours.len()
    }

    fn index_of(&self, coordinate: Coordinate) -> Option<usize> {
        let row = self.hours.iter().position(|h| *h == coordinate.hour)?;
        let column = self.days.iter().position(|d| *d == coordinate.day)?;
        Some(row * self.days.len() + column)
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        Self {
            days: DayOfWeek::ALL.to_vec(),
            hours: (1..=DEFAULT_LESSONS_PER_DAY).collect(),
        }
    }
}

/// Content of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Empty,
    Occupied(&'a ScheduleSlot),
}

impl<'a> Cell<'a> {
    pub fn slot(&self) -> Option<&'a ScheduleSlot> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(slot) => Some(slot),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Dense weekly table built by [`build_grid`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<'a> {
    bounds: GridBounds,
    cells: Vec<Cell<'a>>,
    shadowed: Vec<&'a ScheduleSlot>,
}

impl<'a> Grid<'a> {
    /// Returns the cell at `(day, hour)`.
    ///
    /// # Errors
    ///
    /// `TimetableError::InvalidCoordinate` if the pair is outside the bounds
    /// the grid was built with.
    pub fn lookup(&self, day: DayOfWeek, hour: u8) -> TimetableResult<Cell<'a>> {
        self.bounds
            .index_of(Coordinate::new(day, hour))
            .map(|index| self.cells[index])
            .ok_or(TimetableError::InvalidCoordinate { day, hour })
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    pub fn days(&self) -> &[DayOfWeek] {
        self.bounds.days()
    }

    pub fn hours(&self) -> &[u8] {
        self.bounds.hours()
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Cell<'a>] {
        &self.cells
    }

    /// Rows in hour order, each paired with its hour index.
    pub fn rows(&self) -> impl Iterator<Item = (u8, &[Cell<'a>])> + '_ {
        self.bounds
            .hours
            .iter()
            .copied()
            .zip(self.cells.chunks(self.bounds.days.len()))
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// Slots that were not placed because an earlier slot in the input
    /// already held their coordinate.
    pub fn shadowed(&self) -> &[&'a ScheduleSlot] {
        &self.shadowed
    }
}

/// Builds the weekly grid for `slots`.
///
/// Each cell holds the first slot, in input order, whose coordinate matches
/// it. Later slots at the same coordinate end up in [`Grid::shadowed`].
///
/// # Errors
///
/// `TimetableError::InvalidCoordinate` for the first slot whose day or hour
/// is outside `bounds`. Such slots are never dropped silently.
pub fn build_grid<'a>(slots: &'a [ScheduleSlot], bounds: &GridBounds) -> TimetableResult<Grid<'a>> {
    let mut cells = vec![Cell::Empty; bounds.cell_count()];
    let mut shadowed = Vec::new();

    for slot in slots {
        let coordinate = slot.coordinate();
        let index = bounds
            .index_of(coordinate)
            .ok_or(TimetableError::InvalidCoordinate {
                day: coordinate.day,
                hour: coordinate.hour,
            })?;

        match cells[index] {
            Cell::Empty => cells[index] = Cell::Occupied(slot),
            Cell::Occupied(_) => shadowed.push(slot),
        }
    }

    Ok(Grid {
        bounds: bounds.clone(),
        cells,
        shadowed,
    })
}

/// What [`insert`] does when the target coordinate is already occupied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Refuse the new slot.
    #[default]
    Reject,
    /// Append anyway; the existing occupant keeps the cell.
    Allow,
}

impl FromStr for ConflictPolicy {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reject" => Ok(ConflictPolicy::Reject),
            "allow" => Ok(ConflictPolicy::Allow),
            other => Err(TimetableError::Validation(format!(
                "Unknown conflict policy: {}",
                other
            ))),
        }
    }
}

/// First slot in `slots` at `coordinate`, i.e. the one a grid would show.
pub fn find_occupant(slots: &[ScheduleSlot], coordinate: Coordinate) -> Option<&ScheduleSlot> {
    slots.iter().find(|slot| slot.coordinate() == coordinate)
}

/// Fails with `TimetableError::Conflict` if `coordinate` is occupied and
/// `policy` is [`ConflictPolicy::Reject`].
pub fn check_free(
    slots: &[ScheduleSlot],
    coordinate: Coordinate,
    policy: ConflictPolicy,
) -> TimetableResult<()> {
    if policy == ConflictPolicy::Allow {
        return Ok(());
    }
    match find_occupant(slots, coordinate) {
        Some(existing) => Err(TimetableError::Conflict {
            day: coordinate.day,
            hour: coordinate.hour,
            existing: existing.id.clone(),
        }),
        None => Ok(()),
    }
}

/// Adds `slot` to the collection.
///
/// # Errors
///
/// - `TimetableError::InvalidCoordinate` if the slot lies outside `bounds`
/// - `TimetableError::Conflict` if the coordinate is taken and `policy` is
///   [`ConflictPolicy::Reject`]
///
/// On error the collection is left unchanged.
pub fn insert(
    slots: &mut Vec<ScheduleSlot>,
    slot: ScheduleSlot,
    bounds: &GridBounds,
    policy: ConflictPolicy,
) -> TimetableResult<()> {
    let coordinate = slot.coordinate();
    if !bounds.contains(coordinate) {
        return Err(TimetableError::InvalidCoordinate {
            day: coordinate.day,
            hour: coordinate.hour,
        });
    }

    check_free(slots, coordinate, policy)?;

    slots.push(slot);
    Ok(())
}

/// Removes the slot with `id` and returns it.
///
/// # Errors
///
/// `TimetableError::NotFound` if no slot has that id.
pub fn remove(slots: &mut Vec<ScheduleSlot>, id: &str) -> TimetableResult<ScheduleSlot> {
    let index = slots
        .iter()
        .position(|slot| slot.id == id)
        .ok_or_else(|| TimetableError::NotFound(format!("Schedule entry {} not found", id)))?;

    Ok(slots.remove(index))
}
