//! # Classroom Timetable
//!
//! Keeps one classroom's slot collection in sync with the backend. Every
//! mutation is sent to the server first and followed by a full refetch that
//! replaces the local collection.

use timetable_core::{
    errors::{TimetableError, TimetableResult},
    grid::{build_grid, check_free, insert, remove, ConflictPolicy, Grid, GridBounds},
    models::schedule::{CreateScheduleRequest, ScheduleSlot},
};
use tracing::{info, warn};

use crate::{api::ScheduleApi, session::Session};

/// User-visible actions, each with a single generic failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    Load,
    Add,
    Delete,
}

impl Operation {
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Login => "Invalid username or password",
            Operation::Load => "Failed to load data",
            Operation::Add => "Failed to add schedule entry",
            Operation::Delete => "Failed to delete schedule entry",
        }
    }
}

/// Identifies one list fetch. Tickets are ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

pub struct ClassroomTimetable<A> {
    api: A,
    classroom_id: String,
    bounds: GridBounds,
    policy: ConflictPolicy,
    slots: Vec<ScheduleSlot>,
    issued: u64,
    applied: Option<RefreshTicket>,
}

impl<A: ScheduleApi> ClassroomTimetable<A> {
    pub fn new(
        api: A,
        classroom_id: impl Into<String>,
        bounds: GridBounds,
        policy: ConflictPolicy,
    ) -> Self {
        Self {
            api,
            classroom_id: classroom_id.into(),
            bounds,
            policy,
            slots: Vec::new(),
            issued: 0,
            applied: None,
        }
    }

    pub fn api_mut(&mut self) -> &mut A {
        &mut self.api
    }

    pub fn classroom_id(&self) -> &str {
        &self.classroom_id
    }

    pub fn slots(&self) -> &[ScheduleSlot] {
        &self.slots
    }

    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    pub fn policy(&self) -> ConflictPolicy {
        self.policy
    }

    /// Weekly grid over the current collection.
    pub fn grid(&self) -> TimetableResult<Grid<'_>> {
        let grid = build_grid(&self.slots, &self.bounds)?;
        for slot in grid.shadowed() {
            warn!(
                "Schedule entry {} is hidden behind another entry at {}",
                slot.id,
                slot.coordinate()
            );
        }
        Ok(grid)
    }

    /// Reserves a ticket for a list fetch that is about to start.
    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    /// Replaces the collection with a fetched list unless a fetch issued
    /// later, or a successful mutation, has already been applied. Returns
    /// whether the list was used.
    pub fn apply_refresh(&mut self, ticket: RefreshTicket, slots: Vec<ScheduleSlot>) -> bool {
        if self.applied.is_some_and(|applied| ticket <= applied) {
            warn!(
                "Discarding stale schedule list for classroom {} (ticket {:?})",
                self.classroom_id, ticket
            );
            return false;
        }

        info!(
            "Loaded {} schedule entries for classroom {}",
            slots.len(),
            self.classroom_id
        );
        self.applied = Some(ticket);
        self.slots = slots;
        true
    }

    /// Fetches the full list and replaces local state.
    pub async fn refresh(&mut self, session: &Session) -> TimetableResult<()> {
        let ticket = self.begin_refresh();
        let slots = self
            .api
            .list_schedules(session, &self.classroom_id)
            .await?;
        self.apply_refresh(ticket, slots);
        Ok(())
    }

    /// Creates an entry on the backend, then refetches.
    ///
    /// # Errors
    ///
    /// - `Authentication`/`Authorization` if the session may not edit
    /// - `InvalidCoordinate`/`Validation` if the request does not fit the grid
    /// - `Conflict` if the cell is taken and the policy is `Reject`; nothing
    ///   is sent to the backend in that case
    /// - any backend error from the create call or the refetch
    pub async fn add(
        &mut self,
        session: &Session,
        request: CreateScheduleRequest,
    ) -> TimetableResult<ScheduleSlot> {
        session.require_schedule_editor()?;
        request.validate(&self.bounds)?;

        let coordinate = request.coordinate();
        check_free(&self.slots, coordinate, self.policy)?;

        let created = self
            .api
            .create_schedule(session, &self.classroom_id, &request)
            .await?;
        info!(
            "Created schedule entry {} at {} for classroom {}",
            created.id, coordinate, self.classroom_id
        );

        if let Err(err) = insert(
            &mut self.slots,
            created.clone(),
            &self.bounds,
            ConflictPolicy::Allow,
        ) {
            warn!("Backend returned an entry that does not fit the grid: {}", err);
        }
        self.supersede_pending();

        self.refresh(session).await?;
        Ok(created)
    }

    /// Deletes an entry on the backend, then refetches.
    ///
    /// # Errors
    ///
    /// `NotFound` without contacting the backend if `slot_id` is not in the
    /// local collection.
    pub async fn remove(&mut self, session: &Session, slot_id: &str) -> TimetableResult<ScheduleSlot> {
        session.require_schedule_editor()?;

        if !self.slots.iter().any(|slot| slot.id == slot_id) {
            return Err(TimetableError::NotFound(format!(
                "Schedule entry {} not found",
                slot_id
            )));
        }

        self.api.delete_schedule(session, slot_id).await?;
        let removed = remove(&mut self.slots, slot_id)?;
        self.supersede_pending();
        info!(
            "Deleted schedule entry {} at {} for classroom {}",
            removed.id,
            removed.coordinate(),
            self.classroom_id
        );

        self.refresh(session).await?;
        Ok(removed)
    }

    /// Marks the local collection as newer than every fetch issued so far.
    fn supersede_pending(&mut self) {
        self.issued += 1;
        self.applied = Some(RefreshTicket(self.issued));
    }
}
