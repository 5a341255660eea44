use async_trait::async_trait;
use mockall::mock;
use timetable_core::{
    errors::TimetableResult,
    models::schedule::{CreateScheduleRequest, ScheduleSlot},
};

use crate::{api::ScheduleApi, session::Session};

// Mock backend for controller tests
mock! {
    pub ScheduleApi {}

    #[async_trait]
    impl ScheduleApi for ScheduleApi {
        async fn list_schedules(
            &self,
            session: &Session,
            classroom_id: &str,
        ) -> TimetableResult<Vec<ScheduleSlot>>;

        async fn create_schedule(
            &self,
            session: &Session,
            classroom_id: &str,
            request: &CreateScheduleRequest,
        ) -> TimetableResult<ScheduleSlot>;

        async fn delete_schedule(&self, session: &Session, id: &str) -> TimetableResult<()>;
    }
}
