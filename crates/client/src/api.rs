//! # Backend API
//!
//! Typed wrappers around the school backend's REST endpoints. Requests carry
//! the session's bearer token; non-success statuses become
//! [`TimetableError`] values.

use async_trait::async_trait;
use eyre::WrapErr;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use timetable_core::{
    errors::{TimetableError, TimetableResult},
    models::{
        auth::{AuthRequest, AuthResponse},
        lesson::Lesson,
        schedule::{CreateScheduleRequest, ScheduleSlot},
    },
};
use tracing::debug;

use crate::{config::ClientConfig, session::Session};

/// Schedule endpoints used by the timetable controller.
#[async_trait]
pub trait ScheduleApi: Send + Sync {
    /// `GET /schedules/classroom/{classroomId}`
    async fn list_schedules(
        &self,
        session: &Session,
        classroom_id: &str,
    ) -> TimetableResult<Vec<ScheduleSlot>>;

    /// `POST /schedules/classroom/{classroomId}`
    async fn create_schedule(
        &self,
        session: &Session,
        classroom_id: &str,
        request: &CreateScheduleRequest,
    ) -> TimetableResult<ScheduleSlot>;

    /// `DELETE /schedules/{id}`
    async fn delete_schedule(&self, session: &Session, id: &str) -> TimetableResult<()>;
}

/// HTTP client for the backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> TimetableResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .wrap_err("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.api_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `POST /auth/login`. Any rejection is reported as an authentication
    /// failure without detail.
    pub async fn login(&self, request: &AuthRequest) -> TimetableResult<AuthResponse> {
        debug!("Logging in as {}", request.username);

        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(request)
            .send()
            .await
            .wrap_err("Failed to reach backend")?;

        if !response.status().is_success() {
            return Err(TimetableError::Authentication(format!(
                "Login rejected with status {}",
                response.status().as_u16()
            )));
        }

        read_json(response).await
    }

    /// `GET /lessons`
    pub async fn list_lessons(&self, session: &Session) -> TimetableResult<Vec<Lesson>> {
        let token = session.bearer_token()?;
        debug!("Fetching lessons");

        let response = self
            .http
            .get(self.url("/lessons"))
            .bearer_auth(token)
            .send()
            .await
            .wrap_err("Failed to reach backend")?;

        read_json(check_status(response).await?).await
    }
}

#[async_trait]
impl ScheduleApi for ApiClient {
    async fn list_schedules(
        &self,
        session: &Session,
        classroom_id: &str,
    ) -> TimetableResult<Vec<ScheduleSlot>> {
        let token = session.bearer_token()?;
        debug!("Fetching schedules for classroom {}", classroom_id);

        let response = self
            .http
            .get(self.url(&format!("/schedules/classroom/{}", classroom_id)))
            .bearer_auth(token)
            .send()
            .await
            .wrap_err("Failed to reach backend")?;

        read_json(check_status(response).await?).await
    }

    async fn create_schedule(
        &self,
        session: &Session,
        classroom_id: &str,
        request: &CreateScheduleRequest,
    ) -> TimetableResult<ScheduleSlot> {
        let token = session.bearer_token()?;
        debug!(
            "Creating schedule entry for classroom {} at {}",
            classroom_id,
            request.coordinate()
        );

        let response = self
            .http
            .post(self.url(&format!("/schedules/classroom/{}", classroom_id)))
            .bearer_auth(token)
            .json(request)
            .send()
            .await
            .wrap_err("Failed to reach backend")?;

        read_json(check_status(response).await?).await
    }

    async fn delete_schedule(&self, session: &Session, id: &str) -> TimetableResult<()> {
        let token = session.bearer_token()?;
        debug!("Deleting schedule entry {}", id);

        let response = self
            .http
            .delete(self.url(&format!("/schedules/{}", id)))
            .bearer_auth(token)
            .send()
            .await
            .wrap_err("Failed to reach backend")?;

        check_status(response).await?;
        Ok(())
    }
}

/// Passes 2xx responses through and converts everything else to an error
/// carrying the response body.
async fn check_status(response: Response) -> TimetableResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let message = response.text().await.unwrap_or_default();

    if status == StatusCode::NOT_FOUND {
        let detail = if message.trim().is_empty() {
            format!("{} not found", url)
        } else {
            message
        };
        return Err(TimetableError::NotFound(detail));
    }

    Err(TimetableError::Backend {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(response: Response) -> TimetableResult<T> {
    let body = response
        .json::<T>()
        .await
        .wrap_err("Failed to decode backend response")?;

    Ok(body)
}
