use timetable_core::{
    errors::{TimetableError, TimetableResult},
    models::auth::{AuthResponse, Role},
};
use tracing::info;

/// Credentials of the signed-in user.
///
/// A session is created logged out, initialized by [`Session::login`] and
/// torn down by [`Session::logout`]. Every API call takes it by reference;
/// nothing reads credentials from ambient state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    credentials: Option<AuthResponse>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session from an already issued token, e.g. one supplied by
    /// the environment.
    pub fn with_token(token: impl Into<String>, role: Role) -> Self {
        let mut session = Self::new();
        session.login(AuthResponse {
            token: token.into(),
            role,
        });
        session
    }

    pub fn login(&mut self, response: AuthResponse) {
        info!("Session started for role {}", response.role);
        self.credentials = Some(response);
    }

    pub fn logout(&mut self) {
        if self.credentials.take().is_some() {
            info!("Session ended");
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.credentials.as_ref().map(|c| c.role)
    }

    /// Token for the `Authorization: Bearer` header.
    pub fn bearer_token(&self) -> TimetableResult<&str> {
        self.credentials
            .as_ref()
            .map(|c| c.token.as_str())
            .ok_or_else(|| TimetableError::Authentication("Not logged in".into()))
    }

    /// Fails unless the signed-in role may add or delete schedule entries.
    pub fn require_schedule_editor(&self) -> TimetableResult<Role> {
        let role = self
            .role()
            .ok_or_else(|| TimetableError::Authentication("Not logged in".into()))?;

        if role.can_edit_schedules() {
            Ok(role)
        } else {
            Err(TimetableError::Authorization(format!(
                "Role {} cannot edit schedules",
                role
            )))
        }
    }
}
