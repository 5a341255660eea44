use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::TimetableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Principal,
    Teacher,
}

impl Role {
    /// Landing page after login.
    pub fn dashboard_path(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "/admin/dashboard",
            Role::Principal => "/principal/dashboard",
            Role::Teacher => "/teacher/dashboard",
        }
    }

    pub fn can_edit_schedules(&self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Principal)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Principal => "PRINCIPAL",
            Role::Teacher => "TEACHER",
        };
        f.write_str(name)
    }
}

impl FromStr for Role {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            "PRINCIPAL" => Ok(Role::Principal),
            "TEACHER" => Ok(Role::Teacher),
            other => Err(TimetableError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub role: Role,
}
