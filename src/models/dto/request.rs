use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::errors::{AppError, AppResult};
use crate::models::domain::{AssignmentPatch, AssignmentStatus, UserRole};

// Required fields are optional at the serde layer so that a missing field
// yields the same ValidationError as an empty one.

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    #[validate(length(max = 100))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    #[validate(length(max = 32))]
    pub phone: Option<String>,

    #[serde(alias = "designation")]
    pub role: Option<UserRole>,

    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssignmentRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub due_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAssignmentRequest {
    #[validate(length(max = 200))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub due_date: Option<String>,

    pub status: Option<AssignmentStatus>,
}

/// Only the answer is read from the body; the author comes from the token.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: Option<String>,
}

impl UpdateAssignmentRequest {
    pub fn into_patch(self) -> AppResult<AssignmentPatch> {
        let due_date = self.due_date.as_deref().map(parse_due_date).transpose()?;

        Ok(AssignmentPatch {
            title: self.title,
            description: self.description,
            due_date,
            status: self.status,
        })
    }
}

/// Returns the trimmed value when it is present and non-blank.
pub fn required(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_due_date(value: &str) -> AppResult<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| AppError::ValidationError(format!("Invalid due date '{}'", trimmed)))
}
