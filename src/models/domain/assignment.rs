use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<DateTime<Utc>>, // Descriptive only, never enforced
    pub status: AssignmentStatus,
    #[serde(default)]
    pub submissions: Vec<Submission>, // Append-only, in submission order
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle of an assignment. Any status may be set by an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
pub enum AssignmentStatus {
    #[default]
    Draft,
    Published,
    Completed,
}

impl AssignmentStatus {
    pub const STUDENT_VISIBLE: [AssignmentStatus; 2] =
        [AssignmentStatus::Published, AssignmentStatus::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Draft => "Draft",
            AssignmentStatus::Published => "Published",
            AssignmentStatus::Completed => "Completed",
        }
    }

    pub fn is_student_visible(&self) -> bool {
        Self::STUDENT_VISIBLE.contains(self)
    }
}

/// A student's answer, embedded in exactly one assignment.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub student_name: String,
    pub student_email: String,
    pub answer: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub submitted_at: DateTime<Utc>,
    pub reviewed: bool,
}

/// Partial update: `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssignmentPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: Option<AssignmentStatus>,
}

impl Assignment {
    pub fn new(title: &str, description: Option<String>, due_date: Option<DateTime<Utc>>) -> Self {
        let now = Utc::now();
        Assignment {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description,
            due_date,
            status: AssignmentStatus::Draft,
            submissions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn submission(&self, submission_id: &str) -> Option<&Submission> {
        self.submissions.iter().find(|s| s.id == submission_id)
    }

    pub fn append_submission(&mut self, submission: Submission, now: DateTime<Utc>) {
        self.submissions.push(submission);
        self.updated_at = now;
    }

    /// Flips `reviewed` on the addressed submission. Repeating it is harmless.
    pub fn mark_reviewed(&mut self, submission_id: &str, now: DateTime<Utc>) -> Option<&Submission> {
        let submission = self.submissions.iter_mut().find(|s| s.id == submission_id)?;
        submission.reviewed = true;
        self.updated_at = now;
        Some(submission)
    }
}

impl Submission {
    pub fn new(student_name: &str, student_email: &str, answer: &str) -> Self {
        Submission {
            id: Uuid::new_v4().to_string(),
            student_name: student_name.to_string(),
            student_email: student_email.to_string(),
            answer: answer.to_string(),
            submitted_at: Utc::now(),
            reviewed: false,
        }
    }
}

impl AssignmentPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.status.is_none()
    }

    pub fn apply(&self, assignment: &mut Assignment, now: DateTime<Utc>) {
        if let Some(title) = &self.title {
            assignment.title = title.clone();
        }
        if let Some(description) = &self.description {
            assignment.description = Some(description.clone());
        }
        if let Some(due_date) = self.due_date {
            assignment.due_date = Some(due_date);
        }
        if let Some(status) = self.status {
            assignment.status = status;
        }
        assignment.updated_at = now;
    }
}
