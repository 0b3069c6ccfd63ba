use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Assignment, AssignmentStatus},
        dto::request::{parse_due_date, required, CreateAssignmentRequest, UpdateAssignmentRequest},
    },
    repositories::{assignment_repository::assignment_not_found, AssignmentRepository},
};

/// Lifecycle operations on the assignment aggregate.
pub struct AssignmentService {
    repository: Arc<dyn AssignmentRepository>,
}

impl AssignmentService {
    pub fn new(repository: Arc<dyn AssignmentRepository>) -> Self {
        Self { repository }
    }

    /// New assignments always start as `Draft`.
    pub async fn create(&self, request: CreateAssignmentRequest) -> AppResult<Assignment> {
        request.validate()?;

        let title = required(&request.title)
            .ok_or_else(|| AppError::ValidationError("Title is required".to_string()))?;
        let due_date = request.due_date.as_deref().map(parse_due_date).transpose()?;

        let assignment = self
            .repository
            .create(Assignment::new(title, request.description, due_date))
            .await?;

        log::info!("Created assignment {} '{}'", assignment.id, assignment.title);
        Ok(assignment)
    }

    pub async fn get(&self, id: &str) -> AppResult<Assignment> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(assignment_not_found)
    }

    /// Applies only the supplied fields. Status changes are not restricted.
    pub async fn update(&self, id: &str, request: UpdateAssignmentRequest) -> AppResult<Assignment> {
        request.validate()?;
        let patch = request.into_patch()?;
        if patch.is_empty() {
            log::debug!("Update of assignment {} carries no field changes", id);
        }

        let assignment = self.repository.update(id, patch, Utc::now()).await?;

        log::info!(
            "Updated assignment {} (status {})",
            assignment.id,
            assignment.status.as_str()
        );
        Ok(assignment)
    }

    /// Removes the assignment together with every embedded submission.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        self.repository.delete(id).await?;
        log::info!("Deleted assignment {}", id);
        Ok(())
    }

    pub async fn list_all(&self) -> AppResult<Vec<Assignment>> {
        self.repository.find_all().await
    }

    /// Student-facing view: `Published` and `Completed`, newest first.
    pub async fn list_published(&self) -> AppResult<Vec<Assignment>> {
        self.repository
            .find_by_statuses(&AssignmentStatus::STUDENT_VISIBLE)
            .await
    }
}
