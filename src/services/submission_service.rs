use std::sync::Arc;

use chrono::Utc;

use crate::{
    auth::VerifiedIdentity,
    errors::{AppError, AppResult},
    models::{
        domain::Submission,
        dto::request::{required, SubmitAnswerRequest},
    },
    repositories::{assignment_repository::assignment_not_found, AssignmentRepository},
};

pub struct SubmissionService {
    repository: Arc<dyn AssignmentRepository>,
}

impl SubmissionService {
    pub fn new(repository: Arc<dyn AssignmentRepository>) -> Self {
        Self { repository }
    }

    /// Appends an answer attributed to `identity`.
    ///
    /// An unknown assignment is reported before the answer is validated.
    /// The student name and email always come from the verified token. The
    /// assignment status is not checked, so drafts and completed assignments
    /// accept submissions too.
    pub async fn submit(
        &self,
        assignment_id: &str,
        identity: &VerifiedIdentity,
        request: SubmitAnswerRequest,
    ) -> AppResult<Submission> {
        if self.repository.find_by_id(assignment_id).await?.is_none() {
            return Err(assignment_not_found());
        }
        if required(&request.answer).is_none() {
            return Err(AppError::ValidationError("Answer is required".to_string()));
        }
        let answer = request.answer.unwrap_or_default();

        let submission = Submission::new(&identity.name, &identity.email, &answer);
        let submission = self
            .repository
            .push_submission(assignment_id, submission, Utc::now())
            .await?;

        log::info!(
            "Submission {} recorded on assignment {} by {}",
            submission.id,
            assignment_id,
            identity.identity_id
        );
        Ok(submission)
    }

    /// Sets `reviewed`; calling it again on a reviewed submission still succeeds.
    pub async fn mark_reviewed(&self, assignment_id: &str, submission_id: &str) -> AppResult<Submission> {
        let submission = self
            .repository
            .mark_submission_reviewed(assignment_id, submission_id, Utc::now())
            .await?;

        log::info!(
            "Submission {} on assignment {} marked as reviewed",
            submission_id,
            assignment_id
        );
        Ok(submission)
    }
}
