#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use eduportal_server::{
    app_state::AppState,
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Assignment, AssignmentPatch, AssignmentStatus, Submission, User},
    repositories::{
        assignment_repository::{assignment_not_found, submission_not_found},
        AssignmentRepository, UserRepository,
    },
    services::mailer::{Mailer, OutboundEmail},
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn stored(&self, email: &str) -> Option<User> {
        self.users.read().await.get(email).cloned()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(AppError::AlreadyExists("Email already present".to_string()));
        }
        users.insert(user.email.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

/// Mutations run under the write lock, mirroring the single-document
/// atomic updates of the Mongo implementation.
#[derive(Default)]
pub struct InMemoryAssignmentRepository {
    assignments: RwLock<HashMap<String, Assignment>>,
}

impl InMemoryAssignmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.assignments.read().await.len()
    }

    pub async fn stored(&self, id: &str) -> Option<Assignment> {
        self.assignments.read().await.get(id).cloned()
    }

    async fn sorted(&self, keep: impl Fn(&Assignment) -> bool) -> Vec<Assignment> {
        let mut items: Vec<Assignment> = self
            .assignments
            .read()
            .await
            .values()
            .filter(|a| keep(a))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items
    }
}

#[async_trait]
impl AssignmentRepository for InMemoryAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> AppResult<Assignment> {
        let mut assignments = self.assignments.write().await;
        if assignments.contains_key(&assignment.id) {
            return Err(AppError::AlreadyExists("Assignment already exists".to_string()));
        }
        assignments.insert(assignment.id.clone(), assignment.clone());
        Ok(assignment)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Assignment>> {
        Ok(self.assignments.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<Assignment>> {
        Ok(self.sorted(|_| true).await)
    }

    async fn find_by_statuses(&self, statuses: &[AssignmentStatus]) -> AppResult<Vec<Assignment>> {
        Ok(self.sorted(|a| statuses.contains(&a.status)).await)
    }

    async fn update(
        &self,
        id: &str,
        patch: AssignmentPatch,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Assignment> {
        let mut assignments = self.assignments.write().await;
        let assignment = assignments.get_mut(id).ok_or_else(assignment_not_found)?;
        patch.apply(assignment, updated_at);
        Ok(assignment.clone())
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.assignments
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(assignment_not_found)
    }

    async fn push_submission(
        &self,
        assignment_id: &str,
        submission: Submission,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Submission> {
        let mut assignments = self.assignments.write().await;
        let assignment = assignments
            .get_mut(assignment_id)
            .ok_or_else(assignment_not_found)?;
        assignment.append_submission(submission.clone(), updated_at);
        Ok(submission)
    }

    async fn mark_submission_reviewed(
        &self,
        assignment_id: &str,
        submission_id: &str,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Submission> {
        let mut assignments = self.assignments.write().await;
        let assignment = assignments
            .get_mut(assignment_id)
            .ok_or_else(assignment_not_found)?;
        assignment
            .mark_reviewed(submission_id, updated_at)
            .cloned()
            .ok_or_else(submission_not_found)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> AppResult<()> {
        self.sent.lock().await.push(email);
        Ok(())
    }
}

pub struct TestContext {
    pub state: AppState,
    pub users: Arc<InMemoryUserRepository>,
    pub assignments: Arc<InMemoryAssignmentRepository>,
    pub mailer: Arc<RecordingMailer>,
}

pub fn test_context() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let assignments = Arc::new(InMemoryAssignmentRepository::new());
    let mailer = Arc::new(RecordingMailer::new());

    let state = AppState::from_parts(
        Config::test_config(),
        users.clone(),
        assignments.clone(),
        mailer.clone(),
    );

    TestContext {
        state,
        users,
        assignments,
        mailer,
    }
}
