use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, to_document, Document},
    options::{IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{Assignment, AssignmentPatch, AssignmentStatus, Submission},
};

/// Storage for assignment aggregates and their embedded submissions.
///
/// Submission mutations are single atomic operations against the stored
/// document. Implementations must never rewrite the whole `submissions`
/// array, or a concurrent append could be lost.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn create(&self, assignment: Assignment) -> AppResult<Assignment>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Assignment>>;
    /// Newest first.
    async fn find_all(&self) -> AppResult<Vec<Assignment>>;
    /// Newest first.
    async fn find_by_statuses(&self, statuses: &[AssignmentStatus]) -> AppResult<Vec<Assignment>>;
    async fn update(
        &self,
        id: &str,
        patch: AssignmentPatch,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Assignment>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    async fn push_submission(
        &self,
        assignment_id: &str,
        submission: Submission,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Submission>;
    async fn mark_submission_reviewed(
        &self,
        assignment_id: &str,
        submission_id: &str,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Submission>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub fn assignment_not_found() -> AppError {
    AppError::NotFound("Assignment not found".to_string())
}

pub fn submission_not_found() -> AppError {
    AppError::NotFound("Submission not found".to_string())
}

pub struct MongoAssignmentRepository {
    collection: Collection<Assignment>,
}

impl MongoAssignmentRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    fn set_document(patch: &AssignmentPatch, updated_at: DateTime<Utc>) -> Document {
        let mut set = doc! { "updatedAt": updated_at.timestamp_millis() };

        if let Some(title) = &patch.title {
            set.insert("title", title.as_str());
        }
        if let Some(description) = &patch.description {
            set.insert("description", description.as_str());
        }
        if let Some(due_date) = patch.due_date {
            set.insert("dueDate", due_date.timestamp_millis());
        }
        if let Some(status) = patch.status {
            set.insert("status", status.as_str());
        }

        set
    }

    fn push_update(submission: &Submission, updated_at: DateTime<Utc>) -> AppResult<Document> {
        let submission_doc = to_document(submission)?;
        Ok(doc! {
            "$push": { "submissions": submission_doc },
            "$set": { "updatedAt": updated_at.timestamp_millis() },
        })
    }

    fn review_filter(assignment_id: &str, submission_id: &str) -> Document {
        doc! { "id": assignment_id, "submissions.id": submission_id }
    }

    // Positional `$` targets the element matched by `review_filter`.
    fn review_update(updated_at: DateTime<Utc>) -> Document {
        doc! {
            "$set": {
                "submissions.$.reviewed": true,
                "updatedAt": updated_at.timestamp_millis(),
            }
        }
    }

    async fn find_sorted(&self, filter: Document) -> AppResult<Vec<Assignment>> {
        let assignments = self
            .collection
            .find(filter)
            .sort(doc! { "createdAt": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(assignments)
    }
}

#[async_trait]
impl AssignmentRepository for MongoAssignmentRepository {
    async fn create(&self, assignment: Assignment) -> AppResult<Assignment> {
        self.collection.insert_one(&assignment).await?;
        Ok(assignment)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Assignment>> {
        let assignment = self.collection.find_one(doc! { "id": id }).await?;
        Ok(assignment)
    }

    async fn find_all(&self) -> AppResult<Vec<Assignment>> {
        self.find_sorted(doc! {}).await
    }

    async fn find_by_statuses(&self, statuses: &[AssignmentStatus]) -> AppResult<Vec<Assignment>> {
        let names: Vec<&str> = statuses.iter().map(AssignmentStatus::as_str).collect();
        self.find_sorted(doc! { "status": { "$in": names } }).await
    }

    async fn update(
        &self,
        id: &str,
        patch: AssignmentPatch,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Assignment> {
        let set = Self::set_document(&patch, updated_at);

        self.collection
            .find_one_and_update(doc! { "id": id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(assignment_not_found)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(assignment_not_found());
        }

        Ok(())
    }

    async fn push_submission(
        &self,
        assignment_id: &str,
        submission: Submission,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Submission> {
        let update = Self::push_update(&submission, updated_at)?;

        let result = self
            .collection
            .update_one(doc! { "id": assignment_id }, update)
            .await?;

        if result.matched_count == 0 {
            return Err(assignment_not_found());
        }

        Ok(submission)
    }

    async fn mark_submission_reviewed(
        &self,
        assignment_id: &str,
        submission_id: &str,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Submission> {
        let updated = self
            .collection
            .find_one_and_update(
                Self::review_filter(assignment_id, submission_id),
                Self::review_update(updated_at),
            )
            .return_document(ReturnDocument::After)
            .await?;

        match updated {
            Some(assignment) => assignment
                .submission(submission_id)
                .cloned()
                .ok_or_else(submission_not_found),
            None => {
                let exists = self
                    .collection
                    .count_documents(doc! { "id": assignment_id })
                    .await?
                    > 0;
                Err(if exists {
                    submission_not_found()
                } else {
                    assignment_not_found()
                })
            }
        }
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for assignments collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();

        let status_index = IndexModel::builder()
            .keys(doc! { "status": 1, "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("status_created_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(created_at_index).await?;
        self.collection.create_index(status_index).await?;

        log::info!("Successfully created indexes for assignments collection");
        Ok(())
    }
}
