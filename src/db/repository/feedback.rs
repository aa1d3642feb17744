//! Feedback repository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::api::{ClientId, FeedbackId};
use crate::models::{FeedbackRecord, NewFeedback};

/// Repository operations for feedback records.
///
/// Feedback is immutable once submitted, so there is no update operation.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// List all feedback records, ordered by id.
    async fn list_feedback(&self) -> RepositoryResult<Vec<FeedbackRecord>>;

    /// List feedback referencing a specific client.
    async fn list_feedback_for_client(
        &self,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<FeedbackRecord>>;

    /// List feedback submitted inside `[from, to)`.
    async fn list_feedback_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<FeedbackRecord>>;

    /// Fetch a single feedback record.
    async fn get_feedback(&self, feedback_id: FeedbackId) -> RepositoryResult<FeedbackRecord>;

    /// Store a feedback record; the stored record, including the assigned id,
    /// is echoed back.
    async fn create_feedback(&self, new_feedback: &NewFeedback)
        -> RepositoryResult<FeedbackRecord>;

    /// Delete a feedback record.
    ///
    /// # Returns
    /// * `Ok(true)` if a record was removed, `Ok(false)` if none existed
    async fn delete_feedback(&self, feedback_id: FeedbackId) -> RepositoryResult<bool>;
}
