//! Form repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::FormId;
use crate::models::{Form, FormPatch, FormStatus, NewForm};

/// Repository operations for feedback forms.
#[async_trait]
pub trait FormRepository: Send + Sync {
    /// List all forms, ordered by id.
    async fn list_forms(&self) -> RepositoryResult<Vec<Form>>;

    /// List forms with a given status.
    async fn list_forms_by_status(&self, status: FormStatus) -> RepositoryResult<Vec<Form>>;

    /// Fetch a single form.
    async fn get_form(&self, form_id: FormId) -> RepositoryResult<Form>;

    /// Create a form; the stored record, including the assigned id, is echoed
    /// back.
    async fn create_form(&self, new_form: &NewForm) -> RepositoryResult<Form>;

    /// Apply a partial update, refresh `last_modified`, and return the
    /// updated record.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if the id does not exist
    async fn update_form(&self, form_id: FormId, patch: &FormPatch) -> RepositoryResult<Form>;

    /// Delete a form.
    ///
    /// # Returns
    /// * `Ok(true)` if a record was removed, `Ok(false)` if none existed
    async fn delete_form(&self, form_id: FormId) -> RepositoryResult<bool>;
}
