//! Client repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::ClientId;
use crate::models::{Client, ClientPatch, ClientStatus, NewClient};

/// Repository operations for client records.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// List all clients, ordered by id.
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>>;

    /// List clients with a given status.
    async fn list_clients_by_status(&self, status: ClientStatus)
        -> RepositoryResult<Vec<Client>>;

    /// Fetch a single client.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if the id does not exist
    async fn get_client(&self, client_id: ClientId) -> RepositoryResult<Client>;

    /// Create a client; the stored record, including the assigned id, is
    /// echoed back.
    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client>;

    /// Apply a partial update and return the updated record.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if the id does not exist
    async fn update_client(
        &self,
        client_id: ClientId,
        patch: &ClientPatch,
    ) -> RepositoryResult<Client>;

    /// Delete a client.
    ///
    /// # Returns
    /// * `Ok(true)` if a record was removed, `Ok(false)` if none existed
    async fn delete_client(&self, client_id: ClientId) -> RepositoryResult<bool>;
}
