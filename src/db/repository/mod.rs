//! Repository trait definitions.
//!
//! One trait per record kind, plus [`FullRepository`] as the supertrait every
//! storage backend implements. All traits are async and `Send + Sync` so a
//! backend can be shared across handlers behind an `Arc<dyn FullRepository>`.

pub mod clients;
pub mod error;
pub mod feedback;
pub mod forms;
pub mod reports;

pub use clients::ClientRepository;
pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use feedback::FeedbackRepository;
pub use forms::FormRepository;
pub use reports::ReportRepository;

use async_trait::async_trait;

/// Complete repository capability: all four record kinds plus health.
#[async_trait]
pub trait FullRepository:
    ClientRepository + FeedbackRepository + FormRepository + ReportRepository
{
    /// Check whether the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
