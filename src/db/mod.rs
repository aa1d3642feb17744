//! Storage module for the four record kinds.
//!
//! This module provides abstractions for record storage via the Repository
//! pattern, allowing different backends to be swapped easily.
//!
//! # Architecture
//!
//! The module follows a layered architecture:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API)                           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! │  - Derived-field maintenance on submission               │
//! │  - Bulk operations with per-item outcomes                │
//! │  - Form and report lifecycles                            │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/) - Abstract Interface   │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                │
//! ┌───▼──────────────┐     ┌───────────▼─────────────┐
//! │ Remote Repository │     │ Local Repository        │
//! │ (record store)    │     │ (in-memory)             │
//! └───────────────────┘     └─────────────────────────┘
//! ```
//!
//! # Recommended Usage
//!
//! **For new code, use the service layer:**
//! ```ignore
//! use pulsepoint::db::{services, factory::RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::create_local();
//!     let metrics = services::dashboard_summary(repo.as_ref()).await?;
//!     Ok(())
//! }
//! ```

// Feature flag priority: remote > local
// When multiple features are enabled (e.g., --all-features), remote takes precedence.
#[cfg(not(any(feature = "remote-repo", feature = "local-repo")))]
compile_error!("Enable at least one repository backend feature.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;

// Remote config is colocated with the repository implementation.
#[cfg(feature = "remote-repo")]
pub use repositories::remote::RemoteConfig;
#[cfg(not(feature = "remote-repo"))]
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    _private: (),
}

// ==================== Service Layer (Recommended for new code) ====================
// Use these high-level functions that work with any repository implementation

pub use services::{
    archive_form, client_performance, create_client, create_report, dashboard_summary,
    delete_clients_bulk, delete_forms_bulk, delete_reports_bulk, download_report,
    generate_report, health_check, publish_form, retry_report, satisfaction_breakdown,
    source_breakdown, submit_feedback, trend_series, update_client_status_bulk, BulkItemFailure,
    BulkOutcome,
};

// ==================== Repository Pattern Exports ====================

pub use repo_config::RepositoryConfig;

// Repository trait and implementations
pub use factory::{RepositoryBuilder, RepositoryFactory, RepositoryType};
pub use repositories::LocalRepository;
#[cfg(feature = "remote-repo")]
pub use repositories::RemoteRepository;
pub use repository::{
    ClientRepository, ErrorContext, FeedbackRepository, FormRepository, FullRepository,
    RepositoryError, RepositoryResult, ReportRepository,
};

use anyhow::{Context, Result};
use std::sync::{Arc, OnceLock};

/// Global repository instance initialized once per process.
static REPOSITORY: OnceLock<Arc<dyn FullRepository>> = OnceLock::new();

fn create_selected_repository() -> RepositoryResult<Arc<dyn FullRepository>> {
    RepositoryFactory::from_env()
}

/// Initialize the global repository singleton for the selected backend.
pub fn init_repository() -> Result<()> {
    if REPOSITORY.get().is_some() {
        return Ok(());
    }

    let repo = create_selected_repository().map_err(|e| anyhow::Error::msg(e.to_string()))?;
    let _ = REPOSITORY.set(repo);
    Ok(())
}

/// Get a reference to the global repository instance.
pub fn get_repository() -> Result<&'static Arc<dyn FullRepository>> {
    if REPOSITORY.get().is_none() {
        let _ = init_repository();
    }

    REPOSITORY
        .get()
        .context("Repository not initialized. Call init_repository() first.")
}
