//! Report repository trait.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::ReportId;
use crate::models::{NewReport, Report, ReportPatch, ReportType};

/// Repository operations for report records.
///
/// `update_report` enforces the report status state machine: a patch whose
/// `status` is not a legal transition from the stored status fails with a
/// validation error, regardless of backend.
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// List all reports, ordered by id.
    async fn list_reports(&self) -> RepositoryResult<Vec<Report>>;

    /// List reports of a given type.
    async fn list_reports_by_type(&self, report_type: ReportType)
        -> RepositoryResult<Vec<Report>>;

    /// Fetch a single report.
    async fn get_report(&self, report_id: ReportId) -> RepositoryResult<Report>;

    /// Create a report in pending status; the stored record, including the
    /// assigned id, is echoed back.
    async fn create_report(&self, new_report: &NewReport) -> RepositoryResult<Report>;

    /// Apply a partial update and return the updated record.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` if the id does not exist
    /// * `Err(RepositoryError::ValidationError)` on an illegal status
    ///   transition
    async fn update_report(
        &self,
        report_id: ReportId,
        patch: &ReportPatch,
    ) -> RepositoryResult<Report>;

    /// Delete a report.
    ///
    /// # Returns
    /// * `Ok(true)` if a record was removed, `Ok(false)` if none existed
    async fn delete_report(&self, report_id: ReportId) -> RepositoryResult<bool>;
}
