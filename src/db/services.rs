//! High-level service layer.
//!
//! Repository-agnostic operations that work with any implementation of the
//! repository traits. Business logic that must behave identically regardless
//! of the storage backend lives here: derived-field maintenance on feedback
//! submission, bulk operations with per-item outcomes, the form and report
//! lifecycles, and orchestration of the aggregation engine.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::api::{
    ClientFilter, ClientId, ClientPerformance, DashboardMetrics, DistributionSlice, FeedbackId,
    FormId, ReportId, TrendOptions, TrendSeriesData,
};
use crate::models::{
    report::ALLOWED_DATE_RANGES, Client, ClientPatch, ClientStatus, FeedbackRecord, Form,
    FormPatch, FormStatus, NewClient, NewFeedback, NewReport, Report, ReportPatch, ReportStatus,
    ReportType,
};
use crate::services::ratings::{average_rating, round1};
use crate::services::reporting::{filter_window, render_feedback_summary_csv, report_window};
use crate::services::{
    compute_trend_series, rank_client_performance, satisfaction_distribution,
    source_distribution, summarize_dashboard_metrics,
};

// ==================== Health & Connection ====================

/// Check if the backing store is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Bulk Operations ====================

/// One failed item of a bulk operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkItemFailure {
    pub id: i64,
    pub error: String,
}

/// Per-item outcome of a bulk operation.
///
/// Partial failure is data, not an error: callers report exactly which items
/// failed instead of collapsing the batch into a single success flag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkOutcome {
    pub succeeded: Vec<i64>,
    pub failed: Vec<BulkItemFailure>,
}

impl BulkOutcome {
    fn collect(results: Vec<(i64, RepositoryResult<()>)>) -> Self {
        let mut outcome = BulkOutcome::default();
        for (id, result) in results {
            match result {
                Ok(()) => outcome.succeeded.push(id),
                Err(e) => outcome.failed.push(BulkItemFailure {
                    id,
                    error: e.to_string(),
                }),
            }
        }
        outcome
    }
}

/// Delete many clients concurrently, reporting per-item outcomes.
pub async fn delete_clients_bulk<R: FullRepository + ?Sized>(repo: &R, ids: &[ClientId]) -> BulkOutcome {
    let results = join_all(ids.iter().map(|&id| async move {
        let result = match repo.delete_client(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(RepositoryError::not_found(format!(
                "Client {} not found",
                id
            ))),
            Err(e) => Err(e),
        };
        (id.value(), result)
    }))
    .await;

    let outcome = BulkOutcome::collect(results);
    info!(
        "bulk client delete: {} succeeded, {} failed",
        outcome.succeeded.len(),
        outcome.failed.len()
    );
    outcome
}

/// Set the status of many clients concurrently, reporting per-item outcomes.
pub async fn update_client_status_bulk<R: FullRepository + ?Sized>(
    repo: &R,
    ids: &[ClientId],
    status: ClientStatus,
) -> BulkOutcome {
    let results = join_all(ids.iter().map(|&id| async move {
        let patch = ClientPatch {
            status: Some(status),
            ..Default::default()
        };
        let result = repo.update_client(id, &patch).await.map(|_| ());
        (id.value(), result)
    }))
    .await;

    BulkOutcome::collect(results)
}

/// Delete many forms concurrently, reporting per-item outcomes.
pub async fn delete_forms_bulk<R: FullRepository + ?Sized>(repo: &R, ids: &[FormId]) -> BulkOutcome {
    let results = join_all(ids.iter().map(|&id| async move {
        let result = match repo.delete_form(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(RepositoryError::not_found(format!("Form {} not found", id))),
            Err(e) => Err(e),
        };
        (id.value(), result)
    }))
    .await;

    BulkOutcome::collect(results)
}

/// Delete many reports concurrently, reporting per-item outcomes.
pub async fn delete_reports_bulk<R: FullRepository + ?Sized>(repo: &R, ids: &[ReportId]) -> BulkOutcome {
    let results = join_all(ids.iter().map(|&id| async move {
        let result = match repo.delete_report(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(RepositoryError::not_found(format!(
                "Report {} not found",
                id
            ))),
            Err(e) => Err(e),
        };
        (id.value(), result)
    }))
    .await;

    BulkOutcome::collect(results)
}

// ==================== Client Operations ====================

/// Create a client.
pub async fn create_client<R: FullRepository + ?Sized>(
    repo: &R,
    new_client: &NewClient,
) -> RepositoryResult<Client> {
    repo.create_client(new_client).await
}

/// Delete a single client; a missing id is a NotFound error.
pub async fn delete_client<R: FullRepository + ?Sized>(
    repo: &R,
    client_id: ClientId,
) -> RepositoryResult<()> {
    if repo.delete_client(client_id).await? {
        Ok(())
    } else {
        Err(RepositoryError::not_found(format!(
            "Client {} not found",
            client_id
        )))
    }
}

// ==================== Feedback Operations ====================

/// Submit a feedback record and maintain derived state.
///
/// After storing the record, the referenced client's `feedback_count` and
/// `average_rating` are recomputed over its full feedback subset, and the
/// referenced form's `responses` counter is incremented. Both follow-up
/// writes are best effort: an orphaned reference or a transient failure is
/// logged and does not undo the submission.
pub async fn submit_feedback<R: FullRepository + ?Sized>(
    repo: &R,
    new_feedback: &NewFeedback,
) -> RepositoryResult<FeedbackRecord> {
    let record = repo.create_feedback(new_feedback).await?;

    if let Some(client_id) = record.client_id {
        if let Err(e) = refresh_client_rollup(repo, client_id).await {
            warn!("failed to refresh rollup for client {}: {}", client_id, e);
        }
    }

    if let Some(form_id) = record.form_id {
        if let Err(e) = bump_form_responses(repo, form_id).await {
            warn!("failed to bump responses for form {}: {}", form_id, e);
        }
    }

    Ok(record)
}

/// Recompute a client's derived feedback fields from its feedback subset.
pub async fn refresh_client_rollup<R: FullRepository + ?Sized>(
    repo: &R,
    client_id: ClientId,
) -> RepositoryResult<Client> {
    let subset = repo.list_feedback_for_client(client_id).await?;

    let feedback_count = subset.len() as u32;
    let average = if subset.is_empty() {
        0.0
    } else {
        let sum: f64 = subset.iter().map(|r| average_rating(&r.ratings)).sum();
        round1(sum / subset.len() as f64)
    };

    let patch = ClientPatch {
        feedback_count: Some(feedback_count),
        average_rating: Some(average),
        ..Default::default()
    };
    repo.update_client(client_id, &patch).await
}

async fn bump_form_responses<R: FullRepository + ?Sized>(
    repo: &R,
    form_id: FormId,
) -> RepositoryResult<Form> {
    let form = repo.get_form(form_id).await?;
    let patch = FormPatch {
        responses: Some(form.responses + 1),
        ..Default::default()
    };
    repo.update_form(form_id, &patch).await
}

/// Delete a single feedback record; a missing id is a NotFound error.
pub async fn delete_feedback<R: FullRepository + ?Sized>(
    repo: &R,
    feedback_id: FeedbackId,
) -> RepositoryResult<()> {
    if repo.delete_feedback(feedback_id).await? {
        Ok(())
    } else {
        Err(RepositoryError::not_found(format!(
            "Feedback {} not found",
            feedback_id
        )))
    }
}

// ==================== Form Lifecycle ====================

/// Publish a draft form.
pub async fn publish_form<R: FullRepository + ?Sized>(repo: &R, form_id: FormId) -> RepositoryResult<Form> {
    let form = repo.get_form(form_id).await?;
    if form.status != FormStatus::Draft {
        return Err(RepositoryError::validation(format!(
            "Only draft forms can be published, form {} is {}",
            form_id,
            form.status.as_str()
        )));
    }

    let patch = FormPatch {
        status: Some(FormStatus::Published),
        ..Default::default()
    };
    repo.update_form(form_id, &patch).await
}

/// Archive a published form.
pub async fn archive_form<R: FullRepository + ?Sized>(repo: &R, form_id: FormId) -> RepositoryResult<Form> {
    let form = repo.get_form(form_id).await?;
    if form.status != FormStatus::Published {
        return Err(RepositoryError::validation(format!(
            "Only published forms can be archived, form {} is {}",
            form_id,
            form.status.as_str()
        )));
    }

    let patch = FormPatch {
        status: Some(FormStatus::Archived),
        ..Default::default()
    };
    repo.update_form(form_id, &patch).await
}

/// Delete a single form; a missing id is a NotFound error.
pub async fn delete_form<R: FullRepository + ?Sized>(repo: &R, form_id: FormId) -> RepositoryResult<()> {
    if repo.delete_form(form_id).await? {
        Ok(())
    } else {
        Err(RepositoryError::not_found(format!(
            "Form {} not found",
            form_id
        )))
    }
}

// ==================== Report Lifecycle ====================

/// Create a report after validating its date range.
pub async fn create_report<R: FullRepository + ?Sized>(
    repo: &R,
    new_report: &NewReport,
) -> RepositoryResult<Report> {
    if !ALLOWED_DATE_RANGES.contains(&new_report.date_range_days) {
        return Err(RepositoryError::validation(format!(
            "Unsupported report date range: {} days",
            new_report.date_range_days
        )));
    }
    repo.create_report(new_report).await
}

/// Generate a pending report's content.
///
/// Fetches the feedback inside the report window plus the client list, runs
/// the aggregation engine, renders the CSV summary, and marks the report
/// completed with the real content size and a download URL. If gathering the
/// inputs fails, the report is marked failed (best effort) and the error
/// propagates.
pub async fn generate_report<R: FullRepository + ?Sized>(
    repo: &R,
    report_id: ReportId,
    now: DateTime<Utc>,
) -> RepositoryResult<Report> {
    let report = repo.get_report(report_id).await?;
    if report.status != ReportStatus::Pending {
        return Err(RepositoryError::validation(format!(
            "Report {} is not pending generation",
            report_id
        )));
    }

    let content = match build_report_content(repo, &report, now).await {
        Ok(content) => content,
        Err(e) => {
            let failed = ReportPatch {
                status: Some(ReportStatus::Failed),
                ..Default::default()
            };
            if let Err(mark_err) = repo.update_report(report_id, &failed).await {
                warn!("failed to mark report {} as failed: {}", report_id, mark_err);
            }
            return Err(e);
        }
    };

    let patch = ReportPatch {
        status: Some(ReportStatus::Completed),
        completed_at: Some(now),
        file_size_bytes: Some(content.len() as u64),
        download_url: Some(format!(
            "/reports/{}.{}",
            report_id,
            report.format.extension()
        )),
        ..Default::default()
    };

    let completed = repo.update_report(report_id, &patch).await?;
    info!(
        "report {} generated ({} bytes)",
        report_id, completed.file_size_bytes
    );
    Ok(completed)
}

async fn build_report_content<R: FullRepository + ?Sized>(
    repo: &R,
    report: &Report,
    now: DateTime<Utc>,
) -> RepositoryResult<String> {
    let (from, to) = report_window(now, report.date_range_days);
    let feedback = repo.list_feedback().await?;
    let clients = repo.list_clients().await?;

    let windowed = filter_window(&feedback, from, to);
    let metrics = summarize_dashboard_metrics(&windowed, &clients);
    let trend = compute_trend_series(
        &windowed,
        &TrendOptions {
            client_filter: ClientFilter::All,
            window_days: report.date_range_days as usize,
        },
    );

    Ok(render_feedback_summary_csv(&metrics, &trend))
}

/// Move a failed report back to pending and generate it again.
pub async fn retry_report<R: FullRepository + ?Sized>(
    repo: &R,
    report_id: ReportId,
    now: DateTime<Utc>,
) -> RepositoryResult<Report> {
    let report = repo.get_report(report_id).await?;
    if report.status != ReportStatus::Failed {
        return Err(RepositoryError::validation(format!(
            "Only failed reports can be retried, report {} is not failed",
            report_id
        )));
    }

    let patch = ReportPatch {
        status: Some(ReportStatus::Pending),
        ..Default::default()
    };
    repo.update_report(report_id, &patch).await?;

    generate_report(repo, report_id, now).await
}

/// Record a download of a completed report and return the updated record.
pub async fn download_report<R: FullRepository + ?Sized>(
    repo: &R,
    report_id: ReportId,
) -> RepositoryResult<Report> {
    let report = repo.get_report(report_id).await?;
    if report.status != ReportStatus::Completed {
        return Err(RepositoryError::validation(format!(
            "Report {} has not been generated yet",
            report_id
        )));
    }

    let patch = ReportPatch {
        download_count: Some(report.download_count + 1),
        ..Default::default()
    };
    repo.update_report(report_id, &patch).await
}

/// Delete a single report; a missing id is a NotFound error.
pub async fn delete_report<R: FullRepository + ?Sized>(
    repo: &R,
    report_id: ReportId,
) -> RepositoryResult<()> {
    if repo.delete_report(report_id).await? {
        Ok(())
    } else {
        Err(RepositoryError::not_found(format!(
            "Report {} not found",
            report_id
        )))
    }
}

/// List reports, optionally filtered by type.
pub async fn list_reports<R: FullRepository + ?Sized>(
    repo: &R,
    report_type: Option<ReportType>,
) -> RepositoryResult<Vec<Report>> {
    match report_type {
        Some(t) => repo.list_reports_by_type(t).await,
        None => repo.list_reports().await,
    }
}

// ==================== Analytics Orchestration ====================

/// Headline dashboard metrics over the full collections.
pub async fn dashboard_summary<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<DashboardMetrics> {
    let feedback = repo.list_feedback().await?;
    let clients = repo.list_clients().await?;
    Ok(summarize_dashboard_metrics(&feedback, &clients))
}

/// Trend series for the chart.
pub async fn trend_series<R: FullRepository + ?Sized>(
    repo: &R,
    opts: &TrendOptions,
) -> RepositoryResult<TrendSeriesData> {
    let feedback = repo.list_feedback().await?;
    Ok(compute_trend_series(&feedback, opts))
}

/// Client performance table rows.
pub async fn client_performance<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<ClientPerformance>> {
    let clients = repo.list_clients().await?;
    let feedback = repo.list_feedback().await?;
    Ok(rank_client_performance(&clients, &feedback))
}

/// Satisfaction band breakdown.
pub async fn satisfaction_breakdown<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<DistributionSlice>> {
    let feedback = repo.list_feedback().await?;
    Ok(satisfaction_distribution(&feedback))
}

/// Submission channel breakdown.
pub async fn source_breakdown<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<DistributionSlice>> {
    let feedback = repo.list_feedback().await?;
    Ok(source_distribution(&feedback))
}
