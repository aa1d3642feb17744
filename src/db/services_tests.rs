use chrono::{DateTime, Utc};

use crate::api::{ClientId, FormId, ReportId};
use crate::db::repositories::LocalRepository;
use crate::db::repository::{ClientRepository, FormRepository, RepositoryError};
use crate::db::services;
use crate::models::*;

fn new_client(name: &str) -> NewClient {
    NewClient {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        company: None,
        phone: None,
        industry: None,
        status: ClientStatus::Active,
        tags: vec![],
    }
}

fn new_feedback(client: Option<ClientId>, form: Option<FormId>, values: &[f64]) -> NewFeedback {
    NewFeedback {
        client_id: client,
        form_id: form,
        submitted_at: "2024-03-10T12:00:00Z".parse().unwrap(),
        source: Some(FeedbackSource::Website),
        ratings: values.iter().copied().map(RatingEntry::new).collect(),
    }
}

fn new_report(days: u16) -> NewReport {
    NewReport {
        title: "Monthly Summary".to_string(),
        report_type: ReportType::FeedbackSummary,
        description: String::new(),
        date_range_days: days,
        format: ReportFormat::Csv,
    }
}

fn now() -> DateTime<Utc> {
    "2024-03-15T00:00:00Z".parse().unwrap()
}

#[tokio::test]
async fn test_submit_feedback_refreshes_client_rollup() {
    let repo = LocalRepository::new();
    let client = repo.create_client(&new_client("Acme")).await.unwrap();

    services::submit_feedback(&repo, &new_feedback(Some(client.id), None, &[4.0, 5.0]))
        .await
        .unwrap();
    services::submit_feedback(&repo, &new_feedback(Some(client.id), None, &[3.0]))
        .await
        .unwrap();

    let refreshed = repo.get_client(client.id).await.unwrap();
    assert_eq!(refreshed.feedback_count, 2);
    // mean(4.5, 3.0) = 3.75 rounded to 3.8
    assert_eq!(refreshed.average_rating, 3.8);
}

#[tokio::test]
async fn test_submit_feedback_with_orphan_client_still_stores() {
    let repo = LocalRepository::new();

    let record =
        services::submit_feedback(&repo, &new_feedback(Some(ClientId::new(99)), None, &[4.0]))
            .await
            .unwrap();

    assert_eq!(record.client_id, Some(ClientId::new(99)));
    assert_eq!(repo.feedback_count(), 1);
}

#[tokio::test]
async fn test_submit_feedback_bumps_form_responses() {
    let repo = LocalRepository::new();
    let form = repo
        .create_form(&NewForm {
            title: "CSAT".to_string(),
            description: String::new(),
            category: FormCategory::Satisfaction,
            status: FormStatus::Published,
            questions: vec![],
        })
        .await
        .unwrap();

    services::submit_feedback(&repo, &new_feedback(None, Some(form.id), &[5.0]))
        .await
        .unwrap();

    let refreshed = repo.get_form(form.id).await.unwrap();
    assert_eq!(refreshed.responses, 1);
}

#[tokio::test]
async fn test_bulk_delete_reports_partial_failure() {
    let repo = LocalRepository::new();
    let a = repo.create_client(&new_client("A")).await.unwrap();
    let b = repo.create_client(&new_client("B")).await.unwrap();

    let outcome = services::delete_clients_bulk(
        &repo,
        &[a.id, ClientId::new(77), b.id],
    )
    .await;

    let mut succeeded = outcome.succeeded.clone();
    succeeded.sort();
    assert_eq!(succeeded, vec![a.id.value(), b.id.value()]);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].id, 77);
    assert!(outcome.failed[0].error.contains("not found"));
}

#[tokio::test]
async fn test_bulk_status_update() {
    let repo = LocalRepository::new();
    let a = repo.create_client(&new_client("A")).await.unwrap();
    let b = repo.create_client(&new_client("B")).await.unwrap();

    let outcome =
        services::update_client_status_bulk(&repo, &[a.id, b.id], ClientStatus::Blocked).await;

    assert_eq!(outcome.succeeded.len(), 2);
    assert!(outcome.failed.is_empty());
    assert_eq!(
        repo.get_client(a.id).await.unwrap().status,
        ClientStatus::Blocked
    );
}

#[tokio::test]
async fn test_publish_then_archive_form() {
    let repo = LocalRepository::new();
    let form = repo
        .create_form(&NewForm {
            title: "NPS".to_string(),
            description: String::new(),
            category: FormCategory::Nps,
            status: FormStatus::Draft,
            questions: vec![],
        })
        .await
        .unwrap();

    let published = services::publish_form(&repo, form.id).await.unwrap();
    assert_eq!(published.status, FormStatus::Published);

    // Publishing twice is a validation error
    let again = services::publish_form(&repo, form.id).await;
    assert!(matches!(again, Err(RepositoryError::ValidationError { .. })));

    let archived = services::archive_form(&repo, form.id).await.unwrap();
    assert_eq!(archived.status, FormStatus::Archived);
}

#[tokio::test]
async fn test_create_report_rejects_bad_date_range() {
    let repo = LocalRepository::new();

    let result = services::create_report(&repo, &new_report(45)).await;
    assert!(matches!(result, Err(RepositoryError::ValidationError { .. })));
}

#[tokio::test]
async fn test_generate_report_completes_with_content_size() {
    let repo = LocalRepository::new();
    let client = repo.create_client(&new_client("Acme")).await.unwrap();
    services::submit_feedback(&repo, &new_feedback(Some(client.id), None, &[4.0]))
        .await
        .unwrap();

    let report = services::create_report(&repo, &new_report(30)).await.unwrap();
    let generated = services::generate_report(&repo, report.id, now()).await.unwrap();

    assert_eq!(generated.status, ReportStatus::Completed);
    assert!(generated.file_size_bytes > 0);
    assert_eq!(generated.completed_at, Some(now()));
    assert_eq!(
        generated.download_url.as_deref(),
        Some(format!("/reports/{}.csv", report.id).as_str())
    );
}

#[tokio::test]
async fn test_generate_report_requires_pending() {
    let repo = LocalRepository::new();
    let report = services::create_report(&repo, &new_report(7)).await.unwrap();
    services::generate_report(&repo, report.id, now()).await.unwrap();

    let second = services::generate_report(&repo, report.id, now()).await;
    assert!(matches!(second, Err(RepositoryError::ValidationError { .. })));
}

#[tokio::test]
async fn test_download_report_increments_counter() {
    let repo = LocalRepository::new();
    let report = services::create_report(&repo, &new_report(7)).await.unwrap();
    services::generate_report(&repo, report.id, now()).await.unwrap();

    let downloaded = services::download_report(&repo, report.id).await.unwrap();
    assert_eq!(downloaded.download_count, 1);

    let downloaded = services::download_report(&repo, report.id).await.unwrap();
    assert_eq!(downloaded.download_count, 2);
}

#[tokio::test]
async fn test_download_pending_report_rejected() {
    let repo = LocalRepository::new();
    let report = services::create_report(&repo, &new_report(7)).await.unwrap();

    let result = services::download_report(&repo, report.id).await;
    assert!(matches!(result, Err(RepositoryError::ValidationError { .. })));
}

#[tokio::test]
async fn test_retry_requires_failed_report() {
    let repo = LocalRepository::new();
    let report = services::create_report(&repo, &new_report(7)).await.unwrap();

    let result = services::retry_report(&repo, report.id, now()).await;
    assert!(matches!(result, Err(RepositoryError::ValidationError { .. })));
}

#[tokio::test]
async fn test_delete_missing_report_is_not_found() {
    let repo = LocalRepository::new();

    let result = services::delete_report(&repo, ReportId::new(5)).await;
    assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
}

#[tokio::test]
async fn test_dashboard_summary_over_repo() {
    let repo = LocalRepository::new();
    let client = repo.create_client(&new_client("Acme")).await.unwrap();
    services::submit_feedback(&repo, &new_feedback(Some(client.id), None, &[4.0, 5.0]))
        .await
        .unwrap();

    let metrics = services::dashboard_summary(&repo).await.unwrap();
    assert_eq!(metrics.total_feedback, 1);
    assert_eq!(metrics.average_rating, 4.5);
    assert_eq!(metrics.response_rate, 100.0);
}

#[tokio::test]
async fn test_analytics_surface_on_empty_repo() {
    let repo = LocalRepository::new();

    let metrics = services::dashboard_summary(&repo).await.unwrap();
    assert_eq!(metrics, crate::api::DashboardMetrics::empty());

    let trend = services::trend_series(&repo, &Default::default()).await.unwrap();
    assert!(trend.categories.is_empty());

    let rows = services::client_performance(&repo).await.unwrap();
    assert!(rows.is_empty());
}
