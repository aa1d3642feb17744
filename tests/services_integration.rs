//! End-to-end flows through the service layer on the in-memory repository.

use chrono::{DateTime, Utc};

use pulsepoint::api::{ClientFilter, ClientId, TrendOptions};
use pulsepoint::db::repositories::LocalRepository;
use pulsepoint::db::repository::{ClientRepository, RepositoryError};
use pulsepoint::db::services;
use pulsepoint::models::*;

fn new_client(name: &str) -> NewClient {
    NewClient {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        company: None,
        phone: None,
        industry: Some("Retail".to_string()),
        status: ClientStatus::Active,
        tags: vec![],
    }
}

fn feedback_at(client: ClientId, at: &str, values: &[f64]) -> NewFeedback {
    NewFeedback {
        client_id: Some(client),
        form_id: None,
        submitted_at: at.parse::<DateTime<Utc>>().unwrap(),
        source: Some(FeedbackSource::Email),
        ratings: values.iter().copied().map(RatingEntry::new).collect(),
    }
}

#[tokio::test]
async fn test_full_feedback_to_analytics_flow() {
    let repo = LocalRepository::new();
    let acme = repo.create_client(&new_client("Acme")).await.unwrap();
    let blue = repo.create_client(&new_client("Blue")).await.unwrap();

    services::submit_feedback(&repo, &feedback_at(acme.id, "2024-03-01T09:00:00Z", &[4.0, 5.0]))
        .await
        .unwrap();
    services::submit_feedback(&repo, &feedback_at(acme.id, "2024-03-02T09:00:00Z", &[3.0]))
        .await
        .unwrap();
    services::submit_feedback(&repo, &feedback_at(blue.id, "2024-03-02T15:00:00Z", &[5.0]))
        .await
        .unwrap();

    // Dashboard metrics across both clients
    let metrics = services::dashboard_summary(&repo).await.unwrap();
    assert_eq!(metrics.total_feedback, 3);
    // mean(4.5, 3.0, 5.0) = 4.1666 -> 4.2
    assert_eq!(metrics.average_rating, 4.2);
    assert_eq!(metrics.response_rate, 100.0);
    assert_eq!(metrics.sentiment_score, 83);

    // Trend for one client only
    let trend = services::trend_series(
        &repo,
        &TrendOptions {
            client_filter: ClientFilter::One(acme.id),
            window_days: 30,
        },
    )
    .await
    .unwrap();
    assert_eq!(trend.categories, vec!["2024-03-01", "2024-03-02"]);
    assert_eq!(trend.series[0].data, vec![4.5, 3.0]);

    // Performance table preserves creation order
    let rows = services::client_performance(&repo).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].name, "Acme");
    assert_eq!(rows[0].responses, 2);
    assert_eq!(rows[1].name, "Blue");
    assert_eq!(rows[1].avg_rating, 5.0);

    // Source distribution reflects the submitted channel
    let sources = services::source_breakdown(&repo).await.unwrap();
    let email = sources.iter().find(|s| s.label == "Email").unwrap();
    assert_eq!(email.count, 3);
    assert_eq!(email.percent, 100.0);
}

#[tokio::test]
async fn test_report_generation_reflects_window() {
    let repo = LocalRepository::new();
    let acme = repo.create_client(&new_client("Acme")).await.unwrap();

    // One record inside the 7-day window, one far outside it
    services::submit_feedback(&repo, &feedback_at(acme.id, "2024-03-14T09:00:00Z", &[4.0]))
        .await
        .unwrap();
    services::submit_feedback(&repo, &feedback_at(acme.id, "2023-12-01T09:00:00Z", &[1.0]))
        .await
        .unwrap();

    let report = services::create_report(
        &repo,
        &NewReport {
            title: "Weekly".to_string(),
            report_type: ReportType::FeedbackSummary,
            description: String::new(),
            date_range_days: 7,
            format: ReportFormat::Csv,
        },
    )
    .await
    .unwrap();

    let now: DateTime<Utc> = "2024-03-15T00:00:00Z".parse().unwrap();
    let generated = services::generate_report(&repo, report.id, now).await.unwrap();

    assert_eq!(generated.status, ReportStatus::Completed);
    // Only the in-window record counts: the summary line must say 1
    assert!(generated.file_size_bytes > 0);

    let downloaded = services::download_report(&repo, report.id).await.unwrap();
    assert_eq!(downloaded.download_count, 1);
}

#[tokio::test]
async fn test_bulk_partial_failure_reports_each_item() {
    let repo = LocalRepository::new();
    let a = repo.create_client(&new_client("A")).await.unwrap();

    let outcome = services::delete_clients_bulk(
        &repo,
        &[a.id, ClientId::new(50), ClientId::new(51)],
    )
    .await;

    assert_eq!(outcome.succeeded, vec![a.id.value()]);
    let mut failed_ids: Vec<i64> = outcome.failed.iter().map(|f| f.id).collect();
    failed_ids.sort();
    assert_eq!(failed_ids, vec![50, 51]);
}

#[tokio::test]
async fn test_rollup_after_feedback_delete_refresh() {
    let repo = LocalRepository::new();
    let acme = repo.create_client(&new_client("Acme")).await.unwrap();

    let record =
        services::submit_feedback(&repo, &feedback_at(acme.id, "2024-03-01T09:00:00Z", &[5.0]))
            .await
            .unwrap();
    services::submit_feedback(&repo, &feedback_at(acme.id, "2024-03-02T09:00:00Z", &[3.0]))
        .await
        .unwrap();

    services::delete_feedback(&repo, record.id).await.unwrap();
    let refreshed = services::refresh_client_rollup(&repo, acme.id).await.unwrap();

    assert_eq!(refreshed.feedback_count, 1);
    assert_eq!(refreshed.average_rating, 3.0);
}

#[tokio::test]
async fn test_unhealthy_store_propagates_as_error() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    let result = services::dashboard_summary(&repo).await;
    assert!(matches!(result, Err(RepositoryError::ConnectionError { .. })));
}
