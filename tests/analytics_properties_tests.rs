//! Contract properties of the aggregation engine over the public API.

use chrono::{DateTime, Utc};

use pulsepoint::api::{ClientFilter, ClientId, FeedbackId, TrendOptions};
use pulsepoint::models::{Client, ClientStatus, FeedbackRecord, RatingEntry};
use pulsepoint::services::{
    average_rating, compute_trend_series, rank_client_performance, satisfaction_distribution,
    summarize_dashboard_metrics,
};

fn record(id: i64, client: Option<i64>, at: &str, values: &[f64]) -> FeedbackRecord {
    FeedbackRecord {
        id: FeedbackId::new(id),
        client_id: client.map(ClientId::new),
        form_id: None,
        submitted_at: at.parse::<DateTime<Utc>>().unwrap(),
        source: None,
        ratings: values.iter().copied().map(RatingEntry::new).collect(),
    }
}

fn client(id: i64, name: &str) -> Client {
    Client {
        id: ClientId::new(id),
        name: name.to_string(),
        email: "x@example.com".to_string(),
        company: None,
        phone: None,
        industry: None,
        status: ClientStatus::Active,
        tags: vec![],
        created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        last_contact: None,
        feedback_count: 0,
        average_rating: 0.0,
    }
}

#[test]
fn empty_ratings_list_averages_to_exactly_zero() {
    assert_eq!(average_rating(&[]), 0.0);
}

#[test]
fn non_empty_ratings_average_to_arithmetic_mean() {
    let ratings: Vec<RatingEntry> = [1.0, 2.0, 3.0, 4.0, 5.0]
        .iter()
        .copied()
        .map(RatingEntry::new)
        .collect();
    assert!((average_rating(&ratings) - 3.0).abs() < 1e-12);
}

#[test]
fn trend_series_of_empty_collection_is_empty_but_named() {
    for window in [7, 30, 90] {
        let data = compute_trend_series(
            &[],
            &TrendOptions {
                client_filter: ClientFilter::All,
                window_days: window,
            },
        );
        assert_eq!(data.series.len(), 1);
        assert_eq!(data.series[0].name, "Average Rating");
        assert!(data.series[0].data.is_empty());
        assert!(data.categories.is_empty());
    }
}

#[test]
fn trend_series_categories_always_parallel_to_data() {
    let feedback = vec![
        record(1, Some(1), "2024-01-01T10:00:00Z", &[4.0]),
        record(2, Some(2), "2024-01-05T10:00:00Z", &[2.0]),
        record(3, None, "2024-01-03T10:00:00Z", &[]),
    ];
    for window in [1, 2, 7, 30] {
        let data = compute_trend_series(
            &feedback,
            &TrendOptions {
                client_filter: ClientFilter::All,
                window_days: window,
            },
        );
        assert_eq!(data.categories.len(), data.series[0].data.len());
    }
}

#[test]
fn oversized_window_returns_available_days_unpadded() {
    let feedback = vec![
        record(1, None, "2024-01-01T10:00:00Z", &[4.0]),
        record(2, None, "2024-01-02T10:00:00Z", &[4.0]),
    ];
    let data = compute_trend_series(
        &feedback,
        &TrendOptions {
            client_filter: ClientFilter::All,
            window_days: 90,
        },
    );
    assert_eq!(data.series[0].data.len(), 2);
    assert!(!data.series[0].data.contains(&0.0));
}

#[test]
fn same_day_records_average_their_per_record_means() {
    let feedback = vec![
        record(1, Some(1), "2024-01-01T08:00:00Z", &[4.0, 5.0]),
        record(2, Some(1), "2024-01-01T18:00:00Z", &[3.0]),
    ];
    let data = compute_trend_series(&feedback, &TrendOptions::default());

    assert_eq!(data.categories, vec!["2024-01-01"]);
    assert!((data.series[0].data[0] - 3.75).abs() < 1e-12);
}

#[test]
fn client_with_no_feedback_gets_zero_row() {
    let clients = vec![client(1, "Acme")];
    let rows = rank_client_performance(&clients, &[]);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, ClientId::new(1));
    assert_eq!(rows[0].name, "Acme");
    assert_eq!(rows[0].industry, "N/A");
    assert_eq!(rows[0].responses, 0);
    assert_eq!(rows[0].avg_rating, 0.0);
}

#[test]
fn performance_output_length_matches_input() {
    let clients: Vec<Client> = (1..=5).map(|i| client(i, "C")).collect();
    let feedback = vec![record(1, Some(3), "2024-01-01T10:00:00Z", &[4.0])];

    let rows = rank_client_performance(&clients, &feedback);
    assert_eq!(rows.len(), clients.len());
    for (row, input) in rows.iter().zip(clients.iter()) {
        assert_eq!(row.id, input.id);
    }
}

#[test]
fn summary_with_no_clients_is_finite() {
    let feedback = vec![record(1, None, "2024-01-01T10:00:00Z", &[4.0])];
    let metrics = summarize_dashboard_metrics(&feedback, &[]);

    assert!(metrics.response_rate.is_finite());
    assert_eq!(metrics.response_rate, 0.0);
}

#[test]
fn engine_operations_do_not_mutate_inputs() {
    let feedback = vec![
        record(1, Some(1), "2024-01-01T10:00:00Z", &[4.0, 5.0]),
        record(2, Some(2), "2024-01-02T10:00:00Z", &[]),
    ];
    let clients = vec![client(1, "Acme"), client(2, "Blue")];

    let feedback_snapshot = format!("{:?}", feedback);
    let clients_snapshot = format!("{:?}", clients);

    let _ = compute_trend_series(&feedback, &TrendOptions::default());
    let _ = rank_client_performance(&clients, &feedback);
    let _ = summarize_dashboard_metrics(&feedback, &clients);
    let _ = satisfaction_distribution(&feedback);

    assert_eq!(format!("{:?}", feedback), feedback_snapshot);
    assert_eq!(format!("{:?}", clients), clients_snapshot);
}

#[test]
fn engine_operations_are_idempotent() {
    let feedback = vec![
        record(1, Some(1), "2024-01-01T10:00:00Z", &[4.0]),
        record(2, Some(1), "2024-01-04T10:00:00Z", &[2.0, 3.0]),
    ];
    let clients = vec![client(1, "Acme")];

    assert_eq!(
        compute_trend_series(&feedback, &TrendOptions::default()),
        compute_trend_series(&feedback, &TrendOptions::default())
    );
    assert_eq!(
        rank_client_performance(&clients, &feedback),
        rank_client_performance(&clients, &feedback)
    );
    assert_eq!(
        summarize_dashboard_metrics(&feedback, &clients),
        summarize_dashboard_metrics(&feedback, &clients)
    );
}
