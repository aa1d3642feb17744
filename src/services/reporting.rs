//! Report content rendering.
//!
//! The generated artifact is a day-by-day summary of the report window,
//! mirroring the CSV export the dashboard offers. The byte length of the
//! rendered content becomes the report's recorded file size.

use chrono::{DateTime, Duration, Utc};

use crate::api::{DashboardMetrics, TrendSeriesData};
use crate::models::FeedbackRecord;

/// Inclusive-start, exclusive-end window covering the trailing `days` days.
pub fn report_window(now: DateTime<Utc>, days: u16) -> (DateTime<Utc>, DateTime<Utc>) {
    (now - Duration::days(days as i64), now)
}

/// Keep only records whose `submitted_at` falls inside the window.
pub fn filter_window(
    feedback: &[FeedbackRecord],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<FeedbackRecord> {
    feedback
        .iter()
        .filter(|record| record.submitted_at >= from && record.submitted_at < to)
        .cloned()
        .collect()
}

/// Render the feedback summary as CSV.
///
/// Layout: a metrics header block, then one row per trend-series day.
pub fn render_feedback_summary_csv(
    metrics: &DashboardMetrics,
    trend: &TrendSeriesData,
) -> String {
    let mut out = String::new();

    out.push_str("Metric,Value\n");
    out.push_str(&format!("Total Feedback,{}\n", metrics.total_feedback));
    out.push_str(&format!("Average Rating,{:.1}\n", metrics.average_rating));
    out.push_str(&format!("Response Rate,{:.1}\n", metrics.response_rate));
    out.push_str(&format!("Sentiment Score,{}\n", metrics.sentiment_score));
    out.push('\n');

    out.push_str("Date,Average Rating\n");
    if let Some(series) = trend.series.first() {
        for (day, value) in trend.categories.iter().zip(series.data.iter()) {
            out.push_str(&format!("{},{:.2}\n", day, value));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{FeedbackId, TrendSeries};

    fn record(id: i64, at: &str) -> FeedbackRecord {
        FeedbackRecord {
            id: FeedbackId::new(id),
            client_id: None,
            form_id: None,
            submitted_at: at.parse().unwrap(),
            source: None,
            ratings: vec![],
        }
    }

    #[test]
    fn test_report_window_span() {
        let now = "2024-02-01T00:00:00Z".parse().unwrap();
        let (from, to) = report_window(now, 30);

        assert_eq!(to, now);
        assert_eq!(from, "2024-01-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_filter_window_bounds() {
        let from = "2024-01-10T00:00:00Z".parse().unwrap();
        let to = "2024-01-20T00:00:00Z".parse().unwrap();
        let feedback = vec![
            record(1, "2024-01-09T23:59:59Z"),
            record(2, "2024-01-10T00:00:00Z"),
            record(3, "2024-01-15T12:00:00Z"),
            record(4, "2024-01-20T00:00:00Z"),
        ];

        let kept = filter_window(&feedback, from, to);
        let ids: Vec<i64> = kept.iter().map(|r| r.id.value()).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_csv_layout() {
        let metrics = DashboardMetrics {
            total_feedback: 2,
            average_rating: 3.8,
            response_rate: 50.0,
            sentiment_score: 75,
        };
        let trend = TrendSeriesData {
            series: vec![TrendSeries {
                name: "Average Rating".to_string(),
                data: vec![4.5, 3.0],
            }],
            categories: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
        };

        let csv = render_feedback_summary_csv(&metrics, &trend);
        assert!(csv.starts_with("Metric,Value\n"));
        assert!(csv.contains("Total Feedback,2\n"));
        assert!(csv.contains("Date,Average Rating\n"));
        assert!(csv.contains("2024-01-01,4.50\n"));
        assert!(csv.contains("2024-01-02,3.00\n"));
        assert!(!csv.is_empty());
    }

    #[test]
    fn test_csv_empty_trend_still_has_headers() {
        let csv = render_feedback_summary_csv(
            &DashboardMetrics::empty(),
            &TrendSeriesData {
                series: vec![TrendSeries {
                    name: "Average Rating".to_string(),
                    data: vec![],
                }],
                categories: vec![],
            },
        );
        assert!(csv.contains("Metric,Value"));
        assert!(csv.contains("Date,Average Rating"));
    }
}
