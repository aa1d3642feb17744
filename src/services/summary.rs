//! Dashboard summary metrics.

use crate::api::DashboardMetrics;
use crate::models::{Client, FeedbackRecord};
use crate::services::ratings::{average_rating, round1};

/// Display scale for the response-rate metric: feedback volume over client
/// count reads as a percentage of one-feedback-per-client coverage. The value
/// is capped at 100.
pub const RESPONSE_RATE_SCALE: f64 = 100.0;

/// Compute the four headline dashboard metrics.
///
/// All outputs are non-negative; response rate and sentiment score are capped
/// at 100. An empty feedback collection yields the all-zero metrics, and an
/// empty client list yields a response rate of 0 rather than a division by
/// zero.
pub fn summarize_dashboard_metrics(
    feedback: &[FeedbackRecord],
    clients: &[Client],
) -> DashboardMetrics {
    let total_feedback = feedback.len();

    let mean_rating = if total_feedback > 0 {
        let sum: f64 = feedback.iter().map(|record| average_rating(&record.ratings)).sum();
        sum / total_feedback as f64
    } else {
        0.0
    };

    let response_rate = if clients.is_empty() {
        0.0
    } else {
        let rate = total_feedback as f64 / clients.len() as f64 * RESPONSE_RATE_SCALE;
        round1(rate).min(100.0)
    };

    let sentiment_score = (mean_rating * 20.0).min(100.0).round() as u8;

    DashboardMetrics {
        total_feedback,
        average_rating: round1(mean_rating),
        response_rate,
        sentiment_score,
    }
}
