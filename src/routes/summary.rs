use serde::{Deserialize, Serialize};

// =========================================================
// Dashboard summary types
// =========================================================

/// Headline metrics for the dashboard cards.
///
/// `response_rate` and `sentiment_score` are display percentages capped
/// at 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    pub total_feedback: usize,
    pub average_rating: f64,
    pub response_rate: f64,
    pub sentiment_score: u8,
}

impl DashboardMetrics {
    /// The defined all-zero output for an empty collection.
    pub fn empty() -> Self {
        Self {
            total_feedback: 0,
            average_rating: 0.0,
            response_rate: 0.0,
            sentiment_score: 0,
        }
    }
}

/// Route function name constant for the dashboard summary
pub const GET_DASHBOARD_SUMMARY: &str = "get_dashboard_summary";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_metrics() {
        let metrics = DashboardMetrics::empty();
        assert_eq!(metrics.total_feedback, 0);
        assert_eq!(metrics.average_rating, 0.0);
        assert_eq!(metrics.response_rate, 0.0);
        assert_eq!(metrics.sentiment_score, 0);
    }

    #[test]
    fn test_metrics_serde_roundtrip() {
        let metrics = DashboardMetrics {
            total_feedback: 12,
            average_rating: 4.1,
            response_rate: 60.0,
            sentiment_score: 82,
        };
        let json = serde_json::to_string(&metrics).unwrap();
        let back: DashboardMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, metrics);
    }
}
