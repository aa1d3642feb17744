use serde::{Deserialize, Serialize};

use crate::api::ClientId;

// =========================================================
// Trend series types
// =========================================================

/// Which clients a trend computation should cover.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientFilter {
    /// Include every record, regardless of client reference.
    All,
    /// Only records referencing this client.
    One(ClientId),
}

impl Default for ClientFilter {
    fn default() -> Self {
        ClientFilter::All
    }
}

/// Options for a trend series computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendOptions {
    pub client_filter: ClientFilter,
    /// Number of trailing calendar days to keep. Charts offer 7, 30 and 90.
    pub window_days: usize,
}

impl Default for TrendOptions {
    fn default() -> Self {
        Self {
            client_filter: ClientFilter::All,
            window_days: 30,
        }
    }
}

/// One named series for a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub name: String,
    pub data: Vec<f64>,
}

/// Complete trend dataset: parallel series values and day labels.
///
/// `categories.len()` always equals `series[0].data.len()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeriesData {
    pub series: Vec<TrendSeries>,
    pub categories: Vec<String>,
}

/// Direction of a rating trend, derived from window-over-window comparison.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// Route function name constant for trend series
pub const GET_TREND_SERIES: &str = "get_trend_series";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_options_default() {
        let opts = TrendOptions::default();
        assert_eq!(opts.client_filter, ClientFilter::All);
        assert_eq!(opts.window_days, 30);
    }

    #[test]
    fn test_trend_series_clone() {
        let series = TrendSeries {
            name: "Average Rating".to_string(),
            data: vec![4.0, 3.5],
        };
        let cloned = series.clone();
        assert_eq!(cloned, series);
    }

    #[test]
    fn test_trend_direction_serde() {
        assert_eq!(
            serde_json::to_string(&TrendDirection::Up).unwrap(),
            "\"up\""
        );
    }

    #[test]
    fn test_const_value() {
        assert_eq!(GET_TREND_SERIES, "get_trend_series");
    }
}
