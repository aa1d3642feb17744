//! Rating trend aggregation.
//!
//! Turns a feedback collection into the day-indexed series that drives the
//! trend chart, and derives trend direction from window-over-window
//! comparison of actual history.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::api::{ClientFilter, TrendDirection, TrendOptions, TrendSeries, TrendSeriesData};
use crate::models::FeedbackRecord;
use crate::services::ratings::average_rating;

/// Name of the single series the trend chart renders.
const SERIES_NAME: &str = "Average Rating";

/// Ratings within this band of each other count as flat.
const FLAT_BAND: f64 = 0.05;

fn matches_filter(record: &FeedbackRecord, filter: ClientFilter) -> bool {
    match filter {
        ClientFilter::All => true,
        ClientFilter::One(id) => record.client_id == Some(id),
    }
}

/// Group records by UTC calendar day, keeping each day's per-record averages.
///
/// The BTreeMap keeps days in ascending chronological order, so trailing
/// windows are a simple suffix.
fn group_by_day(
    feedback: &[FeedbackRecord],
    filter: ClientFilter,
) -> BTreeMap<NaiveDate, Vec<f64>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for record in feedback.iter().filter(|r| matches_filter(r, filter)) {
        let day = record.submitted_at.date_naive();
        grouped.entry(day).or_default().push(average_rating(&record.ratings));
    }
    grouped
}

fn day_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Compute the trend series for the chart.
///
/// Records are filtered by client, grouped by the UTC calendar day of
/// `submitted_at`, and each day contributes the mean of its per-record
/// averages. Only the trailing `window_days` distinct days are kept; if fewer
/// days exist, all of them are returned. Days with no records never appear —
/// the series is not zero-filled.
///
/// An empty collection yields one named series with empty data and empty
/// categories so callers can render an empty state.
pub fn compute_trend_series(feedback: &[FeedbackRecord], opts: &TrendOptions) -> TrendSeriesData {
    let grouped = group_by_day(feedback, opts.client_filter);

    let days: Vec<(&NaiveDate, &Vec<f64>)> = grouped.iter().collect();
    let start = days.len().saturating_sub(opts.window_days);
    let window = &days[start..];

    let categories = window
        .iter()
        .map(|(day, _)| day.format("%Y-%m-%d").to_string())
        .collect();
    let data = window.iter().map(|(_, values)| day_mean(values)).collect();

    TrendSeriesData {
        series: vec![TrendSeries {
            name: SERIES_NAME.to_string(),
            data,
        }],
        categories,
    }
}

/// Derive a trend direction by comparing the mean day rating over the most
/// recent `window_days` distinct days against the preceding window of the
/// same size.
///
/// Returns `Flat` when either window is empty or the difference stays within
/// a ±0.05 band.
pub fn trend_direction(
    feedback: &[FeedbackRecord],
    filter: ClientFilter,
    window_days: usize,
) -> TrendDirection {
    if window_days == 0 {
        return TrendDirection::Flat;
    }

    let grouped = group_by_day(feedback, filter);
    let day_means: Vec<f64> = grouped.values().map(|values| day_mean(values)).collect();

    let recent_start = day_means.len().saturating_sub(window_days);
    let recent = &day_means[recent_start..];
    let prior_start = recent_start.saturating_sub(window_days);
    let prior = &day_means[prior_start..recent_start];

    if recent.is_empty() || prior.is_empty() {
        return TrendDirection::Flat;
    }

    let recent_mean = recent.iter().sum::<f64>() / recent.len() as f64;
    let prior_mean = prior.iter().sum::<f64>() / prior.len() as f64;

    let diff = recent_mean - prior_mean;
    if diff > FLAT_BAND {
        TrendDirection::Up
    } else if diff < -FLAT_BAND {
        TrendDirection::Down
    } else {
        TrendDirection::Flat
    }
}
