//! Per-record rating arithmetic shared by every aggregation.

use crate::models::RatingEntry;

/// Arithmetic mean of a record's rating values.
///
/// A missing value counts as 0. An empty list yields exactly 0.0, never NaN.
pub fn average_rating(ratings: &[RatingEntry]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let sum: f64 = ratings.iter().map(|r| r.value.unwrap_or(0.0)).sum();
    sum / ratings.len() as f64
}

/// Round to one decimal place, the precision every rating display uses.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
