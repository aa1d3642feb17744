use serde::{Deserialize, Serialize};

// =========================================================
// Distribution types
// =========================================================

/// One slice of a distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub label: String,
    pub count: usize,
    /// Share of the distribution total, 0–100 with one decimal.
    pub percent: f64,
}

/// Route function name constant for the satisfaction distribution
pub const GET_SATISFACTION_DISTRIBUTION: &str = "get_satisfaction_distribution";

/// Route function name constant for the source distribution
pub const GET_SOURCE_DISTRIBUTION: &str = "get_source_distribution";
