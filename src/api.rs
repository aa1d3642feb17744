//! Public API surface for the backend.
//!
//! This file consolidates the identifier newtypes and the DTO types for the
//! HTTP API. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::distribution::DistributionSlice;
pub use crate::routes::performance::ClientPerformance;
pub use crate::routes::summary::DashboardMetrics;
pub use crate::routes::trends::ClientFilter;
pub use crate::routes::trends::TrendDirection;
pub use crate::routes::trends::TrendOptions;
pub use crate::routes::trends::TrendSeries;
pub use crate::routes::trends::TrendSeriesData;

use serde::{Deserialize, Serialize};

/// Client identifier (record-store primary key).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ClientId(pub i64);

/// Feedback record identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeedbackId(pub i64);

/// Form identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FormId(pub i64);

/// Report identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ReportId(pub i64);

macro_rules! impl_id {
    ($name:ident) => {
        impl $name {
            pub fn new(value: i64) -> Self {
                $name(value)
            }

            pub fn value(&self) -> i64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                $name(value)
            }
        }
    };
}

impl_id!(ClientId);
impl_id!(FeedbackId);
impl_id!(FormId);
impl_id!(ReportId);
