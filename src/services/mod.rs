//! Aggregation engine: pure transformations of feedback collections.
//!
//! Every function in this module is deterministic and side-effect free. It
//! takes in-memory collections already fetched from a repository and returns
//! fresh derived structures; it never performs I/O and never mutates its
//! inputs. Malformed records degrade to zero/default values instead of
//! raising.

pub mod distributions;
pub mod performance;
pub mod ratings;
pub mod reporting;
pub mod summary;
pub mod trends;

pub use distributions::{satisfaction_distribution, source_distribution};
pub use performance::rank_client_performance;
pub use ratings::{average_rating, round1};
pub use summary::summarize_dashboard_metrics;
pub use trends::{compute_trend_series, trend_direction};
