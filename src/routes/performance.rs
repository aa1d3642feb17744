use serde::{Deserialize, Serialize};

use crate::api::ClientId;
use crate::routes::trends::TrendDirection;

// =========================================================
// Client performance types
// =========================================================

/// One row of the client performance table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientPerformance {
    pub id: ClientId,
    pub name: String,
    pub industry: String,
    pub responses: usize,
    pub avg_rating: f64,
    pub trend: TrendDirection,
}

/// Route function name constant for client performance
pub const GET_CLIENT_PERFORMANCE: &str = "get_client_performance";
