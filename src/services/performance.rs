//! Client performance ranking.

use crate::api::{ClientFilter, ClientPerformance};
use crate::models::{Client, FeedbackRecord};
use crate::services::ratings::{average_rating, round1};
use crate::services::trends::trend_direction;

/// Placeholder shown when a client record arrives without a usable name.
const UNKNOWN_CLIENT: &str = "Unknown Client";

/// Window used for the per-client trend indicator.
const TREND_WINDOW_DAYS: usize = 30;

/// Build the client performance table.
///
/// Input client order and count are preserved; callers sort if they need a
/// ranking by a particular key. Clients with no matching feedback get
/// `responses: 0, avg_rating: 0` rather than an error, and malformed client
/// records degrade to placeholder strings.
pub fn rank_client_performance(
    clients: &[Client],
    feedback: &[FeedbackRecord],
) -> Vec<ClientPerformance> {
    clients
        .iter()
        .map(|client| {
            let subset: Vec<&FeedbackRecord> = feedback
                .iter()
                .filter(|record| record.client_id == Some(client.id))
                .collect();

            let responses = subset.len();
            let avg_rating = if responses > 0 {
                let sum: f64 = subset.iter().map(|record| average_rating(&record.ratings)).sum();
                round1(sum / responses as f64)
            } else {
                0.0
            };

            let name = if client.name.trim().is_empty() {
                UNKNOWN_CLIENT.to_string()
            } else {
                client.name.clone()
            };
            let industry = client
                .industry
                .clone()
                .unwrap_or_else(|| "N/A".to_string());

            ClientPerformance {
                id: client.id,
                name,
                industry,
                responses,
                avg_rating,
                trend: trend_direction(feedback, ClientFilter::One(client.id), TREND_WINDOW_DAYS),
            }
        })
        .collect()
}
