//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Most analytics DTOs are re-exported from the routes module since they
//! already derive Serialize/Deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Performance
    ClientPerformance,
    // Summary
    DashboardMetrics,
    // Distribution
    DistributionSlice,
    // Trends
    TrendSeries,
    TrendSeriesData,
};
pub use crate::db::services::{BulkItemFailure, BulkOutcome};
pub use crate::models::{
    Client, ClientPatch, ClientStatus, FeedbackRecord, Form, FormPatch, NewClient, NewFeedback,
    NewForm, NewReport, Report,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Record store connection status
    pub record_store: String,
}

/// Client list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientListResponse {
    pub clients: Vec<Client>,
    pub total: usize,
}

/// Feedback list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackListResponse {
    pub feedback: Vec<FeedbackRecord>,
    pub total: usize,
}

/// Form list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormListResponse {
    pub forms: Vec<Form>,
    pub total: usize,
}

/// Report list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportListResponse {
    pub reports: Vec<Report>,
    pub total: usize,
}

/// Query parameters for client listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ClientListQuery {
    /// Filter by status ("active", "inactive", "pending", "blocked")
    #[serde(default)]
    pub status: Option<String>,
}

/// Query parameters for feedback listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FeedbackListQuery {
    /// Filter by client id
    #[serde(default)]
    pub client: Option<i64>,
    /// Inclusive lower bound on submission time
    #[serde(default)]
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on submission time
    #[serde(default)]
    pub to: Option<DateTime<Utc>>,
}

/// Query parameters for form listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FormListQuery {
    /// Filter by status ("draft", "published", "archived")
    #[serde(default)]
    pub status: Option<String>,
}

/// Query parameters for report listing.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReportListQuery {
    /// Filter by report type (wire names, e.g. "feedback_summary")
    #[serde(rename = "type", default)]
    pub report_type: Option<String>,
}

/// Query parameters for the trends endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TrendsQuery {
    /// Restrict to one client id; omitted means all clients
    #[serde(default)]
    pub client: Option<i64>,
    /// Trailing window size in days (7, 30 or 90; default 30)
    #[serde(default)]
    pub window: Option<usize>,
}

/// Request body for bulk deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<i64>,
}

/// Request body for bulk status updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkStatusRequest {
    pub ids: Vec<i64>,
    pub status: ClientStatus,
}
