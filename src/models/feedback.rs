//! Feedback records.
//!
//! A feedback record is one submitted response instance, optionally tied to a
//! client and a form. Records are immutable once submitted: there is no
//! update path, only create, read and delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{ClientId, FeedbackId, FormId};

/// Channel a feedback record arrived through.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    Website,
    Email,
    MobileApp,
    SocialMedia,
    InStore,
}

impl FeedbackSource {
    /// Display label used by distribution charts.
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackSource::Website => "Website",
            FeedbackSource::Email => "Email",
            FeedbackSource::MobileApp => "Mobile App",
            FeedbackSource::SocialMedia => "Social Media",
            FeedbackSource::InStore => "In-Store",
        }
    }

    /// All known sources, in chart display order.
    pub fn all() -> [FeedbackSource; 5] {
        [
            FeedbackSource::Website,
            FeedbackSource::Email,
            FeedbackSource::MobileApp,
            FeedbackSource::SocialMedia,
            FeedbackSource::InStore,
        ]
    }
}

/// One answered rating question inside a feedback record.
///
/// Records arriving from the record store may omit either field; the
/// aggregation engine treats a missing value as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingEntry {
    #[serde(default)]
    pub question_ref: Option<String>,
    #[serde(default)]
    pub value: Option<f64>,
}

impl RatingEntry {
    pub fn new(value: f64) -> Self {
        Self {
            question_ref: None,
            value: Some(value),
        }
    }
}

/// A submitted feedback record.
///
/// `client_id` is an unenforced reference: the referenced client may have
/// been deleted, leaving the record orphaned. Aggregations simply skip
/// orphans when grouping by client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub form_id: Option<FormId>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub source: Option<FeedbackSource>,
    #[serde(default)]
    pub ratings: Vec<RatingEntry>,
}

/// Fields accepted when submitting feedback.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFeedback {
    #[serde(default)]
    pub client_id: Option<ClientId>,
    #[serde(default)]
    pub form_id: Option<FormId>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default)]
    pub source: Option<FeedbackSource>,
    #[serde(default)]
    pub ratings: Vec<RatingEntry>,
}
