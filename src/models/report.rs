//! Report records and the report status state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ReportId;

/// Date ranges a report may cover, in days.
pub const ALLOWED_DATE_RANGES: [u16; 4] = [7, 30, 90, 365];

/// Kind of report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    FeedbackSummary,
    Analytics,
    ClientReport,
    Satisfaction,
    Nps,
}

impl std::str::FromStr for ReportType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feedback_summary" => Ok(ReportType::FeedbackSummary),
            "analytics" => Ok(ReportType::Analytics),
            "client_report" => Ok(ReportType::ClientReport),
            "satisfaction" => Ok(ReportType::Satisfaction),
            "nps" => Ok(ReportType::Nps),
            _ => Err(format!("Unknown report type: {}", s)),
        }
    }
}

/// Output format of a generated report.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    Pdf,
    Excel,
    Csv,
}

impl ReportFormat {
    /// File extension for download URLs.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Pdf => "pdf",
            ReportFormat::Excel => "xlsx",
            ReportFormat::Csv => "csv",
        }
    }
}

/// Generation status of a report.
///
/// Valid transitions: pending → completed, pending → failed, and
/// failed → pending (retry). Completed is terminal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    Completed,
    Failed,
}

impl ReportStatus {
    /// Whether moving from `self` to `next` is a legal transition.
    pub fn can_transition(&self, next: ReportStatus) -> bool {
        matches!(
            (self, next),
            (ReportStatus::Pending, ReportStatus::Completed)
                | (ReportStatus::Pending, ReportStatus::Failed)
                | (ReportStatus::Failed, ReportStatus::Pending)
        )
    }
}

/// A report record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    #[serde(default)]
    pub description: String,
    pub date_range_days: u16,
    pub format: ReportFormat,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_size_bytes: u64,
    #[serde(default)]
    pub download_count: u32,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Fields accepted when creating a report. New reports always start pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    pub title: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    #[serde(default)]
    pub description: String,
    pub date_range_days: u16,
    pub format: ReportFormat,
}

/// Partial update for a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<ReportStatus>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_size_bytes: Option<u64>,
    #[serde(default)]
    pub download_count: Option<u32>,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl Report {
    /// Apply a partial update in place. Status changes must already have been
    /// validated against [`ReportStatus::can_transition`].
    pub fn apply_patch(&mut self, patch: &ReportPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(completed_at) = patch.completed_at {
            self.completed_at = Some(completed_at);
        }
        if let Some(file_size_bytes) = patch.file_size_bytes {
            self.file_size_bytes = file_size_bytes;
        }
        if let Some(download_count) = patch.download_count {
            self.download_count = download_count;
        }
        if let Some(download_url) = &patch.download_url {
            self.download_url = Some(download_url.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(ReportStatus::Pending.can_transition(ReportStatus::Completed));
        assert!(ReportStatus::Pending.can_transition(ReportStatus::Failed));
        assert!(ReportStatus::Failed.can_transition(ReportStatus::Pending));

        assert!(!ReportStatus::Completed.can_transition(ReportStatus::Pending));
        assert!(!ReportStatus::Completed.can_transition(ReportStatus::Failed));
        assert!(!ReportStatus::Failed.can_transition(ReportStatus::Completed));
        assert!(!ReportStatus::Pending.can_transition(ReportStatus::Pending));
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(ReportFormat::Pdf.extension(), "pdf");
        assert_eq!(ReportFormat::Excel.extension(), "xlsx");
        assert_eq!(ReportFormat::Csv.extension(), "csv");
    }

    #[test]
    fn test_report_type_wire_name() {
        assert_eq!(
            serde_json::to_string(&ReportType::FeedbackSummary).unwrap(),
            "\"feedback_summary\""
        );
        assert_eq!(
            "client_report".parse::<ReportType>().unwrap(),
            ReportType::ClientReport
        );
    }
}
