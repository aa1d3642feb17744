//! Feedback form records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::FormId;

/// Publication status of a form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Draft,
    Published,
    Archived,
}

impl FormStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormStatus::Draft => "draft",
            FormStatus::Published => "published",
            FormStatus::Archived => "archived",
        }
    }
}

impl std::str::FromStr for FormStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(FormStatus::Draft),
            "published" => Ok(FormStatus::Published),
            "archived" => Ok(FormStatus::Archived),
            _ => Err(format!("Unknown form status: {}", s)),
        }
    }
}

/// Category a form belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormCategory {
    Satisfaction,
    Nps,
    Product,
    Service,
    Event,
}

/// Question kinds a form can contain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Rating,
    Text,
    Scale,
    Multiple,
}

/// One question inside a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormQuestion {
    pub id: i64,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// A feedback form.
///
/// `responses` counts submissions referencing this form; it is maintained by
/// the service layer, not edited directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: FormCategory,
    pub status: FormStatus,
    #[serde(default)]
    pub questions: Vec<FormQuestion>,
    pub created_at: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(default)]
    pub responses: u32,
}

/// Fields accepted when creating a form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewForm {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: FormCategory,
    #[serde(default = "default_form_status")]
    pub status: FormStatus,
    #[serde(default)]
    pub questions: Vec<FormQuestion>,
}

fn default_form_status() -> FormStatus {
    FormStatus::Draft
}

/// Partial update for a form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<FormCategory>,
    #[serde(default)]
    pub status: Option<FormStatus>,
    #[serde(default)]
    pub questions: Option<Vec<FormQuestion>>,
    #[serde(default)]
    pub responses: Option<u32>,
}

impl Form {
    /// Apply a partial update in place. Does not touch `last_modified`;
    /// storage backends stamp that on write.
    pub fn apply_patch(&mut self, patch: &FormPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(questions) = &patch.questions {
            self.questions = questions.clone();
        }
        if let Some(responses) = patch.responses {
            self.responses = responses;
        }
    }
}
