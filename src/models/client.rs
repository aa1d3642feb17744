//! Client records and their lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ClientId;

/// Lifecycle status of a client account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    Active,
    Inactive,
    Pending,
    Blocked,
}

impl ClientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClientStatus::Active => "active",
            ClientStatus::Inactive => "inactive",
            ClientStatus::Pending => "pending",
            ClientStatus::Blocked => "blocked",
        }
    }
}

impl std::str::FromStr for ClientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ClientStatus::Active),
            "inactive" => Ok(ClientStatus::Inactive),
            "pending" => Ok(ClientStatus::Pending),
            "blocked" => Ok(ClientStatus::Blocked),
            _ => Err(format!("Unknown client status: {}", s)),
        }
    }
}

/// A client account.
///
/// `feedback_count` and `average_rating` are derived fields maintained by the
/// service layer whenever feedback is submitted; they are never edited
/// directly by operators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    pub status: ClientStatus,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_contact: Option<DateTime<Utc>>,
    #[serde(default)]
    pub feedback_count: u32,
    #[serde(default)]
    pub average_rating: f64,
}

/// Fields accepted when creating a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default = "default_status")]
    pub status: ClientStatus,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_status() -> ClientStatus {
    ClientStatus::Active
}

/// Partial update for a client. `Some` fields are applied, `None` fields are
/// left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub status: Option<ClientStatus>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub last_contact: Option<DateTime<Utc>>,
    #[serde(default)]
    pub feedback_count: Option<u32>,
    #[serde(default)]
    pub average_rating: Option<f64>,
}

impl Client {
    /// Apply a partial update in place.
    pub fn apply_patch(&mut self, patch: &ClientPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(company) = &patch.company {
            self.company = Some(company.clone());
        }
        if let Some(phone) = &patch.phone {
            self.phone = Some(phone.clone());
        }
        if let Some(industry) = &patch.industry {
            self.industry = Some(industry.clone());
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(last_contact) = patch.last_contact {
            self.last_contact = Some(last_contact);
        }
        if let Some(feedback_count) = patch.feedback_count {
            self.feedback_count = feedback_count;
        }
        if let Some(average_rating) = patch.average_rating {
            self.average_rating = average_rating;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_client() -> Client {
        Client {
            id: ClientId::new(1),
            name: "Acme".to_string(),
            email: "ops@acme.example".to_string(),
            company: Some("Acme Corp".to_string()),
            phone: None,
            industry: Some("Retail".to_string()),
            status: ClientStatus::Active,
            tags: vec![],
            created_at: Utc::now(),
            last_contact: None,
            feedback_count: 0,
            average_rating: 0.0,
        }
    }

    #[test]
    fn test_status_serde_snake_case() {
        assert_eq!(
            serde_json::to_string(&ClientStatus::Blocked).unwrap(),
            "\"blocked\""
        );
        let status: ClientStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(status, ClientStatus::Pending);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Active".parse::<ClientStatus>().unwrap(), ClientStatus::Active);
        assert!("gone".parse::<ClientStatus>().is_err());
    }

    #[test]
    fn test_apply_patch_only_touches_set_fields() {
        let mut client = sample_client();
        client.apply_patch(&ClientPatch {
            status: Some(ClientStatus::Inactive),
            feedback_count: Some(3),
            ..Default::default()
        });

        assert_eq!(client.status, ClientStatus::Inactive);
        assert_eq!(client.feedback_count, 3);
        assert_eq!(client.name, "Acme");
        assert_eq!(client.industry.as_deref(), Some("Retail"));
    }

    #[test]
    fn test_new_client_defaults_to_active() {
        let new: NewClient =
            serde_json::from_str(r#"{"name":"N","email":"n@example.com"}"#).unwrap();
        assert_eq!(new.status, ClientStatus::Active);
        assert!(new.tags.is_empty());
    }
}
