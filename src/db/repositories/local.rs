//! In-memory local repository implementation.
//!
//! Stores all four record kinds in HashMaps behind a single lock, providing
//! fast, deterministic and isolated execution for unit tests, local
//! development and demo mode.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::api::{ClientId, FeedbackId, FormId, ReportId};
use crate::db::repository::*;
use crate::models::*;

/// In-memory local repository.
///
/// Clones share the underlying store.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    clients: HashMap<ClientId, Client>,
    feedback: HashMap<FeedbackId, FeedbackRecord>,
    forms: HashMap<FormId, Form>,
    reports: HashMap<ReportId, Report>,

    // ID counters
    next_client_id: i64,
    next_feedback_id: i64,
    next_form_id: i64,
    next_report_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            clients: HashMap::new(),
            feedback: HashMap::new(),
            forms: HashMap::new(),
            reports: HashMap::new(),
            next_client_id: 1,
            next_feedback_id: 1,
            next_form_id: 1,
            next_report_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        let mut data = self.data.write().unwrap();
        data.is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write().unwrap();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Number of clients stored.
    pub fn client_count(&self) -> usize {
        self.data.read().unwrap().clients.len()
    }

    /// Number of feedback records stored.
    pub fn feedback_count(&self) -> usize {
        self.data.read().unwrap().feedback.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        let data = self.data.read().unwrap();
        if !data.is_healthy {
            return Err(RepositoryError::connection("Record store is not healthy"));
        }
        Ok(())
    }

    fn now() -> DateTime<Utc> {
        Utc::now()
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Client Repository ====================

#[async_trait]
impl ClientRepository for LocalRepository {
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        let mut clients: Vec<Client> = data.clients.values().cloned().collect();
        clients.sort_by_key(|c| c.id);
        Ok(clients)
    }

    async fn list_clients_by_status(
        &self,
        status: ClientStatus,
    ) -> RepositoryResult<Vec<Client>> {
        let mut clients = self.list_clients().await?;
        clients.retain(|c| c.status == status);
        Ok(clients)
    }

    async fn get_client(&self, client_id: ClientId) -> RepositoryResult<Client> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        data.clients.get(&client_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("Client {} not found", client_id))
        })
    }

    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let id = ClientId::new(data.next_client_id);
        data.next_client_id += 1;

        let client = Client {
            id,
            name: new_client.name.clone(),
            email: new_client.email.clone(),
            company: new_client.company.clone(),
            phone: new_client.phone.clone(),
            industry: new_client.industry.clone(),
            status: new_client.status,
            tags: new_client.tags.clone(),
            created_at: Self::now(),
            last_contact: None,
            feedback_count: 0,
            average_rating: 0.0,
        };

        data.clients.insert(id, client.clone());
        Ok(client)
    }

    async fn update_client(
        &self,
        client_id: ClientId,
        patch: &ClientPatch,
    ) -> RepositoryResult<Client> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let client = data.clients.get_mut(&client_id).ok_or_else(|| {
            RepositoryError::not_found(format!("Client {} not found", client_id))
        })?;

        client.apply_patch(patch);
        Ok(client.clone())
    }

    async fn delete_client(&self, client_id: ClientId) -> RepositoryResult<bool> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        Ok(data.clients.remove(&client_id).is_some())
    }
}

// ==================== Feedback Repository ====================

#[async_trait]
impl FeedbackRepository for LocalRepository {
    async fn list_feedback(&self) -> RepositoryResult<Vec<FeedbackRecord>> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        let mut feedback: Vec<FeedbackRecord> = data.feedback.values().cloned().collect();
        feedback.sort_by_key(|f| f.id);
        Ok(feedback)
    }

    async fn list_feedback_for_client(
        &self,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<FeedbackRecord>> {
        let mut feedback = self.list_feedback().await?;
        feedback.retain(|f| f.client_id == Some(client_id));
        Ok(feedback)
    }

    async fn list_feedback_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<FeedbackRecord>> {
        let mut feedback = self.list_feedback().await?;
        feedback.retain(|f| f.submitted_at >= from && f.submitted_at < to);
        Ok(feedback)
    }

    async fn get_feedback(&self, feedback_id: FeedbackId) -> RepositoryResult<FeedbackRecord> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        data.feedback.get(&feedback_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("Feedback {} not found", feedback_id))
        })
    }

    async fn create_feedback(
        &self,
        new_feedback: &NewFeedback,
    ) -> RepositoryResult<FeedbackRecord> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let id = FeedbackId::new(data.next_feedback_id);
        data.next_feedback_id += 1;

        let record = FeedbackRecord {
            id,
            client_id: new_feedback.client_id,
            form_id: new_feedback.form_id,
            submitted_at: new_feedback.submitted_at,
            source: new_feedback.source,
            ratings: new_feedback.ratings.clone(),
        };

        data.feedback.insert(id, record.clone());
        Ok(record)
    }

    async fn delete_feedback(&self, feedback_id: FeedbackId) -> RepositoryResult<bool> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        Ok(data.feedback.remove(&feedback_id).is_some())
    }
}

// ==================== Form Repository ====================

#[async_trait]
impl FormRepository for LocalRepository {
    async fn list_forms(&self) -> RepositoryResult<Vec<Form>> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        let mut forms: Vec<Form> = data.forms.values().cloned().collect();
        forms.sort_by_key(|f| f.id);
        Ok(forms)
    }

    async fn list_forms_by_status(&self, status: FormStatus) -> RepositoryResult<Vec<Form>> {
        let mut forms = self.list_forms().await?;
        forms.retain(|f| f.status == status);
        Ok(forms)
    }

    async fn get_form(&self, form_id: FormId) -> RepositoryResult<Form> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        data.forms
            .get(&form_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("Form {} not found", form_id)))
    }

    async fn create_form(&self, new_form: &NewForm) -> RepositoryResult<Form> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let id = FormId::new(data.next_form_id);
        data.next_form_id += 1;
        let now = Self::now();

        let form = Form {
            id,
            title: new_form.title.clone(),
            description: new_form.description.clone(),
            category: new_form.category,
            status: new_form.status,
            questions: new_form.questions.clone(),
            created_at: now,
            last_modified: now,
            responses: 0,
        };

        data.forms.insert(id, form.clone());
        Ok(form)
    }

    async fn update_form(&self, form_id: FormId, patch: &FormPatch) -> RepositoryResult<Form> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let form = data
            .forms
            .get_mut(&form_id)
            .ok_or_else(|| RepositoryError::not_found(format!("Form {} not found", form_id)))?;

        form.apply_patch(patch);
        form.last_modified = Self::now();
        Ok(form.clone())
    }

    async fn delete_form(&self, form_id: FormId) -> RepositoryResult<bool> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        Ok(data.forms.remove(&form_id).is_some())
    }
}

// ==================== Report Repository ====================

#[async_trait]
impl ReportRepository for LocalRepository {
    async fn list_reports(&self) -> RepositoryResult<Vec<Report>> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        let mut reports: Vec<Report> = data.reports.values().cloned().collect();
        reports.sort_by_key(|r| r.id);
        Ok(reports)
    }

    async fn list_reports_by_type(
        &self,
        report_type: ReportType,
    ) -> RepositoryResult<Vec<Report>> {
        let mut reports = self.list_reports().await?;
        reports.retain(|r| r.report_type == report_type);
        Ok(reports)
    }

    async fn get_report(&self, report_id: ReportId) -> RepositoryResult<Report> {
        self.check_health()?;
        let data = self.data.read().unwrap();

        data.reports.get(&report_id).cloned().ok_or_else(|| {
            RepositoryError::not_found(format!("Report {} not found", report_id))
        })
    }

    async fn create_report(&self, new_report: &NewReport) -> RepositoryResult<Report> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let id = ReportId::new(data.next_report_id);
        data.next_report_id += 1;

        let report = Report {
            id,
            title: new_report.title.clone(),
            report_type: new_report.report_type,
            description: new_report.description.clone(),
            date_range_days: new_report.date_range_days,
            format: new_report.format,
            status: ReportStatus::Pending,
            created_at: Self::now(),
            completed_at: None,
            file_size_bytes: 0,
            download_count: 0,
            download_url: None,
        };

        data.reports.insert(id, report.clone());
        Ok(report)
    }

    async fn update_report(
        &self,
        report_id: ReportId,
        patch: &ReportPatch,
    ) -> RepositoryResult<Report> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();

        let report = data.reports.get_mut(&report_id).ok_or_else(|| {
            RepositoryError::not_found(format!("Report {} not found", report_id))
        })?;

        if let Some(next) = patch.status {
            if !report.status.can_transition(next) {
                return Err(RepositoryError::validation_with_context(
                    format!(
                        "Illegal report status transition {:?} -> {:?}",
                        report.status, next
                    ),
                    ErrorContext::new("update_report")
                        .with_entity("report")
                        .with_entity_id(report_id),
                ));
            }
        }

        report.apply_patch(patch);
        Ok(report.clone())
    }

    async fn delete_report(&self, report_id: ReportId) -> RepositoryResult<bool> {
        self.check_health()?;
        let mut data = self.data.write().unwrap();
        Ok(data.reports.remove(&report_id).is_some())
    }
}

#[async_trait]
impl FullRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client(name: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            company: None,
            phone: None,
            industry: None,
            status: ClientStatus::Active,
            tags: vec![],
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_and_get_client() {
        let repo = LocalRepository::new();

        let created = repo.create_client(&new_client("Acme")).await.unwrap();
        assert_eq!(created.id, ClientId::new(1));
        assert_eq!(created.feedback_count, 0);

        let fetched = repo.get_client(created.id).await.unwrap();
        assert_eq!(fetched.name, "Acme");
    }

    #[tokio::test]
    async fn test_list_clients_sorted_by_id() {
        let repo = LocalRepository::new();
        repo.create_client(&new_client("B")).await.unwrap();
        repo.create_client(&new_client("A")).await.unwrap();

        let clients = repo.list_clients().await.unwrap();
        assert_eq!(clients.len(), 2);
        assert!(clients[0].id < clients[1].id);
    }

    #[tokio::test]
    async fn test_not_found_error() {
        let repo = LocalRepository::new();

        let result = repo.get_client(ClientId::new(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_unhealthy_repo_rejects_operations() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let result = repo.list_clients().await;
        assert!(matches!(result, Err(RepositoryError::ConnectionError { .. })));
    }

    #[tokio::test]
    async fn test_delete_reports_whether_record_existed() {
        let repo = LocalRepository::new();
        let created = repo.create_client(&new_client("Acme")).await.unwrap();

        assert!(repo.delete_client(created.id).await.unwrap());
        assert!(!repo.delete_client(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_report_status_machine_enforced() {
        let repo = LocalRepository::new();
        let report = repo
            .create_report(&NewReport {
                title: "Monthly".to_string(),
                report_type: ReportType::FeedbackSummary,
                description: String::new(),
                date_range_days: 30,
                format: ReportFormat::Csv,
            })
            .await
            .unwrap();
        assert_eq!(report.status, ReportStatus::Pending);

        let completed = repo
            .update_report(
                report.id,
                &ReportPatch {
                    status: Some(ReportStatus::Completed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(completed.status, ReportStatus::Completed);

        let result = repo
            .update_report(
                report.id,
                &ReportPatch {
                    status: Some(ReportStatus::Pending),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::ValidationError { .. })));
    }

    #[tokio::test]
    async fn test_clear_resets_counters() {
        let repo = LocalRepository::new();
        repo.create_client(&new_client("Acme")).await.unwrap();
        repo.clear();

        assert_eq!(repo.client_count(), 0);
        let recreated = repo.create_client(&new_client("Blue")).await.unwrap();
        assert_eq!(recreated.id, ClientId::new(1));
    }
}
