//! Repository implementation backed by the remote record store.
//!
//! Table names match the record-store schema: `client`, `feedback`,
//! `feedback_form` and `report`. Records travel in their domain shape; the
//! store assigns ids and stamps write timestamps.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::client::RecordStoreClient;
use super::RemoteConfig;
use crate::api::{ClientId, FeedbackId, FormId, ReportId};
use crate::db::repository::*;
use crate::models::*;

const CLIENT_TABLE: &str = "client";
const FEEDBACK_TABLE: &str = "feedback";
const FORM_TABLE: &str = "feedback_form";
const REPORT_TABLE: &str = "report";

/// Record-store-backed repository.
#[derive(Clone)]
pub struct RemoteRepository {
    store: RecordStoreClient,
}

impl RemoteRepository {
    /// Build a repository from connection settings.
    pub fn new(config: RemoteConfig) -> RepositoryResult<Self> {
        Ok(Self {
            store: RecordStoreClient::new(config)?,
        })
    }

    /// Access the underlying client, e.g. for health probes.
    pub fn store(&self) -> &RecordStoreClient {
        &self.store
    }
}

// ==================== Client Repository ====================

#[async_trait]
impl ClientRepository for RemoteRepository {
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        self.store.fetch_records(CLIENT_TABLE, &[]).await
    }

    async fn list_clients_by_status(
        &self,
        status: ClientStatus,
    ) -> RepositoryResult<Vec<Client>> {
        self.store
            .fetch_records(CLIENT_TABLE, &[("status", status.as_str().to_string())])
            .await
    }

    async fn get_client(&self, client_id: ClientId) -> RepositoryResult<Client> {
        self.store.fetch_record(CLIENT_TABLE, client_id.value()).await
    }

    async fn create_client(&self, new_client: &NewClient) -> RepositoryResult<Client> {
        self.store.create_record(CLIENT_TABLE, new_client).await
    }

    async fn update_client(
        &self,
        client_id: ClientId,
        patch: &ClientPatch,
    ) -> RepositoryResult<Client> {
        self.store
            .update_record(CLIENT_TABLE, client_id.value(), patch)
            .await
    }

    async fn delete_client(&self, client_id: ClientId) -> RepositoryResult<bool> {
        let deleted = self
            .store
            .delete_records(CLIENT_TABLE, &[client_id.value()])
            .await?;
        Ok(deleted > 0)
    }
}

// ==================== Feedback Repository ====================

#[async_trait]
impl FeedbackRepository for RemoteRepository {
    async fn list_feedback(&self) -> RepositoryResult<Vec<FeedbackRecord>> {
        self.store.fetch_records(FEEDBACK_TABLE, &[]).await
    }

    async fn list_feedback_for_client(
        &self,
        client_id: ClientId,
    ) -> RepositoryResult<Vec<FeedbackRecord>> {
        self.store
            .fetch_records(
                FEEDBACK_TABLE,
                &[("client_id", client_id.value().to_string())],
            )
            .await
    }

    async fn list_feedback_in_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> RepositoryResult<Vec<FeedbackRecord>> {
        self.store
            .fetch_records(
                FEEDBACK_TABLE,
                &[
                    ("submitted_from", from.to_rfc3339()),
                    ("submitted_to", to.to_rfc3339()),
                ],
            )
            .await
    }

    async fn get_feedback(&self, feedback_id: FeedbackId) -> RepositoryResult<FeedbackRecord> {
        self.store
            .fetch_record(FEEDBACK_TABLE, feedback_id.value())
            .await
    }

    async fn create_feedback(
        &self,
        new_feedback: &NewFeedback,
    ) -> RepositoryResult<FeedbackRecord> {
        self.store.create_record(FEEDBACK_TABLE, new_feedback).await
    }

    async fn delete_feedback(&self, feedback_id: FeedbackId) -> RepositoryResult<bool> {
        let deleted = self
            .store
            .delete_records(FEEDBACK_TABLE, &[feedback_id.value()])
            .await?;
        Ok(deleted > 0)
    }
}

// ==================== Form Repository ====================

#[async_trait]
impl FormRepository for RemoteRepository {
    async fn list_forms(&self) -> RepositoryResult<Vec<Form>> {
        self.store.fetch_records(FORM_TABLE, &[]).await
    }

    async fn list_forms_by_status(&self, status: FormStatus) -> RepositoryResult<Vec<Form>> {
        self.store
            .fetch_records(FORM_TABLE, &[("status", status.as_str().to_string())])
            .await
    }

    async fn get_form(&self, form_id: FormId) -> RepositoryResult<Form> {
        self.store.fetch_record(FORM_TABLE, form_id.value()).await
    }

    async fn create_form(&self, new_form: &NewForm) -> RepositoryResult<Form> {
        self.store.create_record(FORM_TABLE, new_form).await
    }

    async fn update_form(&self, form_id: FormId, patch: &FormPatch) -> RepositoryResult<Form> {
        self.store
            .update_record(FORM_TABLE, form_id.value(), patch)
            .await
    }

    async fn delete_form(&self, form_id: FormId) -> RepositoryResult<bool> {
        let deleted = self
            .store
            .delete_records(FORM_TABLE, &[form_id.value()])
            .await?;
        Ok(deleted > 0)
    }
}

// ==================== Report Repository ====================

#[async_trait]
impl ReportRepository for RemoteRepository {
    async fn list_reports(&self) -> RepositoryResult<Vec<Report>> {
        self.store.fetch_records(REPORT_TABLE, &[]).await
    }

    async fn list_reports_by_type(
        &self,
        report_type: ReportType,
    ) -> RepositoryResult<Vec<Report>> {
        let type_name = serde_json::to_value(report_type)
            .map_err(|e| RepositoryError::internal(e.to_string()))?
            .as_str()
            .unwrap_or_default()
            .to_string();
        self.store
            .fetch_records(REPORT_TABLE, &[("type", type_name)])
            .await
    }

    async fn get_report(&self, report_id: ReportId) -> RepositoryResult<Report> {
        self.store.fetch_record(REPORT_TABLE, report_id.value()).await
    }

    async fn create_report(&self, new_report: &NewReport) -> RepositoryResult<Report> {
        self.store.create_record(REPORT_TABLE, new_report).await
    }

    async fn update_report(
        &self,
        report_id: ReportId,
        patch: &ReportPatch,
    ) -> RepositoryResult<Report> {
        // The state machine is validated client-side too, so an illegal
        // transition fails identically on both backends.
        if let Some(next) = patch.status {
            let current: Report = self
                .store
                .fetch_record(REPORT_TABLE, report_id.value())
                .await?;
            if !current.status.can_transition(next) {
                return Err(RepositoryError::validation_with_context(
                    format!(
                        "Illegal report status transition {:?} -> {:?}",
                        current.status, next
                    ),
                    ErrorContext::new("update_report")
                        .with_entity("report")
                        .with_entity_id(report_id),
                ));
            }
        }

        self.store
            .update_record(REPORT_TABLE, report_id.value(), patch)
            .await
    }

    async fn delete_report(&self, report_id: ReportId) -> RepositoryResult<bool> {
        let deleted = self
            .store
            .delete_records(REPORT_TABLE, &[report_id.value()])
            .await?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl FullRepository for RemoteRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.store.health().await
    }
}
