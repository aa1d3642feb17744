//! HTTP client for the remote record-store API.
//!
//! The record store exposes generic table CRUD under
//! `/v1/tables/{table}/records`; this client owns the wire concerns
//! (headers, timeouts, status mapping, bounded retry) and stays agnostic of
//! the record shapes it moves.

use std::time::Duration;

use log::warn;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::RemoteConfig;
use crate::db::repository::{ErrorContext, RepositoryError, RepositoryResult};

/// Thin client over the record-store HTTP API.
#[derive(Clone)]
pub struct RecordStoreClient {
    http: reqwest::Client,
    config: RemoteConfig,
}

#[derive(Serialize)]
struct DeleteBody<'a> {
    record_ids: &'a [i64],
}

#[derive(serde::Deserialize)]
struct DeleteResponse {
    deleted: u64,
}

impl RecordStoreClient {
    /// Build a client from connection settings.
    pub fn new(config: RemoteConfig) -> RepositoryResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_sec))
            .build()
            .map_err(|e| RepositoryError::configuration(format!("HTTP client build failed: {}", e)))?;

        Ok(Self { http, config })
    }

    fn records_url(&self, table: &str) -> String {
        format!(
            "{}/v1/tables/{}/records",
            self.config.base_url.trim_end_matches('/'),
            table
        )
    }

    fn record_url(&self, table: &str, id: i64) -> String {
        format!("{}/{}", self.records_url(table), id)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("x-project-id", &self.config.project_id)
            .bearer_auth(&self.config.api_key)
    }

    /// Map a non-success HTTP status to a repository error.
    async fn status_error(response: Response, context: ErrorContext) -> RepositoryError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = if body.is_empty() {
            status.to_string()
        } else {
            format!("{}: {}", status, body)
        };

        match status {
            StatusCode::NOT_FOUND => RepositoryError::not_found_with_context(message, context),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                RepositoryError::validation_with_context(message, context)
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                RepositoryError::ConfigurationError {
                    message,
                    context,
                }
            }
            s if s.is_server_error() => {
                RepositoryError::query_with_context(message, context.retryable())
            }
            _ => RepositoryError::query_with_context(message, context),
        }
    }

    /// Send a request, retrying retryable failures with linear backoff.
    ///
    /// The builder must be cloneable, which holds for all JSON-body requests
    /// this client issues.
    async fn send_with_retry(
        &self,
        builder: RequestBuilder,
        context: ErrorContext,
    ) -> RepositoryResult<Response> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let request = builder
                .try_clone()
                .ok_or_else(|| RepositoryError::internal("Request body is not cloneable"))?;

            let err = match request.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => Self::status_error(response, context.clone()).await,
                Err(e) => RepositoryError::from(e),
            };

            if err.is_retryable() && attempt <= self.config.max_retries {
                warn!(
                    "record store request failed (attempt {}/{}): {}",
                    attempt, self.config.max_retries, err
                );
                let delay = self.config.retry_delay_ms * attempt as u64;
                tokio::time::sleep(Duration::from_millis(delay)).await;
            } else {
                return Err(err);
            }
        }
    }

    /// Fetch all records of a table, optionally filtered by query parameters.
    pub async fn fetch_records<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> RepositoryResult<Vec<T>> {
        let context = ErrorContext::new("fetch_records").with_entity(table);
        let builder = self.request(Method::GET, &self.records_url(table)).query(query);

        let response = self.send_with_retry(builder, context).await?;
        Ok(response.json().await.map_err(RepositoryError::from)?)
    }

    /// Fetch one record by id.
    pub async fn fetch_record<T: DeserializeOwned>(
        &self,
        table: &str,
        id: i64,
    ) -> RepositoryResult<T> {
        let context = ErrorContext::new("fetch_record")
            .with_entity(table)
            .with_entity_id(id);
        let builder = self.request(Method::GET, &self.record_url(table, id));

        let response = self.send_with_retry(builder, context).await?;
        Ok(response.json().await.map_err(RepositoryError::from)?)
    }

    /// Create a record; the server echoes the stored record including its
    /// assigned id.
    pub async fn create_record<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        body: &B,
    ) -> RepositoryResult<T> {
        let context = ErrorContext::new("create_record").with_entity(table);
        let builder = self.request(Method::POST, &self.records_url(table)).json(body);

        let response = self.send_with_retry(builder, context).await?;
        Ok(response.json().await.map_err(RepositoryError::from)?)
    }

    /// Apply a partial update to a record.
    pub async fn update_record<T: DeserializeOwned, B: Serialize>(
        &self,
        table: &str,
        id: i64,
        body: &B,
    ) -> RepositoryResult<T> {
        let context = ErrorContext::new("update_record")
            .with_entity(table)
            .with_entity_id(id);
        let builder = self
            .request(Method::PATCH, &self.record_url(table, id))
            .json(body);

        let response = self.send_with_retry(builder, context).await?;
        Ok(response.json().await.map_err(RepositoryError::from)?)
    }

    /// Delete records by id. Returns how many records the store removed.
    pub async fn delete_records(&self, table: &str, ids: &[i64]) -> RepositoryResult<u64> {
        let context = ErrorContext::new("delete_records").with_entity(table);
        let builder = self
            .request(Method::DELETE, &self.records_url(table))
            .json(&DeleteBody { record_ids: ids });

        let response = self.send_with_retry(builder, context).await?;
        let body: DeleteResponse = response.json().await.map_err(RepositoryError::from)?;
        Ok(body.deleted)
    }

    /// Probe the record store's health endpoint.
    pub async fn health(&self) -> RepositoryResult<bool> {
        let url = format!("{}/health", self.config.base_url.trim_end_matches('/'));
        let builder = self.request(Method::GET, &url);

        match self.send_with_retry(builder, ErrorContext::new("health")).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_retryable() => Ok(false),
            Err(e) => Err(e),
        }
    }
}
