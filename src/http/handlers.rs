//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for business logic. Handlers own request validation and the mapping
//! of query parameters onto service inputs.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::dto::*;
use super::error::AppError;
use super::state::AppState;
use crate::api::{ClientFilter, ClientId, FeedbackId, FormId, ReportId, TrendOptions};
use crate::db::repository::{
    ClientRepository, FeedbackRepository, FormRepository, ReportRepository,
};
use crate::db::services as db_services;
use crate::models::{ClientStatus, FormStatus, ReportType};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Trailing windows the trends endpoint accepts.
const ALLOWED_TREND_WINDOWS: [usize; 3] = [7, 30, 90];

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the record
/// store is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        record_store: store_status,
    }))
}

// =============================================================================
// Clients
// =============================================================================

/// GET /v1/clients
pub async fn list_clients(
    State(state): State<AppState>,
    Query(query): Query<ClientListQuery>,
) -> HandlerResult<ClientListResponse> {
    let repo = state.repository.as_ref();
    let clients = match query.status {
        Some(raw) => {
            let status: ClientStatus = raw.parse().map_err(AppError::BadRequest)?;
            repo.list_clients_by_status(status).await?
        }
        None => repo.list_clients().await?,
    };

    let total = clients.len();
    Ok(Json(ClientListResponse { clients, total }))
}

/// POST /v1/clients
pub async fn create_client(
    State(state): State<AppState>,
    Json(request): Json<NewClient>,
) -> Result<(StatusCode, Json<Client>), AppError> {
    if request.name.trim().is_empty() || request.email.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Name and email are required".to_string(),
        ));
    }

    let client = db_services::create_client(state.repository.as_ref(), &request).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /v1/clients/{id}
pub async fn get_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Client> {
    let client = state.repository.get_client(ClientId::new(id)).await?;
    Ok(Json(client))
}

/// PATCH /v1/clients/{id}
pub async fn update_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ClientPatch>,
) -> HandlerResult<Client> {
    let client = state
        .repository
        .update_client(ClientId::new(id), &patch)
        .await?;
    Ok(Json(client))
}

/// DELETE /v1/clients/{id}
pub async fn delete_client(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_client(state.repository.as_ref(), ClientId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/clients/bulk-delete
pub async fn bulk_delete_clients(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteRequest>,
) -> HandlerResult<BulkOutcome> {
    let ids: Vec<ClientId> = request.ids.iter().copied().map(ClientId::new).collect();
    let outcome = db_services::delete_clients_bulk(state.repository.as_ref(), &ids).await;
    Ok(Json(outcome))
}

/// POST /v1/clients/bulk-status
pub async fn bulk_update_client_status(
    State(state): State<AppState>,
    Json(request): Json<BulkStatusRequest>,
) -> HandlerResult<BulkOutcome> {
    let ids: Vec<ClientId> = request.ids.iter().copied().map(ClientId::new).collect();
    let outcome =
        db_services::update_client_status_bulk(state.repository.as_ref(), &ids, request.status)
            .await;
    Ok(Json(outcome))
}

// =============================================================================
// Feedback
// =============================================================================

/// GET /v1/feedback
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(query): Query<FeedbackListQuery>,
) -> HandlerResult<FeedbackListResponse> {
    let repo = state.repository.as_ref();
    let feedback = match (query.client, query.from, query.to) {
        (Some(client), None, None) => {
            repo.list_feedback_for_client(ClientId::new(client)).await?
        }
        (None, Some(from), Some(to)) => repo.list_feedback_in_range(from, to).await?,
        (None, None, None) => repo.list_feedback().await?,
        _ => {
            return Err(AppError::BadRequest(
                "Filter by client or by a complete from/to range, not both".to_string(),
            ))
        }
    };

    let total = feedback.len();
    Ok(Json(FeedbackListResponse { feedback, total }))
}

/// POST /v1/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<NewFeedback>,
) -> Result<(StatusCode, Json<FeedbackRecord>), AppError> {
    let record = db_services::submit_feedback(state.repository.as_ref(), &request).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /v1/feedback/{id}
pub async fn get_feedback(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<FeedbackRecord> {
    let record = state.repository.get_feedback(FeedbackId::new(id)).await?;
    Ok(Json(record))
}

/// DELETE /v1/feedback/{id}
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_feedback(state.repository.as_ref(), FeedbackId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Forms
// =============================================================================

/// GET /v1/forms
pub async fn list_forms(
    State(state): State<AppState>,
    Query(query): Query<FormListQuery>,
) -> HandlerResult<FormListResponse> {
    let repo = state.repository.as_ref();
    let forms = match query.status {
        Some(raw) => {
            let status: FormStatus = raw.parse().map_err(AppError::BadRequest)?;
            repo.list_forms_by_status(status).await?
        }
        None => repo.list_forms().await?,
    };

    let total = forms.len();
    Ok(Json(FormListResponse { forms, total }))
}

/// POST /v1/forms
pub async fn create_form(
    State(state): State<AppState>,
    Json(request): Json<NewForm>,
) -> Result<(StatusCode, Json<Form>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::BadRequest("Form title is required".to_string()));
    }

    let form = state.repository.create_form(&request).await?;
    Ok((StatusCode::CREATED, Json(form)))
}

/// GET /v1/forms/{id}
pub async fn get_form(State(state): State<AppState>, Path(id): Path<i64>) -> HandlerResult<Form> {
    let form = state.repository.get_form(FormId::new(id)).await?;
    Ok(Json(form))
}

/// PATCH /v1/forms/{id}
pub async fn update_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<FormPatch>,
) -> HandlerResult<Form> {
    let form = state.repository.update_form(FormId::new(id), &patch).await?;
    Ok(Json(form))
}

/// DELETE /v1/forms/{id}
pub async fn delete_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_form(state.repository.as_ref(), FormId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/forms/{id}/publish
pub async fn publish_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Form> {
    let form = db_services::publish_form(state.repository.as_ref(), FormId::new(id)).await?;
    Ok(Json(form))
}

/// POST /v1/forms/{id}/archive
pub async fn archive_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Form> {
    let form = db_services::archive_form(state.repository.as_ref(), FormId::new(id)).await?;
    Ok(Json(form))
}

/// POST /v1/forms/bulk-delete
pub async fn bulk_delete_forms(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteRequest>,
) -> HandlerResult<BulkOutcome> {
    let ids: Vec<FormId> = request.ids.iter().copied().map(FormId::new).collect();
    let outcome = db_services::delete_forms_bulk(state.repository.as_ref(), &ids).await;
    Ok(Json(outcome))
}

// =============================================================================
// Reports
// =============================================================================

/// GET /v1/reports
pub async fn list_reports(
    State(state): State<AppState>,
    Query(query): Query<ReportListQuery>,
) -> HandlerResult<ReportListResponse> {
    let report_type = match query.report_type {
        Some(raw) => Some(raw.parse::<ReportType>().map_err(AppError::BadRequest)?),
        None => None,
    };

    let reports = db_services::list_reports(state.repository.as_ref(), report_type).await?;
    let total = reports.len();
    Ok(Json(ReportListResponse { reports, total }))
}

/// POST /v1/reports
///
/// Creates the report and immediately generates its content, matching the
/// dashboard's create-then-generate flow.
pub async fn create_report(
    State(state): State<AppState>,
    Json(request): Json<NewReport>,
) -> Result<(StatusCode, Json<Report>), AppError> {
    if request.title.trim().is_empty() {
        return Err(AppError::BadRequest("Report title is required".to_string()));
    }

    let repo = state.repository.as_ref();
    let report = db_services::create_report(repo, &request).await?;
    let report = db_services::generate_report(repo, report.id, Utc::now()).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// GET /v1/reports/{id}
pub async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Report> {
    let report = state.repository.get_report(ReportId::new(id)).await?;
    Ok(Json(report))
}

/// DELETE /v1/reports/{id}
pub async fn delete_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    db_services::delete_report(state.repository.as_ref(), ReportId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/reports/{id}/generate
pub async fn generate_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Report> {
    let report =
        db_services::generate_report(state.repository.as_ref(), ReportId::new(id), Utc::now())
            .await?;
    Ok(Json(report))
}

/// POST /v1/reports/{id}/retry
pub async fn retry_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Report> {
    let report =
        db_services::retry_report(state.repository.as_ref(), ReportId::new(id), Utc::now())
            .await?;
    Ok(Json(report))
}

/// POST /v1/reports/{id}/download
pub async fn download_report(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<Report> {
    let report =
        db_services::download_report(state.repository.as_ref(), ReportId::new(id)).await?;
    Ok(Json(report))
}

/// POST /v1/reports/bulk-delete
pub async fn bulk_delete_reports(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteRequest>,
) -> HandlerResult<BulkOutcome> {
    let ids: Vec<ReportId> = request.ids.iter().copied().map(ReportId::new).collect();
    let outcome = db_services::delete_reports_bulk(state.repository.as_ref(), &ids).await;
    Ok(Json(outcome))
}

// =============================================================================
// Analytics
// =============================================================================

/// GET /v1/analytics/summary
pub async fn get_dashboard_summary(
    State(state): State<AppState>,
) -> HandlerResult<DashboardMetrics> {
    let metrics = db_services::dashboard_summary(state.repository.as_ref()).await?;
    Ok(Json(metrics))
}

/// GET /v1/analytics/trends
pub async fn get_trend_series(
    State(state): State<AppState>,
    Query(query): Query<TrendsQuery>,
) -> HandlerResult<TrendSeriesData> {
    let window_days = query.window.unwrap_or(30);
    if !ALLOWED_TREND_WINDOWS.contains(&window_days) {
        return Err(AppError::BadRequest(format!(
            "Unsupported trend window: {} days",
            window_days
        )));
    }

    let opts = TrendOptions {
        client_filter: match query.client {
            Some(id) => ClientFilter::One(ClientId::new(id)),
            None => ClientFilter::All,
        },
        window_days,
    };

    let data = db_services::trend_series(state.repository.as_ref(), &opts).await?;
    Ok(Json(data))
}

/// GET /v1/analytics/performance
pub async fn get_client_performance(
    State(state): State<AppState>,
) -> HandlerResult<Vec<ClientPerformance>> {
    let rows = db_services::client_performance(state.repository.as_ref()).await?;
    Ok(Json(rows))
}

/// GET /v1/analytics/satisfaction
pub async fn get_satisfaction_distribution(
    State(state): State<AppState>,
) -> HandlerResult<Vec<DistributionSlice>> {
    let slices = db_services::satisfaction_breakdown(state.repository.as_ref()).await?;
    Ok(Json(slices))
}

/// GET /v1/analytics/sources
pub async fn get_source_distribution(
    State(state): State<AppState>,
) -> HandlerResult<Vec<DistributionSlice>> {
    let slices = db_services::source_breakdown(state.repository.as_ref()).await?;
    Ok(Json(slices))
}
