// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState, WebSocketUpgrade},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use clap::Parser;
use crate::live::NotificationBroadcaster;
use fairline_api::{
    ApiError, ApiResult, BulkResumeResponse, Caller, CancelInscriptionResponse,
    CompanyDashboardResponse, CompleteInterviewResponse, CreateCompanyRequest,
    CreateCompanyResponse, DeleteStudentResponse, ForceInscribeRequest, GetStudentResponse,
    InscribeRequest, InscribeResponse, ListCompaniesAdminResponse, ListCompaniesResponse,
    ListOpportunitiesResponse, RegenerateTokenResponse, RegisterStudentRequest,
    RegisterStudentResponse, ReorderQueueRequest, ReorderQueueResponse, SetCapacityRequest,
    SetCapacityResponse, SetCompanyStatusRequest, SetCompanyStatusResponse,
    SetStudentStatusRequest, SetStudentStatusResponse, StartInterviewResponse, bulk_resume,
    cancel_inscription, complete_interview, create_company, delete_student, force_inscribe,
    get_company_dashboard, get_company_queue, get_student, inscribe, list_companies,
    list_companies_admin, list_student_opportunities, pause_company, regenerate_token,
    register_student, reorder_queue, resume_company, set_capacity, set_company_status,
    set_student_status, start_interview, verify_admin_key,
};
use fairline_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Fairline Server - HTTP server for the job-fair interview queue
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Bcrypt hash of the admin key. Falls back to the
    /// `FAIRLINE_ADMIN_KEY_HASH` environment variable.
    #[arg(long)]
    admin_key_hash: Option<String>,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a `Mutex` so each request's
/// load-apply-commit sequence runs without interleaving. Notifications
/// are published to the broadcaster only after the lock is released.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for fair state.
    persistence: Arc<Mutex<Persistence>>,
    /// The live notification fan-out channel.
    broadcaster: NotificationBroadcaster,
    /// Bcrypt hash that admin bearer keys are verified against.
    admin_key_hash: Arc<String>,
}

/// API request for registering a student.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterStudentApiRequest {
    /// The student's given name.
    first_name: String,
    /// The student's family name.
    last_name: String,
}

/// API request for changing a student's availability status.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetStudentStatusApiRequest {
    /// The requested status (`available` or `paused`).
    status: String,
}

/// API request for joining a company's queue.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct InscribeApiRequest {
    /// The joining student.
    student_id: i64,
    /// The company whose queue to join.
    company_id: i64,
}

/// API request for pausing or resuming a company.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetCompanyStatusApiRequest {
    /// The requested status (`recruiting` or `paused`).
    status: String,
}

/// API request for creating a company.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateCompanyApiRequest {
    /// The company's unique display name.
    name: String,
    /// The company's concurrent-interview capacity.
    max_concurrent_interviews: u32,
}

/// API request for changing a company's concurrent-interview capacity.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SetCapacityApiRequest {
    /// The new capacity.
    max_concurrent_interviews: u32,
}

/// API request for moving a queue entry to a new position.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ReorderQueueApiRequest {
    /// The entry to move.
    entry_id: i64,
    /// The requested one-based position.
    new_position: u32,
}

/// API request for force-adding a student to a queue.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ForceInscribeApiRequest {
    /// The student being force-added.
    student_id: i64,
}

/// Query parameters for the cancel-inscription endpoint.
#[derive(Debug, Deserialize)]
struct CancelQuery {
    /// The calling student, when no admin key is presented.
    student_id: Option<i64>,
}

/// Health probe response.
#[derive(Debug, Clone, Serialize)]
struct HealthResponse {
    /// Always `ok`.
    status: &'static str,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Returns the current UTC time as an RFC 3339 string.
fn current_timestamp() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("1970-01-01T00:00:00Z"))
}

/// Extracts the bearer key from the Authorization header.
fn bearer_key(headers: &HeaderMap) -> Result<&str, HttpError> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Missing admin bearer key"),
        })
}

/// Verifies the admin bearer key and returns the admin caller.
fn admin_caller(app_state: &AppState, headers: &HeaderMap) -> Result<Caller, HttpError> {
    let key: &str = bearer_key(headers)?;
    verify_admin_key(key, &app_state.admin_key_hash).map_err(|e| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: e.to_string(),
    })
}

/// Handler for GET /healthz endpoint.
///
/// Confirms the process is serving and the persistence handle is
/// reachable.
async fn handle_health(AxumState(app_state): AxumState<AppState>) -> Json<HealthResponse> {
    let persistence = app_state.persistence.lock().await;
    drop(persistence);

    Json(HealthResponse { status: "ok" })
}

/// Handler for GET /companies endpoint.
///
/// Returns the public floor view of every recruiting company.
async fn handle_list_companies(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListCompaniesResponse>, HttpError> {
    info!("Handling list_companies request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListCompaniesResponse = list_companies(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /students endpoint.
///
/// Registers a new student at the kiosk.
async fn handle_register_student(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterStudentApiRequest>,
) -> Result<Json<RegisterStudentResponse>, HttpError> {
    info!(
        first_name = %req.first_name,
        last_name = %req.last_name,
        "Handling register_student request"
    );

    let request: RegisterStudentRequest = RegisterStudentRequest {
        first_name: req.first_name,
        last_name: req.last_name,
    };
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<RegisterStudentResponse> =
        register_student(&mut persistence, request, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for GET `/students/{student_id}` endpoint.
///
/// Returns the student's profile with their entries, newest first.
async fn handle_get_student(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<GetStudentResponse>, HttpError> {
    info!(student_id = student_id, "Handling get_student request");

    let mut persistence = app_state.persistence.lock().await;
    let response: GetStudentResponse = get_student(&mut persistence, student_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/students/{student_id}/status` endpoint.
///
/// Pauses or resumes a student.
async fn handle_set_student_status(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
    Json(req): Json<SetStudentStatusApiRequest>,
) -> Result<Json<SetStudentStatusResponse>, HttpError> {
    info!(
        student_id = student_id,
        status = %req.status,
        "Handling set_student_status request"
    );

    let request: SetStudentStatusRequest = SetStudentStatusRequest { status: req.status };
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SetStudentStatusResponse> =
        set_student_status(&mut persistence, student_id, request, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for GET `/students/{student_id}/opportunities` endpoint.
///
/// Returns the student's pending entries, startable ones first.
async fn handle_list_opportunities(
    AxumState(app_state): AxumState<AppState>,
    Path(student_id): Path<i64>,
) -> Result<Json<ListOpportunitiesResponse>, HttpError> {
    info!(student_id = student_id, "Handling list_opportunities request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListOpportunitiesResponse =
        list_student_opportunities(&mut persistence, student_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST /queues endpoint.
///
/// Inscribes a student into a company's queue.
async fn handle_inscribe(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<InscribeApiRequest>,
) -> Result<Json<InscribeResponse>, HttpError> {
    info!(
        student_id = req.student_id,
        company_id = req.company_id,
        "Handling inscribe request"
    );

    let request: InscribeRequest = InscribeRequest {
        student_id: req.student_id,
        company_id: req.company_id,
    };
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<InscribeResponse> = inscribe(&mut persistence, request, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for POST `/queues/{entry_id}/start` endpoint.
///
/// Starts the interview for a queue entry.
async fn handle_start_interview(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<i64>,
) -> Result<Json<StartInterviewResponse>, HttpError> {
    info!(entry_id = entry_id, "Handling start_interview request");

    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<StartInterviewResponse> =
        start_interview(&mut persistence, entry_id, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for DELETE `/queues/{entry_id}` endpoint.
///
/// Cancels a pending inscription. The caller is either an admin
/// presenting a bearer key or a student identifying themselves through
/// the `student_id` query parameter.
async fn handle_cancel_inscription(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(entry_id): Path<i64>,
    Query(query): Query<CancelQuery>,
) -> Result<Json<CancelInscriptionResponse>, HttpError> {
    info!(entry_id = entry_id, "Handling cancel_inscription request");

    let caller: Caller = if headers.contains_key(header::AUTHORIZATION) {
        admin_caller(&app_state, &headers)?
    } else if let Some(student_id) = query.student_id {
        Caller::Student { student_id }
    } else {
        return Err(HttpError {
            status: StatusCode::UNAUTHORIZED,
            message: String::from("Cancellation requires an admin key or a student_id"),
        });
    };
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<CancelInscriptionResponse> =
        cancel_inscription(&mut persistence, entry_id, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for GET `/company/{access_token}` endpoint.
///
/// Returns the token-scoped company dashboard.
async fn handle_company_dashboard(
    AxumState(app_state): AxumState<AppState>,
    Path(access_token): Path<String>,
) -> Result<Json<CompanyDashboardResponse>, HttpError> {
    info!("Handling company_dashboard request");

    let mut persistence = app_state.persistence.lock().await;
    let response: CompanyDashboardResponse =
        get_company_dashboard(&mut persistence, &access_token)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/company/{access_token}/status` endpoint.
///
/// Pauses or resumes the company owning the access token.
async fn handle_set_company_status(
    AxumState(app_state): AxumState<AppState>,
    Path(access_token): Path<String>,
    Json(req): Json<SetCompanyStatusApiRequest>,
) -> Result<Json<SetCompanyStatusResponse>, HttpError> {
    info!(status = %req.status, "Handling set_company_status request");

    let request: SetCompanyStatusRequest = SetCompanyStatusRequest { status: req.status };
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SetCompanyStatusResponse> =
        set_company_status(&mut persistence, &access_token, request, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for POST `/company/{access_token}/queues/{entry_id}/complete` endpoint.
///
/// Marks an in-progress interview complete and promotes newly eligible
/// students.
async fn handle_complete_interview(
    AxumState(app_state): AxumState<AppState>,
    Path((access_token, entry_id)): Path<(String, i64)>,
) -> Result<Json<CompleteInterviewResponse>, HttpError> {
    info!(entry_id = entry_id, "Handling complete_interview request");

    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<CompleteInterviewResponse> =
        complete_interview(&mut persistence, &access_token, entry_id, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for GET `/ws/{recipient}` endpoint.
///
/// Upgrades the connection and subscribes it to one delivery topic.
async fn handle_live_subscribe(
    ws: WebSocketUpgrade,
    AxumState(app_state): AxumState<AppState>,
    Path(recipient): Path<String>,
) -> Result<Response, HttpError> {
    info!(recipient = %recipient, "Handling live subscription request");

    let topic: String = live::parse_topic(&recipient).ok_or_else(|| HttpError {
        status: StatusCode::BAD_REQUEST,
        message: format!("Unknown subscription topic: '{recipient}'"),
    })?;

    Ok(ws.on_upgrade(move |socket| live::handle_socket(socket, app_state.broadcaster, topic)))
}

/// Handler for POST /admin/companies endpoint.
///
/// Creates a new company with a fresh access token.
async fn handle_create_company(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateCompanyApiRequest>,
) -> Result<Json<CreateCompanyResponse>, HttpError> {
    info!(
        name = %req.name,
        capacity = req.max_concurrent_interviews,
        "Handling create_company request"
    );

    let caller: Caller = admin_caller(&app_state, &headers)?;
    let request: CreateCompanyRequest = CreateCompanyRequest {
        name: req.name,
        max_concurrent_interviews: req.max_concurrent_interviews,
    };
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<CreateCompanyResponse> =
        create_company(&mut persistence, request, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for GET /admin/companies endpoint.
///
/// Returns every company with credentials and queue counts.
async fn handle_list_companies_admin(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<ListCompaniesAdminResponse>, HttpError> {
    info!("Handling list_companies_admin request");

    let caller: Caller = admin_caller(&app_state, &headers)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListCompaniesAdminResponse = list_companies_admin(&mut persistence, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for PATCH `/admin/companies/{company_id}` endpoint.
///
/// Changes a company's concurrent-interview capacity.
async fn handle_set_capacity(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(company_id): Path<i64>,
    Json(req): Json<SetCapacityApiRequest>,
) -> Result<Json<SetCapacityResponse>, HttpError> {
    info!(
        company_id = company_id,
        capacity = req.max_concurrent_interviews,
        "Handling set_capacity request"
    );

    let caller: Caller = admin_caller(&app_state, &headers)?;
    let request: SetCapacityRequest = SetCapacityRequest {
        max_concurrent_interviews: req.max_concurrent_interviews,
    };
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SetCapacityResponse> =
        set_capacity(&mut persistence, company_id, request, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for POST `/admin/companies/{company_id}/regenerate-token` endpoint.
///
/// Rotates a company's access token, invalidating the old one.
async fn handle_regenerate_token(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(company_id): Path<i64>,
) -> Result<Json<RegenerateTokenResponse>, HttpError> {
    info!(company_id = company_id, "Handling regenerate_token request");

    let caller: Caller = admin_caller(&app_state, &headers)?;
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<RegenerateTokenResponse> =
        regenerate_token(&mut persistence, company_id, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for POST `/admin/companies/{company_id}/pause` endpoint.
async fn handle_pause_company(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(company_id): Path<i64>,
) -> Result<Json<SetCompanyStatusResponse>, HttpError> {
    info!(company_id = company_id, "Handling pause_company request");

    let caller: Caller = admin_caller(&app_state, &headers)?;
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SetCompanyStatusResponse> =
        pause_company(&mut persistence, company_id, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for POST `/admin/companies/{company_id}/resume` endpoint.
async fn handle_resume_company(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(company_id): Path<i64>,
) -> Result<Json<SetCompanyStatusResponse>, HttpError> {
    info!(company_id = company_id, "Handling resume_company request");

    let caller: Caller = admin_caller(&app_state, &headers)?;
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<SetCompanyStatusResponse> =
        resume_company(&mut persistence, company_id, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for GET `/admin/companies/{company_id}/queue` endpoint.
///
/// Returns a company's full dashboard by id, without needing its token.
async fn handle_get_company_queue(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(company_id): Path<i64>,
) -> Result<Json<CompanyDashboardResponse>, HttpError> {
    info!(company_id = company_id, "Handling get_company_queue request");

    let caller: Caller = admin_caller(&app_state, &headers)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CompanyDashboardResponse =
        get_company_queue(&mut persistence, company_id, &caller)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/admin/companies/{company_id}/reorder-queue` endpoint.
///
/// Moves a pending entry to a new one-based position.
async fn handle_reorder_queue(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(company_id): Path<i64>,
    Json(req): Json<ReorderQueueApiRequest>,
) -> Result<Json<ReorderQueueResponse>, HttpError> {
    info!(
        company_id = company_id,
        entry_id = req.entry_id,
        new_position = req.new_position,
        "Handling reorder_queue request"
    );

    let caller: Caller = admin_caller(&app_state, &headers)?;
    let request: ReorderQueueRequest = ReorderQueueRequest {
        entry_id: req.entry_id,
        new_position: req.new_position,
    };
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ReorderQueueResponse> =
        reorder_queue(&mut persistence, company_id, request, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for POST `/admin/companies/{company_id}/force-add` endpoint.
///
/// Inscribes a student into a queue, bypassing the company-status
/// check.
async fn handle_force_inscribe(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(company_id): Path<i64>,
    Json(req): Json<ForceInscribeApiRequest>,
) -> Result<Json<InscribeResponse>, HttpError> {
    info!(
        company_id = company_id,
        student_id = req.student_id,
        "Handling force_inscribe request"
    );

    let caller: Caller = admin_caller(&app_state, &headers)?;
    let request: ForceInscribeRequest = ForceInscribeRequest {
        student_id: req.student_id,
    };
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<InscribeResponse> =
        force_inscribe(&mut persistence, company_id, request, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for POST /admin/companies/bulk-resume endpoint.
///
/// Resumes every paused company in one operation.
async fn handle_bulk_resume(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
) -> Result<Json<BulkResumeResponse>, HttpError> {
    info!("Handling bulk_resume request");

    let caller: Caller = admin_caller(&app_state, &headers)?;
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<BulkResumeResponse> = bulk_resume(&mut persistence, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Handler for DELETE `/admin/students/{student_id}` endpoint.
///
/// Deletes a student and all of their queue entries.
async fn handle_delete_student(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Path(student_id): Path<i64>,
) -> Result<Json<DeleteStudentResponse>, HttpError> {
    info!(student_id = student_id, "Handling delete_student request");

    let caller: Caller = admin_caller(&app_state, &headers)?;
    let now: String = current_timestamp();

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<DeleteStudentResponse> =
        delete_student(&mut persistence, student_id, &caller, &now)?;
    drop(persistence);

    app_state.broadcaster.publish_all(&result.notifications);

    Ok(Json(result.response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handle_health))
        .route("/companies", get(handle_list_companies))
        .route("/students", post(handle_register_student))
        .route("/students/{student_id}", get(handle_get_student))
        .route(
            "/students/{student_id}/status",
            patch(handle_set_student_status),
        )
        .route(
            "/students/{student_id}/opportunities",
            get(handle_list_opportunities),
        )
        .route("/queues", post(handle_inscribe))
        .route("/queues/{entry_id}/start", post(handle_start_interview))
        .route("/queues/{entry_id}", delete(handle_cancel_inscription))
        .route("/company/{access_token}", get(handle_company_dashboard))
        .route(
            "/company/{access_token}/status",
            patch(handle_set_company_status),
        )
        .route(
            "/company/{access_token}/queues/{entry_id}/complete",
            post(handle_complete_interview),
        )
        .route("/ws/{*recipient}", get(handle_live_subscribe))
        .route("/admin/companies", post(handle_create_company))
        .route("/admin/companies", get(handle_list_companies_admin))
        .route("/admin/companies/{company_id}", patch(handle_set_capacity))
        .route(
            "/admin/companies/{company_id}/regenerate-token",
            post(handle_regenerate_token),
        )
        .route(
            "/admin/companies/{company_id}/pause",
            post(handle_pause_company),
        )
        .route(
            "/admin/companies/{company_id}/resume",
            post(handle_resume_company),
        )
        .route(
            "/admin/companies/{company_id}/queue",
            get(handle_get_company_queue),
        )
        .route(
            "/admin/companies/{company_id}/reorder-queue",
            post(handle_reorder_queue),
        )
        .route(
            "/admin/companies/{company_id}/force-add",
            post(handle_force_inscribe),
        )
        .route("/admin/companies/bulk-resume", post(handle_bulk_resume))
        .route("/admin/students/{student_id}", delete(handle_delete_student))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Fairline server");

    let admin_key_hash: String = if let Some(hash) = args.admin_key_hash {
        hash
    } else {
        std::env::var("FAIRLINE_ADMIN_KEY_HASH").map_err(|_| {
            "admin key hash not configured: pass --admin-key-hash or set FAIRLINE_ADMIN_KEY_HASH"
        })?
    };

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        broadcaster: NotificationBroadcaster::new(),
        admin_key_hash: Arc::new(admin_key_hash),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
