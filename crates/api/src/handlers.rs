// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use fairline::{
    Command, FairState, QueueStatus, TransitionResult, apply, available_slots, in_interview_count,
    queue_status, student_opportunities, students_ahead_count,
};
use fairline_domain::{Capacity, Company, CompanyStatus, QueueEntry, Student, StudentStatus};
use fairline_notify::Notification;
use fairline_persistence::Persistence;
use tracing::info;

use crate::auth::{AuthorizationService, Caller, authenticate_company};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AdminCompanyInfo, BulkResumeResponse, CancelInscriptionResponse, CompanyDashboardResponse,
    CompanyInfo, CompleteInterviewResponse, CompletedSlotInfo, CreateCompanyRequest,
    CreateCompanyResponse, DeleteStudentResponse, ForceInscribeRequest, GetStudentResponse,
    InscribeRequest, InscribeResponse, InterviewSlotInfo, ListCompaniesAdminResponse,
    ListCompaniesResponse, ListOpportunitiesResponse, OpportunityInfo, RegenerateTokenResponse,
    RegisterStudentRequest, RegisterStudentResponse, ReorderQueueRequest, ReorderQueueResponse,
    SetCapacityRequest, SetCapacityResponse, SetCompanyStatusRequest, SetCompanyStatusResponse,
    SetStudentStatusRequest, SetStudentStatusResponse, StartInterviewResponse, StudentEntryInfo,
    WaitingSlotInfo,
};

/// Maximum completed entries returned on the token-authenticated dashboard.
///
/// The admin queue view is uncapped.
const COMPLETED_SECTION_LIMIT: usize = 20;

/// The result of an API operation that includes both the response and the
/// notifications the transition produced.
///
/// Notifications are published by the caller only after the transition has
/// been committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// The notifications generated by this operation.
    pub notifications: Vec<Notification>,
}

/// Registers a new student via the API boundary.
///
/// This function:
/// - Translates the API request into a core command
/// - Applies the command to the loaded state
/// - Commits the transition
/// - Returns the API response with any notifications on success
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request to register a student
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<RegisterStudentResponse>)` on success
/// * `Err(ApiError)` if the request is invalid or the commit fails
///
/// # Errors
///
/// Returns an error if a name field is empty or persistence fails.
pub fn register_student(
    persistence: &mut Persistence,
    request: RegisterStudentRequest,
    now: &str,
) -> Result<ApiResult<RegisterStudentResponse>, ApiError> {
    let before: FairState = persistence.load_state()?;
    let student_id: i64 = before.next_student_id();

    let command: Command = Command::RegisterStudent {
        first_name: request.first_name,
        last_name: request.last_name,
    };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let student: &Student =
        result
            .new_state
            .student(student_id)
            .map_err(|_| ApiError::Internal {
                message: String::from("Registered student missing from new state"),
            })?;
    let full_name: String = student.full_name();
    let response: RegisterStudentResponse = RegisterStudentResponse {
        student_id,
        first_name: student.first_name.clone(),
        last_name: student.last_name.clone(),
        status: student.status.as_str().to_string(),
        message: format!("Successfully registered student '{full_name}'"),
    };

    persistence.apply_transition(&before, &result)?;
    info!(student_id, name = %full_name, "Registered student");

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Looks up a student's profile, including all of their queue entries.
///
/// Entries are listed newest first. Pending entries carry a `greyed` flag
/// when slot offers currently skip them.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `student_id` - The student to look up
///
/// # Errors
///
/// Returns an error if the student does not exist or persistence fails.
pub fn get_student(
    persistence: &mut Persistence,
    student_id: i64,
) -> Result<GetStudentResponse, ApiError> {
    let state: FairState = persistence.load_state()?;
    let student: &Student = state.student(student_id).map_err(translate_domain_error)?;
    let entries: Vec<StudentEntryInfo> = student_entry_infos(&state, student)?;

    Ok(GetStudentResponse {
        student_id,
        first_name: student.first_name.clone(),
        last_name: student.last_name.clone(),
        status: student.status.as_str().to_string(),
        registered_at: student.registered_at.clone(),
        entries,
    })
}

/// Changes a student's availability status via the API boundary.
///
/// Only `available` and `paused` may be requested. The interview
/// lifecycle owns the `in_interview` status.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `student_id` - The student changing status
/// * `request` - The API request carrying the new status
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<SetStudentStatusResponse>)` on success
/// * `Err(ApiError)` if the status is invalid or the transition is refused
///
/// # Errors
///
/// Returns an error if the student does not exist, the requested status
/// is not recognized, or the lifecycle refuses the transition.
pub fn set_student_status(
    persistence: &mut Persistence,
    student_id: i64,
    request: SetStudentStatusRequest,
    now: &str,
) -> Result<ApiResult<SetStudentStatusResponse>, ApiError> {
    let before: FairState = persistence.load_state()?;

    let requested: StudentStatus =
        StudentStatus::parse_requested(&request.status).map_err(translate_domain_error)?;
    let command: Command = Command::SetStudentStatus {
        student_id,
        new_status: requested,
    };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let student: &Student = result
        .new_state
        .student(student_id)
        .map_err(translate_domain_error)?;
    let response: SetStudentStatusResponse = SetStudentStatusResponse {
        student_id,
        status: student.status.as_str().to_string(),
        message: format!(
            "Student '{}' is now {}",
            student.full_name(),
            student.status.as_str()
        ),
    };

    persistence.apply_transition(&before, &result)?;
    info!(student_id, status = %response.status, "Changed student status");

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Evaluates every pending inscription of a student for startability.
///
/// Opportunities are listed best-first: startable entries before blocked
/// ones, then by queue position.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `student_id` - The student whose opportunities to evaluate
///
/// # Errors
///
/// Returns an error if the student does not exist or persistence fails.
pub fn list_student_opportunities(
    persistence: &mut Persistence,
    student_id: i64,
) -> Result<ListOpportunitiesResponse, ApiError> {
    let state: FairState = persistence.load_state()?;
    let student: &Student = state.student(student_id).map_err(translate_domain_error)?;

    let opportunities: Vec<OpportunityInfo> = student_opportunities(&state, student)
        .into_iter()
        .map(|opportunity| OpportunityInfo {
            entry_id: opportunity.entry_id,
            company_id: opportunity.company_id,
            company_name: opportunity.company_name,
            company_status: opportunity.company_status.as_str().to_string(),
            position: opportunity.position,
            can_start: opportunity.can_start,
            ahead_count: opportunity.ahead_count,
            reason: opportunity.reason,
        })
        .collect();
    let can_start_any: bool = opportunities.iter().any(|o| o.can_start);

    Ok(ListOpportunitiesResponse {
        student_id,
        student_status: student.status.as_str().to_string(),
        can_start_any,
        opportunities,
    })
}

/// Lists recruiting companies for the public floor view.
///
/// Paused companies are omitted. Companies are ordered by name.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
///
/// # Errors
///
/// Returns an error if persistence fails.
pub fn list_companies(persistence: &mut Persistence) -> Result<ListCompaniesResponse, ApiError> {
    let state: FairState = persistence.load_state()?;

    let mut companies: Vec<CompanyInfo> = state
        .companies
        .iter()
        .filter(|company| company.status.is_recruiting())
        .map(|company| {
            let company_id: i64 = company.company_id.unwrap_or_default();
            let queue_length: usize = state
                .company_entries(company_id)
                .iter()
                .filter(|e| !e.outcome.is_completed())
                .count();
            CompanyInfo {
                company_id,
                name: company.name.clone(),
                status: company.status.as_str().to_string(),
                available_slots: available_slots(&state, company),
                queue_length,
            }
        })
        .collect();
    companies.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(ListCompaniesResponse { companies })
}

/// Inscribes a student into a company's queue via the API boundary.
///
/// This function:
/// - Translates the API request into a core command
/// - Applies the admission checks and appends the entry
/// - Commits the transition
/// - Returns the API response with any notifications on success
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request identifying student and company
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<InscribeResponse>)` on success
/// * `Err(ApiError)` if admission is refused or the commit fails
///
/// # Errors
///
/// Returns an error if either party does not exist, the company is
/// paused, or the student already holds an entry there.
pub fn inscribe(
    persistence: &mut Persistence,
    request: InscribeRequest,
    now: &str,
) -> Result<ApiResult<InscribeResponse>, ApiError> {
    let before: FairState = persistence.load_state()?;

    let command: Command = Command::Inscribe {
        company_id: request.company_id,
        student_id: request.student_id,
    };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let response: InscribeResponse = inscribe_response(
        &result.new_state,
        request.company_id,
        request.student_id,
        "Successfully inscribed into the queue at",
    )?;

    persistence.apply_transition(&before, &result)?;
    info!(
        company_id = request.company_id,
        student_id = request.student_id,
        position = response.position,
        "Inscribed student"
    );

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Starts the interview for a queue entry via the API boundary.
///
/// The entry must pass every admission check: pending outcome, an
/// available student, a recruiting company with a free slot, and its
/// turn in the first-available ordering.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `entry_id` - The entry to start
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<StartInterviewResponse>)` on success
/// * `Err(ApiError)` if any admission check refuses the start
///
/// # Errors
///
/// Returns an error if the entry does not exist or an admission check
/// fails.
pub fn start_interview(
    persistence: &mut Persistence,
    entry_id: i64,
    now: &str,
) -> Result<ApiResult<StartInterviewResponse>, ApiError> {
    let before: FairState = persistence.load_state()?;

    let command: Command = Command::StartInterview { entry_id };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let entry: &QueueEntry = result
        .new_state
        .entry(entry_id)
        .map_err(translate_domain_error)?;
    let company: &Company = result
        .new_state
        .company(entry.company_id)
        .map_err(translate_domain_error)?;
    let response: StartInterviewResponse = StartInterviewResponse {
        entry_id,
        company_id: entry.company_id,
        company_name: company.name.clone(),
        student_id: entry.student_id,
        message: format!("Interview started at '{}'", company.name),
    };

    persistence.apply_transition(&before, &result)?;
    info!(entry_id, company = %response.company_name, "Started interview");

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Cancels a pending inscription via the API boundary.
///
/// Admins may cancel any entry; a student kiosk only its own. The
/// departing entry leaves a hole, so everyone behind keeps their
/// position.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `entry_id` - The entry to cancel
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<CancelInscriptionResponse>)` on success
/// * `Err(ApiError)` if the caller may not cancel this entry
///
/// # Errors
///
/// Returns an error if the entry does not exist, is already completed
/// or mid-interview, or the caller is not authorized.
pub fn cancel_inscription(
    persistence: &mut Persistence,
    entry_id: i64,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<CancelInscriptionResponse>, ApiError> {
    let before: FairState = persistence.load_state()?;

    // Ownership is part of the entry, so authorization needs the load.
    let entry: &QueueEntry = before.entry(entry_id).map_err(translate_domain_error)?;
    AuthorizationService::authorize_cancel_inscription(caller, entry.student_id)?;

    let command: Command = Command::CancelInscription { entry_id };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let response: CancelInscriptionResponse = CancelInscriptionResponse {
        entry_id,
        message: String::from("Inscription cancelled"),
    };

    persistence.apply_transition(&before, &result)?;
    info!(entry_id, caller = caller.role_name(), "Cancelled inscription");

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Returns a company's own dashboard, authenticated by access token.
///
/// The completed section is capped at [`COMPLETED_SECTION_LIMIT`]
/// entries, most recent first.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `access_token` - The token presented by the booth
///
/// # Errors
///
/// Returns an error if the token is malformed or unknown.
pub fn get_company_dashboard(
    persistence: &mut Persistence,
    access_token: &str,
) -> Result<CompanyDashboardResponse, ApiError> {
    let state: FairState = persistence.load_state()?;
    let company: &Company = authenticate_company(&state, access_token)?;

    Ok(dashboard_response(
        &state,
        company,
        Some(COMPLETED_SECTION_LIMIT),
    ))
}

/// Pauses or resumes a company via its own access token.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `access_token` - The token presented by the booth
/// * `request` - The API request carrying the new status
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<SetCompanyStatusResponse>)` on success
/// * `Err(ApiError)` if authentication fails or the status is invalid
///
/// # Errors
///
/// Returns an error if the token is malformed or unknown, or the
/// requested status is not recognized.
pub fn set_company_status(
    persistence: &mut Persistence,
    access_token: &str,
    request: SetCompanyStatusRequest,
    now: &str,
) -> Result<ApiResult<SetCompanyStatusResponse>, ApiError> {
    let before: FairState = persistence.load_state()?;
    let company: &Company = authenticate_company(&before, access_token)?;
    let company_id: i64 = company.company_id.unwrap_or_default();

    let requested: CompanyStatus = request.status.parse().map_err(translate_domain_error)?;
    let command: Command = Command::SetCompanyStatus {
        company_id,
        new_status: requested,
    };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let response: SetCompanyStatusResponse =
        company_status_response(&result.new_state, company_id)?;

    persistence.apply_transition(&before, &result)?;
    info!(
        company = %response.name,
        status = %response.status,
        "Changed company status"
    );

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Marks an interview complete via the owning company's access token.
///
/// Completion moves the student to `paused` so they can collect
/// themselves before their next interview.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `access_token` - The token presented by the booth
/// * `entry_id` - The entry to complete
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<CompleteInterviewResponse>)` on success
/// * `Err(ApiError)` if the entry belongs to a different company
///
/// # Errors
///
/// Returns an error if authentication fails, the entry belongs to
/// another company, or the student is not mid-interview here.
pub fn complete_interview(
    persistence: &mut Persistence,
    access_token: &str,
    entry_id: i64,
    now: &str,
) -> Result<ApiResult<CompleteInterviewResponse>, ApiError> {
    let before: FairState = persistence.load_state()?;
    let company: &Company = authenticate_company(&before, access_token)?;
    let company_id: i64 = company.company_id.unwrap_or_default();

    let entry: &QueueEntry = before.entry(entry_id).map_err(translate_domain_error)?;
    if entry.company_id != company_id {
        return Err(ApiError::Unauthorized {
            action: String::from("complete_interview"),
            required_role: String::from("the owning Company"),
        });
    }

    let command: Command = Command::CompleteInterview { entry_id };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let completed: &QueueEntry = result
        .new_state
        .entry(entry_id)
        .map_err(translate_domain_error)?;
    let student: &Student = result
        .new_state
        .student(completed.student_id)
        .map_err(translate_domain_error)?;
    let response: CompleteInterviewResponse = CompleteInterviewResponse {
        entry_id,
        student_id: completed.student_id,
        student_name: student.full_name(),
        completed_at: completed
            .outcome
            .completed_at()
            .unwrap_or_default()
            .to_string(),
        message: format!("Interview with '{}' marked complete", student.full_name()),
    };

    persistence.apply_transition(&before, &result)?;
    info!(entry_id, company = %company.name, "Completed interview");

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Creates a new company via the API boundary with authorization.
///
/// This function:
/// - Verifies the caller is authorized (Admin role required)
/// - Translates the API request into a core command
/// - Applies the command and commits the transition
/// - Returns the created company including its fresh access token
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request to create a company
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<CreateCompanyResponse>)` on success
/// * `Err(ApiError)` if unauthorized or the request is invalid
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, the name is empty
/// or taken, or the capacity is out of range.
pub fn create_company(
    persistence: &mut Persistence,
    request: CreateCompanyRequest,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<CreateCompanyResponse>, ApiError> {
    AuthorizationService::authorize_create_company(caller)?;

    let before: FairState = persistence.load_state()?;
    let company_id: i64 = before.next_company_id();

    let capacity: Capacity =
        Capacity::new(request.max_concurrent_interviews).map_err(translate_domain_error)?;
    let command: Command = Command::CreateCompany {
        name: request.name,
        max_concurrent_interviews: capacity,
    };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let company: &Company =
        result
            .new_state
            .company(company_id)
            .map_err(|_| ApiError::Internal {
                message: String::from("Created company missing from new state"),
            })?;
    let response: CreateCompanyResponse = CreateCompanyResponse {
        company_id,
        name: company.name.clone(),
        access_token: company.access_token.value().to_string(),
        status: company.status.as_str().to_string(),
        max_concurrent_interviews: company.max_concurrent_interviews.value(),
        message: format!("Successfully created company '{}'", company.name),
    };

    persistence.apply_transition(&before, &result)?;
    info!(company_id, company = %response.name, "Created company");

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Lists every company with credentials and queue counts for admins.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `caller` - The authenticated caller
///
/// # Errors
///
/// Returns an error if the caller is not an Admin.
pub fn list_companies_admin(
    persistence: &mut Persistence,
    caller: &Caller,
) -> Result<ListCompaniesAdminResponse, ApiError> {
    AuthorizationService::authorize_list_companies_admin(caller)?;

    let state: FairState = persistence.load_state()?;
    let mut companies: Vec<AdminCompanyInfo> = state
        .companies
        .iter()
        .map(|company| {
            let company_id: i64 = company.company_id.unwrap_or_default();
            let entries: Vec<&QueueEntry> = state.company_entries(company_id);
            let completed_count: usize = entries
                .iter()
                .filter(|e| e.outcome.is_completed())
                .count();
            let pending: usize = entries.len().saturating_sub(completed_count);
            let interviewing: usize = in_interview_count(&state, company);
            AdminCompanyInfo {
                company_id,
                name: company.name.clone(),
                access_token: company.access_token.value().to_string(),
                status: company.status.as_str().to_string(),
                max_concurrent_interviews: company.max_concurrent_interviews.value(),
                available_slots: available_slots(&state, company),
                waiting_count: pending.saturating_sub(interviewing),
                in_interview_count: interviewing,
                completed_count,
            }
        })
        .collect();
    companies.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(ListCompaniesAdminResponse { companies })
}

/// Changes a company's concurrent-interview capacity with authorization.
///
/// Running interviews are never interrupted by a capacity reduction;
/// the company simply stops admitting new starts until it is back
/// under the limit.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `company_id` - The company whose capacity to change
/// * `request` - The API request carrying the new capacity
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<SetCapacityResponse>)` on success
/// * `Err(ApiError)` if unauthorized or the capacity is out of range
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, the company does
/// not exist, or the capacity is out of range.
pub fn set_capacity(
    persistence: &mut Persistence,
    company_id: i64,
    request: SetCapacityRequest,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<SetCapacityResponse>, ApiError> {
    AuthorizationService::authorize_set_capacity(caller)?;

    let before: FairState = persistence.load_state()?;

    let capacity: Capacity =
        Capacity::new(request.max_concurrent_interviews).map_err(translate_domain_error)?;
    let command: Command = Command::SetCapacity {
        company_id,
        max_concurrent_interviews: capacity,
    };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let company: &Company = result
        .new_state
        .company(company_id)
        .map_err(translate_domain_error)?;
    let response: SetCapacityResponse = SetCapacityResponse {
        company_id,
        max_concurrent_interviews: company.max_concurrent_interviews.value(),
        message: format!(
            "Capacity of '{}' is now {}",
            company.name,
            company.max_concurrent_interviews.value()
        ),
    };

    persistence.apply_transition(&before, &result)?;
    info!(
        company_id,
        capacity = response.max_concurrent_interviews,
        "Changed company capacity"
    );

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Replaces a company's access token with a fresh one.
///
/// The old token stops working the moment the transition commits. The
/// new token is returned once and never logged.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `company_id` - The company whose token to replace
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<RegenerateTokenResponse>)` on success
/// * `Err(ApiError)` if unauthorized or the company does not exist
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or the company does
/// not exist.
pub fn regenerate_token(
    persistence: &mut Persistence,
    company_id: i64,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<RegenerateTokenResponse>, ApiError> {
    AuthorizationService::authorize_regenerate_token(caller)?;

    let before: FairState = persistence.load_state()?;

    let command: Command = Command::RegenerateToken { company_id };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let company: &Company = result
        .new_state
        .company(company_id)
        .map_err(translate_domain_error)?;
    let response: RegenerateTokenResponse = RegenerateTokenResponse {
        company_id,
        access_token: company.access_token.value().to_string(),
        message: format!("Access token for '{}' regenerated", company.name),
    };

    persistence.apply_transition(&before, &result)?;
    info!(company_id, "Regenerated access token");

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Pauses a company by id with authorization.
///
/// Pausing stops new inscriptions and interview starts. Pending
/// entries keep their positions and running interviews finish
/// normally.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `company_id` - The company to pause
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<SetCompanyStatusResponse>)` on success
/// * `Err(ApiError)` if unauthorized or the company does not exist
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or the company does
/// not exist.
pub fn pause_company(
    persistence: &mut Persistence,
    company_id: i64,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<SetCompanyStatusResponse>, ApiError> {
    AuthorizationService::authorize_pause_company(caller)?;

    set_company_status_by_id(persistence, company_id, CompanyStatus::Paused, now)
}

/// Resumes a company by id with authorization.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `company_id` - The company to resume
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<SetCompanyStatusResponse>)` on success
/// * `Err(ApiError)` if unauthorized or the company does not exist
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or the company does
/// not exist.
pub fn resume_company(
    persistence: &mut Persistence,
    company_id: i64,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<SetCompanyStatusResponse>, ApiError> {
    AuthorizationService::authorize_resume_company(caller)?;

    set_company_status_by_id(persistence, company_id, CompanyStatus::Recruiting, now)
}

/// Returns a company's full queue for admin inspection.
///
/// Unlike the token dashboard the completed section is uncapped.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `company_id` - The company whose queue to inspect
/// * `caller` - The authenticated caller
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or the company does
/// not exist.
pub fn get_company_queue(
    persistence: &mut Persistence,
    company_id: i64,
    caller: &Caller,
) -> Result<CompanyDashboardResponse, ApiError> {
    AuthorizationService::authorize_get_company_queue(caller)?;

    let state: FairState = persistence.load_state()?;
    let company: &Company = state.company(company_id).map_err(translate_domain_error)?;

    Ok(dashboard_response(&state, company, None))
}

/// Moves a queue entry to a new position with authorization.
///
/// The requested position is clamped into the valid range; entries in
/// between shift by one. This is the only operation that renumbers
/// positions.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `company_id` - The company whose queue is being edited
/// * `request` - The API request naming the entry and target position
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<ReorderQueueResponse>)` with the effective position
/// * `Err(ApiError)` if unauthorized or the entry is not reorderable
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, the entry does not
/// exist in this company's queue, or the entry is not pending.
pub fn reorder_queue(
    persistence: &mut Persistence,
    company_id: i64,
    request: ReorderQueueRequest,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<ReorderQueueResponse>, ApiError> {
    AuthorizationService::authorize_reorder_queue(caller)?;

    let before: FairState = persistence.load_state()?;

    let command: Command = Command::ReorderQueue {
        company_id,
        entry_id: request.entry_id,
        new_position: request.new_position,
    };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let entry: &QueueEntry = result
        .new_state
        .entry(request.entry_id)
        .map_err(translate_domain_error)?;
    let response: ReorderQueueResponse = ReorderQueueResponse {
        company_id,
        entry_id: request.entry_id,
        position: entry.position,
        message: format!("Moved entry to position {}", entry.position),
    };

    persistence.apply_transition(&before, &result)?;
    info!(
        company_id,
        entry_id = request.entry_id,
        position = response.position,
        "Reordered queue"
    );

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Inscribes a student past the company-status check with authorization.
///
/// The duplicate-entry check still applies; a forced inscription can
/// never create a second pending entry for the same pair.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `company_id` - The company whose queue to join
/// * `request` - The API request naming the student
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<InscribeResponse>)` on success
/// * `Err(ApiError)` if unauthorized or the pair already has an entry
///
/// # Errors
///
/// Returns an error if the caller is not an Admin, either party does
/// not exist, or the student already holds an entry there.
pub fn force_inscribe(
    persistence: &mut Persistence,
    company_id: i64,
    request: ForceInscribeRequest,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<InscribeResponse>, ApiError> {
    AuthorizationService::authorize_force_inscribe(caller)?;

    let before: FairState = persistence.load_state()?;

    let command: Command = Command::ForceInscribe {
        company_id,
        student_id: request.student_id,
    };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let response: InscribeResponse = inscribe_response(
        &result.new_state,
        company_id,
        request.student_id,
        "Force-inscribed into the queue at",
    )?;

    persistence.apply_transition(&before, &result)?;
    info!(
        company_id,
        student_id = request.student_id,
        position = response.position,
        "Force-inscribed student"
    );

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Sets every paused company back to recruiting with authorization.
///
/// Typically used when the fair reopens after a floor-wide break.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<BulkResumeResponse>)` listing the resumed companies
/// * `Err(ApiError)` if unauthorized
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or persistence
/// fails.
pub fn bulk_resume(
    persistence: &mut Persistence,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<BulkResumeResponse>, ApiError> {
    AuthorizationService::authorize_bulk_resume(caller)?;

    let before: FairState = persistence.load_state()?;
    let resumed_company_ids: Vec<i64> = before
        .companies
        .iter()
        .filter(|company| !company.status.is_recruiting())
        .map(|company| company.company_id.unwrap_or_default())
        .collect();

    let result: TransitionResult =
        apply(&before, Command::BulkResume, now).map_err(translate_core_error)?;

    let response: BulkResumeResponse = BulkResumeResponse {
        message: format!("Resumed {} paused companies", resumed_company_ids.len()),
        resumed_company_ids,
    };

    persistence.apply_transition(&before, &result)?;
    info!(
        count = response.resumed_company_ids.len(),
        "Resumed all paused companies"
    );

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Deletes a student and all of their queue entries with authorization.
///
/// Remaining entries keep their positions; departures never close
/// holes.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `student_id` - The student to delete
/// * `caller` - The authenticated caller
/// * `now` - The current timestamp (RFC 3339, UTC)
///
/// # Returns
///
/// * `Ok(ApiResult<DeleteStudentResponse>)` on success
/// * `Err(ApiError)` if unauthorized or the student does not exist
///
/// # Errors
///
/// Returns an error if the caller is not an Admin or the student does
/// not exist.
pub fn delete_student(
    persistence: &mut Persistence,
    student_id: i64,
    caller: &Caller,
    now: &str,
) -> Result<ApiResult<DeleteStudentResponse>, ApiError> {
    AuthorizationService::authorize_delete_student(caller)?;

    let before: FairState = persistence.load_state()?;
    let student: &Student = before.student(student_id).map_err(translate_domain_error)?;
    let full_name: String = student.full_name();

    let command: Command = Command::DeleteStudent { student_id };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let response: DeleteStudentResponse = DeleteStudentResponse {
        student_id,
        message: format!("Deleted student '{full_name}'"),
    };

    persistence.apply_transition(&before, &result)?;
    info!(student_id, "Deleted student");

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Builds the inscribe response for a freshly created entry.
fn inscribe_response(
    state: &FairState,
    company_id: i64,
    student_id: i64,
    message_prefix: &str,
) -> Result<InscribeResponse, ApiError> {
    let entry: &QueueEntry =
        state
            .entry_for(company_id, student_id)
            .ok_or_else(|| ApiError::Internal {
                message: String::from("Inscribed entry missing from new state"),
            })?;
    let company: &Company = state.company(company_id).map_err(translate_domain_error)?;

    Ok(InscribeResponse {
        entry_id: entry.entry_id.unwrap_or_default(),
        company_id,
        company_name: company.name.clone(),
        student_id,
        position: entry.position,
        students_ahead: students_ahead_count(state, entry),
        message: format!("{message_prefix} '{}'", company.name),
    })
}

/// Applies a status change for a company addressed by id.
fn set_company_status_by_id(
    persistence: &mut Persistence,
    company_id: i64,
    new_status: CompanyStatus,
    now: &str,
) -> Result<ApiResult<SetCompanyStatusResponse>, ApiError> {
    let before: FairState = persistence.load_state()?;

    let command: Command = Command::SetCompanyStatus {
        company_id,
        new_status,
    };
    let result: TransitionResult = apply(&before, command, now).map_err(translate_core_error)?;

    let response: SetCompanyStatusResponse =
        company_status_response(&result.new_state, company_id)?;

    persistence.apply_transition(&before, &result)?;
    info!(
        company = %response.name,
        status = %response.status,
        "Changed company status"
    );

    Ok(ApiResult {
        response,
        notifications: result.notifications,
    })
}

/// Builds the status-change response from the committed state.
fn company_status_response(
    state: &FairState,
    company_id: i64,
) -> Result<SetCompanyStatusResponse, ApiError> {
    let company: &Company = state.company(company_id).map_err(translate_domain_error)?;

    Ok(SetCompanyStatusResponse {
        company_id,
        name: company.name.clone(),
        status: company.status.as_str().to_string(),
        message: format!("Company '{}' is now {}", company.name, company.status),
    })
}

/// Projects a company's queue into the dashboard response.
///
/// `completed_cap` limits the completed section when present; the
/// admin view passes `None`.
fn dashboard_response(
    state: &FairState,
    company: &Company,
    completed_cap: Option<usize>,
) -> CompanyDashboardResponse {
    let mut status: QueueStatus = queue_status(state, company);
    if let Some(cap) = completed_cap {
        status.completed.truncate(cap);
    }

    CompanyDashboardResponse {
        company_id: company.company_id.unwrap_or_default(),
        name: company.name.clone(),
        status: company.status.as_str().to_string(),
        max_concurrent_interviews: company.max_concurrent_interviews.value(),
        available_slots: available_slots(state, company),
        total_waiting: status.total_waiting,
        available_now: status.available_now,
        in_interview: status
            .in_interview
            .into_iter()
            .map(|slot| InterviewSlotInfo {
                entry_id: slot.entry_id,
                student_id: slot.student_id,
                student_name: slot.student_name,
                position: slot.position,
                created_at: slot.created_at,
            })
            .collect(),
        waiting: status
            .waiting
            .into_iter()
            .map(|slot| WaitingSlotInfo {
                entry_id: slot.entry_id,
                student_id: slot.student_id,
                student_name: slot.student_name,
                position: slot.position,
                created_at: slot.created_at,
                greyed: slot.greyed,
                students_ahead: slot.students_ahead,
            })
            .collect(),
        completed: status
            .completed
            .into_iter()
            .map(|slot| CompletedSlotInfo {
                entry_id: slot.entry_id,
                student_id: slot.student_id,
                student_name: slot.student_name,
                position: slot.position,
                completed_at: slot.completed_at,
            })
            .collect(),
    }
}

/// Projects a student's entries into profile rows, newest first.
fn student_entry_infos(
    state: &FairState,
    student: &Student,
) -> Result<Vec<StudentEntryInfo>, ApiError> {
    let student_id: i64 = student.student_id.unwrap_or_default();
    let mut entries: Vec<StudentEntryInfo> = Vec::new();

    for entry in state.student_entries(student_id) {
        let company: &Company = state.company(entry.company_id).map_err(translate_domain_error)?;
        let completed: bool = entry.outcome.is_completed();
        // A pending entry is greyed while its student is paused or busy
        // at some other company.
        let greyed: bool = !completed
            && !student.status.is_available()
            && student.status.company_id() != Some(entry.company_id);

        entries.push(StudentEntryInfo {
            entry_id: entry.entry_id.unwrap_or_default(),
            company_id: entry.company_id,
            company_name: company.name.clone(),
            company_status: company.status.as_str().to_string(),
            position: entry.position,
            students_ahead: students_ahead_count(state, entry),
            greyed,
            completed,
            completed_at: entry.outcome.completed_at().map(ToString::to_string),
            created_at: entry.created_at.clone(),
        });
    }

    Ok(entries)
}
