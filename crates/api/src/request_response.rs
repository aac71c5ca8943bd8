// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

/// API request to register a new student.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterStudentRequest {
    /// The student's given name.
    pub first_name: String,
    /// The student's family name.
    pub last_name: String,
}

/// API response for a successful student registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterStudentResponse {
    /// The student's canonical identifier.
    pub student_id: i64,
    /// The student's given name.
    pub first_name: String,
    /// The student's family name.
    pub last_name: String,
    /// The student's availability status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to change a student's availability status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetStudentStatusRequest {
    /// The requested status (`available` or `paused`).
    pub status: String,
}

/// API response for a successful student status change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetStudentStatusResponse {
    /// The student's canonical identifier.
    pub student_id: i64,
    /// The student's new status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// One queue entry as seen from the owning student's profile.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StudentEntryInfo {
    /// The entry's canonical identifier.
    pub entry_id: i64,
    /// The company whose queue this entry belongs to.
    pub company_id: i64,
    /// The company's display name.
    pub company_name: String,
    /// The company's recruiting status.
    pub company_status: String,
    /// The entry's one-based queue position.
    pub position: u32,
    /// How many pending entries sit ahead of this one.
    pub students_ahead: usize,
    /// Whether the entry is currently skipped by slot offers.
    pub greyed: bool,
    /// Whether the interview has been completed.
    pub completed: bool,
    /// When the interview completed (RFC 3339, UTC), if it has.
    pub completed_at: Option<String>,
    /// When the inscription was created (RFC 3339, UTC).
    pub created_at: String,
}

/// API response for a student profile lookup.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetStudentResponse {
    /// The student's canonical identifier.
    pub student_id: i64,
    /// The student's given name.
    pub first_name: String,
    /// The student's family name.
    pub last_name: String,
    /// The student's availability status.
    pub status: String,
    /// When the student registered (RFC 3339, UTC).
    pub registered_at: String,
    /// The student's queue entries, newest first.
    pub entries: Vec<StudentEntryInfo>,
}

/// One actionable entry in a student's opportunity list.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpportunityInfo {
    /// The entry's canonical identifier.
    pub entry_id: i64,
    /// The company whose queue this entry belongs to.
    pub company_id: i64,
    /// The company's display name.
    pub company_name: String,
    /// The company's recruiting status.
    pub company_status: String,
    /// The entry's one-based queue position.
    pub position: u32,
    /// Whether the student could start this interview right now.
    pub can_start: bool,
    /// How many students are ahead in the first-available ordering.
    pub ahead_count: u32,
    /// Why the interview cannot start, when it cannot.
    pub reason: Option<String>,
}

/// API response for a student's opportunity listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListOpportunitiesResponse {
    /// The student's canonical identifier.
    pub student_id: i64,
    /// The student's availability status.
    pub student_status: String,
    /// Whether any listed opportunity can start right now.
    pub can_start_any: bool,
    /// The student's pending entries, startable ones first.
    pub opportunities: Vec<OpportunityInfo>,
}

/// Public information about a single recruiting company.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompanyInfo {
    /// The company's canonical identifier.
    pub company_id: i64,
    /// The company's display name.
    pub name: String,
    /// The company's recruiting status.
    pub status: String,
    /// How many interview slots are free right now.
    pub available_slots: u32,
    /// How many pending entries are queued.
    pub queue_length: usize,
}

/// API response for the public company listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListCompaniesResponse {
    /// Recruiting companies, ordered by name.
    pub companies: Vec<CompanyInfo>,
}

/// API request to inscribe a student into a company's queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InscribeRequest {
    /// The joining student.
    pub student_id: i64,
    /// The company whose queue to join.
    pub company_id: i64,
}

/// API response for a successful inscription.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InscribeResponse {
    /// The new entry's canonical identifier.
    pub entry_id: i64,
    /// The company whose queue was joined.
    pub company_id: i64,
    /// The company's display name.
    pub company_name: String,
    /// The inscribed student.
    pub student_id: i64,
    /// The entry's one-based queue position.
    pub position: u32,
    /// How many pending entries sit ahead of the new one.
    pub students_ahead: usize,
    /// A success message.
    pub message: String,
}

/// API response for a successfully started interview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StartInterviewResponse {
    /// The started entry's canonical identifier.
    pub entry_id: i64,
    /// The interviewing company.
    pub company_id: i64,
    /// The company's display name.
    pub company_name: String,
    /// The interviewed student.
    pub student_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a cancelled inscription.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelInscriptionResponse {
    /// The cancelled entry's canonical identifier.
    pub entry_id: i64,
    /// A success message.
    pub message: String,
}

/// API response for a completed interview.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompleteInterviewResponse {
    /// The completed entry's canonical identifier.
    pub entry_id: i64,
    /// The interviewed student.
    pub student_id: i64,
    /// The interviewed student's full name.
    pub student_name: String,
    /// When the interview completed (RFC 3339, UTC).
    pub completed_at: String,
    /// A success message.
    pub message: String,
}

/// One in-progress interview on a company dashboard.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InterviewSlotInfo {
    /// The entry's canonical identifier.
    pub entry_id: i64,
    /// The interviewed student.
    pub student_id: i64,
    /// The interviewed student's full name.
    pub student_name: String,
    /// The entry's one-based queue position.
    pub position: u32,
    /// When the inscription was created (RFC 3339, UTC).
    pub created_at: String,
}

/// One waiting entry on a company dashboard.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WaitingSlotInfo {
    /// The entry's canonical identifier.
    pub entry_id: i64,
    /// The waiting student.
    pub student_id: i64,
    /// The waiting student's full name.
    pub student_name: String,
    /// The entry's one-based queue position.
    pub position: u32,
    /// When the inscription was created (RFC 3339, UTC).
    pub created_at: String,
    /// Whether slot offers currently skip this entry.
    pub greyed: bool,
    /// How many students are ahead in the first-available ordering.
    pub students_ahead: u32,
}

/// One completed interview on a company dashboard.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompletedSlotInfo {
    /// The entry's canonical identifier.
    pub entry_id: i64,
    /// The interviewed student.
    pub student_id: i64,
    /// The interviewed student's full name.
    pub student_name: String,
    /// The entry's one-based queue position.
    pub position: u32,
    /// When the interview completed (RFC 3339, UTC).
    pub completed_at: String,
}

/// API response for a company's own dashboard.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CompanyDashboardResponse {
    /// The company's canonical identifier.
    pub company_id: i64,
    /// The company's display name.
    pub name: String,
    /// The company's recruiting status.
    pub status: String,
    /// The company's concurrent-interview capacity.
    pub max_concurrent_interviews: u32,
    /// How many interview slots are free right now.
    pub available_slots: u32,
    /// How many pending entries are waiting.
    pub total_waiting: u32,
    /// How many of the waiting students could start right now.
    pub available_now: u32,
    /// Interviews currently in progress, in queue order.
    pub in_interview: Vec<InterviewSlotInfo>,
    /// Waiting entries, in queue order.
    pub waiting: Vec<WaitingSlotInfo>,
    /// Completed interviews, most recent first.
    pub completed: Vec<CompletedSlotInfo>,
}

/// API request to pause or resume a company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCompanyStatusRequest {
    /// The requested status (`recruiting` or `paused`).
    pub status: String,
}

/// API response for a successful company status change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetCompanyStatusResponse {
    /// The company's canonical identifier.
    pub company_id: i64,
    /// The company's display name.
    pub name: String,
    /// The company's new status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to create a new company.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCompanyRequest {
    /// The company's unique display name.
    pub name: String,
    /// The company's concurrent-interview capacity.
    pub max_concurrent_interviews: u32,
}

/// API response for a successful company creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateCompanyResponse {
    /// The company's canonical identifier.
    pub company_id: i64,
    /// The company's display name.
    pub name: String,
    /// The company's freshly generated access token.
    pub access_token: String,
    /// The company's recruiting status.
    pub status: String,
    /// The company's concurrent-interview capacity.
    pub max_concurrent_interviews: u32,
    /// A success message.
    pub message: String,
}

/// Administrative information about a single company.
///
/// Unlike [`CompanyInfo`] this carries the access token, so it must
/// only ever be returned to Admin callers.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdminCompanyInfo {
    /// The company's canonical identifier.
    pub company_id: i64,
    /// The company's display name.
    pub name: String,
    /// The company's current access token.
    pub access_token: String,
    /// The company's recruiting status.
    pub status: String,
    /// The company's concurrent-interview capacity.
    pub max_concurrent_interviews: u32,
    /// How many interview slots are free right now.
    pub available_slots: u32,
    /// How many pending entries are waiting.
    pub waiting_count: usize,
    /// How many interviews are in progress.
    pub in_interview_count: usize,
    /// How many interviews have completed.
    pub completed_count: usize,
}

/// API response for the administrative company listing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListCompaniesAdminResponse {
    /// All companies, ordered by name.
    pub companies: Vec<AdminCompanyInfo>,
}

/// API request to change a company's concurrent-interview capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetCapacityRequest {
    /// The new capacity.
    pub max_concurrent_interviews: u32,
}

/// API response for a successful capacity change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetCapacityResponse {
    /// The company's canonical identifier.
    pub company_id: i64,
    /// The company's new capacity.
    pub max_concurrent_interviews: u32,
    /// A success message.
    pub message: String,
}

/// API response for a rotated access token.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegenerateTokenResponse {
    /// The company's canonical identifier.
    pub company_id: i64,
    /// The company's replacement access token.
    pub access_token: String,
    /// A success message.
    pub message: String,
}

/// API request to move a queue entry to a new position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderQueueRequest {
    /// The entry to move.
    pub entry_id: i64,
    /// The requested one-based position.
    pub new_position: u32,
}

/// API response for a successful queue reorder.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReorderQueueResponse {
    /// The company whose queue was edited.
    pub company_id: i64,
    /// The moved entry's canonical identifier.
    pub entry_id: i64,
    /// The entry's effective position after clamping.
    pub position: u32,
    /// A success message.
    pub message: String,
}

/// API request to inscribe a student past the company-status check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForceInscribeRequest {
    /// The student being force-added.
    pub student_id: i64,
}

/// API response for a bulk resume of every paused company.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BulkResumeResponse {
    /// The companies that were paused and are now recruiting.
    pub resumed_company_ids: Vec<i64>,
    /// A success message.
    pub message: String,
}

/// API response for a deleted student.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteStudentResponse {
    /// The deleted student's canonical identifier.
    pub student_id: i64,
    /// A success message.
    pub message: String,
}
