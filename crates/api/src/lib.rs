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

mod auth;
mod error;
mod handlers;
mod request_response;
mod token_policy;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use auth::{AuthorizationService, Caller, authenticate_company, verify_admin_key};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    ApiResult, bulk_resume, cancel_inscription, complete_interview, create_company, delete_student,
    force_inscribe, get_company_dashboard, get_company_queue, get_student, inscribe,
    list_companies, list_companies_admin, list_student_opportunities, pause_company,
    regenerate_token, register_student, reorder_queue, resume_company, set_capacity,
    set_company_status, set_student_status, start_interview,
};
pub use request_response::{
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
pub use token_policy::{TokenFormatError, validate_token_format};
