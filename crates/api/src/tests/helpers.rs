// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use fairline_persistence::{Persistence, PersistenceError};

use crate::{
    Caller, CompleteInterviewResponse, CreateCompanyRequest, CreateCompanyResponse,
    InscribeRequest, InscribeResponse, RegisterStudentRequest, RegisterStudentResponse,
    StartInterviewResponse, complete_interview, create_company, inscribe, register_student,
    start_interview,
};

/// The wall-clock instant every test transition is stamped with.
pub const TEST_NOW: &str = "2026-03-14T10:00:00Z";

pub fn setup_test_persistence() -> Result<Persistence, PersistenceError> {
    Persistence::new_in_memory()
}

pub fn create_test_admin() -> Caller {
    Caller::Admin
}

/// Creates a recruiting company through the API and returns the full
/// response, including the generated access token.
pub fn create_test_company(
    persistence: &mut Persistence,
    name: &str,
    capacity: u32,
) -> CreateCompanyResponse {
    let request = CreateCompanyRequest {
        name: String::from(name),
        max_concurrent_interviews: capacity,
    };
    create_company(persistence, request, &create_test_admin(), TEST_NOW)
        .expect("Failed to create test company")
        .response
}

pub fn register_test_student(
    persistence: &mut Persistence,
    first_name: &str,
    last_name: &str,
) -> RegisterStudentResponse {
    let request = RegisterStudentRequest {
        first_name: String::from(first_name),
        last_name: String::from(last_name),
    };
    register_student(persistence, request, TEST_NOW)
        .expect("Failed to register test student")
        .response
}

pub fn inscribe_test_student(
    persistence: &mut Persistence,
    student_id: i64,
    company_id: i64,
) -> InscribeResponse {
    let request = InscribeRequest {
        student_id,
        company_id,
    };
    inscribe(persistence, request, TEST_NOW)
        .expect("Failed to inscribe test student")
        .response
}

pub fn start_test_interview(
    persistence: &mut Persistence,
    entry_id: i64,
) -> StartInterviewResponse {
    start_interview(persistence, entry_id, TEST_NOW)
        .expect("Failed to start test interview")
        .response
}

pub fn complete_test_interview(
    persistence: &mut Persistence,
    access_token: &str,
    entry_id: i64,
) -> CompleteInterviewResponse {
    complete_interview(persistence, access_token, entry_id, TEST_NOW)
        .expect("Failed to complete test interview")
        .response
}
