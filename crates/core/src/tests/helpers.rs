// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::FairState;
use fairline_domain::{
    AccessToken, Capacity, Company, CompanyStatus, EntryOutcome, QueueEntry, Student,
    StudentStatus,
};

pub const TEST_NOW: &str = "2026-03-14T10:00:00Z";

pub fn create_test_student(student_id: i64, first_name: &str, last_name: &str) -> Student {
    Student::with_id(
        student_id,
        String::from(first_name),
        String::from(last_name),
        StudentStatus::Available,
        String::from("2026-03-14T08:00:00Z"),
    )
}

pub fn create_test_company(company_id: i64, name: &str, capacity: u32) -> Company {
    Company::with_id(
        company_id,
        String::from(name),
        AccessToken::new(&format!("token-{company_id}")),
        CompanyStatus::Recruiting,
        Capacity::new(capacity).unwrap(),
        String::from("2026-03-14T07:00:00Z"),
    )
}

pub fn create_test_entry(
    entry_id: i64,
    company_id: i64,
    student_id: i64,
    position: u32,
) -> QueueEntry {
    QueueEntry::with_id(
        entry_id,
        company_id,
        student_id,
        position,
        EntryOutcome::Pending,
        String::from("2026-03-14T09:00:00Z"),
    )
}

/// One recruiting company (id 1, capacity 1) and three available students
/// inscribed at positions 1..=3. Entry ids are offset from student ids so
/// a mixed-up lookup fails loudly.
pub fn create_test_queue() -> FairState {
    let mut state: FairState = FairState::new();
    state.companies.push(create_test_company(1, "Initech", 1));
    state.students.push(create_test_student(1, "Ada", "Lovelace"));
    state.students.push(create_test_student(2, "Grace", "Hopper"));
    state.students.push(create_test_student(3, "Alan", "Turing"));
    state.entries.push(create_test_entry(10, 1, 1, 1));
    state.entries.push(create_test_entry(11, 1, 2, 2));
    state.entries.push(create_test_entry(12, 1, 3, 3));
    state
}
