// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the eligibility projections: first-available ordering,
//! slot accounting, the can-start check chain and the dashboard views.

use crate::{
    Opportunity, QueueStatus, available_slots, can_start_interview, first_available,
    in_interview_count, queue_status, student_opportunities, students_ahead_count,
};

use fairline_domain::{CompanyStatus, DomainError, EntryOutcome, QueueEntry, StudentStatus};

use super::helpers::{
    create_test_company, create_test_entry, create_test_queue, create_test_student,
};

// ============================================================================
// First Available Tests
// ============================================================================

#[test]
fn test_first_available_skips_paused_student_but_keeps_position() {
    let mut state = create_test_queue();
    state.students[0].status = StudentStatus::Paused;

    let company = state.companies[0].clone();
    let eligible: Vec<&QueueEntry> = first_available(&state, &company, 3);

    assert_eq!(eligible.len(), 2);
    assert_eq!(eligible[0].entry_id, Some(11));
    assert_eq!(eligible[1].entry_id, Some(12));
    // The skipped entry is untouched and regains its place on resume.
    assert_eq!(state.entry(10).unwrap().position, 1);

    state.students[0].status = StudentStatus::Available;
    let eligible: Vec<&QueueEntry> = first_available(&state, &company, 3);
    assert_eq!(eligible[0].entry_id, Some(10));
}

#[test]
fn test_first_available_skips_student_busy_elsewhere() {
    let mut state = create_test_queue();
    state.companies.push(create_test_company(2, "Hooli", 1));
    state.students[0].status = StudentStatus::InInterview { company_id: 2 };

    let company = state.companies[0].clone();
    let eligible: Vec<&QueueEntry> = first_available(&state, &company, 1);

    assert_eq!(eligible.len(), 1);
    assert_eq!(eligible[0].entry_id, Some(11));
}

#[test]
fn test_first_available_excludes_completed_entries() {
    let mut state = create_test_queue();
    state.entries[0].outcome = EntryOutcome::Completed {
        at: String::from("2026-03-14T09:30:00Z"),
    };
    state.students[0].status = StudentStatus::Paused;

    let company = state.companies[0].clone();
    let eligible: Vec<&QueueEntry> = first_available(&state, &company, 3);

    assert_eq!(eligible.len(), 2);
    assert_eq!(eligible[0].entry_id, Some(11));
}

// ============================================================================
// Slot Accounting Tests
// ============================================================================

#[test]
fn test_slots_count_only_interviews_at_this_company() {
    let mut state = create_test_queue();
    state.companies.push(create_test_company(2, "Hooli", 1));

    let company = state.companies[0].clone();

    state.students[0].status = StudentStatus::InInterview { company_id: 1 };
    assert_eq!(in_interview_count(&state, &company), 1);
    assert_eq!(available_slots(&state, &company), 0);

    // The same student busy at another company does not occupy a slot
    // here, even though their entry here is still pending.
    state.students[0].status = StudentStatus::InInterview { company_id: 2 };
    assert_eq!(in_interview_count(&state, &company), 0);
    assert_eq!(available_slots(&state, &company), 1);
}

#[test]
fn test_slots_saturate_when_capacity_shrinks_below_live_interviews() {
    let mut state = create_test_queue();
    state.companies[0] = create_test_company(1, "Initech", 2);
    state.students[0].status = StudentStatus::InInterview { company_id: 1 };
    state.students[1].status = StudentStatus::InInterview { company_id: 1 };

    let company = state.companies[0].clone();
    assert_eq!(available_slots(&state, &company), 0);

    // Shrink below the live interview count; slots pin at zero instead
    // of wrapping.
    state.companies[0] = create_test_company(1, "Initech", 1);
    let company = state.companies[0].clone();
    assert_eq!(in_interview_count(&state, &company), 2);
    assert_eq!(available_slots(&state, &company), 0);
}

// ============================================================================
// Can Start Check Order Tests
// ============================================================================

#[test]
fn test_can_start_completed_entry_beats_every_other_failure() {
    let mut state = create_test_queue();
    state.entries[0].outcome = EntryOutcome::Completed {
        at: String::from("2026-03-14T09:30:00Z"),
    };
    state.students[0].status = StudentStatus::Paused;
    state.companies[0].status = CompanyStatus::Paused;

    let entry = state.entry(10).unwrap().clone();
    let result = can_start_interview(&state, &entry);

    assert!(matches!(result, Err(DomainError::AlreadyCompleted)));
}

#[test]
fn test_can_start_unavailable_student_beats_company_pause() {
    let mut state = create_test_queue();
    state.students[0].status = StudentStatus::Paused;
    state.companies[0].status = CompanyStatus::Paused;

    let entry = state.entry(10).unwrap().clone();
    let result = can_start_interview(&state, &entry);

    assert!(matches!(
        result,
        Err(DomainError::StudentNotAvailable { .. })
    ));
}

#[test]
fn test_can_start_company_pause_beats_missing_slots() {
    let mut state = create_test_queue();
    state.companies[0].status = CompanyStatus::Paused;
    state.students[2].status = StudentStatus::InInterview { company_id: 1 };

    let entry = state.entry(10).unwrap().clone();
    let result = can_start_interview(&state, &entry);

    assert!(matches!(result, Err(DomainError::CompanyPaused { .. })));
}

#[test]
fn test_can_start_missing_slots_beat_turn_order() {
    let mut state = create_test_queue();
    state.students[2].status = StudentStatus::InInterview { company_id: 1 };

    // Entry 11 is out of turn behind entry 10, but the slot check fires
    // first.
    let entry = state.entry(11).unwrap().clone();
    let result = can_start_interview(&state, &entry);

    assert!(matches!(result, Err(DomainError::NoSlots { .. })));
}

#[test]
fn test_can_start_requires_first_available_head() {
    let state = create_test_queue();

    let head = state.entry(10).unwrap().clone();
    assert!(can_start_interview(&state, &head).is_ok());

    let behind = state.entry(11).unwrap().clone();
    let result = can_start_interview(&state, &behind);
    assert!(matches!(
        result,
        Err(DomainError::NotYourTurn {
            first_student: Some(ref name)
        }) if name == "Ada Lovelace"
    ));
}

#[test]
fn test_can_start_promotes_next_when_head_is_away() {
    let mut state = create_test_queue();
    state.students[0].status = StudentStatus::Paused;

    let entry = state.entry(11).unwrap().clone();
    assert!(can_start_interview(&state, &entry).is_ok());
}

// ============================================================================
// Students Ahead Tests
// ============================================================================

#[test]
fn test_students_ahead_excludes_student_mid_interview_here() {
    let mut state = create_test_queue();
    state.students[0].status = StudentStatus::InInterview { company_id: 1 };

    let second = state.entry(11).unwrap().clone();
    assert_eq!(students_ahead_count(&state, &second), 0);

    // Position 3 still waits behind the available student at position 2.
    let third = state.entry(12).unwrap().clone();
    assert_eq!(students_ahead_count(&state, &third), 1);
}

#[test]
fn test_students_ahead_counts_paused_students() {
    let mut state = create_test_queue();
    state.students[0].status = StudentStatus::Paused;

    let second = state.entry(11).unwrap().clone();
    assert_eq!(students_ahead_count(&state, &second), 1);
}

// ============================================================================
// Dashboard Projection Tests
// ============================================================================

#[test]
fn test_queue_status_splits_sections() {
    let mut state = create_test_queue();
    state.students[0].status = StudentStatus::InInterview { company_id: 1 };
    state.students[2].status = StudentStatus::Paused;
    state.students.push(create_test_student(4, "Marie", "Curie"));
    let mut done = create_test_entry(13, 1, 4, 4);
    done.outcome = EntryOutcome::Completed {
        at: String::from("2026-03-14T09:45:00Z"),
    };
    state.entries.push(done);

    let company = state.companies[0].clone();
    let status: QueueStatus = queue_status(&state, &company);

    assert_eq!(status.in_interview.len(), 1);
    assert_eq!(status.in_interview[0].entry_id, 10);
    assert_eq!(status.in_interview[0].student_name, "Ada Lovelace");

    assert_eq!(status.waiting.len(), 2);
    assert_eq!(status.waiting[0].entry_id, 11);
    assert!(!status.waiting[0].greyed);
    assert_eq!(status.waiting[0].students_ahead, 0);
    assert_eq!(status.waiting[1].entry_id, 12);
    assert!(status.waiting[1].greyed);
    assert_eq!(status.waiting[1].students_ahead, 1);

    assert_eq!(status.completed.len(), 1);
    assert_eq!(status.completed[0].student_name, "Marie Curie");

    assert_eq!(status.total_waiting, 3);
    // The single slot is occupied, so nobody can start right now.
    assert_eq!(status.available_now, 0);
}

#[test]
fn test_queue_status_available_now_counts_startable_heads() {
    let state = create_test_queue();

    let company = state.companies[0].clone();
    let status: QueueStatus = queue_status(&state, &company);

    assert!(status.in_interview.is_empty());
    assert_eq!(status.total_waiting, 3);
    assert_eq!(status.available_now, 1);
}

#[test]
fn test_queue_status_orders_completions_newest_first() {
    let mut state = create_test_queue();
    state.entries[0].outcome = EntryOutcome::Completed {
        at: String::from("2026-03-14T09:30:00Z"),
    };
    state.entries[1].outcome = EntryOutcome::Completed {
        at: String::from("2026-03-14T09:45:00Z"),
    };
    state.students[0].status = StudentStatus::Paused;
    state.students[1].status = StudentStatus::Paused;

    let company = state.companies[0].clone();
    let status: QueueStatus = queue_status(&state, &company);

    assert_eq!(status.completed.len(), 2);
    assert_eq!(status.completed[0].entry_id, 11);
    assert_eq!(status.completed[1].entry_id, 10);
}

// ============================================================================
// Opportunity Tests
// ============================================================================

#[test]
fn test_opportunities_sort_startable_first() {
    let mut state = create_test_queue();
    state.companies[0].status = CompanyStatus::Paused;
    state.companies.push(create_test_company(2, "Hooli", 1));
    state.entries.push(create_test_entry(13, 2, 1, 1));

    let student = state.students[0].clone();
    let opportunities: Vec<Opportunity> = student_opportunities(&state, &student);

    assert_eq!(opportunities.len(), 2);
    assert_eq!(opportunities[0].company_name, "Hooli");
    assert!(opportunities[0].can_start);
    assert!(opportunities[0].reason.is_none());

    assert_eq!(opportunities[1].company_name, "Initech");
    assert!(!opportunities[1].can_start);
    assert_eq!(opportunities[1].company_status, CompanyStatus::Paused);
    assert!(
        opportunities[1]
            .reason
            .as_deref()
            .is_some_and(|reason| reason.contains("is paused"))
    );
}

#[test]
fn test_opportunities_skip_completed_entries() {
    let mut state = create_test_queue();
    state.entries[0].outcome = EntryOutcome::Completed {
        at: String::from("2026-03-14T09:30:00Z"),
    };

    let student = state.students[0].clone();
    let opportunities: Vec<Opportunity> = student_opportunities(&state, &student);

    assert!(opportunities.is_empty());
}

#[test]
fn test_opportunities_report_position_and_ahead_count() {
    let state = create_test_queue();

    let student = state.students[2].clone();
    let opportunities: Vec<Opportunity> = student_opportunities(&state, &student);

    assert_eq!(opportunities.len(), 1);
    assert_eq!(opportunities[0].position, 3);
    assert_eq!(opportunities[0].ahead_count, 2);
    assert!(!opportunities[0].can_start);
}
