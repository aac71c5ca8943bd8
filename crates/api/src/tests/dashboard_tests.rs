// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the company dashboard and admin queue views.

use crate::{
    SetStudentStatusRequest, get_company_dashboard, get_company_queue, list_companies_admin,
    set_student_status,
};

use super::helpers::{
    TEST_NOW, complete_test_interview, create_test_admin, create_test_company,
    inscribe_test_student, register_test_student, setup_test_persistence, start_test_interview,
};

// ============================================================================
// Dashboard Sections
// ============================================================================

#[test]
fn test_dashboard_partitions_sections() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let company = create_test_company(&mut persistence, "TechCorp", 1);
    let first = register_test_student(&mut persistence, "Ada", "Lovelace");
    let second = register_test_student(&mut persistence, "Grace", "Hopper");
    let third = register_test_student(&mut persistence, "Alan", "Turing");

    let first_entry = inscribe_test_student(&mut persistence, first.student_id, company.company_id);
    start_test_interview(&mut persistence, first_entry.entry_id);
    complete_test_interview(&mut persistence, &company.access_token, first_entry.entry_id);

    let second_entry =
        inscribe_test_student(&mut persistence, second.student_id, company.company_id);
    start_test_interview(&mut persistence, second_entry.entry_id);

    inscribe_test_student(&mut persistence, third.student_id, company.company_id);

    let dashboard = get_company_dashboard(&mut persistence, &company.access_token)
        .expect("Failed to get company dashboard");

    assert_eq!(dashboard.name, "TechCorp");
    assert_eq!(dashboard.status, "recruiting");
    assert_eq!(dashboard.max_concurrent_interviews, 1);

    assert_eq!(dashboard.in_interview.len(), 1);
    assert_eq!(dashboard.in_interview[0].student_name, "Grace Hopper");
    assert_eq!(dashboard.waiting.len(), 1);
    assert_eq!(dashboard.waiting[0].student_name, "Alan Turing");
    assert_eq!(dashboard.completed.len(), 1);
    assert_eq!(dashboard.completed[0].student_name, "Ada Lovelace");
    assert_eq!(dashboard.completed[0].completed_at, TEST_NOW);

    // In-progress interviews still count toward the waiting total.
    assert_eq!(dashboard.total_waiting, 2);
    assert_eq!(dashboard.available_slots, 0);
    assert_eq!(dashboard.available_now, 0);
}

#[test]
fn test_waiting_paused_student_is_greyed() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let company = create_test_company(&mut persistence, "TechCorp", 1);
    let first = register_test_student(&mut persistence, "Ada", "Lovelace");
    let second = register_test_student(&mut persistence, "Grace", "Hopper");
    let first_entry = inscribe_test_student(&mut persistence, first.student_id, company.company_id);
    inscribe_test_student(&mut persistence, second.student_id, company.company_id);
    start_test_interview(&mut persistence, first_entry.entry_id);

    let request = SetStudentStatusRequest {
        status: String::from("paused"),
    };
    set_student_status(&mut persistence, second.student_id, request, TEST_NOW)
        .expect("Failed to pause student");

    let dashboard = get_company_dashboard(&mut persistence, &company.access_token)
        .expect("Failed to get company dashboard");

    assert_eq!(dashboard.waiting.len(), 1);
    assert_eq!(dashboard.waiting[0].student_id, second.student_id);
    assert!(dashboard.waiting[0].greyed);
    // The head is mid-interview here, so they no longer block anyone.
    assert_eq!(dashboard.waiting[0].students_ahead, 0);
}

#[test]
fn test_available_now_respects_free_slots() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let company = create_test_company(&mut persistence, "TechCorp", 2);
    let first = register_test_student(&mut persistence, "Ada", "Lovelace");
    let second = register_test_student(&mut persistence, "Grace", "Hopper");
    let third = register_test_student(&mut persistence, "Alan", "Turing");
    inscribe_test_student(&mut persistence, first.student_id, company.company_id);
    inscribe_test_student(&mut persistence, second.student_id, company.company_id);
    inscribe_test_student(&mut persistence, third.student_id, company.company_id);

    let dashboard = get_company_dashboard(&mut persistence, &company.access_token)
        .expect("Failed to get company dashboard");

    assert_eq!(dashboard.total_waiting, 3);
    assert_eq!(dashboard.available_slots, 2);
    assert_eq!(dashboard.available_now, 2);
}

// ============================================================================
// Completed Section Cap
// ============================================================================

#[test]
fn test_token_dashboard_caps_completed_section() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let company = create_test_company(&mut persistence, "TechCorp", 1);

    for i in 1..=21 {
        let student = register_test_student(&mut persistence, &format!("Student{i}"), "Test");
        let entry = inscribe_test_student(&mut persistence, student.student_id, company.company_id);
        start_test_interview(&mut persistence, entry.entry_id);
        complete_test_interview(&mut persistence, &company.access_token, entry.entry_id);
    }

    let dashboard = get_company_dashboard(&mut persistence, &company.access_token)
        .expect("Failed to get company dashboard");
    assert_eq!(dashboard.completed.len(), 20);

    // The admin view is uncapped.
    let admin = create_test_admin();
    let queue = get_company_queue(&mut persistence, company.company_id, &admin)
        .expect("Failed to get company queue");
    assert_eq!(queue.completed.len(), 21);
}

// ============================================================================
// Admin Listing
// ============================================================================

#[test]
fn test_admin_listing_reports_queue_counts() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let company = create_test_company(&mut persistence, "TechCorp", 1);
    let first = register_test_student(&mut persistence, "Ada", "Lovelace");
    let second = register_test_student(&mut persistence, "Grace", "Hopper");
    let third = register_test_student(&mut persistence, "Alan", "Turing");

    let first_entry = inscribe_test_student(&mut persistence, first.student_id, company.company_id);
    start_test_interview(&mut persistence, first_entry.entry_id);
    complete_test_interview(&mut persistence, &company.access_token, first_entry.entry_id);
    let second_entry =
        inscribe_test_student(&mut persistence, second.student_id, company.company_id);
    start_test_interview(&mut persistence, second_entry.entry_id);
    inscribe_test_student(&mut persistence, third.student_id, company.company_id);

    let admin = create_test_admin();
    let listing =
        list_companies_admin(&mut persistence, &admin).expect("Failed to list companies");

    assert_eq!(listing.companies.len(), 1);
    let info = &listing.companies[0];
    assert_eq!(info.name, "TechCorp");
    assert_eq!(info.access_token, company.access_token);
    assert_eq!(info.in_interview_count, 1);
    assert_eq!(info.waiting_count, 1);
    assert_eq!(info.completed_count, 1);
    assert_eq!(info.available_slots, 0);
}
