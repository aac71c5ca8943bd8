// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::{TEST_NOW, run_command, seeded_persistence};
use fairline::{Command, FairState, TransitionResult};
use fairline_domain::{
    Capacity, CompanyStatus, EntryOutcome, QueueEntry, StudentStatus, TOKEN_LENGTH,
};

#[test]
fn test_inscription_inserts_row() {
    let mut persistence: Persistence = seeded_persistence();

    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 1,
        },
    );

    assert_eq!(persistence.count_queue_entries().unwrap(), 1);
    let loaded: FairState = persistence.load_state().unwrap();
    let entry: &QueueEntry = loaded.entry(1).unwrap();
    assert_eq!(entry.position, 1);
    assert_eq!(entry.outcome, EntryOutcome::Pending);
}

#[test]
fn test_commit_rolls_back_on_constraint_violation() {
    let mut persistence: Persistence = seeded_persistence();
    let before: FairState = persistence.load_state().unwrap();

    // Two entries for the same (company, student) pair violate the
    // uniqueness constraint; the second insert must abort the whole
    // transaction, leaving no rows behind from the first.
    let mut after: FairState = before.clone();
    after.entries.push(QueueEntry::with_id(
        1,
        1,
        1,
        1,
        EntryOutcome::Pending,
        String::from(TEST_NOW),
    ));
    after.entries.push(QueueEntry::with_id(
        2,
        1,
        1,
        2,
        EntryOutcome::Pending,
        String::from(TEST_NOW),
    ));
    let result: TransitionResult = TransitionResult {
        new_state: after,
        notifications: Vec::new(),
    };

    assert!(persistence.apply_transition(&before, &result).is_err());
    assert_eq!(persistence.count_queue_entries().unwrap(), 0);
}

#[test]
fn test_noop_transition_commits_cleanly() {
    let mut persistence: Persistence = seeded_persistence();
    let before: FairState = persistence.load_state().unwrap();
    let result: TransitionResult = TransitionResult {
        new_state: before.clone(),
        notifications: Vec::new(),
    };

    assert!(persistence.apply_transition(&before, &result).is_ok());
    assert_eq!(persistence.load_state().unwrap(), before);
}

#[test]
fn test_status_change_updates_row_in_place() {
    let mut persistence: Persistence = seeded_persistence();
    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 1,
        },
    );

    run_command(&mut persistence, Command::StartInterview { entry_id: 1 });

    // The diff writer must update the existing rows, not insert copies.
    assert_eq!(persistence.count_students().unwrap(), 2);
    assert_eq!(persistence.count_queue_entries().unwrap(), 1);
    let started: FairState = persistence.load_state().unwrap();
    assert_eq!(
        started.student(1).unwrap().status,
        StudentStatus::InInterview { company_id: 1 }
    );
    assert_eq!(started.entry(1).unwrap().outcome, EntryOutcome::Pending);
}

#[test]
fn test_cancellation_deletes_row_and_keeps_positions() {
    let mut persistence: Persistence = seeded_persistence();
    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 1,
        },
    );
    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 2,
        },
    );

    run_command(&mut persistence, Command::CancelInscription { entry_id: 1 });

    assert_eq!(persistence.count_queue_entries().unwrap(), 1);
    let loaded: FairState = persistence.load_state().unwrap();
    let remaining: &QueueEntry = loaded.entry(2).unwrap();
    // Departures leave holes; the survivor keeps its original position.
    assert_eq!(remaining.position, 2);
}

#[test]
fn test_token_rotation_persists() {
    let mut persistence: Persistence = seeded_persistence();
    let old_token: String = persistence
        .load_state()
        .unwrap()
        .company(1)
        .unwrap()
        .access_token
        .value()
        .to_string();

    run_command(&mut persistence, Command::RegenerateToken { company_id: 1 });

    let loaded: FairState = persistence.load_state().unwrap();
    let new_token: &str = loaded.company(1).unwrap().access_token.value();
    assert_ne!(new_token, old_token);
    assert_eq!(new_token.len(), TOKEN_LENGTH);
}

#[test]
fn test_delete_student_removes_their_entries() {
    let mut persistence: Persistence = seeded_persistence();
    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 1,
        },
    );
    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 2,
        },
    );

    run_command(&mut persistence, Command::DeleteStudent { student_id: 1 });

    assert_eq!(persistence.count_students().unwrap(), 1);
    assert_eq!(persistence.count_queue_entries().unwrap(), 1);
    let loaded: FairState = persistence.load_state().unwrap();
    assert!(loaded.student(1).is_err());
    assert_eq!(loaded.entries[0].student_id, 2);
}

#[test]
fn test_capacity_change_persists() {
    let mut persistence: Persistence = seeded_persistence();

    run_command(
        &mut persistence,
        Command::SetCapacity {
            company_id: 1,
            max_concurrent_interviews: Capacity::new(5).unwrap(),
        },
    );

    let loaded: FairState = persistence.load_state().unwrap();
    assert_eq!(
        loaded.company(1).unwrap().max_concurrent_interviews.value(),
        5
    );
}

#[test]
fn test_company_status_change_persists() {
    let mut persistence: Persistence = seeded_persistence();

    run_command(
        &mut persistence,
        Command::SetCompanyStatus {
            company_id: 1,
            new_status: CompanyStatus::Paused,
        },
    );

    let loaded: FairState = persistence.load_state().unwrap();
    assert_eq!(loaded.company(1).unwrap().status, CompanyStatus::Paused);
}

#[test]
fn test_reorder_persists_positions() {
    let mut persistence: Persistence = seeded_persistence();
    run_command(
        &mut persistence,
        Command::RegisterStudent {
            first_name: String::from("Edsger"),
            last_name: String::from("Dijkstra"),
        },
    );
    for student_id in 1..=3 {
        run_command(
            &mut persistence,
            Command::Inscribe {
                company_id: 1,
                student_id,
            },
        );
    }

    run_command(
        &mut persistence,
        Command::ReorderQueue {
            company_id: 1,
            entry_id: 1,
            new_position: 3,
        },
    );

    let loaded: FairState = persistence.load_state().unwrap();
    let ordered: Vec<i64> = loaded
        .company_entries(1)
        .iter()
        .filter_map(|entry| entry.entry_id)
        .collect();
    assert_eq!(ordered, vec![2, 3, 1]);
}
