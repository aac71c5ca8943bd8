// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::diesel_schema::{companies, queue_entries, students};
use crate::error::PersistenceError;
use crate::tests::{TEST_NOW, run_command, seeded_persistence};
use diesel::prelude::*;
use fairline::{Command, FairState, TransitionResult};
use fairline_domain::{EntryOutcome, StudentStatus};

#[test]
fn test_loaded_state_matches_last_transition() {
    let mut persistence: Persistence = seeded_persistence();
    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 1,
        },
    );
    let result: TransitionResult = run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 2,
        },
    );

    let loaded: FairState = persistence.load_state().unwrap();

    assert_eq!(loaded, result.new_state);
}

#[test]
fn test_round_trip_preserves_interview_lifecycle_fields() {
    let mut persistence: Persistence = seeded_persistence();
    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 1,
        },
    );
    run_command(&mut persistence, Command::StartInterview { entry_id: 1 });

    let mid: FairState = persistence.load_state().unwrap();
    assert_eq!(
        mid.student(1).unwrap().status,
        StudentStatus::InInterview { company_id: 1 }
    );

    run_command(&mut persistence, Command::CompleteInterview { entry_id: 1 });

    let done: FairState = persistence.load_state().unwrap();
    assert_eq!(done.student(1).unwrap().status, StudentStatus::Paused);
    assert_eq!(
        done.entry(1).unwrap().outcome,
        EntryOutcome::Completed {
            at: String::from(TEST_NOW),
        }
    );
}

#[test]
fn test_engine_assigned_ids_survive_reload() {
    let mut persistence: Persistence = seeded_persistence();
    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 2,
        },
    );

    let loaded: FairState = persistence.load_state().unwrap();

    assert_eq!(loaded.companies[0].company_id, Some(1));
    assert_eq!(loaded.students[0].student_id, Some(1));
    assert_eq!(loaded.students[1].student_id, Some(2));
    assert_eq!(loaded.entries[0].entry_id, Some(1));
    assert_eq!(loaded.next_student_id(), 3);
    assert_eq!(loaded.next_entry_id(), 2);
}

#[test]
fn test_disagreeing_status_columns_fail_reconstruction() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    // A student claiming in_interview with no company reference is a row
    // the schema accepts but the domain must reject.
    diesel::insert_into(students::table)
        .values((
            students::student_id.eq(1_i64),
            students::first_name.eq("Ada"),
            students::last_name.eq("Lovelace"),
            students::status.eq("in_interview"),
            students::current_company_id.eq(Option::<i64>::None),
            students::registered_at.eq(TEST_NOW),
        ))
        .execute(&mut persistence.conn)
        .unwrap();

    let result: Result<FairState, PersistenceError> = persistence.load_state();

    assert!(matches!(
        result,
        Err(PersistenceError::ReconstructionError(_))
    ));
}

#[test]
fn test_completed_flag_without_timestamp_fails_reconstruction() {
    let mut persistence: Persistence = seeded_persistence();
    run_command(
        &mut persistence,
        Command::Inscribe {
            company_id: 1,
            student_id: 1,
        },
    );

    diesel::update(queue_entries::table.filter(queue_entries::entry_id.eq(1_i64)))
        .set(queue_entries::completed.eq(1))
        .execute(&mut persistence.conn)
        .unwrap();

    let result: Result<FairState, PersistenceError> = persistence.load_state();

    assert!(matches!(
        result,
        Err(PersistenceError::ReconstructionError(_))
    ));
}

#[test]
fn test_unknown_company_status_fails_reconstruction() {
    let mut persistence: Persistence = seeded_persistence();

    diesel::update(companies::table.filter(companies::company_id.eq(1_i64)))
        .set(companies::status.eq("closed"))
        .execute(&mut persistence.conn)
        .unwrap();

    let result: Result<FairState, PersistenceError> = persistence.load_state();

    assert!(matches!(
        result,
        Err(PersistenceError::ReconstructionError(_))
    ));
}
