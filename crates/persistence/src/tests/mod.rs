// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod state_tests;
mod transition_tests;

use crate::Persistence;
use fairline::{Command, FairState, TransitionResult, apply};
use fairline_domain::Capacity;

pub const TEST_NOW: &str = "2026-03-14T10:00:00Z";

/// Applies one command to the stored state and commits the result.
pub fn run_command(persistence: &mut Persistence, command: Command) -> TransitionResult {
    let before: FairState = persistence.load_state().unwrap();
    let result: TransitionResult = apply(&before, command, TEST_NOW).unwrap();
    persistence.apply_transition(&before, &result).unwrap();
    result
}

/// Creates an in-memory store seeded with one company ("Initech",
/// capacity 1) and two students.
pub fn seeded_persistence() -> Persistence {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    run_command(
        &mut persistence,
        Command::CreateCompany {
            name: String::from("Initech"),
            max_concurrent_interviews: Capacity::new(1).unwrap(),
        },
    );
    run_command(
        &mut persistence,
        Command::RegisterStudent {
            first_name: String::from("Ada"),
            last_name: String::from("Lovelace"),
        },
    );
    run_command(
        &mut persistence,
        Command::RegisterStudent {
            first_name: String::from("Grace"),
            last_name: String::from("Hopper"),
        },
    );
    persistence
}
