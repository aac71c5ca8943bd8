// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Fairline queue system.
//!
//! This crate stores the fair's entities (companies, students and queue
//! entries) in `SQLite` through Diesel. The engine works on full in-memory
//! state snapshots, so the persistence surface is deliberately small:
//!
//! - [`Persistence::load_state`] reads all three tables into a
//!   [`FairState`] snapshot.
//! - [`Persistence::apply_transition`] diffs the snapshot a transition
//!   produced against the one it was computed from and commits the row
//!   changes in a single transaction.
//!
//! Callers serialize the whole load-apply-commit sequence behind one
//! handle; the transaction makes each commit all-or-nothing even if the
//! process dies mid-write.
//!
//! ## Databases
//!
//! - In-memory databases (`new_in_memory`) for tests: each call receives
//!   its own uniquely named shared-memory database.
//! - File-backed databases (`new_with_file`) for deployments, with WAL
//!   mode enabled for read concurrency.
//!
//! Migrations are embedded and applied on connect; foreign key
//! enforcement is verified on every construction path.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use fairline::{FairState, TransitionResult};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID, so
/// concurrently running tests never share a database.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

/// Persistence adapter for the fair's entity tables.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite`
    /// database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based
    /// collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite`
    /// database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;

        // WAL mode only applies to file-backed databases
        sqlite::enable_wal_mode(&mut conn)?;

        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Loads the complete fair state.
    ///
    /// # Errors
    ///
    /// Returns an error if a table cannot be read or a stored row cannot
    /// be reconstructed into its domain entity.
    pub fn load_state(&mut self) -> Result<FairState, PersistenceError> {
        queries::load_state(&mut self.conn)
    }

    /// Commits a transition result against the state it was computed
    /// from.
    ///
    /// All row changes between `before` and the transition's new state
    /// are applied in one transaction. Notifications carried by the
    /// result are not persisted; the caller publishes them after this
    /// returns.
    ///
    /// # Arguments
    ///
    /// * `before` - The snapshot the transition was computed from
    /// * `result` - The transition result to commit
    ///
    /// # Errors
    ///
    /// Returns an error if any row write fails; the store is unchanged in
    /// that case.
    pub fn apply_transition(
        &mut self,
        before: &FairState,
        result: &TransitionResult,
    ) -> Result<(), PersistenceError> {
        mutations::apply_transition(&mut self.conn, before, &result.new_state)
    }

    /// Counts the total number of companies.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_companies(&mut self) -> Result<i64, PersistenceError> {
        queries::count_companies(&mut self.conn)
    }

    /// Counts the total number of students.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_students(&mut self) -> Result<i64, PersistenceError> {
        queries::count_students(&mut self.conn)
    }

    /// Counts the total number of queue entries, completed ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_queue_entries(&mut self) -> Result<i64, PersistenceError> {
        queries::count_queue_entries(&mut self.conn)
    }
}
