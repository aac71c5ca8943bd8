// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State snapshot loading.
//!
//! The engine transitions over one in-memory snapshot of the whole fair,
//! so the canonical read is a full load of all three tables. Rows are
//! ordered by id to keep reconstruction deterministic; a fair holds at
//! most a few hundred students, so the full load stays cheap.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fairline::FairState;
use fairline_domain::{Company, QueueEntry, Student};
use tracing::debug;

use crate::data_models::{CompanyRow, QueueEntryRow, StudentRow};
use crate::diesel_schema::{companies, queue_entries, students};
use crate::error::PersistenceError;

/// Loads the complete fair state from the store.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if a table cannot be read or a row cannot be
/// reconstructed into its domain entity.
pub fn load_state(conn: &mut SqliteConnection) -> Result<FairState, PersistenceError> {
    let company_rows: Vec<CompanyRow> = companies::table
        .order(companies::company_id.asc())
        .select(CompanyRow::as_select())
        .load(conn)?;
    let student_rows: Vec<StudentRow> = students::table
        .order(students::student_id.asc())
        .select(StudentRow::as_select())
        .load(conn)?;
    let entry_rows: Vec<QueueEntryRow> = queue_entries::table
        .order(queue_entries::entry_id.asc())
        .select(QueueEntryRow::as_select())
        .load(conn)?;

    let companies: Vec<Company> = company_rows
        .into_iter()
        .map(CompanyRow::into_domain)
        .collect::<Result<Vec<Company>, PersistenceError>>()?;
    let students: Vec<Student> = student_rows
        .into_iter()
        .map(StudentRow::into_domain)
        .collect::<Result<Vec<Student>, PersistenceError>>()?;
    let entries: Vec<QueueEntry> = entry_rows
        .into_iter()
        .map(QueueEntryRow::into_domain)
        .collect::<Result<Vec<QueueEntry>, PersistenceError>>()?;

    debug!(
        companies = companies.len(),
        students = students.len(),
        entries = entries.len(),
        "Loaded fair state snapshot"
    );

    Ok(FairState {
        students,
        companies,
        entries,
    })
}

/// Counts the total number of companies.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_companies(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(companies::table.count().get_result(conn)?)
}

/// Counts the total number of students.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_students(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(students::table.count().get_result(conn)?)
}

/// Counts the total number of queue entries, completed ones included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_queue_entries(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(queue_entries::table.count().get_result(conn)?)
}
