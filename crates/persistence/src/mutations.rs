// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transactional application of a state transition.
//!
//! The engine produces a full next-state snapshot; this module diffs it
//! against the snapshot the transition was computed from and commits the
//! row changes in one transaction. Deletes run children first and writes
//! run parents first, so foreign keys hold at every intermediate step.
//! Entity ids are assigned by the engine as max(existing)+1 and inserted
//! explicitly, which keeps the stored ids identical to the ones the
//! transition's notifications already reference.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fairline::FairState;
use fairline_domain::{Company, QueueEntry, Student};
use num_traits::ToPrimitive;
use tracing::debug;

use crate::diesel_schema::{companies, queue_entries, students};
use crate::error::PersistenceError;

/// Commits every row change between two state snapshots in one
/// transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `before` - The snapshot the transition was computed from
/// * `after` - The snapshot the transition produced
///
/// # Errors
///
/// Returns an error if any row write fails; no change is applied in that
/// case.
pub fn apply_transition(
    conn: &mut SqliteConnection,
    before: &FairState,
    after: &FairState,
) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        delete_removed_entries(conn, before, after)?;
        delete_removed_students(conn, before, after)?;
        delete_removed_companies(conn, before, after)?;
        write_companies(conn, before, after)?;
        write_students(conn, before, after)?;
        write_entries(conn, before, after)?;
        Ok(())
    })
}

fn delete_removed_entries(
    conn: &mut SqliteConnection,
    before: &FairState,
    after: &FairState,
) -> Result<(), PersistenceError> {
    for entry in &before.entries {
        let Some(entry_id) = entry.entry_id else {
            continue;
        };
        if after.entries.iter().any(|e| e.entry_id == Some(entry_id)) {
            continue;
        }
        diesel::delete(queue_entries::table.filter(queue_entries::entry_id.eq(entry_id)))
            .execute(conn)?;
        debug!(entry_id, "Deleted queue entry");
    }
    Ok(())
}

fn delete_removed_students(
    conn: &mut SqliteConnection,
    before: &FairState,
    after: &FairState,
) -> Result<(), PersistenceError> {
    for student in &before.students {
        let Some(student_id) = student.student_id else {
            continue;
        };
        if after
            .students
            .iter()
            .any(|s| s.student_id == Some(student_id))
        {
            continue;
        }
        diesel::delete(students::table.filter(students::student_id.eq(student_id)))
            .execute(conn)?;
        debug!(student_id, "Deleted student");
    }
    Ok(())
}

fn delete_removed_companies(
    conn: &mut SqliteConnection,
    before: &FairState,
    after: &FairState,
) -> Result<(), PersistenceError> {
    for company in &before.companies {
        let Some(company_id) = company.company_id else {
            continue;
        };
        if after
            .companies
            .iter()
            .any(|c| c.company_id == Some(company_id))
        {
            continue;
        }
        diesel::delete(companies::table.filter(companies::company_id.eq(company_id)))
            .execute(conn)?;
        debug!(company_id, "Deleted company");
    }
    Ok(())
}

fn write_companies(
    conn: &mut SqliteConnection,
    before: &FairState,
    after: &FairState,
) -> Result<(), PersistenceError> {
    for company in &after.companies {
        let company_id: i64 = company.company_id.ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "Company '{}' must have a company_id to persist",
                company.name
            ))
        })?;
        match before
            .companies
            .iter()
            .find(|c| c.company_id == Some(company_id))
        {
            Some(existing) if existing == company => {}
            Some(_) => update_company(conn, company_id, company)?,
            None => insert_company(conn, company_id, company)?,
        }
    }
    Ok(())
}

fn insert_company(
    conn: &mut SqliteConnection,
    company_id: i64,
    company: &Company,
) -> Result<(), PersistenceError> {
    diesel::insert_into(companies::table)
        .values((
            companies::company_id.eq(company_id),
            companies::name.eq(&company.name),
            companies::access_token.eq(company.access_token.value()),
            companies::status.eq(company.status.as_str()),
            companies::max_concurrent_interviews.eq(capacity_column(company)?),
            companies::created_at.eq(&company.created_at),
        ))
        .execute(conn)?;

    debug!(company_id, name = %company.name, "Inserted company");
    Ok(())
}

fn update_company(
    conn: &mut SqliteConnection,
    company_id: i64,
    company: &Company,
) -> Result<(), PersistenceError> {
    diesel::update(companies::table.filter(companies::company_id.eq(company_id)))
        .set((
            companies::name.eq(&company.name),
            companies::access_token.eq(company.access_token.value()),
            companies::status.eq(company.status.as_str()),
            companies::max_concurrent_interviews.eq(capacity_column(company)?),
            companies::created_at.eq(&company.created_at),
        ))
        .execute(conn)?;

    debug!(company_id, name = %company.name, "Updated company");
    Ok(())
}

fn write_students(
    conn: &mut SqliteConnection,
    before: &FairState,
    after: &FairState,
) -> Result<(), PersistenceError> {
    for student in &after.students {
        let student_id: i64 = student.student_id.ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "Student '{}' must have a student_id to persist",
                student.full_name()
            ))
        })?;
        match before
            .students
            .iter()
            .find(|s| s.student_id == Some(student_id))
        {
            Some(existing) if existing == student => {}
            Some(_) => update_student(conn, student_id, student)?,
            None => insert_student(conn, student_id, student)?,
        }
    }
    Ok(())
}

fn insert_student(
    conn: &mut SqliteConnection,
    student_id: i64,
    student: &Student,
) -> Result<(), PersistenceError> {
    diesel::insert_into(students::table)
        .values((
            students::student_id.eq(student_id),
            students::first_name.eq(&student.first_name),
            students::last_name.eq(&student.last_name),
            students::status.eq(student.status.as_str()),
            students::current_company_id.eq(student.status.company_id()),
            students::registered_at.eq(&student.registered_at),
        ))
        .execute(conn)?;

    debug!(student_id, "Inserted student");
    Ok(())
}

fn update_student(
    conn: &mut SqliteConnection,
    student_id: i64,
    student: &Student,
) -> Result<(), PersistenceError> {
    diesel::update(students::table.filter(students::student_id.eq(student_id)))
        .set((
            students::first_name.eq(&student.first_name),
            students::last_name.eq(&student.last_name),
            students::status.eq(student.status.as_str()),
            students::current_company_id.eq(student.status.company_id()),
            students::registered_at.eq(&student.registered_at),
        ))
        .execute(conn)?;

    debug!(student_id, status = %student.status, "Updated student");
    Ok(())
}

fn write_entries(
    conn: &mut SqliteConnection,
    before: &FairState,
    after: &FairState,
) -> Result<(), PersistenceError> {
    for entry in &after.entries {
        let entry_id: i64 = entry.entry_id.ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "Queue entry for company {} and student {} must have an entry_id to persist",
                entry.company_id, entry.student_id
            ))
        })?;
        match before.entries.iter().find(|e| e.entry_id == Some(entry_id)) {
            Some(existing) if existing == entry => {}
            Some(_) => update_entry(conn, entry_id, entry)?,
            None => insert_entry(conn, entry_id, entry)?,
        }
    }
    Ok(())
}

fn insert_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
    entry: &QueueEntry,
) -> Result<(), PersistenceError> {
    diesel::insert_into(queue_entries::table)
        .values((
            queue_entries::entry_id.eq(entry_id),
            queue_entries::company_id.eq(entry.company_id),
            queue_entries::student_id.eq(entry.student_id),
            queue_entries::position.eq(position_column(entry)?),
            queue_entries::completed.eq(i32::from(entry.outcome.is_completed())),
            queue_entries::completed_at.eq(entry.outcome.completed_at()),
            queue_entries::created_at.eq(&entry.created_at),
        ))
        .execute(conn)?;

    debug!(entry_id, position = entry.position, "Inserted queue entry");
    Ok(())
}

fn update_entry(
    conn: &mut SqliteConnection,
    entry_id: i64,
    entry: &QueueEntry,
) -> Result<(), PersistenceError> {
    diesel::update(queue_entries::table.filter(queue_entries::entry_id.eq(entry_id)))
        .set((
            queue_entries::company_id.eq(entry.company_id),
            queue_entries::student_id.eq(entry.student_id),
            queue_entries::position.eq(position_column(entry)?),
            queue_entries::completed.eq(i32::from(entry.outcome.is_completed())),
            queue_entries::completed_at.eq(entry.outcome.completed_at()),
            queue_entries::created_at.eq(&entry.created_at),
        ))
        .execute(conn)?;

    debug!(entry_id, position = entry.position, "Updated queue entry");
    Ok(())
}

fn capacity_column(company: &Company) -> Result<i32, PersistenceError> {
    company
        .max_concurrent_interviews
        .value()
        .to_i32()
        .ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "Company '{}' has an interview capacity outside the storable range",
                company.name
            ))
        })
}

fn position_column(entry: &QueueEntry) -> Result<i32, PersistenceError> {
    entry.position.to_i32().ok_or_else(|| {
        PersistenceError::ReconstructionError(format!(
            "Queue entry position {} is outside the storable range",
            entry.position
        ))
    })
}
