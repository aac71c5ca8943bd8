// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel row structs and their reconstruction into domain entities.
//!
//! The status and outcome columns are stored in split form (a status string
//! plus a nullable companion column); reconstruction goes through the
//! domain `from_parts` constructors so disagreeing parts are rejected at
//! the load boundary instead of leaking into the engine.

use diesel::prelude::*;
use fairline_domain::{
    AccessToken, Capacity, Company, CompanyStatus, EntryOutcome, QueueEntry, Student,
    StudentStatus,
};
use num_traits::ToPrimitive;
use std::str::FromStr;

use crate::diesel_schema::{companies, queue_entries, students};
use crate::error::PersistenceError;

/// Diesel Queryable struct for company rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = companies)]
pub(crate) struct CompanyRow {
    company_id: i64,
    name: String,
    access_token: String,
    status: String,
    max_concurrent_interviews: i32,
    created_at: String,
}

impl CompanyRow {
    /// Reconstructs the domain company from this row.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructionError` if the status string or capacity
    /// column holds a value the domain rejects.
    pub(crate) fn into_domain(self) -> Result<Company, PersistenceError> {
        let status: CompanyStatus = CompanyStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let capacity_value: u32 = self.max_concurrent_interviews.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "Company {} has a negative interview capacity",
                self.company_id
            ))
        })?;
        let capacity: Capacity = Capacity::new(capacity_value)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(Company::with_id(
            self.company_id,
            self.name,
            AccessToken::new(&self.access_token),
            status,
            capacity,
            self.created_at,
        ))
    }
}

/// Diesel Queryable struct for student rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = students)]
pub(crate) struct StudentRow {
    student_id: i64,
    first_name: String,
    last_name: String,
    status: String,
    current_company_id: Option<i64>,
    registered_at: String,
}

impl StudentRow {
    /// Reconstructs the domain student from this row.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructionError` if the status string is unknown or
    /// the status and current-company columns disagree.
    pub(crate) fn into_domain(self) -> Result<Student, PersistenceError> {
        let status: StudentStatus =
            StudentStatus::from_parts(&self.status, self.current_company_id)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(Student::with_id(
            self.student_id,
            self.first_name,
            self.last_name,
            status,
            self.registered_at,
        ))
    }
}

/// Diesel Queryable struct for queue entry rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = queue_entries)]
pub(crate) struct QueueEntryRow {
    entry_id: i64,
    company_id: i64,
    student_id: i64,
    position: i32,
    completed: i32,
    completed_at: Option<String>,
    created_at: String,
}

impl QueueEntryRow {
    /// Reconstructs the domain queue entry from this row.
    ///
    /// # Errors
    ///
    /// Returns `ReconstructionError` if the position is not positive or
    /// the completed flag and timestamp disagree.
    pub(crate) fn into_domain(self) -> Result<QueueEntry, PersistenceError> {
        let position: u32 = self.position.to_u32().ok_or_else(|| {
            PersistenceError::ReconstructionError(format!(
                "Queue entry {} has a negative position",
                self.entry_id
            ))
        })?;
        let outcome: EntryOutcome =
            EntryOutcome::from_parts(self.completed != 0, self.completed_at)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(QueueEntry::with_id(
            self.entry_id,
            self.company_id,
            self.student_id,
            position,
            outcome,
            self.created_at,
        ))
    }
}
