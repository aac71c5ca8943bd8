// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fairline_domain::{Company, DomainError, QueueEntry, Student};
use fairline_notify::Notification;

/// The complete fair state the engine transitions over.
///
/// One snapshot holds every student, company and queue entry. Snapshots
/// are loaded from the store, transitioned immutably by [`crate::apply`],
/// and committed back in a single transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FairState {
    /// All registered students.
    pub students: Vec<Student>,
    /// All companies.
    pub companies: Vec<Company>,
    /// All queue entries across every company.
    pub entries: Vec<QueueEntry>,
}

impl FairState {
    /// Creates a new empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            students: Vec::new(),
            companies: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// Looks up a student by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StudentNotFound` if no student has this id.
    pub fn student(&self, student_id: i64) -> Result<&Student, DomainError> {
        self.students
            .iter()
            .find(|s| s.student_id == Some(student_id))
            .ok_or(DomainError::StudentNotFound(student_id))
    }

    /// Looks up a company by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CompanyNotFound` if no company has this id.
    pub fn company(&self, company_id: i64) -> Result<&Company, DomainError> {
        self.companies
            .iter()
            .find(|c| c.company_id == Some(company_id))
            .ok_or(DomainError::CompanyNotFound(company_id))
    }

    /// Looks up a queue entry by id.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EntryNotFound` if no entry has this id.
    pub fn entry(&self, entry_id: i64) -> Result<&QueueEntry, DomainError> {
        self.entries
            .iter()
            .find(|e| e.entry_id == Some(entry_id))
            .ok_or(DomainError::EntryNotFound(entry_id))
    }

    /// Looks up a student by id for mutation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StudentNotFound` if no student has this id.
    pub(crate) fn student_mut(&mut self, student_id: i64) -> Result<&mut Student, DomainError> {
        self.students
            .iter_mut()
            .find(|s| s.student_id == Some(student_id))
            .ok_or(DomainError::StudentNotFound(student_id))
    }

    /// Looks up a company by id for mutation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CompanyNotFound` if no company has this id.
    pub(crate) fn company_mut(&mut self, company_id: i64) -> Result<&mut Company, DomainError> {
        self.companies
            .iter_mut()
            .find(|c| c.company_id == Some(company_id))
            .ok_or(DomainError::CompanyNotFound(company_id))
    }

    /// Looks up a queue entry by id for mutation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EntryNotFound` if no entry has this id.
    pub(crate) fn entry_mut(&mut self, entry_id: i64) -> Result<&mut QueueEntry, DomainError> {
        self.entries
            .iter_mut()
            .find(|e| e.entry_id == Some(entry_id))
            .ok_or(DomainError::EntryNotFound(entry_id))
    }

    /// Returns a company's queue entries ordered by position.
    #[must_use]
    pub fn company_entries(&self, company_id: i64) -> Vec<&QueueEntry> {
        let mut entries: Vec<&QueueEntry> = self
            .entries
            .iter()
            .filter(|e| e.company_id == company_id)
            .collect();
        entries.sort_by_key(|e| e.position);
        entries
    }

    /// Returns a student's queue entries, newest inscription first.
    #[must_use]
    pub fn student_entries(&self, student_id: i64) -> Vec<&QueueEntry> {
        let mut entries: Vec<&QueueEntry> = self
            .entries
            .iter()
            .filter(|e| e.student_id == student_id)
            .collect();
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.entry_id.cmp(&a.entry_id))
        });
        entries
    }

    /// Returns the entry for a (company, student) pair, if one exists.
    ///
    /// At most one entry ever exists per pair; a completed entry still
    /// occupies the pair.
    #[must_use]
    pub fn entry_for(&self, company_id: i64, student_id: i64) -> Option<&QueueEntry> {
        self.entries
            .iter()
            .find(|e| e.company_id == company_id && e.student_id == student_id)
    }

    /// Returns the id the next inserted student will receive.
    ///
    /// Ids are max(existing)+1, the same assignment SQLite makes for
    /// rowids. The whole load-apply-commit sequence is serialized, so two
    /// transitions cannot hand out the same id.
    #[must_use]
    pub fn next_student_id(&self) -> i64 {
        self.students
            .iter()
            .filter_map(|s| s.student_id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Returns the id the next inserted company will receive.
    #[must_use]
    pub fn next_company_id(&self) -> i64 {
        self.companies
            .iter()
            .filter_map(|c| c.company_id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Returns the id the next inserted queue entry will receive.
    #[must_use]
    pub fn next_entry_id(&self) -> i64 {
        self.entries
            .iter()
            .filter_map(|e| e.entry_id)
            .max()
            .unwrap_or(0)
            + 1
    }
}

impl Default for FairState {
    fn default() -> Self {
        Self::new()
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The notification set is derived from the same transition
/// and is published only after the new state commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: FairState,
    /// The notifications this transition derived, in emission order.
    pub notifications: Vec<Notification>,
}
