// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and queue admission.
///
/// Every variant is a business-rule rejection, not a system fault. Callers
/// may always retry after correcting the condition the variant names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Student already holds an incomplete entry at this company.
    AlreadyInscribed {
        /// The company the student is already queued at.
        company_name: String,
    },
    /// Student already completed an interview at this company.
    AlreadyInterviewed {
        /// The company the student already interviewed with.
        company_name: String,
    },
    /// The queue entry has already been marked complete.
    AlreadyCompleted,
    /// Student is not in the `available` status.
    StudentNotAvailable {
        /// The company currently interviewing the student, when mid-interview.
        current_company: Option<String>,
    },
    /// Company is paused and not admitting interviews or inscriptions.
    CompanyPaused {
        /// The paused company.
        company_name: String,
    },
    /// Company has no free concurrent-interview slots.
    NoSlots {
        /// The company whose capacity is exhausted.
        company_name: String,
    },
    /// Another entry is ahead in the first-available ordering.
    NotYourTurn {
        /// The student whose turn it is, when one exists.
        first_student: Option<String>,
    },
    /// Completion was requested for a student not mid-interview at this company.
    StudentNotInInterviewHere {
        /// The company attempting the completion.
        company_name: String,
    },
    /// Student id does not exist.
    StudentNotFound(i64),
    /// Company id does not exist.
    CompanyNotFound(i64),
    /// Queue entry id does not exist.
    EntryNotFound(i64),
    /// A status transition is not permitted by lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is refused.
        reason: String,
    },
    /// Status string is not a recognized student status.
    InvalidStudentStatus(String),
    /// Status string is not a recognized company status.
    InvalidCompanyStatus(String),
    /// Status and current-company reference disagree.
    ///
    /// `in_interview` requires a current company; every other status
    /// forbids one.
    StatusCompanyMismatch {
        /// The status string under reconstruction.
        status: String,
        /// Whether a current-company reference was present.
        has_company: bool,
    },
    /// Completion flag and completion timestamp disagree.
    CompletionTimestampMismatch {
        /// Whether the entry was flagged complete.
        completed: bool,
    },
    /// Interview capacity is outside the permitted range.
    InvalidCapacity(u32),
    /// Queue position must be a positive integer.
    InvalidPosition(i64),
    /// A required name field is empty.
    InvalidName(String),
    /// Company name is already taken.
    DuplicateCompanyName(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyInscribed { company_name } => {
                write!(f, "Student is already in the queue at '{company_name}'")
            }
            Self::AlreadyInterviewed { company_name } => {
                write!(
                    f,
                    "Student has already interviewed with '{company_name}'"
                )
            }
            Self::AlreadyCompleted => {
                write!(f, "This queue entry has already been marked complete")
            }
            Self::StudentNotAvailable { current_company } => match current_company {
                Some(name) => {
                    write!(f, "Student is already in an interview at '{name}'")
                }
                None => write!(f, "Student is not available"),
            },
            Self::CompanyPaused { company_name } => {
                write!(f, "Company '{company_name}' is paused")
            }
            Self::NoSlots { company_name } => {
                write!(f, "Company '{company_name}' has no available slots")
            }
            Self::NotYourTurn { first_student } => match first_student {
                Some(name) => {
                    write!(f, "It is not this student's turn: '{name}' is first")
                }
                None => write!(f, "It is not this student's turn yet"),
            },
            Self::StudentNotInInterviewHere { company_name } => {
                write!(
                    f,
                    "Student is not currently in an interview at '{company_name}'"
                )
            }
            Self::StudentNotFound(id) => write!(f, "Student {id} not found"),
            Self::CompanyNotFound(id) => write!(f, "Company {id} not found"),
            Self::EntryNotFound(id) => write!(f, "Queue entry {id} not found"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot change status from '{from}' to '{to}': {reason}")
            }
            Self::InvalidStudentStatus(status) => {
                write!(f, "Invalid student status: '{status}'")
            }
            Self::InvalidCompanyStatus(status) => {
                write!(f, "Invalid company status: '{status}'")
            }
            Self::StatusCompanyMismatch {
                status,
                has_company,
            } => {
                if *has_company {
                    write!(
                        f,
                        "Status '{status}' cannot carry a current-company reference"
                    )
                } else {
                    write!(f, "Status '{status}' requires a current-company reference")
                }
            }
            Self::CompletionTimestampMismatch { completed } => {
                if *completed {
                    write!(f, "Completed entry is missing its completion timestamp")
                } else {
                    write!(f, "Pending entry carries a completion timestamp")
                }
            }
            Self::InvalidCapacity(value) => {
                write!(
                    f,
                    "Invalid interview capacity: {value}. Must be between 1 and 50"
                )
            }
            Self::InvalidPosition(value) => {
                write!(f, "Invalid queue position: {value}. Must be 1 or greater")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::DuplicateCompanyName(name) => {
                write!(f, "Company '{name}' already exists")
            }
        }
    }
}

impl std::error::Error for DomainError {}
