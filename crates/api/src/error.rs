// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::token_policy::TokenFormatError;
use fairline::CoreError;
use fairline_domain::DomainError;
use fairline_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<TokenFormatError> for ApiError {
    fn from(err: TokenFormatError) -> Self {
        Self::AuthenticationFailed {
            reason: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        Self::Internal {
            message: format!("Persistence error: {err}"),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::AlreadyInscribed { company_name } => ApiError::DomainRuleViolation {
            rule: String::from("already_inscribed"),
            message: format!("Student is already in the queue at '{company_name}'"),
        },
        DomainError::AlreadyInterviewed { company_name } => ApiError::DomainRuleViolation {
            rule: String::from("already_interviewed"),
            message: format!("Student has already interviewed with '{company_name}'"),
        },
        DomainError::AlreadyCompleted => ApiError::DomainRuleViolation {
            rule: String::from("already_completed"),
            message: String::from("This queue entry has already been marked complete"),
        },
        DomainError::StudentNotAvailable { current_company } => ApiError::DomainRuleViolation {
            rule: String::from("student_not_available"),
            message: match current_company {
                Some(name) => format!("Student is already in an interview at '{name}'"),
                None => String::from("Student is not available"),
            },
        },
        DomainError::CompanyPaused { company_name } => ApiError::DomainRuleViolation {
            rule: String::from("company_paused"),
            message: format!("Company '{company_name}' is paused"),
        },
        DomainError::NoSlots { company_name } => ApiError::DomainRuleViolation {
            rule: String::from("no_slots"),
            message: format!("Company '{company_name}' has no available slots"),
        },
        DomainError::NotYourTurn { first_student } => ApiError::DomainRuleViolation {
            rule: String::from("not_your_turn"),
            message: match first_student {
                Some(name) => format!("It is not this student's turn: '{name}' is first"),
                None => String::from("It is not this student's turn yet"),
            },
        },
        DomainError::StudentNotInInterviewHere { company_name } => ApiError::DomainRuleViolation {
            rule: String::from("not_in_interview_here"),
            message: format!("Student is not currently in an interview at '{company_name}'"),
        },
        DomainError::StudentNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Student"),
            message: format!("Student {id} does not exist"),
        },
        DomainError::CompanyNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Company"),
            message: format!("Company {id} does not exist"),
        },
        DomainError::EntryNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Queue entry"),
            message: format!("Queue entry {id} does not exist"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("status_transition"),
                message: format!("Cannot change status from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::InvalidStudentStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid student status: '{status}'"),
        },
        DomainError::InvalidCompanyStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid company status: '{status}'"),
        },
        DomainError::StatusCompanyMismatch {
            status,
            has_company,
        } => ApiError::Internal {
            message: if has_company {
                format!(
                    "State reconstruction failed: status '{status}' cannot carry a current-company reference"
                )
            } else {
                format!(
                    "State reconstruction failed: status '{status}' requires a current-company reference"
                )
            },
        },
        DomainError::CompletionTimestampMismatch { completed } => ApiError::Internal {
            message: if completed {
                String::from(
                    "State reconstruction failed: completed entry is missing its completion timestamp",
                )
            } else {
                String::from(
                    "State reconstruction failed: pending entry carries a completion timestamp",
                )
            },
        },
        DomainError::InvalidCapacity(value) => ApiError::InvalidInput {
            field: String::from("max_concurrent_interviews"),
            message: format!("Invalid interview capacity: {value}. Must be between 1 and 50"),
        },
        DomainError::InvalidPosition(value) => ApiError::InvalidInput {
            field: String::from("new_position"),
            message: format!("Invalid queue position: {value}. Must be 1 or greater"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::DuplicateCompanyName(name) => ApiError::DomainRuleViolation {
            rule: String::from("unique_company_name"),
            message: format!("Company '{name}' already exists"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
