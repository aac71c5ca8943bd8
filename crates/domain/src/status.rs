// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student and company status states and transition logic.
//!
//! Student status carries the current-company reference inside the
//! `in_interview` variant, so a student record cannot claim to be mid-interview
//! without naming the company, and cannot name a company while available or
//! paused. Transitions into and out of `in_interview` happen only through the
//! interview lifecycle; students may only request `available` ⇄ `paused`.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Student availability states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StudentStatus {
    /// Free to start an interview; counted by first-available.
    Available,
    /// Mid-interview at the referenced company.
    InInterview {
        /// The company currently interviewing this student.
        company_id: i64,
    },
    /// Temporarily out of rotation; queue positions are retained.
    Paused,
}

impl StudentStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization; the
    /// current-company reference is stored alongside it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::InInterview { .. } => "in_interview",
            Self::Paused => "paused",
        }
    }

    /// Reconstructs a status from its stored parts.
    ///
    /// The status string and the current-company column must agree:
    /// `in_interview` requires a company id, every other status forbids one.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStudentStatus` for an unrecognized status
    /// string and `DomainError::StatusCompanyMismatch` when the parts
    /// disagree.
    pub fn from_parts(
        status: &str,
        current_company_id: Option<i64>,
    ) -> Result<Self, DomainError> {
        match (status, current_company_id) {
            ("available", None) => Ok(Self::Available),
            ("paused", None) => Ok(Self::Paused),
            ("in_interview", Some(company_id)) => Ok(Self::InInterview { company_id }),
            ("available" | "paused" | "in_interview", _) => {
                Err(DomainError::StatusCompanyMismatch {
                    status: status.to_string(),
                    has_company: current_company_id.is_some(),
                })
            }
            _ => Err(DomainError::InvalidStudentStatus(status.to_string())),
        }
    }

    /// Parses a status a student may request directly.
    ///
    /// Only `available` and `paused` are requestable; `in_interview` is
    /// entered solely by starting an interview.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStudentStatus` if the string is not a
    /// requestable status.
    pub fn parse_requested(status: &str) -> Result<Self, DomainError> {
        match status {
            "available" => Ok(Self::Available),
            "paused" => Ok(Self::Paused),
            _ => Err(DomainError::InvalidStudentStatus(status.to_string())),
        }
    }

    /// Returns the current-company reference, if mid-interview.
    #[must_use]
    pub const fn company_id(&self) -> Option<i64> {
        match self {
            Self::InInterview { company_id } => Some(*company_id),
            Self::Available | Self::Paused => None,
        }
    }

    /// Returns true if the student may start a new interview.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Validates a student-requested transition to another status.
    ///
    /// Students may move between `available` and `paused` freely
    /// (same-status requests are permitted no-ops). A student who is
    /// mid-interview stays there until the company marks the interview
    /// complete, and `in_interview` can never be requested.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is
    /// not allowed.
    pub fn validate_direct_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if matches!(self, Self::InInterview { .. }) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "status is locked until the company marks the interview complete"
                    .to_string(),
            });
        }

        if matches!(new_status, Self::InInterview { .. }) {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "in_interview is entered only by starting an interview".to_string(),
            });
        }

        Ok(())
    }
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Company recruiting states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompanyStatus {
    /// Visible to students and admitting interviews.
    Recruiting,
    /// Hidden from the public list; no inscriptions or starts admitted.
    Paused,
}

impl CompanyStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recruiting => "recruiting",
            Self::Paused => "paused",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCompanyStatus` if the string is not a
    /// valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "recruiting" => Ok(Self::Recruiting),
            "paused" => Ok(Self::Paused),
            _ => Err(DomainError::InvalidCompanyStatus(s.to_string())),
        }
    }

    /// Returns true if the company appears in the public list and admits work.
    #[must_use]
    pub const fn is_recruiting(&self) -> bool {
        matches!(self, Self::Recruiting)
    }
}

impl std::fmt::Display for CompanyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CompanyStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}
