// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Core domain entities for the Fairline queue system.
//!
//! Students inscribe into company queues; each inscription is a
//! [`QueueEntry`] holding an immutable position. Companies own a bounded
//! number of concurrent-interview slots. Timestamps are RFC 3339 strings
//! in UTC throughout; their lexicographic order is their chronological
//! order.

use crate::error::DomainError;
use crate::status::{CompanyStatus, StudentStatus};
use serde::{Deserialize, Serialize};

/// URL-safe alphabet used for company access tokens.
const TOKEN_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Length of a generated company access token.
pub const TOKEN_LENGTH: usize = 32;

/// Opaque access credential identifying a company.
///
/// A company has no account; the token in its dashboard URL is its sole
/// authentication mechanism. Tokens are 32 URL-safe characters drawn
/// uniformly from a 64-character alphabet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessToken {
    value: String,
}

impl AccessToken {
    /// Wraps an existing token value, e.g. one read back from storage.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Generates a fresh random token.
    #[must_use]
    pub fn generate() -> Self {
        let value: String = (0..TOKEN_LENGTH)
            .map(|_| {
                let index = usize::from(rand::random::<u8>() & 0x3f);
                char::from(TOKEN_ALPHABET[index])
            })
            .collect();
        Self { value }
    }

    /// Returns the token value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Concurrent-interview capacity of a company.
///
/// Admin-controlled only; the engine never mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capacity(u32);

impl Capacity {
    /// Minimum permitted capacity.
    pub const MIN: u32 = 1;
    /// Maximum permitted capacity.
    pub const MAX: u32 = 50;

    /// Creates a validated capacity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCapacity` if the value is outside
    /// `1..=50`.
    pub const fn new(value: u32) -> Result<Self, DomainError> {
        if value >= Self::MIN && value <= Self::MAX {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidCapacity(value))
        }
    }

    /// Returns the capacity value.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

/// Outcome of a queue entry.
///
/// An entry is `Pending` from inscription until the company marks the
/// interview complete, which is terminal. The completion timestamp lives
/// inside the `Completed` variant so it cannot exist without the flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// Interview not yet held (waiting or mid-interview).
    Pending,
    /// Interview held; terminal.
    Completed {
        /// When the company marked the entry complete (RFC 3339, UTC).
        at: String,
    },
}

impl EntryOutcome {
    /// Reconstructs an outcome from its stored parts.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CompletionTimestampMismatch` when the
    /// completion flag and timestamp disagree.
    pub fn from_parts(
        completed: bool,
        completed_at: Option<String>,
    ) -> Result<Self, DomainError> {
        match (completed, completed_at) {
            (false, None) => Ok(Self::Pending),
            (true, Some(at)) => Ok(Self::Completed { at }),
            (completed, _) => Err(DomainError::CompletionTimestampMismatch { completed }),
        }
    }

    /// Returns true once the entry has been marked complete.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Returns the completion timestamp, if completed.
    #[must_use]
    pub fn completed_at(&self) -> Option<&str> {
        match self {
            Self::Completed { at } => Some(at),
            Self::Pending => None,
        }
    }
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    /// Canonical id assigned by the store; `None` until first persisted.
    pub student_id: Option<i64>,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Availability status; see [`StudentStatus`].
    pub status: StudentStatus,
    /// When the student registered (RFC 3339, UTC).
    pub registered_at: String,
}

impl Student {
    /// Creates a new student in the `available` status.
    ///
    /// # Arguments
    ///
    /// * `first_name` - Given name
    /// * `last_name` - Family name
    /// * `registered_at` - Registration timestamp (RFC 3339, UTC)
    #[must_use]
    pub fn new(first_name: &str, last_name: &str, registered_at: &str) -> Self {
        Self {
            student_id: None,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            status: StudentStatus::Available,
            registered_at: registered_at.to_string(),
        }
    }

    /// Creates a student with a known canonical id, e.g. from storage.
    #[must_use]
    pub fn with_id(
        student_id: i64,
        first_name: String,
        last_name: String,
        status: StudentStatus,
        registered_at: String,
    ) -> Self {
        Self {
            student_id: Some(student_id),
            first_name,
            last_name,
            status,
            registered_at,
        }
    }

    /// Returns the display name ("First Last").
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A company participating in the job fair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Canonical id assigned by the store; `None` until first persisted.
    pub company_id: Option<i64>,
    /// Unique display name.
    pub name: String,
    /// Sole authentication credential; see [`AccessToken`].
    pub access_token: AccessToken,
    /// Recruiting status; see [`CompanyStatus`].
    pub status: CompanyStatus,
    /// Concurrent-interview capacity.
    pub max_concurrent_interviews: Capacity,
    /// When the company was created (RFC 3339, UTC).
    pub created_at: String,
}

impl Company {
    /// Creates a new recruiting company with a freshly generated token.
    ///
    /// # Arguments
    ///
    /// * `name` - Unique display name
    /// * `max_concurrent_interviews` - Slot capacity
    /// * `created_at` - Creation timestamp (RFC 3339, UTC)
    #[must_use]
    pub fn new(name: &str, max_concurrent_interviews: Capacity, created_at: &str) -> Self {
        Self {
            company_id: None,
            name: name.to_string(),
            access_token: AccessToken::generate(),
            status: CompanyStatus::Recruiting,
            max_concurrent_interviews,
            created_at: created_at.to_string(),
        }
    }

    /// Creates a company with a known canonical id, e.g. from storage.
    #[must_use]
    pub fn with_id(
        company_id: i64,
        name: String,
        access_token: AccessToken,
        status: CompanyStatus,
        max_concurrent_interviews: Capacity,
        created_at: String,
    ) -> Self {
        Self {
            company_id: Some(company_id),
            name,
            access_token,
            status,
            max_concurrent_interviews,
            created_at,
        }
    }
}

/// One student's inscription in one company's queue.
///
/// At most one entry ever exists per (company, student) pair. The position
/// is assigned at creation and never renumbered by normal flows; skipped
/// or cancelled entries leave gaps in who is *eligible*, never in the
/// position sequence itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    /// Canonical id assigned by the store; `None` until first persisted.
    pub entry_id: Option<i64>,
    /// The company whose queue this entry belongs to.
    pub company_id: i64,
    /// The inscribed student.
    pub student_id: i64,
    /// One-based position in the company's queue; immutable outside
    /// administrative reorder.
    pub position: u32,
    /// Pending or completed; see [`EntryOutcome`].
    pub outcome: EntryOutcome,
    /// When the inscription was created (RFC 3339, UTC).
    pub created_at: String,
}

impl QueueEntry {
    /// Creates a new pending entry at the given position.
    #[must_use]
    pub fn new(company_id: i64, student_id: i64, position: u32, created_at: &str) -> Self {
        Self {
            entry_id: None,
            company_id,
            student_id,
            position,
            outcome: EntryOutcome::Pending,
            created_at: created_at.to_string(),
        }
    }

    /// Creates an entry with a known canonical id, e.g. from storage.
    #[must_use]
    pub fn with_id(
        entry_id: i64,
        company_id: i64,
        student_id: i64,
        position: u32,
        outcome: EntryOutcome,
        created_at: String,
    ) -> Self {
        Self {
            entry_id: Some(entry_id),
            company_id,
            student_id,
            position,
            outcome,
            created_at,
        }
    }
}
