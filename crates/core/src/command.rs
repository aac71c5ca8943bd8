// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fairline_domain::{Capacity, CompanyStatus, StudentStatus};

/// A command represents user or admin intent as data only.
///
/// Commands are the only way to request state changes; every one of them
/// goes through [`crate::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Register a new student.
    RegisterStudent {
        /// Given name.
        first_name: String,
        /// Family name.
        last_name: String,
    },
    /// Create a new company with a freshly generated access token.
    CreateCompany {
        /// Unique display name.
        name: String,
        /// Concurrent-interview capacity.
        max_concurrent_interviews: Capacity,
    },
    /// Inscribe a student into a company's queue.
    Inscribe {
        /// The company whose queue to join.
        company_id: i64,
        /// The joining student.
        student_id: i64,
    },
    /// Admin override of [`Command::Inscribe`] that skips the
    /// company-status check. The duplicate-entry check still applies.
    ForceInscribe {
        /// The company whose queue to join.
        company_id: i64,
        /// The student being force-added.
        student_id: i64,
    },
    /// Start the interview for a queue entry.
    StartInterview {
        /// The entry to start.
        entry_id: i64,
    },
    /// Mark a queue entry's interview complete.
    CompleteInterview {
        /// The entry to complete.
        entry_id: i64,
    },
    /// Delete a pending queue entry without renumbering positions.
    CancelInscription {
        /// The entry to delete.
        entry_id: i64,
    },
    /// Change a student's availability status directly.
    ///
    /// Only `available` and `paused` can be requested; the interview
    /// lifecycle owns `in_interview`.
    SetStudentStatus {
        /// The student changing status.
        student_id: i64,
        /// The requested status.
        new_status: StudentStatus,
    },
    /// Pause or resume a company.
    SetCompanyStatus {
        /// The company changing status.
        company_id: i64,
        /// The requested status.
        new_status: CompanyStatus,
    },
    /// Set every company to recruiting.
    BulkResume,
    /// Move a queue entry to a new position, shifting the entries in
    /// between by one.
    ReorderQueue {
        /// The company whose queue is being edited.
        company_id: i64,
        /// The entry to move.
        entry_id: i64,
        /// The requested position; clamped into the valid range.
        new_position: u32,
    },
    /// Replace a company's access token with a fresh one.
    RegenerateToken {
        /// The company whose token to replace.
        company_id: i64,
    },
    /// Change a company's concurrent-interview capacity.
    SetCapacity {
        /// The company whose capacity to change.
        company_id: i64,
        /// The new capacity.
        max_concurrent_interviews: Capacity,
    },
    /// Delete a student and all of their queue entries.
    DeleteStudent {
        /// The student to delete.
        student_id: i64,
    },
}
