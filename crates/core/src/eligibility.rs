// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only eligibility and dashboard computations.
//!
//! Everything in this module is a pure function over a [`FairState`]
//! snapshot. The transition function calls these before and after
//! mutating; the api layer calls them directly for dashboard reads.

use crate::state::FairState;
use fairline_domain::{Company, CompanyStatus, DomainError, QueueEntry, Student};
use num_traits::ToPrimitive;

/// Counts the entries currently being interviewed at a company.
///
/// An entry counts when it is still pending and its student is
/// mid-interview at this exact company. Completed entries never count,
/// and neither does a student interviewing elsewhere.
#[must_use]
pub fn in_interview_count(state: &FairState, company: &Company) -> usize {
    let company_id: i64 = company.company_id.unwrap_or_default();
    state
        .entries
        .iter()
        .filter(|e| e.company_id == company_id && !e.outcome.is_completed())
        .filter(|e| {
            state
                .student(e.student_id)
                .is_ok_and(|s| s.status.company_id() == Some(company_id))
        })
        .count()
}

/// Returns how many concurrent-interview slots a company has free.
///
/// `max(0, max_concurrent_interviews - in_interview_count)`; never
/// negative, even after an administrative capacity shrink below the live
/// interview count.
#[must_use]
pub fn available_slots(state: &FairState, company: &Company) -> u32 {
    let occupied: u32 = in_interview_count(state, company)
        .to_u32()
        .unwrap_or(u32::MAX);
    company
        .max_concurrent_interviews
        .value()
        .saturating_sub(occupied)
}

/// Returns the first `depth` entries of a company's queue whose student
/// is available, ordered by position.
///
/// Students who are paused or busy elsewhere are skipped but keep their
/// position value; they reappear in this list as soon as they are
/// available again.
#[must_use]
pub fn first_available<'a>(
    state: &'a FairState,
    company: &Company,
    depth: usize,
) -> Vec<&'a QueueEntry> {
    let company_id: i64 = company.company_id.unwrap_or_default();
    state
        .company_entries(company_id)
        .into_iter()
        .filter(|e| !e.outcome.is_completed())
        .filter(|e| {
            state
                .student(e.student_id)
                .is_ok_and(|s| s.status.is_available())
        })
        .take(depth)
        .collect()
}

/// Checks whether a queue entry may start its interview right now.
///
/// The checks run in a fixed order and short-circuit on the first
/// failure:
///
/// 1. the entry is already completed,
/// 2. the student is not available,
/// 3. the company is not recruiting,
/// 4. the company has no free slot,
/// 5. another entry is ahead in the first-available ordering.
///
/// # Errors
///
/// Returns the specific [`DomainError`] for the first failing check;
/// `StudentNotFound`/`CompanyNotFound` if the entry references ids that
/// are not in the snapshot.
pub fn can_start_interview(state: &FairState, entry: &QueueEntry) -> Result<(), DomainError> {
    if entry.outcome.is_completed() {
        return Err(DomainError::AlreadyCompleted);
    }

    let student: &Student = state.student(entry.student_id)?;
    let company: &Company = state.company(entry.company_id)?;

    if !student.status.is_available() {
        let current_company: Option<String> = student
            .status
            .company_id()
            .and_then(|id| state.company(id).ok())
            .map(|c| c.name.clone());
        return Err(DomainError::StudentNotAvailable { current_company });
    }

    if !company.status.is_recruiting() {
        return Err(DomainError::CompanyPaused {
            company_name: company.name.clone(),
        });
    }

    if available_slots(state, company) == 0 {
        return Err(DomainError::NoSlots {
            company_name: company.name.clone(),
        });
    }

    let head: Vec<&QueueEntry> = first_available(state, company, 1);
    if head.first().map(|e| e.entry_id) != Some(entry.entry_id) {
        let first_student: Option<String> = head
            .first()
            .and_then(|e| state.student(e.student_id).ok())
            .map(Student::full_name);
        return Err(DomainError::NotYourTurn { first_student });
    }

    Ok(())
}

/// Counts the incomplete entries ahead of this one in its queue.
///
/// An entry whose student is mid-interview at this company is excluded:
/// they are about to free a slot and no longer block anyone. Display
/// quantity only; eligibility gating goes through
/// [`can_start_interview`].
#[must_use]
pub fn students_ahead_count(state: &FairState, entry: &QueueEntry) -> usize {
    state
        .entries
        .iter()
        .filter(|e| {
            e.company_id == entry.company_id
                && !e.outcome.is_completed()
                && e.position < entry.position
        })
        .filter(|e| {
            state
                .student(e.student_id)
                .is_ok_and(|s| s.status.company_id() != Some(entry.company_id))
        })
        .count()
}

/// One pending inscription of a student, evaluated for startability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opportunity {
    /// The queue entry's id.
    pub entry_id: i64,
    /// The company's id.
    pub company_id: i64,
    /// The company's display name.
    pub company_name: String,
    /// The company's recruiting status.
    pub company_status: CompanyStatus,
    /// The entry's queue position.
    pub position: u32,
    /// Whether the student could start this interview right now.
    pub can_start: bool,
    /// Incomplete entries ahead, excluding mid-interview students.
    pub ahead_count: u32,
    /// Why the interview cannot start, when it cannot.
    pub reason: Option<String>,
}

/// Evaluates every pending inscription of a student.
///
/// The list is sorted best-first: startable opportunities before blocked
/// ones, then by queue position. The head of the sorted list is the
/// opportunity the propagator promotes with an urgent notification when
/// the student becomes available.
#[must_use]
pub fn student_opportunities(state: &FairState, student: &Student) -> Vec<Opportunity> {
    let student_id: i64 = student.student_id.unwrap_or_default();
    let mut opportunities: Vec<Opportunity> = state
        .entries
        .iter()
        .filter(|e| e.student_id == student_id && !e.outcome.is_completed())
        .filter_map(|entry| {
            let company: &Company = state.company(entry.company_id).ok()?;
            let verdict: Result<(), DomainError> = can_start_interview(state, entry);
            Some(Opportunity {
                entry_id: entry.entry_id.unwrap_or_default(),
                company_id: entry.company_id,
                company_name: company.name.clone(),
                company_status: company.status,
                position: entry.position,
                can_start: verdict.is_ok(),
                ahead_count: students_ahead_count(state, entry)
                    .to_u32()
                    .unwrap_or(u32::MAX),
                reason: verdict.err().map(|e| e.to_string()),
            })
        })
        .collect();
    opportunities.sort_by(|a, b| {
        b.can_start
            .cmp(&a.can_start)
            .then(a.position.cmp(&b.position))
    });
    opportunities
}

/// One entry in the in-interview section of a company dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSlot {
    /// The queue entry's id.
    pub entry_id: i64,
    /// The student's id.
    pub student_id: i64,
    /// The student's full name.
    pub student_name: String,
    /// The entry's queue position.
    pub position: u32,
    /// When the inscription was created (RFC 3339, UTC).
    pub created_at: String,
}

/// One entry in the waiting section of a company dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitingSlot {
    /// The queue entry's id.
    pub entry_id: i64,
    /// The student's id.
    pub student_id: i64,
    /// The student's full name.
    pub student_name: String,
    /// The entry's queue position.
    pub position: u32,
    /// When the inscription was created (RFC 3339, UTC).
    pub created_at: String,
    /// True when the student is currently paused or busy elsewhere.
    pub greyed: bool,
    /// Incomplete entries ahead, excluding mid-interview students.
    pub students_ahead: u32,
}

/// One entry in the completed section of a company dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSlot {
    /// The queue entry's id.
    pub entry_id: i64,
    /// The student's id.
    pub student_id: i64,
    /// The student's full name.
    pub student_name: String,
    /// The entry's queue position.
    pub position: u32,
    /// When the interview was marked complete (RFC 3339, UTC).
    pub completed_at: String,
}

/// A company's full queue dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStatus {
    /// Entries currently being interviewed, by position.
    pub in_interview: Vec<InterviewSlot>,
    /// Pending entries still waiting, by position.
    pub waiting: Vec<WaitingSlot>,
    /// Completed entries, most recent completion first.
    pub completed: Vec<CompletedSlot>,
    /// All pending entries, waiting or mid-interview.
    pub total_waiting: u32,
    /// How many waiting students could start right now.
    pub available_now: u32,
}

/// Projects a company's queue into its dashboard sections.
///
/// `in_interview` holds pending entries whose student is mid-interview
/// here; `waiting` holds the remaining pending entries with a `greyed`
/// flag for students who are paused or busy elsewhere; `completed` is
/// capped by the caller, not here.
#[must_use]
pub fn queue_status(state: &FairState, company: &Company) -> QueueStatus {
    let company_id: i64 = company.company_id.unwrap_or_default();
    let mut in_interview: Vec<InterviewSlot> = Vec::new();
    let mut waiting: Vec<WaitingSlot> = Vec::new();
    let mut completed: Vec<CompletedSlot> = Vec::new();

    for entry in state.company_entries(company_id) {
        let Ok(student) = state.student(entry.student_id) else {
            continue;
        };
        let entry_id: i64 = entry.entry_id.unwrap_or_default();

        if entry.outcome.is_completed() {
            completed.push(CompletedSlot {
                entry_id,
                student_id: entry.student_id,
                student_name: student.full_name(),
                position: entry.position,
                completed_at: entry.outcome.completed_at().unwrap_or_default().to_string(),
            });
        } else if student.status.company_id() == Some(company_id) {
            in_interview.push(InterviewSlot {
                entry_id,
                student_id: entry.student_id,
                student_name: student.full_name(),
                position: entry.position,
                created_at: entry.created_at.clone(),
            });
        } else {
            waiting.push(WaitingSlot {
                entry_id,
                student_id: entry.student_id,
                student_name: student.full_name(),
                position: entry.position,
                created_at: entry.created_at.clone(),
                greyed: !student.status.is_available(),
                students_ahead: students_ahead_count(state, entry)
                    .to_u32()
                    .unwrap_or(u32::MAX),
            });
        }
    }

    completed.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    let total_waiting: u32 = (in_interview.len() + waiting.len())
        .to_u32()
        .unwrap_or(u32::MAX);
    let slots: usize = available_slots(state, company).to_usize().unwrap_or(0);
    let available_now: u32 = first_available(state, company, slots)
        .len()
        .to_u32()
        .unwrap_or(u32::MAX);

    QueueStatus {
        in_interview,
        waiting,
        completed,
        total_waiting,
        available_now,
    }
}
