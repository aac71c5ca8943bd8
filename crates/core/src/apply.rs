// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::eligibility::{available_slots, can_start_interview, first_available};
use crate::error::CoreError;
use crate::notifications;
use crate::state::{FairState, TransitionResult};
use fairline_domain::{
    AccessToken, Company, CompanyStatus, DomainError, EntryOutcome, QueueEntry, Student,
    StudentStatus, validate_company_name, validate_company_name_unique, validate_student_name,
};
use fairline_notify::Notification;
use num_traits::ToPrimitive;

/// Applies a command to the current state, producing a new state and the
/// notification set the transition owes.
///
/// The input state is never mutated; on failure the caller keeps it
/// untouched. Callers run the whole load-apply-commit sequence inside
/// one exclusive section, so everything this function reads is still
/// true when the result commits.
///
/// # Arguments
///
/// * `state` - The current state snapshot (immutable)
/// * `command` - The command to apply
/// * `now` - The current time as an RFC 3339 UTC timestamp
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new state and notifications
/// * `Err(CoreError)` if the command violates a domain rule
///
/// # Errors
///
/// Returns an error if the command references ids that do not exist or
/// violates the admission, lifecycle or status rules.
#[allow(clippy::too_many_lines)]
pub fn apply(state: &FairState, command: Command, now: &str) -> Result<TransitionResult, CoreError> {
    match command {
        Command::RegisterStudent {
            first_name,
            last_name,
        } => {
            validate_student_name(&first_name, &last_name)?;

            let student: Student = Student::with_id(
                state.next_student_id(),
                first_name,
                last_name,
                StudentStatus::Available,
                now.to_string(),
            );

            let mut new_state: FairState = state.clone();
            new_state.students.push(student);

            Ok(TransitionResult {
                new_state,
                notifications: Vec::new(),
            })
        }
        Command::CreateCompany {
            name,
            max_concurrent_interviews,
        } => {
            validate_company_name(&name)?;
            validate_company_name_unique(&name, &state.companies)?;

            let company: Company = Company::with_id(
                state.next_company_id(),
                name,
                AccessToken::generate(),
                CompanyStatus::Recruiting,
                max_concurrent_interviews,
                now.to_string(),
            );

            let mut new_state: FairState = state.clone();
            new_state.companies.push(company);

            Ok(TransitionResult {
                new_state,
                notifications: Vec::new(),
            })
        }
        Command::Inscribe {
            company_id,
            student_id,
        } => apply_inscription(state, company_id, student_id, now, false),
        Command::ForceInscribe {
            company_id,
            student_id,
        } => apply_inscription(state, company_id, student_id, now, true),
        Command::StartInterview { entry_id } => {
            let entry: &QueueEntry = state.entry(entry_id)?;
            can_start_interview(state, entry)?;

            let company_id: i64 = entry.company_id;
            let student_id: i64 = entry.student_id;

            let mut new_state: FairState = state.clone();
            new_state.student_mut(student_id)?.status = StudentStatus::InInterview { company_id };

            let notifications: Vec<Notification> = {
                let company: &Company = new_state.company(company_id)?;
                let student: &Student = new_state.student(student_id)?;
                let entry: &QueueEntry = new_state.entry(entry_id)?;
                notifications::interview_started(company, student, entry)
            };

            Ok(TransitionResult {
                new_state,
                notifications,
            })
        }
        Command::CompleteInterview { entry_id } => {
            let entry: &QueueEntry = state.entry(entry_id)?;
            if entry.outcome.is_completed() {
                return Err(DomainError::AlreadyCompleted.into());
            }

            let company_id: i64 = entry.company_id;
            let student_id: i64 = entry.student_id;
            let company: &Company = state.company(company_id)?;
            let student: &Student = state.student(student_id)?;

            // The student must be mid-interview at this exact company;
            // anything else is a stale or duplicate completion call.
            if student.status.company_id() != Some(company_id) {
                return Err(DomainError::StudentNotInInterviewHere {
                    company_name: company.name.clone(),
                }
                .into());
            }

            let mut new_state: FairState = state.clone();
            new_state.entry_mut(entry_id)?.outcome = EntryOutcome::Completed {
                at: now.to_string(),
            };
            new_state.student_mut(student_id)?.status = StudentStatus::Paused;

            // The freed slot is visible in the same transition; the
            // newly eligible list is computed against the new state.
            let notifications: Vec<Notification> = {
                let company: &Company = new_state.company(company_id)?;
                let completed_student: &Student = new_state.student(student_id)?;
                let slots: usize = available_slots(&new_state, company).to_usize().unwrap_or(0);
                let eligible: Vec<&QueueEntry> = first_available(&new_state, company, slots);
                notifications::interview_completed(&new_state, company, completed_student, &eligible)
            };

            Ok(TransitionResult {
                new_state,
                notifications,
            })
        }
        Command::CancelInscription { entry_id } => {
            let entry: &QueueEntry = state.entry(entry_id)?;
            if entry.outcome.is_completed() {
                return Err(DomainError::AlreadyCompleted.into());
            }

            let company: &Company = state.company(entry.company_id)?;
            let student: &Student = state.student(entry.student_id)?;

            // A mid-interview entry holds a slot; it must be completed,
            // not cancelled, or the slot would leak.
            if student.status.company_id() == Some(entry.company_id) {
                return Err(DomainError::StudentNotAvailable {
                    current_company: Some(company.name.clone()),
                }
                .into());
            }

            let cancelled: QueueEntry = entry.clone();
            let mut new_state: FairState = state.clone();
            new_state.entries.retain(|e| e.entry_id != Some(entry_id));

            let notifications: Vec<Notification> = {
                let company: &Company = new_state.company(cancelled.company_id)?;
                let student: &Student = new_state.student(cancelled.student_id)?;
                notifications::inscription_cancelled(&new_state, company, student, &cancelled)
            };

            Ok(TransitionResult {
                new_state,
                notifications,
            })
        }
        Command::SetStudentStatus {
            student_id,
            new_status,
        } => {
            let student: &Student = state.student(student_id)?;
            let old_status: StudentStatus = student.status;

            old_status.validate_direct_transition(new_status)?;

            // Same-status requests are accepted no-ops.
            if old_status == new_status {
                return Ok(TransitionResult {
                    new_state: state.clone(),
                    notifications: Vec::new(),
                });
            }

            let mut new_state: FairState = state.clone();
            new_state.student_mut(student_id)?.status = new_status;

            let notifications: Vec<Notification> = {
                let student: &Student = new_state.student(student_id)?;
                notifications::student_status_changed(&new_state, student, old_status)
            };

            Ok(TransitionResult {
                new_state,
                notifications,
            })
        }
        Command::SetCompanyStatus {
            company_id,
            new_status,
        } => {
            let company: &Company = state.company(company_id)?;

            // Same-status requests are accepted no-ops.
            if company.status == new_status {
                return Ok(TransitionResult {
                    new_state: state.clone(),
                    notifications: Vec::new(),
                });
            }

            let mut new_state: FairState = state.clone();
            new_state.company_mut(company_id)?.status = new_status;

            let notifications: Vec<Notification> = {
                let company: &Company = new_state.company(company_id)?;
                notifications::company_status_changed(&new_state, company)
            };

            Ok(TransitionResult {
                new_state,
                notifications,
            })
        }
        Command::BulkResume => {
            let paused_ids: Vec<i64> = state
                .companies
                .iter()
                .filter(|c| !c.status.is_recruiting())
                .filter_map(|c| c.company_id)
                .collect();

            let mut new_state: FairState = state.clone();
            for company_id in &paused_ids {
                new_state.company_mut(*company_id)?.status = CompanyStatus::Recruiting;
            }

            let mut notifications: Vec<Notification> = Vec::new();
            for company_id in paused_ids {
                let company: &Company = new_state.company(company_id)?;
                notifications.extend(notifications::company_status_changed(&new_state, company));
            }

            Ok(TransitionResult {
                new_state,
                notifications,
            })
        }
        Command::ReorderQueue {
            company_id,
            entry_id,
            new_position,
        } => {
            state.company(company_id)?;
            let entry: &QueueEntry = state.entry(entry_id)?;
            if entry.company_id != company_id {
                return Err(DomainError::EntryNotFound(entry_id).into());
            }

            let old_position: u32 = entry.position;
            let max_position: u32 = state
                .entries
                .iter()
                .filter(|e| e.company_id == company_id)
                .map(|e| e.position)
                .max()
                .unwrap_or(1);
            let target: u32 = new_position.clamp(1, max_position);

            if target == old_position {
                return Ok(TransitionResult {
                    new_state: state.clone(),
                    notifications: Vec::new(),
                });
            }

            let mut new_state: FairState = state.clone();

            // Shift the entries strictly between the old and new slot by
            // one, then drop the moved entry into the freed position.
            for e in new_state
                .entries
                .iter_mut()
                .filter(|e| e.company_id == company_id)
            {
                if old_position < target {
                    if e.position > old_position && e.position <= target {
                        e.position -= 1;
                    }
                } else if e.position >= target && e.position < old_position {
                    e.position += 1;
                }
            }
            new_state.entry_mut(entry_id)?.position = target;

            Ok(TransitionResult {
                new_state,
                notifications: Vec::new(),
            })
        }
        Command::RegenerateToken { company_id } => {
            state.company(company_id)?;

            let mut new_state: FairState = state.clone();
            new_state.company_mut(company_id)?.access_token = AccessToken::generate();

            Ok(TransitionResult {
                new_state,
                notifications: Vec::new(),
            })
        }
        Command::SetCapacity {
            company_id,
            max_concurrent_interviews,
        } => {
            state.company(company_id)?;

            let mut new_state: FairState = state.clone();
            new_state.company_mut(company_id)?.max_concurrent_interviews =
                max_concurrent_interviews;

            Ok(TransitionResult {
                new_state,
                notifications: Vec::new(),
            })
        }
        Command::DeleteStudent { student_id } => {
            state.student(student_id)?;

            let mut new_state: FairState = state.clone();
            new_state
                .students
                .retain(|s| s.student_id != Some(student_id));
            new_state.entries.retain(|e| e.student_id != student_id);

            Ok(TransitionResult {
                new_state,
                notifications: Vec::new(),
            })
        }
    }
}

/// Shared path for [`Command::Inscribe`] and [`Command::ForceInscribe`].
///
/// The force variant is the administrative backfill: it skips the
/// company-status check and emits no notifications. The duplicate-entry
/// check applies to both.
fn apply_inscription(
    state: &FairState,
    company_id: i64,
    student_id: i64,
    now: &str,
    force: bool,
) -> Result<TransitionResult, CoreError> {
    let company: &Company = state.company(company_id)?;
    state.student(student_id)?;

    if !force && !company.status.is_recruiting() {
        return Err(DomainError::CompanyPaused {
            company_name: company.name.clone(),
        }
        .into());
    }

    // One entry per (company, student), ever. A completed entry blocks
    // re-inscription just like a pending one, with its own reason.
    if let Some(existing) = state.entry_for(company_id, student_id) {
        let err: DomainError = if existing.outcome.is_completed() {
            DomainError::AlreadyInterviewed {
                company_name: company.name.clone(),
            }
        } else {
            DomainError::AlreadyInscribed {
                company_name: company.name.clone(),
            }
        };
        return Err(err.into());
    }

    let position: u32 = state
        .entries
        .iter()
        .filter(|e| e.company_id == company_id)
        .map(|e| e.position)
        .max()
        .unwrap_or(0)
        + 1;
    let entry_id: i64 = state.next_entry_id();
    let entry: QueueEntry = QueueEntry::with_id(
        entry_id,
        company_id,
        student_id,
        position,
        EntryOutcome::Pending,
        now.to_string(),
    );

    let mut new_state: FairState = state.clone();
    new_state.entries.push(entry);

    let notifications: Vec<Notification> = if force {
        Vec::new()
    } else {
        let company: &Company = new_state.company(company_id)?;
        let student: &Student = new_state.student(student_id)?;
        let entry: &QueueEntry = new_state.entry(entry_id)?;
        notifications::inscription(&new_state, company, student, entry)
    };

    Ok(TransitionResult {
        new_state,
        notifications,
    })
}
