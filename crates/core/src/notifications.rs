// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pure derivation of the notification set for each transition.
//!
//! Every function here maps an already-transitioned state (plus the
//! entities the transition touched) to the ordered list of notifications
//! the transition owes. No delivery machinery is involved; identical
//! inputs always derive identical lists.

use crate::eligibility::{
    Opportunity, available_slots, can_start_interview, first_available, student_opportunities,
    students_ahead_count,
};
use crate::state::FairState;
use fairline_domain::{Company, CompanyStatus, QueueEntry, Student, StudentStatus};
use fairline_notify::{EventKind, NextAvailable, Notification, NotificationPayload, Recipient};
use num_traits::ToPrimitive;

/// How many next-available names a completion queue-update previews.
const NEXT_AVAILABLE_PREVIEW: usize = 3;

fn company_key(company: &Company) -> i64 {
    company.company_id.unwrap_or_default()
}

fn entry_key(entry: &QueueEntry) -> i64 {
    entry.entry_id.unwrap_or_default()
}

fn student_key(student: &Student) -> i64 {
    student.student_id.unwrap_or_default()
}

/// Counts a company's pending entries, waiting or mid-interview.
fn total_waiting(state: &FairState, company: &Company) -> u32 {
    let company_id: i64 = company_key(company);
    state
        .entries
        .iter()
        .filter(|e| e.company_id == company_id && !e.outcome.is_completed())
        .count()
        .to_u32()
        .unwrap_or(u32::MAX)
}

/// Derives the notification set for a fresh inscription.
///
/// The student gets an urgent can-start when the new entry is
/// immediately startable, otherwise a confirmation with their position
/// and how many students are ahead. The company dashboard and the admin
/// feed get a queue update either way.
pub(crate) fn inscription(
    state: &FairState,
    company: &Company,
    student: &Student,
    entry: &QueueEntry,
) -> Vec<Notification> {
    let mut notifications: Vec<Notification> = Vec::new();

    if can_start_interview(state, entry).is_ok() {
        notifications.push(Notification::new(
            Recipient::Student(student_key(student)),
            EventKind::CanStart,
            NotificationPayload::CanStart {
                message: format!("You can start at {} right now!", company.name),
                company_id: company_key(company),
                company_name: company.name.clone(),
                entry_id: entry_key(entry),
                position: Some(entry.position),
            },
        ));
    } else {
        notifications.push(Notification::new(
            Recipient::Student(student_key(student)),
            EventKind::Notification,
            NotificationPayload::Inscribed {
                message: format!(
                    "You joined the queue at {} (position {})",
                    company.name, entry.position
                ),
                company_id: company_key(company),
                company_name: company.name.clone(),
                position: entry.position,
                ahead_count: students_ahead_count(state, entry)
                    .to_u32()
                    .unwrap_or(u32::MAX),
            },
        ));
    }

    let queue_update: NotificationPayload = NotificationPayload::NewInscription {
        student_id: student_key(student),
        student_name: student.full_name(),
        company_id: company_key(company),
        company_name: company.name.clone(),
        position: entry.position,
        total_waiting: total_waiting(state, company),
    };
    notifications.push(Notification::new(
        Recipient::Company(company.access_token.value().to_string()),
        EventKind::QueueUpdate,
        queue_update.clone(),
    ));
    notifications.push(Notification::new(
        Recipient::Admin,
        EventKind::QueueUpdate,
        queue_update,
    ));

    notifications
}

/// Derives the notification set for a started interview.
///
/// Company dashboard and admin feed only; the student initiated the
/// action and gets the synchronous response.
pub(crate) fn interview_started(
    company: &Company,
    student: &Student,
    entry: &QueueEntry,
) -> Vec<Notification> {
    let payload: NotificationPayload = NotificationPayload::InterviewStarted {
        student_id: student_key(student),
        student_name: student.full_name(),
        company_id: company_key(company),
        company_name: company.name.clone(),
        position: entry.position,
    };
    vec![
        Notification::new(
            Recipient::Company(company.access_token.value().to_string()),
            EventKind::InterviewStarted,
            payload.clone(),
        ),
        Notification::new(Recipient::Admin, EventKind::InterviewStarted, payload),
    ]
}

/// Derives the notification set for a completed interview.
///
/// The completed student learns they were marked complete and moved to
/// paused. The head of the newly eligible list gets the urgent
/// can-start; every other eligible candidate gets an informational
/// can-start-after naming the student immediately ahead of them in that
/// list. Company and admin get the queue update with a short
/// next-available preview.
pub(crate) fn interview_completed(
    state: &FairState,
    company: &Company,
    completed_student: &Student,
    eligible: &[&QueueEntry],
) -> Vec<Notification> {
    let mut notifications: Vec<Notification> = vec![Notification::new(
        Recipient::Student(student_key(completed_student)),
        EventKind::Notification,
        NotificationPayload::MarkedComplete {
            message: format!(
                "Your interview at {} is complete. Switch back to available for your other queues.",
                company.name
            ),
            company_id: company_key(company),
            company_name: company.name.clone(),
            new_status: StudentStatus::Paused.as_str().to_string(),
        },
    )];

    let mut preview: Vec<NextAvailable> = Vec::new();
    for (rank, entry) in eligible.iter().enumerate() {
        let Ok(student) = state.student(entry.student_id) else {
            continue;
        };
        if preview.len() < NEXT_AVAILABLE_PREVIEW {
            preview.push(NextAvailable::new(
                student_key(student),
                student.full_name(),
            ));
        }

        if rank == 0 {
            notifications.push(Notification::new(
                Recipient::Student(student_key(student)),
                EventKind::CanStart,
                NotificationPayload::CanStart {
                    message: format!("It's your turn at {}!", company.name),
                    company_id: company_key(company),
                    company_name: company.name.clone(),
                    entry_id: entry_key(entry),
                    position: Some(1),
                },
            ));
        } else if let Some(ahead) = eligible
            .get(rank - 1)
            .and_then(|e| state.student(e.student_id).ok())
        {
            notifications.push(Notification::new(
                Recipient::Student(student_key(student)),
                EventKind::Notification,
                NotificationPayload::CanStartAfter {
                    message: format!(
                        "You can start at {} after {}",
                        company.name,
                        ahead.full_name()
                    ),
                    company_id: company_key(company),
                    company_name: company.name.clone(),
                    ahead_name: ahead.full_name(),
                    position: (rank + 1).to_u32().unwrap_or(u32::MAX),
                },
            ));
        }
    }

    let queue_update: NotificationPayload = NotificationPayload::InterviewCompleted {
        student_id: student_key(completed_student),
        student_name: completed_student.full_name(),
        company_id: company_key(company),
        company_name: company.name.clone(),
        next_available_count: eligible.len().to_u32().unwrap_or(u32::MAX),
        next_available: preview,
    };
    notifications.push(Notification::new(
        Recipient::Company(company.access_token.value().to_string()),
        EventKind::InterviewCompleted,
        queue_update.clone(),
    ));
    notifications.push(Notification::new(
        Recipient::Admin,
        EventKind::InterviewCompleted,
        queue_update,
    ));

    notifications
}

/// Derives the notification set for a cancelled inscription.
///
/// The student gets a confirmation; company dashboard and admin feed get
/// the queue update. Counts reflect the state after the deletion.
pub(crate) fn inscription_cancelled(
    state: &FairState,
    company: &Company,
    student: &Student,
    entry: &QueueEntry,
) -> Vec<Notification> {
    let payload: NotificationPayload = NotificationPayload::InscriptionCancelled {
        student_id: student_key(student),
        student_name: student.full_name(),
        company_id: company_key(company),
        company_name: company.name.clone(),
        position: entry.position,
        total_waiting: total_waiting(state, company),
    };
    vec![
        Notification::new(
            Recipient::Student(student_key(student)),
            EventKind::Notification,
            payload.clone(),
        ),
        Notification::new(
            Recipient::Company(company.access_token.value().to_string()),
            EventKind::QueueUpdate,
            payload.clone(),
        ),
        Notification::new(Recipient::Admin, EventKind::QueueUpdate, payload),
    ]
}

/// Derives the notification set for a direct student status change.
///
/// The student and the admin feed always learn of the change. When the
/// student became available, their sorted opportunity list is consulted
/// and the single best startable one is promoted with an urgent
/// can-start; never more than one.
pub(crate) fn student_status_changed(
    state: &FairState,
    student: &Student,
    old_status: StudentStatus,
) -> Vec<Notification> {
    let new_status: StudentStatus = student.status;
    let mut notifications: Vec<Notification> = vec![Notification::new(
        Recipient::Student(student_key(student)),
        EventKind::StatusChange,
        NotificationPayload::StatusChange {
            message: format!("Your status is now: {new_status}"),
            student_id: student_key(student),
            student_name: None,
            old_status: old_status.as_str().to_string(),
            new_status: new_status.as_str().to_string(),
        },
    )];

    if new_status.is_available() {
        let best: Option<Opportunity> = student_opportunities(state, student)
            .into_iter()
            .next()
            .filter(|o| o.can_start);
        if let Some(opportunity) = best {
            notifications.push(Notification::new(
                Recipient::Student(student_key(student)),
                EventKind::CanStart,
                NotificationPayload::CanStart {
                    message: format!("You can start at {}!", opportunity.company_name),
                    company_id: opportunity.company_id,
                    company_name: opportunity.company_name,
                    entry_id: opportunity.entry_id,
                    position: None,
                },
            ));
        }
    }

    notifications.push(Notification::new(
        Recipient::Admin,
        EventKind::StatusChange,
        NotificationPayload::StatusChange {
            message: format!("{} is now {new_status}", student.full_name()),
            student_id: student_key(student),
            student_name: Some(student.full_name()),
            old_status: old_status.as_str().to_string(),
            new_status: new_status.as_str().to_string(),
        },
    ));

    notifications
}

/// Derives the notification set for a company pause or resume.
///
/// Every pending-entry student is informed either way. On resume, only
/// the head of the first-available list additionally gets the urgent
/// can-start; completion informs all newly eligible students, resume
/// deliberately does not. The admin feed always learns of the change.
pub(crate) fn company_status_changed(state: &FairState, company: &Company) -> Vec<Notification> {
    let company_id: i64 = company_key(company);
    let mut notifications: Vec<Notification> = Vec::new();

    let message: String = match company.status {
        CompanyStatus::Paused => format!("{} is now paused", company.name),
        CompanyStatus::Recruiting => format!("{} is recruiting again", company.name),
    };

    for entry in state.company_entries(company_id) {
        if entry.outcome.is_completed() {
            continue;
        }
        let Ok(student) = state.student(entry.student_id) else {
            continue;
        };
        notifications.push(Notification::new(
            Recipient::Student(student_key(student)),
            EventKind::Notification,
            NotificationPayload::CompanyStatus {
                message: message.clone(),
                company_id,
                company_name: company.name.clone(),
                status: company.status.as_str().to_string(),
            },
        ));
    }

    if company.status.is_recruiting() {
        let slots: usize = available_slots(state, company).to_usize().unwrap_or(0);
        let head: Option<&QueueEntry> = first_available(state, company, slots).first().copied();
        if let Some(entry) = head {
            notifications.push(Notification::new(
                Recipient::Student(entry.student_id),
                EventKind::CanStart,
                NotificationPayload::CanStart {
                    message: format!(
                        "{} is recruiting again! You can start right now!",
                        company.name
                    ),
                    company_id,
                    company_name: company.name.clone(),
                    entry_id: entry_key(entry),
                    position: None,
                },
            ));
        }
    }

    notifications.push(Notification::new(
        Recipient::Admin,
        EventKind::StatusChange,
        NotificationPayload::CompanyStatus {
            message,
            company_id,
            company_name: company.name.clone(),
            status: company.status.as_str().to_string(),
        },
    ));

    notifications
}
