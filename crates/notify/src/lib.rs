// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};

/// The delivery target for a single published event.
///
/// Every notification is addressed to exactly one recipient group. The
/// delivery channel fans the event out to all live subscribers of that
/// group; the engine itself never awaits an acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// A single student, addressed by student id.
    Student(i64),
    /// A company dashboard, addressed by its access token.
    Company(String),
    /// The shared admin feed.
    Admin,
}

impl Recipient {
    /// Returns the subscription topic this recipient maps to.
    ///
    /// Topics are `student:{id}`, `company:{token}` and `admin`. A
    /// subscriber joins exactly the topics it is authorized for, so the
    /// topic string doubles as the delivery-side routing key.
    #[must_use]
    pub fn topic(&self) -> String {
        match self {
            Self::Student(student_id) => format!("student:{student_id}"),
            Self::Company(access_token) => format!("company:{access_token}"),
            Self::Admin => String::from("admin"),
        }
    }
}

impl std::fmt::Display for Recipient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.topic())
    }
}

/// The wire-level kind of a published event.
///
/// Subscribers dispatch on this kind before looking at the payload, so
/// the set is fixed: informational messages, dashboard queue updates,
/// status changes, interview lifecycle events, and the urgent
/// `can_start` signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A personal, informational message.
    Notification,
    /// A change to the shape of a company queue.
    QueueUpdate,
    /// A student or company status change.
    StatusChange,
    /// An interview moved to in-progress.
    InterviewStarted,
    /// An interview was marked complete.
    InterviewCompleted,
    /// It is the recipient's turn right now.
    CanStart,
}

impl EventKind {
    /// Returns the wire name for this event kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Notification => "notification",
            Self::QueueUpdate => "queue_update",
            Self::StatusChange => "status_change",
            Self::InterviewStarted => "interview_started",
            Self::InterviewCompleted => "interview_completed",
            Self::CanStart => "can_start",
        }
    }

    /// Whether events of this kind are flagged urgent on the wire.
    ///
    /// Only `can_start` is urgent. Clients surface urgent events
    /// immediately instead of queueing them behind dashboard refreshes.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        matches!(self, Self::CanStart)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One student in the next-available preview of a queue update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAvailable {
    /// The student's id.
    pub student_id: i64,
    /// The student's full name.
    pub name: String,
}

impl NextAvailable {
    /// Creates a new `NextAvailable` entry.
    ///
    /// # Arguments
    ///
    /// * `student_id` - The student's id
    /// * `name` - The student's full name
    #[must_use]
    pub const fn new(student_id: i64, name: String) -> Self {
        Self { student_id, name }
    }
}

/// The typed payload of a published event.
///
/// The payload serializes with a `notification_type` discriminator so
/// subscribers can dispatch without inspecting the field set. Each
/// variant carries exactly the data its audience renders; fields that
/// only some audiences receive are optional and omitted from the wire
/// when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "notification_type", rename_all = "snake_case")]
pub enum NotificationPayload {
    /// It is the recipient's turn at a company right now.
    CanStart {
        /// Human-readable call to action.
        message: String,
        /// The company's id.
        company_id: i64,
        /// The company's display name.
        company_name: String,
        /// The queue entry that became startable.
        entry_id: i64,
        /// The recipient's queue position, when the trigger knows it.
        #[serde(skip_serializing_if = "Option::is_none")]
        position: Option<u32>,
    },
    /// The recipient is eligible soon, behind one named student.
    CanStartAfter {
        /// Human-readable heads-up.
        message: String,
        /// The company's id.
        company_id: i64,
        /// The company's display name.
        company_name: String,
        /// Full name of the student ranked immediately ahead.
        ahead_name: String,
        /// The recipient's rank within the newly eligible list.
        position: u32,
    },
    /// The recipient's interview at a company was marked complete.
    MarkedComplete {
        /// Human-readable confirmation.
        message: String,
        /// The company's id.
        company_id: i64,
        /// The company's display name.
        company_name: String,
        /// The status the student was moved to.
        new_status: String,
    },
    /// The recipient joined a queue and is not yet eligible to start.
    Inscribed {
        /// Human-readable confirmation.
        message: String,
        /// The company's id.
        company_id: i64,
        /// The company's display name.
        company_name: String,
        /// The position assigned to the new entry.
        position: u32,
        /// Incomplete entries ahead of the recipient, excluding
        /// students currently in an interview at this company.
        ahead_count: u32,
    },
    /// A student joined a company's queue.
    NewInscription {
        /// The joining student's id.
        student_id: i64,
        /// The joining student's full name.
        student_name: String,
        /// The company's id.
        company_id: i64,
        /// The company's display name.
        company_name: String,
        /// The position assigned to the new entry.
        position: u32,
        /// Incomplete entries in the queue after the inscription.
        total_waiting: u32,
    },
    /// A student left a company's queue before completing.
    InscriptionCancelled {
        /// The leaving student's id.
        student_id: i64,
        /// The leaving student's full name.
        student_name: String,
        /// The company's id.
        company_id: i64,
        /// The company's display name.
        company_name: String,
        /// The position the deleted entry held.
        position: u32,
        /// Incomplete entries in the queue after the cancellation.
        total_waiting: u32,
    },
    /// An interview moved to in-progress.
    InterviewStarted {
        /// The interviewing student's id.
        student_id: i64,
        /// The interviewing student's full name.
        student_name: String,
        /// The company's id.
        company_id: i64,
        /// The company's display name.
        company_name: String,
        /// The position of the entry that started.
        position: u32,
    },
    /// An interview was marked complete.
    InterviewCompleted {
        /// The completed student's id.
        student_id: i64,
        /// The completed student's full name.
        student_name: String,
        /// The company's id.
        company_id: i64,
        /// The company's display name.
        company_name: String,
        /// How many students became eligible to start.
        next_available_count: u32,
        /// Preview of the newly eligible students, capped at three.
        next_available: Vec<NextAvailable>,
    },
    /// A student's availability status changed.
    StatusChange {
        /// Human-readable summary.
        message: String,
        /// The student's id.
        student_id: i64,
        /// The student's full name, present on the admin copy only.
        #[serde(skip_serializing_if = "Option::is_none")]
        student_name: Option<String>,
        /// The status before the change.
        old_status: String,
        /// The status after the change.
        new_status: String,
    },
    /// A company paused or resumed recruiting.
    CompanyStatus {
        /// Human-readable summary.
        message: String,
        /// The company's id.
        company_id: i64,
        /// The company's display name.
        company_name: String,
        /// The company's status after the change.
        status: String,
    },
}

/// A single event addressed to one recipient group.
///
/// Notifications are derived from a committed state transition and are
/// immutable once created. The engine hands the full list to the
/// delivery channel after the transition persists; delivery failures
/// never roll the transition back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// The recipient group this event is addressed to.
    pub recipient: Recipient,
    /// The wire-level event kind.
    pub kind: EventKind,
    /// The typed payload.
    pub payload: NotificationPayload,
}

impl Notification {
    /// Creates a new `Notification`.
    ///
    /// # Arguments
    ///
    /// * `recipient` - The recipient group to address
    /// * `kind` - The wire-level event kind
    /// * `payload` - The typed payload
    #[must_use]
    pub const fn new(recipient: Recipient, kind: EventKind, payload: NotificationPayload) -> Self {
        Self {
            recipient,
            kind,
            payload,
        }
    }

    /// Whether this notification is flagged urgent on the wire.
    #[must_use]
    pub const fn is_urgent(&self) -> bool {
        self.kind.is_urgent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_recipient_topic() {
        let recipient: Recipient = Recipient::Student(42);

        assert_eq!(recipient.topic(), "student:42");
    }

    #[test]
    fn test_company_recipient_topic_uses_access_token() {
        let recipient: Recipient = Recipient::Company(String::from("tok-abc"));

        assert_eq!(recipient.topic(), "company:tok-abc");
    }

    #[test]
    fn test_admin_recipient_topic() {
        let recipient: Recipient = Recipient::Admin;

        assert_eq!(recipient.topic(), "admin");
    }

    #[test]
    fn test_event_kind_wire_names() {
        assert_eq!(EventKind::Notification.as_str(), "notification");
        assert_eq!(EventKind::QueueUpdate.as_str(), "queue_update");
        assert_eq!(EventKind::StatusChange.as_str(), "status_change");
        assert_eq!(EventKind::InterviewStarted.as_str(), "interview_started");
        assert_eq!(EventKind::InterviewCompleted.as_str(), "interview_completed");
        assert_eq!(EventKind::CanStart.as_str(), "can_start");
    }

    #[test]
    fn test_only_can_start_is_urgent() {
        assert!(EventKind::CanStart.is_urgent());
        assert!(!EventKind::Notification.is_urgent());
        assert!(!EventKind::QueueUpdate.is_urgent());
        assert!(!EventKind::StatusChange.is_urgent());
        assert!(!EventKind::InterviewStarted.is_urgent());
        assert!(!EventKind::InterviewCompleted.is_urgent());
    }

    #[test]
    fn test_notification_creation_requires_all_fields() {
        let payload: NotificationPayload = NotificationPayload::CanStart {
            message: String::from("It's your turn at Initech!"),
            company_id: 7,
            company_name: String::from("Initech"),
            entry_id: 31,
            position: Some(1),
        };

        let notification: Notification =
            Notification::new(Recipient::Student(42), EventKind::CanStart, payload.clone());

        assert_eq!(notification.recipient, Recipient::Student(42));
        assert_eq!(notification.kind, EventKind::CanStart);
        assert_eq!(notification.payload, payload);
        assert!(notification.is_urgent());
    }

    #[test]
    fn test_payload_serializes_with_discriminator() {
        let payload: NotificationPayload = NotificationPayload::MarkedComplete {
            message: String::from("Your interview at Initech is complete."),
            company_id: 7,
            company_name: String::from("Initech"),
            new_status: String::from("paused"),
        };

        let json: serde_json::Value =
            serde_json::to_value(&payload).unwrap_or(serde_json::Value::Null);

        assert_eq!(json["notification_type"], "marked_complete");
        assert_eq!(json["company_id"], 7);
        assert_eq!(json["company_name"], "Initech");
        assert_eq!(json["new_status"], "paused");
    }

    #[test]
    fn test_absent_optional_fields_are_omitted() {
        let payload: NotificationPayload = NotificationPayload::CanStart {
            message: String::from("You can start at Initech!"),
            company_id: 7,
            company_name: String::from("Initech"),
            entry_id: 31,
            position: None,
        };

        let json: serde_json::Value =
            serde_json::to_value(&payload).unwrap_or(serde_json::Value::Null);

        assert_eq!(json["notification_type"], "can_start");
        assert!(json.get("position").is_none());
    }

    #[test]
    fn test_next_available_preview_round_trip() {
        let payload: NotificationPayload = NotificationPayload::InterviewCompleted {
            student_id: 42,
            student_name: String::from("Ada Lovelace"),
            company_id: 7,
            company_name: String::from("Initech"),
            next_available_count: 2,
            next_available: vec![
                NextAvailable::new(43, String::from("Grace Hopper")),
                NextAvailable::new(44, String::from("Alan Turing")),
            ],
        };

        let json: String = serde_json::to_string(&payload).unwrap_or_default();
        let parsed: NotificationPayload =
            serde_json::from_str(&json).unwrap_or(NotificationPayload::CompanyStatus {
                message: String::new(),
                company_id: 0,
                company_name: String::new(),
                status: String::new(),
            });

        assert_eq!(parsed, payload);
    }
}
