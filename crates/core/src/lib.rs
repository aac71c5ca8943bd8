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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod eligibility;
mod error;
mod notifications;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use eligibility::{
    CompletedSlot, InterviewSlot, Opportunity, QueueStatus, WaitingSlot, available_slots,
    can_start_interview, first_available, in_interview_count, queue_status, student_opportunities,
    students_ahead_count,
};
pub use error::CoreError;
pub use state::{FairState, TransitionResult};
