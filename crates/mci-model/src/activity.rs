//! Activity state records.
//!
//! An activity is a transient, self-terminating process owned by exactly
//! one region.  The records here are pure data; the tick handlers live in
//! `mci-engine`.

use mci_core::{ActivityId, RegionId};

use crate::{ExerciseEvent, ReportKind};

/// The state of one in-flight activity, discriminated by variant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActivityState {
    /// Re-queue `event` into the owning region on the next activity pass.
    ///
    /// Commands issued by a behavior take this one-tick detour so they are
    /// dispatched like any externally delivered event.
    IssueCommand { id: ActivityId, event: ExerciseEvent },

    /// Scan all unread radiograms, emit the matching data events into the
    /// owning region, and mark them read.  One-shot.
    GatherRadiograms { id: ActivityId },

    /// Deliver `event` into `target`'s inbound queue.  One-shot.
    SendRemoteEvent {
        id: ActivityId,
        target: RegionId,
        event: ExerciseEvent,
    },

    /// Deliver `event` into the owning region once `remaining_ms` of
    /// simulated time has elapsed.
    DelayedEvent {
        id: ActivityId,
        event: ExerciseEvent,
        remaining_ms: u64,
    },

    /// Count the owning region's ground truth and publish the matching
    /// radiogram.  One-shot.
    GenerateReport { id: ActivityId, kind: ReportKind },

    /// Publish a report of `kind` every `interval_ms`.  Runs until
    /// externally terminated; its termination hook records the stop in the
    /// behavior log.
    RecurringReport {
        id: ActivityId,
        kind: ReportKind,
        interval_ms: u64,
        elapsed_ms: u64,
    },
}

impl ActivityState {
    /// The activity's own id.
    pub fn id(&self) -> ActivityId {
        match self {
            ActivityState::IssueCommand { id, .. }
            | ActivityState::GatherRadiograms { id }
            | ActivityState::SendRemoteEvent { id, .. }
            | ActivityState::DelayedEvent { id, .. }
            | ActivityState::GenerateReport { id, .. }
            | ActivityState::RecurringReport { id, .. } => *id,
        }
    }

    /// Stable variant name, used in log lines.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ActivityState::IssueCommand { .. } => "issue command",
            ActivityState::GatherRadiograms { .. } => "gather radiograms",
            ActivityState::SendRemoteEvent { .. } => "send remote event",
            ActivityState::DelayedEvent { .. } => "delayed event",
            ActivityState::GenerateReport { .. } => "generate report",
            ActivityState::RecurringReport { .. } => "recurring report",
        }
    }
}
