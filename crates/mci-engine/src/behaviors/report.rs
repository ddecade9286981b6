//! The report behavior.
//!
//! Attached to subordinate regions (patient trays and staging areas), it
//! answers report requests by spawning the matching report activities in
//! its own region, and announces treatment-progress changes by radiogram.

use mci_core::{ActivityId, MciResult, RegionId};
use mci_model::{
    ActivityState, ExerciseEvent, ExerciseState, RadiogramKind, ReportSchedule,
    ReportState,
};

pub(crate) fn handle_event(
    state: &mut ExerciseState,
    region: RegionId,
    rep: &mut ReportState,
    event: &ExerciseEvent,
) -> MciResult<()> {
    match event {
        ExerciseEvent::Tick => {
            let progress = state.region(region)?.treatment_progress;
            if progress != rep.last_reported_progress {
                rep.last_reported_progress = progress;
                state.publish_radiogram(region, RadiogramKind::TreatmentStatus { progress });
            }
            Ok(())
        }

        ExerciseEvent::ReportRequested { kind, schedule } => {
            let id: ActivityId = state.ids.next_id();
            let activity = match *schedule {
                ReportSchedule::Once => ActivityState::GenerateReport { id, kind: *kind },
                ReportSchedule::Recurring { interval_ms } => ActivityState::RecurringReport {
                    id,
                    kind: *kind,
                    interval_ms,
                    elapsed_ms: 0,
                },
            };
            state.region_mut(region)?.add_activity(activity);
            Ok(())
        }

        _ => Ok(()),
    }
}
