//! Activity lifecycle: the per-tick pass and explicit termination.
//!
//! The pass snapshots the activity id list before ticking, so an activity
//! created during the pass is first ticked on the next pass, and an
//! activity terminated mid-pass (by another handler or externally) is
//! simply skipped.  Termination is idempotent: the second call for the same
//! id finds nothing and does nothing, and the cleanup hook runs at most
//! once.

use mci_core::{ActivityId, MciResult, RegionId};
use mci_model::ExerciseState;

use crate::activities;

/// What an activity's tick handler decided about its own future.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActivityDecision {
    /// Keep the activity; tick it again next pass.
    Continue,
    /// Remove the activity and run its termination hook.
    Finish,
}

/// Tick every activity of `region` once.
///
/// `tick_interval_ms` is the simulated time elapsed since the previous
/// pass, supplied by the external tick driver.
pub fn tick_activities(
    state: &mut ExerciseState,
    region: RegionId,
    tick_interval_ms: u64,
) -> MciResult<()> {
    let ids = state.region(region)?.activity_ids();
    for id in ids {
        let Some(mut activity) = state.region_mut(region)?.take_activity(id) else {
            continue;
        };
        match activities::tick_activity(state, region, &mut activity, tick_interval_ms) {
            Ok(ActivityDecision::Continue) => {
                state.region_mut(region)?.restore_activity(activity);
            }
            Ok(ActivityDecision::Finish) => {
                activities::on_terminate(state, region, &activity);
            }
            Err(e) => {
                // Keep the activity so the tree stays consistent; the
                // driver halts this region's simulation on the error.
                state.region_mut(region)?.restore_activity(activity);
                return Err(e);
            }
        }
    }
    Ok(())
}

/// Terminate an activity from outside its own tick.
///
/// Runs the activity's cleanup hook, then removes it.  Unknown (or already
/// terminated) ids are a no-op.
pub fn terminate_activity(
    state: &mut ExerciseState,
    region: RegionId,
    id: ActivityId,
) -> MciResult<()> {
    let Some(activity) = state.region_mut(region)?.take_activity(id) else {
        return Ok(());
    };
    activities::on_terminate(state, region, &activity);
    Ok(())
}
