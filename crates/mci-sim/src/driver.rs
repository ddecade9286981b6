//! The region tick driver — the core's inbound interface.
//!
//! One logical step of one region:
//!
//! 1. The implicit tick event is appended to the region's queue.
//! 2. The queue is drained FIFO; each event gets one full dispatch pass
//!    across the region's behaviors.  Events enqueued while draining are
//!    handled within the same step.
//! 3. One activity pass runs.  Events sent by activities stay queued for
//!    the next step.
//!
//! An error anywhere aborts the step and is returned to the caller: it
//! signals corrupted exercise state, and the region must not be simulated
//! further on top of it.

use mci_core::{MciResult, RegionId};
use mci_engine::{dispatch_event, tick_activities};
use mci_model::{ExerciseEvent, ExerciseState};
use tracing::trace;

/// Append an externally produced event to `region`'s inbound queue.
pub fn deliver_event(
    state: &mut ExerciseState,
    region: RegionId,
    event: ExerciseEvent,
) -> MciResult<()> {
    state.send_event(region, event)
}

/// Run one logical step of `region`, representing `tick_interval_ms` of
/// simulated time.
pub fn advance_tick(
    state: &mut ExerciseState,
    region: RegionId,
    tick_interval_ms: u64,
) -> MciResult<()> {
    state.region_mut(region)?.send_event(ExerciseEvent::Tick);
    while let Some(event) = state.region_mut(region)?.in_events.pop_front() {
        trace!(region = %state.region_name(region), ?event, "dispatching");
        dispatch_event(state, region, &event)?;
    }
    tick_activities(state, region, tick_interval_ms)
}

/// Run one logical step of every region, in creation order.
pub fn advance_all(state: &mut ExerciseState, tick_interval_ms: u64) -> MciResult<()> {
    let regions: Vec<RegionId> = state.regions.keys().copied().collect();
    for region in regions {
        advance_tick(state, region, tick_interval_ms)?;
    }
    Ok(())
}
