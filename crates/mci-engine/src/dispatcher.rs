//! Event dispatch into behaviors.
//!
//! Every event is offered to every behavior attached to the region, in
//! attachment order.  A handler receives the event together with mutable
//! access to both its own state and the whole exercise tree; to make that
//! possible without aliasing, the behavior state is taken out of its slot
//! for the duration of the call and restored afterwards.

use mci_core::{MciResult, RegionId};
use mci_model::{ExerciseEvent, ExerciseState};

use crate::behaviors;

/// Dispatch one event to every behavior of `region`, in attachment order.
///
/// Behaviors that do not recognize the event ignore it.  A handler error is
/// propagated after the behavior's state has been restored, so the tree
/// stays structurally valid.
pub fn dispatch_event(
    state: &mut ExerciseState,
    region: RegionId,
    event: &ExerciseEvent,
) -> MciResult<()> {
    let slot_count = state.region(region)?.behavior_count();
    for index in 0..slot_count {
        let Some(mut behavior) = state.region_mut(region)?.take_behavior(index) else {
            continue;
        };
        let result = behaviors::handle_event(state, region, &mut behavior, event);
        state.region_mut(region)?.restore_behavior(index, behavior);
        result?;
    }
    Ok(())
}
