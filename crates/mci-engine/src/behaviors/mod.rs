//! Behavior handlers.
//!
//! One handler function per behavior variant; the dispatcher routes every
//! event to every attached behavior, and each handler matches exhaustively
//! on the event with a default ignore arm.

pub(crate) mod command;
pub(crate) mod dispatch;
pub(crate) mod interface_signaller;
pub(crate) mod report;

use mci_core::{MciResult, RegionId};
use mci_model::{BehaviorState, ExerciseEvent, ExerciseState};

/// Route `event` to the handler for this behavior variant.
pub(crate) fn handle_event(
    state: &mut ExerciseState,
    region: RegionId,
    behavior: &mut BehaviorState,
    event: &ExerciseEvent,
) -> MciResult<()> {
    match behavior {
        BehaviorState::Command(cmd) => command::handle_event(state, region, cmd, event),
        BehaviorState::InterfaceSignaller(sig) => {
            interface_signaller::handle_event(state, region, sig, event)
        }
        BehaviorState::Report(rep) => report::handle_event(state, region, rep, event),
        BehaviorState::Dispatch(disp) => dispatch::handle_event(state, region, disp, event),
    }
}
