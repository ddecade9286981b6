//! `mci-model` — the exercise-state tree and the records that live in it.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                    |
//! |--------------|-------------------------------------------------------------|
//! | [`event`]    | `ExerciseEvent` (closed set), `ReportKind`, `ReportSchedule` |
//! | [`region`]   | `Region` — event queue, behavior slots, activity table      |
//! | [`behavior`] | `BehaviorState` variants and their records                  |
//! | [`activity`] | `ActivityState` variants                                    |
//! | [`state`]    | `ExerciseState`, transfer points, vehicles, radiograms, responder groups, behavior log |
//!
//! # Design notes
//!
//! Everything here is data.  The handlers that interpret these records live
//! in `mci-engine`; the split keeps the dependency graph acyclic even
//! though behaviors mutate the very tree that owns them.  During dispatch
//! the engine takes a behavior's state out of its slot, runs the handler
//! against `&mut ExerciseState`, and restores the slot, so a handler can
//! mutate both its own record and the rest of the tree without aliasing.

pub mod activity;
pub mod behavior;
pub mod event;
pub mod region;
pub mod state;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use activity::ActivityState;
pub use behavior::{
    BehaviorState, CommandState, DispatchState, InterfaceSignallerState, ReportState,
};
pub use event::{ExerciseEvent, ReportKind, ReportSchedule};
pub use region::Region;
pub use state::{
    BehaviorLogEntry, ExerciseState, Radiogram, RadiogramKind, ResponderGroup,
    TransferPoint, Vehicle, VehicleOccupation,
};
