//! `mci-core` — foundational types for the MCI exercise simulation engine.
//!
//! This crate is a dependency of every other `mci-*` crate.  It has no
//! `mci-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`ids`]        | Typed id wrappers, `IdSequence` monotonic generator       |
//! | [`time`]       | `Tick`, millisecond constants                             |
//! | [`categories`] | `TriageCategory`, `PersonnelRole`, `VehicleType`, `TreatmentProgress` |
//! | [`resources`]  | `ResourceMap` pointwise arithmetic + count aliases        |
//! | [`error`]      | `MciError`, `MciResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod categories;
pub mod error;
pub mod ids;
pub mod resources;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use categories::{PersonnelRole, TreatmentProgress, TriageCategory, VehicleType};
pub use error::{MciError, MciResult};
pub use ids::{
    ActivityId, BehaviorId, IdSequence, RadiogramId, RegionId, ResponderGroupId,
    TransferPointId, VehicleId,
};
pub use resources::{PatientCounts, PersonnelCounts, ResourceMap, VehicleCounts};
pub use time::{MINUTE_MS, SECOND_MS, Tick};
