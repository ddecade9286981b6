//! `mci-sim` — tick driver and scenario assembly for the MCI exercise
//! simulation engine.
//!
//! # Crate layout
//!
//! | Module       | Contents                                           |
//! |--------------|----------------------------------------------------|
//! | [`driver`]   | `deliver_event`, `advance_tick`, `advance_all`     |
//! | [`exercise`] | `Exercise` — state plus tick counter               |
//! | [`builder`]  | `ExerciseBuilder` — validated scenario setup       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use mci_sim::{Exercise, ExerciseBuilder};
//!
//! let mut builder = ExerciseBuilder::new();
//! let command = builder.add_region("command post");
//! let tray    = builder.add_region("collection point");
//! let staging = builder.add_region("staging area");
//! builder.patient_tray(tray)?;
//! builder.staging_area(staging)?;
//! builder.command_post(command, &[staging], &[tray], &[])?;
//!
//! let mut exercise = Exercise::new(builder.build()?, 1_000);
//! exercise.run_ticks(60)?;
//! ```

pub mod builder;
pub mod driver;
pub mod exercise;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::ExerciseBuilder;
pub use driver::{advance_all, advance_tick, deliver_event};
pub use exercise::Exercise;
