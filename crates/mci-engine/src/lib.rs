//! `mci-engine` — the per-region simulation engine.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`dispatcher`] | `dispatch_event` — event fan-out into attached behaviors  |
//! | [`lifecycle`]  | `tick_activities`, `terminate_activity`, `ActivityDecision` |
//! | `activities`   | Tick handlers and termination hooks per activity variant  |
//! | `behaviors`    | Handlers per behavior variant: command (with the allocation algorithm), interface signaller, report, vehicle dispatch |
//!
//! # How a tick flows
//!
//! The external driver (`mci-sim`) queues the implicit tick event, drains
//! the region's FIFO queue — each event fanned out to every behavior in
//! attachment order — and then runs one activity pass.  Commands issued by
//! a behavior become issue-command activities, whose tick re-queues the
//! command event, so it reaches the interface signaller on the next tick
//! like any other event.

pub mod dispatcher;
pub mod lifecycle;

pub(crate) mod activities;
pub(crate) mod behaviors;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dispatcher::dispatch_event;
pub use lifecycle::{ActivityDecision, terminate_activity, tick_activities};
