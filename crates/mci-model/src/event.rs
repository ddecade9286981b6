//! The closed set of simulation events.
//!
//! An event is an immutable, fully determined value describing something
//! that happened (data received, progress changed) or something requested
//! (data requested, vehicles commanded).  Events are appended to a region's
//! inbound queue and consumed in FIFO order, one full dispatch pass per
//! event, within a single tick.
//!
//! Three families share the one enum:
//!
//! - **Data events** — knowledge arriving at a command region, emitted by
//!   the radiogram-gathering activity.
//! - **Command events** — issued by the command behavior.  They name a
//!   target but are queued into the command region itself; the interface
//!   signaller attached there translates them into cross-region effects.
//! - **Remote events** — delivered into another region's queue by a
//!   `SendRemoteEvent` activity (report requests, vehicle transfers).

use mci_core::{
    PatientCounts, RegionId, TransferPointId, TreatmentProgress, VehicleCounts,
};

/// How often a requested report should be produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportSchedule {
    /// Produce one report now.
    Once,
    /// Produce a report every `interval_ms` of simulated time.
    Recurring { interval_ms: u64 },
}

/// What a requested report should count.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReportKind {
    PatientCount,
    VehicleCount,
}

/// One simulation event.  Behavior handlers match exhaustively and ignore
/// variants they do not recognize via a default arm.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseEvent {
    /// The implicit per-step event injected by the tick driver.
    Tick,

    // ── Data events ───────────────────────────────────────────────────────
    /// Patient counts reported by `region`.  `information_available: false`
    /// means the region has not counted yet; receivers treat their knowledge
    /// as unchanged.
    PatientDataReceived {
        region: RegionId,
        patients: PatientCounts,
        information_available: bool,
    },

    /// Vehicle counts reported by `region`.
    VehicleDataReceived {
        region: RegionId,
        vehicles: VehicleCounts,
        information_available: bool,
    },

    /// A region's treatment progress changed.
    TreatmentProgressDataReceived {
        region: RegionId,
        progress: TreatmentProgress,
    },

    /// A region asked for additional vehicles.
    ResourceRequestDataReceived {
        region: RegionId,
        vehicles: VehicleCounts,
    },

    /// A region reported that it has no transfer connection to
    /// `transfer_point`.
    TransferConnectionMissing {
        region: RegionId,
        transfer_point: TransferPointId,
    },

    // ── Command events ────────────────────────────────────────────────────
    /// Request patient data from `region`.
    PatientDataRequested {
        region: RegionId,
        schedule: ReportSchedule,
    },

    /// Request vehicle data from `region`.
    VehicleDataRequested {
        region: RegionId,
        schedule: ReportSchedule,
    },

    /// Summon responder groups sized for `patients` to `target`.
    ///
    /// `patients` is the total to be treated, *not* an increment; the
    /// command behavior only re-issues this with a strictly larger value.
    SendResponderGroup {
        target: TransferPointId,
        patients: u32,
    },

    /// Move `vehicles` from `staging_area` to `destination`.
    TransferVehicles {
        staging_area: RegionId,
        vehicles: VehicleCounts,
        destination: TransferPointId,
        for_hospital_transport: bool,
    },

    /// Tell `region` to begin evacuating patients to hospitals.
    StartHospitalTransfer { region: RegionId },

    // ── Remote events ─────────────────────────────────────────────────────
    /// Ask the receiving region to produce reports of `kind`.
    ReportRequested {
        kind: ReportKind,
        schedule: ReportSchedule,
    },

    /// Ask the receiving staging area to hand over `vehicles` to
    /// `destination`.  `sender` is the commanding region; hospital-transport
    /// vehicles are reserved under its management.
    VehicleTransferRequested {
        sender: RegionId,
        vehicles: VehicleCounts,
        destination: TransferPointId,
        for_hospital_transport: bool,
    },
}
