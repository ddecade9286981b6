//! Behavior state records.
//!
//! A behavior is a persistent, stateful reactor attached to a region.  Its
//! states are implicit in the record's fields (a region is "contacted" when
//! its id is in the contacted set) rather than an explicit enumerated state;
//! transitions are field mutations driven by event handling.  Handlers live
//! in `mci-engine`.

use std::collections::BTreeMap;

use mci_core::{
    BehaviorId, PatientCounts, RegionId, ResponderGroupId, TreatmentProgress,
    VehicleCounts,
};
use rustc_hash::{FxHashMap, FxHashSet};

/// The state of one attached behavior, discriminated by variant.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BehaviorState {
    Command(CommandState),
    InterfaceSignaller(InterfaceSignallerState),
    Report(ReportState),
    Dispatch(DispatchState),
}

impl BehaviorState {
    /// The behavior instance's id.
    pub fn id(&self) -> BehaviorId {
        match self {
            BehaviorState::Command(s) => s.id,
            BehaviorState::InterfaceSignaller(s) => s.id,
            BehaviorState::Report(s) => s.id,
            BehaviorState::Dispatch(s) => s.id,
        }
    }
}

// ── Command ───────────────────────────────────────────────────────────────────

/// Knowledge and ledgers of the command behavior.
///
/// `staging_areas` and `patient_trays` are kept as vectors in first-seen
/// order: that order is threaded through every allocation loop, so regions
/// that tie on need are served in the order the relationship was
/// established.  The per-region ledgers are keyed maps; an entry exists
/// only while the region is a staging area or patient tray of this command
/// (removal cleans every ledger).
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandState {
    pub id: BehaviorId,

    /// Vehicle marshalling regions, first-seen order.
    pub staging_areas: Vec<RegionId>,

    /// Patient-collection regions under this command, first-seen order.
    pub patient_trays: Vec<RegionId>,

    /// Last reported patient counts per tray.
    pub patients_expected: FxHashMap<RegionId, PatientCounts>,

    /// Patients already evacuated per tray, by category, cumulative and
    /// capped at the expected counts.
    pub patients_transported: FxHashMap<RegionId, PatientCounts>,

    /// Last reported vehicle counts per region.
    pub vehicles_expected: FxHashMap<RegionId, VehicleCounts>,

    /// Vehicles dispatched but not yet confirmed by a report.
    pub vehicles_on_the_way: FxHashMap<RegionId, VehicleCounts>,

    /// Outstanding vehicle requests per region.
    pub vehicles_requested: FxHashMap<RegionId, VehicleCounts>,

    pub trays_contacted: FxHashSet<RegionId>,
    pub staging_contacted: FxHashSet<RegionId>,
    pub trays_with_information: FxHashSet<RegionId>,
    pub trays_secured: FxHashSet<RegionId>,

    /// Vehicles confirmed across all staging areas (staging-leader vehicle
    /// already deducted).
    pub total_vehicles_in_staging: VehicleCounts,

    /// Largest patient total responder groups have been summoned for.
    /// Monotonic: once summoned for N patients, never re-summoned for fewer.
    pub responder_patients: u32,

    /// Whether the one-time hospital-transfer start has been commanded.
    pub transport_started: bool,

    /// Ticks since the last allocation run.
    pub ticks_since_allocation: u32,
}

impl CommandState {
    pub fn new(
        id: BehaviorId,
        staging_areas: Vec<RegionId>,
        patient_trays: Vec<RegionId>,
    ) -> Self {
        Self {
            id,
            staging_areas,
            patient_trays,
            patients_expected: FxHashMap::default(),
            patients_transported: FxHashMap::default(),
            vehicles_expected: FxHashMap::default(),
            vehicles_on_the_way: FxHashMap::default(),
            vehicles_requested: FxHashMap::default(),
            trays_contacted: FxHashSet::default(),
            staging_contacted: FxHashSet::default(),
            trays_with_information: FxHashSet::default(),
            trays_secured: FxHashSet::default(),
            total_vehicles_in_staging: VehicleCounts::new(),
            responder_patients: 0,
            transport_started: false,
            ticks_since_allocation: 0,
        }
    }

    /// Register a new patient tray.  No-op if already registered.
    pub fn add_patient_tray(&mut self, region: RegionId) {
        if !self.patient_trays.contains(&region) {
            self.patient_trays.push(region);
        }
    }

    /// Register a new staging area.  No-op if already registered.
    pub fn add_staging_area(&mut self, region: RegionId) {
        if !self.staging_areas.contains(&region) {
            self.staging_areas.push(region);
        }
    }

    /// Remove a patient tray and every ledger entry keyed by it, so no
    /// per-region entry outlives the relationship.
    pub fn remove_patient_tray(&mut self, region: RegionId) {
        self.patient_trays.retain(|&r| r != region);
        self.trays_contacted.remove(&region);
        self.trays_with_information.remove(&region);
        self.trays_secured.remove(&region);
        self.clear_region_ledgers(region);
    }

    /// Remove a staging area and every ledger entry keyed by it.
    pub fn remove_staging_area(&mut self, region: RegionId) {
        self.staging_areas.retain(|&r| r != region);
        self.staging_contacted.remove(&region);
        self.clear_region_ledgers(region);
    }

    fn clear_region_ledgers(&mut self, region: RegionId) {
        self.patients_expected.remove(&region);
        self.patients_transported.remove(&region);
        self.vehicles_expected.remove(&region);
        self.vehicles_on_the_way.remove(&region);
        self.vehicles_requested.remove(&region);
    }
}

// ── InterfaceSignaller ────────────────────────────────────────────────────────

/// State of the interface signaller: which responder groups it knows, how
/// many patients each is sized for, and which it has already summoned.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceSignallerState {
    pub id: BehaviorId,

    /// Responder group → the total patient count it (together with all
    /// smaller groups) is sized for.  `BTreeMap` so summoning walks groups
    /// in a stable order.
    pub known_responder_groups: BTreeMap<ResponderGroupId, u32>,

    /// Groups already summoned; a group is only ever summoned once.
    pub called_responder_groups: FxHashSet<ResponderGroupId>,
}

impl InterfaceSignallerState {
    pub fn new(id: BehaviorId, known: BTreeMap<ResponderGroupId, u32>) -> Self {
        Self {
            id,
            known_responder_groups: known,
            called_responder_groups: FxHashSet::default(),
        }
    }
}

// ── Report ────────────────────────────────────────────────────────────────────

/// State of the report behavior: the last treatment progress it announced,
/// for change detection.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReportState {
    pub id: BehaviorId,
    pub last_reported_progress: TreatmentProgress,
}

impl ReportState {
    pub fn new(id: BehaviorId) -> Self {
        Self {
            id,
            last_reported_progress: TreatmentProgress::Unknown,
        }
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

/// State of the vehicle dispatch behavior attached to staging areas.
/// Fulfilment is stateless; the record exists to give the behavior an
/// identity in the log.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchState {
    pub id: BehaviorId,
}

impl DispatchState {
    pub fn new(id: BehaviorId) -> Self {
        Self { id }
    }
}
