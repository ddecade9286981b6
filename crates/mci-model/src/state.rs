//! The shared exercise-state tree.
//!
//! A single mutable tree passed by `&mut` through every handler in the call
//! chain — never ambient state.  There is no locking because there is no
//! concurrent access; the only discipline required of a handler is to leave
//! the tree structurally valid before returning.
//!
//! All id-keyed tables are `BTreeMap`s: ids are monotonic, so iteration is
//! creation order, which keeps the whole engine deterministic.

use std::collections::BTreeMap;

use mci_core::{
    BehaviorId, IdSequence, MciError, MciResult, PatientCounts, PersonnelCounts,
    RadiogramId, RegionId, ResponderGroupId, TransferPointId, TreatmentProgress,
    VehicleCounts, VehicleId, VehicleType,
};

use crate::{ExerciseEvent, Region};

// ── Leaf entities ─────────────────────────────────────────────────────────────

/// The vehicle hand-over location inside a region.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferPoint {
    pub id: TransferPointId,
    pub region: RegionId,
}

/// What a vehicle is currently reserved for.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleOccupation {
    #[default]
    Unoccupied,
    /// Reserved for hospital evacuation, managed by the named command
    /// region.
    PatientTransport { managed_by: RegionId },
}

/// One vehicle participating in the exercise.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: VehicleId,
    pub vehicle_type: VehicleType,
    pub location: RegionId,
    pub occupation: VehicleOccupation,
}

/// The payload of one radiogram.
///
/// `MaterialCount` and `PersonnelCount` are published by the wider exercise
/// but carry nothing the command loop consumes; the gathering activity
/// acknowledges them without emitting an event.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RadiogramKind {
    PatientCount {
        counts: PatientCounts,
        information_available: bool,
    },
    VehicleCount {
        counts: VehicleCounts,
        information_available: bool,
    },
    TreatmentStatus {
        progress: TreatmentProgress,
    },
    ResourceRequest {
        vehicles: VehicleCounts,
    },
    MissingTransferConnection {
        transfer_point: TransferPointId,
    },
    MaterialCount {
        total: f64,
    },
    PersonnelCount {
        counts: PersonnelCounts,
    },
}

/// One asynchronous report message, published by a region's report
/// activities and consumed (once) by a radiogram-gathering activity.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Radiogram {
    pub id: RadiogramId,
    /// The region the report is about.
    pub region: RegionId,
    pub kind: RadiogramKind,
    pub read: bool,
}

/// A pre-planned responder group that can be summoned as a unit.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponderGroup {
    pub id: ResponderGroupId,
    pub name: String,
    /// Vehicles that arrive when the group is summoned.
    pub vehicles: VehicleCounts,
}

/// One operator-facing audit line.  Write-only from the engine's
/// perspective.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BehaviorLogEntry {
    pub region: RegionId,
    pub behavior: BehaviorId,
    pub message: String,
}

// ── ExerciseState ─────────────────────────────────────────────────────────────

/// Global exercise state: every region, transfer point, vehicle, radiogram
/// and responder group, plus the behavior log and the id generator.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExerciseState {
    pub regions: BTreeMap<RegionId, Region>,
    pub transfer_points: BTreeMap<TransferPointId, TransferPoint>,
    pub vehicles: BTreeMap<VehicleId, Vehicle>,
    pub radiograms: BTreeMap<RadiogramId, Radiogram>,
    pub responder_groups: BTreeMap<ResponderGroupId, ResponderGroup>,
    pub behavior_log: Vec<BehaviorLogEntry>,
    pub ids: IdSequence,
}

impl ExerciseState {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Regions ───────────────────────────────────────────────────────────

    /// Create a region.  Most regions also want a transfer point; see
    /// [`create_transfer_point`][Self::create_transfer_point].
    pub fn create_region(&mut self, name: impl Into<String>) -> RegionId {
        let id: RegionId = self.ids.next_id();
        self.regions.insert(id, Region::new(id, name));
        id
    }

    pub fn region(&self, id: RegionId) -> MciResult<&Region> {
        self.regions.get(&id).ok_or(MciError::RegionNotFound(id))
    }

    pub fn region_mut(&mut self, id: RegionId) -> MciResult<&mut Region> {
        self.regions.get_mut(&id).ok_or(MciError::RegionNotFound(id))
    }

    /// The region's display name, for log lines.  Falls back to the raw id
    /// so logging never fails.
    pub fn region_name(&self, id: RegionId) -> String {
        match self.regions.get(&id) {
            Some(region) => region.name.clone(),
            None => id.to_string(),
        }
    }

    /// Append `event` to `region`'s inbound queue.
    pub fn send_event(&mut self, region: RegionId, event: ExerciseEvent) -> MciResult<()> {
        self.region_mut(region)?.send_event(event);
        Ok(())
    }

    // ── Transfer points ───────────────────────────────────────────────────

    pub fn create_transfer_point(&mut self, region: RegionId) -> TransferPointId {
        let id: TransferPointId = self.ids.next_id();
        self.transfer_points.insert(id, TransferPoint { id, region });
        id
    }

    /// The transfer point inside `region`.
    ///
    /// A missing transfer point is a data-setup bug upstream, surfaced as a
    /// consistency error rather than a silent fallback.
    pub fn transfer_point_of(&self, region: RegionId) -> MciResult<&TransferPoint> {
        self.transfer_points
            .values()
            .find(|tp| tp.region == region)
            .ok_or(MciError::MissingTransferPoint { region })
    }

    // ── Vehicles ──────────────────────────────────────────────────────────

    pub fn create_vehicle(&mut self, region: RegionId, vehicle_type: VehicleType) -> VehicleId {
        let id: VehicleId = self.ids.next_id();
        self.vehicles.insert(
            id,
            Vehicle {
                id,
                vehicle_type,
                location: region,
                occupation: VehicleOccupation::Unoccupied,
            },
        );
        id
    }

    /// Count the vehicles currently located in `region`, by type.
    pub fn vehicles_in_region(&self, region: RegionId) -> VehicleCounts {
        self.vehicles
            .values()
            .filter(|v| v.location == region)
            .map(|v| (v.vehicle_type, 1.0))
            .collect()
    }

    // ── Radiograms ────────────────────────────────────────────────────────

    /// Publish an unread radiogram about `region`.
    pub fn publish_radiogram(&mut self, region: RegionId, kind: RadiogramKind) -> RadiogramId {
        let id: RadiogramId = self.ids.next_id();
        self.radiograms.insert(
            id,
            Radiogram {
                id,
                region,
                kind,
                read: false,
            },
        );
        id
    }

    /// Ids of all unread radiograms, in publication order.
    pub fn unread_radiogram_ids(&self) -> Vec<RadiogramId> {
        self.radiograms
            .values()
            .filter(|r| !r.read)
            .map(|r| r.id)
            .collect()
    }

    /// Mark a radiogram as consumed.  No-op for unknown ids.
    pub fn mark_radiogram_read(&mut self, id: RadiogramId) {
        if let Some(radiogram) = self.radiograms.get_mut(&id) {
            radiogram.read = true;
        }
    }

    // ── Responder groups ──────────────────────────────────────────────────

    pub fn create_responder_group(
        &mut self,
        name: impl Into<String>,
        vehicles: VehicleCounts,
    ) -> ResponderGroupId {
        let id: ResponderGroupId = self.ids.next_id();
        self.responder_groups.insert(
            id,
            ResponderGroup {
                id,
                name: name.into(),
                vehicles,
            },
        );
        id
    }

    // ── Behavior log ──────────────────────────────────────────────────────

    /// Append one operator-facing audit line.
    pub fn log_behavior(&mut self, region: RegionId, behavior: BehaviorId, message: String) {
        self.behavior_log.push(BehaviorLogEntry {
            region,
            behavior,
            message,
        });
    }
}
