//! Fixed category enumerations used as resource-map keys.
//!
//! Each enum carries a canonical `ALL` order.  That order is load-bearing in
//! two places: it is the key order of every [`ResourceMap`][crate::ResourceMap]
//! over the category, and for [`VehicleType`] it is the deterministic
//! "first available type" pick order in the allocation passes.

use std::fmt;

// ── TriageCategory ────────────────────────────────────────────────────────────

/// Patient triage categories, declared in descending severity.
///
/// `White` is the not-yet-triaged bucket: demand estimation splits it into
/// red/yellow/green and discards it.  `Blue` (palliative) and `Black`
/// (deceased) never generate transport demand.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriageCategory {
    Red,
    Yellow,
    Green,
    Blue,
    Black,
    White,
}

impl TriageCategory {
    pub const ALL: [TriageCategory; 6] = [
        TriageCategory::Red,
        TriageCategory::Yellow,
        TriageCategory::Green,
        TriageCategory::Blue,
        TriageCategory::Black,
        TriageCategory::White,
    ];

    /// The categories that generate hospital-transport demand, in the order
    /// the transport allocation serves them.
    pub const TRANSPORT_PRIORITY: [TriageCategory; 3] = [
        TriageCategory::Red,
        TriageCategory::Yellow,
        TriageCategory::Green,
    ];
}

impl fmt::Display for TriageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TriageCategory::Red => "red",
            TriageCategory::Yellow => "yellow",
            TriageCategory::Green => "green",
            TriageCategory::Blue => "blue",
            TriageCategory::Black => "black",
            TriageCategory::White => "white",
        };
        f.write_str(s)
    }
}

// ── PersonnelRole ─────────────────────────────────────────────────────────────

/// Personnel qualification levels.
///
/// `GroupLeader` appears only in vehicle crew tables; the personnel
/// allocation iterates [`ALLOCATION_PRIORITY`][Self::ALLOCATION_PRIORITY].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PersonnelRole {
    GroupLeader,
    Physician,
    SeniorParamedic,
    Paramedic,
    Responder,
}

impl PersonnelRole {
    pub const ALL: [PersonnelRole; 5] = [
        PersonnelRole::GroupLeader,
        PersonnelRole::Physician,
        PersonnelRole::SeniorParamedic,
        PersonnelRole::Paramedic,
        PersonnelRole::Responder,
    ];

    /// Role order of the personnel allocation pass, most scarce first.
    pub const ALLOCATION_PRIORITY: [PersonnelRole; 4] = [
        PersonnelRole::Physician,
        PersonnelRole::SeniorParamedic,
        PersonnelRole::Paramedic,
        PersonnelRole::Responder,
    ];
}

impl fmt::Display for PersonnelRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PersonnelRole::GroupLeader => "group leader",
            PersonnelRole::Physician => "physician",
            PersonnelRole::SeniorParamedic => "senior paramedic",
            PersonnelRole::Paramedic => "paramedic",
            PersonnelRole::Responder => "responder",
        };
        f.write_str(s)
    }
}

// ── VehicleType ───────────────────────────────────────────────────────────────

/// The vehicle types staged and dispatched during an exercise.
///
/// Declaration order doubles as the deterministic pick order when the
/// allocation needs "the first available usable type".
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleType {
    /// Full emergency ambulance; senior paramedic + paramedic crew.
    Ambulance,
    /// Patient transport ambulance; paramedic + responder crew.
    TransportAmbulance,
    /// Civil-protection auxiliary ambulance; reduced transport capability.
    AuxiliaryAmbulance,
    /// Emergency doctor car; carries a physician, transports nobody.
    EmergencyDoctorCar,
    /// Medical task force unit; large crew, no patient transport.
    MedicalTaskForce,
    /// Rescue helicopter; physician crew, one patient at a time.
    RescueHelicopter,
}

impl VehicleType {
    pub const ALL: [VehicleType; 6] = [
        VehicleType::Ambulance,
        VehicleType::TransportAmbulance,
        VehicleType::AuxiliaryAmbulance,
        VehicleType::EmergencyDoctorCar,
        VehicleType::MedicalTaskForce,
        VehicleType::RescueHelicopter,
    ];
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VehicleType::Ambulance => "ambulance",
            VehicleType::TransportAmbulance => "transport ambulance",
            VehicleType::AuxiliaryAmbulance => "auxiliary ambulance",
            VehicleType::EmergencyDoctorCar => "emergency doctor car",
            VehicleType::MedicalTaskForce => "medical task force",
            VehicleType::RescueHelicopter => "rescue helicopter",
        };
        f.write_str(s)
    }
}

// ── TreatmentProgress ─────────────────────────────────────────────────────────

/// Treatment status of a patient-collection region, in progression order.
///
/// The `Ord` derive follows the declaration order, so
/// `progress >= TreatmentProgress::Counted` reads as "counting finished".
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreatmentProgress {
    #[default]
    Unknown,
    Counted,
    Triaged,
    Secured,
}

impl fmt::Display for TreatmentProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TreatmentProgress::Unknown => "unknown",
            TreatmentProgress::Counted => "counted",
            TreatmentProgress::Triaged => "triaged",
            TreatmentProgress::Secured => "secured",
        };
        f.write_str(s)
    }
}
