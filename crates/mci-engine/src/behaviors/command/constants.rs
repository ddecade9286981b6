//! Planning constants and conversion tables of the command behavior.
//!
//! The triage split approximates published mass-casualty distributions
//! (7% immediate / 19% delayed / 74% minor).  Crew and transport tables
//! describe the standard staffing of each vehicle type.

use mci_core::{
    MINUTE_MS, PatientCounts, PersonnelCounts, PersonnelRole, SECOND_MS,
    TriageCategory, VehicleCounts, VehicleType,
};

/// The allocation runs every this many ticks.
pub const ALLOCATION_INTERVAL_TICKS: u32 = 5;

/// Recurring patient-data collection interval for counted trays.
pub const COLLECT_PATIENT_DATA_INTERVAL_MS: u64 = 5 * MINUTE_MS;

/// Recurring vehicle-data collection interval for staging areas.
pub const COLLECT_VEHICLE_DATA_INTERVAL_MS: u64 = 5 * SECOND_MS;

/// Recurring vehicle-data collection interval for patient trays.
pub const COLLECT_VEHICLE_DATA_INTERVAL_TRAY_MS: u64 = 5 * MINUTE_MS;

/// Assumed patients per tray while no tray has reported.
pub const DEFAULT_TRAY_SIZE: f64 = 5.0;

/// Triage split applied to untriaged (white) patients during demand
/// estimation.  Red and yellow round up (assume the worst), green rounds
/// down.
pub const ASSUMED_RED_RATIO: f64 = 0.07;
pub const ASSUMED_YELLOW_RATIO: f64 = 0.19;
pub const ASSUMED_GREEN_RATIO: f64 = 0.74;

/// Per-category cap of the red-priority transport pre-pass.
pub const RED_TRANSPORT_CAP: f64 = 100.0;

/// The staging-area leader keeps one ambulance; reports from staging areas
/// are corrected by this before entering the availability pool.
pub fn staging_leader_vehicle() -> VehicleCounts {
    VehicleCounts::from([(VehicleType::Ambulance, 1.0)])
}

/// Personnel needed to treat one patient of the given category.
/// Fractional: a red patient occupies half a physician.
pub fn patient_personnel_needs(category: TriageCategory) -> PersonnelCounts {
    use PersonnelRole::{Paramedic, Physician, Responder, SeniorParamedic};
    match category {
        TriageCategory::Red => PersonnelCounts::from([
            (Physician, 0.5),
            (SeniorParamedic, 1.0),
            (Paramedic, 1.0),
        ]),
        TriageCategory::Yellow => {
            PersonnelCounts::from([(Physician, 0.25), (Paramedic, 1.0)])
        }
        TriageCategory::Green => PersonnelCounts::from([(Responder, 0.5)]),
        TriageCategory::Blue => PersonnelCounts::from([(Responder, 1.0)]),
        TriageCategory::Black | TriageCategory::White => PersonnelCounts::new(),
    }
}

/// The crew that arrives with one vehicle of the given type.
pub fn vehicle_crew(vehicle_type: VehicleType) -> PersonnelCounts {
    use PersonnelRole::{GroupLeader, Paramedic, Physician, Responder, SeniorParamedic};
    match vehicle_type {
        VehicleType::Ambulance => {
            PersonnelCounts::from([(SeniorParamedic, 1.0), (Paramedic, 1.0)])
        }
        VehicleType::TransportAmbulance | VehicleType::AuxiliaryAmbulance => {
            PersonnelCounts::from([(Paramedic, 1.0), (Responder, 1.0)])
        }
        VehicleType::EmergencyDoctorCar | VehicleType::RescueHelicopter => {
            PersonnelCounts::from([(Physician, 1.0), (SeniorParamedic, 1.0)])
        }
        VehicleType::MedicalTaskForce => PersonnelCounts::from([
            (GroupLeader, 1.0),
            (Physician, 1.0),
            (Paramedic, 2.0),
            (Responder, 2.0),
        ]),
    }
}

/// How many patients of each category one vehicle of the given type can
/// take to hospital.
pub fn transport_capacity(vehicle_type: VehicleType) -> PatientCounts {
    use TriageCategory::{Green, Red, Yellow};
    match vehicle_type {
        VehicleType::Ambulance | VehicleType::TransportAmbulance => {
            PatientCounts::from([(Red, 2.0), (Yellow, 2.0), (Green, 2.0)])
        }
        VehicleType::AuxiliaryAmbulance => {
            PatientCounts::from([(Yellow, 1.0), (Green, 2.0)])
        }
        VehicleType::RescueHelicopter => {
            PatientCounts::from([(Red, 1.0), (Yellow, 1.0), (Green, 1.0)])
        }
        VehicleType::EmergencyDoctorCar | VehicleType::MedicalTaskForce => PatientCounts::new(),
    }
}
