//! Scenario builder for exercise setup.
//!
//! Wraps the raw `ExerciseState` constructors with the conventions every
//! scenario follows — each region gets a transfer point, behavior ids come
//! from the shared sequence — and validates the cross-references a command
//! post depends on before the exercise starts, so setup bugs surface here
//! and not as consistency errors mid-simulation.

use mci_core::{
    MciError, MciResult, PatientCounts, RegionId, ResponderGroupId, TreatmentProgress,
    VehicleCounts, VehicleType,
};
use mci_model::{
    BehaviorState, CommandState, DispatchState, ExerciseState, InterfaceSignallerState,
    ReportState,
};

/// Incrementally builds an [`ExerciseState`]; `build` validates it.
///
/// # Example
///
/// ```rust,ignore
/// let mut builder = ExerciseBuilder::new();
/// let command = builder.add_region("command post");
/// let tray    = builder.add_region("collection point north");
/// let staging = builder.add_region("staging area south");
/// builder.patient_tray(tray)?;
/// builder.staging_area(staging)?;
/// builder.add_vehicles(staging, VehicleType::Ambulance, 3)?;
/// builder.command_post(command, &[staging], &[tray], &[])?;
/// let state = builder.build()?;
/// ```
#[derive(Default)]
pub struct ExerciseBuilder {
    state: ExerciseState,
}

impl ExerciseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region together with its transfer point.
    pub fn add_region(&mut self, name: &str) -> RegionId {
        let region = self.state.create_region(name);
        self.state.create_transfer_point(region);
        region
    }

    /// Set a region's ground-truth patients and treatment progress.
    pub fn set_patients(
        &mut self,
        region: RegionId,
        patients: PatientCounts,
        progress: TreatmentProgress,
    ) -> MciResult<()> {
        let r = self.state.region_mut(region)?;
        r.patients = patients;
        r.treatment_progress = progress;
        Ok(())
    }

    /// Stage `count` vehicles of one type in a region.
    pub fn add_vehicles(
        &mut self,
        region: RegionId,
        vehicle_type: VehicleType,
        count: u32,
    ) -> MciResult<()> {
        self.state.region(region)?;
        for _ in 0..count {
            self.state.create_vehicle(region, vehicle_type);
        }
        Ok(())
    }

    /// Register a summonable responder group.
    pub fn add_responder_group(
        &mut self,
        name: &str,
        vehicles: VehicleCounts,
    ) -> ResponderGroupId {
        self.state.create_responder_group(name, vehicles)
    }

    /// Attach the command pair — command behavior plus interface signaller —
    /// to `region`.  `known_groups` maps responder groups to the patient
    /// count each is sized for.
    pub fn command_post(
        &mut self,
        region: RegionId,
        staging_areas: &[RegionId],
        patient_trays: &[RegionId],
        known_groups: &[(ResponderGroupId, u32)],
    ) -> MciResult<()> {
        let command_id = self.state.ids.next_id();
        let signaller_id = self.state.ids.next_id();
        let r = self.state.region_mut(region)?;
        r.attach_behavior(BehaviorState::Command(CommandState::new(
            command_id,
            staging_areas.to_vec(),
            patient_trays.to_vec(),
        )));
        r.attach_behavior(BehaviorState::InterfaceSignaller(
            InterfaceSignallerState::new(signaller_id, known_groups.iter().copied().collect()),
        ));
        Ok(())
    }

    /// Attach the report behavior — the region answers data requests and
    /// announces progress changes.
    pub fn patient_tray(&mut self, region: RegionId) -> MciResult<()> {
        let id = self.state.ids.next_id();
        self.state
            .region_mut(region)?
            .attach_behavior(BehaviorState::Report(ReportState::new(id)));
        Ok(())
    }

    /// Attach report and vehicle-dispatch behaviors — the region answers
    /// data requests and fulfils vehicle transfers.
    pub fn staging_area(&mut self, region: RegionId) -> MciResult<()> {
        self.patient_tray(region)?;
        let id = self.state.ids.next_id();
        self.state
            .region_mut(region)?
            .attach_behavior(BehaviorState::Dispatch(DispatchState::new(id)));
        Ok(())
    }

    /// Validate the cross-references every command post depends on and
    /// return the finished state.
    pub fn build(self) -> MciResult<ExerciseState> {
        for region in self.state.regions.values() {
            for behavior in region.behaviors() {
                match behavior {
                    BehaviorState::Command(cmd) => {
                        if cmd.staging_areas.is_empty() {
                            return Err(MciError::Config(format!(
                                "command post {} has no staging area",
                                region.name
                            )));
                        }
                        for &subordinate in cmd.staging_areas.iter().chain(&cmd.patient_trays)
                        {
                            self.state.region(subordinate)?;
                            self.state.transfer_point_of(subordinate)?;
                        }
                    }
                    BehaviorState::InterfaceSignaller(sig) => {
                        for group in sig.known_responder_groups.keys() {
                            if !self.state.responder_groups.contains_key(group) {
                                return Err(MciError::ResponderGroupNotFound(*group));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }
        Ok(self.state)
    }
}
