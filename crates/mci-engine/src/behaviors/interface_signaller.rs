//! The interface signaller behavior.
//!
//! The command post's radio operator: every tick it works through the
//! incoming radiograms, and it translates the command behavior's command
//! events into effects on the rest of the exercise — report requests to
//! subordinate regions, vehicle-transfer requests to staging areas, and
//! responder-group summons.

use mci_core::{ActivityId, MciError, MciResult, RegionId, TransferPointId};
use mci_model::{
    ActivityState, ExerciseEvent, ExerciseState, InterfaceSignallerState, ReportKind,
    ReportSchedule,
};
use tracing::debug;

pub(crate) fn handle_event(
    state: &mut ExerciseState,
    region: RegionId,
    sig: &mut InterfaceSignallerState,
    event: &ExerciseEvent,
) -> MciResult<()> {
    match event {
        ExerciseEvent::Tick => {
            let id: ActivityId = state.ids.next_id();
            state
                .region_mut(region)?
                .add_activity(ActivityState::GatherRadiograms { id });
            Ok(())
        }

        ExerciseEvent::PatientDataRequested {
            region: target,
            schedule,
        } => request_report(state, region, *target, ReportKind::PatientCount, *schedule),

        ExerciseEvent::VehicleDataRequested {
            region: target,
            schedule,
        } => request_report(state, region, *target, ReportKind::VehicleCount, *schedule),

        ExerciseEvent::SendResponderGroup { target, patients } => {
            summon_responder_groups(state, region, sig, *target, *patients)
        }

        ExerciseEvent::TransferVehicles {
            staging_area,
            vehicles,
            destination,
            for_hospital_transport,
        } => {
            let id: ActivityId = state.ids.next_id();
            state
                .region_mut(region)?
                .add_activity(ActivityState::SendRemoteEvent {
                    id,
                    target: *staging_area,
                    event: ExerciseEvent::VehicleTransferRequested {
                        sender: region,
                        vehicles: vehicles.clone(),
                        destination: *destination,
                        for_hospital_transport: *for_hospital_transport,
                    },
                });
            Ok(())
        }

        ExerciseEvent::StartHospitalTransfer { region: target } => {
            state.region_mut(*target)?.hospital_transport_started = true;
            state.log_behavior(
                region,
                sig.id,
                format!(
                    "Announced the start of hospital transfers to {}",
                    state.region_name(*target)
                ),
            );
            Ok(())
        }

        _ => Ok(()),
    }
}

/// Ask `target` to produce reports of `kind` on the given schedule.
fn request_report(
    state: &mut ExerciseState,
    own_region: RegionId,
    target: RegionId,
    kind: ReportKind,
    schedule: ReportSchedule,
) -> MciResult<()> {
    let id: ActivityId = state.ids.next_id();
    state
        .region_mut(own_region)?
        .add_activity(ActivityState::SendRemoteEvent {
            id,
            target,
            event: ExerciseEvent::ReportRequested { kind, schedule },
        });
    Ok(())
}

/// Summon every known, not-yet-called responder group sized for `patients`
/// or fewer.  The groups' vehicles appear at the target transfer point's
/// region.
fn summon_responder_groups(
    state: &mut ExerciseState,
    region: RegionId,
    sig: &mut InterfaceSignallerState,
    target: TransferPointId,
    patients: u32,
) -> MciResult<()> {
    let destination_region = state
        .transfer_points
        .get(&target)
        .ok_or(MciError::TransferPointNotFound(target))?
        .region;

    let due: Vec<_> = sig
        .known_responder_groups
        .iter()
        .filter(|&(id, &threshold)| {
            threshold <= patients && !sig.called_responder_groups.contains(id)
        })
        .map(|(&id, _)| id)
        .collect();

    for group_id in due {
        let group = state
            .responder_groups
            .get(&group_id)
            .ok_or(MciError::ResponderGroupNotFound(group_id))?;
        let name = group.name.clone();
        let vehicles = group.vehicles.clone();
        for (vehicle_type, count) in vehicles.iter() {
            for _ in 0..count as u32 {
                state.create_vehicle(destination_region, vehicle_type);
            }
        }
        sig.called_responder_groups.insert(group_id);
        debug!(group = %name, patients, "responder group summoned");
        state.log_behavior(
            region,
            sig.id,
            format!("Summoned responder group {name} for {patients} patients"),
        );
    }
    Ok(())
}
