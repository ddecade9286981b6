//! The vehicle dispatch behavior.
//!
//! Attached to staging areas, it fulfils vehicle-transfer requests by
//! relocating unoccupied vehicles from its own region to the destination
//! transfer point's region.  The move is applied in full within the
//! handler, so no later handler in the same tick can observe a
//! half-applied transfer.

use mci_core::{MciError, MciResult, RegionId, TransferPointId, VehicleCounts, VehicleId};
use mci_model::{DispatchState, ExerciseEvent, ExerciseState, VehicleOccupation};
use tracing::warn;

pub(crate) fn handle_event(
    state: &mut ExerciseState,
    region: RegionId,
    disp: &mut DispatchState,
    event: &ExerciseEvent,
) -> MciResult<()> {
    match event {
        ExerciseEvent::VehicleTransferRequested {
            sender,
            vehicles,
            destination,
            for_hospital_transport,
        } => transfer_vehicles(
            state,
            region,
            disp,
            *sender,
            vehicles,
            *destination,
            *for_hospital_transport,
        ),
        _ => Ok(()),
    }
}

fn transfer_vehicles(
    state: &mut ExerciseState,
    region: RegionId,
    disp: &DispatchState,
    sender: RegionId,
    vehicles: &VehicleCounts,
    destination: TransferPointId,
    for_hospital_transport: bool,
) -> MciResult<()> {
    let destination_region = state
        .transfer_points
        .get(&destination)
        .ok_or(MciError::TransferPointNotFound(destination))?
        .region;

    let mut handed_over = VehicleCounts::new();
    let mut shortfall = VehicleCounts::new();

    for (vehicle_type, count) in vehicles.iter() {
        let wanted = count.max(0.0) as usize;
        let candidates: Vec<VehicleId> = state
            .vehicles
            .values()
            .filter(|v| {
                v.location == region
                    && v.vehicle_type == vehicle_type
                    && v.occupation == VehicleOccupation::Unoccupied
            })
            .take(wanted)
            .map(|v| v.id)
            .collect();

        if candidates.len() < wanted {
            shortfall.increment(vehicle_type, (wanted - candidates.len()) as f64);
        }
        for id in candidates {
            if let Some(vehicle) = state.vehicles.get_mut(&id) {
                vehicle.location = destination_region;
                vehicle.occupation = if for_hospital_transport {
                    VehicleOccupation::PatientTransport { managed_by: sender }
                } else {
                    VehicleOccupation::Unoccupied
                };
                handed_over.increment(vehicle_type, 1.0);
            }
        }
    }

    if shortfall.any_positive() {
        warn!(
            staging_area = %state.region_name(region),
            missing = %shortfall,
            "transfer request exceeds staged vehicles"
        );
    }
    state.log_behavior(
        region,
        disp.id,
        format!(
            "Handed over {} to {}",
            handed_over,
            state.region_name(destination_region)
        ),
    );
    Ok(())
}
