//! Shared computations of the command behavior.

use mci_core::{
    ActivityId, MciError, MciResult, PatientCounts, PersonnelCounts, PersonnelRole,
    RegionId, VehicleCounts, VehicleType,
};
use mci_model::{ActivityState, CommandState, ExerciseEvent, ExerciseState};

use super::constants::{patient_personnel_needs, vehicle_crew};

/// Assume a region's triage mix from what is known about it.
///
/// Known counts are taken as reported; an unreported region is assumed to
/// hold one average tray of untriaged patients.  Untriaged (white) patients
/// are then split 7%/19%/74%: red and yellow round up to assume the worst,
/// green rounds down so the estimate does not inflate the total, and the
/// white bucket is discarded.
pub(crate) fn assume_patients(
    known: Option<&PatientCounts>,
    average_tray_size: f64,
) -> PatientCounts {
    use mci_core::TriageCategory::{Green, Red, White, Yellow};
    use super::constants::{ASSUMED_GREEN_RATIO, ASSUMED_RED_RATIO, ASSUMED_YELLOW_RATIO};

    let mut patients = match known {
        Some(counts) => counts.clone(),
        None => PatientCounts::from([(White, average_tray_size)]),
    };
    let white = patients.get(White);
    patients.increment(Red, (white * ASSUMED_RED_RATIO).ceil());
    patients.increment(Yellow, (white * ASSUMED_YELLOW_RATIO).ceil());
    patients.increment(Green, (white * ASSUMED_GREEN_RATIO).floor());
    patients.set(White, 0.0);
    patients
}

/// Total patients last reported by `region`, across all categories.
pub(crate) fn total_patients_in_region(cmd: &CommandState, region: RegionId) -> f64 {
    cmd.patients_expected
        .get(&region)
        .map(PatientCounts::total)
        .unwrap_or(0.0)
}

/// Personnel needed to treat `patients`, rounded up to whole units.
pub(crate) fn personnel_needs_from_patients(patients: &PatientCounts) -> PersonnelCounts {
    patients
        .iter()
        .fold(PersonnelCounts::new(), |needs, (category, count)| {
            needs.add(&patient_personnel_needs(category).scale(count))
        })
        .ceil()
}

/// The combined crew of `vehicles`.
pub(crate) fn vehicles_to_personnel(vehicles: &VehicleCounts) -> PersonnelCounts {
    vehicles
        .iter()
        .fold(PersonnelCounts::new(), |crew, (vehicle_type, count)| {
            crew.add(&vehicle_crew(vehicle_type).scale(count))
        })
}

/// Personnel already in or en route to `region`, derived from the vehicles
/// confirmed there plus those on the way.
pub(crate) fn personnel_expected_in_region(
    cmd: &CommandState,
    region: RegionId,
) -> PersonnelCounts {
    let expected = cmd
        .vehicles_expected
        .get(&region)
        .cloned()
        .unwrap_or_default();
    let on_the_way = cmd
        .vehicles_on_the_way
        .get(&region)
        .cloned()
        .unwrap_or_default();
    vehicles_to_personnel(&expected.add(&on_the_way))
}

/// `true` while at least one vehicle of a usable type is in stock.
pub(crate) fn vehicles_left(usable: &[VehicleType], available: &VehicleCounts) -> bool {
    usable.iter().any(|&t| available.get(t) > 0.0)
}

/// The first usable type with stock, in declaration order.
pub(crate) fn first_usable_available(
    usable: &[VehicleType],
    available: &VehicleCounts,
) -> Option<VehicleType> {
    usable.iter().copied().find(|&t| available.get(t) > 0.0)
}

/// `true` when no positive personnel need is left.
///
/// The check walks the allocation roles accumulating a running total, so a
/// surplus of a scarcer role covers outstanding need of a more common one.
pub(crate) fn no_more_personnel_needed(needs: &PersonnelCounts) -> bool {
    let mut running = 0.0;
    for role in PersonnelRole::ALLOCATION_PRIORITY {
        running += needs.get(role);
        if running > 0.0 {
            return false;
        }
    }
    true
}

/// `true` once every tray has reported and no region still has positive
/// personnel need — the gate for starting hospital transfers.
pub(crate) fn can_start_transport(
    cmd: &CommandState,
    needs: &[(RegionId, PersonnelCounts)],
) -> bool {
    needs.iter().all(|(_, n)| no_more_personnel_needed(n))
        && cmd.trays_with_information.len() == cmd.patient_trays.len()
}

/// Queue `event` as a command: it is wrapped in an issue-command activity,
/// which re-queues it into this region on the next activity pass.
pub(crate) fn issue_command(
    state: &mut ExerciseState,
    region: RegionId,
    event: ExerciseEvent,
) -> MciResult<()> {
    let id: ActivityId = state.ids.next_id();
    state
        .region_mut(region)?
        .add_activity(ActivityState::IssueCommand { id, event });
    Ok(())
}

/// Command a vehicle transfer from the first staging area to `target`'s
/// transfer point and record the vehicles as on the way, so the next
/// allocation does not hand them out twice.
pub(crate) fn send_vehicles_to_region(
    state: &mut ExerciseState,
    command_region: RegionId,
    cmd: &mut CommandState,
    target: RegionId,
    vehicles: &VehicleCounts,
    for_hospital_transport: bool,
) -> MciResult<()> {
    let Some(&staging_area) = cmd.staging_areas.first() else {
        return Err(MciError::Config(
            "command behavior has no staging area to dispatch from".into(),
        ));
    };
    let destination = state.transfer_point_of(target)?.id;
    issue_command(
        state,
        command_region,
        ExerciseEvent::TransferVehicles {
            staging_area,
            vehicles: vehicles.clone(),
            destination,
            for_hospital_transport,
        },
    )?;
    let on_the_way = cmd.vehicles_on_the_way.entry(target).or_default();
    *on_the_way = on_the_way.add(vehicles);
    Ok(())
}

/// Format per-region values for a behavior-log line, e.g.
/// ` [north]: {2 ambulance}`.
pub(crate) fn display_per_region<T: std::fmt::Display>(
    state: &ExerciseState,
    values: &[(RegionId, T)],
) -> String {
    let mut out = String::new();
    for (region, value) in values {
        out.push_str(&format!(" [{}]: {value}", state.region_name(*region)));
    }
    out
}
