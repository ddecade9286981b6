//! The command behavior.
//!
//! Attached to the command-post region, it builds a picture of patient and
//! vehicle numbers across its subordinate regions from asynchronously
//! arriving reports, and every few ticks redistributes the vehicles staged
//! in its staging areas: first to evacuate red patients, then to cover
//! personnel needs, then to evacuate everyone else.  Knowledge is partial
//! and stale by design — the ledgers track what has been promised
//! (`vehicles_on_the_way`) until a later report confirms arrival.

pub(crate) mod allocations;
pub(crate) mod constants;
pub(crate) mod helpers;

use mci_core::{
    MciError, MciResult, PatientCounts, PersonnelCounts, PersonnelRole, RegionId,
    TreatmentProgress, TriageCategory, VehicleCounts,
};
use mci_model::{CommandState, ExerciseEvent, ExerciseState, ReportSchedule};
use tracing::{debug, warn};

use allocations::{
    TransportAllocation, allocate_for_hospital_transport, allocate_for_personnel,
};
use constants::{
    ALLOCATION_INTERVAL_TICKS, COLLECT_PATIENT_DATA_INTERVAL_MS,
    COLLECT_VEHICLE_DATA_INTERVAL_MS, COLLECT_VEHICLE_DATA_INTERVAL_TRAY_MS,
    DEFAULT_TRAY_SIZE, RED_TRANSPORT_CAP, staging_leader_vehicle,
};
use helpers::{
    assume_patients, can_start_transport, display_per_region, issue_command,
    personnel_expected_in_region, personnel_needs_from_patients,
    send_vehicles_to_region, total_patients_in_region, vehicles_to_personnel,
};

pub(crate) fn handle_event(
    state: &mut ExerciseState,
    region: RegionId,
    cmd: &mut CommandState,
    event: &ExerciseEvent,
) -> MciResult<()> {
    match event {
        ExerciseEvent::Tick => handle_tick(state, region, cmd),

        ExerciseEvent::PatientDataReceived {
            region: reporter,
            patients,
            information_available,
        } => handle_patient_data(state, region, cmd, *reporter, patients, *information_available),

        ExerciseEvent::VehicleDataReceived {
            region: reporter,
            vehicles,
            information_available,
        } => handle_vehicle_data(state, region, cmd, *reporter, vehicles, *information_available),

        ExerciseEvent::TreatmentProgressDataReceived {
            region: reporter,
            progress,
        } => handle_treatment_progress(state, region, cmd, *reporter, *progress),

        ExerciseEvent::ResourceRequestDataReceived {
            region: reporter,
            vehicles,
        } => {
            cmd.vehicles_requested.insert(*reporter, vehicles.clone());
            state.log_behavior(region, cmd.id, "Received a vehicle request".into());
            Ok(())
        }

        // Everything else is addressed to other roles.
        _ => Ok(()),
    }
}

// ── Event handling ────────────────────────────────────────────────────────────

fn handle_tick(state: &mut ExerciseState, region: RegionId, cmd: &mut CommandState) -> MciResult<()> {
    cmd.ticks_since_allocation += 1;
    if cmd.ticks_since_allocation == ALLOCATION_INTERVAL_TICKS {
        cmd.ticks_since_allocation = 0;
        assign_vehicle_budgets(state, region, cmd)?;
    }

    // Initial contact: one-time patient data from new trays, one-time plus
    // recurring vehicle data from new staging areas.
    let uncontacted_trays: Vec<RegionId> = cmd
        .patient_trays
        .iter()
        .copied()
        .filter(|tray| !cmd.trays_contacted.contains(tray))
        .collect();
    for tray in uncontacted_trays {
        issue_command(
            state,
            region,
            ExerciseEvent::PatientDataRequested {
                region: tray,
                schedule: ReportSchedule::Once,
            },
        )?;
        cmd.trays_contacted.insert(tray);
    }

    let uncontacted_staging: Vec<RegionId> = cmd
        .staging_areas
        .iter()
        .copied()
        .filter(|area| !cmd.staging_contacted.contains(area))
        .collect();
    for area in uncontacted_staging {
        issue_command(
            state,
            region,
            ExerciseEvent::VehicleDataRequested {
                region: area,
                schedule: ReportSchedule::Once,
            },
        )?;
        issue_command(
            state,
            region,
            ExerciseEvent::VehicleDataRequested {
                region: area,
                schedule: ReportSchedule::Recurring {
                    interval_ms: COLLECT_VEHICLE_DATA_INTERVAL_MS,
                },
            },
        )?;
        cmd.staging_contacted.insert(area);
    }
    Ok(())
}

fn handle_patient_data(
    state: &mut ExerciseState,
    region: RegionId,
    cmd: &mut CommandState,
    reporter: RegionId,
    patients: &PatientCounts,
    information_available: bool,
) -> MciResult<()> {
    if !cmd.patient_trays.contains(&reporter) {
        return Ok(());
    }
    state.log_behavior(
        region,
        cmd.id,
        format!("Received patient data from {}", state.region_name(reporter)),
    );
    if !information_available {
        // An expected state, not an error: knowledge stays unchanged.
        return Ok(());
    }
    cmd.trays_with_information.insert(reporter);
    cmd.patients_expected.insert(reporter, patients.clone());
    cmd.patients_transported
        .insert(reporter, PatientCounts::new());
    Ok(())
}

fn handle_vehicle_data(
    state: &mut ExerciseState,
    region: RegionId,
    cmd: &mut CommandState,
    reporter: RegionId,
    vehicles: &VehicleCounts,
    information_available: bool,
) -> MciResult<()> {
    if !cmd.staging_areas.contains(&reporter) && !cmd.patient_trays.contains(&reporter) {
        return Ok(());
    }
    state.log_behavior(
        region,
        cmd.id,
        format!("Received vehicle data from {}", state.region_name(reporter)),
    );
    if !information_available {
        warn!(reporter = %state.region_name(reporter), "region not answering vehicle data request");
        return Ok(());
    }

    let mut vehicles = vehicles.clone();
    let previously_expected = cmd
        .vehicles_expected
        .get(&reporter)
        .cloned()
        .unwrap_or_default();

    if cmd.staging_areas.contains(&reporter) {
        // The staging-area leader keeps one ambulance out of the pool.
        vehicles = vehicles.sub(&staging_leader_vehicle());
        cmd.total_vehicles_in_staging = cmd
            .total_vehicles_in_staging
            .sub(&previously_expected)
            .add(&vehicles);
    }

    // Vehicles that newly appeared settle the on-the-way ledger; it never
    // goes negative even when more arrive than were promised.
    let new_vehicles = vehicles.sub(&previously_expected);
    let on_the_way = cmd
        .vehicles_on_the_way
        .get(&reporter)
        .cloned()
        .unwrap_or_default();
    cmd.vehicles_on_the_way
        .insert(reporter, on_the_way.sub_floored(&new_vehicles, 0.0));
    cmd.vehicles_expected.insert(reporter, vehicles);
    Ok(())
}

fn handle_treatment_progress(
    state: &mut ExerciseState,
    region: RegionId,
    cmd: &mut CommandState,
    reporter: RegionId,
    progress: TreatmentProgress,
) -> MciResult<()> {
    if !cmd.patient_trays.contains(&reporter) {
        return Ok(());
    }
    if progress == TreatmentProgress::Secured {
        cmd.trays_secured.insert(reporter);
        // A secured tray only gets what it explicitly asks for.
        cmd.vehicles_requested.insert(reporter, VehicleCounts::new());
    } else {
        cmd.trays_secured.remove(&reporter);
    }

    issue_command(
        state,
        region,
        ExerciseEvent::PatientDataRequested {
            region: reporter,
            schedule: ReportSchedule::Once,
        },
    )?;
    if progress == TreatmentProgress::Counted {
        issue_command(
            state,
            region,
            ExerciseEvent::PatientDataRequested {
                region: reporter,
                schedule: ReportSchedule::Recurring {
                    interval_ms: COLLECT_PATIENT_DATA_INTERVAL_MS,
                },
            },
        )?;
        issue_command(
            state,
            region,
            ExerciseEvent::VehicleDataRequested {
                region: reporter,
                schedule: ReportSchedule::Once,
            },
        )?;
        issue_command(
            state,
            region,
            ExerciseEvent::VehicleDataRequested {
                region: reporter,
                schedule: ReportSchedule::Recurring {
                    interval_ms: COLLECT_VEHICLE_DATA_INTERVAL_TRAY_MS,
                },
            },
        )?;
    }
    state.log_behavior(
        region,
        cmd.id,
        format!(
            "Detected a treatment progress change in {}",
            state.region_name(reporter)
        ),
    );
    Ok(())
}

// ── Allocation ────────────────────────────────────────────────────────────────

/// Recompute the vehicle budgets: demand estimation, escalation, the
/// red-transport pre-pass, the personnel pass, and the full transport pass.
pub(crate) fn assign_vehicle_budgets(
    state: &mut ExerciseState,
    region: RegionId,
    cmd: &mut CommandState,
) -> MciResult<()> {
    let unsecured: Vec<RegionId> = cmd
        .patient_trays
        .iter()
        .copied()
        .filter(|tray| !cmd.trays_secured.contains(tray))
        .collect();

    let num_regions = cmd.patient_trays.len();
    let num_informed = cmd.trays_with_information.len();
    let num_uninformed = num_regions - num_informed;
    let patients_in_informed: f64 = cmd
        .patient_trays
        .iter()
        .copied()
        .filter(|tray| cmd.trays_with_information.contains(tray))
        .map(|tray| total_patients_in_region(cmd, tray))
        .sum();

    // Trays are assumed equally sized until they report.
    let mut average_tray_size = if num_informed > 0 {
        (patients_in_informed / num_informed as f64).ceil()
    } else {
        0.0
    };
    if average_tray_size == 0.0 {
        average_tray_size = DEFAULT_TRAY_SIZE;
    }

    escalate_responder_groups(
        state,
        region,
        cmd,
        num_uninformed,
        average_tray_size,
        patients_in_informed,
    )?;

    // ── Demand estimation ─────────────────────────────────────────────────
    let assumed_patients: Vec<(RegionId, PatientCounts)> = unsecured
        .iter()
        .map(|&tray| {
            let known = if cmd.trays_with_information.contains(&tray) {
                cmd.patients_expected.get(&tray)
            } else {
                None
            };
            (tray, assume_patients(known, average_tray_size))
        })
        .collect();

    // ── Personnel-need translation ────────────────────────────────────────
    let regional_lead = PersonnelCounts::from([(PersonnelRole::SeniorParamedic, 1.0)]);
    let mut needs: Vec<(RegionId, PersonnelCounts)> = assumed_patients
        .iter()
        .map(|(tray, patients)| {
            let need = personnel_needs_from_patients(patients)
                .add(&regional_lead)
                .sub(&personnel_expected_in_region(cmd, *tray));
            (*tray, need)
        })
        .collect();

    // Secured trays need exactly the crews of the vehicles they requested.
    for &tray in &cmd.patient_trays {
        if cmd.trays_secured.contains(&tray) {
            if let Some(requested) = cmd.vehicles_requested.get(&tray) {
                needs.push((tray, vehicles_to_personnel(requested)));
            }
        }
    }

    let mut remaining_requests = cmd.vehicles_requested.clone();
    let on_the_way_total = cmd
        .vehicles_on_the_way
        .values()
        .fold(VehicleCounts::new(), |acc, v| acc.add(v));
    let mut remaining_available = cmd.total_vehicles_in_staging.sub(&on_the_way_total);

    // Snapshots for the log lines; the working copies mutate below.
    let vehicles_at_start = remaining_available.clone();
    let needs_at_start = needs.clone();

    debug!(
        region = %state.region_name(region),
        available = %remaining_available,
        "running vehicle allocation"
    );

    // ── Red-transport priority pre-pass ───────────────────────────────────
    let red_cap = PatientCounts::from([(TriageCategory::Red, RED_TRANSPORT_CAP)]);
    let red_demands: Vec<(RegionId, PatientCounts)> = cmd
        .patient_trays
        .iter()
        .map(|&tray| (tray, red_cap.min_with(&untransported(cmd, tray))))
        .collect();

    let allocation = allocate_for_hospital_transport(&red_demands, &remaining_available);
    if remaining_available.total() > 0.0 {
        state.log_behavior(
            region,
            cmd.id,
            format!(
                "Sent vehicles{} for transport of red patients based on patient numbers{}; available vehicles: {}",
                display_per_region(state, &allocation.vehicles),
                display_per_region(state, &red_demands),
                remaining_available,
            ),
        );
    }
    remaining_available = apply_transport_allocation(state, region, cmd, &allocation, remaining_available)?;

    // ── Personnel-need allocation ─────────────────────────────────────────
    let allocated =
        allocate_for_personnel(&mut needs, &mut remaining_requests, &mut remaining_available);

    if allocated.iter().any(|(_, vehicles)| vehicles.any_positive()) {
        state.log_behavior(
            region,
            cmd.id,
            format!(
                "Sent vehicles{} based on assumed patients{} indicating needs{}; available vehicles: {}",
                display_per_region(state, &allocated),
                display_per_region(state, &assumed_patients),
                display_per_region(state, &needs_at_start),
                vehicles_at_start,
            ),
        );
    }
    for (tray, vehicles) in &allocated {
        if vehicles.any_positive() {
            send_vehicles_to_region(state, region, cmd, *tray, vehicles, false)?;
        }
    }

    // ── Full hospital-transport pass ──────────────────────────────────────
    let full_demands: Vec<(RegionId, PatientCounts)> = cmd
        .patient_trays
        .iter()
        .map(|&tray| (tray, untransported(cmd, tray)))
        .collect();

    let allocation = allocate_for_hospital_transport(&full_demands, &remaining_available);
    if remaining_available.total() > 0.0 {
        state.log_behavior(
            region,
            cmd.id,
            format!(
                "Sent vehicles{} for hospital transport based on patient numbers{}; available vehicles: {}",
                display_per_region(state, &allocation.vehicles),
                display_per_region(state, &full_demands),
                remaining_available,
            ),
        );
    }
    apply_transport_allocation(state, region, cmd, &allocation, remaining_available)?;

    // ── Start of hospital transfers ───────────────────────────────────────
    if !cmd.transport_started && !cmd.patient_trays.is_empty() && can_start_transport(cmd, &needs)
    {
        cmd.transport_started = true;
        let trays: Vec<RegionId> = cmd.patient_trays.clone();
        for tray in trays {
            issue_command(state, region, ExerciseEvent::StartHospitalTransfer { region: tray })?;
        }
        state.log_behavior(
            region,
            cmd.id,
            "Commanded the start of hospital transfers for all patient trays".into(),
        );
    }

    Ok(())
}

/// Patients last reported but not yet transported, per category.
fn untransported(cmd: &CommandState, tray: RegionId) -> PatientCounts {
    let expected = cmd.patients_expected.get(&tray).cloned().unwrap_or_default();
    let transported = cmd
        .patients_transported
        .get(&tray)
        .cloned()
        .unwrap_or_default();
    expected.sub(&transported)
}

/// Issue the transfer commands of one transport allocation, book the
/// vehicles as on the way, and accumulate the transported ledger (capped at
/// the expected counts).  Returns the shrunken availability pool.
fn apply_transport_allocation(
    state: &mut ExerciseState,
    region: RegionId,
    cmd: &mut CommandState,
    allocation: &TransportAllocation,
    mut remaining_available: VehicleCounts,
) -> MciResult<VehicleCounts> {
    for ((tray, vehicles), (_, covered)) in
        allocation.vehicles.iter().zip(&allocation.patients_covered)
    {
        if !vehicles.any_positive() {
            continue;
        }
        send_vehicles_to_region(state, region, cmd, *tray, vehicles, true)?;
        let expected = cmd.patients_expected.get(tray).cloned().unwrap_or_default();
        let transported = cmd.patients_transported.entry(*tray).or_default();
        *transported = transported.add(covered).min_with(&expected);
        remaining_available = remaining_available.sub(vehicles);
    }
    Ok(remaining_available)
}

/// Summon responder groups when the assumed patient total exceeds every
/// previous summon.  Thresholds are monotonic: once summoned for N
/// patients, never re-summoned for fewer.
fn escalate_responder_groups(
    state: &mut ExerciseState,
    region: RegionId,
    cmd: &mut CommandState,
    num_uninformed: usize,
    average_tray_size: f64,
    patients_in_informed: f64,
) -> MciResult<()> {
    let predicted = num_uninformed as f64 * average_tray_size;
    // Rounded up to the next ten so the threshold is not renegotiated for
    // every straggler.
    let assumed_num_patients =
        (10.0 * (0.1 * (2.0 / 3.0 * predicted + patients_in_informed)).ceil()) as u32;

    if assumed_num_patients > cmd.responder_patients {
        cmd.responder_patients = assumed_num_patients;
        let Some(&first_staging) = cmd.staging_areas.first() else {
            return Err(MciError::Config(
                "command behavior has no staging area to direct responders to".into(),
            ));
        };
        let target = state.transfer_point_of(first_staging)?.id;
        issue_command(
            state,
            region,
            ExerciseEvent::SendResponderGroup {
                target,
                patients: assumed_num_patients,
            },
        )?;
        state.log_behavior(
            region,
            cmd.id,
            format!(
                "Summoned responder groups for {assumed_num_patients} patients based on {patients_in_informed} reported and {predicted} predicted patients"
            ),
        );
    }
    Ok(())
}
