//! Integration tests: full closed-loop scenarios through the tick driver.

use mci_core::{
    MciError, PatientCounts, RegionId, TreatmentProgress, TriageCategory, VehicleCounts,
    VehicleType,
};
use mci_model::{
    BehaviorState, CommandState, ExerciseEvent, ExerciseState, ReportKind,
    ReportSchedule, VehicleOccupation,
};

use crate::{Exercise, ExerciseBuilder, advance_tick, deliver_event};

use TriageCategory::{Red, Yellow};
use VehicleType::{Ambulance, RescueHelicopter};

// ── Helpers ───────────────────────────────────────────────────────────────────

struct Scenario {
    exercise: Exercise,
    command: RegionId,
    tray: RegionId,
    staging: RegionId,
}

/// A command post overseeing one counted tray (2 red, 1 yellow) and one
/// staging area holding three ambulances and a helicopter.
fn standard_scenario() -> Scenario {
    let mut builder = ExerciseBuilder::new();
    let command = builder.add_region("command post");
    let tray = builder.add_region("collection point north");
    let staging = builder.add_region("staging area south");
    builder.patient_tray(tray).unwrap();
    builder.staging_area(staging).unwrap();
    builder
        .set_patients(
            tray,
            PatientCounts::from([(Red, 2.0), (Yellow, 1.0)]),
            TreatmentProgress::Counted,
        )
        .unwrap();
    builder.add_vehicles(staging, Ambulance, 3).unwrap();
    builder.add_vehicles(staging, RescueHelicopter, 1).unwrap();
    builder.command_post(command, &[staging], &[tray], &[]).unwrap();

    Scenario {
        exercise: Exercise::new(builder.build().unwrap(), 1_000),
        command,
        tray,
        staging,
    }
}

fn command_state(state: &ExerciseState, region: RegionId) -> &CommandState {
    state
        .region(region)
        .unwrap()
        .behaviors()
        .find_map(|b| match b {
            BehaviorState::Command(cmd) => Some(cmd),
            _ => None,
        })
        .expect("command behavior attached")
}

// ── Closed loop ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod closed_loop {
    use super::*;

    #[test]
    fn vehicles_flow_from_staging_to_the_tray() {
        let Scenario {
            mut exercise,
            command,
            tray,
            staging,
        } = standard_scenario();
        exercise.run_ticks(10).unwrap();
        let state = &exercise.state;

        // The allocation moved the two free ambulances and the helicopter
        // to the tray; the staging leader's ambulance stayed behind.
        assert_eq!(state.vehicles_in_region(tray).total(), 3.0);
        assert_eq!(state.vehicles_in_region(staging).get(Ambulance), 1.0);

        // The red evacuation vehicle is reserved for patient transport under
        // the command post's management.
        assert!(state.vehicles.values().any(|v| {
            v.occupation == VehicleOccupation::PatientTransport { managed_by: command }
        }));

        // The command knows the tray and still awaits the tray's own
        // vehicle report confirming the arrivals.
        let cmd = command_state(state, command);
        assert!(cmd.trays_with_information.contains(&tray));
        let on_the_way = cmd
            .vehicles_on_the_way
            .values()
            .fold(VehicleCounts::new(), |acc, v| acc.add(v));
        assert_eq!(on_the_way.total(), 3.0);

        // The audit trail recorded the exchange.
        assert!(
            state
                .behavior_log
                .iter()
                .any(|entry| entry.message.contains("Received patient data"))
        );
        assert!(
            state
                .behavior_log
                .iter()
                .any(|entry| entry.message.contains("red patients"))
        );
    }

    #[test]
    fn escalation_uses_the_default_tray_size_without_data() {
        let mut builder = ExerciseBuilder::new();
        let command = builder.add_region("command post");
        let tray = builder.add_region("collection point");
        let staging = builder.add_region("staging area");
        builder.patient_tray(tray).unwrap();
        builder.staging_area(staging).unwrap();
        let group =
            builder.add_responder_group("first wave", VehicleCounts::from([(Ambulance, 2.0)]));
        builder
            .command_post(command, &[staging], &[tray], &[(group, 10)])
            .unwrap();
        let mut exercise = Exercise::new(builder.build().unwrap(), 1_000);

        // One silent tray at the default size of 5 →
        // 10 * ceil(0.1 * (2/3 * 5)) = 10 assumed patients.
        exercise.run_ticks(7).unwrap();
        let cmd = command_state(&exercise.state, command);
        assert_eq!(cmd.responder_patients, 10);

        // The responder group sized for 10 arrived at the staging area.
        assert_eq!(exercise.state.vehicles_in_region(staging).total(), 2.0);

        // The threshold never decreases on later, quieter rounds (the
        // arrived vehicles themselves may move on).
        exercise.run_ticks(10).unwrap();
        assert_eq!(command_state(&exercise.state, command).responder_patients, 10);
    }

    #[test]
    fn progress_change_starts_the_data_collection_loop() {
        let Scenario {
            mut exercise,
            command,
            tray,
            ..
        } = standard_scenario();
        // Undo the scenario's head start: the tray starts unknown.
        {
            let r = exercise.state.region_mut(tray).unwrap();
            r.treatment_progress = TreatmentProgress::Unknown;
        }

        exercise.run_ticks(4).unwrap();
        let cmd = command_state(&exercise.state, command);
        assert!(
            !cmd.trays_with_information.contains(&tray),
            "an uncounted tray reports without information"
        );

        // Counting finishes mid-exercise.
        exercise
            .state
            .region_mut(tray)
            .unwrap()
            .treatment_progress = TreatmentProgress::Counted;
        exercise.run_ticks(10).unwrap();

        let cmd = command_state(&exercise.state, command);
        assert!(cmd.trays_with_information.contains(&tray));
        assert_eq!(
            cmd.patients_expected[&tray],
            PatientCounts::from([(Red, 2.0), (Yellow, 1.0)])
        );
    }
}

// ── Driver ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod driver {
    use super::*;

    #[test]
    fn advance_tick_injects_the_implicit_tick_event() {
        let mut builder = ExerciseBuilder::new();
        let region = builder.add_region("collection point");
        builder.patient_tray(region).unwrap();
        builder
            .set_patients(region, PatientCounts::new(), TreatmentProgress::Counted)
            .unwrap();
        let mut state = builder.build().unwrap();

        advance_tick(&mut state, region, 1_000).unwrap();
        // The report behavior saw the tick and announced the progress.
        assert_eq!(state.radiograms.len(), 1);
    }

    #[test]
    fn delivered_events_are_processed_within_the_same_tick() {
        let mut builder = ExerciseBuilder::new();
        let region = builder.add_region("collection point");
        builder.patient_tray(region).unwrap();
        let mut state = builder.build().unwrap();

        deliver_event(
            &mut state,
            region,
            ExerciseEvent::ReportRequested {
                kind: ReportKind::VehicleCount,
                schedule: ReportSchedule::Once,
            },
        )
        .unwrap();
        advance_tick(&mut state, region, 1_000).unwrap();

        // The request became a one-shot report activity, which already ran
        // in the same tick's activity pass.
        assert!(
            state
                .radiograms
                .values()
                .any(|r| matches!(r.kind, mci_model::RadiogramKind::VehicleCount { .. }))
        );
        assert!(state.region(region).unwrap().in_events.is_empty());
    }

    #[test]
    fn unknown_region_halts_the_tick() {
        let mut state = ExerciseState::new();
        assert!(matches!(
            advance_tick(&mut state, RegionId(7), 1_000),
            Err(MciError::RegionNotFound(RegionId(7)))
        ));
        assert!(matches!(
            deliver_event(&mut state, RegionId(7), ExerciseEvent::Tick),
            Err(MciError::RegionNotFound(RegionId(7)))
        ));
    }

    #[test]
    fn exercise_counts_ticks() {
        let Scenario { mut exercise, .. } = standard_scenario();
        exercise.run_ticks(5).unwrap();
        assert_eq!(exercise.current_tick.0, 5);
    }
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn command_post_without_staging_area_is_rejected() {
        let mut builder = ExerciseBuilder::new();
        let command = builder.add_region("command post");
        let tray = builder.add_region("collection point");
        builder.command_post(command, &[], &[tray], &[]).unwrap();
        assert!(matches!(builder.build(), Err(MciError::Config(_))));
    }

    #[test]
    fn dangling_subordinate_reference_is_rejected() {
        let mut builder = ExerciseBuilder::new();
        let command = builder.add_region("command post");
        let staging = builder.add_region("staging area");
        builder
            .command_post(command, &[staging], &[RegionId(999)], &[])
            .unwrap();
        assert!(matches!(
            builder.build(),
            Err(MciError::RegionNotFound(RegionId(999)))
        ));
    }

    #[test]
    fn unknown_responder_group_is_rejected() {
        let mut builder = ExerciseBuilder::new();
        let command = builder.add_region("command post");
        let staging = builder.add_region("staging area");
        builder
            .command_post(
                command,
                &[staging],
                &[],
                &[(mci_core::ResponderGroupId(42), 10)],
            )
            .unwrap();
        assert!(matches!(
            builder.build(),
            Err(MciError::ResponderGroupNotFound(_))
        ));
    }
}
