//! Unit tests for the exercise-state tree and its records.

#[cfg(test)]
mod region {
    use mci_core::{ActivityId, BehaviorId};

    use crate::{ActivityState, BehaviorState, ExerciseState, ReportState};

    #[test]
    fn behavior_slots_keep_attachment_order() {
        let mut state = ExerciseState::new();
        let region = state.create_region("collection point north");
        let r = state.region_mut(region).unwrap();
        r.attach_behavior(BehaviorState::Report(ReportState::new(BehaviorId(10))));
        r.attach_behavior(BehaviorState::Report(ReportState::new(BehaviorId(11))));
        let ids: Vec<_> = r.behaviors().map(|b| b.id()).collect();
        assert_eq!(ids, vec![BehaviorId(10), BehaviorId(11)]);
    }

    #[test]
    fn take_and_restore_behavior_round_trips() {
        let mut state = ExerciseState::new();
        let region = state.create_region("north");
        let r = state.region_mut(region).unwrap();
        r.attach_behavior(BehaviorState::Report(ReportState::new(BehaviorId(1))));

        let taken = r.take_behavior(0).unwrap();
        assert_eq!(r.behaviors().count(), 0);
        assert_eq!(r.behavior_count(), 1);
        r.restore_behavior(0, taken);
        assert_eq!(r.behaviors().count(), 1);
    }

    #[test]
    fn detach_discards_state() {
        let mut state = ExerciseState::new();
        let region = state.create_region("north");
        let r = state.region_mut(region).unwrap();
        r.attach_behavior(BehaviorState::Report(ReportState::new(BehaviorId(1))));
        r.detach_behavior(BehaviorId(1));
        assert_eq!(r.behavior_count(), 0);
        // Unknown id is a no-op.
        r.detach_behavior(BehaviorId(99));
    }

    #[test]
    fn activity_ids_snapshot_is_creation_order() {
        let mut state = ExerciseState::new();
        let region = state.create_region("north");
        let a: ActivityId = state.ids.next_id();
        let b: ActivityId = state.ids.next_id();
        let r = state.region_mut(region).unwrap();
        r.add_activity(ActivityState::GatherRadiograms { id: b });
        r.add_activity(ActivityState::GatherRadiograms { id: a });
        assert_eq!(r.activity_ids(), vec![a, b]);
    }

    #[test]
    fn take_activity_twice_returns_none() {
        let mut state = ExerciseState::new();
        let region = state.create_region("north");
        let id: ActivityId = state.ids.next_id();
        let r = state.region_mut(region).unwrap();
        r.add_activity(ActivityState::GatherRadiograms { id });
        assert!(r.take_activity(id).is_some());
        assert!(r.take_activity(id).is_none());
    }
}

#[cfg(test)]
mod command_state {
    use mci_core::{BehaviorId, PatientCounts, RegionId, TriageCategory};

    use crate::CommandState;

    #[test]
    fn removing_a_tray_cleans_every_ledger() {
        let tray = RegionId(5);
        let mut cmd = CommandState::new(BehaviorId(0), vec![], vec![tray]);
        cmd.trays_contacted.insert(tray);
        cmd.trays_with_information.insert(tray);
        cmd.patients_expected
            .insert(tray, PatientCounts::from([(TriageCategory::Red, 2.0)]));
        cmd.patients_transported.insert(tray, PatientCounts::new());

        cmd.remove_patient_tray(tray);

        assert!(cmd.patient_trays.is_empty());
        assert!(cmd.trays_contacted.is_empty());
        assert!(cmd.trays_with_information.is_empty());
        assert!(cmd.patients_expected.is_empty());
        assert!(cmd.patients_transported.is_empty());
    }

    #[test]
    fn add_tray_is_idempotent() {
        let mut cmd = CommandState::new(BehaviorId(0), vec![], vec![]);
        cmd.add_patient_tray(RegionId(1));
        cmd.add_patient_tray(RegionId(1));
        assert_eq!(cmd.patient_trays, vec![RegionId(1)]);
    }
}

#[cfg(test)]
mod state {
    use mci_core::{MciError, RegionId, VehicleType};

    use crate::{ExerciseState, RadiogramKind};

    #[test]
    fn missing_transfer_point_is_a_consistency_error() {
        let mut state = ExerciseState::new();
        let region = state.create_region("north");
        match state.transfer_point_of(region) {
            Err(MciError::MissingTransferPoint { region: r }) => assert_eq!(r, region),
            other => panic!("expected MissingTransferPoint, got {other:?}"),
        }
    }

    #[test]
    fn transfer_point_lookup_finds_own_region() {
        let mut state = ExerciseState::new();
        let north = state.create_region("north");
        let south = state.create_region("south");
        state.create_transfer_point(north);
        let tp_south = state.create_transfer_point(south);
        assert_eq!(state.transfer_point_of(south).unwrap().id, tp_south);
    }

    #[test]
    fn unknown_region_lookup_errors() {
        let state = ExerciseState::new();
        assert!(matches!(
            state.region(RegionId(42)),
            Err(MciError::RegionNotFound(RegionId(42)))
        ));
    }

    #[test]
    fn vehicles_in_region_counts_by_type() {
        let mut state = ExerciseState::new();
        let depot = state.create_region("depot");
        let elsewhere = state.create_region("elsewhere");
        state.create_vehicle(depot, VehicleType::Ambulance);
        state.create_vehicle(depot, VehicleType::Ambulance);
        state.create_vehicle(elsewhere, VehicleType::RescueHelicopter);

        let counts = state.vehicles_in_region(depot);
        assert_eq!(counts.get(VehicleType::Ambulance), 2.0);
        assert_eq!(counts.get(VehicleType::RescueHelicopter), 0.0);
    }

    #[test]
    fn radiograms_read_once() {
        let mut state = ExerciseState::new();
        let region = state.create_region("north");
        let id = state.publish_radiogram(region, RadiogramKind::MaterialCount { total: 3.0 });
        assert_eq!(state.unread_radiogram_ids(), vec![id]);
        state.mark_radiogram_read(id);
        assert!(state.unread_radiogram_ids().is_empty());
    }
}
