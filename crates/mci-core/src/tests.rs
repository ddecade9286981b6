//! Unit tests for mci-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActivityId, IdSequence, RadiogramId, RegionId};

    #[test]
    fn sequence_is_monotonic() {
        let mut ids = IdSequence::new();
        let a: ActivityId = ids.next_id();
        let b: ActivityId = ids.next_id();
        let c: RadiogramId = ids.next_id();
        assert!(a < b);
        assert!(b.0 < c.0);
    }

    #[test]
    fn ordering() {
        assert!(RegionId(0) < RegionId(1));
        assert!(ActivityId(100) > ActivityId(99));
    }

    #[test]
    fn display() {
        assert_eq!(RegionId(7).to_string(), "RegionId(7)");
    }
}

#[cfg(test)]
mod time {
    use crate::{MINUTE_MS, SECOND_MS, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn ms_constants() {
        assert_eq!(MINUTE_MS, 60 * SECOND_MS);
    }
}

#[cfg(test)]
mod categories {
    use crate::{PersonnelRole, TreatmentProgress, TriageCategory, VehicleType};

    #[test]
    fn transport_priority_is_severity_order() {
        assert_eq!(
            TriageCategory::TRANSPORT_PRIORITY,
            [TriageCategory::Red, TriageCategory::Yellow, TriageCategory::Green]
        );
    }

    #[test]
    fn allocation_priority_excludes_group_leader() {
        assert!(!PersonnelRole::ALLOCATION_PRIORITY.contains(&PersonnelRole::GroupLeader));
        assert_eq!(PersonnelRole::ALLOCATION_PRIORITY[0], PersonnelRole::Physician);
    }

    #[test]
    fn treatment_progress_orders_by_progression() {
        assert!(TreatmentProgress::Unknown < TreatmentProgress::Counted);
        assert!(TreatmentProgress::Counted < TreatmentProgress::Secured);
    }

    #[test]
    fn vehicle_pick_order_starts_with_ambulance() {
        assert_eq!(VehicleType::ALL[0], VehicleType::Ambulance);
    }
}

#[cfg(test)]
mod resources {
    use crate::{PatientCounts, TriageCategory, VehicleCounts, VehicleType};

    use TriageCategory::{Green, Red, Yellow};

    #[test]
    fn absent_key_reads_zero() {
        let map = PatientCounts::from([(Red, 2.0)]);
        assert_eq!(map.get(Yellow), 0.0);
        assert_eq!(map.total(), 2.0);
    }

    #[test]
    fn explicit_zero_equals_absent() {
        let a = PatientCounts::from([(Red, 1.0), (Green, 0.0)]);
        let b = PatientCounts::from([(Red, 1.0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn sub_can_go_negative_and_floored_cannot() {
        let a = PatientCounts::from([(Red, 1.0)]);
        let b = PatientCounts::from([(Red, 3.0), (Yellow, 2.0)]);
        let plain = a.sub(&b);
        assert_eq!(plain.get(Red), -2.0);
        assert_eq!(plain.get(Yellow), -2.0);
        let floored = a.sub_floored(&b, 0.0);
        assert_eq!(floored.get(Red), 0.0);
        assert_eq!(floored.get(Yellow), 0.0);
    }

    #[test]
    fn min_max_are_pointwise_over_union() {
        let a = PatientCounts::from([(Red, 5.0), (Yellow, 1.0)]);
        let b = PatientCounts::from([(Red, 2.0), (Green, 4.0)]);
        let min = a.min_with(&b);
        assert_eq!(min.get(Red), 2.0);
        assert_eq!(min.get(Yellow), 0.0);
        assert_eq!(min.get(Green), 0.0);
        let max = a.max_with(&b);
        assert_eq!(max.get(Red), 5.0);
        assert_eq!(max.get(Yellow), 1.0);
        assert_eq!(max.get(Green), 4.0);
    }

    #[test]
    fn increment_accumulates() {
        let mut map = VehicleCounts::new();
        map.increment(VehicleType::Ambulance, 1.0);
        map.increment(VehicleType::Ambulance, 2.0);
        assert_eq!(map.get(VehicleType::Ambulance), 3.0);
    }

    #[test]
    fn display_skips_zero_entries() {
        let map = PatientCounts::from([(Red, 2.0), (Yellow, 0.0)]);
        assert_eq!(map.to_string(), "{2 red}");
        assert_eq!(PatientCounts::new().to_string(), "{}");
    }

    #[test]
    fn any_positive_ignores_negatives() {
        let map = PatientCounts::from([(Red, -1.0)]);
        assert!(!map.any_positive());
    }
}

// ── Arithmetic laws (property tests) ──────────────────────────────────────────

#[cfg(test)]
mod laws {
    use proptest::prelude::*;

    use crate::{PatientCounts, TriageCategory};

    /// Integer-valued maps keep every operation exact in f64.
    fn arb_counts() -> impl Strategy<Value = PatientCounts> {
        prop::collection::vec(
            (prop::sample::select(TriageCategory::ALL.to_vec()), 0u32..1_000),
            0..8,
        )
        .prop_map(|entries| entries.into_iter().map(|(k, v)| (k, f64::from(v))).collect())
    }

    proptest! {
        #[test]
        fn add_commutes(a in arb_counts(), b in arb_counts()) {
            prop_assert_eq!(a.add(&b), b.add(&a));
        }

        #[test]
        fn sub_inverts_add(a in arb_counts(), b in arb_counts()) {
            prop_assert_eq!(a.add(&b).sub(&b), a);
        }

        #[test]
        fn scale_distributes_over_total(a in arb_counts(), k in 0u32..100) {
            let k = f64::from(k);
            prop_assert_eq!(a.scale(k).total(), k * a.total());
        }

        #[test]
        fn ceil_never_decreases(a in arb_counts(), denom in 1u32..8) {
            // Fractional quantities with an exact binary representation.
            let fractional = a.scale(1.0 / f64::from(1 << denom));
            let ceiled = fractional.ceil();
            for (k, v) in fractional.iter() {
                prop_assert!(ceiled.get(k) >= v);
            }
        }
    }
}
