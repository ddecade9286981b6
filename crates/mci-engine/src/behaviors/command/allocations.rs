//! The allocation cores: hospital transport and personnel coverage.
//!
//! Both passes drain a shared availability pool one vehicle per round, so a
//! large region cannot starve the others of a category's whole stock in one
//! step, and both serve the region with the largest outstanding need first,
//! breaking ties by first-seen region order (the demand slice's order).

use std::cmp::Ordering;

use mci_core::{
    PatientCounts, PersonnelCounts, PersonnelRole, RegionId, TriageCategory,
    VehicleCounts, VehicleType,
};
use rustc_hash::FxHashMap;

use super::constants::{transport_capacity, vehicle_crew};
use super::helpers::{first_usable_available, vehicles_left, vehicles_to_personnel};

/// Result of one transport allocation: the vehicles assigned per region and
/// the patients those vehicles cover, index-aligned with the demand slice.
pub(crate) struct TransportAllocation {
    pub vehicles: Vec<(RegionId, VehicleCounts)>,
    pub patients_covered: Vec<(RegionId, PatientCounts)>,
}

/// Distribute `available` vehicles to cover `demands` (untransported
/// patients per region, in first-seen region order).
///
/// Conservation: the vehicles assigned never exceed `available`; the
/// covered patients per region and category never exceed the demand.
pub(crate) fn allocate_for_hospital_transport(
    demands: &[(RegionId, PatientCounts)],
    available: &VehicleCounts,
) -> TransportAllocation {
    let mut remaining = available.clone();
    let mut vehicles: Vec<(RegionId, VehicleCounts)> = demands
        .iter()
        .map(|(region, _)| (*region, VehicleCounts::new()))
        .collect();
    let mut patients_covered: Vec<(RegionId, PatientCounts)> = demands
        .iter()
        .map(|(region, _)| (*region, PatientCounts::new()))
        .collect();

    for category in TriageCategory::TRANSPORT_PRIORITY {
        let usable: Vec<VehicleType> = VehicleType::ALL
            .into_iter()
            .filter(|&t| transport_capacity(t).get(category) > 0.0)
            .collect();

        let mut outstanding: Vec<(usize, f64)> = demands
            .iter()
            .enumerate()
            .map(|(i, (_, patients))| (i, patients.get(category)))
            .collect();

        while vehicles_left(&usable, &remaining) {
            // Stable sort: regions that tie on need keep first-seen order.
            outstanding.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            let Some(&(index, need)) = outstanding.first() else {
                break;
            };
            if need <= 0.0 {
                break;
            }
            let Some(wanted) = first_usable_available(&usable, &remaining) else {
                break;
            };
            let capacity = transport_capacity(wanted).get(category);
            vehicles[index].1.increment(wanted, 1.0);
            patients_covered[index]
                .1
                .increment(category, capacity.min(need));
            remaining.increment(wanted, -1.0);
            outstanding[0].1 -= capacity;
        }
    }

    TransportAllocation {
        vehicles,
        patients_covered,
    }
}

/// Distribute the remaining pool to cover personnel needs.
///
/// Roles are served in priority order; a type useful for one role stays in
/// the usable pool for the more common roles after it.  Only a *negative*
/// leftover need carries from one role into the next — over-allocation is a
/// penalty, but unmet need never reappears in a later role's pass.
///
/// `needs` is updated in place with the crews of the assigned vehicles;
/// `remaining_requests` and `remaining_available` shrink as vehicles are
/// picked.  Returns the vehicles assigned per region, index-aligned with
/// `needs`.
pub(crate) fn allocate_for_personnel(
    needs: &mut [(RegionId, PersonnelCounts)],
    remaining_requests: &mut FxHashMap<RegionId, VehicleCounts>,
    remaining_available: &mut VehicleCounts,
) -> Vec<(RegionId, VehicleCounts)> {
    let mut allocated: Vec<(RegionId, VehicleCounts)> = needs
        .iter()
        .map(|(region, _)| (*region, VehicleCounts::new()))
        .collect();
    let mut usable: Vec<VehicleType> = Vec::new();
    let mut carry: FxHashMap<RegionId, f64> = FxHashMap::default();

    for role in PersonnelRole::ALLOCATION_PRIORITY {
        for vehicle_type in VehicleType::ALL {
            if vehicle_crew(vehicle_type).get(role) > 0.0 && !usable.contains(&vehicle_type) {
                usable.push(vehicle_type);
            }
        }
        // Declaration order keeps the "first available" pick deterministic.
        usable.sort();

        let mut outstanding: Vec<(usize, f64)> = needs
            .iter()
            .enumerate()
            .map(|(index, (region, need))| {
                let penalty = carry.get(region).copied().unwrap_or(0.0).min(0.0);
                (index, need.get(role) + penalty)
            })
            .collect();

        while vehicles_left(&usable, remaining_available) {
            // Stable sort: regions that tie on need keep first-seen order.
            outstanding.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
            let Some(&(index, need)) = outstanding.first() else {
                break;
            };
            if need <= 0.0 {
                break;
            }
            let region = needs[index].0;

            // Prefer a type the region explicitly requested, if one is both
            // available and useful for this role.
            let requested_pick = remaining_requests.get(&region).and_then(|requests| {
                requests.iter().find_map(|(t, count)| {
                    (count > 0.0 && usable.contains(&t) && remaining_available.get(t) > 0.0)
                        .then_some(t)
                })
            });
            let wanted = match requested_pick {
                Some(vehicle_type) => {
                    if let Some(requests) = remaining_requests.get_mut(&region) {
                        requests.increment(vehicle_type, -1.0);
                    }
                    vehicle_type
                }
                None => match first_usable_available(&usable, remaining_available) {
                    Some(vehicle_type) => vehicle_type,
                    None => break,
                },
            };

            allocated[index].1.increment(wanted, 1.0);
            remaining_available.increment(wanted, -1.0);
            let crew = vehicles_to_personnel(&VehicleCounts::from([(wanted, 1.0)]));
            needs[index].1 = needs[index].1.sub(&crew);
            // The working value drops by one per assigned vehicle,
            // independent of crew size.
            outstanding[0].1 -= 1.0;
        }

        carry = outstanding
            .iter()
            .map(|&(index, value)| (needs[index].0, value))
            .collect();
    }

    allocated
}
