//! Tick handlers for every activity variant.
//!
//! An activity's tick runs to completion synchronously and returns whether
//! the activity survives the pass.  Handlers receive the owning region's id
//! and the whole exercise tree; the state record itself has been taken out
//! of the region's table for the duration of the call.

use mci_core::{MciResult, RegionId, TreatmentProgress};
use mci_model::{
    ActivityState, ExerciseEvent, ExerciseState, RadiogramKind, ReportKind,
};
use tracing::{debug, trace};

use crate::ActivityDecision;

pub(crate) fn tick_activity(
    state: &mut ExerciseState,
    region: RegionId,
    activity: &mut ActivityState,
    tick_interval_ms: u64,
) -> MciResult<ActivityDecision> {
    match activity {
        // Commands take a one-tick detour through the own queue so they are
        // dispatched like any externally delivered event.
        ActivityState::IssueCommand { event, .. } => {
            state.region_mut(region)?.send_event(event.clone());
            Ok(ActivityDecision::Finish)
        }

        ActivityState::GatherRadiograms { .. } => {
            gather_radiograms(state, region)?;
            Ok(ActivityDecision::Finish)
        }

        ActivityState::SendRemoteEvent { target, event, .. } => {
            state.send_event(*target, event.clone())?;
            Ok(ActivityDecision::Finish)
        }

        ActivityState::DelayedEvent {
            event, remaining_ms, ..
        } => {
            if *remaining_ms > tick_interval_ms {
                *remaining_ms -= tick_interval_ms;
                Ok(ActivityDecision::Continue)
            } else {
                state.region_mut(region)?.send_event(event.clone());
                Ok(ActivityDecision::Finish)
            }
        }

        ActivityState::GenerateReport { kind, .. } => {
            publish_report(state, region, *kind)?;
            Ok(ActivityDecision::Finish)
        }

        ActivityState::RecurringReport {
            kind,
            interval_ms,
            elapsed_ms,
            ..
        } => {
            *elapsed_ms += tick_interval_ms;
            while *interval_ms > 0 && *elapsed_ms >= *interval_ms {
                *elapsed_ms -= *interval_ms;
                publish_report(state, region, *kind)?;
            }
            Ok(ActivityDecision::Continue)
        }
    }
}

/// Cleanup hook, invoked exactly once when an activity ends — whether it
/// finished itself or was terminated externally.
pub(crate) fn on_terminate(state: &ExerciseState, region: RegionId, activity: &ActivityState) {
    match activity {
        ActivityState::RecurringReport { kind, .. } => {
            debug!(
                region = %state.region_name(region),
                ?kind,
                "recurring report stopped"
            );
        }
        _ => trace!(region = %state.region_name(region), kind = activity.kind_name(), "activity ended"),
    }
}

// ── Report publication ────────────────────────────────────────────────────────

/// Count the region's ground truth and publish the matching radiogram.
fn publish_report(state: &mut ExerciseState, region: RegionId, kind: ReportKind) -> MciResult<()> {
    match kind {
        ReportKind::PatientCount => {
            let r = state.region(region)?;
            let counts = r.patients.clone();
            // Before counting has finished the report carries no numbers.
            let information_available = r.treatment_progress >= TreatmentProgress::Counted;
            state.publish_radiogram(
                region,
                RadiogramKind::PatientCount {
                    counts,
                    information_available,
                },
            );
        }
        ReportKind::VehicleCount => {
            let counts = state.vehicles_in_region(region);
            state.publish_radiogram(
                region,
                RadiogramKind::VehicleCount {
                    counts,
                    information_available: true,
                },
            );
        }
    }
    Ok(())
}

// ── Radiogram gathering ───────────────────────────────────────────────────────

/// Translate every unread radiogram into the matching data event on the
/// own region's queue and mark it read.  Kinds this exercise role does not
/// consume are left unread for the (external) consumers that do.
fn gather_radiograms(state: &mut ExerciseState, region: RegionId) -> MciResult<()> {
    for id in state.unread_radiogram_ids() {
        let Some(radiogram) = state.radiograms.get(&id) else {
            continue;
        };
        let about = radiogram.region;
        let event = match &radiogram.kind {
            RadiogramKind::PatientCount {
                counts,
                information_available,
            } => Some(ExerciseEvent::PatientDataReceived {
                region: about,
                patients: counts.clone(),
                information_available: *information_available,
            }),
            RadiogramKind::VehicleCount {
                counts,
                information_available,
            } => Some(ExerciseEvent::VehicleDataReceived {
                region: about,
                vehicles: counts.clone(),
                information_available: *information_available,
            }),
            RadiogramKind::TreatmentStatus { progress } => {
                Some(ExerciseEvent::TreatmentProgressDataReceived {
                    region: about,
                    progress: *progress,
                })
            }
            RadiogramKind::ResourceRequest { vehicles } => {
                Some(ExerciseEvent::ResourceRequestDataReceived {
                    region: about,
                    vehicles: vehicles.clone(),
                })
            }
            RadiogramKind::MissingTransferConnection { transfer_point } => {
                Some(ExerciseEvent::TransferConnectionMissing {
                    region: about,
                    transfer_point: *transfer_point,
                })
            }
            RadiogramKind::MaterialCount { .. } | RadiogramKind::PersonnelCount { .. } => None,
        };
        if let Some(event) = event {
            state.region_mut(region)?.send_event(event);
            state.mark_radiogram_read(id);
        }
    }
    Ok(())
}
