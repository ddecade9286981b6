//! `Region` — an independently simulated unit.
//!
//! A region owns its attached behaviors (attachment order is dispatch
//! order), its in-flight activities (keyed by monotonic id, so `BTreeMap`
//! iteration is creation order), and a private FIFO event queue.

use std::collections::{BTreeMap, VecDeque};

use mci_core::{ActivityId, BehaviorId, PatientCounts, RegionId, TreatmentProgress};

use crate::{ActivityState, BehaviorState, ExerciseEvent};

/// One simulated region.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    pub id: RegionId,
    pub name: String,

    /// Ground-truth patient counts at this region, observed by report
    /// activities.  Scenario setup and the excluded treatment layer write
    /// this; the engine only reads it.
    pub patients: PatientCounts,

    /// Ground-truth treatment progress, observed by the report behavior.
    pub treatment_progress: TreatmentProgress,

    /// Set when a `StartHospitalTransfer` command reaches this region; the
    /// hand-off point to the (external) transport-management layer.
    pub hospital_transport_started: bool,

    /// Inbound FIFO event queue, drained by the tick driver.
    pub in_events: VecDeque<ExerciseEvent>,

    /// Attached behaviors in attachment order.  A slot is `None` only while
    /// the dispatcher runs that slot's own handler.
    behaviors: Vec<Option<BehaviorState>>,

    /// In-flight activities keyed by id.
    activities: BTreeMap<ActivityId, ActivityState>,
}

impl Region {
    pub fn new(id: RegionId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            patients: PatientCounts::new(),
            treatment_progress: TreatmentProgress::Unknown,
            hospital_transport_started: false,
            in_events: VecDeque::new(),
            behaviors: Vec::new(),
            activities: BTreeMap::new(),
        }
    }

    /// Append an event to the inbound queue.
    pub fn send_event(&mut self, event: ExerciseEvent) {
        self.in_events.push_back(event);
    }

    // ── Behaviors ─────────────────────────────────────────────────────────

    /// Attach a behavior.  It receives events after all previously attached
    /// behaviors.
    pub fn attach_behavior(&mut self, state: BehaviorState) {
        self.behaviors.push(Some(state));
    }

    /// Detach a behavior by id, discarding its state.  No-op for unknown
    /// ids.
    pub fn detach_behavior(&mut self, id: BehaviorId) {
        self.behaviors
            .retain(|slot| slot.as_ref().is_none_or(|b| b.id() != id));
    }

    /// Number of behavior slots (including one transiently vacated slot
    /// during dispatch).
    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    /// Iterate attached behaviors in attachment order.
    pub fn behaviors(&self) -> impl Iterator<Item = &BehaviorState> {
        self.behaviors.iter().filter_map(|slot| slot.as_ref())
    }

    /// Take the behavior at `index` out of its slot so its handler can run
    /// against `&mut ExerciseState`.  Returns `None` for an out-of-range
    /// index or a slot detached mid-dispatch.
    pub fn take_behavior(&mut self, index: usize) -> Option<BehaviorState> {
        self.behaviors.get_mut(index)?.take()
    }

    /// Put a behavior back into the slot it was taken from.  If the slot
    /// was detached while the handler ran, the state is discarded.
    pub fn restore_behavior(&mut self, index: usize, state: BehaviorState) {
        if let Some(slot) = self.behaviors.get_mut(index) {
            if slot.is_none() {
                *slot = Some(state);
            }
        }
    }

    // ── Activities ────────────────────────────────────────────────────────

    /// Insert an activity by its own id.  The activity is not ticked during
    /// the pass that creates it (the pass snapshots ids first).
    pub fn add_activity(&mut self, state: ActivityState) {
        self.activities.insert(state.id(), state);
    }

    /// Snapshot of current activity ids in creation order.
    pub fn activity_ids(&self) -> Vec<ActivityId> {
        self.activities.keys().copied().collect()
    }

    pub fn has_activity(&self, id: ActivityId) -> bool {
        self.activities.contains_key(&id)
    }

    pub fn activity(&self, id: ActivityId) -> Option<&ActivityState> {
        self.activities.get(&id)
    }

    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }

    /// Remove an activity so its tick handler can run against
    /// `&mut ExerciseState`.  `None` if it was terminated in the meantime.
    pub fn take_activity(&mut self, id: ActivityId) -> Option<ActivityState> {
        self.activities.remove(&id)
    }

    /// Re-insert an activity whose tick decided to continue.
    pub fn restore_activity(&mut self, state: ActivityState) {
        self.activities.insert(state.id(), state);
    }
}
