//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  IDs are handed out by
//! [`IdSequence`], the exercise-wide monotonic generator: a later id always
//! compares greater than an earlier one, which is what makes `BTreeMap`
//! iteration over id-keyed tables equal to creation order.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl From<$inner> for $name {
            #[inline(always)]
            fn from(raw: $inner) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// A simulated region — an independently simulated geographic unit.
    pub struct RegionId(u32);
}

typed_id! {
    /// A behavior instance attached to a region.
    pub struct BehaviorId(u32);
}

typed_id! {
    /// An in-flight activity owned by a region.
    pub struct ActivityId(u32);
}

typed_id! {
    /// A transfer point — the vehicle hand-over location inside a region.
    pub struct TransferPointId(u32);
}

typed_id! {
    /// A vehicle participating in the exercise.
    pub struct VehicleId(u32);
}

typed_id! {
    /// A radiogram — one asynchronous report message.
    pub struct RadiogramId(u32);
}

typed_id! {
    /// A responder group that can be summoned as a unit.
    pub struct ResponderGroupId(u32);
}

// ── IdSequence ────────────────────────────────────────────────────────────────

/// Monotonically increasing id generator, one per exercise.
///
/// Ids are never reused within an exercise, so a freshly created activity
/// always sorts after every activity that existed before it.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IdSequence {
    next: u32,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next raw id value.
    #[inline]
    pub fn next_raw(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Hand out the next id, wrapped in the requested typed id.
    #[inline]
    pub fn next_id<T: From<u32>>(&mut self) -> T {
        T::from(self.next_raw())
    }
}
