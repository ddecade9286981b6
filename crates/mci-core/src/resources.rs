//! Pointwise arithmetic over named-quantity maps.
//!
//! A [`ResourceMap`] maps a fixed category enumeration (triage category,
//! personnel role, vehicle type) to an `f64` quantity.  An absent key is
//! equivalent to quantity zero, and every operation is defined pointwise
//! over the union of the keys present in its operands — no operation ever
//! requires renormalizing, and none mutates its inputs.
//!
//! Quantities are `f64` because intermediate computations are fractional
//! (personnel needs are scaled by per-patient probability factors) and may
//! transiently go negative; [`ceil`][ResourceMap::ceil] is applied only at
//! the point a discrete unit count is required.

use std::collections::BTreeMap;
use std::fmt;

use crate::{PersonnelRole, TriageCategory, VehicleType};

/// Patient counts by triage category.
pub type PatientCounts = ResourceMap<TriageCategory>;

/// Vehicle counts by vehicle type.
pub type VehicleCounts = ResourceMap<VehicleType>;

/// Personnel counts by qualification role.
pub type PersonnelCounts = ResourceMap<PersonnelRole>;

/// A total map from a category key to an `f64` quantity; absent keys read
/// as zero.
///
/// Keys iterate in `Ord` order (the enum's declaration order), which keeps
/// every derived computation deterministic.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMap<K: Ord + Copy> {
    counts: BTreeMap<K, f64>,
}

impl<K: Ord + Copy> Default for ResourceMap<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Copy> ResourceMap<K> {
    pub fn new() -> Self {
        Self { counts: BTreeMap::new() }
    }

    /// The quantity for `key`; zero if absent.
    #[inline]
    pub fn get(&self, key: K) -> f64 {
        self.counts.get(&key).copied().unwrap_or(0.0)
    }

    /// Set the quantity for `key`.
    pub fn set(&mut self, key: K, amount: f64) {
        self.counts.insert(key, amount);
    }

    /// Add `amount` to the quantity for `key` in place.
    pub fn increment(&mut self, key: K, amount: f64) {
        *self.counts.entry(key).or_insert(0.0) += amount;
    }

    /// Iterate `(key, quantity)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (K, f64)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }

    /// `true` if at least one entry is strictly positive.
    pub fn any_positive(&self) -> bool {
        self.counts.values().any(|&v| v > 0.0)
    }

    /// Sum of all quantities.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    // ── Pointwise binary operations ───────────────────────────────────────

    /// `self + other`, pointwise over the union of keys.
    pub fn add(&self, other: &Self) -> Self {
        self.pointwise(other, |a, b| a + b)
    }

    /// `self − other`, pointwise; entries may go negative.
    pub fn sub(&self, other: &Self) -> Self {
        self.pointwise(other, |a, b| a - b)
    }

    /// `self − other`, with every entry floored at `floor` (e.g. `0.0` for
    /// ledgers that must not go negative).
    pub fn sub_floored(&self, other: &Self, floor: f64) -> Self {
        self.pointwise(other, |a, b| (a - b).max(floor))
    }

    /// Pointwise minimum of `self` and `other`.
    pub fn min_with(&self, other: &Self) -> Self {
        self.pointwise(other, f64::min)
    }

    /// Pointwise maximum of `self` and `other`.
    pub fn max_with(&self, other: &Self) -> Self {
        self.pointwise(other, f64::max)
    }

    // ── Pointwise unary operations ────────────────────────────────────────

    /// Every quantity multiplied by `factor`.
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|v| v * factor)
    }

    /// Every quantity rounded up to the next whole unit.  Never decreases
    /// an entry.
    pub fn ceil(&self) -> Self {
        self.map(f64::ceil)
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            counts: self.counts.iter().map(|(&k, &v)| (k, f(v))).collect(),
        }
    }

    fn pointwise(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        let mut counts: BTreeMap<K, f64> = self
            .counts
            .iter()
            .map(|(&k, &v)| (k, f(v, other.get(k))))
            .collect();
        for (&k, &v) in &other.counts {
            counts.entry(k).or_insert_with(|| f(0.0, v));
        }
        Self { counts }
    }
}

/// Equality is pointwise over the union of keys: an explicit zero entry
/// equals an absent one.
impl<K: Ord + Copy> PartialEq for ResourceMap<K> {
    fn eq(&self, other: &Self) -> bool {
        self.counts.keys().all(|&k| self.get(k) == other.get(k))
            && other.counts.keys().all(|&k| self.get(k) == other.get(k))
    }
}

impl<K: Ord + Copy> FromIterator<(K, f64)> for ResourceMap<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.increment(k, v);
        }
        map
    }
}

impl<K: Ord + Copy, const N: usize> From<[(K, f64); N]> for ResourceMap<K> {
    fn from(entries: [(K, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// Formats the non-zero entries, e.g. `{2 red, 1 yellow}`; `{}` when all
/// quantities are zero.
impl<K: Ord + Copy + fmt::Display> fmt::Display for ResourceMap<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for (k, v) in self.iter() {
            if v == 0.0 {
                continue;
            }
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{v} {k}")?;
            first = false;
        }
        f.write_str("}")
    }
}
