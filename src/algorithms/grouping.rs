//! Grouping of `(category, value)` pairs for per-group statistics.
//!
//! ## Purpose
//!
//! Grouped plots (box plots per category, mean ± σ per bin) first partition
//! the values by a category column. A group-definition function maps each
//! category value to its group center; values with the same center share a group.
//!
//! ## Design notes
//!
//! * **Ordered**: Groups are kept in a `BTreeMap` keyed by the group center, so
//!   iteration runs in ascending center order.
//! * **Validity**: A pair is skipped if either the category or the value is invalid.
//!
//! ## Key concepts
//!
//! * **Identity**: Every distinct category is its own group.
//! * **Round**: Categories are rounded to the nearest integer.
//! * **Custom round**: Categories snap to `center + k · width`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};
#[cfg(feature = "std")]
use std::{collections::BTreeMap, vec::Vec};

use core::cmp::Ordering;

// External dependencies
use num_traits::Float;

// Internal dependencies
use crate::primitives::sample::{Sample, is_ok_float};

// ============================================================================
// Group Key
// ============================================================================

/// Group center used as an ordered map key (total order on `f64`).
#[derive(Debug, Clone, Copy)]
pub struct GroupKey(pub f64);

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Values per group.
pub type GroupedData = BTreeMap<GroupKey, Vec<f64>>;

/// `(categories, values)` per group.
pub type GroupedPairs = BTreeMap<GroupKey, (Vec<f64>, Vec<f64>)>;

// ============================================================================
// Group Definitions
// ============================================================================

/// Each category is its own group.
#[inline]
pub fn grouping_identity(v: f64) -> f64 {
    v
}

/// Round to the nearest integer.
#[inline]
pub fn grouping_round(v: f64) -> f64 {
    Float::round(v)
}

/// Snap `v` to the nearest of `first_center + k · width`.
#[inline]
pub fn grouping_custom_round(v: f64, first_center: f64, width: f64) -> f64 {
    first_center + Float::round((v - first_center) / width) * width
}

/// [`grouping_custom_round`] with fixed center and width.
pub fn make_grouping_custom_round(first_center: f64, width: f64) -> impl Fn(f64) -> f64 + Copy {
    move |v| grouping_custom_round(v, first_center, width)
}

// ============================================================================
// Grouping
// ============================================================================

/// Partition `values` by the group of the matching `categories` entry.
pub fn group_data<C, V, G>(categories: C, values: V, group: G) -> GroupedData
where
    C: IntoIterator,
    C::Item: Sample,
    V: IntoIterator,
    V::Item: Sample,
    G: Fn(f64) -> f64,
{
    let mut out = GroupedData::new();
    group_data_into(categories, values, group, &mut out, &mut NoSink);
    out
}

/// Like [`group_data`], also appending the group of every input pair to
/// `assigned` (NaN for skipped pairs).
pub fn group_data_into<C, V, G, E>(categories: C, values: V, group: G, out: &mut GroupedData, assigned: &mut E)
where
    C: IntoIterator,
    C::Item: Sample,
    V: IntoIterator,
    V::Item: Sample,
    G: Fn(f64) -> f64,
    E: Extend<f64>,
{
    assigned.extend(categories.into_iter().zip(values).map(|(c, v)| {
        let (c, v) = (c.to_sample(), v.to_sample());
        if is_ok_float(c) && is_ok_float(v) {
            let g = group(c);
            out.entry(GroupKey(g)).or_default().push(v);
            g
        } else {
            f64::NAN
        }
    }));
}

/// Partition the `(category, value)` pairs themselves by group.
pub fn group_data_pairs<C, V, G>(categories: C, values: V, group: G) -> GroupedPairs
where
    C: IntoIterator,
    C::Item: Sample,
    V: IntoIterator,
    V::Item: Sample,
    G: Fn(f64) -> f64,
{
    let mut out = GroupedPairs::new();
    for (c, v) in categories.into_iter().zip(values) {
        let (c, v) = (c.to_sample(), v.to_sample());
        if is_ok_float(c) && is_ok_float(v) {
            let entry = out.entry(GroupKey(group(c))).or_default();
            entry.0.push(c);
            entry.1.push(v);
        }
    }
    out
}

/// Discards everything extended into it.
struct NoSink;

impl Extend<f64> for NoSink {
    fn extend<T: IntoIterator<Item = f64>>(&mut self, iter: T) {
        iter.into_iter().for_each(drop);
    }
}
