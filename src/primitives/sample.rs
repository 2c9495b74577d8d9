//! Sample conversion and validity filtering.
//!
//! ## Purpose
//!
//! Every statistic in the crate consumes a sequence of "numeric-convertible"
//! values. This module defines the conversion to `f64` and the validity check
//! that decides which samples participate in an aggregate.
//!
//! ## Design notes
//!
//! * **Conversion**: `Sample` is implemented for all primitive numeric types and
//!   for references to them, so `&[f64]`, `&Vec<i32>`, `vec.iter()` and owned
//!   vectors can all be passed directly.
//! * **Failure**: A value that cannot be represented as `f64` converts to NaN and
//!   is therefore skipped like any other invalid sample.
//!
//! ## Invariants
//!
//! * A sample is valid iff it is neither NaN nor infinite.
//! * Invalid samples are silently excluded, never reported as errors.

// External dependencies
use num_traits::ToPrimitive;

// ============================================================================
// Sample Trait
// ============================================================================

/// A value that can be fed into the statistics functions.
pub trait Sample {
    /// Convert to `f64`. Unrepresentable values become NaN.
    fn to_sample(&self) -> f64;
}

macro_rules! impl_sample {
    ($($t:ty),* $(,)?) => {
        $(
            impl Sample for $t {
                #[inline]
                fn to_sample(&self) -> f64 {
                    ToPrimitive::to_f64(self).unwrap_or(f64::NAN)
                }
            }
        )*
    };
}

impl_sample!(
    f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize
);

impl<T: Sample + ?Sized> Sample for &T {
    #[inline]
    fn to_sample(&self) -> f64 {
        (**self).to_sample()
    }
}

impl<T: Sample + ?Sized> Sample for &mut T {
    #[inline]
    fn to_sample(&self) -> f64 {
        (**self).to_sample()
    }
}

// ============================================================================
// Validity
// ============================================================================

/// Returns `true` if `v` may take part in a statistic (not NaN, not infinite).
#[inline]
pub fn is_ok_float(v: f64) -> bool {
    v.is_finite()
}

/// Iterate over the valid samples of `data`, converted to `f64`.
#[inline]
pub fn valid<I>(data: I) -> impl Iterator<Item = f64>
where
    I: IntoIterator,
    I::Item: Sample,
{
    data.into_iter()
        .map(|v| v.to_sample())
        .filter(|&v| is_ok_float(v))
}

/// Iterate over the `(x, y)` pairs where both members are valid.
///
/// Iteration stops at the end of the shorter sequence.
#[inline]
pub fn valid_pairs<X, Y>(x: X, y: Y) -> impl Iterator<Item = (f64, f64)>
where
    X: IntoIterator,
    X::Item: Sample,
    Y: IntoIterator,
    Y::Item: Sample,
{
    x.into_iter()
        .zip(y)
        .map(|(a, b)| (a.to_sample(), b.to_sample()))
        .filter(|&(a, b)| is_ok_float(a) && is_ok_float(b))
}

/// Append every valid sample of `data` to `out`, returning how many were written.
pub fn filter_valid<I, E>(data: I, out: &mut E) -> usize
where
    I: IntoIterator,
    I::Item: Sample,
    E: Extend<f64>,
{
    let mut n = 0usize;
    out.extend(valid(data).inspect(|_| n += 1));
    n
}
