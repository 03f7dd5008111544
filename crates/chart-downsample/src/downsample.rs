// File: crates/chart-downsample/src/downsample.rs
// Summary: Largest-Triangle-Three-Buckets core: threshold clamping and greedy per-bucket selection.

use tracing::warn;

use crate::bucket::{BucketPlan, Lookahead};
use crate::error::{DownsampleError, Result};
use crate::geometry::{triangle_area, Centroid};
use crate::point::{PointAccessor, Xy};

/// Smallest threshold LTTB can honour: first point, one bucket, last point.
pub const MIN_THRESHOLD: usize = 3;

/// A requested output length and the value actually used after clamping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Threshold {
    requested: usize,
    value: usize,
}

impl Threshold {
    pub const fn new(requested: usize) -> Self {
        let value = if requested < MIN_THRESHOLD { MIN_THRESHOLD } else { requested };
        Self { requested, value }
    }
    pub const fn get(&self) -> usize { self.value }
    pub const fn requested(&self) -> usize { self.requested }
    pub const fn was_clamped(&self) -> bool { self.value != self.requested }
}

/// Which input points survive a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Selection {
    /// Every input point, in order (no bucketing performed).
    All,
    /// Ascending input indices, first and last included.
    Indices(Vec<usize>),
}

#[derive(Clone, Debug)]
pub(crate) struct Outcome {
    pub selection: Selection,
    /// A threshold below the minimum was raised for this run.
    pub clamped: bool,
}

impl Outcome {
    pub fn collect<P: Clone>(self, data: &[P]) -> Vec<P> {
        match self.selection {
            Selection::All => data.to_vec(),
            Selection::Indices(idx) => idx.into_iter().map(|i| data[i].clone()).collect(),
        }
    }

    pub fn into_indices(self, n: usize) -> Vec<usize> {
        match self.selection {
            Selection::All => (0..n).collect(),
            Selection::Indices(idx) => idx,
        }
    }
}

pub(crate) fn run<P, A>(data: &[P], threshold: usize, accessor: &A) -> Result<Outcome>
where
    A: PointAccessor<P> + ?Sized,
{
    let n = data.len();
    let all = |clamped| Ok(Outcome { selection: Selection::All, clamped });
    if n == 0 { return all(false); }

    let xy = |i: usize| {
        accessor
            .xy(&data[i])
            .map_err(|source| DownsampleError::MalformedPoint { index: i, source })
    };
    // Resolve every point up front so a bad one fails the call before any output exists.
    for i in 0..n {
        xy(i)?;
    }

    let threshold = Threshold::new(threshold);
    if n <= threshold.requested() { return all(false); }
    let clamped = threshold.was_clamped();
    if clamped {
        warn!(
            requested = threshold.requested(),
            applied = threshold.get(),
            "downsample threshold below minimum; clamped"
        );
    }

    let Some(plan) = BucketPlan::new(n, threshold.get()) else { return all(clamped) };

    let last = xy(n - 1)?;
    let mut picked = Vec::with_capacity(threshold.get());
    picked.push(0);
    let mut a = xy(0)?;

    for bucket in plan.iter() {
        let c = match bucket.lookahead {
            Lookahead::LastPoint => last,
            Lookahead::Mean(range) => {
                let mut centroid = Centroid::default();
                for k in range {
                    centroid.push(xy(k)?);
                }
                centroid.mean().unwrap_or(last)
            }
        };

        // Strict `>`: the first index reaching the maximum wins.
        let mut max_area = -1.0f64;
        let mut max_idx = bucket.range.start;
        for j in bucket.range.clone() {
            let area = triangle_area(a, xy(j)?, c);
            if area > max_area {
                max_area = area;
                max_idx = j;
            }
        }

        picked.push(max_idx);
        a = xy(max_idx)?;
    }

    picked.push(n - 1);
    Ok(Outcome { selection: Selection::Indices(picked), clamped })
}

/// Largest-Triangle-Three-Buckets downsampling of an ordered point sequence.
///
/// Returns exactly `min(data.len(), threshold)` points (threshold clamped to at
/// least [`MIN_THRESHOLD`]), always keeping the first and last point and never
/// reordering. Fails with [`DownsampleError::MalformedPoint`] if the accessor
/// rejects any point.
pub fn downsample<P, A>(data: &[P], threshold: usize, accessor: &A) -> Result<Vec<P>>
where
    P: Clone,
    A: PointAccessor<P> + ?Sized,
{
    Ok(run(data, threshold, accessor)?.collect(data))
}

/// Same selection as [`downsample`], returned as ascending indices into `data`.
pub fn downsample_indices<P, A>(data: &[P], threshold: usize, accessor: &A) -> Result<Vec<usize>>
where
    A: PointAccessor<P> + ?Sized,
{
    Ok(run(data, threshold, accessor)?.into_indices(data.len()))
}

/// LTTB for plain XY tuples. Never fails.
pub fn lttb(points: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    downsample(points, threshold, &Xy).unwrap_or_else(|_| points.to_vec())
}
