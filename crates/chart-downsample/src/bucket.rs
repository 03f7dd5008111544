// File: crates/chart-downsample/src/bucket.rs
// Summary: Bucket partitioning for LTTB: index ranges over the interior points plus lookahead ranges.

use std::ops::Range;

/// Where the "next bucket" reference point comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookahead {
    /// Arithmetic mean of the points in this index range.
    Mean(Range<usize>),
    /// The lookahead range ran off the end; use the final input point as is.
    LastPoint,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    pub index: usize,
    /// Candidate indices, half-open, never containing `0` or `n - 1`.
    pub range: Range<usize>,
    pub lookahead: Lookahead,
}

/// Partition of `n` points into `threshold - 2` interior buckets.
///
/// Bucket edges come from a fractional width `(n - 2) / (threshold - 2)`, so
/// integer bucket sizes differ by at most one. The last bucket always ends at
/// `n - 1`.
#[derive(Clone, Copy, Debug)]
pub struct BucketPlan {
    n: usize,
    threshold: usize,
    width: f64,
}

impl BucketPlan {
    /// `None` unless `n > threshold >= 3` (otherwise there is nothing to partition).
    pub fn new(n: usize, threshold: usize) -> Option<Self> {
        if threshold < 3 || n <= threshold { return None; }
        let width = (n - 2) as f64 / (threshold - 2) as f64;
        Some(Self { n, threshold, width })
    }

    /// Number of buckets, `threshold - 2`.
    pub fn len(&self) -> usize { self.threshold - 2 }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn width(&self) -> f64 { self.width }

    #[inline]
    fn edge(&self, k: usize) -> usize {
        (k as f64 * self.width).floor() as usize + 1
    }

    /// Bucket `i`, for `i < self.len()`.
    pub fn bucket(&self, i: usize) -> Bucket {
        let last = self.n - 1;
        let start = self.edge(i);
        let end = if i + 1 == self.len() { last } else { self.edge(i + 1).min(last) };

        let avg_start = self.edge(i + 1);
        let avg_end = self.edge(i + 2).min(self.n);
        let lookahead = if avg_end >= self.n {
            Lookahead::LastPoint
        } else {
            Lookahead::Mean(avg_start..avg_end)
        };

        Bucket { index: i, range: start..end, lookahead }
    }

    pub fn iter(&self) -> impl Iterator<Item = Bucket> + '_ {
        (0..self.len()).map(move |i| self.bucket(i))
    }
}
