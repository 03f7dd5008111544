// File: crates/chart-downsample/src/geometry.rs
// Summary: Geometric primitives for point selection (doubled triangle area, centroid of a range).

/// Twice the unsigned area of triangle `abc`.
///
/// Only relative magnitudes matter to the caller, so the halving is skipped.
/// Collinear points yield exactly `0.0`.
#[inline]
pub fn triangle_area(a: (f64, f64), b: (f64, f64), c: (f64, f64)) -> f64 {
    (a.0 * (b.1 - c.1) + b.0 * (c.1 - a.1) + c.0 * (a.1 - b.1)).abs()
}

/// Running (x, y) mean; used for the lookahead bucket average.
#[derive(Clone, Copy, Debug, Default)]
pub struct Centroid {
    sum_x: f64,
    sum_y: f64,
    count: usize,
}

impl Centroid {
    pub fn push(&mut self, (x, y): (f64, f64)) {
        self.sum_x += x;
        self.sum_y += y;
        self.count += 1;
    }

    /// `None` when nothing was pushed.
    pub fn mean(&self) -> Option<(f64, f64)> {
        if self.count == 0 { return None; }
        let n = self.count as f64;
        Some((self.sum_x / n, self.sum_y / n))
    }
}
