// File: crates/chart-downsample/src/conditional.rs
// Summary: Conditional downsampling (skip when already small enough) with timing and statistics.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::downsample::{run, Outcome};
use crate::error::Result;
use crate::point::PointAccessor;

/// Monotonic time source. `now` is measured from an arbitrary, fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self { Self { origin: Instant::now() } }
}

impl Default for MonotonicClock {
    fn default() -> Self { Self::new() }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration { self.origin.elapsed() }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration { (**self).now() }
}

/// Report for one conditional downsampling call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DownsamplingStats {
    pub original_count: usize,
    pub downsampled_count: usize,
    /// `(original - downsampled) / original * 100`; `0.0` for empty input.
    pub reduction_percent: f64,
    pub was_downsampled: bool,
    /// A threshold below 3 was raised to 3 for this call.
    pub threshold_clamped: bool,
    pub execution_time: Duration,
}

impl DownsamplingStats {
    fn new(original_count: usize, downsampled_count: usize, threshold_clamped: bool, execution_time: Duration) -> Self {
        let reduction_percent = if original_count == 0 {
            0.0
        } else {
            (original_count - downsampled_count) as f64 / original_count as f64 * 100.0
        };
        Self {
            original_count,
            downsampled_count,
            reduction_percent,
            was_downsampled: downsampled_count < original_count,
            threshold_clamped,
            execution_time,
        }
    }

    pub fn execution_time_ms(&self) -> f64 { self.execution_time.as_secs_f64() * 1000.0 }
}

/// Output of a conditional run: the (possibly untouched) points and their report.
#[derive(Clone, Debug, PartialEq)]
pub struct Downsampled<P> {
    pub data: Vec<P>,
    pub stats: DownsamplingStats,
}

/// Runs LTTB only when the input exceeds the threshold, timing the work with `C`.
#[derive(Clone, Debug, Default)]
pub struct Downsampler<C = MonotonicClock> {
    clock: C,
}

impl Downsampler<MonotonicClock> {
    pub fn new() -> Self { Self { clock: MonotonicClock::new() } }
}

impl<C: Clock> Downsampler<C> {
    pub fn with_clock(clock: C) -> Self { Self { clock } }

    pub fn clock(&self) -> &C { &self.clock }

    /// Fast path: when `data.len() <= threshold` the input comes back unchanged
    /// with `was_downsampled == false` and zero execution time. Points are still
    /// resolved through `accessor`, so malformed input fails on both paths.
    pub fn downsample_if_needed<P, A>(&self, data: &[P], threshold: usize, accessor: &A) -> Result<Downsampled<P>>
    where
        P: Clone,
        A: PointAccessor<P> + ?Sized,
    {
        let n = data.len();
        let (outcome, elapsed) = if n <= threshold {
            (run(data, threshold, accessor)?, Duration::ZERO)
        } else {
            let started = self.clock.now();
            let outcome = run(data, threshold, accessor)?;
            (outcome, self.clock.now().saturating_sub(started))
        };
        let clamped = outcome.clamped;
        let data = Outcome::collect(outcome, data);
        let stats = DownsamplingStats::new(n, data.len(), clamped, elapsed);
        debug!(
            original = stats.original_count,
            downsampled = stats.downsampled_count,
            reduction_percent = stats.reduction_percent,
            elapsed_ms = stats.execution_time_ms(),
            "downsample finished"
        );
        Ok(Downsampled { data, stats })
    }
}

/// [`Downsampler::downsample_if_needed`] with the wall clock.
pub fn downsample_if_needed<P, A>(data: &[P], threshold: usize, accessor: &A) -> Result<Downsampled<P>>
where
    P: Clone,
    A: PointAccessor<P> + ?Sized,
{
    Downsampler::new().downsample_if_needed(data, threshold, accessor)
}
