// File: crates/chart-downsample/src/threshold.rs
// Summary: Adaptive threshold selection from viewport width, with an injected width provider.

use crate::config::{pick, DownsampleConfig, DEFAULT_BREAKPOINTS};

/// Source of the current viewport width in pixels, consulted only when the
/// caller does not pass a width explicitly.
pub trait ViewportWidth {
    fn viewport_width(&self) -> u32;
}

/// A viewport that never changes size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedWidth(pub u32);

impl ViewportWidth for FixedWidth {
    fn viewport_width(&self) -> u32 { self.0 }
}

impl<F: Fn() -> u32> ViewportWidth for F {
    fn viewport_width(&self) -> u32 { self() }
}

/// Recommended threshold for a surface `width` pixels wide:
/// `< 640 -> 500`, `< 1024 -> 1000`, `< 1920 -> 1500`, otherwise `2000`.
pub fn threshold_for_width(width: u32) -> usize {
    pick(&DEFAULT_BREAKPOINTS, width)
}

/// [`threshold_for_width`] of `width`, or of `viewport`'s width when `None`.
pub fn optimal_threshold<V: ViewportWidth + ?Sized>(width: Option<u32>, viewport: &V) -> usize {
    threshold_for_width(width.unwrap_or_else(|| viewport.viewport_width()))
}

impl DownsampleConfig {
    /// Like [`optimal_threshold`] but with this config's breakpoints.
    pub fn optimal_threshold<V: ViewportWidth + ?Sized>(&self, width: Option<u32>, viewport: &V) -> usize {
        self.threshold_for_width(width.unwrap_or_else(|| viewport.viewport_width()))
    }
}
