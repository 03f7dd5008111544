// File: crates/chart-downsample/src/config.rs
// Summary: Viewport breakpoint configuration (serde-loadable) with validation.

use serde::{Deserialize, Serialize};

use crate::downsample::MIN_THRESHOLD;
use crate::error::ConfigError;

/// Viewports at least `min_width` pixels wide get `threshold` points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Breakpoint {
    pub min_width: u32,
    pub threshold: usize,
}

impl Breakpoint {
    pub const fn new(min_width: u32, threshold: usize) -> Self {
        Self { min_width, threshold }
    }
}

/// Default table: phone, tablet, laptop, wide desktop.
pub const DEFAULT_BREAKPOINTS: [Breakpoint; 4] = [
    Breakpoint::new(0, 500),
    Breakpoint::new(640, 1000),
    Breakpoint::new(1024, 1500),
    Breakpoint::new(1920, 2000),
];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DownsampleConfig {
    /// Ascending by `min_width`, first entry at width 0.
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self { breakpoints: DEFAULT_BREAKPOINTS.to_vec() }
    }
}

impl DownsampleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let first = self.breakpoints.first().ok_or(ConfigError::NoBreakpoints)?;
        if first.min_width != 0 { return Err(ConfigError::FirstNotZero(first.min_width)); }
        for pair in self.breakpoints.windows(2) {
            if pair[1].min_width <= pair[0].min_width {
                return Err(ConfigError::NotAscending { prev: pair[0].min_width, next: pair[1].min_width });
            }
        }
        match self.breakpoints.iter().find(|b| b.threshold < MIN_THRESHOLD) {
            Some(b) => Err(ConfigError::ThresholdTooSmall(b.threshold)),
            None => Ok(()),
        }
    }

    /// Threshold for a viewport `width` pixels wide under this table.
    pub fn threshold_for_width(&self, width: u32) -> usize {
        pick(&self.breakpoints, width)
    }
}

/// Last breakpoint whose `min_width <= width`; falls back to the default
/// narrowest threshold for an empty or unvalidated table.
pub(crate) fn pick(breakpoints: &[Breakpoint], width: u32) -> usize {
    breakpoints
        .iter()
        .rev()
        .find(|b| b.min_width <= width)
        .map_or(DEFAULT_BREAKPOINTS[0].threshold, |b| b.threshold)
}
