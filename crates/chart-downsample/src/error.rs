// File: crates/chart-downsample/src/error.rs
// Summary: Error taxonomy for point resolution, downsampling and breakpoint configuration.

use thiserror::Error;

/// A single point could not be read as an (x, y) sample.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PointError {
    /// The point matches none of the recognized shapes.
    #[error("unrecognized point shape: {found}")]
    UnrecognizedShape { found: String },
    /// A recognized field is present but does not hold a number.
    #[error("field `{field}` is not numeric")]
    NonNumeric { field: &'static str },
    #[error("timestamp `{raw}` is not RFC 3339 or epoch milliseconds")]
    BadTimestamp { raw: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DownsampleError {
    /// Fatal to the call; raised before any output is produced.
    #[error("malformed point at index {index}")]
    MalformedPoint {
        index: usize,
        #[source]
        source: PointError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("at least one breakpoint is required")]
    NoBreakpoints,
    #[error("first breakpoint must start at width 0, got {0}")]
    FirstNotZero(u32),
    #[error("breakpoint widths must be strictly ascending ({prev} then {next})")]
    NotAscending { prev: u32, next: u32 },
    #[error("breakpoint threshold {0} is below the minimum of 3")]
    ThresholdTooSmall(usize),
}

pub type Result<T, E = DownsampleError> = std::result::Result<T, E>;
