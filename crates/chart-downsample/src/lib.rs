// File: crates/chart-downsample/src/lib.rs
// Summary: Library entry point; exports the LTTB downsampling API for chart and record layers.

pub mod point;
pub mod geometry;
pub mod bucket;
pub mod downsample;
pub mod conditional;
pub mod threshold;
pub mod measurement;
pub mod config;
pub mod error;

pub use point::{accessor_fn, FnAccessor, HasXY, PointAccessor, RawPoint, ShapeAccessor, Xy};
pub use geometry::triangle_area;
pub use bucket::{Bucket, BucketPlan, Lookahead};
pub use downsample::{downsample, downsample_indices, lttb, Threshold, MIN_THRESHOLD};
pub use conditional::{downsample_if_needed, Clock, Downsampled, Downsampler, DownsamplingStats, MonotonicClock};
pub use threshold::{optimal_threshold, threshold_for_width, FixedWidth, ViewportWidth};
pub use measurement::{downsample_measurements, to_samples, Measurement};
pub use config::{Breakpoint, DownsampleConfig, DEFAULT_BREAKPOINTS};
pub use error::{ConfigError, DownsampleError, PointError};
