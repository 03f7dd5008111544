// File: crates/chart-downsample/src/measurement.rs
// Summary: Adapter between timestamped pressure records and `(epoch_ms, pressure)` sample tuples.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::conditional::{Clock, Downsampled, Downsampler};
use crate::error::Result;
use crate::point::{HasXY, Xy};

/// One timestamped pressure reading as delivered by the record layer.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Measurement {
    pub timestamp: DateTime<Utc>,
    pub pressure: f64,
}

impl Measurement {
    pub fn new(timestamp: DateTime<Utc>, pressure: f64) -> Self {
        Self { timestamp, pressure }
    }

    /// `(epoch milliseconds, pressure)`.
    pub fn to_sample(&self) -> (f64, f64) {
        (self.timestamp.timestamp_millis() as f64, self.pressure)
    }

    /// Rebuild a record from a downsampled tuple; `None` if `ms` is not a representable instant.
    pub fn from_sample((ms, pressure): (f64, f64)) -> Option<Self> {
        if !ms.is_finite() { return None; }
        DateTime::<Utc>::from_timestamp_millis(ms as i64).map(|timestamp| Self { timestamp, pressure })
    }
}

impl HasXY for Measurement {
    fn x(&self) -> f64 { self.timestamp.timestamp_millis() as f64 }
    fn y(&self) -> f64 { self.pressure }
}

pub fn to_samples(records: &[Measurement]) -> Vec<(f64, f64)> {
    records.iter().map(Measurement::to_sample).collect()
}

impl<C: Clock> Downsampler<C> {
    /// Converts `records` to `(ms, pressure)` tuples and runs the generic path on them.
    pub fn downsample_measurements(&self, records: &[Measurement], threshold: usize) -> Result<Downsampled<(f64, f64)>> {
        self.downsample_if_needed(&to_samples(records), threshold, &Xy)
    }
}

/// [`Downsampler::downsample_measurements`] with the wall clock.
pub fn downsample_measurements(records: &[Measurement], threshold: usize) -> Result<Downsampled<(f64, f64)>> {
    Downsampler::new().downsample_measurements(records, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conditional::downsample_if_needed;
    use chrono::{Duration, TimeZone};

    fn readings(n: usize) -> Vec<Measurement> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        (0..n)
            .map(|i| {
                let p = 1013.25 + (i as f64 * 0.13).sin() * 4.0 + (i % 11) as f64 * 0.1;
                Measurement::new(start + Duration::seconds(i as i64 * 30), p)
            })
            .collect()
    }

    #[test]
    fn sample_projection() {
        let m = Measurement::new(Utc.timestamp_millis_opt(1_700_000_000_123).unwrap(), 98.6);
        assert_eq!(m.to_sample(), (1_700_000_000_123.0, 98.6));
        assert_eq!(Measurement::from_sample(m.to_sample()), Some(m));
        assert_eq!(Measurement::from_sample((f64::NAN, 1.0)), None);
    }

    #[test]
    fn same_selection_as_generic_path() {
        let records = readings(2_000);
        let adapted = downsample_measurements(&records, 150).unwrap();
        let direct = downsample_if_needed(&to_samples(&records), 150, &Xy).unwrap();
        assert_eq!(adapted.data, direct.data);
        assert_eq!(adapted.stats.downsampled_count, 150);

        // Typed records straight through the generic path pick the same instants.
        let typed = downsample_if_needed(&records, 150, &Xy).unwrap();
        assert_eq!(to_samples(&typed.data), adapted.data);
    }

    #[test]
    fn small_series_passes_through() {
        let records = readings(12);
        let out = downsample_measurements(&records, 500).unwrap();
        assert!(!out.stats.was_downsampled);
        assert_eq!(out.data, to_samples(&records));
    }

    #[test]
    fn deserializes_rfc3339_records() {
        let m: Measurement =
            serde_json::from_str(r#"{ "timestamp": "2024-03-01T08:00:30Z", "pressure": 1012.5 }"#).unwrap();
        assert_eq!(m.timestamp, Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 30).unwrap());
        assert_eq!(m.pressure, 1012.5);
    }
}
