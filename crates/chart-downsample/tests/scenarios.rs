// File: crates/chart-downsample/tests/scenarios.rs
// Purpose: Concrete end-to-end scenarios through the public API (typed, JSON and measurement inputs).

use chart_downsample::{
    downsample, downsample_if_needed, downsample_measurements, optimal_threshold, DownsampleError,
    FixedWidth, Measurement, PointError, ShapeAccessor, Xy,
};
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Value};

fn sine(n: usize) -> Vec<(f64, f64)> {
    (0..n).map(|i| (i as f64, (i as f64 * 0.01).sin())).collect()
}

#[test]
fn equal_area_peaks_pick_the_first() {
    let data = vec![[0.0, 0.0], [1.0, 10.0], [2.0, 0.0], [3.0, 10.0], [4.0, 0.0]];
    let out = downsample(&data, 3, &Xy).unwrap();
    assert_eq!(out, vec![[0.0, 0.0], [1.0, 10.0], [4.0, 0.0]]);
}

#[test]
fn sine_wave_reduced_to_one_hundred() {
    let out = downsample_if_needed(&sine(10_000), 100, &Xy).unwrap();
    assert!(out.stats.was_downsampled);
    assert_eq!(out.stats.original_count, 10_000);
    assert_eq!(out.stats.downsampled_count, 100);
    assert_eq!(out.data.len(), 100);
    assert!((out.stats.reduction_percent - 99.0).abs() < 1e-9);
    assert!(!out.stats.threshold_clamped);
}

#[test]
fn short_series_untouched() {
    let data = sine(50);
    let out = downsample_if_needed(&data, 1000, &Xy).unwrap();
    assert!(!out.stats.was_downsampled);
    assert_eq!(out.data, data);
    assert_eq!(out.stats.reduction_percent, 0.0);
}

#[test]
fn malformed_point_fails_whole_call() {
    let mut data: Vec<Value> = (0..200).map(|i| json!([i, (i % 13) * 2])).collect();
    data[117] = json!({ "foo": 1 });

    let err = downsample(&data, 20, &ShapeAccessor).unwrap_err();
    assert_eq!(
        err,
        DownsampleError::MalformedPoint {
            index: 117,
            source: PointError::UnrecognizedShape { found: "object with keys [foo]".into() },
        }
    );
    assert!(downsample_if_needed(&data, 20, &ShapeAccessor).is_err());
    assert!(downsample_if_needed(&data, 5000, &ShapeAccessor).is_err());
}

#[test]
fn mixed_json_shapes_resolve_structurally() {
    let data = vec![
        json!([0, 1]),
        json!({ "x": 1, "y": 9 }),
        json!({ "timestamp": 2, "value": 3 }),
        json!({ "timestamp": 3, "pressure": 8 }),
        json!([4, 2]),
        json!({ "x": 5, "y": 0 }),
    ];
    let out = downsample(&data, 4, &ShapeAccessor).unwrap();
    assert_eq!(out.len(), 4);
    assert_eq!(out[0], data[0]);
    assert_eq!(out[3], data[5]);
}

#[test]
fn viewport_driven_measurement_pipeline() {
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let records: Vec<Measurement> = (0..5_000)
        .map(|i| Measurement::new(start + Duration::minutes(i), 30.0 + (i as f64 * 0.02).cos()))
        .collect();

    let threshold = optimal_threshold(None, &FixedWidth(800));
    assert_eq!(threshold, 1000);

    let out = downsample_measurements(&records, threshold).unwrap();
    assert_eq!(out.data.len(), 1000);
    assert_eq!(out.data[0], records[0].to_sample());
    assert_eq!(out.data[999], records[4_999].to_sample());

    let rebuilt: Vec<Measurement> = out.data.iter().filter_map(|&s| Measurement::from_sample(s)).collect();
    assert_eq!(rebuilt.len(), 1000);
    assert!(rebuilt.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
}

#[test]
fn independent_calls_run_in_parallel() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<chart_downsample::Downsampler>();
    assert_send_sync::<chart_downsample::Downsampled<(f64, f64)>>();
    assert_send_sync::<DownsampleError>();

    let data = sine(20_000);
    let expected: Vec<Vec<(f64, f64)>> = [50, 500, 1500].iter().map(|&t| chart_downsample::lttb(&data, t)).collect();
    let data = &data;
    std::thread::scope(|s| {
        let handles: Vec<_> = [50, 500, 1500]
            .iter()
            .map(|&t| s.spawn(move || downsample_if_needed(data, t, &Xy).unwrap().data))
            .collect();
        for (h, want) in handles.into_iter().zip(&expected) {
            assert_eq!(&h.join().unwrap(), want);
        }
    });
}
