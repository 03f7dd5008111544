// File: crates/chart-downsample/src/point.rs
// Summary: Point accessors: typed (HasXY), closure-based, and shape-dispatched for JSON records.

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::error::PointError;

/// Types that carry their own (x, y) coordinates.
pub trait HasXY {
    fn x(&self) -> f64;
    fn y(&self) -> f64;
}

impl HasXY for (f64, f64) {
    fn x(&self) -> f64 { self.0 }
    fn y(&self) -> f64 { self.1 }
}

impl HasXY for [f64; 2] {
    fn x(&self) -> f64 { self[0] }
    fn y(&self) -> f64 { self[1] }
}

impl<T: HasXY + ?Sized> HasXY for &T {
    fn x(&self) -> f64 { (**self).x() }
    fn y(&self) -> f64 { (**self).y() }
}

/// Extracts numeric coordinates from a point representation `P`.
///
/// Implementations must be pure: the downsampler may read the same point more
/// than once and relies on getting the same answer every time.
pub trait PointAccessor<P: ?Sized> {
    fn x(&self, point: &P) -> Result<f64, PointError>;
    fn y(&self, point: &P) -> Result<f64, PointError>;

    /// Both coordinates at once. Override when resolving the shape is not free.
    fn xy(&self, point: &P) -> Result<(f64, f64), PointError> {
        Ok((self.x(point)?, self.y(point)?))
    }
}

/// Accessor for any [`HasXY`] type. Never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct Xy;

impl<P: HasXY + ?Sized> PointAccessor<P> for Xy {
    fn x(&self, point: &P) -> Result<f64, PointError> { Ok(point.x()) }
    fn y(&self, point: &P) -> Result<f64, PointError> { Ok(point.y()) }
}

/// Caller-supplied pair of projection functions.
#[derive(Clone, Copy)]
pub struct FnAccessor<FX, FY> {
    fx: FX,
    fy: FY,
}

/// Build an accessor from two closures, e.g. `accessor_fn(|r: &Row| r.t, |r: &Row| r.v)`.
pub fn accessor_fn<P, FX, FY>(fx: FX, fy: FY) -> FnAccessor<FX, FY>
where
    P: ?Sized,
    FX: Fn(&P) -> f64,
    FY: Fn(&P) -> f64,
{
    FnAccessor { fx, fy }
}

impl<P, FX, FY> PointAccessor<P> for FnAccessor<FX, FY>
where
    P: ?Sized,
    FX: Fn(&P) -> f64,
    FY: Fn(&P) -> f64,
{
    fn x(&self, point: &P) -> Result<f64, PointError> { Ok((self.fx)(point)) }
    fn y(&self, point: &P) -> Result<f64, PointError> { Ok((self.fy)(point)) }
}

/// The point shapes recognized in untyped (JSON) data, in resolution order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RawPoint {
    /// `[x, y]`
    Pair(f64, f64),
    /// `{ "x": .., "y": .. }`
    Xy { x: f64, y: f64 },
    /// `{ "timestamp": .., "value" | "pressure": .. }`; timestamp in epoch ms.
    Timed { millis: f64, value: f64 },
}

impl HasXY for RawPoint {
    fn x(&self) -> f64 {
        match *self {
            RawPoint::Pair(x, _) | RawPoint::Xy { x, .. } => x,
            RawPoint::Timed { millis, .. } => millis,
        }
    }

    fn y(&self) -> f64 {
        match *self {
            RawPoint::Pair(_, y) | RawPoint::Xy { y, .. } => y,
            RawPoint::Timed { value, .. } => value,
        }
    }
}

impl TryFrom<&Value> for RawPoint {
    type Error = PointError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(items) if items.len() == 2 => {
                let x = items[0].as_f64().ok_or(PointError::NonNumeric { field: "[0]" })?;
                let y = items[1].as_f64().ok_or(PointError::NonNumeric { field: "[1]" })?;
                Ok(RawPoint::Pair(x, y))
            }
            Value::Object(map) if map.contains_key("x") && map.contains_key("y") => {
                Ok(RawPoint::Xy { x: number(map, "x")?, y: number(map, "y")? })
            }
            Value::Object(map) if map.contains_key("timestamp") => {
                let reading = if map.contains_key("value") {
                    number(map, "value")?
                } else if map.contains_key("pressure") {
                    number(map, "pressure")?
                } else {
                    return Err(unrecognized(value));
                };
                Ok(RawPoint::Timed { millis: timestamp_millis(&map["timestamp"])?, value: reading })
            }
            other => Err(unrecognized(other)),
        }
    }
}

fn number(map: &Map<String, Value>, field: &'static str) -> Result<f64, PointError> {
    map.get(field)
        .and_then(Value::as_f64)
        .ok_or(PointError::NonNumeric { field })
}

fn timestamp_millis(raw: &Value) -> Result<f64, PointError> {
    match raw {
        Value::Number(n) => n.as_f64().ok_or(PointError::NonNumeric { field: "timestamp" }),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.timestamp_millis() as f64)
            .map_err(|_| PointError::BadTimestamp { raw: s.clone() }),
        _ => Err(PointError::NonNumeric { field: "timestamp" }),
    }
}

fn unrecognized(value: &Value) -> PointError {
    let found = match value {
        Value::Object(map) => {
            let keys: Vec<&str> = map.keys().map(String::as_str).collect();
            format!("object with keys [{}]", keys.join(", "))
        }
        Value::Array(items) => format!("array of length {}", items.len()),
        Value::Null => "null".to_string(),
        Value::Bool(_) => "boolean".to_string(),
        Value::Number(_) => "bare number".to_string(),
        Value::String(_) => "string".to_string(),
    };
    PointError::UnrecognizedShape { found }
}

/// Structural accessor for `serde_json::Value` points; see [`RawPoint`] for the shapes.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeAccessor;

impl PointAccessor<Value> for ShapeAccessor {
    fn x(&self, point: &Value) -> Result<f64, PointError> {
        RawPoint::try_from(point).map(|p| p.x())
    }

    fn y(&self, point: &Value) -> Result<f64, PointError> {
        RawPoint::try_from(point).map(|p| p.y())
    }

    fn xy(&self, point: &Value) -> Result<(f64, f64), PointError> {
        RawPoint::try_from(point).map(|p| (p.x(), p.y()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pair_and_record_shapes() {
        assert_eq!(ShapeAccessor.xy(&json!([1.5, -2])), Ok((1.5, -2.0)));
        assert_eq!(ShapeAccessor.xy(&json!({ "x": 3, "y": 4.25 })), Ok((3.0, 4.25)));
    }

    #[test]
    fn xy_wins_over_timestamp_fallback() {
        let p = json!({ "x": 1, "y": 2, "timestamp": 99, "value": 7 });
        assert_eq!(RawPoint::try_from(&p), Ok(RawPoint::Xy { x: 1.0, y: 2.0 }));
    }

    #[test]
    fn timed_record_fallback() {
        let p = json!({ "timestamp": "1970-01-01T00:00:01Z", "pressure": 101.3 });
        assert_eq!(RawPoint::try_from(&p), Ok(RawPoint::Timed { millis: 1000.0, value: 101.3 }));
        let p = json!({ "timestamp": 2500, "value": 4 });
        assert_eq!(ShapeAccessor.xy(&p), Ok((2500.0, 4.0)));
    }

    #[test]
    fn value_preferred_over_pressure() {
        let p = json!({ "timestamp": 0, "value": 1, "pressure": 2 });
        assert_eq!(ShapeAccessor.y(&p), Ok(1.0));
    }

    #[test]
    fn unknown_shape_is_rejected() {
        let err = ShapeAccessor.x(&json!({ "foo": 1 })).unwrap_err();
        assert_eq!(err, PointError::UnrecognizedShape { found: "object with keys [foo]".into() });
        assert!(matches!(ShapeAccessor.x(&json!([1, 2, 3])), Err(PointError::UnrecognizedShape { .. })));
        assert!(matches!(ShapeAccessor.x(&json!(null)), Err(PointError::UnrecognizedShape { .. })));
        assert!(matches!(ShapeAccessor.x(&json!({ "timestamp": 1 })), Err(PointError::UnrecognizedShape { .. })));
    }

    #[test]
    fn non_numeric_fields_are_not_coerced() {
        assert_eq!(ShapeAccessor.y(&json!({ "x": 1, "y": "2" })), Err(PointError::NonNumeric { field: "y" }));
        assert_eq!(ShapeAccessor.x(&json!([null, 2])), Err(PointError::NonNumeric { field: "[0]" }));
        assert_eq!(
            ShapeAccessor.x(&json!({ "timestamp": "yesterday", "value": 1 })),
            Err(PointError::BadTimestamp { raw: "yesterday".into() })
        );
    }

    #[test]
    fn closure_accessor_projects_fields() {
        struct Row { t: u32, v: f32 }
        let acc = accessor_fn(|r: &Row| r.t as f64, |r: &Row| r.v as f64);
        assert_eq!(acc.xy(&Row { t: 7, v: 0.5 }), Ok((7.0, 0.5)));
    }

    #[test]
    fn typed_points_through_xy() {
        assert_eq!(Xy.xy(&(1.0_f64, 2.0_f64)), Ok((1.0, 2.0)));
        assert_eq!(Xy.xy(&[3.0_f64, 4.0]), Ok((3.0, 4.0)));
    }
}
