//! Encoded polyline codec for route geometries.
//!
//! Routes arrive from the routing service in the compact polyline format
//! (cumulative zig-zag deltas at 1e-5 degree precision, split into 5-bit
//! groups offset by 63). Decoding happens here, at the boundary; everything
//! downstream works on [`Polyline`] coordinates.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;
use crate::model::{Bounds, Coordinate};

const PRECISION: f64 = 1e5;
const CHAR_OFFSET: u8 = 63;
const CONTINUATION_BIT: u8 = 0x20;
const GROUP_MASK: u8 = 0x1f;
/// 32-bit zig-zag values never need more than seven 5-bit groups.
const MAX_GROUPS: u32 = 7;

/// A route geometry as decoded coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    /// Creates a new Polyline from decoded coordinate points.
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Returns a reference to the coordinate points.
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    /// Consumes the polyline and returns the owned coordinate points.
    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Enclosing rectangle; `None` for an empty polyline.
    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::enclosing(&self.points)
    }
}

/// Decodes an encoded polyline.
///
/// The empty string decodes to an empty polyline. Any malformed input fails
/// the whole decode; no partial geometry is returned.
pub fn decode(encoded: &str) -> Result<Polyline, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut offset = 0;
    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let mut points = Vec::new();

    while offset < bytes.len() {
        lat += next_value(bytes, &mut offset)?;
        lng += next_value(bytes, &mut offset)?;

        let latitude = lat as f64 / PRECISION;
        let longitude = lng as f64 / PRECISION;
        let point = Coordinate::try_new(latitude, longitude)
            .ok_or(DecodeError::OutOfRange(points.len()))?;
        points.push(point);
    }

    Ok(Polyline::new(points))
}

/// Encodes coordinates at 1e-5 degree precision.
pub fn encode(points: &[Coordinate]) -> String {
    let mut encoded = String::with_capacity(points.len() * 8);
    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for point in points {
        let lat = (point.latitude * PRECISION).round() as i64;
        let lng = (point.longitude * PRECISION).round() as i64;
        push_value(lat - prev_lat, &mut encoded);
        push_value(lng - prev_lng, &mut encoded);
        prev_lat = lat;
        prev_lng = lng;
    }

    encoded
}

fn next_value(bytes: &[u8], offset: &mut usize) -> Result<i64, DecodeError> {
    let start = *offset;
    let mut result: i64 = 0;
    let mut groups = 0;

    loop {
        let Some(&byte) = bytes.get(*offset) else {
            return Err(DecodeError::Truncated(*offset));
        };
        if !(CHAR_OFFSET..=CHAR_OFFSET + 63).contains(&byte) {
            return Err(DecodeError::InvalidCharacter {
                offset: *offset,
                byte,
            });
        }
        if groups == MAX_GROUPS {
            return Err(DecodeError::Overflow(start));
        }

        let chunk = byte - CHAR_OFFSET;
        result |= i64::from(chunk & GROUP_MASK) << (5 * groups);
        groups += 1;
        *offset += 1;

        if chunk & CONTINUATION_BIT == 0 {
            break;
        }
    }

    Ok(if result & 1 == 1 {
        !(result >> 1)
    } else {
        result >> 1
    })
}

fn push_value(value: i64, out: &mut String) {
    let mut zigzag = if value < 0 { !(value << 1) } else { value << 1 };
    while zigzag >= i64::from(CONTINUATION_BIT) {
        let group = ((zigzag as u8) & GROUP_MASK) | CONTINUATION_BIT;
        out.push(char::from(group + CHAR_OFFSET));
        zigzag >>= 5;
    }
    out.push(char::from(zigzag as u8 + CHAR_OFFSET));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const REFERENCE: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";

    fn reference_points() -> Vec<Coordinate> {
        vec![
            Coordinate::new(38.5, -120.2),
            Coordinate::new(40.7, -120.95),
            Coordinate::new(43.252, -126.453),
        ]
    }

    fn assert_close(actual: &[Coordinate], expected: &[Coordinate]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert_abs_diff_eq!(a.latitude, e.latitude, epsilon = 1e-5);
            assert_abs_diff_eq!(a.longitude, e.longitude, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_new_and_points() {
        let points = reference_points();
        let polyline = Polyline::new(points.clone());
        assert_eq!(polyline.points(), &points[..]);
        assert_eq!(polyline.into_points(), points);
    }

    #[test]
    fn test_decode_reference_polyline() {
        let polyline = decode(REFERENCE).unwrap();
        assert_close(polyline.points(), &reference_points());
    }

    #[test]
    fn test_encode_reference_polyline() {
        assert_eq!(encode(&reference_points()), REFERENCE);
    }

    #[test]
    fn test_decode_empty_is_empty() {
        let polyline = decode("").unwrap();
        assert!(polyline.is_empty());
        assert!(polyline.bounds().is_none());
    }

    #[test]
    fn test_decode_encoded_route_within_precision() {
        let route = vec![
            Coordinate::new(34.0522, -118.2437),
            Coordinate::new(34.04871, -118.25853),
            Coordinate::new(34.03712, -118.31204),
            Coordinate::new(34.02894, -118.40167),
            Coordinate::new(34.0195, -118.4912),
            Coordinate::new(-33.8688, 151.2093),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(89.99999, -179.99999),
        ];
        let decoded = decode(&encode(&route)).unwrap();
        assert_close(decoded.points(), &route);
    }

    #[test]
    fn test_decode_truncated_group_fails() {
        // '_' carries the continuation bit and nothing follows.
        assert_eq!(decode("_p~iF~ps|U_"), Err(DecodeError::Truncated(11)));
    }

    #[test]
    fn test_decode_missing_longitude_fails() {
        assert_eq!(decode("_p~iF"), Err(DecodeError::Truncated(5)));
    }

    #[test]
    fn test_decode_never_returns_partial_output() {
        let mut encoded = encode(&reference_points());
        encoded.push('_');
        assert!(decode(&encoded).is_err());
    }

    #[test]
    fn test_decode_invalid_character_fails() {
        assert_eq!(
            decode("_p~iF ps|U"),
            Err(DecodeError::InvalidCharacter {
                offset: 5,
                byte: b' '
            })
        );
        assert!(matches!(
            decode("_p~iF~ps|Ué"),
            Err(DecodeError::InvalidCharacter { offset: 10, .. })
        ));
    }

    #[test]
    fn test_decode_overflow_fails() {
        assert_eq!(decode("~~~~~~~~?"), Err(DecodeError::Overflow(0)));
    }

    #[test]
    fn test_decode_out_of_range_fails() {
        // 100 degrees north is representable in the encoding but not a coordinate.
        let encoded = encode(&[Coordinate::new(100.0, 0.0)]);
        assert_eq!(decode(&encoded), Err(DecodeError::OutOfRange(0)));
    }

    #[test]
    fn test_bounds_of_decoded() {
        let bounds = decode(REFERENCE).unwrap().bounds().unwrap();
        assert_abs_diff_eq!(bounds.min_lat, 38.5, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.max_lat, 43.252, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.min_lng, -126.453, epsilon = 1e-9);
        assert_abs_diff_eq!(bounds.max_lng, -120.2, epsilon = 1e-9);
    }

    #[test]
    fn test_partial_eq() {
        let p1 = Polyline::new(vec![Coordinate::new(1.0, 2.0)]);
        let p2 = Polyline::new(vec![Coordinate::new(1.0, 2.0)]);
        let p3 = Polyline::new(vec![Coordinate::new(1.0, 2.1)]);
        assert_eq!(p1, p2);
        assert_ne!(p1, p3);
    }
}
