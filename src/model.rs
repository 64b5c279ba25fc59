//! Plain data types shared by the clients, the codec and the selection state.

use serde::{Deserialize, Deserializer, Serialize};

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Builds a coordinate, rejecting values outside the valid lat/lng ranges
    /// (and NaN).
    pub fn try_new(latitude: f64, longitude: f64) -> Option<Self> {
        let coordinate = Self::new(latitude, longitude);
        coordinate.is_valid().then_some(coordinate)
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Axis-aligned rectangle in latitude/longitude.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Smallest rectangle enclosing all `points`, or `None` when there are none.
    pub fn enclosing<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let seed = Self {
            min_lat: first.latitude,
            max_lat: first.latitude,
            min_lng: first.longitude,
            max_lng: first.longitude,
        };

        Some(points.fold(seed, |bounds, point| Self {
            min_lat: bounds.min_lat.min(point.latitude),
            max_lat: bounds.max_lat.max(point.latitude),
            min_lng: bounds.min_lng.min(point.longitude),
            max_lng: bounds.max_lng.max(point.longitude),
        }))
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_lat..=self.max_lat).contains(&point.latitude)
            && (self.min_lng..=self.max_lng).contains(&point.longitude)
    }
}

/// Mode of transport a route is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    #[default]
    Bicycle,
    Drive,
    Walk,
    TwoWheeler,
}

/// One alternative as returned by the routing service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteCandidate {
    #[serde(rename = "distanceMeters", default)]
    pub distance_meters: u64,
    #[serde(
        rename = "duration",
        default,
        deserialize_with = "deserialize_duration_seconds"
    )]
    pub duration_seconds: u64,
    #[serde(
        rename = "polyline",
        default,
        deserialize_with = "deserialize_encoded_polyline"
    )]
    pub encoded_polyline: String,
}

impl RouteCandidate {
    pub fn new(distance_meters: u64, duration_seconds: u64, encoded_polyline: impl Into<String>) -> Self {
        Self {
            distance_meters,
            duration_seconds,
            encoded_polyline: encoded_polyline.into(),
        }
    }
}

/// Parses a protobuf JSON duration such as `"1234s"` or `"12.5s"`.
pub fn parse_duration_seconds(value: &str) -> Option<u64> {
    let seconds: f64 = value.trim().strip_suffix('s')?.parse().ok()?;
    (seconds.is_finite() && seconds >= 0.0).then(|| seconds.round() as u64)
}

fn deserialize_duration_seconds<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_duration_seconds(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid duration {raw:?}")))
}

fn deserialize_encoded_polyline<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wire {
        #[serde(rename = "encodedPolyline", default)]
        encoded_polyline: String,
    }

    Ok(Wire::deserialize(deserializer)?.encoded_polyline)
}
