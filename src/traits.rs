//! Seams between the pipeline and its collaborators.
//!
//! The pipeline only knows these traits; the Google Maps clients implement
//! the first two and a map widget implements the third.

use crate::error::ApiError;
use crate::model::{Bounds, Coordinate, RouteCandidate, TravelMode};

/// Resolves free text to a single best coordinate.
pub trait Geocoder {
    fn resolve(&self, query: &str) -> Result<Coordinate, ApiError>;
}

/// Computes ranked alternative routes between two coordinates.
///
/// An empty list is a valid answer.
pub trait RouteProvider {
    fn compute_alternatives(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<RouteCandidate>, ApiError>;
}

/// The part of a map widget the selection state drives.
pub trait MapViewport {
    fn fit_bounds(&mut self, bounds: Bounds);
}

impl<T: Geocoder + ?Sized> Geocoder for &T {
    fn resolve(&self, query: &str) -> Result<Coordinate, ApiError> {
        (**self).resolve(query)
    }
}

impl<T: RouteProvider + ?Sized> RouteProvider for &T {
    fn compute_alternatives(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<RouteCandidate>, ApiError> {
        (**self).compute_alternatives(origin, destination, mode)
    }
}
