//! Decoded alternatives and the currently highlighted one.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{EmptyResultError, IndexError};
use crate::model::{Bounds, Coordinate, RouteCandidate};
use crate::polyline::{self, Polyline};
use crate::traits::MapViewport;

/// One alternative, decoded. An empty polyline gives a route with no points
/// and no bounds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedRoute {
    /// Position of the candidate in the service response.
    pub rank: usize,
    pub distance_meters: u64,
    pub duration_seconds: u64,
    path: Polyline,
    bounds: Option<Bounds>,
}

impl DecodedRoute {
    /// Decodes a candidate; `None` if its polyline is malformed.
    pub fn from_candidate(rank: usize, candidate: &RouteCandidate) -> Option<Self> {
        let path = match polyline::decode(&candidate.encoded_polyline) {
            Ok(path) => path,
            Err(err) => {
                warn!(rank, error = %err, "dropping route candidate with undecodable polyline");
                return None;
            }
        };
        let bounds = path.bounds();

        Some(Self {
            rank,
            distance_meters: candidate.distance_meters,
            duration_seconds: candidate.duration_seconds,
            path,
            bounds,
        })
    }

    pub fn points(&self) -> &[Coordinate] {
        self.path.points()
    }

    /// `None` when the route has no points.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

/// Ordered alternatives plus the selected index. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSet {
    routes: Vec<DecodedRoute>,
    selected_index: usize,
}

impl RouteSet {
    /// Decodes every candidate independently, keeping service order. Candidates
    /// that fail to decode are dropped; if none survive the result is an error.
    pub fn from_candidates(candidates: &[RouteCandidate]) -> Result<Self, EmptyResultError> {
        let routes: Vec<DecodedRoute> = candidates
            .par_iter()
            .enumerate()
            .filter_map(|(rank, candidate)| DecodedRoute::from_candidate(rank, candidate))
            .collect();

        if routes.is_empty() {
            return Err(EmptyResultError {
                candidates: candidates.len(),
            });
        }

        debug!(
            candidates = candidates.len(),
            decoded = routes.len(),
            "built route set"
        );

        Ok(Self {
            routes,
            selected_index: 0,
        })
    }

    pub fn routes(&self) -> &[DecodedRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected(&self) -> &DecodedRoute {
        &self.routes[self.selected_index]
    }

    pub fn is_selected(&self, index: usize) -> bool {
        index == self.selected_index
    }

    /// Out-of-range indices are ignored and return `false`.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.routes.len() {
            debug!(index, len = self.routes.len(), "ignoring out-of-range selection");
            return false;
        }
        self.selected_index = index;
        true
    }

    /// Enclosing rectangle of route `index`; `Ok(None)` for a route with no
    /// points.
    pub fn bounds_of(&self, index: usize) -> Result<Option<Bounds>, IndexError> {
        self.routes
            .get(index)
            .map(DecodedRoute::bounds)
            .ok_or(IndexError {
                index,
                len: self.routes.len(),
            })
    }
}

/// Sole owner of the current [`RouteSet`].
#[derive(Debug, Default)]
pub struct RouteSelectionController {
    current: Option<RouteSet>,
}

impl RouteSelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes `candidates` and installs the result with the first alternative
    /// selected. On error the previous set is kept.
    pub fn load(&mut self, candidates: &[RouteCandidate]) -> Result<&RouteSet, EmptyResultError> {
        let set = RouteSet::from_candidates(candidates)?;
        Ok(self.replace(set))
    }

    /// Installs an already decoded set, discarding the previous one.
    pub fn replace(&mut self, set: RouteSet) -> &RouteSet {
        self.current.insert(set)
    }

    pub fn route_set(&self) -> Option<&RouteSet> {
        self.current.as_ref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.current.as_ref().map(RouteSet::selected_index)
    }

    pub fn selected(&self) -> Option<&DecodedRoute> {
        self.current.as_ref().map(RouteSet::selected)
    }

    /// Highlights alternative `index`. Anything out of range, including a
    /// selection with nothing loaded, is ignored.
    pub fn select(&mut self, index: usize) -> bool {
        self.current
            .as_mut()
            .is_some_and(|set| set.select(index))
    }

    pub fn bounds_of(&self, index: usize) -> Result<Option<Bounds>, IndexError> {
        match &self.current {
            Some(set) => set.bounds_of(index),
            None => Err(IndexError { index, len: 0 }),
        }
    }

    /// Fits `viewport` to alternative `index`. A route with no points leaves
    /// the viewport where it is.
    pub fn fit_viewport(
        &self,
        index: usize,
        viewport: &mut dyn MapViewport,
    ) -> Result<Option<Bounds>, IndexError> {
        let bounds = self.bounds_of(index)?;
        if let Some(bounds) = bounds {
            viewport.fit_bounds(bounds);
        }
        Ok(bounds)
    }
}
