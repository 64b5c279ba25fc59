//! One user-triggered search: two texts in, a [`RouteSet`] or a user-facing
//! failure out.
//!
//! Stages run strictly in order (origin is geocoded before destination) and
//! the first failure ends the run. Every run takes a generation ticket; a
//! newer run, or [`PipelineOrchestrator::cancel`], supersedes older ones.
//! Superseded runs stop at their next checkpoint and never write the route
//! set, so the newest run is the only one that can replace it.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::GoogleMapsConfig;
use crate::error::{ApiError, IndexError};
use crate::geocoding::PlacesClient;
use crate::model::{Bounds, TravelMode};
use crate::routing::RoutesClient;
use crate::selection::{RouteSelectionController, RouteSet};
use crate::traits::{Geocoder, MapViewport, RouteProvider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Origin,
    Destination,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Origin => f.write_str("start"),
            Endpoint::Destination => f.write_str("end"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidatingInput,
    GeocodingOrigin,
    GeocodingDestination,
    FetchingRoutes,
    DecodingRoutes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Stage::ValidatingInput => "input validation",
            Stage::GeocodingOrigin => "place search for the start location",
            Stage::GeocodingDestination => "place search for the end location",
            Stage::FetchingRoutes => "route search",
            Stage::DecodingRoutes => "route decoding",
        };
        f.write_str(text)
    }
}

/// Terminal failures of a run. The `Display` text is meant for end users and
/// never contains service error details.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserFacingError {
    #[error("Please enter both start and end locations.")]
    EmptyInput(Endpoint),
    #[error("Unable to find {endpoint} location: \"{query}\". Try a more specific place name.")]
    NotFound { endpoint: Endpoint, query: String },
    #[error("No bike routes found between these locations. Try different locations.")]
    NoRoutes,
    #[error("The {0} is unavailable right now. Please try again.")]
    ServiceUnavailable(Stage),
    #[error("Route search is not configured.")]
    NotConfigured,
    #[error("This search was replaced by a newer one.")]
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Running(Stage),
    Done,
    Failed {
        stage: Stage,
        error: UserFacingError,
    },
}

pub struct PipelineOrchestrator<G, R> {
    geocoder: G,
    router: R,
    mode: TravelMode,
    controller: Mutex<RouteSelectionController>,
    generation: AtomicU64,
    state: Mutex<PipelineState>,
}

impl PipelineOrchestrator<PlacesClient, RoutesClient> {
    /// Builds both Google Maps clients. The returned orchestrator is ready to
    /// run; there is no separate loading step.
    pub fn from_config(config: GoogleMapsConfig) -> Result<Self, reqwest::Error> {
        let geocoder = PlacesClient::new(config.clone())?;
        let router = RoutesClient::new(config)?;
        Ok(Self::new(geocoder, router))
    }
}

impl<G, R> PipelineOrchestrator<G, R>
where
    G: Geocoder,
    R: RouteProvider,
{
    pub fn new(geocoder: G, router: R) -> Self {
        Self {
            geocoder,
            router,
            mode: TravelMode::Bicycle,
            controller: Mutex::new(RouteSelectionController::new()),
            generation: AtomicU64::new(0),
            state: Mutex::new(PipelineState::Idle),
        }
    }

    pub fn with_mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    /// Runs the whole search. On success the new set is installed and a copy
    /// returned; on failure the previously installed set is left as it was.
    pub fn run(&self, start_text: &str, end_text: &str) -> Result<RouteSet, UserFacingError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut stage = Stage::ValidatingInput;

        let outcome = self.execute(ticket, start_text, end_text, &mut stage);
        let terminal = match &outcome {
            Ok(set) => {
                info!(ticket, routes = set.len(), "route search done");
                Some(PipelineState::Done)
            }
            Err(UserFacingError::Superseded) => None,
            Err(error) => {
                info!(ticket, %stage, %error, "route search failed");
                Some(PipelineState::Failed {
                    stage,
                    error: error.clone(),
                })
            }
        };
        if let Some(terminal) = terminal {
            let mut state = lock(&self.state);
            if self.generation.load(Ordering::SeqCst) == ticket {
                *state = terminal;
            }
        }

        outcome
    }

    /// Supersedes every run currently in flight and resets the state to idle.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        *lock(&self.state) = PipelineState::Idle;
    }

    /// State of the newest run. Runs that have been superseded never change it.
    pub fn state(&self) -> PipelineState {
        lock(&self.state).clone()
    }

    pub fn route_set(&self) -> Option<RouteSet> {
        lock(&self.controller).route_set().cloned()
    }

    pub fn selected_index(&self) -> Option<usize> {
        lock(&self.controller).selected_index()
    }

    pub fn select(&self, index: usize) -> bool {
        lock(&self.controller).select(index)
    }

    pub fn bounds_of(&self, index: usize) -> Result<Option<Bounds>, IndexError> {
        lock(&self.controller).bounds_of(index)
    }

    pub fn fit_viewport(
        &self,
        index: usize,
        viewport: &mut dyn MapViewport,
    ) -> Result<Option<Bounds>, IndexError> {
        lock(&self.controller).fit_viewport(index, viewport)
    }

    fn execute(
        &self,
        ticket: u64,
        start_text: &str,
        end_text: &str,
        stage: &mut Stage,
    ) -> Result<RouteSet, UserFacingError> {
        self.enter(ticket, stage, Stage::ValidatingInput);
        let start_text = start_text.trim();
        let end_text = end_text.trim();
        if start_text.is_empty() {
            return Err(UserFacingError::EmptyInput(Endpoint::Origin));
        }
        if end_text.is_empty() {
            return Err(UserFacingError::EmptyInput(Endpoint::Destination));
        }

        self.enter(ticket, stage, Stage::GeocodingOrigin);
        let origin = self
            .geocoder
            .resolve(start_text)
            .map_err(|err| translate(err, *stage, start_text))?;
        self.ensure_current(ticket)?;

        self.enter(ticket, stage, Stage::GeocodingDestination);
        let destination = self
            .geocoder
            .resolve(end_text)
            .map_err(|err| translate(err, *stage, end_text))?;
        self.ensure_current(ticket)?;

        self.enter(ticket, stage, Stage::FetchingRoutes);
        let candidates = self
            .router
            .compute_alternatives(origin, destination, self.mode)
            .map_err(|err| translate(err, *stage, ""))?;
        self.ensure_current(ticket)?;

        self.enter(ticket, stage, Stage::DecodingRoutes);
        let set = RouteSet::from_candidates(&candidates).map_err(|err| {
            warn!(ticket, error = %err, "no usable routes");
            UserFacingError::NoRoutes
        })?;

        let mut controller = lock(&self.controller);
        self.ensure_current(ticket)?;
        Ok(controller.replace(set).clone())
    }

    fn enter(&self, ticket: u64, stage: &mut Stage, next: Stage) {
        debug!(ticket, from = ?*stage, to = ?next, "pipeline transition");
        *stage = next;

        let mut state = lock(&self.state);
        if self.generation.load(Ordering::SeqCst) == ticket {
            *state = PipelineState::Running(next);
        }
    }

    fn ensure_current(&self, ticket: u64) -> Result<(), UserFacingError> {
        let latest = self.generation.load(Ordering::SeqCst);
        if latest == ticket {
            Ok(())
        } else {
            debug!(ticket, latest, "run superseded");
            Err(UserFacingError::Superseded)
        }
    }
}

fn translate(err: ApiError, stage: Stage, query: &str) -> UserFacingError {
    warn!(%stage, error = %err, "pipeline stage failed");

    let endpoint = match stage {
        Stage::GeocodingDestination => Endpoint::Destination,
        _ => Endpoint::Origin,
    };

    match err {
        ApiError::Configuration => UserFacingError::NotConfigured,
        ApiError::Validation => UserFacingError::EmptyInput(endpoint),
        ApiError::NotFound(_) => UserFacingError::NotFound {
            endpoint,
            query: query.to_string(),
        },
        ApiError::Service { .. } | ApiError::Network(_) | ApiError::MalformedResponse(_) => {
            UserFacingError::ServiceUnavailable(stage)
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
