//! bike-routes core
//!
//! Turns two free-text locations into ranked alternative bicycle routes:
//! place search, route computation, polyline decoding and the selected
//! alternative used for rendering.

pub mod config;
pub mod error;
pub mod geocoding;
pub mod model;
pub mod pipeline;
pub mod polyline;
pub mod routing;
pub mod selection;
pub mod traits;
pub mod transport;

pub use config::GoogleMapsConfig;
pub use error::{ApiError, DecodeError, EmptyResultError, IndexError, TransportError};
pub use model::{Bounds, Coordinate, RouteCandidate, TravelMode};
pub use pipeline::{PipelineOrchestrator, PipelineState, UserFacingError};
pub use selection::{DecodedRoute, RouteSelectionController, RouteSet};
