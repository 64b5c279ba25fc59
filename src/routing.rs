//! Routes API (computeRoutes) adapter: alternative routes between two points.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::GoogleMapsConfig;
use crate::error::ApiError;
use crate::model::{Coordinate, RouteCandidate, TravelMode};
use crate::traits::RouteProvider;
use crate::transport::{HttpTransport, JsonRequest, ReqwestTransport};

pub const ROUTES_FIELD_MASK: &str =
    "routes.distanceMeters,routes.duration,routes.polyline.encodedPolyline";

#[derive(Debug, Clone)]
pub struct RoutesClient<T = ReqwestTransport> {
    config: GoogleMapsConfig,
    transport: T,
}

impl RoutesClient<ReqwestTransport> {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::new(config.timeout_secs)?;
        Ok(Self { config, transport })
    }
}

impl<T: HttpTransport> RoutesClient<T> {
    pub fn with_transport(config: GoogleMapsConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Requests every alternative the service is willing to return, in its
    /// ranking order.
    pub fn compute_alternatives(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<RouteCandidate>, ApiError> {
        let api_key = self.config.api_key().ok_or(ApiError::Configuration)?;

        let body = json!({
            "origin": waypoint(origin),
            "destination": waypoint(destination),
            "travelMode": mode,
            "computeAlternativeRoutes": true,
            "polylineQuality": "HIGH_QUALITY",
            "polylineEncoding": "ENCODED_POLYLINE",
        });

        debug!(?origin, ?destination, ?mode, "computing routes");
        let response = self.transport.post_json(&JsonRequest {
            url: &self.config.routes_url,
            api_key,
            field_mask: ROUTES_FIELD_MASK,
            body,
        })?;

        if !response.is_success() {
            return Err(ApiError::Service {
                status: response.status,
                body: response.body,
            });
        }

        let body: ComputeRoutesResponse = serde_json::from_str(&response.body)?;
        debug!(candidates = body.routes.len(), "routes computed");

        Ok(body.routes)
    }
}

impl<T: HttpTransport> RouteProvider for RoutesClient<T> {
    fn compute_alternatives(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: TravelMode,
    ) -> Result<Vec<RouteCandidate>, ApiError> {
        RoutesClient::compute_alternatives(self, origin, destination, mode)
    }
}

fn waypoint(coordinate: Coordinate) -> serde_json::Value {
    json!({
        "location": {
            "latLng": {
                "latitude": coordinate.latitude,
                "longitude": coordinate.longitude,
            }
        }
    })
}

/// The service omits `routes` entirely when nothing was found.
#[derive(Debug, Deserialize)]
struct ComputeRoutesResponse {
    #[serde(default)]
    routes: Vec<RouteCandidate>,
}
