//! Places API (Text Search) adapter: free text to a coordinate.

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::config::GoogleMapsConfig;
use crate::error::ApiError;
use crate::model::Coordinate;
use crate::traits::Geocoder;
use crate::transport::{HttpTransport, JsonRequest, ReqwestTransport};

pub const PLACES_FIELD_MASK: &str =
    "places.id,places.displayName,places.formattedAddress,places.location";

/// The first match of a text search.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: String,
    pub display_name: Option<String>,
    pub formatted_address: Option<String>,
    pub location: Coordinate,
}

#[derive(Debug, Clone)]
pub struct PlacesClient<T = ReqwestTransport> {
    config: GoogleMapsConfig,
    transport: T,
}

impl PlacesClient<ReqwestTransport> {
    pub fn new(config: GoogleMapsConfig) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::new(config.timeout_secs)?;
        Ok(Self { config, transport })
    }
}

impl<T: HttpTransport> PlacesClient<T> {
    pub fn with_transport(config: GoogleMapsConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Resolves `query` to the service's top-ranked place.
    pub fn resolve_place(&self, query: &str) -> Result<Place, ApiError> {
        let api_key = self.config.api_key().ok_or(ApiError::Configuration)?;
        let query = query.trim();
        if query.is_empty() {
            return Err(ApiError::Validation);
        }

        debug!(query, "searching places");
        let response = self.transport.post_json(&JsonRequest {
            url: &self.config.places_url,
            api_key,
            field_mask: PLACES_FIELD_MASK,
            body: json!({ "textQuery": query }),
        })?;

        if !response.is_success() {
            return Err(ApiError::Service {
                status: response.status,
                body: response.body,
            });
        }

        let body: SearchTextResponse = serde_json::from_str(&response.body)?;
        let place = body
            .places
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::NotFound(query.to_string()))?;

        let location = place
            .location
            .and_then(|loc| Coordinate::try_new(loc.latitude, loc.longitude))
            .ok_or_else(|| {
                ApiError::MalformedResponse(format!("place {:?} has no valid location", place.id))
            })?;

        debug!(
            query,
            address = place.formatted_address.as_deref().unwrap_or_default(),
            latitude = location.latitude,
            longitude = location.longitude,
            "resolved place"
        );

        Ok(Place {
            id: place.id,
            display_name: place.display_name.map(|name| name.text),
            formatted_address: place.formatted_address,
            location,
        })
    }

    pub fn resolve(&self, query: &str) -> Result<Coordinate, ApiError> {
        self.resolve_place(query).map(|place| place.location)
    }
}

impl<T: HttpTransport> Geocoder for PlacesClient<T> {
    fn resolve(&self, query: &str) -> Result<Coordinate, ApiError> {
        PlacesClient::resolve(self, query)
    }
}

#[derive(Debug, Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<PlaceWire>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlaceWire {
    #[serde(default)]
    id: String,
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: String,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    #[serde(default)]
    latitude: f64,
    #[serde(default)]
    longitude: f64,
}
