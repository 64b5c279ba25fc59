//! Service endpoints and credentials for the Google Maps Platform clients.

pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const PLACES_URL_VAR: &str = "BIKE_ROUTES_PLACES_URL";
pub const ROUTES_URL_VAR: &str = "BIKE_ROUTES_ROUTES_URL";
pub const TIMEOUT_VAR: &str = "BIKE_ROUTES_TIMEOUT_SECS";

pub const DEFAULT_PLACES_URL: &str = "https://places.googleapis.com/v1/places:searchText";
pub const DEFAULT_ROUTES_URL: &str = "https://routes.googleapis.com/directions/v2:computeRoutes";

#[derive(Debug, Clone)]
pub struct GoogleMapsConfig {
    /// Sent as `X-Goog-Api-Key`. `None` makes every client call fail before
    /// touching the network.
    pub api_key: Option<String>,
    pub places_url: String,
    pub routes_url: String,
    pub timeout_secs: u64,
}

impl Default for GoogleMapsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            places_url: DEFAULT_PLACES_URL.to_string(),
            routes_url: DEFAULT_ROUTES_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl GoogleMapsConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup. Blank values
    /// are treated as unset and an unparsable timeout keeps the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_key: read(API_KEY_VAR),
            places_url: read(PLACES_URL_VAR).unwrap_or(defaults.places_url),
            routes_url: read(ROUTES_URL_VAR).unwrap_or(defaults.routes_url),
            timeout_secs: read(TIMEOUT_VAR)
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// The API key, if one is set and non-blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
