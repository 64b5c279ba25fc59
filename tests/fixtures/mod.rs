//! Test fixtures for bike-routes.
//!
//! Provides:
//! - Los Angeles / Santa Monica places and two alternative bike routes
//! - A stub HTTP transport that answers like the Google Maps services and
//!   counts every request it sees

#![allow(dead_code)]

pub mod los_angeles_routes;

pub use los_angeles_routes::*;

use std::collections::HashMap;
use std::sync::Mutex;

use bike_routes::TransportError;
use bike_routes::transport::{HttpResponse, HttpTransport, JsonRequest};
use serde_json::{Value, json};

pub const API_KEY: &str = "test-key";
pub const PLACES_URL: &str = "http://stub.local/places";
pub const ROUTES_URL: &str = "http://stub.local/routes";

pub fn config() -> bike_routes::GoogleMapsConfig {
    bike_routes::GoogleMapsConfig {
        api_key: Some(API_KEY.to_string()),
        places_url: PLACES_URL.to_string(),
        routes_url: ROUTES_URL.to_string(),
        timeout_secs: 1,
    }
}

/// A request as the stub saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub url: String,
    pub api_key: String,
    pub field_mask: String,
    pub body: Value,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Ok(Value),
    Status(u16, String),
    Fail(String),
    Timeout(String),
}

/// Answers place searches from a text → reply table and route requests with
/// a single canned reply.
#[derive(Debug, Default)]
pub struct StubTransport {
    places: HashMap<String, Reply>,
    routes: Option<Reply>,
    requests: Mutex<Vec<Recorded>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn place(mut self, query: &str, latitude: f64, longitude: f64) -> Self {
        self.places
            .insert(query.to_string(), Reply::Ok(places_body(query, latitude, longitude)));
        self
    }

    pub fn place_reply(mut self, query: &str, reply: Reply) -> Self {
        self.places.insert(query.to_string(), reply);
        self
    }

    pub fn routes(mut self, reply: Reply) -> Self {
        self.routes = Some(reply);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for StubTransport {
    fn post_json(&self, request: &JsonRequest<'_>) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(Recorded {
            url: request.url.to_string(),
            api_key: request.api_key.to_string(),
            field_mask: request.field_mask.to_string(),
            body: request.body.clone(),
        });

        let reply = match request.url {
            PLACES_URL => {
                let query = request.body["textQuery"].as_str().unwrap_or_default();
                self.places
                    .get(query)
                    .cloned()
                    .unwrap_or_else(|| Reply::Ok(json!({})))
            }
            ROUTES_URL => self.routes.clone().unwrap_or_else(|| Reply::Ok(json!({}))),
            other => Reply::Status(404, format!("no stub for {other}")),
        };

        match reply {
            Reply::Ok(body) => Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            }),
            Reply::Status(status, body) => Ok(HttpResponse { status, body }),
            Reply::Fail(message) => Err(TransportError::new(message)),
            Reply::Timeout(message) => Err(TransportError::timeout(message)),
        }
    }
}

pub fn places_body(query: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "places": [
            {
                "id": format!("place-{}", query.len()),
                "displayName": { "text": query, "languageCode": "en" },
                "formattedAddress": format!("{query}, USA"),
                "location": { "latitude": latitude, "longitude": longitude }
            }
        ]
    })
}

pub fn routes_body(routes: &[(u64, &str, &str)]) -> Value {
    let routes: Vec<Value> = routes
        .iter()
        .map(|(distance, duration, encoded)| {
            json!({
                "distanceMeters": distance,
                "duration": duration,
                "polyline": { "encodedPolyline": encoded }
            })
        })
        .collect();
    json!({ "routes": routes })
}
