//! Los Angeles → Santa Monica fixtures.
//!
//! The encoded polylines are the standard 1e-5 encoding of the point lists
//! next to them.

/// A named place with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }
}

pub const LOS_ANGELES: Location = Location::new("Los Angeles, CA", 34.0522, -118.2437);
pub const SANTA_MONICA: Location = Location::new("Santa Monica, CA", 34.0195, -118.4912);

/// Along Wilshire / Olympic, the service's first pick.
pub const SOUTHERN_ROUTE: &str = "gyynEbnupUf]dmAxPvgEb`@lcHje@zjKnj@|sHhh@tmG";
pub const SOUTHERN_ROUTE_POINTS: &[(f64, f64)] = &[
    (34.0522, -118.2437),
    (34.04736, -118.25621),
    (34.04451, -118.28833),
    (34.03921, -118.33512),
    (34.03307, -118.39846),
    (34.02611, -118.44789),
    (34.0195, -118.4912),
];

/// Through Hollywood and Beverly Hills.
pub const NORTHERN_ROUTE: &str = "gyynEbnupU_y@z{Egl@tjIda@blLzoBhxIp_DzzE";
pub const NORTHERN_ROUTE_POINTS: &[(f64, f64)] = &[
    (34.0522, -118.2437),
    (34.06148, -118.27904),
    (34.06872, -118.33211),
    (34.06325, -118.40077),
    (34.04519, -118.45602),
    (34.0195, -118.4912),
];
