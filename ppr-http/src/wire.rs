//! Request and response bodies of the routing service's `route` endpoint.
//!
//! The envelope is decoded first; routes stay as raw JSON until conversion
//! so that a malformed route is told apart from a malformed body.

use ppr_core::{RouteStep, SearchProfile, Waypoint};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `POST route` request.
#[derive(Debug, Serialize)]
pub struct RouteRequest<'a> {
    /// Waypoints flattened to `[lon0, lat0, lon1, lat1, ...]`.
    pub waypoints: Vec<f64>,
    /// Only the geometry is wanted.
    pub preview: bool,
    /// Cost model for the search.
    pub profile: &'a SearchProfile,
}

impl<'a> RouteRequest<'a> {
    pub fn new(waypoints: &[Waypoint], preview: bool, profile: &'a SearchProfile) -> Self {
        Self {
            waypoints: waypoints
                .iter()
                .flat_map(|wp| wp.lat_lng.to_lon_lat())
                .collect(),
            preview,
            profile,
        }
    }
}

/// Top-level response body.
///
/// A missing or empty `error` means success.
#[derive(Debug, Deserialize)]
pub struct RouteResponse {
    #[serde(default)]
    pub error: Option<String>,
    /// Raw routes; the shape is checked during conversion.
    #[serde(default)]
    pub routes: Option<Value>,
}

impl RouteResponse {
    /// The service's error message, if it reported one.
    pub fn error_message(&mut self) -> Option<String> {
        self.error.take().filter(|message| !message.is_empty())
    }
}

/// One route as sent by the service.
#[derive(Debug, Deserialize)]
pub struct WireRoute {
    /// Geometry as `[lon, lat]` pairs; newer builds call it `path`.
    #[serde(default, alias = "path")]
    pub coordinates: Vec<Vec<f64>>,
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub accessibility: f64,
    #[serde(default)]
    pub elevation_up: f64,
    #[serde(default)]
    pub elevation_down: f64,
    #[serde(default)]
    pub steps: Vec<WireStep>,
}

/// One step as sent by the service; only `path` needs reshaping.
#[derive(Debug, Deserialize)]
pub struct WireStep {
    #[serde(flatten)]
    pub step: RouteStep,
    #[serde(default)]
    pub path: Vec<Vec<f64>>,
}
