//! Normalized routes handed to the map-rendering layer.

use geo::{Coord, LineString};
use serde::{Deserialize, Serialize};

use crate::{LatLng, Waypoint};

/// Aggregate metrics for a route.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    /// Length in metres.
    pub total_distance: f64,
    /// Walking time in seconds.
    pub total_time: f64,
    /// Accumulated accessibility cost.
    pub total_accessibility: f64,
    /// Elevation gain in metres.
    pub total_elevation_up: f64,
    /// Elevation loss in metres.
    pub total_elevation_down: f64,
}

/// Kind of a turn-by-turn step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepType {
    /// Walking along a street.
    Street,
    /// Walking on a dedicated footway.
    Footway,
    /// Crossing a street, rail or tram line.
    Crossing,
    /// Taking an elevator.
    Elevator,
    /// Anything the service did not classify.
    #[default]
    #[serde(other)]
    Invalid,
}

/// Kind of crossing a step passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingType {
    /// Not a crossing.
    #[default]
    None,
    /// Crossing inferred by the service.
    Generated,
    /// Unmarked crossing.
    Unmarked,
    /// Marked crossing.
    Marked,
    /// Signal-controlled crossing.
    Signals,
    /// Crossing with a traffic island.
    Island,
    /// A crossing kind this client does not know.
    #[serde(other)]
    Unknown,
}

/// Which side of the street a step runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// On the street itself or on a separate way.
    #[default]
    Center,
    /// Left-hand sidewalk.
    Left,
    /// Right-hand sidewalk.
    Right,
    /// A side value this client does not know.
    #[serde(other)]
    Unknown,
}

/// One turn-by-turn instruction as supplied by the service.
///
/// Fields the service leaves out decode to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteStep {
    /// Kind of step.
    pub step_type: StepType,
    /// Name of the street or way, possibly empty.
    pub street_name: String,
    /// OSM-derived street class, e.g. `"residential"` or `"stairs"`.
    pub street_type: String,
    /// Crossing kind for crossing steps.
    pub crossing_type: CrossingType,
    /// Sidewalk side.
    pub side: Side,
    /// Length in metres.
    pub distance: f64,
    /// Walking time in seconds.
    pub duration: f64,
    /// Accessibility cost.
    pub accessibility: f64,
    /// Elevation gain in metres.
    pub elevation_up: f64,
    /// Elevation loss in metres.
    pub elevation_down: f64,
    /// Whether the step climbs.
    pub incline_up: bool,
    /// Handrail presence, `None` when unknown.
    pub handrail: Option<bool>,
    /// Flat duration penalty incurred.
    pub duration_penalty: f64,
    /// Flat accessibility penalty incurred.
    pub accessibility_penalty: f64,
    /// Index into the route coordinates where the step ends.
    pub index: i64,
    /// Step geometry, when the service includes it.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<LatLng>,
}

/// A route ready for rendering.
///
/// Coordinates are in `lat, lng` order. `waypoints` holds the first and last
/// coordinate of the geometry; `input_waypoints` is the snapshot of what the
/// caller asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Display name, empty unless set by the caller.
    pub name: String,
    /// Route geometry.
    pub coordinates: Vec<LatLng>,
    /// Aggregate metrics.
    pub summary: RouteSummary,
    /// First and last coordinate of the geometry.
    pub waypoints: [LatLng; 2],
    /// The waypoints the route was requested for.
    pub input_waypoints: Vec<Waypoint>,
    /// Turn-by-turn steps.
    pub instructions: Vec<RouteStep>,
}

impl Route {
    /// Route geometry as a `geo` line string in `x = lng, y = lat` order.
    ///
    /// # Examples
    /// ```
    /// use ppr_core::{LatLng, Route, RouteSummary};
    ///
    /// let start = LatLng::new(2.0, 1.0);
    /// let end = LatLng::new(4.0, 3.0);
    /// let route = Route {
    ///     name: String::new(),
    ///     coordinates: vec![start, end],
    ///     summary: RouteSummary::default(),
    ///     waypoints: [start, end],
    ///     input_waypoints: Vec::new(),
    ///     instructions: Vec::new(),
    /// };
    /// let line = route.line_string();
    /// assert_eq!(line.0[0].x, 1.0);
    /// ```
    #[must_use]
    pub fn line_string(&self) -> LineString {
        self.coordinates.iter().copied().map(Coord::from).collect()
    }
}
