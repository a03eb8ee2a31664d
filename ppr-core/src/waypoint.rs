//! Geographic positions and the waypoints a caller routes through.

use std::collections::BTreeMap;

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A WGS84 position in latitude/longitude order.
///
/// The routing service speaks `[lon, lat]`; map renderers speak `lat, lng`.
/// Keeping a dedicated type makes every swap explicit at the call site.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use ppr_core::LatLng;
///
/// let pos = LatLng::new(49.87, 8.65);
/// let coord: Coord = pos.into();
/// assert_eq!(coord, Coord { x: 8.65, y: 49.87 });
/// assert_eq!(LatLng::from_lon_lat(8.65, 49.87), pos);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl LatLng {
    /// Construct a position from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Construct a position from a service-ordered `lon, lat` pair.
    #[must_use]
    pub const fn from_lon_lat(lon: f64, lat: f64) -> Self {
        Self { lat, lng: lon }
    }

    /// Return the position as a service-ordered `[lon, lat]` pair.
    #[must_use]
    pub const fn to_lon_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Whether both components are finite and inside the WGS84 ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<LatLng> for Coord {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

impl From<Coord> for LatLng {
    fn from(value: Coord) -> Self {
        Self::new(value.y, value.x)
    }
}

/// A point the caller wants the route to pass through.
///
/// Waypoints are cloned into every request so the caller keeps full
/// ownership of its own collection while a request is in flight.
///
/// # Examples
/// ```
/// use ppr_core::{LatLng, Waypoint};
///
/// let wp = Waypoint::new(LatLng::new(49.87, 8.65)).with_name("Luisenplatz");
/// assert_eq!(wp.name.as_deref(), Some("Luisenplatz"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Waypoint {
    /// Position of the waypoint.
    pub lat_lng: LatLng,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form per-point options carried along for the renderer.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub options: BTreeMap<String, serde_json::Value>,
}

impl Waypoint {
    /// Create an unnamed waypoint without options.
    #[must_use]
    pub const fn new(lat_lng: LatLng) -> Self {
        Self {
            lat_lng,
            name: None,
            options: BTreeMap::new(),
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a per-point option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }
}

impl From<LatLng> for Waypoint {
    fn from(value: LatLng) -> Self {
        Self::new(value)
    }
}
