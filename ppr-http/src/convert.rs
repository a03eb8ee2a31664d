//! Turn a decoded service response into [`Route`] values.

use ppr_core::{LatLng, Route, RouteError, RouteStep, RouteSummary, Waypoint};
use serde_json::Value;

use crate::wire::{RouteResponse, WireRoute, WireStep};

/// Convert `response` into routes for the request through `input`.
///
/// # Errors
///
/// [`RouteError::Service`] when the service reported an error, otherwise
/// [`RouteError::Processing`] for any route that cannot be converted.
pub fn convert_response(
    mut response: RouteResponse,
    input: &[Waypoint],
) -> Result<Vec<Route>, RouteError> {
    if let Some(message) = response.error_message() {
        return Err(RouteError::Service { message });
    }
    let routes = match response.routes {
        Some(Value::Array(routes)) => routes,
        Some(other) => {
            return Err(RouteError::processing(format!(
                "routes must be a list, got {other}"
            )));
        }
        None => {
            return Err(RouteError::processing(
                "response carries neither an error nor routes",
            ));
        }
    };
    routes
        .into_iter()
        .enumerate()
        .map(|(index, raw)| convert_route(index, raw, input))
        .collect()
}

fn convert_route(index: usize, raw: Value, input: &[Waypoint]) -> Result<Route, RouteError> {
    let route: WireRoute = serde_json::from_value(raw)
        .map_err(|err| RouteError::processing(format!("route {index}: {err}")))?;

    let coordinates = route
        .coordinates
        .iter()
        .map(|pair| lat_lng(pair))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| RouteError::processing(format!("route {index}: {message}")))?;
    let (Some(&first), Some(&last)) = (coordinates.first(), coordinates.last()) else {
        return Err(RouteError::processing(format!(
            "route {index}: no coordinates"
        )));
    };

    let instructions = route
        .steps
        .into_iter()
        .map(convert_step)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| RouteError::processing(format!("route {index}: {message}")))?;

    Ok(Route {
        name: String::new(),
        coordinates,
        summary: RouteSummary {
            total_distance: route.distance,
            total_time: route.duration,
            total_accessibility: route.accessibility,
            total_elevation_up: route.elevation_up,
            total_elevation_down: route.elevation_down,
        },
        waypoints: [first, last],
        input_waypoints: input.to_vec(),
        instructions,
    })
}

fn convert_step(wire: WireStep) -> Result<RouteStep, String> {
    let WireStep { mut step, path } = wire;
    step.path = path
        .iter()
        .map(|pair| lat_lng(pair))
        .collect::<Result<_, _>>()?;
    Ok(step)
}

/// Swap a `[lon, lat]` pair into a [`LatLng`].
fn lat_lng(pair: &[f64]) -> Result<LatLng, String> {
    match pair {
        [lon, lat, ..] => Ok(LatLng::from_lon_lat(*lon, *lat)),
        _ => Err(format!(
            "coordinate pair has {} values, expected 2",
            pair.len()
        )),
    }
}
