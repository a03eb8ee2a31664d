//! Deterministic [`Router`] double for unit and behaviour tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{Route, RouteError, RouteOptions, RouteSummary, Router, Waypoint, snapshot_waypoints};

/// Stub `Router` returning a pre-configured outcome.
///
/// The stub honours the waypoint contract (fewer than two is an error) and
/// records every request it accepts so tests can assert on what was sent.
///
/// # Example
///
/// ```
/// use ppr_core::test_support::StubRouter;
/// use ppr_core::{LatLng, RouteOptions, Router, Waypoint};
///
/// let router = StubRouter::with_straight_line();
/// let waypoints = [
///     Waypoint::new(LatLng::new(2.0, 1.0)),
///     Waypoint::new(LatLng::new(4.0, 3.0)),
/// ];
/// let rt = tokio::runtime::Builder::new_current_thread().build()?;
/// let routes = rt.block_on(router.route(&waypoints, &RouteOptions::new()));
/// assert_eq!(routes.map(|r| r.len()).ok(), Some(1));
/// assert_eq!(router.requests().len(), 1);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct StubRouter {
    response: StubResponse,
    requests: Mutex<Vec<RecordedRequest>>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Routes(Vec<Route>),
    StraightLine,
    Error(RouteError),
}

/// A request accepted by [`StubRouter`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    /// The waypoint snapshot.
    pub waypoints: Vec<Waypoint>,
    /// The options passed alongside.
    pub options: RouteOptions,
}

impl StubRouter {
    fn from_response(response: StubResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Return `routes` for every valid request.
    #[must_use]
    pub fn with_routes(routes: Vec<Route>) -> Self {
        Self::from_response(StubResponse::Routes(routes))
    }

    /// Return `error` for every valid request.
    #[must_use]
    pub fn with_error(error: RouteError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    /// Return one route joining the waypoints with straight segments.
    #[must_use]
    pub fn with_straight_line() -> Self {
        Self::from_response(StubResponse::StraightLine)
    }

    /// Requests accepted so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

/// Build a route through `waypoints` without any service involved.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn straight_line_route(waypoints: &[Waypoint]) -> Option<Route> {
    let first = waypoints.first()?.lat_lng;
    let last = waypoints.last()?.lat_lng;
    Some(Route {
        name: String::new(),
        coordinates: waypoints.iter().map(|wp| wp.lat_lng).collect(),
        summary: RouteSummary::default(),
        waypoints: [first, last],
        input_waypoints: waypoints.to_vec(),
        instructions: Vec::new(),
    })
}

#[async_trait]
impl Router for StubRouter {
    async fn route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Vec<Route>, RouteError> {
        let snapshot = snapshot_waypoints(waypoints)?;
        if let Ok(mut guard) = self.requests.lock() {
            guard.push(RecordedRequest {
                waypoints: snapshot.clone(),
                options: options.clone(),
            });
        }
        match &self.response {
            StubResponse::Routes(routes) => Ok(routes.clone()),
            StubResponse::StraightLine => Ok(straight_line_route(&snapshot).into_iter().collect()),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}
