//! Behavioural tests for the [`Router`] contract.
//!
//! These tests drive [`StubRouter`] so the contract can be checked without a
//! running routing service.

use ppr_core::test_support::StubRouter;
use ppr_core::{LatLng, Route, RouteError, RouteOptions, Router, Waypoint};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

/// Result cell holding the outcome of a routing request.
type ResultCell = RefCell<Result<Vec<Route>, RouteError>>;

#[fixture]
fn router() -> RefCell<Option<StubRouter>> {
    RefCell::new(None)
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(Ok(Vec::new()))
}

fn sample_waypoints(count: usize) -> Vec<Waypoint> {
    (0..count)
        .map(|i| Waypoint::new(LatLng::new(49.87 + i as f64 * 0.01, 8.65)))
        .collect()
}

fn run_request(router: &StubRouter, waypoints: &[Waypoint]) -> Result<Vec<Route>, RouteError> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime should build");
    rt.block_on(router.route(waypoints, &RouteOptions::new()))
}

// --- Given steps ---

#[given("a router drawing straight lines")]
fn straight_line_router(#[from(router)] router: &RefCell<Option<StubRouter>>) {
    *router.borrow_mut() = Some(StubRouter::with_straight_line());
}

#[given("a router whose service finds no route")]
fn no_route_router(#[from(router)] router: &RefCell<Option<StubRouter>>) {
    *router.borrow_mut() = Some(StubRouter::with_error(RouteError::Service {
        message: "No route found.".to_owned(),
    }));
}

// --- When steps ---

#[when("I request a route through two waypoints")]
fn request_two(
    #[from(router)] router: &RefCell<Option<StubRouter>>,
    #[from(result)] result: &ResultCell,
) {
    let guard = router.borrow();
    let stub = guard.as_ref().expect("router must be initialised");
    *result.borrow_mut() = run_request(stub, &sample_waypoints(2));
}

#[when("I request a route through one waypoint")]
fn request_one(
    #[from(router)] router: &RefCell<Option<StubRouter>>,
    #[from(result)] result: &ResultCell,
) {
    let guard = router.borrow();
    let stub = guard.as_ref().expect("router must be initialised");
    *result.borrow_mut() = run_request(stub, &sample_waypoints(1));
}

// --- Then steps ---

#[then("one route through both waypoints is returned")]
fn then_one_route(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let routes = borrowed.as_ref().expect("expected Ok result");
    assert_eq!(routes.len(), 1, "expected one route");
    let route = &routes[0];
    let expected = sample_waypoints(2);
    assert_eq!(route.waypoints, [expected[0].lat_lng, expected[1].lat_lng]);
    assert_eq!(route.input_waypoints, expected);
}

#[then("an invalid waypoints error is returned")]
fn then_invalid_waypoints(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    assert!(
        matches!(&*borrowed, Err(RouteError::InvalidWaypoints { count: 1 })),
        "expected InvalidWaypoints, got {borrowed:?}"
    );
}

#[then("the router received no requests")]
fn then_no_requests(#[from(router)] router: &RefCell<Option<StubRouter>>) {
    let guard = router.borrow();
    let stub = guard.as_ref().expect("router must be initialised");
    assert!(stub.requests().is_empty());
}

#[then("a service error with status 1 is returned")]
fn then_service_error(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let err = borrowed.as_ref().expect_err("expected an error");
    assert!(matches!(err, RouteError::Service { .. }), "got {err:?}");
    assert_eq!(err.status(), 1);
    assert_eq!(err.to_string(), "No route found.");
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/router.feature", name = $title)]
        fn $fn_name(router: RefCell<Option<StubRouter>>, result: ResultCell) {
            let _ = (router, result);
        }
    };
}

register_scenario!(routing_through_two_waypoints, "routing through two waypoints");
register_scenario!(rejecting_a_single_waypoint, "rejecting a single waypoint");
register_scenario!(reporting_a_service_error, "reporting a service error");
