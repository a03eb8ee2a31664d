//! Core domain types for the PPR routing client.
//!
//! Waypoints go in, [`Route`] values come out, and a [`SearchProfile`]
//! tells the backend how to weigh stairs, crossings and inclines. The
//! [`Router`] trait is the seam between callers and a concrete backend.

#![forbid(unsafe_code)]

pub mod profile;
mod route;
pub mod router;
mod waypoint;

#[doc(hidden)]
pub mod test_support;

pub use profile::{ProfileCatalog, SearchProfile};
pub use route::{CrossingType, Route, RouteStep, RouteSummary, Side, StepType};
pub use router::{RouteError, RouteErrorKind, RouteOptions, Router, snapshot_waypoints};
pub use waypoint::{LatLng, Waypoint};
