//! Facade crate for the PPR pedestrian routing client.
//!
//! This crate re-exports the core domain types and the profile catalog, and
//! exposes the HTTP client behind the `http` feature.

#![forbid(unsafe_code)]

pub use ppr_core::profile::{self, NamedProfile, ProfileCatalog, ProfileError, SearchProfile};
pub use ppr_core::{
    CrossingType, LatLng, Route, RouteError, RouteErrorKind, RouteOptions, RouteStep,
    RouteSummary, Router, Side, StepType, Waypoint,
};

#[cfg(feature = "http")]
pub use ppr_http::{
    BlockingHttpRouter, DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpRouter, HttpRouterBuildError,
    HttpRouterConfig, PendingRoute,
};
