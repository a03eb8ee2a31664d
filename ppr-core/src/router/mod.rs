//! Request pedestrian routes from a routing backend.
//!
//! The [`Router`] trait abstracts the backend. Callers pass an ordered slice
//! of waypoints plus [`RouteOptions`] and await either a list of routes or
//! one [`RouteError`].

mod error;
mod provider;

pub use error::{RouteError, RouteErrorKind};
pub use provider::{RouteOptions, Router, snapshot_waypoints};
