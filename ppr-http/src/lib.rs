//! HTTP client for the PPR pedestrian routing service.
//!
//! [`HttpRouter`] implements [`ppr_core::Router`] by posting waypoints and a
//! search profile to the service's `route` endpoint and converting the reply
//! into [`ppr_core::Route`] values.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use ppr_core::profile::catalog;
//! use ppr_core::{LatLng, RouteOptions, Router, Waypoint};
//! use ppr_http::{HttpRouter, HttpRouterConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpRouterConfig::new("http://localhost:9042/")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_profile(catalog::accessibility2());
//! let router = HttpRouter::with_config(config)?;
//!
//! let waypoints = [
//!     Waypoint::new(LatLng::new(49.8728, 8.6512)),
//!     Waypoint::new(LatLng::new(49.8776, 8.6544)),
//! ];
//! let routes = router.route(&waypoints, &RouteOptions::new()).await?;
//! println!("{} routes", routes.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod client;
mod config;
mod convert;
mod wire;

pub use client::{BlockingHttpRouter, HttpRouter, HttpRouterBuildError, PendingRoute};
pub use config::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, HttpRouterConfig};
