//! The routing seam and its per-call options.

use async_trait::async_trait;

use crate::profile::SearchProfile;
use crate::{Route, Waypoint};

use super::error::RouteError;

/// Per-call routing options.
///
/// # Examples
/// ```
/// use ppr_core::RouteOptions;
/// use ppr_core::profile::catalog;
///
/// let options = RouteOptions::new()
///     .geometry_only(true)
///     .with_profile(catalog::accessibility2());
/// assert!(options.geometry_only);
/// assert!(options.profile.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteOptions {
    /// Only the geometry is wanted; the service may skip detailed metrics.
    pub geometry_only: bool,
    /// Profile for this call; `None` selects the router's default profile.
    pub profile: Option<SearchProfile>,
}

impl RouteOptions {
    /// Options selecting the default profile and full results.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a geometry-only preview.
    #[must_use]
    pub const fn geometry_only(mut self, geometry_only: bool) -> Self {
        self.geometry_only = geometry_only;
        self
    }

    /// Use `profile` instead of the router's default.
    #[must_use]
    pub fn with_profile(mut self, profile: SearchProfile) -> Self {
        self.profile = Some(profile);
        self
    }
}

/// Compute pedestrian routes through an ordered list of waypoints.
///
/// The returned future resolves exactly once, either to the routes in the
/// order the backend ranked them or to a single [`RouteError`].
/// Implementations must reject fewer than two waypoints with
/// [`RouteError::InvalidWaypoints`] and must not keep borrowing `waypoints`
/// beyond what the future itself holds.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use ppr_core::{Route, RouteError, RouteOptions, Router, Waypoint};
///
/// struct NoRoutes;
///
/// #[async_trait]
/// impl Router for NoRoutes {
///     async fn route(
///         &self,
///         waypoints: &[Waypoint],
///         _options: &RouteOptions,
///     ) -> Result<Vec<Route>, RouteError> {
///         ppr_core::snapshot_waypoints(waypoints)?;
///         Err(RouteError::Service { message: "No route found.".to_owned() })
///     }
/// }
///
/// let rt = tokio::runtime::Builder::new_current_thread().build()?;
/// let err = rt
///     .block_on(NoRoutes.route(&[], &RouteOptions::new()))
///     .expect_err("no waypoints");
/// assert_eq!(err, RouteError::InvalidWaypoints { count: 0 });
/// # Ok::<(), std::io::Error>(())
/// ```
#[async_trait]
pub trait Router: Send + Sync {
    /// Route through `waypoints` using `options`.
    async fn route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Vec<Route>, RouteError>;
}

/// Validate and copy the caller's waypoints for one request.
///
/// # Errors
///
/// Returns [`RouteError::InvalidWaypoints`] for fewer than two waypoints.
pub fn snapshot_waypoints(waypoints: &[Waypoint]) -> Result<Vec<Waypoint>, RouteError> {
    if waypoints.len() < 2 {
        return Err(RouteError::InvalidWaypoints {
            count: waypoints.len(),
        });
    }
    Ok(waypoints.to_vec())
}
