//! HTTP [`Router`] backed by the PPR routing service.
//!
//! # Architecture
//!
//! [`HttpRouter`] is asynchronous and cheap to clone; clones share the
//! connection pool and configuration. [`HttpRouter::dispatch`] runs a request
//! as its own Tokio task, and [`BlockingHttpRouter`] bridges to synchronous
//! callers by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use ppr_core::{LatLng, RouteOptions, Waypoint};
//! use ppr_http::BlockingHttpRouter;
//!
//! let router = BlockingHttpRouter::new("http://localhost:9042/")?;
//! let waypoints = [
//!     Waypoint::new(LatLng::new(49.8728, 8.6512)),
//!     Waypoint::new(LatLng::new(49.8776, 8.6544)),
//! ];
//! let routes = router.route(&waypoints, &RouteOptions::new())?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use ppr_core::{
    Route, RouteError, RouteErrorKind, RouteOptions, Router, Waypoint, snapshot_waypoints,
};
use reqwest::Client;
use thiserror::Error;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio::task::{JoinError, JoinHandle};
use url::Url;

use crate::config::HttpRouterConfig;
use crate::convert::convert_response;
use crate::wire::{RouteRequest, RouteResponse};

/// Error type for router construction failures.
#[derive(Debug, Error)]
pub enum HttpRouterBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// Failed to build the Tokio runtime.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The base URL cannot be parsed or cannot carry a path.
    #[error("invalid routing service URL {url:?}: {source}")]
    BaseUrl {
        /// The configured base URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Asynchronous routing client for the PPR service.
#[derive(Debug, Clone)]
pub struct HttpRouter {
    client: Client,
    config: Arc<HttpRouterConfig>,
    endpoint: Url,
}

impl HttpRouter {
    /// Create a router with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, HttpRouterBuildError> {
        Self::with_config(HttpRouterConfig::new(base_url))
    }

    /// Create a router with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client fails
    /// to build.
    pub fn with_config(config: HttpRouterConfig) -> Result<Self, HttpRouterBuildError> {
        let endpoint = route_endpoint(&config)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(HttpRouterBuildError::HttpClient)?;
        Ok(Self {
            client,
            config: Arc::new(config),
            endpoint,
        })
    }

    /// The configuration this router was built with.
    #[must_use]
    pub fn config(&self) -> &HttpRouterConfig {
        &self.config
    }

    /// Full URL requests are sent to, query parameters included.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Start a request on the current Tokio runtime and return its handle.
    ///
    /// The waypoints are copied before this returns, so the caller may change
    /// or drop its own list straight away. Dropping the handle abandons the
    /// request.
    ///
    /// Outside a Tokio runtime the handle resolves to
    /// [`RouteError::Processing`].
    pub fn dispatch(&self, waypoints: &[Waypoint], options: &RouteOptions) -> PendingRoute {
        let snapshot = match snapshot_waypoints(waypoints) {
            Ok(snapshot) => snapshot,
            Err(err) => return PendingRoute::failed(err),
        };
        let Ok(handle) = Handle::try_current() else {
            return PendingRoute::failed(RouteError::processing(
                "no Tokio runtime available to dispatch the routing request",
            ));
        };
        let router = self.clone();
        let options = options.clone();
        PendingRoute::running(
            handle.spawn(async move { router.fetch_routes(&snapshot, &options).await }),
        )
    }

    /// Run one exchange under the configured timeout and log its outcome.
    async fn fetch_routes(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Vec<Route>, RouteError> {
        let exchange = self.exchange(waypoints, options);
        let outcome = match tokio::time::timeout(self.config.timeout, exchange).await {
            Ok(outcome) => outcome,
            Err(_) => Err(self.timeout_error()),
        };
        match &outcome {
            Ok(routes) => debug!("received {} routes from {}", routes.len(), self.endpoint),
            Err(err) if err.kind() == RouteErrorKind::Service => {
                debug!("routing service at {} reported: {err}", self.endpoint);
            }
            Err(err) => warn!("routing request failed (status {}): {err}", err.status()),
        }
        outcome
    }

    async fn exchange(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Vec<Route>, RouteError> {
        let profile = options.profile.as_ref().unwrap_or(&self.config.profile);
        let body = RouteRequest::new(waypoints, options.geometry_only, profile);
        debug!(
            "requesting route through {} waypoints from {}",
            waypoints.len(),
            self.endpoint
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?;
        if !status.is_success() {
            debug!("routing service answered with HTTP {status}");
        }

        // Failures come back as JSON with a 4xx status, so decode regardless.
        let envelope: RouteResponse =
            serde_json::from_slice(&bytes).map_err(|err| RouteError::Parse {
                message: err.to_string(),
            })?;
        convert_response(envelope, waypoints)
    }

    fn timeout_error(&self) -> RouteError {
        RouteError::Timeout {
            url: self.endpoint.to_string(),
            timeout_ms: self.config.timeout_ms(),
        }
    }

    /// Convert a reqwest error to a [`RouteError`].
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> RouteError {
        if error.is_timeout() {
            return self.timeout_error();
        }
        RouteError::Transport {
            url: self.endpoint.to_string(),
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl Router for HttpRouter {
    async fn route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Vec<Route>, RouteError> {
        let snapshot = snapshot_waypoints(waypoints)?;
        self.fetch_routes(&snapshot, options).await
    }
}

/// Resolve `route` against the base URL and append the extra parameters.
fn route_endpoint(config: &HttpRouterConfig) -> Result<Url, HttpRouterBuildError> {
    let invalid = |source: url::ParseError| HttpRouterBuildError::BaseUrl {
        url: config.base_url.clone(),
        source,
    };
    let mut base = Url::parse(&config.base_url).map_err(invalid)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let mut endpoint = base.join("route").map_err(invalid)?;
    if !config.request_parameters.is_empty() {
        let mut pairs = endpoint.query_pairs_mut();
        for (key, value) in &config.request_parameters {
            pairs.append_pair(key, value);
        }
    }
    Ok(endpoint)
}

/// Handle to a request started with [`HttpRouter::dispatch`].
///
/// Resolves exactly once through [`PendingRoute::wait`]. Dropping the handle,
/// or the future returned by `wait`, aborts the request.
#[derive(Debug)]
pub struct PendingRoute {
    state: PendingState,
}

#[derive(Debug)]
enum PendingState {
    Running(JoinHandle<Result<Vec<Route>, RouteError>>),
    Failed(RouteError),
}

impl PendingRoute {
    fn running(handle: JoinHandle<Result<Vec<Route>, RouteError>>) -> Self {
        Self {
            state: PendingState::Running(handle),
        }
    }

    fn failed(error: RouteError) -> Self {
        Self {
            state: PendingState::Failed(error),
        }
    }

    /// Wait for the outcome of the request.
    ///
    /// # Errors
    ///
    /// Returns the request's [`RouteError`]; a request task that panicked or
    /// was cancelled surfaces as [`RouteError::Processing`].
    pub async fn wait(mut self) -> Result<Vec<Route>, RouteError> {
        match &mut self.state {
            PendingState::Running(handle) => {
                handle.await.unwrap_or_else(|err| Err(join_error(&err)))
            }
            PendingState::Failed(error) => Err(error.clone()),
        }
    }
}

impl Drop for PendingRoute {
    fn drop(&mut self) {
        if let PendingState::Running(handle) = &self.state {
            handle.abort();
        }
    }
}

fn join_error(error: &JoinError) -> RouteError {
    warn!("routing task ended abnormally: {error}");
    RouteError::processing(format!("routing task failed: {error}"))
}

/// Synchronous wrapper around [`HttpRouter`].
///
/// Owns a Tokio runtime that is reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the router uses its own runtime. Inside a
/// multi-threaded runtime (detected via [`Handle::try_current()`] and
/// [`RuntimeFlavor::MultiThread`]) it blocks that runtime's handle with
/// [`tokio::task::block_in_place`]. Inside a `current_thread` runtime it falls
/// back to its own runtime, which may deadlock if the caller's runtime is
/// driving IO or timers this request depends on.
pub struct BlockingHttpRouter {
    inner: HttpRouter,
    runtime: Runtime,
}

impl std::fmt::Debug for BlockingHttpRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingHttpRouter")
            .field("inner", &self.inner)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl BlockingHttpRouter {
    /// Create a blocking router with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, HttpRouterBuildError> {
        Self::with_config(HttpRouterConfig::new(base_url))
    }

    /// Create a blocking router with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, or the HTTP client or
    /// Tokio runtime fails to build.
    pub fn with_config(config: HttpRouterConfig) -> Result<Self, HttpRouterBuildError> {
        let inner = HttpRouter::with_config(config)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(HttpRouterBuildError::Runtime)?;
        Ok(Self { inner, runtime })
    }

    /// The asynchronous router doing the work.
    #[must_use]
    pub fn router(&self) -> &HttpRouter {
        &self.inner
    }

    /// Route through `waypoints`, blocking until the outcome is known.
    ///
    /// # Errors
    ///
    /// Returns the [`RouteError`] describing the single failure.
    pub fn route(
        &self,
        waypoints: &[Waypoint],
        options: &RouteOptions,
    ) -> Result<Vec<Route>, RouteError> {
        let future = self.inner.route(waypoints, options);
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}
