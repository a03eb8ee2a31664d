use thiserror::Error;

/// Broad category of a [`RouteError`].
///
/// Transport failures and timeouts share status `-1`; the kind keeps them
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteErrorKind {
    /// Fewer than two usable waypoints.
    InvalidWaypoints,
    /// The request never produced a response.
    Transport,
    /// The deadline passed before a response was processed.
    Timeout,
    /// The response body was not a routing response.
    Parse,
    /// A parsed response could not be turned into routes.
    Processing,
    /// The service answered with an error message.
    Service,
}

/// Errors from [`crate::Router::route`].
///
/// Every call ends in exactly one of these or in a list of routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Routing needs a start and a destination.
    #[error("at least two waypoints are required, got {count}")]
    InvalidWaypoints {
        /// Number of waypoints supplied.
        count: usize,
    },
    /// The HTTP exchange failed before a response arrived.
    #[error("HTTP request to {url} failed: {message}")]
    Transport {
        /// Request URL.
        url: String,
        /// Underlying error text.
        message: String,
    },
    /// No response was processed within the configured timeout.
    #[error("routing request to {url} timed out after {timeout_ms} ms")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },
    /// The response body could not be decoded.
    #[error("error parsing routing response: {message}")]
    Parse {
        /// Decoder error text.
        message: String,
    },
    /// The decoded response could not be converted into routes.
    #[error("error processing routing response: {message}")]
    Processing {
        /// Description of the offending data.
        message: String,
    },
    /// The service reported a failure, e.g. `"No route found."`.
    #[error("{message}")]
    Service {
        /// Message exactly as sent by the service.
        message: String,
    },
}

impl RouteError {
    /// Category of the error.
    #[must_use]
    pub const fn kind(&self) -> RouteErrorKind {
        match self {
            Self::InvalidWaypoints { .. } => RouteErrorKind::InvalidWaypoints,
            Self::Transport { .. } => RouteErrorKind::Transport,
            Self::Timeout { .. } => RouteErrorKind::Timeout,
            Self::Parse { .. } => RouteErrorKind::Parse,
            Self::Processing { .. } => RouteErrorKind::Processing,
            Self::Service { .. } => RouteErrorKind::Service,
        }
    }

    /// Numeric status in the Leaflet routing convention: positive for
    /// service errors, negative for client-side failures.
    #[must_use]
    pub const fn status(&self) -> i32 {
        match self.kind() {
            RouteErrorKind::Service => 1,
            RouteErrorKind::Transport | RouteErrorKind::Timeout => -1,
            RouteErrorKind::Parse => -2,
            RouteErrorKind::Processing => -3,
            RouteErrorKind::InvalidWaypoints => -4,
        }
    }

    /// Shorthand for a [`RouteError::Processing`] error.
    pub fn processing(message: impl Into<String>) -> Self {
        Self::Processing {
            message: message.into(),
        }
    }
}
