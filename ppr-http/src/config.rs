//! Client configuration.

use std::time::Duration;

use ppr_core::SearchProfile;

/// Default user agent for routing requests.
pub const DEFAULT_USER_AGENT: &str = "ppr-client/0.1";

/// Default routing service URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9042/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`crate::HttpRouter`].
///
/// Values are fixed once the router is built; build another router to change
/// them.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRouterConfig {
    /// Base URL of the routing service; `route` is resolved against it.
    pub base_url: String,
    /// Deadline for the whole exchange: send, read and decode.
    pub timeout: Duration,
    /// Profile used when a call does not supply one.
    pub profile: SearchProfile,
    /// Extra query parameters appended to every request URL.
    pub request_parameters: Vec<(String, String)>,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpRouterConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            profile: SearchProfile::default(),
            request_parameters: Vec::new(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpRouterConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the default search profile.
    #[must_use]
    pub fn with_profile(mut self, profile: SearchProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Append a query parameter to every request.
    #[must_use]
    pub fn with_request_parameter(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.request_parameters.push((key.into(), value.into()));
        self
    }

    /// Timeout in whole milliseconds, saturating at `u64::MAX`.
    pub(crate) fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}
