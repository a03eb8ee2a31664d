//! Error types emitted by the PPR CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use ppr_core::RouteError;
use ppr_core::profile::ProfileError;
use ppr_http::HttpRouterBuildError;
use thiserror::Error;

/// Errors emitted by the PPR CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// No waypoints were given on the command line.
    #[error("missing {field} (pass two or more lat,lng pairs)")]
    MissingWaypoints {
        /// Name of the positional argument.
        field: &'static str,
    },
    /// A waypoint argument is not a `lat,lng` pair.
    #[error("invalid waypoint {value:?}: {reason}")]
    InvalidWaypoint {
        /// The argument as given.
        value: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// Routing needs a start and a destination.
    #[error("at least two waypoints are required, got {count}")]
    TooFewWaypoints {
        /// Number of waypoints given.
        count: usize,
    },
    /// A `--param` value is not a `key=value` pair.
    #[error("invalid request parameter {value:?} (expected key=value)")]
    InvalidParameter {
        /// The argument as given.
        value: String,
    },
    /// Both a catalog profile and a profile file were selected.
    #[error("--{profile} and --{profile_file} cannot be combined")]
    ConflictingProfiles {
        /// Flag selecting a catalog profile.
        profile: &'static str,
        /// Flag selecting a profile file.
        profile_file: &'static str,
    },
    /// The requested catalog profile does not exist.
    #[error(transparent)]
    Profile(#[from] ProfileError),
    /// Opening the profile file failed.
    #[error("failed to open profile at {path:?}: {source}")]
    OpenProfile {
        /// The profile path.
        path: Utf8PathBuf,
        /// Filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// Profile JSON could not be decoded.
    #[error("failed to parse profile JSON at {path:?}: {source}")]
    ParseProfile {
        /// The profile path.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Constructing the routing client failed.
    #[error("failed to build routing client for {base_url:?}: {source}")]
    BuildRouter {
        /// The configured service URL.
        base_url: String,
        /// Client construction error.
        #[source]
        source: HttpRouterBuildError,
    },
    /// Building the Tokio runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The routing request failed.
    #[error("routing failed (status {}): {source}", .source.status())]
    Route {
        /// The routing failure.
        source: RouteError,
    },
    /// Serializing command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
