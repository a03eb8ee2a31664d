//! Route command implementation for the PPR CLI.

use std::io::{BufReader, Write};
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8};
use clap::Parser;
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use ppr_core::{LatLng, ProfileCatalog, RouteOptions, Router, SearchProfile, Waypoint};
use ppr_http::{HttpRouter, HttpRouterConfig};
use serde::{Deserialize, Serialize};

use crate::profiles::write_json;
use crate::{
    ARG_GEOMETRY_ONLY, ARG_PARAM, ARG_PROFILE, ARG_PROFILE_FILE, ARG_SERVICE_URL,
    ARG_TIMEOUT_SECS, ARG_WAYPOINTS, CliError,
};

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Request pedestrian routes through the given waypoints and \
                 print them as JSON. Options other than the waypoints can \
                 come from CLI flags, configuration files, or environment \
                 variables.",
    about = "Route through two or more waypoints"
)]
#[ortho_config(prefix = "PPR")]
pub(crate) struct RouteArgs {
    /// Waypoints as `lat,lng` pairs, in travel order.
    ///
    /// Only the command line supplies waypoints; values from other layers
    /// are discarded after merging.
    #[arg(value_name = "lat,lng", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) waypoints: Vec<String>,
    /// Base URL of the routing service (e.g. "http://localhost:9042/").
    #[arg(long = ARG_SERVICE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) service_url: Option<String>,
    /// Request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "seconds")]
    #[serde(default)]
    pub(crate) timeout_secs: Option<u64>,
    /// Catalog profile key (see `ppr profiles`).
    #[arg(long = ARG_PROFILE, value_name = "key")]
    #[serde(default)]
    pub(crate) profile: Option<String>,
    /// Path to a JSON search profile.
    #[arg(long = ARG_PROFILE_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) profile_file: Option<Utf8PathBuf>,
    /// Ask the service for geometry only.
    ///
    /// Unset unless given, so a config file or environment value can still
    /// enable it.
    #[arg(
        long = ARG_GEOMETRY_ONLY,
        value_name = "bool",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    #[serde(default)]
    pub(crate) geometry_only: Option<bool>,
    /// Extra query parameter appended to the request URL.
    #[arg(long = ARG_PARAM, value_name = "key=value")]
    #[serde(default)]
    pub(crate) params: Vec<String>,
}

impl RouteArgs {
    pub(crate) fn into_config(mut self) -> Result<RouteConfig, CliError> {
        let waypoints = std::mem::take(&mut self.waypoints);
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged.with_waypoints(waypoints))
    }

    /// Replace whatever waypoints the merged layers produced.
    fn with_waypoints(self, waypoints: Vec<String>) -> Self {
        Self { waypoints, ..self }
    }
}

/// Where the search profile comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ProfileSource {
    /// The service's default profile.
    Default,
    /// A catalog entry by key.
    Catalog(String),
    /// A JSON file on disk.
    File(Utf8PathBuf),
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) waypoints: Vec<Waypoint>,
    pub(crate) service_url: String,
    pub(crate) timeout: Duration,
    pub(crate) profile: ProfileSource,
    pub(crate) geometry_only: bool,
    pub(crate) params: Vec<(String, String)>,
}

impl RouteConfig {
    /// Client configuration for this invocation.
    pub(crate) fn router_config(&self) -> HttpRouterConfig {
        self.params.iter().fold(
            HttpRouterConfig::new(self.service_url.clone()).with_timeout(self.timeout),
            |config, (key, value)| config.with_request_parameter(key.clone(), value.clone()),
        )
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        if args.waypoints.is_empty() {
            return Err(CliError::MissingWaypoints {
                field: ARG_WAYPOINTS,
            });
        }
        let waypoints = args
            .waypoints
            .iter()
            .map(|value| parse_waypoint(value))
            .collect::<Result<Vec<_>, _>>()?;
        if waypoints.len() < 2 {
            return Err(CliError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        let profile = match (args.profile, args.profile_file) {
            (Some(_), Some(_)) => {
                return Err(CliError::ConflictingProfiles {
                    profile: ARG_PROFILE,
                    profile_file: ARG_PROFILE_FILE,
                });
            }
            (Some(key), None) => ProfileSource::Catalog(key),
            (None, Some(path)) => ProfileSource::File(path),
            (None, None) => ProfileSource::Default,
        };

        let params = args
            .params
            .iter()
            .map(|value| parse_param(value))
            .collect::<Result<Vec<_>, _>>()?;

        let defaults = HttpRouterConfig::default();
        Ok(Self {
            waypoints,
            service_url: args.service_url.unwrap_or(defaults.base_url),
            timeout: args
                .timeout_secs
                .map_or(defaults.timeout, Duration::from_secs),
            profile,
            geometry_only: args.geometry_only.unwrap_or(false),
            params,
        })
    }
}

/// Parse a `lat,lng` pair.
pub(crate) fn parse_waypoint(value: &str) -> Result<Waypoint, CliError> {
    let invalid = |reason: &'static str| CliError::InvalidWaypoint {
        value: value.to_owned(),
        reason,
    };
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| invalid("expected lat,lng"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| invalid("latitude is not a number"))?;
    let lng: f64 = lng.trim().parse().map_err(|_| invalid("longitude is not a number"))?;
    let lat_lng = LatLng::new(lat, lng);
    if !lat_lng.is_valid() {
        return Err(invalid("coordinates out of range"));
    }
    Ok(Waypoint::new(lat_lng))
}

fn parse_param(value: &str) -> Result<(String, String), CliError> {
    match value.split_once('=') {
        Some((key, val)) if !key.is_empty() => Ok((key.to_owned(), val.to_owned())),
        _ => Err(CliError::InvalidParameter {
            value: value.to_owned(),
        }),
    }
}

/// Resolve the search profile selected by `source`.
pub(crate) fn resolve_profile(source: &ProfileSource) -> Result<SearchProfile, CliError> {
    match source {
        ProfileSource::Default => Ok(SearchProfile::default()),
        ProfileSource::Catalog(key) => Ok(ProfileCatalog::standard().get(key)?.profile.clone()),
        ProfileSource::File(path) => load_profile(path),
    }
}

/// Loads a JSON-encoded [`SearchProfile`] from disk.
///
/// The document is applied over the default profile, so it only needs the
/// fields it changes.
pub(crate) fn load_profile(path: &Utf8Path) -> Result<SearchProfile, CliError> {
    let file = fs_utf8::File::open_ambient(path, ambient_authority()).map_err(|source| {
        CliError::OpenProfile {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let parse_error = |source: serde_json::Error| CliError::ParseProfile {
        path: path.to_path_buf(),
        source,
    };
    let document: serde_json::Value =
        serde_json::from_reader(BufReader::new(file)).map_err(parse_error)?;
    SearchProfile::default()
        .with_overrides(document)
        .map_err(parse_error)
}

/// Builds a router for the current route invocation.
pub(crate) trait RouterBuilder {
    fn build(&self, config: &HttpRouterConfig) -> Result<Box<dyn Router>, CliError>;
}

pub(crate) struct DefaultRouterBuilder;

impl RouterBuilder for DefaultRouterBuilder {
    fn build(&self, config: &HttpRouterConfig) -> Result<Box<dyn Router>, CliError> {
        let router =
            HttpRouter::with_config(config.clone()).map_err(|source| CliError::BuildRouter {
                base_url: config.base_url.clone(),
                source,
            })?;
        Ok(Box::new(router))
    }
}

pub(crate) fn run_route(args: RouteArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    run_route_with(args, &DefaultRouterBuilder, writer)
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RouterBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_route(&config, builder, writer)
}

pub(crate) fn execute_route(
    config: &RouteConfig,
    builder: &dyn RouterBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let profile = resolve_profile(&config.profile)?;
    let options = RouteOptions::new()
        .geometry_only(config.geometry_only)
        .with_profile(profile);
    let router = builder.build(&config.router_config())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let routes = runtime
        .block_on(router.route(&config.waypoints, &options))
        .map_err(|source| CliError::Route { source })?;
    info!("received {} routes", routes.len());
    write_json(writer, &routes)
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    waypoints: Vec<String>,
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged.with_waypoints(waypoints))
}
