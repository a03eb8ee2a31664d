//! Command-line interface for the PPR pedestrian routing client.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod profiles;
mod route;

pub use error::CliError;

use profiles::{ProfileArgs, run_profile, run_profiles};
use route::{RouteArgs, run_route};

const ARG_WAYPOINTS: &str = "waypoints";
const ARG_SERVICE_URL: &str = "service-url";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_PROFILE: &str = "profile";
const ARG_PROFILE_FILE: &str = "profile-file";
const ARG_GEOMETRY_ONLY: &str = "geometry-only";
const ARG_PARAM: &str = "param";

/// Run the PPR CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Profiles => run_profiles(&mut stdout),
        Command::Profile(args) => run_profile(&args, &mut stdout),
        Command::Route(args) => run_route(args, &mut stdout),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "ppr",
    about = "Request pedestrian routes from a PPR routing service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the standard search profiles.
    Profiles,
    /// Print one search profile as JSON.
    Profile(ProfileArgs),
    /// Route through two or more waypoints.
    Route(RouteArgs),
}

#[cfg(test)]
mod tests;
