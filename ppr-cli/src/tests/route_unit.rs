//! Focused unit tests covering route CLI configuration and execution.

use std::time::Duration;

use super::helpers::{StubRouterBuilder, utf8_tempdir, write_utf8};
use super::*;
use crate::route::{
    ProfileSource, RouteArgs, RouteConfig, config_from_layers_for_test, execute_route,
    load_profile, parse_waypoint, resolve_profile,
};
use ppr_core::profile::{ProfileError, UsageRestriction, catalog};
use ppr_core::{LatLng, Route, RouteError, SearchProfile, Waypoint};
use rstest::rstest;

fn two_waypoints() -> Vec<String> {
    vec!["49.87,8.65".to_owned(), "49.88,8.66".to_owned()]
}

fn args_with_waypoints(waypoints: &[&str]) -> RouteArgs {
    RouteArgs {
        waypoints: waypoints.iter().map(|wp| (*wp).to_owned()).collect(),
        ..RouteArgs::default()
    }
}

#[rstest]
#[case("49.87,8.65", LatLng::new(49.87, 8.65))]
#[case(" -33.9 , 151.2 ", LatLng::new(-33.9, 151.2))]
#[case("0,0", LatLng::new(0.0, 0.0))]
fn parse_waypoint_accepts_lat_lng_pairs(#[case] value: &str, #[case] expected: LatLng) {
    let waypoint = parse_waypoint(value).expect("waypoint should parse");
    assert_eq!(waypoint, Waypoint::new(expected));
}

#[rstest]
#[case("49.87")]
#[case("north,8.65")]
#[case("49.87,east")]
#[case("91,0")]
#[case("0,181")]
fn parse_waypoint_rejects_malformed_values(#[case] value: &str) {
    let err = parse_waypoint(value).expect_err("waypoint should fail");
    assert!(
        matches!(&err, CliError::InvalidWaypoint { value: got, .. } if got == value),
        "expected InvalidWaypoint, found {err:?}"
    );
}

#[rstest]
fn converting_without_waypoints_errors() {
    let err = RouteConfig::try_from(RouteArgs::default()).expect_err("missing waypoints");
    assert!(
        matches!(
            err,
            CliError::MissingWaypoints {
                field: ARG_WAYPOINTS
            }
        ),
        "expected MissingWaypoints, found {err:?}"
    );
}

#[rstest]
fn converting_single_waypoint_errors() {
    let err = RouteConfig::try_from(args_with_waypoints(&["49.87,8.65"]))
        .expect_err("one waypoint is not a route");
    assert!(matches!(err, CliError::TooFewWaypoints { count: 1 }));
}

#[rstest]
fn converting_applies_client_defaults() {
    let config = RouteConfig::try_from(args_with_waypoints(&["49.87,8.65", "49.88,8.66"]))
        .expect("config should build");

    assert_eq!(config.waypoints.len(), 2);
    assert_eq!(config.service_url, "http://localhost:9042/");
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert_eq!(config.profile, ProfileSource::Default);
    assert!(!config.geometry_only);
    assert!(config.params.is_empty());
}

#[rstest]
fn converting_rejects_two_profile_sources() {
    let args = RouteArgs {
        profile: Some("simple".to_owned()),
        profile_file: Some("profile.json".into()),
        ..args_with_waypoints(&["49.87,8.65", "49.88,8.66"])
    };
    let err = RouteConfig::try_from(args).expect_err("conflicting profiles");
    assert!(matches!(err, CliError::ConflictingProfiles { .. }));
}

#[rstest]
#[case("lang")]
#[case("=de")]
fn converting_rejects_malformed_params(#[case] param: &str) {
    let args = RouteArgs {
        params: vec![param.to_owned()],
        ..args_with_waypoints(&["49.87,8.65", "49.88,8.66"])
    };
    let err = RouteConfig::try_from(args).expect_err("malformed param");
    assert!(matches!(err, CliError::InvalidParameter { .. }));
}

#[rstest]
fn router_config_carries_url_timeout_and_params() {
    let args = RouteArgs {
        service_url: Some("http://ppr.example.com/".to_owned()),
        timeout_secs: Some(5),
        params: vec!["lang=de".to_owned(), "debug=".to_owned()],
        ..args_with_waypoints(&["49.87,8.65", "49.88,8.66"])
    };
    let config = RouteConfig::try_from(args).expect("config should build");

    let client = config.router_config();
    assert_eq!(client.base_url, "http://ppr.example.com/");
    assert_eq!(client.timeout, Duration::from_secs(5));
    assert_eq!(
        client.request_parameters,
        vec![
            ("lang".to_owned(), "de".to_owned()),
            ("debug".to_owned(), String::new()),
        ]
    );
}

#[rstest]
fn resolve_profile_uses_catalog_entries() {
    let profile = resolve_profile(&ProfileSource::Catalog("accessibility2".to_owned()))
        .expect("catalog profile");
    assert_eq!(profile, catalog::accessibility2());
    assert_eq!(profile.stairs_up_cost.allowed, UsageRestriction::Forbidden);
}

#[rstest]
fn resolve_profile_reports_unknown_keys() {
    let err = resolve_profile(&ProfileSource::Catalog("wheelchair".to_owned()))
        .expect_err("unknown key");
    assert!(matches!(
        err,
        CliError::Profile(ProfileError::UnknownProfile { .. })
    ));
}

#[rstest]
fn load_profile_decodes_partial_json() {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("profile.json");
    write_utf8(&path, br#"{"walking_speed": 0.8, "max_routes": 3}"#);

    let profile = load_profile(&path).expect("profile should load");

    assert!((profile.walking_speed - 0.8).abs() < f64::EPSILON);
    assert_eq!(profile.max_routes, 3);
    assert_eq!(profile.round_duration, SearchProfile::default().round_duration);
}

#[rstest]
fn load_profile_keeps_default_costs_beside_nested_overrides() {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("profile.json");
    write_utf8(
        &path,
        br#"{"crossing_primary": {"unmarked": {"allowed": "forbidden"}},
            "elevator_cost": {"allowed": false}}"#,
    );

    let profile = load_profile(&path).expect("profile should load");

    let defaults = SearchProfile::default();
    assert_eq!(
        profile.crossing_primary.unmarked.allowed,
        UsageRestriction::Forbidden
    );
    assert_eq!(
        profile.crossing_primary.unmarked.duration,
        defaults.crossing_primary.unmarked.duration
    );
    assert_eq!(
        profile.crossing_primary.signals,
        defaults.crossing_primary.signals
    );
    assert_eq!(profile.elevator_cost.allowed, UsageRestriction::Forbidden);
    assert_eq!(profile.elevator_cost.duration, defaults.elevator_cost.duration);
}

#[rstest]
fn load_profile_reports_mistyped_fields() {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("profile.json");
    write_utf8(&path, br#"{"walking_speed": "brisk"}"#);

    let err = load_profile(&path).expect_err("mistyped field");
    assert!(matches!(err, CliError::ParseProfile { path: got, .. } if got == path));
}

#[rstest]
fn load_profile_reports_invalid_json() {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("profile.json");
    write_utf8(&path, b"{ not valid json");

    let err = load_profile(&path).expect_err("invalid JSON");
    assert!(matches!(err, CliError::ParseProfile { path: got, .. } if got == path));
}

#[rstest]
fn load_profile_reports_missing_file() {
    let (_tmp, root) = utf8_tempdir();
    let path = root.join("missing.json");

    let err = load_profile(&path).expect_err("missing file");
    assert!(matches!(err, CliError::OpenProfile { .. }));
}

#[rstest]
fn execute_route_prints_routes_as_json() {
    let config = RouteConfig::try_from(RouteArgs {
        profile: Some("elevation".to_owned()),
        geometry_only: Some(true),
        ..args_with_waypoints(&["2,1", "4,3"])
    })
    .expect("config should build");
    let builder = StubRouterBuilder::straight_line();
    let mut out = Vec::new();

    execute_route(&config, &builder, &mut out).expect("route should succeed");

    let routes: Vec<Route> = serde_json::from_slice(&out).expect("output should be JSON");
    assert_eq!(routes.len(), 1);
    assert_eq!(
        routes[0].waypoints,
        [LatLng::new(2.0, 1.0), LatLng::new(4.0, 3.0)]
    );
    let seen = builder.seen.borrow();
    let client = seen.as_ref().expect("router should be built");
    assert_eq!(client.base_url, "http://localhost:9042/");
}

#[rstest]
fn execute_route_surfaces_routing_errors() {
    let config = RouteConfig::try_from(args_with_waypoints(&["2,1", "4,3"]))
        .expect("config should build");
    let builder = StubRouterBuilder::failing(RouteError::Service {
        message: "No route found.".to_owned(),
    });
    let mut out = Vec::new();

    let err = execute_route(&config, &builder, &mut out).expect_err("route should fail");

    assert!(
        matches!(&err, CliError::Route { source } if source.status() == 1),
        "expected Route error, found {err:?}"
    );
    assert_eq!(
        err.to_string(),
        "routing failed (status 1): No route found."
    );
    assert!(out.is_empty());
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "timeout_secs": "soon" }));

    let err = config_from_layers_for_test(Vec::new(), composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    assert!(
        matches!(err, CliError::Configuration(_)),
        "expected Configuration, found {err:?}"
    );
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "service_url": "http://from-file:9042/",
            "timeout_secs": 10,
            "profile": "simple",
        }),
        None,
    );
    composer.push_environment(json!({
        "timeout_secs": 20,
    }));
    composer.push_cli(json!({
        "profile": "elevation",
    }));

    let config = config_from_layers_for_test(two_waypoints(), composer.layers())
        .expect("merged config should build");
    assert_eq!(config.service_url, "http://from-file:9042/");
    assert_eq!(config.timeout, Duration::from_secs(20));
    assert_eq!(config.profile, ProfileSource::Catalog("elevation".to_owned()));
    assert_eq!(config.waypoints.len(), 2);
}

#[rstest]
fn merge_layers_ignore_waypoints_from_other_layers() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "waypoints": ["0,0"] }), None);
    composer.push_environment(json!({ "waypoints": ["1,1", "2,2"] }));
    composer.push_cli(json!({ "waypoints": [] }));

    let config = config_from_layers_for_test(two_waypoints(), composer.layers())
        .expect("merged config should build");
    assert_eq!(
        config.waypoints,
        vec![
            Waypoint::new(LatLng::new(49.87, 8.65)),
            Waypoint::new(LatLng::new(49.88, 8.66)),
        ]
    );
}

#[rstest]
fn merge_layers_without_cli_waypoints_report_missing() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_environment(json!({ "waypoints": ["1,1", "2,2"] }));

    let err = config_from_layers_for_test(Vec::new(), composer.layers())
        .expect_err("layered waypoints are not used");
    assert!(matches!(err, CliError::MissingWaypoints { .. }));
}

#[rstest]
#[case::file(true, None, true)]
#[case::cli_enables(false, Some(true), true)]
#[case::cli_disables(true, Some(false), false)]
#[case::unset(false, None, false)]
fn merge_layers_honour_geometry_only_precedence(
    #[case] from_file: bool,
    #[case] from_cli: Option<bool>,
    #[case] expected: bool,
) {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(json!({ "geometry_only": from_file }), None);
    if let Some(flag) = from_cli {
        composer.push_cli(json!({ "geometry_only": flag }));
    }

    let config = config_from_layers_for_test(two_waypoints(), composer.layers())
        .expect("merged config should build");
    assert_eq!(config.geometry_only, expected);
}

#[rstest]
#[case(&["ppr", "route", "49.87,8.65", "49.88,8.66"], None)]
#[case(&["ppr", "route", "--geometry-only", "49.87,8.65", "49.88,8.66"], Some(true))]
#[case(&["ppr", "route", "49.87,8.65", "49.88,8.66", "--geometry-only=false"], Some(false))]
fn geometry_only_flag_is_unset_unless_given(
    #[case] argv: &[&str],
    #[case] expected: Option<bool>,
) {
    let cli = Cli::try_parse_from(argv.iter().copied()).expect("should parse");
    let Command::Route(args) = cli.command else {
        unreachable!("route subcommand expected");
    };
    assert_eq!(args.geometry_only, expected);
    assert_eq!(args.waypoints.len(), 2);
}
