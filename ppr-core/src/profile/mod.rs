//! Routing-cost profiles forwarded to the PPR service.
//!
//! A [`SearchProfile`] is plain data: the client never interprets it, it only
//! serialises it into the request body. Variants are built from a base
//! profile with struct-update syntax, see [`catalog`].

pub mod catalog;
mod cost;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use catalog::{NamedProfile, ProfileCatalog, ProfileError};
pub use cost::{
    AutomaticDoorCostFactor, CoefficientError, CostCoefficients, CostFactor, CrossingCostFactor,
    DoorCostFactor, RestrictionError, UsageRestriction,
};

/// Complete set of routing costs and limits for one search.
///
/// `Default` yields the catalog's default profile. Plain deserialization
/// fills missing top-level fields from the default profile but zero-fills
/// missing fields inside a cost rule; [`SearchProfile::with_overrides`]
/// merges a partial document at every level instead.
///
/// # Examples
/// ```
/// use ppr_core::profile::{CostFactor, SearchProfile};
///
/// let profile = SearchProfile {
///     walking_speed: 1.2,
///     elevator_cost: CostFactor::duration(90.0),
///     ..SearchProfile::default()
/// };
/// let json = serde_json::to_value(&profile)?;
/// assert_eq!(json["walking_speed"], 1.2);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchProfile {
    /// Walking speed in m/s.
    pub walking_speed: f64,
    /// Maximum route duration in seconds.
    pub duration_limit: f64,
    /// Maximum detour in metres to reach a better primary road crossing.
    pub max_crossing_detour_primary: i32,
    /// Maximum detour in metres for secondary roads.
    pub max_crossing_detour_secondary: i32,
    /// Maximum detour in metres for tertiary roads.
    pub max_crossing_detour_tertiary: i32,
    /// Maximum detour in metres for residential roads.
    pub max_crossing_detour_residential: i32,
    /// Maximum detour in metres for service roads.
    pub max_crossing_detour_service: i32,
    /// Minimum way width in metres.
    pub min_required_width: f64,
    /// Distance rounding applied when comparing routes.
    pub round_distance: f64,
    /// Duration rounding applied when comparing routes.
    pub round_duration: f64,
    /// Accessibility rounding applied when comparing routes.
    pub round_accessibility: f64,
    /// Maximum number of alternative routes, `0` for unlimited.
    pub max_routes: i32,
    /// Duration buckets used to pick alternatives.
    pub divisions_duration: i32,
    /// Accessibility buckets used to pick alternatives.
    pub divisions_accessibility: i32,
    /// Crossings of primary roads.
    pub crossing_primary: CrossingCostFactor,
    /// Crossings of secondary roads.
    pub crossing_secondary: CrossingCostFactor,
    /// Crossings of tertiary roads.
    pub crossing_tertiary: CrossingCostFactor,
    /// Crossings of residential roads.
    pub crossing_residential: CrossingCostFactor,
    /// Crossings of service roads.
    pub crossing_service: CrossingCostFactor,
    /// Railway crossings.
    pub crossing_rail: CostFactor,
    /// Tram track crossings.
    pub crossing_tram: CostFactor,
    /// Stairs going up, per step.
    pub stairs_up_cost: CostFactor,
    /// Stairs going down, per step.
    pub stairs_down_cost: CostFactor,
    /// Stairs with handrail going up.
    pub stairs_with_handrail_up_cost: CostFactor,
    /// Stairs with handrail going down.
    pub stairs_with_handrail_down_cost: CostFactor,
    /// Elevators.
    pub elevator_cost: CostFactor,
    /// Escalators.
    pub escalator_cost: CostFactor,
    /// Moving walkways.
    pub moving_walkway_cost: CostFactor,
    /// Cycle barriers.
    pub cycle_barrier_cost: CostFactor,
    /// Elevation gain in metres.
    pub elevation_up_cost: CostFactor,
    /// Elevation loss in metres.
    pub elevation_down_cost: CostFactor,
    /// Doors by kind.
    pub door: DoorCostFactor,
    /// Automatic doors by opener kind.
    pub automatic_door: AutomaticDoorCostFactor,
}

impl Default for SearchProfile {
    fn default() -> Self {
        let tertiary = CrossingCostFactor::new(
            CostFactor::duration(60.0),
            CostFactor::duration(30.0),
            CostFactor::duration(60.0),
            CostFactor::duration(100.0),
        );
        Self {
            walking_speed: 1.4,
            duration_limit: 3600.0,
            max_crossing_detour_primary: 300,
            max_crossing_detour_secondary: 200,
            max_crossing_detour_tertiary: 200,
            max_crossing_detour_residential: 100,
            max_crossing_detour_service: 0,
            min_required_width: 0.0,
            round_distance: 0.0,
            round_duration: 30.0,
            round_accessibility: 5.0,
            max_routes: 0,
            divisions_duration: 0,
            divisions_accessibility: 0,
            crossing_primary: CrossingCostFactor::new(
                CostFactor::duration(120.0),
                CostFactor::duration(100.0),
                CostFactor::duration(200.0),
                CostFactor::duration(100.0).penalized(200.0, 0.0),
            ),
            crossing_secondary: tertiary,
            crossing_tertiary: tertiary,
            crossing_residential: CrossingCostFactor::new(
                CostFactor::duration(45.0),
                CostFactor::duration(20.0),
                CostFactor::duration(40.0),
                CostFactor::duration(30.0),
            ),
            crossing_service: CrossingCostFactor::default(),
            crossing_rail: CostFactor::duration(60.0),
            crossing_tram: CostFactor::duration(30.0),
            stairs_up_cost: CostFactor::default(),
            stairs_down_cost: CostFactor::default(),
            stairs_with_handrail_up_cost: CostFactor::default(),
            stairs_with_handrail_down_cost: CostFactor::default(),
            elevator_cost: CostFactor::duration(60.0),
            escalator_cost: CostFactor::default(),
            moving_walkway_cost: CostFactor::default(),
            cycle_barrier_cost: CostFactor::default(),
            elevation_up_cost: CostFactor::default(),
            elevation_down_cost: CostFactor::default(),
            door: DoorCostFactor::default(),
            automatic_door: AutomaticDoorCostFactor::default(),
        }
    }
}

impl SearchProfile {
    /// Apply a partial profile document on top of `self`.
    ///
    /// Objects merge key by key at every depth, so
    /// `{"crossing_primary": {"unmarked": {"allowed": "forbidden"}}}` changes
    /// one restriction and keeps every other cost. Any other value,
    /// coefficient lists included, replaces the base value whole.
    ///
    /// # Errors
    ///
    /// Returns the decoder error when the merged document is not a valid
    /// profile, e.g. a string where a number is expected.
    ///
    /// # Examples
    /// ```
    /// use ppr_core::profile::{SearchProfile, UsageRestriction};
    ///
    /// let base = SearchProfile::default();
    /// let profile = base.with_overrides(serde_json::json!({
    ///     "elevator_cost": {"allowed": false}
    /// }))?;
    /// assert_eq!(profile.elevator_cost.allowed, UsageRestriction::Forbidden);
    /// assert_eq!(profile.elevator_cost.duration, base.elevator_cost.duration);
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn with_overrides(&self, overrides: Value) -> Result<Self, serde_json::Error> {
        let mut document = serde_json::to_value(self)?;
        merge_document(&mut document, overrides);
        serde_json::from_value(document)
    }

    /// Ask the service for up to `count` alternatives, split evenly across
    /// the duration and accessibility axes.
    #[must_use]
    pub const fn with_alternatives(mut self, count: i32) -> Self {
        self.max_routes = count;
        self.divisions_duration = count;
        self.divisions_accessibility = count;
        self
    }

    /// Set every crossing-detour limit for the four main road classes.
    #[must_use]
    pub const fn with_crossing_detours(mut self, metres: i32) -> Self {
        self.max_crossing_detour_primary = metres;
        self.max_crossing_detour_secondary = metres;
        self.max_crossing_detour_tertiary = metres;
        self.max_crossing_detour_residential = metres;
        self
    }

    /// Apply `restriction` to all four staircase rules.
    #[must_use]
    pub const fn with_stairs_restriction(mut self, restriction: UsageRestriction) -> Self {
        self.stairs_up_cost.allowed = restriction;
        self.stairs_down_cost.allowed = restriction;
        self.stairs_with_handrail_up_cost.allowed = restriction;
        self.stairs_with_handrail_down_cost.allowed = restriction;
        self
    }
}

fn merge_document(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_document(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
