//! The fixed catalog of named search profiles offered to users.
//!
//! Each profile is a builder function deriving from a base profile, so the
//! inheritance chain is visible in code:
//!
//! ```text
//! default ─┬─ accessibility1 ── accessibility2 ─┬─ accessibility2_max3
//!          │                                    └─ accessibility2_max5
//!          ├─ elevation
//!          └─ no_crossing_detours ── simple
//! ```

use thiserror::Error;

use super::{CostCoefficients, CostFactor, CrossingCostFactor, SearchProfile, UsageRestriction};

/// Errors from [`ProfileCatalog`] lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    /// No catalog entry uses the key.
    #[error("unknown profile {key:?}")]
    UnknownProfile {
        /// The key that was requested.
        key: String,
    },
}

/// A catalog entry: stable key, display name and profile.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedProfile {
    /// Stable identifier used on the command line and in config files.
    pub key: &'static str,
    /// Human-readable name shown to users.
    pub name: &'static str,
    /// The profile itself.
    pub profile: SearchProfile,
}

/// Ordered list of the profiles users can choose from.
///
/// # Examples
/// ```
/// use ppr_core::profile::ProfileCatalog;
///
/// let catalog = ProfileCatalog::standard();
/// let names: Vec<_> = catalog.iter().map(|entry| entry.name).collect();
/// assert_eq!(names.first(), Some(&"Default"));
/// assert_eq!(catalog.get("accessibility2")?.name, "No stairs");
/// # Ok::<(), ppr_core::profile::ProfileError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCatalog {
    entries: Vec<NamedProfile>,
}

impl ProfileCatalog {
    /// The six profiles shown in the profile picker, in display order.
    #[must_use]
    pub fn standard() -> Self {
        let entries = vec![
            NamedProfile {
                key: "default",
                name: "Default",
                profile: default_profile(),
            },
            NamedProfile {
                key: "accessibility1",
                name: "Include accessible routes",
                profile: accessibility1(),
            },
            NamedProfile {
                key: "accessibility2",
                name: "No stairs",
                profile: accessibility2(),
            },
            NamedProfile {
                key: "elevation",
                name: "Prefer less incline",
                profile: elevation(),
            },
            NamedProfile {
                key: "no-crossing-detours",
                name: "No preference for pedestrian lights",
                profile: no_crossing_detours(),
            },
            NamedProfile {
                key: "simple",
                name: "Shortest path",
                profile: simple(),
            },
        ];
        Self { entries }
    }

    /// Iterate over the entries in display order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedProfile> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look an entry up by key.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::UnknownProfile`] when no entry uses `key`.
    pub fn get(&self, key: &str) -> Result<&NamedProfile, ProfileError> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .ok_or_else(|| ProfileError::UnknownProfile {
                key: key.to_owned(),
            })
    }
}

impl Default for ProfileCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a ProfileCatalog {
    type Item = &'a NamedProfile;
    type IntoIter = std::slice::Iter<'a, NamedProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// The baseline profile.
#[must_use]
pub fn default_profile() -> SearchProfile {
    SearchProfile::default()
}

/// Penalise unmarked crossings and charge accessibility for stairs, rails
/// and climbs.
#[must_use]
pub fn accessibility1() -> SearchProfile {
    let base = default_profile();
    let unmarked = CostFactor::duration(100.0).penalized(200.0, 0.0);
    SearchProfile {
        crossing_primary: base.crossing_primary.with_unmarked(unmarked),
        crossing_secondary: base.crossing_secondary.with_unmarked(unmarked),
        crossing_tertiary: base.crossing_tertiary.with_unmarked(unmarked),
        crossing_rail: CostFactor::new(
            CostCoefficients::constant(60.0),
            CostCoefficients::constant(10.0),
        ),
        crossing_tram: CostFactor::new(
            CostCoefficients::constant(30.0),
            CostCoefficients::constant(5.0),
        ),
        stairs_up_cost: CostFactor::accessibility(CostCoefficients::linear(10.0, 2.0)),
        stairs_down_cost: CostFactor::accessibility(CostCoefficients::linear(10.0, 1.0)),
        stairs_with_handrail_up_cost: CostFactor::accessibility(CostCoefficients::linear(8.0, 2.0)),
        stairs_with_handrail_down_cost: CostFactor::accessibility(CostCoefficients::linear(
            8.0, 1.0,
        )),
        elevation_up_cost: CostFactor::accessibility(CostCoefficients::linear(0.0, 1.0)),
        ..base
    }
}

/// Like [`accessibility1`], but stairs and escalators are forbidden and
/// climbs cost more.
#[must_use]
pub fn accessibility2() -> SearchProfile {
    let base = accessibility1();
    SearchProfile {
        escalator_cost: CostFactor::accessibility(CostCoefficients::ZERO).forbidden(),
        elevation_up_cost: CostFactor::accessibility(CostCoefficients::linear(0.0, 3.0)),
        elevation_down_cost: CostFactor::accessibility(CostCoefficients::linear(0.0, 1.0)),
        ..base
    }
    .with_stairs_restriction(UsageRestriction::Forbidden)
}

/// [`accessibility2`] returning up to three alternatives.
#[must_use]
pub fn accessibility2_max3() -> SearchProfile {
    accessibility2().with_alternatives(3)
}

/// [`accessibility2`] returning up to five alternatives.
#[must_use]
pub fn accessibility2_max5() -> SearchProfile {
    accessibility2().with_alternatives(5)
}

/// Charge accessibility for elevation changes.
#[must_use]
pub fn elevation() -> SearchProfile {
    SearchProfile {
        elevation_up_cost: CostFactor::accessibility(CostCoefficients::linear(0.0, 2.0)),
        elevation_down_cost: CostFactor::accessibility(CostCoefficients::linear(0.0, 1.0)),
        ..default_profile()
    }
}

/// Never detour to reach a signalised or marked crossing.
#[must_use]
pub fn no_crossing_detours() -> SearchProfile {
    default_profile().with_crossing_detours(0)
}

/// Plain shortest path: no detours and free crossings and elevators.
#[must_use]
pub fn simple() -> SearchProfile {
    let free = CrossingCostFactor::uniform(CostFactor::duration(0.0));
    SearchProfile {
        crossing_primary: free,
        crossing_secondary: free,
        crossing_tertiary: free,
        crossing_residential: free,
        crossing_rail: CostFactor::duration(0.0),
        crossing_tram: CostFactor::duration(0.0),
        elevator_cost: CostFactor::duration(0.0),
        ..no_crossing_detours()
    }
}
