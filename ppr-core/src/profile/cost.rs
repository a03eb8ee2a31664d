//! Cost rules attached to individual path features.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether the router may use a feature at all.
///
/// Decodes from the names below, from the strings `"true"`/`"false"`, and
/// from JSON booleans. Always encodes as a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "RestrictionValue")]
pub enum UsageRestriction {
    /// The feature is used at its plain cost.
    #[default]
    Allowed,
    /// The feature is used, but its flat penalties apply.
    Penalized,
    /// The feature is never used.
    Forbidden,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RestrictionValue {
    Flag(bool),
    Name(String),
}

impl TryFrom<RestrictionValue> for UsageRestriction {
    type Error = RestrictionError;

    fn try_from(value: RestrictionValue) -> Result<Self, Self::Error> {
        match value {
            RestrictionValue::Flag(true) => Ok(Self::Allowed),
            RestrictionValue::Flag(false) => Ok(Self::Forbidden),
            RestrictionValue::Name(name) => match name.as_str() {
                "allowed" | "true" => Ok(Self::Allowed),
                "penalized" => Ok(Self::Penalized),
                "forbidden" | "false" => Ok(Self::Forbidden),
                _ => Err(RestrictionError(name)),
            },
        }
    }
}

/// An `allowed` value that names no usage restriction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown usage restriction {0:?}, expected allowed, penalized or forbidden")]
pub struct RestrictionError(pub String);

/// Errors raised while decoding a coefficient list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoefficientError {
    /// More than three coefficients were supplied.
    #[error("cost curves take at most 3 coefficients, got {0}")]
    TooMany(usize),
}

/// A quadratic cost curve `c0 + c1 * x + c2 * x^2`.
///
/// On the wire the curve is a list of up to three numbers. Shorter lists are
/// zero-padded, which is how the routing service reads them.
///
/// # Examples
/// ```
/// use ppr_core::profile::CostCoefficients;
///
/// let curve: CostCoefficients = serde_json::from_str("[100]")?;
/// assert_eq!(curve, CostCoefficients::constant(100.0));
/// assert_eq!(serde_json::to_string(&curve)?, "[100.0,0.0,0.0]");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 3]")]
pub struct CostCoefficients {
    /// Constant term.
    pub c0: f64,
    /// Linear term.
    pub c1: f64,
    /// Quadratic term.
    pub c2: f64,
}

impl CostCoefficients {
    /// The all-zero curve.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Construct a curve from its three terms.
    #[must_use]
    pub const fn new(c0: f64, c1: f64, c2: f64) -> Self {
        Self { c0, c1, c2 }
    }

    /// A curve with only a constant term.
    #[must_use]
    pub const fn constant(c0: f64) -> Self {
        Self::new(c0, 0.0, 0.0)
    }

    /// A curve with a constant and a linear term.
    #[must_use]
    pub const fn linear(c0: f64, c1: f64) -> Self {
        Self::new(c0, c1, 0.0)
    }
}

impl TryFrom<Vec<f64>> for CostCoefficients {
    type Error = CoefficientError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [] => Ok(Self::ZERO),
            [c0] => Ok(Self::constant(*c0)),
            [c0, c1] => Ok(Self::linear(*c0, *c1)),
            [c0, c1, c2] => Ok(Self::new(*c0, *c1, *c2)),
            _ => Err(CoefficientError::TooMany(values.len())),
        }
    }
}

impl From<CostCoefficients> for [f64; 3] {
    fn from(value: CostCoefficients) -> Self {
        [value.c0, value.c1, value.c2]
    }
}

/// Duration and accessibility costs for one feature.
///
/// Missing fields decode to zero costs and [`UsageRestriction::Allowed`].
/// Use [`SearchProfile::with_overrides`](super::SearchProfile::with_overrides)
/// to keep a base profile's values instead.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostFactor {
    /// Extra duration in seconds.
    pub duration: CostCoefficients,
    /// Accessibility cost.
    pub accessibility: CostCoefficients,
    /// Whether the feature may be used.
    pub allowed: UsageRestriction,
    /// Flat duration penalty applied when the feature is penalized.
    pub duration_penalty: f64,
    /// Flat accessibility penalty applied when the feature is penalized.
    pub accessibility_penalty: f64,
}

impl CostFactor {
    /// An allowed feature with the given curves and no penalties.
    #[must_use]
    pub const fn new(duration: CostCoefficients, accessibility: CostCoefficients) -> Self {
        Self {
            duration,
            accessibility,
            allowed: UsageRestriction::Allowed,
            duration_penalty: 0.0,
            accessibility_penalty: 0.0,
        }
    }

    /// An allowed feature costing a constant number of seconds.
    #[must_use]
    pub const fn duration(seconds: f64) -> Self {
        Self::new(CostCoefficients::constant(seconds), CostCoefficients::ZERO)
    }

    /// An allowed feature with only an accessibility curve.
    #[must_use]
    pub const fn accessibility(curve: CostCoefficients) -> Self {
        Self::new(CostCoefficients::ZERO, curve)
    }

    /// Replace the usage restriction.
    #[must_use]
    pub const fn with_allowed(mut self, allowed: UsageRestriction) -> Self {
        self.allowed = allowed;
        self
    }

    /// Mark the feature penalized with the given flat penalties.
    #[must_use]
    pub const fn penalized(mut self, duration_penalty: f64, accessibility_penalty: f64) -> Self {
        self.allowed = UsageRestriction::Penalized;
        self.duration_penalty = duration_penalty;
        self.accessibility_penalty = accessibility_penalty;
        self
    }

    /// Mark the feature forbidden.
    #[must_use]
    pub const fn forbidden(self) -> Self {
        self.with_allowed(UsageRestriction::Forbidden)
    }
}

/// Crossing costs by crossing kind, for one road class.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CrossingCostFactor {
    /// Crossings controlled by traffic signals.
    pub signals: CostFactor,
    /// Marked crossings such as zebra crossings.
    pub marked: CostFactor,
    /// Crossings with a traffic island.
    pub island: CostFactor,
    /// Unmarked crossings.
    pub unmarked: CostFactor,
}

impl CrossingCostFactor {
    /// Build a road class from its four crossing kinds.
    #[must_use]
    pub const fn new(
        signals: CostFactor,
        marked: CostFactor,
        island: CostFactor,
        unmarked: CostFactor,
    ) -> Self {
        Self {
            signals,
            marked,
            island,
            unmarked,
        }
    }

    /// Use the same rule for every crossing kind.
    #[must_use]
    pub const fn uniform(factor: CostFactor) -> Self {
        Self::new(factor, factor, factor, factor)
    }

    /// Replace the rule for unmarked crossings.
    #[must_use]
    pub const fn with_unmarked(mut self, unmarked: CostFactor) -> Self {
        self.unmarked = unmarked;
        self
    }
}

/// Door costs by door kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorCostFactor {
    /// Door of unspecified kind.
    pub yes: CostFactor,
    /// Doorway without a door.
    pub no: CostFactor,
    /// Hinged door.
    pub hinged: CostFactor,
    /// Sliding door.
    pub sliding: CostFactor,
    /// Revolving door.
    pub revolving: CostFactor,
    /// Folding door.
    pub folding: CostFactor,
    /// Trapdoor.
    pub trapdoor: CostFactor,
    /// Overhead door.
    pub overhead: CostFactor,
}

/// Costs by automatic door opener kind.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutomaticDoorCostFactor {
    /// Automatic door of unspecified kind.
    pub yes: CostFactor,
    /// Manual door.
    pub no: CostFactor,
    /// Opens on button press.
    pub button: CostFactor,
    /// Opens on motion sensor.
    pub motion: CostFactor,
    /// Opens on floor sensor.
    pub floor: CostFactor,
    /// Permanently moving, e.g. a revolving door.
    pub continuous: CostFactor,
    /// Slows down on button press.
    pub slowdown_button: CostFactor,
}
