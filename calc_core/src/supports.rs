//! Support labels and beam type classification
//!
//! A beam end is described by a free-text support label (`"Pin"`, `" roller "`,
//! `"FIXED"`, ...). Labels are normalized before comparison, and the pair of
//! end supports decides which set of equilibrium formulas applies.
//!
//! # Example
//! ```
//! use calc_core::supports::{classify, BeamType, Support};
//!
//! let c = classify(&Support::parse("PIN"), &Support::parse(" roller "));
//! assert_eq!(c.beam_type, BeamType::SimplySupported);
//! assert!(!c.fallback);
//! ```

use serde::{Deserialize, Serialize};

/// Support condition at one end of the beam
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Support {
    /// Restrains translation, free to rotate
    Pin,
    /// Restrains vertical translation only
    Roller,
    /// Restrains translation and rotation
    Fixed,
    /// No restraint
    Free,
    /// Any label that is not one of the four above (normalized)
    Other(String),
}

impl Support {
    /// Parse a support label, ignoring case and surrounding whitespace.
    pub fn parse(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        match normalized.as_str() {
            "pin" => Support::Pin,
            "roller" => Support::Roller,
            "fixed" => Support::Fixed,
            "free" => Support::Free,
            _ => Support::Other(normalized),
        }
    }

    /// Normalized label
    pub fn label(&self) -> &str {
        match self {
            Support::Pin => "pin",
            Support::Roller => "roller",
            Support::Fixed => "fixed",
            Support::Free => "free",
            Support::Other(label) => label,
        }
    }

    /// The support assumed at the far end when only this one is given.
    ///
    /// ```
    /// use calc_core::supports::Support;
    /// assert_eq!(Support::Fixed.inferred_opposite(), Support::Free);
    /// assert_eq!(Support::Free.inferred_opposite(), Support::Fixed);
    /// assert_eq!(Support::Pin.inferred_opposite(), Support::Roller);
    /// ```
    pub fn inferred_opposite(&self) -> Support {
        match self {
            Support::Fixed => Support::Free,
            Support::Free => Support::Fixed,
            _ => Support::Roller,
        }
    }
}

impl From<String> for Support {
    fn from(label: String) -> Self {
        Support::parse(&label)
    }
}

impl From<Support> for String {
    fn from(support: Support) -> Self {
        support.label().to_string()
    }
}

impl std::fmt::Display for Support {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Which formula set a beam is solved with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeamType {
    SimplySupported,
    Cantilever,
    /// Support pair could not be resolved; the beam cannot be solved
    Unknown,
}

impl BeamType {
    /// Snake-case name used in output records
    pub fn label(&self) -> &'static str {
        match self {
            BeamType::SimplySupported => "simply_supported",
            BeamType::Cantilever => "cantilever",
            BeamType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for BeamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Beam end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum End {
    Left,
    Right,
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub beam_type: BeamType,
    /// The pair was not a canonical combination and was treated as simply
    /// supported because neither end is free. Callers surface this as a warning.
    pub fallback: bool,
}

/// Classify an (unordered) pair of end supports.
///
/// - {pin, roller} → simply supported
/// - {fixed, free} → cantilever
/// - any other pair with no free end → simply supported, `fallback = true`
/// - anything else → unknown
pub fn classify(left: &Support, right: &Support) -> Classification {
    use Support::*;

    let beam_type = match (left, right) {
        (Pin, Roller) | (Roller, Pin) => BeamType::SimplySupported,
        (Fixed, Free) | (Free, Fixed) => BeamType::Cantilever,
        (l, r) if *l != Free && *r != Free => {
            return Classification {
                beam_type: BeamType::SimplySupported,
                fallback: true,
            };
        }
        _ => BeamType::Unknown,
    };

    Classification {
        beam_type,
        fallback: false,
    }
}

/// Classify two raw labels. Shorthand for parsing both and calling [`classify`].
pub fn classify_labels(left: &str, right: &str) -> Classification {
    classify(&Support::parse(left), &Support::parse(right))
}

/// The fixed end of a cantilever, if exactly one end is fixed.
pub fn fixed_end(left: &Support, right: &Support) -> Option<End> {
    match (left, right) {
        (Support::Fixed, r) if *r != Support::Fixed => Some(End::Left),
        (l, Support::Fixed) if *l != Support::Fixed => Some(End::Right),
        _ => None,
    }
}
