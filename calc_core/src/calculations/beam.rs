//! # Single-Span Beam
//!
//! Input definition and entry point for analysing one beam carrying at most
//! one point load, one uniformly distributed load and one applied moment.
//!
//! ## Conventions
//!
//! - Units: kN, m, kN/m, kNm
//! - Every location is measured from the left support
//! - Loads are positive downward; reactions are positive upward
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::beam::{calculate, BeamSpec};
//! use calc_core::supports::Support;
//!
//! // 10 m pin/roller beam with 10 kN at midspan
//! let spec = BeamSpec::new(10.0, Support::Pin, Support::Roller).with_point_load(10.0, 5.0);
//!
//! let result = calculate(&spec, 101).unwrap();
//! assert_eq!(result.reactions.left_kn, 5.0);
//! assert_eq!(result.reactions.right_kn, 5.0);
//! assert_eq!(result.max_abs_moment_knm, 25.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::supports::{classify, BeamType, Support};

use super::diagram::{sample, DiagramResult};
use super::reactions::solve;

/// Slack allowed when checking that loads sit on the span
const LOCATION_TOLERANCE_M: f64 = 1e-9;

/// Parameters of one beam.
///
/// ## JSON Example
///
/// ```json
/// {
///   "length_m": 6.0,
///   "left_support": "pin",
///   "right_support": "roller",
///   "point_load_kn": 0.0,
///   "point_location_m": 0.0,
///   "dist_load_kn_per_m": 2.0,
///   "dist_extent_m": 6.0,
///   "dist_start_m": 0.0,
///   "moment_knm": 0.0,
///   "moment_location_m": 0.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamSpec {
    /// Span between the two ends (m)
    pub length_m: f64,

    pub left_support: Support,
    pub right_support: Support,

    /// Point load magnitude (kN)
    pub point_load_kn: f64,
    /// Point load position from the left support (m)
    pub point_location_m: f64,

    /// Distributed load intensity (kN/m)
    pub dist_load_kn_per_m: f64,
    /// Loaded length (m)
    pub dist_extent_m: f64,
    /// Start of the loaded length from the left support (m)
    pub dist_start_m: f64,

    /// Applied point moment (kNm)
    pub moment_knm: f64,
    /// Position of the applied moment from the left support (m)
    pub moment_location_m: f64,
}

impl BeamSpec {
    /// Unloaded beam with the given supports
    pub fn new(length_m: f64, left_support: Support, right_support: Support) -> Self {
        BeamSpec {
            length_m,
            left_support,
            right_support,
            point_load_kn: 0.0,
            point_location_m: 0.0,
            dist_load_kn_per_m: 0.0,
            dist_extent_m: 0.0,
            dist_start_m: 0.0,
            moment_knm: 0.0,
            moment_location_m: 0.0,
        }
    }

    /// Set the point load and return self (builder pattern)
    pub fn with_point_load(mut self, load_kn: f64, location_m: f64) -> Self {
        self.point_load_kn = load_kn;
        self.point_location_m = location_m;
        self
    }

    /// Set the distributed load and return self (builder pattern)
    pub fn with_distributed_load(mut self, load_kn_per_m: f64, start_m: f64, extent_m: f64) -> Self {
        self.dist_load_kn_per_m = load_kn_per_m;
        self.dist_start_m = start_m;
        self.dist_extent_m = extent_m;
        self
    }

    /// Set the applied moment and return self (builder pattern)
    pub fn with_moment(mut self, moment_knm: f64, location_m: f64) -> Self {
        self.moment_knm = moment_knm;
        self.moment_location_m = location_m;
        self
    }

    /// Resultant of the distributed load W = w * extent (kN)
    pub fn dist_resultant_kn(&self) -> f64 {
        self.dist_load_kn_per_m * self.dist_extent_m
    }

    /// Position of the distributed load resultant (m from left)
    pub fn dist_centroid_m(&self) -> f64 {
        self.dist_start_m + self.dist_extent_m / 2.0
    }

    /// End of the loaded length (m from left)
    pub fn dist_end_m(&self) -> f64 {
        self.dist_start_m + self.dist_extent_m
    }

    /// Sum of all vertical loads P + W (kN)
    pub fn total_vertical_load_kn(&self) -> f64 {
        self.point_load_kn + self.dist_resultant_kn()
    }

    /// Validate geometry and magnitudes.
    pub fn validate(&self) -> CalcResult<()> {
        let finite = [
            ("length", self.length_m),
            ("point_load", self.point_load_kn),
            ("point_location", self.point_location_m),
            ("dist_load", self.dist_load_kn_per_m),
            ("dist_extent", self.dist_extent_m),
            ("dist_start", self.dist_start_m),
            ("moment_load", self.moment_knm),
            ("moment_location", self.moment_location_m),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"));
            }
        }

        if self.length_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "length",
                self.length_m.to_string(),
                "Length must be positive",
            ));
        }

        let on_span = [
            ("point_location", self.point_location_m),
            ("dist_start", self.dist_start_m),
            ("moment_location", self.moment_location_m),
        ];
        for (field, value) in on_span {
            if value < -LOCATION_TOLERANCE_M || value > self.length_m + LOCATION_TOLERANCE_M {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    format!("Location must lie within [0, {}]", self.length_m),
                ));
            }
        }

        if self.dist_extent_m < 0.0 {
            return Err(CalcError::invalid_input(
                "dist_extent",
                self.dist_extent_m.to_string(),
                "Extent cannot be negative",
            ));
        }
        if self.dist_end_m() > self.length_m + LOCATION_TOLERANCE_M {
            return Err(CalcError::invalid_input(
                "dist_extent",
                self.dist_extent_m.to_string(),
                format!(
                    "Distributed load ends at {} m, beyond the {} m span",
                    self.dist_end_m(),
                    self.length_m
                ),
            ));
        }

        Ok(())
    }
}

/// Analyse a beam: classify its supports, solve reactions and sample the
/// shear and moment diagrams at `num_points` positions.
///
/// # Returns
///
/// * `Ok(DiagramResult)` - reactions, samples and maxima
/// * `Err(CalcError::UnresolvedSupports)` - supports are not a solvable pair
/// * `Err(CalcError::InvalidInput)` - geometry or `num_points` is invalid
pub fn calculate(spec: &BeamSpec, num_points: usize) -> CalcResult<DiagramResult> {
    let classification = classify(&spec.left_support, &spec.right_support);
    calculate_classified(spec, classification.beam_type, num_points)
}

/// Same as [`calculate`] for a beam whose supports were already classified.
pub fn calculate_classified(spec: &BeamSpec, beam_type: BeamType, num_points: usize) -> CalcResult<DiagramResult> {
    if beam_type == BeamType::Unknown {
        return Err(CalcError::unresolved_supports(
            spec.left_support.label(),
            spec.right_support.label(),
        ));
    }

    spec.validate()?;
    let reactions = solve(spec, beam_type)?;
    sample(spec, &reactions, num_points)
}
