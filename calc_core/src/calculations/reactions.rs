//! Support reactions from static equilibrium
//!
//! ## Simply supported (pin/roller)
//!
//! Moment equilibrium about the left support:
//!
//! ```text
//! ΣM_A = P·a + W·c + M0
//! R_B  = ΣM_A / L
//! R_A  = (P + W) - R_B
//! ```
//!
//! where `W = w·extent` acts at the centroid `c = start + extent/2`.
//!
//! ## Cantilever (fixed/free)
//!
//! The fixed end carries the whole vertical load and a fixed-end moment equal
//! to the load moments taken about that end. The free end carries nothing.
//!
//! The applied moment `M0` is added to the moment sum as given, without a
//! rotational sign.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::supports::{fixed_end, BeamType, End};

use super::beam::BeamSpec;
use super::round_output;

/// Support reactions, rounded to output precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reactions {
    pub beam_type: BeamType,
    /// Vertical reaction at the left end (kN), positive upward
    pub left_kn: f64,
    /// Vertical reaction at the right end (kN), positive upward
    pub right_kn: f64,
    /// Fixed-end moment at the left end (kNm)
    pub left_moment_knm: f64,
    /// Fixed-end moment at the right end (kNm)
    pub right_moment_knm: f64,
}

impl Reactions {
    /// The fixed-end moment, whichever end carries it (0 when neither does)
    pub fn fixed_moment_knm(&self) -> f64 {
        if self.left_moment_knm != 0.0 {
            self.left_moment_knm
        } else {
            self.right_moment_knm
        }
    }

    /// Sum of the two vertical reactions (kN)
    pub fn total_kn(&self) -> f64 {
        self.left_kn + self.right_kn
    }
}

/// Solve the reactions of a classified beam.
///
/// # Errors
///
/// * `UnresolvedSupports` - `beam_type` is [`BeamType::Unknown`]
/// * `CalculationFailed` - a cantilever without exactly one fixed end
pub fn solve(spec: &BeamSpec, beam_type: BeamType) -> CalcResult<Reactions> {
    match beam_type {
        BeamType::SimplySupported => Ok(solve_simply_supported(spec)),
        BeamType::Cantilever => solve_cantilever(spec),
        BeamType::Unknown => Err(CalcError::unresolved_supports(
            spec.left_support.label(),
            spec.right_support.label(),
        )),
    }
}

/// Load moments about the left support: P·a + W·c + M0
fn moment_about_left(spec: &BeamSpec) -> f64 {
    spec.point_load_kn * spec.point_location_m
        + spec.dist_resultant_kn() * spec.dist_centroid_m()
        + spec.moment_knm
}

/// Load moments about the right support: P·(L-a) + W·(L-c) + M0
fn moment_about_right(spec: &BeamSpec) -> f64 {
    let l = spec.length_m;
    spec.point_load_kn * (l - spec.point_location_m)
        + spec.dist_resultant_kn() * (l - spec.dist_centroid_m())
        + spec.moment_knm
}

fn solve_simply_supported(spec: &BeamSpec) -> Reactions {
    let right = moment_about_left(spec) / spec.length_m;
    let left = spec.total_vertical_load_kn() - right;

    Reactions {
        beam_type: BeamType::SimplySupported,
        left_kn: round_output(left),
        right_kn: round_output(right),
        left_moment_knm: 0.0,
        right_moment_knm: 0.0,
    }
}

fn solve_cantilever(spec: &BeamSpec) -> CalcResult<Reactions> {
    let total = round_output(spec.total_vertical_load_kn());

    match fixed_end(&spec.left_support, &spec.right_support) {
        Some(End::Left) => Ok(Reactions {
            beam_type: BeamType::Cantilever,
            left_kn: total,
            right_kn: 0.0,
            left_moment_knm: round_output(moment_about_left(spec)),
            right_moment_knm: 0.0,
        }),
        Some(End::Right) => Ok(Reactions {
            beam_type: BeamType::Cantilever,
            left_kn: 0.0,
            right_kn: total,
            left_moment_knm: 0.0,
            right_moment_knm: round_output(moment_about_right(spec)),
        }),
        None => Err(CalcError::calculation_failed(
            "cantilever reactions",
            format!(
                "no single fixed end between '{}' and '{}'",
                spec.left_support, spec.right_support
            ),
        )),
    }
}
