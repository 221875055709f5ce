//! Internal forces along the span
//!
//! Shear and bending moment at a section `x` are built up from the left end:
//! the left reactions, then every load that lies strictly to the left of `x`.
//!
//! ## Sign Convention
//! - Shear starts at `R_A` and drops by each downward load passed
//! - Moment starts at `R_A·x + M_A`
//! - A load located exactly at `x` is not yet counted (`>` comparisons), so
//!   a diagram evaluated at a load position shows the value just left of it
//!
//! ## Example
//! ```rust
//! use calc_core::calculations::beam::BeamSpec;
//! use calc_core::calculations::beam_analysis::InternalForces;
//! use calc_core::calculations::reactions::solve;
//! use calc_core::supports::{BeamType, Support};
//!
//! let spec = BeamSpec::new(10.0, Support::Pin, Support::Roller).with_point_load(10.0, 5.0);
//! let reactions = solve(&spec, BeamType::SimplySupported).unwrap();
//! let forces = InternalForces::new(&spec, &reactions);
//!
//! assert_eq!(forces.shear_at(5.0), 5.0);
//! assert_eq!(forces.shear_at(5.5), -5.0);
//! assert_eq!(forces.moment_at(5.0), 25.0);
//! ```

use super::beam::BeamSpec;
use super::reactions::Reactions;

/// Shear/moment evaluator for one solved beam
#[derive(Debug, Clone, Copy)]
pub struct InternalForces<'a> {
    spec: &'a BeamSpec,
    reactions: &'a Reactions,
}

impl<'a> InternalForces<'a> {
    pub fn new(spec: &'a BeamSpec, reactions: &'a Reactions) -> Self {
        InternalForces { spec, reactions }
    }

    /// Shear force at `x` (kN)
    pub fn shear_at(&self, x_m: f64) -> f64 {
        let s = self.spec;
        let mut v = self.reactions.left_kn;

        if x_m > s.point_location_m {
            v -= s.point_load_kn;
        }

        if x_m > s.dist_end_m() {
            v -= s.dist_resultant_kn();
        } else if x_m > s.dist_start_m {
            v -= s.dist_load_kn_per_m * (x_m - s.dist_start_m);
        }

        v
    }

    /// Bending moment at `x` (kNm)
    pub fn moment_at(&self, x_m: f64) -> f64 {
        let s = self.spec;
        let mut m = self.reactions.left_kn * x_m + self.reactions.left_moment_knm;

        if x_m > s.point_location_m {
            m -= s.point_load_kn * (x_m - s.point_location_m);
        }

        if x_m > s.dist_end_m() {
            // Resultant acting at the centroid
            m -= s.dist_resultant_kn() * (x_m - s.dist_centroid_m());
        } else if x_m > s.dist_start_m {
            let delta = x_m - s.dist_start_m;
            m -= s.dist_load_kn_per_m * delta * (delta / 2.0);
        }

        if x_m > s.moment_location_m {
            m += s.moment_knm;
        }

        m
    }
}
