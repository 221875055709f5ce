//! # Beam Statics Calculations
//!
//! The calculation pipeline for one beam, leaf to root:
//!
//! - [`beam`] - `BeamSpec` input, validation and the `calculate` entry point
//! - [`reactions`] - support reactions and fixed-end moments from equilibrium
//! - [`beam_analysis`] - shear and bending moment at any position
//! - [`diagram`] - equally spaced sampling of the diagrams and their maxima
//!
//! Every function here is pure: same input, same output, nothing retained
//! between beams.

pub mod beam;
pub mod beam_analysis;
pub mod diagram;
pub mod reactions;

// Re-export commonly used types
pub use beam::{calculate, calculate_classified, BeamSpec};
pub use beam_analysis::InternalForces;
pub use diagram::{sample, DiagramResult, ForceSample, DEFAULT_NUM_POINTS};
pub use reactions::{solve, Reactions};

/// Decimal places kept in every reported value
pub const DECIMALS: i32 = 3;

/// Round to [`DECIMALS`] places, half away from zero.
///
/// Negative zero is folded into `0.0` so it never shows up as `-0` in output.
/// Values too large to scale are returned unchanged; they carry no digits
/// below a thousandth anyway.
///
/// ```
/// use calc_core::calculations::round_output;
/// assert_eq!(round_output(1.23456), 1.235);
/// assert_eq!(round_output(-0.0001), 0.0);
/// assert_eq!(round_output(1e306), 1e306);
/// ```
pub fn round_output(value: f64) -> f64 {
    let factor = 10f64.powi(DECIMALS);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_output() {
        assert_eq!(round_output(2.0), 2.0);
        assert_eq!(round_output(24.74747), 24.747);
        assert_eq!(round_output(-3.33333), -3.333);
        assert!(round_output(-0.0).is_sign_positive());
    }

    #[test]
    fn test_round_output_huge_values_stay_finite() {
        for value in [1e306, -1e306, f64::MAX, f64::MIN] {
            assert_eq!(round_output(value), value);
        }
        assert!(round_output(f64::INFINITY).is_infinite());
        assert!(round_output(f64::NAN).is_nan());
    }

    #[test]
    fn test_round_output_ties_away_from_zero() {
        // 1.0625 is exact in binary, so this is a true tie
        assert_eq!(round_output(1.0625), 1.063);
        assert_eq!(round_output(-1.0625), -1.063);
        assert_eq!(round_output(0.1875), 0.188);
    }
}
