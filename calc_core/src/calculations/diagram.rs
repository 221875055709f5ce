//! Shear and moment diagrams sampled at equally spaced positions

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::supports::BeamType;

use super::beam::BeamSpec;
use super::beam_analysis::InternalForces;
use super::reactions::Reactions;
use super::round_output;

/// Default number of sample positions along the span
pub const DEFAULT_NUM_POINTS: usize = 100;

/// Internal forces at one sampled position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForceSample {
    pub position_m: f64,
    pub shear_kn: f64,
    pub moment_knm: f64,
}

/// Sampled diagrams of one beam with their extreme values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramResult {
    pub beam_type: BeamType,
    pub reactions: Reactions,
    /// Samples ordered from the left end to the right end
    pub samples: Vec<ForceSample>,
    /// Largest |V| over the samples (kN)
    pub max_abs_shear_kn: f64,
    /// Position of the first sample reaching `max_abs_shear_kn` (m)
    pub max_shear_position_m: f64,
    /// Largest |M| over the samples (kNm)
    pub max_abs_moment_knm: f64,
    /// Position of the first sample reaching `max_abs_moment_knm` (m)
    pub max_moment_position_m: f64,
}

impl DiagramResult {
    /// Sample positions (m)
    pub fn positions(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.position_m).collect()
    }

    /// Shear values in sample order (kN)
    pub fn shears(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.shear_kn).collect()
    }

    /// Moment values in sample order (kNm)
    pub fn moments(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.moment_knm).collect()
    }
}

/// `num_points` equally spaced positions from 0 to `length_m`, both ends included.
///
/// ```
/// use calc_core::calculations::diagram::sample_positions;
/// assert_eq!(sample_positions(4.0, 5).unwrap(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn sample_positions(length_m: f64, num_points: usize) -> CalcResult<Vec<f64>> {
    if num_points < 2 {
        return Err(CalcError::invalid_input(
            "num_points",
            num_points.to_string(),
            "At least two sample points are needed to cover both ends",
        ));
    }

    let last = num_points - 1;
    let positions = (0..num_points)
        .map(|i| {
            if i == last {
                length_m
            } else {
                length_m * i as f64 / last as f64
            }
        })
        .collect();

    Ok(positions)
}

/// Evaluate the diagrams of a solved beam at `num_points` positions.
///
/// Every position, shear and moment is rounded to output precision; the
/// maxima are taken over the rounded values.
pub fn sample(spec: &BeamSpec, reactions: &Reactions, num_points: usize) -> CalcResult<DiagramResult> {
    let forces = InternalForces::new(spec, reactions);

    let samples: Vec<ForceSample> = sample_positions(spec.length_m, num_points)?
        .into_iter()
        .map(|x| ForceSample {
            position_m: round_output(x),
            shear_kn: round_output(forces.shear_at(x)),
            moment_knm: round_output(forces.moment_at(x)),
        })
        .collect();

    let mut max_shear = 0.0f64;
    let mut max_shear_pos = 0.0;
    let mut max_moment = 0.0f64;
    let mut max_moment_pos = 0.0;

    for s in &samples {
        if s.shear_kn.abs() > max_shear {
            max_shear = s.shear_kn.abs();
            max_shear_pos = s.position_m;
        }
        if s.moment_knm.abs() > max_moment {
            max_moment = s.moment_knm.abs();
            max_moment_pos = s.position_m;
        }
    }

    if samples
        .iter()
        .any(|s| !s.position_m.is_finite() || !s.shear_kn.is_finite() || !s.moment_knm.is_finite())
    {
        return Err(CalcError::calculation_failed(
            "diagram sampling",
            "non-finite internal force",
        ));
    }

    Ok(DiagramResult {
        beam_type: reactions.beam_type,
        reactions: *reactions,
        samples,
        max_abs_shear_kn: max_shear,
        max_shear_position_m: max_shear_pos,
        max_abs_moment_knm: max_moment,
        max_moment_position_m: max_moment_pos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::reactions::solve;
    use crate::supports::Support;

    fn diagram(spec: &BeamSpec, beam_type: BeamType, num_points: usize) -> DiagramResult {
        let reactions = solve(spec, beam_type).unwrap();
        sample(spec, &reactions, num_points).unwrap()
    }

    #[test]
    fn test_positions_cover_span() {
        let positions = sample_positions(7.3, DEFAULT_NUM_POINTS).unwrap();
        assert_eq!(positions.len(), DEFAULT_NUM_POINTS);
        assert_eq!(positions[0], 0.0);
        assert_eq!(*positions.last().unwrap(), 7.3);
        assert!(positions.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_too_few_points() {
        assert!(sample_positions(5.0, 1).is_err());
        assert!(sample_positions(5.0, 0).is_err());
    }

    #[test]
    fn test_midspan_point_load_default_points() {
        // With 100 points midspan falls between samples 49 and 50
        let spec = BeamSpec::new(10.0, Support::Pin, Support::Roller).with_point_load(10.0, 5.0);
        let d = diagram(&spec, BeamType::SimplySupported, DEFAULT_NUM_POINTS);

        assert_eq!(d.samples.len(), 100);
        assert_eq!(d.max_abs_shear_kn, 5.0);
        assert_eq!(d.max_abs_moment_knm, 24.747);
    }

    #[test]
    fn test_midspan_point_load_odd_points() {
        let spec = BeamSpec::new(10.0, Support::Pin, Support::Roller).with_point_load(10.0, 5.0);
        let d = diagram(&spec, BeamType::SimplySupported, 101);

        assert_eq!(d.max_abs_moment_knm, 25.0);
        assert_eq!(d.max_moment_position_m, 5.0);
        assert_eq!(d.max_shear_position_m, 0.0);
    }

    #[test]
    fn test_values_are_rounded() {
        let spec = BeamSpec::new(3.0, Support::Pin, Support::Roller).with_point_load(10.0, 1.0);
        let d = diagram(&spec, BeamType::SimplySupported, 7);
        for s in &d.samples {
            assert_eq!(s.shear_kn, round_output(s.shear_kn));
            assert_eq!(s.moment_knm, round_output(s.moment_knm));
            assert_eq!(s.position_m, round_output(s.position_m));
        }
    }

    #[test]
    fn test_accessors_match_samples() {
        let spec = BeamSpec::new(4.0, Support::Fixed, Support::Free).with_point_load(8.0, 4.0);
        let d = diagram(&spec, BeamType::Cantilever, 5);

        assert_eq!(d.positions(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(d.shears(), vec![8.0; 5]);
        assert_eq!(d.moments(), vec![32.0, 40.0, 48.0, 56.0, 64.0]);
    }

    #[test]
    fn test_very_long_span_keeps_finite_positions() {
        let spec = BeamSpec::new(1e306, Support::Pin, Support::Roller);
        let d = diagram(&spec, BeamType::SimplySupported, 5);

        let positions = d.positions();
        assert!(positions.iter().all(|x| x.is_finite()));
        assert_eq!(positions[0], 0.0);
        assert_eq!(positions[4], 1e306);
        assert!(positions.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_short_span_positions_never_decrease() {
        // Steps below a thousandth collapse under rounding; order is kept
        let spec = BeamSpec::new(0.05, Support::Pin, Support::Roller);
        let positions = diagram(&spec, BeamType::SimplySupported, DEFAULT_NUM_POINTS).positions();

        assert_eq!(positions.len(), DEFAULT_NUM_POINTS);
        assert_eq!(positions[0], 0.0);
        assert_eq!(*positions.last().unwrap(), 0.05);
        assert!(positions.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_sampling_is_deterministic() {
        let spec = BeamSpec::new(5.0, Support::Pin, Support::Roller).with_distributed_load(1.5, 1.0, 3.0);
        let a = diagram(&spec, BeamType::SimplySupported, 50);
        let b = diagram(&spec, BeamType::SimplySupported, 50);
        assert_eq!(a, b);
    }
}
