use crate::core::constants::DEFAULT_PALM_SIZE;
use crate::core::error::{NumericError, check_denominator};
use crate::core::models::params::DesignParameters;
use crate::core::models::profile::UserClass;
use serde::Serialize;

const GRIP_WEIGHT: f64 = 0.4;
const THICKNESS_WEIGHT: f64 = 0.3;
const STIFFNESS_WEIGHT: f64 = 0.2;
const CURVATURE_WEIGHT: f64 = 0.1;

/// Per-aspect comfort sub-scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComfortBreakdown {
    pub grip: f64,
    pub thickness: f64,
    pub stiffness: f64,
    pub curvature: f64,
}

impl ComfortBreakdown {
    pub fn evaluate(
        params: &DesignParameters,
        class: UserClass,
        palm_size: f64,
    ) -> Result<Self, NumericError> {
        let profile = class.profile();
        let ideal_grip = check_denominator(ideal_grip_width(class, palm_size), "ideal grip width")?;

        Ok(Self {
            grip: sub_score(1.0 - (params.grip_width - ideal_grip).abs() / ideal_grip),
            thickness: sub_score(
                1.0 - (params.bow_thickness - profile.bow_thickness).abs() / profile.bow_thickness,
            ),
            // Only a heavier-than-target draw is uncomfortable.
            stiffness: sub_score(
                1.0 - (params.limb_stiffness - profile.limb_stiffness).max(0.0)
                    / profile.limb_stiffness,
            ),
            curvature: sub_score(
                1.0 - (params.bow_curvature - profile.bow_curvature).abs() / profile.bow_curvature,
            ),
        })
    }

    pub fn total(&self) -> f64 {
        GRIP_WEIGHT * self.grip
            + THICKNESS_WEIGHT * self.thickness
            + STIFFNESS_WEIGHT * self.stiffness
            + CURVATURE_WEIGHT * self.curvature
    }
}

/// Grip width (mm) the profile recommends for a hand of `palm_size` mm.
pub fn ideal_grip_width(class: UserClass, palm_size: f64) -> f64 {
    let profile = class.profile();
    profile.grip_width * (palm_size / DEFAULT_PALM_SIZE) * profile.grip_size_factor
}

#[inline]
fn sub_score(fraction: f64) -> f64 {
    (100.0 * fraction).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn adult_defaults_at_reference_palm_are_fully_comfortable() {
        let breakdown =
            ComfortBreakdown::evaluate(&DesignParameters::default(), UserClass::Adult, 90.0)
                .unwrap();
        assert!(f64_approx_equal(breakdown.total(), 100.0));
    }

    #[test]
    fn softer_than_target_limb_costs_no_comfort() {
        let params = DesignParameters {
            limb_stiffness: 0.3,
            ..DesignParameters::default()
        };
        let breakdown = ComfortBreakdown::evaluate(&params, UserClass::Adult, 90.0).unwrap();
        assert!(f64_approx_equal(breakdown.stiffness, 100.0));
    }

    #[test]
    fn sub_scores_never_go_negative() {
        let params = DesignParameters {
            bow_thickness: 40.0,
            bow_curvature: 2.0,
            limb_stiffness: 5.0,
            grip_width: 200.0,
            ..DesignParameters::default()
        };
        let breakdown = ComfortBreakdown::evaluate(&params, UserClass::Child, 90.0).unwrap();
        assert_eq!(breakdown.total(), 0.0);
    }

    #[test]
    fn ideal_grip_scales_with_palm_and_profile() {
        assert!(f64_approx_equal(ideal_grip_width(UserClass::Adult, 90.0), 34.0));
        assert!(f64_approx_equal(
            ideal_grip_width(UserClass::Child, 45.0),
            36.0 * 0.5 * 1.2
        ));
    }

    #[test]
    fn zero_palm_is_a_numeric_fault() {
        let err = ComfortBreakdown::evaluate(&DesignParameters::default(), UserClass::Adult, 0.0)
            .unwrap_err();
        assert_eq!(err.quantity, "ideal grip width");
    }
}
