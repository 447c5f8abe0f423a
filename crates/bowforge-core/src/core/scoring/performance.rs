use super::comfort::ComfortBreakdown;
use crate::core::constants::{DEFAULT_ARROW_TIP_DIAMETER, DEFAULT_ARROW_WEIGHT, GRAVITY};
use crate::core::error::{NumericError, check_denominator};
use crate::core::models::params::DesignParameters;
use crate::core::models::profile::UserClass;
use crate::core::physics::{estimate_draw_force, estimate_launch_speed};
use serde::Serialize;

/// Grip width per millimetre of palm that feels neutral in the hand.
const NEUTRAL_GRIP_PER_PALM: f64 = 0.27;
const STABLE_GRIP_RATIO: (f64, f64) = (0.8, 1.2);
const UNSTABLE_GRIP_PENALTY: f64 = 0.9;
const LAUNCH_ANGLE_DEG: f64 = 45.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceResult {
    /// m/s
    pub launch_speed: f64,
    /// N
    pub draw_force: f64,
    /// Relative flight distance.
    pub flight_distance: f64,
    pub accuracy_score: f64,
    pub comfort_score: f64,
    pub safety_score: f64,
    pub performance_score: f64,
}

#[derive(Debug, Clone, Copy)]
struct SafetyReference {
    /// Launch speed above which safety drops (m/s).
    speed_threshold: f64,
    /// Tip diameter considered fully safe (mm).
    reference_tip: f64,
}

impl SafetyReference {
    fn for_class(class: UserClass) -> Self {
        match class {
            UserClass::Child => Self {
                speed_threshold: 2.5,
                reference_tip: 10.0,
            },
            UserClass::Adult | UserClass::Professional => Self {
                speed_threshold: 4.0,
                reference_tip: 8.0,
            },
        }
    }
}

/// Builds the scorecard for `params` as used by `class` with a `palm_size` mm hand.
///
/// The four scores are clamped to [0, 100]; the overall score is blended from the
/// unclamped sub-scores and clamped last.
pub fn simulate(
    params: &DesignParameters,
    class: UserClass,
    palm_size: f64,
) -> Result<PerformanceResult, NumericError> {
    let launch_speed = estimate_launch_speed(
        params.bow_thickness,
        params.bow_curvature,
        params.limb_stiffness,
        params.grip_width,
    )?;
    let draw_force = estimate_draw_force(
        params.bow_thickness,
        params.bow_curvature,
        params.limb_stiffness,
        params.grip_width,
    )?;

    let base_distance =
        launch_speed.powi(2) * (2.0 * LAUNCH_ANGLE_DEG).to_radians().sin() / GRAVITY;
    let weight_factor =
        DEFAULT_ARROW_WEIGHT / check_denominator(params.arrow_weight, "arrow weight")?;
    let tip_factor =
        DEFAULT_ARROW_TIP_DIAMETER / check_denominator(params.tip_diameter, "tip diameter")?;

    let neutral_grip = check_denominator(palm_size * NEUTRAL_GRIP_PER_PALM, "palm size")?;
    let grip_ratio = params.grip_width / neutral_grip;
    let stability = if grip_ratio < STABLE_GRIP_RATIO.0 || grip_ratio > STABLE_GRIP_RATIO.1 {
        UNSTABLE_GRIP_PENALTY
    } else {
        1.0
    };
    let flight_distance = base_distance * weight_factor * tip_factor * stability;

    let grip_accuracy = (1.0 - (grip_ratio - 1.0).abs() * 0.5).max(0.5);
    let accuracy = (70.0 + params.limb_stiffness * 20.0) * grip_accuracy;

    let comfort = ComfortBreakdown::evaluate(params, class, palm_size)?.total();

    let safety_ref = SafetyReference::for_class(class);
    let safety = (100.0 - ((launch_speed - safety_ref.speed_threshold) * 20.0).max(0.0))
        * (params.tip_diameter / safety_ref.reference_tip);

    let performance = match class {
        UserClass::Child => accuracy * 0.2 + comfort * 0.3 + safety * 0.5,
        UserClass::Professional => {
            accuracy * 0.5
                + comfort * 0.2
                + safety * 0.1
                + (flight_distance * 10.0).min(100.0) * 0.2
        }
        UserClass::Adult => {
            accuracy * 0.3
                + comfort * 0.3
                + safety * 0.2
                + (flight_distance * 12.0).min(100.0) * 0.2
        }
    };

    Ok(PerformanceResult {
        launch_speed,
        draw_force,
        flight_distance,
        accuracy_score: score(accuracy),
        comfort_score: score(comfort),
        safety_score: score(safety),
        performance_score: score(performance),
    })
}

#[inline]
fn score(raw: f64) -> f64 {
    raw.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn in_score_range(result: &PerformanceResult) -> bool {
        [
            result.accuracy_score,
            result.comfort_score,
            result.safety_score,
            result.performance_score,
        ]
        .iter()
        .all(|s| (0.0..=100.0).contains(s))
    }

    #[test]
    fn flight_distance_follows_ballistic_range_at_defaults() {
        // 34 / (90 * 0.27) = 1.399..., outside the stable band.
        let params = DesignParameters::default();
        let result = simulate(&params, UserClass::Adult, 90.0).unwrap();
        let expected = result.launch_speed.powi(2) / GRAVITY * 0.9;
        assert!(f64_approx_equal(result.flight_distance, expected));
    }

    #[test]
    fn stable_grip_removes_distance_penalty() {
        // 90 * 0.27 = 24.3 mm is a neutral grip.
        let params = DesignParameters {
            grip_width: 24.3,
            ..DesignParameters::default()
        };
        let result = simulate(&params, UserClass::Adult, 90.0).unwrap();
        let expected = result.launch_speed.powi(2) / GRAVITY;
        assert!(f64_approx_equal(result.flight_distance, expected));
        assert!(f64_approx_equal(result.accuracy_score, 70.0 + 0.6 * 20.0));
    }

    #[test]
    fn accuracy_degrades_with_grip_mismatch_down_to_half() {
        let params = DesignParameters {
            grip_width: 500.0,
            ..DesignParameters::default()
        };
        let result = simulate(&params, UserClass::Adult, 90.0).unwrap();
        assert!(f64_approx_equal(result.accuracy_score, (70.0 + 12.0) * 0.5));
    }

    #[test]
    fn child_safety_uses_lower_speed_threshold() {
        let params = DesignParameters::default();
        let child = simulate(&params, UserClass::Child, 90.0).unwrap();
        let adult = simulate(&params, UserClass::Adult, 90.0).unwrap();
        assert!(child.safety_score < adult.safety_score);
    }

    #[test]
    fn scores_are_clamped_for_extreme_designs() {
        let params = DesignParameters {
            bow_thickness: 12.0,
            grip_width: 25.0,
            tip_diameter: 40.0,
            arrow_weight: 0.1,
            ..DesignParameters::default()
        };
        for class in UserClass::ALL {
            let result = simulate(&params, class, 50.0).unwrap();
            assert!(in_score_range(&result));
        }
    }

    #[test]
    fn zero_arrow_weight_is_a_numeric_fault() {
        let params = DesignParameters {
            arrow_weight: 0.0,
            ..DesignParameters::default()
        };
        let err = simulate(&params, UserClass::Adult, 90.0).unwrap_err();
        assert_eq!(err.quantity, "arrow weight");
    }
}
