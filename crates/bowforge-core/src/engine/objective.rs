use super::error::EngineError;
use crate::core::constants::{DEFAULT_GRIP_WIDTH, DEFAULT_PALM_SIZE, ParameterBounds, Range};
use crate::core::error::check_denominator;
use crate::core::models::params::BowShape;
use crate::core::models::profile::UserClass;
use crate::core::physics::{estimate_draw_force, estimate_launch_speed};
use crate::core::scoring::comfort::ideal_grip_width;

/// Penalty multiplier for a squared error on a locked target.
pub const LOCKED_TARGET_WEIGHT: f64 = 100.0;
const GRIP_COMFORT_WEIGHT: f64 = 2.0;
const SPEED_LIMIT_PENALTY: f64 = 5.0;
const FORCE_LIMIT_PENALTY: f64 = 3.0;

/// Squared-deviation weights of the profile-fit cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitWeights {
    pub thickness: f64,
    pub curvature: f64,
    pub stiffness: f64,
    /// Scales the speed and force limit penalties.
    pub safety: f64,
}

impl FitWeights {
    pub fn for_class(class: UserClass) -> Self {
        match class {
            UserClass::Child => Self {
                thickness: 1.0,
                curvature: 0.8,
                stiffness: 0.6,
                safety: 3.0,
            },
            UserClass::Adult => Self {
                thickness: 1.0,
                curvature: 1.0,
                stiffness: 1.0,
                safety: 1.5,
            },
            UserClass::Professional => Self {
                thickness: 0.8,
                curvature: 1.5,
                stiffness: 2.0,
                safety: 1.0,
            },
        }
    }
}

/// Search box of the profile-fit mode.
pub fn profile_bounds(class: UserClass) -> ParameterBounds {
    match class {
        UserClass::Child => ParameterBounds {
            thickness: Range::new(6.0, 7.0),
            curvature: Range::new(0.2, 0.3),
            stiffness: Range::new(0.3, 0.5),
            grip_width: Range::new(30.0, 36.0),
        },
        UserClass::Adult => ParameterBounds {
            thickness: Range::new(7.0, 9.0),
            curvature: Range::new(0.25, 0.35),
            stiffness: Range::new(0.5, 0.7),
            grip_width: Range::new(28.0, 36.0),
        },
        UserClass::Professional => ParameterBounds {
            thickness: Range::new(9.0, 12.0),
            curvature: Range::new(0.3, 0.4),
            stiffness: Range::new(0.7, 0.9),
            grip_width: Range::new(25.0, 34.0),
        },
    }
}

/// Distance of `shape` from the class targets plus limit and grip penalties.
pub fn profile_fit_cost(
    shape: &BowShape,
    class: UserClass,
    palm_size: f64,
) -> Result<f64, EngineError> {
    let profile = class.profile();
    let weights = FitWeights::for_class(class);
    let BowShape {
        thickness,
        curvature,
        stiffness,
        grip_width,
    } = *shape;

    let mut cost = weights.thickness * (thickness - profile.bow_thickness).powi(2)
        + weights.curvature * (curvature - profile.bow_curvature).powi(2)
        + weights.stiffness * (stiffness - profile.limb_stiffness).powi(2);

    let speed = estimate_launch_speed(thickness, curvature, stiffness, grip_width)?;
    if speed > profile.max_launch_speed {
        cost += weights.safety * SPEED_LIMIT_PENALTY * (speed - profile.max_launch_speed).powi(2);
    }
    let force = estimate_draw_force(thickness, curvature, stiffness, grip_width)?;
    if force > profile.max_draw_force {
        cost += weights.safety * FORCE_LIMIT_PENALTY * (force - profile.max_draw_force).powi(2);
    }

    cost += GRIP_COMFORT_WEIGHT * (grip_width - ideal_grip_width(class, palm_size)).abs();
    Ok(cost)
}

/// Targets of the performance mode. A locked target dominates the cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerformanceTarget {
    pub speed: f64,
    pub force: f64,
    pub lock_speed: bool,
    pub lock_force: bool,
}

impl PerformanceTarget {
    fn speed_weight(&self) -> f64 {
        if self.lock_speed { LOCKED_TARGET_WEIGHT } else { 1.0 }
    }

    fn force_weight(&self) -> f64 {
        if self.lock_force { LOCKED_TARGET_WEIGHT } else { 1.0 }
    }
}

/// Squared misses on the speed and force targets plus a relative grip term.
pub fn performance_cost(
    shape: &BowShape,
    target: &PerformanceTarget,
    palm_size: f64,
) -> Result<f64, EngineError> {
    let BowShape {
        thickness,
        curvature,
        stiffness,
        grip_width,
    } = *shape;
    let speed = estimate_launch_speed(thickness, curvature, stiffness, grip_width)?;
    let force = estimate_draw_force(thickness, curvature, stiffness, grip_width)?;
    let ideal_grip = check_denominator(
        DEFAULT_GRIP_WIDTH * palm_size / DEFAULT_PALM_SIZE,
        "ideal grip width",
    )?;

    Ok((speed - target.speed).powi(2) * target.speed_weight()
        + (force - target.force).powi(2) * target.force_weight()
        + GRIP_COMFORT_WEIGHT * ((grip_width - ideal_grip) / ideal_grip).powi(2))
}
