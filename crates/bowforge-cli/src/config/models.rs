use bowforge::core::models::params::BowShape;
use bowforge::core::models::profile::{SpeedPreference, UserClass};
use bowforge::engine::config::OptimizationConfig;
use bowforge::engine::objective::PerformanceTarget;
use std::path::PathBuf;

/// Command-line values that only the `optimize` subcommand carries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOverrides {
    pub target_speed: Option<f64>,
    pub target_force: Option<f64>,
    pub lock_speed: bool,
    pub lock_force: bool,
    pub max_iterations: Option<usize>,
    pub seed: Option<u64>,
}

/// Bow variables to force after the profile has been applied.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShapeOverrides {
    pub thickness: Option<f64>,
    pub curvature: Option<f64>,
    pub stiffness: Option<f64>,
    pub grip_width: Option<f64>,
}

impl ShapeOverrides {
    pub fn is_empty(&self) -> bool {
        self.thickness.is_none()
            && self.curvature.is_none()
            && self.stiffness.is_none()
            && self.grip_width.is_none()
    }

    pub fn apply_to(&self, base: BowShape) -> BowShape {
        BowShape {
            thickness: self.thickness.unwrap_or(base.thickness),
            curvature: self.curvature.unwrap_or(base.curvature),
            stiffness: self.stiffness.unwrap_or(base.stiffness),
            grip_width: self.grip_width.unwrap_or(base.grip_width),
        }
    }
}

/// The fully resolved settings for one command run.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub profile: UserClass,
    pub palm_size: Option<f64>,
    pub preferred_speed: Option<SpeedPreference>,
    pub shape_overrides: ShapeOverrides,
    pub optimization: OptimizationConfig,
    pub target: PerformanceTarget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_leave_the_shape_alone() {
        let base = BowShape::new(8.0, 0.3, 0.6, 34.0);
        let overrides = ShapeOverrides::default();
        assert!(overrides.is_empty());
        assert_eq!(overrides.apply_to(base), base);
    }

    #[test]
    fn overrides_replace_only_the_named_variables() {
        let base = BowShape::new(8.0, 0.3, 0.6, 34.0);
        let overrides = ShapeOverrides {
            thickness: Some(10.0),
            grip_width: Some(30.0),
            ..Default::default()
        };
        assert!(!overrides.is_empty());
        assert_eq!(
            overrides.apply_to(base),
            BowShape::new(10.0, 0.3, 0.6, 30.0)
        );
    }
}
