//! Named default, minimum and maximum values for every design quantity.
//!
//! The same table feeds the core estimators and any front end that builds
//! sliders or spin boxes around the design variables.

// --- Lengths (mm) ---
pub const MIN_BOW_THICKNESS: f64 = 6.0;
pub const MAX_BOW_THICKNESS: f64 = 12.0;
pub const DEFAULT_BOW_THICKNESS: f64 = 8.0;
pub const MIN_GRIP_WIDTH: f64 = 25.0;
pub const MAX_GRIP_WIDTH: f64 = 36.0;
pub const DEFAULT_GRIP_WIDTH: f64 = 34.0;
pub const MIN_PALM_SIZE: f64 = 50.0;
pub const MAX_PALM_SIZE: f64 = 130.0;
pub const DEFAULT_PALM_SIZE: f64 = 90.0;

// --- Relative units ---
pub const MIN_BOW_CURVATURE: f64 = 0.2;
pub const MAX_BOW_CURVATURE: f64 = 0.4;
pub const DEFAULT_BOW_CURVATURE: f64 = 0.3;
pub const MIN_LIMB_STIFFNESS: f64 = 0.3;
pub const MAX_LIMB_STIFFNESS: f64 = 0.9;
pub const DEFAULT_LIMB_STIFFNESS: f64 = 0.6;

// --- Launch speed (m/s) ---
pub const MIN_LAUNCH_SPEED: f64 = 2.0;
pub const MAX_LAUNCH_SPEED: f64 = 7.0;
pub const DEFAULT_LAUNCH_SPEED: f64 = 4.0;

// --- Draw force (N) ---
pub const MIN_DRAW_FORCE: f64 = 3.0;
pub const MAX_DRAW_FORCE: f64 = 29.0;
pub const DEFAULT_DRAW_FORCE: f64 = 8.0;

// --- Cantilever beam model ---
/// Limb tip deflection at full draw (mm).
pub const DEFAULT_DEFLECTION: f64 = 10.5;
/// E (N/mm²) for PLA at 100% infill and 0.20 mm layer height.
pub const DEFAULT_YOUNGS_MODULUS: f64 = 3.700550;
/// Thickness of a single printed beam (mm).
pub const DEFAULT_BEAM_THICKNESS: f64 = 0.6;
/// Height difference between the two ends of a beam (mm).
pub const DEFAULT_HEIGHT_DIFFERENCE_BETWEEN_BEAM_ENDS: f64 = 6.0;
pub const DEFAULT_EMPIRICAL_CORRECTIVE_FACTOR: f64 = 1000.0;

// --- Arrow ---
pub const MIN_ARROW_LENGTH: f64 = 45.0;
pub const MAX_ARROW_LENGTH: f64 = 80.0;
pub const DEFAULT_ARROW_LENGTH: f64 = 60.0;
/// Arrow mass (g).
pub const DEFAULT_ARROW_WEIGHT: f64 = 1.0;
pub const DEFAULT_ARROW_TIP_DIAMETER: f64 = 8.0;
pub const DEFAULT_ARROW_TIP_LENGTH: f64 = 5.0;
/// Distance over which the string pushes the arrow (mm).
pub const DEFAULT_DISTANCE_ARROW_PUSHED: f64 = 1.0;

// --- Slider metadata ---
pub const SLIDER_SCALE: f64 = 10.0;
pub const SINGLE_STEP_DISTANCE: f64 = 0.5;
pub const SINGLE_STEP_STIFFNESS: f64 = 0.05;
pub const SINGLE_STEP_CURVATURE: f64 = 0.01;

/// Standard gravity (m/s²).
pub const GRAVITY: f64 = 9.81;

/// Inclusive range of a single design variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Clamps `value` into the range. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.max(self.min).min(self.max)
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// Search box over the four bow variables, in `BowShape` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterBounds {
    pub thickness: Range,
    pub curvature: Range,
    pub stiffness: Range,
    pub grip_width: Range,
}

impl ParameterBounds {
    /// The full declared range of every variable.
    pub const fn declared() -> Self {
        Self {
            thickness: Range::new(MIN_BOW_THICKNESS, MAX_BOW_THICKNESS),
            curvature: Range::new(MIN_BOW_CURVATURE, MAX_BOW_CURVATURE),
            stiffness: Range::new(MIN_LIMB_STIFFNESS, MAX_LIMB_STIFFNESS),
            grip_width: Range::new(MIN_GRIP_WIDTH, MAX_GRIP_WIDTH),
        }
    }

    pub fn as_array(&self) -> [Range; 4] {
        [self.thickness, self.curvature, self.stiffness, self.grip_width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_lie_within_declared_bounds() {
        let bounds = ParameterBounds::declared();
        assert!(bounds.thickness.contains(DEFAULT_BOW_THICKNESS));
        assert!(bounds.curvature.contains(DEFAULT_BOW_CURVATURE));
        assert!(bounds.stiffness.contains(DEFAULT_LIMB_STIFFNESS));
        assert!(bounds.grip_width.contains(DEFAULT_GRIP_WIDTH));
        assert!((MIN_PALM_SIZE..=MAX_PALM_SIZE).contains(&DEFAULT_PALM_SIZE));
        assert!((MIN_ARROW_LENGTH..=MAX_ARROW_LENGTH).contains(&DEFAULT_ARROW_LENGTH));
    }

    #[test]
    fn range_clamp_handles_out_of_range_and_nan() {
        let range = Range::new(1.0, 2.0);
        assert_eq!(range.clamp(0.5), 1.0);
        assert_eq!(range.clamp(2.5), 2.0);
        assert_eq!(range.clamp(1.5), 1.5);
        assert_eq!(range.clamp(f64::NAN), 1.0);
        assert_eq!(range.clamp(f64::INFINITY), 2.0);
    }
}
