use crate::core::constants::{
    DEFAULT_ARROW_TIP_DIAMETER, DEFAULT_ARROW_WEIGHT, DEFAULT_BOW_THICKNESS, DEFAULT_GRIP_WIDTH,
    DEFAULT_LIMB_STIFFNESS, Range,
};
use crate::core::models::profile::UserClass;

pub const TIP_DIAMETER_RANGE: Range = Range::new(4.0, 12.0);

#[inline]
fn weight_class_factor(class: UserClass) -> f64 {
    match class {
        UserClass::Child => 0.8,
        UserClass::Adult => 1.0,
        UserClass::Professional => 1.2,
    }
}

#[inline]
fn tip_class_factor(class: UserClass) -> f64 {
    match class {
        UserClass::Child => 1.3,
        UserClass::Adult => 1.0,
        UserClass::Professional => 0.8,
    }
}

#[inline]
fn clamp_base_space(class: UserClass) -> f64 {
    match class {
        UserClass::Child => 4.0,
        UserClass::Adult => 3.5,
        UserClass::Professional => 3.0,
    }
}

/// Arrow mass (g) that balances the limb, rounded to two decimals.
pub fn optimal_arrow_weight(stiffness: f64, thickness: f64, class: UserClass) -> f64 {
    let raw = DEFAULT_ARROW_WEIGHT
        * (1.0 + (stiffness - DEFAULT_LIMB_STIFFNESS) * 0.5)
        * (1.0 + (thickness - DEFAULT_BOW_THICKNESS) * 0.05)
        * weight_class_factor(class);
    (raw * 100.0).round() / 100.0
}

/// Tip diameter (mm), always within [`TIP_DIAMETER_RANGE`].
///
/// Stiffer limbs get a finer tip and wider grips a blunter one. Non-finite
/// inputs land on the nearest bound.
pub fn optimal_tip_diameter(stiffness: f64, grip_width: f64, class: UserClass) -> f64 {
    let raw = DEFAULT_ARROW_TIP_DIAMETER
        * (1.0 - (stiffness - DEFAULT_LIMB_STIFFNESS) * 0.3)
        * (1.0 + (grip_width - DEFAULT_GRIP_WIDTH) * 0.01)
        * tip_class_factor(class);
    if raw.is_nan() {
        // NaN has no side; pick the safer, blunter tip.
        return TIP_DIAMETER_RANGE.max;
    }
    TIP_DIAMETER_RANGE.clamp(raw)
}

/// Clearance (mm) the top clamp needs above the limb. Advisory only.
pub fn estimate_top_clamp_space(
    thickness: f64,
    curvature: f64,
    stiffness: f64,
    class: UserClass,
) -> f64 {
    clamp_base_space(class) + 0.5 * thickness - 4.0 * curvature + 2.0 * stiffness
}
