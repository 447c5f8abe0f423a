use crate::core::constants::{
    DEFAULT_ARROW_WEIGHT, DEFAULT_BEAM_THICKNESS, DEFAULT_DEFLECTION,
    DEFAULT_DISTANCE_ARROW_PUSHED, DEFAULT_EMPIRICAL_CORRECTIVE_FACTOR,
    DEFAULT_HEIGHT_DIFFERENCE_BETWEEN_BEAM_ENDS, DEFAULT_YOUNGS_MODULUS,
};
use crate::core::error::{NumericError, check_denominator};

/// Number of parallel beams making up one limb.
const BEAM_COUNT: f64 = 60.0;

/// Effective beam length (mm): the hypotenuse of the grip span and the end offset.
#[inline]
fn beam_length(grip_width: f64) -> f64 {
    (grip_width * grip_width
        + DEFAULT_HEIGHT_DIFFERENCE_BETWEEN_BEAM_ENDS * DEFAULT_HEIGHT_DIFFERENCE_BETWEEN_BEAM_ENDS)
        .sqrt()
}

/// Draw force (N) from the cantilever deflection formula `F = 3·δ·E·I / L³`,
/// summed over the limb beams and corrected empirically.
///
/// `_curvature` and `_stiffness` are accepted so every estimator shares one
/// signature; neither enters the formula.
pub fn estimate_draw_force(
    thickness: f64,
    _curvature: f64,
    _stiffness: f64,
    grip_width: f64,
) -> Result<f64, NumericError> {
    let second_moment = thickness * DEFAULT_BEAM_THICKNESS.powi(3) / 12.0;
    let length = check_denominator(beam_length(grip_width), "beam length")?;

    Ok(BEAM_COUNT * DEFAULT_DEFLECTION * DEFAULT_YOUNGS_MODULUS * second_moment
        / length.powi(3)
        * DEFAULT_EMPIRICAL_CORRECTIVE_FACTOR)
}

/// Launch speed (m/s) from `½·m·v² = F·d` at the default arrow mass.
pub fn estimate_launch_speed(
    thickness: f64,
    curvature: f64,
    stiffness: f64,
    grip_width: f64,
) -> Result<f64, NumericError> {
    let force = estimate_draw_force(thickness, curvature, stiffness, grip_width)?;
    let work = DEFAULT_DISTANCE_ARROW_PUSHED / 1000.0 * force;
    let mass = DEFAULT_ARROW_WEIGHT / 1000.0;
    Ok((2.0 * work / mass).sqrt())
}
