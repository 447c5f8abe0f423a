use super::error::EngineError;
use crate::core::constants::{DEFAULT_ARROW_LENGTH, DEFAULT_PALM_SIZE};
use crate::core::error::check_denominator;
use crate::core::models::params::{ArrowSettings, BowShape, DesignParameters};
use crate::core::models::profile::{SpeedPreference, UserClass};
use crate::core::physics::{optimal_arrow_weight, optimal_tip_diameter};
use tracing::{debug, warn};

/// Palm scale above which the limbs are thickened.
const LARGE_HAND_SCALE: f64 = 1.2;
/// Palm scale below which the limbs are thinned.
const SMALL_HAND_SCALE: f64 = 0.8;
/// Shift applied to the speed and safety factors by a non-Medium preference.
const SPEED_PREFERENCE_SHIFT: f64 = 0.2;

/// The profile's (speed_factor, safety_factor) after shifting for `preference`.
pub fn adjusted_factors(class: UserClass, preference: SpeedPreference) -> (f64, f64) {
    let profile = class.profile();
    let shift = match preference {
        SpeedPreference::Low => -SPEED_PREFERENCE_SHIFT,
        SpeedPreference::Medium => 0.0,
        SpeedPreference::High => SPEED_PREFERENCE_SHIFT,
    };
    (profile.speed_factor + shift, profile.safety_factor - shift)
}

/// [`adjusted_factors`] with the speed factor checked as a divisor.
fn checked_factors(
    class: UserClass,
    preference: SpeedPreference,
) -> Result<(f64, f64), EngineError> {
    let (speed_factor, safety_factor) = adjusted_factors(class, preference);
    Ok((check_denominator(speed_factor, "speed factor")?, safety_factor))
}

/// Live design variables together with who they are being designed for.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerState {
    parameters: DesignParameters,
    current_user: UserClass,
    palm_size: f64,
    preferred_speed: SpeedPreference,
}

impl Default for OptimizerState {
    fn default() -> Self {
        Self::new(DEFAULT_ARROW_LENGTH)
    }
}

impl OptimizerState {
    /// Adult defaults, a 90 mm palm and Medium speed.
    pub fn new(arrow_length: f64) -> Self {
        Self {
            parameters: DesignParameters::with_arrow_length(arrow_length),
            current_user: UserClass::Adult,
            palm_size: DEFAULT_PALM_SIZE,
            preferred_speed: SpeedPreference::default(),
        }
    }

    pub fn parameters(&self) -> &DesignParameters {
        &self.parameters
    }

    pub fn current_user(&self) -> UserClass {
        self.current_user
    }

    pub fn palm_size(&self) -> f64 {
        self.palm_size
    }

    pub fn preferred_speed(&self) -> SpeedPreference {
        self.preferred_speed
    }

    /// Switches to the profile called `name`.
    ///
    /// Returns `Ok(false)` and leaves the state untouched when the name is not a
    /// known user class.
    pub fn apply_profile(
        &mut self,
        name: &str,
        palm_size: Option<f64>,
        preferred_speed: Option<SpeedPreference>,
    ) -> Result<bool, EngineError> {
        match name.parse::<UserClass>() {
            Ok(class) => {
                self.apply_user_class(class, palm_size, preferred_speed)?;
                Ok(true)
            }
            Err(err) => {
                warn!("{err}");
                Ok(false)
            }
        }
    }

    pub fn apply_user_class(
        &mut self,
        class: UserClass,
        palm_size: Option<f64>,
        preferred_speed: Option<SpeedPreference>,
    ) -> Result<(), EngineError> {
        // A rejected switch must leave the state untouched.
        if let Some(speed) = preferred_speed {
            checked_factors(class, speed)?;
        }
        // The class must be set before the refresh so the arrow calculators see it.
        self.current_user = class;
        let profile = class.profile();
        self.refresh_parameters(
            BowShape::new(
                profile.bow_thickness,
                profile.bow_curvature,
                profile.limb_stiffness,
                profile.grip_width,
            ),
            None,
        );
        self.parameters.tip_length = profile.tip_length;

        if let Some(palm) = palm_size {
            self.palm_size = palm;
            self.adjust_for_palm_size();
        }
        if let Some(speed) = preferred_speed {
            self.preferred_speed = speed;
            self.adjust_for_speed()?;
        }
        debug!(profile = %class, "Switched user profile.");
        Ok(())
    }

    /// Stores new bow values and recomputes the dependent arrow values.
    ///
    /// `requested_arrow` is accepted for callers that edit arrow fields, but the
    /// arrow length stays bound to the mesh and weight and tip are always derived.
    pub fn refresh_parameters(&mut self, shape: BowShape, requested_arrow: Option<ArrowSettings>) {
        if let Some(requested) = requested_arrow {
            debug!(
                length = requested.length,
                weight = requested.weight,
                tip_diameter = requested.tip_diameter,
                "Ignoring requested arrow values; they are derived from the bow."
            );
        }
        let class = self.current_user;
        self.parameters.set_shape(shape);
        self.parameters.arrow_weight =
            optimal_arrow_weight(shape.stiffness, shape.thickness, class);
        self.parameters.tip_diameter =
            optimal_tip_diameter(shape.stiffness, shape.grip_width, class);

        debug!(
            thickness = shape.thickness,
            curvature = shape.curvature,
            stiffness = shape.stiffness,
            grip_width = shape.grip_width,
            arrow_weight = self.parameters.arrow_weight,
            tip_diameter = self.parameters.tip_diameter,
            "Parameters refreshed."
        );
    }

    /// Resizes the grip for the stored palm size. Results are not clamped.
    pub fn adjust_for_palm_size(&mut self) {
        let profile = self.current_user.profile();
        let scale = self.palm_size / DEFAULT_PALM_SIZE;
        self.parameters.grip_width = profile.grip_width * scale * profile.grip_size_factor;

        if scale > LARGE_HAND_SCALE {
            self.parameters.bow_thickness *= 1.1;
        } else if scale < SMALL_HAND_SCALE {
            self.parameters.bow_thickness *= 0.9;
        }
        debug!(
            palm_size = self.palm_size,
            grip_width = self.parameters.grip_width,
            "Adjusted for palm size."
        );
    }

    /// Retunes stiffness, arrow weight and tip for the stored speed preference.
    pub fn adjust_for_speed(&mut self) -> Result<(), EngineError> {
        let profile = self.current_user.profile();
        let (speed_factor, safety_factor) =
            checked_factors(self.current_user, self.preferred_speed)?;

        self.parameters.limb_stiffness = profile.limb_stiffness * speed_factor;
        self.parameters.arrow_weight = profile.arrow_weight / speed_factor;
        self.parameters.tip_diameter = profile.tip_diameter * safety_factor;
        debug!(preference = %self.preferred_speed, "Adjusted for speed preference.");
        Ok(())
    }

    pub fn set_palm_size(&mut self, palm_size: f64) {
        self.palm_size = palm_size;
        self.adjust_for_palm_size();
    }

    pub fn set_preferred_speed(&mut self, preference: SpeedPreference) -> Result<(), EngineError> {
        checked_factors(self.current_user, preference)?;
        self.preferred_speed = preference;
        self.adjust_for_speed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn new_state_starts_as_adult_medium_with_reference_palm() {
        let state = OptimizerState::new(55.0);
        assert_eq!(state.current_user(), UserClass::Adult);
        assert_eq!(state.preferred_speed(), SpeedPreference::Medium);
        assert_eq!(state.palm_size(), 90.0);
        assert_eq!(state.parameters().arrow_length, 55.0);
    }

    #[test]
    fn unknown_profile_leaves_state_unchanged() {
        let mut state = OptimizerState::new(55.0);
        let before = state.clone();
        let switched = state.apply_profile("Grandmaster", Some(120.0), None).unwrap();
        assert!(!switched);
        assert_eq!(state, before);
    }

    #[test]
    fn profile_switch_sets_class_before_deriving_arrow() {
        let mut state = OptimizerState::new(55.0);
        assert!(state.apply_profile("Child", None, None).unwrap());
        let params = state.parameters();
        assert_eq!(state.current_user(), UserClass::Child);
        // 0.8 * (1 - 0.1) * (1 - 0.1) with the Child factor, not Adult's 0.81.
        assert!(f64_approx_equal(params.arrow_weight, 0.65));
        assert!(f64_approx_equal(
            params.tip_diameter,
            optimal_tip_diameter(0.4, 36.0, UserClass::Child)
        ));
        assert_eq!(params.tip_length, 7.0);
        assert_eq!(params.arrow_length, 55.0);
    }

    #[test]
    fn small_palm_narrows_grip_and_thins_limbs() {
        let mut state = OptimizerState::default();
        state.apply_user_class(UserClass::Adult, Some(60.0), None).unwrap();
        let params = state.parameters();
        assert!(f64_approx_equal(params.grip_width, 34.0 * (60.0 / 90.0)));
        assert!(f64_approx_equal(params.bow_thickness, 8.0 * 0.9));
    }

    #[test]
    fn palm_adjustment_is_not_clamped() {
        let mut state = OptimizerState::default();
        state.apply_user_class(UserClass::Child, Some(130.0), None).unwrap();
        let grip = state.parameters().grip_width;
        // 36 * 130/90 * 1.2 is well beyond the 36 mm slider maximum.
        assert!(f64_approx_equal(grip, 36.0 * (130.0 / 90.0) * 1.2));
        assert!(grip > 36.0);
        assert!(f64_approx_equal(state.parameters().bow_thickness, 6.0 * 1.1));
    }

    #[test]
    fn speed_preference_shifts_factors() {
        assert_eq!(
            adjusted_factors(UserClass::Adult, SpeedPreference::Medium),
            (1.0, 1.2)
        );
        let (speed, safety) = adjusted_factors(UserClass::Adult, SpeedPreference::High);
        assert!(f64_approx_equal(speed, 1.2));
        assert!(f64_approx_equal(safety, 1.0));
        let (speed, safety) = adjusted_factors(UserClass::Child, SpeedPreference::Low);
        assert!(f64_approx_equal(speed, 0.6));
        assert!(f64_approx_equal(safety, 1.7));
    }

    #[test]
    fn high_speed_stiffens_limb_and_lightens_arrow() {
        let mut state = OptimizerState::default();
        state
            .apply_user_class(UserClass::Adult, None, Some(SpeedPreference::High))
            .unwrap();
        let params = state.parameters();
        assert!(f64_approx_equal(params.limb_stiffness, 0.6 * 1.2));
        assert!(f64_approx_equal(params.arrow_weight, 1.0 / 1.2));
        assert!(f64_approx_equal(params.tip_diameter, 8.0 * 1.0));
    }

    #[test]
    fn every_class_accepts_every_speed_preference() {
        let preferences = [
            SpeedPreference::Low,
            SpeedPreference::Medium,
            SpeedPreference::High,
        ];
        for class in UserClass::ALL {
            for preference in preferences {
                let mut state = OptimizerState::default();
                state.apply_user_class(class, Some(72.0), Some(preference)).unwrap();
                assert_eq!(state.current_user(), class);
                assert_eq!(state.preferred_speed(), preference);

                let (speed_factor, safety_factor) = adjusted_factors(class, preference);
                let profile = class.profile();
                let params = state.parameters();
                assert!(f64_approx_equal(
                    params.limb_stiffness,
                    profile.limb_stiffness * speed_factor
                ));
                assert!(f64_approx_equal(params.arrow_weight, profile.arrow_weight / speed_factor));
                assert!(f64_approx_equal(
                    params.tip_diameter,
                    profile.tip_diameter * safety_factor
                ));
            }
        }
    }

    #[test]
    fn refresh_keeps_arrow_length_and_ignores_requested_arrow() {
        let mut state = OptimizerState::new(52.0);
        state.refresh_parameters(
            BowShape::new(9.0, 0.3, 0.7, 30.0),
            Some(ArrowSettings {
                length: 99.0,
                weight: 99.0,
                tip_diameter: 99.0,
            }),
        );
        let params = state.parameters();
        assert_eq!(params.arrow_length, 52.0);
        assert!(f64_approx_equal(
            params.arrow_weight,
            optimal_arrow_weight(0.7, 9.0, UserClass::Adult)
        ));
        assert!(f64_approx_equal(
            params.tip_diameter,
            optimal_tip_diameter(0.7, 30.0, UserClass::Adult)
        ));
    }
}
