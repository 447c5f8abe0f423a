use bowforge::core::constants::{DEFAULT_DRAW_FORCE, DEFAULT_LAUNCH_SPEED};
use bowforge::core::models::profile::UserClass;
use bowforge::engine::config::{
    DEFAULT_JITTER_FRACTION, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};

/// Values used when neither the design file nor the command line sets them.
pub struct DefaultsConfig {
    pub profile: UserClass,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub jitter_fraction: f64,
    pub target_speed: f64,
    pub target_force: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            profile: UserClass::Adult,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            jitter_fraction: DEFAULT_JITTER_FRACTION,
            target_speed: DEFAULT_LAUNCH_SPEED,
            target_force: DEFAULT_DRAW_FORCE,
        }
    }
}
