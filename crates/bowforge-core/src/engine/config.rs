use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {name}: {value} ({reason})")]
    InvalidValue {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub const DEFAULT_MAX_ITERATIONS: usize = 200;
pub const DEFAULT_TOLERANCE: f64 = 1e-8;
pub const DEFAULT_JITTER_FRACTION: f64 = 0.03;

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationConfig {
    pub max_iterations: usize,
    /// Stopping threshold on the projected-gradient norm and the step length,
    /// both measured in normalized [0, 1] coordinates.
    pub tolerance: f64,
    /// Half-width of the multiplicative jitter applied after a profile fit.
    pub jitter_fraction: f64,
    /// Seed for the jitter RNG; `None` seeds a `StdRng` from OS entropy.
    pub seed: Option<u64>,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
            jitter_fraction: DEFAULT_JITTER_FRACTION,
            seed: None,
        }
    }
}

#[derive(Default)]
pub struct OptimizationConfigBuilder {
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
    jitter_fraction: Option<f64>,
    seed: Option<u64>,
}

impl OptimizationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn jitter_fraction(mut self, fraction: f64) -> Self {
        self.jitter_fraction = Some(fraction);
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<OptimizationConfig, ConfigError> {
        let max_iterations = self
            .max_iterations
            .ok_or(ConfigError::MissingParameter("max_iterations"))?;
        let tolerance = self
            .tolerance
            .ok_or(ConfigError::MissingParameter("tolerance"))?;
        let jitter_fraction = self
            .jitter_fraction
            .ok_or(ConfigError::MissingParameter("jitter_fraction"))?;

        if max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                name: "max_iterations",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::InvalidValue {
                name: "tolerance",
                value: tolerance,
                reason: "must be a positive finite number",
            });
        }
        if !(0.0..1.0).contains(&jitter_fraction) {
            return Err(ConfigError::InvalidValue {
                name: "jitter_fraction",
                value: jitter_fraction,
                reason: "must lie in [0, 1)",
            });
        }

        Ok(OptimizationConfig {
            max_iterations,
            tolerance,
            jitter_fraction,
            seed: self.seed,
        })
    }
}
