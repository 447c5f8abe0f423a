pub mod defaults;
pub mod models;

use crate::cli::DesignArgs;
use crate::error::{CliError, Result};
use bowforge::core::models::profile::{SpeedPreference, UserClass};
use bowforge::engine::config::OptimizationConfigBuilder;
use bowforge::engine::objective::PerformanceTarget;
use defaults::DefaultsConfig;
use models::{AppConfig, RunOverrides, ShapeOverrides};
use serde::Deserialize;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialSessionConfig {
    profile: Option<String>,
    #[serde(rename = "palm-size")]
    palm_size: Option<f64>,
    #[serde(rename = "preferred-speed")]
    preferred_speed: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialParametersConfig {
    thickness: Option<f64>,
    curvature: Option<f64>,
    stiffness: Option<f64>,
    #[serde(rename = "grip-width")]
    grip_width: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialOptimizationConfig {
    #[serde(rename = "max-iterations")]
    max_iterations: Option<usize>,
    tolerance: Option<f64>,
    #[serde(rename = "jitter-fraction")]
    jitter_fraction: Option<f64>,
    seed: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct PartialTargetConfig {
    speed: Option<f64>,
    force: Option<f64>,
    #[serde(rename = "lock-speed")]
    lock_speed: Option<bool>,
    #[serde(rename = "lock-force")]
    lock_force: Option<bool>,
}

/// A design file as written on disk; every section and key is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialDesignConfig {
    session: Option<PartialSessionConfig>,
    parameters: Option<PartialParametersConfig>,
    optimization: Option<PartialOptimizationConfig>,
    target: Option<PartialTargetConfig>,
}

impl PartialDesignConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading design file from: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Loads `path` when given, otherwise starts from an empty design file.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Resolves the final settings. Command-line values win over `-S` pairs,
    /// which win over the design file, which wins over [`DefaultsConfig`].
    pub fn merge_with_cli(mut self, args: &DesignArgs, run: &RunOverrides) -> Result<AppConfig> {
        self.apply_set_values(&args.set_values)?;
        let defaults = DefaultsConfig::default();

        let session = self.session.unwrap_or_default();
        let profile = match args.profile.as_deref().or(session.profile.as_deref()) {
            Some(name) => name.parse::<UserClass>()?,
            None => defaults.profile,
        };
        let palm_size = args.palm_size.or(session.palm_size);
        if let Some(palm) = palm_size {
            if !(palm.is_finite() && palm > 0.0) {
                return Err(CliError::Config(format!(
                    "palm size must be a positive number of millimetres, got {palm}"
                )));
            }
        }
        let preferred_speed = args
            .speed
            .as_deref()
            .or(session.preferred_speed.as_deref())
            .map(str::parse::<SpeedPreference>)
            .transpose()?;

        let parameters = self.parameters.unwrap_or_default();
        let shape_overrides = ShapeOverrides {
            thickness: args.thickness.or(parameters.thickness),
            curvature: args.curvature.or(parameters.curvature),
            stiffness: args.stiffness.or(parameters.stiffness),
            grip_width: args.grip_width.or(parameters.grip_width),
        };

        let optimization = self.optimization.unwrap_or_default();
        let mut builder = OptimizationConfigBuilder::new()
            .max_iterations(
                run.max_iterations
                    .or(optimization.max_iterations)
                    .unwrap_or(defaults.max_iterations),
            )
            .tolerance(optimization.tolerance.unwrap_or(defaults.tolerance))
            .jitter_fraction(
                optimization
                    .jitter_fraction
                    .unwrap_or(defaults.jitter_fraction),
            );
        if let Some(seed) = run.seed.or(optimization.seed) {
            builder = builder.seed(seed);
        }
        let optimization = builder.build()?;

        let target = self.target.unwrap_or_default();
        let target = PerformanceTarget {
            speed: run
                .target_speed
                .or(target.speed)
                .unwrap_or(defaults.target_speed),
            force: run
                .target_force
                .or(target.force)
                .unwrap_or(defaults.target_force),
            lock_speed: run.lock_speed || target.lock_speed.unwrap_or(false),
            lock_force: run.lock_force || target.lock_force.unwrap_or(false),
        };

        Ok(AppConfig {
            input_path: args.input.clone(),
            profile,
            palm_size,
            preferred_speed,
            shape_overrides,
            optimization,
            target,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for set_value in set_values {
            let parts: Vec<&str> = set_value.splitn(2, '=').collect();
            let [key, value] = parts.as_slice() else {
                return Err(CliError::Argument(format!(
                    "Invalid --set format: '{}'. Expected 'key=value'.",
                    set_value
                )));
            };
            let (key, value) = (key.trim(), value.trim());
            debug!("Applying override: {} = {}", key, value);

            match key {
                "session.profile" => {
                    self.session_mut().profile = Some(value.to_string());
                }
                "session.palm-size" => {
                    self.session_mut().palm_size = Some(parse_value(key, value)?);
                }
                "session.preferred-speed" => {
                    self.session_mut().preferred_speed = Some(value.to_string());
                }
                "parameters.thickness" => {
                    self.parameters_mut().thickness = Some(parse_value(key, value)?);
                }
                "parameters.curvature" => {
                    self.parameters_mut().curvature = Some(parse_value(key, value)?);
                }
                "parameters.stiffness" => {
                    self.parameters_mut().stiffness = Some(parse_value(key, value)?);
                }
                "parameters.grip-width" => {
                    self.parameters_mut().grip_width = Some(parse_value(key, value)?);
                }
                "optimization.max-iterations" => {
                    self.optimization_mut().max_iterations = Some(parse_value(key, value)?);
                }
                "optimization.tolerance" => {
                    self.optimization_mut().tolerance = Some(parse_value(key, value)?);
                }
                "optimization.jitter-fraction" => {
                    self.optimization_mut().jitter_fraction = Some(parse_value(key, value)?);
                }
                "optimization.seed" => {
                    self.optimization_mut().seed = Some(parse_value(key, value)?);
                }
                "target.speed" => {
                    self.target_mut().speed = Some(parse_value(key, value)?);
                }
                "target.force" => {
                    self.target_mut().force = Some(parse_value(key, value)?);
                }
                "target.lock-speed" => {
                    self.target_mut().lock_speed = Some(parse_value(key, value)?);
                }
                "target.lock-force" => {
                    self.target_mut().lock_force = Some(parse_value(key, value)?);
                }
                _ => {
                    return Err(CliError::Argument(format!(
                        "Unknown or unsupported key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }

    fn session_mut(&mut self) -> &mut PartialSessionConfig {
        self.session.get_or_insert_with(Default::default)
    }

    fn parameters_mut(&mut self) -> &mut PartialParametersConfig {
        self.parameters.get_or_insert_with(Default::default)
    }

    fn optimization_mut(&mut self) -> &mut PartialOptimizationConfig {
        self.optimization.get_or_insert_with(Default::default)
    }

    fn target_mut(&mut self) -> &mut PartialTargetConfig {
        self.target.get_or_insert_with(Default::default)
    }
}

fn parse_value<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value.parse::<T>().map_err(|e| {
        CliError::Argument(format!("Invalid value '{}' for '{}': {}", value, key, e))
    })
}
