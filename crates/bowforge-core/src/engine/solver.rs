use super::config::OptimizationConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use crate::core::constants::Range;
use tracing::trace;

pub const DIMENSIONS: usize = 4;

pub type Objective<'a> = dyn Fn(&[f64; DIMENSIONS]) -> Result<f64, EngineError> + 'a;

/// Result of one bounded minimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOutcome {
    /// Best point found, in the caller's units.
    pub x: [f64; DIMENSIONS],
    pub cost: f64,
    pub iterations: usize,
    /// Whether a stopping criterion was met before the iteration limit.
    pub converged: bool,
}

/// Minimizes a scalar objective over an axis-aligned box.
pub trait BoundedMinimizer {
    /// # Errors
    ///
    /// Propagates any error returned by `objective`, and reports
    /// [`EngineError::PhaseFailed`] if the objective is not finite at `x0`.
    fn minimize(
        &self,
        objective: &Objective<'_>,
        x0: [f64; DIMENSIONS],
        bounds: &[Range; DIMENSIONS],
        reporter: &ProgressReporter,
    ) -> Result<SolverOutcome, EngineError>;
}

/// Projected gradient descent with Barzilai-Borwein steps and Armijo backtracking.
///
/// Works in coordinates normalized to [0, 1] per bound so that millimetre and
/// ratio variables share one step length. Gradients are central differences.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedGradient {
    pub max_iterations: usize,
    pub tolerance: f64,
    /// Finite-difference half-width in normalized units.
    pub gradient_step: f64,
}

const ARMIJO_C1: f64 = 1e-4;
const MAX_BACKTRACKS: usize = 40;
const MIN_STEP: f64 = 1e-12;
const MAX_STEP: f64 = 1e6;

impl Default for ProjectedGradient {
    fn default() -> Self {
        Self::from_config(&OptimizationConfig::default())
    }
}

impl ProjectedGradient {
    pub fn from_config(config: &OptimizationConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            gradient_step: 1e-6,
        }
    }
}

/// Maps between caller units and the unit box.
struct Scaling<'b> {
    bounds: &'b [Range; DIMENSIONS],
}

impl Scaling<'_> {
    fn to_unit(&self, x: &[f64; DIMENSIONS]) -> [f64; DIMENSIONS] {
        std::array::from_fn(|i| {
            let range = self.bounds[i];
            if range.width() > 0.0 {
                ((range.clamp(x[i]) - range.min) / range.width()).clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
    }

    fn from_unit(&self, u: &[f64; DIMENSIONS]) -> [f64; DIMENSIONS] {
        std::array::from_fn(|i| {
            let range = self.bounds[i];
            range.clamp(range.min + u[i] * range.width())
        })
    }
}

fn project(u: [f64; DIMENSIONS]) -> [f64; DIMENSIONS] {
    u.map(|v| v.clamp(0.0, 1.0))
}

fn dot(a: &[f64; DIMENSIONS], b: &[f64; DIMENSIONS]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn sub(a: &[f64; DIMENSIONS], b: &[f64; DIMENSIONS]) -> [f64; DIMENSIONS] {
    std::array::from_fn(|i| a[i] - b[i])
}

fn inf_norm(a: &[f64; DIMENSIONS]) -> f64 {
    a.iter().fold(0.0, |m, v| m.max(v.abs()))
}

impl ProjectedGradient {
    fn gradient(
        &self,
        f: &dyn Fn(&[f64; DIMENSIONS]) -> Result<f64, EngineError>,
        u: &[f64; DIMENSIONS],
        fixed: &[bool; DIMENSIONS],
    ) -> Result<[f64; DIMENSIONS], EngineError> {
        let mut grad = [0.0; DIMENSIONS];
        for i in 0..DIMENSIONS {
            if fixed[i] {
                continue;
            }
            let mut up = *u;
            let mut down = *u;
            up[i] = (u[i] + self.gradient_step).min(1.0);
            down[i] = (u[i] - self.gradient_step).max(0.0);
            grad[i] = (f(&up)? - f(&down)?) / (up[i] - down[i]);
        }
        Ok(grad)
    }
}

impl BoundedMinimizer for ProjectedGradient {
    fn minimize(
        &self,
        objective: &Objective<'_>,
        x0: [f64; DIMENSIONS],
        bounds: &[Range; DIMENSIONS],
        reporter: &ProgressReporter,
    ) -> Result<SolverOutcome, EngineError> {
        let scaling = Scaling { bounds };
        let fixed: [bool; DIMENSIONS] = std::array::from_fn(|i| bounds[i].width() <= 0.0);
        let f = |u: &[f64; DIMENSIONS]| objective(&scaling.from_unit(u));

        let mut u = scaling.to_unit(&x0);
        let mut cost = f(&u)?;
        if !cost.is_finite() {
            return Err(EngineError::PhaseFailed {
                phase: "bounded minimization",
                reason: format!("objective is not finite at the initial guess ({cost})"),
            });
        }
        let mut grad = self.gradient(&f, &u, &fixed)?;
        let mut step = 1.0 / inf_norm(&grad).max(1.0);
        let mut converged = false;
        let mut iterations = 0;
        reporter.report(Progress::TaskStart {
            total_steps: self.max_iterations as u64,
        });

        while iterations < self.max_iterations {
            let projected_grad = sub(&project(sub(&u, &grad)), &u);
            if inf_norm(&projected_grad) < self.tolerance {
                converged = true;
                break;
            }
            iterations += 1;
            reporter.report(Progress::TaskIncrement);

            let mut accepted = None;
            let mut trial_step = step;
            for _ in 0..MAX_BACKTRACKS {
                let candidate = project(std::array::from_fn(|i| u[i] - trial_step * grad[i]));
                let candidate_cost = f(&candidate)?;
                let decrease = dot(&grad, &sub(&candidate, &u));
                if candidate_cost.is_finite() && candidate_cost <= cost + ARMIJO_C1 * decrease {
                    accepted = Some((candidate, candidate_cost));
                    break;
                }
                trial_step *= 0.5;
            }

            let Some((next_u, next_cost)) = accepted else {
                // No descent along the projected gradient at any step length.
                trace!(iteration = iterations, cost, "Line search exhausted.");
                converged = true;
                break;
            };

            let s = sub(&next_u, &u);
            let next_grad = self.gradient(&f, &next_u, &fixed)?;
            let y = sub(&next_grad, &grad);
            let improvement = cost - next_cost;

            u = next_u;
            cost = next_cost;
            grad = next_grad;

            trace!(iteration = iterations, cost, step = trial_step, "Solver step.");

            if inf_norm(&s) < self.tolerance || improvement.abs() < self.tolerance * 1e-3 {
                converged = true;
                break;
            }

            let sy = dot(&s, &y);
            step = if sy > 0.0 {
                (dot(&s, &s) / sy).clamp(MIN_STEP, MAX_STEP)
            } else {
                (trial_step * 2.0).min(MAX_STEP)
            };
        }
        reporter.report(Progress::TaskFinish);

        Ok(SolverOutcome {
            x: scaling.from_unit(&u),
            cost,
            iterations,
            converged,
        })
    }
}
