use super::{open_session, print_design, progress_handler, write_model};
use crate::cli::{OptimizeArgs, OptimizeMode};
use crate::config::PartialDesignConfig;
use crate::config::models::RunOverrides;
use crate::error::Result;
use tracing::{info, instrument};

#[instrument(skip_all, name = "optimize_command")]
pub fn run(args: OptimizeArgs, quiet: bool) -> Result<()> {
    let run_overrides = RunOverrides {
        target_speed: args.target_speed,
        target_force: args.target_force,
        lock_speed: args.lock_speed,
        lock_force: args.lock_force,
        max_iterations: args.max_iterations,
        seed: args.seed,
    };
    let config = PartialDesignConfig::load(args.design.config.as_deref())?
        .merge_with_cli(&args.design, &run_overrides)?;
    info!(mode = ?args.mode, profile = %config.profile, "Starting optimization.");

    let handler = progress_handler(quiet);
    let mut session = open_session(&config, &handler)?;

    match args.mode {
        OptimizeMode::Profile => {
            let fit = session.optimize_for_profile()?;
            println!(
                "Profile fit: cost {:.4} after {} iterations{}",
                fit.cost,
                fit.outcome.iterations,
                if fit.outcome.converged {
                    ""
                } else {
                    " (not converged)"
                }
            );
        }
        OptimizeMode::Performance => {
            let target = config.target;
            let fit = session.optimize_for_performance(
                target.speed,
                target.force,
                target.lock_speed,
                target.lock_force,
            )?;
            println!(
                "Performance fit: {:.3} m/s (target {:.3}), {:.3} N (target {:.3}){}",
                fit.achieved_speed,
                target.speed,
                fit.achieved_force,
                target.force,
                if fit.outcome.converged {
                    ""
                } else {
                    " (not converged)"
                }
            );
        }
    }

    print_design(&session)?;
    write_model(&session, &args.output)?;
    println!("Optimized model written to {}", args.output.display());
    Ok(())
}
