use super::{open_session, print_design, progress_handler, write_model};
use crate::cli::SimulateArgs;
use crate::config::PartialDesignConfig;
use crate::config::models::RunOverrides;
use crate::error::Result;
use tracing::instrument;

#[instrument(skip_all, name = "simulate_command")]
pub fn run(args: SimulateArgs, quiet: bool) -> Result<()> {
    let config = PartialDesignConfig::load(args.design.config.as_deref())?
        .merge_with_cli(&args.design, &RunOverrides::default())?;

    let handler = progress_handler(quiet);
    let mut session = open_session(&config, &handler)?;
    session.apply_geometry_update()?;

    print_design(&session)?;

    let result = session.simulate_performance()?;
    println!("Scorecard:");
    println!("  Flight distance    {:>8.3}", result.flight_distance);
    println!("  Accuracy           {:>8.1} / 100", result.accuracy_score);
    println!("  Comfort            {:>8.1} / 100", result.comfort_score);
    println!("  Safety             {:>8.1} / 100", result.safety_score);
    println!("  Overall            {:>8.1} / 100", result.performance_score);
    println!(
        "  Top clamp space    {:>8.3} mm",
        session.top_clamp_space()
    );

    let print = session.print_settings();
    println!("Print settings:");
    println!("  Material           {}", print.material);
    println!("  Layer height       {} mm", print.layer_height_mm);
    println!("  Infill             {}%", print.infill_percent);
    println!(
        "  Supports           {}",
        if print.supports { "yes" } else { "no" }
    );
    println!("  Notes              {}", print.instructions);

    if let Some(output) = &args.output {
        write_model(&session, output)?;
        println!("Model written to {}", output.display());
    }
    Ok(())
}
