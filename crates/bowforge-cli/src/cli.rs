use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "BowForge Contributors",
    version,
    about = "BowForge CLI - Tailor a 3D-printable toy bow and arrow to its user and to performance targets.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Optimize the bow for a user profile or for speed/force targets and export the model.
    Optimize(OptimizeArgs),
    /// Score the current design and print the scorecard and print settings.
    Simulate(SimulateArgs),
    /// List the built-in user profiles.
    Profiles,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizeMode {
    /// Fit the bow to the selected user profile.
    Profile,
    /// Hit explicit launch-speed and draw-force targets.
    Performance,
}

/// Options shared by every command that builds a design session.
#[derive(Args, Debug, Clone, Default)]
pub struct DesignArgs {
    /// Path to the input STL containing the bow body and the arrow.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path to a design file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// User profile (Child, Adult, Professional), overriding the design file.
    #[arg(short, long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Palm size of the user in millimetres.
    #[arg(long, value_name = "MM")]
    pub palm_size: Option<f64>,

    /// Preferred shooting speed (Low, Medium, High).
    #[arg(long, value_name = "LEVEL")]
    pub speed: Option<String>,

    /// Override the limb thickness after the profile is applied.
    #[arg(long, value_name = "MM")]
    pub thickness: Option<f64>,

    /// Override the limb curvature after the profile is applied.
    #[arg(long, value_name = "RATIO")]
    pub curvature: Option<f64>,

    /// Override the limb stiffness after the profile is applied.
    #[arg(long, value_name = "RATIO")]
    pub stiffness: Option<f64>,

    /// Override the grip width after the profile is applied.
    #[arg(long, value_name = "MM")]
    pub grip_width: Option<f64>,

    /// Set a specific configuration value, overriding the design file.
    /// Can be used multiple times. Example: -S target.speed=4.5
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `optimize` subcommand.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Path for the optimized binary STL.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Which objective to optimize.
    #[arg(short, long, value_enum, default_value_t = OptimizeMode::Profile)]
    pub mode: OptimizeMode,

    /// Target launch speed in m/s (performance mode).
    #[arg(long, value_name = "M/S")]
    pub target_speed: Option<f64>,

    /// Target draw force in N (performance mode).
    #[arg(long, value_name = "N")]
    pub target_force: Option<f64>,

    /// Weight the speed target heavily (performance mode).
    #[arg(long)]
    pub lock_speed: bool,

    /// Weight the force target heavily (performance mode).
    #[arg(long)]
    pub lock_force: bool,

    /// Override the solver iteration limit.
    #[arg(long, value_name = "INT")]
    pub max_iterations: Option<usize>,

    /// Seed the post-fit jitter for reproducible results.
    #[arg(long, value_name = "INT")]
    pub seed: Option<u64>,
}

/// Arguments for the `simulate` subcommand.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub design: DesignArgs,

    /// Optionally write the deformed model as binary STL.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}
