use bowforge::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// The bar plus the phase it is currently showing.
struct BarState {
    pb: ProgressBar,
    phase: Option<&'static str>,
}

impl BarState {
    fn phase_label(&self) -> &'static str {
        self.phase.unwrap_or("Design")
    }

    fn handle(&mut self, event: Progress) {
        let pb = &self.pb;
        match event {
            Progress::PhaseStart { name } => {
                self.phase = Some(name);
                pb.reset();
                pb.set_length(0);
                pb.set_style(spinner_style());
                pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                pb.set_message(name);
            }
            Progress::TaskStart { total_steps } => {
                pb.disable_steady_tick();
                pb.reset();
                pb.set_length(total_steps);
                pb.set_style(bar_style());
                pb.set_message(format!("{} iterations", self.phase_label()));
            }
            Progress::TaskIncrement => pb.inc(1),
            Progress::TaskFinish => {
                // A converged solver stops early; the bar shows the iterations it used.
                pb.set_length(pb.position());
                pb.finish();
            }
            Progress::Message(text) => {
                if pb.is_finished() {
                    pb.set_message(text);
                } else {
                    pb.println(format!("  {text}"));
                }
            }
            Progress::GeometryUpdated => {
                if !pb.is_finished() {
                    pb.set_message(format!("{}: geometry updated", self.phase_label()));
                }
            }
            Progress::PhaseFinish => {
                pb.disable_steady_tick();
                pb.set_style(spinner_style());
                pb.finish_with_message(format!("✓ {}", self.phase_label()));
                self.phase = None;
            }
        }
    }
}

/// Drives one `indicatif` bar from the design session's progress events.
#[derive(Clone)]
pub struct CliProgressHandler {
    state: Arc<Mutex<BarState>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    /// A handler that tracks state without drawing, for `--quiet` runs.
    pub fn hidden() -> Self {
        Self::with_draw_target(ProgressDrawTarget::hidden())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(spinner_style());
        pb.finish_and_clear();

        Self {
            state: Arc::new(Mutex::new(BarState { pb, phase: None })),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let state = Arc::clone(&self.state);

        Box::new(move |event: Progress| {
            let Ok(mut guard) = state.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };
            guard.handle(event);
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::with_template("{msg:<28} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key(
            "eta",
            |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
            },
        )
        .progress_chars("##-")
}
