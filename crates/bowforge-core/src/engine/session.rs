use super::config::OptimizationConfig;
use super::error::EngineError;
use super::objective::PerformanceTarget;
use super::progress::{Progress, ProgressReporter};
use super::solver::{BoundedMinimizer, ProjectedGradient};
use super::state::OptimizerState;
use crate::core::constants::DEFAULT_ARROW_LENGTH;
use crate::core::geometry::deform;
use crate::core::models::mesh::{BowArrowMesh, MeshComponent, MeshSnapshot};
use crate::core::models::params::{ArrowSettings, BowShape, DesignParameters};
use crate::core::models::print::PrintSettings;
use crate::core::models::profile::SpeedPreference;
use crate::core::physics;
use crate::core::scoring::{PerformanceResult, simulate};
use crate::workflows::optimize::{self, PerformanceFit, ProfileFit};
use tracing::{debug, info};

/// One design session over a loaded bow-and-arrow model.
///
/// The session owns the live mesh, a pristine snapshot of it, and the
/// [`OptimizerState`]. Every geometry update rebuilds the live mesh from the
/// snapshot.
pub struct DesignSession<'a> {
    state: OptimizerState,
    mesh: BowArrowMesh,
    snapshot: MeshSnapshot,
    config: OptimizationConfig,
    solver: Box<dyn BoundedMinimizer + 'a>,
    reporter: ProgressReporter<'a>,
}

impl<'a> DesignSession<'a> {
    /// Takes ownership of the bow body and arrow, in that order.
    ///
    /// The arrow length is fixed here from the arrow's x-extent. The mesh is not
    /// deformed until [`apply_geometry_update`](Self::apply_geometry_update) runs.
    pub fn new(components: Vec<MeshComponent>) -> Result<Self, EngineError> {
        let mesh = BowArrowMesh::from_components(components)?;
        let arrow_length = match mesh.arrow().x_extent() {
            Some((min_x, max_x)) if max_x > min_x => max_x - min_x,
            _ => DEFAULT_ARROW_LENGTH,
        };
        let snapshot = mesh.snapshot();
        let config = OptimizationConfig::default();
        info!(
            bow_vertices = mesh.bow_body().vertex_count(),
            arrow_vertices = mesh.arrow().vertex_count(),
            arrow_length,
            "Design session created."
        );

        Ok(Self {
            state: OptimizerState::new(arrow_length),
            mesh,
            snapshot,
            solver: Box::new(ProjectedGradient::from_config(&config)),
            config,
            reporter: ProgressReporter::new(),
        })
    }

    /// Registers the observer that receives phase events and the
    /// post-update [`Progress::GeometryUpdated`] notification.
    pub fn with_reporter(mut self, reporter: ProgressReporter<'a>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Replaces the optimization settings and rebuilds the default solver from them.
    pub fn with_config(mut self, config: OptimizationConfig) -> Self {
        self.solver = Box::new(ProjectedGradient::from_config(&config));
        self.config = config;
        self
    }

    pub fn with_solver(mut self, solver: Box<dyn BoundedMinimizer + 'a>) -> Self {
        self.solver = solver;
        self
    }

    pub fn state(&self) -> &OptimizerState {
        &self.state
    }

    pub fn parameters(&self) -> &DesignParameters {
        self.state.parameters()
    }

    pub fn mesh(&self) -> &BowArrowMesh {
        &self.mesh
    }

    pub fn snapshot(&self) -> &MeshSnapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &OptimizationConfig {
        &self.config
    }

    pub fn into_mesh(self) -> BowArrowMesh {
        self.mesh
    }

    pub fn apply_profile(
        &mut self,
        name: &str,
        palm_size: Option<f64>,
        preferred_speed: Option<SpeedPreference>,
    ) -> Result<bool, EngineError> {
        self.state.apply_profile(name, palm_size, preferred_speed)
    }

    pub fn refresh_parameters(&mut self, shape: BowShape, requested_arrow: Option<ArrowSettings>) {
        self.state.refresh_parameters(shape, requested_arrow);
    }

    pub fn set_palm_size(&mut self, palm_size: f64) {
        self.state.set_palm_size(palm_size);
    }

    pub fn set_preferred_speed(&mut self, preference: SpeedPreference) -> Result<(), EngineError> {
        self.state.set_preferred_speed(preference)
    }

    /// Rebuilds the live mesh from the snapshot and the current parameters.
    ///
    /// On error the live mesh is left as it was.
    pub fn apply_geometry_update(&mut self) -> Result<(), EngineError> {
        let buffers = deform(&self.snapshot, self.state.parameters())?;
        self.mesh.write_vertices(buffers);
        debug!("Geometry updated from current parameters.");
        self.reporter.report(Progress::GeometryUpdated);
        Ok(())
    }

    pub fn estimate_launch_speed(&self) -> Result<f64, EngineError> {
        let p = self.state.parameters();
        Ok(physics::estimate_launch_speed(
            p.bow_thickness,
            p.bow_curvature,
            p.limb_stiffness,
            p.grip_width,
        )?)
    }

    pub fn estimate_draw_force(&self) -> Result<f64, EngineError> {
        let p = self.state.parameters();
        Ok(physics::estimate_draw_force(
            p.bow_thickness,
            p.bow_curvature,
            p.limb_stiffness,
            p.grip_width,
        )?)
    }

    /// Searches the declared ranges for the shape closest to the targets, applies
    /// it and rebuilds the geometry.
    pub fn optimize_for_performance(
        &mut self,
        target_speed: f64,
        target_force: f64,
        lock_speed: bool,
        lock_force: bool,
    ) -> Result<PerformanceFit, EngineError> {
        let target = PerformanceTarget {
            speed: target_speed,
            force: target_force,
            lock_speed,
            lock_force,
        };
        let fit = optimize::optimize_for_performance(
            &mut self.state,
            &target,
            self.solver.as_ref(),
            &self.reporter,
        )?;
        self.apply_geometry_update()?;
        Ok(fit)
    }

    /// Fits the shape to the current user's profile, applies it and rebuilds the
    /// geometry.
    pub fn optimize_for_profile(&mut self) -> Result<ProfileFit, EngineError> {
        let fit = optimize::optimize_for_profile(
            &mut self.state,
            self.solver.as_ref(),
            &self.config,
            &self.reporter,
        )?;
        self.apply_geometry_update()?;
        Ok(fit)
    }

    pub fn simulate_performance(&self) -> Result<PerformanceResult, EngineError> {
        Ok(simulate(
            self.state.parameters(),
            self.state.current_user(),
            self.state.palm_size(),
        )?)
    }

    pub fn top_clamp_space(&self) -> f64 {
        let p = self.state.parameters();
        physics::estimate_top_clamp_space(
            p.bow_thickness,
            p.bow_curvature,
            p.limb_stiffness,
            self.state.current_user(),
        )
    }

    pub fn print_settings(&self) -> PrintSettings {
        PrintSettings::for_class(self.state.current_user())
    }
}
