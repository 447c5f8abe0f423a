pub mod optimize;
pub mod profiles;
pub mod simulate;

use crate::config::models::AppConfig;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use bowforge::core::io::{IndexedMesh, MeshFile, StlFile, split_components};
use bowforge::core::models::mesh::MeshComponent;
use bowforge::engine::progress::ProgressReporter;
use bowforge::engine::session::DesignSession;
use std::path::Path;
use tracing::{debug, info};

pub(crate) fn progress_handler(quiet: bool) -> CliProgressHandler {
    if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    }
}

fn load_components(path: &Path) -> Result<Vec<MeshComponent>> {
    info!("Loading model from {:?}", path);
    let mesh = StlFile::read_from_path(path).map_err(|source| CliError::Mesh {
        path: path.to_path_buf(),
        source,
    })?;
    let components = split_components(&mesh);
    debug!(
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        components = components.len(),
        "Model split into connected components."
    );
    Ok(components)
}

/// Loads the model and applies the configured profile and parameter overrides.
///
/// The returned session has not deformed the mesh yet.
pub(crate) fn open_session(
    config: &AppConfig,
    handler: &CliProgressHandler,
) -> Result<DesignSession<'static>> {
    let components = load_components(&config.input_path)?;
    let mut session = DesignSession::new(components)?
        .with_config(config.optimization.clone())
        .with_reporter(ProgressReporter::with_callback(handler.get_callback()));

    if !session.apply_profile(
        config.profile.as_str(),
        config.palm_size,
        config.preferred_speed,
    )? {
        return Err(CliError::Argument(format!(
            "Profile '{}' was not accepted",
            config.profile
        )));
    }
    info!(profile = %config.profile, "Profile applied.");

    if !config.shape_overrides.is_empty() {
        let shape = config
            .shape_overrides
            .apply_to(session.parameters().shape());
        session.refresh_parameters(shape, None);
        info!("Bow parameter overrides applied.");
    }
    Ok(session)
}

pub(crate) fn write_model(session: &DesignSession, path: &Path) -> Result<()> {
    let mesh = IndexedMesh::from_components(session.mesh().components());
    StlFile::write_to_path(&mesh, path).map_err(|source| CliError::Mesh {
        path: path.to_path_buf(),
        source,
    })?;
    info!(faces = mesh.faces.len(), "Model written to {:?}", path);
    Ok(())
}

pub(crate) fn print_design(session: &DesignSession) -> Result<()> {
    let p = session.parameters();
    println!("Design for {} user:", session.state().current_user());
    println!("  Bow thickness      {:>8.3} mm", p.bow_thickness);
    println!("  Bow curvature      {:>8.3}", p.bow_curvature);
    println!("  Limb stiffness     {:>8.3}", p.limb_stiffness);
    println!("  Grip width         {:>8.3} mm", p.grip_width);
    println!("  Arrow length       {:>8.3} mm", p.arrow_length);
    println!("  Arrow weight       {:>8.3} g", p.arrow_weight);
    println!("  Tip diameter       {:>8.3} mm", p.tip_diameter);
    println!("  Tip length         {:>8.3} mm", p.tip_length);
    println!(
        "  Launch speed       {:>8.3} m/s",
        session.estimate_launch_speed()?
    );
    println!(
        "  Draw force         {:>8.3} N",
        session.estimate_draw_force()?
    );
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use bowforge::core::io::{IndexedMesh, MeshFile, StlFile};
    use bowforge::core::models::mesh::MeshComponent;
    use nalgebra::Point3;
    use std::path::Path;

    fn tetrahedron(name: &str, min_x: f64, max_x: f64) -> MeshComponent {
        let mid = 0.5 * (min_x + max_x);
        MeshComponent::new(
            name,
            vec![
                Point3::new(min_x, 0.0, 0.0),
                Point3::new(max_x, 0.0, 0.0),
                Point3::new(mid, 4.0, 0.0),
                Point3::new(mid, 1.0, 3.0),
            ],
            vec![[0, 1, 2], [0, 3, 1], [0, 2, 3], [1, 3, 2]],
        )
    }

    /// Writes a bow spanning x in [-50, 50] and a 60 mm arrow as one STL file.
    pub fn write_bow_and_arrow(path: &Path) {
        let components = [
            tetrahedron("bow-body", -50.0, 50.0),
            tetrahedron("arrow", 100.0, 160.0),
        ];
        StlFile::write_to_path(&IndexedMesh::from_components(&components), path).unwrap();
    }

    pub fn write_single_part(path: &Path) {
        let components = [tetrahedron("bow-body", -50.0, 50.0)];
        StlFile::write_to_path(&IndexedMesh::from_components(&components), path).unwrap();
    }
}
