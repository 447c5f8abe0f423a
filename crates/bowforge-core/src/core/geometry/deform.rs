use crate::core::constants::{
    DEFAULT_ARROW_LENGTH, DEFAULT_ARROW_TIP_DIAMETER, DEFAULT_BOW_CURVATURE,
    DEFAULT_BOW_THICKNESS, DEFAULT_GRIP_WIDTH,
};
use crate::core::error::{NumericError, check_denominator};
use crate::core::models::mesh::{MeshSnapshot, x_extent};
use crate::core::models::params::DesignParameters;
use nalgebra::Point3;

/// |rel_x| above which limb curvature is applied.
const CURVATURE_REGION: f64 = 0.3;
/// |rel_x| below which the grip is widened or narrowed.
const GRIP_REGION: f64 = 0.3;
/// Open rel_x interval receiving the thickness scale.
const THICKNESS_REGION: (f64, f64) = (-0.5, 0.2);

/// Pre-computed scale factors for one deformation pass.
#[derive(Debug, Clone, Copy)]
struct BowFactors {
    curvature: f64,
    grip: f64,
    thickness: f64,
}

impl BowFactors {
    fn from_params(params: &DesignParameters) -> Self {
        Self {
            curvature: params.bow_curvature / DEFAULT_BOW_CURVATURE,
            grip: params.grip_width / DEFAULT_GRIP_WIDTH,
            thickness: params.bow_thickness / DEFAULT_BOW_THICKNESS,
        }
    }
}

/// Computes the deformed vertex buffers for `params`, bow body first.
///
/// The result depends only on `snapshot` and `params`: calling this twice with
/// the same inputs yields bit-identical buffers. Empty buffers come back empty.
///
/// # Errors
///
/// Returns [`NumericError`] if the bow body has vertices but zero x-extent.
pub fn deform(
    snapshot: &MeshSnapshot,
    params: &DesignParameters,
) -> Result<Vec<Vec<Point3<f64>>>, NumericError> {
    let bow_source = snapshot.bow_body();
    let bow_y_center = mean_y(bow_source).unwrap_or(0.0);

    let bow = deform_bow(bow_source, bow_y_center, params)?;
    let arrow = deform_arrow(snapshot.arrow(), bow_y_center, params);
    Ok(vec![bow, arrow])
}

fn mean_y(vertices: &[Point3<f64>]) -> Option<f64> {
    if vertices.is_empty() {
        return None;
    }
    let sum: f64 = vertices.iter().map(|v| v.y).sum();
    Some(sum / vertices.len() as f64)
}

fn deform_bow(
    source: &[Point3<f64>],
    y_center: f64,
    params: &DesignParameters,
) -> Result<Vec<Point3<f64>>, NumericError> {
    let Some((min_x, max_x)) = x_extent(source) else {
        return Ok(Vec::new());
    };
    let center = (min_x + max_x) / 2.0;
    let half = check_denominator((max_x - min_x) / 2.0, "bow body half-length")?;
    let factors = BowFactors::from_params(params);

    Ok(source
        .iter()
        .map(|v| {
            let rel_x = (v.x - center) / half;
            let mut out = *v;

            if rel_x.abs() > CURVATURE_REGION {
                out.z += factors.curvature * rel_x * rel_x;
            }
            if rel_x.abs() < GRIP_REGION {
                out.y = y_center + (out.y - y_center) * factors.grip;
            }
            // Only the upper surface is thickened.
            if rel_x > THICKNESS_REGION.0 && rel_x < THICKNESS_REGION.1 && out.z >= 0.0 {
                out.z *= factors.thickness;
            }
            out
        })
        .collect())
}

fn deform_arrow(
    source: &[Point3<f64>],
    bow_y_center: f64,
    params: &DesignParameters,
) -> Vec<Point3<f64>> {
    let Some((min_x, max_x)) = x_extent(source) else {
        return Vec::new();
    };
    let center = (min_x + max_x) / 2.0;
    let length_scale = params.arrow_length / DEFAULT_ARROW_LENGTH;
    let tip_scale = params.tip_diameter / DEFAULT_ARROW_TIP_DIAMETER;

    source
        .iter()
        .map(|v| {
            let x = center + (v.x - center) * length_scale;
            let y = (v.y - bow_y_center) * tip_scale + bow_y_center;
            let z = v.z * tip_scale;
            Point3::new(x, y, z)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::mesh::{BowArrowMesh, MeshComponent};

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn point_approx_equal(a: &Point3<f64>, b: &Point3<f64>) -> bool {
        f64_approx_equal(a.x, b.x) && f64_approx_equal(a.y, b.y) && f64_approx_equal(a.z, b.z)
    }

    fn snapshot_with(bow: Vec<Point3<f64>>, arrow: Vec<Point3<f64>>) -> MeshSnapshot {
        BowArrowMesh::from_components(vec![
            MeshComponent::new("bow", bow, vec![]),
            MeshComponent::new("arrow", arrow, vec![]),
        ])
        .unwrap()
        .snapshot()
    }

    // Bow spans x in [-10, 10]; mean y is 0.8.
    fn fixture() -> MeshSnapshot {
        snapshot_with(
            vec![
                Point3::new(-10.0, 0.0, 0.0),
                Point3::new(-4.0, 0.0, 1.0),
                Point3::new(0.0, 2.0, 1.0),
                Point3::new(0.0, 2.0, -1.0),
                Point3::new(10.0, 0.0, 0.0),
            ],
            vec![Point3::new(20.0, 0.0, 0.0), Point3::new(80.0, 1.0, 1.0)],
        )
    }

    #[test]
    fn limb_ends_receive_quadratic_curvature() {
        let params = DesignParameters {
            bow_curvature: 0.6,
            ..DesignParameters::default()
        };
        let out = deform(&fixture(), &params).unwrap();
        // curvature_factor = 2, rel_x = ±1.
        assert!(f64_approx_equal(out[0][0].z, 2.0));
        assert!(f64_approx_equal(out[0][4].z, 2.0));
        // rel_x = -0.4 lies outside the curvature-free centre.
        assert!(f64_approx_equal(out[0][1].z, 1.0 + 2.0 * 0.16));
    }

    #[test]
    fn grip_region_scales_y_about_the_mean() {
        let params = DesignParameters {
            grip_width: 68.0,
            ..DesignParameters::default()
        };
        let out = deform(&fixture(), &params).unwrap();
        assert!(f64_approx_equal(out[0][2].y, 0.8 + (2.0 - 0.8) * 2.0));
        // rel_x = -0.4 is outside the grip.
        assert!(f64_approx_equal(out[0][1].y, 0.0));
    }

    #[test]
    fn thickness_applies_after_curvature_and_only_to_upper_surface() {
        let params = DesignParameters {
            bow_thickness: 16.0,
            ..DesignParameters::default()
        };
        let out = deform(&fixture(), &params).unwrap();
        // rel_x = -0.4: curvature first (1 + 0.16), then doubled.
        assert!(f64_approx_equal(out[0][1].z, (1.0 + 0.16) * 2.0));
        assert!(f64_approx_equal(out[0][2].z, 2.0));
        assert!(f64_approx_equal(out[0][3].z, -1.0));
        // rel_x = -1 is outside the thickness window.
        assert!(f64_approx_equal(out[0][0].z, 1.0));
    }

    #[test]
    fn arrow_scales_length_then_tip_about_bow_centre() {
        let params = DesignParameters {
            arrow_length: 120.0,
            tip_diameter: 16.0,
            ..DesignParameters::default()
        };
        let out = deform(&fixture(), &params).unwrap();
        assert!(point_approx_equal(&out[1][0], &Point3::new(-10.0, 0.8 - 0.8 * 2.0, 0.0)));
        assert!(point_approx_equal(&out[1][1], &Point3::new(110.0, 0.8 + 0.2 * 2.0, 2.0)));
    }

    #[test]
    fn repeated_deformation_is_bit_identical() {
        let params = DesignParameters {
            bow_thickness: 9.3,
            bow_curvature: 0.37,
            grip_width: 29.0,
            ..DesignParameters::default()
        };
        let snapshot = fixture();
        let first = deform(&snapshot, &params).unwrap();
        let second = deform(&snapshot, &params).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_buffers_pass_through() {
        let snapshot = snapshot_with(vec![], vec![]);
        let out = deform(&snapshot, &DesignParameters::default()).unwrap();
        assert!(out[0].is_empty());
        assert!(out[1].is_empty());
    }

    #[test]
    fn zero_width_bow_is_a_numeric_fault() {
        let snapshot = snapshot_with(
            vec![Point3::new(1.0, 0.0, 0.0), Point3::new(1.0, 2.0, 0.0)],
            vec![],
        );
        let err = deform(&snapshot, &DesignParameters::default()).unwrap_err();
        assert_eq!(err.quantity, "bow body half-length");
    }
}
