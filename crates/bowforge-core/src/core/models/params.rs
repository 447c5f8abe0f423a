use crate::core::constants::{
    DEFAULT_ARROW_LENGTH, DEFAULT_ARROW_TIP_DIAMETER, DEFAULT_ARROW_TIP_LENGTH,
    DEFAULT_ARROW_WEIGHT, DEFAULT_BOW_CURVATURE, DEFAULT_BOW_THICKNESS, DEFAULT_GRIP_WIDTH,
    DEFAULT_LIMB_STIFFNESS, ParameterBounds,
};
use serde::{Deserialize, Serialize};

/// The four bow variables searched by the optimizer.
///
/// Ordering is fixed (thickness, curvature, stiffness, grip width) and matches
/// [`ParameterBounds::as_array`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BowShape {
    /// Limb thickness (mm).
    pub thickness: f64,
    /// Limb curvature ratio.
    pub curvature: f64,
    /// Limb stiffness ratio.
    pub stiffness: f64,
    /// Grip width (mm).
    pub grip_width: f64,
}

impl BowShape {
    pub const fn new(thickness: f64, curvature: f64, stiffness: f64, grip_width: f64) -> Self {
        Self {
            thickness,
            curvature,
            stiffness,
            grip_width,
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.thickness, self.curvature, self.stiffness, self.grip_width]
    }

    pub fn from_array(x: [f64; 4]) -> Self {
        Self::new(x[0], x[1], x[2], x[3])
    }

    /// Returns a copy with every variable clamped into `bounds`.
    pub fn clamped(self, bounds: &ParameterBounds) -> Self {
        Self {
            thickness: bounds.thickness.clamp(self.thickness),
            curvature: bounds.curvature.clamp(self.curvature),
            stiffness: bounds.stiffness.clamp(self.stiffness),
            grip_width: bounds.grip_width.clamp(self.grip_width),
        }
    }
}

impl Default for BowShape {
    fn default() -> Self {
        Self::new(
            DEFAULT_BOW_THICKNESS,
            DEFAULT_BOW_CURVATURE,
            DEFAULT_LIMB_STIFFNESS,
            DEFAULT_GRIP_WIDTH,
        )
    }
}

/// Arrow values a caller may propose alongside a bow update.
///
/// Only `length` is ever meaningful to a design session, and even that is
/// ignored: the arrow length is bound to the loaded mesh, and weight and tip
/// diameter are always recomputed from the bow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrowSettings {
    pub length: f64,
    pub weight: f64,
    pub tip_diameter: f64,
}

/// The complete set of live design variables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignParameters {
    /// Limb thickness (mm).
    pub bow_thickness: f64,
    /// Limb curvature ratio.
    pub bow_curvature: f64,
    /// Limb stiffness ratio.
    pub limb_stiffness: f64,
    /// Grip width (mm).
    pub grip_width: f64,
    /// Arrow length (mm), fixed at model-load time.
    pub arrow_length: f64,
    /// Arrow mass (g).
    pub arrow_weight: f64,
    /// Arrow tip diameter (mm).
    pub tip_diameter: f64,
    /// Arrow tip length (mm).
    pub tip_length: f64,
}

impl DesignParameters {
    /// Default bow and arrow values with the given mesh-derived arrow length.
    pub fn with_arrow_length(arrow_length: f64) -> Self {
        Self {
            arrow_length,
            ..Self::default()
        }
    }

    pub fn shape(&self) -> BowShape {
        BowShape::new(
            self.bow_thickness,
            self.bow_curvature,
            self.limb_stiffness,
            self.grip_width,
        )
    }

    pub fn arrow(&self) -> ArrowSettings {
        ArrowSettings {
            length: self.arrow_length,
            weight: self.arrow_weight,
            tip_diameter: self.tip_diameter,
        }
    }

    pub(crate) fn set_shape(&mut self, shape: BowShape) {
        self.bow_thickness = shape.thickness;
        self.bow_curvature = shape.curvature;
        self.limb_stiffness = shape.stiffness;
        self.grip_width = shape.grip_width;
    }
}

impl Default for DesignParameters {
    fn default() -> Self {
        Self {
            bow_thickness: DEFAULT_BOW_THICKNESS,
            bow_curvature: DEFAULT_BOW_CURVATURE,
            limb_stiffness: DEFAULT_LIMB_STIFFNESS,
            grip_width: DEFAULT_GRIP_WIDTH,
            arrow_length: DEFAULT_ARROW_LENGTH,
            arrow_weight: DEFAULT_ARROW_WEIGHT,
            tip_diameter: DEFAULT_ARROW_TIP_DIAMETER,
            tip_length: DEFAULT_ARROW_TIP_LENGTH,
        }
    }
}
