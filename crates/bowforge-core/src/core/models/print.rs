use super::profile::UserClass;
use serde::Serialize;

/// Slicer recommendation for printing a design tailored to one user class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrintSettings {
    pub material: &'static str,
    pub layer_height_mm: f64,
    pub infill_percent: u8,
    pub supports: bool,
    pub instructions: &'static str,
}

impl PrintSettings {
    pub fn for_class(class: UserClass) -> Self {
        match class {
            UserClass::Child => Self {
                material: "PLA or TPU",
                layer_height_mm: 0.2,
                infill_percent: 20,
                supports: false,
                instructions: "Print bow limbs with TPU for extra safety and flexibility",
            },
            UserClass::Adult => Self {
                material: "PLA or PETG",
                layer_height_mm: 0.16,
                infill_percent: 25,
                supports: false,
                instructions: "Standard printing orientation is recommended",
            },
            UserClass::Professional => Self {
                material: "PETG or Nylon",
                layer_height_mm: 0.12,
                infill_percent: 30,
                supports: false,
                instructions: "Print bow at 45° angle for better layer adhesion and strength",
            },
        }
    }
}
