use thiserror::Error;

use super::config::ConfigError;
use crate::core::error::NumericError;
use crate::core::models::mesh::MeshError;
use crate::core::models::profile::ProfileError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Expected exactly {expected} mesh components (bow body, arrow), found {found}")]
    InvalidComponentCount { expected: usize, found: usize },

    #[error("Invalid mesh: {0}")]
    InvalidMesh(MeshError),

    #[error("Numeric fault while computing {quantity}: zero or non-finite denominator")]
    Numeric { quantity: &'static str },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Profile error: {0}")]
    Profile(#[from] ProfileError),

    #[error("Optimization phase '{phase}' failed: {reason}")]
    PhaseFailed { phase: &'static str, reason: String },
}

impl From<NumericError> for EngineError {
    fn from(err: NumericError) -> Self {
        EngineError::Numeric {
            quantity: err.quantity,
        }
    }
}

impl From<MeshError> for EngineError {
    fn from(err: MeshError) -> Self {
        match err {
            MeshError::InvalidComponentCount { expected, found } => {
                EngineError::InvalidComponentCount { expected, found }
            }
            other => EngineError::InvalidMesh(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_count_mesh_error_is_promoted() {
        let err: EngineError = MeshError::InvalidComponentCount {
            expected: 2,
            found: 3,
        }
        .into();
        assert!(matches!(
            err,
            EngineError::InvalidComponentCount {
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn other_mesh_errors_stay_wrapped() {
        let err: EngineError = MeshError::FaceIndexOutOfRange {
            component: "arrow".to_string(),
            face: 0,
            vertex: 9,
            vertex_count: 3,
        }
        .into();
        assert!(matches!(err, EngineError::InvalidMesh(_)));
    }

    #[test]
    fn numeric_error_keeps_its_quantity() {
        let err: EngineError = NumericError::new("beam length").into();
        assert!(err.to_string().contains("beam length"));
    }
}
