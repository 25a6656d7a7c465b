use kornia_graph::GraphError;
use thiserror::Error;

use crate::camera::CameraModelType;

/// Errors raised while building loop-closure constraints.
#[derive(Debug, Error)]
pub enum LoopError {
    /// No Sim3 reprojection edge exists for the camera model of a shot
    #[error("Unsupported camera model for Sim3 reprojection: {model}")]
    UnsupportedCameraModel {
        /// Model of the offending shot.
        model: CameraModelType,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The optimization graph rejected an edge
    #[error(transparent)]
    Graph(#[from] GraphError),
}
