use serde::{Deserialize, Serialize};

use crate::error::LoopError;

/// Parameters of the mutual reprojection constraints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutualReprojConfig {
    /// Chi-squared bound on the whitened reprojection error (pixels squared).
    pub chi_sq_threshold: f32,
    /// Keep the Sim3 scale fixed (stereo / RGB-D).
    pub fix_scale: bool,
}

impl Default for MutualReprojConfig {
    fn default() -> Self {
        Self {
            chi_sq_threshold: 5.991, // 95% chi2 with 2 DOF
            fix_scale: false,
        }
    }
}

impl MutualReprojConfig {
    /// Threshold handed to the Huber kernel of each edge.
    pub fn robust_delta(&self) -> f32 {
        self.chi_sq_threshold.sqrt()
    }

    /// Check the configuration values.
    pub fn validate(&self) -> Result<(), LoopError> {
        if !(self.chi_sq_threshold.is_finite() && self.chi_sq_threshold > 0.0) {
            return Err(LoopError::InvalidConfig(format!(
                "chi_sq_threshold must be positive and finite, got {}",
                self.chi_sq_threshold
            )));
        }
        Ok(())
    }
}
