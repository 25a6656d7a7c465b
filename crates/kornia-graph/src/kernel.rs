//! Robust kernels bounding the influence of large residuals.

/// Trait for robust kernels attached to an edge.
///
/// A kernel is parameterized by a single threshold `delta` expressed in the
/// unit of the residual norm (e.g. the square root of a chi-squared bound).
pub trait RobustKernel: Send + Sync + std::fmt::Debug {
    /// Threshold of the kernel.
    fn delta(&self) -> f32;

    /// Replace the threshold. Panics if `delta <= 0`.
    fn set_delta(&mut self, delta: f32);

    /// Compute the weight applied to an edge for its squared (whitened) error.
    fn weight(&self, squared_norm: f32) -> f32;
}

/// Huber kernel: quadratic below `delta`, linear above.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HuberKernel {
    delta: f32,
}

impl HuberKernel {
    /// Create a kernel with threshold `delta`.
    ///
    /// # Panics
    ///
    /// Panics if `delta` is not positive.
    pub fn new(delta: f32) -> Self {
        let mut kernel = Self { delta: 1.0 };
        kernel.set_delta(delta);
        kernel
    }
}

impl RobustKernel for HuberKernel {
    fn delta(&self) -> f32 {
        self.delta
    }

    fn set_delta(&mut self, delta: f32) {
        assert!(delta > 0.0, "Huber delta must be positive, got {}", delta);
        self.delta = delta;
    }

    fn weight(&self, squared_norm: f32) -> f32 {
        let norm = squared_norm.sqrt();
        if norm > self.delta {
            self.delta / norm
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huber_kernel_weights() {
        // chi2 bound of 2 DOF at 95%
        let huber = HuberKernel::new(5.991f32.sqrt());
        assert_eq!(huber.weight(0.0), 1.0);
        assert_eq!(huber.weight(5.0), 1.0);

        // a 10 px error is down-weighted to delta / 10
        let w = huber.weight(100.0);
        assert!((w - 5.991f32.sqrt() / 10.0).abs() < 1e-6);
        assert!(w > 0.0 && w < 1.0);
        assert!(huber.weight(f32::MAX).is_finite());
    }

    #[test]
    fn test_huber_kernel_set_delta() {
        let mut huber = HuberKernel::new(1.0);
        huber.set_delta(2.0);
        assert_eq!(huber.delta(), 2.0);
        assert_eq!(huber.weight(4.0), 1.0);
    }

    #[test]
    #[should_panic(expected = "Huber delta must be positive")]
    fn test_huber_kernel_zero_delta_panics() {
        HuberKernel::new(0.0);
    }

    #[test]
    #[should_panic(expected = "Huber delta must be positive")]
    fn test_huber_kernel_negative_set_delta_panics() {
        let mut huber = HuberKernel::new(1.0);
        huber.set_delta(-1.0);
    }
}
