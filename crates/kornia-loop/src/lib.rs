#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Loop
//!
//! When a loop is detected between two keyframes, the relative similarity
//! transform `S_12` between them is refined from the matched features. Each
//! match contributes a pair of reprojection edges on the shared transform
//! vertex: one reprojects the landmark of shot 2 into shot 1, the other the
//! landmark of shot 1 into shot 2. Pairs are toggled between inlier and
//! outlier by the robustification loop of the optimizer.
//!
//! ## Example
//!
//! ```rust
//! use glam::Vec3A;
//! use kornia_graph::{Graph, Sim3, Sim3Vertex};
//! use kornia_loop::{
//!     Camera, EquirectangularCamera, KeyPoint, Landmark, MutualReprojConfig, MutualReprojEdge,
//!     Shot,
//! };
//!
//! struct Keyframe {
//!     camera: Camera,
//!     keypts: Vec<KeyPoint>,
//!     inv_level_sigma_sq: Vec<f32>,
//! }
//!
//! impl Shot for Keyframe {
//!     fn camera(&self) -> &Camera {
//!         &self.camera
//!     }
//!     fn undist_keypoints(&self) -> &[KeyPoint] {
//!         &self.keypts
//!     }
//!     fn inv_level_sigma_sq(&self) -> &[f32] {
//!         &self.inv_level_sigma_sq
//!     }
//! }
//!
//! struct MapPoint(Vec3A);
//!
//! impl Landmark for MapPoint {
//!     fn pos_in_world(&self) -> Vec3A {
//!         self.0
//!     }
//! }
//!
//! let kf = Keyframe {
//!     camera: Camera::Equirectangular(EquirectangularCamera::new(1024, 512)),
//!     keypts: vec![KeyPoint::new(512.0, 256.0, 0)],
//!     inv_level_sigma_sq: kornia_loop::inv_level_sigma_sq(1.2, 8),
//! };
//! let (lm1, lm2) = (MapPoint(Vec3A::Z), MapPoint(Vec3A::X));
//!
//! let config = MutualReprojConfig::default();
//! config.validate().unwrap();
//! let mut graph = Graph::new();
//! let vtx = graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY));
//!
//! let edge = MutualReprojEdge::new(
//!     &mut graph,
//!     &kf,
//!     0,
//!     &lm1,
//!     &kf,
//!     0,
//!     &lm2,
//!     vtx,
//!     config.robust_delta(),
//! )
//! .unwrap();
//! assert!(edge.is_inlier(&graph));
//! ```

/// Camera models.
pub mod camera;

/// Configuration of the constraints.
pub mod config;

/// Shot and landmark views.
pub mod data;

/// Collections of mutual constraints.
pub mod edge_set;

/// Error types.
pub mod error;

/// Mutual reprojection constraint.
pub mod mutual_edge;

pub use camera::{
    Camera, CameraModelType, EquirectangularCamera, FisheyeCamera, PerspectiveCamera,
    RadialDivisionCamera,
};
pub use config::MutualReprojConfig;
pub use data::{inv_level_sigma_sq, KeyPoint, Landmark, Shot};
pub use edge_set::MutualReprojEdges;
pub use error::LoopError;
pub use mutual_edge::{create_backward_edge, create_forward_edge, EdgePair, MutualReprojEdge};
