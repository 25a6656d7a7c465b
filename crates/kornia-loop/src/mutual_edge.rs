//! Mutual reprojection constraint between two shots.
//!
//! A correspondence between feature `idx1` of shot 1 (observing landmark 1)
//! and feature `idx2` of shot 2 (observing landmark 2) produces two edges on
//! the shared transform `S_12`:
//!
//! - the forward edge reprojects landmark 2 into shot 1, using the camera
//!   model and keypoint of shot 1;
//! - the backward edge reprojects landmark 1 into shot 2, using the camera
//!   model and keypoint of shot 2.
//!
//! The landmarks are crossed on purpose: the pair only has a small error when
//! each landmark lands on the feature matched in the other shot.

use glam::{Mat2, Vec3A};
use kornia_graph::{
    Backward, Direction, EdgeId, EquirectangularReprojEdge, Forward, Graph, HuberKernel,
    PerspectiveReprojEdge, ReprojEdge, VertexId, ACTIVE_LEVEL, SUPPRESSED_LEVEL,
};

use crate::camera::Camera;
use crate::data::{Landmark, Shot};
use crate::error::LoopError;

/// Inlier/outlier view over the two edges of a mutual constraint.
///
/// The pair is an inlier only when both edges are active. Setting the status
/// always writes the same level to both edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgePair {
    /// Edge reprojecting landmark 2 into shot 1.
    pub forward: EdgeId,
    /// Edge reprojecting landmark 1 into shot 2.
    pub backward: EdgeId,
}

impl EdgePair {
    /// Whether both edges take part in the optimization.
    pub fn is_inlier(&self, graph: &Graph) -> bool {
        graph[self.forward].level() == ACTIVE_LEVEL
            && graph[self.backward].level() == ACTIVE_LEVEL
    }

    /// Whether at least one edge is suppressed.
    pub fn is_outlier(&self, graph: &Graph) -> bool {
        !self.is_inlier(graph)
    }

    /// Re-enable both edges.
    pub fn mark_inlier(&self, graph: &mut Graph) {
        self.set_level(graph, ACTIVE_LEVEL);
    }

    /// Suppress both edges without removing them from the graph.
    pub fn mark_outlier(&self, graph: &mut Graph) {
        self.set_level(graph, SUPPRESSED_LEVEL);
    }

    fn set_level(&self, graph: &mut Graph, level: u32) {
        graph[self.forward].set_level(level);
        graph[self.backward].set_level(level);
    }
}

/// A mutual reprojection constraint together with the observations it was built from.
#[derive(Debug)]
pub struct MutualReprojEdge<'a, S, L> {
    /// Handles of the two edges in the graph.
    pub edges: EdgePair,
    /// First shot
    pub shot1: &'a S,
    /// Feature index in the first shot
    pub idx1: usize,
    /// Landmark observed by the first shot
    pub lm1: &'a L,
    /// Second shot
    pub shot2: &'a S,
    /// Feature index in the second shot
    pub idx2: usize,
    /// Landmark observed by the second shot
    pub lm2: &'a L,
}

impl<'a, S: Shot, L: Landmark> MutualReprojEdge<'a, S, L> {
    /// Build both edges of the constraint and register them in `graph`.
    ///
    /// The landmark positions are copied at construction time.
    ///
    /// # Arguments
    ///
    /// * `graph` - Graph taking ownership of the edges.
    /// * `shot1`, `idx1`, `lm1` - First observation.
    /// * `shot2`, `idx2`, `lm2` - Second observation.
    /// * `sim3_12_vtx` - Shared transform vertex, must belong to `graph`.
    /// * `sqrt_chi_sq` - Huber threshold, the square root of the chi-squared bound.
    ///
    /// # Errors
    ///
    /// Fails with [`LoopError::UnsupportedCameraModel`] if either shot uses a
    /// camera without Sim3 edges, or with [`LoopError::Graph`] if the vertex
    /// is not in the graph. On error the graph is left untouched.
    ///
    /// # Panics
    ///
    /// Panics if `sqrt_chi_sq` is not positive, or if a feature index or its
    /// octave is out of range.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        graph: &mut Graph,
        shot1: &'a S,
        idx1: usize,
        lm1: &'a L,
        shot2: &'a S,
        idx2: usize,
        lm2: &'a L,
        sim3_12_vtx: VertexId,
        sqrt_chi_sq: f32,
    ) -> Result<Self, LoopError> {
        assert!(
            sqrt_chi_sq > 0.0,
            "robust kernel threshold must be positive, got {}",
            sqrt_chi_sq
        );

        // landmark 2 is reprojected into shot 1, landmark 1 into shot 2
        let edge_12 =
            create_forward_edge(shot1, idx1, lm2.pos_in_world(), sim3_12_vtx, sqrt_chi_sq)?;
        let edge_21 =
            create_backward_edge(shot2, idx2, lm1.pos_in_world(), sim3_12_vtx, sqrt_chi_sq)?;
        let (forward, backward) = graph.add_edge_pair(edge_12, edge_21)?;

        log::debug!(
            "mutual edge {}<->{} on vertex {}: edges {} and {}",
            idx1,
            idx2,
            sim3_12_vtx.index(),
            forward.index(),
            backward.index()
        );

        Ok(Self {
            edges: EdgePair { forward, backward },
            shot1,
            idx1,
            lm1,
            shot2,
            idx2,
            lm2,
        })
    }
}

impl<S, L> MutualReprojEdge<'_, S, L> {
    /// Whether both edges take part in the optimization.
    pub fn is_inlier(&self, graph: &Graph) -> bool {
        self.edges.is_inlier(graph)
    }

    /// Whether at least one edge is suppressed.
    pub fn is_outlier(&self, graph: &Graph) -> bool {
        self.edges.is_outlier(graph)
    }

    /// Re-enable both edges.
    pub fn mark_inlier(&self, graph: &mut Graph) {
        self.edges.mark_inlier(graph);
    }

    /// Suppress both edges.
    pub fn mark_outlier(&self, graph: &mut Graph) {
        self.edges.mark_outlier(graph);
    }

    /// Remove both edges from the graph, discarding the correspondence.
    pub fn detach(self, graph: &mut Graph) {
        graph.remove_edge(self.edges.forward);
        graph.remove_edge(self.edges.backward);
    }
}

/// Create the edge reprojecting `pos_w` (a point of shot 2) into `shot`.
///
/// The returned edge is not registered in any graph.
pub fn create_forward_edge<S: Shot>(
    shot: &S,
    idx: usize,
    pos_w: Vec3A,
    sim3_12_vtx: VertexId,
    sqrt_chi_sq: f32,
) -> Result<Box<dyn ReprojEdge>, LoopError> {
    create_edge::<Forward, S>(shot, idx, pos_w, sim3_12_vtx, sqrt_chi_sq)
}

/// Create the edge reprojecting `pos_w` (a point of shot 1) into `shot`.
///
/// The returned edge is not registered in any graph.
pub fn create_backward_edge<S: Shot>(
    shot: &S,
    idx: usize,
    pos_w: Vec3A,
    sim3_12_vtx: VertexId,
    sqrt_chi_sq: f32,
) -> Result<Box<dyn ReprojEdge>, LoopError> {
    create_edge::<Backward, S>(shot, idx, pos_w, sim3_12_vtx, sqrt_chi_sq)
}

fn create_edge<D: Direction, S: Shot>(
    shot: &S,
    idx: usize,
    pos_w: Vec3A,
    sim3_12_vtx: VertexId,
    sqrt_chi_sq: f32,
) -> Result<Box<dyn ReprojEdge>, LoopError> {
    // fisheye keypoints are undistorted, so the pinhole projection applies
    let mut edge: Box<dyn ReprojEdge> = match shot.camera() {
        Camera::Perspective(c) => Box::new(PerspectiveReprojEdge::<D>::new(c.fx, c.fy, c.cx, c.cy)),
        Camera::Fisheye(c) => Box::new(PerspectiveReprojEdge::<D>::new(c.fx, c.fy, c.cx, c.cy)),
        Camera::Equirectangular(c) => Box::new(EquirectangularReprojEdge::<D>::new(
            c.cols as f32,
            c.rows as f32,
        )),
        Camera::RadialDivision(_) => {
            let model = shot.camera().model_type();
            log::warn!("no Sim3 reprojection edge for {} camera", model);
            return Err(LoopError::UnsupportedCameraModel { model });
        }
    };

    let undist_keypt = &shot.undist_keypoints()[idx];
    let inv_sigma_sq = shot.inv_level_sigma_sq()[undist_keypt.octave];
    edge.set_measurement(undist_keypt.pt);
    edge.set_information(Mat2::IDENTITY * inv_sigma_sq);
    edge.set_point(pos_w);
    edge.set_vertex(sim3_12_vtx);
    edge.set_robust_kernel(Box::new(HuberKernel::new(sqrt_chi_sq)));

    Ok(edge)
}
