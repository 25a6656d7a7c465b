//! Reprojection edges attached to a [`Sim3Vertex`](crate::Sim3Vertex).
//!
//! An edge binds the shared transform `S_12` to one fixed 2D observation and
//! one fixed 3D point. Forward edges map a point expressed in shot 2 into the
//! image of shot 1 through `S_12`; backward edges map a point of shot 1 into
//! the image of shot 2 through `S_12^-1`. The projection itself depends on the
//! camera model, so each model has its own edge type.

use std::marker::PhantomData;

use glam::{Mat2, Vec2, Vec3A};

use crate::kernel::RobustKernel;
use crate::vertex::VertexId;

/// Level of an edge taking part in the optimization.
pub const ACTIVE_LEVEL: u32 = 0;

/// Level assigned to edges excluded from the optimization.
pub const SUPPRESSED_LEVEL: u32 = 1;

/// Sense in which an edge uses the shared transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeDirection {
    /// Uses `S_12` directly.
    Forward,
    /// Uses `S_12^-1`.
    Backward,
}

/// Type-level marker selecting the direction of an edge.
pub trait Direction: Send + Sync + std::fmt::Debug + 'static {
    /// Runtime value of the marker.
    const KIND: EdgeDirection;
}

/// Marker for forward edges.
#[derive(Debug, Clone, Copy)]
pub struct Forward;

/// Marker for backward edges.
#[derive(Debug, Clone, Copy)]
pub struct Backward;

impl Direction for Forward {
    const KIND: EdgeDirection = EdgeDirection::Forward;
}

impl Direction for Backward {
    const KIND: EdgeDirection = EdgeDirection::Backward;
}

/// Camera intrinsics copied into an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeIntrinsics {
    /// Pinhole projection on undistorted keypoints.
    Perspective {
        /// Focal length in x
        fx: f32,
        /// Focal length in y
        fy: f32,
        /// Principal point x
        cx: f32,
        /// Principal point y
        cy: f32,
    },
    /// Spherical projection onto a full panorama.
    Equirectangular {
        /// Image width in pixels
        cols: f32,
        /// Image height in pixels
        rows: f32,
    },
}

/// State shared by every reprojection edge.
#[derive(Debug, Default)]
pub struct EdgeData {
    measurement: Vec2,
    information: Mat2,
    pos_w: Vec3A,
    vertex: Option<VertexId>,
    kernel: Option<Box<dyn RobustKernel>>,
    level: u32,
}

/// Common interface of the reprojection edges stored in a [`crate::Graph`].
pub trait ReprojEdge: Send + Sync + std::fmt::Debug {
    /// Shared edge state.
    fn data(&self) -> &EdgeData;

    /// Mutable shared edge state.
    fn data_mut(&mut self) -> &mut EdgeData;

    /// Sense in which the edge uses the transform.
    fn direction(&self) -> EdgeDirection;

    /// Camera intrinsics used by the projection.
    fn intrinsics(&self) -> EdgeIntrinsics;

    /// Observed keypoint in pixels.
    fn measurement(&self) -> Vec2 {
        self.data().measurement
    }

    /// Set the observed keypoint.
    fn set_measurement(&mut self, measurement: Vec2) {
        self.data_mut().measurement = measurement;
    }

    /// Information matrix (inverse covariance) of the observation.
    fn information(&self) -> Mat2 {
        self.data().information
    }

    /// Set the information matrix.
    fn set_information(&mut self, information: Mat2) {
        self.data_mut().information = information;
    }

    /// 3D point reprojected by the edge.
    fn point(&self) -> Vec3A {
        self.data().pos_w
    }

    /// Set the 3D point. The value is copied, later landmark updates are not seen.
    fn set_point(&mut self, pos_w: Vec3A) {
        self.data_mut().pos_w = pos_w;
    }

    /// Vertex the edge is bound to, if any.
    fn vertex(&self) -> Option<VertexId> {
        self.data().vertex
    }

    /// Bind the edge to a transform vertex.
    fn set_vertex(&mut self, vertex: VertexId) {
        self.data_mut().vertex = Some(vertex);
    }

    /// Robust kernel attached to the edge, if any.
    fn robust_kernel(&self) -> Option<&dyn RobustKernel> {
        self.data().kernel.as_deref()
    }

    /// Attach a robust kernel, replacing the previous one.
    fn set_robust_kernel(&mut self, kernel: Box<dyn RobustKernel>) {
        self.data_mut().kernel = Some(kernel);
    }

    /// Optimization level, [`ACTIVE_LEVEL`] when the edge takes part in the solve.
    fn level(&self) -> u32 {
        self.data().level
    }

    /// Set the optimization level.
    fn set_level(&mut self, level: u32) {
        self.data_mut().level = level;
    }
}

/// Reprojection edge for perspective (and fisheye, once undistorted) cameras.
#[derive(Debug)]
pub struct PerspectiveReprojEdge<D: Direction> {
    data: EdgeData,
    /// Focal length in x
    pub fx: f32,
    /// Focal length in y
    pub fy: f32,
    /// Principal point x
    pub cx: f32,
    /// Principal point y
    pub cy: f32,
    _direction: PhantomData<D>,
}

impl<D: Direction> PerspectiveReprojEdge<D> {
    /// Create an unbound edge with the given intrinsics.
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32) -> Self {
        Self {
            data: EdgeData::default(),
            fx,
            fy,
            cx,
            cy,
            _direction: PhantomData,
        }
    }
}

impl<D: Direction> ReprojEdge for PerspectiveReprojEdge<D> {
    fn data(&self) -> &EdgeData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut EdgeData {
        &mut self.data
    }

    fn direction(&self) -> EdgeDirection {
        D::KIND
    }

    fn intrinsics(&self) -> EdgeIntrinsics {
        EdgeIntrinsics::Perspective {
            fx: self.fx,
            fy: self.fy,
            cx: self.cx,
            cy: self.cy,
        }
    }
}

/// Reprojection edge for equirectangular (360°) cameras.
#[derive(Debug)]
pub struct EquirectangularReprojEdge<D: Direction> {
    data: EdgeData,
    /// Image width in pixels
    pub cols: f32,
    /// Image height in pixels
    pub rows: f32,
    _direction: PhantomData<D>,
}

impl<D: Direction> EquirectangularReprojEdge<D> {
    /// Create an unbound edge for a panorama of `cols` x `rows` pixels.
    pub fn new(cols: f32, rows: f32) -> Self {
        Self {
            data: EdgeData::default(),
            cols,
            rows,
            _direction: PhantomData,
        }
    }
}

impl<D: Direction> ReprojEdge for EquirectangularReprojEdge<D> {
    fn data(&self) -> &EdgeData {
        &self.data
    }

    fn data_mut(&mut self) -> &mut EdgeData {
        &mut self.data
    }

    fn direction(&self) -> EdgeDirection {
        D::KIND
    }

    fn intrinsics(&self) -> EdgeIntrinsics {
        EdgeIntrinsics::Equirectangular {
            cols: self.cols,
            rows: self.rows,
        }
    }
}

/// Perspective edge projecting a point of shot 2 into shot 1.
pub type PerspectiveForwardReprojEdge = PerspectiveReprojEdge<Forward>;
/// Perspective edge projecting a point of shot 1 into shot 2.
pub type PerspectiveBackwardReprojEdge = PerspectiveReprojEdge<Backward>;
/// Equirectangular edge projecting a point of shot 2 into shot 1.
pub type EquirectangularForwardReprojEdge = EquirectangularReprojEdge<Forward>;
/// Equirectangular edge projecting a point of shot 1 into shot 2.
pub type EquirectangularBackwardReprojEdge = EquirectangularReprojEdge<Backward>;
