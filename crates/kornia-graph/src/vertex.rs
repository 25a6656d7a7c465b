use crate::sim3::Sim3;

/// Handle to a vertex owned by a [`crate::Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    /// Position of the vertex in the graph's storage.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Optimization variable holding the relative similarity transform `S_12`
/// between two shots.
///
/// Every reprojection edge built for a correspondence between the same two
/// shots binds to one shared instance of this vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Sim3Vertex {
    /// Current estimate of the transform.
    pub estimate: Sim3,
    /// Keep the scale at its initial value (stereo / RGB-D, where scale is observable).
    pub fix_scale: bool,
}

impl Sim3Vertex {
    /// Create a free vertex with the given initial estimate.
    pub fn new(estimate: Sim3) -> Self {
        Self {
            estimate,
            fix_scale: false,
        }
    }

    /// Builder-style toggle for [`Sim3Vertex::fix_scale`].
    pub fn with_fixed_scale(mut self, fix_scale: bool) -> Self {
        self.fix_scale = fix_scale;
        self
    }

    /// Local (tangent space) dimension seen by the optimizer.
    pub fn local_dim(&self) -> usize {
        if self.fix_scale {
            6
        } else {
            7
        }
    }
}
