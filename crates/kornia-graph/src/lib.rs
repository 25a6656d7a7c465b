#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Kornia Graph
//!
//! Building blocks of a Sim(3) optimization problem as used when closing a
//! loop in visual SLAM:
//!
//! - [`Sim3Vertex`]: the relative similarity transform being estimated.
//! - [`ReprojEdge`]: reprojection constraints, one concrete type per
//!   camera model and direction.
//! - [`HuberKernel`]: robust kernel attached to each edge.
//! - [`Graph`]: owner of vertices and edges, addressed through handles.
//!
//! ## Example
//!
//! ```rust
//! use kornia_graph::{Graph, PerspectiveForwardReprojEdge, ReprojEdge, Sim3, Sim3Vertex};
//!
//! let mut graph = Graph::new();
//! let vtx = graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY));
//!
//! let mut edge = PerspectiveForwardReprojEdge::new(500.0, 500.0, 320.0, 240.0);
//! edge.set_vertex(vtx);
//! let id = graph.add_edge(Box::new(edge)).unwrap();
//! assert_eq!(graph[id].level(), 0);
//! ```

/// Reprojection edges and their camera-specific variants.
pub mod edge;

/// Graph owning vertices and edges.
pub mod graph;

/// Robust kernels.
pub mod kernel;

/// Similarity transform Sim(3).
pub mod sim3;

/// Transform vertices.
pub mod vertex;

pub use edge::{
    Backward, Direction, EdgeData, EdgeDirection, EdgeIntrinsics,
    EquirectangularBackwardReprojEdge, EquirectangularForwardReprojEdge,
    EquirectangularReprojEdge, Forward, PerspectiveBackwardReprojEdge,
    PerspectiveForwardReprojEdge, PerspectiveReprojEdge, ReprojEdge, ACTIVE_LEVEL,
    SUPPRESSED_LEVEL,
};
pub use graph::{EdgeId, Graph, GraphError};
pub use kernel::{HuberKernel, RobustKernel};
pub use sim3::Sim3;
pub use vertex::{Sim3Vertex, VertexId};
