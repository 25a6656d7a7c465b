//! Graph owning the vertices and edges of a Sim3 optimization problem.
//!
//! The graph is the only owner of its edges. Callers keep [`EdgeId`] handles
//! to query or toggle an edge between solver rounds.

use thiserror::Error;

use crate::edge::{ReprojEdge, ACTIVE_LEVEL};
use crate::vertex::{Sim3Vertex, VertexId};

/// Errors that can occur when registering elements in a [`Graph`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GraphError {
    /// The edge references a vertex not present in the graph
    #[error("Vertex {index} not found")]
    VertexNotFound {
        /// Index of the missing vertex.
        index: usize,
    },
    /// The edge was never bound to a vertex
    #[error("Edge is not bound to any vertex")]
    UnboundEdge,
}

/// Handle to an edge owned by a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Position of the edge in the graph's storage.
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A Sim3 optimization graph containing transform vertices and reprojection edges.
#[derive(Debug, Default)]
pub struct Graph {
    vertices: Vec<Sim3Vertex>,
    /// Removed edges leave an empty slot so that existing handles stay stable.
    edges: Vec<Option<Box<dyn ReprojEdge>>>,
}

impl Graph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transform vertex and return its handle.
    pub fn add_vertex(&mut self, vertex: Sim3Vertex) -> VertexId {
        self.vertices.push(vertex);
        VertexId(self.vertices.len() - 1)
    }

    /// Get a vertex by handle.
    pub fn vertex(&self, id: VertexId) -> Option<&Sim3Vertex> {
        self.vertices.get(id.0)
    }

    /// Get a mutable vertex by handle.
    pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Sim3Vertex> {
        self.vertices.get_mut(id.0)
    }

    /// Number of vertices in the graph.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Register an edge. The edge must already be bound to a vertex of this graph.
    pub fn add_edge(&mut self, edge: Box<dyn ReprojEdge>) -> Result<EdgeId, GraphError> {
        self.check_binding(&*edge)?;
        self.edges.push(Some(edge));
        Ok(EdgeId(self.edges.len() - 1))
    }

    /// Register two edges together.
    ///
    /// Both edges are validated before either is inserted, so on error the
    /// graph is left untouched.
    pub fn add_edge_pair(
        &mut self,
        first: Box<dyn ReprojEdge>,
        second: Box<dyn ReprojEdge>,
    ) -> Result<(EdgeId, EdgeId), GraphError> {
        self.check_binding(&*first)?;
        self.check_binding(&*second)?;
        self.edges.push(Some(first));
        self.edges.push(Some(second));
        let n = self.edges.len();
        Ok((EdgeId(n - 2), EdgeId(n - 1)))
    }

    /// Remove an edge and hand it back to the caller.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Box<dyn ReprojEdge>> {
        self.edges.get_mut(id.0).and_then(Option::take)
    }

    /// Get an edge by handle, `None` if it was removed.
    pub fn edge(&self, id: EdgeId) -> Option<&(dyn ReprojEdge + 'static)> {
        self.edges.get(id.0).and_then(|e| e.as_deref())
    }

    /// Get a mutable edge by handle, `None` if it was removed.
    pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut (dyn ReprojEdge + 'static)> {
        self.edges.get_mut(id.0).and_then(|e| e.as_deref_mut())
    }

    /// Handles of all edges currently in the graph.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| EdgeId(i))
    }

    /// Number of edges currently in the graph.
    pub fn num_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    /// Number of edges taking part in the next solve.
    pub fn num_active_edges(&self) -> usize {
        self.edges
            .iter()
            .flatten()
            .filter(|e| e.level() == ACTIVE_LEVEL)
            .count()
    }

    fn check_binding(&self, edge: &dyn ReprojEdge) -> Result<(), GraphError> {
        let vertex = edge.vertex().ok_or(GraphError::UnboundEdge)?;
        if vertex.0 >= self.vertices.len() {
            return Err(GraphError::VertexNotFound { index: vertex.0 });
        }
        Ok(())
    }
}

impl std::ops::Index<EdgeId> for Graph {
    type Output = dyn ReprojEdge;

    /// Panics if the edge was removed.
    fn index(&self, id: EdgeId) -> &Self::Output {
        match self.edge(id) {
            Some(edge) => edge,
            None => panic!("edge {} is not in the graph", id.0),
        }
    }
}

impl std::ops::IndexMut<EdgeId> for Graph {
    fn index_mut(&mut self, id: EdgeId) -> &mut Self::Output {
        match self.edge_mut(id) {
            Some(edge) => edge,
            None => panic!("edge {} is not in the graph", id.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::{PerspectiveBackwardReprojEdge, PerspectiveForwardReprojEdge};
    use crate::sim3::Sim3;

    fn bound_edge(vertex: VertexId) -> Box<dyn ReprojEdge> {
        let mut edge = PerspectiveForwardReprojEdge::new(500.0, 500.0, 320.0, 240.0);
        edge.set_vertex(vertex);
        Box::new(edge)
    }

    #[test]
    fn test_add_vertex_and_edge() {
        let mut graph = Graph::new();
        let vtx = graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY));
        assert_eq!(graph.num_vertices(), 1);
        assert!(graph.vertex(vtx).is_some());

        let id = graph.add_edge(bound_edge(vtx)).unwrap();
        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph[id].vertex(), Some(vtx));
    }

    #[test]
    fn test_add_unbound_edge_should_fail() {
        let mut graph = Graph::new();
        graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY));
        let edge = PerspectiveForwardReprojEdge::new(1.0, 1.0, 0.0, 0.0);
        assert_eq!(
            graph.add_edge(Box::new(edge)).unwrap_err(),
            GraphError::UnboundEdge
        );
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn test_add_edge_pair_is_all_or_nothing() {
        let mut graph = Graph::new();
        let vtx = graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY));

        let mut dangling = PerspectiveBackwardReprojEdge::new(1.0, 1.0, 0.0, 0.0);
        dangling.set_vertex(VertexId(7));
        let res = graph.add_edge_pair(bound_edge(vtx), Box::new(dangling));
        assert_eq!(res.unwrap_err(), GraphError::VertexNotFound { index: 7 });
        assert_eq!(graph.num_edges(), 0);

        let (a, b) = graph.add_edge_pair(bound_edge(vtx), bound_edge(vtx)).unwrap();
        assert_ne!(a, b);
        assert_eq!(graph.num_edges(), 2);
    }

    #[test]
    fn test_remove_edge_keeps_other_handles() {
        let mut graph = Graph::new();
        let vtx = graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY));
        let a = graph.add_edge(bound_edge(vtx)).unwrap();
        let b = graph.add_edge(bound_edge(vtx)).unwrap();

        assert!(graph.remove_edge(a).is_some());
        assert!(graph.remove_edge(a).is_none());
        assert!(graph.edge(a).is_none());
        assert!(graph.edge(b).is_some());
        assert_eq!(graph.edge_ids().collect::<Vec<_>>(), vec![b]);
        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_num_active_edges() {
        let mut graph = Graph::new();
        let vtx = graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY));
        let a = graph.add_edge(bound_edge(vtx)).unwrap();
        graph.add_edge(bound_edge(vtx)).unwrap();
        assert_eq!(graph.num_active_edges(), 2);

        graph[a].set_level(crate::edge::SUPPRESSED_LEVEL);
        assert_eq!(graph.num_active_edges(), 1);
    }

    #[test]
    #[should_panic(expected = "is not in the graph")]
    fn test_index_removed_edge_panics() {
        let mut graph = Graph::new();
        let vtx = graph.add_vertex(Sim3Vertex::new(Sim3::IDENTITY));
        let a = graph.add_edge(bound_edge(vtx)).unwrap();
        graph.remove_edge(a);
        let _ = graph[a].level();
    }
}
