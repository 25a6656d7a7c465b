//! Bookkeeping over all mutual constraints of one Sim3 problem.

use kornia_graph::{EdgeId, Graph};

use crate::mutual_edge::MutualReprojEdge;

/// All mutual reprojection constraints built for one pair of shots.
///
/// Between solver rounds the caller feeds the chi-squared error of every
/// edge back through [`MutualReprojEdges::reclassify`], then reads the
/// surviving correspondences once the optimization is over.
#[derive(Debug)]
pub struct MutualReprojEdges<'a, S, L> {
    edges: Vec<MutualReprojEdge<'a, S, L>>,
}

impl<S, L> Default for MutualReprojEdges<'_, S, L> {
    fn default() -> Self {
        Self { edges: Vec::new() }
    }
}

impl<'a, S, L> MutualReprojEdges<'a, S, L> {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a constraint.
    pub fn push(&mut self, edge: MutualReprojEdge<'a, S, L>) {
        self.edges.push(edge);
    }

    /// Number of constraints.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the set holds no constraint.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Iterate over the constraints.
    pub fn iter(&self) -> std::slice::Iter<'_, MutualReprojEdge<'a, S, L>> {
        self.edges.iter()
    }

    /// Number of constraints whose two edges are active.
    pub fn num_inliers(&self, graph: &Graph) -> usize {
        self.edges.iter().filter(|e| e.edges.is_inlier(graph)).count()
    }

    /// Number of constraints with at least one suppressed edge.
    pub fn num_outliers(&self, graph: &Graph) -> usize {
        self.len() - self.num_inliers(graph)
    }

    /// Classify every constraint from the error of its edges.
    ///
    /// A constraint becomes an outlier when the chi-squared error of either
    /// edge exceeds `chi_sq_threshold`, and an inlier otherwise.
    ///
    /// # Arguments
    ///
    /// * `graph` - Graph holding the edges.
    /// * `chi_sq_threshold` - Chi-squared bound on the whitened error.
    /// * `chi2` - Chi-squared error of an edge after the last solver round.
    ///
    /// # Returns
    ///
    /// The number of outliers.
    pub fn reclassify<F>(&self, graph: &mut Graph, chi_sq_threshold: f32, chi2: F) -> usize
    where
        F: Fn(EdgeId) -> f32,
    {
        let mut num_outliers = 0;
        for edge in &self.edges {
            let pair = edge.edges;
            if chi2(pair.forward) > chi_sq_threshold || chi2(pair.backward) > chi_sq_threshold {
                pair.mark_outlier(graph);
                num_outliers += 1;
            } else {
                pair.mark_inlier(graph);
            }
        }

        log::debug!(
            "reclassified {} mutual edges: {} outliers",
            self.edges.len(),
            num_outliers
        );

        num_outliers
    }

    /// Remove the edges of every outlier constraint from the graph and drop them.
    ///
    /// Returns the number of constraints discarded.
    pub fn discard_outliers(&mut self, graph: &mut Graph) -> usize {
        let (inliers, outliers): (Vec<_>, Vec<_>) = self
            .edges
            .drain(..)
            .partition(|e| e.edges.is_inlier(graph));
        self.edges = inliers;

        let num_discarded = outliers.len();
        for edge in outliers {
            edge.detach(graph);
        }
        num_discarded
    }

    /// Feature index pairs `(idx1, idx2)` of the constraints still marked as inliers.
    pub fn inlier_matches(&self, graph: &Graph) -> Vec<(usize, usize)> {
        self.edges
            .iter()
            .filter(|e| e.edges.is_inlier(graph))
            .map(|e| (e.idx1, e.idx2))
            .collect()
    }
}

impl<'s, 'a, S, L> IntoIterator for &'s MutualReprojEdges<'a, S, L> {
    type Item = &'s MutualReprojEdge<'a, S, L>;
    type IntoIter = std::slice::Iter<'s, MutualReprojEdge<'a, S, L>>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
