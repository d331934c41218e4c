//! Read-only CSR adjacency for the duration of a run.
//!
//! Memory layout:
//! - `row_offsets[v]` = starting index in `col_indices` for vertex v
//! - `col_indices[row_offsets[v]..row_offsets[v+1]]` = out-neighbors of v
//! - `weights` (optional) = per-edge weights, parallel to `col_indices`
//!
//! The position of an edge in `col_indices` is its [`EdgeId`], so edge ids
//! are dense in `[0, |E|)`. A graph may additionally carry a reverse
//! (in-edge) mirror, built once at construction, which reverse-direction
//! advance requires.

use crate::ids::{EdgeId, ElementId, VertexId};
use crate::{EngineError, Result};

/// Compressed Sparse Row adjacency.
///
/// Immutable once built; vertex ids are the dense range `[0, |V|)`.
#[derive(Debug, Clone)]
pub struct CsrGraph {
    vertex_count: usize,
    row_offsets: Vec<usize>,
    col_indices: Vec<u32>,
    weights: Option<Vec<f32>>,
    reverse: Option<ReverseAdjacency>,
}

/// In-edge mirror: CSC view of the same edge set.
///
/// `edge_indices[p]` is the original [`EdgeId`] of the p-th in-edge, so
/// weights and edge identity are shared with the forward arrays.
#[derive(Debug, Clone)]
struct ReverseAdjacency {
    row_offsets: Vec<usize>,
    col_indices: Vec<u32>,
    edge_indices: Vec<u32>,
}

impl CsrGraph {
    /// Create CSR adjacency from an edge list.
    ///
    /// # Example
    ///
    /// ```
    /// use wavefront_core::CsrGraph;
    ///
    /// // Graph: 0 -> 1 -> 2
    /// let graph = CsrGraph::from_edges(3, &[(0, 1), (1, 2)]);
    /// assert_eq!(graph.edge_count(), 2);
    /// ```
    pub fn from_edges(vertex_count: usize, edges: &[(u32, u32)]) -> Self {
        CsrGraphBuilder::new(vertex_count).with_edges(edges).build()
    }

    /// Create CSR adjacency from a weighted edge list.
    pub fn from_weighted_edges(vertex_count: usize, edges: &[(u32, u32, f32)]) -> Self {
        CsrGraphBuilder::new(vertex_count)
            .with_weighted_edges(edges)
            .build()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.col_indices.len()
    }

    /// Check if the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.col_indices.is_empty()
    }

    /// Out-degree of a vertex (0 for out-of-range ids).
    pub fn out_degree(&self, v: VertexId) -> usize {
        let i = v.index();
        if i >= self.vertex_count {
            return 0;
        }
        self.row_offsets[i + 1] - self.row_offsets[i]
    }

    /// Out-neighbors of a vertex.
    pub fn neighbors(&self, v: VertexId) -> &[u32] {
        let i = v.index();
        if i >= self.vertex_count {
            return &[];
        }
        &self.col_indices[self.row_offsets[i]..self.row_offsets[i + 1]]
    }

    /// Weight of an edge (1.0 for unweighted graphs).
    pub fn edge_weight(&self, e: EdgeId) -> f32 {
        match &self.weights {
            Some(w) => w[e.index()],
            None => 1.0,
        }
    }

    /// The i-th out-edge of a vertex as `(neighbor, edge, weight)`.
    pub fn out_entry(&self, v: VertexId, i: usize) -> (VertexId, EdgeId, f32) {
        let e = self.row_offsets[v.index()] + i;
        (
            VertexId(self.col_indices[e]),
            EdgeId(e as u32),
            self.edge_weight(EdgeId(e as u32)),
        )
    }

    /// Whether the in-edge mirror was built.
    pub fn has_reverse(&self) -> bool {
        self.reverse.is_some()
    }

    /// In-degree of a vertex.
    ///
    /// Fails when the graph was built without its reverse mirror.
    pub fn in_degree(&self, v: VertexId) -> Result<usize> {
        let rev = self.reverse.as_ref().ok_or(EngineError::ReverseUnavailable)?;
        let i = v.index();
        if i >= self.vertex_count {
            return Ok(0);
        }
        Ok(rev.row_offsets[i + 1] - rev.row_offsets[i])
    }

    /// The i-th in-edge of a vertex as `(neighbor, edge, weight)`.
    ///
    /// The neighbor is the edge's origin and the edge id is the original
    /// forward [`EdgeId`]. Panics if the reverse mirror is absent; callers
    /// check [`CsrGraph::has_reverse`] first.
    pub fn in_entry(&self, v: VertexId, i: usize) -> (VertexId, EdgeId, f32) {
        let rev = self.reverse.as_ref().expect("reverse adjacency not built");
        let p = rev.row_offsets[v.index()] + i;
        let edge = EdgeId(rev.edge_indices[p]);
        (VertexId(rev.col_indices[p]), edge, self.edge_weight(edge))
    }

    /// Check if an edge exists from src to dst.
    pub fn has_edge(&self, src: VertexId, dst: VertexId) -> bool {
        self.neighbors(src).contains(&dst.get())
    }

    /// Validate CSR structure.
    pub fn validate(&self) -> Result<()> {
        if self.row_offsets.len() != self.vertex_count + 1 {
            return Err(EngineError::InvalidCsr(format!(
                "row_offsets length {} != vertex_count + 1 = {}",
                self.row_offsets.len(),
                self.vertex_count + 1
            )));
        }

        for v in 0..self.vertex_count {
            if self.row_offsets[v] > self.row_offsets[v + 1] {
                return Err(EngineError::InvalidCsr(format!(
                    "row_offsets not monotonic at vertex {}",
                    v
                )));
            }
        }

        let edge_count = *self.row_offsets.last().unwrap_or(&0);
        if edge_count != self.col_indices.len() {
            return Err(EngineError::InvalidCsr(format!(
                "row_offsets[-1] = {} != col_indices.len() = {}",
                edge_count,
                self.col_indices.len()
            )));
        }

        if let Some(ref w) = self.weights {
            if w.len() != self.col_indices.len() {
                return Err(EngineError::InvalidCsr(format!(
                    "weights.len() = {} != col_indices.len() = {}",
                    w.len(),
                    self.col_indices.len()
                )));
            }
        }

        for &c in &self.col_indices {
            if c as usize >= self.vertex_count {
                return Err(EngineError::InvalidCsr(format!(
                    "col index {} >= vertex_count {}",
                    c, self.vertex_count
                )));
            }
        }

        Ok(())
    }
}

/// Builder for [`CsrGraph`].
#[derive(Debug, Default)]
pub struct CsrGraphBuilder {
    vertex_count: usize,
    edges: Vec<(u32, u32, Option<f32>)>,
    build_reverse: bool,
}

impl CsrGraphBuilder {
    /// Create a builder for a graph with the given number of vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
            build_reverse: false,
        }
    }

    /// Add edges from a slice.
    pub fn with_edges(mut self, edges: &[(u32, u32)]) -> Self {
        for &(src, dst) in edges {
            self.edges.push((src, dst, None));
        }
        self
    }

    /// Add weighted edges from a slice.
    pub fn with_weighted_edges(mut self, edges: &[(u32, u32, f32)]) -> Self {
        for &(src, dst, w) in edges {
            self.edges.push((src, dst, Some(w)));
        }
        self
    }

    /// Add both directions of each edge in a slice.
    pub fn with_undirected_edges(mut self, edges: &[(u32, u32)]) -> Self {
        for &(a, b) in edges {
            self.edges.push((a, b, None));
            self.edges.push((b, a, None));
        }
        self
    }

    /// Add a single edge.
    pub fn add_edge(&mut self, src: u32, dst: u32) {
        self.edges.push((src, dst, None));
    }

    /// Add a weighted edge.
    pub fn add_weighted_edge(&mut self, src: u32, dst: u32, weight: f32) {
        self.edges.push((src, dst, Some(weight)));
    }

    /// Add both directions of an edge.
    pub fn add_undirected_edge(&mut self, a: u32, b: u32) {
        self.edges.push((a, b, None));
        self.edges.push((b, a, None));
    }

    /// Also build the in-edge mirror needed by reverse-direction advance.
    pub fn with_reverse(mut self, build_reverse: bool) -> Self {
        self.build_reverse = build_reverse;
        self
    }

    /// Build the graph.
    pub fn build(mut self) -> CsrGraph {
        // Sort edges by source; positions after the sort are the edge ids.
        self.edges.sort_by_key(|e| e.0);

        let n = self.vertex_count;
        let has_weights = self.edges.iter().any(|e| e.2.is_some());

        let mut row_offsets = vec![0usize; n + 1];
        for &(src, _, _) in &self.edges {
            if (src as usize) < n {
                row_offsets[src as usize + 1] += 1;
            }
        }
        for v in 1..=n {
            row_offsets[v] += row_offsets[v - 1];
        }

        let col_indices: Vec<u32> = self.edges.iter().map(|e| e.1).collect();
        let weights = if has_weights {
            Some(self.edges.iter().map(|e| e.2.unwrap_or(1.0)).collect())
        } else {
            None
        };

        let reverse = if self.build_reverse {
            Some(build_reverse_adjacency(n, &row_offsets, &col_indices))
        } else {
            None
        };

        CsrGraph {
            vertex_count: n,
            row_offsets,
            col_indices,
            weights,
            reverse,
        }
    }
}

fn build_reverse_adjacency(
    n: usize,
    row_offsets: &[usize],
    col_indices: &[u32],
) -> ReverseAdjacency {
    let m = col_indices.len();

    let mut in_offsets = vec![0usize; n + 1];
    for &c in col_indices {
        in_offsets[c as usize + 1] += 1;
    }
    for v in 1..=n {
        in_offsets[v] += in_offsets[v - 1];
    }

    let mut cursor = in_offsets.clone();
    let mut in_cols = vec![0u32; m];
    let mut in_edges = vec![0u32; m];
    for v in 0..n {
        for e in row_offsets[v]..row_offsets[v + 1] {
            let d = col_indices[e] as usize;
            let slot = cursor[d];
            cursor[d] += 1;
            in_cols[slot] = v as u32;
            in_edges[slot] = e as u32;
        }
    }

    ReverseAdjacency {
        row_offsets: in_offsets,
        col_indices: in_cols,
        edge_indices: in_edges,
    }
}
