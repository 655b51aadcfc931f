//! Read-only graph view the search operates on, plus binary persistence.
//!
//! Vertices are dense indices in `[0, |V|)`. Edges are directed and carry a
//! non-negative weight. The backing store is a petgraph `DiGraph` whose
//! `NodeIndex` values coincide with the dense vertex ids.

use byway_common::{Error, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::weight::Weight;

#[derive(Debug, Serialize, Deserialize)]
struct SerializableGraph<W> {
    num_vertices: usize,
    edges: Vec<(usize, usize, W)>,
}

/// Directed, non-negatively weighted graph with dense vertex ids.
#[derive(Debug, Clone)]
pub struct SearchGraph<W: Weight> {
    graph: DiGraph<(), W>,
}

impl<W: Weight> SearchGraph<W> {
    /// Build a graph from an edge list over `num_vertices` dense vertices.
    ///
    /// Self-loops are kept (the search rejects them through its loopless
    /// check). Parallel edges between the same ordered vertex pair are
    /// collapsed to the minimum weight.
    pub fn from_edges<I>(num_vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, W)>,
    {
        let mut graph = DiGraph::with_capacity(num_vertices, 0);
        for _ in 0..num_vertices {
            graph.add_node(());
        }

        for (u, v, w) in edges {
            if u >= num_vertices || v >= num_vertices {
                return Err(Error::InvalidArgument(format!(
                    "edge ({u}, {v}) references a vertex outside [0, {num_vertices})"
                )));
            }
            if w < W::ZERO {
                return Err(Error::InvalidArgument(format!(
                    "edge ({u}, {v}) has negative weight {w}"
                )));
            }
            let (a, b) = (NodeIndex::new(u), NodeIndex::new(v));
            match graph.find_edge(a, b) {
                Some(e) => {
                    if w < graph[e] {
                        graph[e] = w;
                    }
                }
                None => {
                    graph.add_edge(a, b, w);
                }
            }
        }

        Ok(SearchGraph { graph })
    }

    pub fn num_vertices(&self) -> usize {
        self.graph.node_count()
    }

    pub fn num_edges(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn vertices(&self) -> impl Iterator<Item = usize> {
        0..self.num_vertices()
    }

    /// Outgoing edges of `v` as `(v, head, weight)` triples.
    pub fn out_edges(&self, v: usize) -> impl Iterator<Item = (usize, usize, W)> + '_ {
        self.graph
            .edges(NodeIndex::new(v))
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    /// Incoming edges of `v` as `(tail, v, weight)` triples.
    pub fn in_edges(&self, v: usize) -> impl Iterator<Item = (usize, usize, W)> + '_ {
        self.graph
            .edges_directed(NodeIndex::new(v), Direction::Incoming)
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
    }

    pub fn edge_weight(&self, u: usize, v: usize) -> Option<W> {
        self.graph
            .find_edge(NodeIndex::new(u), NodeIndex::new(v))
            .map(|e| self.graph[e])
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.graph
            .find_edge(NodeIndex::new(u), NodeIndex::new(v))
            .is_some()
    }

    /// Persist the graph so repeated queries skip text parsing.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()>
    where
        W: Serialize,
    {
        let edges: Vec<(usize, usize, W)> = self
            .graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), *e.weight()))
            .collect();
        let serializable = SerializableGraph {
            num_vertices: self.num_vertices(),
            edges,
        };

        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, &serializable)
            .map_err(|e| Error::GraphFormat(format!("failed to serialize graph: {e}")))?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        W: for<'de> Deserialize<'de>,
    {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let serializable: SerializableGraph<W> = bincode::deserialize_from(reader)
            .map_err(|e| Error::GraphFormat(format!("failed to deserialize graph: {e}")))?;
        Self::from_edges(serializable.num_vertices, serializable.edges)
    }
}

/// A loopless path through the graph: its vertex sequence and total length.
///
/// A path with a single vertex is the empty path (no edges, length zero).
#[derive(Debug, Clone, PartialEq)]
pub struct AltPath<W> {
    pub vertices: Vec<usize>,
    pub length: W,
}

impl<W: Weight> AltPath<W> {
    /// The directed edges traversed, in order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices.windows(2).map(|pair| (pair[0], pair[1]))
    }

    pub fn num_edges(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> SearchGraph<u32> {
        SearchGraph::from_edges(4, vec![(0, 1, 1), (1, 3, 2), (0, 2, 3), (2, 3, 4)]).unwrap()
    }

    #[test]
    fn from_edges_builds_expected_topology() {
        let g = diamond();
        assert_eq!(g.num_vertices(), 4);
        assert_eq!(g.num_edges(), 4);
        assert!(g.has_edge(0, 1));
        assert!(!g.has_edge(1, 0));
        assert_eq!(g.edge_weight(2, 3), Some(4));
        assert_eq!(g.edge_weight(3, 2), None);
    }

    #[test]
    fn out_edges_report_source_head_weight() {
        let g = diamond();
        let mut edges: Vec<_> = g.out_edges(0).collect();
        edges.sort();
        assert_eq!(edges, vec![(0, 1, 1), (0, 2, 3)]);
        assert_eq!(g.out_edges(3).count(), 0);
    }

    #[test]
    fn in_edges_report_tail_target_weight() {
        let g = diamond();
        let mut edges: Vec<_> = g.in_edges(3).collect();
        edges.sort();
        assert_eq!(edges, vec![(1, 3, 2), (2, 3, 4)]);
    }

    #[test]
    fn parallel_edges_collapse_to_minimum_weight() {
        let g =
            SearchGraph::from_edges(2, vec![(0, 1, 7), (0, 1, 3), (0, 1, 5)]).unwrap();
        assert_eq!(g.num_edges(), 1);
        assert_eq!(g.edge_weight(0, 1), Some(3));
    }

    #[test]
    fn self_loops_are_kept() {
        let g = SearchGraph::from_edges(2, vec![(0, 0, 1), (0, 1, 2)]).unwrap();
        assert!(g.has_edge(0, 0));
    }

    #[test]
    fn out_of_range_endpoint_is_rejected() {
        let res = SearchGraph::from_edges(2, vec![(0, 2, 1u32)]);
        assert!(res.is_err());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let res = SearchGraph::from_edges(2, vec![(0, 1, -1i32)]);
        assert!(res.is_err());
    }

    #[test]
    fn save_load_round_trip() {
        let g = diamond();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.bin");
        g.save(&path).unwrap();

        let loaded: SearchGraph<u32> = SearchGraph::load(&path).unwrap();
        assert_eq!(loaded.num_vertices(), g.num_vertices());
        assert_eq!(loaded.num_edges(), g.num_edges());
        for v in g.vertices() {
            let mut a: Vec<_> = g.out_edges(v).collect();
            let mut b: Vec<_> = loaded.out_edges(v).collect();
            a.sort();
            b.sort();
            assert_eq!(a, b, "out-edges of {v} differ after reload");
        }
    }

    #[test]
    fn path_edges_walk_consecutive_pairs() {
        let p = AltPath { vertices: vec![0, 1, 3], length: 3u32 };
        assert_eq!(p.edges().collect::<Vec<_>>(), vec![(0, 1), (1, 3)]);
        assert_eq!(p.num_edges(), 2);

        let empty = AltPath { vertices: vec![5], length: 0u32 };
        assert_eq!(empty.edges().count(), 0);
        assert_eq!(empty.num_edges(), 0);
    }
}
