//! Non-negative shortest-path computations feeding the search.
//!
//! Two entry points: the one-to-all distances from every vertex *to* a
//! target (Dijkstra from the target over incoming edges — the A* heuristic
//! oracle), and the ordinary point-to-point shortest path that seeds the
//! accepted list.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::graph::{AltPath, SearchGraph};
use crate::weight::Weight;

#[derive(Debug, Clone, Copy)]
struct HeapState<W> {
    dist: W,
    vertex: usize,
}

impl<W: Weight> PartialEq for HeapState<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for HeapState<W> {}

impl<W: Weight> PartialOrd for HeapState<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for HeapState<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for a min-heap; vertex index breaks exact ties
        // so pop order is deterministic.
        other
            .dist
            .partial_cmp(&self.dist)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

/// Shortest-path distance from every vertex to `target`.
///
/// Entry `v` is `W::INFINITY` when `target` is unreachable from `v`.
pub fn distance_from_target<W: Weight>(graph: &SearchGraph<W>, target: usize) -> Vec<W> {
    let mut dist = vec![W::INFINITY; graph.num_vertices()];
    let mut heap = BinaryHeap::new();

    dist[target] = W::ZERO;
    heap.push(HeapState { dist: W::ZERO, vertex: target });

    while let Some(HeapState { dist: d, vertex: v }) = heap.pop() {
        if dist[v] < d {
            continue; // stale entry
        }
        for (u, _, w) in graph.in_edges(v) {
            let candidate = d.saturating_add(w);
            if candidate < dist[u] {
                dist[u] = candidate;
                heap.push(HeapState { dist: candidate, vertex: u });
            }
        }
    }

    dist
}

/// Point-to-point shortest path, or `None` when `target` is unreachable.
///
/// `source == target` yields the empty path of length zero.
pub fn shortest_path<W: Weight>(
    graph: &SearchGraph<W>,
    source: usize,
    target: usize,
) -> Option<AltPath<W>> {
    let n = graph.num_vertices();
    let mut dist = vec![W::INFINITY; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut heap = BinaryHeap::new();

    dist[source] = W::ZERO;
    heap.push(HeapState { dist: W::ZERO, vertex: source });

    while let Some(HeapState { dist: d, vertex: v }) = heap.pop() {
        if v == target {
            break;
        }
        if dist[v] < d {
            continue;
        }
        for (_, u, w) in graph.out_edges(v) {
            let candidate = d.saturating_add(w);
            if candidate < dist[u] {
                dist[u] = candidate;
                predecessor[u] = Some(v);
                heap.push(HeapState { dist: candidate, vertex: u });
            }
        }
    }

    if dist[target].is_infinite() {
        return None;
    }

    let mut vertices = vec![target];
    let mut current = target;
    while let Some(prev) = predecessor[current] {
        vertices.push(prev);
        current = prev;
    }
    vertices.reverse();

    Some(AltPath { vertices, length: dist[target] })
}
