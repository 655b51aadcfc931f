//! OnePass+ search driver.
//!
//! Best-first expansion over labels keyed by the A* lower bound
//! `length + dist_to_target`. Each label carries its overlap against every
//! accepted path; overlaps against paths accepted after the label was
//! pushed are settled lazily when the label is popped. Labels whose
//! overlap ratio with any accepted path exceeds the threshold are dropped,
//! and labels Pareto-dominated at their vertex are never pushed.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use byway_common::{Error, Result};
use log::debug;

use crate::dijkstra::{distance_from_target, shortest_path};
use crate::graph::{AltPath, SearchGraph};
use crate::label::{Label, LabelArena, LabelId};
use crate::skyline::SkylineIndex;
use crate::weight::Weight;

/// Queue entry: min-ordered by lower bound, insertion sequence breaking
/// ties so runs are reproducible.
struct QueueEntry<W> {
    lower_bound: W,
    seq: u64,
    id: LabelId,
}

impl<W: Weight> PartialEq for QueueEntry<W> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<W: Weight> Eq for QueueEntry<W> {}

impl<W: Weight> PartialOrd for QueueEntry<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> Ord for QueueEntry<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for a min-heap.
        other
            .lower_bound
            .partial_cmp(&self.lower_bound)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Which accepted paths use a given directed edge.
struct EdgeUse<W> {
    weight: W,
    paths: Vec<usize>,
}

struct UsedEdges<W> {
    map: HashMap<(usize, usize), EdgeUse<W>>,
}

impl<W: Weight> UsedEdges<W> {
    fn new() -> Self {
        UsedEdges { map: HashMap::new() }
    }

    fn add_path(&mut self, graph: &SearchGraph<W>, path: &AltPath<W>, index: usize) {
        for (u, v) in path.edges() {
            let weight = graph
                .edge_weight(u, v)
                .expect("accepted path traverses a graph edge");
            self.map
                .entry((u, v))
                .or_insert_with(|| EdgeUse { weight, paths: Vec::new() })
                .paths
                .push(index);
        }
    }

    fn get(&self, u: usize, v: usize) -> Option<&EdgeUse<W>> {
        self.map.get(&(u, v))
    }
}

#[derive(Debug, Default)]
struct SearchStats {
    popped: u64,
    created: u64,
    admitted: u64,
    dropped_outdated: u64,
    skipped_loop: u64,
    skipped_similarity: u64,
    skipped_dominated: u64,
}

/// Overlap ratio of a summed shared weight against an accepted path.
///
/// A zero-length accepted path has only zero-weight edges, so no positive
/// overlap with it is possible and the ratio is taken as zero.
fn overlap_ratio<W: Weight>(shared: W, accepted_length: W) -> f64 {
    let length = accepted_length.as_f64();
    if length == 0.0 {
        0.0
    } else {
        shared.as_f64() / length
    }
}

/// Settle a popped label's overlaps against paths accepted after its last
/// refresh. Returns `false` when some ratio crosses the threshold and the
/// label must be dropped.
fn refresh_label<W: Weight>(
    arena: &mut LabelArena<W>,
    id: LabelId,
    used: &UsedEdges<W>,
    accepted: &[AltPath<W>],
    theta: f64,
    step: usize,
) -> bool {
    let edges: Vec<(usize, usize)> = {
        let vertices = arena.path_vertices(id);
        vertices.windows(2).map(|pair| (pair[0], pair[1])).collect()
    };

    let label = arena.get_mut(id);
    for (u, v) in edges {
        if let Some(edge_use) = used.get(u, v) {
            for &i in &edge_use.paths {
                if i >= label.last_check {
                    label.sim[i] = label.sim[i].saturating_add(edge_use.weight);
                    if overlap_ratio(label.sim[i], accepted[i].length) > theta {
                        return false;
                    }
                }
            }
        }
    }
    label.last_check = step;
    true
}

/// Compute up to `k` loopless paths from `source` to `target`, each pair
/// overlapping below `theta` (weighted edge-overlap ratio).
///
/// The first returned path is the shortest; the rest follow in admission
/// order, lengths non-decreasing. An unreachable target yields an empty
/// list; fewer than `k` admissible paths yield a shorter list. Neither is
/// an error.
pub fn onepass_plus<W: Weight>(
    graph: &SearchGraph<W>,
    source: usize,
    target: usize,
    k: usize,
    theta: f64,
) -> Result<Vec<AltPath<W>>> {
    let n = graph.num_vertices();
    if source >= n {
        return Err(Error::InvalidArgument(format!(
            "source {source} out of range: graph has {n} vertices"
        )));
    }
    if target >= n {
        return Err(Error::InvalidArgument(format!(
            "destination {target} out of range: graph has {n} vertices"
        )));
    }
    if k == 0 {
        return Err(Error::InvalidArgument(
            "number of paths k must be at least 1".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&theta) {
        return Err(Error::InvalidArgument(format!(
            "similarity threshold {theta} outside [0, 1]"
        )));
    }

    let dist_to_target = distance_from_target(graph, target);
    if dist_to_target[source].is_infinite() {
        debug!("target {target} unreachable from source {source}");
        return Ok(Vec::new());
    }

    let Some(first) = shortest_path(graph, source, target) else {
        return Ok(Vec::new());
    };
    if source == target {
        // Re-entering the search would re-admit the empty path.
        return Ok(vec![first]);
    }

    let mut accepted = vec![first];
    let mut used = UsedEdges::new();
    used.add_path(graph, &accepted[0], 0);
    let mut step = 1;
    if k == 1 {
        return Ok(accepted);
    }

    let mut arena = LabelArena::new();
    let mut skyline = SkylineIndex::new(n);
    let mut queue = BinaryHeap::new();
    let mut seq: u64 = 0;
    let mut stats = SearchStats::default();

    let head = Label::head(source, dist_to_target[source], k, step);
    let head_id = arena.insert(head);
    skyline.insert(source, head_id);
    queue.push(QueueEntry { lower_bound: dist_to_target[source], seq, id: head_id });
    seq += 1;

    while let Some(entry) = queue.pop() {
        stats.popped += 1;
        let id = entry.id;
        let v = arena.get(id).node;

        if arena.get(id).is_outdated(step)
            && !refresh_label(&mut arena, id, &used, &accepted, theta, step)
        {
            stats.dropped_outdated += 1;
            continue;
        }

        if v == target {
            let path = AltPath {
                vertices: arena.path_vertices(id),
                length: arena.get(id).length,
            };
            used.add_path(graph, &path, accepted.len());
            accepted.push(path);
            step += 1;
            stats.admitted += 1;
            if step == k {
                break;
            }
            continue; // terminal labels are not expanded
        }

        let parent_length = arena.get(id).length;
        for (_, u, w) in graph.out_edges(v) {
            if dist_to_target[u].is_infinite() {
                continue;
            }
            if arena.chain_contains(id, u) {
                stats.skipped_loop += 1;
                continue;
            }

            let mut sim = arena.get(id).sim.clone();
            let mut over_threshold = false;
            if let Some(edge_use) = used.get(v, u) {
                for &i in &edge_use.paths {
                    sim[i] = sim[i].saturating_add(w);
                    if overlap_ratio(sim[i], accepted[i].length) > theta {
                        over_threshold = true;
                        break;
                    }
                }
            }
            if over_threshold {
                stats.skipped_similarity += 1;
                continue;
            }

            if skyline.dominates(&arena, u, &sim, step) {
                stats.skipped_dominated += 1;
                continue;
            }

            let length = parent_length.saturating_add(w);
            let lower_bound = length.saturating_add(dist_to_target[u]);
            let child = Label {
                node: u,
                length,
                lower_bound,
                predecessor: Some(id),
                sim,
                last_check: step,
            };
            let child_id = arena.insert(child);
            stats.created += 1;
            skyline.insert(u, child_id);
            queue.push(QueueEntry { lower_bound, seq, id: child_id });
            seq += 1;
        }
    }

    debug!(
        "onepass+ {}->{}: {} paths, {:?}, {} labels stored, {} skyline entries",
        source,
        target,
        accepted.len(),
        stats,
        arena.len(),
        skyline.num_labels()
    );

    Ok(accepted)
}
