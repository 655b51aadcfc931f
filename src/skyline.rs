//! Per-vertex Pareto index over label similarity vectors.
//!
//! A label is dominated at its vertex when some resident label is at most
//! as similar to every accepted path: any extension of the dominated label
//! can be matched or beaten by extending the dominator. Buckets are dense
//! because vertex ids are dense.

use crate::label::{LabelArena, LabelId};
use crate::weight::Weight;

#[derive(Debug)]
pub struct SkylineIndex {
    buckets: Vec<Vec<LabelId>>,
}

impl SkylineIndex {
    pub fn new(num_vertices: usize) -> Self {
        SkylineIndex {
            buckets: vec![Vec::new(); num_vertices],
        }
    }

    /// Register a label under its vertex. No deduplication.
    pub fn insert(&mut self, node: usize, id: LabelId) {
        self.buckets[node].push(id);
    }

    /// Whether some label already at `node` is componentwise at most as
    /// similar as `sim` over the first `step` accepted paths.
    pub fn dominates<W: Weight>(
        &self,
        arena: &LabelArena<W>,
        node: usize,
        sim: &[W],
        step: usize,
    ) -> bool {
        for &id in &self.buckets[node] {
            let resident = arena.get(id);
            let mut resident_dominates = true;
            for i in 0..step {
                if sim[i] < resident.sim[i] {
                    resident_dominates = false;
                    break;
                }
            }
            if resident_dominates {
                return true;
            }
        }
        false
    }

    pub fn num_labels(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }
}
