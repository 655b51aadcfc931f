//! Search labels and the arena that owns them.
//!
//! A label is a partial path from the source to some vertex, carrying the
//! A* lower bound and the running overlap against every accepted path.
//! Labels live in an arena for the whole search: children refer to their
//! parent by index, so back-chains never dangle and path reconstruction is
//! a plain index walk.

use crate::weight::Weight;

/// Stable handle into a [`LabelArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(u32);

/// Exploration state of one partial path.
#[derive(Debug, Clone)]
pub struct Label<W> {
    /// Vertex this label terminates at.
    pub node: usize,
    /// Length of the partial path from the source to `node`.
    pub length: W,
    /// `length + dist_to_target[node]`: admissible estimate of a full path
    /// through this label.
    pub lower_bound: W,
    /// Parent label, `None` for the head label at the source.
    pub predecessor: Option<LabelId>,
    /// `sim[i]` is the summed weight of edges shared with accepted path
    /// `i`. Slots at indices not yet accepted stay zero.
    pub sim: Vec<W>,
    /// Number of accepted paths the similarity vector accounts for.
    pub last_check: usize,
}

impl<W: Weight> Label<W> {
    /// Head label at the source vertex.
    pub fn head(node: usize, lower_bound: W, k: usize, step: usize) -> Self {
        Label {
            node,
            length: W::ZERO,
            lower_bound,
            predecessor: None,
            sim: vec![W::ZERO; k],
            last_check: step,
        }
    }

    pub fn is_outdated(&self, step: usize) -> bool {
        self.last_check < step
    }
}

/// Owning store for all labels of one search.
///
/// Nothing is freed until the search ends, so every handed-out [`LabelId`]
/// stays valid for the arena's lifetime.
#[derive(Debug)]
pub struct LabelArena<W> {
    labels: Vec<Label<W>>,
}

impl<W: Weight> LabelArena<W> {
    pub fn new() -> Self {
        LabelArena { labels: Vec::new() }
    }

    pub fn insert(&mut self, label: Label<W>) -> LabelId {
        let id = LabelId(self.labels.len() as u32);
        self.labels.push(label);
        id
    }

    pub fn get(&self, id: LabelId) -> &Label<W> {
        &self.labels[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: LabelId) -> &mut Label<W> {
        &mut self.labels[id.0 as usize]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Vertex sequence from the source to this label's node.
    pub fn path_vertices(&self, id: LabelId) -> Vec<usize> {
        let mut vertices = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let label = self.get(c);
            vertices.push(label.node);
            current = label.predecessor;
        }
        vertices.reverse();
        vertices
    }

    /// Whether `vertex` already lies on the partial path ending at `id`.
    pub fn chain_contains(&self, id: LabelId, vertex: usize) -> bool {
        let mut current = Some(id);
        while let Some(c) = current {
            let label = self.get(c);
            if label.node == vertex {
                return true;
            }
            current = label.predecessor;
        }
        false
    }
}

impl<W: Weight> Default for LabelArena<W> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> (LabelArena<u32>, LabelId) {
        // 0 -> 2 -> 5, unit lower bounds for brevity
        let mut arena = LabelArena::new();
        let head = arena.insert(Label::head(0, 7, 3, 1));
        let mid = arena.insert(Label {
            node: 2,
            length: 4,
            lower_bound: 9,
            predecessor: Some(head),
            sim: vec![0; 3],
            last_check: 1,
        });
        let tip = arena.insert(Label {
            node: 5,
            length: 6,
            lower_bound: 6,
            predecessor: Some(mid),
            sim: vec![2, 0, 0],
            last_check: 1,
        });
        (arena, tip)
    }

    #[test]
    fn path_vertices_walk_back_to_the_source() {
        let (arena, tip) = chain();
        assert_eq!(arena.path_vertices(tip), vec![0, 2, 5]);
    }

    #[test]
    fn head_label_is_its_own_path() {
        let mut arena: LabelArena<u32> = LabelArena::new();
        let head = arena.insert(Label::head(3, 10, 2, 1));
        assert_eq!(arena.path_vertices(head), vec![3]);
        assert!(arena.get(head).predecessor.is_none());
        assert_eq!(arena.get(head).length, 0);
    }

    #[test]
    fn chain_contains_finds_every_vertex_on_the_path() {
        let (arena, tip) = chain();
        assert!(arena.chain_contains(tip, 0));
        assert!(arena.chain_contains(tip, 2));
        assert!(arena.chain_contains(tip, 5));
        assert!(!arena.chain_contains(tip, 4));
    }

    #[test]
    fn outdated_tracks_the_step_counter() {
        let (arena, tip) = chain();
        assert!(!arena.get(tip).is_outdated(1));
        assert!(arena.get(tip).is_outdated(2));
    }
}
