//! Byway: alternative-path routing for directed, non-negatively weighted
//! graphs.
//!
//! Given a source, a destination, a count `k` and a similarity threshold
//! `theta`, the engine returns up to `k` loopless paths whose pairwise
//! weighted edge-overlap ratio stays at or below `theta` — the shortest
//! path first, then the nearest genuinely different alternatives.
//!
//! Query pipeline:
//! - Parse or load the graph ([`parse`], [`graph`])
//! - Build the reverse distance oracle for the A* heuristic ([`dijkstra`])
//! - Run the OnePass+ label search ([`onepass`]): best-first expansion
//!   with lazy similarity refresh and per-vertex Pareto pruning
//!   ([`label`], [`skyline`])
//!
//! The engine is generic over the edge-weight type through [`Weight`] and
//! runs single-threaded to completion on the caller's thread.

pub mod dijkstra;
pub mod graph;
pub mod label;
pub mod onepass;
pub mod parse;
pub mod skyline;
pub mod weight;

pub use graph::{AltPath, SearchGraph};
pub use onepass::onepass_plus;
pub use parse::{read_graph_from_file, read_graph_from_string};
pub use weight::Weight;

pub use byway_common::{Error, Result};
