//! Reader for the `.gr` textual graph description.
//!
//! Layout: a header line `d` (directed), a line `|V| |E|`, then exactly
//! `|E|` lines `u v w flag` with 0-based endpoints, a non-negative weight
//! and an unused trailing flag.

use byway_common::{Error, Result};
use std::fs;
use std::path::Path;

use crate::graph::SearchGraph;
use crate::weight::Weight;

/// Parse a graph from its textual description.
pub fn read_graph_from_string<W: Weight>(input: &str) -> Result<SearchGraph<W>> {
    let mut lines = input.lines().map(str::trim).filter(|l| !l.is_empty());

    let header = lines
        .next()
        .ok_or_else(|| Error::GraphFormat("empty graph description".to_string()))?;
    if header != "d" {
        return Err(Error::GraphFormat(format!(
            "expected header 'd', found '{header}'"
        )));
    }

    let counts = lines
        .next()
        .ok_or_else(|| Error::GraphFormat("missing '|V| |E|' line".to_string()))?;
    let mut parts = counts.split_whitespace();
    let num_vertices = parse_index(parts.next(), "vertex count")?;
    let num_edges = parse_index(parts.next(), "edge count")?;
    if parts.next().is_some() {
        return Err(Error::GraphFormat(format!(
            "trailing tokens after '|V| |E|' in '{counts}'"
        )));
    }

    let mut edges = Vec::with_capacity(num_edges);
    for line in lines {
        if edges.len() == num_edges {
            return Err(Error::GraphFormat(format!(
                "more than {num_edges} edge lines"
            )));
        }
        edges.push(parse_edge::<W>(line, num_vertices)?);
    }
    if edges.len() != num_edges {
        return Err(Error::GraphFormat(format!(
            "expected {num_edges} edge lines, found {}",
            edges.len()
        )));
    }

    SearchGraph::from_edges(num_vertices, edges)
        .map_err(|e| Error::GraphFormat(e.to_string()))
}

/// Parse a graph from a `.gr` file on disk.
pub fn read_graph_from_file<W: Weight, P: AsRef<Path>>(path: P) -> Result<SearchGraph<W>> {
    let contents = fs::read_to_string(path)?;
    read_graph_from_string(&contents)
}

fn parse_index(token: Option<&str>, what: &str) -> Result<usize> {
    let token =
        token.ok_or_else(|| Error::GraphFormat(format!("missing {what}")))?;
    token
        .parse::<usize>()
        .map_err(|_| Error::GraphFormat(format!("invalid {what} '{token}'")))
}

fn parse_edge<W: Weight>(line: &str, num_vertices: usize) -> Result<(usize, usize, W)> {
    let mut parts = line.split_whitespace();
    let u = parse_index(parts.next(), "edge tail")?;
    let v = parse_index(parts.next(), "edge head")?;
    let w_token = parts
        .next()
        .ok_or_else(|| Error::GraphFormat(format!("missing weight in '{line}'")))?;
    let w = w_token
        .parse::<W>()
        .map_err(|_| Error::GraphFormat(format!("invalid weight '{w_token}'")))?;

    if u >= num_vertices || v >= num_vertices {
        return Err(Error::GraphFormat(format!(
            "edge ({u}, {v}) references a vertex outside [0, {num_vertices})"
        )));
    }
    if w < W::ZERO {
        return Err(Error::GraphFormat(format!(
            "edge ({u}, {v}) has negative weight {w}"
        )));
    }

    // The trailing flag, if present, is ignored.
    Ok((u, v, w))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_GR: &str = "d\n3 3\n0 1 2 0\n1 2 4 0\n0 2 9 0\n";

    #[test]
    fn reads_a_valid_description() {
        let g: SearchGraph<u32> = read_graph_from_string(SMALL_GR).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 3);
        assert_eq!(g.edge_weight(0, 1), Some(2));
        assert_eq!(g.edge_weight(0, 2), Some(9));
        assert!(!g.has_edge(2, 0));
    }

    #[test]
    fn tolerates_blank_lines_and_missing_flag() {
        let text = "d\n\n2 1\n\n0 1 5\n";
        let g: SearchGraph<u32> = read_graph_from_string(text).unwrap();
        assert_eq!(g.edge_weight(0, 1), Some(5));
    }

    #[test]
    fn rejects_wrong_header() {
        let res: Result<SearchGraph<u32>> = read_graph_from_string("u\n2 1\n0 1 5 0\n");
        assert!(matches!(res, Err(Error::GraphFormat(_))));
    }

    #[test]
    fn rejects_edge_count_mismatch() {
        let too_few: Result<SearchGraph<u32>> = read_graph_from_string("d\n2 2\n0 1 5 0\n");
        assert!(matches!(too_few, Err(Error::GraphFormat(_))));

        let too_many: Result<SearchGraph<u32>> =
            read_graph_from_string("d\n2 1\n0 1 5 0\n1 0 5 0\n");
        assert!(matches!(too_many, Err(Error::GraphFormat(_))));
    }

    #[test]
    fn rejects_out_of_range_endpoint() {
        let res: Result<SearchGraph<u32>> = read_graph_from_string("d\n2 1\n0 5 1 0\n");
        assert!(matches!(res, Err(Error::GraphFormat(_))));
    }

    #[test]
    fn rejects_negative_weight() {
        let res: Result<SearchGraph<i32>> = read_graph_from_string("d\n2 1\n0 1 -3 0\n");
        assert!(matches!(res, Err(Error::GraphFormat(_))));
    }

    #[test]
    fn rejects_malformed_weight() {
        let res: Result<SearchGraph<u32>> = read_graph_from_string("d\n2 1\n0 1 abc 0\n");
        assert!(matches!(res, Err(Error::GraphFormat(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let res: Result<SearchGraph<u32>> =
            read_graph_from_file("/nonexistent/graph.gr");
        assert!(matches!(res, Err(Error::IoError(_))));
    }
}
