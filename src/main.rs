//! Command-line front end for the OnePass+ engine.
//!
//! Reads a `.gr` graph description, runs one query and prints one line per
//! accepted path: the total length, a tab, then the vertex sequence.

use anyhow::{Context, Result};
use byway::{onepass_plus, read_graph_from_file, SearchGraph};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Compute k dissimilar alternative shortest paths with OnePass+
#[derive(Parser)]
#[command(name = "byway")]
#[command(about = "Compute k dissimilar alternative shortest paths", long_about = None)]
struct Cli {
    /// The .gr graph description file
    #[arg(short = 'f', long)]
    graph_file: PathBuf,

    /// The source node index
    #[arg(short = 'S', long)]
    source: usize,

    /// The destination node index
    #[arg(short = 'D', long)]
    destination: usize,

    /// The number k of alternative paths
    #[arg(short = 'k', long)]
    k_paths: usize,

    /// The similarity threshold, within [0, 1]
    #[arg(short = 's', long)]
    similarity_threshold: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let graph: SearchGraph<u64> = read_graph_from_file(&cli.graph_file)
        .with_context(|| format!("failed to read graph from {}", cli.graph_file.display()))?;
    info!(
        "loaded graph: {} vertices, {} edges",
        graph.num_vertices(),
        graph.num_edges()
    );

    let start = Instant::now();
    let paths = onepass_plus(
        &graph,
        cli.source,
        cli.destination,
        cli.k_paths,
        cli.similarity_threshold,
    )?;
    info!(
        "query {} -> {} answered in {:.3}ms",
        cli.source,
        cli.destination,
        start.elapsed().as_secs_f64() * 1000.0
    );

    if paths.is_empty() {
        eprintln!("no path from {} to {}", cli.source, cli.destination);
        return Ok(());
    }

    for path in &paths {
        let vertices: Vec<String> = path.vertices.iter().map(usize::to_string).collect();
        println!("{}\t{}", path.length, vertices.join(" "));
    }
    eprintln!("{} of {} requested paths", paths.len(), cli.k_paths);

    Ok(())
}
