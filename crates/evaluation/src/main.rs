use clap::Parser;
use common::io::read_edge_list;
use ppi_decomposition::{decompose, DecompositionConfig, DEFAULT_MAX_SIZE};
use std::error::Error;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

/// Decomposes every edge list in a directory and reports timings and subgraph statistics.
#[derive(Debug, Parser)]
struct Cli {
    dir: PathBuf,
    #[arg(long)]
    weighted: bool,
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Subgraphs with fewer nodes are not counted as reported.
    #[arg(long, default_value_t = 3)]
    min_size: usize,
    #[arg(long)]
    log_level: Option<Level>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(level) = cli.log_level {
        FmtSubscriber::builder().with_max_level(level).with_span_events(FmtSpan::CLOSE).finish().init();
    }

    let config =
        DecompositionConfig::default().with_max_size(cli.max_size).with_weighted(cli.weighted).with_seed(cli.seed);

    let mut paths: Vec<_> =
        fs::read_dir(&cli.dir)?.filter_map(|p| p.ok()).map(|p| p.path()).filter(|p| p.is_file()).collect();
    paths.sort_by_key(|p| p.metadata().map(|m| m.len()).unwrap_or(0));

    for (i, path) in paths.iter().enumerate() {
        let start = Instant::now();
        let graph = read_edge_list(path, cli.weighted)?;
        let t_read = start.elapsed();
        let (n, m) = (graph.node_count(), graph.edge_count());

        let start = Instant::now();
        let decomposition = decompose(graph, &config);
        let t_decompose = start.elapsed();

        let stats = decomposition.stats();
        let largest = decomposition.iter().map(|g| g.node_count()).max().unwrap_or(0);
        let reported = decomposition.iter().filter(|g| g.node_count() >= cli.min_size).count();

        println!("{i:4} {:<30.30}  n {n:6} m {m:7}  read {:9} μs  decompose {:9} μs  subgraphs {:6} [{reported:6}]  largest {largest:4}  unsplit {:4}  popped {:6}",
                 path.file_name().and_then(OsStr::to_str).unwrap_or("?"),
                 t_read.as_micros(),
                 t_decompose.as_micros(),
                 decomposition.len(),
                 stats.unsplit,
                 stats.popped,
        );
    }
    Ok(())
}
