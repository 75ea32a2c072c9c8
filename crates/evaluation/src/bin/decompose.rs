use clap::Parser;
use common::io::{read_edge_list, write_subgraphs, SubgraphFormat};
use ppi_decomposition::{Decomposer, DecompositionConfig, DEFAULT_MAX_BISECTION_PASSES, DEFAULT_MAX_SIZE};
use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Parser)]
struct Cli {
    #[arg(long)]
    input: PathBuf,
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    weighted: bool,
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_BISECTION_PASSES)]
    max_passes: usize,
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Subgraphs with fewer nodes are not written.
    #[arg(long, default_value_t = 3)]
    min_size: usize,
    #[arg(long, value_enum, default_value_t = SubgraphFormat::Nodes)]
    format: SubgraphFormat,
    #[arg(long)]
    log_level: Option<Level>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(level) = cli.log_level {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(level)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(std::io::stderr)
            .finish();

        subscriber.init();
    };

    let graph = read_edge_list(&cli.input, cli.weighted)?;
    info!(input = %cli.input.display(), n = graph.node_count(), m = graph.edge_count());

    let config = DecompositionConfig::default()
        .with_max_size(cli.max_size)
        .with_weighted(cli.weighted)
        .with_max_bisection_passes(cli.max_passes)
        .with_seed(cli.seed);
    let start = Instant::now();
    let decomposition = Decomposer::new(config).run(graph);
    let t = start.elapsed();

    let mut out: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };
    let written = write_subgraphs(&mut out, &decomposition, cli.format, cli.min_size)?;
    info!(subgraphs = decomposition.len(), written, time_us = t.as_micros() as u64);
    Ok(())
}
