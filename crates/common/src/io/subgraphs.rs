use crate::io::SubgraphFormat;
use ppi_decomposition::{NodeId, ProteinGraph};
use std::fmt::Display;
use std::io::Write;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WriteSubgraphsError {
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Writes all subgraphs with at least `min_size` nodes and returns how many were written.
///
/// + `Nodes`: one line per subgraph with its tab separated node identifiers.
/// + `Edges`: one line `i a b weight` per edge, where `i` numbers the written subgraphs.
///   Subgraphs without edges produce no lines.
pub fn write_subgraphs<'a, W, N, I>(
    out: &mut W,
    subgraphs: I,
    format: SubgraphFormat,
    min_size: usize,
) -> Result<usize, WriteSubgraphsError>
where
    W: Write,
    N: NodeId + Display + 'a,
    I: IntoIterator<Item = &'a ProteinGraph<N>>,
{
    let mut written = 0;
    for subgraph in subgraphs.into_iter().filter(|g| g.node_count() >= min_size) {
        match format {
            SubgraphFormat::Nodes => {
                let mut first = true;
                for node in subgraph.nodes() {
                    if first {
                        first = false;
                    } else {
                        write!(out, "\t")?;
                    }
                    write!(out, "{node}")?;
                }
                writeln!(out)?;
            }
            SubgraphFormat::Edges => {
                for (a, b, w) in subgraph.edges() {
                    writeln!(out, "{written}\t{a}\t{b}\t{w}")?;
                }
            }
        }
        written += 1;
    }
    out.flush()?;
    Ok(written)
}
