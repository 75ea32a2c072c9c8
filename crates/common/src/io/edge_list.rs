use ppi_decomposition::{GraphBuilder, MalformedEdgeError, ProteinGraph};
use std::fs::File;
use std::io::BufRead;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadEdgeListError {
    #[error("malformed edge in line {line}: {source}")]
    MalformedEdge {
        line: usize,
        #[source]
        source: MalformedEdgeError,
    },
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Reads a whitespace separated edge list with lines `a b [weight]`.
///
/// Node identifiers are arbitrary tokens. Empty lines are skipped. If `weighted` is true, every
/// line must carry a positive weight, otherwise a weight column is ignored.
pub fn read_edge_list<P>(path: P, weighted: bool) -> Result<ProteinGraph<String>, ReadEdgeListError>
where
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    parse_edge_list(std::io::BufReader::new(file), weighted)
}

pub fn parse_edge_list<R: BufRead>(reader: R, weighted: bool) -> Result<ProteinGraph<String>, ReadEdgeListError> {
    let mut builder = GraphBuilder::new(weighted);
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_ascii_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }
        builder.add_record(&tokens).map_err(|source| ReadEdgeListError::MalformedEdge { line: i + 1, source })?;
    }
    Ok(builder.build())
}
