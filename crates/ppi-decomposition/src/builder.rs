use std::collections::HashMap;
use std::str::FromStr;

use petgraph::graph::{NodeIndex, UnGraph};
use thiserror::Error;

use crate::graph::{NodeId, ProteinGraph, DEFAULT_EDGE_WEIGHT};

/// An edge record could not be decoded.
#[derive(Error, Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum MalformedEdgeError {
    #[error("missing endpoint (expected 2 node identifiers, got {found})")]
    MissingEndpoint { found: usize },
    #[error("missing edge weight")]
    MissingWeight,
    #[error("invalid edge weight (expected a positive number, got {0})")]
    InvalidWeight(String),
    #[error("invalid node identifier (got {0})")]
    InvalidNode(String),
    #[error("trailing tokens (expected at most 3, got {found})")]
    TrailingTokens { found: usize },
}

/// Builds a [ProteinGraph] from edges.
///
/// The node set is the union of all endpoints and explicitly added nodes. Parallel edges collapse
/// into one edge, the weight of the last inserted duplicate wins.
#[derive(Debug)]
pub struct GraphBuilder<N> {
    graph: UnGraph<N, f64>,
    index: HashMap<N, NodeIndex>,
    weighted: bool,
}

impl<N: NodeId> GraphBuilder<N> {
    /// Create a new builder. If `weighted` is true, decoded records must carry a weight.
    pub fn new(weighted: bool) -> Self {
        Self::with_capacity(weighted, 0, 0)
    }

    /// Create a new builder with space for `nodes` nodes and `edges` edges.
    pub fn with_capacity(weighted: bool, nodes: usize, edges: usize) -> Self {
        Self { graph: UnGraph::with_capacity(nodes, edges), index: HashMap::with_capacity(nodes), weighted }
    }

    /// Return whether records are decoded with weights.
    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Add a node, possibly without any edges. Adding an existing node has no effect.
    pub fn add_node(&mut self, node: N) -> NodeIndex {
        if let Some(&u) = self.index.get(&node) {
            return u;
        }
        let u = self.graph.add_node(node.clone());
        self.index.insert(node, u);
        u
    }

    /// Add an edge with the default weight.
    pub fn add_edge(&mut self, a: N, b: N) -> &mut Self {
        self.add_weighted_edge(a, b, DEFAULT_EDGE_WEIGHT)
    }

    /// Add an edge with the given weight, replacing the weight of an existing edge.
    pub fn add_weighted_edge(&mut self, a: N, b: N, weight: f64) -> &mut Self {
        let a = self.add_node(a);
        let b = self.add_node(b);
        self.graph.update_edge(a, b, weight);
        self
    }

    /// Return the number of nodes added so far.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Finish construction.
    pub fn build(self) -> ProteinGraph<N> {
        ProteinGraph::from_parts(self.graph, self.index)
    }
}

impl<N: NodeId + FromStr> GraphBuilder<N> {
    /// Decode a record of tokens `a b [weight]` and add it as an edge.
    ///
    /// In unweighted mode a trailing weight column is ignored.
    ///
    /// # Errors
    ///
    /// Returns a `MalformedEdgeError` if the record does not contain two endpoints, or no valid
    /// weight in weighted mode. The builder is unchanged in that case.
    pub fn add_record<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<&mut Self, MalformedEdgeError> {
        let (a, b, weight) = decode_record(tokens, self.weighted)?;
        Ok(self.add_weighted_edge(a, b, weight))
    }
}

fn decode_record<N, S>(tokens: &[S], weighted: bool) -> Result<(N, N, f64), MalformedEdgeError>
where
    N: FromStr,
    S: AsRef<str>,
{
    let found = tokens.len();
    let [a, b, rest @ ..] = tokens else {
        return Err(MalformedEdgeError::MissingEndpoint { found });
    };
    if rest.len() > 1 {
        return Err(MalformedEdgeError::TrailingTokens { found });
    }
    let weight = match (weighted, rest.first()) {
        (false, _) => DEFAULT_EDGE_WEIGHT,
        (true, None) => return Err(MalformedEdgeError::MissingWeight),
        (true, Some(w)) => {
            let w = w.as_ref();
            match w.parse::<f64>() {
                Ok(value) if value.is_finite() && value > 0.0 => value,
                _ => return Err(MalformedEdgeError::InvalidWeight(w.to_string())),
            }
        }
    };
    let parse = |token: &S| {
        let token = token.as_ref();
        token.parse::<N>().map_err(|_| MalformedEdgeError::InvalidNode(token.to_string()))
    };
    Ok((parse(a)?, parse(b)?, weight))
}

/// Build a graph from a sequence of token records.
///
/// # Errors
///
/// Returns the error of the first record that cannot be decoded.
pub fn build_graph<N, I, R, S>(records: I, weighted: bool) -> Result<ProteinGraph<N>, MalformedEdgeError>
where
    N: NodeId + FromStr,
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = GraphBuilder::new(weighted);
    for record in records {
        builder.add_record(record.as_ref())?;
    }
    Ok(builder.build())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parallel_edges_collapse() {
        let mut builder = GraphBuilder::new(true);
        builder.add_weighted_edge("a", "b", 0.5).add_weighted_edge("b", "a", 0.7).add_edge("b", "c");
        let graph = builder.build();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weight(&"a", &"b"), Some(0.7));
        assert_eq!(graph.weight(&"c", &"b"), Some(DEFAULT_EDGE_WEIGHT));
    }

    #[test]
    fn isolated_nodes() {
        let mut builder = GraphBuilder::<u32>::new(false);
        builder.add_node(7);
        builder.add_node(7);
        builder.add_edge(1, 2);
        let graph = builder.build();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.nodes().copied().collect::<Vec<_>>(), vec![7, 1, 2]);
    }

    #[test]
    fn unweighted_records() {
        let graph: ProteinGraph<String> =
            build_graph([vec!["YAL001C", "YBR123C"], vec!["YBR123C", "YDR362C", "0.3"]], false).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weight(&"YBR123C".to_string(), &"YDR362C".to_string()), Some(DEFAULT_EDGE_WEIGHT));
    }

    #[test]
    fn weighted_records() {
        let graph: ProteinGraph<String> = build_graph([["a", "b", "0.25"], ["b", "c", "2"]], true).unwrap();
        assert_eq!(graph.weight(&"a".to_string(), &"b".to_string()), Some(0.25));
        assert_eq!(graph.weight(&"c".to_string(), &"b".to_string()), Some(2.0));
    }

    #[test]
    fn malformed_records() {
        let err = build_graph::<String, _, _, _>([vec!["a"]], false).unwrap_err();
        assert_eq!(err, MalformedEdgeError::MissingEndpoint { found: 1 });

        let err = build_graph::<String, _, _, _>([Vec::<&str>::new()], false).unwrap_err();
        assert_eq!(err, MalformedEdgeError::MissingEndpoint { found: 0 });

        let err = build_graph::<String, _, _, _>([vec!["a", "b"]], true).unwrap_err();
        assert_eq!(err, MalformedEdgeError::MissingWeight);

        let err = build_graph::<String, _, _, _>([vec!["a", "b", "x"]], true).unwrap_err();
        assert_eq!(err, MalformedEdgeError::InvalidWeight("x".to_string()));

        let err = build_graph::<String, _, _, _>([vec!["a", "b", "-1"]], true).unwrap_err();
        assert_eq!(err, MalformedEdgeError::InvalidWeight("-1".to_string()));

        let err = build_graph::<String, _, _, _>([vec!["a", "b", "1", "2"]], false).unwrap_err();
        assert_eq!(err, MalformedEdgeError::TrailingTokens { found: 4 });

        let err = build_graph::<u32, _, _, _>([vec!["1", "x"]], false).unwrap_err();
        assert_eq!(err, MalformedEdgeError::InvalidNode("x".to_string()));
        assert_eq!(format!("{}", err), "invalid node identifier (got x)".to_string());
    }

    #[test]
    fn failed_record_leaves_builder_unchanged() {
        let mut builder = GraphBuilder::<String>::new(true);
        assert!(builder.add_record(&["a", "b"]).is_err());
        assert_eq!(builder.node_count(), 0);
    }
}
