use petgraph::graph::NodeIndex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, instrument, trace};

use crate::bisection::{bisect, Bisection, BisectionInfeasible};
use crate::config::DecompositionConfig;
use crate::graph::{NodeId, ProteinGraph};

/// The outcome of classifying a single graph.
#[derive(Debug)]
pub enum Decision<N> {
    /// The graphs are final subgraphs.
    Emit(Vec<ProteinGraph<N>>),
    /// The graphs need further processing.
    Requeue(Vec<ProteinGraph<N>>),
    /// The graph is oversized but could not be bisected. It is accepted as it is.
    Unsplit(ProteinGraph<N>, BisectionInfeasible),
}

/// Counters of a decomposition run.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DecompositionStats {
    /// Number of graphs taken from the work queue.
    pub popped: usize,
    /// Number of graphs pushed back onto the work queue.
    pub requeued: usize,
    /// Number of graphs accepted after a failed bisection.
    pub unsplit: usize,
    /// Largest length of the work queue.
    pub peak_queue_len: usize,
}

/// The result of a decomposition run.
#[derive(Clone, Debug)]
pub struct Decomposition<N> {
    subgraphs: Vec<ProteinGraph<N>>,
    unsplit: Vec<usize>,
    stats: DecompositionStats,
}

impl<N> Decomposition<N> {
    /// Return the subgraphs in the order they were accepted.
    pub fn subgraphs(&self) -> &[ProteinGraph<N>] {
        &self.subgraphs
    }

    /// Return the positions of subgraphs that were accepted unsplit because bisection was
    /// infeasible. These may have `max_size` or more nodes.
    pub fn unsplit(&self) -> &[usize] {
        &self.unsplit
    }

    /// Return `true` if the subgraph at position `i` was accepted unsplit.
    pub fn is_unsplit(&self, i: usize) -> bool {
        self.unsplit.binary_search(&i).is_ok()
    }

    /// Return the counters of the run.
    pub fn stats(&self) -> DecompositionStats {
        self.stats
    }

    /// Return the number of subgraphs.
    pub fn len(&self) -> usize {
        self.subgraphs.len()
    }

    /// Return `true` if there are no subgraphs.
    pub fn is_empty(&self) -> bool {
        self.subgraphs.is_empty()
    }

    /// Return an iterator over the subgraphs.
    pub fn iter(&self) -> std::slice::Iter<'_, ProteinGraph<N>> {
        self.subgraphs.iter()
    }

    /// Convert into the subgraphs.
    pub fn into_subgraphs(self) -> Vec<ProteinGraph<N>> {
        self.subgraphs
    }
}

impl<N> IntoIterator for Decomposition<N> {
    type Item = ProteinGraph<N>;
    type IntoIter = std::vec::IntoIter<ProteinGraph<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.subgraphs.into_iter()
    }
}

impl<'a, N> IntoIterator for &'a Decomposition<N> {
    type Item = &'a ProteinGraph<N>;
    type IntoIter = std::slice::Iter<'a, ProteinGraph<N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.subgraphs.iter()
    }
}

/// Splits graphs into connected subgraphs with fewer than `max_size` nodes.
///
/// Graphs below the threshold are accepted if connected, otherwise each of their components is
/// accepted. Larger graphs are split into their components if disconnected and bisected
/// otherwise. The parts of larger graphs are processed again.
#[derive(Debug)]
pub struct Decomposer {
    config: DecompositionConfig,
    rng: StdRng,
}

impl Decomposer {
    /// Create a decomposer. The random state is seeded with `config.seed`.
    pub fn new(config: DecompositionConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Access the configuration.
    pub fn config(&self) -> &DecompositionConfig {
        &self.config
    }

    /// Decide what happens to a single graph.
    pub fn classify<N: NodeId>(&mut self, graph: ProteinGraph<N>) -> Decision<N> {
        let n = graph.node_count();
        let components = graph.connected_components();
        let connected = components.len() <= 1;

        if n < self.config.max_size {
            if connected {
                trace!(n, "emit");
                return Decision::Emit(vec![graph]);
            }
            trace!(n, components = components.len(), "emit components");
            return Decision::Emit(induced_subgraphs(&graph, &components));
        }

        if !connected {
            trace!(n, components = components.len(), "requeue components");
            return Decision::Requeue(induced_subgraphs(&graph, &components));
        }

        match bisect(&graph, &self.config, &mut self.rng) {
            Ok(Bisection { left, right, cut }) => {
                trace!(n, left = left.len(), right = right.len(), cut, "requeue bisection");
                Decision::Requeue(vec![graph.induced_subgraph(&left), graph.induced_subgraph(&right)])
            }
            Err(reason) => Decision::Unsplit(graph, reason),
        }
    }

    /// Decompose `graph` by classifying graphs from a work queue until it is empty.
    ///
    /// The work queue is processed in LIFO order.
    #[instrument(skip_all, fields(n = graph.node_count(), m = graph.edge_count()))]
    pub fn run<N: NodeId>(&mut self, graph: ProteinGraph<N>) -> Decomposition<N> {
        let mut queue = vec![graph];
        let mut subgraphs = vec![];
        let mut unsplit = vec![];
        let mut stats = DecompositionStats { peak_queue_len: 1, ..Default::default() };

        while let Some(graph) = queue.pop() {
            stats.popped += 1;
            match self.classify(graph) {
                Decision::Emit(graphs) => subgraphs.extend(graphs),
                Decision::Requeue(graphs) => {
                    stats.requeued += graphs.len();
                    queue.extend(graphs);
                    stats.peak_queue_len = stats.peak_queue_len.max(queue.len());
                }
                Decision::Unsplit(graph, reason) => {
                    debug!(n = graph.node_count(), %reason, "accepting graph unsplit");
                    stats.unsplit += 1;
                    unsplit.push(subgraphs.len());
                    subgraphs.push(graph);
                }
            }
        }

        info!(
            subgraphs = subgraphs.len(),
            unsplit = stats.unsplit,
            popped = stats.popped,
            requeued = stats.requeued,
            peak_queue_len = stats.peak_queue_len
        );
        Decomposition { subgraphs, unsplit, stats }
    }
}

fn induced_subgraphs<N: NodeId>(graph: &ProteinGraph<N>, components: &[Vec<NodeIndex>]) -> Vec<ProteinGraph<N>> {
    components.iter().map(|nodes| graph.induced_subgraph(nodes)).collect()
}

/// Decompose `graph` into connected subgraphs with fewer than `config.max_size` nodes.
///
/// See [Decomposer].
pub fn decompose<N: NodeId>(graph: ProteinGraph<N>, config: &DecompositionConfig) -> Decomposition<N> {
    Decomposer::new(config.clone()).run(graph)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::builder::{build_graph, GraphBuilder};
    use crate::tests::{complete_graph, empty_graph, from_edges, path_graph, star_graph};

    fn node_sets(decomposition: &Decomposition<usize>) -> Vec<Vec<usize>> {
        decomposition
            .iter()
            .map(|g| {
                let mut nodes: Vec<usize> = g.nodes().copied().collect();
                nodes.sort();
                nodes
            })
            .collect()
    }

    #[test]
    fn disconnected_pairs() {
        let graph = build_graph::<usize, _, _, _>([["1", "2"], ["3", "4"]], false).unwrap();
        let decomposition = decompose(graph, &DecompositionConfig::default());
        assert_eq!(node_sets(&decomposition), vec![vec![1, 2], vec![3, 4]]);
        assert!(decomposition.iter().all(|g| g.is_connected()));
        assert!(decomposition.unsplit().is_empty());
        assert_eq!(decomposition.stats().popped, 1);
    }

    #[test]
    fn small_example_with_threshold_3() {
        let mut builder = GraphBuilder::new(false);
        for (a, b) in [(1, 2), (1, 3), (2, 3), (2, 4), (3, 4), (4, 5)] {
            builder.add_edge(a, b);
        }
        let decomposition = decompose(builder.build(), &DecompositionConfig::default().with_max_size(3));

        let mut covered: Vec<usize> = node_sets(&decomposition).concat();
        covered.sort();
        assert_eq!(covered, vec![1, 2, 3, 4, 5]);
        assert!(decomposition.unsplit().is_empty());
        for g in &decomposition {
            assert!(g.node_count() < 3);
            assert!(g.is_connected());
        }
    }

    #[test]
    fn below_threshold_is_not_split() {
        let graph = path_graph(19);
        let decomposition = decompose(graph, &DecompositionConfig::default());
        assert_eq!(decomposition.len(), 1);
        assert_eq!(decomposition.subgraphs()[0].node_count(), 19);
        assert_eq!(decomposition.stats().requeued, 0);
    }

    #[test]
    fn threshold_is_oversized() {
        let graph = complete_graph(20);
        let decomposition = decompose(graph, &DecompositionConfig::default());
        assert_eq!(decomposition.len(), 2);
        assert!(decomposition.iter().all(|g| g.node_count() == 10 && g.edge_count() == 45));
        assert_eq!(decomposition.stats().requeued, 2);
    }

    #[test]
    fn small_disconnected_components_are_accepted() {
        let graph = from_edges(5, [(0, 1)]);
        let decomposition = decompose(graph, &DecompositionConfig::default());
        assert_eq!(node_sets(&decomposition), vec![vec![0, 1], vec![2], vec![3], vec![4]]);
        assert_eq!(decomposition.stats().popped, 1);
    }

    #[test]
    fn large_disconnected_components_are_requeued() {
        let mut edges = vec![];
        for i in 0..29 {
            edges.push((i, i + 1));
        }
        let graph = from_edges(32, edges);
        let decomposition = decompose(graph, &DecompositionConfig::default());
        assert!(decomposition.stats().requeued >= 3);
        assert!(decomposition.iter().all(|g| g.node_count() < 20 && g.is_connected()));
        assert_eq!(decomposition.iter().map(|g| g.node_count()).sum::<usize>(), 32);
    }

    #[test]
    fn star_graph_is_split() {
        let graph = star_graph(25);
        let decomposition = decompose(graph, &DecompositionConfig::default());
        assert!(decomposition.unsplit().is_empty());
        assert!(decomposition.iter().all(|g| g.node_count() < 20 && g.is_connected()));
        assert_eq!(decomposition.iter().map(|g| g.node_count()).sum::<usize>(), 25);
    }

    #[test]
    fn empty_graph_is_emitted() {
        let decomposition = decompose(empty_graph(0), &DecompositionConfig::default());
        assert_eq!(decomposition.len(), 1);
        assert!(decomposition.subgraphs()[0].is_empty());
    }

    #[test]
    fn infeasible_bisection_is_emitted_unsplit() {
        let graph = path_graph(4);
        let decomposition = decompose(graph, &DecompositionConfig::default().with_max_size(1));
        assert_eq!(decomposition.len(), 4);
        assert_eq!(decomposition.unsplit(), &[0, 1, 2, 3]);
        assert!((0..4).all(|i| decomposition.is_unsplit(i)));
        assert!(decomposition.iter().all(|g| g.node_count() == 1));
        assert_eq!(decomposition.stats().unsplit, 4);
    }

    #[test]
    fn classify_single_graph() {
        let mut decomposer = Decomposer::new(DecompositionConfig::default().with_max_size(4));
        assert!(matches!(decomposer.classify(path_graph(3)), Decision::Emit(g) if g.len() == 1));
        assert!(matches!(decomposer.classify(empty_graph(3)), Decision::Emit(g) if g.len() == 3));
        assert!(matches!(decomposer.classify(empty_graph(4)), Decision::Requeue(g) if g.len() == 4));
        assert!(matches!(decomposer.classify(path_graph(4)), Decision::Requeue(g) if g.len() == 2));

        let mut decomposer = Decomposer::new(DecompositionConfig::default().with_max_size(0));
        assert!(matches!(
            decomposer.classify(empty_graph(1)),
            Decision::Unsplit(_, BisectionInfeasible::TooFewNodes { node_count: 1 })
        ));
    }

    #[test]
    fn deterministic_for_seed() {
        let config = DecompositionConfig::default().with_max_size(6).with_seed(7);
        let a = decompose(crate::tests::random_graph(80, 0.08, 3), &config);
        let b = decompose(crate::tests::random_graph(80, 0.08, 3), &config);
        assert_eq!(node_sets(&a), node_sets(&b));
    }
}
