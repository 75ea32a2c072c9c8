use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;

use petgraph::graph::{NodeIndex, NodeIndices, UnGraph};
use petgraph::unionfind::UnionFind;
use petgraph::visit::EdgeRef;

/// Weight assigned to edges of unweighted inputs.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Bounds for node identifiers. Identifiers are opaque tokens that are only compared for equality.
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeId for T {}

/// An undirected, weighted interaction graph.
///
/// Node weights are the node identifiers, edge weights are the interaction weights. A graph is
/// never mutated after construction, splitting it always derives new graphs.
#[derive(Clone, Debug)]
pub struct ProteinGraph<N> {
    graph: UnGraph<N, f64>,
    index: HashMap<N, NodeIndex>,
}

impl<N: NodeId> ProteinGraph<N> {
    /// `index` maps every node identifier of `graph` to its node index.
    pub(crate) fn from_parts(graph: UnGraph<N, f64>, index: HashMap<N, NodeIndex>) -> Self {
        debug_assert_eq!(graph.node_count(), index.len());
        Self { graph, index }
    }

    /// Return the number of nodes.
    #[inline(always)]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of edges.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Return an iterator over the node identifiers in index order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> + '_ {
        self.graph.node_weights()
    }

    /// Return an iterator over the node indices.
    pub fn node_indices(&self) -> NodeIndices {
        self.graph.node_indices()
    }

    /// Access the identifier of a node.
    ///
    /// If the node does not exist, return None.
    pub fn node(&self, node: NodeIndex) -> Option<&N> {
        self.graph.node_weight(node)
    }

    /// Return an iterator over all edges as `(a, b, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&N, &N, f64)> + '_ {
        self.graph.edge_references().map(|e| (&self.graph[e.source()], &self.graph[e.target()], *e.weight()))
    }

    /// Return the index of the node with the given identifier.
    pub fn find(&self, node: &N) -> Option<NodeIndex> {
        self.index.get(node).copied()
    }

    /// Return `true` if a node with the given identifier exists.
    pub fn contains_node(&self, node: &N) -> bool {
        self.find(node).is_some()
    }

    /// Return the weight of the edge between `a` and `b`, if there is one.
    pub fn weight(&self, a: &N, b: &N) -> Option<f64> {
        let (a, b) = (self.find(a)?, self.find(b)?);
        self.graph.find_edge(a, b).map(|e| self.graph[e])
    }

    /// Borrow the underlying [UnGraph].
    ///
    /// This allows the use of [petgraph] algorithms on the graph.
    pub fn as_petgraph(&self) -> &UnGraph<N, f64> {
        &self.graph
    }

    /// Derive the subgraph induced by `nodes`.
    ///
    /// The new graph contains the given nodes in the given order and every edge with both
    /// endpoints among them.
    ///
    /// Panics if a node index is out of bounds.
    pub fn induced_subgraph(&self, nodes: &[NodeIndex]) -> Self {
        let mut position: Vec<Option<NodeIndex>> = vec![None; self.graph.node_count()];
        let mut graph = UnGraph::with_capacity(nodes.len(), 0);
        let mut index = HashMap::with_capacity(nodes.len());
        for &u in nodes {
            debug_assert!(position[u.index()].is_none(), "duplicate node {u:?}");
            let v = graph.add_node(self.graph[u].clone());
            index.insert(self.graph[u].clone(), v);
            position[u.index()] = Some(v);
        }
        for e in self.graph.edge_references() {
            if let (Some(a), Some(b)) = (position[e.source().index()], position[e.target().index()]) {
                graph.add_edge(a, b, *e.weight());
            }
        }
        Self { graph, index }
    }

    /// Return `true` if every node is reachable from every other node.
    ///
    /// Graphs with zero or one nodes are connected.
    pub fn is_connected(&self) -> bool {
        self.graph.node_count() <= 1 || petgraph::algo::connected_components(&self.graph) == 1
    }

    /// Return the connected components of the graph.
    ///
    /// Components are ordered by their smallest node index and the nodes of each component are
    /// in index order. The empty graph has no components.
    pub fn connected_components(&self) -> Vec<Vec<NodeIndex>> {
        let n = self.graph.node_count();
        let mut union_find = UnionFind::<usize>::new(n);
        for e in self.graph.edge_references() {
            union_find.union(e.source().index(), e.target().index());
        }

        let mut component_of_root = vec![usize::MAX; n];
        let mut components: Vec<Vec<NodeIndex>> = vec![];
        for u in self.graph.node_indices() {
            let root = union_find.find_mut(u.index());
            if component_of_root[root] == usize::MAX {
                component_of_root[root] = components.len();
                components.push(vec![]);
            }
            components[component_of_root[root]].push(u);
        }
        components
    }

    /// Return the cost of cutting `part` from the rest of the graph.
    ///
    /// The cost is the sum of the weights of crossing edges, or their number if `weighted` is
    /// false.
    pub fn cut_cost(&self, part: &[NodeIndex], weighted: bool) -> f64 {
        let mut inside = vec![false; self.graph.node_count()];
        for u in part {
            inside[u.index()] = true;
        }
        self.graph
            .edge_references()
            .filter(|e| inside[e.source().index()] != inside[e.target().index()])
            .map(|e| if weighted { *e.weight() } else { DEFAULT_EDGE_WEIGHT })
            .sum()
    }
}

impl<N> Display for ProteinGraph<N> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "node_count: {}, edge_count: {}", self.graph.node_count(), self.graph.edge_count())
    }
}
