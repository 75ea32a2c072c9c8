//! Balanced two-way partitioning with the Kernighan–Lin heuristic.
//!
//! A bisection starts from a random balanced split and improves it in passes. Each pass tentatively
//! swaps pairs of unlocked nodes, one from each side, greedily choosing the nodes with the largest
//! gain. The prefix of swaps with the largest positive cumulative gain is then applied. The
//! heuristic stops when a pass does not improve the cut or the pass limit is reached.
//!
//! # References
//! + \[KL70\]: Brian W. Kernighan and Shen Lin. “An Efficient Heuristic Procedure for Partitioning
//!   Graphs”. <https://doi.org/10.1002/j.1538-7305.1970.tb01770.x>.

use std::fmt::{Display, Formatter};

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{instrument, trace};

use crate::config::DecompositionConfig;
use crate::graph::{NodeId, ProteinGraph, DEFAULT_EDGE_WEIGHT};

/// Smallest cumulative gain, relative to the total edge weight, that counts as an improvement.
const GAIN_EPSILON: f64 = 1e-9;

/// A two-way partition of the nodes of a graph.
#[derive(Clone, Debug, PartialEq)]
pub struct Bisection {
    /// The smaller side, with `⌊n/2⌋` nodes in index order.
    pub left: Vec<NodeIndex>,
    /// The other side, in index order.
    pub right: Vec<NodeIndex>,
    /// Cost of the edges between both sides.
    pub cut: f64,
}

/// The bisection heuristic could not produce two non-empty sides.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum BisectionInfeasible {
    /// A graph with fewer than two nodes cannot be split.
    TooFewNodes {
        /// The number of nodes of the graph.
        node_count: usize,
    },
    /// One side of the partition ended up empty.
    EmptySide,
}

impl Display for BisectionInfeasible {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BisectionInfeasible::TooFewNodes { node_count } => {
                write!(f, "cannot bisect a graph with {node_count} node(s)")
            }
            BisectionInfeasible::EmptySide => f.write_str("bisection produced an empty side"),
        }
    }
}

impl std::error::Error for BisectionInfeasible {}

/// Computes a balanced bisection of `graph` that approximately minimizes the cut.
///
/// Self-loops never cross a cut and are ignored. If `config.weighted` is false, every edge costs
/// one.
///
/// # Errors
///
/// Returns `BisectionInfeasible` if the graph has fewer than two nodes.
#[instrument(skip_all, fields(n = graph.node_count(), m = graph.edge_count()))]
pub fn bisect<N, R>(
    graph: &ProteinGraph<N>,
    config: &DecompositionConfig,
    rng: &mut R,
) -> Result<Bisection, BisectionInfeasible>
where
    N: NodeId,
    R: Rng + ?Sized,
{
    let n = graph.node_count();
    if n < 2 {
        return Err(BisectionInfeasible::TooFewNodes { node_count: n });
    }

    let adjacency = weighted_adjacency(graph, config.weighted);
    let tolerance = GAIN_EPSILON * adjacency.iter().flatten().map(|&(_, w)| w).sum::<f64>();

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);
    let mut side = vec![Side::Left; n];
    for &u in &order[n / 2..] {
        side[u] = Side::Right;
    }

    for pass in 0..config.max_bisection_passes {
        let swaps = sweep(&adjacency, &side);
        let Some((len, gain)) = best_prefix(&swaps, tolerance) else {
            trace!(pass, "no improving swap sequence");
            break;
        };
        trace!(pass, swaps = len, gain);
        for swap in &swaps[..len] {
            side[swap.left] = Side::Right;
            side[swap.right] = Side::Left;
        }
    }

    let (left, right): (Vec<_>, Vec<_>) = graph.node_indices().partition(|u| side[u.index()] == Side::Left);
    if left.is_empty() || right.is_empty() {
        return Err(BisectionInfeasible::EmptySide);
    }
    let cut = graph.cut_cost(&left, config.weighted);
    trace!(cut, left = left.len(), right = right.len());
    Ok(Bisection { left, right, cut })
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Copy, Clone, Debug)]
struct Swap {
    left: usize,
    right: usize,
    gain: f64,
}

fn weighted_adjacency<N: NodeId>(graph: &ProteinGraph<N>, weighted: bool) -> Vec<Vec<(usize, f64)>> {
    let mut adjacency = vec![vec![]; graph.node_count()];
    for e in graph.as_petgraph().edge_references() {
        let (u, v) = (e.source().index(), e.target().index());
        if u == v {
            continue;
        }
        let w = if weighted { *e.weight() } else { DEFAULT_EDGE_WEIGHT };
        adjacency[u].push((v, w));
        adjacency[v].push((u, w));
    }
    adjacency
}

/// Runs one Kernighan–Lin pass on a copy of `side` and returns the tentative swaps in order.
///
/// The gain of a node is its external minus its internal edge cost. Moving the left node first
/// and updating the gains of its neighbors makes the gain of the right node account for the edge
/// between both, so the gain of a swap is the sum of the two gains.
fn sweep(adjacency: &[Vec<(usize, f64)>], side: &[Side]) -> Vec<Swap> {
    let n = side.len();
    let mut side = side.to_vec();
    let mut gain: Vec<f64> = (0..n)
        .map(|u| adjacency[u].iter().map(|&(v, w)| if side[u] == side[v] { -w } else { w }).sum())
        .collect();
    let mut locked = vec![false; n];

    let mut swaps = Vec::with_capacity(n / 2);
    loop {
        let Some(a) = best_unlocked(&gain, &side, &locked, Side::Left) else { break };
        let gain_a = gain[a];
        move_node(a, adjacency, &mut side, &mut locked, &mut gain);

        let Some(b) = best_unlocked(&gain, &side, &locked, Side::Right) else { break };
        let gain_b = gain[b];
        move_node(b, adjacency, &mut side, &mut locked, &mut gain);

        swaps.push(Swap { left: a, right: b, gain: gain_a + gain_b });
    }
    swaps
}

fn best_unlocked(gain: &[f64], side: &[Side], locked: &[bool], on: Side) -> Option<usize> {
    let mut best: Option<usize> = None;
    for u in 0..gain.len() {
        if locked[u] || side[u] != on {
            continue;
        }
        if best.map_or(true, |b| gain[u] > gain[b]) {
            best = Some(u);
        }
    }
    best
}

fn move_node(x: usize, adjacency: &[Vec<(usize, f64)>], side: &mut [Side], locked: &mut [bool], gain: &mut [f64]) {
    locked[x] = true;
    let from = side[x];
    for &(y, w) in &adjacency[x] {
        if locked[y] {
            continue;
        }
        if side[y] == from {
            gain[y] += 2.0 * w;
        } else {
            gain[y] -= 2.0 * w;
        }
    }
    side[x] = from.opposite();
}

/// Returns the length and gain of the shortest prefix with the largest cumulative gain above
/// `tolerance`.
fn best_prefix(swaps: &[Swap], tolerance: f64) -> Option<(usize, f64)> {
    let mut best = None;
    let mut best_gain = tolerance;
    let mut total = 0.0;
    for (i, swap) in swaps.iter().enumerate() {
        total += swap.gain;
        if total > best_gain {
            best_gain = total;
            best = Some((i + 1, total));
        }
    }
    best
}
