//! This is a library to split a protein-protein interaction (PPI) network into connected
//! subgraphs of bounded size, for example as input to complex detection.
//!
//! The decomposition repeatedly takes a graph from a work queue and
//! + accepts it, if it has fewer than `max_size` nodes and is connected,
//! + accepts each of its connected components, if it has fewer than `max_size` nodes,
//! + queues each of its connected components, if it is larger and disconnected,
//! + queues both halves of a balanced bisection, if it is larger and connected.
//!
//! Bisections approximately minimize the cut with the Kernighan–Lin heuristic. If a graph cannot
//! be bisected, it is accepted unsplit.
//!
//! # Examples
//!
//! A graph with two components below the threshold.
//! ```rust
//! # use std::error::Error;
//! #
//! # fn main() -> Result<(), Box<dyn Error>> {
//! use ppi_decomposition::{build_graph, decompose, DecompositionConfig};
//!
//! let graph = build_graph::<String, _, _, _>([["YAL001C", "YBR123C"], ["YDR362C", "YGR047C"]], false)?;
//! let decomposition = decompose(graph, &DecompositionConfig::default());
//!
//! assert_eq!(decomposition.len(), 2);
//! assert!(decomposition.iter().all(|subgraph| subgraph.node_count() == 2));
//! # Ok(())
//! # }
//! ```
//!
//! Graphs with at least `max_size` nodes are bisected.
//! ```rust
//! use ppi_decomposition::{decompose, DecompositionConfig, GraphBuilder};
//!
//! let mut builder = GraphBuilder::new(false);
//! for (a, b) in [(1, 2), (1, 3), (2, 3), (2, 4), (3, 4), (4, 5)] {
//!     builder.add_edge(a, b);
//! }
//! let decomposition = decompose(builder.build(), &DecompositionConfig::default().with_max_size(3));
//!
//! assert_eq!(decomposition.iter().map(|subgraph| subgraph.node_count()).sum::<usize>(), 5);
//! assert!(decomposition.iter().all(|subgraph| subgraph.node_count() < 3 && subgraph.is_connected()));
//! ```

#![forbid(unsafe_code)]
#![doc(test(attr(deny(warnings, rust_2018_idioms), allow(dead_code))))]
#![warn(missing_docs, missing_debug_implementations, rust_2018_idioms, unreachable_pub)]

pub mod bisection;
mod builder;
mod config;
mod decompose;
mod graph;


pub use bisection::{Bisection, BisectionInfeasible};
pub use builder::{build_graph, GraphBuilder, MalformedEdgeError};
pub use config::{DecompositionConfig, DEFAULT_MAX_BISECTION_PASSES, DEFAULT_MAX_SIZE};
pub use decompose::{decompose, Decision, Decomposer, Decomposition, DecompositionStats};
pub use graph::{NodeId, ProteinGraph, DEFAULT_EDGE_WEIGHT};
pub use petgraph::graph::NodeIndex;
