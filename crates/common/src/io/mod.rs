mod edge_list;
mod subgraphs;

use clap::ValueEnum;
pub use edge_list::parse_edge_list;
pub use edge_list::read_edge_list;
pub use edge_list::ReadEdgeListError;
pub use subgraphs::write_subgraphs;
pub use subgraphs::WriteSubgraphsError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum SubgraphFormat {
    Nodes,
    Edges,
}
