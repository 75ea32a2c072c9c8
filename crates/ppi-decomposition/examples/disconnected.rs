use ppi_decomposition::{build_graph, decompose, DecompositionConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let records = [["YAL001C", "YBR123C"], ["YBR123C", "YDR362C"], ["YGR047C", "YOR110W"]];
    let graph = build_graph::<String, _, _, _>(records, false)?;
    println!("input {graph}");

    let decomposition = decompose(graph, &DecompositionConfig::default());
    for subgraph in &decomposition {
        let nodes: Vec<_> = subgraph.nodes().map(String::as_str).collect();
        println!("{}", nodes.join("\t"));
    }
    println!("{:?}", decomposition.stats());
    Ok(())
}
