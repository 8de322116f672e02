use clap::Parser;
use pipegraph::prelude::*;
use rand::Rng;
use rand::rngs::ThreadRng;
use std::fs;

const NODE_TYPES: &[&str] = &[
    "FileConverter",
    "FeatureFinderMetabo",
    "MapAlignerPoseClustering",
    "FeatureLinkerUnlabeledQT",
    "MetaboliteAdductDecharger",
    "AccurateMass",
    "MetaboliteSpectralMatcher",
];

/// A CLI tool to generate random pipeline graphs for the pipegraph resolver
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Where to write the generated graph JSON
    #[arg(short, long, default_value = "generated_graph.json")]
    output: String,

    /// Where to write the matching catalog JSON
    #[arg(long, default_value = "generated_catalog.json")]
    catalog_output: String,

    /// Number of nodes chained after the start node
    #[arg(long, default_value_t = 5)]
    length: usize,

    /// Number of extra, unconnected nodes scattered on the canvas
    #[arg(long, default_value_t = 0)]
    strays: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    let definitions = generate_catalog(&mut rng);
    let catalog = Catalog::from_definitions(definitions.clone())?;

    println!(
        "Generating a chain of {} nodes with {} stray nodes...",
        cli.length, cli.strays
    );

    let mut graph = PipelineGraph::new();
    let mut previous = NodeId::start();
    for step in 0..cli.length {
        let node_type = NODE_TYPES[rng.random_range(0..NODE_TYPES.len())];
        let position = Position::new(250.0, 120.0 * (step + 1) as f64);
        let id = graph.add_node(node_type, position, &catalog);
        graph.connect(previous, id.clone())?;
        previous = id;
    }
    for _ in 0..cli.strays {
        let node_type = NODE_TYPES[rng.random_range(0..NODE_TYPES.len())];
        let position = Position::new(rng.random_range(0.0..800.0), rng.random_range(0.0..800.0));
        graph.add_node(node_type, position, &catalog);
    }

    fs::write(&cli.output, serde_json::to_string_pretty(&graph)?)?;
    fs::write(
        &cli.catalog_output,
        serde_json::to_string_pretty(&serde_json::json!({ "functions": definitions }))?,
    )?;

    println!(
        "Successfully wrote graph to '{}' and catalog to '{}'",
        cli.output, cli.catalog_output
    );
    Ok(())
}

/// One definition per known node type with a few random parameters each.
fn generate_catalog(rng: &mut ThreadRng) -> Vec<NodeTypeDefinition> {
    NODE_TYPES
        .iter()
        .map(|name| {
            let count = rng.random_range(1..=4);
            let parameters = (0..count)
                .map(|i| {
                    let kind = match rng.random_range(0..3) {
                        0 => ParameterKind::Text,
                        1 => ParameterKind::Number,
                        _ => ParameterKind::List,
                    };
                    ParameterSchema::new(format!("param_{}", i), format!("Parameter {}", i), kind)
                })
                .collect();
            NodeTypeDefinition {
                name: name.to_string(),
                parameters,
            }
        })
        .collect()
}
