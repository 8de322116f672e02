use clap::{Parser, ValueEnum};
use pipegraph::prelude::*;
use std::fs;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// How the resolved pipeline is printed.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// The JSON body the backend run/save endpoints expect
    Json,
    /// One line per step
    Steps,
    /// Step types joined by arrows
    Chain,
}

/// Resolves a pipeline graph exported from the editor into its ordered steps
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the graph JSON file (`{"nodes": [...], "edges": [...]}`)
    graph_path: String,

    /// Optional node-type catalog used to flag nodes of unknown type
    #[arg(short, long)]
    catalog: Option<String>,

    /// Name to attach to the submission payload
    #[arg(short, long)]
    name: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Stop at the first revisited node instead of failing on cycles
    #[arg(long)]
    truncate_cycles: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    let graph_json = fs::read_to_string(&cli.graph_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read graph file '{}': {}",
            cli.graph_path, e
        ))
    });
    let graph: PipelineGraph = serde_json::from_str(&graph_json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse graph JSON: {}", e)));

    if let Some(catalog_path) = &cli.catalog {
        let catalog_json = fs::read_to_string(catalog_path).unwrap_or_else(|e| {
            exit_with_error(&format!(
                "Failed to read catalog file '{}': {}",
                catalog_path, e
            ))
        });
        let catalog = Catalog::from_json(&catalog_json)
            .unwrap_or_else(|e| exit_with_error(&format!("Invalid catalog: {}", e)));
        for node in graph.nodes().iter().filter(|n| !n.is_start()) {
            if !catalog.contains(&node.node_type) {
                eprintln!(
                    "Warning: node '{}' has type '{}', which the catalog does not define",
                    node.id, node.node_type
                );
            }
        }
    }

    let policy = if cli.truncate_cycles {
        CyclePolicy::Truncate
    } else {
        CyclePolicy::Fail
    };
    let steps = PipelineResolver::new()
        .with_cycle_policy(policy)
        .resolve(graph.nodes(), graph.edges())
        .unwrap_or_else(|e| exit_with_error(&format!("Resolution failed: {}", e)));
    let duration = start.elapsed();
    let resolved = steps.len();

    match cli.format {
        OutputFormat::Json => {
            let submission = match cli.name {
                Some(name) => PipelineSubmission::named(steps, name),
                None => PipelineSubmission::new(steps),
            };
            let json = submission.to_json().unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to serialize pipeline: {}", e))
            });
            println!("{}", json);
        }
        OutputFormat::Steps => {
            for step in &steps {
                println!("{}", step);
            }
        }
        OutputFormat::Chain => println!("{}", format_chain(&steps)),
    }

    eprintln!(
        "Resolved {} of {} nodes in {:?}",
        resolved,
        graph.len(),
        duration
    );
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
