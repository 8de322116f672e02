//! Integration tests for pipegraph
//!
//! End-to-end tests: graph JSON exported by the editor in, backend payload out.
//!
mod common;
use common::*;
use pipegraph::prelude::*;
use std::sync::Arc;
use tokio_test::block_on;

const EXPORTED_GRAPH_JSON: &str = r#"{
    "nodes": [
        {
            "id": "1",
            "type": "select_files",
            "position": {"x": 250, "y": 0},
            "data": {
                "label": "Select files",
                "parameters": {
                    "files": [3, 5],
                    "0": {"name": "files", "label": "Files", "type": "text"}
                }
            }
        },
        {
            "id": "2",
            "type": "FeatureFinderMetabo",
            "position": {"x": 250, "y": 120},
            "data": {
                "label": "FeatureFinderMetabo Node",
                "parameters": {"noise_threshold": 1000, "mass_traces": ["a"]}
            }
        },
        {
            "id": "4",
            "type": "AccurateMass",
            "position": {"x": 250, "y": 240},
            "data": {
                "label": "AccurateMass Node",
                "parameters": [{"name": "tolerance", "label": "Tolerance", "type": "number"}]
            }
        }
    ],
    "edges": [
        {"id": "reactflow__edge-1-2", "source": "1", "target": "2"},
        {"id": "reactflow__edge-2-4", "source": "2", "target": "4"}
    ]
}"#;

#[test]
fn test_exported_graph_resolves_to_backend_payload() {
    let graph: PipelineGraph =
        serde_json::from_str(EXPORTED_GRAPH_JSON).expect("Failed to parse exported graph");
    let steps = graph.resolve().expect("Failed to resolve");

    let payload = serde_json::to_value(PipelineSubmission::named(steps, "screen")).unwrap();
    assert_eq!(payload["name"], "screen");

    let pipeline = payload["pipeline"].as_array().unwrap();
    assert_eq!(pipeline.len(), 3);

    assert_eq!(pipeline[0]["type"], "select_files");
    assert_eq!(pipeline[0]["index"], 1);
    assert_eq!(pipeline[0]["data"]["label"], "Select files");
    assert_eq!(
        pipeline[0]["data"]["parameters"],
        serde_json::json!({"files": [3, 5]})
    );

    assert_eq!(pipeline[1]["id"], "2");
    assert_eq!(pipeline[1]["data"]["label"], "FeatureFinderMetabo Node");
    assert_eq!(pipeline[1]["data"]["parameters"]["noise_threshold"], 1000);

    assert_eq!(pipeline[2]["type"], "AccurateMass");
    assert_eq!(pipeline[2]["data"]["parameters"], serde_json::json!({}));
}

#[test]
fn test_unnamed_payload_omits_name() {
    let payload = serde_json::to_value(PipelineSubmission::new(vec![])).unwrap();
    assert!(payload.get("name").is_none());
    assert_eq!(payload["pipeline"], serde_json::json!([]));
}

#[test]
fn test_payload_round_trips_through_wire_shape() {
    let (graph, _) = create_chain(&["FileConverter", "AccurateMass"]);
    let submission = PipelineSubmission::named(graph.resolve().unwrap(), "round trip");

    let json = submission.to_json().unwrap();
    let parsed: PipelineSubmission = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, submission);
}

#[test]
fn test_imported_graph_continues_editing_with_fresh_ids() {
    let graph: PipelineGraph = serde_json::from_str(EXPORTED_GRAPH_JSON).unwrap();
    let client = Arc::new(RecordingClient::default());
    let mut session = EditorSession::builder(7, client.clone())
        .with_catalog(create_catalog())
        .with_graph(graph)
        .with_pipeline_name("extended")
        .build();

    let converter = session.add_node("FileConverter", Position::default());
    assert_eq!(converter.as_str(), "5");
    session.connect("4", converter).unwrap();

    block_on(session.save()).unwrap();
    let recorded = client.recorded();
    assert_eq!(
        format_chain(&recorded[0].2.pipeline),
        "select_files -> FeatureFinderMetabo -> AccurateMass -> FileConverter"
    );
}

#[test]
fn test_catalog_file_source() {
    let path = std::env::temp_dir().join(format!("pipegraph_catalog_{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"functions": [{"name": "FileConverter", "parameters": []}]}"#,
    )
    .unwrap();

    let catalog = block_on(Catalog::try_load(&JsonCatalogFile::new(&path))).unwrap();
    assert!(catalog.contains("FileConverter"));
    std::fs::remove_file(&path).unwrap();

    let missing = block_on(Catalog::try_load(&JsonCatalogFile::new(&path)));
    assert!(matches!(missing, Err(CatalogError::Io { .. })));
}
