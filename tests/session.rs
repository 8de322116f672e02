//! Tests for the editor session and its collaborators.
mod common;
use common::*;
use pipegraph::prelude::*;
use std::sync::Arc;
use tokio_test::block_on;

#[test]
fn test_session_loads_catalog_and_experiments() {
    let client = Arc::new(RecordingClient::default());
    let mut session = create_session(client);

    block_on(session.initialize());
    assert_eq!(session.catalog().len(), 3);
    assert_eq!(session.experiments().len(), 2);
    assert_eq!(session.experiments()[0].name, "plasma_run_a");
}

#[test]
fn test_added_nodes_use_loaded_catalog() {
    let mut session = create_session(Arc::new(RecordingClient::default()));
    block_on(session.load_catalog());

    let id = session.add_node("FileConverter", Position::default());
    let node = session.graph().node(id.as_str()).unwrap();
    assert!(node.parameters.contains_key("output_format"));
}

#[test]
fn test_catalog_failure_degrades_to_empty_catalog() {
    let mut session = EditorSession::builder(7, Arc::new(RecordingClient::default()))
        .with_catalog_source(Arc::new(UnavailableCatalog))
        .build();

    assert_eq!(block_on(session.load_catalog()), 0);
    assert!(session.catalog().is_empty());

    // Editing and resolving still work
    let id = session.add_node("FileConverter", Position::default());
    session.connect("1", id).unwrap();
    let steps = session.resolve().unwrap();
    assert_eq!(steps.len(), 2);
    assert!(steps[1].parameters.is_empty());
}

#[test]
fn test_try_load_reports_catalog_failure() {
    let result = block_on(Catalog::try_load(&UnavailableCatalog));
    assert!(matches!(result, Err(CatalogError::Unavailable(_))));
}

#[test]
fn test_experiment_failure_leaves_list_empty() {
    let mut session = EditorSession::builder(99, Arc::new(RecordingClient::default()))
        .with_experiment_source(Arc::new(FixedExperiments))
        .build();

    assert_eq!(block_on(session.load_experiments()), 0);
    assert!(session.experiments().is_empty());
}

#[test]
fn test_session_without_sources() {
    let mut session = EditorSession::builder(1, Arc::new(RecordingClient::default())).build();
    block_on(session.initialize());
    assert!(session.catalog().is_empty());
    assert!(session.experiments().is_empty());
}

#[test]
fn test_select_files_sets_start_node_files() {
    let mut session = create_session(Arc::new(RecordingClient::default()));
    block_on(session.initialize());

    let ids: Vec<u64> = session
        .experiments()
        .iter()
        .map(|e| e.progressive_id)
        .collect();
    session.select_files(&ids).unwrap();

    let start = session.graph().node("1").unwrap();
    assert_eq!(
        start.parameters["files"],
        ParameterValue::List(vec![serde_json::json!(10), serde_json::json!(11)])
    );
}

#[test]
fn test_run_submits_resolved_pipeline() {
    let client = Arc::new(RecordingClient::default());
    let mut session = create_session(client.clone());
    block_on(session.load_catalog());

    let converter = session.add_node("FileConverter", Position::default());
    let finder = session.add_node("FeatureFinderMetabo", Position::default());
    session.connect("1", converter.clone()).unwrap();
    session.connect(converter, finder).unwrap();

    let receipt = block_on(session.run()).expect("Run should be accepted");
    assert_eq!(receipt.status, 200);

    let recorded = client.recorded();
    assert_eq!(recorded.len(), 1);
    let (endpoint, project_id, submission) = &recorded[0];
    assert_eq!(*endpoint, Endpoint::Process);
    assert_eq!(*project_id, 7);
    assert!(submission.name.is_none());
    assert_eq!(
        format_chain(&submission.pipeline),
        "select_files -> FileConverter -> FeatureFinderMetabo"
    );
    assert_eq!(submission.pipeline, session.resolve().unwrap());
}

#[test]
fn test_save_requires_a_name() {
    let client = Arc::new(RecordingClient::default());
    let mut session = create_session(client.clone());
    session.set_pipeline_name("   ");

    let err = block_on(session.save()).unwrap_err();
    assert!(matches!(err, SessionError::EmptyPipelineName));
    assert!(client.recorded().is_empty());
}

#[test]
fn test_save_sends_named_pipeline() {
    let client = Arc::new(RecordingClient::default());
    let mut session = create_session(client.clone());
    session.set_pipeline_name("plasma screen");

    block_on(session.save()).unwrap();

    let recorded = client.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, Endpoint::Save);
    assert_eq!(recorded[0].2.name.as_deref(), Some("plasma screen"));
    assert_eq!(recorded[0].2.pipeline.len(), 1);
}

#[test]
fn test_rejected_submission_surfaces_error() {
    let session = create_session(Arc::new(RecordingClient::rejecting(500)));

    match block_on(session.run()) {
        Err(SessionError::Submission(SubmissionError::Rejected { status, .. })) => {
            assert_eq!(status, 500)
        }
        other => panic!("Expected a rejected submission, got {:?}", other),
    }
}

#[test]
fn test_cyclic_graph_is_never_submitted() {
    let client = Arc::new(RecordingClient::default());
    let mut session = create_session(client.clone());
    session.connect("1", "1").unwrap();

    let err = block_on(session.run()).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Resolve(ResolveError::CycleDetected { .. })
    ));
    assert!(client.recorded().is_empty());
}

#[test]
fn test_session_with_truncating_resolver() {
    let client = Arc::new(RecordingClient::default());
    let mut session = EditorSession::builder(7, client.clone())
        .with_resolver(PipelineResolver::new().with_cycle_policy(CyclePolicy::Truncate))
        .build();
    session.connect("1", "1").unwrap();

    block_on(session.run()).unwrap();
    assert_eq!(client.recorded()[0].2.pipeline.len(), 1);
}

#[test]
fn test_saved_pipelines_are_listed_and_deleted() {
    let client = Arc::new(RecordingClient {
        saved: vec![
            SavedPipeline::new(1, 7, "first"),
            SavedPipeline::new(2, 8, "elsewhere"),
        ],
        ..RecordingClient::default()
    });
    let session = create_session(client.clone());

    let listed = block_on(session.saved_pipelines()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "first");

    block_on(session.delete_saved_pipeline(1)).unwrap();
    assert_eq!(*client.deleted.lock().unwrap(), vec![(7, 1)]);
}

#[test]
fn test_session_edits_forward_to_graph() {
    let mut session = create_session(Arc::new(RecordingClient::default()));
    let id = session.add_node("Unknown", Position::default());

    session.select_node(id.as_str()).unwrap();
    assert_eq!(session.selected_node().map(|n| n.id.clone()), Some(id.clone()));

    session.connect("1", id.clone()).unwrap();
    assert!(session.disconnect("1").is_some());

    session.remove_node(id.as_str()).unwrap();
    assert!(session.selected_node().is_none());
    session.clear_selection();
    assert_eq!(session.graph().len(), 1);
}
