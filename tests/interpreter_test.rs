use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use voxflow::catalog::{Catalog, FALLBACK_TEMPLATE_ID};
use voxflow::export::WorkflowExport;
use voxflow::interpreter::Interpreter;
use voxflow::session::SessionHistory;
use voxflow::workflow::{NodeType, WorkflowNode};

fn interpreter() -> Interpreter {
    Interpreter::with_delay(Arc::new(Catalog::builtin()), Duration::ZERO)
}

fn generation_node(nodes: &[WorkflowNode]) -> &WorkflowNode {
    nodes
        .iter()
        .find(|n| n.node_type == NodeType::Generation)
        .expect("workflow has a generation node")
}

#[tokio::test]
async fn test_portrait_command() {
    let interp = interpreter();
    let nodes = interp.interpret("generate a portrait of a person").await.unwrap();

    // "portrait" and "person" both match the portrait template.
    assert_eq!(nodes[0].id, "input-2");
    let gen = generation_node(&nodes);
    assert_eq!(gen.parameters["width"], json!(512));
    assert_eq!(gen.parameters["height"], json!(768));
    // Stripping "generate" and "portrait" leaves the rest verbatim,
    // double space included.
    assert_eq!(gen.parameters["prompt"], json!("a  of a person"));
}

#[tokio::test]
async fn test_anime_command_with_quality() {
    let interp = interpreter();
    let nodes = interp
        .interpret("draw an anime character, high quality, 4k")
        .await
        .unwrap();

    let gen = generation_node(&nodes);
    assert_eq!(gen.parameters["style"], json!("anime"));
    assert_eq!(gen.parameters["quality"], json!("high"));
    assert_eq!(gen.parameters["steps"], json!(50));
}

#[tokio::test]
async fn test_empty_command_uses_fallback() {
    let interp = interpreter();
    let nodes = interp.interpret("").await.unwrap();

    let fallback = interp.catalog().get(FALLBACK_TEMPLATE_ID).unwrap();
    let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    let proto: Vec<&str> = fallback.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, proto);

    let gen = generation_node(&nodes);
    assert_eq!(gen.parameters["prompt"], json!("beautiful artwork"));
}

#[tokio::test]
async fn test_upscale_command_sets_sharpen() {
    let interp = interpreter();
    let nodes = interp.interpret("upscale this image and sharpen it").await.unwrap();

    // "upscale" and "sharpen" outscore the general template's "image".
    assert_eq!(nodes[0].id, "input-5");
    let sharpened: Vec<&WorkflowNode> = nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Processing)
        .filter(|n| n.parameters.get("sharpen") == Some(&json!(true)))
        .collect();
    assert!(!sharpened.is_empty());
}

#[tokio::test]
async fn test_processing_phrases_do_not_drive_selection() {
    let interp = interpreter();
    let nodes = interp
        .interpret("blur and smooth the background of a landscape")
        .await
        .unwrap();

    // Selection only counts template keywords; "blur"/"smooth" are
    // customization triggers, so "landscape" decides the template.
    assert_eq!(nodes[0].id, "input-4");
    let blurred = nodes
        .iter()
        .filter(|n| n.node_type == NodeType::Processing)
        .all(|n| n.parameters.get("blur_strength") == Some(&json!(0.5)));
    assert!(blurred);
}

#[tokio::test]
async fn test_style_exclusivity() {
    let interp = interpreter();
    let nodes = interp.interpret("an anime cartoon hero").await.unwrap();
    let gen = generation_node(&nodes);
    assert_eq!(gen.parameters["style"], json!("anime"));
}

#[tokio::test]
async fn test_repeat_invocations_are_value_equal_and_independent() {
    let interp = interpreter();
    let first = interp.interpret("draw a cartoon dog").await.unwrap();
    let mut second = interp.interpret("draw a cartoon dog").await.unwrap();
    assert_eq!(first, second);

    for node in &mut second {
        node.set_param("style", json!("oil-painting"));
    }
    assert_ne!(first, second);

    // Catalog prototypes are untouched either way.
    let third = interp.interpret("draw a cartoon dog").await.unwrap();
    assert_eq!(first, third);
}

#[tokio::test]
async fn test_concurrent_interpretation() {
    let interp = Arc::new(interpreter());
    let mut handles = Vec::new();
    for _ in 0..8 {
        let interp = interp.clone();
        handles.push(tokio::spawn(async move {
            interp.interpret("generate a detailed square icon").await.unwrap()
        }));
    }
    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    for result in &results[1..] {
        assert_eq!(result, &results[0]);
    }
}

#[tokio::test]
async fn test_session_and_export_round_trip() {
    let interp = interpreter();
    let history = SessionHistory::new();
    let command = "generate a photorealistic mountain landscape";

    let nodes = interp.interpret(command).await.unwrap();
    let session = history.record(command, nodes, 0.87).await;
    assert_eq!(history.len().await, 1);

    let tmp = tempfile::TempDir::new().unwrap();
    let export = WorkflowExport::new(session.workflow, session.transcript.as_str()).unwrap();
    let path = export.write_to(tmp.path()).await.unwrap();

    let content = tokio::fs::read_to_string(&path).await.unwrap();
    let parsed: WorkflowExport = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed.metadata.source, "voice-command");
    assert_eq!(parsed.metadata.transcript, command);
    let gen = generation_node(&parsed.nodes);
    assert_eq!(gen.parameters["style"], json!("photorealistic"));
    assert_eq!(gen.parameters["width"], json!(768));
    assert_eq!(gen.parameters["height"], json!(512));
}
