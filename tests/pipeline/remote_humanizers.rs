use quillshift::config::RemoteBConfig;
use quillshift::humanizer::{DirectHumanizer, HumanizeOptions, QueuedHumanizer, RemoteHumanizer};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOC: &str = "## One\nFirst body paragraph.\n## Two\nSecond body paragraph.\n## Three\nThird body paragraph.\n";

fn no_delay() -> HumanizeOptions {
    HumanizeOptions {
        request_delay: Some(Duration::ZERO),
        ..HumanizeOptions::default()
    }
}

async fn mount_rephrase(server: &MockServer, prompt: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/rephrase"))
        .and(body_partial_json(json!({ "prompt": prompt })))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn direct_failure_on_middle_segment_keeps_its_original() {
    let server = MockServer::start().await;
    mount_rephrase(
        &server,
        "First body paragraph.",
        ResponseTemplate::new(200).set_body_json(json!({"result": "First rewritten.", "cost": 1.0})),
    )
    .await;
    mount_rephrase(
        &server,
        "Second body paragraph.",
        ResponseTemplate::new(500).set_body_string("internal error"),
    )
    .await;
    mount_rephrase(
        &server,
        "Third body paragraph.",
        ResponseTemplate::new(200).set_body_json(json!({"result": "Third rewritten.", "cost": 1.0})),
    )
    .await;

    let humanizer = DirectHumanizer::new(&server.uri(), "a-key").with_min_segment_chars(1);
    let outcome = humanizer.humanize(DOC, &no_delay()).await;

    assert!(outcome.success);
    assert_eq!(outcome.attempted, 3);
    assert_eq!(outcome.rewritten, 2);
    assert_eq!(
        outcome.content,
        "## One\nFirst rewritten.\n## Two\nSecond body paragraph.\n## Three\nThird rewritten.\n"
    );
}

#[tokio::test]
async fn queued_failure_on_middle_chunk_keeps_its_original() {
    let server = MockServer::start().await;
    let chunks = [
        ("## One\nFirst body paragraph.", "d1"),
        ("## Two\nSecond body paragraph.", "d2"),
        ("## Three\nThird body paragraph.", "d3"),
    ];
    for (content, id) in chunks {
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(body_partial_json(json!({ "content": content })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": id })))
            .mount(&server)
            .await;
    }
    let documents = [
        ("d1", json!({"id": "d1", "status": "done", "output": "## One\nFirst rewritten."})),
        ("d2", json!({"id": "d2", "status": "failed", "output": ""})),
        ("d3", json!({"id": "d3", "status": "done", "output": "## Three\nThird rewritten."})),
    ];
    for (id, body) in documents {
        Mock::given(method("POST"))
            .and(path("/document"))
            .and(body_partial_json(json!({ "id": id })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
    }

    let config = RemoteBConfig {
        base_url: Some(server.uri()),
        api_key: Some("b-key".into()),
        direct_threshold_chars: 10,
        max_chunk_chars: 40,
        request_delay_ms: 0,
        poll_interval_ms: 1,
        max_poll_attempts: 2,
        ..RemoteBConfig::default()
    };
    let humanizer = QueuedHumanizer::from_config(&config).expect("configured");
    let outcome = humanizer.humanize(DOC, &HumanizeOptions::default()).await;

    assert!(outcome.success);
    assert_eq!(outcome.attempted, 3);
    assert_eq!(outcome.rewritten, 2);
    assert_eq!(
        outcome.content,
        "## One\nFirst rewritten.\n## Two\nSecond body paragraph.\n## Three\nThird rewritten.\n"
    );
    assert!(humanizer.registry().is_empty());
}

#[tokio::test]
async fn poll_budget_is_bounded() {
    let config = RemoteBConfig {
        base_url: Some("https://b.example.com".into()),
        api_key: Some("k".into()),
        poll_interval_ms: 250,
        max_poll_attempts: 8,
        ..RemoteBConfig::default()
    };
    let humanizer = QueuedHumanizer::from_config(&config).expect("configured");
    assert_eq!(humanizer.poll_policy().max_total_wait(), Duration::from_secs(2));
}
