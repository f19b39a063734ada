use quillshift::config::{Config, ProviderConfig, RemoteAConfig};
use quillshift::humanizer::{HumanizeOptions, HumanizeOutcome, HumanizerUsed, RemoteHumanizer};
use quillshift::pipeline::{ContentRequest, HumanizerPreference, Pipeline, PipelineStage, RunFlags};
use quillshift::rng::ForcedRandom;
use quillshift::scoring::RiskLevel;
use quillshift::PipelineError;
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FLAT: &str =
    "This is important. Furthermore, it is important. Additionally, it remains important.";

fn provider(name: &str, model: &str, base_url: String) -> ProviderConfig {
    ProviderConfig {
        api_key: Some(format!("{name}-key")),
        base_url: Some(base_url),
        ..ProviderConfig::named(name, model)
    }
}

fn config_for(server: &MockServer) -> Config {
    Config {
        providers: vec![
            provider("gemini", "gemini-2.5-pro", server.uri()),
            provider("openai", "gpt-4o", format!("{}/v1", server.uri())),
        ],
        ..Config::default()
    }
}

async fn mount_gemini_failure(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path_regex(r"^/v1beta/models/.+:generateContent$"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend unavailable"))
        .mount(server)
        .await;
}

async fn mount_openai(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(response)
        .mount(server)
        .await;
}

fn completion(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"content": text}}],
        "model": "gpt-4o-2024"
    }))
}

fn local_only() -> RunFlags {
    RunFlags {
        humanizer: Some(HumanizerPreference::Local),
        ..RunFlags::default()
    }
}

#[tokio::test]
async fn falls_back_to_second_provider_and_scores_the_rewrite() {
    let server = MockServer::start().await;
    mount_gemini_failure(&server).await;
    mount_openai(&server, completion(FLAT)).await;

    let pipeline = Pipeline::from_config(config_for(&server)).unwrap();
    let result = pipeline
        .run_with(
            &ContentRequest::new("Why rhythm matters", 200),
            &local_only(),
            &mut ForcedRandom::never(),
        )
        .await
        .unwrap();

    assert_eq!(result.provider_used, "openai");
    assert_eq!(result.model_used.as_deref(), Some("gpt-4o-2024"));
    assert_eq!(
        result.final_content,
        "This is important. Plus. It's important. Also, it remains important."
    );
    assert_eq!(result.risk_assessment.score, 100);
    assert_eq!(result.risk_assessment.risk_level, RiskLevel::Low);
    assert!(!result.extra_pass_applied);
    assert_eq!(result.humanizer_used, HumanizerUsed::LocalOnly);
    assert_eq!(
        result.stages,
        vec![
            PipelineStage::Composing,
            PipelineStage::Generating,
            PipelineStage::LocalPass,
            PipelineStage::RemoteOptional,
            PipelineStage::Scoring,
            PipelineStage::Finalizing,
        ]
    );
}

#[tokio::test]
async fn every_provider_failing_is_terminal() {
    let server = MockServer::start().await;
    mount_gemini_failure(&server).await;
    mount_openai(&server, ResponseTemplate::new(503).set_body_string("overloaded")).await;

    let pipeline = Pipeline::from_config(config_for(&server)).unwrap();
    let err = pipeline
        .run(&ContentRequest::new("Anything", 300), &local_only())
        .await
        .unwrap_err();

    let PipelineError::GenerationUnavailable { attempts } = &err else {
        panic!("expected GenerationUnavailable, got {err}");
    };
    assert_eq!(attempts.len(), 2);
    assert!(attempts[0].starts_with("gemini"));
    assert!(attempts[1].starts_with("openai"));
}

#[tokio::test]
async fn empty_completion_moves_down_the_chain() {
    let server = MockServer::start().await;
    mount_gemini_failure(&server).await;
    mount_openai(&server, completion("   ")).await;

    let pipeline = Pipeline::from_config(config_for(&server)).unwrap();
    let err = pipeline
        .run(&ContentRequest::new("Anything", 300), &local_only())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::GenerationUnavailable { .. }));
}

#[tokio::test]
async fn configured_remote_a_rewrites_the_body() {
    let server = MockServer::start().await;
    mount_gemini_failure(&server).await;
    mount_openai(&server, completion(FLAT)).await;
    Mock::given(method("POST"))
        .and(path("/rephrase"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "Rhythm shifts here. Sometimes a sentence runs long and wanders through a few ideas before stopping. Short again.",
            "cost": 3.5
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.humanizer.remote_a = RemoteAConfig {
        base_url: Some(server.uri()),
        api_key: Some("a-key".into()),
        min_segment_chars: 10,
        request_delay_ms: 0,
        ..RemoteAConfig::default()
    };
    let flags = RunFlags {
        humanizer: Some(HumanizerPreference::Auto),
        ..RunFlags::default()
    };

    let pipeline = Pipeline::from_config(config).unwrap();
    let result = pipeline
        .run_with(&ContentRequest::new("Rhythm", 200), &flags, &mut ForcedRandom::never())
        .await
        .unwrap();

    assert_eq!(result.humanizer_used, HumanizerUsed::RemoteA);
    assert!((result.humanizer_cost - 3.5).abs() < f64::EPSILON);
    assert!(result.final_content.starts_with("Rhythm shifts here."));
}

struct StalledHumanizer;

impl RemoteHumanizer for StalledHumanizer {
    fn kind(&self) -> HumanizerUsed {
        HumanizerUsed::RemoteB
    }

    fn humanize<'a>(
        &'a self,
        text: &'a str,
        _options: &'a HumanizeOptions,
    ) -> Pin<Box<dyn Future<Output = HumanizeOutcome> + Send + 'a>> {
        Box::pin(async move {
            tokio::time::sleep(Duration::from_secs(30)).await;
            HumanizeOutcome {
                success: true,
                content: format!("too late: {text}"),
                cost: 1.0,
                rewritten: 1,
                attempted: 1,
            }
        })
    }
}

#[tokio::test]
async fn remote_stage_timeout_keeps_the_local_draft() {
    let server = MockServer::start().await;
    mount_gemini_failure(&server).await;
    mount_openai(&server, completion(FLAT)).await;

    let pipeline = Pipeline::from_config(config_for(&server))
        .unwrap()
        .with_humanizer(Box::new(StalledHumanizer))
        .with_stage_timeout(Duration::from_millis(50));
    let flags = RunFlags {
        humanizer: Some(HumanizerPreference::RemoteB),
        ..RunFlags::default()
    };
    let result = pipeline
        .run_with(&ContentRequest::new("Rhythm", 200), &flags, &mut ForcedRandom::never())
        .await
        .unwrap();

    assert_eq!(result.humanizer_used, HumanizerUsed::LocalOnly);
    assert!(!result.final_content.starts_with("too late"));
    assert_eq!(
        result.final_content,
        "This is important. Plus. It's important. Also, it remains important."
    );
}
