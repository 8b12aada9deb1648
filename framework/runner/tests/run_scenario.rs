use std::time::Duration;

use insights_client::prelude::{ClientOptions, Credentials};
use insights_probe_runner::prelude::{
    run_with_clock, ManualClock, PollSettings, ProbeError, RunContext, RunSummary,
};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const START: i64 = 1_700_000_060;
const NODE_ID: &str = "24:0a:c4:00:11:22";

async fn backend_with_login() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accesstoken": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;
    server
}

async fn respond_to_queries(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/query/filters/suggest"))
        .and(header("Authorization", "abc123"))
        .and(query_param("from_ts", (START - 60).to_string()))
        .respond_with(response)
        .mount(server)
        .await;
}

fn context(server: &MockServer) -> RunContext {
    RunContext::new("crash_count", server.uri(), server.uri(), NODE_ID)
        .with_credentials(Credentials::new("tester", "secret"))
        .with_client_options(
            ClientOptions::default().request_timeout(Some(Duration::from_secs(10))),
        )
        .with_no_progress(true)
}

async fn run_simulated(context: RunContext) -> anyhow::Result<RunSummary> {
    tokio::task::spawn_blocking(move || {
        let clock = ManualClock::new(START);
        run_with_clock(&context, &clock)
    })
    .await
    .expect("run panicked")
}

#[tokio::test]
async fn quiet_device_passes_after_full_window() {
    let server = backend_with_login().await;
    respond_to_queries(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "list": [] })),
    )
    .await;

    let summary = run_simulated(context(&server)).await.expect("run failed");

    assert_eq!(9, summary.iterations);
    assert_eq!(0, summary.final_crash_count);
    assert_eq!(START - 60, summary.from_ts);
    assert_eq!(START + 540, summary.to_ts);
    assert_eq!(NODE_ID, summary.node_id);
    assert_eq!(9, server.received_requests().await.unwrap().len() - 1);
}

#[tokio::test]
async fn crashes_under_bound_pass() {
    let server = backend_with_login().await;
    respond_to_queries(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "list": [{ "key": "crash", "count": 3 }] })),
    )
    .await;

    let summary = run_simulated(context(&server)).await.expect("run failed");

    assert_eq!(3, summary.final_crash_count);
    assert_eq!(5, summary.crash_bound);
}

#[tokio::test]
async fn crashes_over_bound_fail_on_first_poll() {
    let server = backend_with_login().await;
    respond_to_queries(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "list": [{ "key": "crash", "count": 7 }] })),
    )
    .await;

    let err = run_simulated(context(&server)).await.unwrap_err();

    assert!(
        matches!(
            err.downcast_ref::<ProbeError>(),
            Some(ProbeError::ThresholdExceeded { count: 7, bound: 5, .. })
        ),
        "{err:?}"
    );
    assert!(err.to_string().contains(NODE_ID));
    // Login plus a single query
    assert_eq!(2, server.received_requests().await.unwrap().len());
}

#[tokio::test]
async fn unexpected_bucket_fails() {
    let server = backend_with_login().await;
    respond_to_queries(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "list": [{ "key": "reboot", "count": 1 }] })),
    )
    .await;

    let err = run_simulated(context(&server)).await.unwrap_err();

    assert!(
        matches!(
            err.downcast_ref::<ProbeError>(),
            Some(ProbeError::UnexpectedKey { .. })
        ),
        "{err:?}"
    );
}

#[tokio::test]
async fn server_error_fails() {
    let server = backend_with_login().await;
    respond_to_queries(&server, ResponseTemplate::new(500)).await;

    let err = run_simulated(context(&server)).await.unwrap_err();

    assert!(
        matches!(
            err.downcast_ref::<ProbeError>(),
            Some(ProbeError::UnexpectedStatus { status: 500, .. })
        ),
        "{err:?}"
    );
}

#[tokio::test]
async fn failed_login_stops_before_polling() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "bad password" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let err = run_simulated(context(&server)).await.unwrap_err();

    assert!(
        matches!(err.downcast_ref::<ProbeError>(), Some(ProbeError::Auth { .. })),
        "{err:?}"
    );
    assert!(format!("{err:#}").contains(NODE_ID), "{err:#}");
}

#[tokio::test]
async fn rejected_login_names_the_node() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/login"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let err = run_simulated(context(&server)).await.unwrap_err();
    let message = format!("{err:#}");

    assert!(message.contains(NODE_ID), "{message}");
    assert!(message.contains("401"), "{message}");
    assert_eq!(1, server.received_requests().await.unwrap().len());
}

#[tokio::test]
async fn oversized_duration_fails_without_querying() {
    let server = backend_with_login().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "list": [{ "key": "crash", "count": 99 }] })),
        )
        .expect(0)
        .mount(&server)
        .await;

    let context = context(&server).with_poll_settings(PollSettings {
        max_duration: Duration::from_secs(u64::MAX),
        ..Default::default()
    });

    let err = run_simulated(context).await.unwrap_err();

    assert!(
        matches!(
            err.downcast_ref::<ProbeError>(),
            Some(ProbeError::InvalidSettings { .. })
        ),
        "{err:?}"
    );
    assert!(err.to_string().contains(NODE_ID));
}

#[tokio::test]
async fn custom_login_endpoint_and_settings_are_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/auth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "accesstoken": "abc123" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/query/filters/suggest"))
        .and(query_param("from_ts", START.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "list": [{ "key": "crash", "count": 1 }] })),
        )
        .mount(&server)
        .await;

    let context = context(&server)
        .with_endpoint("/v2/auth")
        .with_poll_settings(PollSettings {
            max_duration: Duration::from_secs(30),
            poll_interval: Duration::from_secs(10),
            lookback: Duration::from_secs(0),
            crash_bound: 1,
        });

    let summary = run_simulated(context).await.expect("run failed");

    assert_eq!(3, summary.iterations);
    assert_eq!(1, summary.final_crash_count);
}

#[tokio::test]
async fn summary_is_appended_to_file() {
    let server = backend_with_login().await;
    respond_to_queries(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "list": [] })),
    )
    .await;
    let dir = tempfile::tempdir().unwrap();
    let summary_path = dir.path().join("run_summary.jsonl");

    let summary = run_simulated(context(&server).with_run_summary_path(Some(summary_path.clone())))
        .await
        .expect("run failed");

    let stored = insights_probe_summary_model::load_summary_runs(&summary_path).unwrap();
    assert_eq!(vec![summary], stored);
}
