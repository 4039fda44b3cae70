//! HTTP delivery against a mock collector.

use caliper_kernel::{Entity, Kind};
use caliper_sensor::{HttpClient, HttpOptions, Sensor, SensorError, Statistics};
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn options(server: &MockServer, api_key: Option<&str>) -> HttpOptions {
    HttpOptions {
        host: format!("{}/caliper", server.uri()),
        api_key: api_key.map(str::to_string),
        connection_timeout_ms: 2_000,
        ..HttpOptions::default()
    }
}

fn person(id: &str) -> Entity {
    Entity::builder(Kind::Person)
        .id(id)
        .name("Ada")
        .build()
        .expect("person builds")
}

#[tokio::test]
async fn envelopes_are_posted_with_the_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/caliper"))
        .and(header("Authorization", "Bearer secret"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(options(&server, Some("Bearer secret"))).expect("client builds");
    let mut sensor = Sensor::new("https://example.edu/sensors/1");
    sensor.register_client("collector", Arc::new(client));

    let report = sensor.describe(&[person("person:1")]).await.expect("sends");
    assert!(report.all_succeeded());

    let requests: Vec<Request> = server.received_requests().await.expect("recording on");
    let body: serde_json::Value = requests[0].body_json().expect("JSON body");
    assert_eq!(body["sensor"], "https://example.edu/sensors/1");
    assert_eq!(body["dataVersion"], "http://purl.imsglobal.org/ctx/caliper/v1p1");
    assert!(body["sendTime"].as_str().is_some_and(|t| t.ends_with('Z')));
    assert_eq!(body["data"][0]["id"], "person:1");
    assert_eq!(body["data"][0]["type"], "Person");
}

#[tokio::test]
async fn non_success_statuses_are_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = HttpClient::new(options(&server, Some("wrong"))).expect("client builds");
    let mut sensor = Sensor::new("sensor:1");
    sensor.register_client("collector", Arc::new(client));

    let report = sensor.describe(&[person("person:1")]).await.expect("sends");
    assert!(!report.all_succeeded());
    match &report.outcomes["collector"] {
        Err(SensorError::Server { status, message }) => {
            assert_eq!(*status, 401);
            assert_eq!(message, "bad key");
        }
        other => panic!("expected a server error, got {other:?}"),
    }
    assert_eq!(
        sensor.statistics()["collector"],
        Statistics {
            sent: 1,
            successful: 0,
            failed: 1
        }
    );
}

#[tokio::test]
async fn empty_error_bodies_report_the_status_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = HttpClient::new(options(&server, None)).expect("client builds");
    let mut sensor = Sensor::new("sensor:1");
    sensor.register_client("collector", Arc::new(client));

    let report = sensor.describe(&[person("person:1")]).await.expect("sends");
    let failures: Vec<(&str, String)> = report
        .failures()
        .map(|(name, e)| (name, e.to_string()))
        .collect();
    assert_eq!(
        failures,
        [("collector", "collector error 503: Service Unavailable".to_string())]
    );
}
