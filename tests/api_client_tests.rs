/// Integration tests for the API client against a mock backend
use cloud_economics::{
    charts::build_chart_configs,
    client::{ApiClient, CostQuery, MetricsQuery},
    config::ApiConfig,
    error::ApiError,
    models::{CostValue, MetricKind},
};
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer, region: Option<&str>) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: server.uri(),
        region: region.map(str::to_string),
        timeout_seconds: Some(5),
    })
    .unwrap()
}

fn cost_query(users: &str, capacity: &str) -> CostQuery {
    CostQuery {
        users: users.to_string(),
        instance_capacity: capacity.to_string(),
    }
}

fn metrics_query(instance_id: &str) -> MetricsQuery {
    MetricsQuery {
        instance_id: instance_id.to_string(),
    }
}

#[tokio::test]
async fn test_compute_costs_sends_one_post_with_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/costs/compiled"))
        .and(query_param("users", "1000"))
        .and(query_param("instance_capacity", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instances_needed": 4,
            "breakdown": {
                "EC2": "$2.448 (for 4 instances)",
                "AWS Shield": "$3.000"
            },
            "cloud_cloud_total_cost": "$161.428",
            "client_total_cost": "$2330.714",
            "profit_to_company": "$2169.286"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let report = client.compute_costs(&cost_query("1000", "300")).await.unwrap();

    assert_eq!(report.instances_needed, Some(CostValue::Number(4.into())));
    let breakdown = report.breakdown.as_ref().unwrap();
    assert_eq!(
        breakdown.ec2,
        Some(CostValue::Text("$2.448 (for 4 instances)".to_string()))
    );
    assert!(breakdown.rds.is_none());

    let sections = report.sections();
    assert_eq!(sections[2].lines[2].value, "$2169.286");
    assert_eq!(sections[1].lines[1].value, "-");
}

#[tokio::test]
async fn test_compute_costs_sends_no_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/costs/compiled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    client.compute_costs(&cost_query("1", "1")).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
    assert!(!requests[0].headers.contains_key("content-type"));
}

#[tokio::test]
async fn test_compute_costs_forwards_configured_region() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/costs/compiled"))
        .and(query_param("users", "10"))
        .and(query_param("instance_capacity", "5"))
        .and(query_param("region", "EU (Ireland)"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, Some("EU (Ireland)"));
    let report = client.compute_costs(&cost_query("10", "5")).await.unwrap();

    assert!(report.breakdown.is_none());
}

#[tokio::test]
async fn test_compute_costs_non_success_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/costs/compiled"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"detail": "Error calculating costs: boom"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client
        .compute_costs(&cost_query("abc", "1"))
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, body } => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.contains("boom"));
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_metrics_builds_charts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metrics/compiled-metrics"))
        .and(query_param("instance_id", "i-12345"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "instance_id": "i-12345",
            "metrics": {
                "cpu_utilization": [{"time": "T1", "value": 12.3456}],
                "memory_utilization": [],
                "network_in": [],
                "network_out": []
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let report = client.fetch_metrics(&metrics_query("i-12345")).await.unwrap();

    let charts = build_chart_configs(&report);
    assert_eq!(charts[0].kind, MetricKind::CpuUtilization);
    assert_eq!(charts[0].points().collect::<Vec<_>>(), vec![("T1", 12.346)]);
    assert!(charts[1..].iter().all(|c| c.values().is_empty()));
}

#[tokio::test]
async fn test_fetch_metrics_non_success_status_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metrics/compiled-metrics"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client.fetch_metrics(&metrics_query("i-1")).await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/metrics/compiled-metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let err = client.fetch_metrics(&metrics_query("i-1")).await.unwrap_err();

    assert_eq!(err.kind(), "decode");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let client = ApiClient::new(&ApiConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        region: None,
        timeout_seconds: Some(2),
    })
    .unwrap();

    let err = client.compute_costs(&cost_query("1", "1")).await.unwrap_err();
    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn test_ping_reads_welcome_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Welcome to the SaaS Cloud Economics Dashboard"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, None);
    let welcome = client.ping().await.unwrap();

    assert_eq!(welcome.message, "Welcome to the SaaS Cloud Economics Dashboard");
}
