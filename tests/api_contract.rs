//! HTTP API contract tests.
//!
//! Each test starts the API server on an ephemeral port with the Tavily
//! provider pointed at a wiremock server, then drives it over HTTP.

use marketscope::{ApiServer, ServiceConfig};
use marketscope_search::TavilyConfig;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tavily_body() -> Value {
    json!({
        "results": [
            {"url": "https://www.insee.gouv.fr/a", "title": "INSEE", "content": "Official figures"},
            {"url": "https://blog.example.com/b", "title": "Blog", "content": "Opinions"},
            {"url": "https://www.statista.com/c", "title": "Statista", "content": "Market size"},
            {"url": "https://www.reuters.com/d", "title": "Reuters", "content": "News"}
        ]
    })
}

async fn start_server(mock: &MockServer) -> ApiServer {
    let mut config = ServiceConfig::default();
    config.server.host = "127.0.0.1".into();
    config.server.port = 0;
    config.provider = TavilyConfig::new("tvly-test").with_base_url(mock.uri());
    ApiServer::start(&config).await.expect("start server")
}

async fn post(server: &ApiServer, route: &str, body: Value) -> (u16, Value) {
    let response = reqwest::Client::new()
        .post(format!("http://{}{route}", server.addr()))
        .json(&body)
        .send()
        .await
        .expect("send");
    let status = response.status().as_u16();
    let body = response.json().await.expect("json body");
    (status, body)
}

async fn get(server: &ApiServer, route: &str) -> Value {
    reqwest::get(format!("http://{}{route}", server.addr()))
        .await
        .expect("send")
        .json()
        .await
        .expect("json body")
}

async fn mount_results(mock: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_body()))
        .mount(mock)
        .await;
}

fn urls(body: &Value) -> Vec<String> {
    body["results"]
        .as_array()
        .expect("results array")
        .iter()
        .map(|r| r["url"].as_str().unwrap_or_default().to_owned())
        .collect()
}

#[tokio::test]
async fn root_and_health_report_status() {
    let mock = MockServer::start().await;
    let server = start_server(&mock).await;

    let root = get(&server, "/").await;
    assert_eq!(root["status"], "online");
    assert_eq!(root["version"], env!("CARGO_PKG_VERSION"));

    let health = get(&server, "/health").await;
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["services"]["tavily"], true);
    assert_eq!(health["services"]["llm"], false);
    assert!(health["timestamp"].is_string());
}

#[tokio::test]
async fn general_search_keeps_trusted_sources() {
    let mock = MockServer::start().await;
    mount_results(&mock).await;
    let server = start_server(&mock).await;

    let (status, body) = post(&server, "/api/search", json!({"query": "ev", "mode": "general"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["mode"], "general");
    assert_eq!(body["total_before_filter"], 4);
    assert_eq!(
        urls(&body),
        [
            "https://www.insee.gouv.fr/a",
            "https://www.statista.com/c",
            "https://www.reuters.com/d"
        ]
    );
    assert_eq!(body["results"][0]["trust_tier"], "government");
    assert_eq!(body["results"][0]["reliability_score"], 95);
    assert_eq!(body["results"][0]["title"], "INSEE");
}

#[tokio::test]
async fn data_search_uses_advanced_depth_and_data_threshold() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"search_depth": "advanced", "max_results": 4})))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_body()))
        .expect(1)
        .mount(&mock)
        .await;
    let server = start_server(&mock).await;

    let (status, body) =
        post(&server, "/api/search/data", json!({"query": "ev", "max_results": 4})).await;
    assert_eq!(status, 200);
    assert_eq!(body["mode"], "data");
    assert_eq!(body["total_before_filter"], 4);
    assert_eq!(
        urls(&body),
        [
            "https://www.insee.gouv.fr/a",
            "https://www.statista.com/c",
            "https://www.reuters.com/d"
        ]
    );
    assert!(
        body["results"]
            .as_array()
            .expect("results array")
            .iter()
            .all(|r| r["reliability_score"].as_u64() >= Some(80))
    );
}

#[tokio::test]
async fn general_route_fixes_the_mode() {
    let mock = MockServer::start().await;
    mount_results(&mock).await;
    let server = start_server(&mock).await;

    let (status, body) =
        post(&server, "/api/search/general", json!({"query": "ev", "mode": "data"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["mode"], "general");
    assert_eq!(urls(&body).len(), 3);
}

#[tokio::test]
async fn unknown_mode_is_rejected_without_provider_call() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_body()))
        .expect(0)
        .mount(&mock)
        .await;
    let server = start_server(&mock).await;

    let (status, body) = post(&server, "/api/search", json!({"query": "ev", "mode": "trends"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNSUPPORTED_MODE");
    assert_eq!(body["error"]["retryable"], false);
}

#[tokio::test]
async fn blank_query_is_rejected_without_provider_call() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_body()))
        .expect(0)
        .mount(&mock)
        .await;
    let server = start_server(&mock).await;

    let (status, body) = post(&server, "/api/search/data", json!({"query": "   "})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "INVALID_QUERY");

    let (status, body) = post(&server, "/api/search", json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "INVALID_QUERY");
}

#[tokio::test]
async fn bad_result_counts_are_rejected() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_body()))
        .expect(0)
        .mount(&mock)
        .await;
    let server = start_server(&mock).await;

    for count in [0, -3] {
        let (status, body) = post(
            &server,
            "/api/search/general",
            json!({"query": "ev", "max_results": count}),
        )
        .await;
        assert_eq!(status, 400, "max_results {count}");
        assert_eq!(body["error"]["code"], "INVALID_QUERY");
    }
}

#[tokio::test]
async fn malformed_bodies_use_the_error_envelope() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_body()))
        .expect(0)
        .mount(&mock)
        .await;
    let server = start_server(&mock).await;

    let (status, body) = post(
        &server,
        "/api/search",
        json!({"query": "ev", "max_results": "five"}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    assert_eq!(body["error"]["retryable"], false);

    let client = reqwest::Client::new();
    for (content_type, raw) in [("application/json", "{not json"), ("text/plain", r#"{"query":"ev"}"#)] {
        let response = client
            .post(format!("http://{}/api/search/general", server.addr()))
            .header("content-type", content_type)
            .body(raw)
            .send()
            .await
            .expect("send");
        assert_eq!(response.status().as_u16(), 400, "{content_type}");
        let body: Value = response.json().await.expect("json body");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    }
}

#[tokio::test]
async fn null_provider_url_is_dropped_not_failed() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"url": "https://www.insee.gouv.fr/a", "title": "INSEE"},
                {"url": null, "title": "Nameless"},
                {"url": "https://www.statista.com/c", "title": "Statista"}
            ]
        })))
        .mount(&mock)
        .await;
    let server = start_server(&mock).await;

    let (status, body) = post(&server, "/api/search/general", json!({"query": "ev"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["total_before_filter"], 3);
    assert_eq!(
        urls(&body),
        ["https://www.insee.gouv.fr/a", "https://www.statista.com/c"]
    );
}

#[tokio::test]
async fn provider_failure_is_retryable_502() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&mock)
        .await;
    let server = start_server(&mock).await;

    let (status, body) = post(&server, "/api/search/general", json!({"query": "ev"})).await;
    assert_eq!(status, 502);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "PROVIDER_FAILED");
    assert_eq!(body["error"]["retryable"], true);
    let message = body["error"]["message"].as_str().unwrap_or_default();
    assert!(message.contains("500"));
    assert!(!message.contains("tvly-test"));
}

#[tokio::test]
async fn chat_suggests_a_mode() {
    let mock = MockServer::start().await;
    let server = start_server(&mock).await;

    let (status, body) = post(
        &server,
        "/api/chat",
        json!({"message": "market size of heat pumps in 2024"}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["response"]["suggested_mode"], "data");
    assert!(body["generated_at"].is_string());

    let (status, body) = post(&server, "/api/chat", json!({"message": ""})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "INVALID_QUERY");
}

#[tokio::test]
async fn analysis_cites_filtered_sources() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_partial_json(json!({"search_depth": "basic", "max_results": 5})))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_body()))
        .expect(1)
        .mount(&mock)
        .await;
    let server = start_server(&mock).await;

    let (status, body) = post(&server, "/api/analysis", json!({"query": "electric vehicles"})).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let analysis = &body["analysis"];
    assert!(analysis["id"].is_string());
    assert_eq!(analysis["sources"].as_array().map(Vec::len), Some(3));
    assert_eq!(analysis["qualitative"]["sections"].as_array().map(Vec::len), Some(5));
    assert_eq!(
        analysis["qualitative"]["sources"],
        json!([
            "https://www.insee.gouv.fr/a",
            "https://www.statista.com/c",
            "https://www.reuters.com/d"
        ])
    );
    assert_eq!(
        analysis["quantitative"]["marketSize"]["sources"],
        json!(["https://www.insee.gouv.fr/a", "https://www.statista.com/c"])
    );
    assert_eq!(
        analysis["quantitative"]["marketShare"]["sources"],
        json!(["https://www.reuters.com/d"])
    );
}

#[tokio::test]
async fn analysis_without_web_search_skips_provider() {
    let mock = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tavily_body()))
        .expect(0)
        .mount(&mock)
        .await;
    let server = start_server(&mock).await;

    let (status, body) = post(
        &server,
        "/api/analysis",
        json!({"query": "electric vehicles", "include_web_search": false}),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body["analysis"]["sources"], json!([]));
    assert_eq!(body["analysis"]["quantitative"]["marketSize"]["sources"], json!([]));
}

#[tokio::test]
async fn cors_allows_configured_frontend() {
    let mock = MockServer::start().await;
    let server = start_server(&mock).await;

    let response = reqwest::Client::new()
        .request(
            reqwest::Method::OPTIONS,
            format!("http://{}/api/search", server.addr()),
        )
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "POST")
        .send()
        .await
        .expect("send");
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://localhost:3000")
    );
}
