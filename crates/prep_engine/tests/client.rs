use std::net::TcpListener;
use std::time::Duration;

use prep_core::ResearchTarget;
use prep_engine::{ClientSettings, FailureKind, ReqwestResearchClient, ResearchSource};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ACME: &str = r#"{
  "interview_info": {
    "company_name": "Acme",
    "role": "SRE",
    "type": "TECH",
    "interview_date": "2025-01-01T10:00:00Z",
    "skills": ["Linux"]
  },
  "research_data": {
    "company_summary": {
      "overview": "o", "industry": "i", "size": "s", "culture": "c", "recent_news": "n"
    },
    "interview_preparation": {
      "company_specific_questions": ["Why anvils?"],
      "role_specific_insights": "r",
      "interview_tips": "t",
      "research_sources": "src"
    },
    "competitive_analysis": {
      "competitors": "Ajax", "market_position": "Leader", "growth_trends": "Flat"
    }
  }
}"#;

fn client_for(base_url: String) -> ReqwestResearchClient {
    ReqwestResearchClient::new(ClientSettings {
        base_url,
        ..ClientSettings::default()
    })
    .expect("client")
}

#[tokio::test]
async fn fetches_latest_research_with_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interview-research"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ACME, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    let record = client
        .fetch_research(&ResearchTarget::Latest)
        .await
        .expect("fetch ok");

    assert_eq!(record.company_name(), "Acme");
    assert_eq!(record.interview_info.role, "SRE");
}

#[tokio::test]
async fn company_name_is_path_escaped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interview-research/company/Acme%20Corp%2FLabs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ACME, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    let target = ResearchTarget::Company("Acme Corp/Labs".to_string());

    assert!(client.fetch_research(&target).await.is_ok());
}

#[test]
fn endpoint_keeps_base_path_prefix() {
    let client = client_for("https://api.example.com/v1/".to_string());

    assert_eq!(
        client.research_url(&ResearchTarget::Latest).as_str(),
        "https://api.example.com/v1/interview-research"
    );
    assert_eq!(
        client.endpoint(&["health"]).as_str(),
        "https://api.example.com/v1/health"
    );
}

#[test]
fn rejects_unparseable_base_url() {
    let err = ReqwestResearchClient::new(ClientSettings {
        base_url: "not a url".to_string(),
        ..ClientSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn server_error_is_http_status_without_decoding() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interview-research"))
        .respond_with(ResponseTemplate::new(500).set_body_raw(ACME, "application/json"))
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    let err = client
        .fetch_research(&ResearchTarget::Latest)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn non_json_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interview-research"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>oops</html>", "text/html"))
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    let err = client
        .fetch_research(&ResearchTarget::Latest)
        .await
        .unwrap_err();

    assert!(matches!(err.kind, FailureKind::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = client_for(format!("http://127.0.0.1:{port}"));
    let err = client
        .fetch_research(&ResearchTarget::Latest)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Network);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interview-research"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_raw(ACME, "application/json"),
        )
        .mount(&server)
        .await;

    let client = ReqwestResearchClient::new(ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    })
    .unwrap();
    let err = client
        .fetch_research(&ResearchTarget::Latest)
        .await
        .unwrap_err();

    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/interview-research"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(ACME, "application/json"))
        .mount(&server)
        .await;

    let client = ReqwestResearchClient::new(ClientSettings {
        base_url: server.uri(),
        max_bytes: 16,
        ..ClientSettings::default()
    })
    .unwrap();
    let err = client
        .fetch_research(&ResearchTarget::Latest)
        .await
        .unwrap_err();

    assert!(
        matches!(err.kind, FailureKind::TooLarge { max_bytes: 16, .. }),
        "{err:?}"
    );
}

#[tokio::test]
async fn health_probe_reads_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"status":"healthy"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(server.uri());
    let health = client.health().await.expect("health ok");

    assert_eq!(health.status, "healthy");
}
