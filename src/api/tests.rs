use crate::api::CatalogClient;
use crate::classify::{FailureCategory, FailureKind, Upstream};
use crate::config::SearchConfig;
use crate::filter::{SearchCriteria, SearchParams};
use crate::models::DocumentRequest;
use mockito::{Matcher, Server};
use std::net::TcpListener;
use std::time::Duration;

const RESULTS_PAGE: &str = r#"<html><body><main>
<section class="package-results">
  <ul>
    <li>
      <a href="/Alamofire/Alamofire">
        <h4>Alamofire</h4>
        <p>Elegant HTTP Networking in Swift</p>
        <ul class="metadata">
          <li class="identifier"><small>Alamofire/Alamofire</small></li>
          <li class="activity"><small>Active 3 days ago</small></li>
          <li class="stars"><small>41,523 stars</small></li>
        </ul>
      </a>
    </li>
    <li>
      <a href="/kean/Get">
        <h4>Get</h4>
        <p>Web API client built using async/await</p>
        <ul class="metadata">
          <li class="identifier"><small>kean/Get</small></li>
          <li class="stars"><small>950 stars</small></li>
        </ul>
      </a>
    </li>
  </ul>
  <ul class="pagination"><li class="next"><a href="/search?query=networking&amp;page=2">Next</a></li></ul>
</section>
</main></body></html>"#;

const EMPTY_PAGE: &str = r#"<html><body>
<section class="package-results"><p>No matching packages.</p></section>
</body></html>"#;

fn networking_criteria() -> SearchCriteria {
    SearchCriteria::from_params(SearchParams::new().query("networking").min_stars(500)).unwrap()
}

fn client_for(server: &Server) -> CatalogClient {
    CatalogClient::new()
        .with_catalog_base_url(server.url())
        .with_document_base_url(server.url())
        .with_timeout(Duration::from_secs(5))
}

fn search_mock(server: &mut Server) -> mockito::Mock {
    server.mock("GET", "/search").match_query(Matcher::AllOf(vec![
        Matcher::UrlEncoded("query".into(), "networking stars:>=500".into()),
        Matcher::UrlEncoded("page".into(), "1".into()),
    ]))
}

#[test]
fn test_catalog_client_defaults() {
    let client = CatalogClient::new();
    assert_eq!(client.catalog_base_url, "https://swiftpackageindex.com");
    assert_eq!(client.document_base_url, "https://api.github.com");
}

#[test]
fn test_base_urls_drop_trailing_slash() {
    let client = CatalogClient::new()
        .with_catalog_base_url("http://localhost:1234/".to_string())
        .with_document_base_url("http://localhost:5678/".to_string());
    assert_eq!(client.catalog_base_url, "http://localhost:1234");
    assert_eq!(client.document_base_url, "http://localhost:5678");
}

#[test]
fn test_from_config_uses_configured_hosts() {
    let mut config = SearchConfig::default();
    config.catalog.base_url = "http://catalog.test".to_string();
    config.documents.base_url = "http://docs.test".to_string();

    let client = CatalogClient::from_config(&config);
    assert_eq!(client.catalog_base_url, "http://catalog.test");
    assert_eq!(client.document_base_url, "http://docs.test");
}

#[test]
fn test_search_success() {
    let mut server = Server::new();
    let mock = search_mock(&mut server)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(RESULTS_PAGE)
        .create();

    let response = client_for(&server).search(&networking_criteria()).unwrap();

    mock.assert();
    assert_eq!(response.query, "networking stars:>=500");
    assert_eq!(response.result_count, 2);
    assert!(response.has_more());
    assert_eq!(response.results.page, 1);

    let first = &response.packages()[0];
    assert_eq!(first.name, "Alamofire");
    assert_eq!(first.author, "Alamofire");
    assert_eq!(first.stars, Some(41523));
    assert_eq!(first.url, format!("{}/Alamofire/Alamofire", server.url()));

    assert!(response.search_url.starts_with(&server.url()));
    assert!(response.search_url.contains("page=1"));
    assert!(response.next_step.contains("page=2"));
}

#[test]
fn test_search_sends_user_agent() {
    let mut server = Server::new();
    let mock = search_mock(&mut server)
        .match_header(
            "user-agent",
            Matcher::Regex(r"^spm-search/catalog/".to_string()),
        )
        .with_status(200)
        .with_body(EMPTY_PAGE)
        .create();

    client_for(&server).search(&networking_criteria()).unwrap();
    mock.assert();
}

#[test]
fn test_configured_user_agent_overrides_default() {
    let mut server = Server::new();
    let mock = search_mock(&mut server)
        .match_header("user-agent", "custom-agent/2.0")
        .with_status(200)
        .with_body(EMPTY_PAGE)
        .create();

    let mut config = SearchConfig::default();
    config.catalog.base_url = server.url();
    config.http.user_agent = Some("custom-agent/2.0".to_string());

    CatalogClient::from_config(&config)
        .search(&networking_criteria())
        .unwrap();
    mock.assert();
}

#[test]
fn test_search_empty_page() {
    let mut server = Server::new();
    let _m = search_mock(&mut server)
        .with_status(200)
        .with_body(EMPTY_PAGE)
        .create();

    let response = client_for(&server).search(&networking_criteria()).unwrap();
    assert_eq!(response.result_count, 0);
    assert!(!response.has_more());
    assert!(response.next_step.starts_with("No results found"));
}

#[test]
fn test_search_requests_later_pages() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .with_status(200)
        .with_body(EMPTY_PAGE)
        .create();

    let criteria =
        SearchCriteria::from_params(SearchParams::new().query("json").page(3)).unwrap();
    let response = client_for(&server).search(&criteria).unwrap();

    mock.assert();
    assert_eq!(response.results.page, 3);
}

#[test]
fn test_search_is_idempotent() {
    let mut server = Server::new();
    let _m = search_mock(&mut server)
        .with_status(200)
        .with_body(RESULTS_PAGE)
        .expect(2)
        .create();

    let client = client_for(&server);
    let first = client.search(&networking_criteria()).unwrap();
    let second = client.search(&networking_criteria()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_search_status_classification() {
    let cases = [
        (404, FailureCategory::NotFound, FailureKind::Permanent),
        (403, FailureCategory::AccessDenied, FailureKind::Permanent),
        (429, FailureCategory::RateLimited, FailureKind::Retryable),
        (500, FailureCategory::ServerError, FailureKind::Retryable),
        (503, FailureCategory::ServerError, FailureKind::Retryable),
        (418, FailureCategory::UnexpectedStatus, FailureKind::Permanent),
    ];

    for (status, category, kind) in cases {
        let mut server = Server::new();
        let mock = search_mock(&mut server).with_status(status).expect(1).create();

        let error = client_for(&server)
            .search(&networking_criteria())
            .unwrap_err();

        // One attempt only, whatever the outcome.
        mock.assert();
        assert_eq!(error.category, category, "status {status}");
        assert_eq!(error.kind, kind, "status {status}");
        assert_eq!(error.upstream, Upstream::Catalog);
        assert!(error.cause.contains(&format!("HTTP {status}")));
        assert!(!error.recovery_hint.is_empty());
    }
}

#[test]
fn test_search_malformed_page_is_permanent() {
    let mut server = Server::new();
    let _m = search_mock(&mut server)
        .with_status(200)
        .with_body("<html><body><h1>Maintenance</h1></body></html>")
        .create();

    let error = client_for(&server)
        .search(&networking_criteria())
        .unwrap_err();
    assert_eq!(error.category, FailureCategory::MalformedResponse);
    assert_eq!(error.kind, FailureKind::Permanent);
    assert!(error.cause.contains("package-results"));
}

#[test]
fn test_search_invalid_base_url() {
    let client = CatalogClient::new().with_catalog_base_url("not a url".to_string());
    let error = client.search(&networking_criteria()).unwrap_err();
    assert_eq!(error.category, FailureCategory::InvalidRequest);
    assert_eq!(error.kind, FailureKind::Permanent);
}

#[test]
fn test_connection_refused_is_retryable() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = CatalogClient::new()
        .with_catalog_base_url(format!("http://127.0.0.1:{port}"))
        .with_timeout(Duration::from_secs(2));
    let error = client.search(&networking_criteria()).unwrap_err();

    assert_eq!(error.category, FailureCategory::ConnectionFailed);
    assert_eq!(error.kind, FailureKind::Retryable);
}

#[test]
fn test_silent_server_times_out() {
    // Accepts connections (via the listen backlog) but never answers.
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let client = CatalogClient::new()
        .with_catalog_base_url(format!("http://127.0.0.1:{port}"))
        .with_timeout(Duration::from_millis(300));
    let error = client.search(&networking_criteria()).unwrap_err();

    assert_eq!(error.category, FailureCategory::Timeout);
    assert!(error.is_retryable());
    drop(listener);
}

#[test]
fn test_fetch_document_success() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/repos/apple/swift-nio/readme")
        .match_header("accept", "application/vnd.github.raw")
        .with_status(200)
        .with_body("# SwiftNIO\n\nEvent-driven network application framework.")
        .create();

    let request = DocumentRequest::new("apple", "swift-nio", 4000).unwrap();
    let document = client_for(&server).fetch_document(&request).unwrap();

    mock.assert();
    assert_eq!(document.owner, "apple");
    assert_eq!(document.repo, "swift-nio");
    assert!(document.content.starts_with("# SwiftNIO"));
    assert!(!document.truncated);
    assert_eq!(document.url, format!("{}/apple/swift-nio", server.url()));
}

#[test]
fn test_fetch_document_truncates() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/repos/apple/swift-nio/readme")
        .with_status(200)
        .with_body("a".repeat(6000))
        .create();

    let request = DocumentRequest::new("apple", "swift-nio", 4000).unwrap();
    let document = client_for(&server).fetch_document(&request).unwrap();

    assert!(document.truncated);
    assert_eq!(document.content.chars().count(), 4000);
    assert_eq!(document.total_length, 6000);
}

#[test]
fn test_fetch_document_not_found() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/repos/nobody/nothing/readme")
        .with_status(404)
        .create();

    let request = DocumentRequest::new("nobody", "nothing", 4000).unwrap();
    let error = client_for(&server).fetch_document(&request).unwrap_err();

    assert_eq!(error.category, FailureCategory::NotFound);
    assert_eq!(error.kind, FailureKind::Permanent);
    assert_eq!(error.upstream, Upstream::DocumentHost);
    assert!(error.recovery_hint.contains("owner/repo spelling"));
}

#[test]
fn test_fetch_document_rate_limit_via_forbidden() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/repos/apple/swift-nio/readme")
        .with_status(403)
        .with_header("x-ratelimit-remaining", "0")
        .create();

    let request = DocumentRequest::new("apple", "swift-nio", 4000).unwrap();
    let error = client_for(&server).fetch_document(&request).unwrap_err();

    assert_eq!(error.category, FailureCategory::RateLimited);
    assert_eq!(error.kind, FailureKind::Retryable);
}

#[test]
fn test_fetch_document_forbidden_with_quota_left() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/repos/apple/swift-nio/readme")
        .with_status(403)
        .with_header("x-ratelimit-remaining", "42")
        .create();

    let request = DocumentRequest::new("apple", "swift-nio", 4000).unwrap();
    let error = client_for(&server).fetch_document(&request).unwrap_err();

    assert_eq!(error.category, FailureCategory::AccessDenied);
    assert_eq!(error.kind, FailureKind::Permanent);
}

#[test]
fn test_search_on_last_representable_page() {
    let mut server = Server::new();
    let _m = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("page".into(), u32::MAX.to_string()))
        .with_status(200)
        .with_body(RESULTS_PAGE)
        .create();

    let criteria = SearchCriteria::from_params(
        SearchParams::new()
            .query("networking")
            .page(i64::from(u32::MAX)),
    )
    .unwrap();
    let response = client_for(&server).search(&criteria).unwrap();

    assert!(response.has_more());
    assert_eq!(response.results.page, u32::MAX);
    assert!(!response.next_step.contains("page="));
}
