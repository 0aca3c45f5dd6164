//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use sitewalk::config::{Config, CrawlerConfig, UserAgentConfig};
use sitewalk::crawler::{crawl_with_cancellation, Coordinator, HttpFetcher};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with short timeouts
fn create_test_config(max_concurrent_fetches: u32) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_concurrent_fetches,
            request_timeout: 5,
            connect_timeout: 2,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: None,
            contact_email: None,
        },
    }
}

/// Responds with an HTML document containing the given anchors
fn html_page(hrefs: &[&str]) -> ResponseTemplate {
    let anchors: String = hrefs
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    let body = format!(
        "<html><head><title>Test</title></head><body>{}</body></html>",
        anchors
    );
    ResponseTemplate::new(200).set_body_raw(body, "text/html")
}

/// Mounts a GET route expected to be hit exactly `times` times
async fn mount_page(server: &MockServer, route: &str, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_single_origin() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/a", "http://external.com"]), 1).await;
    mount_page(&server, "/a", html_page(&["/", "/b"]), 1).await;
    mount_page(&server, "/b", html_page(&[]), 1).await;

    let urls = sitewalk::crawl(&format!("{}/", base_url), &create_test_config(4))
        .await
        .expect("crawl failed");

    assert_eq!(
        urls,
        vec![
            format!("{}/a", base_url),
            format!("{}/", base_url),
            format!("{}/b", base_url),
        ]
    );
}

#[tokio::test]
async fn test_absolute_same_origin_links_kept_verbatim() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let absolute = format!("{}/page1?ref=home", base_url);
    mount_page(&server, "/", html_page(&[absolute.as_str()]), 1).await;
    mount_page(&server, "/page1", html_page(&[]), 1).await;

    let urls = sitewalk::crawl(&format!("{}/", base_url), &create_test_config(4))
        .await
        .expect("crawl failed");

    assert_eq!(urls, vec![absolute]);
}

#[tokio::test]
async fn test_bare_seed_is_normalized() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/only"]), 1).await;
    mount_page(&server, "/only", html_page(&["/"]), 1).await;

    // No trailing slash on the seed; the root must still be fetched just once
    let urls = sitewalk::crawl(&base_url, &create_test_config(2))
        .await
        .expect("crawl failed");

    assert_eq!(
        urls,
        vec![format!("{}/only", base_url), format!("{}/", base_url)]
    );
}

#[tokio::test]
async fn test_missing_page_does_not_abort_crawl() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/gone", "/here"]), 1).await;
    mount_page(&server, "/gone", ResponseTemplate::new(404), 1).await;
    mount_page(&server, "/here", html_page(&["/deeper"]), 1).await;
    mount_page(&server, "/deeper", html_page(&[]), 1).await;

    let fetcher = HttpFetcher::new(&create_test_config(4).crawler, &UserAgentConfig::default())
        .expect("client");
    let coordinator = Coordinator::with_concurrency(Arc::new(fetcher), 4);
    let report = coordinator
        .crawl_with_cancellation(&format!("{}/", base_url), CancellationToken::new())
        .await
        .expect("crawl failed");

    assert_eq!(report.pages_fetched, 3);
    assert_eq!(report.pages_failed, 1);
    assert!(report.urls.contains(&format!("{}/gone", base_url)));
    assert!(report.urls.contains(&format!("{}/deeper", base_url)));
    assert!(!report.cancelled);
}

#[tokio::test]
async fn test_non_html_response_contributes_no_links() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/report.pdf"]), 1).await;
    mount_page(
        &server,
        "/report.pdf",
        ResponseTemplate::new(200).set_body_raw(r#"<a href="/hidden">x</a>"#, "application/pdf"),
        1,
    )
    .await;
    mount_page(&server, "/hidden", html_page(&[]), 0).await;

    let urls = sitewalk::crawl(&format!("{}/", base_url), &create_test_config(4))
        .await
        .expect("crawl failed");

    assert_eq!(urls, vec![format!("{}/report.pdf", base_url)]);
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(html_page(&["/next"]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/next"))
        .and(header("user-agent", "TestBot/1.0.0"))
        .respond_with(html_page(&[]))
        .expect(1)
        .mount(&server)
        .await;

    let urls = sitewalk::crawl(&format!("{}/", base_url), &create_test_config(1))
        .await
        .expect("crawl failed");

    assert_eq!(urls, vec![format!("{}/next", base_url)]);
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/slow", "/fast"]), 1).await;
    mount_page(
        &server,
        "/slow",
        html_page(&["/behind-slow"]).set_delay(Duration::from_secs(3)),
        1,
    )
    .await;
    mount_page(&server, "/fast", html_page(&[]), 1).await;
    mount_page(&server, "/behind-slow", html_page(&[]), 0).await;

    let mut config = create_test_config(4);
    config.crawler.request_timeout = 1;
    config.crawler.connect_timeout = 1;

    let report = crawl_with_cancellation(&format!("{}/", base_url), &config, CancellationToken::new())
        .await
        .expect("crawl failed");

    assert_eq!(report.pages_fetched, 2);
    assert_eq!(report.pages_failed, 1);
    assert_eq!(
        report.urls,
        vec![format!("{}/slow", base_url), format!("{}/fast", base_url)]
    );
}

#[tokio::test]
async fn test_cancellation_returns_partial_results() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    mount_page(&server, "/", html_page(&["/stuck", "/quick"]), 1).await;
    mount_page(
        &server,
        "/stuck",
        html_page(&[]).set_delay(Duration::from_secs(30)),
        1,
    )
    .await;
    mount_page(&server, "/quick", html_page(&[]), 1).await;

    let config = create_test_config(4);
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        trigger.cancel();
    });

    let report = crawl_with_cancellation(&format!("{}/", base_url), &config, cancel)
        .await
        .expect("crawl failed");

    assert!(report.cancelled);
    assert!(report.elapsed < Duration::from_secs(5));
    assert_eq!(
        report.urls,
        vec![format!("{}/stuck", base_url), format!("{}/quick", base_url)]
    );
}

#[tokio::test]
async fn test_serial_and_parallel_crawls_agree() {
    let server = MockServer::start().await;
    let base_url = server.uri();

    let routes: Vec<(String, Vec<String>)> = (0..10)
        .map(|i| {
            let links = vec![format!("/p{}", (i + 1) % 10), format!("/p{}", (i * 3) % 10)];
            (format!("/p{}", i), links)
        })
        .collect();

    for (route, links) in &routes {
        let hrefs: Vec<&str> = links.iter().map(String::as_str).collect();
        Mock::given(method("GET"))
            .and(path(route.as_str()))
            .respond_with(html_page(&hrefs))
            .mount(&server)
            .await;
    }

    let seed = format!("{}/p0", base_url);
    let mut serial = sitewalk::crawl(&seed, &create_test_config(1))
        .await
        .expect("serial crawl failed");
    let mut parallel = sitewalk::crawl(&seed, &create_test_config(8))
        .await
        .expect("parallel crawl failed");

    serial.sort();
    parallel.sort();
    assert_eq!(serial, parallel);
    assert!(serial.contains(&format!("{}/p9", base_url)));
}

#[tokio::test]
async fn test_invalid_seed_is_rejected() {
    let result = sitewalk::crawl("not a url", &create_test_config(4)).await;
    assert!(matches!(
        result,
        Err(sitewalk::CrawlError::InvalidSeedUrl { .. })
    ));

    let result = sitewalk::crawl("ftp://example.com/", &create_test_config(4)).await;
    assert!(result.is_err());
}
