//! Integration tests for the theme crawler
//!
//! These tests use wiremock to create mock HTTP servers and run the whole
//! pipeline end-to-end against the real HTTP client. Mock servers listen on
//! loopback, which target validation refuses, so they drive `ThemeCrawler`
//! directly.

use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use wpoke::config::CrawlConfig;
use wpoke::crawler::{CrawlState, ThemeCrawler};
use wpoke::{ErrorKind, ThemeMetadata, WpokeError};

const BASKERVILLE_CSS: &str = r#"/*
Theme Name: Baskerville
Theme URI: https://www.andersnoren.se/teman/baskerville-wordpress-theme/
Author: Anders Norén
Author URI: https://www.andersnoren.se
Description: Baskerville is a responsive and retina-ready masonry theme.
Version: 1.19
License: GNU General Public License version 2.0
License URI: http://www.gnu.org/licenses/gpl-2.0.html
Tags: black, white, responsive-layout, two-columns
Text Domain: baskerville
*/

body { margin: 0; }
"#;

/// Creates a crawl configuration suited to a local mock server
fn test_config() -> CrawlConfig {
    CrawlConfig {
        timeout: Duration::from_secs(5),
        user_agent: "wpoke-tests/1.0".to_string(),
        max_redirects: 3,
        ssl_enabled: true,
    }
}

fn index_linking(themes: &[&str]) -> String {
    let links: String = themes
        .iter()
        .map(|theme| {
            format!(
                r#"<link rel="stylesheet" href="/wp-content/themes/{}/style.css?ver=5.0">"#,
                theme
            )
        })
        .collect();
    format!("<html><head>{}</head><body>Hello</body></html>", links)
}

async fn mount_index(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_stylesheet(server: &MockServer, theme: &str, css: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/wp-content/themes/{}/style.css", theme)))
        .respond_with(ResponseTemplate::new(200).set_body_string(css))
        .mount(server)
        .await;
}

async fn run_crawl(server: &MockServer, config: &CrawlConfig) -> wpoke::Result<Vec<ThemeMetadata>> {
    let mut crawler = ThemeCrawler::new(config).expect("client should build");
    crawler.get_theme(&format!("{}/", server.uri())).await
}

#[tokio::test]
async fn test_full_crawl_single_theme() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, index_linking(&["baskerville"])).await;
    mount_stylesheet(&mock_server, "baskerville", BASKERVILLE_CSS).await;

    Mock::given(method("HEAD"))
        .and(path("/wp-content/themes/baskerville/screenshot.jpeg"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let themes = run_crawl(&mock_server, &test_config()).await.unwrap();
    assert_eq!(themes.len(), 1);

    let theme = &themes[0];
    assert_eq!(theme.theme_name.as_deref(), Some("Baskerville"));
    assert_eq!(theme.version.as_deref(), Some("1.19"));
    assert_eq!(theme.author.as_deref(), Some("Anders Norén"));
    assert_eq!(theme.author_uri.as_deref(), Some("https://www.andersnoren.se"));
    assert_eq!(theme.text_domain.as_deref(), Some("baskerville"));
    assert_eq!(
        theme.tag_list(),
        vec!["black", "white", "responsive-layout", "two-columns"]
    );
    assert_eq!(
        theme.featured_image,
        Some(format!(
            "{}/wp-content/themes/baskerville/screenshot.jpeg",
            mock_server.uri()
        ))
    );

    let json = serde_json::to_value(theme).unwrap();
    assert_eq!(json["tags"][1], "white");
}

#[tokio::test]
async fn test_full_crawl_parent_and_child_theme() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, index_linking(&["twentytwenty", "twentytwenty-child"])).await;
    mount_stylesheet(&mock_server, "twentytwenty", "/*\nTheme Name: Twenty Twenty\n*/").await;
    mount_stylesheet(
        &mock_server,
        "twentytwenty-child",
        "/*\nTheme Name: Twenty Twenty Child\nTemplate: twentytwenty\n*/",
    )
    .await;

    let themes = run_crawl(&mock_server, &test_config()).await.unwrap();

    let names: Vec<&str> = themes
        .iter()
        .filter_map(|theme| theme.theme_name.as_deref())
        .collect();
    assert_eq!(names, vec!["Twenty Twenty", "Twenty Twenty Child"]);
    assert_eq!(themes[1].template.as_deref(), Some("twentytwenty"));
    // no HEAD mock, so the probe answers 404 everywhere
    assert!(themes.iter().all(|theme| theme.featured_image.is_none()));
}

#[tokio::test]
async fn test_bundled_candidate_is_skipped() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, index_linking(&["bundled", "baskerville"])).await;
    mount_stylesheet(&mock_server, "bundled", "body{margin:0}.a{color:red}").await;
    mount_stylesheet(&mock_server, "baskerville", BASKERVILLE_CSS).await;

    let themes = run_crawl(&mock_server, &test_config()).await.unwrap();
    assert_eq!(themes.len(), 1);
    assert_eq!(themes[0].theme_name.as_deref(), Some("Baskerville"));
}

#[tokio::test]
async fn test_all_candidates_bundled() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, index_linking(&["bundled"])).await;
    mount_stylesheet(&mock_server, "bundled", "body{margin:0}").await;

    let mut crawler = ThemeCrawler::new(&test_config()).unwrap();
    let err = crawler
        .get_theme(&format!("{}/", mock_server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, WpokeError::BundledTheme));
    assert_eq!(err.to_string(), wpoke::BUNDLED_THEME_MESSAGE);
    assert_eq!(crawler.state(), CrawlState::Failed);
}

#[tokio::test]
async fn test_empty_index_body() {
    let mock_server = MockServer::start().await;
    mount_index(&mock_server, String::new()).await;

    let err = run_crawl(&mock_server, &test_config()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedBody);
}

#[tokio::test]
async fn test_index_without_theme_paths() {
    let mock_server = MockServer::start().await;
    mount_index(
        &mock_server,
        "<html><body><p>Not a WordPress site</p></body></html>".to_string(),
    )
    .await;

    let err = run_crawl(&mock_server, &test_config()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ThemePathMissing);
}

#[tokio::test]
async fn test_index_not_found_without_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let err = run_crawl(&mock_server, &test_config()).await.unwrap_err();
    assert!(matches!(err, WpokeError::TargetNotFound { status: 404, .. }));
}

#[tokio::test]
async fn test_index_not_found_with_body_is_still_crawled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(404).set_body_string(index_linking(&["baskerville"])))
        .mount(&mock_server)
        .await;
    mount_stylesheet(&mock_server, "baskerville", BASKERVILLE_CSS).await;

    let themes = run_crawl(&mock_server, &test_config()).await.unwrap();
    assert_eq!(themes[0].theme_name.as_deref(), Some("Baskerville"));
}

#[tokio::test]
async fn test_index_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = run_crawl(&mock_server, &test_config()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetInternalServerError);
}

#[tokio::test]
async fn test_stylesheet_server_error_aborts_crawl() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, index_linking(&["broken", "baskerville"])).await;
    Mock::given(method("GET"))
        .and(path("/wp-content/themes/broken/style.css"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_stylesheet(&mock_server, "baskerville", BASKERVILLE_CSS).await;

    let err = run_crawl(&mock_server, &test_config()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetInternalServerError);
}

#[tokio::test]
async fn test_index_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(index_linking(&["baskerville"]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = CrawlConfig {
        timeout: Duration::from_millis(300),
        ..test_config()
    };

    let err = run_crawl(&mock_server, &config).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetTimeout);
}

#[tokio::test]
async fn test_redirect_loop_is_nasty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/"))
        .mount(&mock_server)
        .await;

    let err = run_crawl(&mock_server, &test_config()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NastyTarget);
}

#[tokio::test]
async fn test_redirect_sets_canonical_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/blog/"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/blog/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<script src="../wp-content/themes/baskerville/js/global.js"></script>"#,
        ))
        .mount(&mock_server)
        .await;
    mount_stylesheet(&mock_server, "baskerville", BASKERVILLE_CSS).await;

    let mut crawler = ThemeCrawler::new(&test_config()).unwrap();
    let themes = crawler
        .get_theme(&format!("{}/", mock_server.uri()))
        .await
        .unwrap();

    assert_eq!(themes[0].theme_name.as_deref(), Some("Baskerville"));
    assert_eq!(
        crawler.canonical_url().map(|u| u.as_str().to_string()),
        Some(format!("{}/blog/", mock_server.uri()))
    );
    assert_eq!(crawler.state(), CrawlState::Assembled);
}

#[tokio::test]
async fn test_index_is_fetched_once_per_crawler() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_linking(&["baskerville"])))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_stylesheet(&mock_server, "baskerville", BASKERVILLE_CSS).await;

    let mut crawler = ThemeCrawler::new(&test_config()).unwrap();
    let target = format!("{}/", mock_server.uri());

    let first = crawler.get_theme(&target).await.unwrap();
    let second = crawler.get_theme(&target).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_header_has_no_fallback_across_candidates() {
    let mock_server = MockServer::start().await;

    mount_index(&mock_server, index_linking(&["first", "second"])).await;
    mount_stylesheet(
        &mock_server,
        "first",
        "/*\nTheme Name: First\nAuthor URI:\n*/",
    )
    .await;
    mount_stylesheet(
        &mock_server,
        "second",
        "/*\nTheme Name: Second\nAuthor URI: https://second.example\n*/",
    )
    .await;

    let themes = run_crawl(&mock_server, &test_config()).await.unwrap();
    assert_eq!(themes.len(), 2);
    assert_eq!(themes[0].author_uri.as_deref(), Some(""));
    assert_eq!(themes[1].author_uri.as_deref(), Some("https://second.example"));
}

#[tokio::test]
async fn test_oversized_stylesheet_is_truncated() {
    let mock_server = MockServer::start().await;

    let mut css = String::from("/*\nTheme Name: Huge\n*/\n");
    css.push_str(&"a{color:red}\n".repeat(2000));
    css.push_str("/*\nVersion: 9.9\n*/\n");

    mount_index(&mock_server, index_linking(&["huge"])).await;
    mount_stylesheet(&mock_server, "huge", &css).await;

    let themes = run_crawl(&mock_server, &test_config()).await.unwrap();
    assert_eq!(themes[0].theme_name.as_deref(), Some("Huge"));
    assert_eq!(themes[0].version, None);
}

#[tokio::test]
async fn test_user_agent_is_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(wiremock::matchers::header("user-agent", "wpoke-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<p>nothing</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = run_crawl(&mock_server, &test_config()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ThemePathMissing);
}

#[tokio::test]
async fn test_redirect_to_internal_host_is_nasty() {
    let mock_server = MockServer::start().await;
    let port = url::Url::parse(&mock_server.uri())
        .unwrap()
        .port()
        .unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("http://localhost:{}/internal", port).as_str()),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/internal"))
        .respond_with(ResponseTemplate::new(200).set_body_string(index_linking(&["internal"])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut crawler = ThemeCrawler::new(&test_config()).unwrap();
    let err = crawler
        .get_theme(&format!("{}/", mock_server.uri()))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NastyTarget);
    assert!(crawler.canonical_url().is_none());
}

#[tokio::test]
async fn test_closed_port_is_a_connection_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let address = listener.local_addr().unwrap();
    drop(listener);

    let mut crawler = ThemeCrawler::new(&test_config()).unwrap();
    let err = crawler
        .get_theme(&format!("http://{}/", address))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::TargetConnection);
}

#[tokio::test]
async fn test_crawler_reused_for_another_target() {
    let first_server = MockServer::start().await;
    let second_server = MockServer::start().await;

    mount_index(&first_server, index_linking(&["baskerville"])).await;
    mount_stylesheet(&first_server, "baskerville", BASKERVILLE_CSS).await;
    mount_index(&second_server, index_linking(&["other"])).await;
    mount_stylesheet(&second_server, "other", "/*\nTheme Name: Other\n*/").await;

    let mut crawler = ThemeCrawler::new(&test_config()).unwrap();

    let first = crawler
        .get_theme(&format!("{}/", first_server.uri()))
        .await
        .unwrap();
    assert_eq!(first[0].theme_name.as_deref(), Some("Baskerville"));

    let second = crawler
        .get_theme(&format!("{}/", second_server.uri()))
        .await
        .unwrap();
    assert_eq!(second[0].theme_name.as_deref(), Some("Other"));
    assert_eq!(
        crawler.canonical_url().map(|u| u.as_str().to_string()),
        Some(format!("{}/", second_server.uri()))
    );
}
