//! Crawler module for theme detection
//!
//! This module contains the theme crawl pipeline, including:
//! - HTTP fetching with status classification and body bounding
//! - Candidate theme directory discovery
//! - Theme header extraction from `style.css`
//! - Screenshot probing
//! - Overall crawl coordination
//!
//! A crawl is strictly sequential: candidates are processed one at a time so
//! the target never sees a burst of parallel requests.

mod coordinator;
mod discovery;
mod extractor;
mod fetcher;
mod screenshot;
mod state;

pub use coordinator::ThemeCrawler;
pub use discovery::{
    extract_theme_path_by_global_regex, extract_theme_path_candidates,
    remove_duplicated_theme_urls, truncate_theme_url, THEME_PATH_MARKER,
};
pub use extractor::extract_info_from_css;
pub use fetcher::{
    build_http_client, classify_transport_error, raise_on_failure, truncate_to_boundary,
    FetchResponse, Fetcher, IndexPage, MAX_STYLESHEET_BYTES,
};
pub use screenshot::{get_screenshot, SCREENSHOT_EXTENSIONS};
pub use state::CrawlState;

use crate::config::CrawlConfig;
use crate::theme::ThemeMetadata;
use crate::url::parse_target;
use crate::Result;

/// Runs a complete theme crawl against a user supplied target
///
/// This is the main entry point. It will:
/// 1. Validate the target URL (scheme, host, SSRF checks)
/// 2. Fetch the index page
/// 3. Discover candidate theme directories
/// 4. Fetch and parse each candidate's `style.css`, probing for a screenshot
///
/// # Arguments
///
/// * `target_url` - The site to inspect
/// * `config` - The HTTP parameters for every request of this crawl
///
/// # Returns
///
/// * `Ok(Vec<ThemeMetadata>)` - At least one detected theme
/// * `Err(WpokeError)` - The crawl failed; see [`crate::ErrorKind`]
pub async fn crawl(target_url: &str, config: &CrawlConfig) -> Result<Vec<ThemeMetadata>> {
    let target = parse_target(target_url)?;
    tracing::info!("Poking {} for themes", target);

    let mut crawler = ThemeCrawler::new(config)?;
    crawler.get_theme(target.as_str()).await
}
