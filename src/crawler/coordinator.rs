//! Theme crawl orchestration
//!
//! Ties the pipeline together for one target:
//! - Fetching the index page (once per crawl)
//! - Discovering candidate theme directories
//! - Fetching and parsing each candidate's `style.css`
//! - Probing each accepted candidate for a screenshot

use crate::config::CrawlConfig;
use crate::crawler::discovery::extract_theme_path_candidates;
use crate::crawler::extractor::extract_info_from_css;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::screenshot::get_screenshot;
use crate::crawler::state::CrawlState;
use crate::theme::ThemeMetadata;
use crate::url::{is_same_origin, validate_url};
use crate::{Result, WpokeError};
use url::Url;

/// Stylesheet carrying the theme headers, relative to the theme directory
const STYLESHEET_NAME: &str = "style.css";

/// Candidates on the target's own host are always fetched; anything else
/// must pass target validation, so a page cannot steer the crawler into
/// internal addresses.
fn is_allowed_candidate(candidate: &str, canonical_url: &Url) -> bool {
    is_same_origin(candidate, canonical_url.as_str()) || validate_url(candidate).is_ok()
}

/// Runs the theme detection pipeline against a single target
///
/// A crawler runs one crawl at a time: it owns the memoized index page, so
/// concurrent crawls must each build their own. Reusing it for another target
/// refetches the index and adopts that target's canonical URL.
pub struct ThemeCrawler {
    fetcher: Fetcher,
    fixed_canonical_url: Option<Url>,
    canonical_url: Option<Url>,
    state: CrawlState,
}

impl ThemeCrawler {
    /// Creates a crawler with an HTTP client built from the configuration
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        Ok(Self::with_fetcher(Fetcher::new(config)?))
    }

    /// Creates a crawler around an existing fetcher
    pub fn with_fetcher(fetcher: Fetcher) -> Self {
        Self {
            fetcher,
            fixed_canonical_url: None,
            canonical_url: None,
            state: CrawlState::Start,
        }
    }

    /// Fixes the canonical URL instead of adopting the index page's final URL
    pub fn with_canonical_url(mut self, canonical_url: Url) -> Self {
        self.fixed_canonical_url = Some(canonical_url.clone());
        self.canonical_url = Some(canonical_url);
        self
    }

    /// URL used for scheme backfill and same-origin filtering
    pub fn canonical_url(&self) -> Option<&Url> {
        self.canonical_url.as_ref()
    }

    /// Current position in the crawl state machine
    pub fn state(&self) -> CrawlState {
        self.state
    }

    fn transition(&mut self, next: CrawlState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid crawl transition {} -> {}",
            self.state,
            next
        );
        tracing::trace!("Crawl state {} -> {}", self.state, next);
        self.state = next;
    }

    /// Detects the themes used by the site at `url`
    ///
    /// The URL is not validated here; see [`crate::crawler::crawl`] for the
    /// validating entry point.
    ///
    /// # Errors
    ///
    /// - [`WpokeError::MalformedBody`] if the index page is empty
    /// - [`WpokeError::ThemePathMissing`] if no theme directory was found
    /// - [`WpokeError::BundledTheme`] if no candidate stylesheet had headers
    /// - any transport or status error raised by the fetcher
    pub async fn get_theme(&mut self, url: &str) -> Result<Vec<ThemeMetadata>> {
        self.state = CrawlState::Start;

        match self.run(url).await {
            Ok(themes) => {
                self.transition(CrawlState::Assembled);
                tracing::info!("Found {} theme(s) on {}", themes.len(), url);
                Ok(themes)
            }
            Err(e) => {
                self.transition(CrawlState::Failed);
                tracing::warn!("Theme crawl of {} failed: {}", url, e);
                Err(e)
            }
        }
    }

    async fn run(&mut self, url: &str) -> Result<Vec<ThemeMetadata>> {
        let index = self.fetcher.fetch_index(url).await?;

        // After redirects, the canonical URL is where the index was served from
        let canonical_url = self
            .fixed_canonical_url
            .clone()
            .unwrap_or_else(|| index.final_url.clone());
        self.canonical_url = Some(canonical_url.clone());
        self.transition(CrawlState::IndexFetched);

        if index.body.is_empty() {
            return Err(WpokeError::MalformedBody {
                url: url.to_string(),
            });
        }

        let candidates = extract_theme_path_candidates(&canonical_url, &index.body)
            .filter(|candidates| !candidates.is_empty())
            .ok_or_else(|| WpokeError::ThemePathMissing {
                url: url.to_string(),
            })?;
        self.transition(CrawlState::CandidatesDiscovered);
        tracing::info!(
            "Discovered {} candidate theme director{} on {}",
            candidates.len(),
            if candidates.len() == 1 { "y" } else { "ies" },
            canonical_url
        );

        let mut themes = Vec::new();
        for candidate in &candidates {
            if !is_allowed_candidate(candidate, &canonical_url) {
                tracing::warn!("Skipping candidate {} on a forbidden host", candidate);
                continue;
            }

            if let Some(theme) = self.process_candidate(candidate).await? {
                themes.push(theme);
            }
        }

        if themes.is_empty() {
            return Err(WpokeError::BundledTheme);
        }

        Ok(themes)
    }

    /// Fetches, extracts and probes one candidate
    ///
    /// Returns `Ok(None)` when the candidate's stylesheet carries no headers.
    async fn process_candidate(&mut self, candidate: &str) -> Result<Option<ThemeMetadata>> {
        let stylesheet_url = format!("{}{}", candidate, STYLESHEET_NAME);
        let css = self.fetcher.fetch_stylesheet(&stylesheet_url).await?;
        self.transition(CrawlState::CandidateFetched);

        let mut theme = match extract_info_from_css(&css) {
            Ok(theme) => theme,
            Err(WpokeError::BundledTheme) => {
                tracing::info!("No theme headers in {}, skipping candidate", stylesheet_url);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };
        self.transition(CrawlState::CandidateExtracted);

        if let Some(screenshot) = get_screenshot(&self.fetcher, candidate).await? {
            theme.set_featured_image(screenshot);
        }
        self.transition(CrawlState::CandidateProbed);

        tracing::debug!(
            "Extracted theme {:?} from {}",
            theme.theme_name.as_deref().unwrap_or_default(),
            stylesheet_url
        );
        Ok(Some(theme))
    }
}
