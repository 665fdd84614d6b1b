//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests of a crawl, including:
//! - Building the HTTP client from the crawl configuration
//! - Classifying response status codes
//! - Bounding stylesheet bodies
//! - Memoizing the index page for the lifetime of one crawl
//! - Translating transport failures into crawl errors

use crate::config::CrawlConfig;
use crate::url::{ensure_same_origin, validate_url};
use crate::{Result, WpokeError};
use reqwest::{redirect, Client, Method, Response};
use url::Url;

/// Bytes of a stylesheet kept for header extraction
///
/// WordPress itself only reads the first 8 KiB of a file when parsing theme
/// headers.
pub const MAX_STYLESHEET_BYTES: usize = 8192;

/// Status and body of a completed request
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Final URL after redirects
    pub final_url: Url,
    /// Response body
    pub body: String,
}

/// The index page of a target, fetched once per crawl
#[derive(Debug, Clone)]
pub struct IndexPage {
    /// URL the page was requested with
    pub requested_url: String,
    /// Final URL after redirects
    pub final_url: Url,
    /// Page body
    pub body: String,
}

/// Builds an HTTP client with the crawl's timeout, redirect cap, TLS policy and user agent
///
/// # Example
///
/// ```no_run
/// use wpoke::config::CrawlConfig;
/// use wpoke::crawler::build_http_client;
///
/// let client = build_http_client(&CrawlConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &CrawlConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .connect_timeout(config.timeout)
        .redirect(redirect_policy(config.max_redirects))
        .danger_accept_invalid_certs(!config.ssl_enabled)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Follows at most `max_redirects` hops; a hop onto another host must pass
/// target validation like the target itself
fn redirect_policy(max_redirects: usize) -> redirect::Policy {
    redirect::Policy::custom(move |attempt| {
        if attempt.previous().len() > max_redirects {
            return attempt.error("too many redirects");
        }

        let next = attempt.url().as_str();
        let cross_host = attempt
            .previous()
            .last()
            .map_or(false, |previous| ensure_same_origin(previous.as_str(), next).is_err());

        if cross_host {
            if let Err(e) = validate_url(next) {
                return attempt.error(e);
            }
        }
        attempt.follow()
    })
}

/// Rejects responses that cannot carry anything useful
///
/// A 4xx answer with a body is let through: WordPress serves informative
/// error pages that may still disclose theme assets.
pub fn raise_on_failure(url: &str, status: u16, has_body: bool) -> Result<()> {
    if (400..500).contains(&status) {
        if !has_body {
            return Err(WpokeError::TargetNotFound {
                url: url.to_string(),
                status,
            });
        }
    } else if status >= 500 {
        return Err(WpokeError::TargetInternalServerError {
            url: url.to_string(),
            message: format!("HTTP {}", status),
        });
    }
    Ok(())
}

/// Translates a transport failure into the crawl error taxonomy
pub fn classify_transport_error(url: &str, error: reqwest::Error) -> WpokeError {
    let url = url.to_string();
    if error.is_redirect() {
        WpokeError::NastyTarget { url }
    } else if error.is_timeout() {
        WpokeError::TargetTimeout { url }
    } else if error.is_connect() {
        WpokeError::TargetConnection {
            url,
            message: error.to_string(),
        }
    } else {
        WpokeError::TargetInternalServerError {
            url,
            message: error.to_string(),
        }
    }
}

/// Cuts a string to at most `limit` bytes without splitting a character
pub fn truncate_to_boundary(mut body: String, limit: usize) -> String {
    if body.len() <= limit {
        return body;
    }
    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body
}

/// Decodes a byte prefix, dropping a trailing character cut in half
fn decode_prefix(mut bytes: Vec<u8>, limit: usize) -> String {
    if let Err(e) = std::str::from_utf8(&bytes) {
        if e.error_len().is_none() {
            bytes.truncate(e.valid_up_to());
        }
    }
    truncate_to_boundary(String::from_utf8_lossy(&bytes).into_owned(), limit)
}

/// HTTP access for a single crawl
///
/// Owns the memoized index page. The memo is keyed on the requested URL, so
/// asking for another target fetches it afresh.
pub struct Fetcher {
    client: Client,
    index: Option<IndexPage>,
}

impl Fetcher {
    /// Creates a fetcher with a client built from the crawl configuration
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = build_http_client(config).map_err(WpokeError::HttpClient)?;
        Ok(Self::with_client(client))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            index: None,
        }
    }

    async fn send(&self, url: &str, method: Method) -> Result<Response> {
        tracing::trace!("{} {}", method, url);
        self.client
            .request(method, url)
            .send()
            .await
            .map_err(|e| classify_transport_error(url, e))
    }

    /// Issues a request and returns its status and full body
    ///
    /// The status is classified with [`raise_on_failure`].
    pub async fn fetch(&self, url: &str, method: Method) -> Result<FetchResponse> {
        let response = self.send(url, method).await?;
        let status = response.status().as_u16();
        let final_url = response.url().clone();
        let body = response
            .text()
            .await
            .map_err(|e| classify_transport_error(url, e))?;

        raise_on_failure(url, status, !body.is_empty())?;

        Ok(FetchResponse {
            status,
            final_url,
            body,
        })
    }

    /// Fetches the index page, reusing the cached copy when `url` was the
    /// last index requested
    pub async fn fetch_index(&mut self, url: &str) -> Result<IndexPage> {
        if let Some(index) = self.index.as_ref().filter(|index| index.requested_url == url) {
            tracing::debug!("Reusing cached index body for {}", url);
            return Ok(index.clone());
        }

        let response = self.fetch(url, Method::GET).await?;
        tracing::debug!(
            "Fetched index {} (status {}, {} bytes)",
            response.final_url,
            response.status,
            response.body.len()
        );

        let index = IndexPage {
            requested_url: url.to_string(),
            final_url: response.final_url,
            body: response.body,
        };
        self.index = Some(index.clone());
        Ok(index)
    }

    /// Fetches a stylesheet, keeping at most [`MAX_STYLESHEET_BYTES`] of it
    ///
    /// The body is read chunk by chunk and reading stops once the limit is
    /// reached, so oversized responses are never buffered whole.
    pub async fn fetch_stylesheet(&self, url: &str) -> Result<String> {
        let mut response = self.send(url, Method::GET).await?;
        let status = response.status().as_u16();

        let mut bytes = Vec::new();
        while bytes.len() < MAX_STYLESHEET_BYTES {
            match response
                .chunk()
                .await
                .map_err(|e| classify_transport_error(url, e))?
            {
                Some(chunk) => bytes.extend_from_slice(&chunk),
                None => break,
            }
        }
        bytes.truncate(MAX_STYLESHEET_BYTES);

        raise_on_failure(url, status, !bytes.is_empty())?;

        let css = decode_prefix(bytes, MAX_STYLESHEET_BYTES);
        tracing::debug!("Fetched stylesheet {} ({} bytes kept)", url, css.len());
        Ok(css)
    }

    /// Sends a HEAD request and returns the status code without classifying it
    pub async fn head(&self, url: &str) -> Result<u16> {
        let response = self.send(url, Method::HEAD).await?;
        Ok(response.status().as_u16())
    }
}
