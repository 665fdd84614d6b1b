use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default redirect cap for a single request
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Main configuration structure for wpoke
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub http: CrawlConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Per-crawl HTTP parameters
///
/// Built once by the caller and handed to every crawl by reference; a crawl
/// never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    /// Timeout applied to every single request (seconds in the TOML file)
    #[serde(deserialize_with = "deserialize_seconds")]
    pub timeout: Duration,

    /// Value of the User-Agent header
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Maximum number of redirects followed by one request
    #[serde(rename = "max-redirects")]
    pub max_redirects: usize,

    /// Whether TLS certificates are verified
    #[serde(rename = "ssl-enabled")]
    pub ssl_enabled: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
            ssl_enabled: true,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Rendering format name, `json` or `cli`
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
        }
    }
}

fn default_user_agent() -> String {
    format!("wpoke/{}", env!("CARGO_PKG_VERSION"))
}

fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}
