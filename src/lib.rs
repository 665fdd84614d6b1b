//! wpoke: WordPress information gathering
//!
//! This crate probes a remote site believed to run WordPress and identifies the
//! themes it uses, by discovering candidate theme directories in the index page
//! and reading the metadata header of each theme's `style.css`.

pub mod config;
pub mod crawler;
pub mod finger;
pub mod output;
pub mod theme;
pub mod url;

use thiserror::Error;

/// Message attached to every bundled-theme failure
pub const BUNDLED_THEME_MESSAGE: &str = "The target might be using a package manager to bundle its assets, like webpack, parcel or browserify";

/// Main error type for wpoke operations
#[derive(Debug, Error)]
pub enum WpokeError {
    #[error("Invalid target URL: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unable to connect to {url}: {message}")]
    TargetConnection { url: String, message: String },

    #[error("Request timeout for {url}")]
    TargetTimeout { url: String },

    #[error("Too many redirects from {url}")]
    NastyTarget { url: String },

    #[error("Target not found: {url} answered {status} with an empty body")]
    TargetNotFound { url: String, status: u16 },

    #[error("Target internal error for {url}: {message}")]
    TargetInternalServerError { url: String, message: String },

    #[error("Target unreadable: {url} returned an empty body")]
    MalformedBody { url: String },

    #[error("No theme paths found in {url}. Maybe not a WordPress site?")]
    ThemePathMissing { url: String },

    #[error("{}", BUNDLED_THEME_MESSAGE)]
    BundledTheme,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Discriminant of a [`WpokeError`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    TargetConnection,
    TargetTimeout,
    NastyTarget,
    TargetNotFound,
    TargetInternalServerError,
    MalformedBody,
    ThemePathMissing,
    BundledTheme,
    Config,
    HttpClient,
    Json,
    Io,
}

impl ErrorKind {
    /// Stable identifier used in rendered reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation_error",
            Self::TargetConnection => "target_connection_error",
            Self::TargetTimeout => "target_timeout",
            Self::NastyTarget => "nasty_target",
            Self::TargetNotFound => "target_not_found",
            Self::TargetInternalServerError => "target_internal_server_error",
            Self::MalformedBody => "malformed_body",
            Self::ThemePathMissing => "theme_path_missing",
            Self::BundledTheme => "bundled_theme",
            Self::Config => "config_error",
            Self::HttpClient => "http_client_error",
            Self::Json => "json_error",
            Self::Io => "io_error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WpokeError {
    /// Returns the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::TargetConnection { .. } => ErrorKind::TargetConnection,
            Self::TargetTimeout { .. } => ErrorKind::TargetTimeout,
            Self::NastyTarget { .. } => ErrorKind::NastyTarget,
            Self::TargetNotFound { .. } => ErrorKind::TargetNotFound,
            Self::TargetInternalServerError { .. } => ErrorKind::TargetInternalServerError,
            Self::MalformedBody { .. } => ErrorKind::MalformedBody,
            Self::ThemePathMissing { .. } => ErrorKind::ThemePathMissing,
            Self::BundledTheme => ErrorKind::BundledTheme,
            Self::Config(_) => ErrorKind::Config,
            Self::HttpClient(_) => ErrorKind::HttpClient,
            Self::Json(_) => ErrorKind::Json,
            Self::Io(_) => ErrorKind::Io,
        }
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

/// Target URL validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("An URL is required")]
    Empty,

    #[error("URL is invalid: {0}")]
    Malformed(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,

    #[error("Invalid host name: {0}")]
    InvalidHost(String),

    #[error("Invalid IP address: {0} is not globally routable")]
    ForbiddenAddress(std::net::IpAddr),

    #[error("Same origin violated: {0} and {1}")]
    SameOriginViolated(String, String),
}

/// Result type alias for wpoke operations
pub type Result<T> = std::result::Result<T, WpokeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL validation
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

// Re-export commonly used types
pub use config::{Config, CrawlConfig};
pub use crawler::{crawl, ThemeCrawler};
pub use theme::ThemeMetadata;
pub use url::{is_same_origin, validate_url};
