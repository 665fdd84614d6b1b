//! Configuration module for wpoke
//!
//! This module holds the typed per-crawl configuration and loads optional
//! TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use wpoke::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("wpoke.toml")).unwrap();
//! println!("Requests follow at most {} redirects", config.http.max_redirects);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlConfig, OutputConfig, DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, validate_crawl_config};
