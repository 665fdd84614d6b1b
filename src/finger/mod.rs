//! Detectors ("fingers") that can poke a target
//!
//! Every detector is a variant of [`Finger`] and is registered explicitly in
//! a [`FingerRegistry`]. A [`Hand`] runs the registered fingers against one
//! target and records how each of them went.

mod hand;
mod registry;

pub use hand::{FingerFailure, FingerResult, Hand, HandResult};
pub use registry::FingerRegistry;

use crate::config::CrawlConfig;
use crate::crawler::crawl;
use crate::Result;
use thiserror::Error;

/// Registry errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FingerError {
    #[error("{0} is already registered")]
    Duplicated(String),

    #[error("Unknown finger: {0}")]
    Unknown(String),
}

/// A detector runnable against a target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    /// Theme detection through `style.css` headers
    Theme,
}

impl Finger {
    /// Every available finger
    pub const ALL: [Finger; 1] = [Finger::Theme];

    /// Default registration name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Theme => "theme",
        }
    }

    /// One-line description shown in CLI help
    pub fn help_text(&self) -> &'static str {
        match self {
            Self::Theme => "Display themes information",
        }
    }

    /// Pokes the target and returns the finger's findings as JSON
    pub async fn run(&self, target: &str, config: &CrawlConfig) -> Result<serde_json::Value> {
        match self {
            Self::Theme => {
                let themes = crawl(target, config).await?;
                Ok(serde_json::to_value(themes)?)
            }
        }
    }
}
