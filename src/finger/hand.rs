//! Sequential runner for registered fingers

use crate::config::CrawlConfig;
use crate::finger::FingerRegistry;
use crate::WpokeError;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Why a finger failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FingerFailure {
    /// Stable error identifier, see [`crate::ErrorKind::as_str`]
    pub kind: String,
    pub message: String,
}

impl From<&WpokeError> for FingerFailure {
    fn from(err: &WpokeError) -> Self {
        Self {
            kind: err.kind().as_str().to_string(),
            message: err.to_string(),
        }
    }
}

/// Outcome of one finger
#[derive(Debug, Clone, Serialize)]
pub struct FingerResult {
    pub finger_origin: String,

    /// 0 on success, 1 on failure
    pub status: u8,

    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Seconds between start and finish
    pub runtime: f64,

    pub data: serde_json::Value,
    pub error: Option<FingerFailure>,
}

impl FingerResult {
    /// Returns true if the finger produced data
    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}

/// Outcome of a whole poke
#[derive(Debug, Clone, Serialize)]
pub struct HandResult {
    /// Names of the fingers that ran, sorted
    pub loaded_fingers: Vec<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Wall-clock seconds for the poke
    pub real_runtime: f64,

    /// Sum of finger runtimes
    pub serial_runtime: f64,

    /// Longest finger runtime
    pub parallel_runtime: f64,

    pub pokes: Vec<FingerResult>,
}

fn seconds_between(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> f64 {
    (finished_at - started_at).num_milliseconds().max(0) as f64 / 1000.0
}

/// Runs every registered finger against a target, one after another
pub struct Hand {
    registry: FingerRegistry,
    config: CrawlConfig,
}

impl Hand {
    pub fn new(registry: FingerRegistry, config: CrawlConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &FingerRegistry {
        &self.registry
    }

    /// Pokes `target` with every registered finger
    ///
    /// A failing finger is recorded in its [`FingerResult`] and does not stop
    /// the others.
    pub async fn poke(&self, target: &str) -> HandResult {
        let started_at = Utc::now();
        let mut pokes = Vec::with_capacity(self.registry.len());

        for (name, finger) in self.registry.iter() {
            tracing::debug!("Running finger {} against {}", name, target);
            let finger_started = Utc::now();
            let outcome = finger.run(target, &self.config).await;
            let finger_finished = Utc::now();

            let (status, data, error) = match outcome {
                Ok(data) => (0, data, None),
                Err(e) => {
                    tracing::error!("Finger {} failed: {}", name, e);
                    (1, serde_json::Value::Null, Some(FingerFailure::from(&e)))
                }
            };

            pokes.push(FingerResult {
                finger_origin: name.to_string(),
                status,
                started_at: finger_started,
                finished_at: finger_finished,
                runtime: seconds_between(finger_started, finger_finished),
                data,
                error,
            });
        }

        let finished_at = Utc::now();
        let serial_runtime: f64 = pokes.iter().map(|poke| poke.runtime).sum();
        let parallel_runtime = pokes
            .iter()
            .map(|poke| poke.runtime)
            .fold(0.0_f64, f64::max);

        HandResult {
            loaded_fingers: self.registry.names(),
            started_at,
            finished_at,
            real_runtime: seconds_between(started_at, finished_at),
            serial_runtime,
            parallel_runtime,
            pokes,
        }
    }
}
