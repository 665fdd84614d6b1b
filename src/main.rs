//! wpoke main entry point
//!
//! This is the command-line interface for the wpoke WordPress information
//! gathering tool.

use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wpoke::config::{load_config_with_hash, validate_crawl_config, Config};
use wpoke::finger::{Finger, FingerRegistry, Hand};
use wpoke::output::{render, OutputFormat};

/// wpoke: WordPress information gathering tool
///
/// Pokes a site believed to run WordPress and reports what the enabled
/// fingers find. Results go to stdout, logs to stderr.
#[derive(Parser, Debug)]
#[command(name = "wpoke")]
#[command(version)]
#[command(about = "WordPress information gathering tool", long_about = None)]
struct Cli {
    /// Target WordPress site. Can be any URL
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// User agent to use
    #[arg(short, long)]
    user_agent: Option<String>,

    /// Timeout in seconds for every request
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<u64>,

    /// Max redirects followed by each request
    #[arg(short = 'r', long)]
    max_redirects: Option<usize>,

    /// Do not verify TLS certificates
    #[arg(long)]
    insecure: bool,

    /// Output format {json|cli}
    #[arg(short, long)]
    format: Option<String>,

    /// Display themes information
    #[arg(short = 't', long)]
    theme: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Fingers explicitly requested through their flags
    fn selected_fingers(&self) -> Vec<String> {
        Finger::ALL
            .iter()
            .filter(|finger| match finger {
                Finger::Theme => self.theme,
            })
            .map(|finger| finger.name().to_string())
            .collect()
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    apply_overrides(&cli, &mut config)?;

    let format = config
        .output
        .format
        .parse::<OutputFormat>()
        .context("Invalid output format")?;

    let registry = select_fingers(&cli)?;
    tracing::debug!("Loaded fingers: {}", registry.names().join(", "));

    let hand = Hand::new(registry, config.http);
    let result = hand.poke(&cli.url).await;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    render(&result, format, &mut handle).context("Failed to render result")?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wpoke=info,warn"),
            1 => EnvFilter::new("wpoke=debug,info"),
            2 => EnvFilter::new("wpoke=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command line flags win over file values
fn apply_overrides(cli: &Cli, config: &mut Config) -> anyhow::Result<()> {
    if let Some(user_agent) = &cli.user_agent {
        config.http.user_agent = user_agent.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.http.timeout = Duration::from_secs(timeout);
    }
    if let Some(max_redirects) = cli.max_redirects {
        config.http.max_redirects = max_redirects;
    }
    if cli.insecure {
        tracing::warn!("TLS certificate validation is disabled");
        config.http.ssl_enabled = false;
    }
    if let Some(format) = &cli.format {
        config.output.format = format.clone();
    }

    validate_crawl_config(&config.http).context("Invalid command line options")?;
    Ok(())
}

/// Runs only the flagged fingers, or all of them when none is flagged
fn select_fingers(cli: &Cli) -> anyhow::Result<FingerRegistry> {
    let registry = FingerRegistry::with_defaults();
    let selected = cli.selected_fingers();

    if selected.is_empty() {
        return Ok(registry);
    }
    Ok(registry.select(&selected)?)
}
