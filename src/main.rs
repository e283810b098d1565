//! Suite entry point.
//!
//! Runs the scenario suite against a chromedriver discovered on `PATH` and
//! exits 0 iff every scenario passes.
//!
//! Usage:
//!   selenium-dev-e2e [FILTER] [--headless] [--debug]
//!
//! `FILTER` selects scenarios whose name contains the given substring.

// ============================================================================
// Imports
// ============================================================================

use tracing_subscriber::EnvFilter;

use selenium_dev_e2e::{ChromeOptions, Driver, harness, scenarios};

// ============================================================================
// Types
// ============================================================================

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
struct Args {
    /// Raise the log filter to debug.
    debug: bool,
    /// Run Chrome headless.
    headless: bool,
    /// Substring filter over scenario names.
    filter: Option<String>,
}

impl Args {
    /// Parses command-line arguments.
    fn parse() -> Self {
        let mut args = Self::default();
        for arg in std::env::args().skip(1) {
            match arg.as_str() {
                "--debug" => args.debug = true,
                "--headless" => args.headless = true,
                other => args.filter = Some(other.to_string()),
            }
        }
        args
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Initializes tracing/logging.
fn init_logging(debug: bool) {
    let filter = if debug {
        "selenium_dev_e2e=debug"
    } else {
        "selenium_dev_e2e=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logging(args.debug);

    let mut options = ChromeOptions::new();
    if args.headless {
        options = options.with_headless();
    }

    let driver = match Driver::builder().options(options).build() {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("ABORT: {e}");
            std::process::exit(1);
        }
    };

    let suite: Vec<_> = match &args.filter {
        Some(filter) => scenarios::all()
            .into_iter()
            .filter(|s| s.name().contains(filter.as_str()))
            .collect(),
        None => scenarios::all(),
    };

    if suite.is_empty() {
        eprintln!("No scenario matches the given filter");
        std::process::exit(1);
    }

    let report = harness::run_suite(&driver, &suite).await;
    println!("{}", report.summary());
    std::process::exit(report.exit_code());
}
