//! Scenario runner and suite reporting.
//!
//! Each scenario runs against a fresh session: the runner opens one in
//! setup, executes the body, and closes it in teardown on every path. A
//! scenario fails fast on its first failed assertion or driver error.
//! Scenarios share nothing and run sequentially.
//!
//! Per-scenario state machine: `Init → Open → Active → Closing → Closed`,
//! where `Active → Closing` is taken on success and on every failure alike.
//!
//! Outcome classification:
//!
//! | Outcome | Trigger |
//! |---------|---------|
//! | `Passed` | body returned `Ok` |
//! | `Failed` | [`Error::Assertion`] |
//! | `Errored` | any other error (infrastructure) |
//!
//! An [`Error::Environment`] from session setup aborts the remaining run:
//! the driver cannot be launched, so no later scenario could do better.

// ============================================================================
// Submodules
// ============================================================================

/// Assertion vocabulary.
pub mod check;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use futures_util::future::BoxFuture;
use tracing::{debug, warn};

use crate::driver::Driver;
use crate::error::Result;
use crate::session::Session;

// ============================================================================
// Scenario
// ============================================================================

/// Scenario body: borrows the session for the duration of the run.
pub type ScenarioFn = for<'a> fn(&'a Session) -> BoxFuture<'a, Result<()>>;

/// One independent end-to-end test case.
#[derive(Clone)]
pub struct Scenario {
    /// Scenario name, used in the report.
    name: &'static str,
    /// Scenario body.
    run: ScenarioFn,
}

impl Scenario {
    /// Creates a scenario from a name and body.
    #[inline]
    #[must_use]
    pub fn new(name: &'static str, run: ScenarioFn) -> Self {
        Self { name, run }
    }

    /// Returns the scenario name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario").field("name", &self.name).finish()
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// How a single scenario ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioStatus {
    /// Every assertion held.
    Passed,
    /// An assertion did not hold; carries the structured diff.
    Failed(String),
    /// An infrastructure error: driver, navigation, timeout, wire.
    Errored(String),
}

impl ScenarioStatus {
    /// Returns `true` for [`ScenarioStatus::Passed`].
    #[inline]
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

/// One scenario's reported outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Scenario name.
    pub name: &'static str,
    /// How it ended.
    pub status: ScenarioStatus,
}

impl Outcome {
    /// Formats the single report line for this outcome.
    #[must_use]
    pub fn line(&self) -> String {
        match &self.status {
            ScenarioStatus::Passed => format!("PASS  {}", self.name),
            ScenarioStatus::Failed(detail) => format!("FAIL  {}: {detail}", self.name),
            ScenarioStatus::Errored(detail) => format!("ERROR {}: {detail}", self.name),
        }
    }
}

// ============================================================================
// SuiteReport
// ============================================================================

/// Aggregated result of a suite run.
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    /// Outcomes in execution order.
    pub outcomes: Vec<Outcome>,
    /// Set when the run stopped early on an environment failure.
    pub aborted: Option<String>,
}

impl SuiteReport {
    /// Returns `true` iff every scenario passed and the run completed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.aborted.is_none() && self.outcomes.iter().all(|o| o.status.is_passed())
    }

    /// Returns the process exit code for this report: 0 iff all passed.
    #[inline]
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.all_passed())
    }

    /// Returns the count of passed scenarios.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_passed()).count()
    }

    /// Formats the one-line suite summary.
    #[must_use]
    pub fn summary(&self) -> String {
        let total = self.outcomes.len();
        let passed = self.passed();
        match &self.aborted {
            Some(reason) => format!("{passed}/{total} passed; run aborted: {reason}"),
            None => format!("{passed}/{total} passed"),
        }
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Runs the scenarios sequentially, printing one report line per scenario.
///
/// Teardown totality: every successfully opened session is closed exactly
/// once, whatever the scenario body did.
pub async fn run_suite(driver: &Driver, scenarios: &[Scenario]) -> SuiteReport {
    let mut report = SuiteReport::default();

    for scenario in scenarios {
        debug!(scenario = scenario.name, "Opening session");

        let session = match driver.open().await {
            Ok(session) => session,
            Err(e) if e.is_environment() => {
                warn!(scenario = scenario.name, error = %e, "Aborting run");
                eprintln!("ABORT {}: {e}", scenario.name);
                report.aborted = Some(e.to_string());
                break;
            }
            Err(e) => {
                let outcome = Outcome {
                    name: scenario.name,
                    status: ScenarioStatus::Errored(e.to_string()),
                };
                println!("{}", outcome.line());
                report.outcomes.push(outcome);
                continue;
            }
        };

        let result = (scenario.run)(&session).await;

        // Teardown runs on every path and never raises.
        session.close().await;

        let status = classify(result);
        let outcome = Outcome {
            name: scenario.name,
            status,
        };
        println!("{}", outcome.line());
        report.outcomes.push(outcome);
    }

    report
}

/// Classifies a scenario body result into a reportable status.
fn classify(result: Result<()>) -> ScenarioStatus {
    match result {
        Ok(()) => ScenarioStatus::Passed,
        Err(e) if e.is_assertion() => ScenarioStatus::Failed(e.to_string()),
        Err(e) => ScenarioStatus::Errored(e.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::error::Error;

    fn outcome(name: &'static str, status: ScenarioStatus) -> Outcome {
        Outcome { name, status }
    }

    #[test]
    fn test_classify_ok_is_passed() {
        assert_eq!(classify(Ok(())), ScenarioStatus::Passed);
    }

    #[test]
    fn test_classify_assertion_is_failed() {
        let status = classify(Err(Error::assertion("title", "Selenium", "nope")));
        assert!(matches!(status, ScenarioStatus::Failed(_)));
    }

    #[test]
    fn test_classify_driver_error_is_errored() {
        let status = classify(Err(Error::timeout("navigate", 30_000)));
        assert!(matches!(status, ScenarioStatus::Errored(_)));

        let status = classify(Err(Error::element_not_found("class \"DocSearch-Modal\"")));
        assert!(matches!(status, ScenarioStatus::Errored(_)));
    }

    #[test]
    fn test_outcome_lines() {
        assert_eq!(
            outcome("homepage_url", ScenarioStatus::Passed).line(),
            "PASS  homepage_url"
        );
        assert_eq!(
            outcome("homepage_title", ScenarioStatus::Failed("boom".into())).line(),
            "FAIL  homepage_title: boom"
        );
        assert_eq!(
            outcome("documentation_link", ScenarioStatus::Errored("down".into())).line(),
            "ERROR documentation_link: down"
        );
    }

    #[test]
    fn test_report_exit_codes() {
        let mut report = SuiteReport::default();
        report.outcomes.push(outcome("a", ScenarioStatus::Passed));
        assert!(report.all_passed());
        assert_eq!(report.exit_code(), 0);

        report
            .outcomes
            .push(outcome("b", ScenarioStatus::Failed("x".into())));
        assert!(!report.all_passed());
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn test_aborted_report_never_passes() {
        let mut report = SuiteReport::default();
        report.outcomes.push(outcome("a", ScenarioStatus::Passed));
        report.aborted = Some("chromedriver not found".into());
        assert!(!report.all_passed());
        assert_eq!(report.summary(), "1/1 passed; run aborted: chromedriver not found");
    }

    #[test]
    fn test_summary_counts() {
        let mut report = SuiteReport::default();
        report.outcomes.push(outcome("a", ScenarioStatus::Passed));
        report
            .outcomes
            .push(outcome("b", ScenarioStatus::Errored("x".into())));
        assert_eq!(report.summary(), "1/2 passed");
    }
}
