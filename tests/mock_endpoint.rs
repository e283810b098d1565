//! Harness wiring tests against a mock W3C endpoint.
//!
//! These tests exercise the facade, the runner, and the waits without a real
//! browser: a wiremock server plays the chromedriver role, and the driver is
//! attached to it via `server_url`.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use futures_util::future::BoxFuture;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use selenium_dev_e2e::harness::{self, Scenario, ScenarioStatus, check};
use selenium_dev_e2e::{By, Driver, Error, Session, Timeouts, wait};

// ============================================================================
// Helpers
// ============================================================================

const SESSION_ID: &str = "sess-1";
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Wraps a payload in the W3C success envelope.
fn ok(value: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "value": value }))
}

/// Builds a W3C error response.
fn w3c_error(status: u16, code: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "value": { "error": code, "message": message, "stacktrace": "" }
    }))
}

/// Mounts session creation and expects exactly one session deletion.
async fn mount_session_lifecycle(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/session"))
        .and(body_partial_json(json!({
            "capabilities": { "alwaysMatch": { "browserName": "chrome" } }
        })))
        .respond_with(ok(json!({ "sessionId": SESSION_ID, "capabilities": {} })))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(format!("/session/{SESSION_ID}")))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(server)
        .await;
}

/// Opens a session attached to the mock endpoint.
async fn open_session(server: &MockServer) -> Result<Session> {
    let session = Driver::builder()
        .server_url(server.uri())
        .build()?
        .open()
        .await?;
    Ok(session)
}

fn session_route(suffix: &str) -> String {
    format!("/session/{SESSION_ID}{suffix}")
}

// ============================================================================
// Facade Wiring
// ============================================================================

#[tokio::test]
async fn facade_drives_w3c_commands() -> Result<()> {
    let server = MockServer::start().await;
    mount_session_lifecycle(&server).await;

    Mock::given(method("POST"))
        .and(path(session_route("/url")))
        .and(body_partial_json(json!({ "url": "https://www.selenium.dev/" })))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_route("/url")))
        .respond_with(ok(json!("https://www.selenium.dev/")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_route("/title")))
        .respond_with(ok(json!("Selenium")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_route("/element")))
        .and(body_partial_json(json!({
            "using": "link text",
            "value": "Documentation"
        })))
        .respond_with(ok(json!({ ELEMENT_KEY: "el-7" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_route("/element/el-7/click")))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_route("/element/el-7/displayed")))
        .respond_with(ok(json!(true)))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_route("/window/maximize")))
        .respond_with(ok(json!(null)))
        .mount(&server)
        .await;

    let session = open_session(&server).await?;

    session.goto("https://www.selenium.dev/").await?;
    assert_eq!(session.current_url().await?, "https://www.selenium.dev/");
    assert_eq!(session.title().await?, "Selenium");

    let link = session.find(By::link_text("Documentation")).await?;
    assert_eq!(link.id().as_str(), "el-7");
    link.click().await?;
    assert!(link.is_displayed().await?);

    session.maximize().await?;
    session.close().await;

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn find_maps_not_found_to_locator_description() -> Result<()> {
    let server = MockServer::start().await;
    mount_session_lifecycle(&server).await;

    Mock::given(method("POST"))
        .and(path(session_route("/element")))
        .respond_with(w3c_error(404, "no such element", "no such element: nothing"))
        .mount(&server)
        .await;

    let session = open_session(&server).await?;
    let err = session.find(By::class("DocSearch-Modal")).await.unwrap_err();

    assert!(matches!(err, Error::ElementNotFound { .. }));
    assert_eq!(
        err.to_string(),
        "Element not found: class \"DocSearch-Modal\""
    );

    session.close().await;
    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn per_call_timeout_surfaces_as_timeout_error() -> Result<()> {
    let server = MockServer::start().await;
    mount_session_lifecycle(&server).await;

    Mock::given(method("POST"))
        .and(path(session_route("/element")))
        .respond_with(ok(json!({ ELEMENT_KEY: "el-1" })).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let session = Driver::builder()
        .server_url(server.uri())
        .timeouts(Timeouts::default().with_find(Duration::from_millis(200)))
        .build()?
        .open()
        .await?;

    let err = session.find(By::id("docsearch-input")).await.unwrap_err();
    assert!(err.is_timeout());

    session.close().await;
    server.verify().await;
    Ok(())
}

// ============================================================================
// Absence Assertion
// ============================================================================

#[tokio::test]
async fn absent_treats_not_found_as_success() -> Result<()> {
    let server = MockServer::start().await;
    mount_session_lifecycle(&server).await;

    Mock::given(method("POST"))
        .and(path(session_route("/element")))
        .and(body_partial_json(json!({ "value": ".DocSearch-Modal" })))
        .respond_with(w3c_error(404, "no such element", "no match"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_route("/element")))
        .and(body_partial_json(json!({ "value": ".DocSearch-Button-Container" })))
        .respond_with(ok(json!({ ELEMENT_KEY: "el-2" })))
        .mount(&server)
        .await;

    let session = open_session(&server).await?;

    // Missing element: absence holds.
    check::absent(&session, By::class("DocSearch-Modal")).await?;

    // Present element: absence is a failed assertion, not an error.
    let err = check::absent(&session, By::class("DocSearch-Button-Container"))
        .await
        .unwrap_err();
    assert!(err.is_assertion());

    session.close().await;
    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn absent_propagates_unrelated_errors() -> Result<()> {
    let server = MockServer::start().await;
    mount_session_lifecycle(&server).await;

    Mock::given(method("POST"))
        .and(path(session_route("/element")))
        .respond_with(w3c_error(500, "unknown error", "browser crashed"))
        .mount(&server)
        .await;

    let session = open_session(&server).await?;
    let err = check::absent(&session, By::class("DocSearch-Modal"))
        .await
        .unwrap_err();

    // Must not be masked as a passing absence or a failed assertion.
    assert!(matches!(err, Error::Wire { .. }));

    session.close().await;
    server.verify().await;
    Ok(())
}

// ============================================================================
// Window Handling
// ============================================================================

#[tokio::test]
async fn new_window_is_identified_by_difference_not_index() -> Result<()> {
    let server = MockServer::start().await;
    mount_session_lifecycle(&server).await;

    // First read: one handle. Later reads: two, with the new one FIRST, so
    // index-based selection would pick the wrong window.
    Mock::given(method("GET"))
        .and(path(session_route("/window/handles")))
        .respond_with(ok(json!(["w-1"])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(session_route("/window/handles")))
        .respond_with(ok(json!(["w-2", "w-1"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(session_route("/window")))
        .and(body_partial_json(json!({ "handle": "w-2" })))
        .respond_with(ok(json!(null)))
        .expect(1)
        .mount(&server)
        .await;

    let session = open_session(&server).await?;

    let before = session.window_handles().await?;
    assert_eq!(before.len(), 1);

    let after = wait::settle_on_window_count(&session, 2).await?;
    assert_eq!(after.len(), 2);

    let new_handle = after
        .iter()
        .find(|&handle| !before.contains(handle))
        .expect("new handle present");
    session.switch_to_window(new_handle).await?;

    session.close().await;
    server.verify().await;
    Ok(())
}

// ============================================================================
// Runner
// ============================================================================

fn failing_title(session: &Session) -> BoxFuture<'_, selenium_dev_e2e::Result<()>> {
    Box::pin(async move {
        let title = session.title().await?;
        check::eq("page title", "Selenium", title.as_str())
    })
}

#[tokio::test]
async fn teardown_runs_after_scenario_failure() -> Result<()> {
    let server = MockServer::start().await;
    // mount_session_lifecycle expects exactly one DELETE; a failing scenario
    // must still produce it.
    mount_session_lifecycle(&server).await;

    Mock::given(method("GET"))
        .and(path(session_route("/title")))
        .respond_with(ok(json!("Not Selenium")))
        .mount(&server)
        .await;

    let driver = Driver::builder().server_url(server.uri()).build()?;
    let report =
        harness::run_suite(&driver, &[Scenario::new("failing_title", failing_title)]).await;

    assert_eq!(report.outcomes.len(), 1);
    assert!(matches!(
        report.outcomes[0].status,
        ScenarioStatus::Failed(_)
    ));
    assert_eq!(report.exit_code(), 1);

    server.verify().await;
    Ok(())
}

#[tokio::test]
async fn refused_session_aborts_the_run() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/session"))
        .respond_with(w3c_error(500, "session not created", "chrome not found"))
        .mount(&server)
        .await;

    let driver = Driver::builder().server_url(server.uri()).build()?;
    let report = harness::run_suite(
        &driver,
        &[
            Scenario::new("first", failing_title),
            Scenario::new("second", failing_title),
        ],
    )
    .await;

    // Environment failure: nothing ran, nothing more was attempted.
    assert!(report.outcomes.is_empty());
    assert!(report.aborted.is_some());
    assert_eq!(report.exit_code(), 1);
    Ok(())
}
