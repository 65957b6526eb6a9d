//! Dependency health checks
//!
//! Each downstream client exposes a [`Checker`] that probes its `/health`
//! endpoint. [`HealthCheck`] runs every registered checker on an interval and
//! serves the aggregated report on `GET /health`.
//!
//! A dependency that fails is reported as WARNING until it has been failing for
//! longer than the critical timeout, after which the service reports CRITICAL.
//! A probe that gets no answer within its timeout counts as a failure.

use crate::prelude::*;
use axum::http::StatusCode;
use chrono::{DateTime, TimeDelta, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Upper bound for a single probe; [`HealthCheck::add_check`] lowers it to the
/// check interval when that is shorter
pub const DEFAULT_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Ok,
    Warning,
    Critical,
}

impl Status {
    pub fn status_code(self) -> StatusCode {
        match self {
            Status::Ok => StatusCode::OK,
            Status::Warning => StatusCode::TOO_MANY_REQUESTS,
            Status::Critical => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Probes a single dependency's health endpoint
#[derive(Debug, Clone)]
pub struct Checker {
    http: reqwest::Client,
    url: String,
    timeout: Duration,
}

/// Outcome of one probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub status: Status,
    pub status_code: Option<u16>,
    pub message: String,
}

impl Checker {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            url: f!("{}/health", base_url.trim_end_matches('/')),
            timeout: DEFAULT_CHECK_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn check(&self) -> CheckResult {
        match self.http.get(&self.url).timeout(self.timeout).send().await {
            Ok(response) => {
                let code = response.status();
                let status = match code {
                    StatusCode::OK => Status::Ok,
                    StatusCode::TOO_MANY_REQUESTS => Status::Warning,
                    _ => Status::Critical,
                };
                let message = match status {
                    Status::Ok => "is ok".to_string(),
                    Status::Warning => {
                        "is degraded, but at least partially functioning".to_string()
                    }
                    Status::Critical => f!("invalid response status {}", code.as_u16()),
                };
                CheckResult {
                    status,
                    status_code: Some(code.as_u16()),
                    message,
                }
            }
            Err(e) if e.is_timeout() => CheckResult {
                status: Status::Critical,
                status_code: None,
                message: f!("no response from {} within {:?}", self.url, self.timeout),
            },
            Err(e) => CheckResult {
                status: Status::Critical,
                status_code: None,
                message: f!("failed to reach {}: {}", self.url, e),
            },
        }
    }
}

/// Last known state of a registered check
#[derive(Debug, Clone, Serialize)]
pub struct CheckState {
    pub name: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub message: String,
    pub last_checked: Option<DateTime<Utc>>,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
}

impl CheckState {
    fn pending(name: &str) -> Self {
        Self {
            name: name.to_string(),
            status: Status::Warning,
            status_code: None,
            message: "check has not run yet".to_string(),
            last_checked: None,
            last_success: None,
            last_failure: None,
        }
    }

    fn record(&mut self, result: CheckResult, now: DateTime<Utc>) {
        if result.status == Status::Ok {
            self.last_success = Some(now);
        } else {
            self.last_failure = Some(now);
        }
        self.status = result.status;
        self.status_code = result.status_code;
        self.message = result.message;
        self.last_checked = Some(now);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub build_time: String,
    pub git_commit: String,
    pub language: String,
    pub version: String,
}

impl VersionInfo {
    /// Version details baked in at compile time
    pub fn from_build_env() -> Self {
        Self {
            build_time: option_env!("BUILD_TIME").unwrap_or_default().to_string(),
            git_commit: option_env!("GIT_COMMIT").unwrap_or_default().to_string(),
            language: "rust".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: Status,
    pub version: VersionInfo,
    pub uptime_ms: i64,
    pub start_time: DateTime<Utc>,
    pub checks: Vec<CheckState>,
}

/// Registry of dependency checks and their latest results
#[derive(Debug, Clone)]
pub struct HealthCheck {
    version: VersionInfo,
    start_time: DateTime<Utc>,
    interval: Duration,
    critical_timeout: TimeDelta,
    checkers: Vec<(String, Checker)>,
    states: Arc<RwLock<HashMap<String, CheckState>>>,
}

impl HealthCheck {
    pub fn new(version: VersionInfo, interval: Duration, critical_timeout: Duration) -> Self {
        Self {
            version,
            start_time: Utc::now(),
            interval,
            critical_timeout: TimeDelta::from_std(critical_timeout).unwrap_or(TimeDelta::MAX),
            checkers: Vec::new(),
            states: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a dependency check; names must be unique
    ///
    /// A probe never outlives the check interval, so one unresponsive dependency
    /// cannot stall the next round.
    pub fn add_check(&mut self, name: &str, checker: Checker) -> Result<(), Error> {
        if self.checkers.iter().any(|(existing, _)| existing == name) {
            return Err(Error::HealthCheck(f!("check already registered: {name}")));
        }
        let timeout = checker.timeout.min(self.interval);
        self.checkers.push((name.to_string(), checker.with_timeout(timeout)));
        Ok(())
    }

    /// Spawn the background task that runs every check on the interval
    ///
    /// The first round runs immediately.
    pub fn start(&self) -> JoinHandle<()> {
        let health = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(health.interval);
            loop {
                ticker.tick().await;
                health.run_checks().await;
            }
        })
    }

    /// Run every registered check once and store the results
    pub async fn run_checks(&self) {
        let results = join_all(self.checkers.iter().map(|(name, checker)| async move {
            let result = checker.check().await;
            if result.status != Status::Ok {
                log::warn!(
                    "health check {} reported {:?}: {}",
                    name,
                    result.status,
                    result.message
                );
            }
            (name.clone(), result)
        }))
        .await;

        let now = Utc::now();
        let mut states = self.states.write().await;
        for (name, result) in results {
            states
                .entry(name.clone())
                .or_insert_with(|| CheckState::pending(&name))
                .record(result, now);
        }
    }

    pub async fn report(&self) -> HealthReport {
        self.report_at(Utc::now()).await
    }

    async fn report_at(&self, now: DateTime<Utc>) -> HealthReport {
        let states = self.states.read().await;
        let checks: Vec<CheckState> = self
            .checkers
            .iter()
            .map(|(name, _)| {
                states
                    .get(name)
                    .cloned()
                    .unwrap_or_else(|| CheckState::pending(name))
            })
            .collect();

        let status = checks
            .iter()
            .map(|check| effective_status(check, now, self.start_time, self.critical_timeout))
            .max()
            .unwrap_or(Status::Ok);

        HealthReport {
            status,
            version: self.version.clone(),
            uptime_ms: (now - self.start_time).num_milliseconds(),
            start_time: self.start_time,
            checks,
        }
    }
}

/// A critical check only counts as critical once it has been failing for longer
/// than the critical timeout
fn effective_status(
    check: &CheckState,
    now: DateTime<Utc>,
    start_time: DateTime<Utc>,
    critical_timeout: TimeDelta,
) -> Status {
    match check.status {
        Status::Critical => {
            let healthy_since = check.last_success.unwrap_or(start_time);
            if now - healthy_since > critical_timeout {
                Status::Critical
            } else {
                Status::Warning
            }
        }
        status => status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_health(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;
        server
    }

    fn health_check() -> HealthCheck {
        HealthCheck::new(
            VersionInfo::from_build_env(),
            Duration::from_secs(30),
            Duration::from_secs(90),
        )
    }

    fn critical_state(last_success: Option<DateTime<Utc>>) -> CheckState {
        CheckState {
            status: Status::Critical,
            last_success,
            ..CheckState::pending("dep")
        }
    }

    #[tokio::test]
    async fn test_checker_ok() {
        let server = mock_health(200).await;
        let checker = Checker::new(reqwest::Client::new(), &server.uri());
        let result = checker.check().await;
        assert_eq!(result.status, Status::Ok);
        assert_eq!(result.status_code, Some(200));
    }

    #[tokio::test]
    async fn test_checker_too_many_requests_is_warning() {
        let server = mock_health(429).await;
        let checker = Checker::new(reqwest::Client::new(), &server.uri());
        assert_eq!(checker.check().await.status, Status::Warning);
    }

    #[tokio::test]
    async fn test_checker_server_error_is_critical() {
        let server = mock_health(503).await;
        let checker = Checker::new(reqwest::Client::new(), &server.uri());
        let result = checker.check().await;
        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.message, "invalid response status 503");
    }

    #[tokio::test]
    async fn test_checker_unreachable_is_critical() {
        let checker = Checker::new(reqwest::Client::new(), "http://127.0.0.1:1");
        let result = checker.check().await;
        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.status_code, None);
    }

    #[tokio::test]
    async fn test_checker_unresponsive_is_critical() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(60)))
            .mount(&server)
            .await;

        let checker = Checker::new(reqwest::Client::new(), &server.uri())
            .with_timeout(Duration::from_millis(200));
        let result = checker.check().await;

        assert_eq!(result.status, Status::Critical);
        assert_eq!(result.status_code, None);
        assert!(result.message.starts_with("no response from"));
    }

    #[test]
    fn test_add_check_caps_timeout_at_interval() {
        let mut health = HealthCheck::new(
            VersionInfo::from_build_env(),
            Duration::from_secs(2),
            Duration::from_secs(90),
        );
        health
            .add_check("Search API", Checker::new(reqwest::Client::new(), "http://localhost:1"))
            .unwrap();
        assert_eq!(health.checkers[0].1.timeout, Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_stalled_dependency_escalates_to_critical() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(60)))
            .mount(&server)
            .await;

        let mut health = HealthCheck::new(
            VersionInfo::from_build_env(),
            Duration::from_millis(200),
            Duration::from_secs(1),
        );
        health
            .add_check("Search API", Checker::new(reqwest::Client::new(), &server.uri()))
            .unwrap();

        health.run_checks().await;
        assert_eq!(health.report().await.status, Status::Ok);

        let task = health.start();
        tokio::time::sleep(Duration::from_millis(2500)).await;
        let report = health.report().await;
        task.abort();

        assert_eq!(report.status, Status::Critical);
        assert!(report.checks[0].message.starts_with("no response from"));
    }

    #[test]
    fn test_checker_url_trims_trailing_slash() {
        let checker = Checker::new(reqwest::Client::new(), "http://localhost:20010/");
        assert_eq!(checker.url(), "http://localhost:20010/health");
    }

    #[test]
    fn test_add_check_rejects_duplicate_names() {
        let mut health = health_check();
        let checker = Checker::new(reqwest::Client::new(), "http://localhost:1");
        health.add_check("Search API", checker.clone()).unwrap();
        assert!(health.add_check("Search API", checker).is_err());
    }

    #[tokio::test]
    async fn test_report_without_checks_is_ok() {
        let report = health_check().report().await;
        assert_eq!(report.status, Status::Ok);
        assert!(report.checks.is_empty());
        assert_eq!(report.version.language, "rust");
    }

    #[tokio::test]
    async fn test_report_before_first_run_is_warning() {
        let mut health = health_check();
        health
            .add_check(
                "frontend renderer",
                Checker::new(reqwest::Client::new(), "http://localhost:1"),
            )
            .unwrap();

        let report = health.report().await;
        assert_eq!(report.status, Status::Warning);
        assert_eq!(report.checks[0].name, "frontend renderer");
        assert!(report.checks[0].last_checked.is_none());
    }

    #[tokio::test]
    async fn test_run_checks_aggregates_worst_status() {
        let healthy = mock_health(200).await;
        let degraded = mock_health(429).await;

        let mut health = health_check();
        health
            .add_check(
                "frontend renderer",
                Checker::new(reqwest::Client::new(), &healthy.uri()),
            )
            .unwrap();
        health
            .add_check("Search API", Checker::new(reqwest::Client::new(), &degraded.uri()))
            .unwrap();
        health.run_checks().await;

        let report = health.report().await;
        assert_eq!(report.status, Status::Warning);
        assert_eq!(report.checks[0].status, Status::Ok);
        assert!(report.checks[0].last_success.is_some());
        assert_eq!(report.checks[1].status, Status::Warning);
        assert!(report.checks[1].last_failure.is_some());
    }

    #[test]
    fn test_effective_status_critical_within_timeout_is_warning() {
        let now = Utc::now();
        let start = now - TimeDelta::seconds(300);
        let state = critical_state(Some(now - TimeDelta::seconds(30)));
        assert_eq!(
            effective_status(&state, now, start, TimeDelta::seconds(90)),
            Status::Warning
        );
    }

    #[test]
    fn test_effective_status_critical_past_timeout() {
        let now = Utc::now();
        let start = now - TimeDelta::seconds(300);
        let state = critical_state(Some(now - TimeDelta::seconds(120)));
        assert_eq!(
            effective_status(&state, now, start, TimeDelta::seconds(90)),
            Status::Critical
        );
    }

    #[test]
    fn test_effective_status_never_healthy_uses_start_time() {
        let now = Utc::now();
        let state = critical_state(None);
        assert_eq!(
            effective_status(&state, now, now - TimeDelta::seconds(10), TimeDelta::seconds(90)),
            Status::Warning
        );
        assert_eq!(
            effective_status(&state, now, now - TimeDelta::seconds(100), TimeDelta::seconds(90)),
            Status::Critical
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Status::Ok.status_code(), StatusCode::OK);
        assert_eq!(Status::Warning.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(Status::Critical.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Status::Critical).unwrap(), "\"CRITICAL\"");
    }
}
