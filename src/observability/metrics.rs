//! Metrics for the sheet analysis service.
//!
//! Names follow Prometheus conventions and live in one catalog enum so the
//! recording helpers never spell out magic strings.

use std::fmt;
use std::sync::OnceLock;

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Enum representing all metric names used in the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Sheet source metrics
    SheetsFetchSuccess,
    SheetsFetchError,
    SheetsFetchDuration,
    SheetsPayloadBytes,

    // Analyzer metrics
    AnalyzerReportsGenerated,
    AnalyzerIssuesDetected,
    AnalyzerQualityScore,
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::SheetsFetchSuccess => "sheetcheck_sheets_fetch_success_total",
            MetricName::SheetsFetchError => "sheetcheck_sheets_fetch_error_total",
            MetricName::SheetsFetchDuration => "sheetcheck_sheets_fetch_duration_seconds",
            MetricName::SheetsPayloadBytes => "sheetcheck_sheets_payload_bytes",
            MetricName::AnalyzerReportsGenerated => "sheetcheck_analyzer_reports_total",
            MetricName::AnalyzerIssuesDetected => "sheetcheck_analyzer_issues_total",
            MetricName::AnalyzerQualityScore => "sheetcheck_analyzer_quality_score",
        }
    }
}

static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Call once at startup, before any metric
/// is recorded.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;
    PROMETHEUS_HANDLE.set(handle).ok();
    info!("Metrics system initialized");
    Ok(())
}

/// Render the current metrics in Prometheus text format
pub fn render() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|handle| handle.render())
}

pub mod sheets {
    use super::MetricName;

    /// Record a successful sheet fetch
    pub fn fetch_success() {
        ::metrics::counter!(MetricName::SheetsFetchSuccess.as_str()).increment(1);
    }

    /// Record a failed sheet fetch
    pub fn fetch_error() {
        ::metrics::counter!(MetricName::SheetsFetchError.as_str()).increment(1);
    }

    /// Record fetch duration
    pub fn fetch_duration(secs: f64) {
        ::metrics::histogram!(MetricName::SheetsFetchDuration.as_str()).record(secs);
    }

    /// Record fetched payload size
    pub fn payload_bytes(bytes: usize) {
        ::metrics::histogram!(MetricName::SheetsPayloadBytes.as_str()).record(bytes as f64);
    }
}

pub mod analyzer {
    use super::MetricName;

    /// Record a completed quality report
    pub fn report_generated() {
        ::metrics::counter!(MetricName::AnalyzerReportsGenerated.as_str()).increment(1);
    }

    /// Record one detected issue, labelled by kind and severity
    pub fn issue_detected(kind: &str, severity: &str) {
        ::metrics::counter!(
            MetricName::AnalyzerIssuesDetected.as_str(),
            "kind" => kind.to_string(),
            "severity" => severity.to_string(),
        )
        .increment(1);
    }

    /// Record the quality score of a report
    pub fn score_recorded(score: f64) {
        ::metrics::histogram!(MetricName::AnalyzerQualityScore.as_str()).record(score);
    }
}
