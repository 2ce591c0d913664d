use tracing::info;

use crate::app::ports::SheetSourcePort;
use crate::domain::AnalyzeResponse;
use crate::error::Result;
use crate::pipeline::processing::quality::QualityAnalyzer;

/// Use case for fetching a sheet and producing its quality report
pub struct AnalyzeSheetUseCase {
    source: Box<dyn SheetSourcePort>,
    analyzer: QualityAnalyzer,
}

impl AnalyzeSheetUseCase {
    pub fn new(source: Box<dyn SheetSourcePort>, analyzer: QualityAnalyzer) -> Self {
        Self { source, analyzer }
    }

    /// Create a use case with the default analyzer policy
    pub fn with_default_analyzer(source: Box<dyn SheetSourcePort>) -> Self {
        Self {
            source,
            analyzer: QualityAnalyzer::new(),
        }
    }

    /// Fetch the document behind `url` and analyze it.
    pub async fn analyze_url(&self, url: &str) -> Result<AnalyzeResponse> {
        let table = self.source.fetch(url).await?;
        let report = self.analyzer.analyze(&table);

        info!(
            rows = report.total_rows,
            columns = report.total_columns,
            issues = report.issues.len(),
            score = report.score,
            "sheet analyzed"
        );

        crate::observability::metrics::analyzer::report_generated();
        crate::observability::metrics::analyzer::score_recorded(report.score as f64);
        for issue in &report.issues {
            crate::observability::metrics::analyzer::issue_detected(
                &format!("{:?}", issue.kind),
                &format!("{:?}", issue.severity),
            );
        }

        Ok(AnalyzeResponse {
            data: table,
            quality: report,
        })
    }
}
