use serde::{Deserialize, Serialize};

use crate::pipeline::processing::quality::QualityReport;

/// A spreadsheet as a header list plus a row-major grid of string cells.
///
/// Rows are not required to match the header length: ragged rows are kept
/// verbatim and the analyzer ignores cells beyond the header count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SheetTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }
}

/// Request body for `POST /api/sheets/analyze`
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

/// Response payload: the fetched table plus its quality report
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeResponse {
    pub data: SheetTable,
    pub quality: QualityReport,
}
