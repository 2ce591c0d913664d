use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::SheetTable;

pub mod outliers;

/// Severity levels for quality issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Kinds of quality issues the analyzer can detect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    MissingValue,
    NegativeValue,
    Outlier,
}

/// One detected problem at a specific cell.
///
/// `row` is the 1-based display row number: row 1 is the header row, so the
/// first data row is reported as row 2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub severity: Severity,
    pub row: usize,
    pub column: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: IssueKind,
}

/// Aggregate quality report for one table snapshot.
///
/// Reports carry no timestamps: analyzing the same table twice must produce
/// identical reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    pub score: i64,
    pub total_rows: usize,
    pub total_columns: usize,
    pub clean_rows: usize,
    pub issue_rows: usize,
    pub issues: Vec<QualityIssue>,
}

/// A cell classified once, so checks never re-parse the same string.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty after trimming surrounding whitespace
    Missing,
    /// Trimmed text parses as a finite f64
    Numeric(f64),
    Text,
}

impl CellValue {
    /// Classify a raw cell. Numeric means standard decimal parsing (leading
    /// sign, decimal point, exponent) yielding a finite value; `inf`/`nan`
    /// spellings classify as Text.
    pub fn classify(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Numeric(n),
            _ => CellValue::Text,
        }
    }
}

/// Column-name keywords that mark a column as expected non-negative.
/// Substring match against the lowercased header, not whole-word.
const NON_NEGATIVE_KEYWORDS: &[&str] = &[
    "price", "cost", "amount", "total", "sum", "revenue", "sales", "quantity",
    "count", "number", "qty", "age", "population", "weight", "height",
    "distance", "duration", "time",
];

/// Configuration for quality analysis rules
#[derive(Debug, Clone)]
pub struct QualityPolicy {
    /// Column-name keywords whose columns must not hold negative numbers
    pub non_negative_keywords: Vec<String>,
    /// Flag numeric cells outside their column's Tukey fences as INFO issues
    pub flag_outliers: bool,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            non_negative_keywords: NON_NEGATIVE_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            flag_outliers: false,
        }
    }
}

impl QualityPolicy {
    /// Whether a column name suggests values should be non-negative
    pub fn column_expects_non_negative(&self, column: &str) -> bool {
        let lower = column.to_lowercase();
        self.non_negative_keywords
            .iter()
            .any(|keyword| lower.contains(keyword.as_str()))
    }
}

/// Analyzes a table for data-quality issues.
///
/// Pure and stateless: the same table always yields the same report, and
/// concurrent calls on independently-owned tables need no synchronization.
pub struct QualityAnalyzer {
    policy: QualityPolicy,
}

impl QualityAnalyzer {
    pub fn new() -> Self {
        Self {
            policy: QualityPolicy::default(),
        }
    }

    pub fn with_policy(policy: QualityPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &QualityPolicy {
        &self.policy
    }

    /// Scan every cell and produce the quality report.
    ///
    /// Total over any table: an empty table (no rows or no columns) scores
    /// 100 with no issues, by convention. Ragged rows degrade leniently:
    /// cells beyond the header count are skipped, never reported, and the
    /// column total always comes from the header count.
    pub fn analyze(&self, table: &SheetTable) -> QualityReport {
        let total_rows = table.rows.len();
        let total_columns = table.headers.len();

        let mut issues = Vec::new();
        let mut rows_with_issues: BTreeSet<usize> = BTreeSet::new();
        // per column: (display row, value, raw text) for the outlier pass
        let mut numeric_cells: Vec<Vec<(usize, f64, String)>> = if self.policy.flag_outliers {
            vec![Vec::new(); total_columns]
        } else {
            Vec::new()
        };

        for (row_idx, row) in table.rows.iter().enumerate() {
            // +2 because row 1 is headers, and data rows are 0-indexed
            let row_num = row_idx + 2;

            for (col_idx, cell) in row.iter().enumerate() {
                if col_idx >= total_columns {
                    continue;
                }
                let column = &table.headers[col_idx];

                match CellValue::classify(cell) {
                    CellValue::Missing => {
                        issues.push(QualityIssue {
                            severity: Severity::Warning,
                            row: row_num,
                            column: column.clone(),
                            message: "Missing value".to_string(),
                            kind: IssueKind::MissingValue,
                        });
                        rows_with_issues.insert(row_num);
                    }
                    CellValue::Numeric(value) => {
                        if self.policy.column_expects_non_negative(column) && value < 0.0 {
                            issues.push(QualityIssue {
                                severity: Severity::Error,
                                row: row_num,
                                column: column.clone(),
                                message: format!("Negative value {} (should be positive)", cell),
                                kind: IssueKind::NegativeValue,
                            });
                            rows_with_issues.insert(row_num);
                        }
                        if self.policy.flag_outliers {
                            numeric_cells[col_idx].push((row_num, value, cell.clone()));
                        }
                    }
                    // Non-numeric text is never an error for the numeric
                    // checks: format validation is out of scope here.
                    CellValue::Text => {}
                }
            }
        }

        if self.policy.flag_outliers {
            self.flag_column_outliers(
                &table.headers,
                &numeric_cells,
                &mut issues,
                &mut rows_with_issues,
            );
        }

        let score = quality_score(issues.len(), total_rows * total_columns);
        let issue_rows = rows_with_issues.len();

        QualityReport {
            score,
            total_rows,
            total_columns,
            clean_rows: total_rows - issue_rows,
            issue_rows,
            issues,
        }
    }

    /// Opt-in outlier check: columns with at least four numeric values get
    /// Tukey fences, and out-of-fence cells are flagged INFO. Appended after
    /// the row-major scan, ordered by column then row.
    fn flag_column_outliers(
        &self,
        headers: &[String],
        numeric_cells: &[Vec<(usize, f64, String)>],
        issues: &mut Vec<QualityIssue>,
        rows_with_issues: &mut BTreeSet<usize>,
    ) {
        for (col_idx, cells) in numeric_cells.iter().enumerate() {
            let values: Vec<f64> = cells.iter().map(|(_, v, _)| *v).collect();
            let (lower, upper) = outliers::outlier_bounds(&values);
            for (row_num, value, raw) in cells {
                if *value < lower || *value > upper {
                    issues.push(QualityIssue {
                        severity: Severity::Info,
                        row: *row_num,
                        column: headers[col_idx].clone(),
                        message: format!(
                            "Outlier value {} (outside {:.2}..{:.2})",
                            raw, lower, upper
                        ),
                        kind: IssueKind::Outlier,
                    });
                    rows_with_issues.insert(*row_num);
                }
            }
        }
    }
}

impl Default for QualityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// score = 100 - floor(issue_count / total_cells * 100), clamped to 0.
/// A table with no cells scores 100 by convention.
fn quality_score(issue_count: usize, total_cells: usize) -> i64 {
    if total_cells == 0 {
        return 100;
    }
    let penalty = (issue_count as i64 * 100) / total_cells as i64;
    (100 - penalty).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> SheetTable {
        SheetTable::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_clean_table_scores_100() {
        let analyzer = QualityAnalyzer::new();
        let report = analyzer.analyze(&table(
            &["Name", "Total Sales"],
            &[&["Alice", "10"], &["Bob", "20"]],
        ));

        assert_eq!(report.score, 100);
        assert_eq!(report.total_rows, 2);
        assert_eq!(report.total_columns, 2);
        assert_eq!(report.clean_rows, 2);
        assert_eq!(report.issue_rows, 0);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_empty_table_scores_100() {
        let analyzer = QualityAnalyzer::new();

        let no_rows = analyzer.analyze(&table(&["A", "B"], &[]));
        assert_eq!(no_rows.score, 100);
        assert!(no_rows.issues.is_empty());

        let no_columns = analyzer.analyze(&table(&[], &[&["orphan"]]));
        assert_eq!(no_columns.score, 100);
        assert!(no_columns.issues.is_empty());
        assert_eq!(no_columns.clean_rows, 1);
    }

    #[test]
    fn test_missing_value_reported_at_row_2() {
        let analyzer = QualityAnalyzer::new();
        let report = analyzer.analyze(&table(&["Name", "Notes"], &[&["Alice", "   "]]));

        assert_eq!(report.issues.len(), 1);
        let issue = &report.issues[0];
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.kind, IssueKind::MissingValue);
        assert_eq!(issue.row, 2);
        assert_eq!(issue.column, "Notes");
        assert_eq!(issue.message, "Missing value");
        assert_eq!(report.clean_rows, 0);
        assert_eq!(report.issue_rows, 1);
    }

    #[test]
    fn test_negative_value_in_non_negative_column() {
        let analyzer = QualityAnalyzer::new();
        let report = analyzer.analyze(&table(&["Total Sales"], &[&["-5"]]));

        assert_eq!(report.issues.len(), 1);
        let issue = &report.issues[0];
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.kind, IssueKind::NegativeValue);
        assert_eq!(issue.row, 2);
        assert_eq!(issue.column, "Total Sales");
        assert!(issue.message.contains("-5"));
    }

    #[test]
    fn test_non_numeric_text_is_not_a_negative_issue() {
        let analyzer = QualityAnalyzer::new();
        let report = analyzer.analyze(&table(&["Total Sales"], &[&["abc"]]));
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_negative_value_in_plain_column_is_ignored() {
        let analyzer = QualityAnalyzer::new();
        let report = analyzer.analyze(&table(&["Notes"], &[&["-5"]]));
        assert!(report.issues.is_empty());
        assert_eq!(report.clean_rows, 1);
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_substring() {
        let policy = QualityPolicy::default();
        assert!(policy.column_expects_non_negative("Total Sales"));
        assert!(policy.column_expects_non_negative("UNIT_PRICE"));
        assert!(policy.column_expects_non_negative("Headcount"));
        assert!(!policy.column_expects_non_negative("Notes"));
        assert!(!policy.column_expects_non_negative("Description"));
    }

    #[test]
    fn test_row_with_multiple_issues_counts_once() {
        let analyzer = QualityAnalyzer::new();
        let report = analyzer.analyze(&table(
            &["Price", "Amount"],
            &[&["-1", ""], &["3", "4"]],
        ));

        assert_eq!(report.issues.len(), 2);
        assert_eq!(report.issue_rows, 1);
        assert_eq!(report.clean_rows, 1);
        // score = 100 - floor(2/4 * 100) = 50
        assert_eq!(report.score, 50);
    }

    #[test]
    fn test_ragged_row_extra_cells_are_skipped() {
        let analyzer = QualityAnalyzer::new();
        // The trailing "" and "-9" sit beyond the single header and must be
        // neither reported nor counted.
        let report = analyzer.analyze(&table(&["Price"], &[&["5", "", "-9"]]));

        assert!(report.issues.is_empty());
        assert_eq!(report.total_columns, 1);
        assert_eq!(report.score, 100);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let analyzer = QualityAnalyzer::with_policy(QualityPolicy {
            flag_outliers: false,
            ..QualityPolicy::default()
        });
        // Every cell is both in a non-negative column and negative, plus a
        // missing cell: issue count can reach total cells, never below 0.
        let report = analyzer.analyze(&table(
            &["Price", "Cost"],
            &[&["-1", "-2"], &["-3", ""]],
        ));
        assert_eq!(report.issues.len(), 4);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_score_is_always_in_range() {
        let analyzer = QualityAnalyzer::new();
        let tables = [
            table(&[], &[]),
            table(&["A"], &[&[""]]),
            table(&["Price"], &[&["-1"], &["-2"], &["-3"]]),
            table(&["Name"], &[&["x"]]),
        ];
        for t in &tables {
            let report = analyzer.analyze(t);
            assert!((0..=100).contains(&report.score));
            assert_eq!(report.clean_rows + report.issue_rows, report.total_rows);
        }
    }

    #[test]
    fn test_scientific_notation_and_signs_parse_as_numeric() {
        assert_eq!(CellValue::classify(" -1.5e2 "), CellValue::Numeric(-150.0));
        assert_eq!(CellValue::classify("+3"), CellValue::Numeric(3.0));
        assert_eq!(CellValue::classify(".5"), CellValue::Numeric(0.5));
        assert_eq!(CellValue::classify(""), CellValue::Missing);
        assert_eq!(CellValue::classify("  "), CellValue::Missing);
        assert_eq!(CellValue::classify("12a"), CellValue::Text);
        // Infinities are not finite decimal numbers
        assert_eq!(CellValue::classify("-inf"), CellValue::Text);
        assert_eq!(CellValue::classify("NaN"), CellValue::Text);
    }

    #[test]
    fn test_issues_follow_scan_order() {
        let analyzer = QualityAnalyzer::new();
        let report = analyzer.analyze(&table(
            &["Price", "Qty"],
            &[&["", "-1"], &["-2", ""]],
        ));

        let positions: Vec<(usize, &str)> = report
            .issues
            .iter()
            .map(|i| (i.row, i.column.as_str()))
            .collect();
        assert_eq!(
            positions,
            vec![(2, "Price"), (2, "Qty"), (3, "Price"), (3, "Qty")]
        );
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let analyzer = QualityAnalyzer::new();
        let t = table(
            &["Name", "Total Sales", "Notes"],
            &[&["Alice", "-5", ""], &["Bob", "abc", "fine"]],
        );
        let first = analyzer.analyze(&t);
        let second = analyzer.analyze(&t);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_keyword_policy() {
        let analyzer = QualityAnalyzer::with_policy(QualityPolicy {
            non_negative_keywords: vec!["balance".to_string()],
            flag_outliers: false,
        });
        let flagged = analyzer.analyze(&table(&["Balance"], &[&["-10"]]));
        assert_eq!(flagged.issues.len(), 1);

        // The default keywords no longer apply under the substituted policy
        let ignored = analyzer.analyze(&table(&["Price"], &[&["-10"]]));
        assert!(ignored.issues.is_empty());
    }

    #[test]
    fn test_outlier_check_is_off_by_default() {
        let analyzer = QualityAnalyzer::new();
        let report = analyzer.analyze(&table(
            &["Reading"],
            &[&["1"], &["2"], &["3"], &["4"], &["1000"]],
        ));
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_outlier_check_flags_extreme_cell_when_enabled() {
        let analyzer = QualityAnalyzer::with_policy(QualityPolicy {
            flag_outliers: true,
            ..QualityPolicy::default()
        });
        let report = analyzer.analyze(&table(
            &["Reading"],
            &[&["1"], &["2"], &["3"], &["4"], &["1000"]],
        ));

        assert_eq!(report.issues.len(), 1);
        let issue = &report.issues[0];
        assert_eq!(issue.severity, Severity::Info);
        assert_eq!(issue.kind, IssueKind::Outlier);
        assert_eq!(issue.row, 6);
        assert!(issue.message.contains("1000"));
        assert_eq!(report.issue_rows, 1);
    }

    #[test]
    fn test_outlier_check_needs_four_numeric_values() {
        let analyzer = QualityAnalyzer::with_policy(QualityPolicy {
            flag_outliers: true,
            ..QualityPolicy::default()
        });
        let report = analyzer.analyze(&table(&["Reading"], &[&["1"], &["2"], &["1000"]]));
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_report_serializes_with_wire_field_names() {
        let analyzer = QualityAnalyzer::new();
        let report = analyzer.analyze(&table(&["Total"], &[&[""]]));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["totalRows"], 1);
        assert_eq!(json["totalColumns"], 1);
        assert_eq!(json["cleanRows"], 0);
        assert_eq!(json["issueRows"], 1);
        assert_eq!(json["issues"][0]["severity"], "WARNING");
        assert_eq!(json["issues"][0]["type"], "missing_value");
        assert_eq!(json["issues"][0]["row"], 2);
    }
}
