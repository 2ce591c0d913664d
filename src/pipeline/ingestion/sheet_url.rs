use regex::Regex;

use crate::error::{Result, ServiceError};

/// URL shapes a shared Google Sheets link can take. Order matters: the
/// spreadsheet-specific pattern is tried before the generic `/d/` one.
const FILE_ID_PATTERNS: &[&str] = &[
    r"/spreadsheets/d/([a-zA-Z0-9-_]+)",
    r"/d/([a-zA-Z0-9-_]+)",
];

/// Extract the document file ID from a shared spreadsheet URL.
pub fn extract_file_id(url: &str) -> Result<String> {
    for pattern in FILE_ID_PATTERNS {
        let re = Regex::new(pattern).expect("file ID pattern must compile");
        if let Some(captures) = re.captures(url) {
            if let Some(id) = captures.get(1) {
                return Ok(id.as_str().to_string());
            }
        }
    }
    Err(ServiceError::InvalidSheetUrl(url.to_string()))
}

/// CSV export endpoint for a public spreadsheet document
pub fn csv_export_url(file_id: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/export?format=csv",
        file_id
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_id_from_full_share_link() {
        let url = "https://docs.google.com/spreadsheets/d/1AbC-dEf_123/edit#gid=0";
        assert_eq!(extract_file_id(url).unwrap(), "1AbC-dEf_123");
    }

    #[test]
    fn test_extracts_id_from_short_link() {
        let url = "https://docs.google.com/d/xYz789/view";
        assert_eq!(extract_file_id(url).unwrap(), "xYz789");
    }

    #[test]
    fn test_rejects_url_without_file_id() {
        let err = extract_file_id("https://example.com/nothing-here").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidSheetUrl(_)));
    }

    #[test]
    fn test_export_url_shape() {
        assert_eq!(
            csv_export_url("abc123"),
            "https://docs.google.com/spreadsheets/d/abc123/export?format=csv"
        );
    }
}
