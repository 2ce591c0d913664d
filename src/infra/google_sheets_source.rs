use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::ports::SheetSourcePort;
use crate::domain::SheetTable;
use crate::error::{Result, ServiceError};
use crate::pipeline::ingestion::csv_decode::decode_sheet;
use crate::pipeline::ingestion::sheet_url::{csv_export_url, extract_file_id};

/// Fetches public Google Sheets documents through their CSV export endpoint
pub struct GoogleSheetsSource;

#[async_trait]
impl SheetSourcePort for GoogleSheetsSource {
    async fn fetch(&self, url: &str) -> Result<SheetTable> {
        let file_id = extract_file_id(url)?;
        let export_url = csv_export_url(&file_id);

        let client = reqwest::Client::new();
        let t0 = std::time::Instant::now();
        let response = client.get(&export_url).send().await?;
        let status = response.status().as_u16();

        match status {
            403 => {
                crate::observability::metrics::sheets::fetch_error();
                warn!(%file_id, "sheet is not public");
                return Err(ServiceError::SheetNotPublic);
            }
            404 => {
                crate::observability::metrics::sheets::fetch_error();
                warn!(%file_id, "sheet not found");
                return Err(ServiceError::SheetNotFound);
            }
            200 => {}
            other => {
                crate::observability::metrics::sheets::fetch_error();
                warn!(%file_id, status = other, "unexpected export status");
                return Err(ServiceError::UnexpectedStatus(other));
            }
        }

        let bytes = response.bytes().await?;
        crate::observability::metrics::sheets::fetch_success();
        crate::observability::metrics::sheets::fetch_duration(t0.elapsed().as_secs_f64());
        crate::observability::metrics::sheets::payload_bytes(bytes.len());
        info!(%file_id, payload_bytes = bytes.len(), "sheet fetched");

        decode_sheet(&bytes)
    }
}
