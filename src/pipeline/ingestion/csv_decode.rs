use csv::ReaderBuilder;

use crate::domain::SheetTable;
use crate::error::{Result, ServiceError};

/// Decode a fetched CSV payload into a `SheetTable`.
///
/// The first record becomes the header row with each name trimmed; every
/// remaining record becomes a data row, kept verbatim. Records are read in
/// flexible mode, so ragged rows survive decoding and reach the analyzer
/// unchanged. A payload with no records at all is an error.
pub fn decode_sheet(bytes: &[u8]) -> Result<SheetTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record?
            .iter()
            .map(|name| name.trim().to_string())
            .collect(),
        None => return Err(ServiceError::EmptySheet),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    Ok(SheetTable::new(headers, rows))
}
