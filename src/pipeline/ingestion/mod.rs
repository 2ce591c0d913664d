// Pipeline ingestion: sheet URL handling and CSV payload decoding

pub mod csv_decode;
pub mod sheet_url;
