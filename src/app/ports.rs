use async_trait::async_trait;

use crate::domain::SheetTable;
use crate::error::Result;

/// Source of sheet data, keyed by the user-supplied document URL.
///
/// Implementations own transport concerns (fetch, status mapping, decoding);
/// callers receive either a table or a typed fetch error.
#[async_trait]
pub trait SheetSourcePort: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<SheetTable>;
}
