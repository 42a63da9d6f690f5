pub mod cache;
#[cfg(test)]
pub mod memory;
pub mod sheets;

use async_trait::async_trait;

pub type Row = Vec<String>;

/// Errors from the remote tabular store. Anything transport-level is
/// `Unavailable` and fatal for the current user action; a response we can
/// reach but not make sense of is `BadResponse`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("tabular store unavailable: {0}")]
    Unavailable(String),
    #[error("unexpected response from tabular store: {0}")]
    BadResponse(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// The external spreadsheet-like collaborator: two logical tabs of rows,
/// addressed by absolute 1-based sheet position with the header at row 1.
/// The core only relies on bulk reads plus append/delete/update; how the
/// backend stores or searches rows is its own business.
#[async_trait]
pub trait TabularStore: Send + Sync {
    /// All data rows of `tab`, header excluded. Data index `i` corresponds
    /// to sheet row `i + 2`.
    async fn read_rows(&self, tab: &str) -> Result<Vec<Row>, StoreError>;

    async fn append_row(&self, tab: &str, row: Row) -> Result<(), StoreError>;

    /// Absolute sheet row of the first row containing a cell equal to
    /// `value`, or `None`.
    async fn find_row(&self, tab: &str, value: &str) -> Result<Option<u32>, StoreError>;

    async fn delete_row(&self, tab: &str, row: u32) -> Result<(), StoreError>;

    /// Overwrite one row in place at an absolute sheet position.
    async fn update_row(&self, tab: &str, row: u32, values: Row) -> Result<(), StoreError>;
}

/// Sheet row for the 0-based index of a data row returned by `read_rows`.
pub fn data_index_to_row(index: usize) -> u32 {
    index as u32 + 2
}

/// Cell accessor tolerant of short rows.
pub fn cell(row: &[String], i: usize) -> &str {
    row.get(i).map(String::as_str).unwrap_or("")
}

/// Lenient numeric cell: junk degrades to 0.0 rather than failing the row.
/// Accepts a comma decimal separator, which locale-formatted sheets produce.
pub fn cell_f64(row: &[String], i: usize) -> f64 {
    cell(row, i)
        .trim()
        .replace(',', ".")
        .parse()
        .unwrap_or(0.0)
}
