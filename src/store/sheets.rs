use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{data_index_to_row, Row, StoreError, TabularStore};

/// Sheets values-API client. Covers exactly the five operations the core
/// needs: bulk read, append, find-by-value, delete-by-position and a
/// single-row range update.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    spreadsheet_id: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    #[serde(rename = "sheetId")]
    sheet_id: i64,
    title: String,
}

impl SheetsClient {
    pub fn new(base_url: &str, spreadsheet_id: &str, token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            spreadsheet_id: spreadsheet_id.to_string(),
            token: token.to_string(),
        }
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.base_url, self.spreadsheet_id, range
        )
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(StoreError::Unavailable(format!("{status}: {body}")))
    }

    /// Numeric sheet id for a tab title; deleteDimension addresses sheets
    /// by id, not title.
    async fn sheet_id(&self, tab: &str) -> Result<i64, StoreError> {
        let url = format!(
            "{}/v4/spreadsheets/{}?fields=sheets.properties",
            self.base_url, self.spreadsheet_id
        );
        let resp = self
            .http
            .get(url)
            .bearer_auth(&self.token)
            .send()
            .await?;
        let meta: SheetMeta = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::BadResponse(e.to_string()))?;
        meta.sheets
            .into_iter()
            .find(|s| s.properties.title == tab)
            .map(|s| s.properties.sheet_id)
            .ok_or_else(|| StoreError::BadResponse(format!("no tab named {tab}")))
    }
}

#[async_trait]
impl TabularStore for SheetsClient {
    async fn read_rows(&self, tab: &str) -> Result<Vec<Row>, StoreError> {
        let resp = self
            .http
            .get(self.values_url(tab))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let range: ValueRange = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::BadResponse(e.to_string()))?;
        let mut rows = range.values;
        if !rows.is_empty() {
            rows.remove(0); // header
        }
        debug!(tab, rows = rows.len(), "sheet read");
        Ok(rows)
    }

    async fn append_row(&self, tab: &str, row: Row) -> Result<(), StoreError> {
        let url = format!("{}:append?valueInputOption=USER_ENTERED", self.values_url(tab));
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        Self::check(resp).await?;
        debug!(tab, "row appended");
        Ok(())
    }

    async fn find_row(&self, tab: &str, value: &str) -> Result<Option<u32>, StoreError> {
        // The values API has no server-side search; scan a bulk read the
        // same way the memory store does.
        let rows = self.read_rows(tab).await?;
        Ok(rows
            .iter()
            .position(|row| row.iter().any(|cell| cell == value))
            .map(data_index_to_row))
    }

    async fn delete_row(&self, tab: &str, row: u32) -> Result<(), StoreError> {
        let sheet_id = self.sheet_id(tab).await?;
        let url = format!(
            "{}/v4/spreadsheets/{}:batchUpdate",
            self.base_url, self.spreadsheet_id
        );
        let body = json!({
            "requests": [{
                "deleteDimension": {
                    "range": {
                        "sheetId": sheet_id,
                        "dimension": "ROWS",
                        "startIndex": row - 1,
                        "endIndex": row,
                    }
                }
            }]
        });
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        Self::check(resp).await?;
        debug!(tab, row, "row deleted");
        Ok(())
    }

    async fn update_row(&self, tab: &str, row: u32, values: Row) -> Result<(), StoreError> {
        let range = format!("{tab}!A{row}");
        let url = format!(
            "{}?valueInputOption=USER_ENTERED",
            self.values_url(&range)
        );
        let resp = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": [values] }))
            .send()
            .await?;
        Self::check(resp).await?;
        debug!(tab, row, "row updated");
        Ok(())
    }
}
