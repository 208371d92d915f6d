//! # Airtable Provider
//!
//! Reads the live table through the Airtable REST API:
//!
//! ```text
//! GET {base_url}/v0/{base_id}/{table_id}[?offset=...]
//! Authorization: Bearer <api key>
//! ```
//!
//! Each page is `{ "records": [{ "id", "fields" }], "offset"? }`. Pages are
//! followed until no `offset` comes back. Every record gains an `_id` cell
//! holding the Airtable record id. Any non-2xx status fails the whole fetch;
//! there is no retry.

use std::time::Duration;

use async_trait::async_trait;
use meridian_stats::{record_from_json, FieldValue, RawRecord, RecordSet};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SourceError;
use crate::source::RecordSource;

pub const DEFAULT_BASE_URL: &str = "https://api.airtable.com";

/// Connection settings for one Airtable table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirtableSettings {
    pub base_url: String,
    pub base_id: String,
    pub table_id: String,
    pub timeout_secs: u64,
}

impl Default for AirtableSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            base_id: "appceDWWzmrL1awQi".to_string(),
            table_id: "tblNt3dQ9b6F32QTU".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Page {
    records: Vec<ApiRecord>,
    #[serde(default)]
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRecord {
    id: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl ApiRecord {
    fn into_raw(self) -> RawRecord {
        let mut raw = record_from_json(&self.fields);
        raw.insert("_id".to_string(), FieldValue::Text(self.id));
        raw
    }
}

/// Live dataset over HTTP.
#[derive(Debug, Clone)]
pub struct AirtableSource {
    client: reqwest::Client,
    url: String,
}

impl AirtableSource {
    pub fn new(settings: &AirtableSettings, api_key: &str) -> Result<Self, SourceError> {
        if api_key.trim().is_empty() {
            return Err(SourceError::NotConfigured {
                source_name: "airtable".to_string(),
                reason: "empty API key".to_string(),
            });
        }
        let mut headers = reqwest::header::HeaderMap::new();
        let bearer = reqwest::header::HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .map_err(|_| SourceError::NotConfigured {
                source_name: "airtable".to_string(),
                reason: "invalid API key characters".to_string(),
            })?;
        headers.insert(reqwest::header::AUTHORIZATION, bearer);
        headers.insert(
            reqwest::header::CONTENT_TYPE,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .default_headers(headers)
            .build()?;

        let url = format!(
            "{}/v0/{}/{}",
            settings.base_url.trim_end_matches('/'),
            settings.base_id,
            settings.table_id
        );
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_page(&self, offset: Option<&str>) -> Result<Page, SourceError> {
        let mut request = self.client.get(&self.url);
        if let Some(offset) = offset {
            request = request.query(&[("offset", offset)]);
        }
        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SourceError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
                body,
            });
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SourceError::decode("Airtable page", e))
    }
}

#[async_trait]
impl RecordSource for AirtableSource {
    fn name(&self) -> &str {
        "airtable"
    }

    async fn fetch(&self) -> Result<RecordSet, SourceError> {
        let mut rows: Vec<RawRecord> = Vec::new();
        let mut offset: Option<String> = None;
        let mut pages = 0usize;
        loop {
            let page = self.fetch_page(offset.as_deref()).await?;
            pages += 1;
            let fetched = page.records.len();
            rows.extend(page.records.into_iter().map(ApiRecord::into_raw));
            tracing::debug!(page = pages, records = fetched, total = rows.len(), "fetched Airtable page");

            match page.offset {
                Some(next) if offset.as_deref() == Some(next.as_str()) => {
                    return Err(SourceError::decode(
                        "Airtable page",
                        format!("offset {next:?} repeated"),
                    ));
                }
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        tracing::info!(records = rows.len(), pages, "Airtable fetch complete");
        Ok(RecordSet::from_rows(rows))
    }
}
