//! Shared stall dataset: fetching, CSV parsing, and process-lifetime caching.
//!
//! The dataset is a published spreadsheet export, one row per food item. It is
//! loaded at most once per process and shared read-only afterwards. Load
//! failures degrade to an empty table rather than an error so the
//! recommendation path can answer with its fixed unavailable reply.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::OnceCell;

/// Error type for dataset loading. Never escapes [`DatasetProvider::load`],
/// which maps failures to an empty table.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to fetch dataset: {0}")]
    Fetch(String),

    #[error("Failed to parse dataset CSV: {0}")]
    Parse(String),
}

/// A single food-stall menu entry.
///
/// The sheet is maintained by hand and grows descriptive columns over time;
/// anything beyond the contract columns lands in `extra` and still reaches
/// the model when the table is serialized into a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub dish_name: String,
    pub stall_name: String,
    pub price: String,
    pub landmark: String,
    pub location_area: String,
    pub gmaps_link: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// The loaded food dataset. Empty means "unavailable", not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FoodTable {
    items: Vec<FoodItem>,
}

impl FoodTable {
    pub fn new(items: Vec<FoodItem>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    /// Render the table as pretty-printed JSON records for prompt embedding.
    ///
    /// Every column is preserved verbatim; relevance reasoning is the model's
    /// job, not ours.
    pub fn to_prompt_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.items)
    }
}

/// Trait for fetching the raw dataset, enabling mockability in tests.
#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    /// Fetch the raw CSV body from the dataset source URL.
    async fn fetch_csv(&self, url: &str) -> Result<String, DatasetError>;
}

/// Production fetcher backed by reqwest.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DatasetFetcher for HttpFetcher {
    async fn fetch_csv(&self, url: &str) -> Result<String, DatasetError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DatasetError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(DatasetError::Fetch(format!("HTTP {}", response.status())));
        }

        response
            .text()
            .await
            .map_err(|e| DatasetError::Fetch(e.to_string()))
    }
}

/// Canned fetcher for tests.
pub struct MockFetcher {
    response: Result<String, String>,
    calls: AtomicUsize,
}

impl MockFetcher {
    /// Fetcher that returns the given CSV body.
    pub fn with_csv(csv: &str) -> Self {
        Self {
            response: Ok(csv.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Fetcher that fails with the given message.
    pub fn with_error(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of fetch_csv calls made against this fetcher.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetFetcher for MockFetcher {
    async fn fetch_csv(&self, _url: &str) -> Result<String, DatasetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            Ok(csv) => Ok(csv.clone()),
            Err(message) => Err(DatasetError::Fetch(message.clone())),
        }
    }
}

/// Parse the CSV body into a table.
fn parse_table(csv_text: &str) -> Result<FoodTable, DatasetError> {
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let mut items = Vec::new();

    for row in reader.deserialize::<BTreeMap<String, String>>() {
        let row = row.map_err(|e| DatasetError::Parse(e.to_string()))?;
        // Route each row through serde_json so unknown columns land in
        // `extra`; the csv deserializer cannot drive #[serde(flatten)].
        let value =
            serde_json::to_value(row).map_err(|e| DatasetError::Parse(e.to_string()))?;
        let item: FoodItem =
            serde_json::from_value(value).map_err(|e| DatasetError::Parse(e.to_string()))?;
        items.push(item);
    }

    Ok(FoodTable::new(items))
}

/// Once-initialized shared accessor for the dataset.
///
/// Safe for concurrent first use: simultaneous callers collapse into a single
/// fetch and all observe the same memoized table.
pub struct DatasetProvider {
    url: String,
    fetcher: Arc<dyn DatasetFetcher>,
    table: OnceCell<FoodTable>,
}

impl DatasetProvider {
    /// Provider that fetches from the given URL over HTTP.
    pub fn new(url: String) -> Self {
        Self::with_fetcher(url, Arc::new(HttpFetcher::new()))
    }

    /// Provider with a custom fetcher, used by tests.
    pub fn with_fetcher(url: String, fetcher: Arc<dyn DatasetFetcher>) -> Self {
        Self {
            url,
            fetcher,
            table: OnceCell::new(),
        }
    }

    /// Load the dataset, fetching and parsing on first use.
    ///
    /// Never fails: fetch or parse errors are logged and memoized as an empty
    /// table, so later calls within the process return the same result without
    /// re-fetching.
    pub async fn load(&self) -> &FoodTable {
        self.table
            .get_or_init(|| async {
                match self.fetch_and_parse().await {
                    Ok(table) => {
                        tracing::info!(rows = table.len(), "loaded food dataset");
                        table
                    }
                    Err(e) => {
                        tracing::error!(error = %e, url = %self.url, "failed to load food dataset");
                        FoodTable::default()
                    }
                }
            })
            .await
    }

    async fn fetch_and_parse(&self) -> Result<FoodTable, DatasetError> {
        let csv_text = self.fetcher.fetch_csv(&self.url).await?;
        parse_table(&csv_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
dish_name,stall_name,price,landmark,location_area,gmaps_link,spice_level
Vada Pav,Ashok Vada Pav,25,Kirti College Lane,Dadar West,https://maps.google.com/?q=Ashok+Vada+Pav,medium
Cheese Pav Bhaji,Sardar Refreshments,180,Tardeo Road Junction,Tardeo,https://maps.google.com/?q=Sardar+Pav+Bhaji,high
";

    #[test]
    fn test_parse_table() {
        let table = parse_table(SAMPLE_CSV).unwrap();
        assert_eq!(table.len(), 2);

        let first = &table.items()[0];
        assert_eq!(first.dish_name, "Vada Pav");
        assert_eq!(first.stall_name, "Ashok Vada Pav");
        assert_eq!(first.price, "25");
        assert_eq!(first.location_area, "Dadar West");
        // Column outside the contract set is preserved
        assert_eq!(first.extra.get("spice_level").map(String::as_str), Some("medium"));
    }

    #[test]
    fn test_parse_table_missing_contract_column() {
        let csv = "dish_name,stall_name,price\nVada Pav,Ashok,25\n";
        let err = parse_table(csv).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }

    #[test]
    fn test_parse_table_headers_only() {
        let csv = "dish_name,stall_name,price,landmark,location_area,gmaps_link\n";
        let table = parse_table(csv).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_prompt_json_keeps_every_column() {
        let table = parse_table(SAMPLE_CSV).unwrap();
        let json = table.to_prompt_json().unwrap();

        assert!(json.contains("\"dish_name\": \"Vada Pav\""));
        assert!(json.contains("\"gmaps_link\": \"https://maps.google.com/?q=Ashok+Vada+Pav\""));
        assert!(json.contains("\"spice_level\": \"high\""));
    }

    #[tokio::test]
    async fn test_load_memoizes_table() {
        let fetcher = Arc::new(MockFetcher::with_csv(SAMPLE_CSV));
        let provider =
            DatasetProvider::with_fetcher("http://sheet.test/export.csv".to_string(), fetcher.clone());

        let first = provider.load().await.clone();
        let second = provider.load().await.clone();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_load_fetch_error_gives_empty_table() {
        let fetcher = Arc::new(MockFetcher::with_error("connection refused"));
        let provider =
            DatasetProvider::with_fetcher("http://sheet.test/export.csv".to_string(), fetcher.clone());

        assert!(provider.load().await.is_empty());
        // The failure is memoized as well
        assert!(provider.load().await.is_empty());
        assert_eq!(fetcher.call_count(), 1);
    }

    #[tokio::test]
    async fn test_load_parse_error_gives_empty_table() {
        let fetcher = Arc::new(MockFetcher::with_csv("dish_name,price\nVada Pav,25\n"));
        let provider =
            DatasetProvider::with_fetcher("http://sheet.test/export.csv".to_string(), fetcher);

        assert!(provider.load().await.is_empty());
    }
}
