//! Dataset loader
//!
//! Four static JSON arrays are read once at startup. Loading is
//! all-or-nothing: if any file fails, the caller gets four empty datasets
//! and the failure is logged.

use crate::chat::ChartKind;
use crate::error::{LabError, Result};
use serde_json::{Map, Value};
use std::fmt;
use std::path::PathBuf;
use tracing::{error, info};

/// A loosely typed dataset row
pub type Record = Map<String, Value>;

/// The four datasets the assistant can chart
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetBundle {
    pub reagents: Vec<Record>,
    pub operations: Vec<Record>,
    pub results: Vec<Record>,
    pub inventory: Vec<Record>,
}

impl DatasetBundle {
    pub fn get(&self, kind: ChartKind) -> &[Record] {
        match kind {
            ChartKind::Reagents => &self.reagents,
            ChartKind::Operations => &self.operations,
            ChartKind::Results => &self.results,
            ChartKind::Inventory => &self.inventory,
        }
    }

    fn slot(&mut self, kind: ChartKind) -> &mut Vec<Record> {
        match kind {
            ChartKind::Reagents => &mut self.reagents,
            ChartKind::Operations => &mut self.operations,
            ChartKind::Results => &mut self.results,
            ChartKind::Inventory => &mut self.inventory,
        }
    }

    /// True when every dataset is empty
    pub fn is_empty(&self) -> bool {
        ChartKind::ALL.iter().all(|k| self.get(*k).is_empty())
    }

    /// Row counts in `ChartKind::ALL` order, for the status bar
    pub fn counts(&self) -> [usize; 4] {
        ChartKind::ALL.map(|k| self.get(k).len())
    }
}

/// Where the JSON files live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Dir(PathBuf),
    Url(String),
}

impl DataSource {
    /// `http://` and `https://` select a base URL, anything else is a directory
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.trim_end_matches('/').to_string())
        } else {
            Self::Dir(PathBuf::from(trimmed))
        }
    }

    fn location(&self, file: &str) -> String {
        match self {
            Self::Dir(dir) => dir.join(file).display().to_string(),
            Self::Url(base) => format!("{}/{}", base, file),
        }
    }

    async fn fetch(&self, file: &str) -> Result<Value> {
        match self {
            Self::Dir(dir) => {
                let contents = tokio::fs::read_to_string(dir.join(file)).await?;
                Ok(serde_json::from_str(&contents)?)
            }
            Self::Url(_) => {
                let response = reqwest::get(self.location(file)).await?.error_for_status()?;
                Ok(response.json::<Value>().await?)
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dir(dir) => write!(f, "{}", dir.display()),
            Self::Url(base) => f.write_str(base),
        }
    }
}

/// Load all four datasets, failing on the first bad file
pub async fn load(source: &DataSource) -> Result<DatasetBundle> {
    let mut bundle = DatasetBundle::default();

    for kind in ChartKind::ALL {
        let file = format!("{}.json", kind.key());
        let value = source.fetch(&file).await?;
        *bundle.slot(kind) = into_records(value, &file)?;
    }

    Ok(bundle)
}

/// Startup path: any failure is logged and yields empty datasets
pub async fn load_or_empty(source: &DataSource) -> DatasetBundle {
    match load(source).await {
        Ok(bundle) => {
            let [reagents, operations, results, inventory] = bundle.counts();
            info!(
                %source,
                reagents, operations, results, inventory, "Datasets loaded"
            );
            bundle
        }
        Err(e) => {
            error!(%source, error = %e, "Failed to load datasets");
            DatasetBundle::default()
        }
    }
}

fn into_records(value: Value, file: &str) -> Result<Vec<Record>> {
    let not_an_array = || LabError::NotAnArray {
        file: file.to_string(),
    };

    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                _ => Err(not_an_array()),
            })
            .collect(),
        _ => Err(not_an_array()),
    }
}

/// String field, with numbers rendered as text
pub fn field_str(record: &Record, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numeric field; numeric strings are accepted
pub fn field_f64(record: &Record, key: &str) -> Option<f64> {
    match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_parse_data_source() {
        assert_eq!(DataSource::parse("data"), DataSource::Dir(PathBuf::from("data")));
        assert_eq!(
            DataSource::parse("https://lab.example/data/"),
            DataSource::Url("https://lab.example/data".to_string())
        );
    }

    #[test]
    fn test_url_location_joins_file() {
        let source = DataSource::parse("http://localhost:8080/data");
        assert_eq!(source.location("results.json"), "http://localhost:8080/data/results.json");
    }

    #[test]
    fn test_field_accessors() {
        let r = record(json!({ "name": "Reagent A", "stock": 1950, "usage": "150", "flag": null }));
        assert_eq!(field_str(&r, "name").as_deref(), Some("Reagent A"));
        assert_eq!(field_str(&r, "stock").as_deref(), Some("1950"));
        assert_eq!(field_f64(&r, "stock"), Some(1950.0));
        assert_eq!(field_f64(&r, "usage"), Some(150.0));
        assert_eq!(field_f64(&r, "name"), None);
        assert_eq!(field_str(&r, "flag"), None);
        assert_eq!(field_f64(&r, "missing"), None);
    }

    #[test]
    fn test_into_records_rejects_non_arrays() {
        assert!(into_records(json!({ "a": 1 }), "x.json").is_err());
        assert!(into_records(json!([1, 2]), "x.json").is_err());
        assert_eq!(into_records(json!([{ "a": 1 }]), "x.json").unwrap().len(), 1);
    }

    #[test]
    fn test_default_bundle_is_empty() {
        let bundle = DatasetBundle::default();
        assert!(bundle.is_empty());
        assert_eq!(bundle.counts(), [0, 0, 0, 0]);
    }
}
