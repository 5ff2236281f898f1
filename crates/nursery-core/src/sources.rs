//! Raw operational records supplied by the host, and a loader that reads
//! them from a directory of JSON arrays (`batches.json`, `tasks.json`, ...).
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::TaskDue;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRecord {
    pub id: String,
    pub species: String,
    #[serde(default)]
    pub stage: String,
    /// Plant health, e.g. "Good" or "Excellent".
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub location: String,
    pub site: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    pub planted: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due: TaskDue,
    #[serde(default)]
    pub priority: String,
    pub assignee: Option<String>,
    pub batch_id: Option<String>,
    pub site: Option<String>,
    pub created: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub kind: String,
    pub site: Option<String>,
    pub capacity: Option<u32>,
    #[serde(default = "default_true")]
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub email: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: String,
    pub name: String,
    pub contact: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub segment: String,
    pub status: Option<String>,
    pub site: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub client: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub line_items: u32,
    pub site: Option<String>,
    pub created: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteRecord {
    pub id: String,
    pub client: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: f64,
    pub valid_until: Option<NaiveDate>,
    pub created: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    pub id: String,
    pub client: String,
    pub order_id: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub total: f64,
    pub due_date: Option<NaiveDate>,
    pub created: Option<NaiveDate>,
}

fn default_true() -> bool { true }

/// Read-only snapshot of every collection the index can draw from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceCollections {
    pub batches: Vec<BatchRecord>,
    pub tasks: Vec<TaskRecord>,
    pub locations: Vec<LocationRecord>,
    pub people: Vec<PersonRecord>,
    pub clients: Vec<ClientRecord>,
    pub orders: Vec<OrderRecord>,
    pub quotes: Vec<QuoteRecord>,
    pub invoices: Vec<InvoiceRecord>,
}

impl SourceCollections {
    pub fn total_records(&self) -> usize {
        self.batches.len()
            + self.tasks.len()
            + self.locations.len()
            + self.people.len()
            + self.clients.len()
            + self.orders.len()
            + self.quotes.len()
            + self.invoices.len()
    }
}

#[derive(Default)]
pub struct SourceLoader;

impl SourceLoader {
    pub fn new() -> Self { Self }

    /// Load every recognised `*.json` collection under `data_dir`.
    ///
    /// A missing directory yields empty collections.
    pub fn load_dir(&self, data_dir: &Path) -> Result<SourceCollections> {
        let mut sources = SourceCollections::default();
        if !data_dir.exists() {
            warn!(dir = %data_dir.display(), "source directory does not exist; corpus will be empty");
            return Ok(sources);
        }
        for file_path in self.list_json_files(data_dir) {
            let Some(stem) = file_path.file_stem().and_then(|s| s.to_str()) else { continue };
            match stem {
                "batches" => sources.batches = self.read_collection(&file_path)?,
                "tasks" => sources.tasks = self.read_collection(&file_path)?,
                "locations" => sources.locations = self.read_collection(&file_path)?,
                "people" => sources.people = self.read_collection(&file_path)?,
                "clients" => sources.clients = self.read_collection(&file_path)?,
                "orders" => sources.orders = self.read_collection(&file_path)?,
                "quotes" => sources.quotes = self.read_collection(&file_path)?,
                "invoices" => sources.invoices = self.read_collection(&file_path)?,
                other => {
                    warn!(file = %file_path.display(), "skipping unrecognised collection '{}'", other);
                    continue;
                }
            }
            debug!(file = %file_path.display(), "loaded collection");
        }
        debug!(records = sources.total_records(), "loaded sources from {}", data_dir.display());
        Ok(sources)
    }

    fn read_collection<T>(&self, file_path: &Path) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned,
    {
        let content = fs::read_to_string(file_path).map_err(|e| Error::io(file_path, e))?;
        serde_json::from_str(&content).map_err(|e| Error::json(file_path, e))
    }

    fn list_json_files(&self, root: &Path) -> Vec<PathBuf> {
        let mut json_files = Vec::new();
        for entry in walkdir::WalkDir::new(root).max_depth(1).into_iter().filter_map(|e| e.ok()).filter(|e| e.file_type().is_file()) {
            let path = entry.path(); if path.extension().and_then(|s| s.to_str()) == Some("json") { json_files.push(path.to_path_buf()); }
        }
        json_files.sort(); json_files
    }
}
