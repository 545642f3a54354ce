use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::storage::document::AppDocument;
use crate::storage::traits::DocumentStore;

const DEFAULT_DATA_DIRECTORY: &str = "School Fees";
const DEFAULT_DOCUMENT_FILE: &str = "school_data.json";

/// JsonDocumentStore keeps the whole application document in one JSON file
#[derive(Clone)]
pub struct JsonDocumentStore {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonDocumentStore {
    /// Create a store backed by `path`, creating its parent directory if needed
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create data directory {}", parent.display()))?;
                info!("Created data directory: {}", parent.display());
            }
        }

        Ok(Self {
            path,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Create a store in the platform data directory
    /// (e.g. ~/.local/share/School Fees/school_data.json)
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_path()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine the platform data directory"))?;
        Ok(data_dir.join(DEFAULT_DATA_DIRECTORY).join(DEFAULT_DOCUMENT_FILE))
    }

    /// Path of the document file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonDocumentStore {
    fn read_document(&self) -> Result<AppDocument> {
        if !self.path.exists() {
            debug!("No document at {}, starting empty", self.path.display());
            return Ok(AppDocument::default());
        }

        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read document {}", self.path.display()))?;
        if json.trim().is_empty() {
            return Ok(AppDocument::default());
        }

        AppDocument::from_json(&json)
            .with_context(|| format!("Failed to parse document {}", self.path.display()))
    }

    fn write_document(&self, document: &AppDocument) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Document write lock poisoned"))?;

        let json = document.to_json()?;

        // Use atomic write pattern: write to temp file, then rename
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, json)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace document {}", self.path.display()))?;

        debug!("Saved document to {}", self.path.display());
        Ok(())
    }
}
