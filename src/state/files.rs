use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use super::data::FileRecord;
use crate::error::ConfigError;

/// Static reference table of file metadata, keyed by mapping id.
///
/// The registry is filled once at startup and only ever read afterwards.
#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    files: HashMap<String, FileRecord>,
}

impl FileRegistry {
    /// Registry containing only the built-in records.
    pub fn seeded() -> Self {
        let mut files = HashMap::new();
        files.insert(
            "9".to_string(),
            FileRecord::new("informe1.pdf", "david brent", "16/12/2018", "asdqwe"),
        );
        Self { files }
    }

    /// Build a registry from an explicit set of records (no seed data).
    #[cfg(test)]
    pub fn from_records<I, K>(records: I) -> Self
    where
        I: IntoIterator<Item = (K, FileRecord)>,
        K: Into<String>,
    {
        Self {
            files: records.into_iter().map(|(id, r)| (id.into(), r)).collect(),
        }
    }

    /// Built-in records plus the ones listed in a JSON object file.
    ///
    /// The file maps ids to records (`{"12": {"serverName": ...}}`).
    /// Entries from the file win over built-in entries with the same id.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let extra: HashMap<String, FileRecord> = serde_json::from_str(&contents)?;

        let mut registry = Self::seeded();
        info!(
            "Loaded {} file records from {}",
            extra.len(),
            path.display()
        );
        registry.files.extend(extra);
        Ok(registry)
    }

    /// Exact-match lookup; `None` when the id is unknown.
    pub fn lookup(&self, id: &str) -> Option<&FileRecord> {
        self.files.get(id)
    }

    pub fn record_count(&self) -> usize {
        self.files.len()
    }
}
