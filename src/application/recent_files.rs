use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::models::{LocalFile, MediaType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentFile {
    pub name: String,
    pub kind: MediaType,
    pub size: u64,
    pub opened_at: DateTime<Utc>,
}

/// Most recently opened local files, newest first, one entry per name.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentFiles {
    entries: Vec<RecentFile>,
    limit: usize,
}

impl RecentFiles {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Rebuild from a stored list. Anything unreadable is treated as empty.
    pub fn from_value(value: serde_json::Value, limit: usize) -> Self {
        let mut entries: Vec<RecentFile> = serde_json::from_value(value)
            .map_err(|e| debug!("Stored recent files unreadable: {}", e))
            .unwrap_or_default();
        entries.truncate(limit);
        Self { entries, limit }
    }

    pub fn record(&mut self, file: &LocalFile, opened_at: DateTime<Utc>) {
        self.entries.retain(|e| e.name != file.name);
        self.entries.insert(
            0,
            RecentFile {
                name: file.name.clone(),
                kind: file.media_type,
                size: file.size,
                opened_at,
            },
        );
        self.entries.truncate(self.limit);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[RecentFile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
