use crate::config::PlayerConfig;
use crate::core::models::LocalFile;
use anyhow::{Context, Result, bail};
use std::path::Path;
use walkdir::WalkDir;

/// Collect every supported media file under `root`, sorted by name.
///
/// Unreadable entries are skipped; only a missing or non-directory root is an
/// error.
pub fn scan_media_files(root: &Path, config: &PlayerConfig) -> Result<Vec<LocalFile>> {
    let meta = std::fs::metadata(root).with_context(|| format!("Cannot open {}", root.display()))?;
    if !meta.is_dir() {
        bail!("{} is not a folder", root.display());
    }

    let mut files: Vec<LocalFile> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| LocalFile::from_path(entry.path(), config))
        .collect();

    files.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    Ok(files)
}
