// Extract interactor - Turns paths into media records, one per path

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::domain::errors::ExtractionError;
use crate::domain::model::MediaRecord;
use crate::ports::ProbePort;
use crate::utils::path::PathUtils;

/// Interactor for the metadata extraction use case
pub struct ExtractInteractor {
    probe_port: Arc<dyn ProbePort>,
}

impl ExtractInteractor {
    /// Create new extract interactor with injected probe port
    pub fn new(probe_port: Arc<dyn ProbePort>) -> Self {
        Self { probe_port }
    }

    /// Analyze one file
    ///
    /// Never fails: every problem ends up in the record's `error` string.
    pub async fn extract(&self, path: &Path) -> MediaRecord {
        let name = PathUtils::display_name(path);

        let size = match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => meta.len(),
            _ => {
                let err = ExtractionError::FileNotFound(path.display().to_string());
                warn!("{}", err);
                return MediaRecord::failed(name, 0, &err);
            }
        };

        let result = self
            .probe_port
            .probe(path)
            .await
            .and_then(|doc| MediaRecord::from_probe(name.clone(), size, doc));

        match result {
            Ok(record) => {
                debug!(
                    file = %name,
                    container = %record.format_name,
                    streams = record.nb_streams,
                    "extracted"
                );
                record
            }
            Err(err) => {
                warn!(file = %name, "extraction failed: {}", err);
                MediaRecord::failed(name, size, &err)
            }
        }
    }

    /// Analyze files in order, one record per path
    pub async fn extract_all(&self, paths: &[PathBuf]) -> Vec<MediaRecord> {
        let mut records = Vec::with_capacity(paths.len());
        for path in paths {
            records.push(self.extract(path).await);
        }

        let failed = records.iter().filter(|r| r.is_error()).count();
        info!(
            "Extracted {} file(s), {} failed",
            records.len(),
            failed
        );
        records
    }
}

/// Replace directory inputs with the video files inside them
///
/// Files found in one directory are sorted by path. Other inputs pass
/// through untouched so that missing paths still produce an error record.
/// Entries the walk cannot read are skipped with a warning; a directory
/// input that cannot be read at all passes through like a missing path.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> Vec<PathBuf> {
    let mut expanded = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            expanded.push(input.clone());
            continue;
        }

        let walker = WalkDir::new(input).follow_links(true);
        let walker = if recursive { walker } else { walker.max_depth(1) };

        let mut found = Vec::new();
        let mut unreadable_root = false;
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", input.display(), e);
                    unreadable_root |= e.depth() == 0;
                    continue;
                }
            };
            if entry.file_type().is_file() && PathUtils::is_video_file(entry.path()) {
                found.push(entry.into_path());
            }
        }

        if unreadable_root {
            expanded.push(input.clone());
            continue;
        }

        found.sort();
        if found.is_empty() {
            warn!("No video files found in {}", input.display());
        }
        debug!("Expanded {} into {} file(s)", input.display(), found.len());
        expanded.extend(found);
    }

    expanded
}
