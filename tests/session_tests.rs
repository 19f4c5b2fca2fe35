// End-to-end session tests with a fixture probe standing in for ffprobe

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

use diffmovie::app::session::CommandOutcome;
use diffmovie::app::ExtractInteractor;
use diffmovie::domain::model::ProbeDocument;
use diffmovie::domain::summary::NO_DIFFERENCES;
use diffmovie::ports::ProbePort;
use diffmovie::*;

/// Test utilities for building a small media library on disk
mod test_utils {
    use super::*;

    pub const H264_1080P: &str = include_str!("fixtures/h264_1080p.json");
    pub const HEVC_HDR_4K: &str = include_str!("fixtures/hevc_hdr_4k.json");

    /// Answers by file name: `*4k*` gets the HEVC document, `*broken*` fails
    pub struct FixtureProbe;

    #[async_trait]
    impl ProbePort for FixtureProbe {
        async fn probe(&self, path: &Path) -> Result<ProbeDocument, ExtractionError> {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
            let json = if name.contains("broken") {
                return Err(ExtractionError::ParseError("expected value at line 1".to_string()));
            } else if name.contains("4k") {
                HEVC_HDR_4K
            } else {
                H264_1080P
            };
            serde_json::from_str(json).map_err(|e| ExtractionError::ParseError(e.to_string()))
        }
    }

    pub fn library(names: &[&str]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            std::fs::write(dir.path().join(name), vec![0u8; 4096]).unwrap();
        }
        dir
    }

    pub fn session() -> Session {
        Session::new(Arc::new(ExtractInteractor::new(Arc::new(FixtureProbe))))
    }
}

use test_utils::*;

#[tokio::test]
async fn test_partial_failure_keeps_every_entry() {
    let dir = library(&["a_1080.mp4", "b_broken.mp4", "c_4k.mkv"]);
    let mut session = session();

    let count = session.submit(&[dir.path().to_path_buf()], false).await;
    assert_eq!(count, 3);

    let set = session.set();
    let labels: Vec<&str> = set.entries().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, ["a_1080.mp4", "b_broken.mp4", "c_4k.mkv"]);
    assert!(set.entries()[1].is_error());
    assert_eq!(set.entries()[1].fields.len(), 1);

    let table = set.field_table(false).unwrap();
    let error_row = table.rows.iter().find(|r| r.key == FieldKey::Error).unwrap();
    assert_eq!(error_row.values[0], "N/A");
    assert!(error_row.values[1].contains("expected value"));
}

#[tokio::test]
async fn test_commands_toward_file_base_skip_failures() {
    let dir = library(&["a_1080.mp4", "b_broken.mp4", "c_4k.mkv"]);
    let out = tempfile::tempdir().unwrap();
    let mut session = session();
    session.submit(&[dir.path().to_path_buf()], false).await;
    session.add_preset("youtube-hd").unwrap();
    session.set_base(2).unwrap();

    let suggestions = session.set().commands(Some(out.path())).unwrap();
    assert_eq!(suggestions.len(), 2);

    match &suggestions[0].outcome {
        CommandOutcome::Ready { command } => {
            assert_eq!(command.arg_value("-c:v"), Some("libx265"));
            assert_eq!(
                command.output().map(PathBuf::from),
                Some(out.path().join("a_1080_to_c_4k.mkv"))
            );
        }
        other => panic!("expected a command, got {:?}", other),
    }
    assert!(matches!(suggestions[1].outcome, CommandOutcome::Skipped { .. }));
}

#[tokio::test]
async fn test_identical_files_summarize_as_no_differences() {
    let dir = library(&["one.mp4", "two.mp4"]);
    let mut session = session();
    session
        .submit(&[dir.path().join("one.mp4"), dir.path().join("two.mp4")], false)
        .await;

    let summaries = session.set().summaries().unwrap();
    assert_eq!(summaries.len(), 1);
    assert!(summaries[0].is_identical());
    assert_eq!(summaries[0].lines, vec![NO_DIFFERENCES.to_string()]);

    session.set_only_different(true);
    let table = session.field_table().unwrap();
    // only the file names differ
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].key, FieldKey::Filename);
}

#[tokio::test]
async fn test_resubmit_replaces_set_and_resets_base() {
    let dir = library(&["a.mp4", "b_4k.mkv"]);
    let mut session = session();
    session.submit(&[dir.path().to_path_buf()], false).await;
    session.set_base(0).unwrap();

    let paths: Vec<PathBuf> = vec![dir.path().join("b_4k.mkv")];
    session.submit(&paths, false).await;
    assert_eq!(session.set().len(), 1);
    assert_eq!(session.set().base_index(), Some(0));

    session.clear();
    assert!(session.set().is_empty());
    assert!(session.field_table().is_err());
}
