// Unit tests for the comparison session

use super::*;
use async_trait::async_trait;

use crate::domain::diff::Transition;
use crate::domain::errors::ExtractionError;
use crate::domain::fields::FieldKey;
use crate::domain::model::ProbeDocument;
use crate::ports::ProbePort;

const H264_1080P: &str = include_str!("../../../tests/fixtures/h264_1080p.json");
const HEVC_HDR_4K: &str = include_str!("../../../tests/fixtures/hevc_hdr_4k.json");

fn record(name: &str, json: &str) -> MediaRecord {
    let doc: ProbeDocument = serde_json::from_str(json).unwrap();
    MediaRecord::from_probe(name, 10_000_000, doc).unwrap()
}

fn two_file_set() -> ComparisonSet {
    let mut set = ComparisonSet::new();
    set.add_record(PathBuf::from("/v/a.mp4"), record("a.mp4", H264_1080P));
    set.add_record(PathBuf::from("/v/b.mkv"), record("b.mkv", HEVC_HDR_4K));
    set
}

#[test]
fn test_base_defaults_to_last_entry() {
    let mut set = two_file_set();
    assert_eq!(set.base_index(), Some(1));
    set.set_base(0).unwrap();
    assert_eq!(set.base_index(), Some(0));
    assert_eq!(
        set.set_base(5).unwrap_err(),
        DomainError::InvalidBaseIndex { index: 5, len: 2 }
    );
    assert_eq!(ComparisonSet::new().base_index(), None);
}

#[test]
fn test_empty_set_rejects_tables() {
    let set = ComparisonSet::new();
    assert!(matches!(set.field_table(false), Err(DomainError::BadArgs(_))));
    assert!(matches!(set.summaries(), Err(DomainError::BadArgs(_))));
}

#[test]
fn test_two_file_summary_reads_source_to_base() {
    let set = two_file_set();
    let summaries = set.summaries().unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].title(), "Conversion summary: a.mp4 → b.mkv");
    assert_eq!(
        summaries[0].lines[0],
        "[container] mov,mp4,m4a,3gp,3g2,mj2 → matroska,webm"
    );
    assert!(summaries[0]
        .lines
        .contains(&"[HDR format] SDR → HDR10/HDR10+".to_string()));
}

#[test]
fn test_pair_table_uses_typed_quantities() {
    let set = two_file_set();
    let table = set.pair_table(0, 1, true).unwrap();
    let width = table.rows.iter().find(|r| r.key == FieldKey::Width).unwrap();
    assert_eq!(width.transition.to_string(), "+1920.00 (2.00×)");
    let bitrate = table
        .rows
        .iter()
        .find(|r| r.key == FieldKey::VideoBitrate)
        .unwrap();
    assert_eq!(bitrate.transition.to_string(), "5.00×");
    assert!(set.pair_table(0, 9, false).is_err());
}

#[test]
fn test_preset_is_string_diffed_but_not_narrated() {
    let mut set = ComparisonSet::new();
    set.add_record(PathBuf::from("/v/a.mp4"), record("a.mp4", H264_1080P));
    set.add_preset("youtube-hd").unwrap();

    let table = set.field_table(false).unwrap();
    let resolution = table
        .rows
        .iter()
        .find(|r| r.key == FieldKey::Resolution)
        .unwrap();
    assert_eq!(resolution.values, vec!["1920x1080", "1920x1080"]);
    assert!(!resolution.differing);

    let profile = table
        .rows
        .iter()
        .find(|r| r.key == FieldKey::ColorSpace)
        .unwrap();
    assert_eq!(profile.values[1], "N/A");
    assert!(profile.differing);

    let pair = set.pair_table(0, 1, false).unwrap();
    let color = pair.rows.iter().find(|r| r.key == FieldKey::ColorSpace).unwrap();
    assert_eq!(color.transition, Transition::Different);

    let summaries = set.summaries().unwrap();
    assert_eq!(summaries[0].lines, vec![PRESET_ENTRY]);

    assert!(matches!(
        set.commands(None),
        Err(DomainError::MissingStreamData(_))
    ));
}

#[test]
fn test_commands_skip_presets_and_name_outputs() {
    let mut set = two_file_set();
    set.add_preset("tiktok").unwrap();
    set.set_base(1).unwrap();

    let commands = set.commands(Some(Path::new("/out"))).unwrap();
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].source, "a.mp4");
    match &commands[0].outcome {
        CommandOutcome::Ready { command } => {
            assert_eq!(command.output(), Some("/out/a_to_b.mkv"));
            assert_eq!(command.arg_value("-c:v"), Some("libx265"));
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_errored_entry_is_skipped_not_fatal() {
    let mut set = two_file_set();
    let failed = MediaRecord::failed("gone.mp4", 0, &ExtractionError::FileNotFound("gone.mp4".into()));
    set.add_record(PathBuf::from("gone.mp4"), failed);
    set.set_base(1).unwrap();

    let commands = set.commands(None).unwrap();
    assert_eq!(commands.len(), 2);
    assert!(matches!(commands[1].outcome, CommandOutcome::Skipped { .. }));

    let summaries = set.summaries().unwrap();
    assert_eq!(summaries[1].lines, vec![crate::domain::summary::ERRORED_ENTRY]);
}

struct FixtureProbe;

#[async_trait]
impl ProbePort for FixtureProbe {
    async fn probe(&self, _path: &Path) -> Result<ProbeDocument, ExtractionError> {
        serde_json::from_str(H264_1080P).map_err(|e| ExtractionError::ParseError(e.to_string()))
    }
}

#[tokio::test]
async fn test_submit_replaces_set_wholesale() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.mp4");
    std::fs::write(&a, b"a").unwrap();

    let mut session = Session::new(Arc::new(ExtractInteractor::new(Arc::new(FixtureProbe))));
    session.submit(&[a.clone(), dir.path().join("missing.mp4")], false).await;
    session.add_preset("twitter").unwrap();
    assert_eq!(session.set().len(), 3);
    assert!(session.set().entries()[1].is_error());

    session.submit(&[a], false).await;
    assert_eq!(session.set().len(), 1);
    assert!(session.set().entries().iter().all(|e| !e.is_preset()));

    session.set_only_different(true);
    let table = session.field_table().unwrap();
    assert!(table.rows.is_empty());
    assert!(table.total_count > 0);

    session.clear();
    assert!(session.set().is_empty());
}
