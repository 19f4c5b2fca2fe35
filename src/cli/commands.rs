//! Command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::app::container::AppContainer;
use crate::app::session::{CommandSuggestion, ComparisonSet};
use crate::cli::args::{CommandArgs, CompareArgs, InspectArgs, PresetsArgs};
use crate::domain::command::synthesize;
use crate::domain::diff::{DiffTable, PairTable};
use crate::domain::fields::{flatten, FlatFields};
use crate::domain::model::MediaRecord;
use crate::domain::presets::PRESETS;
use crate::domain::summary::ConversionSummary;
use crate::output::text::{render_commands, render_fields, render_pair, render_summaries, render_table};
use crate::output::OutputFormat;

/// Serialize `value` in a structured output format
fn structured<T: Serialize>(value: &T, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).context("YAML serialization failed")?,
        _ => serde_json::to_string_pretty(value).context("JSON serialization failed")?,
    })
}

#[derive(Serialize)]
struct InspectOutput<'a> {
    record: &'a MediaRecord,
    fields: FlatFields,
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    info!("Inspecting {}", args.input.display());
    let record = container.extract_interactor().extract(&args.input).await;

    let out = match args.format {
        OutputFormat::Text => render_fields(&flatten(&record)),
        format => structured(
            &InspectOutput {
                record: &record,
                fields: flatten(&record),
            },
            format,
        )?,
    };
    print!("{}", out);
    Ok(())
}

/// Table shape for a comparison
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TableView {
    /// Exactly two entries: transitions from the other entry toward the base
    Pair {
        source: String,
        reference: String,
        #[serde(flatten)]
        table: PairTable,
    },
    Multi(DiffTable),
}

impl TableView {
    pub fn of(set: &ComparisonSet, only_different: bool) -> Result<Self> {
        let base = set
            .base_index()
            .context("nothing to compare: give at least one file or --preset")?;
        if set.len() == 2 {
            let source = 1 - base;
            let table = set.pair_table(source, base, only_different)?;
            return Ok(TableView::Pair {
                source: set.entries()[source].label.clone(),
                reference: set.entries()[base].label.clone(),
                table,
            });
        }
        Ok(TableView::Multi(set.field_table(only_different)?))
    }

    pub fn render(&self, set: &ComparisonSet) -> String {
        match self {
            TableView::Pair {
                source,
                reference,
                table,
            } => render_pair(source, &format!("{} (base)", reference), table),
            TableView::Multi(table) => {
                let labels: Vec<String> = set.entries().iter().map(|e| e.label.clone()).collect();
                render_table(&labels, set.base_index(), table)
            }
        }
    }
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    entries: Vec<&'a str>,
    base: Option<usize>,
    table: TableView,
    #[serde(skip_serializing_if = "Option::is_none")]
    summaries: Option<Vec<ConversionSummary>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commands: Option<Vec<CommandSuggestion>>,
}

/// Execute the compare command
pub async fn compare(container: &dyn AppContainer, args: CompareArgs) -> Result<()> {
    let mut session = container.new_session();
    let analyzed = session.submit(&args.inputs, args.recursive).await;
    info!("Analyzed {} input file(s)", analyzed);
    for name in &args.presets {
        session.add_preset(name)?;
    }
    if let Some(base) = args.base {
        session.set_base(base)?;
    }
    session.set_only_different(args.only_diff);

    let set = session.set();
    let table = TableView::of(set, args.only_diff)?;
    let summaries = if args.summary { Some(set.summaries()?) } else { None };
    let commands = if args.commands {
        Some(set.commands(args.output_dir.as_deref())?)
    } else {
        None
    };

    let out = match args.format {
        OutputFormat::Text => {
            let mut out = table.render(set);
            if let Some(summaries) = &summaries {
                out.push('\n');
                out.push_str(&render_summaries(summaries));
            }
            if let Some(commands) = &commands {
                out.push('\n');
                out.push_str(&render_commands(commands));
            }
            out
        }
        format => structured(
            &CompareOutput {
                entries: set.entries().iter().map(|e| e.label.as_str()).collect(),
                base: set.base_index(),
                table,
                summaries,
                commands,
            },
            format,
        )?,
    };
    print!("{}", out);

    if let Some(path) = &args.report {
        let written = container
            .report_interactor()
            .write(set, args.only_diff, path)
            .await
            .context("Failed to write report")?;
        eprintln!("Report written to {}", written.display());
    }
    Ok(())
}

/// Execute the command command
pub async fn command(container: &dyn AppContainer, args: CommandArgs) -> Result<()> {
    let extractor = container.extract_interactor();
    let records = extractor
        .extract_all(&[args.source.clone(), args.reference.clone()])
        .await;

    let command = synthesize(
        &records[0],
        &records[1],
        &args.source,
        args.output.as_deref(),
    )
    .context("Cannot synthesize a conversion command")?;

    println!("{}", command);
    Ok(())
}

#[derive(Serialize)]
struct PresetOutput {
    name: &'static str,
    description: &'static str,
    fields: FlatFields,
}

/// Execute the presets command
pub fn presets(args: PresetsArgs) -> Result<()> {
    let out = match args.format {
        OutputFormat::Text => {
            let mut out = String::new();
            for preset in PRESETS {
                out.push_str(&format!("{}  ({})\n", preset.name, preset.description));
                for line in render_fields(&preset.to_fields()).lines() {
                    out.push_str(&format!("    {}\n", line));
                }
                out.push('\n');
            }
            out
        }
        format => {
            let list: Vec<PresetOutput> = PRESETS
                .iter()
                .map(|p| PresetOutput {
                    name: p.name,
                    description: p.description,
                    fields: p.to_fields(),
                })
                .collect();
            structured(&list, format)?
        }
    };
    print!("{}", out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fields::FieldKey;
    use crate::domain::model::ProbeDocument;
    use std::path::PathBuf;

    fn set_with_preset() -> ComparisonSet {
        let doc: ProbeDocument =
            serde_json::from_str(include_str!("../../tests/fixtures/h264_1080p.json")).unwrap();
        let mut set = ComparisonSet::new();
        set.add_record(
            PathBuf::from("a.mp4"),
            MediaRecord::from_probe("a.mp4", 1, doc).unwrap(),
        );
        set.add_preset("twitter").unwrap();
        set
    }

    #[test]
    fn test_two_entries_give_pair_view_toward_base() {
        let set = set_with_preset();
        match TableView::of(&set, false).unwrap() {
            TableView::Pair {
                source, reference, table,
            } => {
                assert_eq!(source, "a.mp4");
                assert_eq!(reference, "preset:twitter");
                let res = table.rows.iter().find(|r| r.key == FieldKey::Resolution).unwrap();
                assert_eq!(res.transition.to_string(), "1920x1080 → 1280x720");
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn test_three_entries_give_multi_view() {
        let mut set = set_with_preset();
        set.add_preset("tiktok").unwrap();
        assert!(matches!(TableView::of(&set, true).unwrap(), TableView::Multi(_)));
    }

    #[test]
    fn test_empty_set_is_an_error() {
        assert!(TableView::of(&ComparisonSet::new(), false).is_err());
    }

    #[test]
    fn test_pair_view_serializes_flat() {
        let view = TableView::of(&set_with_preset(), true).unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["source"], "a.mp4");
        assert!(json["rows"].is_array());
        assert!(json["differing_count"].as_u64().unwrap() > 0);
    }
}
