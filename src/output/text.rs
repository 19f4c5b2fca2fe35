//! Plain-text tables for terminal output

use crate::app::session::{CommandOutcome, CommandSuggestion};
use crate::domain::diff::{DiffTable, PairTable};
use crate::domain::fields::FlatFields;
use crate::domain::summary::ConversionSummary;

/// Marker placed in front of differing rows
const DIFF_MARKER: &str = "*";

fn width(text: &str) -> usize {
    text.chars().count()
}

fn pad(text: &str, to: usize) -> String {
    let mut out = text.to_string();
    out.extend(std::iter::repeat(' ').take(to.saturating_sub(width(text))));
    out
}

/// Lay out rows as space-separated columns
fn columns(rows: &[Vec<String>]) -> String {
    let count = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..count)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .map(|s| width(s))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(c, cell)| {
                if c + 1 == row.len() {
                    cell.clone()
                } else {
                    pad(cell, widths[c])
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}

/// Single-entry display as `label: value` lines
pub fn render_fields(fields: &FlatFields) -> String {
    let rows: Vec<Vec<String>> = fields
        .iter()
        .map(|(key, value)| vec![format!("{}:", key), value.text.clone()])
        .collect();
    columns(&rows)
}

/// N-way table; the base column is marked with `(base)`
pub fn render_table(labels: &[String], base: Option<usize>, table: &DiffTable) -> String {
    let mut header = vec![String::new(), "field".to_string()];
    header.extend(labels.iter().enumerate().map(|(i, label)| {
        if Some(i) == base {
            format!("{} (base)", label)
        } else {
            label.clone()
        }
    }));

    let mut rows = vec![header];
    for row in &table.rows {
        let mut line = vec![
            if row.differing { DIFF_MARKER } else { "" }.to_string(),
            row.key.to_string(),
        ];
        line.extend(row.values.iter().cloned());
        rows.push(line);
    }

    let mut out = columns(&rows);
    out.push_str(&format!(
        "\n{} of {} fields differ\n",
        table.differing_count, table.total_count
    ));
    out
}

/// Two-entry table with a change column
pub fn render_pair(source: &str, reference: &str, table: &PairTable) -> String {
    let mut rows = vec![vec![
        String::new(),
        "field".to_string(),
        source.to_string(),
        reference.to_string(),
        "change".to_string(),
    ]];
    for row in &table.rows {
        rows.push(vec![
            if row.differing { DIFF_MARKER } else { "" }.to_string(),
            row.key.to_string(),
            row.source.clone(),
            row.reference.clone(),
            row.transition.to_string(),
        ]);
    }

    let mut out = columns(&rows);
    out.push_str(&format!(
        "\n{} of {} fields differ\n",
        table.differing_count, table.total_count
    ));
    out
}

pub fn render_summaries(summaries: &[ConversionSummary]) -> String {
    summaries
        .iter()
        .map(|s| format!("{}\n", s))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_commands(suggestions: &[CommandSuggestion]) -> String {
    let mut out = String::new();
    for suggestion in suggestions {
        out.push_str(&format!("# {} → {}\n", suggestion.source, suggestion.reference));
        match &suggestion.outcome {
            CommandOutcome::Ready { command } => out.push_str(&format!("{}\n", command)),
            CommandOutcome::Skipped { reason } => out.push_str(&format!("# skipped: {}\n", reason)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diff::{compare_pair, diff};
    use crate::domain::fields::FieldKey;

    fn fields(codec: &str, width: &str) -> FlatFields {
        FlatFields::from_pairs([(FieldKey::VideoCodec, codec), (FieldKey::Width, width)])
    }

    #[test]
    fn test_render_fields_aligns_values() {
        let out = render_fields(&fields("h264", "1920"));
        assert_eq!(out, "video codec:         h264\nresolution (width):  1920\n");
    }

    #[test]
    fn test_render_table_marks_base_and_differences() {
        let table = diff(&[fields("h264", "1920"), fields("hevc", "1920")], false);
        let out = render_table(&["a.mp4".to_string(), "b.mkv".to_string()], Some(1), &table);
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].contains("b.mkv (base)"));
        assert!(lines[1].starts_with("*  video codec"));
        assert!(lines[2].starts_with("   resolution (width)"));
        assert_eq!(lines.last().copied(), Some("1 of 2 fields differ"));
    }

    #[test]
    fn test_render_pair_has_change_column() {
        let table = compare_pair(&fields("h264", "1280"), &fields("hevc", "1920"), false);
        let out = render_pair("a", "b", &table);
        assert!(out.contains("h264 → hevc"));
        assert!(out.contains("+640.00 (1.50×)"));
    }
}
