// Diff engine - N-way field tables and pairwise transitions

use serde::Serialize;
use std::fmt;

use crate::domain::fields::{FieldKey, FieldKind, FieldValue, FlatFields, Quantity};
use crate::utils::NOT_AVAILABLE;

/// One key across every compared entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffRow {
    pub key: FieldKey,
    pub values: Vec<String>,
    pub differing: bool,
}

/// Result of an N-way comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiffTable {
    pub rows: Vec<DiffRow>,
    /// Counted over the unfiltered key union
    pub differing_count: usize,
    pub total_count: usize,
}

/// How a value changed between two entries
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Same,
    /// One side has no value
    Different,
    Delta { delta: f64, ratio: f64 },
    Ratio(f64),
    Text { from: String, to: String },
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transition::Same => f.write_str("same"),
            Transition::Different => f.write_str("different"),
            Transition::Delta { delta, ratio } => {
                let sign = if *ratio >= 1.0 { "+" } else { "" };
                write!(f, "{}{:.2} ({:.2}×)", sign, delta, ratio)
            }
            Transition::Ratio(ratio) => write!(f, "{:.2}×", ratio),
            Transition::Text { from, to } => write!(f, "{} → {}", from, to),
        }
    }
}

impl Serialize for Transition {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Row of a two-entry comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairRow {
    pub key: FieldKey,
    pub source: String,
    pub reference: String,
    pub differing: bool,
    pub transition: Transition,
}

/// Result of a two-entry comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairTable {
    pub rows: Vec<PairRow>,
    pub differing_count: usize,
    pub total_count: usize,
}

/// Union of keys across inputs, first-seen order
fn key_union(inputs: &[&FlatFields]) -> Vec<FieldKey> {
    let mut keys: Vec<FieldKey> = Vec::new();
    for fields in inputs {
        for key in fields.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}

fn value_or_missing(fields: &FlatFields, key: FieldKey) -> FieldValue {
    fields
        .get(key)
        .cloned()
        .unwrap_or_else(|| FieldValue::text(NOT_AVAILABLE))
}

/// Compare any number of flattened entries
///
/// Absent keys read as `"N/A"`. A row differs when its values are not all
/// the same string.
pub fn diff(inputs: &[FlatFields], only_different: bool) -> DiffTable {
    let refs: Vec<&FlatFields> = inputs.iter().collect();
    let keys = key_union(&refs);
    let total_count = keys.len();

    let mut rows = Vec::with_capacity(keys.len());
    let mut differing_count = 0;

    for key in keys {
        let values: Vec<String> = inputs
            .iter()
            .map(|fields| value_or_missing(fields, key).text)
            .collect();
        let differing = values.iter().any(|v| *v != values[0]);
        if differing {
            differing_count += 1;
        }
        if differing || !only_different {
            rows.push(DiffRow {
                key,
                values,
                differing,
            });
        }
    }

    DiffTable {
        rows,
        differing_count,
        total_count,
    }
}

/// Annotate how `key` moved from `source` to `reference`
pub fn transition(key: FieldKey, source: &FieldValue, reference: &FieldValue) -> Transition {
    if source.text == reference.text {
        return Transition::Same;
    }
    if source.text == NOT_AVAILABLE || reference.text == NOT_AVAILABLE {
        return Transition::Different;
    }

    let quantities = match (source.quantity, reference.quantity) {
        (Quantity::Unknown, _) | (_, Quantity::Unknown) => None,
        (a, b) => a.as_f64().zip(b.as_f64()).filter(|(base, _)| *base > 0.0),
    };

    if let Some((a, b)) = quantities {
        match key.kind() {
            FieldKind::Numeric => {
                return Transition::Delta {
                    delta: b - a,
                    ratio: b / a,
                }
            }
            FieldKind::Size | FieldKind::Bitrate => return Transition::Ratio(b / a),
            FieldKind::Text => {}
        }
    }

    Transition::Text {
        from: source.text.clone(),
        to: reference.text.clone(),
    }
}

/// Compare two entries with a transition per field
pub fn compare_pair(source: &FlatFields, reference: &FlatFields, only_different: bool) -> PairTable {
    let keys = key_union(&[source, reference]);
    let total_count = keys.len();

    let mut rows = Vec::with_capacity(keys.len());
    let mut differing_count = 0;

    for key in keys {
        let a = value_or_missing(source, key);
        let b = value_or_missing(reference, key);
        let differing = a.text != b.text;
        if differing {
            differing_count += 1;
        } else if only_different {
            continue;
        }

        rows.push(PairRow {
            key,
            transition: transition(key, &a, &b),
            source: a.text,
            reference: b.text,
            differing,
        });
    }

    PairTable {
        rows,
        differing_count,
        total_count,
    }
}
