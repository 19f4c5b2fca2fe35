//! Comparison session
//!
//! A [`ComparisonSet`] holds the entries of one comparison (analyzed files and
//! presets) and the selected base. A [`Session`] owns one set plus the view
//! toggles and the extractor used to fill it. Nothing here is process-global;
//! every caller gets its own session.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::app::extract_interactor::{expand_inputs, ExtractInteractor};
use crate::domain::command::{self, TranscodeCommand};
use crate::domain::diff::{self, DiffTable, PairTable};
use crate::domain::errors::DomainError;
use crate::domain::fields::{self, FlatFields};
use crate::domain::model::MediaRecord;
use crate::domain::presets::{self, Preset};
use crate::domain::summary::{self, ConversionSummary, PRESET_ENTRY};
use crate::utils::path::PathUtils;

/// Where an entry came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum EntrySource {
    File(PathBuf),
    Preset(&'static str),
}

/// One column of a comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub label: String,
    pub source: EntrySource,
    /// Absent for presets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<MediaRecord>,
    pub fields: FlatFields,
}

impl Entry {
    pub fn from_record(path: PathBuf, record: MediaRecord) -> Self {
        Self {
            label: record.filename.clone(),
            fields: fields::flatten(&record),
            source: EntrySource::File(path),
            record: Some(record),
        }
    }

    pub fn from_preset(preset: &'static Preset) -> Self {
        Self {
            label: format!("preset:{}", preset.name),
            source: EntrySource::Preset(preset.name),
            record: None,
            fields: preset.to_fields(),
        }
    }

    pub fn is_preset(&self) -> bool {
        matches!(self.source, EntrySource::Preset(_))
    }

    pub fn is_error(&self) -> bool {
        self.record.as_ref().map(MediaRecord::is_error).unwrap_or(false)
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            EntrySource::File(path) => Some(path),
            EntrySource::Preset(_) => None,
        }
    }
}

/// Outcome of command synthesis for one entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CommandOutcome {
    Ready { command: TranscodeCommand },
    Skipped { reason: String },
}

/// Command suggestion for one non-base entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandSuggestion {
    pub source: String,
    pub reference: String,
    pub outcome: CommandOutcome,
}

/// Ordered entries plus the selected base
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComparisonSet {
    entries: Vec<Entry>,
    base: Option<usize>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an analyzed file, returning its index
    pub fn add_record(&mut self, path: PathBuf, record: MediaRecord) -> usize {
        self.entries.push(Entry::from_record(path, record));
        self.entries.len() - 1
    }

    /// Add a named preset, returning its index
    pub fn add_preset(&mut self, name: &str) -> Result<usize, DomainError> {
        let preset = presets::find(name)?;
        self.entries.push(Entry::from_preset(preset));
        Ok(self.entries.len() - 1)
    }

    /// Select the base entry
    pub fn set_base(&mut self, index: usize) -> Result<(), DomainError> {
        if index >= self.entries.len() {
            return Err(DomainError::InvalidBaseIndex {
                index,
                len: self.entries.len(),
            });
        }
        self.base = Some(index);
        Ok(())
    }

    /// Selected base, defaulting to the last entry
    pub fn base_index(&self) -> Option<usize> {
        self.base.or_else(|| self.entries.len().checked_sub(1))
    }

    pub fn base(&self) -> Option<&Entry> {
        self.base_index().and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn require_entries(&self) -> Result<usize, DomainError> {
        self.base_index()
            .ok_or_else(|| DomainError::BadArgs("the comparison set is empty".to_string()))
    }

    /// N-way field table over every entry
    pub fn field_table(&self, only_different: bool) -> Result<DiffTable, DomainError> {
        self.require_entries()?;
        let inputs: Vec<FlatFields> = self.entries.iter().map(|e| e.fields.clone()).collect();
        Ok(diff::diff(&inputs, only_different))
    }

    /// Two-entry table with transitions from `source` toward `reference`
    pub fn pair_table(
        &self,
        source: usize,
        reference: usize,
        only_different: bool,
    ) -> Result<PairTable, DomainError> {
        let len = self.entries.len();
        let get = |index: usize| {
            self.entries
                .get(index)
                .ok_or(DomainError::InvalidBaseIndex { index, len })
        };
        let (a, b) = (get(source)?, get(reference)?);
        Ok(diff::compare_pair(&a.fields, &b.fields, only_different))
    }

    /// One summary per non-base entry, each toward the base
    pub fn summaries(&self) -> Result<Vec<ConversionSummary>, DomainError> {
        let base_index = self.require_entries()?;
        let base = &self.entries[base_index];

        Ok(self
            .entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != base_index)
            .map(|(_, entry)| match (&entry.record, &base.record) {
                (Some(source), Some(reference)) => summary::summarize(source, reference),
                _ => ConversionSummary::sentinel(&entry.label, &base.label, PRESET_ENTRY),
            })
            .collect())
    }

    /// One command per non-base file entry, converting it toward the base
    pub fn commands(&self, output_dir: Option<&Path>) -> Result<Vec<CommandSuggestion>, DomainError> {
        let base_index = self.require_entries()?;
        let base = &self.entries[base_index];
        let base_record = base.record.as_ref().ok_or_else(|| {
            DomainError::MissingStreamData(format!(
                "base entry {} is a preset; choose a file as base to synthesize commands",
                base.label
            ))
        })?;
        let base_stem = base
            .path()
            .map(PathUtils::get_stem)
            .unwrap_or_else(|| base.label.clone());

        let mut suggestions = Vec::new();
        for (i, entry) in self.entries.iter().enumerate() {
            if i == base_index {
                continue;
            }
            let (Some(record), Some(path)) = (&entry.record, entry.path()) else {
                continue;
            };

            let output = command::batch_output(path, &base_stem, base_record, output_dir);
            let outcome = match command::synthesize(record, base_record, path, Some(&output)) {
                Ok(command) => CommandOutcome::Ready { command },
                Err(e) => CommandOutcome::Skipped {
                    reason: e.to_string(),
                },
            };
            suggestions.push(CommandSuggestion {
                source: entry.label.clone(),
                reference: base.label.clone(),
                outcome,
            });
        }
        Ok(suggestions)
    }
}

/// Interactive comparison state for one user
pub struct Session {
    extractor: Arc<ExtractInteractor>,
    set: ComparisonSet,
    only_different: bool,
}

impl Session {
    pub fn new(extractor: Arc<ExtractInteractor>) -> Self {
        Self {
            extractor,
            set: ComparisonSet::new(),
            only_different: false,
        }
    }

    /// Analyze `inputs` and replace the current set with the result
    pub async fn submit(&mut self, inputs: &[PathBuf], recursive: bool) -> usize {
        let paths = expand_inputs(inputs, recursive);
        let records = self.extractor.extract_all(&paths).await;

        let mut set = ComparisonSet::new();
        for (path, record) in paths.into_iter().zip(records) {
            set.add_record(path, record);
        }
        info!("Session now holds {} entries", set.len());
        self.set = set;
        self.set.len()
    }

    pub fn add_preset(&mut self, name: &str) -> Result<usize, DomainError> {
        let index = self.set.add_preset(name)?;
        debug!("Added preset {} at index {}", name, index);
        Ok(index)
    }

    pub fn set_base(&mut self, index: usize) -> Result<(), DomainError> {
        self.set.set_base(index)
    }

    pub fn set_only_different(&mut self, only_different: bool) {
        self.only_different = only_different;
    }

    pub fn only_different(&self) -> bool {
        self.only_different
    }

    pub fn clear(&mut self) {
        self.set = ComparisonSet::new();
    }

    pub fn set(&self) -> &ComparisonSet {
        &self.set
    }

    pub fn field_table(&self) -> Result<DiffTable, DomainError> {
        self.set.field_table(self.only_different)
    }
}

#[cfg(test)]
mod tests;
