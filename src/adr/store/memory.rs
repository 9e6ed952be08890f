use super::RecordStore;
use crate::error::{AdrError, Result};
use crate::model::Record;
use crate::template;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// In-memory storage for testing.
/// Holds the metadata record and the document lines per id; no persistence.
#[derive(Default)]
pub struct InMemoryStore {
    records: BTreeMap<u32, (Record, Vec<String>)>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mimic what serialization drops on disk.
    fn strip_content_fields(record: &Record) -> Record {
        let mut stored = record.clone();
        stored.decision.clear();
        stored.consequences.clear();
        stored
    }
}

impl RecordStore for InMemoryStore {
    fn read_metadata(&self, record_id: u32) -> Result<Option<Record>> {
        Ok(self.records.get(&record_id).map(|(r, _)| r.clone()))
    }

    fn read_content(&self, record_id: u32) -> Result<Vec<String>> {
        Ok(self
            .records
            .get(&record_id)
            .map(|(_, lines)| lines.clone())
            .unwrap_or_default())
    }

    fn write_record(&mut self, record: &mut Record) -> Result<u32> {
        record.record_id = self.next_record_id()?;
        record.validate()?;
        record.prepare_for_storage();

        let rendered = template::render(template::DEFAULT_TEMPLATE, record);
        let lines: Vec<String> = rendered.lines().map(|l| l.to_string()).collect();
        self.records.insert(
            record.record_id,
            (Self::strip_content_fields(record), lines),
        );
        Ok(record.record_id)
    }

    fn update_metadata(&mut self, record_id: u32, record: &Record) -> Result<usize> {
        record.validate()?;
        let stored = Self::strip_content_fields(record);
        let bytes = serde_json::to_string_pretty(&stored)
            .map_err(AdrError::Serialization)?
            .len();
        match self.records.get_mut(&record_id) {
            Some((slot, _)) => *slot = stored,
            None => {
                self.records.insert(record_id, (stored, Vec::new()));
            }
        }
        Ok(bytes)
    }

    fn update_content(&mut self, record: &Record, lines: &[String]) -> Result<usize> {
        let (_, slot) = self
            .records
            .get_mut(&record.record_id)
            .ok_or(AdrError::RecordNotFound(record.record_id))?;
        *slot = lines.to_vec();
        Ok(lines.iter().map(|l| l.len()).sum())
    }

    fn next_record_id(&self) -> Result<u32> {
        Ok(self.records.keys().last().map_or(1, |last| last + 1))
    }

    fn record_ids(&self) -> Result<Vec<u32>> {
        Ok(self.records.keys().copied().collect())
    }

    fn content_path(&self, record: &Record) -> Result<PathBuf> {
        Ok(PathBuf::from(format!("{}.md", record.file_name)))
    }

    fn set_read_only(&mut self, _record: &Record, _read_only: bool) -> Result<()> {
        Ok(())
    }

    fn initialized(&self) -> bool {
        !self.records.is_empty()
    }
}
