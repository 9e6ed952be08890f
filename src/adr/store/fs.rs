use super::RecordStore;
use crate::error::{AdrError, Result};
use crate::model::{AdrStatus, Record, TemplateType};
use crate::template;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based store: one markdown document and one JSON sidecar per record,
/// both named `{id:05}-{slug}`. Documents are written with `\r\n` line
/// endings; the sidecar is pretty-printed JSON.
pub struct FileStore {
    doc_dir: PathBuf,
    template_dir: PathBuf,
}

impl FileStore {
    pub fn new(doc_dir: PathBuf, template_dir: PathBuf) -> Self {
        Self {
            doc_dir,
            template_dir,
        }
    }

    pub fn doc_dir(&self) -> &Path {
        &self.doc_dir
    }

    /// All files matching `{id:05}-*{ext}`, lexicographically sorted so the
    /// "first match" choice is stable across platforms.
    fn matches(&self, record_id: u32, ext: &str) -> Result<Vec<PathBuf>> {
        if !self.doc_dir.exists() {
            return Ok(Vec::new());
        }
        let prefix = format!("{:05}-", record_id);
        let mut found = Vec::new();
        for entry in fs::read_dir(&self.doc_dir).map_err(AdrError::Io)? {
            let entry = entry.map_err(AdrError::Io)?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with(&prefix) && name.ends_with(ext) {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found)
    }

    fn first_match(&self, record_id: u32, ext: &str) -> Result<Option<PathBuf>> {
        let found = self.matches(record_id, ext)?;
        if found.len() > 1 {
            let names: Vec<String> = found
                .iter()
                .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
                .collect();
            eprintln!(
                "Warning: found more than one matching file, selecting the first from: {}",
                names.join(", ")
            );
        }
        Ok(found.into_iter().next())
    }

    fn get_or_create_template(&mut self, template_type: TemplateType) -> Result<String> {
        let path = self
            .template_dir
            .join(format!("{}.md", template_type.file_stem()));
        if path.exists() {
            return fs::read_to_string(path).map_err(AdrError::Io);
        }
        fs::create_dir_all(&self.template_dir).map_err(AdrError::Io)?;
        fs::write(&path, template::DEFAULT_TEMPLATE).map_err(AdrError::Io)?;
        Ok(template::DEFAULT_TEMPLATE.to_string())
    }

    fn write_lines(path: &Path, lines: &[String]) -> Result<usize> {
        let mut text = lines.join("\r\n");
        text.push_str("\r\n");
        fs::write(path, &text).map_err(AdrError::Io)?;
        Ok(lines.iter().map(|l| l.len()).sum())
    }

    fn write_metadata_file(path: &Path, record: &Record) -> Result<usize> {
        let json = serde_json::to_string_pretty(record).map_err(AdrError::Serialization)?;
        fs::write(path, &json).map_err(AdrError::Io)?;
        Ok(json.len())
    }

    /// A sidecar that cannot be parsed still produces a listable record:
    /// status Error, the failure message as the title.
    fn corrupt_record(record_id: u32, path: &Path, message: String) -> Record {
        let date_time = fs::metadata(path)
            .and_then(|m| m.created())
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        Record {
            record_id,
            status: AdrStatus::Error,
            title: message,
            file_name: path.to_string_lossy().to_string(),
            date_time,
            ..Record::default()
        }
    }
}

impl RecordStore for FileStore {
    fn read_metadata(&self, record_id: u32) -> Result<Option<Record>> {
        let Some(path) = self.first_match(record_id, ".json")? else {
            return Ok(None);
        };
        let content = fs::read_to_string(&path).map_err(AdrError::Io)?;
        match serde_json::from_str::<Record>(&content) {
            Ok(record) => {
                if record.record_id != record_id {
                    eprintln!(
                        "Warning: {} contains invalid record id: {}",
                        path.display(),
                        record.record_id
                    );
                }
                Ok(Some(record))
            }
            Err(e) => Ok(Some(Self::corrupt_record(record_id, &path, e.to_string()))),
        }
    }

    fn read_content(&self, record_id: u32) -> Result<Vec<String>> {
        let Some(path) = self.first_match(record_id, ".md")? else {
            return Ok(Vec::new());
        };
        let content = fs::read_to_string(path).map_err(AdrError::Io)?;
        Ok(content.lines().map(|l| l.to_string()).collect())
    }

    fn write_record(&mut self, record: &mut Record) -> Result<u32> {
        record.record_id = self.next_record_id()?;
        record.validate()?;
        record.prepare_for_storage();

        fs::create_dir_all(&self.doc_dir).map_err(AdrError::Io)?;

        let layout = self.get_or_create_template(record.template_type)?;
        let rendered = template::render(&layout, record);
        let lines: Vec<String> = rendered.lines().map(|l| l.to_string()).collect();
        Self::write_lines(&self.doc_dir.join(format!("{}.md", record.file_name)), &lines)?;

        Self::write_metadata_file(
            &self.doc_dir.join(format!("{}.json", record.file_name)),
            record,
        )?;
        Ok(record.record_id)
    }

    fn update_metadata(&mut self, record_id: u32, record: &Record) -> Result<usize> {
        record.validate()?;
        // Self-healing: a record bootstrapped from markdown has no sidecar
        // yet, so derive the path from its file name and create one.
        let path = match self.first_match(record_id, ".json")? {
            Some(path) => path,
            None if !record.file_name.is_empty() => {
                self.doc_dir.join(format!("{}.json", record.file_name))
            }
            None => return Err(AdrError::RecordNotFound(record_id)),
        };
        Self::write_metadata_file(&path, record)
    }

    fn update_content(&mut self, record: &Record, lines: &[String]) -> Result<usize> {
        let Some(path) = self.first_match(record.record_id, ".md")? else {
            return Err(AdrError::RecordNotFound(record.record_id));
        };
        let mut backup = path.clone();
        backup.set_extension("md.bak");
        fs::copy(&path, &backup).map_err(AdrError::Io)?;

        let written = Self::write_lines(&path, lines)?;

        if backup.exists() {
            fs::remove_file(backup).map_err(AdrError::Io)?;
        }
        Ok(written)
    }

    fn next_record_id(&self) -> Result<u32> {
        Ok(self.record_ids()?.last().map_or(1, |last| last + 1))
    }

    fn record_ids(&self) -> Result<Vec<u32>> {
        if !self.doc_dir.exists() {
            return Ok(Vec::new());
        }
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.doc_dir).map_err(AdrError::Io)? {
            let entry = entry.map_err(AdrError::Io)?;
            let name = entry.file_name().to_string_lossy().to_string();
            if !name.ends_with(".md") {
                continue;
            }
            if let Some(prefix) = name.split('-').next() {
                if let Ok(id) = prefix.parse::<u32>() {
                    ids.push(id);
                }
            }
        }
        ids.sort_unstable();
        ids.dedup();
        Ok(ids)
    }

    fn content_path(&self, record: &Record) -> Result<PathBuf> {
        Ok(match self.first_match(record.record_id, ".md")? {
            Some(path) => path,
            None => self.doc_dir.join(format!("{}.md", record.file_name)),
        })
    }

    fn set_read_only(&mut self, record: &Record, read_only: bool) -> Result<()> {
        for ext in [".md", ".json"] {
            if let Some(path) = self.first_match(record.record_id, ext)? {
                let mut permissions = fs::metadata(&path).map_err(AdrError::Io)?.permissions();
                permissions.set_readonly(read_only);
                fs::set_permissions(&path, permissions).map_err(AdrError::Io)?;
            }
        }
        Ok(())
    }

    fn initialized(&self) -> bool {
        self.record_ids().map(|ids| !ids.is_empty()).unwrap_or(false)
    }
}
