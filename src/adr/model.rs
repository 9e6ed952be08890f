use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{AdrError, Result};

/// Lifecycle status of a record. `Error` is a sentinel produced when a
/// metadata file cannot be read; it never participates in transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum AdrStatus {
    #[default]
    New,
    Proposed,
    Final,
    Accepted,
    Obsolete,
    Error,
}

impl AdrStatus {
    /// The transition table enforced by every status-changing command.
    /// Accepted and Obsolete are end states; Obsolete is terminal and a
    /// record is never resurrected from it.
    pub fn can_transition_to(self, next: AdrStatus) -> bool {
        use AdrStatus::*;
        matches!(
            (self, next),
            (New | Final, Proposed)
                | (New | Proposed, Final)
                | (New | Proposed | Final, Accepted)
                | (New | Proposed | Final | Accepted, Obsolete)
        )
    }
}

impl fmt::Display for AdrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AdrStatus::New => "New",
            AdrStatus::Proposed => "Proposed",
            AdrStatus::Final => "Final",
            AdrStatus::Accepted => "Accepted",
            AdrStatus::Obsolete => "Obsolete",
            AdrStatus::Error => "Error",
        };
        f.write_str(name)
    }
}

impl FromStr for AdrStatus {
    type Err = String;

    // Case-sensitive on purpose: a garbled status token in a document must
    // not be mistaken for a real one.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "New" => Ok(AdrStatus::New),
            "Proposed" => Ok(AdrStatus::Proposed),
            "Final" => Ok(AdrStatus::Final),
            "Accepted" => Ok(AdrStatus::Accepted),
            "Obsolete" => Ok(AdrStatus::Obsolete),
            "Error" => Ok(AdrStatus::Error),
            _ => Err(format!("unknown status: {}", s)),
        }
    }
}

/// Which template body was used to render the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemplateType {
    Init,
    #[default]
    Ad,
    Asr,
    Revision,
}

impl TemplateType {
    /// File stem for the template file in the template folder.
    pub fn file_stem(self) -> &'static str {
        match self {
            TemplateType::Init => "init",
            TemplateType::Ad => "ad",
            TemplateType::Asr => "asr",
            TemplateType::Revision => "revision",
        }
    }
}

/// Weak reference to the record this record revises. Carried by id with
/// cached display fields; resolved through the store when needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supersedes {
    pub record_id: u32,
    pub title: String,
    pub file_name: String,
}

impl From<&Record> for Supersedes {
    fn from(record: &Record) -> Self {
        Self {
            record_id: record.record_id,
            title: record.title.clone(),
            file_name: record.file_name.clone(),
        }
    }
}

pub const DEFAULT_TITLE: &str = "Record Architecture Decisions";

/// Metadata for one Architecture Decision Record.
///
/// `decision` and `consequences` live only in the markdown document; they are
/// refreshed in memory by the synchronizer but never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    #[serde(default = "Utc::now")]
    pub date_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_name: String,
    #[serde(default)]
    pub record_id: u32,
    #[serde(default)]
    pub status: AdrStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supersedes: Option<Supersedes>,
    #[serde(default)]
    pub template_type: TemplateType,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,
    #[serde(skip)]
    pub decision: String,
    #[serde(skip)]
    pub consequences: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub references: BTreeMap<u32, String>,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Default for Record {
    fn default() -> Self {
        Self {
            date_time: Utc::now(),
            file_name: String::new(),
            record_id: 0,
            status: AdrStatus::default(),
            supersedes: None,
            template_type: TemplateType::default(),
            title: default_title(),
            context: String::new(),
            decision: String::new(),
            consequences: String::new(),
            references: BTreeMap::new(),
        }
    }
}

impl Record {
    /// Check the invariants required before any write.
    pub fn validate(&self) -> Result<()> {
        if self.record_id == 0 {
            return Err(AdrError::Api("Record id must be a positive value".into()));
        }
        if self.title.is_empty() {
            return Err(AdrError::Api("Title cannot be empty".into()));
        }
        Ok(())
    }

    /// Derive `file_name` from the id and a sanitized title.
    pub fn prepare_for_storage(&mut self) {
        self.file_name = format!(
            "{:05}-{}",
            self.record_id,
            sanitize_file_name(&self.title)
        );
    }

    /// Record a reference remark for `target_id`. Remarks for one target are
    /// kept as a semicolon-joined set; re-adding an identical remark is a
    /// no-op.
    pub fn update_reference_remark(&mut self, target_id: u32, remark: &str) {
        let entry = self.references.entry(target_id).or_default();
        let mut remarks: Vec<&str> = entry.split(';').filter(|s| !s.is_empty()).collect();
        if !remarks.contains(&remark) {
            remarks.push(remark);
        }
        *entry = remarks.join(";");
    }

    /// One compact listing row.
    pub fn format_line(&self) -> String {
        format!(
            "{:05} {} {:<10} {}",
            self.record_id,
            self.date_time.format("%Y%m%d"),
            self.status.to_string(),
            self.title
        )
    }

    /// Multi-line listing row for verbose output.
    pub fn verbose_string(&self) -> String {
        format!(
            "{:05} {} Status: {}\nTitle:   {}\nContext: {}\n---",
            self.record_id,
            self.date_time.format("%Y-%b-%d"),
            self.status,
            self.title,
            self.context
        )
    }
}

fn sanitize_file_name(title: &str) -> String {
    title.replace(' ', "-").to_lowercase()
}
