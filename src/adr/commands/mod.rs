use crate::error::{AdrError, Result};
use crate::model::Record;
use std::path::PathBuf;

pub mod helpers;
pub mod init;
pub mod link;
pub mod list;
pub mod new;
pub mod query;
pub mod status;
pub mod sync;

/// Resolved folder layout for one invocation: where the config file lives
/// and where documents and templates go.
#[derive(Debug, Clone)]
pub struct AdrPaths {
    pub root: PathBuf,
    pub doc_dir: PathBuf,
    pub template_dir: PathBuf,
}

impl AdrPaths {
    pub fn resolve(root: PathBuf, doc_folder: &str, template_folder: &str) -> Self {
        let doc_dir = root.join(doc_folder);
        let template_dir = root.join(template_folder);
        Self {
            root,
            doc_dir,
            template_dir,
        }
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        std::fs::create_dir_all(&self.doc_dir).map_err(AdrError::Io)?;
        std::fs::create_dir_all(&self.template_dir).map_err(AdrError::Io)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Structured outcome of one command: records it touched, records to list,
/// and user-facing messages. Commands never print.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected: Vec<Record>,
    pub listed: Vec<Record>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn failed(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }

    fn fail(content: impl Into<String>) -> Self {
        let mut result = Self::default();
        result.add_message(CmdMessage::error(content));
        result
    }
}
