//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for all
//! ADR operations, regardless of the UI driving them.
//!
//! The facade dispatches to the command functions, normalizes inputs
//! (string record ids from the CLI become `u32`s here) and returns
//! structured `Result<CmdResult>` values. It holds no business logic and
//! performs no I/O of its own.
//!
//! `AdrApi<S: RecordStore>` is generic over the storage backend:
//! `AdrApi<FileStore>` in production, `AdrApi<InMemoryStore>` in tests.

use crate::commands;
use crate::error::Result;
use crate::model::AdrStatus;
use crate::store::RecordStore;

/// The main API facade for ADR operations.
pub struct AdrApi<S: RecordStore> {
    store: S,
    paths: commands::AdrPaths,
    config: crate::config::AdrConfig,
}

impl<S: RecordStore> AdrApi<S> {
    pub fn new(store: S, paths: commands::AdrPaths, config: crate::config::AdrConfig) -> Self {
        Self {
            store,
            paths,
            config,
        }
    }

    pub fn init(&mut self) -> Result<commands::CmdResult> {
        commands::init::run(&mut self.store, &self.paths, &self.config)
    }

    pub fn new_record(
        &mut self,
        kind: commands::new::NewKind,
        title: &str,
        context: Option<&str>,
    ) -> Result<commands::CmdResult> {
        commands::new::run(&mut self.store, kind, title, context)
    }

    pub fn link(
        &mut self,
        source_id: &str,
        target_id: &str,
        remark: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let Some((source_id, target_id)) = parse_id_pair(source_id, target_id) else {
            return Ok(invalid_ids("No link has been made."));
        };
        let remark = remark.unwrap_or(commands::link::DEFAULT_REMARK);
        commands::link::link(&mut self.store, source_id, target_id, remark)
    }

    pub fn unlink(&mut self, source_id: &str, target_id: &str) -> Result<commands::CmdResult> {
        let Some((source_id, target_id)) = parse_id_pair(source_id, target_id) else {
            return Ok(invalid_ids("No link has been removed."));
        };
        commands::link::unlink(&mut self.store, source_id, target_id)
    }

    pub fn list(&self, desc: bool) -> Result<commands::CmdResult> {
        commands::list::run(&self.store, desc)
    }

    pub fn find(
        &self,
        terms: &[String],
        desc: bool,
        full: bool,
    ) -> Result<commands::CmdResult> {
        commands::query::run(&self.store, terms, desc, full)
    }

    pub fn sync(&mut self, start_at: u32, only_record: Option<u32>) -> Result<commands::CmdResult> {
        commands::sync::run(&mut self.store, start_at, only_record)
    }

    pub fn set_status(
        &mut self,
        record_id: &str,
        target: AdrStatus,
        remark: Option<&str>,
    ) -> Result<commands::CmdResult> {
        let Some(record_id) = parse_id(record_id) else {
            return Ok(invalid_ids(format!(
                "Status has not been changed to {}.",
                target
            )));
        };
        commands::status::run(&mut self.store, record_id, target, remark)
    }

    pub fn content_path(&self, record: &crate::model::Record) -> Result<std::path::PathBuf> {
        self.store.content_path(record)
    }

    pub fn paths(&self) -> &commands::AdrPaths {
        &self.paths
    }
}

/// Parse a CLI record id. Ids are positive, so `0` is rejected alongside
/// everything non-numeric.
fn parse_id(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|id| *id > 0)
}

fn parse_id_pair(source: &str, target: &str) -> Option<(u32, u32)> {
    Some((parse_id(source)?, parse_id(target)?))
}

fn invalid_ids(followup: impl Into<String>) -> commands::CmdResult {
    let mut result = commands::CmdResult::default();
    result.add_message(commands::CmdMessage::error(
        "Record ids should be valid positive identifiers.",
    ));
    result.add_message(commands::CmdMessage::warning(followup));
    result
}

pub use commands::new::NewKind;
pub use commands::{AdrPaths, CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AdrConfig;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn api() -> (AdrApi<InMemoryStore>, TempDir) {
        let temp = TempDir::new().unwrap();
        let config = AdrConfig::default();
        let paths = AdrPaths::resolve(
            temp.path().to_path_buf(),
            &config.doc_folder,
            &config.template_folder,
        );
        (AdrApi::new(InMemoryStore::new(), paths, config), temp)
    }

    #[test]
    fn link_rejects_non_numeric_ids() {
        let (mut api, _temp) = api();
        let result = api.link("one", "2", None).unwrap();
        assert!(result.failed());
    }

    #[test]
    fn link_rejects_zero_ids() {
        let (mut api, _temp) = api();
        let result = api.link("0", "2", None).unwrap();
        assert!(result.failed());
    }

    #[test]
    fn status_rejects_invalid_id() {
        let (mut api, _temp) = api();
        let result = api.set_status("abc", AdrStatus::Proposed, None).unwrap();
        assert!(result.failed());
    }

    #[test]
    fn facade_drives_a_full_workflow() {
        let (mut api, _temp) = api();
        assert!(!api.init().unwrap().failed());
        assert!(!api
            .new_record(NewKind::Decision, "Use sqlite", None)
            .unwrap()
            .failed());
        assert!(!api.link("2", "1", Some("Amends")).unwrap().failed());
        assert!(!api.set_status("2", AdrStatus::Proposed, None).unwrap().failed());

        let listed = api.list(false).unwrap();
        assert_eq!(listed.listed.len(), 2);
    }
}
