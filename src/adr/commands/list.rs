use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;

/// One row per record id in the folder, oldest first unless `desc`.
/// Records with corrupt metadata still get a row (status Error).
pub fn run<S: RecordStore>(store: &S, desc: bool) -> Result<CmdResult> {
    let mut ids = store.record_ids()?;
    if desc {
        ids.reverse();
    }

    let mut result = CmdResult::default();
    for id in ids {
        if let Some(record) = store.read_metadata(id)? {
            result.listed.push(record);
        }
    }
    if result.listed.is_empty() {
        result.add_message(CmdMessage::info("No records found."));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::new::NewKind;
    use crate::commands::{init, new, AdrPaths};
    use crate::config::AdrConfig;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn store_with_records() -> InMemoryStore {
        let temp = TempDir::new().unwrap();
        let paths = AdrPaths::resolve(temp.path().to_path_buf(), "docs/adr", "docs/adr-templates");
        let mut store = InMemoryStore::new();
        init::run(&mut store, &paths, &AdrConfig::default()).unwrap();
        new::run(&mut store, NewKind::Decision, "Use testable database", None).unwrap();
        new::run(&mut store, NewKind::Decision, "Use SQLite everywhere", None).unwrap();
        store
    }

    #[test]
    fn lists_records_ascending_by_default() {
        let store = store_with_records();
        let result = run(&store, false).unwrap();
        let ids: Vec<u32> = result.listed.iter().map(|r| r.record_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn desc_reverses_the_order() {
        let store = store_with_records();
        let result = run(&store, true).unwrap();
        let ids: Vec<u32> = result.listed.iter().map(|r| r.record_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn empty_store_reports_no_records() {
        let store = InMemoryStore::new();
        let result = run(&store, false).unwrap();
        assert!(result.listed.is_empty());
        assert!(!result.messages.is_empty());
    }
}
