use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;
use crate::sync;

/// Re-derive metadata from the markdown documents. `only_record` restricts
/// the run to one record; otherwise every record from `start_at` onwards is
/// synchronized. Only records whose persisted fields actually changed are
/// rewritten.
pub fn run<S: RecordStore>(
    store: &mut S,
    start_at: u32,
    only_record: Option<u32>,
) -> Result<CmdResult> {
    if start_at == 0 {
        return Ok(CmdResult::fail(
            "Invalid start record provided, use a positive number.",
        ));
    }
    if only_record == Some(0) {
        return Ok(CmdResult::fail(
            "Invalid record id provided, use a positive number.",
        ));
    }

    let mut result = CmdResult::default();
    match only_record {
        Some(id) => {
            if store.read_content(id)?.is_empty() {
                return Ok(CmdResult::fail(format!(
                    "Could not find ADR with identification {:05}.",
                    id
                )));
            }
            sync_one(store, id, &mut result)?;
        }
        None => {
            let ids: Vec<u32> = store
                .record_ids()?
                .into_iter()
                .filter(|id| *id >= start_at)
                .collect();
            for id in ids {
                sync_one(store, id, &mut result)?;
            }
        }
    }

    if result.affected.is_empty() && !result.failed() {
        result.add_message(CmdMessage::info("All metadata is in sync."));
    }
    Ok(result)
}

fn sync_one<S: RecordStore>(store: &mut S, id: u32, result: &mut CmdResult) -> Result<()> {
    let Some(mut record) = store.read_metadata(id)? else {
        return Ok(());
    };
    let content = store.read_content(id)?;
    if content.is_empty() {
        return Ok(());
    }
    if sync::update_from_markdown(&mut record, id, &content) {
        store.update_metadata(id, &record)?;
        result.add_message(CmdMessage::success(format!(
            "Metadata for {:05} updated from markdown.",
            id
        )));
        result.affected.push(record);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::new::NewKind;
    use crate::commands::{init, new, AdrPaths};
    use crate::config::AdrConfig;
    use crate::markdown;
    use crate::model::AdrStatus;
    use crate::store::memory::InMemoryStore;
    use tempfile::TempDir;

    fn store_with_records() -> InMemoryStore {
        let temp = TempDir::new().unwrap();
        let paths = AdrPaths::resolve(temp.path().to_path_buf(), "docs/adr", "docs/adr-templates");
        let mut store = InMemoryStore::new();
        init::run(&mut store, &paths, &AdrConfig::default()).unwrap();
        new::run(&mut store, NewKind::Decision, "Use testable database", None).unwrap();
        store
    }

    fn edit_status(store: &mut InMemoryStore, id: u32, status: &str) {
        let record = store.read_metadata(id).unwrap().unwrap();
        let content = store.read_content(id).unwrap();
        let edited = markdown::replace_status_token(&content, status);
        store.update_content(&record, &edited).unwrap();
    }

    #[test]
    fn in_sync_records_are_left_alone() {
        let mut store = store_with_records();
        let result = run(&mut store, 1, None).unwrap();
        assert!(result.affected.is_empty());
        assert!(!result.failed());
    }

    #[test]
    fn edited_status_flows_back_into_metadata() {
        let mut store = store_with_records();
        edit_status(&mut store, 2, "Proposed");

        let result = run(&mut store, 1, Some(2)).unwrap();
        assert_eq!(result.affected.len(), 1);
        let record = store.read_metadata(2).unwrap().unwrap();
        assert_eq!(record.status, AdrStatus::Proposed);
    }

    #[test]
    fn range_sync_skips_records_below_start() {
        let mut store = store_with_records();
        edit_status(&mut store, 2, "Proposed");

        let result = run(&mut store, 3, None).unwrap();
        assert!(result.affected.is_empty());
        let record = store.read_metadata(2).unwrap().unwrap();
        assert_eq!(record.status, AdrStatus::New);
    }

    #[test]
    fn unknown_single_record_is_reported() {
        let mut store = store_with_records();
        let result = run(&mut store, 1, Some(40)).unwrap();
        assert!(result.failed());
    }

    #[test]
    fn zero_arguments_are_rejected() {
        let mut store = store_with_records();
        assert!(run(&mut store, 0, None).unwrap().failed());
        assert!(run(&mut store, 1, Some(0)).unwrap().failed());
    }
}
