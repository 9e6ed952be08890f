use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::Result;
use crate::markdown;
use crate::store::RecordStore;

pub const DEFAULT_REMARK: &str = "Extends";

/// Record a reference from `source_id` to `target_id` and append a link line
/// to the source document's Status section. Metadata missing on either side
/// is rebuilt from the markdown first.
pub fn link<S: RecordStore>(
    store: &mut S,
    source_id: u32,
    target_id: u32,
    remark: &str,
) -> Result<CmdResult> {
    let source_content = store.read_content(source_id)?;
    if source_content.is_empty() {
        return Ok(CmdResult::fail(format!(
            "Source ADR does not exist: {:05}.",
            source_id
        )));
    }
    let target_content = store.read_content(target_id)?;
    if target_content.is_empty() {
        return Ok(CmdResult::fail(format!(
            "Target ADR does not exist: {:05}.",
            target_id
        )));
    }

    let mut source_meta = helpers::metadata_or_bootstrap(store, source_id, &source_content)?;
    let target_meta = helpers::metadata_or_bootstrap(store, target_id, &target_content)?;

    let remark = if remark.is_empty() {
        DEFAULT_REMARK
    } else {
        remark
    };
    source_meta.update_reference_remark(target_id, remark);

    let link_line = format!(
        "{} [{:05}.{}](.\\{})",
        remark, target_id, target_meta.title, target_meta.file_name
    );
    let new_content = markdown::insert_in_section(
        &source_content,
        "Status",
        &[link_line, String::new()],
    );

    store.update_metadata(source_id, &source_meta)?;
    store.update_content(&source_meta, &new_content)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Linked {:05} to {:05} ({}).",
        source_id, target_id, remark
    )));
    result.affected.push(source_meta);
    Ok(result)
}

/// Drop the reference from `source_id` to `target_id` and remove every link
/// line in the Status section carrying the target's `[{id:05}.` prefix.
pub fn unlink<S: RecordStore>(store: &mut S, source_id: u32, target_id: u32) -> Result<CmdResult> {
    let source_content = store.read_content(source_id)?;
    if source_content.is_empty() {
        return Ok(CmdResult::fail(format!(
            "Source ADR does not exist: {:05}.",
            source_id
        )));
    }

    let mut source_meta = helpers::metadata_or_bootstrap(store, source_id, &source_content)?;
    source_meta.references.remove(&target_id);

    let needle = format!("[{:05}.", target_id);
    let new_content = markdown::remove_from_section(&source_content, "Status", &needle);

    store.update_metadata(source_id, &source_meta)?;
    store.update_content(&source_meta, &new_content)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed all reference links from {:05} to {:05}.",
        source_id, target_id
    )));
    result.affected.push(source_meta);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{init, new, AdrPaths};
    use crate::commands::new::NewKind;
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
    fn link_records_reference_and_status_line() {
        let mut store = store_with_records();
        let result = link(&mut store, 2, 3, "Extends").unwrap();
        assert!(!result.failed());

        let meta = store.read_metadata(2).unwrap().unwrap();
        assert_eq!(meta.references[&3], "Extends");

        let content = store.read_content(2).unwrap();
        assert!(content
            .iter()
            .any(|l| l.contains("Extends [00003.Use SQLite everywhere](.\\00003-use-sqlite-everywhere)")));
    }

    #[test]
    fn link_line_lands_inside_the_status_section() {
        let mut store = store_with_records();
        link(&mut store, 2, 3, "Extends").unwrap();

        let content = store.read_content(2).unwrap();
        let link_pos = content.iter().position(|l| l.contains("[00003.")).unwrap();
        let status_pos = content.iter().position(|l| l == "## Status").unwrap();
        let context_pos = content.iter().position(|l| l == "## Context").unwrap();
        assert!(status_pos < link_pos && link_pos < context_pos);
    }

    #[test]
    fn relinking_same_remark_does_not_duplicate() {
        let mut store = store_with_records();
        link(&mut store, 2, 3, "Extends").unwrap();
        link(&mut store, 2, 3, "Extends").unwrap();

        let meta = store.read_metadata(2).unwrap().unwrap();
        assert_eq!(meta.references[&3], "Extends");
    }

    #[test]
    fn missing_source_fails_without_mutation() {
        let mut store = store_with_records();
        let result = link(&mut store, 9, 2, "Extends").unwrap();
        assert!(result.failed());
        assert!(store.read_metadata(9).unwrap().is_none());
    }

    #[test]
    fn missing_target_fails_without_mutation() {
        let mut store = store_with_records();
        let result = link(&mut store, 2, 9, "Extends").unwrap();
        assert!(result.failed());

        let meta = store.read_metadata(2).unwrap().unwrap();
        assert!(meta.references.is_empty());
    }

    #[test]
    fn empty_remark_falls_back_to_extends() {
        let mut store = store_with_records();
        link(&mut store, 2, 3, "").unwrap();
        let meta = store.read_metadata(2).unwrap().unwrap();
        assert_eq!(meta.references[&3], "Extends");
    }

    #[test]
    fn unlink_removes_reference_and_matching_lines_only() {
        let mut store = store_with_records();
        new::run(&mut store, NewKind::Decision, "Use Postgres for prod", None).unwrap();
        link(&mut store, 2, 3, "Extends").unwrap();
        link(&mut store, 2, 4, "Refines").unwrap();

        let result = unlink(&mut store, 2, 3).unwrap();
        assert!(!result.failed());

        let meta = store.read_metadata(2).unwrap().unwrap();
        assert!(!meta.references.contains_key(&3));
        assert_eq!(meta.references[&4], "Refines");

        let content = store.read_content(2).unwrap();
        assert!(!content.iter().any(|l| l.contains("[00003.")));
        assert!(content.iter().any(|l| l.contains("[00004.")));
    }

    #[test]
    fn unlink_of_absent_reference_is_not_an_error() {
        let mut store = store_with_records();
        let result = unlink(&mut store, 2, 3).unwrap();
        assert!(!result.failed());
    }
}
