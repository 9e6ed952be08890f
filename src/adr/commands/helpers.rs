use crate::error::Result;
use crate::model::Record;
use crate::store::RecordStore;
use crate::sync;

/// Read a record's metadata, or derive it from the markdown content when the
/// sidecar is missing. The derived record gets its file name prepared so a
/// following metadata write can create the sidecar.
pub fn metadata_or_bootstrap<S: RecordStore>(
    store: &S,
    record_id: u32,
    content: &[String],
) -> Result<Record> {
    match store.read_metadata(record_id)? {
        Some(record) => Ok(record),
        None => {
            let mut record = Record::default();
            sync::update_from_markdown(&mut record, record_id, content);
            record.prepare_for_storage();
            Ok(record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AdrStatus;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn bootstraps_metadata_from_markdown_when_sidecar_is_missing() {
        let store = InMemoryStore::new();
        let content: Vec<String> = [
            "# 00004. Use testable database",
            "",
            "## Status",
            "",
            "__Final__",
            "",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let record = metadata_or_bootstrap(&store, 4, &content).unwrap();
        assert_eq!(record.record_id, 4);
        assert_eq!(record.title, "Use testable database");
        assert_eq!(record.status, AdrStatus::Final);
        assert_eq!(record.file_name, "00004-use-testable-database");
    }
}
