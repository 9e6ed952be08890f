use crate::commands::{helpers, CmdMessage, CmdResult};
use crate::error::Result;
use crate::markdown;
use crate::model::AdrStatus;
use crate::store::RecordStore;

/// Move a record to `target` status: validate the transition, rewrite the
/// `__Status__` token in the document, optionally append a remark line to
/// the Status section, and persist both files. Entering Accepted marks the
/// files read-only; leaving it (for Obsolete) lifts the flag first.
pub fn run<S: RecordStore>(
    store: &mut S,
    record_id: u32,
    target: AdrStatus,
    remark: Option<&str>,
) -> Result<CmdResult> {
    let content = store.read_content(record_id)?;
    if content.is_empty() {
        return Ok(CmdResult::fail(format!(
            "ADR does not exist: {:05}.",
            record_id
        )));
    }

    let mut record = helpers::metadata_or_bootstrap(store, record_id, &content)?;
    if !record.status.can_transition_to(target) {
        return Ok(CmdResult::fail(format!(
            "Cannot change status of {:05} from {} to {}.",
            record_id, record.status, target
        )));
    }

    let was_accepted = record.status == AdrStatus::Accepted;
    record.status = target;

    let mut new_content = markdown::replace_status_token(&content, &target.to_string());
    if let Some(remark) = remark.filter(|r| !r.is_empty()) {
        new_content =
            markdown::insert_in_section(&new_content, "Status", &[remark.to_string(), String::new()]);
    }

    if was_accepted {
        store.set_read_only(&record, false)?;
    }
    store.update_metadata(record_id, &record)?;
    store.update_content(&record, &new_content)?;
    if target == AdrStatus::Accepted {
        store.set_read_only(&record, true)?;
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "ADR {:05} is now {}.",
        record_id, target
    )));
    result.affected.push(record);
    Ok(result)
}
