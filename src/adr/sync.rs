//! Reconciles a markdown document back into its metadata record.
//!
//! Only fields that are persisted to the metadata file participate in the
//! returned dirty flag; its sole purpose upstream is "does the metadata file
//! need rewriting". Decision and consequences are markdown-only fields and
//! are always refreshed for in-memory callers without dirtying.

use crate::markdown;
use crate::model::{AdrStatus, Record};

/// First-line fragments shorter than this are noise, not titles.
const MINIMUM_TITLE_LENGTH: usize = 10;

/// Update `record` from the document `lines`, returning whether any
/// persisted field changed. Absent headings and unparsable status tokens are
/// normal and leave the corresponding field untouched; an empty document is
/// a no-op.
pub fn update_from_markdown(record: &mut Record, record_id: u32, lines: &[String]) -> bool {
    if lines.is_empty() {
        return false;
    }
    let mut changed = false;

    if record_id > 0 && record_id != record.record_id {
        record.record_id = record_id;
        changed = true;
    }

    if let Some(title) = markdown::title_from_lines(lines) {
        if title.len() >= MINIMUM_TITLE_LENGTH && record.title != title {
            record.title = title;
            changed = true;
        }
    }

    if let Some(status) = status_from_section(lines) {
        if record.status != status {
            record.status = status;
            changed = true;
        }
    }

    if let Some(section) = markdown::find_section(lines, "Context") {
        let context = join_single_spaced(&section);
        if record.context != context {
            record.context = context;
            changed = true;
        }
    }

    if let Some(section) = markdown::find_section(lines, "Decision") {
        record.decision = section.join("\n");
    }
    if let Some(section) = markdown::find_section(lines, "Consequences") {
        record.consequences = section.join("\n");
    }

    changed
}

/// The authoritative status is the last `__token__` line in the Status
/// section, parsed case-sensitively against the defined status names.
fn status_from_section(lines: &[String]) -> Option<AdrStatus> {
    let section = markdown::find_section(lines, "Status")?;
    let token = section
        .iter()
        .filter(|line| markdown::is_status_token(line))
        .next_back()?;
    let token = token.trim();
    token[2..token.len() - 2].parse::<AdrStatus>().ok()
}

fn join_single_spaced(lines: &[String]) -> String {
    let mut joined = String::new();
    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !joined.is_empty() {
            joined.push(' ');
        }
        joined.push_str(line);
    }
    joined
}
