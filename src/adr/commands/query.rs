use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Record;
use crate::store::RecordStore;

/// Find records whose title or context contains any of the filter words,
/// case-insensitively. With `full`, the document lines are scanned as well
/// (slower: every content file is read).
pub fn run<S: RecordStore>(store: &S, terms: &[String], desc: bool, full: bool) -> Result<CmdResult> {
    let words: Vec<String> = terms
        .iter()
        .flat_map(|t| t.split_whitespace())
        .map(|w| w.to_lowercase())
        .collect();

    let mut result = CmdResult::default();
    if words.is_empty() {
        result.add_message(CmdMessage::warning("No filter provided."));
        return Ok(result);
    }

    let mut ids = store.record_ids()?;
    if desc {
        ids.reverse();
    }

    for id in ids {
        let Some(record) = store.read_metadata(id)? else {
            continue;
        };
        let mut matched = words.iter().any(|w| metadata_matches(&record, w));
        if !matched && full {
            let content = store.read_content(id)?;
            matched = words
                .iter()
                .any(|w| content.iter().any(|line| line.to_lowercase().contains(w)));
        }
        if matched {
            result.listed.push(record);
        }
    }

    if result.listed.is_empty() {
        result.add_message(CmdMessage::info("No matching records found."));
    }
    Ok(result)
}

fn metadata_matches(record: &Record, word: &str) -> bool {
    record.title.to_lowercase().contains(word) || record.context.to_lowercase().contains(word)
}
