use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{AdrStatus, Record, Supersedes, TemplateType};
use crate::store::RecordStore;

/// What kind of record `new` should create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewKind {
    /// Architecture Decision (the default).
    Decision,
    /// Architecture Significant Requirement.
    Requirement,
    /// Revision superseding an existing record.
    Revision(u32),
}

pub fn run<S: RecordStore>(
    store: &mut S,
    kind: NewKind,
    title: &str,
    context: Option<&str>,
) -> Result<CmdResult> {
    if !store.initialized() {
        return Ok(CmdResult::fail(
            "Architecture Decision folder is not initialized; run `adr init` first.",
        ));
    }

    let (template_type, supersedes) = match kind {
        NewKind::Decision => (TemplateType::Ad, None),
        NewKind::Requirement => (TemplateType::Asr, None),
        NewKind::Revision(revised_id) => {
            let Some(revised) = store.read_metadata(revised_id)? else {
                return Ok(CmdResult::fail(format!(
                    "Cannot find a record for revision with id: {}",
                    revised_id
                )));
            };
            (TemplateType::Revision, Some(Supersedes::from(&revised)))
        }
    };

    let mut record = Record {
        template_type,
        supersedes,
        title: title.into(),
        status: AdrStatus::New,
        ..Record::default()
    };
    if let Some(context) = context.filter(|c| !c.is_empty()) {
        record.context = context.to_string();
    }

    let id = store.write_record(&mut record)?;

    let mut result = CmdResult::default();
    let what = match kind {
        NewKind::Decision => format!("AD {:05} is created.", id),
        NewKind::Requirement => format!("ASR {:05} is created.", id),
        NewKind::Revision(revised_id) => {
            format!("Revision {:05} for {:05} is created.", id, revised_id)
        }
    };
    result.add_message(CmdMessage::success(what));
    result.affected.push(record);
    Ok(result)
}
