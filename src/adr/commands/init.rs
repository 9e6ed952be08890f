use crate::commands::{AdrPaths, CmdMessage, CmdResult};
use crate::config::AdrConfig;
use crate::error::Result;
use crate::model::{AdrStatus, Record, TemplateType};
use crate::store::RecordStore;

/// Bootstrap the record folder: persist the configuration, create the
/// folders and write the first record. Refuses to run twice.
pub fn run<S: RecordStore>(
    store: &mut S,
    paths: &AdrPaths,
    config: &AdrConfig,
) -> Result<CmdResult> {
    if store.initialized() {
        return Ok(CmdResult::fail(format!(
            "Initialization is already done for {}.",
            paths.doc_dir.display()
        )));
    }

    paths.ensure_dirs()?;
    config.save(&paths.root)?;

    let mut record = Record {
        template_type: TemplateType::Init,
        title: "Record Architecture Decisions initialization".into(),
        status: AdrStatus::Accepted,
        ..Record::default()
    };
    let id = store.write_record(&mut record)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Initialization complete, initial ADR {:05} is created in {}.",
        id,
        paths.doc_dir.display()
    )));
    result.affected.push(record);
    Ok(result)
}
