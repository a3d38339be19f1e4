use crate::commands::{students_noun, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Status;
use crate::store::{RecordStore, StorageBackend};

/// Sets the status of every listed student in one bulk operation.
pub fn run<B: StorageBackend, S: AsRef<str>>(
    store: &mut RecordStore<B>,
    ids: &[S],
    status: Status,
) -> Result<CmdResult> {
    let updated = store.bulk_update_status(ids, status)?;
    let mut result = CmdResult::default();

    if updated.is_empty() {
        result.add_message(CmdMessage::info("No matching students to update."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "{} updated successfully (now {})",
            students_noun(updated.len()),
            status
        )));
    }

    Ok(result.with_affected_students(updated))
}
