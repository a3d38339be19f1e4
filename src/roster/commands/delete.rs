use crate::commands::{students_noun, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

/// Deletes one student, or several in a single bulk operation.
pub fn run<B: StorageBackend, S: AsRef<str>>(
    store: &mut RecordStore<B>,
    ids: &[S],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let mut unique: Vec<&str> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id.as_ref()) {
            unique.push(id.as_ref());
        }
    }

    let removed = match unique.as_slice() {
        [] => Vec::new(),
        [id] => store.delete(id)?.into_iter().collect(),
        _ => store.bulk_delete(unique.as_slice())?,
    };

    match removed.len() {
        0 => result.add_message(CmdMessage::info("No matching students to delete.")),
        1 if unique.len() == 1 => result.add_message(CmdMessage::success(format!(
            "Student deleted successfully ({}): {}",
            removed[0].id, removed[0].name
        ))),
        n => result.add_message(CmdMessage::success(format!(
            "{} deleted successfully",
            students_noun(n)
        ))),
    }

    let stale = unique.len().saturating_sub(removed.len());
    if stale > 0 && !removed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} of the given ids matched no student",
            stale
        )));
    }

    Ok(result.with_affected_students(removed))
}
