use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::StudentPatch;
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut RecordStore<B>,
    id: &str,
    patch: &StudentPatch,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if patch.is_empty() {
        result.add_message(CmdMessage::info("Nothing to update."));
        return Ok(result);
    }
    if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(RosterError::Api("Name cannot be empty".into()));
    }

    match store.update(id, patch)? {
        Some(student) => {
            result.add_message(CmdMessage::success(format!(
                "Student updated successfully ({}): {}",
                student.id, student.name
            )));
            Ok(result.with_affected_students(vec![student]))
        }
        None => {
            result.add_message(CmdMessage::info(format!("No student with id {}", id)));
            Ok(result)
        }
    }
}
