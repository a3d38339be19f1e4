use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::NewStudent;
use crate::store::{RecordStore, StorageBackend};

pub fn run<B: StorageBackend>(store: &mut RecordStore<B>, fields: NewStudent) -> Result<CmdResult> {
    if fields.name.trim().is_empty() {
        return Err(RosterError::Api("Name cannot be empty".into()));
    }

    let student = store.add(fields)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Student added successfully ({}): {}",
        student.id, student.name
    )));
    Ok(result.with_affected_students(vec![student]))
}
