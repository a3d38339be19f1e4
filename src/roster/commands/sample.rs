use crate::commands::{students_noun, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{RecordStore, StorageBackend};

/// Replaces the whole roster with the demo data set.
pub fn run<B: StorageBackend>(store: &mut RecordStore<B>) -> Result<CmdResult> {
    let replaced = store.len();
    store.import_sample()?;

    let mut result = CmdResult::default();
    if replaced > 0 {
        result.add_message(CmdMessage::warning(format!(
            "Replaced {} previously on record",
            students_noun(replaced)
        )));
    }
    result.add_message(CmdMessage::success("Sample data imported successfully"));
    Ok(result.with_listed_students(store.students().to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{empty_store, new_student};
    use crate::model::Status;

    #[test]
    fn seeds_empty_store() {
        let mut store = empty_store();
        let result = run(&mut store).unwrap();
        assert_eq!(store.len(), 5);
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn replaces_existing_students() {
        let mut store = empty_store();
        store.add(new_student("Temp", "History", Status::Active)).unwrap();
        let result = run(&mut store).unwrap();

        assert_eq!(store.len(), 5);
        assert!(store.students().iter().all(|s| s.name != "Temp"));
        assert!(result.messages[0].content.contains("1 student"));
    }
}
