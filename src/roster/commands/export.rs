use crate::commands::{students_noun, CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::store::{RecordStore, StorageBackend};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// A serialized snapshot ready to be written or streamed.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportFile {
    /// Writes the file into `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(RosterError::Io)?;
        }
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes).map_err(RosterError::Io)?;
        Ok(path)
    }
}

pub fn file_name(today: NaiveDate) -> String {
    format!("student-data-{}.json", today.format("%Y-%m-%d"))
}

/// Serializes the full student list. When `dir` is given the file is also saved there.
pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    today: NaiveDate,
    dir: Option<&Path>,
) -> Result<CmdResult> {
    let export = ExportFile {
        file_name: file_name(today),
        bytes: store.export_snapshot()?,
    };

    let mut result = CmdResult::default();
    if let Some(dir) = dir {
        let path = export.save(dir)?;
        result.add_message(CmdMessage::success(format!(
            "Data exported successfully ({}) to {}",
            students_noun(store.len()),
            path.display()
        )));
    }
    Ok(result.with_export(export))
}
