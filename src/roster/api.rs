//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for roster operations, whatever UI sits on top.
//!
//! The facade:
//! - **Owns** the record and settings stores, opened explicitly in [`RosterApi::new`]
//!   and released in [`RosterApi::close`]
//! - **Dispatches** to the appropriate command function
//! - **Supplies context** commands should not look up themselves (today's date,
//!   the export directory)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Business logic lives in `commands/*.rs`; nothing here prints.
//!
//! ## Generic Over StorageBackend
//!
//! - Production: `RosterApi<FsBackend>`
//! - Testing: `RosterApi<MemBackend>`

use crate::commands;
use crate::config::RosterConfig;
use crate::error::Result;
use crate::model::{NewStudent, Status, Student, StudentPatch};
use crate::store::{RecordStore, SettingsStore, StorageBackend, SubscriptionId};
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// The main API facade for roster operations.
pub struct RosterApi<B: StorageBackend + Clone> {
    records: RecordStore<B>,
    settings: SettingsStore<B>,
    config: RosterConfig,
    paths: commands::RosterPaths,
}

impl<B: StorageBackend + Clone> RosterApi<B> {
    pub fn new(backend: B, config: RosterConfig, paths: commands::RosterPaths) -> Self {
        let records = RecordStore::open(backend.clone(), config.records_key.clone());
        let settings = SettingsStore::open(backend, config.settings_key.clone());
        Self {
            records,
            settings,
            config,
            paths,
        }
    }

    /// Closes both stores and hands back the backend.
    pub fn close(self) -> B {
        let _ = self.settings.close();
        self.records.close()
    }

    pub fn add_student(&mut self, fields: NewStudent) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.records, fields)
    }

    pub fn update_student(
        &mut self,
        id: &str,
        patch: &StudentPatch,
    ) -> Result<commands::CmdResult> {
        commands::update::run(&mut self.records, id, patch)
    }

    pub fn delete_students<S: AsRef<str>>(&mut self, ids: &[S]) -> Result<commands::CmdResult> {
        commands::delete::run(&mut self.records, ids)
    }

    pub fn set_status<S: AsRef<str>>(
        &mut self,
        ids: &[S],
        status: Status,
    ) -> Result<commands::CmdResult> {
        commands::status::run(&mut self.records, ids, status)
    }

    pub fn list_students(&self, filter: &ListFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.records, filter)
    }

    pub fn search_students(&self, query: &str) -> Result<commands::CmdResult> {
        commands::search::run(&self.records, query)
    }

    pub fn import_sample(&mut self) -> Result<commands::CmdResult> {
        commands::sample::run(&mut self.records)
    }

    /// Serializes the roster. When `dir` is given the file is also saved there.
    pub fn export(&self, dir: Option<&Path>) -> Result<commands::CmdResult> {
        commands::export::run(&self.records, today(), dir)
    }

    /// Builds a report. When `dir` is given the document is also saved there.
    pub fn report(&self, kind: ReportKind, dir: Option<&Path>) -> Result<commands::CmdResult> {
        commands::report::run(&self.records, kind, today(), dir)
    }

    pub fn stats(&self) -> Result<commands::CmdResult> {
        commands::stats::run(&self.records)
    }

    pub fn settings(&mut self, action: SettingsAction) -> Result<commands::CmdResult> {
        commands::settings::run(&mut self.settings, action)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.paths, action)
    }

    /// Registers a callback invoked with the new list after every mutation.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&[Student]) + 'static,
    {
        self.records.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.records.unsubscribe(id)
    }

    pub fn students(&self) -> &[Student] {
        self.records.students()
    }

    pub fn current_settings(&self) -> &crate::model::Settings {
        self.settings.get()
    }

    pub fn paths(&self) -> &commands::RosterPaths {
        &self.paths
    }

    /// Configured export directory, or the current directory.
    pub fn export_dir(&self) -> PathBuf {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        self.config.export_dir_or(&cwd)
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub use crate::commands::config::ConfigAction;
pub use crate::commands::settings::SettingsAction;
pub use commands::{
    CmdMessage, CmdResult, EnrollmentStats, ExportFile, ListFilter, MessageLevel, Report,
    ReportKind, RosterPaths,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SettingsPatch;
    use crate::store::memory::MemBackend;
    use crate::store::StorageBackend;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    fn api_with(backend: MemBackend, dir: &TempDir) -> RosterApi<MemBackend> {
        let config = RosterConfig {
            export_dir: Some(dir.path().to_path_buf()),
            ..Default::default()
        };
        let paths = RosterPaths {
            data_dir: dir.path().to_path_buf(),
        };
        RosterApi::new(backend, config, paths)
    }

    #[test]
    fn dispatches_mutations_to_the_record_store() {
        let dir = TempDir::new().unwrap();
        let mut api = api_with(MemBackend::new(), &dir);

        api.import_sample().unwrap();
        api.set_status(&["STU-345678901"], Status::Active).unwrap();
        api.delete_students(&["STU-123456789"]).unwrap();

        assert_eq!(api.students().len(), 4);
        let stats = api.stats().unwrap().stats.unwrap();
        assert_eq!(stats.active, 4);
    }

    #[test]
    fn stores_share_one_backend_under_separate_keys() {
        let dir = TempDir::new().unwrap();
        let backend = MemBackend::new();
        let mut api = api_with(backend.clone(), &dir);

        api.import_sample().unwrap();
        api.settings(SettingsAction::Set(SettingsPatch {
            dark_mode: Some(true),
            ..Default::default()
        }))
        .unwrap();

        assert!(backend.read("student-management-system-data").unwrap().is_some());
        assert!(backend.read("app-settings").unwrap().is_some());

        let reopened = api_with(api.close(), &dir);
        assert_eq!(reopened.students().len(), 5);
        assert!(reopened.current_settings().dark_mode);
    }

    #[test]
    fn export_and_report_save_into_configured_dir() {
        let dir = TempDir::new().unwrap();
        let mut api = api_with(MemBackend::new(), &dir);
        api.import_sample().unwrap();

        let target = api.export_dir();
        assert_eq!(target, dir.path());

        let export = api.export(Some(&target)).unwrap().export.unwrap();
        assert!(dir.path().join(&export.file_name).exists());

        let report = api
            .report(ReportKind::StudentList, Some(&target))
            .unwrap()
            .report
            .unwrap();
        assert!(dir.path().join(&report.file_name).exists());
    }

    #[test]
    fn subscribers_follow_api_mutations() {
        let dir = TempDir::new().unwrap();
        let mut api = api_with(MemBackend::new(), &dir);
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let sub = api.subscribe(move |_| counter.set(counter.get() + 1));

        api.import_sample().unwrap();
        api.delete_students(&["STU-123456789", "STU-234567890"]).unwrap();
        assert_eq!(calls.get(), 2);

        assert!(api.unsubscribe(sub));
        api.import_sample().unwrap();
        assert_eq!(calls.get(), 2);
    }
}
