use crate::config::RosterConfig;
use crate::model::{Settings, Student};
use std::path::PathBuf;

pub mod config;
pub mod create;
pub mod delete;
pub mod export;
pub mod list;
pub mod report;
pub mod sample;
pub mod search;
pub mod settings;
pub mod stats;
pub mod status;
pub mod update;

pub use export::ExportFile;
pub use list::ListFilter;
pub use report::{Report, ReportKind};
pub use stats::EnrollmentStats;

#[derive(Debug, Clone)]
pub struct RosterPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_students: Vec<Student>,
    pub listed_students: Vec<Student>,
    pub stats: Option<EnrollmentStats>,
    pub report: Option<Report>,
    pub export: Option<ExportFile>,
    pub settings: Option<Settings>,
    pub config: Option<RosterConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_students(mut self, students: Vec<Student>) -> Self {
        self.affected_students = students;
        self
    }

    pub fn with_listed_students(mut self, students: Vec<Student>) -> Self {
        self.listed_students = students;
        self
    }

    pub fn with_stats(mut self, stats: EnrollmentStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_export(mut self, export: ExportFile) -> Self {
        self.export = Some(export);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn with_config(mut self, config: RosterConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// "1 student" / "3 students".
pub fn students_noun(count: usize) -> String {
    if count == 1 {
        "1 student".to_string()
    } else {
        format!("{} students", count)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::{NewStudent, Status};
    use crate::store::memory::MemBackend;
    use crate::store::{RecordStore, RECORDS_KEY};
    use chrono::NaiveDate;

    pub fn new_student(name: &str, course: &str, status: Status) -> NewStudent {
        NewStudent {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            course: course.to_string(),
            status,
            enrollment_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        }
    }

    pub fn empty_store() -> RecordStore<MemBackend> {
        RecordStore::open(MemBackend::new(), RECORDS_KEY)
    }

    pub fn sample_store() -> RecordStore<MemBackend> {
        let mut store = empty_store();
        store.import_sample().unwrap();
        store
    }

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    }
}
