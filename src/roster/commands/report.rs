//! # Reports
//!
//! Reports are read-only Markdown documents derived from the current list. They are
//! assembled as a `pulldown-cmark` event stream and serialized with
//! `pulldown-cmark-to-cmark`, which takes care of table layout and escaping.
//!
//! Three kinds exist:
//!
//! - `student-list`: one table row per student
//! - `enrollment-stats`: counts by status and by course, with percentages
//! - `detailed`: one section per student, suitable for printing

use crate::commands::stats::EnrollmentStats;
use crate::commands::{students_noun, CmdMessage, CmdResult};
use crate::error::{Result, RosterError};
use crate::model::Student;
use crate::store::{RecordStore, StorageBackend};
use chrono::NaiveDate;
use pulldown_cmark::{Alignment, CowStr, Event, HeadingLevel, Tag, TagEnd};
use pulldown_cmark_to_cmark::cmark;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use timeago::Formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    StudentList,
    EnrollmentStats,
    Detailed,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::StudentList,
        ReportKind::EnrollmentStats,
        ReportKind::Detailed,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            ReportKind::StudentList => "student-list",
            ReportKind::EnrollmentStats => "enrollment-stats",
            ReportKind::Detailed => "detailed",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::StudentList => "Student List",
            ReportKind::EnrollmentStats => "Enrollment Statistics",
            ReportKind::Detailed => "Detailed Student Report",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ReportKind {
    type Err = RosterError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "student-list" | "list" => Ok(ReportKind::StudentList),
            "enrollment-stats" | "stats" => Ok(ReportKind::EnrollmentStats),
            "detailed" | "print" => Ok(ReportKind::Detailed),
            other => Err(RosterError::Api(format!("Unknown report kind: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ReportKind,
    pub file_name: String,
    pub markdown: String,
}

pub fn file_name(kind: ReportKind, today: NaiveDate) -> String {
    format!("student-report-{}-{}.md", kind.slug(), today.format("%Y-%m-%d"))
}

/// Builds the report. When `dir` is given the document is also saved there.
pub fn run<B: StorageBackend>(
    store: &RecordStore<B>,
    kind: ReportKind,
    today: NaiveDate,
    dir: Option<&Path>,
) -> Result<CmdResult> {
    let report = build(kind, store.students(), today)?;
    let mut result = CmdResult::default();

    if let Some(dir) = dir {
        let export = crate::commands::ExportFile {
            file_name: report.file_name.clone(),
            bytes: report.markdown.clone().into_bytes(),
        };
        let path = export.save(dir)?;
        result.add_message(CmdMessage::success(format!(
            "{} report has been generated successfully: {}",
            kind.title(),
            path.display()
        )));
    }

    Ok(result.with_report(report))
}

pub fn build(kind: ReportKind, students: &[Student], today: NaiveDate) -> Result<Report> {
    let mut doc = Doc::default();
    doc.heading(HeadingLevel::H1, kind.title());
    doc.paragraph(format!(
        "Generated on {} for {}.",
        today.format("%Y-%m-%d"),
        students_noun(students.len())
    ));

    match kind {
        ReportKind::StudentList => student_list(&mut doc, students),
        ReportKind::EnrollmentStats => enrollment_stats(&mut doc, students),
        ReportKind::Detailed => detailed(&mut doc, students, today),
    }

    Ok(Report {
        kind,
        file_name: file_name(kind, today),
        markdown: doc.finish()?,
    })
}

fn student_list(doc: &mut Doc, students: &[Student]) {
    let rows = students
        .iter()
        .map(|s| {
            vec![
                s.id.clone(),
                s.name.clone(),
                s.email.clone(),
                s.course.clone(),
                s.status.to_string(),
                s.enrollment_date.to_string(),
            ]
        })
        .collect::<Vec<_>>();
    doc.table(
        &["ID", "Name", "Email", "Course", "Status", "Enrolled"],
        &rows,
    );
}

fn enrollment_stats(doc: &mut Doc, students: &[Student]) {
    let stats = EnrollmentStats::from_students(students);

    doc.heading(HeadingLevel::H2, "By status");
    doc.table(
        &["Status", "Students", "Share"],
        &[
            vec![
                "Active".to_string(),
                stats.active.to_string(),
                format!("{:.1}%", stats.active_percent()),
            ],
            vec![
                "Inactive".to_string(),
                stats.inactive.to_string(),
                format!("{:.1}%", stats.inactive_percent()),
            ],
        ],
    );

    doc.heading(HeadingLevel::H2, "By course");
    let rows = stats
        .by_course
        .iter()
        .map(|c| {
            vec![
                c.course.clone(),
                c.count.to_string(),
                format!("{:.1}%", c.percent),
            ]
        })
        .collect::<Vec<_>>();
    doc.table(&["Course", "Students", "Share"], &rows);
}

fn detailed(doc: &mut Doc, students: &[Student], today: NaiveDate) {
    if students.is_empty() {
        doc.paragraph("No students on record.");
        return;
    }

    let formatter = Formatter::new();
    for student in students {
        let age = (today - student.enrollment_date)
            .to_std()
            .unwrap_or_default();
        doc.heading(HeadingLevel::H2, &student.name);
        doc.bullets(&[
            ("ID", student.id.clone()),
            ("Email", student.email.clone()),
            ("Course", student.course.clone()),
            ("Status", student.status.to_string()),
            (
                "Enrolled",
                format!("{} ({})", student.enrollment_date, formatter.convert(age)),
            ),
        ]);
    }
}

/// Accumulates Markdown events for one document.
#[derive(Default)]
struct Doc {
    events: Vec<Event<'static>>,
}

impl Doc {
    fn text(&mut self, text: impl Into<String>) {
        self.events.push(Event::Text(CowStr::from(text.into())));
    }

    fn heading(&mut self, level: HeadingLevel, text: impl Into<String>) {
        self.events.push(Event::Start(Tag::Heading {
            level,
            id: None,
            classes: Vec::new(),
            attrs: Vec::new(),
        }));
        self.text(text);
        self.events.push(Event::End(TagEnd::Heading(level)));
    }

    fn paragraph(&mut self, text: impl Into<String>) {
        self.events.push(Event::Start(Tag::Paragraph));
        self.text(text);
        self.events.push(Event::End(TagEnd::Paragraph));
    }

    fn table(&mut self, headers: &[&str], rows: &[Vec<String>]) {
        self.events
            .push(Event::Start(Tag::Table(vec![Alignment::Left; headers.len()])));

        self.events.push(Event::Start(Tag::TableHead));
        for header in headers {
            self.cell(header.to_string());
        }
        self.events.push(Event::End(TagEnd::TableHead));

        for row in rows {
            self.events.push(Event::Start(Tag::TableRow));
            for value in row {
                self.cell(value.clone());
            }
            self.events.push(Event::End(TagEnd::TableRow));
        }

        self.events.push(Event::End(TagEnd::Table));
    }

    fn cell(&mut self, value: String) {
        self.events.push(Event::Start(Tag::TableCell));
        self.text(value);
        self.events.push(Event::End(TagEnd::TableCell));
    }

    fn bullets(&mut self, items: &[(&str, String)]) {
        self.events.push(Event::Start(Tag::List(None)));
        for (label, value) in items {
            self.events.push(Event::Start(Tag::Item));
            self.events.push(Event::Start(Tag::Strong));
            self.text(format!("{}:", label));
            self.events.push(Event::End(TagEnd::Strong));
            self.text(format!(" {}", value));
            self.events.push(Event::End(TagEnd::Item));
        }
        self.events.push(Event::End(TagEnd::List(false)));
    }

    fn finish(self) -> Result<String> {
        let mut out = String::new();
        cmark(self.events.iter(), &mut out).map_err(|e| RosterError::Report(e.to_string()))?;
        out.push('\n');
        Ok(out)
    }
}
