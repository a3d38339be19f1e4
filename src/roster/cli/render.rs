//! # Rendering Module
//!
//! Styled terminal output through minijinja templates and the `style` filter.
//!
//! Layout calculations (width, truncation, padding, bar lengths) stay in Rust because
//! they need Unicode-aware processing. Templates choose styles from semantic flags and
//! arrange the pre-computed strings.

use super::styles::{names, Theme};
use super::templates::TEMPLATES;
use minijinja::{Environment, Value};
use roster::api::{CmdMessage, EnrollmentStats, MessageLevel};
use roster::commands::students_noun;
use roster::config::{RosterConfig, CONFIG_KEYS};
use roster::error::{Result, RosterError};
use roster::model::{Settings, Status, Student};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Column widths for the student table. Together with the gaps they fill 100 columns.
const ID_WIDTH: usize = 13;
const NAME_WIDTH: usize = 18;
const EMAIL_WIDTH: usize = 24;
const COURSE_WIDTH: usize = 17;
const STATUS_WIDTH: usize = 8;
const DATE_WIDTH: usize = 10;

const COURSE_LABEL_WIDTH: usize = 24;
const BAR_WIDTH: usize = 30;
const BAR_CHAR: &str = "█";

#[derive(Serialize)]
struct StudentRow {
    id: String,
    name: String,
    email: String,
    course: String,
    status: String,
    status_style: &'static str,
    enrolled: String,
}

#[derive(Serialize)]
struct ListData {
    empty: bool,
    empty_message: String,
    header: String,
    rows: Vec<StudentRow>,
    footer: String,
}

#[derive(Serialize)]
struct CourseLine {
    label: String,
    bar: String,
    gap: String,
    count: usize,
    percent: String,
}

#[derive(Serialize)]
struct StatsData {
    title: &'static str,
    total: String,
    active: String,
    inactive: String,
    courses: Vec<CourseLine>,
}

#[derive(Serialize)]
struct KeyValue {
    key: String,
    value: String,
    value_style: &'static str,
    note: String,
}

#[derive(Serialize)]
struct KeyValuesData {
    items: Vec<KeyValue>,
}

#[derive(Serialize)]
struct TextListData {
    lines: Vec<String>,
    empty_message: String,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

/// Holds the template environment for one invocation.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(theme: &'static Theme, use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.add_filter("style", move |value: Value, name: String| -> String {
            theme.apply(&name, &value.to_string(), use_color)
        });
        for (name, source) in TEMPLATES {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        let template = self.env.get_template(name).map_err(template_error)?;
        template.render(data).map_err(template_error)
    }

    pub fn student_list(&self, students: &[Student], empty_message: &str) -> Result<String> {
        let header = [
            pad_to_width("ID", ID_WIDTH),
            pad_to_width("Name", NAME_WIDTH),
            pad_to_width("Email", EMAIL_WIDTH),
            pad_to_width("Course", COURSE_WIDTH),
            pad_to_width("Status", STATUS_WIDTH),
            pad_to_width("Enrolled", DATE_WIDTH),
        ]
        .join("  ");

        let rows = students
            .iter()
            .map(|s| StudentRow {
                id: pad_to_width(&s.id, ID_WIDTH),
                name: pad_to_width(&s.name, NAME_WIDTH),
                email: pad_to_width(&s.email, EMAIL_WIDTH),
                course: pad_to_width(&s.course, COURSE_WIDTH),
                status: pad_to_width(s.status.as_str(), STATUS_WIDTH),
                status_style: status_style(s.status),
                enrolled: s.enrollment_date.format("%Y-%m-%d").to_string(),
            })
            .collect();

        let data = ListData {
            empty: students.is_empty(),
            empty_message: empty_message.to_string(),
            header: header.trim_end().to_string(),
            rows,
            footer: students_noun(students.len()),
        };
        self.render("list", &data)
    }

    pub fn stats(&self, stats: &EnrollmentStats) -> Result<String> {
        let max = stats.max_course_count();
        let courses = stats
            .by_course
            .iter()
            .map(|c| {
                let bar_len = bar_length(c.count, max);
                CourseLine {
                    label: pad_to_width(&c.course, COURSE_LABEL_WIDTH),
                    bar: BAR_CHAR.repeat(bar_len),
                    gap: " ".repeat(BAR_WIDTH - bar_len),
                    count: c.count,
                    percent: format!("({:.1}%)", c.percent),
                }
            })
            .collect();

        let data = StatsData {
            title: "Enrollment statistics",
            total: students_noun(stats.total),
            active: format!("{} active ({:.1}%)", stats.active, stats.active_percent()),
            inactive: format!(
                "{} inactive ({:.1}%)",
                stats.inactive,
                stats.inactive_percent()
            ),
            courses,
        };
        self.render("stats", &data)
    }

    /// Renders every setting, or only `only` when given.
    pub fn settings(&self, settings: &Settings, only: Option<&str>) -> Result<String> {
        let entries = [
            (
                "email-notifications",
                settings.email_notifications,
                "Receive email updates about student activities",
            ),
            ("dark-mode", settings.dark_mode, "Use the dark color theme"),
            ("auto-save", settings.auto_save, "Save changes automatically"),
        ];

        let items = entries
            .into_iter()
            .filter(|(key, _, _)| only.map_or(true, |o| o == *key))
            .map(|(key, enabled, note)| KeyValue {
                key: pad_to_width(key, 20),
                value: pad_to_width(if enabled { "on" } else { "off" }, 3),
                value_style: if enabled {
                    names::ENABLED
                } else {
                    names::DISABLED
                },
                note: note.to_string(),
            })
            .collect();
        self.render("key_values", &KeyValuesData { items })
    }

    pub fn config(&self, config: &RosterConfig) -> Result<String> {
        let items = CONFIG_KEYS
            .iter()
            .map(|key| {
                let value = config.get(key)?;
                let (value, value_style) = if value.is_empty() {
                    ("(current directory)".to_string(), names::MUTED)
                } else {
                    (value, names::REGULAR)
                };
                Ok(KeyValue {
                    key: pad_to_width(key, 14),
                    value,
                    value_style,
                    note: String::new(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        self.render("key_values", &KeyValuesData { items })
    }

    pub fn text_list(&self, lines: &[String], empty_message: &str) -> Result<String> {
        let data = TextListData {
            lines: lines.to_vec(),
            empty_message: empty_message.to_string(),
        };
        self.render("text_list", &data)
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> Result<String> {
        if messages.is_empty() {
            return Ok(String::new());
        }

        let messages = messages
            .iter()
            .map(|msg| MessageData {
                content: msg.content.clone(),
                style: match msg.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                },
            })
            .collect();
        self.render("messages", &MessagesData { messages })
    }
}

fn template_error(e: minijinja::Error) -> RosterError {
    RosterError::Template(e.to_string())
}

fn status_style(status: Status) -> &'static str {
    match status {
        Status::Active => names::ACTIVE,
        Status::Inactive => names::INACTIVE,
    }
}

/// Bar length scaled to the largest count. Non-zero counts always get one cell.
fn bar_length(count: usize, max: usize) -> usize {
    if max == 0 || count == 0 {
        return 0;
    }
    (count * BAR_WIDTH / max).max(1)
}

/// Truncates to `width` columns (with a trailing `…`) and pads with spaces.
fn pad_to_width(s: &str, width: usize) -> String {
    let mut out = truncate_to_width(s, width);
    let used = out.width();
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let limit = max_width.saturating_sub(1);
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
