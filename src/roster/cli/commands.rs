//! Dispatch from parsed arguments to the API, and from `CmdResult`s to the terminal.
//!
//! Handlers never hold business logic. They translate clap types into API inputs, call
//! one `RosterApi` method, and render what comes back: listed students or other payloads
//! first, then the command's messages.

use super::logging::{init_logging, LogConfig};
use super::render::Renderer;
use super::setup::{Cli, Commands, EditFields, ListArgs, OutputFormat, StatusArg};
use super::styles::theme_for;
use chrono::{Local, NaiveDate};
use clap::Parser;
use roster::api::{CmdResult, ConfigAction, ListFilter, ReportKind, RosterApi, SettingsAction};
use roster::commands::settings::{parse_patch, SETTING_KEYS};
use roster::error::{Result, RosterError};
use roster::init::initialize;
use roster::model::{NewStudent, StudentPatch, COURSES};
use roster::store::fs::FsBackend;
use std::io::{self, Write};
use std::path::PathBuf;

const COURSE_COLUMN: usize = 24;

struct AppContext {
    api: RosterApi<FsBackend>,
    renderer: Renderer,
}

impl AppContext {
    fn emit(&self, output: &str) {
        if output.is_empty() {
            return;
        }
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    fn print_messages(&self, result: &CmdResult) -> Result<()> {
        let output = self.renderer.messages(&result.messages)?;
        self.emit(&output);
        Ok(())
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let use_color = !cli.no_color && console::colors_enabled();
    if cli.no_color {
        colored::control::set_override(false);
    }
    init_logging(
        &LogConfig::from_verbosity(cli.verbose)
            .with_ansi(!cli.no_color && console::colors_enabled_stderr()),
    );

    let ctx = initialize(cli.data_dir.clone())?;
    let theme = theme_for(ctx.api.current_settings().dark_mode);
    let mut app = AppContext {
        api: ctx.api,
        renderer: Renderer::new(theme, use_color)?,
    };

    match cli.command {
        Some(Commands::Add {
            name,
            email,
            course,
            status,
            enrolled,
        }) => handle_add(&mut app, name.join(" "), email, course, status, enrolled),
        Some(Commands::Edit { id, fields }) => handle_edit(&mut app, &id, fields),
        Some(Commands::Delete { ids }) => handle_delete(&mut app, &ids),
        Some(Commands::SetStatus { status, ids }) => handle_set_status(&mut app, status, &ids),
        Some(Commands::List(args)) => handle_list(&app, args),
        Some(Commands::Search { query }) => handle_search(&app, &query.join(" ")),
        Some(Commands::Stats) => handle_stats(&app),
        Some(Commands::Courses) => handle_courses(&app),
        Some(Commands::Sample) => handle_sample(&mut app),
        Some(Commands::Export { output, stdout }) => handle_export(&app, output, stdout),
        Some(Commands::Report { kind, output }) => handle_report(&app, kind, output),
        Some(Commands::Settings { key, value }) => handle_settings(&mut app, key, value),
        Some(Commands::Config { key, value }) => handle_config(&app, key, value),
        None => handle_list(&app, ListArgs::default()),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn handle_add(
    app: &mut AppContext,
    name: String,
    email: String,
    course: String,
    status: StatusArg,
    enrolled: Option<NaiveDate>,
) -> Result<()> {
    let fields = NewStudent {
        name,
        email,
        course,
        status: status.into(),
        enrollment_date: enrolled.unwrap_or_else(today),
    };
    let result = app.api.add_student(fields)?;
    app.print_messages(&result)
}

fn handle_edit(app: &mut AppContext, id: &str, fields: EditFields) -> Result<()> {
    let patch = StudentPatch {
        name: fields.name,
        email: fields.email,
        course: fields.course,
        status: fields.status.map(Into::into),
        enrollment_date: fields.enrolled,
    };
    let result = app.api.update_student(id, &patch)?;
    app.print_messages(&result)
}

fn handle_delete(app: &mut AppContext, ids: &[String]) -> Result<()> {
    let result = app.api.delete_students(ids)?;
    app.print_messages(&result)
}

fn handle_set_status(app: &mut AppContext, status: StatusArg, ids: &[String]) -> Result<()> {
    let result = app.api.set_status(ids, status.into())?;
    app.print_messages(&result)
}

fn handle_list(app: &AppContext, args: ListArgs) -> Result<()> {
    let filter = ListFilter {
        query: args.search,
        course: args.course,
        status: args.status.map(Into::into),
    };
    let result = app.api.list_students(&filter)?;

    match args.output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result.listed_students)?);
        }
        OutputFormat::Text => {
            let empty_message = if filter.is_empty() {
                "No students yet. Add one with `roster add` or load `roster sample`."
            } else {
                "No students match the current filters."
            };
            let output = app
                .renderer
                .student_list(&result.listed_students, empty_message)?;
            app.emit(&output);
        }
    }
    app.print_messages(&result)
}

fn handle_search(app: &AppContext, query: &str) -> Result<()> {
    let result = app.api.search_students(query)?;
    if !result.listed_students.is_empty() || result.messages.is_empty() {
        let output = app
            .renderer
            .student_list(&result.listed_students, "No students yet.")?;
        app.emit(&output);
    }
    app.print_messages(&result)
}

fn handle_stats(app: &AppContext) -> Result<()> {
    let result = app.api.stats()?;
    if let Some(stats) = &result.stats {
        let output = app.renderer.stats(stats)?;
        app.emit(&output);
    }
    app.print_messages(&result)
}

fn handle_courses(app: &AppContext) -> Result<()> {
    let result = app.api.stats()?;
    let by_course = result
        .stats
        .as_ref()
        .map(|s| s.by_course.as_slice())
        .unwrap_or_default();
    let enrolled = |course: &str| {
        by_course
            .iter()
            .find(|c| c.course == course)
            .map_or(0, |c| c.count)
    };

    let mut lines: Vec<String> = COURSES
        .iter()
        .map(|course| format!("{:<width$}{}", course, enrolled(*course), width = COURSE_COLUMN))
        .collect();
    lines.extend(
        by_course
            .iter()
            .filter(|c| !COURSES.contains(&c.course.as_str()))
            .map(|c| {
                format!(
                    "{:<width$}{} (not a listed course)",
                    c.course,
                    c.count,
                    width = COURSE_COLUMN
                )
            }),
    );

    let output = app.renderer.text_list(&lines, "No courses.")?;
    app.emit(&output);
    Ok(())
}

fn handle_sample(app: &mut AppContext) -> Result<()> {
    let result = app.api.import_sample()?;
    let output = app.renderer.student_list(&result.listed_students, "")?;
    app.emit(&output);
    app.print_messages(&result)
}

fn handle_export(app: &AppContext, output: Option<PathBuf>, stdout: bool) -> Result<()> {
    if stdout {
        let result = app.api.export(None)?;
        if let Some(export) = &result.export {
            let mut out = io::stdout().lock();
            out.write_all(&export.bytes)?;
            writeln!(out)?;
        }
        return Ok(());
    }

    let dir = output.unwrap_or_else(|| app.api.export_dir());
    let result = app.api.export(Some(&dir))?;
    app.print_messages(&result)
}

fn handle_report(app: &AppContext, kind: ReportKind, output: Option<PathBuf>) -> Result<()> {
    let result = app.api.report(kind, output.as_deref())?;
    if output.is_none() {
        if let Some(report) = &result.report {
            app.emit(&report.markdown);
        }
    }
    app.print_messages(&result)
}

fn handle_settings(
    app: &mut AppContext,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    let action = match (key.as_deref(), value.as_deref()) {
        (None, _) => SettingsAction::Show,
        (Some(key), None) if !SETTING_KEYS.contains(&key) => {
            return Err(RosterError::Api(format!(
                "Unknown setting: {} (expected one of: {})",
                key,
                SETTING_KEYS.join(", ")
            )));
        }
        (Some(_), None) => SettingsAction::Show,
        (Some(key), Some(value)) => SettingsAction::Set(parse_patch(key, value)?),
    };

    let result = app.api.settings(action)?;
    if let Some(settings) = &result.settings {
        let output = app.renderer.settings(settings, key.as_deref())?;
        app.emit(&output);
    }
    app.print_messages(&result)
}

fn handle_config(app: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let show_all = key.is_none();
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = app.api.config(action)?;
    if show_all {
        if let Some(config) = &result.config {
            let output = app.renderer.config(config)?;
            app.emit(&output);
        }
    }
    app.print_messages(&result)
}
