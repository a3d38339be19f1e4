use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use roster::api::ReportKind;
use roster::model::Status;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "roster", bin_name = "roster", version)]
#[command(about = "Keep track of enrolled students from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding roster data (overrides ROSTER_DATA_DIR)
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Log more detail to stderr (repeat for more)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Active,
    Inactive,
}

impl From<StatusArg> for Status {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::Active => Status::Active,
            StatusArg::Inactive => Status::Inactive,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a new student
    #[command(alias = "new", display_order = 1)]
    Add {
        /// Full name
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Course the student is enrolled in (see `roster courses`)
        #[arg(short, long)]
        course: String,

        #[arg(short, long, value_enum, default_value_t = StatusArg::Active)]
        status: StatusArg,

        /// Enrollment date, YYYY-MM-DD (defaults to today)
        #[arg(long, value_name = "DATE", value_parser = parse_date)]
        enrolled: Option<NaiveDate>,
    },

    /// Change fields of one student
    #[command(alias = "e", display_order = 2)]
    Edit {
        /// Student id (e.g. STU-123456789)
        id: String,

        #[command(flatten)]
        fields: EditFields,
    },

    /// Delete one or more students
    #[command(alias = "rm", display_order = 3)]
    Delete {
        /// Student ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Mark one or more students active or inactive
    #[command(display_order = 4)]
    SetStatus {
        #[arg(value_enum)]
        status: StatusArg,

        /// Student ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// List students (the default command)
    #[command(alias = "ls", display_order = 10)]
    List(ListArgs),

    /// Search every field of every student
    #[command(display_order = 11)]
    Search {
        /// Search words (joined with spaces)
        #[arg(num_args = 0..)]
        query: Vec<String>,
    },

    /// Show enrollment statistics
    #[command(display_order = 12)]
    Stats,

    /// List the courses offered
    #[command(display_order = 13)]
    Courses,

    /// Replace all students with the sample data set
    #[command(display_order = 20)]
    Sample,

    /// Export all students as JSON
    #[command(display_order = 21)]
    Export {
        /// Directory to write the export into (defaults to the configured export dir)
        #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
        output: Option<PathBuf>,

        /// Print the JSON instead of writing a file
        #[arg(long)]
        stdout: bool,
    },

    /// Generate a Markdown report (student-list, enrollment-stats or detailed)
    #[command(display_order = 22)]
    Report {
        #[arg(value_parser = parse_report_kind)]
        kind: ReportKind,

        /// Directory to save the report into (prints it when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// Show or change preferences
    #[command(display_order = 30)]
    Settings {
        /// Setting name (email-notifications, dark-mode, auto-save)
        key: Option<String>,

        /// New value: on or off
        value: Option<String>,
    },

    /// Get or set configuration
    #[command(display_order = 31)]
    Config {
        /// Configuration key (records-key, settings-key, export-dir)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Args, Debug, Default)]
pub struct EditFields {
    #[arg(short, long)]
    pub name: Option<String>,

    #[arg(short, long)]
    pub email: Option<String>,

    #[arg(short, long)]
    pub course: Option<String>,

    #[arg(short, long, value_enum)]
    pub status: Option<StatusArg>,

    /// Enrollment date, YYYY-MM-DD
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub enrolled: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Only students matching this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only students in this course
    #[arg(short, long)]
    pub course: Option<String>,

    /// Only students with this status
    #[arg(long, value_enum)]
    pub status: Option<StatusArg>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}' (expected YYYY-MM-DD)", s))
}

fn parse_report_kind(s: &str) -> Result<ReportKind, String> {
    s.parse::<ReportKind>().map_err(|e| e.to_string())
}
