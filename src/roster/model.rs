use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::RosterError;

/// Courses offered to students. The store does not enforce membership; this list
/// only drives suggestions and the `courses` command.
pub const COURSES: [&str; 10] = [
    "Computer Science",
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Business Administration",
    "Economics",
    "Psychology",
    "English Literature",
    "History",
];

const ID_PREFIX: &str = "STU-";
const ID_RANDOM_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            other => Err(RosterError::Api(format!(
                "Unknown status '{}' (expected 'active' or 'inactive')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    pub email: String,
    pub course: String,
    pub status: Status,
    pub enrollment_date: NaiveDate,
}

impl Student {
    pub fn new(id: String, fields: NewStudent) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            course: fields.course,
            status: fields.status,
            enrollment_date: fields.enrollment_date,
        }
    }

    /// Case-insensitive substring match against the string form of every field.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        let date = self.enrollment_date.to_string();
        [
            self.id.as_str(),
            self.name.as_str(),
            self.email.as_str(),
            self.course.as_str(),
            self.status.as_str(),
            date.as_str(),
        ]
        .iter()
        .any(|value| value.to_lowercase().contains(needle))
    }

    /// Merges the fields present in `patch`. The id is never touched.
    pub fn apply(&mut self, patch: &StudentPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(course) = &patch.course {
            self.course = course.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date) = patch.enrollment_date {
            self.enrollment_date = date;
        }
    }
}

/// Everything a student record holds except its id, which the store assigns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub course: String,
    pub status: Status,
    pub enrollment_date: NaiveDate,
}

/// Partial update for a student. Carries no id, so an update can never change one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub course: Option<String>,
    pub status: Option<Status>,
    pub enrollment_date: Option<NaiveDate>,
}

impl StudentPatch {
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.course.is_none()
            && self.status.is_none()
            && self.enrollment_date.is_none()
    }
}

/// Produces a fresh opaque id such as `STU-3f9a0c1be`.
pub fn generate_id() -> String {
    let raw = Uuid::new_v4().simple().to_string();
    format!("{}{}", ID_PREFIX, &raw[..ID_RANDOM_LEN])
}

/// Display preferences. Fields missing from stored data fall back to their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub email_notifications: bool,
    pub dark_mode: bool,
    pub auto_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            dark_mode: false,
            auto_save: true,
        }
    }
}

impl Settings {
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.email_notifications {
            self.email_notifications = v;
        }
        if let Some(v) = patch.dark_mode {
            self.dark_mode = v;
        }
        if let Some(v) = patch.auto_save {
            self.auto_save = v;
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsPatch {
    pub email_notifications: Option<bool>,
    pub dark_mode: Option<bool>,
    pub auto_save: Option<bool>,
}
