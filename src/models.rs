//! The records shared by the auth and attendance stores.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// A signed-in account. Never persisted; dropped on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_teacher: bool,
}

impl User {
    /// The role label shown next to the user's name.
    pub fn role(&self) -> &'static str {
        if self.is_teacher { "Teacher" } else { "Student" }
    }
}

/// A student's attendance state for the current class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Present,
    Absent,
    Late,
}

impl Status {
    /// Parses a status label, falling back to [`Status::Present`] for anything unrecognized.
    pub fn parse_lenient(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "absent" => Status::Absent,
            "late" => Status::Late,
            _ => Status::Present,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Present => "present",
            Status::Absent => "absent",
            Status::Late => "late",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub status: Status,
}

impl Student {
    pub fn new(id: &str, name: &str, status: Status) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status,
        }
    }
}

/// A class and its ordered roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub id: String,
    pub name: String,
    pub students: Vec<Student>,
}

impl Class {
    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|student| student.id == student_id)
    }
}

/// Attendance counts for one class, derived from its roster on demand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub total: usize,
}

impl Statistics {
    pub fn from_roster(students: &[Student]) -> Self {
        let count = |status: Status| students.iter().filter(|s| s.status == status).count();

        Self {
            present: count(Status::Present),
            absent: count(Status::Absent),
            late: count(Status::Late),
            total: students.len(),
        }
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::Present => self.present,
            Status::Absent => self.absent,
            Status::Late => self.late,
        }
    }

    /// The rounded share of the roster with the given status, or 0 for an empty roster.
    pub fn percentage(&self, status: Status) -> u32 {
        if self.total == 0 {
            return 0;
        }

        (self.count(status) as f64 / self.total as f64 * 100.0).round() as u32
    }
}
