//! Seeding the attendance store, either from the built-in demo classes or a CSV roster.

use crate::models::{Class, Status, Student};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// One row of a roster file.
#[derive(Debug, Deserialize)]
struct RosterRow {
    class_id: String,
    class_name: String,
    student_id: String,
    student_name: String,
    #[serde(default)]
    status: Option<String>,
}

pub fn demo_classes() -> Vec<Class> {
    use Status::*;

    let class = |id: &str, name: &str, students: &[(&str, &str, Status)]| Class {
        id: id.to_string(),
        name: name.to_string(),
        students: students
            .iter()
            .map(|&(id, name, status)| Student::new(id, name, status))
            .collect(),
    };

    vec![
        class(
            "1",
            "Computer Science 101",
            &[
                ("s1", "Alex Johnson", Present),
                ("s2", "Maria Garcia", Absent),
                ("s3", "James Wilson", Present),
                ("s4", "Emma Brown", Late),
                ("s5", "Michael Davis", Present),
                ("s6", "Sophia Martinez", Present),
                ("s7", "Daniel Lee", Absent),
                ("s8", "Olivia Miller", Present),
            ],
        ),
        class(
            "2",
            "Mathematics 202",
            &[
                ("s9", "William Moore", Present),
                ("s10", "Ava Taylor", Present),
                ("s11", "Ethan Anderson", Late),
                ("s12", "Charlotte Thomas", Absent),
            ],
        ),
    ]
}

/// Reads classes from a CSV roster with the header
/// `class_id,class_name,student_id,student_name,status`.
///
/// Classes keep the order they first appear in, and so do their students. A missing or
/// unrecognized status reads as present. Every row of a class must repeat the same class name, and
/// a student ID may appear only once per class.
pub fn read_roster<R: Read>(reader: R) -> Result<Vec<Class>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut classes: Vec<Class> = Vec::new();

    for (index, row) in rdr.deserialize::<RosterRow>().enumerate() {
        // Line 1 is the header.
        let line = index + 2;
        let row = row.with_context(|| format!("malformed roster row on line {line}"))?;
        let status = Status::parse_lenient(row.status.as_deref().unwrap_or_default());
        let student = Student {
            id: row.student_id,
            name: row.student_name,
            status,
        };

        match classes.iter_mut().find(|class| class.id == row.class_id) {
            Some(class) => {
                if class.name != row.class_name {
                    bail!(
                        "class '{}' is named '{}' on line {line}, but was '{}' earlier",
                        class.id,
                        row.class_name,
                        class.name
                    );
                }
                if class.student(&student.id).is_some() {
                    bail!(
                        "student '{}' appears twice in class '{}' (line {line})",
                        student.id,
                        class.id
                    );
                }
                class.students.push(student);
            }
            None => classes.push(Class {
                id: row.class_id,
                name: row.class_name,
                students: vec![student],
            }),
        }
    }

    Ok(classes)
}

pub fn load_roster(path: &Path) -> Result<Vec<Class>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open roster {}", path.display()))?;
    read_roster(file)
}
