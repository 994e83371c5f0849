use crate::manager::AttendanceManager;
use crate::models::{Statistics, Status, User};
use crate::rollcall::RollCall;
use crate::scanner::ScanState;
use tabled::{Table, Tabled, settings::Style};

/// Width of the bar drawn under each summary card.
const BAR_WIDTH: usize = 20;

/// The signed-in banner, e.g. `Teacher: John Smith`.
pub fn header(user: Option<&User>) -> String {
    match user {
        Some(user) => format!("{}: {}", user.role(), user.name),
        None => "Not signed in".to_string(),
    }
}

/// Lists every class, marking the current one.
pub fn class_list(manager: &AttendanceManager) -> String {
    #[derive(Tabled)]
    struct ClassRow {
        #[tabled(rename = "")]
        current: &'static str,
        id: String,
        name: String,
        students: usize,
    }

    let current_id = manager.current_class().map(|class| class.id.as_str());
    let rows: Vec<ClassRow> = manager
        .classes()
        .iter()
        .map(|class| ClassRow {
            current: if Some(class.id.as_str()) == current_id { "*" } else { "" },
            id: class.id.clone(),
            name: class.name.clone(),
            students: class.students.len(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::modern());
    table.to_string()
}

/// Renders the present, absent, and late summary cards as one table.
pub fn summary(stats: &Statistics) -> String {
    #[derive(Tabled)]
    struct Card {
        title: &'static str,
        count: String,
        share: String,
    }

    let card = |title, status| {
        let percentage = stats.percentage(status);
        let filled = percentage as usize * BAR_WIDTH / 100;

        Card {
            title,
            count: format!("{}/{}", stats.count(status), stats.total),
            share: format!(
                "{}{} {percentage}%",
                "#".repeat(filled),
                ".".repeat(BAR_WIDTH - filled)
            ),
        }
    };

    let mut table = Table::new([
        card("Present Students", Status::Present),
        card("Absent Students", Status::Absent),
        card("Late Students", Status::Late),
    ]);
    table.with(Style::modern());
    table.to_string()
}

/// Pretty prints the current class: its summary cards followed by the roster.
pub fn dashboard(manager: &AttendanceManager) -> String {
    let Some(class) = manager.current_class() else {
        return "No class selected. Use `select <class-id>` to pick one.".to_string();
    };

    let mut roster = Table::new(&class.students);
    roster.with(Style::modern());

    format!(
        "{} - Attendance Summary\n{}\nStudents:\n{roster}",
        class.name,
        summary(&manager.get_statistics(None)),
    )
}

/// The take-attendance card for the student currently being called.
pub fn roll_call_card(roll: &RollCall, manager: &AttendanceManager, scan: ScanState) -> String {
    let Some(student) = roll.current(manager) else {
        return "You have successfully recorded attendance for all students.".to_string();
    };

    let (position, total) = roll.position();
    format!(
        "{}\nStudent ID: {}\nStudent {position} of {total}\n{}\n\
         Type `scan`, or mark manually with `present`, `late`, or `absent` (`back` to stop).",
        student.name,
        student.id,
        scan.prompt(),
    )
}
