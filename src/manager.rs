use crate::models::{Class, Statistics, Status, Student};
use crate::notify::Notifier;
use tracing::{debug, info};

/// The manager for recording, modifying, and retrieving attendance data.
///
/// Holds a fixed set of classes and tracks which one is current. All changes are made in memory
/// and are lost when the manager is dropped.
pub struct AttendanceManager {
    classes: Vec<Class>,
    current_class_id: Option<String>,
    notifier: Notifier,
}

impl AttendanceManager {
    /// Creates a new `AttendanceManager` over the given classes. The first class starts as the
    /// current class.
    pub fn new(classes: Vec<Class>, notifier: Notifier) -> Self {
        let current_class_id = classes.first().map(|class| class.id.clone());

        Self {
            classes,
            current_class_id,
            notifier,
        }
    }

    /// Retrieves every class, in seeding order.
    pub fn classes(&self) -> &[Class] {
        &self.classes
    }

    /// Retrieves a class by its ID.
    pub fn class(&self, class_id: &str) -> Option<&Class> {
        self.classes.iter().find(|class| class.id == class_id)
    }

    pub fn current_class(&self) -> Option<&Class> {
        self.current_class_id.as_deref().and_then(|id| self.class(id))
    }

    /// Makes the class with the given ID current. Unknown IDs leave the selection unchanged.
    pub fn set_current_class(&mut self, class_id: &str) {
        if self.class(class_id).is_none() {
            debug!(class_id, "ignoring selection of unknown class");
            return;
        }

        info!(class_id, "current class changed");
        self.current_class_id = Some(class_id.to_string());
    }

    /// Sets the [`Status`] of a student on the current class's roster.
    ///
    /// Returns the updated student. Nothing changes if there is no current class or the student is
    /// not on its roster.
    pub fn update_student_status(&mut self, student_id: &str, status: Status) -> Option<&Student> {
        let class_id = self.current_class_id.as_deref()?;
        let class = self.classes.iter_mut().find(|class| class.id == class_id)?;

        let Some(student) = class.students.iter_mut().find(|s| s.id == student_id) else {
            debug!(student_id, class_id, "student not on the current roster");
            return None;
        };

        student.status = status;
        info!(student_id, %status, class_id, "status updated");
        self.notifier
            .success(format!("{} marked as {}", student.name, status));

        Some(&*student)
    }

    /// Returns the attendance stats for the given class, or the current class when `class_id` is
    /// `None`. An unknown or missing class yields all zeros.
    pub fn get_statistics(&self, class_id: Option<&str>) -> Statistics {
        let target = match class_id {
            Some(id) => self.class(id),
            None => self.current_class(),
        };

        target
            .map(|class| Statistics::from_roster(&class.students))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::demo_classes;

    fn manager() -> (AttendanceManager, Notifier) {
        let notifier = Notifier::new();
        (AttendanceManager::new(demo_classes(), notifier.clone()), notifier)
    }

    #[test]
    fn first_class_starts_current() {
        let (manager, _) = manager();
        assert_eq!(manager.current_class().unwrap().name, "Computer Science 101");
    }

    #[test]
    fn statistics_for_current_and_named_classes() {
        let (manager, _) = manager();

        let stats = manager.get_statistics(None);
        assert_eq!(
            stats,
            Statistics {
                present: 5,
                absent: 2,
                late: 1,
                total: 8,
            }
        );

        let math = manager.get_statistics(Some("2"));
        assert_eq!((math.present, math.absent, math.late, math.total), (2, 1, 1, 4));

        assert_eq!(manager.get_statistics(Some("404")), Statistics::default());
    }

    #[test]
    fn unknown_class_selection_is_ignored() {
        let (mut manager, _) = manager();

        manager.set_current_class("2");
        manager.set_current_class("missing");
        assert_eq!(manager.current_class().unwrap().id, "2");
    }

    #[test]
    fn updates_touch_only_the_named_student_in_the_current_class() {
        let (mut manager, notifier) = manager();
        let math_before = manager.class("2").unwrap().clone();

        let updated = manager.update_student_status("s2", Status::Present).unwrap();
        assert_eq!(updated.name, "Maria Garcia");

        let cs = manager.current_class().unwrap();
        assert_eq!(cs.student("s2").unwrap().status, Status::Present);
        assert_eq!(cs.student("s7").unwrap().status, Status::Absent);
        assert_eq!(manager.class("2").unwrap(), &math_before);

        let stats = manager.get_statistics(None);
        assert_eq!((stats.present, stats.absent, stats.late), (6, 1, 1));
        assert_eq!(stats.present + stats.absent + stats.late, stats.total);

        assert_eq!(notifier.drain()[0].message, "Maria Garcia marked as present");
    }

    #[test]
    fn students_of_other_classes_are_not_reachable() {
        let (mut manager, notifier) = manager();

        // s9 belongs to Mathematics 202, which is not current.
        assert!(manager.update_student_status("s9", Status::Absent).is_none());
        assert_eq!(manager.class("2").unwrap().student("s9").unwrap().status, Status::Present);
        assert!(notifier.drain().is_empty());
    }

    #[test]
    fn no_current_class_means_no_updates_and_zero_stats() {
        let notifier = Notifier::new();
        let mut manager = AttendanceManager::new(Vec::new(), notifier);

        assert!(manager.current_class().is_none());
        assert!(manager.update_student_status("s1", Status::Late).is_none());
        assert_eq!(manager.get_statistics(None), Statistics::default());
    }
}
