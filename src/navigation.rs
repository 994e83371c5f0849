//! Which page a user may see, given who is signed in and what is selected.

use crate::auth::AuthStore;
use crate::manager::AttendanceManager;
use crate::notify::Notifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Login,
    Dashboard,
    TakeAttendance,
}

/// Resolves a request for `page` to the page the user actually lands on, explaining any redirect
/// away from the roll call through `notifier`.
pub fn resolve(
    page: Page,
    auth: &AuthStore,
    attendance: &AttendanceManager,
    notifier: &Notifier,
) -> Page {
    match page {
        Page::Login => Page::Login,
        _ if !auth.is_authenticated() => Page::Login,
        Page::Dashboard => Page::Dashboard,
        Page::TakeAttendance => {
            if !auth.is_teacher() {
                notifier.error("Only teachers can take attendance");
                return Page::Dashboard;
            }

            if attendance.current_class().is_none() {
                notifier.error("Please select a class first");
                return Page::Dashboard;
            }

            Page::TakeAttendance
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn stores(notifier: &Notifier) -> (AuthStore, AttendanceManager) {
        (
            AuthStore::new(Duration::ZERO, Duration::ZERO, notifier.clone()),
            AttendanceManager::new(crate::roster::demo_classes(), notifier.clone()),
        )
    }

    #[test]
    fn signed_out_users_land_on_login() {
        let notifier = Notifier::new();
        let (auth, attendance) = stores(&notifier);

        for page in [Page::Login, Page::Dashboard, Page::TakeAttendance] {
            assert_eq!(resolve(page, &auth, &attendance, &notifier), Page::Login);
        }
        assert!(notifier.drain().is_empty());
    }

    #[tokio::test]
    async fn students_cannot_take_attendance() {
        let notifier = Notifier::new();
        let (mut auth, attendance) = stores(&notifier);
        auth.login("student@example.com", "pw").await.unwrap();
        notifier.drain();

        assert_eq!(
            resolve(Page::Dashboard, &auth, &attendance, &notifier),
            Page::Dashboard
        );
        assert_eq!(
            resolve(Page::TakeAttendance, &auth, &attendance, &notifier),
            Page::Dashboard
        );
        assert_eq!(notifier.drain()[0].message, "Only teachers can take attendance");
    }

    #[tokio::test]
    async fn teachers_need_a_current_class() {
        let notifier = Notifier::new();
        let mut auth = AuthStore::new(Duration::ZERO, Duration::ZERO, notifier.clone());
        let empty = AttendanceManager::new(Vec::new(), notifier.clone());
        auth.login("teacher@example.com", "pw").await.unwrap();
        notifier.drain();

        assert_eq!(
            resolve(Page::TakeAttendance, &auth, &empty, &notifier),
            Page::Dashboard
        );
        assert_eq!(notifier.drain()[0].message, "Please select a class first");

        let (_, seeded) = stores(&notifier);
        assert_eq!(
            resolve(Page::TakeAttendance, &auth, &seeded, &notifier),
            Page::TakeAttendance
        );
    }
}
