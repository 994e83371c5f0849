//! The interactive session: routes each typed line to the stores and renders the result.

use crate::auth::AuthStore;
use crate::cli::{Command, PromptLine, RollCallAction, RollCallLine};
use crate::config::Settings;
use crate::display;
use crate::manager::AttendanceManager;
use crate::models::{Class, Status};
use crate::navigation::{self, Page};
use crate::notify::Notifier;
use crate::rollcall::{Progress, RollCall};
use crate::roster;
use crate::scanner::{FingerprintScanner, ScanOutcome, ScanState};
use anyhow::Result;
use clap::Parser;
use rand::Rng;
use rand::rngs::StdRng;
use tracing::debug;

/// What the prompt should print after handling a line.
#[derive(Debug, Default, PartialEq)]
pub struct Reply {
    pub output: String,
    pub quit: bool,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            quit: false,
        }
    }
}

pub struct App<R = StdRng> {
    settings: Settings,
    notifier: Notifier,
    auth: AuthStore,
    attendance: AttendanceManager,
    scanner: FingerprintScanner<R>,
    page: Page,
    roll: Option<RollCall>,
}

impl App<StdRng> {
    /// Builds a session from settings, seeding classes from the configured roster file or the
    /// demo data.
    pub fn from_settings(settings: Settings) -> Result<Self> {
        let classes = match &settings.roster.path {
            Some(path) => roster::load_roster(path)?,
            None => roster::demo_classes(),
        };
        let scanner = FingerprintScanner::from_settings(&settings.scanner);

        Ok(Self::with_parts(settings, classes, scanner))
    }
}

impl<R: Rng> App<R> {
    pub fn with_parts(settings: Settings, classes: Vec<Class>, scanner: FingerprintScanner<R>) -> Self {
        let notifier = Notifier::new();
        let auth = AuthStore::new(
            settings.auth.login_delay(),
            settings.auth.fingerprint_delay(),
            notifier.clone(),
        );
        let attendance = AttendanceManager::new(classes, notifier.clone());

        Self {
            settings,
            notifier,
            auth,
            attendance,
            scanner,
            page: Page::Login,
            roll: None,
        }
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn attendance(&self) -> &AttendanceManager {
        &self.attendance
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    /// Renders the login page the session opens on.
    pub fn start(&mut self) -> String {
        self.navigate(Page::Login).output
    }

    /// The prompt prefix for the current page.
    pub fn prompt(&self) -> &'static str {
        match self.page {
            Page::Login => "login> ",
            Page::Dashboard => "dashboard> ",
            Page::TakeAttendance => "attendance> ",
        }
    }

    /// Handles one line of input. Pending notices are printed ahead of the page output.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Reply::default();
        }

        let reply = if self.page == Page::TakeAttendance {
            match RollCallLine::try_parse_from(words.iter().copied()) {
                Ok(parsed) => self.roll_call(parsed.action).await,
                Err(err) => Reply::text(err.to_string()),
            }
        } else {
            match PromptLine::try_parse_from(words.iter().copied()) {
                Ok(parsed) => self.execute(parsed.command).await,
                Err(err) => Reply::text(err.to_string()),
            }
        };

        let mut output: Vec<String> = self
            .notifier
            .drain()
            .iter()
            .map(ToString::to_string)
            .collect();
        if !reply.output.is_empty() {
            output.push(reply.output);
        }

        Reply {
            output: output.join("\n"),
            quit: reply.quit,
        }
    }

    async fn execute(&mut self, command: Command) -> Reply {
        debug!(?command, "executing");

        match command {
            Command::Login { email, password } => {
                if self.auth.login(&email, &password).await.is_err() {
                    return Reply::default();
                }
                self.navigate(Page::Dashboard)
            }
            Command::FingerprintLogin => {
                let outcome = self.scanner.scan().await;
                let prompt = self.scanner.state().prompt();
                if outcome == ScanOutcome::Failure {
                    self.notifier.error("Fingerprint authentication failed");
                    return Reply::text(prompt);
                }
                if self.auth.authenticate_with_fingerprint().await.is_err() {
                    return Reply::text(prompt);
                }
                let page = self.navigate(Page::Dashboard);
                Reply::text(format!("{prompt}\n{}", page.output))
            }
            Command::Register {
                email,
                password,
                teacher,
                name,
            } => {
                if !self.scanner.enroll(&self.notifier).await {
                    return Reply::default();
                }
                let name = name.join(" ");
                if self.auth.register(&name, &email, &password, teacher).await.is_err() {
                    return Reply::default();
                }
                self.navigate(Page::Dashboard)
            }
            Command::Logout => {
                self.auth.logout();
                self.roll = None;
                self.navigate(Page::Login)
            }
            Command::Whoami => Reply::text(display::header(self.auth.user())),
            Command::Quit => Reply {
                output: String::new(),
                quit: true,
            },
            _ if !self.auth.is_authenticated() => {
                self.page = Page::Login;
                Reply::text("Please log in first.")
            }
            Command::Classes => Reply::text(display::class_list(&self.attendance)),
            Command::Select { class_id } => {
                if self.attendance.class(&class_id).is_none() {
                    return Reply::text(format!("No class with ID '{class_id}'."));
                }
                self.attendance.set_current_class(&class_id);
                self.navigate(Page::Dashboard)
            }
            Command::Dashboard => self.navigate(Page::Dashboard),
            Command::Stats { class_id } => {
                let stats = self.attendance.get_statistics(class_id.as_deref());
                Reply::text(display::summary(&stats))
            }
            Command::Mark { student_id, status } => self.mark(&student_id, status),
            Command::TakeAttendance => self.navigate(Page::TakeAttendance),
        }
    }

    /// Only teachers may change a status from the dashboard.
    fn mark(&mut self, student_id: &str, status: Status) -> Reply {
        if !self.auth.is_teacher() {
            return Reply::text("Only teachers can change attendance.");
        }

        match self.attendance.update_student_status(student_id, status) {
            Some(_) => Reply::default(),
            None => Reply::text(format!(
                "Student with ID '{student_id}' is not in the current class."
            )),
        }
    }

    async fn roll_call(&mut self, action: RollCallAction) -> Reply {
        let Some(roll) = self.roll.as_mut() else {
            return self.navigate(Page::Dashboard);
        };

        let (progress, prompt) = match action {
            RollCallAction::Back => {
                self.roll = None;
                return self.navigate(Page::Dashboard);
            }
            RollCallAction::Scan => {
                let outcome = self.scanner.scan().await;
                let prompt = self.scanner.state().prompt();
                (roll.record_scan(&mut self.attendance, outcome).await, Some(prompt))
            }
            RollCallAction::Present => (roll.mark(&mut self.attendance, Status::Present), None),
            RollCallAction::Late => (roll.mark(&mut self.attendance, Status::Late), None),
            RollCallAction::Absent => (roll.mark(&mut self.attendance, Status::Absent), None),
        };

        let body = match progress {
            Progress::Next(_) => display::roll_call_card(roll, &self.attendance, ScanState::Idle),
            Progress::Complete => {
                let stamp = roll
                    .completed_at()
                    .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_default();
                self.roll = None;
                self.page = Page::Dashboard;
                format!(
                    "You have successfully recorded attendance for all students ({stamp}).\n{}",
                    display::dashboard(&self.attendance)
                )
            }
        };

        match prompt {
            Some(prompt) => Reply::text(format!("{prompt}\n{body}")),
            None => Reply::text(body),
        }
    }

    fn navigate(&mut self, requested: Page) -> Reply {
        self.page = navigation::resolve(requested, &self.auth, &self.attendance, &self.notifier);

        match self.page {
            Page::Login => Reply::text(
                "Demo credentials:\n  Teacher - teacher@example.com (any password)\n  \
                 Student - student@example.com (any password)",
            ),
            Page::Dashboard => Reply::text(format!(
                "{}\n{}",
                display::header(self.auth.user()),
                display::dashboard(&self.attendance)
            )),
            Page::TakeAttendance => {
                let Some(roll) = RollCall::start(
                    &self.attendance,
                    self.settings.scanner.advance_delay(),
                    self.notifier.clone(),
                ) else {
                    self.page = Page::Dashboard;
                    return Reply::text(display::dashboard(&self.attendance));
                };

                let card = display::roll_call_card(&roll, &self.attendance, ScanState::Idle);
                self.roll = Some(roll);
                Reply::text(card)
            }
        }
    }
}
