//! This module contains the command-line interface [`Cli`] parser, and the parsers for the
//! commands typed into the interactive prompt.

use clap::{Parser, Subcommand};

use crate::models::Status;

/// The command line configuration struct, where the command-line interface parser is automatically
/// derived by [`clap::Parser`].
#[derive(Parser, Debug)]
#[command(name = "rollcall")]
#[command(about = "An interactive, in-memory classroom attendance tracker")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults to `config.toml` if present).
    #[arg(short, long)]
    pub config: Option<String>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The `tracing` filter matching the verbosity flag.
    pub fn log_filter(&self) -> String {
        let level = if self.verbose { "debug" } else { "warn" };
        format!("rollcall={level}")
    }
}

/// One line typed at the main prompt.
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
pub struct PromptLine {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Log in with an email and password (any password is accepted).
    Login { email: String, password: String },

    /// Log in with a simulated fingerprint scan.
    FingerprintLogin,

    /// Register a new account. Requires a fingerprint enrollment scan.
    Register {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        /// Register as a teacher.
        #[arg(long)]
        teacher: bool,

        /// The full name of the new user.
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Log out of the current account.
    Logout,

    /// Show who is signed in.
    Whoami,

    /// List every class.
    Classes,

    /// Select the current class.
    Select { class_id: String },

    /// Show the current class's summary and roster.
    Dashboard,

    /// Show attendance statistics for a class (the current class by default).
    Stats { class_id: Option<String> },

    /// Set a student's status in the current class (teachers only).
    Mark { student_id: String, status: Status },

    /// Walk through the current class marking each student.
    TakeAttendance,

    /// Leave the program.
    #[command(alias = "exit")]
    Quit,
}

/// One line typed while taking attendance.
#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
pub struct RollCallLine {
    #[command(subcommand)]
    pub action: RollCallAction,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq)]
pub enum RollCallAction {
    /// Scan the student's fingerprint: success marks present, failure marks absent.
    Scan,
    /// Mark the student present.
    Present,
    /// Mark the student late.
    Late,
    /// Mark the student absent.
    Absent,
    /// Stop and return to the dashboard.
    Back,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        PromptLine::try_parse_from(line.split_whitespace()).unwrap().command
    }

    #[test]
    fn parses_prompt_commands() {
        assert_eq!(
            parse("login teacher@example.com secret"),
            Command::Login {
                email: "teacher@example.com".to_string(),
                password: "secret".to_string(),
            }
        );
        assert_eq!(
            parse("mark s4 late"),
            Command::Mark {
                student_id: "s4".to_string(),
                status: Status::Late,
            }
        );
        assert_eq!(parse("stats"), Command::Stats { class_id: None });
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn register_collects_a_multi_word_name() {
        let command = parse("register --email f@example.com --password pw --teacher Ferris The Crab");
        let Command::Register { name, teacher, .. } = command else {
            panic!("expected a register command");
        };
        assert!(teacher);
        assert_eq!(name.join(" "), "Ferris The Crab");
    }

    #[test]
    fn rejects_unknown_statuses() {
        assert!(PromptLine::try_parse_from(["mark", "s1", "excused"]).is_err());
    }

    #[test]
    fn parses_roll_call_actions() {
        let line = RollCallLine::try_parse_from(["scan"]).unwrap();
        assert_eq!(line.action, RollCallAction::Scan);
    }

    #[test]
    fn verbose_raises_the_log_level() {
        let cli = Cli::parse_from(["rollcall", "--verbose"]);
        assert_eq!(cli.log_filter(), "rollcall=debug");
        assert!(cli.config.is_none());
    }
}
