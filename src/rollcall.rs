//! Taking attendance one student at a time.
//!
//! A [`RollCall`] snapshots the current class's roster order and walks it front to back. Each
//! student is marked either from a fingerprint scan (success is present, failure is absent) or
//! manually.

use crate::manager::AttendanceManager;
use crate::models::{Status, Student};
use crate::notify::Notifier;
use crate::scanner::ScanOutcome;
use chrono::{DateTime, Local};
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Moved on to the student at this index.
    Next(usize),
    Complete,
}

pub struct RollCall {
    class_id: String,
    student_ids: Vec<String>,
    index: usize,
    completed_at: Option<DateTime<Local>>,
    advance_delay: Duration,
    notifier: Notifier,
}

impl RollCall {
    /// Starts a roll call over the current class, or returns `None` if no class is selected.
    pub fn start(
        attendance: &AttendanceManager,
        advance_delay: Duration,
        notifier: Notifier,
    ) -> Option<Self> {
        let class = attendance.current_class()?;
        info!(class_id = %class.id, students = class.students.len(), "roll call started");

        Some(Self {
            class_id: class.id.clone(),
            student_ids: class.students.iter().map(|s| s.id.clone()).collect(),
            index: 0,
            completed_at: None,
            advance_delay,
            notifier,
        })
    }

    pub fn class_id(&self) -> &str {
        &self.class_id
    }

    /// The student waiting to be marked, or `None` once the roll call is complete.
    pub fn current<'a>(&self, attendance: &'a AttendanceManager) -> Option<&'a Student> {
        if self.is_complete() {
            return None;
        }

        let id = self.student_ids.get(self.index)?;
        attendance.class(&self.class_id)?.student(id)
    }

    /// One-based position of the current student and the roster size, as in "Student 2 of 8".
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.student_ids.len())
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some() || self.student_ids.is_empty()
    }

    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    /// Marks the current student manually and moves on straight away.
    pub fn mark(&mut self, attendance: &mut AttendanceManager, status: Status) -> Progress {
        if let Some(id) = self.student_ids.get(self.index).filter(|_| !self.is_complete()) {
            attendance.update_student_status(id, status);
        }

        self.advance()
    }

    /// Marks the current student from a scan, then pauses before moving to the next one.
    pub async fn record_scan(
        &mut self,
        attendance: &mut AttendanceManager,
        outcome: ScanOutcome,
    ) -> Progress {
        let status = match outcome {
            ScanOutcome::Success => Status::Present,
            ScanOutcome::Failure => Status::Absent,
        };

        if let Some(id) = self.student_ids.get(self.index).filter(|_| !self.is_complete()) {
            attendance.update_student_status(id, status);
        }

        if self.index + 1 < self.student_ids.len() {
            sleep(self.advance_delay).await;
        }

        self.advance()
    }

    fn advance(&mut self) -> Progress {
        if self.is_complete() {
            return Progress::Complete;
        }

        if self.index + 1 < self.student_ids.len() {
            self.index += 1;
            return Progress::Next(self.index);
        }

        self.completed_at = Some(Local::now());
        info!(class_id = %self.class_id, "roll call complete");
        self.notifier.success("Attendance completed for all students!");

        Progress::Complete
    }
}
