//! User-visible notices emitted by the stores.
//!
//! Every store outcome pushes a [`Notice`] onto a shared queue. The REPL drains the queue after
//! each command and prints what happened.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub message: String,
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Success => write!(f, "[ok] {}", self.message),
            Level::Error => write!(f, "[error] {}", self.message),
        }
    }
}

/// A cloneable handle onto a single notice queue.
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Rc<RefCell<Vec<Notice>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(%message, "notice");
        self.push(Level::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "notice");
        self.push(Level::Error, message);
    }

    fn push(&self, level: Level, message: String) {
        self.queue.borrow_mut().push(Notice { level, message });
    }

    /// Removes and returns every pending notice, oldest first.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }
}
