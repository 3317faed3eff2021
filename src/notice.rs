//! User-facing notifications

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

/// Outcome messages shown to the user after a crawl
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "reference")]
pub enum Notice {
    /// Every link was flattened and written
    Updated,
    /// The source of a link could not be read
    SourceUnreadable(String),
    /// The target of a link could not be written
    TargetUnwritable(String),
}

impl Notice {
    pub fn is_failure(&self) -> bool {
        !matches!(self, Notice::Updated)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Updated => write!(f, "Updated Result"),
            Notice::SourceUnreadable(reference) => write!(
                f,
                "Import Crawler Error: Unable to open source filepath {}",
                reference
            ),
            Notice::TargetUnwritable(reference) => write!(
                f,
                "Import Crawler Error: Unable to open target filepath {}",
                reference
            ),
        }
    }
}

/// Sink for notices
pub trait Notifier {
    fn notify(&self, notice: &Notice);
}

/// Routes notices to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        if notice.is_failure() {
            log::error!("{}", notice);
        } else {
            log::info!("{}", notice);
        }
    }
}

/// Prints notices to stderr
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: &Notice) {
        eprintln!("{}", notice);
    }
}

/// Keeps every notice it receives
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: &Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice.clone());
    }
}
