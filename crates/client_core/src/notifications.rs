use serde::{Deserialize, Serialize};

use shared::domain::NotificationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

/// A system alert produced by an external event feed. This core only
/// stores, lists, and removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub created_ago: String,
}

/// Small in-memory queue of system alerts, seeded at session start.
#[derive(Debug, Default)]
pub struct NotificationCenter {
    entries: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(seed: Vec<Notification>) -> Self {
        Self { entries: seed }
    }

    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Current queue length, rendered as the badge count by callers.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Removes exactly one entry by id. Returns false (and changes
    /// nothing) when the id is absent.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        match self.entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn clear_all(&mut self) {
        self.entries.clear();
    }
}
