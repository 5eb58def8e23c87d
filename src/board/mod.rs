//! Kanban task board with expiring tasks.
//!
//! The board is a keyed collection of ordered columns. Tasks carry wall-clock
//! timestamps and expire seven days after creation; expiry is enforced by
//! filtering when the board is loaded, never by a background sweep.

mod store;

pub use store::{BoardStore, StoreError};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// How long a task lives, in milliseconds.
pub const TASK_TTL_MS: u64 = 7 * 24 * 60 * 60 * 1000;

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(format!("unknown priority: {}", s)),
        }
    }
}

/// A single task card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub content: String,
    pub priority: Priority,
    pub assigned_to: String,
    pub style_tag: String,
    /// Milliseconds since the epoch.
    pub created_at: u64,
    /// `created_at + TASK_TTL_MS`.
    pub expires_at: u64,
}

/// An ordered column of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    pub tasks: Vec<Task>,
}

/// The whole board: columns keyed by id plus their display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub columns: HashMap<String, Column>,
    pub column_order: Vec<String>,
}

impl Default for Board {
    fn default() -> Self {
        Self::starter()
    }
}

impl Board {
    /// The empty three-column board new users start with.
    pub fn starter() -> Self {
        let mut columns = HashMap::new();
        for (id, title) in [
            ("todo", "To Do"),
            ("inProgress", "In Progress"),
            ("done", "Done"),
        ] {
            columns.insert(
                id.to_string(),
                Column {
                    id: id.to_string(),
                    title: title.to_string(),
                    tasks: Vec::new(),
                },
            );
        }
        Self {
            columns,
            column_order: vec![
                "todo".to_string(),
                "inProgress".to_string(),
                "done".to_string(),
            ],
        }
    }

    /// Columns in display order.
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> {
        self.column_order
            .iter()
            .filter_map(move |id| self.columns.get(id))
    }

    /// Add a new task to a column. Returns the generated task id.
    pub fn add_task(
        &mut self,
        column_id: &str,
        content: &str,
        priority: Priority,
        assigned_to: &str,
        style_tag: &str,
    ) -> Result<String, StoreError> {
        let now = now_millis();
        let id = self.next_task_id(now);
        let task = Task {
            id: id.clone(),
            content: content.to_string(),
            priority,
            assigned_to: assigned_to.to_string(),
            style_tag: style_tag.to_string(),
            created_at: now,
            expires_at: now + TASK_TTL_MS,
        };

        let column = self
            .columns
            .get_mut(column_id)
            .ok_or_else(|| StoreError::UnknownColumn(column_id.to_string()))?;
        column.tasks.push(task);
        Ok(id)
    }

    /// Move a task to the end of another column.
    pub fn move_task(&mut self, task_id: &str, target_column: &str) -> Result<(), StoreError> {
        if !self.columns.contains_key(target_column) {
            return Err(StoreError::UnknownColumn(target_column.to_string()));
        }
        let task = self.take_task(task_id)?;
        self.columns
            .get_mut(target_column)
            .expect("column checked above")
            .tasks
            .push(task);
        Ok(())
    }

    /// Remove a task from whichever column holds it.
    pub fn remove_task(&mut self, task_id: &str) -> Result<Task, StoreError> {
        self.take_task(task_id)
    }

    /// Find a task anywhere on the board.
    pub fn find_task(&self, task_id: &str) -> Option<(&Column, &Task)> {
        self.ordered_columns()
            .find_map(|c| c.tasks.iter().find(|t| t.id == task_id).map(|t| (c, t)))
    }

    /// Drop every task whose expiry is at or before `now`. Returns how many
    /// tasks were removed.
    pub fn prune_expired(&mut self, now: u64) -> usize {
        let mut removed = 0;
        for column in self.columns.values_mut() {
            let before = column.tasks.len();
            column.tasks.retain(|t| t.expires_at > now);
            removed += before - column.tasks.len();
        }
        removed
    }

    pub fn task_count(&self) -> usize {
        self.columns.values().map(|c| c.tasks.len()).sum()
    }

    fn take_task(&mut self, task_id: &str) -> Result<Task, StoreError> {
        for column in self.columns.values_mut() {
            if let Some(pos) = column.tasks.iter().position(|t| t.id == task_id) {
                return Ok(column.tasks.remove(pos));
            }
        }
        Err(StoreError::UnknownTask(task_id.to_string()))
    }

    /// Timestamp-based ids, disambiguated by the current task count so that
    /// several tasks created in the same millisecond stay distinct.
    fn next_task_id(&self, now: u64) -> String {
        format!("{}-{}", now, self.task_count())
    }
}

/// Current wall-clock time in milliseconds since the epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
