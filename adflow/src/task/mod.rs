//! Task lifecycle tracking.
//!
//! A task is submitted, works for the duration of one pipeline run, and is
//! finalized exactly once by the orchestrator. Terminal states are final; no
//! actor may move a task out of them.

use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::TaskError;

/// Lifecycle state of one pipeline task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Accepted, not yet running.
    Submitted,
    /// The pipeline is executing.
    Working,
    /// The pipeline reached its end and a report was delivered.
    Completed,
    /// A run-level error ended the task without a report.
    Failed,
}

impl TaskStatus {
    /// Returns true for the final states.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Submitted => write!(f, "submitted"),
            Self::Working => write!(f, "working"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// One tracked pipeline task.
#[derive(Debug)]
pub struct Task {
    id: Uuid,
    status: RwLock<TaskStatus>,
}

impl Task {
    /// Creates a submitted task with a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Creates a submitted task with a caller-supplied id.
    #[must_use]
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            status: RwLock::new(TaskStatus::Submitted),
        }
    }

    /// Returns the task id.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> TaskStatus {
        *self.status.read()
    }

    /// Marks the task as running.
    ///
    /// Idempotent while the task is live; rejected once terminal.
    pub fn start(&self) -> Result<(), TaskError> {
        let mut status = self.status.write();
        match *status {
            TaskStatus::Submitted | TaskStatus::Working => {
                *status = TaskStatus::Working;
                Ok(())
            }
            current => Err(TaskError::AlreadyFinal {
                task_id: self.id,
                current,
            }),
        }
    }

    /// Takes the single legal transition into a terminal state.
    pub fn finalize(&self, terminal: TaskStatus) -> Result<(), TaskError> {
        if !terminal.is_terminal() {
            return Err(TaskError::NotTerminal {
                requested: terminal,
            });
        }

        let mut status = self.status.write();
        if status.is_terminal() {
            return Err(TaskError::AlreadyFinal {
                task_id: self.id,
                current: *status,
            });
        }
        *status = terminal;
        Ok(())
    }
}

impl Default for Task {
    fn default() -> Self {
        Self::new()
    }
}

/// Concurrent registry of live tasks.
///
/// Runs are independent; the registry is the only state shared across them
/// and it holds no per-run data beyond the task handles.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: DashMap<Uuid, Arc<Task>>,
}

impl TaskRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates, registers, and returns a new task.
    #[must_use]
    pub fn create(&self) -> Arc<Task> {
        let task = Arc::new(Task::new());
        self.tasks.insert(task.id(), Arc::clone(&task));
        task
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<Arc<Task>> {
        self.tasks.get(&id).map(|entry| Arc::clone(entry.value()))
    }

    /// Returns a task's status, if the task is known.
    #[must_use]
    pub fn status(&self, id: Uuid) -> Option<TaskStatus> {
        self.get(id).map(|task| task.status())
    }

    /// Removes a task, returning its handle.
    pub fn remove(&self, id: Uuid) -> Option<Arc<Task>> {
        self.tasks.remove(&id).map(|(_, task)| task)
    }

    /// Returns the number of registered tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true when no tasks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_submitted() {
        let task = Task::new();
        assert_eq!(task.status(), TaskStatus::Submitted);
        assert!(!task.status().is_terminal());
    }

    #[test]
    fn start_then_complete() {
        let task = Task::new();
        task.start().unwrap();
        assert_eq!(task.status(), TaskStatus::Working);

        task.finalize(TaskStatus::Completed).unwrap();
        assert_eq!(task.status(), TaskStatus::Completed);
    }

    #[test]
    fn start_is_idempotent_while_working() {
        let task = Task::new();
        task.start().unwrap();
        task.start().unwrap();
        assert_eq!(task.status(), TaskStatus::Working);
    }

    #[test]
    fn second_finalize_is_rejected() {
        let task = Task::new();
        task.start().unwrap();
        task.finalize(TaskStatus::Completed).unwrap();

        let err = task.finalize(TaskStatus::Failed);
        assert!(matches!(err, Err(TaskError::AlreadyFinal { .. })));
        assert_eq!(task.status(), TaskStatus::Completed);
    }

    #[test]
    fn finalize_rejects_non_terminal_status() {
        let task = Task::new();
        let err = task.finalize(TaskStatus::Working);
        assert!(matches!(err, Err(TaskError::NotTerminal { .. })));
    }

    #[test]
    fn start_after_terminal_is_rejected() {
        let task = Task::new();
        task.finalize(TaskStatus::Failed).unwrap();
        assert!(task.start().is_err());
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TaskStatus::Completed).unwrap();
        assert_eq!(json, r#""completed""#);
    }

    #[test]
    fn registry_round_trip() {
        let registry = TaskRegistry::new();
        assert!(registry.is_empty());

        let task = registry.create();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.status(task.id()), Some(TaskStatus::Submitted));

        task.start().unwrap();
        assert_eq!(registry.status(task.id()), Some(TaskStatus::Working));

        let removed = registry.remove(task.id());
        assert!(removed.is_some());
        assert!(registry.get(task.id()).is_none());
    }
}
