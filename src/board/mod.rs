//! Board state store.
//!
//! A [`Board`] keeps one ordered column per [`Status`]. Column membership is
//! the only record of a task's status, so the two cannot drift apart. Every
//! task id appears in exactly one column, at most once.

pub mod target;
pub mod task;

use std::collections::HashSet;

pub use target::DragTarget;
pub use task::{NewTask, ParsePriorityError, ParseStatusError, Priority, Status, Task, TaskRecord};

/// Failure to build a board from a fetched task list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// The same task id appeared more than once.
    #[error("task `{0}` appears more than once in the task list")]
    DuplicateTask(String),
    /// A record arrived without an id.
    #[error("task `{title}` has no id")]
    MissingId {
        /// Title of the offending record.
        title: String,
    },
}

/// One status column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Column identifier.
    pub status: Status,
    /// Cards, top to bottom.
    pub tasks: Vec<Task>,
}

/// Client-side view of task placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    columns: [Column; 3],
}

impl Default for Board {
    fn default() -> Self {
        Self {
            columns: Status::ALL.map(|status| Column { status, tasks: Vec::new() }),
        }
    }
}

impl Board {
    /// Groups records by status, keeping their relative order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if a record has no id or an id repeats.
    pub fn load<I>(records: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = TaskRecord>,
    {
        let mut board = Self::default();
        let mut seen = HashSet::new();
        for record in records {
            if record.id.is_empty() {
                return Err(LoadError::MissingId { title: record.title });
            }
            if !seen.insert(record.id.clone()) {
                return Err(LoadError::DuplicateTask(record.id));
            }
            let (status, task) = record.into_parts();
            board.column_mut(status).push(task);
        }
        tracing::debug!(tasks = seen.len(), "board loaded");
        Ok(board)
    }

    /// Returns a new board with `record` at the top of its status column.
    ///
    /// A card already on the board under the same id is replaced.
    #[must_use]
    pub fn insert(&self, record: TaskRecord) -> Self {
        let mut next = self.clone();
        next.take(&record.id);
        let (status, task) = record.into_parts();
        next.column_mut(status).insert(0, task);
        next
    }

    /// Resolves a column id or a task id to the column it refers to.
    #[must_use]
    pub fn resolve_column(&self, id: &str) -> Option<Status> {
        self.resolve_target(id).map(|target| target.column())
    }

    /// Resolves a raw drag id to a [`DragTarget`].
    ///
    /// Column ids win over task ids. `None` means the id is neither, which
    /// is routine when the pointer is over empty space.
    #[must_use]
    pub fn resolve_target(&self, id: &str) -> Option<DragTarget> {
        if let Some(status) = Status::from_column_id(id) {
            return Some(DragTarget::Column(status));
        }
        self.columns.iter().find_map(|column| {
            column.tasks.iter().position(|task| task.id == id).map(|index| DragTarget::Task {
                column: column.status,
                task_id: id.to_string(),
                index,
            })
        })
    }

    /// Cards in the given column.
    #[must_use]
    pub fn column(&self, status: Status) -> &[Task] {
        &self.columns[slot(status)].tasks
    }

    /// Columns in board order.
    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Status of a task, derived from the column holding it.
    #[must_use]
    pub fn status_of(&self, task_id: &str) -> Option<Status> {
        self.columns
            .iter()
            .find(|column| column.tasks.iter().any(|task| task.id == task_id))
            .map(|column| column.status)
    }

    /// Looks up a task by id.
    #[must_use]
    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.columns.iter().flat_map(|column| column.tasks.iter()).find(|task| task.id == task_id)
    }

    /// Total number of tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    /// Returns `true` if no column holds any task.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(|column| column.tasks.is_empty())
    }

    /// Wire records in board order, with status taken from column membership.
    #[must_use]
    pub fn records(&self) -> Vec<TaskRecord> {
        self.columns
            .iter()
            .flat_map(|column| column.tasks.iter().map(|task| task.to_record(column.status)))
            .collect()
    }

    /// Moves a task from `from` into `to` at `index`, clamped to the end.
    ///
    /// Returns `false` and leaves the board alone if the task is not in `from`.
    pub(crate) fn transfer(&mut self, task_id: &str, from: Status, to: Status, index: usize) -> bool {
        let source = self.column_mut(from);
        let Some(position) = source.iter().position(|task| task.id == task_id) else {
            return false;
        };
        let task = source.remove(position);
        let dest = self.column_mut(to);
        let index = index.min(dest.len());
        dest.insert(index, task);
        true
    }

    /// Stable move of the card at `from` to `to` within one column.
    pub(crate) fn reorder(&mut self, status: Status, from: usize, to: usize) {
        let tasks = self.column_mut(status);
        if from >= tasks.len() || from == to {
            return;
        }
        let task = tasks.remove(from);
        let to = to.min(tasks.len());
        tasks.insert(to, task);
    }

    /// Moves a task to the bottom of `status`, wherever it currently is.
    pub(crate) fn relocate(&mut self, task_id: &str, status: Status) -> bool {
        match self.status_of(task_id) {
            Some(current) if current == status => true,
            Some(current) => self.transfer(task_id, current, status, usize::MAX),
            None => false,
        }
    }

    fn take(&mut self, task_id: &str) -> Option<Task> {
        self.columns.iter_mut().find_map(|column| {
            let position = column.tasks.iter().position(|task| task.id == task_id)?;
            Some(column.tasks.remove(position))
        })
    }

    fn column_mut(&mut self, status: Status) -> &mut Vec<Task> {
        &mut self.columns[slot(status)].tasks
    }
}

fn slot(status: Status) -> usize {
    match status {
        Status::Pending => 0,
        Status::InProgress => 1,
        Status::Done => 2,
    }
}
