//! Task records as exchanged with the task service, and their board form.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Workflow status, which doubles as the column identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Not started yet.
    #[serde(rename = "PENDING")]
    Pending,
    /// Being worked on.
    #[serde(rename = "INPROGRESS")]
    InProgress,
    /// Finished.
    #[serde(rename = "DONE")]
    Done,
}

impl Status {
    /// Every status, in board order.
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Done];

    /// The wire name of this status, which is also its column id.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "PENDING",
            Status::InProgress => "INPROGRESS",
            Status::Done => "DONE",
        }
    }

    /// Matches a column id exactly, as it appears in drag targets.
    #[must_use]
    pub fn from_column_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == id)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status `{0}` (expected PENDING, INPROGRESS or DONE)")]
pub struct ParseStatusError(String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace(['-', '_', ' '], "").as_str() {
            "PENDING" | "TODO" => Ok(Status::Pending),
            "INPROGRESS" => Ok(Status::InProgress),
            "DONE" => Ok(Status::Done),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    /// Low priority.
    Low,
    /// Medium priority.
    Medium,
    /// High priority.
    High,
}

impl Priority {
    /// The wire name of this priority.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a priority name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown priority `{0}` (expected LOW, MEDIUM or HIGH)")]
pub struct ParsePriorityError(String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Priority::Low),
            "MEDIUM" => Ok(Priority::Medium),
            "HIGH" => Ok(Priority::High),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

/// A task as it sits on the board.
///
/// There is no status field: a card's status is whatever column
/// holds it, see [`Board::status_of`](super::Board::status_of).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Stable unique identifier assigned by the task service.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Free-form description; may be empty.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Due date.
    pub due_date: NaiveDate,
}

impl Task {
    /// Builds the wire record for this task in the given column.
    #[must_use]
    pub fn to_record(&self, status: Status) -> TaskRecord {
        TaskRecord {
            id: self.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            priority: self.priority,
            status,
            due_date: self.due_date,
        }
    }
}

/// A task as the task service sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    /// Unique identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Short title.
    pub title: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Status reported by the service.
    pub status: Status,
    /// Due date.
    #[serde(with = "due_date")]
    pub due_date: NaiveDate,
}

impl TaskRecord {
    /// Splits the record into its column and its board card.
    #[must_use]
    pub fn into_parts(self) -> (Status, Task) {
        let task = Task {
            id: self.id,
            title: self.title,
            description: self.description,
            priority: self.priority,
            due_date: self.due_date,
        };
        (self.status, task)
    }
}

/// Body of a task creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Short title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Priority.
    pub priority: Priority,
    /// Due date.
    #[serde(with = "due_date")]
    pub due_date: NaiveDate,
    /// Column the task is created in.
    pub status: Status,
}

/// Due dates arrive either as `2024-06-01` or as a full RFC 3339 timestamp.
mod due_date {
    use chrono::{DateTime, NaiveDate};
    use serde::{de, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(date) = NaiveDate::parse_from_str(&raw, FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.date_naive())
            .map_err(|e| de::Error::custom(format!("invalid due date `{raw}`: {e}")))
    }
}
