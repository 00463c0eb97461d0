//! Daily task model.
//!
//! A task carries a positional priority (see [`priority`]) and a creation
//! timestamp in epoch milliseconds. The persisted field names match the
//! `zen_tasks` blob format, hence the camelCase `createdAt`.

pub mod confirm;
pub mod priority;
pub mod registry;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use confirm::DeleteConfirmation;
pub use priority::assign_priorities;
pub use registry::{TaskFilter, TaskRegistry, ToggleOutcome};

/// Priority label derived from a task's position in the list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 3] = [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "HIGH",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::Low => "LOW",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "HIGH" => Ok(TaskPriority::High),
            "MEDIUM" => Ok(TaskPriority::Medium),
            "LOW" => Ok(TaskPriority::Low),
            _ => Err(TaskError::UnknownPriority(s.to_string())),
        }
    }
}

/// Domain tag for a task.
///
/// Serialized as the uppercase tag. Reading goes through [`FromStr`], so
/// any casing and the localized labels of older blobs are accepted.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
pub enum TaskCategory {
    #[serde(rename = "WORK")]
    Work,
    #[serde(rename = "PERSONAL")]
    Personal,
    #[serde(rename = "SHOPPING")]
    Shopping,
    #[serde(rename = "HEALTH")]
    Health,
    #[default]
    #[serde(rename = "OTHER")]
    Other,
}

impl TaskCategory {
    pub const ALL: [TaskCategory; 5] = [
        TaskCategory::Work,
        TaskCategory::Personal,
        TaskCategory::Shopping,
        TaskCategory::Health,
        TaskCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCategory::Work => "WORK",
            TaskCategory::Personal => "PERSONAL",
            TaskCategory::Shopping => "SHOPPING",
            TaskCategory::Health => "HEALTH",
            TaskCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "WORK" => return Ok(TaskCategory::Work),
            "PERSONAL" => return Ok(TaskCategory::Personal),
            "SHOPPING" => return Ok(TaskCategory::Shopping),
            "HEALTH" => return Ok(TaskCategory::Health),
            "OTHER" => return Ok(TaskCategory::Other),
            _ => {}
        }
        match trimmed {
            "Công việc" => Ok(TaskCategory::Work),
            "Cá nhân" => Ok(TaskCategory::Personal),
            "Mua sắm" => Ok(TaskCategory::Shopping),
            "Sức khỏe" => Ok(TaskCategory::Health),
            "Khác" => Ok(TaskCategory::Other),
            _ => Err(TaskError::UnknownCategory(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for TaskCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Why a task operation was rejected.
///
/// None of these change the board; callers show them as a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task title is empty")]
    EmptyTitle,
    #[error("daily limit of {cap} tasks reached")]
    DailyCapReached { cap: usize },
    #[error("unknown priority: {0}")]
    UnknownPriority(String),
    #[error("unknown category: {0}")]
    UnknownCategory(String),
}

/// A single tracked task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: TaskPriority,
    pub category: TaskCategory,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
}

impl Task {
    /// Create an incomplete task stamped with `now`.
    ///
    /// The priority is provisional; the registry reassigns it positionally.
    pub fn new(title: impl Into<String>, category: TaskCategory, now: DateTime<Local>) -> Self {
        Task {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: None,
            completed: false,
            priority: TaskPriority::Low,
            category,
            created_at: now.timestamp_millis(),
        }
    }

    /// Local calendar date the task was created on.
    pub fn created_on(&self) -> Option<NaiveDate> {
        Local
            .timestamp_millis_opt(self.created_at)
            .single()
            .map(|dt| dt.date_naive())
    }
}

/// User-supplied fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub category: TaskCategory,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, category: TaskCategory) -> Self {
        Self {
            title: title.into(),
            description: None,
            category,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let description = description.into();
        self.description = if description.trim().is_empty() {
            None
        } else {
            Some(description)
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noon() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn task_serializes_with_blob_field_names() {
        let task = Task::new("Write report", TaskCategory::Work, noon());
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["createdAt"], serde_json::json!(noon().timestamp_millis()));
        assert_eq!(json["priority"], "LOW");
        assert_eq!(json["category"], "WORK");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn localized_category_labels_still_load() {
        let json = r#"{"id":"a","title":"Run","completed":false,"priority":"HIGH","category":"Sức khỏe","createdAt":0}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.category, TaskCategory::Health);
    }

    #[test]
    fn category_deserializes_in_any_case() {
        let cat: TaskCategory = serde_json::from_str(r#""health""#).unwrap();
        assert_eq!(cat, TaskCategory::Health);
        let cat: TaskCategory = serde_json::from_str(r#""Work""#).unwrap();
        assert_eq!(cat, TaskCategory::Work);
        assert_eq!(serde_json::to_string(&cat).unwrap(), r#""WORK""#);
        assert!(serde_json::from_str::<TaskCategory>(r#""errands""#).is_err());
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!(" high ".parse::<TaskPriority>().unwrap(), TaskPriority::High);
        assert!("URGENT".parse::<TaskPriority>().is_err());
    }

    #[test]
    fn category_parses_both_spellings() {
        assert_eq!("shopping".parse::<TaskCategory>().unwrap(), TaskCategory::Shopping);
        assert_eq!("Khác".parse::<TaskCategory>().unwrap(), TaskCategory::Other);
        assert_eq!(
            "Errands".parse::<TaskCategory>(),
            Err(TaskError::UnknownCategory("Errands".into()))
        );
    }

    #[test]
    fn created_on_uses_local_date() {
        let task = Task::new("t", TaskCategory::Other, noon());
        assert_eq!(task.created_on(), NaiveDate::from_ymd_opt(2026, 3, 10));
    }

    #[test]
    fn blank_draft_description_is_dropped() {
        let draft = TaskDraft::new("t", TaskCategory::Other).with_description("   ");
        assert!(draft.description.is_none());
    }
}
