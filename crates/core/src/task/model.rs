//! Task model definitions

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Task status, owned by the server
///
/// The client never computes a status locally; it only requests a transition
/// to `Completed` through the dedicated complete endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    /// Wire value, as used in the `status` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Task priority level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 4] = [
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// A task as returned by the task service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default, deserialize_with = "deserialize_due_date")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Create a new task with the given id and title
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Whether the task is past due: a due date exists, the task is not
    /// completed, and the date's midnight (UTC) is strictly before `now`.
    ///
    /// Presentational only; never sent to the server.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) if self.status != TaskStatus::Completed => {
                due.and_time(NaiveTime::MIN).and_utc() < now
            }
            _ => false,
        }
    }
}

/// Transient form payload for creating or editing a task
///
/// Empty optional fields are dropped before serialization so the body only
/// carries what the user actually filled in.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

// The service reports due dates either as a plain date or as a full ISO
// datetime; only the calendar date is kept.
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => {
            let date = s.split('T').next().unwrap_or_default();
            NaiveDate::parse_from_str(date, "%Y-%m-%d")
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_wire_format_is_snake_case() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        let status: TaskStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(status, TaskStatus::Cancelled);
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
    }

    #[test]
    fn test_due_date_accepts_datetime_and_plain_date() {
        let task: Task = serde_json::from_str(
            r#"{"id":1,"title":"a","description":null,"status":"pending","priority":"low","due_date":"2026-03-01T00:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 3, 1));

        let task: Task = serde_json::from_str(
            r#"{"id":2,"title":"b","description":null,"status":"pending","priority":"low","due_date":"2026-03-02"}"#,
        )
        .unwrap();
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 3, 2));
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let task: Task = serde_json::from_str(r#"{"id":3,"title":"c"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(task.description.is_none());
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_overdue_requires_due_date_and_open_status() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let due = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        let open = Task::new(1, "t").with_due_date(due);
        assert!(open.is_overdue(now));

        let completed = Task::new(2, "t")
            .with_due_date(due)
            .with_status(TaskStatus::Completed);
        assert!(!completed.is_overdue(now));

        let undated = Task::new(3, "t");
        assert!(!undated.is_overdue(now));

        let future = Task::new(4, "t").with_due_date(NaiveDate::from_ymd_opt(2026, 3, 11).unwrap());
        assert!(!future.is_overdue(now));
    }

    #[test]
    fn test_overdue_is_strict_from_midnight() {
        let due = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let task = Task::new(1, "t").with_due_date(due);

        let midnight = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 0).unwrap();
        assert!(!task.is_overdue(midnight));

        let later_same_day = Utc.with_ymd_and_hms(2026, 3, 10, 0, 0, 1).unwrap();
        assert!(task.is_overdue(later_same_day));
    }

    #[test]
    fn test_draft_skips_empty_optionals() {
        let draft = TaskDraft {
            title: "Buy milk".to_string(),
            description: None,
            priority: TaskPriority::Low,
            due_date: None,
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["priority"], "low");
        assert!(body.get("description").is_none());
        assert!(body.get("due_date").is_none());
    }

    #[test]
    fn test_draft_serializes_due_date_as_plain_date() {
        let draft = TaskDraft {
            title: "t".to_string(),
            description: Some("d".to_string()),
            priority: TaskPriority::Urgent,
            due_date: NaiveDate::from_ymd_opt(2026, 4, 1),
        };
        let body = serde_json::to_value(&draft).unwrap();
        assert_eq!(body["due_date"], "2026-04-01");
        assert_eq!(body["description"], "d");
    }
}
