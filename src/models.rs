use crate::task_log::{LogFormat, TaskLog};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_STATUS: &str = "Present";

/// Attendance light. The column is free text, so anything other than the
/// two known values is carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ActiveStatus {
    Active,
    Inactive,
    Other(String),
}

impl From<String> for ActiveStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Active" => ActiveStatus::Active,
            "Inactive" => ActiveStatus::Inactive,
            _ => ActiveStatus::Other(value),
        }
    }
}

impl From<ActiveStatus> for String {
    fn from(status: ActiveStatus) -> Self {
        match status {
            ActiveStatus::Active => "Active".to_string(),
            ActiveStatus::Inactive => "Inactive".to_string(),
            ActiveStatus::Other(value) => value,
        }
    }
}

impl ActiveStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ActiveStatus::Active => "Active",
            ActiveStatus::Inactive => "Inactive",
            ActiveStatus::Other(value) => value,
        }
    }
}

/// One stored row of the `reports` table.
///
/// The four task logs keep their historical column names; they hold the
/// Completed, In-Progress, Planned and Issues lists in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub id: i64,
    pub date: String,
    pub in_time: Option<String>,
    pub out_time: Option<String>,
    pub tasks: Option<String>,
    pub status: Option<String>,
    pub last_updated: Option<String>,
    pub active_status: Option<ActiveStatus>,
    pub cinematography_log: Option<TaskLog>,
    pub video_editing_log: Option<TaskLog>,
    pub live_operating_log: Option<TaskLog>,
    pub script_log: Option<TaskLog>,
}

/// Full state of a day as submitted by the client.
///
/// Every attendance and task-log key must be present in the body; `null`
/// clears the column. Only `status` and `tasks` may be left out.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportSnapshot {
    pub date: String,
    #[serde(deserialize_with = "present")]
    pub in_time: Option<String>,
    #[serde(deserialize_with = "present")]
    pub out_time: Option<String>,
    #[serde(deserialize_with = "present")]
    pub active_status: Option<ActiveStatus>,
    #[serde(deserialize_with = "present")]
    pub cinematography_log: Option<TaskLog>,
    #[serde(deserialize_with = "present")]
    pub video_editing_log: Option<TaskLog>,
    #[serde(deserialize_with = "present")]
    pub live_operating_log: Option<TaskLog>,
    #[serde(deserialize_with = "present")]
    pub script_log: Option<TaskLog>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub tasks: Option<String>,
}

impl ReportSnapshot {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            ..Self::default()
        }
    }

    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_STATUS)
    }
}

// A field routed through `deserialize_with` has no implicit default, so a
// missing key is a deserialization error while an explicit null is `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created(i64),
    Updated(i64),
}

impl SaveOutcome {
    pub fn id(self) -> i64 {
        match self {
            SaveOutcome::Created(id) | SaveOutcome::Updated(id) => id,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            SaveOutcome::Created(_) => "Report created",
            SaveOutcome::Updated(_) => "Report updated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskLogView {
    pub format: LogFormat,
    pub text: String,
}

impl From<Option<&TaskLog>> for TaskLogView {
    fn from(log: Option<&TaskLog>) -> Self {
        match log {
            Some(log) => Self {
                format: log.format(),
                text: log.as_str().to_string(),
            },
            None => Self {
                format: LogFormat::Plain,
                text: String::new(),
            },
        }
    }
}

/// A report with the task columns under the names the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub id: i64,
    pub date: String,
    pub in_time: Option<String>,
    pub out_time: Option<String>,
    pub active_status: Option<ActiveStatus>,
    pub status: Option<String>,
    pub last_updated: Option<String>,
    pub completed: TaskLogView,
    pub in_progress: TaskLogView,
    pub planned: TaskLogView,
    pub issues: TaskLogView,
}

impl From<&Report> for ReportView {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            date: report.date.clone(),
            in_time: report.in_time.clone(),
            out_time: report.out_time.clone(),
            active_status: report.active_status.clone(),
            status: report.status.clone(),
            last_updated: report.last_updated.clone(),
            completed: report.cinematography_log.as_ref().into(),
            in_progress: report.video_editing_log.as_ref().into(),
            planned: report.live_operating_log.as_ref().into(),
            issues: report.script_log.as_ref().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub id: i64,
    pub date: Option<String>,
    pub title: Option<String>,
    pub is_solved: bool,
    pub solution: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewIssue {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "solved_flag")]
    pub is_solved: bool,
    #[serde(default)]
    pub solution: Option<String>,
}

/// Body of `PUT /api/issues/:id`. Without a solution the toggle path runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IssueUpdate {
    #[serde(default, deserialize_with = "solved_flag")]
    pub is_solved: bool,
    #[serde(default)]
    pub solution: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

// The dashboard sends 1/0; booleans are accepted as well.
fn solved_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(flag)) => flag,
        Some(Flag::Int(value)) => value != 0,
        None => false,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceKind {
    Drive,
    Link,
    Other(String),
}

impl From<String> for ResourceKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "drive" => ResourceKind::Drive,
            "link" => ResourceKind::Link,
            _ => ResourceKind::Other(value),
        }
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Drive => "drive".to_string(),
            ResourceKind::Link => "link".to_string(),
            ResourceKind::Other(value) => value,
        }
    }
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::Drive => "drive",
            ResourceKind::Link => "link",
            ResourceKind::Other(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: Option<ResourceKind>,
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewResource {
    #[serde(rename = "type", default)]
    pub kind: Option<ResourceKind>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub id: i64,
    pub title: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProject {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChangesResponse {
    pub message: String,
    pub changes: usize,
}
