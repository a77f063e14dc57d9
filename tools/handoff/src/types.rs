use serde::Serialize;

/// Placeholder for scalar fields the transcript never filled in.
pub const UNKNOWN: &str = "unknown";

/// Everything the extractor learns about one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub time_start: Option<String>,
    pub time_end: Option<String>,
    pub duration_minutes: i64,
    pub project: String,
    pub git_branch: String,
    pub files_modified: Vec<FileRecord>,
    pub commands_run: Vec<CommandRecord>,
    pub tasks_completed: Vec<TaskRecord>,
    pub commits: Vec<CommitRecord>,
}

impl Default for SessionSummary {
    fn default() -> Self {
        Self {
            session_id: UNKNOWN.to_string(),
            time_start: None,
            time_end: None,
            duration_minutes: 0,
            project: UNKNOWN.to_string(),
            git_branch: UNKNOWN.to_string(),
            files_modified: Vec::new(),
            commands_run: Vec::new(),
            tasks_completed: Vec::new(),
            commits: Vec::new(),
        }
    }
}

/// A file touched during the session.
///
/// Serializes flat: `{"path": ..., "tool": "Edit", "count": 2}` or
/// `{"path": ..., "tool": "Write", "line_count": 40}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    pub path: String,
    #[serde(flatten)]
    pub change: FileChange,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "tool")]
pub enum FileChange {
    Edit { count: u32 },
    Write { line_count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRecord {
    pub command: String,
    pub description: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRecord {
    pub id: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub command: String,
    pub timestamp: String,
}
