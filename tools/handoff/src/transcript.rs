use crate::error::HandoffError;
use crate::parse::{minutes_between, scalar_text};
use crate::types::{
    CommandRecord, CommitRecord, FileChange, FileRecord, SessionSummary, TaskRecord, UNKNOWN,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, error, warn};

/// Substring that marks a shell command as a commit.
const COMMIT_MARKER: &str = "git commit";

/// Tool results at or above this many characters are never branch names.
const BRANCH_MAX_CHARS: usize = 100;

/// Result of scanning one transcript.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub summary: SessionSummary,
    /// 1-based numbers of lines that could not be read as records.
    pub skipped_lines: Vec<usize>,
}

/// Read and scan a transcript file.
///
/// A missing or unreadable file is logged and yields the default summary.
pub fn extract_session(path: &Path) -> Extraction {
    match read_transcript(path) {
        Ok(text) => scan_transcript(&text, path),
        Err(e) => {
            error!("{e}");
            Extraction::default()
        }
    }
}

fn read_transcript(path: &Path) -> Result<String, HandoffError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(HandoffError::TranscriptNotFound(path.to_path_buf()))
        }
        Err(source) => Err(HandoffError::TranscriptRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Scan transcript text in one forward pass. `source` names the transcript
/// and provides the fallback session id.
pub fn scan_transcript(text: &str, source: &Path) -> Extraction {
    let mut scan = SessionScan::default();

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(record)) => scan.absorb(&record),
            Ok(_) => {
                warn!(line = line_num, "skipping non-object record on line {line_num}");
                scan.skipped_lines.push(line_num);
            }
            Err(e) => {
                warn!(line = line_num, error = %e, "skipping malformed line {line_num}");
                scan.skipped_lines.push(line_num);
            }
        }
    }

    scan.finish(source)
}

/// One content block of a record, classified by shape.
enum ContentBlock<'a> {
    ToolUse(ToolCall<'a>),
    ToolResult(&'a Value),
    Other,
}

impl<'a> ContentBlock<'a> {
    fn classify(block: &'a Value) -> Self {
        let Some(obj) = block.as_object() else {
            return ContentBlock::Other;
        };
        match obj.get("type").and_then(Value::as_str) {
            Some("tool_use") => ContentBlock::ToolUse(ToolCall::from_block(obj)),
            Some("tool_result") => obj
                .get("content")
                .map(ContentBlock::ToolResult)
                .unwrap_or(ContentBlock::Other),
            _ => ContentBlock::Other,
        }
    }
}

/// The tool invocations the summary cares about.
#[derive(Debug, PartialEq)]
enum ToolCall<'a> {
    Edit {
        file_path: &'a str,
    },
    Write {
        file_path: &'a str,
        content: &'a str,
    },
    Bash {
        command: &'a str,
        description: &'a str,
    },
    TaskUpdate {
        status: Option<&'a str>,
        task_id: Option<String>,
    },
    Ignored,
}

impl<'a> ToolCall<'a> {
    fn from_block(block: &'a Map<String, Value>) -> Self {
        let input = block.get("input").and_then(Value::as_object);
        let field = |key: &str| {
            input
                .and_then(|i| i.get(key))
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
        };

        match block.get("name").and_then(Value::as_str) {
            Some("Edit") => match field("file_path") {
                Some(file_path) => ToolCall::Edit { file_path },
                None => ToolCall::Ignored,
            },
            Some("Write") => match field("file_path") {
                Some(file_path) => ToolCall::Write {
                    file_path,
                    content: field("content").unwrap_or(""),
                },
                None => ToolCall::Ignored,
            },
            Some("Bash") => match field("command") {
                Some(command) => ToolCall::Bash {
                    command,
                    description: field("description").unwrap_or(""),
                },
                None => ToolCall::Ignored,
            },
            Some("TaskUpdate") => ToolCall::TaskUpdate {
                status: input.and_then(|i| i.get("status")).and_then(Value::as_str),
                task_id: input.and_then(|i| i.get("taskId")).and_then(scalar_text),
            },
            _ => ToolCall::Ignored,
        }
    }
}

#[derive(Default)]
struct SessionScan {
    records_seen: usize,
    session_id: Option<String>,
    time_start: Option<String>,
    time_end: Option<String>,
    project: Option<String>,
    git_branch: Option<String>,
    files: Vec<FileRecord>,
    file_index: HashMap<String, usize>,
    commands: Vec<CommandRecord>,
    tasks: Vec<TaskRecord>,
    commits: Vec<CommitRecord>,
    skipped_lines: Vec<usize>,
}

impl SessionScan {
    fn absorb(&mut self, record: &Map<String, Value>) {
        if self.records_seen == 0 {
            self.session_id = record
                .get("session_id")
                .or_else(|| record.get("sessionId"))
                .and_then(scalar_text);
        }
        self.records_seen += 1;

        let timestamp = record.get("timestamp").and_then(scalar_text);
        if let Some(ts) = &timestamp {
            if self.time_start.is_none() {
                self.time_start = Some(ts.clone());
            }
            // Last one wins; transcripts are not assumed to be sorted.
            self.time_end = Some(ts.clone());
        }

        if let Some(cwd) = record.get("cwd").and_then(scalar_text) {
            self.project = Some(cwd);
        }

        let stamp = timestamp.unwrap_or_default();
        for block in content_blocks(record) {
            match ContentBlock::classify(block) {
                ContentBlock::ToolUse(call) => self.apply_tool_call(call, &stamp),
                ContentBlock::ToolResult(content) => self.consider_branch(content),
                ContentBlock::Other => {}
            }
        }
    }

    fn apply_tool_call(&mut self, call: ToolCall<'_>, stamp: &str) {
        match call {
            ToolCall::Edit { file_path } => self.record_edit(file_path),
            ToolCall::Write { file_path, content } => self.record_write(file_path, content),
            ToolCall::Bash {
                command,
                description,
            } => {
                if command.contains(COMMIT_MARKER) {
                    self.commits.push(CommitRecord {
                        command: command.to_string(),
                        timestamp: stamp.to_string(),
                    });
                }
                self.commands.push(CommandRecord {
                    command: command.to_string(),
                    description: description.to_string(),
                    timestamp: stamp.to_string(),
                });
            }
            ToolCall::TaskUpdate { status, task_id } => {
                if status == Some("completed") {
                    self.tasks.push(TaskRecord {
                        id: task_id,
                        timestamp: stamp.to_string(),
                    });
                }
            }
            ToolCall::Ignored => {}
        }
    }

    fn record_edit(&mut self, path: &str) {
        match self.file_index.get(path) {
            Some(&idx) => {
                // A written file keeps its line count; edits only count against
                // files the session never wrote wholesale.
                if let FileChange::Edit { count } = &mut self.files[idx].change {
                    *count += 1;
                }
            }
            None => self.push_file(path, FileChange::Edit { count: 1 }),
        }
    }

    fn record_write(&mut self, path: &str, content: &str) {
        let change = FileChange::Write {
            line_count: content.split('\n').count(),
        };
        match self.file_index.get(path) {
            Some(&idx) => self.files[idx].change = change,
            None => self.push_file(path, change),
        }
    }

    fn push_file(&mut self, path: &str, change: FileChange) {
        self.file_index.insert(path.to_string(), self.files.len());
        self.files.push(FileRecord {
            path: path.to_string(),
            change,
        });
    }

    /// Best-effort branch detection: a short single-line tool result with a
    /// slash in it. First match wins.
    fn consider_branch(&mut self, content: &Value) {
        if self.git_branch.is_some() {
            return;
        }
        let Some(text) = content.as_str() else {
            return;
        };
        if text.trim().is_empty()
            || text.contains('\n')
            || text.chars().count() >= BRANCH_MAX_CHARS
            || !text.contains('/')
        {
            return;
        }
        debug!(branch = text.trim(), "detected branch candidate");
        self.git_branch = Some(text.trim().to_string());
    }

    fn finish(self, source: &Path) -> Extraction {
        let duration_minutes = match (&self.time_start, &self.time_end) {
            (Some(start), Some(end)) => minutes_between(start, end).unwrap_or_else(|| {
                warn!(start = %start, end = %end, "could not calculate duration");
                0
            }),
            _ => 0,
        };

        let session_id = self.session_id.unwrap_or_else(|| {
            source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| UNKNOWN.to_string())
        });

        Extraction {
            summary: SessionSummary {
                session_id,
                time_start: self.time_start,
                time_end: self.time_end,
                duration_minutes,
                project: self.project.unwrap_or_else(|| UNKNOWN.to_string()),
                git_branch: self.git_branch.unwrap_or_else(|| UNKNOWN.to_string()),
                files_modified: self.files,
                commands_run: self.commands,
                tasks_completed: self.tasks,
                commits: self.commits,
            },
            skipped_lines: self.skipped_lines,
        }
    }
}

/// Content blocks live in a top-level `content` list, or under
/// `message.content` in Claude Code session files.
fn content_blocks(record: &Map<String, Value>) -> &[Value] {
    record
        .get("content")
        .and_then(Value::as_array)
        .or_else(|| {
            record
                .get("message")
                .and_then(|m| m.get("content"))
                .and_then(Value::as_array)
        })
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
