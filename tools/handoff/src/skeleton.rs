//! Handoff skeleton rendering.
//!
//! The template names its slots as `{slot_name}`. Every slot is a [`Slot`]
//! variant and [`SkeletonValues::value`] matches on all of them, so a slot
//! without a value does not compile.

use crate::error::HandoffError;
use crate::parse::parse_timestamp_str;
use crate::types::{FileChange, SessionSummary, UNKNOWN};
use chrono::NaiveDate;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Only the most recent commands make it into the handoff.
const MAX_COMMANDS: usize = 20;

const NONE_MARKER: &str = "(none)";

const MANUAL_TOPIC: &str = "[MANUAL: Enter topic/focus]";
const MANUAL_TITLE: &str = "[MANUAL: Enter title]";
const MANUAL_SUMMARY: &str = "[MANUAL: 1-2 sentence summary of what was accomplished]";
const MANUAL_IN_PROGRESS: &str = "[MANUAL: What work is partially complete?]";
const MANUAL_NEXT_STEPS: &str = "[MANUAL: What should be done next?]\n1. \n2. \n3. ";
const MANUAL_BLOCKERS: &str = "[MANUAL: What is blocking progress?]";
const MANUAL_DECISIONS: &str = "[MANUAL: What decisions were made and why?]";
const MANUAL_CONTEXT_NOTES: &str = "[MANUAL: Any other context worth preserving?]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    SessionId,
    Date,
    TimeStart,
    TimeEnd,
    DurationMinutes,
    Project,
    Topic,
    Tags,
    GitBranch,
    Commits,
    Title,
    Summary,
    Completed,
    InProgress,
    NextSteps,
    Blockers,
    Decisions,
    FilesModified,
    CommandsRun,
    ContextNotes,
}

impl Slot {
    pub const ALL: [Slot; 20] = [
        Slot::SessionId,
        Slot::Date,
        Slot::TimeStart,
        Slot::TimeEnd,
        Slot::DurationMinutes,
        Slot::Project,
        Slot::Topic,
        Slot::Tags,
        Slot::GitBranch,
        Slot::Commits,
        Slot::Title,
        Slot::Summary,
        Slot::Completed,
        Slot::InProgress,
        Slot::NextSteps,
        Slot::Blockers,
        Slot::Decisions,
        Slot::FilesModified,
        Slot::CommandsRun,
        Slot::ContextNotes,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Slot::SessionId => "session_id",
            Slot::Date => "date",
            Slot::TimeStart => "time_start",
            Slot::TimeEnd => "time_end",
            Slot::DurationMinutes => "duration_minutes",
            Slot::Project => "project",
            Slot::Topic => "topic",
            Slot::Tags => "tags",
            Slot::GitBranch => "git_branch",
            Slot::Commits => "commits",
            Slot::Title => "title",
            Slot::Summary => "summary",
            Slot::Completed => "completed",
            Slot::InProgress => "in_progress",
            Slot::NextSteps => "next_steps",
            Slot::Blockers => "blockers",
            Slot::Decisions => "decisions",
            Slot::FilesModified => "files_modified",
            Slot::CommandsRun => "commands_run",
            Slot::ContextNotes => "context_notes",
        }
    }

    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

/// Values for every auto-generated slot, formatted for the template.
#[derive(Debug, Clone)]
pub struct SkeletonValues<'a> {
    summary: &'a SessionSummary,
    date: String,
    time_start: String,
    time_end: String,
    files_modified: String,
    commands_run: String,
    completed: String,
    commits: String,
}

impl<'a> SkeletonValues<'a> {
    pub fn from_summary(summary: &'a SessionSummary, today: NaiveDate) -> Self {
        let start = summary.time_start.as_deref().and_then(parse_timestamp_str);
        let end = summary.time_end.as_deref().and_then(parse_timestamp_str);

        let date = start
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| today.format("%Y-%m-%d").to_string());
        let time_start = start
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let time_end = end
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_else(|| UNKNOWN.to_string());

        Self {
            summary,
            date,
            time_start,
            time_end,
            files_modified: format_files(summary),
            commands_run: format_commands(summary),
            completed: format_completed(summary),
            commits: format_commits(summary),
        }
    }

    pub fn value(&self, slot: Slot) -> Cow<'_, str> {
        match slot {
            Slot::SessionId => Cow::Borrowed(&self.summary.session_id),
            Slot::Date => Cow::Borrowed(&self.date),
            Slot::TimeStart => Cow::Borrowed(&self.time_start),
            Slot::TimeEnd => Cow::Borrowed(&self.time_end),
            Slot::DurationMinutes => Cow::Owned(self.summary.duration_minutes.to_string()),
            Slot::Project => Cow::Borrowed(&self.summary.project),
            Slot::Topic => Cow::Borrowed(MANUAL_TOPIC),
            Slot::Tags => Cow::Borrowed("[]"),
            Slot::GitBranch => Cow::Borrowed(&self.summary.git_branch),
            Slot::Commits => Cow::Borrowed(&self.commits),
            Slot::Title => Cow::Borrowed(MANUAL_TITLE),
            Slot::Summary => Cow::Borrowed(MANUAL_SUMMARY),
            Slot::Completed => Cow::Borrowed(&self.completed),
            Slot::InProgress => Cow::Borrowed(MANUAL_IN_PROGRESS),
            Slot::NextSteps => Cow::Borrowed(MANUAL_NEXT_STEPS),
            Slot::Blockers => Cow::Borrowed(MANUAL_BLOCKERS),
            Slot::Decisions => Cow::Borrowed(MANUAL_DECISIONS),
            Slot::FilesModified => Cow::Borrowed(&self.files_modified),
            Slot::CommandsRun => Cow::Borrowed(&self.commands_run),
            Slot::ContextNotes => Cow::Borrowed(MANUAL_CONTEXT_NOTES),
        }
    }
}

fn format_files(summary: &SessionSummary) -> String {
    let lines: Vec<String> = summary
        .files_modified
        .iter()
        .map(|file| match file.change {
            FileChange::Edit { count } => format!("- {} (Edit, {} edits)", file.path, count),
            FileChange::Write { line_count } => {
                format!("- {} (Write, {} lines)", file.path, line_count)
            }
        })
        .collect();
    join_or(lines, NONE_MARKER)
}

fn format_commands(summary: &SessionSummary) -> String {
    let skip = summary.commands_run.len().saturating_sub(MAX_COMMANDS);
    let mut lines = Vec::new();
    for cmd in summary.commands_run.iter().skip(skip) {
        if !cmd.description.is_empty() {
            lines.push(format!("# {}", cmd.description));
        }
        lines.push(cmd.command.clone());
        lines.push(String::new());
    }
    join_or(lines, NONE_MARKER)
}

fn format_completed(summary: &SessionSummary) -> String {
    let lines: Vec<String> = summary
        .tasks_completed
        .iter()
        .map(|task| format!("- Task {}", task.id.as_deref().unwrap_or("None")))
        .collect();
    join_or(lines, NONE_MARKER)
}

fn format_commits(summary: &SessionSummary) -> String {
    let lines: Vec<String> = summary
        .commits
        .iter()
        .map(|commit| format!("- {}", commit.command))
        .collect();
    join_or(lines, "[]")
}

fn join_or(lines: Vec<String>, empty: &str) -> String {
    if lines.is_empty() {
        empty.to_string()
    } else {
        lines.join("\n")
    }
}

/// Fill `{slot}` markers in one pass. Braces that do not name a slot are
/// copied through untouched.
pub fn fill_template(template: &str, values: &SkeletonValues<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let slot = after
            .find('}')
            .and_then(|end| Slot::from_name(&after[..end]).map(|slot| (slot, end)));
        match slot {
            Some((slot, end)) => {
                out.push_str(&values.value(slot));
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render the handoff document for `summary` from `template` text.
pub fn render_skeleton(summary: &SessionSummary, template: &str, today: NaiveDate) -> String {
    fill_template(template, &SkeletonValues::from_summary(summary, today))
}

/// Read the template, fill it and write the handoff to `output_path`.
pub fn write_skeleton(
    summary: &SessionSummary,
    template_path: &Path,
    output_path: &Path,
    today: NaiveDate,
) -> Result<(), HandoffError> {
    let template = std::fs::read_to_string(template_path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            HandoffError::TemplateNotFound(template_path.to_path_buf())
        } else {
            HandoffError::TemplateRead {
                path: template_path.to_path_buf(),
                source,
            }
        }
    })?;

    let handoff = render_skeleton(summary, &template, today);

    let write_err = |source| HandoffError::OutputWrite {
        path: output_path.to_path_buf(),
        source,
    };
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(write_err)?;
    }
    std::fs::write(output_path, handoff).map_err(write_err)?;

    info!("Handoff skeleton written to: {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommandRecord, CommitRecord, FileRecord, TaskRecord};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn sample() -> SessionSummary {
        SessionSummary {
            session_id: "sess-9".to_string(),
            time_start: Some("2025-06-01T09:05:00Z".to_string()),
            time_end: Some("2025-06-01T10:40:00Z".to_string()),
            duration_minutes: 95,
            project: "/repo".to_string(),
            git_branch: "feature/x".to_string(),
            files_modified: vec![
                FileRecord {
                    path: "a.rs".to_string(),
                    change: FileChange::Edit { count: 3 },
                },
                FileRecord {
                    path: "b.md".to_string(),
                    change: FileChange::Write { line_count: 10 },
                },
            ],
            commands_run: vec![CommandRecord {
                command: "cargo test".to_string(),
                description: "Run tests".to_string(),
                timestamp: String::new(),
            }],
            tasks_completed: vec![TaskRecord {
                id: Some("4".to_string()),
                timestamp: String::new(),
            }],
            commits: vec![CommitRecord {
                command: "git commit -m wip".to_string(),
                timestamp: String::new(),
            }],
        }
    }

    #[test]
    fn every_slot_name_round_trips() {
        for slot in Slot::ALL {
            assert_eq!(Slot::from_name(slot.name()), Some(slot));
        }
        assert_eq!(Slot::from_name("nope"), None);
    }

    #[test]
    fn fills_auto_slots() {
        let template = "id={session_id} date={date} {time_start}-{time_end} ({duration_minutes}m) \
                        branch={git_branch}\n{files_modified}\n{commands_run}{completed}\n{commits}";
        let out = render_skeleton(&sample(), template, today());
        assert!(out.starts_with("id=sess-9 date=2025-06-01 09:05-10:40 (95m) branch=feature/x\n"));
        assert!(out.contains("- a.rs (Edit, 3 edits)\n- b.md (Write, 10 lines)"));
        assert!(out.contains("# Run tests\ncargo test\n"));
        assert!(out.contains("- Task 4"));
        assert!(out.ends_with("- git commit -m wip"));
    }

    #[test]
    fn manual_slots_keep_markers() {
        let out = render_skeleton(&sample(), "{title}|{topic}|{tags}|{next_steps}", today());
        assert_eq!(
            out,
            "[MANUAL: Enter title]|[MANUAL: Enter topic/focus]|[]|[MANUAL: What should be done next?]\n1. \n2. \n3. "
        );
    }

    #[test]
    fn empty_lists_render_placeholders() {
        let out = render_skeleton(
            &SessionSummary::default(),
            "{files_modified}|{commands_run}|{completed}|{commits}|{date}|{time_start}",
            today(),
        );
        assert_eq!(out, "(none)|(none)|(none)|[]|2026-03-14|unknown");
    }

    #[test]
    fn only_last_twenty_commands_are_kept() {
        let mut summary = SessionSummary::default();
        for i in 0..25 {
            summary.commands_run.push(CommandRecord {
                command: format!("cmd-{i}"),
                description: String::new(),
                timestamp: String::new(),
            });
        }
        let out = render_skeleton(&summary, "{commands_run}", today());
        assert!(!out.contains("cmd-4\n"));
        assert!(out.starts_with("cmd-5\n"));
        assert!(out.contains("cmd-24"));
    }

    #[test]
    fn unknown_braces_and_inserted_values_are_untouched() {
        let mut summary = SessionSummary::default();
        summary.project = "{session_id}".to_string();
        let out = render_skeleton(&summary, "{project} {not_a_slot} {", today());
        assert_eq!(out, "{session_id} {not_a_slot} {");
    }

    #[test]
    fn write_skeleton_creates_parent_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let template = tmp.path().join("handoff.md.template");
        std::fs::write(&template, "# {session_id}\n").unwrap();
        let output = tmp.path().join("nested/dir/handoff.md");

        write_skeleton(&sample(), &template, &output, today()).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "# sess-9\n");
    }

    #[test]
    fn write_skeleton_reports_missing_template() {
        let tmp = tempfile::tempdir().unwrap();
        let err = write_skeleton(
            &sample(),
            &tmp.path().join("missing.template"),
            &tmp.path().join("out.md"),
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, HandoffError::TemplateNotFound(_)));
        assert!(!tmp.path().join("out.md").exists());
    }

    #[test]
    fn bundled_template_uses_only_known_slots() {
        let template = include_str!("../templates/handoff.md.template");
        let out = render_skeleton(&sample(), template, today());
        for slot in Slot::ALL {
            assert!(
                !out.contains(&format!("{{{}}}", slot.name())),
                "slot {} left unfilled",
                slot.name()
            );
        }
        assert!(out.contains("sess-9"));
    }
}
