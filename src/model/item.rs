// File: ./src/model/item.rs
use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Marker glyphs baked into the board format. The scheduled marker carries a
// trailing variation selector (U+FE0F); existing user files depend on the
// exact code points.
const RUNNING_MARKER: &str = "🏃";
const SCHEDULED_MARKER: &str = "🗓️";
const COMPLETED_MARKER: &str = "✅";

/// Workflow status a phase stands for, derived from its name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Pending,
    Running,
    Scheduled,
    Completed,
}

impl Status {
    /// Pure function of the phase name: substring containment over the
    /// marker glyphs, first match wins.
    fn from_phase_name(name: &str) -> Self {
        if name.contains(RUNNING_MARKER) {
            Status::Running
        } else if name.contains(SCHEDULED_MARKER) {
            Status::Scheduled
        } else if name.contains(COMPLETED_MARKER) {
            Status::Completed
        } else {
            Status::Pending
        }
    }
}

/// A labeled instant attached to a task. Acknowledged reminders are kept for
/// display but never count as active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Raw directive text, kept verbatim for display.
    pub label: String,
    pub time: DateTime<Utc>,
    pub acknowledged: bool,
}

/// An active reminder paired with the title of the task that owns it, as
/// produced by the overdue-aggregation queries. The title travels as an
/// explicit field rather than a mutable back-reference on [`Reminder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderReport {
    pub task_title: String,
    pub label: String,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    title: String,
    comments: Vec<String>,
    tags: Vec<String>,
    reminders: Vec<Reminder>,
    due: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(title: &str) -> Result<Self, ValidationError> {
        if title.is_empty() {
            return Err(ValidationError::EmptyName { entity: "task" });
        }
        Ok(Self {
            title: title.to_string(),
            comments: Vec::new(),
            tags: Vec::new(),
            reminders: Vec::new(),
            due: None,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    pub fn due(&self) -> Option<DateTime<Utc>> {
        self.due
    }

    /// Appends the text verbatim. Rejects text that is blank after trimming.
    pub fn add_comment(&mut self, comment: &str) -> Result<(), ValidationError> {
        if comment.trim().is_empty() {
            return Err(ValidationError::EmptyComment);
        }
        self.comments.push(comment.to_string());
        Ok(())
    }

    /// Insertion order is preserved; an exact (case-sensitive) duplicate
    /// fails and leaves the set unchanged.
    pub fn add_tag(&mut self, tag: &str) -> Result<(), ValidationError> {
        if self.tags.iter().any(|t| t == tag) {
            return Err(ValidationError::DuplicateTag {
                task: self.title.clone(),
                tag: tag.to_string(),
            });
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    pub fn add_reminder(&mut self, reminder: Reminder) {
        self.reminders.push(reminder);
    }

    /// Write-once: a second call fails and the first value stays intact.
    pub fn set_due(&mut self, when: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.due.is_some() {
            return Err(ValidationError::DueAlreadySet {
                task: self.title.clone(),
            });
        }
        self.due = Some(when);
        Ok(())
    }

    pub fn active_reminders(&self) -> Vec<&Reminder> {
        self.reminders.iter().filter(|r| !r.acknowledged).collect()
    }

    pub fn overdue_reminders_at(&self, now: DateTime<Utc>) -> Vec<ReminderReport> {
        self.reminders
            .iter()
            .filter(|r| !r.acknowledged && r.time < now)
            .map(|r| ReminderReport {
                task_title: self.title.clone(),
                label: r.label.clone(),
                time: r.time,
            })
            .collect()
    }

    pub fn overdue_reminders(&self) -> Vec<ReminderReport> {
        self.overdue_reminders_at(Utc::now())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    name: String,
    status: Status,
    project_name: String,
    tasks: Vec<Task>,
}

impl Phase {
    /// The status is derived from the name once, here, and never recomputed.
    /// `project_name` is only carried for diagnostics (warning strings).
    pub fn new(name: &str, project_name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName { entity: "phase" });
        }
        Ok(Self {
            name: name.to_string(),
            status: Status::from_phase_name(name),
            project_name: project_name.to_string(),
            tasks: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task_titles(&self) -> Vec<&str> {
        self.tasks.iter().map(Task::title).collect()
    }

    pub fn push_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn overdue_reminders_at(&self, now: DateTime<Utc>) -> Vec<ReminderReport> {
        self.tasks
            .iter()
            .flat_map(|t| t.overdue_reminders_at(now))
            .collect()
    }

    pub fn overdue_reminders(&self) -> Vec<ReminderReport> {
        self.overdue_reminders_at(Utc::now())
    }

    /// A scheduled phase expects every task to carry at least one active
    /// reminder; each task without one contributes a warning.
    pub fn warnings(&self) -> Vec<String> {
        if self.status != Status::Scheduled {
            return Vec::new();
        }
        self.tasks
            .iter()
            .filter(|t| t.active_reminders().is_empty())
            .map(|t| {
                format!(
                    "task '{}' of project '{}' sits in scheduled phase '{}' but has no active reminder",
                    t.title(),
                    self.project_name,
                    self.name,
                )
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    name: String,
    phases: Vec<Phase>,
}

impl Project {
    pub fn new(name: &str) -> Result<Self, ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::EmptyName { entity: "project" });
        }
        Ok(Self {
            name: name.to_string(),
            phases: Vec::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn phase_by_name(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    pub fn push_phase(&mut self, phase: Phase) {
        self.phases.push(phase);
    }

    pub fn overdue_reminders_at(&self, now: DateTime<Utc>) -> Vec<ReminderReport> {
        self.phases
            .iter()
            .flat_map(|p| p.overdue_reminders_at(now))
            .collect()
    }

    pub fn overdue_reminders(&self) -> Vec<ReminderReport> {
        self.overdue_reminders_at(Utc::now())
    }

    pub fn warnings(&self) -> Vec<String> {
        self.phases.iter().flat_map(Phase::warnings).collect()
    }
}
