//! Task types: Priority, Task, TaskDraft, TaskUpdate

use super::ids::{ColumnId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority, ordered from least to most urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

/// A task/card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,

    /// Identifier of the column currently holding this task. Must always
    /// agree with that column's `task_ids` membership.
    pub status: ColumnId,

    #[serde(default)]
    pub priority: Priority,

    /// Free-text assignee name; empty when unassigned
    #[serde(default)]
    pub assignee: String,

    /// Ordered, duplicate-free tag list
    #[serde(default)]
    pub tags: Vec<String>,

    /// Creation timestamp, immutable after creation
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a task from a draft, minting a fresh ID and stamping the
    /// creation time. The task lands in `status`; the caller owns adding
    /// its ID to that column's sequence.
    ///
    /// Applies no field validation - run [`crate::validate_task`] on the
    /// draft first.
    pub fn from_draft(draft: TaskDraft, status: ColumnId) -> Self {
        let mut task = Self {
            id: TaskId::new(),
            title: draft.title,
            description: draft.description,
            status,
            priority: draft.priority,
            assignee: draft.assignee,
            tags: Vec::new(),
            created_at: Utc::now(),
            due_date: draft.due_date,
        };
        for tag in draft.tags {
            task.add_tag(tag);
        }
        task
    }

    /// Add a tag, suppressing duplicates. Returns false if the tag was
    /// already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) -> bool {
        let tag = tag.into();
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    /// Merge an update into this task. Every present field is applied,
    /// including `status` - repointing `status` here does NOT move the task
    /// between column sequences; that is the store's job.
    pub fn apply(&mut self, update: &TaskUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(description) = &update.description {
            self.description = description.clone();
        }
        if let Some(status) = &update.status {
            self.status = status.clone();
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(assignee) = &update.assignee {
            self.assignee = assignee.clone();
        }
        if let Some(tags) = &update.tags {
            self.tags.clear();
            for tag in tags {
                self.add_tag(tag.clone());
            }
        }
        if let Some(due_date) = update.due_date {
            self.due_date = due_date;
        }
    }

    /// Whether the task is past due: due strictly before `now` and not on
    /// the same (UTC) calendar day.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        match self.due_date {
            Some(due) => due < now && due.date_naive() != now.date_naive(),
            None => false,
        }
    }
}

/// Creation input for the task factory. Title is required; everything else
/// defaults (empty description/assignee, medium priority, no tags, no due
/// date).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub assignee: String,
    pub tags: Vec<String>,
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskDraft {
    /// Create a draft with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = assignee.into();
        self
    }

    /// Set the tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// A partial update to a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Target column (None = don't change)
    pub status: Option<ColumnId>,
    pub priority: Option<Priority>,
    pub assignee: Option<String>,
    /// Replace all tags (duplicates suppressed on apply)
    pub tags: Option<Vec<String>>,
    /// Due date (None = don't change, Some(None) = clear, Some(Some(x)) = set)
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the target column
    pub fn with_status(mut self, status: impl Into<ColumnId>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Set the tags (replaces all existing tags)
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Set or clear the due date
    pub fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Sort tasks most-urgent first. Stable, so equal priorities keep their
/// incoming order.
pub fn sort_by_priority(tasks: &mut [&Task]) {
    tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
}
