//! The read-only context bundle handed to the pipeline for one run.
//!
//! `EnhanceContext` is constructed by the caller per invocation and
//! discarded after one pipeline run. Strategies read it; none of them
//! mutate it.

use crate::memory::MemoryRecall;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Lifecycle state of a running agent instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionState {
    /// Waiting for work
    Idle,
    /// Actively working a task
    Busy,
    /// Finishing current work, accepting nothing new
    Draining,
}

impl std::fmt::Display for PositionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PositionState::Idle => "idle",
            PositionState::Busy => "busy",
            PositionState::Draining => "draining",
        };
        write!(f, "{s}")
    }
}

/// A past attempt that did not succeed, kept on the position so later runs
/// can learn from it instead of repeating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    /// What was attempted, in one line
    pub attempt: String,

    /// Why it failed
    pub error: String,

    /// When the failure was recorded
    pub at: DateTime<Utc>,
}

/// A running instance of an agent role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// Unique position ID
    pub id: String,

    /// Name of the role this position runs
    pub role: String,

    /// Current lifecycle state
    pub state: PositionState,

    /// Failed attempts recorded against this position
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureRecord>,
}

impl Position {
    /// Create a new idle position for a role.
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role: role.into(),
            state: PositionState::Idle,
            failures: Vec::new(),
        }
    }

    /// Record a failed attempt against this position.
    pub fn record_failure(&mut self, attempt: impl Into<String>, error: impl Into<String>) {
        self.failures.push(FailureRecord {
            attempt: attempt.into(),
            error: error.into(),
            at: Utc::now(),
        });
    }
}

/// Static definition of an agent role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleTemplate {
    /// Role name
    pub name: String,

    /// Text appended to the system prompt for every invocation of this role
    pub system_prompt_append: String,

    /// Preferred model for this role, if pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Tools this role is allowed to call
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_tools: Vec<String>,
}

impl RoleTemplate {
    /// Create a role template with no model pin and no tool allowlist.
    pub fn new(name: impl Into<String>, system_prompt_append: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            system_prompt_append: system_prompt_append.into(),
            model: None,
            allowed_tools: Vec::new(),
        }
    }

    /// Pin a model for this role.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the tool allowlist for this role.
    pub fn with_allowed_tools(mut self, tools: Vec<String>) -> Self {
        self.allowed_tools = tools;
        self
    }
}

/// One unit of work routed to a position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID
    pub id: String,

    /// Task type (e.g. "review", "implement")
    pub kind: String,

    /// Free-form task payload
    pub payload: String,

    /// When this task was created
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task with a generated id.
    pub fn new(kind: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind: kind.into(),
            payload: payload.into(),
            created_at: Utc::now(),
        }
    }

    /// The query text used to recall memories relevant to this task.
    pub fn recall_query(&self) -> String {
        format!("{} {}", self.kind, self.payload)
    }
}

/// A pending work item shown to the agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoItem {
    /// What needs doing
    pub text: String,

    /// Whether it is already done
    pub done: bool,
}

/// The immutable context bundle for one pipeline run.
///
/// Holds two recall stores: `memory` scoped to this position, and
/// `global_memory` shared across every position of the deployment.
#[derive(Clone)]
pub struct EnhanceContext {
    /// The running agent instance being prompted
    pub position: Position,

    /// Static definition of the role the position runs
    pub role: RoleTemplate,

    /// The current work item
    pub task: Task,

    /// Source code of the workflow driving this agent, if available
    pub workflow_source: Option<String>,

    /// Per-position memory store
    pub memory: Arc<dyn MemoryRecall>,

    /// Deployment-wide memory store
    pub global_memory: Arc<dyn MemoryRecall>,

    /// Pending todo items, if the caller tracks them
    pub todos: Option<Vec<TodoItem>>,
}

impl EnhanceContext {
    /// Create a context with no workflow source and no todos.
    pub fn new(
        position: Position,
        role: RoleTemplate,
        task: Task,
        memory: Arc<dyn MemoryRecall>,
        global_memory: Arc<dyn MemoryRecall>,
    ) -> Self {
        Self {
            position,
            role,
            task,
            workflow_source: None,
            memory,
            global_memory,
            todos: None,
        }
    }

    /// Attach the agent's own workflow source.
    pub fn with_workflow_source(mut self, source: impl Into<String>) -> Self {
        self.workflow_source = Some(source.into());
        self
    }

    /// Attach a todo list.
    pub fn with_todos(mut self, todos: Vec<TodoItem>) -> Self {
        self.todos = Some(todos);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_position_is_idle() {
        let pos = Position::new("builder");
        assert_eq!(pos.state, PositionState::Idle);
        assert!(pos.failures.is_empty());
        assert!(!pos.id.is_empty());
    }

    #[test]
    fn record_failure_appends() {
        let mut pos = Position::new("builder");
        pos.record_failure("deploy to staging", "missing credentials");
        assert_eq!(pos.failures.len(), 1);
        assert_eq!(pos.failures[0].attempt, "deploy to staging");
    }

    #[test]
    fn recall_query_combines_kind_and_payload() {
        let task = Task::new("review", "check the parser changes");
        assert_eq!(task.recall_query(), "review check the parser changes");
    }

    #[test]
    fn role_template_builders() {
        let role = RoleTemplate::new("reviewer", "Be thorough.")
            .with_model("sonnet")
            .with_allowed_tools(vec!["read_file".into()]);
        assert_eq!(role.model.as_deref(), Some("sonnet"));
        assert_eq!(role.allowed_tools.len(), 1);
    }

    #[test]
    fn position_state_display() {
        assert_eq!(PositionState::Draining.to_string(), "draining");
    }
}
