//! Goal-to-task planning through a text-generation service.
//!
//! The service is untrusted: every proposed task is checked against the
//! known priority and category sets, and anything that fails to parse
//! degrades to "no plan" instead of an error at the board level.

pub mod credentials;
mod gemini;

pub use gemini::GeminiPlanner;

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::PlannerError;
use crate::task::{TaskCategory, TaskDraft, TaskPriority};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    pub goal: String,
    /// Language the plan should be written in, e.g. `vi` or `en`.
    pub language: String,
}

impl PlanRequest {
    pub fn new(goal: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            goal: goal.into(),
            language: language.into(),
        }
    }
}

/// A validated task proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTask {
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub category: TaskCategory,
}

impl PlannedTask {
    pub fn to_draft(&self) -> TaskDraft {
        TaskDraft::new(self.title.clone(), self.category).with_description(self.description.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub tasks: Vec<PlannedTask>,
}

/// Wire shape before validation; enum fields arrive as free text.
#[derive(Debug, Deserialize)]
struct RawPlan {
    #[serde(default)]
    tasks: Vec<RawPlannedTask>,
}

#[derive(Debug, Deserialize)]
struct RawPlannedTask {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    priority: String,
    #[serde(default)]
    category: String,
}

impl RawPlannedTask {
    fn validate(self) -> Option<PlannedTask> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        let priority = self.priority.parse().ok()?;
        let category = self.category.parse().ok()?;
        Some(PlannedTask {
            title: title.to_string(),
            description: self.description.trim().to_string(),
            priority,
            category,
        })
    }
}

impl Plan {
    /// Parse the service's JSON text, keeping only valid tasks.
    ///
    /// Returns `Ok(None)` when nothing usable survives validation.
    ///
    /// # Errors
    /// [`PlannerError::EmptyResponse`] for blank text and
    /// [`PlannerError::Malformed`] when the text is not the expected JSON.
    pub fn parse(text: &str) -> Result<Option<Plan>, PlannerError> {
        if text.trim().is_empty() {
            return Err(PlannerError::EmptyResponse);
        }
        let raw: RawPlan = serde_json::from_str(text)?;
        let total = raw.tasks.len();
        let tasks: Vec<_> = raw
            .tasks
            .into_iter()
            .filter_map(RawPlannedTask::validate)
            .collect();
        if tasks.len() < total {
            warn!(
                dropped = total - tasks.len(),
                "planner proposed tasks outside the known priorities/categories"
            );
        }
        Ok((!tasks.is_empty()).then_some(Plan { tasks }))
    }

    /// Drafts ordered most important first.
    pub fn drafts_by_priority(&self) -> Vec<TaskDraft> {
        let mut ranked: Vec<_> = self.tasks.iter().collect();
        ranked.sort_by_key(|t| priority_rank(t.priority));
        ranked.into_iter().map(PlannedTask::to_draft).collect()
    }
}

fn priority_rank(p: TaskPriority) -> u8 {
    match p {
        TaskPriority::High => 0,
        TaskPriority::Medium => 1,
        TaskPriority::Low => 2,
    }
}

/// A service able to turn a goal into a plan.
pub trait TaskPlanner {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    fn generate_plan(
        &self,
        request: &PlanRequest,
    ) -> impl Future<Output = Result<Option<Plan>, PlannerError>> + Send;

    fn suggest_priority(
        &self,
        title: &str,
    ) -> impl Future<Output = Result<TaskPriority, PlannerError>> + Send;
}

/// Ask for a plan; any failure becomes `None`.
pub async fn plan_or_none<P: TaskPlanner>(planner: &P, request: &PlanRequest) -> Option<Plan> {
    match planner.generate_plan(request).await {
        Ok(Some(plan)) => {
            info!(planner = planner.name(), tasks = plan.tasks.len(), "plan generated");
            Some(plan)
        }
        Ok(None) => {
            info!(planner = planner.name(), "planner returned no usable tasks");
            None
        }
        Err(e) => {
            warn!(planner = planner.name(), error = %e, "planning failed");
            None
        }
    }
}

/// Ask for a priority suggestion; any failure becomes MEDIUM.
pub async fn priority_or_medium<P: TaskPlanner>(planner: &P, title: &str) -> TaskPriority {
    match planner.suggest_priority(title).await {
        Ok(p) => p,
        Err(e) => {
            warn!(planner = planner.name(), error = %e, "priority suggestion failed");
            TaskPriority::Medium
        }
    }
}
