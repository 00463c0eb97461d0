use indoc::formatdoc;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use url::Url;

use super::{credentials, Plan, PlanRequest, TaskPlanner};
use crate::error::PlannerError;
use crate::storage::PlannerConfig;
use crate::task::{TaskCategory, TaskPriority};

/// Google Generative Language `generateContent` client.
pub struct GeminiPlanner {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiPlanner {
    /// Build a planner using the stored API key.
    ///
    /// # Errors
    /// [`PlannerError::MissingApiKey`] when neither the environment nor the
    /// keyring provides a key.
    pub fn from_config(config: &PlannerConfig) -> Result<Self, PlannerError> {
        Ok(Self::with_api_key(config, credentials::api_key()?))
    }

    pub fn with_api_key(config: &PlannerConfig, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> Result<Url, PlannerError> {
        let mut base = self.base_url.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        Ok(Url::parse(&base)?.join(&format!("v1beta/models/{}:generateContent", self.model))?)
    }

    async fn generate(&self, body: Value) -> Result<String, PlannerError> {
        let resp = self
            .client
            .post(self.endpoint()?)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(PlannerError::Status {
                status: resp.status().as_u16(),
            });
        }

        let parsed: GenerateResponse = resp.json().await?;
        parsed.text().ok_or(PlannerError::EmptyResponse)
    }
}

fn plan_prompt(request: &PlanRequest) -> String {
    formatdoc! {r#"
        Help me plan this goal. Write the answer in the language "{language}": "{goal}".
        Break the goal into concrete tasks, give a short description of how to carry out each one,
        and assign a suitable priority and category."#,
        language = request.language,
        goal = request.goal,
    }
}

fn plan_schema() -> Value {
    let priorities: Vec<_> = TaskPriority::ALL.iter().map(|p| p.as_str()).collect();
    let categories: Vec<_> = TaskCategory::ALL.iter().map(|c| c.as_str()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "tasks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING", "description": "Short task title" },
                        "description": { "type": "STRING", "description": "Short description of how to do the task" },
                        "priority": { "type": "STRING", "enum": priorities, "description": "Priority" },
                        "category": { "type": "STRING", "enum": categories, "description": "Category" }
                    },
                    "required": ["title", "description", "priority", "category"]
                }
            }
        },
        "required": ["tasks"]
    })
}

impl TaskPlanner for GeminiPlanner {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate_plan(&self, request: &PlanRequest) -> Result<Option<Plan>, PlannerError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": plan_prompt(request) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": plan_schema(),
            }
        });
        let text = self.generate(body).await?;
        Plan::parse(&text)
    }

    async fn suggest_priority(&self, title: &str) -> Result<TaskPriority, PlannerError> {
        let prompt = format!(
            "Rate the importance of the task: \"{title}\". Answer LOW, MEDIUM or HIGH. Reply with a single word only."
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "maxOutputTokens": 10, "temperature": 0.1 }
        });
        let text = self.generate(body).await?;
        Ok(text.parse().unwrap_or(TaskPriority::Medium))
    }
}
