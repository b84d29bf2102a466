//! Seams between the services and the server API, shaped as object-safe
//! traits so tests can substitute in-memory fakes for the HTTP client.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use focus_core::model::{AnswerId, GradeReport, Question, QuestionId, TaskId, TimerMode};

use crate::error::ApiError;

/// Body of the session-log request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionLogRequest {
    pub mode: TimerMode,
    /// Minutes, matching the server's `duration` field.
    pub duration: u32,
    #[serde(rename = "taskId", skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
}

/// Response to a session-log request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionLogResponse {
    pub success: bool,
    /// Updated consecutive-day streak, when the server recomputed it.
    #[serde(default)]
    pub streak: Option<u32>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Session-log endpoint.
#[async_trait]
pub trait FocusLogApi: Send + Sync {
    async fn log_session(&self, request: &SessionLogRequest)
    -> Result<SessionLogResponse, ApiError>;
}

/// Quiz endpoints: question fetch and grading.
#[async_trait]
pub trait QuizApi: Send + Sync {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError>;

    async fn grade(
        &self,
        answers: &BTreeMap<QuestionId, AnswerId>,
    ) -> Result<GradeReport, ApiError>;
}
