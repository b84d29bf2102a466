//! Reqwest-backed implementation of the API traits.

use std::collections::BTreeMap;
use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use focus_core::model::{AnswerChoice, AnswerId, GradeReport, Question, QuestionId};

use crate::api::{FocusLogApi, QuizApi, SessionLogRequest, SessionLogResponse};
use crate::error::ApiError;

const CSRF_HEADER: &str = "X-CSRFToken";

/// Per-session anti-forgery token required on mutating requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Where the server lives.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl ApiConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env::var("FOCUSFLOW_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".into());
        Self { base_url }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

/// HTTP client for the FocusFlow server.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: ApiConfig,
    csrf_token: Option<CsrfToken>,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ApiConfig, csrf_token: Option<CsrfToken>) -> Self {
        if csrf_token.is_none() {
            // Caller-side misconfiguration; requests still go out.
            tracing::warn!("no anti-forgery token configured; mutating requests will omit {CSRF_HEADER}");
        }
        Self {
            client: Client::new(),
            config,
            csrf_token,
        }
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.client.post(self.config.endpoint(path));
        if let Some(token) = &self.csrf_token {
            builder = builder.header(CSRF_HEADER, token.as_str());
        }
        builder
    }
}

#[async_trait]
impl FocusLogApi for HttpApi {
    async fn log_session(
        &self,
        request: &SessionLogRequest,
    ) -> Result<SessionLogResponse, ApiError> {
        let response = self
            .post("/api/focus/log")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl QuizApi for HttpApi {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        let response = self
            .client
            .get(self.config.endpoint("/api/quiz/questions"))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        let body: QuestionsResponse = response.json().await?;
        body.questions
            .into_iter()
            .map(WireQuestion::into_question)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| ApiError::Rejected(err.to_string()))
    }

    async fn grade(
        &self,
        answers: &BTreeMap<QuestionId, AnswerId>,
    ) -> Result<GradeReport, ApiError> {
        let response = self
            .post("/quiz")
            .json(&GradeRequest { answers })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status()));
        }

        Ok(response.json().await?)
    }
}

#[derive(Debug, Serialize)]
struct GradeRequest<'a> {
    answers: &'a BTreeMap<QuestionId, AnswerId>,
}

#[derive(Debug, Deserialize)]
struct QuestionsResponse {
    questions: Vec<WireQuestion>,
}

#[derive(Debug, Deserialize)]
struct WireQuestion {
    id: String,
    question_text: String,
    answers: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    id: String,
    text: String,
}

impl WireQuestion {
    fn into_question(self) -> Result<Question, focus_core::model::QuizError> {
        let choices = self
            .answers
            .into_iter()
            .map(|choice| AnswerChoice::new(AnswerId::new(choice.id), choice.text))
            .collect();
        Question::new(QuestionId::new(self.id), self.question_text, choices)
    }
}
