//! Gemini REST 客户端
//!
//! 通过 reqwest 直接调用 `models/{model}:generateContent`

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::ChatRole;
use crate::errors::{AssistantError, Result};
use crate::infrastructure::llm::{Completion, GenerateRequest, TextService, Turn};
use crate::infrastructure::logger::{RequestContext, Timer};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Gemini 客户端
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// 使用预先配置的 HTTP 客户端（代理、超时）
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TextService for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: GenerateRequest) -> Result<Completion> {
        let ctx = RequestContext::new().with_metadata("model", self.model.clone());
        let _timer = Timer::new("gemini.generate_content").with_context(&ctx);
        debug!(
            request_id = %ctx.request_id,
            turns = request.contents.len(),
            has_system_instruction = request.system_instruction.is_some(),
            "sending generateContent request"
        );

        let body = GenerateContentRequest::from(&request);
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AssistantError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!(request_id = %ctx.request_id, status = %status, "gemini returned non-success status");
            return Err(map_http_error(status, &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)?;
        Ok(parsed.into_completion())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

impl From<&GenerateRequest> for GenerateContentRequest {
    fn from(request: &GenerateRequest) -> Self {
        Self {
            contents: request.contents.iter().map(Content::from).collect(),
            system_instruction: request.system_instruction.as_ref().map(|text| Content {
                role: None,
                parts: vec![Part { text: text.clone() }],
            }),
        }
    }
}

#[derive(Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<ChatRole>,
    parts: Vec<Part>,
}

impl From<&Turn> for Content {
    fn from(turn: &Turn) -> Self {
        Self {
            role: Some(turn.role),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    fn into_completion(self) -> Completion {
        if let Some(reason) = self.prompt_feedback.and_then(|f| f.block_reason) {
            warn!(block_reason = %reason, "prompt was blocked");
            return Completion {
                text: None,
                finish_reason: Some(reason),
            };
        }

        let Some(candidate) = self.candidates.into_iter().next() else {
            return Completion::empty();
        };

        let text: Option<String> = candidate.content.and_then(|content| {
            let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
            if texts.is_empty() {
                None
            } else {
                Some(texts.concat())
            }
        });

        Completion {
            text,
            finish_reason: candidate.finish_reason,
        }
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn map_http_error(status: StatusCode, body: &str) -> AssistantError {
    let message = serde_json::from_str::<ErrorWrapper>(body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.to_string());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.to_string());

    AssistantError::Service {
        status: status.as_u16(),
        message,
    }
}
