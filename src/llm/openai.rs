// OpenAI chat completions adapter.
// API reference: https://platform.openai.com/docs/api-reference/chat
//
// The base URL is overridable so tests (and OpenAI-compatible gateways) can
// point the client elsewhere; the path suffix is always /chat/completions.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::llm::ChatApi;
use crate::types::{AppError, AppResult, ChatMessage};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: OPENAI_API_BASE.to_string(),
        }
    }

    /// Point the client at a different OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl ChatApi for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> AppResult<Option<String>> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::LlmApi(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if let Ok(parsed) = serde_json::from_str::<ApiErrorResponse>(&body) {
                return Err(AppError::LlmApi(format!(
                    "completion endpoint returned {status}: {}",
                    parsed.error.message
                )));
            }
            return Err(AppError::LlmApi(format!(
                "completion endpoint returned {status}: {body}"
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::LlmApi(format!("malformed response: {e}")))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content))
    }
}
