//! Groq chat completions (OpenAI compatible API).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::{
    config,
    errors::{ConfigError, LlmError},
    recommend::{ChatCompletion, LLM_TIMEOUT},
};

const TEMPERATURE: f32 = 0.5;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: Option<String>,
}

pub struct GroqClient {
    http: Client,
    api_key: String,
    model: String,
    api_url: String,
}

impl GroqClient {
    pub fn new(api_key: String, model: String, api_url: String) -> Result<Self, LlmError> {
        let http = Client::builder().timeout(LLM_TIMEOUT).build()?;
        Ok(Self {
            http,
            api_key,
            model,
            api_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Client configured from `GROQ_API_KEY`, `GROQ_MODEL` and `GROQ_API_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = config::groq_api_key()?;
        Self::new(api_key, config::groq_model(), config::groq_apiurl())
            .map_err(|e| ConfigError::Invalid("GROQ_API_URL", e.to_string()))
    }
}

#[async_trait]
impl ChatCompletion for GroqClient {
    async fn complete_chat(&self, prompt: &str, system_prompt: &str) -> Result<String, LlmError> {
        log::info!("Requesting recommendations from Groq ({})", self.model);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .ok()
                .and_then(|b| b.error)
                .and_then(|e| e.message)
                .unwrap_or_else(|| "Unknown".to_string());
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let res = response.json::<ChatResponse>().await?;
        let content = res
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| LlmError::Payload("no completion choices".to_string()))?;

        log::debug!("LLM response: {} bytes", content.len());
        Ok(content)
    }
}
