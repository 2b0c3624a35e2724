//! OpenAI-compatible chat-completions client.
//!
//! Blocking reqwest client: the dashboard is single-threaded and waits for
//! each answer before updating the transcript.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::answer::{AnswerError, Answerer};
use crate::config::AnsweringConfig;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Sends the whole context as a single user message.
#[derive(Clone)]
pub struct ChatCompletionsClient {
    http: reqwest::blocking::Client,
    service_name: String,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(config: &AnsweringConfig) -> Result<Self, AnswerError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("exposure-dash/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnswerError::Client(e.to_string()))?;

        Ok(Self {
            http,
            service_name: config.service_name.clone(),
            url: format!("{}/chat/completions", config.endpoint.trim_end_matches('/')),
            model: config.model.clone(),
            api_key: config.api_key(),
        })
    }
}

impl Answerer for ChatCompletionsClient {
    fn service_name(&self) -> &str {
        &self.service_name
    }

    fn answer(&self, context: &str) -> Result<String, AnswerError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content: context,
            }],
        };

        let mut request = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .map_err(|e| AnswerError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(AnswerError::Http(status.as_u16(), body));
        }

        let text = response
            .text()
            .map_err(|e| AnswerError::Network(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| AnswerError::Parse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(AnswerError::EmptyResponse)
    }
}
