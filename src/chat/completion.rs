//! The external text-completion capability.
//!
//! The chat service only sees the [`CompletionFunction`] trait; the HTTP
//! client for an OpenAI-compatible `/chat/completions` endpoint is one
//! implementation of it.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::turn::ChatTurn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionOptions {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            model: "gpt-4.1-mini".into(),
            temperature: 0.3,
            max_tokens: 400,
        }
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("completion response contained no text")]
    EmptyReply,
    #[error("no API key configured for the completion endpoint")]
    MissingApiKey,
}

#[async_trait]
pub trait CompletionFunction: Send + Sync {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        options: &CompletionOptions,
    ) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiCompletion {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiCompletion {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionFunction for OpenAiCompletion {
    async fn complete(
        &self,
        turns: &[ChatTurn],
        options: &CompletionOptions,
    ) -> Result<String, CompletionError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(CompletionError::MissingApiKey)?;

        let request = CompletionRequest {
            model: &options.model,
            messages: turns,
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)?;
        extract_reply(parsed)
    }
}

fn extract_reply(response: CompletionResponse) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(CompletionError::EmptyReply)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_from(json: &str) -> Result<String, CompletionError> {
        extract_reply(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn takes_first_choice_content() {
        let reply = reply_from(
            r#"{"choices":[{"message":{"role":"assistant","content":"We open at 8:30."}},
                           {"message":{"content":"ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(reply, "We open at 8:30.");
    }

    #[test]
    fn missing_or_blank_content_is_empty_reply() {
        for body in [
            r#"{"choices":[]}"#,
            r#"{}"#,
            r#"{"choices":[{"message":null}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":"  \n"}}]}"#,
        ] {
            assert!(matches!(reply_from(body), Err(CompletionError::EmptyReply)), "{body}");
        }
    }

    #[test]
    fn request_body_uses_api_field_names() {
        let turns = vec![ChatTurn::system("sys"), ChatTurn::user("hi")];
        let body = serde_json::to_value(CompletionRequest {
            model: "gpt-4.1-mini",
            messages: &turns,
            temperature: 0.5,
            max_tokens: 400,
        })
        .unwrap();
        assert_eq!(body["model"], "gpt-4.1-mini");
        assert_eq!(body["max_tokens"], 400);
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["temperature"], 0.5);
    }

    #[test]
    fn endpoint_joins_base_url() {
        let client =
            OpenAiCompletion::new("https://api.example.com/v1/", None, Duration::from_secs(5))
                .unwrap();
        assert_eq!(client.endpoint(), "https://api.example.com/v1/chat/completions");
    }

    #[tokio::test]
    async fn missing_api_key_fails_without_network() {
        let client =
            OpenAiCompletion::new("http://127.0.0.1:9", None, Duration::from_secs(1)).unwrap();
        let err = client
            .complete(&[ChatTurn::user("hi")], &CompletionOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CompletionError::MissingApiKey));
    }
}
