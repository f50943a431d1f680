use dotenv::dotenv;
use reqwest::Client;
use std::env;
use std::error::Error;
use std::fmt;
use tracing::{debug, warn};

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Provider};

#[derive(Debug)]
pub enum ApiConnectionError {
    MissingApiKey(String),
    NetworkError(reqwest::Error),
    SerializationError(serde_json::Error),
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl fmt::Display for ApiConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiConnectionError::MissingApiKey(key_name) => {
                write!(f, "API key not found in environment: {}", key_name)
            }
            ApiConnectionError::NetworkError(err) => write!(f, "Network error: {}", err),
            ApiConnectionError::SerializationError(err) => {
                write!(f, "Serialization error: {}", err)
            }
            ApiConnectionError::ApiError { status, error_body } => {
                write!(f, "API error {}: {}", status, error_body)
            }
        }
    }
}

impl Error for ApiConnectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiConnectionError::NetworkError(err) => Some(err),
            ApiConnectionError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ApiConnectionError::NetworkError(err)
    }
}

impl From<serde_json::Error> for ApiConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ApiConnectionError::SerializationError(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    MissingApiKey,
    Network,
    Serialization,
    Api,
    /// The call succeeded but carried no usable text.
    EmptyReply,
}

/// Result of [`Provider::complete`]. Failures are values, never panics.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    Success { text: String },
    Failure { kind: FailureKind, message: String },
}

impl CompletionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CompletionOutcome::Success { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            CompletionOutcome::Success { text } => Some(text),
            CompletionOutcome::Failure { .. } => None,
        }
    }

    /// What a user sees: the reply, or the error message in its place.
    pub fn display_text(&self) -> &str {
        match self {
            CompletionOutcome::Success { text } => text,
            CompletionOutcome::Failure { message, .. } => message,
        }
    }
}

impl From<ApiConnectionError> for CompletionOutcome {
    fn from(err: ApiConnectionError) -> Self {
        let kind = match &err {
            ApiConnectionError::MissingApiKey(_) => FailureKind::MissingApiKey,
            ApiConnectionError::NetworkError(_) => FailureKind::Network,
            ApiConnectionError::SerializationError(_) => FailureKind::Serialization,
            ApiConnectionError::ApiError { .. } => FailureKind::Api,
        };
        CompletionOutcome::Failure {
            kind,
            message: err.to_string(),
        }
    }
}

impl Provider {
    pub async fn call_chat_completion(
        &self,
        request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        match self {
            Provider::OpenAi {
                api_key: api_key_env_var_name,
                ..
            } => {
                dotenv().ok();
                let actual_api_key = env::var(api_key_env_var_name)
                    .map_err(|_| ApiConnectionError::MissingApiKey(api_key_env_var_name.clone()))?;

                let client = Client::new();
                let url = self.chat_completions_url();
                debug!(
                    url = %url,
                    model = %request.model,
                    messages = request.messages.len(),
                    "sending chat completion request"
                );

                let response = client
                    .post(&url)
                    .bearer_auth(actual_api_key)
                    .json(&request)
                    .send()
                    .await?;

                if response.status().is_success() {
                    let body = response.text().await?;
                    let chat_response = serde_json::from_str::<ChatCompletionResponse>(&body)?;
                    Ok(chat_response)
                } else {
                    let status = response.status();
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    Err(ApiConnectionError::ApiError { status, error_body })
                }
            }
        }
    }

    /// Sends the conversation verbatim and returns the first choice's text.
    pub async fn complete(
        &self,
        conversation: &[ChatMessage],
        max_tokens: u32,
        temperature: f32,
    ) -> CompletionOutcome {
        let request = ChatCompletionRequest {
            model: self.model().to_string(),
            messages: conversation.to_vec(),
            temperature: Some(temperature),
            max_tokens: Some(max_tokens),
        };

        match self.call_chat_completion(request).await {
            Ok(response) => match response.first_text() {
                Some(text) if !text.trim().is_empty() => CompletionOutcome::Success {
                    text: text.to_string(),
                },
                _ => {
                    warn!("chat completion returned no content");
                    CompletionOutcome::Failure {
                        kind: FailureKind::EmptyReply,
                        message: "No response choices received from API".to_string(),
                    }
                }
            },
            Err(e) => {
                warn!(error = %e, "chat completion failed");
                e.into()
            }
        }
    }
}
