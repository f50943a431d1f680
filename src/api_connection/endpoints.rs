use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

#[derive(Clone, Debug)]
pub enum Provider {
    /// Any endpoint speaking the OpenAI chat-completions protocol.
    OpenAi {
        /// Name of the environment variable holding the key, not the key itself.
        api_key: String,
        base_url: String,
        model: String,
    },
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponseMessage {
    pub role: String,
    // Some providers send `null` content for refusals.
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionChoice {
    pub message: ChatCompletionResponseMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub index: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: Option<u32>,
    #[serde(default)]
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<ChatCompletionChoice>,
    #[serde(default)]
    pub usage: Option<ChatCompletionUsage>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if the provider returned any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}

impl Provider {
    pub fn openai(config: &LlmConfig) -> Self {
        Self::OpenAi {
            api_key: config.api_key_env_var.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Provider::OpenAi { model, .. } => model,
        }
    }

    pub fn chat_completions_url(&self) -> String {
        match self {
            Provider::OpenAi { base_url, .. } => format!("{}/chat/completions", base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn test_request_omits_unset_sampling_fields() {
        let request = ChatCompletionRequest {
            model: "gpt-4-0314".to_string(),
            messages: vec![ChatMessage::user("Hello")],
            temperature: None,
            max_tokens: Some(400),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert_eq!(value["max_tokens"], 400);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_first_text_handles_null_content() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":null},"index":0}]}"#,
        )
        .unwrap();
        assert_eq!(response.first_text(), None);
    }

    #[test]
    fn test_partial_usage_still_parses() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Monday Lunch: Soup"}}],"usage":{"completion_tokens":12}}"#,
        )
        .unwrap();
        assert_eq!(response.first_text(), Some("Monday Lunch: Soup"));
        let usage = response.usage.unwrap();
        assert_eq!(usage.completion_tokens, Some(12));
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.total_tokens, 0);
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = LlmConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..LlmConfig::default()
        };
        let provider = Provider::openai(&config);
        assert_eq!(
            provider.chat_completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }
}
