use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4-0314";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_RECIPE_MAX_TOKENS: u32 = 400;
pub const DEFAULT_MENU_MAX_TOKENS: u32 = 3000;

/// Settings for the chat-completion endpoint, read from the environment (and `.env`).
#[derive(Debug, Clone, PartialEq)]
pub struct LlmConfig {
    pub api_key_env_var: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub recipe_max_tokens: u32,
    pub menu_max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key_env_var: DEFAULT_API_KEY_ENV_VAR.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            recipe_max_tokens: DEFAULT_RECIPE_MAX_TOKENS,
            menu_max_tokens: DEFAULT_MENU_MAX_TOKENS,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            api_key_env_var: lookup("LLM_API_KEY_ENV").unwrap_or(defaults.api_key_env_var),
            base_url: lookup("LLM_API_BASE").unwrap_or(defaults.base_url),
            model: lookup("LLM_MODEL").unwrap_or(defaults.model),
            temperature: parse_or("LLM_TEMPERATURE", &lookup, defaults.temperature)?,
            recipe_max_tokens: parse_or("LLM_RECIPE_MAX_TOKENS", &lookup, defaults.recipe_max_tokens)?,
            menu_max_tokens: parse_or("LLM_MENU_MAX_TOKENS", &lookup, defaults.menu_max_tokens)?,
        })
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for {}: '{}'", key, raw)),
        None => Ok(default),
    }
}
